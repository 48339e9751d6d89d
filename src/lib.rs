//! Prospect reply drafting service.
//!
//! Loads a corpus of past prospect messages and responses, embeds it once at
//! startup, and serves `POST /generate-response/`: the closest examples are
//! retrieved for each incoming message and a chat model drafts a reply
//! modeled on them.

pub mod core;
pub mod corpus;
pub mod llm;
pub mod rag;
pub mod server;
pub mod state;
