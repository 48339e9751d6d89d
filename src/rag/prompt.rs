//! Prompt composition for reply drafting.
//!
//! The template is fixed business policy text with two slots: the prospect's
//! message and the retrieved best-practice examples.

use std::fmt;

use super::retriever::RetrievedContext;

const PREAMBLE: &str = concat!(
    "\n",
    "You are a world-class business development representative. \n",
    "I will share a prospect's message with you and you will give me the best answer that \n",
    "I should send to this prospect based on past best practices, \n",
    "and you will follow ALL of the rules below:\n",
    "\n",
    "1/ Response should be very similar or even identical to the past best practices, \n",
    "in terms of length, tone of voice, logical arguments and other details\n",
    "\n",
    "2/ If the best practice is irrelevant, then try to mimic the style of the best practice to prospect's message\n",
    "\n",
    "Below is a message I received from the prospect:\n",
);

const BEST_PRACTICE_HEADER: &str = concat!(
    "\n",
    "\n",
    "Here is a list of best practices of how we normally respond to prospects in similar scenarios:\n",
);

const CLOSING: &str = concat!(
    "\n",
    "\n",
    "Please write the best response that I should send to this prospect:\n",
);

/// Separator placed between retrieved examples.
const ENTRY_SEPARATOR: &str = "\n\n";

/// The instruction string sent to the language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt(String);

impl ComposedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders the reply-drafting template.
///
/// Slots are filled in a single pass, so placeholder-like text inside the
/// message or the examples is copied through untouched.
pub fn compose(message: &str, context: &RetrievedContext) -> ComposedPrompt {
    let best_practice = context.entries().join(ENTRY_SEPARATOR);

    let mut prompt = String::with_capacity(
        PREAMBLE.len()
            + message.len()
            + BEST_PRACTICE_HEADER.len()
            + best_practice.len()
            + CLOSING.len(),
    );
    prompt.push_str(PREAMBLE);
    prompt.push_str(message);
    prompt.push_str(BEST_PRACTICE_HEADER);
    prompt.push_str(&best_practice);
    prompt.push_str(CLOSING);

    ComposedPrompt(prompt)
}
