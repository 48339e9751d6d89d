/// Euclidean distance between two vectors of equal length.
///
/// Returns `None` when the lengths differ.
pub fn l2_distance(query: &[f32], candidate: &[f32]) -> Option<f32> {
    if query.len() != candidate.len() {
        return None;
    }

    let sum: f32 = query
        .iter()
        .zip(candidate.iter())
        .map(|(q, c)| (q - c) * (q - c))
        .sum();
    Some(sum.sqrt())
}

/// True when every component is a finite number.
pub fn is_finite(vector: &[f32]) -> bool {
    vector.iter().all(|value| value.is_finite())
}

/// Ranks candidates by ascending distance to `query`.
///
/// The sort is stable, so equidistant candidates keep their original order.
/// Distances are compared with `total_cmp`; callers keep NaN out by only
/// ranking finite vectors. Returns `None` if any candidate has a different
/// dimension than the query.
pub fn rank_ascending_by_distance(
    query: &[f32],
    candidates: &[Vec<f32>],
) -> Option<Vec<(usize, f32)>> {
    let mut scores = Vec::with_capacity(candidates.len());
    for (idx, candidate) in candidates.iter().enumerate() {
        scores.push((idx, l2_distance(query, candidate)?));
    }

    scores.sort_by(|left, right| left.1.total_cmp(&right.1));
    Some(scores)
}
