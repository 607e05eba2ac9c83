//! Vote tallies and per-prompt winners

use crate::error::{Result, RoomError};
use crate::types::{PromptResult, Submission};
use std::collections::BTreeMap;

/// Zeroed tally for every prompt, sized to that prompt's submission count.
/// Prompts nobody answered get an empty tally.
pub fn empty_tallies(
    prompt_count: usize,
    submissions: &BTreeMap<usize, Vec<Submission>>,
) -> BTreeMap<usize, Vec<u64>> {
    (0..prompt_count)
        .map(|idx| {
            let len = submissions.get(&idx).map_or(0, Vec::len);
            (idx, vec![0; len])
        })
        .collect()
}

/// Add one vote; the tally never grows past its submission count
pub fn increment(
    tallies: &mut BTreeMap<usize, Vec<u64>>,
    prompt_index: usize,
    submission_index: usize,
) -> Result<u64> {
    let counts = tallies
        .get_mut(&prompt_index)
        .ok_or_else(|| RoomError::bad_request(format!("No tally for prompt {}", prompt_index)))?;

    let len = counts.len();
    let slot = counts.get_mut(submission_index).ok_or_else(|| {
        RoomError::bad_request(format!(
            "Submission index {} out of range ({} submissions)",
            submission_index, len
        ))
    })?;

    *slot += 1;
    Ok(*slot)
}

/// Lowest index holding the maximum count, `None` for an empty tally
pub fn winner_index(counts: &[u64]) -> Option<usize> {
    counts
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u64)>, (idx, &count)| match best {
            Some((_, top)) if count <= top => best,
            _ => Some((idx, count)),
        })
        .map(|(idx, _)| idx)
}

pub fn compute_results(tallies: &BTreeMap<usize, Vec<u64>>) -> BTreeMap<usize, PromptResult> {
    tallies
        .iter()
        .map(|(&idx, counts)| {
            (
                idx,
                PromptResult {
                    winner_index: winner_index(counts),
                    counts: counts.clone(),
                },
            )
        })
        .collect()
}
