use crate::error::{PdResult, PindropError};
use crate::scorer::{Pin, ScoredPin};

/// The full guess order for one attempt plus where the truth landed.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// All candidates, best guess first. Scores are non-increasing; equal
    /// scores order by pin string ascending.
    pub ordered: Vec<ScoredPin>,
    /// 0-based index of the true PIN: the number of wrong guesses an
    /// optimal attacker burns before hitting it.
    pub position: usize,
}

/// Sort scored candidates into guess order and locate the true PIN.
///
/// Scores are finite by construction (the model clamps underflow), so
/// `total_cmp` gives a deterministic total order; the lexical tie-break
/// keeps repeated runs byte-identical.
pub fn rank(mut scored: Vec<ScoredPin>, true_pin: &str) -> PdResult<Ranking> {
    let truth: Pin = true_pin.parse()?;

    scored.sort_unstable_by(|a, b| b.score.total_cmp(&a.score).then(a.pin.cmp(&b.pin)));

    let position = scored
        .iter()
        .position(|s| s.pin == truth)
        .ok_or_else(|| PindropError::CandidateNotFound(true_pin.to_string()))?;

    Ok(Ranking {
        ordered: scored,
        position,
    })
}
