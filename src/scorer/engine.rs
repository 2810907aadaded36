use super::CandidateSpace;
use crate::error::PdResult;
use crate::model::TimingModel;
use crate::scorer::types::{Attempt, ScoredPin};

/// Score every candidate against one attempt.
///
/// The walk is staged: each depth's transition scores are evaluated once
/// against that depth's delay (10 entry transitions + 3 x 100 digit
/// pairs), then the 10,000 paths sum their 4 contributions. Identical to
/// walking the full trie, without re-scoring shared prefixes.
///
/// Any class the model cannot answer for aborts the whole pass before a
/// single candidate is emitted; partial score vectors never escape.
pub fn score_attempt(
    space: &CandidateSpace,
    model: &TimingModel,
    attempt: &Attempt,
) -> PdResult<Vec<ScoredPin>> {
    let [t1, t2, t3, t4] = attempt.delays();

    // Depth 1: enter -> d1.
    let mut entry = [0.0f64; 10];
    for d in 0..10 {
        entry[d] = model.score(space.entry_class(d), t1)?;
    }

    // Depths 2..4: digit -> digit, one 10x10 table per delay.
    let mut steps = [[[0.0f64; 10]; 10]; 3];
    for (level, &t) in [t2, t3, t4].iter().enumerate() {
        for prev in 0..10 {
            for next in 0..10 {
                steps[level][prev][next] = model.score(space.digit_class(prev, next), t)?;
            }
        }
    }

    let mut scored = Vec::with_capacity(10_000);
    for pin in space.pins() {
        let [d1, d2, d3, d4] = pin.digits().map(usize::from);
        let score = entry[d1] + steps[0][d1][d2] + steps[1][d2][d3] + steps[2][d3][d4];
        scored.push(ScoredPin { pin: *pin, score });
    }

    Ok(scored)
}
