use crate::error::PdResult;
use crate::keypad::TransitionMap;
use crate::model::TimingModel;
use crate::ranker::{rank, Ranking};
use crate::scorer::{Attempt, CandidateSpace};
use rayon::prelude::*;

/// A fitted model plus the reusable candidate topology. Everything inside
/// is read-only after construction, so attempts can be evaluated from any
/// number of threads.
pub struct InferenceSession {
    map: TransitionMap,
    model: TimingModel,
    space: CandidateSpace,
}

impl InferenceSession {
    pub fn new(model: TimingModel) -> PdResult<InferenceSession> {
        let map = TransitionMap::standard();
        let space = CandidateSpace::new(&map)?;
        Ok(InferenceSession { map, model, space })
    }

    pub fn model(&self) -> &TimingModel {
        &self.model
    }

    pub fn transition_map(&self) -> &TransitionMap {
        &self.map
    }

    pub fn candidate_space(&self) -> &CandidateSpace {
        &self.space
    }

    /// Score and rank one attempt against its known true PIN.
    pub fn rank_attempt(&self, attempt: &Attempt, true_pin: &str) -> PdResult<Ranking> {
        let scored = self.space.score_attempt(&self.model, attempt)?;
        rank(scored, true_pin)
    }

    /// Guess rank for every labeled attempt, evaluated in parallel.
    /// Returns positions in input order; any failing attempt fails the
    /// batch.
    pub fn evaluate(&self, labeled: &[(Attempt, String)]) -> PdResult<Vec<usize>> {
        labeled
            .par_iter()
            .map(|(attempt, pin)| self.rank_attempt(attempt, pin).map(|r| r.position))
            .collect()
    }
}
