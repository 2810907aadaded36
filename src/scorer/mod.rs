pub mod engine;
pub mod types;

pub use self::types::{Attempt, Pin, ScoredPin};

use crate::error::PdResult;
use crate::keypad::{DistanceClass, Key, TransitionMap};
use crate::model::TimingModel;

/// The complete 4-digit candidate space plus the transition classes every
/// path crosses. Built once; reused for every attempt (nothing here
/// depends on observed timings).
///
/// Layout is a flat arena in enumeration order: index i holds the
/// zero-padded PIN i, so "0000" is first and "9999" last.
pub struct CandidateSpace {
    pins: Vec<Pin>,
    digit_classes: [[DistanceClass; 10]; 10],
    entry_classes: [DistanceClass; 10],
}

impl CandidateSpace {
    pub fn new(map: &TransitionMap) -> PdResult<CandidateSpace> {
        let pins: Vec<Pin> = (0..10_000).map(Pin::from_index).collect();

        let mut digit_classes = [[DistanceClass::DistZero; 10]; 10];
        for prev in 0..10u8 {
            for next in 0..10u8 {
                digit_classes[prev as usize][next as usize] =
                    map.classify(Key::Digit(prev), Key::Digit(next))?;
            }
        }

        let mut entry_classes = [DistanceClass::DistZero; 10];
        for d in 0..10u8 {
            entry_classes[d as usize] = map.classify(Key::Enter, Key::Digit(d))?;
        }

        Ok(CandidateSpace {
            pins,
            digit_classes,
            entry_classes,
        })
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub(crate) fn digit_class(&self, prev: usize, next: usize) -> DistanceClass {
        self.digit_classes[prev][next]
    }

    pub(crate) fn entry_class(&self, digit: usize) -> DistanceClass {
        self.entry_classes[digit]
    }

    /// Score all 10,000 candidates against one attempt.
    pub fn score_attempt(&self, model: &TimingModel, attempt: &Attempt) -> PdResult<Vec<ScoredPin>> {
        engine::score_attempt(self, model, attempt)
    }
}
