#![allow(dead_code)] // Not every test file uses every helper.

use pindrop::keypad::DistanceClass;
use pindrop::model::TrainingCorpus;
use strum::IntoEnumIterator;

/// 9 delays spread symmetrically around `center` in `step` increments.
pub fn spread_delays(center: u32, step: u32) -> Vec<u32> {
    (0..9).map(|i| center - 4 * step + i * step).collect()
}

/// A corpus giving every modeled class the same 9-sample cluster around
/// 300ms. Good enough to fit everything without favoring any candidate.
pub fn uniform_corpus() -> TrainingCorpus {
    DistanceClass::iter()
        .map(|class| (class, spread_delays(300, 10)))
        .collect()
}

/// A corpus where same-key repeats and the 1-to-enter entry cluster
/// tightly around 150ms while every other class sits around 400ms. An
/// attempt of four 150ms delays then has exactly one plausible candidate:
/// "1111".
pub fn contrast_corpus() -> TrainingCorpus {
    DistanceClass::iter()
        .map(|class| {
            let delays = match class {
                DistanceClass::DistZero | DistanceClass::OneToEnter => spread_delays(150, 5),
                _ => spread_delays(400, 10),
            };
            (class, delays)
        })
        .collect()
}
