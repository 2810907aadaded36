pub mod gamma;

use crate::error::{PdResult, PindropError};
use crate::keypad::{modeled_classes, DistanceClass};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use self::gamma::{fit_gamma_mle, GammaParams};

/// Observed inter-key delays (ms) grouped by distance class. Consumed once
/// at fit time.
pub type TrainingCorpus = HashMap<DistanceClass, Vec<u32>>;

/// Fitted parameters for one distance class, exposed read-only so reports
/// never re-derive them.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FittedClass {
    pub shape: f64,
    pub loc: f64,
    pub scale: f64,
    /// Share of all modeled training samples that landed in this class.
    pub weight: f64,
    pub samples: usize,
}

/// Per-class gamma timing model. Immutable after `fit`; scoring is pure
/// and safe to share across threads.
pub struct TimingModel {
    fitted: HashMap<DistanceClass, FittedClass>,
    sample_counts: HashMap<DistanceClass, usize>,
    min_samples: usize,
}

impl TimingModel {
    pub const DEFAULT_MIN_SAMPLES: usize = 3;

    pub fn fit(corpus: &TrainingCorpus) -> PdResult<TimingModel> {
        Self::fit_with(corpus, Self::DEFAULT_MIN_SAMPLES)
    }

    /// Fit one gamma per modeled class holding at least `min_samples`
    /// delays. Thinner classes are reported here and refuse to score
    /// later; they still count toward the weight denominator.
    pub fn fit_with(corpus: &TrainingCorpus, min_samples: usize) -> PdResult<TimingModel> {
        let min_samples = min_samples.max(1);

        let mut sample_counts: HashMap<DistanceClass, usize> = HashMap::new();
        let mut total: usize = 0;
        for class in modeled_classes() {
            let count = corpus.get(&class).map_or(0, |v| v.len());
            sample_counts.insert(class, count);
            total += count;
        }

        if total == 0 {
            return Err(PindropError::Validation(
                "Training corpus holds no delays for any modeled class".into(),
            ));
        }

        let mut fitted = HashMap::new();
        for class in modeled_classes() {
            let count = sample_counts[&class];
            if count < min_samples {
                warn!(
                    class = %class,
                    samples = count,
                    required = min_samples,
                    "class lacks training data and will refuse to score"
                );
                continue;
            }

            let delays: Vec<f64> = corpus[&class].iter().map(|&ms| ms as f64).collect();
            let GammaParams { shape, loc, scale } = fit_gamma_mle(&delays);
            let weight = count as f64 / total as f64;

            debug!(
                class = %class,
                shape, loc, scale, weight, samples = count,
                "fitted class distribution"
            );

            fitted.insert(
                class,
                FittedClass {
                    shape,
                    loc,
                    scale,
                    weight,
                    samples: count,
                },
            );
        }

        Ok(TimingModel {
            fitted,
            sample_counts,
            min_samples,
        })
    }

    /// Log-likelihood contribution of observing `delay_ms` on a transition
    /// of `class`: ln(pdf) + ln(class weight). Finite for any delay; a
    /// class below the sample floor is an error, not a neutral score.
    pub fn score(&self, class: DistanceClass, delay_ms: f64) -> PdResult<f64> {
        let f = self
            .fitted
            .get(&class)
            .ok_or(PindropError::InsufficientTrainingData {
                class,
                samples: self.sample_counts.get(&class).copied().unwrap_or(0),
                required: self.min_samples,
            })?;

        let params = GammaParams {
            shape: f.shape,
            loc: f.loc,
            scale: f.scale,
        };
        Ok(params.ln_pdf(delay_ms) + f.weight.ln())
    }

    /// Fitted classes in enum order, for reporting.
    pub fn classes(&self) -> Vec<(DistanceClass, FittedClass)> {
        modeled_classes()
            .filter_map(|c| self.fitted.get(&c).map(|f| (c, *f)))
            .collect()
    }

    /// Classes that did not reach the sample floor, with their counts.
    pub fn unfitted_classes(&self) -> Vec<(DistanceClass, usize)> {
        modeled_classes()
            .filter(|c| !self.fitted.contains_key(c))
            .map(|c| (c, self.sample_counts.get(&c).copied().unwrap_or(0)))
            .collect()
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }
}
