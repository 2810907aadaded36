use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub fit: FitParams,
}

#[derive(Args, Debug, Clone)]
pub struct FitParams {
    /// Delays at or above this global percentile are discarded before
    /// fitting (capture-rig pauses, not typing rhythm).
    #[arg(long, default_value_t = 95.0)]
    pub outlier_percentile: f64,

    /// A class needs at least this many delays to fit; thinner classes
    /// refuse to score.
    #[arg(long, default_value_t = 3)]
    pub min_class_samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fit: FitParams {
                outlier_percentile: 95.0,
                min_class_samples: 3,
            },
        }
    }
}
