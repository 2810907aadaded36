use crate::reports;
use clap::Args;
use pindrop::config::Config;
use pindrop::corpus;
use pindrop::error::PdResult;
use pindrop::keypad::{DistanceClass, TransitionMap};
use pindrop::model::{FittedClass, TimingModel};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub config: Config,

    /// Keystroke log CSV (user, pin, key, time_ms)
    #[arg(short, long)]
    pub log: String,

    /// Write fitted parameters to this JSON file as well
    #[arg(long)]
    pub json: Option<String>,
}

#[derive(Serialize)]
struct ClassParams {
    class: DistanceClass,
    #[serde(flatten)]
    params: FittedClass,
}

pub fn run(args: FitArgs) -> PdResult<()> {
    println!("📂 Loading keystroke log: {}", args.log);

    let map = TransitionMap::standard();
    let corpus = corpus::corpus_from_log(&args.log, &map, args.config.fit.outlier_percentile)?;

    let total: usize = corpus.values().map(|v| v.len()).sum();
    println!(
        "   {} delays across {} classes after outlier filtering (p{})",
        total,
        corpus.len(),
        args.config.fit.outlier_percentile
    );

    let model = TimingModel::fit_with(&corpus, args.config.fit.min_class_samples)?;

    reports::model_table(&model.classes(), &model.unfitted_classes());

    if let Some(path) = &args.json {
        let rows: Vec<ClassParams> = model
            .classes()
            .into_iter()
            .map(|(class, params)| ClassParams { class, params })
            .collect();
        std::fs::write(path, serde_json::to_string_pretty(&rows)?)?;
        println!("💾 Wrote fitted parameters to {}", path);
    }

    Ok(())
}
