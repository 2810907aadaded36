use crate::reports;
use clap::Args;
use pindrop::config::Config;
use pindrop::corpus;
use pindrop::error::PdResult;
use pindrop::keypad::TransitionMap;
use pindrop::model::TimingModel;
use pindrop::InferenceSession;

#[derive(Args, Debug, Clone)]
pub struct InferArgs {
    #[command(flatten)]
    pub config: Config,

    /// Keystroke log CSV to train on (user, pin, key, time_ms)
    #[arg(short, long)]
    pub log: String,

    /// Labeled attempts CSV to rank (pin, t1, t2, t3, t4)
    #[arg(short, long)]
    pub attempts: String,
}

pub fn run(args: InferArgs) -> PdResult<()> {
    println!("📂 Training from keystroke log: {}", args.log);

    let map = TransitionMap::standard();
    let training = corpus::corpus_from_log(&args.log, &map, args.config.fit.outlier_percentile)?;
    let model = TimingModel::fit_with(&training, args.config.fit.min_class_samples)?;
    let session = InferenceSession::new(model)?;

    println!("📂 Loading attempts: {}", args.attempts);
    let labeled = corpus::load_attempts(&args.attempts)?;
    if labeled.is_empty() {
        println!("⚠️  No attempts to rank.");
        return Ok(());
    }

    println!("🔎 Ranking {} attempt(s) over 10,000 candidates...", labeled.len());
    let ranks = session.evaluate(&labeled)?;

    let rows: Vec<(String, usize)> = labeled
        .iter()
        .zip(&ranks)
        .map(|((_, pin), &rank)| (pin.clone(), rank))
        .collect();

    reports::ranking_table(&rows);
    reports::rank_summary(&ranks);

    Ok(())
}
