use crate::error::PdResult;
use crate::keypad::{Key, TransitionMap};
use crate::model::TrainingCorpus;
use crate::scorer::Attempt;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::warn;

pub const KEY_ENTER: char = 'e';
pub const KEY_BACKSPACE: char = 'b';

/// Default percentile above which delays are discarded as pauses rather
/// than typing rhythm.
pub const DEFAULT_OUTLIER_PERCENTILE: f64 = 95.0;

/// One raw keystroke from a capture log: which user, which PIN they were
/// asked to type, the key, and the press timestamp in ms.
#[derive(Debug, Clone, Deserialize)]
pub struct KeystrokeRow {
    pub user: String,
    pub pin: String,
    pub key: char,
    pub time_ms: i64,
}

/// One keystroke sequence that cleanly entered its labeled PIN:
/// the 4 digits followed by the enter press, timestamps ascending.
#[derive(Debug, Clone)]
pub struct CleanAttempt {
    pub user: String,
    pub pin: String,
    pub keys: Vec<(char, i64)>,
}

pub fn load_keystroke_log<P: AsRef<Path>>(path: P) -> PdResult<Vec<KeystrokeRow>> {
    let file = File::open(path.as_ref())?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows: Vec<KeystrokeRow> = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "skipped malformed keystroke rows");
    }

    rows.sort_by_key(|r| r.time_ms);
    Ok(rows)
}

/// Left-pad a PIN label to the canonical 4-digit form ("7" -> "0007").
pub fn zero_pad4(label: &str) -> String {
    let padded = format!("0000{}", label);
    padded[padded.len() - 4..].to_string()
}

/// Split each user's per-PIN keystroke stream into individual attempts at
/// the enter presses, keeping only attempts that are clean: no backspace,
/// and the typed digits match the labeled PIN.
pub fn clean_attempts(rows: &[KeystrokeRow]) -> Vec<CleanAttempt> {
    let mut streams: HashMap<(String, String), Vec<(char, i64)>> = HashMap::new();
    let mut order: Vec<(String, String)> = Vec::new();
    for row in rows {
        let id = (row.user.clone(), row.pin.clone());
        if !streams.contains_key(&id) {
            order.push(id.clone());
        }
        streams.entry(id).or_default().push((row.key, row.time_ms));
    }

    let mut out = Vec::new();
    for id in order {
        let (user, pin) = id.clone();
        let expected = zero_pad4(&pin);
        let stream = &streams[&id];

        let mut attempt: Vec<(char, i64)> = Vec::new();
        let mut saw_backspace = false;

        for &(key, time) in stream {
            if key == KEY_BACKSPACE {
                saw_backspace = true;
            }

            if key != KEY_ENTER {
                attempt.push((key, time));
                continue;
            }

            // Enter closes the attempt; keep its keystroke so the trailing
            // digit->enter delay is recoverable.
            attempt.push((key, time));

            let typed: String = attempt
                .iter()
                .take(attempt.len() - 1)
                .map(|&(k, _)| k)
                .collect();

            if !saw_backspace && typed == expected {
                out.push(CleanAttempt {
                    user: user.clone(),
                    pin: expected.clone(),
                    keys: std::mem::take(&mut attempt),
                });
            } else {
                attempt.clear();
            }
            saw_backspace = false;
        }
    }

    out
}

/// Turn cleaned attempts into per-class delay observations. Consecutive
/// keystroke pairs within an attempt become one (class, delay) sample,
/// including the trailing digit->enter pair.
pub fn build_corpus(attempts: &[CleanAttempt], map: &TransitionMap) -> PdResult<TrainingCorpus> {
    let mut corpus: TrainingCorpus = HashMap::new();

    for attempt in attempts {
        for window in attempt.keys.windows(2) {
            let (key_a, time_a) = window[0];
            let (key_b, time_b) = window[1];
            let delay = time_b - time_a;
            if delay < 0 {
                warn!(user = %attempt.user, delay, "dropping negative inter-key delay");
                continue;
            }

            let (prev, next) = match (Key::from_char(key_a), Key::from_char(key_b)) {
                (Some(p), Some(n)) => (p, n),
                _ => {
                    warn!(user = %attempt.user, key_a = %key_a, key_b = %key_b, "dropping unrecognized keystroke pair");
                    continue;
                }
            };

            let class = map.classify(prev, next)?;
            corpus.entry(class).or_default().push(delay as u32);
        }
    }

    Ok(corpus)
}

/// Drop every delay at or above the global `percentile` threshold. The
/// threshold is computed over all classes pooled, mirroring how the
/// capture rig's pauses contaminate every class alike.
pub fn filter_outliers(corpus: TrainingCorpus, percentile: f64) -> TrainingCorpus {
    let mut all: Vec<u32> = corpus.values().flatten().copied().collect();
    if all.is_empty() {
        return corpus;
    }
    all.sort_unstable();

    let bar = percentile_linear(&all, percentile);

    corpus
        .into_iter()
        .map(|(class, delays)| {
            let kept: Vec<u32> = delays.into_iter().filter(|&d| (d as f64) < bar).collect();
            (class, kept)
        })
        .collect()
}

/// Linear-interpolated percentile over sorted values.
fn percentile_linear(sorted: &[u32], percentile: f64) -> f64 {
    let p = percentile.clamp(0.0, 100.0);
    if sorted.len() == 1 {
        return sorted[0] as f64;
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;
    if lo + 1 >= sorted.len() {
        return sorted[sorted.len() - 1] as f64;
    }
    let a = sorted[lo] as f64;
    let b = sorted[lo + 1] as f64;
    a + frac * (b - a)
}

/// Full ingestion pipeline: log file -> cleaned attempts -> per-class
/// delays with outliers removed.
pub fn corpus_from_log<P: AsRef<Path>>(
    path: P,
    map: &TransitionMap,
    outlier_percentile: f64,
) -> PdResult<TrainingCorpus> {
    let rows = load_keystroke_log(path)?;
    let attempts = clean_attempts(&rows);
    let corpus = build_corpus(&attempts, map)?;
    Ok(filter_outliers(corpus, outlier_percentile))
}

/// One labeled inference attempt: the true PIN and the 4 delays, aligned
/// enter->d1, d1->d2, d2->d3, d3->d4.
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptRow {
    pub pin: String,
    pub t1: i64,
    pub t2: i64,
    pub t3: i64,
    pub t4: i64,
}

/// Load labeled attempts for inference. A malformed delay tuple rejects
/// the load (fail fast, no partial scoring downstream).
pub fn load_attempts<P: AsRef<Path>>(path: P) -> PdResult<Vec<(Attempt, String)>> {
    let file = File::open(path.as_ref())?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut out = Vec::new();
    for result in rdr.deserialize() {
        let row: AttemptRow = result?;
        let attempt = Attempt::new(&[row.t1, row.t2, row.t3, row.t4])?;
        out.push((attempt, zero_pad4(&row.pin)));
    }
    Ok(out)
}
