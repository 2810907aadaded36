use crate::error::{PdResult, PindropError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One 4-digit PIN candidate, stored as raw digits. `Ord` is lexical on
/// the zero-padded string, which the ranker relies on for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct Pin([u8; 4]);

impl Pin {
    pub fn new(digits: [u8; 4]) -> PdResult<Pin> {
        if digits.iter().any(|&d| d > 9) {
            return Err(PindropError::CandidateNotFound(format!("{:?}", digits)));
        }
        Ok(Pin(digits))
    }

    /// The candidate at enumeration index `i` (0 -> "0000", 9999 -> "9999").
    pub fn from_index(i: usize) -> Pin {
        debug_assert!(i < 10_000);
        Pin([
            (i / 1000 % 10) as u8,
            (i / 100 % 10) as u8,
            (i / 10 % 10) as u8,
            (i % 10) as u8,
        ])
    }

    pub fn digits(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl From<Pin> for String {
    fn from(p: Pin) -> String {
        p.to_string()
    }
}

impl FromStr for Pin {
    type Err = PindropError;

    fn from_str(s: &str) -> PdResult<Pin> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(|b| b.is_ascii_digit()) {
            return Err(PindropError::CandidateNotFound(s.to_string()));
        }
        Ok(Pin([
            bytes[0] - b'0',
            bytes[1] - b'0',
            bytes[2] - b'0',
            bytes[3] - b'0',
        ]))
    }
}

/// A candidate with its accumulated log-likelihood for one attempt.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredPin {
    pub pin: Pin,
    pub score: f64,
}

/// The 4 inter-key delays (ms) of one observed PIN entry, aligned so
/// delay i ends at digit position i: enter->d1, d1->d2, d2->d3, d3->d4.
/// The trailing d4->enter stroke is not part of the tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attempt {
    delays: [f64; 4],
}

impl Attempt {
    /// Validates count and sign before any scoring can happen.
    pub fn new(delays: &[i64]) -> PdResult<Attempt> {
        if delays.len() != 4 {
            return Err(PindropError::InvalidAttemptLength(delays.len()));
        }
        let mut out = [0.0f64; 4];
        for (i, &d) in delays.iter().enumerate() {
            if d < 0 {
                return Err(PindropError::InvalidAttemptDelay {
                    index: i,
                    delay_ms: d,
                });
            }
            out[i] = d as f64;
        }
        Ok(Attempt { delays: out })
    }

    pub fn delays(&self) -> [f64; 4] {
        self.delays
    }
}

impl From<[u32; 4]> for Attempt {
    fn from(ms: [u32; 4]) -> Attempt {
        Attempt {
            delays: [ms[0] as f64, ms[1] as f64, ms[2] as f64, ms[3] as f64],
        }
    }
}
