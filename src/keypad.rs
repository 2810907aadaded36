use crate::error::{PdResult, PindropError};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// A single key on the PIN pad.
///
/// Reference layout:
/// ```text
///   1 2 3
///   4 5 6
///   7 8 9
///     0     [enter]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Enter,
}

impl Key {
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '0'..='9' => Some(Key::Digit(c as u8 - b'0')),
            'e' => Some(Key::Enter),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Digit(d) => write!(f, "{}", d),
            Key::Enter => write!(f, "enter"),
        }
    }
}

/// Geometry bucket for an ordered key transition. Straight-line distances
/// come in 0..=3, diagonals in two lengths, L-shaped reaches in two
/// lengths, and each digit gets its own bucket for the enter transition
/// (the enter key sits at a different distance from every digit).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumCount,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DistanceClass {
    DistZero,
    DistOne,
    DistTwo,
    DistThree,
    DistDiagonalOne,
    DistDiagonalTwo,
    DistDogleg,
    DistLongDogleg,
    ZeroToEnter,
    OneToEnter,
    TwoToEnter,
    ThreeToEnter,
    FourToEnter,
    FiveToEnter,
    SixToEnter,
    SevenToEnter,
    EightToEnter,
    NineToEnter,
}

/// Membership lists for the standard 12-key pad. Digit pairs read
/// (prev, next); "Xe" marks the digit X paired with enter (either
/// direction collapses to the same class).
const STANDARD_SETS: &[(DistanceClass, &[&str])] = &[
    (
        DistanceClass::DistZero,
        &["00", "11", "22", "33", "44", "55", "66", "77", "88", "99"],
    ),
    (
        DistanceClass::DistOne,
        &[
            "12", "23", "45", "56", "78", "89", "21", "32", "54", "65", "87", "98", "14", "47",
            "25", "58", "36", "69", "41", "74", "52", "85", "63", "96", "80", "08",
        ],
    ),
    (
        DistanceClass::DistTwo,
        &[
            "13", "46", "79", "31", "64", "97", "17", "28", "39", "71", "82", "93", "50", "05",
        ],
    ),
    (DistanceClass::DistThree, &["20", "02"]),
    (
        DistanceClass::DistDiagonalOne,
        &[
            "15", "26", "24", "35", "48", "59", "57", "68", "70", "90", "51", "62", "42", "53",
            "84", "95", "75", "86", "07", "09",
        ],
    ),
    (DistanceClass::DistDiagonalTwo, &["19", "37", "91", "73"]),
    (
        DistanceClass::DistDogleg,
        &[
            "16", "18", "27", "29", "34", "38", "43", "49", "40", "61", "67", "60", "72", "76",
            "81", "83", "92", "94", "04", "06",
        ],
    ),
    (DistanceClass::DistLongDogleg, &["10", "30", "01", "03"]),
    (DistanceClass::ZeroToEnter, &["0e"]),
    (DistanceClass::OneToEnter, &["1e"]),
    (DistanceClass::TwoToEnter, &["2e"]),
    (DistanceClass::ThreeToEnter, &["3e"]),
    (DistanceClass::FourToEnter, &["4e"]),
    (DistanceClass::FiveToEnter, &["5e"]),
    (DistanceClass::SixToEnter, &["6e"]),
    (DistanceClass::SevenToEnter, &["7e"]),
    (DistanceClass::EightToEnter, &["8e"]),
    (DistanceClass::NineToEnter, &["9e"]),
];

/// Immutable transition -> class lookup. Built once, validated for full
/// coverage: all 100 digit pairs and all 10 digit/enter pairs, each in
/// exactly one class.
pub struct TransitionMap {
    digit_pairs: [[DistanceClass; 10]; 10],
    enter_pairs: [DistanceClass; 10],
}

impl TransitionMap {
    /// The standard PIN pad table. The membership data is compile-time
    /// constant, so a coverage failure here is a bug in this file.
    pub fn standard() -> Self {
        Self::from_sets(STANDARD_SETS).expect("standard keypad sets must cover all 110 transitions")
    }

    pub fn from_sets(sets: &[(DistanceClass, &[&str])]) -> PdResult<Self> {
        let mut digit_pairs: [[Option<DistanceClass>; 10]; 10] = [[None; 10]; 10];
        let mut enter_pairs: [Option<DistanceClass>; 10] = [None; 10];

        for (class, members) in sets {
            for pair in *members {
                let mut chars = pair.chars();
                let (a, b) = match (chars.next(), chars.next(), chars.next()) {
                    (Some(a), Some(b), None) => (a, b),
                    _ => {
                        return Err(PindropError::Validation(format!(
                            "Malformed pair '{}' in class '{}'",
                            pair, class
                        )))
                    }
                };

                match (Key::from_char(a), Key::from_char(b)) {
                    (Some(Key::Digit(p)), Some(Key::Digit(n))) => {
                        let slot = &mut digit_pairs[p as usize][n as usize];
                        if let Some(prior) = slot {
                            return Err(PindropError::Validation(format!(
                                "Pair '{}' appears in both '{}' and '{}'",
                                pair, prior, class
                            )));
                        }
                        *slot = Some(*class);
                    }
                    (Some(Key::Digit(d)), Some(Key::Enter)) => {
                        let slot = &mut enter_pairs[d as usize];
                        if let Some(prior) = slot {
                            return Err(PindropError::Validation(format!(
                                "Enter pair '{}' appears in both '{}' and '{}'",
                                pair, prior, class
                            )));
                        }
                        *slot = Some(*class);
                    }
                    _ => {
                        return Err(PindropError::Validation(format!(
                            "Pair '{}' in class '{}' is not digit-digit or digit-enter",
                            pair, class
                        )))
                    }
                }
            }
        }

        let mut digit_table = [[DistanceClass::DistZero; 10]; 10];
        for p in 0..10 {
            for n in 0..10 {
                digit_table[p][n] = digit_pairs[p][n].ok_or_else(|| {
                    PindropError::Validation(format!("Digit pair {}{} is not covered", p, n))
                })?;
            }
        }

        let mut enter_table = [DistanceClass::DistZero; 10];
        for (d, slot) in enter_pairs.iter().enumerate() {
            enter_table[d] = slot.ok_or_else(|| {
                PindropError::Validation(format!("Enter pair {}e is not covered", d))
            })?;
        }

        Ok(TransitionMap {
            digit_pairs: digit_table,
            enter_pairs: enter_table,
        })
    }

    /// Classify one transition. Total over the 110 valid transitions;
    /// anything else (enter->enter, out-of-range digit) is an explicit
    /// error, never a default class.
    pub fn classify(&self, prev: Key, next: Key) -> PdResult<DistanceClass> {
        match (prev, next) {
            (Key::Digit(p), Key::Digit(n)) if p <= 9 && n <= 9 => {
                Ok(self.digit_pairs[p as usize][n as usize])
            }
            (Key::Enter, Key::Digit(d)) | (Key::Digit(d), Key::Enter) if d <= 9 => {
                Ok(self.enter_pairs[d as usize])
            }
            _ => Err(PindropError::UnrecognizedTransition { prev, next }),
        }
    }

    /// Every transition belonging to `class`, as (prev, next) pairs.
    pub fn members(&self, class: DistanceClass) -> Vec<(Key, Key)> {
        let mut out = Vec::new();
        for p in 0..10u8 {
            for n in 0..10u8 {
                if self.digit_pairs[p as usize][n as usize] == class {
                    out.push((Key::Digit(p), Key::Digit(n)));
                }
            }
        }
        for d in 0..10u8 {
            if self.enter_pairs[d as usize] == class {
                out.push((Key::Digit(d), Key::Enter));
            }
        }
        out
    }
}

impl Default for TransitionMap {
    fn default() -> Self {
        Self::standard()
    }
}

/// All classes the timing model fits, in display order.
pub fn modeled_classes() -> impl Iterator<Item = DistanceClass> {
    DistanceClass::iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn standard_table_builds() {
        let map = TransitionMap::standard();
        assert_eq!(
            map.classify(Key::Digit(5), Key::Digit(5)).unwrap(),
            DistanceClass::DistZero
        );
    }

    #[test]
    fn enter_direction_collapses() {
        let map = TransitionMap::standard();
        let fwd = map.classify(Key::Digit(4), Key::Enter).unwrap();
        let rev = map.classify(Key::Enter, Key::Digit(4)).unwrap();
        assert_eq!(fwd, DistanceClass::FourToEnter);
        assert_eq!(fwd, rev);
    }

    #[test]
    fn class_count_is_stable() {
        assert_eq!(DistanceClass::COUNT, 18);
    }
}
