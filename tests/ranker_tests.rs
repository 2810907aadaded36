mod common;

use common::contrast_corpus;
use pindrop::error::PindropError;
use pindrop::model::TimingModel;
use pindrop::ranker::rank;
use pindrop::scorer::{Attempt, Pin, ScoredPin};
use pindrop::InferenceSession;

fn full_scored_space() -> Vec<ScoredPin> {
    let model = TimingModel::fit_with(&contrast_corpus(), 1).unwrap();
    let session = InferenceSession::new(model).unwrap();
    session
        .candidate_space()
        .score_attempt(session.model(), &Attempt::from([150, 320, 410, 380]))
        .unwrap()
}

#[test]
fn sorted_scores_never_increase() {
    let ranking = rank(full_scored_space(), "0000").unwrap();
    for pair in ranking.ordered.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "{} ({}) sorted above {} ({})",
            pair[0].pin,
            pair[0].score,
            pair[1].pin,
            pair[1].score
        );
    }
}

#[test]
fn position_points_at_the_true_pin() {
    let ranking = rank(full_scored_space(), "4271").unwrap();
    assert_eq!(ranking.ordered[ranking.position].pin.to_string(), "4271");
}

#[test]
fn equal_scores_break_ties_lexically() {
    let flat: Vec<ScoredPin> = (0..10_000)
        .map(|i| ScoredPin {
            pin: Pin::from_index(9_999 - i),
            score: -3.5,
        })
        .collect();

    let ranking = rank(flat, "0042").unwrap();
    assert_eq!(ranking.position, 42);
    for (i, s) in ranking.ordered.iter().enumerate() {
        assert_eq!(s.pin, Pin::from_index(i));
    }
}

#[test]
fn malformed_true_pins_are_candidate_not_found() {
    for bad in ["123", "12345", "12a4", "", "one1"] {
        let err = rank(full_scored_space(), bad).unwrap_err();
        assert!(
            matches!(err, PindropError::CandidateNotFound(_)),
            "'{}' gave {}",
            bad,
            err
        );
    }
}

#[test]
fn evaluate_returns_ranks_in_input_order() {
    let model = TimingModel::fit_with(&contrast_corpus(), 1).unwrap();
    let session = InferenceSession::new(model).unwrap();

    let labeled = vec![
        (Attempt::from([150, 150, 150, 150]), "1111".to_string()),
        (Attempt::from([150, 150, 150, 150]), "2020".to_string()),
        (Attempt::from([400, 400, 400, 400]), "1111".to_string()),
    ];

    let ranks = session.evaluate(&labeled).unwrap();
    assert_eq!(ranks.len(), 3);
    assert_eq!(ranks[0], 0, "the plausible pin should be the first guess");
    assert!(ranks[1] > 0, "an implausible pin cannot rank first");
}
