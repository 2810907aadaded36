mod common;

use common::uniform_corpus;
use pindrop::model::TimingModel;
use pindrop::ranker::rank;
use pindrop::scorer::{Attempt, CandidateSpace, Pin};
use pindrop::keypad::TransitionMap;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_valid_attempt_scores_every_candidate_finitely(
        delays in proptest::array::uniform4(0i64..5_000)
    ) {
        let model = TimingModel::fit_with(&uniform_corpus(), 1).unwrap();
        let space = CandidateSpace::new(&TransitionMap::standard()).unwrap();
        let attempt = Attempt::new(&delays).unwrap();

        let scored = space.score_attempt(&model, &attempt).unwrap();
        prop_assert_eq!(scored.len(), 10_000);
        for s in &scored {
            prop_assert!(s.score.is_finite());
        }
    }

    #[test]
    fn ranking_is_a_permutation_with_monotone_scores(
        delays in proptest::array::uniform4(0i64..5_000),
        truth in 0usize..10_000
    ) {
        let model = TimingModel::fit_with(&uniform_corpus(), 1).unwrap();
        let space = CandidateSpace::new(&TransitionMap::standard()).unwrap();
        let attempt = Attempt::new(&delays).unwrap();

        let scored = space.score_attempt(&model, &attempt).unwrap();
        let truth_pin = Pin::from_index(truth).to_string();
        let ranking = rank(scored, &truth_pin).unwrap();

        prop_assert!(ranking.position < 10_000);
        prop_assert_eq!(ranking.ordered[ranking.position].pin.to_string(), truth_pin);
        for pair in ranking.ordered.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn wrong_arity_attempts_never_construct(len in 0usize..10) {
        prop_assume!(len != 4);
        let delays = vec![100i64; len];
        prop_assert!(Attempt::new(&delays).is_err());
    }

    #[test]
    fn pin_index_roundtrips(i in 0usize..10_000) {
        let pin = Pin::from_index(i);
        let parsed: Pin = pin.to_string().parse().unwrap();
        prop_assert_eq!(pin, parsed);
        prop_assert_eq!(pin.to_string().len(), 4);
    }
}
