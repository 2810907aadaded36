use pindrop::error::PindropError;
use pindrop::keypad::{DistanceClass, Key, TransitionMap};
use rstest::rstest;
use strum::IntoEnumIterator;

#[test]
fn classify_is_total_over_all_110_transitions() {
    let map = TransitionMap::standard();

    for prev in 0..10u8 {
        for next in 0..10u8 {
            map.classify(Key::Digit(prev), Key::Digit(next))
                .unwrap_or_else(|e| panic!("{}{} failed: {}", prev, next, e));
        }
    }
    for d in 0..10u8 {
        map.classify(Key::Enter, Key::Digit(d)).unwrap();
        map.classify(Key::Digit(d), Key::Enter).unwrap();
    }
}

#[test]
fn classes_partition_the_transition_space() {
    let map = TransitionMap::standard();

    let digit_members: usize = DistanceClass::iter()
        .map(|c| {
            map.members(c)
                .iter()
                .filter(|(_, next)| matches!(next, Key::Digit(_)))
                .count()
        })
        .sum();
    let enter_members: usize = DistanceClass::iter()
        .map(|c| {
            map.members(c)
                .iter()
                .filter(|(_, next)| matches!(next, Key::Enter))
                .count()
        })
        .sum();

    // 100 digit pairs + 10 digit/enter pairs, each in exactly one class.
    assert_eq!(digit_members, 100);
    assert_eq!(enter_members, 10);
}

#[test]
fn class_sizes_match_the_keypad_geometry() {
    let map = TransitionMap::standard();
    let size = |c: DistanceClass| map.members(c).len();

    assert_eq!(size(DistanceClass::DistZero), 10);
    assert_eq!(size(DistanceClass::DistOne), 26);
    assert_eq!(size(DistanceClass::DistTwo), 14);
    assert_eq!(size(DistanceClass::DistThree), 2);
    assert_eq!(size(DistanceClass::DistDiagonalOne), 20);
    assert_eq!(size(DistanceClass::DistDiagonalTwo), 4);
    assert_eq!(size(DistanceClass::DistDogleg), 20);
    assert_eq!(size(DistanceClass::DistLongDogleg), 4);
    for class in DistanceClass::iter().filter(|c| *c >= DistanceClass::ZeroToEnter) {
        assert_eq!(size(class), 1, "{} should hold one transition", class);
    }
}

#[rstest]
#[case(1, 1, DistanceClass::DistZero)]
#[case(1, 2, DistanceClass::DistOne)]
#[case(0, 8, DistanceClass::DistOne)]
#[case(1, 3, DistanceClass::DistTwo)]
#[case(0, 5, DistanceClass::DistTwo)]
#[case(2, 0, DistanceClass::DistThree)]
#[case(0, 2, DistanceClass::DistThree)]
#[case(1, 5, DistanceClass::DistDiagonalOne)]
#[case(0, 7, DistanceClass::DistDiagonalOne)]
#[case(1, 9, DistanceClass::DistDiagonalTwo)]
#[case(7, 3, DistanceClass::DistDiagonalTwo)]
#[case(1, 6, DistanceClass::DistDogleg)]
#[case(4, 0, DistanceClass::DistDogleg)]
#[case(1, 0, DistanceClass::DistLongDogleg)]
#[case(3, 0, DistanceClass::DistLongDogleg)]
fn digit_pairs_land_in_their_class(
    #[case] prev: u8,
    #[case] next: u8,
    #[case] expected: DistanceClass,
) {
    let map = TransitionMap::standard();
    assert_eq!(
        map.classify(Key::Digit(prev), Key::Digit(next)).unwrap(),
        expected
    );
}

#[rstest]
#[case(0, DistanceClass::ZeroToEnter)]
#[case(4, DistanceClass::FourToEnter)]
#[case(9, DistanceClass::NineToEnter)]
fn enter_transitions_key_on_the_digit(#[case] digit: u8, #[case] expected: DistanceClass) {
    let map = TransitionMap::standard();
    assert_eq!(map.classify(Key::Enter, Key::Digit(digit)).unwrap(), expected);
    assert_eq!(map.classify(Key::Digit(digit), Key::Enter).unwrap(), expected);
}

#[test]
fn enter_to_enter_is_rejected() {
    let map = TransitionMap::standard();
    assert!(matches!(
        map.classify(Key::Enter, Key::Enter),
        Err(PindropError::UnrecognizedTransition { .. })
    ));
}

#[test]
fn construction_rejects_duplicate_membership() {
    let sets: &[(DistanceClass, &[&str])] = &[(DistanceClass::DistZero, &["00", "00"])];
    assert!(matches!(
        TransitionMap::from_sets(sets),
        Err(PindropError::Validation(_))
    ));
}

#[test]
fn construction_rejects_coverage_gaps() {
    // A single 10-pair class leaves 90 digit pairs and all enter pairs
    // uncovered; the build must refuse rather than default them.
    let sets: &[(DistanceClass, &[&str])] = &[(
        DistanceClass::DistZero,
        &["00", "11", "22", "33", "44", "55", "66", "77", "88", "99"],
    )];
    assert!(matches!(
        TransitionMap::from_sets(sets),
        Err(PindropError::Validation(_))
    ));
}
