use super::*;
use pretty_assertions::assert_eq;

#[test]
fn selection_is_closed_over_requirements() {
    let schedule = Schedule::new(&["match-exhaustiveness"]).unwrap();
    assert_eq!(
        schedule.passes(),
        [PassId::VariantDiscovery, PassId::MatchExhaustiveness]
    );
    assert!(!schedule.contains(PassId::EnumTotality));
}

#[test]
fn order_does_not_depend_on_spelling() {
    let forward = Schedule::new(&["enum-totality", "match-exhaustiveness"]).unwrap();
    let backward = Schedule::new(&["match-exhaustiveness", "enum-totality"]).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward, Schedule::all());
}

#[test]
fn every_pass_schedules_like_all() {
    assert_eq!(Schedule::from_passes(&PassId::ALL), Schedule::all());
    assert_eq!(Schedule::default(), Schedule::all());
}

#[test]
fn duplicates_are_scheduled_once() {
    let schedule = Schedule::new(&["enum-inference", " enum-inference "]).unwrap();
    assert_eq!(schedule.passes(), [PassId::EnumInference]);
}

#[test]
fn unknown_pass_is_rejected() {
    let err = Schedule::new(&["enum-inference", "nakedreturn"]).unwrap_err();
    assert_eq!(err, DriverError::UnknownPass("nakedreturn".to_owned()));
    assert_eq!(err.to_string(), "unknown pass `nakedreturn`");
}

#[test]
fn empty_selection_schedules_nothing() {
    let schedule = Schedule::new::<&str>(&[]).unwrap();
    assert!(schedule.passes().is_empty());
}
