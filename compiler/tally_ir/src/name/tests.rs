use super::*;

#[test]
fn well_known_names_are_distinct() {
    let names = [Name::EMPTY, Name::BLANK, Name::INT, Name::IOTA];
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn blank_detection() {
    assert!(Name::BLANK.is_blank());
    assert!(!Name::IOTA.is_blank());
    assert_eq!(Name::from_raw(Name::INT.raw()), Name::INT);
}
