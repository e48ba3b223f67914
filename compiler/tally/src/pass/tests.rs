use super::*;
use pretty_assertions::assert_eq;

#[test]
fn names_round_trip() {
    for pass in PassId::ALL {
        assert_eq!(PassId::from_name(pass.name()), Some(pass));
        assert_eq!(pass.to_string(), pass.name());
        assert!(!pass.doc().is_empty());
    }
    assert_eq!(PassId::from_name("union"), None);
}

#[test]
fn all_lists_requirements_first() {
    for (index, pass) in PassId::ALL.iter().enumerate() {
        for required in pass.requires() {
            let position = PassId::ALL.iter().position(|p| p == required).unwrap();
            assert!(position < index, "{pass} must come after {required}");
        }
    }
}

#[test]
fn only_enum_passes_run_despite_errors() {
    let despite: Vec<PassId> = PassId::ALL
        .into_iter()
        .filter(|pass| pass.run_despite_errors())
        .collect();
    assert_eq!(despite, [PassId::EnumInference, PassId::EnumTotality]);
}

#[test]
fn reporting_pass_matches_its_code() {
    for pass in PassId::ALL {
        if let Some(code) = pass.reports() {
            assert_eq!(PassId::reporting(code), pass);
        }
    }
}
