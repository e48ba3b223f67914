use super::*;
use crate::PassId;
use pretty_assertions::assert_eq;

fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |var| {
        pairs
            .iter()
            .find(|(name, _)| *name == var)
            .map(|(_, value)| (*value).to_owned())
    }
}

#[test]
fn defaults_run_everything_without_limit() {
    let config = CheckConfig::from_vars(vars(&[])).unwrap();
    assert_eq!(config, CheckConfig::default());
    assert_eq!(config.schedule().unwrap(), Schedule::all());
    assert_eq!(config.diagnostics.error_limit, 0);
    assert!(config.diagnostics.deduplicate);
}

#[test]
fn passes_are_read_from_a_comma_list() {
    let config =
        CheckConfig::from_vars(vars(&[(PASSES_VAR, " enum-totality, ,")])).unwrap();
    assert_eq!(config.passes, Some(vec!["enum-totality".to_owned()]));
    assert_eq!(
        config.schedule().unwrap().passes(),
        [PassId::EnumInference, PassId::EnumTotality]
    );
}

#[test]
fn error_limit_is_parsed() {
    let config = CheckConfig::from_vars(vars(&[(ERROR_LIMIT_VAR, "25")])).unwrap();
    assert_eq!(config.diagnostics.error_limit, 25);
}

#[test]
fn malformed_error_limit_is_rejected() {
    let err = CheckConfig::from_vars(vars(&[(ERROR_LIMIT_VAR, "many")])).unwrap_err();
    assert_eq!(
        err,
        DriverError::InvalidConfig {
            var: ERROR_LIMIT_VAR,
            value: "many".to_owned(),
        }
    );
}

#[test]
fn unknown_pass_surfaces_when_scheduling() {
    let config = CheckConfig::default().with_passes(vec!["keyedlit".to_owned()]);
    assert_eq!(
        config.schedule().unwrap_err(),
        DriverError::UnknownPass("keyedlit".to_owned())
    );
}

#[test]
fn builders_override_diagnostics() {
    let config = CheckConfig::default()
        .with_diagnostics(DiagnosticConfig::unlimited())
        .with_error_limit(3);
    assert_eq!(config.diagnostics.error_limit, 3);
    assert!(!config.diagnostics.deduplicate);
}
