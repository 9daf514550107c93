//! `changegen check`

use super::test_utils::acme_workspace;
use changegen::cli::map_error;
use changegen::config::ChangegenConfig;
use changegen::error::ApiError;

#[test]
fn test_clean_workspace_passes() {
    let ws = acme_workspace();
    ws.changeset("ok", "---\n\"@acme/tree\": minor\n\"__section\": feature\n---\n\nAdd clone\n");
    let output = ws.run(&["check"]).unwrap();
    assert!(output.ends_with("Checked 1 changeset(s): 0 error(s), 0 warning(s)"), "{}", output);
}

#[test]
fn test_warnings_do_not_fail() {
    let ws = acme_workspace();
    ws.changeset("untitled", "---\n\"@acme/tree\": patch\n---\n");
    let output = ws.run(&["check"]).unwrap();
    assert!(output.contains("missing title"), "{}", output);
    assert!(output.ends_with("0 error(s), 1 warning(s)"), "{}", output);
}

#[test]
fn test_errors_fail_with_report() {
    let ws = acme_workspace();
    ws.changeset("ghost", "---\n\"ghost\": minor\n---\n\nGhost\n")
        .changeset("misc", "---\n\"app\": patch\n\"__section\": misc\n---\n\nMisc\n")
        .changeset("broken", "---\n\"app\": patch\n");

    let err = ws.run(&["check"]).unwrap_err();
    let ApiError::ValidationFailed { errors, ref report } = err else {
        panic!("expected validation failure, got {:?}", err);
    };
    assert_eq!(errors, 3);
    assert!(report.contains("package 'ghost' is not in the workspace"), "{}", report);
    assert!(report.contains("unknown section 'misc'"), "{}", report);
    assert!(report.contains("not terminated"), "{}", report);

    let message = map_error(&err);
    assert!(message.ends_with("Changeset check failed with 3 error(s)"));
}

#[test]
fn test_require_section() {
    let ws = acme_workspace();
    ws.changeset("plain", "---\n\"app\": patch\n---\n\nPlain\n");
    assert!(ws.run(&["check"]).is_ok());

    let mut config = ChangegenConfig::default();
    config.changeset.require_section = true;
    let err = ws.run_with(config, &["check"]).unwrap_err();
    assert!(matches!(err, ApiError::ValidationFailed { errors: 1, .. }));
}

#[test]
fn test_check_json() {
    let ws = acme_workspace();
    ws.changeset("ghost", "---\n\"ghost\": minor\n---\n\nGhost\n");
    let err = ws.run(&["check", "--format", "json"]).unwrap_err();
    let ApiError::ValidationFailed { report, .. } = err else {
        panic!("expected validation failure");
    };
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["changesets"], 1);
    assert_eq!(value["diagnostics"][0]["severity"], "error");
}
