//! Help authoring checks over whole help directories.

mod common;

use common::TestFixture;

#[test]
fn fixture_help_is_clean() {
    let fixture = TestFixture::load("az").expect("Failed to load az fixture");
    let result = fixture.run(&["lint"]);
    assert!(result.success, "stdout: {}\nstderr: {}", result.stdout, result.stderr);
    assert_eq!(result.stdout, "0 error(s), 0 warning(s)\n");
}

#[test]
fn authoring_errors_fail_the_run() {
    let fixture = TestFixture::load("az").expect("Failed to load az fixture");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(
        &path,
        r#"
vm list:
  type: group
  parameters:
    - name: --all
      short-summary: Not an argument of vm list.
vm remove:
  short-summary: Not a command.
"#,
    )
    .unwrap();

    let result = fixture.run_with_help(&["lint", "--json"], &[path.as_path()], &[]);
    assert!(!result.success);
    let report: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(report["errors"], 2);
    assert_eq!(report["warnings"], 1);
    let rules: Vec<(&str, &str)> = report["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["path"].as_str().unwrap(), f["rule"].as_str().unwrap()))
        .collect();
    assert_eq!(
        rules,
        vec![
            ("vm list", "type-mismatch"),
            ("vm list", "unknown-parameter"),
            ("vm remove", "unknown-help-entry"),
        ]
    );
    assert!(result.stderr.contains("2 help authoring error(s)"));
}
