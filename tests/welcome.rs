//! First-run welcome screen and privacy statement.

mod common;

use common::TestFixture;

#[test]
fn privacy_statement_only_on_first_run() {
    let fixture = TestFixture::load("az").expect("Failed to load az fixture");

    let first = fixture.run(&["welcome"]);
    assert!(first.success, "stderr: {}", first.stderr);
    assert_eq!(
        first.stdout,
        "Telemetry is collected; see https://aka.ms/privacy.\nWelcome to the cool new Azure CLI!\n    vm : Manage Linux or Windows virtual machines.\n"
    );

    let config = std::fs::read_to_string(fixture.config_dir.path().join("config.json")).unwrap();
    let config: serde_json::Value = serde_json::from_str(&config).unwrap();
    assert_eq!(config["core"]["first_run"], "yes");

    let second = fixture.run(&["welcome"]);
    assert!(second.success, "stderr: {}", second.stderr);
    assert_eq!(
        second.stdout,
        "Welcome to the cool new Azure CLI!\n    vm : Manage Linux or Windows virtual machines.\n"
    );
}

#[test]
fn first_run_env_override_suppresses_privacy_statement() {
    let fixture = TestFixture::load("az").expect("Failed to load az fixture");
    let result = fixture.run_with_env(&["welcome"], &[("AZ_CORE_FIRST_RUN", "yes")]);
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(!result.stdout.contains("Telemetry"));
}
