//! Deployment driver tests.
//!
//! Wire-level assertions go through a fake `aws` binary on PATH that records
//! every invocation; tests that touch PATH are serialized.

mod helpers;

use helpers::{FakeAws, TestEnv};
use serial_test::serial;

use landingctl::target::{parse_or_usage, Target, USAGE};
use landingctl::{aws, commands, deploy, preflight};

#[test]
fn missing_target_fails_with_usage_text() {
    let err = parse_or_usage(None).unwrap_err();
    assert!(err.to_string().contains(USAGE));
}

#[test]
fn unrecognized_target_fails_with_usage_text() {
    let err = parse_or_usage(Some("prod")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unknown deployment target 'prod'"));
    assert!(msg.contains(USAGE));
}

#[test]
fn all_expands_to_auth_then_connect() {
    let env = TestEnv::new();
    let specs = Target::All.resolve(&env.config());
    let names: Vec<_> = specs.iter().map(|s| s.name).collect();
    assert_eq!(names, ["auth", "connect"]);
}

#[test]
fn dry_run_needs_no_aws_cli() {
    let env = TestEnv::new();
    commands::cmd_deploy(&env.config(), Some("all"), true).expect("dry run");
}

#[test]
#[serial]
fn auth_deploy_uploads_then_invalidates_in_order() {
    let env = TestEnv::new();
    let fake = FakeAws::install();
    let config = env.config();

    let steps = deploy::plan(&Target::Auth.resolve(&config));
    deploy::execute(&config, &steps).expect("deploy");

    let lines = fake.lines();
    assert_eq!(lines.len(), 2, "expected upload + invalidation, got {lines:?}");

    assert!(lines[0].starts_with("s3 cp"), "first call: {}", lines[0]);
    assert!(lines[0].contains("s3://auth-test-bucket/index.html"));
    assert!(lines[0].contains("--content-type text/html"));
    assert!(lines[0].contains("--cache-control public, max-age=300"));
    assert!(lines[0].contains("--region us-east-1"));

    assert!(
        lines[1].starts_with("cloudfront create-invalidation"),
        "second call: {}",
        lines[1]
    );
    assert!(lines[1].contains("--distribution-id E1AUTHTEST"));
    assert!(lines[1].contains("--paths /*"));
}

#[test]
#[serial]
fn all_deploy_runs_targets_in_order() {
    let env = TestEnv::new();
    let fake = FakeAws::install();
    let config = env.config();

    let steps = deploy::plan(&Target::All.resolve(&config));
    deploy::execute(&config, &steps).expect("deploy");

    // auth has a distribution, connect does not: upload, invalidate, upload.
    let lines = fake.lines();
    assert_eq!(lines.len(), 3, "unexpected calls: {lines:?}");
    assert!(lines[0].contains("s3://auth-test-bucket/"));
    assert!(lines[1].starts_with("cloudfront create-invalidation"));
    assert!(lines[2].contains("s3://connect-test-bucket/"));
}

#[test]
#[serial]
fn missing_distribution_skips_invalidation_but_succeeds() {
    let env = TestEnv::new();
    let fake = FakeAws::install();
    let config = env.config();

    let steps = deploy::plan(&Target::Connect.resolve(&config));
    deploy::execute(&config, &steps).expect("deploy should still succeed");

    let lines = fake.lines();
    assert_eq!(lines.len(), 1, "only the upload should run: {lines:?}");
    assert!(lines[0].starts_with("s3 cp"));
    assert!(!lines.iter().any(|l| l.contains("create-invalidation")));
}

#[test]
#[serial]
fn caller_identity_parses_the_cli_json() {
    let env = TestEnv::new();
    let _fake = FakeAws::install();

    let identity = aws::caller_identity(&env.config()).expect("identity");
    assert_eq!(identity.account, "123456789012");
    assert_eq!(identity.arn, "arn:aws:iam::123456789012:user/ci");
}

#[test]
#[serial]
fn deploy_gate_passes_with_cli_credentials_and_asset() {
    let env = TestEnv::new();
    let _fake = FakeAws::install();
    preflight::ensure_ready(&env.config()).expect("gate");
}

#[test]
#[serial]
fn deploy_gate_rejects_a_missing_asset() {
    let env = TestEnv::new();
    let _fake = FakeAws::install();

    let mut config = env.config();
    config.asset = env.asset.with_file_name("missing.html");

    let err = preflight::ensure_ready(&config).unwrap_err();
    assert!(err.to_string().contains("landing asset"));
}

#[test]
#[serial]
fn full_deploy_command_exits_cleanly() {
    let env = TestEnv::new();
    let fake = FakeAws::install();

    commands::cmd_deploy(&env.config(), Some("auth"), false).expect("deploy command");

    // Gate (sts) + upload + invalidation.
    let lines = fake.lines();
    assert_eq!(lines.len(), 3, "unexpected calls: {lines:?}");
    assert!(lines[0].starts_with("sts get-caller-identity"));
    assert!(lines[1].starts_with("s3 cp"));
    assert!(lines[2].starts_with("cloudfront create-invalidation"));
}
