//! Tests to ensure fatal errors carry actionable messages.
//!
//! Runs here only read inputs that contain no domains, so no DNS traffic is
//! generated.

use domain_mail_status::{run_check, CheckError, Config, ConfigError};
use tempfile::TempDir;

#[test]
fn test_config_validation_errors_are_descriptive() {
    let config = Config {
        workers: Some(0),
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    assert!(err.to_string().contains("between 1 and"));

    let config = Config {
        dns_timeout_secs: 0,
        ..Default::default()
    };
    assert!(config
        .validate()
        .unwrap_err()
        .to_string()
        .contains("at least one second"));
}

#[tokio::test]
async fn test_missing_input_file_names_the_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("no_such_domains.txt");
    let config = Config {
        input: Some(missing.clone()),
        output: Some(temp_dir.path().join("out.csv")),
        ..Default::default()
    };

    let err = run_check(config).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Failed to open input file"), "{message}");
    assert!(message.contains("no_such_domains.txt"), "{message}");
}

#[tokio::test]
async fn test_unwritable_output_names_the_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("domains.txt");
    std::fs::write(&input, "").unwrap();
    let config = Config {
        input: Some(input),
        output: Some(temp_dir.path().join("missing_dir").join("out.csv")),
        ..Default::default()
    };

    let err = run_check(config).await.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to create output file"));
}

#[tokio::test]
async fn test_invalid_config_fails_before_opening_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.csv");
    let config = Config {
        input: Some(temp_dir.path().join("absent.txt")),
        output: Some(output.clone()),
        workers: Some(0),
        ..Default::default()
    };

    let err = run_check(config).await.unwrap_err();
    assert!(err.downcast_ref::<ConfigError>().is_some());
    assert!(!output.exists(), "no output is created for invalid config");
}

#[tokio::test]
async fn test_file_run_without_domains_writes_header() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("domains.txt");
    let output = temp_dir.path().join("out.csv");
    std::fs::write(&input, "# nothing to check yet\n\n").unwrap();

    let report = run_check(Config {
        input: Some(input),
        output: Some(output.clone()),
        workers: Some(2),
        ..Default::default()
    })
    .await
    .expect("run without domains should succeed");

    assert_eq!(report.total_domains, 0);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        format!("{}\n", domain_mail_status::config::CSV_HEADER)
    );
}

#[test]
fn test_check_error_messages() {
    let err = CheckError::IncompleteRun {
        dispatched: 3,
        written: 2,
    };
    assert_eq!(
        err.to_string(),
        "3 domains were dispatched but only 2 results were written"
    );

    let err = CheckError::InputRead(std::io::Error::other("device unplugged"));
    assert_eq!(
        err.to_string(),
        "could not read from input: device unplugged"
    );
}
