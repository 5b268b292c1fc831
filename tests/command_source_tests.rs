// CommandSource tests
// Runs small shell scripts standing in for the listing and reporting commands
#![cfg(unix)]

use bucketstat::StatError;
use bucketstat::pipeline::{Pipeline, PrefixAggregator};
use bucketstat::repository::{CommandSource, ReportSource};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write an executable `sh` script into `dir`
fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

const LIST: &str = r#"echo '["logs/20230115/",'
echo '"logs/20230116/"]'"#;

const REPORT: &str = r#"printf '2023-01-15 10:00 1024 %s.bin\n' "$1"
printf '2023-01-15 10:01 2048 other.bin\n'
printf '\nTotal Objects: 2\n   Total Size: 3072\n'"#;

#[tokio::test]
async fn test_list_and_fetch() {
    let dir = TempDir::new().unwrap();
    let source = CommandSource::new(script(&dir, "list.sh", LIST), script(&dir, "report.sh", REPORT));

    let prefixes = source.list_prefixes("my-bucket").await.unwrap();
    assert_eq!(prefixes, vec!["logs/20230115/", "logs/20230116/"]);

    let text = source.fetch_report("my-bucket", "logs/20230115/").await.unwrap();
    assert!(text.starts_with("2023-01-15 10:00 1024 my-bucket.bin\n"));
    assert!(text.contains("Total Size: 3072"));
}

#[tokio::test]
async fn test_prefix_passed_as_second_argument() {
    let dir = TempDir::new().unwrap();
    let report = script(&dir, "report.sh", r#"printf 'prefix=%s\n' "$2""#);
    let source = CommandSource::new(script(&dir, "list.sh", LIST), report);

    let text = source.fetch_report("b", "logs/20230116/").await.unwrap();
    assert_eq!(text, "prefix=logs/20230116/\n");
}

#[tokio::test]
async fn test_stderr_output_is_transport_error() {
    let dir = TempDir::new().unwrap();
    let report = script(&dir, "report.sh", "echo 'partial' ; echo 'access denied' >&2");
    let source = CommandSource::new(script(&dir, "list.sh", LIST), report);

    match source.fetch_report("b", "p/").await.unwrap_err() {
        StatError::Transport { reason, .. } => assert!(reason.contains("access denied")),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_non_zero_exit_is_transport_error() {
    let dir = TempDir::new().unwrap();
    let list = script(&dir, "list.sh", "echo '[]'; exit 3");
    let source = CommandSource::new(list, script(&dir, "report.sh", REPORT));

    match source.list_prefixes("b").await.unwrap_err() {
        StatError::Transport { reason, .. } => assert_eq!(reason, "exited with code 3"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_command_is_transport_error() {
    let dir = TempDir::new().unwrap();
    let source = CommandSource::new(dir.path().join("nope.sh"), dir.path().join("nope.sh"));

    assert!(matches!(
        source.list_prefixes("b").await,
        Err(StatError::Transport { .. })
    ));
}

#[tokio::test]
async fn test_pipeline_over_commands() {
    let dir = TempDir::new().unwrap();
    let source = CommandSource::new(script(&dir, "list.sh", LIST), script(&dir, "report.sh", REPORT));

    let prefixes = source.list_prefixes("my-bucket").await.unwrap();
    let outcome = Pipeline::new(PrefixAggregator::new(&source, "my-bucket"))
        .run(&prefixes)
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    let summary = outcome.results.get("20230116").unwrap();
    assert_eq!((summary.count, summary.size, summary.avg), (2, 3072, 1536));
}

#[tokio::test]
async fn test_fail_fast_kills_running_reports() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("finished");
    let report = script(
        &dir,
        "report.sh",
        &format!(
            r#"case "$2" in
  logs/20230115/) exit 1 ;;
  *) sleep 2; touch '{}' ;;
esac"#,
            marker.display()
        ),
    );
    let source = CommandSource::new(script(&dir, "list.sh", LIST), report);
    let prefixes = vec!["logs/20230115/".to_string(), "logs/20230116/".to_string()];

    let start = std::time::Instant::now();
    let err = Pipeline::new(PrefixAggregator::new(&source, "b"))
        .run(&prefixes)
        .await
        .unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, StatError::Transport { ref reason, .. } if reason == "exited with code 1"));
    assert!(elapsed < std::time::Duration::from_secs(2), "run took {:?}", elapsed);

    tokio::time::sleep(std::time::Duration::from_secs(3)).await;
    assert!(!marker.exists(), "slow report kept running after the run failed");
}
