use std::fs;

use formharvest_engine::{CompletionLog, COMPLETION_LOG_FILENAME};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn missing_file_is_an_empty_log() {
    let temp = TempDir::new().unwrap();
    let log = CompletionLog::open(temp.path()).unwrap();
    assert!(log.is_empty());
    assert_eq!(log.path(), temp.path().join(COMPLETION_LOG_FILENAME));
    assert!(!log.path().exists());
}

#[test]
fn recorded_ids_survive_reopening() {
    let temp = TempDir::new().unwrap();
    let mut log = CompletionLog::open(temp.path()).unwrap();
    log.record("1").unwrap();
    log.record("2").unwrap();
    assert!(log.contains("1"));

    let reopened = CompletionLog::open(temp.path()).unwrap();
    assert_eq!(reopened.len(), 2);
    assert!(reopened.contains("2"));
    assert!(!reopened.contains("3"));
    assert_eq!(
        fs::read_to_string(temp.path().join(COMPLETION_LOG_FILENAME)).unwrap(),
        "1\n2\n"
    );
}

#[test]
fn recording_twice_writes_once() {
    let temp = TempDir::new().unwrap();
    let mut log = CompletionLog::open(temp.path()).unwrap();
    log.record("42").unwrap();
    log.record("42").unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(fs::read_to_string(log.path()).unwrap(), "42\n");
}

#[test]
fn blank_lines_and_padding_are_ignored() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(COMPLETION_LOG_FILENAME),
        "1\n\n  2 \r\n\n",
    )
    .unwrap();
    let log = CompletionLog::open(temp.path()).unwrap();
    assert_eq!(log.len(), 2);
    assert!(log.contains("1"));
    assert!(log.contains("2"));
}

#[test]
fn appending_to_unterminated_file_starts_a_new_line() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(COMPLETION_LOG_FILENAME);
    fs::write(&path, "7").unwrap();

    let mut log = CompletionLog::open(temp.path()).unwrap();
    log.record("8").unwrap();
    log.record("9").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "7\n8\n9\n");
}
