use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use uptrack::reporting::{
    ActivityPolicy, AssignmentRule, DispatchError, DispatchHook, ReportAggregator, ReportConfig,
    ReportError, ReportGenerator,
};
use uptrack::tracking::{
    InMemoryTaskStore, InMemoryUserStore, RepositoryError, Task, TaskSource, User, UserSource,
};

type Sent = Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>;

struct RecordingDispatch {
    sent: Sent,
    fail: bool,
}

impl DispatchHook for RecordingDispatch {
    fn send(&self, report: &Path, recipients: &[String]) -> Result<(), DispatchError> {
        let mut guard = self.sent.lock().expect("dispatch mutex");
        guard.push((report.to_path_buf(), recipients.to_vec()));
        if self.fail {
            Err(DispatchError::Transport("smtp offline".to_string()))
        } else {
            Ok(())
        }
    }
}

struct BrokenUserSource;

impl UserSource for BrokenUserSource {
    fn list_all_users(&self) -> Result<Vec<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 14)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid timestamp")
}

fn generator() -> ReportGenerator<InMemoryUserStore, InMemoryTaskStore> {
    ReportGenerator::new(
        Arc::new(InMemoryUserStore::with_default_admin()),
        Arc::new(InMemoryTaskStore::new()),
    )
}

fn report_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("output dir readable")
        .map(|entry| entry.expect("dir entry").path())
        .collect();
    files.sort();
    files
}

#[test]
fn empty_store_produces_txt_report_from_sample_tasks() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = ReportConfig::new("txt", dir.path());

    assert!(generator().generate_report(&config));

    let files = report_files(dir.path());
    assert_eq!(files.len(), 1);
    let name = files[0]
        .file_name()
        .and_then(|name| name.to_str())
        .expect("utf-8 file name");
    assert!(name.starts_with("UpTrack_Report_"));
    assert!(name.ends_with(".txt"));

    let content = fs::read_to_string(&files[0]).expect("report readable");
    assert!(content.contains("Gesamtanzahl Aufgaben: 5"));
    assert!(content.contains("- admin (Administrator)"));
    assert!(content.contains("Abgeschlossene Aufgaben: 2 (40.00%)"));
}

#[test]
fn invalid_format_fails_without_touching_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = dir.path().join("never-created");
    let config = ReportConfig::new("docx", &output);

    assert!(!generator().generate_report(&config));
    assert!(!output.exists());

    let err = generator()
        .try_generate_report_at(&config, now())
        .expect_err("docx rejected");
    assert!(matches!(err, ReportError::Format(_)));
}

#[test]
fn missing_output_directory_is_created() {
    let dir = tempfile::tempdir().expect("temp dir");
    let nested = dir.path().join("reports").join("2026");
    let config = ReportConfig::new("csv", &nested);

    let path = generator()
        .try_generate_report_at(&config, now())
        .expect("report written");

    assert_eq!(path, nested.join("UpTrack_Report_20261014_103000.csv"));
    let csv = fs::read_to_string(path).expect("csv readable");
    assert!(csv.starts_with("Kategorie,Name,Wert\n"));
    assert!(csv.contains("Element,Administrator,1\n"));
    assert!(csv.contains("Element,Abgeschlossen,2\n"));
}

#[test]
fn output_directory_failure_returns_false() {
    let dir = tempfile::tempdir().expect("temp dir");
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "not a directory").expect("blocker written");
    let config = ReportConfig::new("txt", blocker.join("reports"));

    assert!(!generator().generate_report(&config));

    let err = generator()
        .try_generate_report_at(&config, now())
        .expect_err("directory cannot be created");
    assert!(matches!(err, ReportError::OutputDir { .. }));
}

#[test]
fn html_report_uses_document_shell() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = ReportConfig::new("html", dir.path()).with_charts(true);

    let path = generator()
        .try_generate_report_at(&config, now())
        .expect("report written");
    let html = fs::read_to_string(path).expect("html readable");

    assert!(html.starts_with(
        "<!DOCTYPE html><html><head><title>UpTrack Report</title></head><body><h1>UpTrack Systemreport"
    ));
    assert!(html.ends_with("</body></html>"));
    assert!(html.contains("<h2>Benutzerinformationen</p><p>"));
    assert!(html.contains("[Hier würde ein Statusverteilungs-Diagramm angezeigt]"));
}

#[test]
fn stored_tasks_replace_the_sample_set() {
    let dir = tempfile::tempdir().expect("temp dir");
    let users = Arc::new(InMemoryUserStore::with_default_admin());
    users
        .add_user(User::standard("bob", "pw"))
        .expect("bob added");
    let tasks = Arc::new(InMemoryTaskStore::new());
    let mut release = Task::new("Release", "Cut the 1.0 release");
    release.set_due_date("2026-10-18");
    tasks.add(release).expect("task stored");

    let generator = ReportGenerator::new(users, tasks).with_aggregator(ReportAggregator::new(
        ActivityPolicy::active_set(["admin"]),
        AssignmentRule::RoundRobin(vec!["bob".to_string()]),
    ));
    let path = generator
        .try_generate_report_at(&ReportConfig::new("txt", dir.path()), now())
        .expect("report written");
    let content = fs::read_to_string(path).expect("report readable");

    assert!(content.contains("Gesamtanzahl Aufgaben: 1\n"));
    assert!(content.contains("- bob (Standardbenutzer)\n  Status: Inaktiv\n"));
    assert!(content.contains("  Zugewiesen an: bob\n"));
    assert!(content.contains("In den nächsten 7 Tagen fällig: 1\n"));
    assert!(content.contains("    - due date set to 2026-10-18\n"));
}

#[test]
fn dispatch_runs_only_when_requested_with_recipients() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sent: Sent = Arc::default();
    let generator = generator().with_dispatch(Box::new(RecordingDispatch {
        sent: sent.clone(),
        fail: false,
    }));

    let quiet = ReportConfig::new("txt", dir.path());
    assert!(generator.generate_report_at(&quiet, now()));
    let no_recipients = ReportConfig::new("txt", dir.path()).with_dispatch(Vec::new());
    assert!(generator.generate_report_at(&no_recipients, now()));
    assert!(sent.lock().expect("dispatch mutex").is_empty());

    let config =
        ReportConfig::new("pdf", dir.path()).with_dispatch(vec!["lead@example.com".to_string()]);
    let path = generator
        .try_generate_report_at(&config, now())
        .expect("report written");

    let calls = sent.lock().expect("dispatch mutex");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, path);
    assert_eq!(calls[0].1, vec!["lead@example.com"]);
}

#[test]
fn dispatch_failure_does_not_fail_the_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sent: Sent = Arc::default();
    let generator = generator().with_dispatch(Box::new(RecordingDispatch {
        sent: sent.clone(),
        fail: true,
    }));
    let config =
        ReportConfig::new("txt", dir.path()).with_dispatch(vec!["ops@example.com".to_string()]);

    assert!(generator.generate_report_at(&config, now()));
    assert_eq!(sent.lock().expect("dispatch mutex").len(), 1);
    assert_eq!(report_files(dir.path()).len(), 1);
}

#[test]
fn source_failure_aborts_before_writing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let generator = ReportGenerator::new(Arc::new(BrokenUserSource), Arc::new(InMemoryTaskStore::new()));
    let config = ReportConfig::new("txt", dir.path());

    let err = generator
        .try_generate_report_at(&config, now())
        .expect_err("source failure surfaces");

    assert!(matches!(err, ReportError::Source(_)));
    assert!(report_files(dir.path()).is_empty());
}

#[test]
fn disabling_sample_data_reports_zero_tasks() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = ReportConfig::new("txt", dir.path()).with_sample_data(false);

    let path = generator()
        .try_generate_report_at(&config, now())
        .expect("report written");
    let content = fs::read_to_string(path).expect("report readable");

    assert!(content.contains("Gesamtanzahl Aufgaben: 0\n"));
    assert!(content.contains("Abgeschlossene Aufgaben: 0 (0.00%)\n"));
}
