use std::sync::{Arc, Mutex};

use upi_insights::ingestion::{
    load_from_path, CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadOptions,
    LoadSeverity, LoadStats, SourceFormat,
};
use upi_insights::LoadError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(SourceFormat, usize)>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push((ctx.format, stats.rows));
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

#[test]
fn observer_sees_successful_load() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    load_from_path("tests/fixtures/transactions.csv", &opts).unwrap();

    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![(SourceFormat::Delimited, 8)]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    };

    // Missing file -> Io error -> Critical
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_schema_mismatch() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        format: Some(SourceFormat::Delimited),
        delimiter: Some(b';'),
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    };

    // Wrong delimiter -> one unrecognized header -> missing columns -> Error, not Critical.
    let _ = load_from_path("tests/fixtures/transactions.csv", &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_alert_threshold_alerts_on_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Error,
        ..Default::default()
    };

    let _ = load_from_path("tests/fixtures/no_extension", &opts).unwrap_err();
    // Format inference fails before any observer context exists.
    assert!(obs.failures.lock().unwrap().is_empty());

    let opts = LoadOptions {
        format: Some(SourceFormat::Json),
        ..opts
    };
    let _ = load_from_path("tests/fixtures/transactions.csv", &opts).unwrap_err();
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Error]);
}

#[test]
fn composite_fans_out_to_file_log() {
    let log = std::env::temp_dir().join(format!(
        "upi-insights-load-{}.log",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&log);

    let recorder = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn LoadObserver>> = vec![recorder.clone()];
    let composite = CompositeObserver::new(observers).with(FileObserver::new(&log));
    assert_eq!(composite.len(), 2);
    let opts = LoadOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    load_from_path("tests/fixtures/three_rows.ndjson", &opts).unwrap();
    let _ = load_from_path("tests/fixtures/does_not_exist.json", &opts).unwrap_err();

    assert_eq!(recorder.successes.lock().unwrap().len(), 1);
    let text = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains(" event=loaded format=json rows=3 elapsed_ms="));
    assert!(lines[0].contains(" rows_per_sec="));
    assert!(lines[0].ends_with("three_rows.ndjson"));
    assert!(lines[1].contains(" event=failed format=json severity=critical kind=io error=\"io error:"));
    assert!(lines[2].contains(" event=alert format=json severity=critical kind=io "));
    let _ = std::fs::remove_file(&log);
}

#[test]
fn file_log_names_the_error_kind() {
    let log = std::env::temp_dir().join(format!(
        "upi-insights-schema-{}.log",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&log);

    let opts = LoadOptions {
        format: Some(SourceFormat::Delimited),
        delimiter: Some(b';'),
        observer: Some(Arc::new(FileObserver::new(&log))),
        ..Default::default()
    };
    let _ = load_from_path("tests/fixtures/transactions.csv", &opts).unwrap_err();

    let text = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" event=failed format=delimited severity=error kind=schema "));
    let _ = std::fs::remove_file(&log);
}
