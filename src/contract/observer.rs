use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use super::{ViolationReport, ViolationSeverity};
use crate::error::ContractViolation;

/// Observer interface for contract violations.
///
/// Implementors can record metrics, logs, or turn violations into test failures.
pub trait ContractObserver: Send + Sync {
    /// Called for every reported violation.
    fn on_violation(&self, _report: &ViolationReport) {}

    /// Called right before a fatal violation panics.
    ///
    /// Default behavior forwards to [`Self::on_violation`].
    fn on_fatal(&self, report: &ViolationReport) {
        self.on_violation(report)
    }
}

/// Forwards each report to every wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ContractObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ContractObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ContractObserver for CompositeObserver {
    fn on_violation(&self, report: &ViolationReport) {
        for o in &self.observers {
            o.on_violation(report);
        }
    }

    fn on_fatal(&self, report: &ViolationReport) {
        for o in &self.observers {
            o.on_fatal(report);
        }
    }
}

/// Forwards violations to the `log` facade. Used when no observer is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ContractObserver for LogObserver {
    fn on_violation(&self, report: &ViolationReport) {
        log::warn!(
            target: "collection_pipes::contract",
            "{} (operation={})",
            report.violation,
            report.violation.operation()
        );
    }

    fn on_fatal(&self, report: &ViolationReport) {
        log::error!(
            target: "collection_pipes::contract",
            "{} (operation={})",
            report.violation,
            report.violation.operation()
        );
    }
}

/// Logs violations to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ContractObserver for StdErrObserver {
    fn on_violation(&self, report: &ViolationReport) {
        eprintln!("[contract][{:?}] {}", report.severity, report.violation);
    }

    fn on_fatal(&self, report: &ViolationReport) {
        eprintln!("[FATAL][contract] {}", report.violation);
    }
}

/// Appends violations to a local file, one JSON object per line.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize)]
struct FileRecord<'a> {
    ts: u64,
    severity: ViolationSeverity,
    message: String,
    violation: &'a ContractViolation,
}

impl FileObserver {
    /// Appends to `path`, creating it on first write. I/O errors are dropped.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_record(&self, report: &ViolationReport) {
        let record = FileRecord {
            ts: now_secs(),
            severity: report.severity,
            message: report.violation.to_string(),
            violation: &report.violation,
        };
        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ContractObserver for FileObserver {
    fn on_violation(&self, report: &ViolationReport) {
        self.append_record(report);
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{CompositeObserver, ContractObserver, FileObserver};
    use crate::contract::{ViolationReport, ViolationSeverity};
    use crate::error::ContractViolation;

    #[derive(Default)]
    struct Counting {
        violations: Mutex<usize>,
        fatals: Mutex<usize>,
    }

    impl ContractObserver for Counting {
        fn on_violation(&self, _report: &ViolationReport) {
            *self.violations.lock().unwrap() += 1;
        }

        fn on_fatal(&self, _report: &ViolationReport) {
            *self.fatals.lock().unwrap() += 1;
        }
    }

    fn report(severity: ViolationSeverity) -> ViolationReport {
        ViolationReport {
            violation: ContractViolation::OffsetOutOfRange {
                operation: "sub_range",
                offset: 4,
                len: 2,
            },
            severity,
        }
    }

    #[test]
    fn composite_fans_out_both_callbacks() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let observers: Vec<Arc<dyn ContractObserver>> = vec![a.clone(), b.clone()];
        let composite = CompositeObserver::new(observers);

        composite.on_violation(&report(ViolationSeverity::Recoverable));
        composite.on_fatal(&report(ViolationSeverity::Fatal));

        for c in [&a, &b] {
            assert_eq!(*c.violations.lock().unwrap(), 1);
            assert_eq!(*c.fatals.lock().unwrap(), 1);
        }
    }

    #[test]
    fn file_observer_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("violations.log");
        let obs = FileObserver::new(&path);

        obs.on_violation(&report(ViolationSeverity::Recoverable));
        obs.on_fatal(&report(ViolationSeverity::Fatal));

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["severity"], "recoverable");
        assert_eq!(lines[1]["severity"], "fatal");
        assert_eq!(lines[0]["violation"]["kind"], "offset_out_of_range");
        assert_eq!(
            lines[0]["message"],
            "sub_range: offset 4 exceeds length 2"
        );
    }
}
