use crate::prelude::*;

use std::sync::atomic::{AtomicI64, Ordering::Relaxed};

#[derive(Default, Serialize)]
pub struct Counter(pub AtomicI64);

impl Counter {
    pub fn inc(&self, by: i64) {
        self.0.fetch_add(by, Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.0.load(Relaxed)
    }
}

impl Clone for Counter {
    fn clone(&self) -> Self {
        Self(AtomicI64::new(self.get()))
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl std::fmt::Debug for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Counters for one export job.
///
/// Invariant: `num_succeeded + num_failed` never exceeds `num_attempted`;
/// the three are equal once the job has attempted every file exactly once.
#[derive(Debug, Serialize, Default, Clone)]
pub struct ExportStats {
    pub num_attempted: Counter,
    pub num_succeeded: Counter,
    pub num_failed: Counter,
}

impl ExportStats {
    pub fn is_partial(&self) -> bool {
        self.num_failed.get() > 0 && self.num_succeeded.get() > 0
    }
}

impl std::fmt::Display for ExportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut messages = Vec::new();
        let num_succeeded = self.num_succeeded.get();
        if num_succeeded > 0 {
            messages.push(format!("{num_succeeded} files downloaded"));
        }
        let num_failed = self.num_failed.get();
        if num_failed > 0 {
            messages.push(format!("{num_failed} files FAILED"));
        }
        if !messages.is_empty() {
            write!(f, "{} files attempted ({})", self.num_attempted, messages.join(", "))
        } else {
            write!(f, "No files attempted")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn counter_increments_and_reads() {
        let counter = Counter::default();
        assert_eq!(counter.get(), 0);
        counter.inc(3);
        counter.inc(2);
        assert_eq!(counter.get(), 5);
    }

    #[test]
    fn counter_is_thread_safe() {
        let counter = Arc::new(Counter::default());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counter = Arc::clone(&counter);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    counter.inc(1);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.get(), 800);
    }

    #[test]
    fn partial_needs_both_a_success_and_a_failure() {
        let stats = ExportStats::default();
        assert!(!stats.is_partial());

        stats.num_attempted.inc(2);
        stats.num_succeeded.inc(2);
        assert!(!stats.is_partial());

        stats.num_attempted.inc(1);
        stats.num_failed.inc(1);
        assert!(stats.is_partial());
    }

    #[test]
    fn display_summarizes_the_job() {
        let stats = ExportStats::default();
        assert_eq!(format!("{stats}"), "No files attempted");

        stats.num_attempted.inc(3);
        stats.num_succeeded.inc(2);
        stats.num_failed.inc(1);
        assert_eq!(
            format!("{stats}"),
            "3 files attempted (2 files downloaded, 1 files FAILED)"
        );
    }
}
