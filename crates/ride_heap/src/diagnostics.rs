//! Trace sinks the heap reports to.
//!
//! Reporting is fire-and-forget: a sink never influences heap behaviour, so
//! [`NoopDiagnostics`] and a verbose sink produce identical results.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives human-readable trace messages from the heap.
pub trait Diagnostics {
    /// `origin` names the operation that produced the message (e.g. `"insert"`).
    fn report(&self, message: &str, origin: &str);
}

/// Discards everything. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn report(&self, _message: &str, _origin: &str) {}
}

/// Forwards messages to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, message: &str, origin: &str) {
        log::debug!(target: "ride_heap", "[{}] {}", origin.to_uppercase(), message);
    }
}

/// One captured message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub origin: String,
    pub message: String,
}

/// Keeps every message in a shared buffer. Clone the handle before handing
/// it to a heap to inspect what was reported.
#[derive(Debug, Default, Clone)]
pub struct RecordingDiagnostics {
    entries: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn from_origin(&self, origin: &str) -> Vec<Diagnostic> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.origin == origin)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, message: &str, origin: &str) {
        self.entries.borrow_mut().push(Diagnostic {
            origin: origin.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_handles_share_one_buffer() {
        let recorder = RecordingDiagnostics::new();
        let sink: Box<dyn Diagnostics> = Box::new(recorder.clone());

        sink.report("first", "insert");
        sink.report("second", "remove");

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.from_origin("remove")[0].message, "second");

        recorder.clear();
        assert!(recorder.is_empty());
    }
}
