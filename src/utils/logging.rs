use log::{log_enabled, trace, Level};
use std::time::Instant;

/// Scoped timer that traces how long a simulation pass took.
///
/// Costs a single `log_enabled!` check when trace logging is off.
pub struct ScopedTimer<'a> {
    label: &'a str,
    start: Option<Instant>,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str) -> Self {
        let start = if log_enabled!(Level::Trace) {
            trace!("begin {label}");
            Some(Instant::now())
        } else {
            None
        };
        Self { label, start }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            trace!("end {} ({} µs)", self.label, start.elapsed().as_micros());
        }
    }
}
