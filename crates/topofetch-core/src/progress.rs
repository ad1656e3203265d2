//! Progress reporting surface shared by both phases.
//!
//! The sink is purely observational: it never influences control flow, and a
//! failing or absent renderer must not affect the crawl or the downloads.

/// Destination for human-readable progress events (bar position, status text).
pub trait ProgressSink {
    /// Sets the upper bound and the unit label ("items", "files").
    fn init(&mut self, total: u64, unit: &str);
    /// Moves the position forward by `n`.
    fn advance(&mut self, n: u64);
    /// Replaces the free-form status text (e.g. a throughput figure).
    fn set_status(&mut self, text: &str);
    /// Marks the phase finished; no further events follow.
    fn close(&mut self);
}

/// Sink that ignores every event. Library default, also used in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn init(&mut self, _total: u64, _unit: &str) {}
    fn advance(&mut self, _n: u64) {}
    fn set_status(&mut self, _text: &str) {}
    fn close(&mut self) {}
}

/// Snapshot of the download phase byte counter.
///
/// The rate is a cumulative average over the whole phase (total bytes divided
/// by total elapsed time), not a windowed instantaneous rate.
#[derive(Debug, Clone, Copy)]
pub struct TransferStats {
    /// Bytes received so far across all files.
    pub bytes_done: u64,
    /// Elapsed time since the download phase started (seconds).
    pub elapsed_secs: f64,
}

impl TransferStats {
    /// Average throughput in bytes per second (0 if no time has elapsed).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Average throughput in KiB per second.
    pub fn kib_per_sec(&self) -> f64 {
        self.bytes_per_sec() / 1024.0
    }

    /// Status-text rendering used after every received chunk.
    pub fn status_line(&self) -> String {
        format!("{:.2} KiB/s", self.kib_per_sec())
    }
}
