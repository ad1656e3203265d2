//! Carriage-return progress line on stderr.
//!
//! Redraws are throttled so per-chunk status updates do not flood the
//! terminal; bound changes and close always force a draw.

use std::io::{self, Write};
use std::time::{Duration, Instant};
use topofetch_core::progress::ProgressSink;

const REDRAW_EVERY: Duration = Duration::from_millis(100);

/// Renders `label: pos/total unit status` in place on stderr.
pub struct ConsoleProgress {
    label: String,
    unit: String,
    total: u64,
    pos: u64,
    status: String,
    last_draw: Option<Instant>,
    active: bool,
}

impl ConsoleProgress {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            unit: String::new(),
            total: 0,
            pos: 0,
            status: String::new(),
            last_draw: None,
            active: false,
        }
    }

    fn draw(&mut self, force: bool) {
        if !self.active {
            return;
        }
        let now = Instant::now();
        if !force {
            if let Some(last) = self.last_draw {
                if now.duration_since(last) < REDRAW_EVERY {
                    return;
                }
            }
        }
        self.last_draw = Some(now);

        let mut err = io::stderr().lock();
        // Trailing spaces wipe leftovers from a longer previous line.
        let _ = write!(
            err,
            "\r{}: {}/{} {} {}   ",
            self.label, self.pos, self.total, self.unit, self.status
        );
        let _ = err.flush();
    }
}

impl ProgressSink for ConsoleProgress {
    fn init(&mut self, total: u64, unit: &str) {
        self.total = total;
        self.unit = unit.to_string();
        self.pos = 0;
        self.active = true;
        self.draw(true);
    }

    fn advance(&mut self, n: u64) {
        self.pos += n;
        self.draw(false);
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
        self.draw(false);
    }

    fn close(&mut self) {
        if self.active {
            self.draw(true);
            eprintln!();
            self.active = false;
        }
    }
}
