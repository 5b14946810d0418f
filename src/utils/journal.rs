/*
 * Log Journal
 *
 * Bounded in-memory record of recent log lines. The logger appends every
 * formatted line here; tests read it back to assert on the shims' log
 * side effects.
 *
 * Design:
 * - Fixed capacity ring of whole lines
 * - Oldest lines are dropped on overflow
 * - One global instance behind a spin mutex; appends are brief
 */

use spin::Mutex;
use std::collections::VecDeque;

/// Retained lines in the global journal.
const JOURNAL_CAPACITY: usize = 1024;

/// The journal the logger writes to.
static JOURNAL: Journal = Journal::new(JOURNAL_CAPACITY);

/// Ring of recent log lines.
pub struct Journal {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Journal {
    pub const fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// Append one line, evicting the oldest if at capacity.
    pub fn record(&self, line: &str) {
        let mut lines = self.lines.lock();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }

    /// Copy of all retained lines, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().iter().cloned().collect()
    }

    /// Whether any retained line contains the needle.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }

    /// Number of retained lines containing the needle.
    pub fn count_matching(&self, needle: &str) -> usize {
        self.lines
            .lock()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

/// Append one line to the global journal.
pub fn record(line: &str) {
    JOURNAL.record(line);
}

/// Copy of the global journal's lines, oldest first.
pub fn snapshot() -> Vec<String> {
    JOURNAL.snapshot()
}

/// Whether any line in the global journal contains the needle.
pub fn contains(needle: &str) -> bool {
    JOURNAL.contains(needle)
}

/// Number of lines in the global journal containing the needle.
pub fn count_matching(needle: &str) -> usize {
    JOURNAL.count_matching(needle)
}
