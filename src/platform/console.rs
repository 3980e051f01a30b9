//=========================================================================
// Console Buffer
//=========================================================================
//
// Bounded in-memory record of recent script output.
//
// The native log sink appends every script log line here in addition to
// the `log` facade, so a host or editor can show what scripts printed
// without scraping the process log. When full, the oldest line is
// evicted.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::interop::LogLevel;

//=== ConsoleLine =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for ConsoleLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.label(), self.message)
    }
}

//=== ConsoleBuffer =======================================================

/// Ring buffer of script log lines, oldest first.
#[derive(Debug, Clone)]
pub struct ConsoleBuffer {
    lines: VecDeque<ConsoleLine>,
    capacity: usize,
    evicted: u64,
}

impl ConsoleBuffer {
    pub const DEFAULT_CAPACITY: usize = 256;

    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Console capacity must be positive");
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
            self.evicted += 1;
        }
        self.lines.push_back(ConsoleLine {
            level,
            message: message.into(),
        });
    }

    pub fn lines(&self) -> impl Iterator<Item = &ConsoleLine> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&ConsoleLine> {
        self.lines.back()
    }

    /// Removes and returns every buffered line.
    pub fn drain(&mut self) -> Vec<ConsoleLine> {
        self.lines.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines lost to eviction since creation.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl Default for ConsoleBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_line_is_evicted_when_full() {
        let mut console = ConsoleBuffer::new(2);

        console.push(LogLevel::Info, "one");
        console.push(LogLevel::Warning, "two");
        console.push(LogLevel::Error, "three");

        let messages: Vec<&str> = console.lines().map(|l| l.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
        assert_eq!(console.evicted(), 1);
    }

    #[test]
    fn drain_empties_buffer() {
        let mut console = ConsoleBuffer::default();
        console.push(LogLevel::Debug, "hello");

        let lines = console.drain();

        assert_eq!(lines.len(), 1);
        assert!(console.is_empty());
        assert_eq!(console.capacity(), ConsoleBuffer::DEFAULT_CAPACITY);
    }

    #[test]
    fn lines_display_with_level_label() {
        let line = ConsoleLine {
            level: LogLevel::Fatal,
            message: "engine on fire".into(),
        };
        assert_eq!(line.to_string(), "[FATAL] engine on fire");
    }

    #[test]
    #[should_panic(expected = "Console capacity must be positive")]
    fn zero_capacity_panics() {
        ConsoleBuffer::new(0);
    }
}
