//! Task identifier generation.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::task::TaskId;

pub trait IdGenerator: Send {
    fn next_id(&mut self) -> TaskId;
}

/// Millisecond Unix timestamps, bumped past the previous id when two adds
/// land in the same millisecond (or the clock goes backwards).
#[derive(Debug, Clone, Default)]
pub struct ClockIdGenerator {
    last: Option<i64>,
}

impl ClockIdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|elapsed| i64::try_from(elapsed.as_millis()).ok())
            .unwrap_or_default()
    }

    fn next_after(&mut self, now: i64) -> TaskId {
        let id = match self.last {
            Some(last) if now <= last => last.saturating_add(1),
            _ => now,
        };
        self.last = Some(id);
        TaskId::new(id)
    }
}

impl IdGenerator for ClockIdGenerator {
    fn next_id(&mut self) -> TaskId {
        self.next_after(Self::now_millis())
    }
}

/// Deterministic ids counting up from a start value.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    next: i64,
}

impl SequentialIdGenerator {
    #[must_use]
    pub const fn starting_at(first: i64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next);
        self.next += 1;
        id
    }
}
