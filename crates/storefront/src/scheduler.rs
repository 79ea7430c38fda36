//! Virtual timer queue.
//!
//! Stands in for `setTimeout`/`setInterval`. Time only moves when the host
//! calls [`Scheduler::pop_due`] with a later instant, which makes every delayed
//! follow-up deterministic under test. Timers cannot be cancelled once
//! scheduled; handlers that must ignore a stale firing check their own state
//! when it arrives.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Shortest period accepted for a repeating timer.
const MIN_PERIOD: Duration = Duration::from_millis(1);

struct Entry<T> {
    due: Duration,
    seq: u64,
    every: Option<Duration>,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// A single-threaded queue of delayed tasks on a virtual clock.
///
/// Tasks due at the same instant fire in the order they were scheduled.
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Time elapsed since the scheduler was created.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run `task` once after `delay`.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        self.push(self.now + delay, None, task);
    }

    /// Run `task` every `period`, starting one period from now.
    pub fn schedule_every(&mut self, period: Duration, task: T) {
        let period = period.max(MIN_PERIOD);
        self.push(self.now + period, Some(period), task);
    }

    /// Pop the next task due at or before `until`, moving the clock to its
    /// due time. Once nothing else is due the clock settles on `until`.
    ///
    /// Repeating tasks are re-queued for their next period before returning.
    pub fn pop_due(&mut self, until: Duration) -> Option<T>
    where
        T: Clone,
    {
        let is_due = self
            .queue
            .peek()
            .is_some_and(|Reverse(entry)| entry.due <= until);

        if !is_due {
            self.now = self.now.max(until);
            return None;
        }

        let Reverse(entry) = self.queue.pop()?;
        self.now = self.now.max(entry.due);

        if let Some(period) = entry.every {
            self.push(entry.due + period, Some(period), entry.task.clone());
        }

        Some(entry.task)
    }

    fn push(&mut self, due: Duration, every: Option<Duration>, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry {
            due,
            seq,
            every,
            task,
        }));
    }
}
