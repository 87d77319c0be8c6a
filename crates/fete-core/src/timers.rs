//! Virtual-time timers advanced by the controller's `tick`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

struct Entry<T> {
    at: Duration,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the heap pops the earliest deadline; ties keep insertion order.
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// One-shot deferred work keyed by deadline.
pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn schedule(&mut self, at: Duration, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { at, seq, item });
    }

    /// Pop the earliest item whose deadline is at or before `now`, with its
    /// scheduled deadline.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        if self.heap.peek()?.at > now {
            return None;
        }
        self.heap.pop().map(|e| (e.at, e.item))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

/// Fixed-period repeating timer.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    period: Duration,
    next_at: Duration,
}

impl Interval {
    pub fn starting_at(now: Duration, period: Duration) -> Self {
        Self {
            period,
            next_at: now + period,
        }
    }

    /// Number of periods that elapsed up to `now`; the schedule is advanced
    /// past them so a stalled frame does not replay a backlog one by one.
    pub fn fire(&mut self, now: Duration) -> u32 {
        if self.period.is_zero() || now < self.next_at {
            return 0;
        }
        let behind = now - self.next_at;
        let extra = (behind.as_nanos() / self.period.as_nanos()) as u32;
        let fired = extra + 1;
        self.next_at += self.period * fired;
        fired
    }
}
