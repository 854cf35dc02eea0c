use std::time::Duration;

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct RepeatingTimer {
    id: TimerId,
    interval: Duration,
    remaining: Duration,
}

/// Cooperative repeating timers driven by the host's clock.
///
/// The host reports elapsed time with [`TimerQueue::advance`] and then drains
/// due ticks one at a time with [`TimerQueue::poll`]. Handing out a single
/// tick per poll lets the caller cancel a timer between ticks; a cancelled
/// timer never fires again, even if more of its ticks were already due.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<RepeatingTimer>,
    pending: Duration,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a timer that first fires one `interval` from now.
    pub fn add_repeating(&mut self, interval: Duration) -> TimerId {
        let interval = interval.max(Duration::from_millis(1));
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(RepeatingTimer {
            id,
            interval,
            remaining: interval,
        });
        trace!(target: "timer", "Scheduled {:?} every {:?}", id, interval);
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        let removed = self.timers.len() != before;
        if removed {
            trace!(target: "timer", "Cancelled {:?}", id);
        }
        removed
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.pending += elapsed;
    }

    /// Returns the next timer due within the elapsed time, consuming time up to its deadline.
    pub fn poll(&mut self) -> Option<TimerId> {
        let Some(due) = self.timers.iter().min_by_key(|timer| timer.remaining) else {
            self.pending = Duration::ZERO;
            return None;
        };

        if due.remaining > self.pending {
            let pending = std::mem::take(&mut self.pending);
            for timer in &mut self.timers {
                timer.remaining -= pending;
            }
            return None;
        }

        let step = due.remaining;
        let id = due.id;
        self.pending -= step;
        for timer in &mut self.timers {
            timer.remaining -= step;
            if timer.id == id {
                timer.remaining = timer.interval;
            }
        }
        Some(id)
    }
}
