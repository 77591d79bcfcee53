//! Per-edge load record and the network-wide intent window.

use std::collections::VecDeque;
use std::hash::Hash;

/// Capacity and live occupancy of one edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficRecord {
    /// Slot count; always positive.
    pub capacity:  f32,
    /// Agents currently traversing the edge.
    pub occupancy: u32,
}

impl TrafficRecord {
    pub fn new(capacity: f32) -> Self {
        Self { capacity, occupancy: 0 }
    }

    /// Signed under-use: positive while below capacity, negative when
    /// over-subscribed.
    #[inline]
    pub fn deficit(&self) -> f32 {
        (self.capacity - self.occupancy as f32) / self.capacity
    }

    /// Load ratio, unbounded above.
    #[inline]
    pub fn crowding(&self) -> f32 {
        self.occupancy as f32 / self.capacity
    }
}

// ── IntentWindow ──────────────────────────────────────────────────────────────

/// Fixed-size ring of the last `window` intent events.
#[derive(Clone, Debug)]
pub struct IntentWindow<T> {
    events: VecDeque<T>,
    window: usize,
}

impl<T: Copy + Eq + Hash> IntentWindow<T> {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self { events: VecDeque::with_capacity(window), window }
    }

    pub fn push(&mut self, id: T) {
        if self.events.len() == self.window {
            self.events.pop_front();
        }
        self.events.push_back(id);
    }

    /// Fraction of the window occupied by `id`, in `[0, 1]`.
    ///
    /// The denominator is the window size, not the number of events seen so
    /// far, so a handful of early intents does not read as a stampede.
    pub fn popularity(&self, id: T) -> f32 {
        let hits = self.events.iter().filter(|&&e| e == id).count();
        hits as f32 / self.window as f32
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
