//! `TrafficState`: records, intent windows and the event sinks.

use rustc_hash::FxHashMap;

use piste_core::{AgentId, LiftId, TrailId};
use piste_network::SkiNetwork;

use crate::{IntentWindow, TrafficRecord};

// ── TrafficConfig ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrafficConfig {
    /// Number of recent intents remembered for the herding signal (K).
    pub intent_window: usize,
    /// Groomed area (m²) one skier comfortably occupies; a trail's capacity
    /// is `length * width / area_per_skier`.
    pub area_per_skier: f32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self { intent_window: 10, area_per_skier: 400.0 }
    }
}

// ── TrafficState ──────────────────────────────────────────────────────────────

/// Per-edge load bookkeeping.  Explicitly owned by the simulation and passed
/// to whoever needs it; there is no global instance.
#[derive(Clone, Debug)]
pub struct TrafficState {
    trails:         FxHashMap<TrailId, TrafficRecord>,
    lifts:          FxHashMap<LiftId, TrafficRecord>,
    trail_intents:  IntentWindow<TrailId>,
    lift_intents:   IntentWindow<LiftId>,
    area_per_skier: f32,
}

impl TrafficState {
    pub fn new(config: &TrafficConfig) -> Self {
        let area_per_skier = if config.area_per_skier.is_finite() && config.area_per_skier > 0.0 {
            config.area_per_skier
        } else {
            log::warn!("area_per_skier {} is not positive; using default", config.area_per_skier);
            TrafficConfig::default().area_per_skier
        };
        Self {
            trails:        FxHashMap::default(),
            lifts:         FxHashMap::default(),
            trail_intents: IntentWindow::new(config.intent_window),
            lift_intents:  IntentWindow::new(config.intent_window),
            area_per_skier,
        }
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Insert or update the capacity of `trail`.  Existing occupancy is kept.
    pub fn register_trail(&mut self, trail: TrailId, capacity: f32) {
        let capacity = sanitize_capacity(capacity, || trail.to_string());
        self.trails
            .entry(trail)
            .and_modify(|r| r.capacity = capacity)
            .or_insert_with(|| TrafficRecord::new(capacity));
    }

    /// Insert or update the capacity of `lift`.  Existing occupancy is kept.
    pub fn register_lift(&mut self, lift: LiftId, capacity: f32) {
        let capacity = sanitize_capacity(capacity, || lift.to_string());
        self.lifts
            .entry(lift)
            .and_modify(|r| r.capacity = capacity)
            .or_insert_with(|| TrafficRecord::new(capacity));
    }

    /// Register every valid trail and lift of `network`.  Trail capacity is
    /// derived from groomed area, lift capacity taken from the lift record.
    pub fn register_network(&mut self, network: &SkiNetwork) {
        for trail in network.trails() {
            let capacity = (trail.length * trail.width / self.area_per_skier).max(1.0);
            self.register_trail(trail.id, capacity);
        }
        for lift in network.lifts() {
            self.register_lift(lift.id, lift.capacity);
        }
        log::debug!(
            "traffic registered {} trails, {} lifts",
            self.trails.len(),
            self.lifts.len()
        );
    }

    /// Drop every record and forget all intents.  Called on topology rebuild.
    pub fn clear(&mut self) {
        self.trails.clear();
        self.lifts.clear();
        self.trail_intents.clear();
        self.lift_intents.clear();
    }

    /// Zero every occupancy while keeping capacities, before a re-count.
    pub fn reset_occupancy(&mut self) {
        for r in self.trails.values_mut().chain(self.lifts.values_mut()) {
            r.occupancy = 0;
        }
    }

    // ── Trail events ──────────────────────────────────────────────────────

    pub fn on_trail_intended(&mut self, agent: AgentId, trail: TrailId) {
        log::trace!("{agent} intends {trail}");
        self.trail_intents.push(trail);
    }

    pub fn on_trail_entered(&mut self, agent: AgentId, trail: TrailId) {
        log::trace!("{agent} entered {trail}");
        if let Some(r) = self.trails.get_mut(&trail) {
            r.occupancy += 1;
        }
    }

    pub fn on_trail_completed(&mut self, agent: AgentId, trail: TrailId) {
        log::trace!("{agent} completed {trail}");
        leave(self.trails.get_mut(&trail));
    }

    pub fn on_trail_exited(&mut self, agent: AgentId, trail: TrailId) {
        log::trace!("{agent} exited {trail}");
        leave(self.trails.get_mut(&trail));
    }

    // ── Lift events ───────────────────────────────────────────────────────

    pub fn on_lift_intended(&mut self, agent: AgentId, lift: LiftId) {
        log::trace!("{agent} intends {lift}");
        self.lift_intents.push(lift);
    }

    pub fn on_lift_entered(&mut self, agent: AgentId, lift: LiftId) {
        log::trace!("{agent} entered {lift}");
        if let Some(r) = self.lifts.get_mut(&lift) {
            r.occupancy += 1;
        }
    }

    pub fn on_lift_completed(&mut self, agent: AgentId, lift: LiftId) {
        log::trace!("{agent} completed {lift}");
        leave(self.lifts.get_mut(&lift));
    }

    pub fn on_lift_exited(&mut self, agent: AgentId, lift: LiftId) {
        log::trace!("{agent} exited {lift}");
        leave(self.lifts.get_mut(&lift));
    }

    // ── Signals ───────────────────────────────────────────────────────────

    #[inline]
    pub fn trail_deficit(&self, trail: TrailId) -> f32 {
        self.trails.get(&trail).map_or(0.0, TrafficRecord::deficit)
    }

    #[inline]
    pub fn trail_crowding(&self, trail: TrailId) -> f32 {
        self.trails.get(&trail).map_or(0.0, TrafficRecord::crowding)
    }

    #[inline]
    pub fn trail_recent_popularity(&self, trail: TrailId) -> f32 {
        self.trail_intents.popularity(trail)
    }

    #[inline]
    pub fn lift_deficit(&self, lift: LiftId) -> f32 {
        self.lifts.get(&lift).map_or(0.0, TrafficRecord::deficit)
    }

    #[inline]
    pub fn lift_crowding(&self, lift: LiftId) -> f32 {
        self.lifts.get(&lift).map_or(0.0, TrafficRecord::crowding)
    }

    #[inline]
    pub fn lift_recent_popularity(&self, lift: LiftId) -> f32 {
        self.lift_intents.popularity(lift)
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    pub fn trail_record(&self, trail: TrailId) -> Option<&TrafficRecord> {
        self.trails.get(&trail)
    }

    pub fn lift_record(&self, lift: LiftId) -> Option<&TrafficRecord> {
        self.lifts.get(&lift)
    }

    /// All trail records in ascending id order.
    pub fn trail_loads(&self) -> Vec<(TrailId, TrafficRecord)> {
        let mut v: Vec<_> = self.trails.iter().map(|(&id, &r)| (id, r)).collect();
        v.sort_unstable_by_key(|(id, _)| *id);
        v
    }

    /// All lift records in ascending id order.
    pub fn lift_loads(&self) -> Vec<(LiftId, TrafficRecord)> {
        let mut v: Vec<_> = self.lifts.iter().map(|(&id, &r)| (id, r)).collect();
        v.sort_unstable_by_key(|(id, _)| *id);
        v
    }

    pub fn total_trail_occupancy(&self) -> u32 {
        self.trails.values().map(|r| r.occupancy).sum()
    }

    pub fn total_lift_occupancy(&self) -> u32 {
        self.lifts.values().map(|r| r.occupancy).sum()
    }

    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    pub fn lift_count(&self) -> usize {
        self.lifts.len()
    }
}

impl Default for TrafficState {
    fn default() -> Self {
        Self::new(&TrafficConfig::default())
    }
}

fn sanitize_capacity(capacity: f32, name: impl FnOnce() -> String) -> f32 {
    if capacity.is_finite() && capacity > 0.0 {
        capacity
    } else {
        log::warn!("{}: capacity {capacity} is not positive; clamped to 1", name());
        1.0
    }
}

fn leave(record: Option<&mut TrafficRecord>) {
    if let Some(r) = record {
        if r.occupancy == 0 {
            log::warn!("occupancy underflow ignored");
        }
        r.occupancy = r.occupancy.saturating_sub(1);
    }
}
