//! Downstream value: the best terrain reachable after an edge.
//!
//! # Algorithm
//!
//! From the end of a trail the walk considers two kinds of next edge:
//!
//! ```text
//! trail end ──▶ lift bottom ──(ride)──▶ trails at the lift top
//! trail end ──▶ trail starts fed directly by this trail
//! ```
//!
//! Every usable next trail contributes `preference × discount(hop)` and is
//! walked in turn with one hop less.  The result is the maximum seen over
//! the whole bounded tree, or 0 when nothing usable is reachable (a dead
//! end for that skill).
//!
//! Termination on cyclic networks comes from the hop budget plus a visited
//! set that holds the trails on the current walk path.  The set belongs to
//! a single top-level call, so a trail is re-evaluated freely from another
//! root or another branch.
//!
//! Top-level results are cached per `(skill, edge, depth)`.  The cache does
//! not notice topology changes: whoever mutates the network must call
//! [`DownstreamEvaluator::invalidate`].

use rustc_hash::{FxHashMap, FxHashSet};

use piste_core::{LiftId, SkillLevel, TrailId};
use piste_network::SkiNetwork;

use crate::{LookaheadConfig, PreferenceTable};

pub struct DownstreamEvaluator {
    lookahead:   LookaheadConfig,
    trail_cache: FxHashMap<(SkillLevel, TrailId, u32), f32>,
    lift_cache:  FxHashMap<(SkillLevel, LiftId, u32), f32>,
}

impl DownstreamEvaluator {
    pub fn new(lookahead: LookaheadConfig) -> Self {
        Self {
            lookahead,
            trail_cache: FxHashMap::default(),
            lift_cache:  FxHashMap::default(),
        }
    }

    pub fn lookahead(&self) -> &LookaheadConfig {
        &self.lookahead
    }

    /// Best discounted preference reachable from the end of `trail` within
    /// `max_hops` hops.
    pub fn evaluate(
        &mut self,
        skill:     SkillLevel,
        trail:     TrailId,
        max_hops:  u32,
        network:   &SkiNetwork,
        prefs:     &PreferenceTable,
    ) -> f32 {
        if let Some(&v) = self.trail_cache.get(&(skill, trail, max_hops)) {
            return v;
        }
        let mut walk = Walk { network, prefs, lookahead: &self.lookahead, skill, max_hops, path: FxHashSet::default() };
        let value = walk.from_trail(trail, 1);
        self.trail_cache.insert((skill, trail, max_hops), value);
        value
    }

    /// Best discounted preference reachable from the top of `lift`.  The
    /// trails at the top are hop 1.
    pub fn evaluate_lift(
        &mut self,
        skill:    SkillLevel,
        lift:     LiftId,
        max_hops: u32,
        network:  &SkiNetwork,
        prefs:    &PreferenceTable,
    ) -> f32 {
        if let Some(&v) = self.lift_cache.get(&(skill, lift, max_hops)) {
            return v;
        }
        let mut walk = Walk { network, prefs, lookahead: &self.lookahead, skill, max_hops, path: FxHashSet::default() };
        let value = if max_hops == 0 || network.lift(lift).is_none() {
            0.0
        } else {
            let next: Vec<TrailId> = network.trails_from_lift(lift).collect();
            walk.best_of(&next, 1)
        };
        self.lift_cache.insert((skill, lift, max_hops), value);
        value
    }

    /// Drop every cached value.  Must be called after any topology change.
    pub fn invalidate(&mut self) {
        let n = self.trail_cache.len() + self.lift_cache.len();
        self.trail_cache.clear();
        self.lift_cache.clear();
        log::debug!("downstream cache invalidated ({n} entries)");
    }

    pub fn cached_entries(&self) -> usize {
        self.trail_cache.len() + self.lift_cache.len()
    }
}

// ── Walk ──────────────────────────────────────────────────────────────────────

/// State of one top-level evaluation.
struct Walk<'a> {
    network:   &'a SkiNetwork,
    prefs:     &'a PreferenceTable,
    lookahead: &'a LookaheadConfig,
    skill:     SkillLevel,
    max_hops:  u32,
    /// Trails on the current walk path.
    path:      FxHashSet<TrailId>,
}

impl Walk<'_> {
    /// Value of what lies beyond `trail`, whose successors sit `hop` hops away.
    fn from_trail(&mut self, trail: TrailId, hop: u32) -> f32 {
        if hop > self.max_hops || self.network.trail(trail).is_none() {
            return 0.0;
        }
        if !self.path.insert(trail) {
            return 0.0;
        }

        let mut next: Vec<TrailId> = Vec::new();
        for lift in self.network.lifts_after_trail(trail) {
            next.extend(self.network.trails_from_lift(lift));
        }
        next.extend(self.network.trails_after_trail(trail));

        let best = self.best_of(&next, hop);
        self.path.remove(&trail);
        best
    }

    /// Maximum over `candidates` (all `hop` hops away) of their own
    /// discounted preference and whatever lies beyond them.
    fn best_of(&mut self, candidates: &[TrailId], hop: u32) -> f32 {
        let discount = self.lookahead.discount(hop);
        let mut best = 0.0_f32;
        for &next in candidates {
            let Some(t) = self.network.trail(next) else { continue };
            let Some(pref) = self.prefs.get(self.skill, t.class).reach_value() else {
                continue;
            };
            best = best.max(pref * discount);
            best = best.max(self.from_trail(next, hop + 1));
        }
        best
    }
}
