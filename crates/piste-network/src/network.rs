//! Resort topology and builder.
//!
//! # Data layout
//!
//! Trails, lifts and lodges live in `Vec`s indexed by their typed id.  Ids
//! are assigned sequentially by [`SkiNetworkBuilder`] and never reused;
//! removing a structure flips its `valid` flag instead of compacting the
//! arrays, so ids held by agents and traffic records stay meaningful.
//!
//! # Structural connections
//!
//! `build()` precomputes three adjacency tables from a connection radius:
//!
//! ```text
//! trail_next[t]   trails starting near the end of t   (+ explicit links)
//! trail_lifts[t]  lifts whose bottom is near the end of t
//! lift_trails[l]  trails starting near the top of l
//! ```
//!
//! Query methods filter out invalidated structures on the fly, so the tables
//! never need rebuilding when something is removed.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over every [`Anchor`] answers "what is within
//! `r` metres of this point" for placement, fallback searches and
//! mid-run exit detection.

use rstar::RTree;
use rustc_hash::FxHashSet;

use piste_core::{LiftId, LodgeId, TrailClass, TrailId, Vec3};

use crate::anchor::{Anchor, AnchorEntry};
use crate::{Lift, Lodge, NetworkError, NetworkResult, Trail};

/// Default radius (m) within which a trail end feeds a lift or trail start.
pub const DEFAULT_CONNECTION_RADIUS: f32 = 15.0;

/// Default spacing (m) between indexed points along each trail.
pub const DEFAULT_SAMPLE_SPACING: f32 = 10.0;

// ── SkiNetwork ────────────────────────────────────────────────────────────────

/// Read-only resort topology plus spatial index.
///
/// Do not construct directly; use [`SkiNetworkBuilder`].
pub struct SkiNetwork {
    trails: Vec<Trail>,
    lifts:  Vec<Lift>,
    lodges: Vec<Lodge>,

    trail_next:  Vec<Vec<TrailId>>,
    trail_lifts: Vec<Vec<LiftId>>,
    lift_trails: Vec<Vec<TrailId>>,

    connection_radius: f32,
    spatial_idx:       RTree<AnchorEntry>,
}

impl SkiNetwork {
    /// A network with no structures.  Every query returns nothing.
    pub fn empty() -> Self {
        SkiNetworkBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Number of trail slots, including invalidated trails.
    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    /// Number of lift slots, including invalidated lifts.
    pub fn lift_count(&self) -> usize {
        self.lifts.len()
    }

    pub fn lodge_count(&self) -> usize {
        self.lodges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty() && self.lifts.is_empty() && self.lodges.is_empty()
    }

    pub fn connection_radius(&self) -> f32 {
        self.connection_radius
    }

    // ── Lookup by id ──────────────────────────────────────────────────────

    /// The trail with `id`, or `None` if unknown or invalidated.
    #[inline]
    pub fn trail(&self, id: TrailId) -> Option<&Trail> {
        self.trails.get(id.index()).filter(|t| t.valid)
    }

    /// The lift with `id`, or `None` if unknown or invalidated.
    #[inline]
    pub fn lift(&self, id: LiftId) -> Option<&Lift> {
        self.lifts.get(id.index()).filter(|l| l.valid)
    }

    #[inline]
    pub fn lodge(&self, id: LodgeId) -> Option<&Lodge> {
        self.lodges.get(id.index())
    }

    /// All valid trails in id order.
    pub fn trails(&self) -> impl Iterator<Item = &Trail> + '_ {
        self.trails.iter().filter(|t| t.valid)
    }

    /// All valid lifts in id order.
    pub fn lifts(&self) -> impl Iterator<Item = &Lift> + '_ {
        self.lifts.iter().filter(|l| l.valid)
    }

    pub fn lodges(&self) -> impl Iterator<Item = &Lodge> + '_ {
        self.lodges.iter()
    }

    // ── Structural connections ────────────────────────────────────────────

    /// Valid trails fed directly by the end of `trail`.
    pub fn trails_after_trail(&self, trail: TrailId) -> impl Iterator<Item = TrailId> + '_ {
        self.trail_next
            .get(trail.index())
            .into_iter()
            .flatten()
            .copied()
            .filter(|&t| self.trail(t).is_some())
    }

    /// Valid lifts whose bottom station is at the end of `trail`.
    pub fn lifts_after_trail(&self, trail: TrailId) -> impl Iterator<Item = LiftId> + '_ {
        self.trail_lifts
            .get(trail.index())
            .into_iter()
            .flatten()
            .copied()
            .filter(|&l| self.lift(l).is_some())
    }

    /// Valid trails starting at the top station of `lift`.
    pub fn trails_from_lift(&self, lift: LiftId) -> impl Iterator<Item = TrailId> + '_ {
        self.lift_trails
            .get(lift.index())
            .into_iter()
            .flatten()
            .copied()
            .filter(|&t| self.trail(t).is_some())
    }

    // ── Invalidation ──────────────────────────────────────────────────────

    /// Mark `trail` as removed.  Returns `false` if it was unknown or already
    /// invalid.
    pub fn invalidate_trail(&mut self, trail: TrailId) -> bool {
        match self.trails.get_mut(trail.index()) {
            Some(t) if t.valid => {
                t.valid = false;
                log::debug!("invalidated {trail}");
                true
            }
            _ => false,
        }
    }

    /// Mark `lift` as removed.  Returns `false` if it was unknown or already
    /// invalid.
    pub fn invalidate_lift(&mut self, lift: LiftId) -> bool {
        match self.lifts.get_mut(lift.index()) {
            Some(l) if l.valid => {
                l.valid = false;
                log::debug!("invalidated {lift}");
                true
            }
            _ => false,
        }
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Anchors of valid structures within `radius` of `pos`, nearest first,
    /// with their distance.
    pub fn anchors_within(&self, pos: Vec3, radius: f32) -> Vec<(Anchor, f32)> {
        if radius < 0.0 {
            return Vec::new();
        }
        let mut hits: Vec<(Anchor, f32)> = self
            .spatial_idx
            .locate_within_distance(pos.to_array(), radius * radius)
            .filter(|e| self.anchor_is_live(e.anchor))
            .map(|e| (e.anchor, e.position().distance(pos)))
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits
    }

    /// Valid lifts whose bottom station is within `radius`, nearest first.
    pub fn lift_bottoms_within(&self, pos: Vec3, radius: f32) -> Vec<LiftId> {
        self.anchors_within(pos, radius)
            .into_iter()
            .filter_map(|(a, _)| match a {
                Anchor::LiftBottom(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    /// Valid trails starting within `radius`, nearest first.
    pub fn trail_starts_within(&self, pos: Vec3, radius: f32) -> Vec<TrailId> {
        self.anchors_within(pos, radius)
            .into_iter()
            .filter_map(|(a, _)| match a {
                Anchor::TrailStart(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Lodges within `radius`, nearest first.
    pub fn lodges_within(&self, pos: Vec3, radius: f32) -> Vec<LodgeId> {
        self.anchors_within(pos, radius)
            .into_iter()
            .filter_map(|(a, _)| match a {
                Anchor::Lodge(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    /// The valid lift with the nearest bottom station, at any distance.
    pub fn nearest_lift_bottom(&self, pos: Vec3) -> Option<LiftId> {
        self.spatial_idx
            .nearest_neighbor_iter(&pos.to_array())
            .find_map(|e| match e.anchor {
                Anchor::LiftBottom(l) if self.lift(l).is_some() => Some(l),
                _ => None,
            })
    }

    /// The nearest lodge, at any distance.
    pub fn nearest_lodge(&self, pos: Vec3) -> Option<LodgeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&pos.to_array())
            .find_map(|e| match e.anchor {
                Anchor::Lodge(l) => Some(l),
                _ => None,
            })
    }

    fn anchor_is_live(&self, anchor: Anchor) -> bool {
        match anchor {
            Anchor::LiftBottom(l) | Anchor::LiftTop(l) => self.lift(l).is_some(),
            Anchor::TrailStart(t) | Anchor::TrailEnd(t) => self.trail(t).is_some(),
            Anchor::TrailPoint { trail, .. } => self.trail(trail).is_some(),
            Anchor::Lodge(_) => true,
        }
    }
}

// ── SkiNetworkBuilder ─────────────────────────────────────────────────────────

/// Construct a [`SkiNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use piste_core::{TrailClass, Vec3};
/// use piste_network::SkiNetworkBuilder;
///
/// let mut b = SkiNetworkBuilder::new();
/// let lift = b.add_lift(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 300.0, 600.0), 40.0).unwrap();
/// let run = b
///     .add_trail(TrailClass::Blue, vec![Vec3::new(0.0, 300.0, 600.0), Vec3::new(0.0, 0.0, 0.0)], 30.0)
///     .unwrap();
/// let net = b.build();
/// assert_eq!(net.trails_from_lift(lift).collect::<Vec<_>>(), vec![run]);
/// assert_eq!(net.lifts_after_trail(run).collect::<Vec<_>>(), vec![lift]);
/// ```
pub struct SkiNetworkBuilder {
    trails:            Vec<Trail>,
    lifts:             Vec<Lift>,
    lodges:            Vec<Lodge>,
    explicit_links:    Vec<(TrailId, TrailId)>,
    connection_radius: f32,
    sample_spacing:    f32,
}

impl SkiNetworkBuilder {
    pub fn new() -> Self {
        Self {
            trails:            Vec::new(),
            lifts:             Vec::new(),
            lodges:            Vec::new(),
            explicit_links:    Vec::new(),
            connection_radius: DEFAULT_CONNECTION_RADIUS,
            sample_spacing:    DEFAULT_SAMPLE_SPACING,
        }
    }

    /// Radius within which a trail end is considered to feed a lift bottom
    /// or another trail's start, and a lift top to feed a trail start.
    pub fn with_connection_radius(mut self, radius: f32) -> Self {
        self.connection_radius = radius.max(0.0);
        self
    }

    /// Spacing between indexed centre-line points used for crossing
    /// detection.  Smaller values find crossings more precisely at the cost
    /// of a larger index.
    pub fn with_sample_spacing(mut self, spacing: f32) -> Self {
        self.sample_spacing = spacing.max(1.0);
        self
    }

    /// Add a trail following `path` downhill and return its id.
    pub fn add_trail(&mut self, class: TrailClass, path: Vec<Vec3>, width: f32) -> NetworkResult<TrailId> {
        if path.len() < 2 {
            return Err(NetworkError::TooFewPoints(path.len()));
        }
        if let Some(i) = path.iter().position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite())) {
            return Err(NetworkError::NonFinitePoint(i));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(NetworkError::InvalidWidth(width));
        }
        let id = TrailId(self.trails.len() as u32);
        self.trails.push(Trail::new(id, class, path, width));
        Ok(id)
    }

    /// Add a one-way lift from `bottom` to `top` and return its id.
    pub fn add_lift(&mut self, bottom: Vec3, top: Vec3, capacity: f32) -> NetworkResult<LiftId> {
        let id = LiftId(self.lifts.len() as u32);
        if bottom.distance(top) <= f32::EPSILON {
            return Err(NetworkError::DegenerateLift(id));
        }
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(NetworkError::InvalidCapacity(capacity));
        }
        self.lifts.push(Lift::new(id, bottom, top, capacity));
        Ok(id)
    }

    pub fn add_lodge(&mut self, position: Vec3) -> LodgeId {
        let id = LodgeId(self.lodges.len() as u32);
        self.lodges.push(Lodge { id, position });
        id
    }

    /// Declare that `from` feeds directly into `to` regardless of distance
    /// (e.g. a junction the geometry does not capture).
    pub fn connect_trails(&mut self, from: TrailId, to: TrailId) -> NetworkResult<()> {
        for id in [from, to] {
            if id.index() >= self.trails.len() {
                return Err(NetworkError::TrailNotFound(id));
            }
        }
        self.explicit_links.push((from, to));
        Ok(())
    }

    pub fn trail_count(&self) -> usize { self.trails.len() }
    pub fn lift_count(&self) -> usize { self.lifts.len() }

    /// Consume the builder and produce a [`SkiNetwork`].
    ///
    /// Bulk-loads the R-tree, then derives the connection tables with
    /// radius queries against it.
    pub fn build(self) -> SkiNetwork {
        let mut entries: Vec<AnchorEntry> = Vec::new();
        for lift in &self.lifts {
            entries.push(AnchorEntry::new(lift.bottom, Anchor::LiftBottom(lift.id)));
            entries.push(AnchorEntry::new(lift.top, Anchor::LiftTop(lift.id)));
        }
        for trail in &self.trails {
            entries.push(AnchorEntry::new(trail.start(), Anchor::TrailStart(trail.id)));
            entries.push(AnchorEntry::new(trail.end(), Anchor::TrailEnd(trail.id)));
            let mut d = self.sample_spacing;
            while d < trail.length {
                entries.push(AnchorEntry::new(
                    trail.position_at(d),
                    Anchor::TrailPoint { trail: trail.id, distance: d },
                ));
                d += self.sample_spacing;
            }
        }
        for lodge in &self.lodges {
            entries.push(AnchorEntry::new(lodge.position, Anchor::Lodge(lodge.id)));
        }
        let spatial_idx = RTree::bulk_load(entries);

        let r2 = self.connection_radius * self.connection_radius;
        let near = |pos: Vec3| spatial_idx.locate_within_distance(pos.to_array(), r2);

        let mut trail_next: Vec<Vec<TrailId>> = vec![Vec::new(); self.trails.len()];
        let mut trail_lifts: Vec<Vec<LiftId>> = vec![Vec::new(); self.trails.len()];
        for trail in &self.trails {
            let mut next = FxHashSet::default();
            let mut lifts = FxHashSet::default();
            for e in near(trail.end()) {
                match e.anchor {
                    Anchor::TrailStart(t) if t != trail.id => {
                        next.insert(t);
                    }
                    Anchor::LiftBottom(l) => {
                        lifts.insert(l);
                    }
                    _ => {}
                }
            }
            trail_next[trail.id.index()] = sorted(next);
            trail_lifts[trail.id.index()] = sorted(lifts);
        }
        for &(from, to) in &self.explicit_links {
            let list = &mut trail_next[from.index()];
            if from != to && !list.contains(&to) {
                list.push(to);
                list.sort_unstable();
            }
        }

        let mut lift_trails: Vec<Vec<TrailId>> = vec![Vec::new(); self.lifts.len()];
        for lift in &self.lifts {
            let starts: FxHashSet<TrailId> = near(lift.top)
                .filter_map(|e| match e.anchor {
                    Anchor::TrailStart(t) => Some(t),
                    _ => None,
                })
                .collect();
            lift_trails[lift.id.index()] = sorted(starts);
        }

        log::debug!(
            "built network: {} trails, {} lifts, {} lodges, {} anchors",
            self.trails.len(),
            self.lifts.len(),
            self.lodges.len(),
            spatial_idx.size(),
        );

        SkiNetwork {
            trails: self.trails,
            lifts: self.lifts,
            lodges: self.lodges,
            trail_next,
            trail_lifts,
            lift_trails,
            connection_radius: self.connection_radius,
            spatial_idx,
        }
    }
}

impl Default for SkiNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted<T: Ord>(set: FxHashSet<T>) -> Vec<T> {
    let mut v: Vec<T> = set.into_iter().collect();
    v.sort_unstable();
    v
}
