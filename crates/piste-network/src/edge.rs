//! Edge records: trails, lifts and lodges.
//!
//! Records are immutable once the network is built, except for the validity
//! flag, which the topology owner flips when a structure is removed.

use piste_core::{LiftId, LodgeId, TrailClass, TrailId, Vec3};

// ── Trail ─────────────────────────────────────────────────────────────────────

/// A directed downhill trail.
///
/// `cumulative[i]` is the arc length from `path[0]` to `path[i]`, so
/// `cumulative[0] == 0.0` and `cumulative.last() == length`.  Positions along
/// the trail are addressed by distance in metres, never by a 0–1 fraction.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trail {
    pub id:         TrailId,
    pub class:      TrailClass,
    pub path:       Vec<Vec3>,
    pub cumulative: Vec<f32>,
    pub length:     f32,
    /// Full groomed width in metres.
    pub width:      f32,
    pub valid:      bool,
}

impl Trail {
    pub(crate) fn new(id: TrailId, class: TrailClass, path: Vec<Vec3>, width: f32) -> Self {
        let mut cumulative = Vec::with_capacity(path.len());
        let mut total = 0.0_f32;
        cumulative.push(0.0);
        for pair in path.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }
        Self { id, class, path, cumulative, length: total, width, valid: true }
    }

    #[inline]
    pub fn start(&self) -> Vec3 {
        self.path[0]
    }

    #[inline]
    pub fn end(&self) -> Vec3 {
        self.path[self.path.len() - 1]
    }

    /// Index `i` of the segment `path[i] → path[i + 1]` containing `distance`.
    ///
    /// `distance` is clamped to `[0, length]`; the final point belongs to the
    /// last segment.
    pub fn segment_at(&self, distance: f32) -> usize {
        let last_segment = self.path.len().saturating_sub(2);
        let d = distance.clamp(0.0, self.length);
        // First cumulative entry strictly greater than d, minus one.
        let upper = self.cumulative.partition_point(|&c| c <= d);
        upper.saturating_sub(1).min(last_segment)
    }

    /// World position `distance` metres along the centre line.
    pub fn position_at(&self, distance: f32) -> Vec3 {
        let i = self.segment_at(distance);
        let seg_len = self.cumulative[i + 1] - self.cumulative[i];
        if seg_len <= f32::EPSILON {
            return self.path[i];
        }
        let t = (distance.clamp(0.0, self.length) - self.cumulative[i]) / seg_len;
        self.path[i].lerp(self.path[i + 1], t)
    }

    /// Unit direction of travel at `distance`.
    pub fn tangent_at(&self, distance: f32) -> Vec3 {
        let i = self.segment_at(distance);
        (self.path[i + 1] - self.path[i]).normalized()
    }

    /// Downhill angle (radians) of the segment containing `distance`.
    /// Flat and uphill segments report 0.
    pub fn slope_at(&self, distance: f32) -> f32 {
        let i = self.segment_at(distance);
        let (a, b) = (self.path[i], self.path[i + 1]);
        let drop = (a.y - b.y).max(0.0);
        let run = a.horizontal_distance(b);
        if drop <= 0.0 {
            0.0
        } else {
            drop.atan2(run)
        }
    }

    /// Distance along the trail of the centre-line point nearest to `point`.
    pub fn nearest_distance_along(&self, point: Vec3) -> f32 {
        let mut best_dist_sq = f32::INFINITY;
        let mut best_along = 0.0;
        for i in 0..self.path.len() - 1 {
            let (a, b) = (self.path[i], self.path[i + 1]);
            let ab = b - a;
            let len_sq = ab.length_squared();
            let t = if len_sq <= f32::EPSILON {
                0.0
            } else {
                ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0)
            };
            let candidate = a + ab * t;
            let d = candidate.distance_squared(point);
            if d < best_dist_sq {
                best_dist_sq = d;
                best_along = self.cumulative[i] + t * (self.cumulative[i + 1] - self.cumulative[i]);
            }
        }
        best_along
    }
}

// ── Lift ──────────────────────────────────────────────────────────────────────

/// A one-way lift between exactly two stations.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lift {
    pub id:       LiftId,
    pub bottom:   Vec3,
    pub top:      Vec3,
    pub length:   f32,
    /// Simultaneous riders the lift is designed for.
    pub capacity: f32,
    pub valid:    bool,
}

impl Lift {
    pub(crate) fn new(id: LiftId, bottom: Vec3, top: Vec3, capacity: f32) -> Self {
        Self { id, bottom, top, length: bottom.distance(top), capacity, valid: true }
    }

    /// Interpolated cable position for a ride `fraction` in `[0, 1]`.
    #[inline]
    pub fn position_at(&self, fraction: f32) -> Vec3 {
        self.bottom.lerp(self.top, fraction)
    }

    /// Unit direction from bottom to top station.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        (self.top - self.bottom).normalized()
    }
}

// ── Lodge ─────────────────────────────────────────────────────────────────────

/// A rest-capable structure.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lodge {
    pub id:       LodgeId,
    pub position: Vec3,
}
