//! Skill × trail-class comfort table.
//!
//! Default matrix (rows: skill, columns: class):
//!
//! ```text
//!                 green   blue    black   double-black
//! beginner        1.00    desp.   ✗       ✗
//! intermediate    0.50    1.00    desp.   ✗
//! advanced        0.25    0.60    1.00    0.40
//! expert          0.15    0.40    0.80    1.00
//! ```
//!
//! `desp.` = desperate-only, `✗` = disallowed.

use piste_core::{SkillLevel, TrailClass};

use crate::{DecisionError, DecisionResult};

/// Preference value used for desperate-only terrain when it is reached
/// during downstream lookahead.
pub const DESPERATE_PREFERENCE: f32 = 0.01;

/// How a skill tier relates to one trail class.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preference {
    /// Acceptable terrain with a comfort weight in `(0, 1]`.
    Allowed(f32),
    /// Usable when nothing else is available; scored at a tiny constant.
    DesperateOnly,
    /// Hard block: scored exactly zero.
    Disallowed,
}

impl Preference {
    /// Value of this terrain when reached further down the network, or `None`
    /// when it cannot be used at all.
    #[inline]
    pub fn reach_value(self) -> Option<f32> {
        match self {
            Preference::Allowed(w) => Some(w),
            Preference::DesperateOnly => Some(DESPERATE_PREFERENCE),
            Preference::Disallowed => None,
        }
    }

    #[inline]
    pub fn is_disallowed(self) -> bool {
        matches!(self, Preference::Disallowed)
    }

    /// Total order used to pick the best of several options:
    /// any `Allowed` beats `DesperateOnly`, which beats `Disallowed`.
    fn rank(self) -> (u8, f32) {
        match self {
            Preference::Allowed(w) => (2, w),
            Preference::DesperateOnly => (1, 0.0),
            Preference::Disallowed => (0, 0.0),
        }
    }

    /// `true` if `self` is strictly preferable to `other`.
    pub fn beats(self, other: Preference) -> bool {
        let (a, b) = (self.rank(), other.rank());
        a.0 > b.0 || (a.0 == b.0 && a.1 > b.1)
    }
}

/// Preference for every `(SkillLevel, TrailClass)` pair.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceTable {
    rows: [[Preference; 4]; 4],
}

impl PreferenceTable {
    #[inline]
    pub fn get(&self, skill: SkillLevel, class: TrailClass) -> Preference {
        self.rows[skill.ordinal() as usize][class.ordinal() as usize]
    }

    pub fn set(&mut self, skill: SkillLevel, class: TrailClass, pref: Preference) {
        self.rows[skill.ordinal() as usize][class.ordinal() as usize] = pref;
    }

    pub fn validate(&self) -> DecisionResult<()> {
        for skill in SkillLevel::ALL {
            for class in TrailClass::ALL {
                if let Preference::Allowed(w) = self.get(skill, class) {
                    if !(w > 0.0 && w <= 1.0) {
                        return Err(DecisionError::InvalidPreference {
                            skill: skill.as_str(),
                            class: class.as_str(),
                            value: w,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for PreferenceTable {
    fn default() -> Self {
        use Preference::{Allowed as A, DesperateOnly as D, Disallowed as X};
        Self {
            rows: [
                [A(1.0),  D,      X,      X],
                [A(0.5),  A(1.0), D,      X],
                [A(0.25), A(0.6), A(1.0), A(0.4)],
                [A(0.15), A(0.4), A(0.8), A(1.0)],
            ],
        }
    }
}

/// Comfort with using a trail of `class` purely as transit.
///
/// Grows with how much easier the trail is than the visitor's tier and
/// plateaus near the top; one class above the tier it drops to a small
/// constant, two or more above it is zero.
pub fn traversal_willingness(skill: SkillLevel, class: TrailClass) -> f32 {
    match skill.gap_to(class) {
        i32::MIN..=-2 => 0.0,
        -1 => 0.1,
        0 => 0.3,
        1 => 0.6,
        2 => 0.8,
        _ => 0.85,
    }
}
