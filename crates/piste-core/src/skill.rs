//! Visitor skill tiers and trail difficulty classes.
//!
//! Both are ordinal: the derived `Ord` follows declaration order, and
//! [`SkillLevel::ordinal`] / [`TrailClass::ordinal`] expose the rank so that
//! skill/class gaps can be computed directly.

/// How capable a visitor is.  Lowest first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    #[inline]
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner     => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced     => "advanced",
            SkillLevel::Expert       => "expert",
        }
    }

    /// Signed gap between this skill and a trail class: positive when the
    /// trail is easier than the visitor's tier, negative when harder.
    #[inline]
    pub fn gap_to(self, class: TrailClass) -> i32 {
        self.ordinal() - class.ordinal()
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty class of a trail.  Easiest first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrailClass {
    #[default]
    Green,
    Blue,
    Black,
    DoubleBlack,
}

impl TrailClass {
    pub const ALL: [TrailClass; 4] = [
        TrailClass::Green,
        TrailClass::Blue,
        TrailClass::Black,
        TrailClass::DoubleBlack,
    ];

    #[inline]
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrailClass::Green       => "green",
            TrailClass::Blue        => "blue",
            TrailClass::Black       => "black",
            TrailClass::DoubleBlack => "double_black",
        }
    }
}

impl std::fmt::Display for TrailClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
