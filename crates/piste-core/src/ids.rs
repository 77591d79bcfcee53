//! Typed indices for visitors and resort structures.
//!
//! Each id is the position of its record in the owning table.  Trail and
//! lift ids stay stable for the lifetime of a network: closing an edge flips
//! its validity flag and never renumbers the others.

use std::fmt;

macro_rules! typed_id {
    ($prefix:literal, $(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for "no structure"; never issued by a builder.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }
    };
}

typed_id! {
    "agent",
    /// Index of a visitor in agent storage.
    pub struct AgentId(u32);
}

typed_id! {
    "trail",
    /// Index of a directed trail in the network.
    pub struct TrailId(u32);
}

typed_id! {
    "lift",
    /// Index of a one-way lift in the network.
    pub struct LiftId(u32);
}

typed_id! {
    "lodge",
    /// Index of a rest-capable structure (lodge).
    pub struct LodgeId(u32);
}
