//! `piste-network`: the resort's transport topology.
//!
//! The network is consumed read-only by every other crate: traffic
//! bookkeeping, downstream evaluation, decisions and motion all reference
//! edges by id and look them up here.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`edge`]    | `Trail`, `Lift`, `Lodge` records (path, arc length, validity)  |
//! | [`anchor`]  | `Anchor`: spatially indexed points of interest                |
//! | [`network`] | `SkiNetwork` (R-tree + connection tables), `SkiNetworkBuilder` |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod anchor;
pub mod edge;
pub mod error;
pub mod network;


pub use anchor::Anchor;
pub use edge::{Lift, Lodge, Trail};
pub use error::{NetworkError, NetworkResult};
pub use network::{SkiNetwork, SkiNetworkBuilder};
