//! `piste-traffic`: live load bookkeeping for trails and lifts.
//!
//! [`TrafficState`] is the single source of truth for "how busy is this
//! edge".  It feeds the decision engine three signals per edge:
//!
//! | Signal              | Formula                        | Used as          |
//! |---------------------|--------------------------------|------------------|
//! | deficit             | `(capacity − occupancy) / capacity` | bonus       |
//! | crowding            | `occupancy / capacity`         | penalty          |
//! | recent popularity   | share of the last K intents    | herding penalty  |
//!
//! # Event model
//!
//! ```text
//! on_*_intended   decision made, edge reserved in the intent window
//! on_*_entered    agent starts traversing      occupancy += 1
//! on_*_completed  agent reached the end        occupancy -= 1
//! on_*_exited     agent left early             occupancy -= 1
//! ```
//!
//! Only `entered`, `completed` and `exited` change occupancy.  Intents are
//! written the moment a decision is made so that agents deciding later in
//! the same tick see the reservation.
//!
//! There are no error states: unknown ids produce neutral (zero) signals and
//! events for unknown ids are ignored.
//!
//! # Crate layout
//!
//! | Module      | Contents                                       |
//! |-------------|------------------------------------------------|
//! | [`record`]  | `TrafficRecord`, `IntentWindow`                |
//! | [`state`]   | `TrafficState`, `TrafficConfig`                |

pub mod record;
pub mod state;


pub use record::{IntentWindow, TrafficRecord};
pub use state::{TrafficConfig, TrafficState};
