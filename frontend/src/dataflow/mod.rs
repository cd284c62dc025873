//! Event channels and state owners for the simulations
//!
//! - **[`Relay`]** - single-source event stream a page callback sends into
//! - **[`Actor`]** - owns one simulation's state; its loop is the only writer
//!
//! Relays follow the `{source}_{event}_relay` naming pattern
//! (`next_step_clicked_relay`, `container_resized_relay`). Render code reads
//! actor state through signals only.

pub mod actor;
pub mod relay;

pub use actor::Actor;
pub use relay::{Relay, relay};
