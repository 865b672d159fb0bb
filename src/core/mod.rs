//! Core game module - states, events, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod clock;
mod data;
mod error;
mod events;
mod plugin;
mod states;

pub use clock::SurvivalClock;
pub use data::{read_ron, write_ron};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
