//! Core data models for the MMA directory.

mod event;
mod fight;
mod fighter;
mod ids;
mod ranking;
mod record;

pub use event::*;
pub use fight::*;
pub use fighter::*;
pub use ids::*;
pub use ranking::*;
pub use record::*;
