//! # MMA Directory
//!
//! A read-only directory of mixed martial arts events, fighters and rankings,
//! served as JSON over HTTP and from the command line.
//!
//! ## Architecture
//!
//! - **models**: Core records (events, fights, fighters, promotion records, rankings)
//! - **calculate**: Fighter statistics and record arithmetic
//! - **datefmt**: Eastern-time display formatting and countdowns
//! - **directory**: Search, filter, sort and bucket listings
//! - **rankings**: Division tables and pound-for-pound composition
//! - **card**: Main event and undercard split
//! - **source**: Data source seam (hosted REST backend or local snapshot)
//! - **views**: Page-level view models assembled from a data source
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod card;
pub mod config;
pub mod datefmt;
pub mod directory;
pub mod models;
pub mod rankings;
pub mod source;
pub mod views;

pub use models::*;
