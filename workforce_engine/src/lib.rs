//! Workforce Engine library crate.
//!
//! This crate exposes the work-allocation analytics engines as
//! reusable modules.  Callers load a [`models::Snapshot`] (directly or
//! through a [`source::WorkforceSource`]) and call into
//! [`aggregation`] and [`projection`], or build everything at once
//! with [`report::build_report`].

pub mod error;
pub mod models;
pub mod validate;
pub mod aggregation;
pub mod projection;
pub mod report;
pub mod source;
pub mod config;
pub mod logging;

pub use error::{EngineError, Result};
