//! Solver phases.
//!
//! - [`construction`] - seeders producing an initial tour
//! - [`localsearch`] - descent to a local optimum, with optional move memory

pub mod construction;
pub mod localsearch;
