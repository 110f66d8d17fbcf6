//! Presentation-facing view models
//!
//! Projections of simulation state for whatever draws it, plus the small
//! amount of UI state (open panels, selection, scroll) they need.

pub mod book;

pub use book::{BookEntry, ElementBook, ElementDetails};
