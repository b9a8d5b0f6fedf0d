//! Scope recommendation engine for Scopewise.
//!
//! Turns a client questionnaire into a phased implementation plan: three
//! dimension scores, a per-feature verdict for every catalog entry, and the
//! work-breakdown statistics over everything that stays in scope. The entry
//! point is [`score`]; catalogs come from [`catalog`].

pub mod aggregate;
pub mod availability;
pub mod catalog;
pub mod dimensions;
pub mod engine;
pub mod feature;
pub mod weights;

pub use engine::score;
