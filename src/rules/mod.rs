//! Rules collaborator: what cards do.
//!
//! The turn engine calls into `RulesEngine` for every card effect and never
//! interprets card-specific behavior itself. `BaseRules` resolves the closed
//! `Effect` list of the standard catalog.

pub mod base;
pub mod engine;

pub use base::BaseRules;
pub use engine::RulesEngine;
