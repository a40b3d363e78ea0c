//! Core trait abstractions for the external collaborators.
//!
//! Applications implement these to plug in an idea generator and a
//! scholarly search backend.

pub mod evidence_source;
pub mod idea_source;
