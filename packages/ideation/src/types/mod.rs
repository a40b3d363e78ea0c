//! Domain types: ideas, documents, scores and configuration.

pub mod config;
pub mod document;
pub mod idea;
pub mod score;
