//! Domain types shared by every SAFE ZONE crate.
//!
//! This crate has no internal dependencies: it holds the phase state
//! machine values, keyword handling, prompt construction, and the traits
//! the two generative collaborators implement.

pub mod audio;
pub mod collaborators;
pub mod error;
pub mod generation;
pub mod keywords;
pub mod phase;
pub mod prompt;
pub mod types;
