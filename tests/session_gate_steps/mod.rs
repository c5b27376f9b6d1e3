//! Step definitions for session gate scenarios.

pub mod world;

mod given;
mod then;
mod when;
