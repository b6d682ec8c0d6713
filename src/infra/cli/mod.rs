//! CLI infrastructure for Foodshare.
//!
//! Rendering helpers shared by the `foodshare` binary.

pub mod render;
