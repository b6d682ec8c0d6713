//! Infrastructure layer (adapters/implementations).
//!
//! This module contains the IO-heavy pieces: SQLite storage, config files and
//! terminal rendering.

pub mod app_config;
pub mod cli;
pub mod db;
