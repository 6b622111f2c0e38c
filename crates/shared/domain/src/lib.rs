//! # Domain Models
//!
//! This crate contains pure domain types with a single dependency (`serde`).
//! Keep it lean: plain data and well-known names, no I/O.

pub mod config;
pub mod constants;
