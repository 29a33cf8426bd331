//! Shared utilities and common types for the DisasterWatch workspace.
//!
//! This crate provides common functionality used across all other crates:
//! - Coordinate and measurement validation
//! - Page-number pagination envelopes
//! - Lenient decimal deserialization for backend payloads
//! - Character-safe text truncation

pub mod decimal;
pub mod pagination;
pub mod text;
pub mod validation;
