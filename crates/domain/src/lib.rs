//! Domain layer for the DisasterWatch clients.
//!
//! This crate contains:
//! - Domain models (Shelter, Earthquake, Alert, AI answers)
//! - Mock state boards and reference data
//! - Dashboard aggregates

pub mod models;
pub mod services;
