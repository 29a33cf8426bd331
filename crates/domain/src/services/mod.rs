//! Domain services for DisasterWatch.
//!
//! Pure state and lookups that operate on domain models; nothing here
//! performs I/O.

pub mod alert_store;
pub mod location_context;
pub mod quake_log;
pub mod shelter_store;
pub mod stats;

pub use alert_store::AlertBoard;
pub use location_context::{location_context, EmergencyContacts, LocationContext};
pub use quake_log::{haversine_km, seeded_earthquakes, within_radius};
pub use shelter_store::ShelterBoard;
pub use stats::ShelterStats;
