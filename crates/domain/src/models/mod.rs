//! Domain models for DisasterWatch.

pub mod advice;
pub mod ai_recommendation;
pub mod alert;
pub mod earthquake;
pub mod evacuee;
pub mod notification;
pub mod prediction;
pub mod region;
pub mod report;
pub mod safety_tip;
pub mod shelter;
pub mod user;

pub use advice::{AdminRecommendation, AreaRiskAssessment, RouteAnalysis, SafetyRecommendations, SafetyRoutes};
pub use ai_recommendation::StoredRecommendation;
pub use alert::{Alert, AlertStatus};
pub use earthquake::{Earthquake, NearbyEarthquakes, SearchLocation};
pub use evacuee::{Evacuee, EvacueeDraft, EvacueeStatus};
pub use notification::Notification;
pub use prediction::{EarthquakePredictions, EarthquakeStatistics};
pub use region::Region;
pub use report::{Report, ReportDraft};
pub use safety_tip::SafetyTip;
pub use shelter::{NearbyShelter, Shelter, ShelterDraft, ShelterPatch, ShelterStatus};
pub use user::{AuthUser, LoginRequest, LoginResponse, User};
