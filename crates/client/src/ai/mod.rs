//! Chat-completion backed recommendations.
//!
//! [`RecommendationService`] serves the operator dashboard and
//! [`SafetyAdvisor`] the public site. Both render a prompt, ask the primary
//! model (falling back once on a rejected model), strip Markdown fences and
//! parse the answer into a typed payload. Answers that do not parse are
//! turned into degraded payloads rather than errors.

pub mod admin;
pub mod chat;
pub mod fence;
pub mod prompt;
pub mod public;

pub use admin::RecommendationService;
pub use chat::{ChatClient, ChatMessage, Sampling};
pub use fence::{parse_answer, strip_fences};
pub use prompt::{
    AdminContext, AreaQuery, CurrentRisk, RouteCheck, RouteQuery, SafetyQuery, TipContext,
    UserLocation,
};
pub use public::SafetyAdvisor;
