//! Structured answers produced by the chat-completion model.
//!
//! Each type mirrors the JSON schema its prompt asks the model to emit, so
//! deserializing into it doubles as schema validation. Fields the model
//! frequently omits carry serde defaults; the identifying fields do not.
//!
//! When the answer cannot be parsed, the `degraded`/`fallback` constructors
//! synthesize a usable value and keep the raw text in `raw_response`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use shared::text::truncate_chars;

use crate::models::shelter::NearbyShelter;

/// Confidence attached to synthesized answers.
pub const DEGRADED_ACCURACY: f64 = 75.0;

/// Accepts a JSON string, number or null where the prompt asked for a string.
/// Models routinely answer `"capacity": 500` instead of `"500"`.
fn deserialize_loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// ============================================================================
// Admin: shelter management recommendations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterPick {
    pub name: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedArea {
    pub name: String,
    #[serde(default)]
    pub reason: String,
    /// high, medium or low.
    #[serde(default)]
    pub risk_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterRecommendation {
    #[serde(default)]
    pub shelter: String,
    #[serde(default)]
    pub region: String,
    pub recommendation: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub confidence: Option<String>,
}

/// Answer to the admin console's situation analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecommendation {
    pub most_recommended_shelter: ShelterPick,
    pub most_affected_area: AffectedArea,
    #[serde(default)]
    pub accuracy_rate: f64,
    pub recommendations: Vec<ShelterRecommendation>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl AdminRecommendation {
    /// Builds a best-effort answer around text that did not parse.
    pub fn degraded(raw: &str) -> Self {
        Self {
            most_recommended_shelter: ShelterPick {
                name: "Analysis in progress".to_string(),
                reason: truncate_chars(raw, 200).to_string(),
                region: "Caraga".to_string(),
            },
            most_affected_area: AffectedArea {
                name: "See details".to_string(),
                reason: "AI analysis completed".to_string(),
                risk_level: "medium".to_string(),
            },
            accuracy_rate: DEGRADED_ACCURACY,
            recommendations: vec![ShelterRecommendation {
                shelter: "General".to_string(),
                region: "Caraga".to_string(),
                recommendation: truncate_chars(raw, 300).to_string(),
                priority: "medium".to_string(),
                confidence: Some(format!("{}%", DEGRADED_ACCURACY)),
            }],
            summary: truncate_chars(raw, 500).to_string(),
            raw_response: Some(raw.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.raw_response.is_some()
    }
}

/// Answer to a single-area seismic risk question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRiskAssessment {
    /// high, medium or low; `unknown` when analysis failed.
    pub risk_level: String,
    pub score: f64,
    #[serde(default)]
    pub factors: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
}

impl AreaRiskAssessment {
    pub fn unavailable() -> Self {
        Self {
            risk_level: "unknown".to_string(),
            score: 50.0,
            factors: vec!["Unable to complete analysis".to_string()],
            recommendation: "Please try again later".to_string(),
        }
    }
}

// ============================================================================
// Public: personalized safety recommendations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// HIGH, MODERATE or LOW.
    pub level: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub immediate_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedShelter {
    pub name: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub priority: Option<f64>,
    #[serde(default)]
    pub safety_score: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub distance: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub capacity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvacuationAdvice {
    #[serde(default)]
    pub should_evacuate: bool,
    /// immediate, soon or monitor.
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub best_route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_route: Option<String>,
    #[serde(default)]
    pub areas_to_avoid: Vec<String>,
    #[serde(default)]
    pub safety_tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub item: String,
    /// critical, important or recommended.
    #[serde(default)]
    pub importance: String,
    #[serde(default)]
    pub reason: String,
}

impl ChecklistItem {
    fn new(item: &str, importance: &str, reason: &str) -> Self {
        Self {
            item: item.to_string(),
            importance: importance.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Answer to the public site's location-specific safety question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRecommendations {
    pub risk_assessment: RiskAssessment,
    #[serde(default)]
    pub shelter_recommendations: Vec<RecommendedShelter>,
    pub evacuation_advice: EvacuationAdvice,
    #[serde(default)]
    pub preparedness_checklist: Vec<ChecklistItem>,
    #[serde(default, alias = "personalizedTips")]
    pub localized_tips: Vec<String>,
    /// Keyed contacts, e.g. pdrrmo, hospital, hotline.
    #[serde(default)]
    pub emergency_contacts: BTreeMap<String, String>,
    #[serde(default)]
    pub nearby_landmarks: Vec<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl SafetyRecommendations {
    /// Builds a generic answer around text that did not parse.
    pub fn degraded(raw: &str) -> Self {
        let mut emergency_contacts = BTreeMap::new();
        emergency_contacts.insert("primary".to_string(), "Emergency Hotline: 911".to_string());
        emergency_contacts.insert(
            "secondary".to_string(),
            "Philippine Red Cross: 143".to_string(),
        );

        Self {
            risk_assessment: RiskAssessment {
                level: "MODERATE".to_string(),
                description: truncate_chars(raw, 300).to_string(),
                immediate_actions: vec![
                    "Stay alert".to_string(),
                    "Know your nearest evacuation shelter".to_string(),
                    "Keep emergency kit ready".to_string(),
                ],
            },
            shelter_recommendations: Vec::new(),
            evacuation_advice: EvacuationAdvice {
                should_evacuate: false,
                urgency: "monitor".to_string(),
                best_route: "Follow local authority guidance".to_string(),
                alternative_route: None,
                areas_to_avoid: Vec::new(),
                safety_tips: vec!["Stay informed through official channels".to_string()],
            },
            preparedness_checklist: vec![
                ChecklistItem::new("Emergency water supply", "critical", "Essential for survival"),
                ChecklistItem::new("First aid kit", "critical", "Medical emergencies"),
                ChecklistItem::new("Flashlight and batteries", "important", "Power outages"),
            ],
            localized_tips: vec!["Follow Drop, Cover, and Hold during earthquakes".to_string()],
            emergency_contacts,
            nearby_landmarks: Vec::new(),
            summary: "AI analysis completed. Please review recommendations carefully.".to_string(),
            raw_response: Some(raw.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.raw_response.is_some()
    }
}

// ============================================================================
// Public: evacuation routes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvacuationRoute {
    #[serde(default)]
    pub shelter_name: String,
    pub route_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub estimated_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub distance: Option<String>,
    /// SAFEST, SAFE, MODERATE or USE_WITH_CAUTION.
    #[serde(default)]
    pub safety_level: String,
    #[serde(default)]
    pub directions: Vec<String>,
    #[serde(default)]
    pub hazards_to_avoid: Vec<String>,
    #[serde(default)]
    pub landmarks: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralAdvice {
    #[serde(default)]
    pub before_leaving: Vec<String>,
    #[serde(default)]
    pub during_evacuation: Vec<String>,
    #[serde(default)]
    pub on_arrival: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlternatives {
    #[serde(default)]
    pub if_main_route_blocked: String,
    #[serde(default)]
    pub if_shelter_full: String,
}

/// Answer to the public site's evacuation route question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRoutes {
    pub recommended_shelter: RecommendedShelter,
    pub routes: Vec<EvacuationRoute>,
    #[serde(default)]
    pub general_advice: GeneralAdvice,
    #[serde(default)]
    pub emergency_alternatives: EmergencyAlternatives,
    #[serde(default)]
    pub important_reminders: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

const FALLBACK_ROUTE_COUNT: usize = 3;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SafetyRoutes {
    /// Synthesizes direct routes to the first few shelters when the model's
    /// answer is unusable.
    pub fn fallback(shelters: &[NearbyShelter], raw: &str) -> Self {
        let routes = shelters
            .iter()
            .take(FALLBACK_ROUTE_COUNT)
            .enumerate()
            .map(|(idx, shelter)| {
                let target = if shelter.name.is_empty() {
                    "the evacuation center"
                } else {
                    shelter.name.as_str()
                };
                let safety_level = match idx {
                    0 => "SAFEST",
                    1 => "SAFE",
                    _ => "MODERATE",
                };
                EvacuationRoute {
                    shelter_name: if shelter.name.is_empty() {
                        format!("Shelter {}", idx + 1)
                    } else {
                        shelter.name.clone()
                    },
                    route_name: format!("Route {}", idx + 1),
                    description: format!("Direct route to {}", target),
                    estimated_time: Some(format!("{} minutes", 5 + idx * 3)),
                    distance: Some(
                        shelter
                            .distance
                            .clone()
                            .unwrap_or_else(|| format!("{} km", 0.5 + idx as f64 * 0.3)),
                    ),
                    safety_level: safety_level.to_string(),
                    directions: vec![
                        "Exit your building through the main entrance".to_string(),
                        "Walk towards the main road".to_string(),
                        format!("Head towards {}", target),
                        "Follow evacuation signs if available".to_string(),
                        "Arrive at the shelter and check in with authorities".to_string(),
                    ],
                    hazards_to_avoid: strings(&[
                        "Damaged buildings and falling debris",
                        "Downed power lines",
                        "Cracked roads or bridges",
                    ]),
                    landmarks: strings(&[
                        "Main road intersection",
                        "Local barangay hall",
                        "School or church",
                    ]),
                    tips: strings(&[
                        "Walk, do not run",
                        "Stay in open areas away from buildings",
                        "Help others if safe to do so",
                    ]),
                }
            })
            .collect();

        Self {
            recommended_shelter: RecommendedShelter {
                name: shelters
                    .first()
                    .map(|s| s.name.clone())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "Nearest evacuation center".to_string()),
                reason: "Closest shelter with adequate capacity".to_string(),
                priority: None,
                safety_score: Some(85.0),
                distance: None,
                capacity: None,
            },
            routes,
            general_advice: GeneralAdvice {
                before_leaving: strings(&[
                    "Turn off gas and electricity if safe",
                    "Grab your emergency kit",
                    "Wear sturdy shoes",
                ]),
                during_evacuation: strings(&[
                    "Stay calm and walk carefully",
                    "Avoid elevators",
                    "Stay away from damaged structures",
                ]),
                on_arrival: strings(&[
                    "Register with shelter staff",
                    "Report any injuries",
                    "Stay until cleared by authorities",
                ]),
            },
            emergency_alternatives: EmergencyAlternatives {
                if_main_route_blocked:
                    "Use alternate roads or seek guidance from local authorities".to_string(),
                if_shelter_full:
                    "Proceed to the next nearest shelter or contact emergency services".to_string(),
            },
            important_reminders: strings(&[
                "Call 911 for emergencies",
                "Keep your phone charged",
                "Stay with your family or group",
            ]),
            raw_response: Some(raw.to_string()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.raw_response.is_some()
    }
}

/// Safety rating of a single route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAnalysis {
    /// safe, moderate or risky; `unknown` when no model is configured.
    pub safety: String,
    pub score: f64,
    #[serde(default)]
    pub hazards: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl RouteAnalysis {
    /// Returned when no API key is configured.
    pub fn unconfigured() -> Self {
        Self {
            safety: "unknown".to_string(),
            score: 50.0,
            hazards: Vec::new(),
            recommendations: vec!["Unable to analyze - please follow official guidance".to_string()],
        }
    }

    /// Returned when the request or its parsing failed.
    pub fn unavailable() -> Self {
        Self {
            safety: "moderate".to_string(),
            score: 60.0,
            hazards: vec!["Unable to fully analyze".to_string()],
            recommendations: strings(&["Follow main roads", "Avoid damaged structures"]),
        }
    }
}
