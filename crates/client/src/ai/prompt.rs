//! Prompt inputs and rendering.
//!
//! Each collection is cut to the configured [`PromptLimits`] before it is
//! rendered as a bulleted block.

use domain::models::{Alert, Earthquake, NearbyShelter, Shelter};
use domain::services::{LocationContext, ShelterStats};
use serde::Deserialize;
use shared::text::or_placeholder;

use crate::config::PromptLimits;

/// A system/user message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

// ============================================================================
// Inputs
// ============================================================================

/// Dashboard snapshot analysed by the operator recommendation prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminContext<'a> {
    pub shelters: &'a [Shelter],
    pub earthquakes: &'a [Earthquake],
    pub alerts: &'a [Alert],
    pub stats: Option<ShelterStats>,
}

/// Area named in a risk question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaQuery {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub recent_earthquakes: usize,
    #[serde(default)]
    pub shelters_nearby: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserLocation {
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub barangay: Option<String>,
}

impl UserLocation {
    pub fn city_or_unknown(&self) -> &str {
        or_placeholder(self.city.as_deref(), "Unknown City")
    }

    pub fn province_or_unknown(&self) -> &str {
        or_placeholder(self.province.as_deref(), "Unknown Province")
    }

    fn barangay(&self) -> Option<&str> {
        self.barangay.as_deref().filter(|b| !b.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRisk {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub seismic_activity: Option<String>,
    #[serde(default)]
    pub fault_line_distance: Option<String>,
    #[serde(default)]
    pub building_density: Option<String>,
}

/// Input of the citizen safety recommendation prompt.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyQuery {
    #[serde(default)]
    pub location: UserLocation,
    #[serde(default)]
    pub shelters: Vec<NearbyShelter>,
    #[serde(default)]
    pub earthquakes: Vec<Earthquake>,
    #[serde(default)]
    pub current_risk: CurrentRisk,
}

/// Input of the evacuation route prompt.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    #[serde(default)]
    pub location: UserLocation,
    #[serde(default)]
    pub shelters: Vec<NearbyShelter>,
    #[serde(default)]
    pub current_risk: CurrentRisk,
}

/// A single route to assess.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCheck {
    pub from_location: String,
    pub to_shelter: String,
    #[serde(default)]
    pub current_conditions: Option<String>,
}

/// Situation summary for the citizen quick tip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipContext {
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

// ============================================================================
// System prompts
// ============================================================================

pub const ADMIN_SYSTEM: &str = r#"You are an AI disaster management assistant for the Caraga Region in the Philippines.
Your role is to analyze shelter data, earthquake activity, and alerts to provide actionable safety recommendations.
Always respond in JSON format with the following structure:
{
  "mostRecommendedShelter": { "name": "string", "reason": "string", "region": "string" },
  "mostAffectedArea": { "name": "string", "reason": "string", "riskLevel": "high|medium|low" },
  "accuracyRate": number (0-100),
  "recommendations": [
    { "shelter": "string", "region": "string", "recommendation": "string", "priority": "high|medium|low", "confidence": "string" }
  ],
  "summary": "string"
}"#;

pub const ADMIN_TIP_SYSTEM: &str =
    "You are a disaster safety expert. Provide brief, actionable safety tips (1-2 sentences max).";

pub const AREA_RISK_SYSTEM: &str = r#"You are a seismic risk analyst. Analyze area risk and respond in JSON format: { "riskLevel": "high|medium|low", "score": 0-100, "factors": ["string"], "recommendation": "string" }"#;

pub const SAFETY_SYSTEM: &str = r#"You are an AI disaster safety advisor specializing in the Caraga Region, Philippines.
You have detailed knowledge of each province and city/municipality in Caraga, including:
- Local terrain and geography
- Proximity to fault lines (especially the Philippine Fault Zone)
- Historical earthquake data (including the 2017 Surigao earthquake)
- Local infrastructure and road networks
- Common hazards specific to each area

Your role is to provide HIGHLY PERSONALIZED earthquake safety recommendations based on the user's SPECIFIC location.
Tailor all advice to the particular characteristics and risks of their city/municipality.

Always respond in JSON format with the following structure:
{
  "riskAssessment": {
    "level": "HIGH|MODERATE|LOW",
    "description": "string - specific to this location",
    "immediateActions": ["string - location-specific actions"]
  },
  "shelterRecommendations": [
    { "name": "string", "reason": "string - why this shelter is good for this area", "priority": 1-5, "safetyScore": 1-100, "distance": "string", "capacity": "string" }
  ],
  "evacuationAdvice": {
    "shouldEvacuate": boolean,
    "urgency": "immediate|soon|monitor",
    "bestRoute": "string - specific route based on local geography",
    "alternativeRoute": "string",
    "areasToAvoid": ["string - specific local areas to avoid"],
    "safetyTips": ["string"]
  },
  "preparednessChecklist": [
    { "item": "string", "importance": "critical|important|recommended", "reason": "string - why important for this location" }
  ],
  "localizedTips": ["string - tips specific to this city/province"],
  "emergencyContacts": {
    "pdrrmo": "string - local PDRRMO number",
    "hospital": "string - nearest hospital",
    "hotline": "911"
  },
  "nearbyLandmarks": ["string - landmarks to use for navigation"],
  "summary": "string - personalized summary for this location"
}"#;

const ROUTES_SCHEMA: &str = r#"{
  "recommendedShelter": {
    "name": "string",
    "reason": "string - specific to this location",
    "safetyScore": 1-100,
    "distance": "string",
    "capacity": "string"
  },
  "routes": [
    {
      "shelterName": "string",
      "routeName": "string",
      "description": "string",
      "estimatedTime": "string",
      "distance": "string",
      "safetyLevel": "SAFEST|SAFE|MODERATE|USE_WITH_CAUTION",
      "directions": ["step 1", "step 2", "..."],
      "hazardsToAvoid": ["string"],
      "landmarks": ["string"],
      "tips": ["string"]
    }
  ],
  "generalAdvice": {
    "beforeLeaving": ["string"],
    "duringEvacuation": ["string"],
    "onArrival": ["string"]
  },
  "emergencyAlternatives": {
    "ifMainRouteBlocked": "string",
    "ifShelterFull": "string"
  },
  "importantReminders": ["string"]
}"#;

pub const PUBLIC_TIP_SYSTEM: &str = "You are a disaster safety expert. Provide brief, actionable safety tips (1-2 sentences max) for earthquake preparedness.";

pub const ROUTE_ANALYSIS_SYSTEM: &str = r#"Analyze evacuation routes and respond in JSON: { "safety": "safe|moderate|risky", "score": 0-100, "hazards": ["string"], "recommendations": ["string"] }"#;

// ============================================================================
// Rendering
// ============================================================================

fn join_or(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items.join(", ")
    }
}

fn block_or(lines: Vec<String>, placeholder: &str) -> String {
    if lines.is_empty() {
        placeholder.to_string()
    } else {
        lines.join("\n")
    }
}

fn stat(value: Option<i64>) -> String {
    value.map_or_else(|| "Unknown".to_string(), |v| v.to_string())
}

fn coordinate(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

pub fn admin_shelter_line(shelter: &Shelter) -> String {
    format!(
        "- {}: Status={}, Capacity={}, Occupancy={}, Location={}",
        shelter.name,
        shelter.status,
        shelter.max_capacity,
        shelter.current_occupancy,
        or_placeholder(shelter.address.as_deref(), "N/A"),
    )
}

pub fn admin_earthquake_line(quake: &Earthquake) -> String {
    format!(
        "- Magnitude {} at {}, {} on {}",
        quake.magnitude,
        coordinate(quake.latitude),
        coordinate(quake.longitude),
        quake.triggered_at.to_rfc3339(),
    )
}

pub fn admin_alert_line(alert: &Alert) -> String {
    format!(
        "- {}: {} (Status: {})",
        alert.headline(),
        alert.detail(),
        alert.status
    )
}

pub fn admin_recommendations(ctx: &AdminContext<'_>, limits: PromptLimits) -> Prompt {
    let stats = ctx.stats;
    let field = |f: fn(&ShelterStats) -> i64| stat(stats.as_ref().map(f));

    let shelters = block_or(
        ctx.shelters
            .iter()
            .take(limits.shelters)
            .map(admin_shelter_line)
            .collect(),
        "No shelter data available",
    );
    let earthquakes = block_or(
        ctx.earthquakes
            .iter()
            .take(limits.earthquakes)
            .map(admin_earthquake_line)
            .collect(),
        "No recent earthquake data",
    );
    let alerts = block_or(
        ctx.alerts
            .iter()
            .take(limits.alerts)
            .map(admin_alert_line)
            .collect(),
        "No active alerts",
    );

    let user = format!(
        "Analyze the following disaster management data for Caraga Region and provide AI-powered safety recommendations:

## Current Statistics
- Total Shelters: {total}
- Active Shelters: {active}
- Full Capacity Shelters: {full}
- Under Maintenance: {maintenance}
- Active Alerts: {active_alerts}
- Total Evacuees: {evacuees}

## Shelter Data
{shelters}

## Recent Earthquake Activity
{earthquakes}

## Active Alerts
{alerts}

Based on this data, provide:
1. The most recommended shelter for evacuation
2. The most affected area that needs attention
3. Your confidence/accuracy rate for these recommendations
4. 3-5 specific actionable recommendations for shelter management
5. A brief summary of the current situation

Respond ONLY with valid JSON.",
        total = field(|s| s.total_shelters as i64),
        active = field(|s| s.active_shelters as i64),
        full = field(|s| s.full_capacity_shelters as i64),
        maintenance = field(|s| s.maintenance_shelters as i64),
        active_alerts = field(|s| s.active_alerts as i64),
        evacuees = field(|s| s.total_evacuees),
    );

    Prompt {
        system: ADMIN_SYSTEM.to_string(),
        user,
    }
}

pub fn admin_tip(context: &str) -> Prompt {
    Prompt {
        system: ADMIN_TIP_SYSTEM.to_string(),
        user: format!(
            "Given this situation: {}. Provide one quick safety tip.",
            context
        ),
    }
}

pub fn area_risk(query: &AreaQuery) -> Prompt {
    Prompt {
        system: AREA_RISK_SYSTEM.to_string(),
        user: format!(
            "Analyze risk for {} at coordinates ({}, {}). Recent earthquakes: {}. Nearby shelters: {}. Provide risk assessment.",
            query.name,
            query.latitude,
            query.longitude,
            query.recent_earthquakes,
            query.shelters_nearby
        ),
    }
}

pub fn public_shelter_line(shelter: &NearbyShelter) -> String {
    format!(
        "- {}: {} capacity, {} away, {}",
        shelter.name,
        shelter
            .capacity
            .map_or_else(|| "Unknown".to_string(), |c| c.to_string()),
        or_placeholder(shelter.distance.as_deref(), "unknown distance"),
        or_placeholder(shelter.walk_time.as_deref(), "walk time unknown"),
    )
}

pub fn public_earthquake_line(quake: &Earthquake) -> String {
    format!("- Magnitude {} at {}", quake.magnitude, quake.place_label())
}

fn contacts_line(ctx: &LocationContext) -> String {
    format!(
        "- Local Emergency Contacts: PDRRMO: {}, Hospital: {}",
        ctx.emergency_contacts.pdrrmo, ctx.emergency_contacts.hospital
    )
}

pub fn safety_recommendations(
    query: &SafetyQuery,
    ctx: &LocationContext,
    limits: PromptLimits,
) -> Prompt {
    let city = query.location.city_or_unknown();
    let province = query.location.province_or_unknown();

    let location_info = match query.location.barangay() {
        Some(barangay) => format!("{}, {}, Barangay {}", city, province, barangay),
        None => format!("{}, {}", city, province),
    };

    let location_hazards = format!(
        "## Location-Specific Information for {city}, {province}
- Terrain: {terrain}
- Fault Line Proximity: {faults}
- City Characteristics: {characteristics}
- Common Hazards in Area: {common}
- Specific Local Hazards: {specific}
- Key Landmarks: {landmarks}
- Evacuation Notes: {notes}
{contacts}",
        terrain = ctx.terrain,
        faults = ctx.fault_lines,
        characteristics = ctx.city_characteristics,
        common = ctx.common_hazards.join(", "),
        specific = join_or(&ctx.specific_hazards, "Standard earthquake risks"),
        landmarks = join_or(&ctx.key_landmarks, "Local landmarks"),
        notes = ctx.evacuation_notes,
        contacts = contacts_line(ctx),
    );

    let risk = &query.current_risk;
    let shelters = block_or(
        query
            .shelters
            .iter()
            .take(limits.shelters)
            .map(public_shelter_line)
            .collect(),
        "No shelter data available - recommend based on local knowledge",
    );
    let earthquakes = block_or(
        query
            .earthquakes
            .iter()
            .take(limits.earthquakes)
            .map(public_earthquake_line)
            .collect(),
        "No recent earthquake data",
    );

    let user = format!(
        "Generate LOCATION-SPECIFIC earthquake safety recommendations for a citizen located in:

## Exact Location
{location_info}

{location_hazards}

## Current Risk Status
Current Risk Level: {level}, Seismic Activity: {seismic}
Fault Line Distance: {fault_distance}
Building Density: {density}

## Nearby Evacuation Shelters
{shelters}

## Recent Seismic Activity
{earthquakes}

IMPORTANT: Your recommendations must be SPECIFIC to {city}, {province}.
Consider:
1. The unique terrain and geography of this specific location
2. Local road networks and evacuation routes known in this area
3. Historical earthquake patterns in {province}
4. Specific buildings, landmarks, and infrastructure in {city}
5. Local emergency services and hospitals
6. Areas in this city that are particularly vulnerable

Do NOT give generic advice. Every recommendation should mention specific local details.
Respond ONLY with valid JSON.",
        level = or_placeholder(risk.level.as_deref(), "Unknown"),
        seismic = or_placeholder(risk.seismic_activity.as_deref(), "Unknown"),
        fault_distance = or_placeholder(risk.fault_line_distance.as_deref(), "Unknown"),
        density = or_placeholder(risk.building_density.as_deref(), "Unknown"),
    );

    Prompt {
        system: SAFETY_SYSTEM.to_string(),
        user,
    }
}

pub fn route_shelter_details(index: usize, shelter: &NearbyShelter) -> String {
    let coordinates = match (shelter.latitude, shelter.longitude) {
        (Some(lat), Some(lon)) => format!("{}, {}", lat, lon),
        _ => "N/A".to_string(),
    };
    format!(
        "{}. {}\n   - Address: {}\n   - Capacity: {}\n   - Distance: {}\n   - Coordinates: {}",
        index + 1,
        shelter.name,
        or_placeholder(shelter.address.as_deref(), "N/A"),
        shelter
            .capacity
            .map_or_else(|| "Unknown".to_string(), |c| c.to_string()),
        or_placeholder(shelter.distance.as_deref(), "Unknown"),
        coordinates,
    )
}

pub fn safety_routes(query: &RouteQuery, ctx: &LocationContext, limits: PromptLimits) -> Prompt {
    let city = query.location.city_or_unknown();
    let province = query.location.province_or_unknown();

    let location_info = match query.location.barangay() {
        Some(barangay) => format!("Barangay {}, {}, {}", barangay, city, province),
        None => format!("{}, {}", city, province),
    };

    let all_hazards: Vec<String> = ctx
        .common_hazards
        .iter()
        .chain(ctx.specific_hazards.iter())
        .cloned()
        .collect();

    let location_specific = format!(
        "## Location-Specific Context for {city}, {province}
- Terrain: {terrain}
- City Characteristics: {characteristics}
- Local Hazards to Consider: {hazards}
- Key Landmarks for Navigation: {landmarks}
- Evacuation Notes: {notes}
{contacts}",
        terrain = ctx.terrain,
        characteristics = ctx.city_characteristics,
        hazards = all_hazards.join(", "),
        landmarks = join_or(&ctx.key_landmarks, "Use local landmarks"),
        notes = ctx.evacuation_notes,
        contacts = contacts_line(ctx),
    );

    let shelter_details: Vec<String> = query
        .shelters
        .iter()
        .take(limits.shelters)
        .enumerate()
        .map(|(idx, s)| route_shelter_details(idx, s))
        .collect();
    let shelter_details = if shelter_details.is_empty() {
        format!(
            "No specific shelter data available - please recommend based on local knowledge of {}",
            city
        )
    } else {
        shelter_details.join("\n\n")
    };

    let system = format!(
        "You are an AI emergency evacuation route advisor specializing in the Caraga Region, Philippines.
You have detailed knowledge of:
- Local road networks and infrastructure in each city/municipality
- Terrain and geography (coastal areas, rivers, mountains, urban centers)
- Historical disaster patterns and vulnerable areas
- Key landmarks and navigation points
- Local emergency services

Your task is to recommend the SAFEST evacuation routes specific to the user's exact location.
All recommendations must reference actual local roads, landmarks, and areas in {city}, {province}.

Always respond in JSON format:
{schema}",
        schema = ROUTES_SCHEMA,
    );

    let risk = &query.current_risk;
    let user = format!(
        "Generate LOCATION-SPECIFIC safe evacuation routes for a person located in:
{location_info}

{location_specific}

## Current Situation
Risk Level: {level}
Seismic Activity: {seismic}

## Available Evacuation Shelters
{shelter_details}

IMPORTANT: Generate routes SPECIFIC to {city}, {province}. Include:
1. The most recommended shelter with reasons specific to this location
2. Detailed safe routes using actual local roads and landmarks in {city}
3. Step-by-step directions referencing real places in the area
4. Location-specific hazards to avoid (consider: {specific})
5. General evacuation advice tailored to {province}
6. Emergency alternatives if routes are blocked

Reference these local landmarks when possible: {landmarks}

Focus on SAFETY as the top priority. Be specific about:
- Which roads/paths to take in {city}
- Local landmarks to look for
- Areas in {city} to avoid
- What to do based on local terrain ({terrain})

Respond ONLY with valid JSON.",
        level = or_placeholder(risk.level.as_deref(), "MODERATE"),
        seismic = or_placeholder(risk.seismic_activity.as_deref(), "Unknown"),
        specific = join_or(&ctx.specific_hazards, "local terrain hazards"),
        landmarks = join_or(&ctx.key_landmarks, "local landmarks"),
        terrain = ctx.terrain,
    );

    Prompt { system, user }
}

pub fn public_tip(context: &TipContext) -> Prompt {
    Prompt {
        system: PUBLIC_TIP_SYSTEM.to_string(),
        user: format!(
            "Current situation: {} risk in {}. Give one specific safety tip.",
            or_placeholder(context.risk_level.as_deref(), "moderate"),
            or_placeholder(context.location.as_deref(), "Caraga Region"),
        ),
    }
}

pub fn route_analysis(check: &RouteCheck) -> Prompt {
    Prompt {
        system: ROUTE_ANALYSIS_SYSTEM.to_string(),
        user: format!(
            "Analyze route from \"{}\" to shelter \"{}\". Conditions: {}. Provide safety assessment.",
            check.from_location,
            check.to_shelter,
            or_placeholder(check.current_conditions.as_deref(), "normal"),
        ),
    }
}
