//! Hazard and contact reference for the provinces and cities of Caraga.
//!
//! Used only to enrich prompt text; no decision is taken from it.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

struct CityProfile {
    characteristics: &'static str,
    specific_hazards: &'static [&'static str],
    key_landmarks: &'static [&'static str],
    evacuation_notes: &'static str,
}

struct ProvinceProfile {
    terrain: &'static str,
    fault_lines: &'static str,
    common_hazards: &'static [&'static str],
    pdrrmo: &'static str,
    hospital: &'static str,
    cities: HashMap<&'static str, CityProfile>,
}

/// Local contacts shown in prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyContacts {
    pub pdrrmo: String,
    pub hospital: String,
}

/// Resolved context for a province/city pair, with regional defaults
/// filled in for anything unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationContext {
    pub terrain: String,
    pub fault_lines: String,
    pub common_hazards: Vec<String>,
    pub emergency_contacts: EmergencyContacts,
    pub city_characteristics: String,
    pub specific_hazards: Vec<String>,
    pub key_landmarks: Vec<String>,
    pub evacuation_notes: String,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

lazy_static! {
    static ref CARAGA: HashMap<&'static str, ProvinceProfile> = {
        let mut provinces = HashMap::new();

        provinces.insert("Agusan del Norte", ProvinceProfile {
            terrain: "Mountainous with river valleys, prone to flooding along Agusan River",
            fault_lines: "Near Philippine Fault Zone, moderate seismic risk",
            common_hazards: &["Flooding from Agusan River", "Landslides in mountainous areas", "Liquefaction in low-lying areas"],
            pdrrmo: "(085) 342-5068",
            hospital: "Manuel J. Santos Hospital - (085) 225-4631",
            cities: HashMap::from([
                ("Butuan City", CityProfile {
                    characteristics: "Highly urbanized city, regional center, along Agusan River delta",
                    specific_hazards: &["Urban flooding", "Building collapse risk in old structures", "Traffic congestion during evacuation"],
                    key_landmarks: &["Robinsons Place Butuan", "Butuan City Hall", "Father Saturnino Urios University"],
                    evacuation_notes: "Head to higher ground areas like Libertad or designated evacuation centers",
                }),
                ("Cabadbaran City", CityProfile {
                    characteristics: "Coastal city with fishing communities",
                    specific_hazards: &["Coastal flooding", "Tsunami risk", "Storm surge"],
                    key_landmarks: &["Cabadbaran City Hall", "Public Market", "Cabadbaran Port"],
                    evacuation_notes: "Move inland and to higher elevations away from coast",
                }),
                ("Nasipit", CityProfile {
                    characteristics: "Port town with industrial areas",
                    specific_hazards: &["Industrial accidents", "Coastal hazards", "Port area congestion"],
                    key_landmarks: &["Nasipit Port", "Municipal Hall", "Nasipit National High School"],
                    evacuation_notes: "Avoid port area during emergencies, head to inland evacuation centers",
                }),
            ]),
        });

        provinces.insert("Agusan del Sur", ProvinceProfile {
            terrain: "Heavily forested with Agusan Marsh, mountainous eastern portion",
            fault_lines: "Philippine Fault Zone traverses the province",
            common_hazards: &["Flash floods", "Landslides", "River flooding from Agusan River"],
            pdrrmo: "(085) 839-3280",
            hospital: "Agusan del Sur Provincial Hospital",
            cities: HashMap::from([
                ("Bayugan City", CityProfile {
                    characteristics: "Landlocked city, commercial center of the province",
                    specific_hazards: &["Flash floods from mountains", "Road blockages during disasters"],
                    key_landmarks: &["Bayugan City Hall", "Bayugan Public Market", "AMA Computer College"],
                    evacuation_notes: "Use main highways for evacuation, avoid riverside areas",
                }),
                ("Prosperidad", CityProfile {
                    characteristics: "Provincial capital, government center",
                    specific_hazards: &["Flooding", "Limited road access during disasters"],
                    key_landmarks: &["Provincial Capitol", "Prosperidad Public Market"],
                    evacuation_notes: "Head to provincial government evacuation centers",
                }),
                ("San Francisco", CityProfile {
                    characteristics: "Near Agusan Marsh wildlife sanctuary",
                    specific_hazards: &["Marsh flooding", "Limited evacuation routes"],
                    key_landmarks: &["Municipal Hall", "San Francisco Central School"],
                    evacuation_notes: "Evacuate early due to limited road access",
                }),
            ]),
        });

        provinces.insert("Surigao del Norte", ProvinceProfile {
            terrain: "Coastal with islands, mountainous interior",
            fault_lines: "Philippine Fault Zone, high seismic activity (2017 earthquake epicenter)",
            common_hazards: &["Earthquakes (historically significant)", "Tsunami", "Coastal flooding", "Landslides"],
            pdrrmo: "(086) 826-2994",
            hospital: "Caraga Regional Hospital - (086) 826-2083",
            cities: HashMap::from([
                ("Surigao City", CityProfile {
                    characteristics: "Provincial capital, major port city, heavily affected by 2017 earthquake",
                    specific_hazards: &["Earthquake damage to old structures", "Tsunami risk", "Liquefaction"],
                    key_landmarks: &["Surigao City Hall", "Luneta Park", "Surigao Port", "Gateway Mall"],
                    evacuation_notes: "Move to designated evacuation centers on higher ground, avoid coastal areas",
                }),
                ("General Luna", CityProfile {
                    characteristics: "Tourist destination (Siargao Island), surfing capital",
                    specific_hazards: &["Tsunami", "Storm surge", "Limited medical facilities"],
                    key_landmarks: &["Cloud 9 Surfing Area", "General Luna Municipal Hall"],
                    evacuation_notes: "Head to higher ground immediately, limited evacuation options on island",
                }),
                ("Dapa", CityProfile {
                    characteristics: "Gateway to Siargao Island, port town",
                    specific_hazards: &["Coastal flooding", "Ferry disruptions during disasters"],
                    key_landmarks: &["Dapa Port", "Municipal Hall"],
                    evacuation_notes: "Evacuate to inland areas, ferry services may be suspended",
                }),
            ]),
        });

        provinces.insert("Surigao del Sur", ProvinceProfile {
            terrain: "Mountainous with narrow coastal plains, mining areas",
            fault_lines: "Near Philippine Fault Zone",
            common_hazards: &["Landslides (especially in mining areas)", "Coastal flooding", "Flash floods"],
            pdrrmo: "(086) 211-3706",
            hospital: "Adela Serra Ty Memorial Medical Center",
            cities: HashMap::from([
                ("Tandag City", CityProfile {
                    characteristics: "Provincial capital, coastal city",
                    specific_hazards: &["Coastal flooding", "Storm surge", "Building damage"],
                    key_landmarks: &["Tandag City Hall", "Provincial Capitol", "Tandag Public Market"],
                    evacuation_notes: "Move inland to evacuation centers, avoid coastal barangays",
                }),
                ("Bislig City", CityProfile {
                    characteristics: "Paper mill city, industrial area",
                    specific_hazards: &["Industrial hazards", "Flash floods", "Coastal flooding"],
                    key_landmarks: &["PICOP Paper Mill", "Bislig City Hall", "Tinuy-an Falls area"],
                    evacuation_notes: "Evacuate away from industrial areas and coastal zones",
                }),
                ("Hinatuan", CityProfile {
                    characteristics: "Known for Enchanted River, tourism area",
                    specific_hazards: &["Flash floods", "Coastal hazards", "Limited road access"],
                    key_landmarks: &["Enchanted River", "Municipal Hall"],
                    evacuation_notes: "Use main highway for evacuation, avoid river areas",
                }),
            ]),
        });

        provinces.insert("Dinagat Islands", ProvinceProfile {
            terrain: "Island province, mountainous with mining areas",
            fault_lines: "Moderate seismic risk",
            common_hazards: &["Typhoons", "Storm surge", "Landslides in mining areas", "Limited evacuation options"],
            pdrrmo: "(086) 826-8112",
            hospital: "Dinagat District Hospital",
            cities: HashMap::from([
                ("San Jose", CityProfile {
                    characteristics: "Provincial capital, main town",
                    specific_hazards: &["Storm surge", "Limited medical facilities", "Isolation during disasters"],
                    key_landmarks: &["Provincial Capitol", "San Jose Port"],
                    evacuation_notes: "Head to evacuation centers on higher ground, boat evacuation may be needed",
                }),
                ("Dinagat", CityProfile {
                    characteristics: "Coastal municipality",
                    specific_hazards: &["Coastal flooding", "Isolation", "Limited resources"],
                    key_landmarks: &["Municipal Hall", "Public Market"],
                    evacuation_notes: "Evacuate to designated centers early, coordinate with barangay officials",
                }),
            ]),
        });

        provinces
    };
}

/// Looks up `province` and `city`, falling back to regional defaults.
pub fn location_context(province: Option<&str>, city: Option<&str>) -> LocationContext {
    let province = province.and_then(|p| CARAGA.get(p));
    let city = province.zip(city).and_then(|(p, c)| p.cities.get(c));

    LocationContext {
        terrain: province
            .map(|p| p.terrain)
            .unwrap_or("Varied terrain in Caraga Region")
            .to_string(),
        fault_lines: province
            .map(|p| p.fault_lines)
            .unwrap_or("Near Philippine Fault Zone")
            .to_string(),
        common_hazards: province
            .map(|p| owned(p.common_hazards))
            .unwrap_or_else(|| owned(&["Earthquakes", "Flooding", "Landslides"])),
        emergency_contacts: EmergencyContacts {
            pdrrmo: province.map(|p| p.pdrrmo).unwrap_or("911").to_string(),
            hospital: province
                .map(|p| p.hospital)
                .unwrap_or("Nearest hospital")
                .to_string(),
        },
        city_characteristics: city
            .map(|c| c.characteristics)
            .unwrap_or("Urban/rural area")
            .to_string(),
        specific_hazards: city.map(|c| owned(c.specific_hazards)).unwrap_or_default(),
        key_landmarks: city.map(|c| owned(c.key_landmarks)).unwrap_or_default(),
        evacuation_notes: city
            .map(|c| c.evacuation_notes)
            .unwrap_or("Follow local authority guidance")
            .to_string(),
    }
}
