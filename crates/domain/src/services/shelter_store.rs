//! In-memory shelter board used while developing without a backend.
//!
//! The board is a plain value: every mutation consumes it and returns the
//! next board together with the affected entry.

use crate::models::shelter::{Shelter, ShelterDraft, ShelterPatch, ShelterStatus};

const DEFAULT_SHELTER_TYPE: &str = "Multipurpose Center";
const DEFAULT_REGION_NAME: &str = "Caraga Region";

#[derive(Debug, Clone, PartialEq)]
pub struct ShelterBoard {
    shelters: Vec<Shelter>,
}

impl Default for ShelterBoard {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ShelterBoard {
    /// Board holding the five reference shelters of the Caraga Region.
    pub fn seeded() -> Self {
        Self {
            shelters: seed_shelters(),
        }
    }

    pub fn from_shelters(shelters: Vec<Shelter>) -> Self {
        Self { shelters }
    }

    pub fn shelters(&self) -> &[Shelter] {
        &self.shelters
    }

    pub fn len(&self) -> usize {
        self.shelters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelters.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Shelter> {
        self.shelters.iter().find(|s| s.id == id)
    }

    pub fn by_status(&self, status: ShelterStatus) -> Vec<Shelter> {
        self.shelters
            .iter()
            .filter(|s| s.status == status)
            .cloned()
            .collect()
    }

    pub fn by_region(&self, region_id: i64) -> Vec<Shelter> {
        self.shelters
            .iter()
            .filter(|s| s.region == Some(region_id))
            .cloned()
            .collect()
    }

    /// Shelters whose address mentions `city`, ignoring case.
    pub fn by_city(&self, city: &str) -> Vec<Shelter> {
        let needle = city.trim().to_lowercase();
        self.shelters
            .iter()
            .filter(|s| {
                s.address
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    fn next_id(&self) -> i64 {
        self.shelters.iter().map(|s| s.id).max().unwrap_or(0).saturating_add(1)
    }

    /// Prepends a new shelter built from `draft`.
    ///
    /// The id is one above the current maximum. Missing status defaults to
    /// inactive, missing type and region name to the regional defaults.
    pub fn add(mut self, draft: ShelterDraft) -> (Self, Shelter) {
        let shelter = Shelter {
            id: self.next_id(),
            name: draft.name,
            shelter_type: Some(
                draft
                    .shelter_type
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SHELTER_TYPE.to_string()),
            ),
            address: draft.address,
            region: draft.region,
            region_name: Some(
                draft
                    .region_name
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REGION_NAME.to_string()),
            ),
            status: draft.status.unwrap_or(ShelterStatus::Inactive),
            max_capacity: draft.max_capacity.unwrap_or(0),
            current_occupancy: draft.current_occupancy.unwrap_or(0),
            latitude: draft.latitude,
            longitude: draft.longitude,
            contact_person: draft.contact_person,
            contact_number: draft.contact_number,
            notes: draft.notes,
            created_at: None,
            updated_at: None,
        };

        self.shelters.insert(0, shelter.clone());
        (self, shelter)
    }

    /// Merges `patch` into the shelter with `id`. Unknown ids leave the
    /// board untouched.
    pub fn update(mut self, id: i64, patch: &ShelterPatch) -> (Self, Option<Shelter>) {
        let updated = self.shelters.iter_mut().find(|s| s.id == id).map(|s| {
            *s = patch.apply_to(s);
            s.clone()
        });
        (self, updated)
    }

    pub fn remove(mut self, id: i64) -> (Self, Option<Shelter>) {
        let removed = self
            .shelters
            .iter()
            .position(|s| s.id == id)
            .map(|idx| self.shelters.remove(idx));
        (self, removed)
    }

    /// Discards every change and returns to the seed.
    pub fn reset(self) -> Self {
        Self::seeded()
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: i64,
    name: &str,
    shelter_type: &str,
    city: &str,
    (region, region_name): (i64, &str),
    status: ShelterStatus,
    (max_capacity, current_occupancy): (i32, i32),
    (latitude, longitude): (f64, f64),
    (contact_person, contact_number): (&str, &str),
    notes: &str,
) -> Shelter {
    Shelter {
        id,
        name: name.to_string(),
        shelter_type: Some(shelter_type.to_string()),
        address: Some(format!("{}, {}", city, region_name)),
        region: Some(region),
        region_name: Some(region_name.to_string()),
        status,
        max_capacity,
        current_occupancy,
        latitude: Some(latitude),
        longitude: Some(longitude),
        contact_person: Some(contact_person.to_string()),
        contact_number: Some(contact_number.to_string()),
        notes: Some(notes.to_string()),
        created_at: None,
        updated_at: None,
    }
}

fn seed_shelters() -> Vec<Shelter> {
    vec![
        seed(
            1,
            "Butuan City Multipurpose Hall",
            "Multipurpose Center",
            "Butuan City",
            (1, "Agusan del Norte"),
            ShelterStatus::Active,
            (500, 320),
            (8.9483, 125.5401),
            ("Maya Santos", "+63-85-225-0000"),
            "Main assembly point for Butuan City",
        ),
        seed(
            2,
            "Surigao City Convention Center",
            "Convention Center",
            "Surigao City",
            (3, "Surigao del Norte"),
            ShelterStatus::Active,
            (420, 410),
            (9.79, 125.495),
            ("Ramon dela Cruz", "+63-86-236-0042"),
            "New kitchen built for relief operations",
        ),
        seed(
            3,
            "Tandag Multipurpose Center",
            "Multipurpose Center",
            "Tandag City",
            (4, "Surigao del Sur"),
            ShelterStatus::Active,
            (360, 285),
            (9.1478, 126.1977),
            ("Sonia Villanueva", "+63-86-211-5678"),
            "Supports barangay evacuation plans",
        ),
        seed(
            4,
            "Cabadbaran Evacuation Center",
            "Evacuation Center",
            "Cabadbaran City",
            (1, "Agusan del Norte"),
            ShelterStatus::Full,
            (280, 280),
            (9.0733, 125.4871),
            ("Imelda Rosales", "+63-85-222-1105"),
            "Full capacity, on standby for relief resupply",
        ),
        seed(
            5,
            "Bislig Community Center",
            "Community Center",
            "Bislig City",
            (4, "Surigao del Sur"),
            ShelterStatus::Inactive,
            (220, 60),
            (8.0605, 126.404),
            ("Marco Reyes", "+63-86-710-2211"),
            "Maintains standby emergency staff",
        ),
    ]
}
