//! Hospital bed availability directory.
//!
//! An in-memory, seeded list of hospitals. Reads take a snapshot; writes update a single entry
//! under the lock and stamp `last_updated`.

use crate::constants::{ALL_LOCATIONS, LOW_BED_AVAILABILITY_PERCENT};
use crate::{AssistError, AssistResult};
use chrono::{DateTime, Duration, Utc};
use mediassist_types::NonEmptyText;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub hospital_name: String,
    pub total_beds: u32,
    pub available_beds: u32,
    pub last_updated: DateTime<Utc>,
    pub location: Option<String>,
    pub contact: Option<String>,
}

/// Coarse availability band used to colour the bed table.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityLevel {
    /// No free beds.
    Full,
    /// Fewer than 20% of beds free.
    Limited,
    Available,
}

impl AvailabilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityLevel::Full => "full",
            AvailabilityLevel::Limited => "limited",
            AvailabilityLevel::Available => "available",
        }
    }
}

impl Hospital {
    /// Free beds as a percentage of capacity; 0 when the hospital has no beds.
    pub fn available_percent(&self) -> f64 {
        if self.total_beds == 0 {
            0.0
        } else {
            f64::from(self.available_beds) / f64::from(self.total_beds) * 100.0
        }
    }

    pub fn availability_level(&self) -> AvailabilityLevel {
        let percent = self.available_percent();
        if percent == 0.0 {
            AvailabilityLevel::Full
        } else if percent < LOW_BED_AVAILABILITY_PERCENT {
            AvailabilityLevel::Limited
        } else {
            AvailabilityLevel::Available
        }
    }
}

/// Shared, cloneable handle to the bed directory.
#[derive(Clone, Debug, Default)]
pub struct BedDirectory {
    hospitals: Arc<RwLock<Vec<Hospital>>>,
}

impl BedDirectory {
    pub fn new(hospitals: Vec<Hospital>) -> Self {
        Self {
            hospitals: Arc::new(RwLock::new(hospitals)),
        }
    }

    /// Directory seeded with the demo hospitals, stamped relative to `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let hospital = |id: &str,
                        name: &str,
                        total: u32,
                        available: u32,
                        minutes_ago: i64,
                        location: &str,
                        contact: &str| Hospital {
            id: id.into(),
            hospital_name: name.into(),
            total_beds: total,
            available_beds: available,
            last_updated: now - Duration::minutes(minutes_ago),
            location: Some(location.into()),
            contact: Some(contact.into()),
        };

        Self::new(vec![
            hospital("1", "City General Hospital", 200, 45, 120, "Metropolis", "555-0101"),
            hospital("2", "St. Luke's Medical Center", 150, 12, 60, "Metropolis", "555-0102"),
            hospital("3", "Hope County Hospital", 80, 5, 300, "Suburbia", "555-0201"),
            hospital("4", "Riverdale Community Clinic", 50, 25, 30, "Suburbia", "555-0202"),
            hospital("5", "Downtown Emergency Care", 120, 0, 180, "Metropolis", "555-0103"),
        ])
    }

    /// Hospitals whose name contains `search` (case-insensitive) and whose location matches,
    /// sorted by name.
    ///
    /// A `location` of `None`, empty, or `"all"` matches every hospital.
    pub fn list(&self, search: Option<&str>, location: Option<&str>) -> Vec<Hospital> {
        let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case(ALL_LOCATIONS));

        let hospitals = self.hospitals.read().unwrap_or_else(PoisonError::into_inner);
        let mut matches: Vec<Hospital> = hospitals
            .iter()
            .filter(|h| h.hospital_name.to_lowercase().contains(&needle))
            .filter(|h| match location {
                Some(loc) => h.location.as_deref() == Some(loc),
                None => true,
            })
            .cloned()
            .collect();
        drop(hospitals);

        matches.sort_by(|a, b| a.hospital_name.cmp(&b.hospital_name));
        matches
    }

    /// `"all"` followed by each distinct non-empty location, in first-seen order.
    pub fn locations(&self) -> Vec<String> {
        let hospitals = self.hospitals.read().unwrap_or_else(PoisonError::into_inner);
        let mut locations = vec![ALL_LOCATIONS.to_string()];
        for loc in hospitals.iter().filter_map(|h| h.location.as_deref()) {
            if !loc.is_empty() && !locations.iter().any(|l| l == loc) {
                locations.push(loc.to_string());
            }
        }
        locations
    }

    pub fn get(&self, id: &str) -> AssistResult<Hospital> {
        self.hospitals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|h| h.id == id)
            .cloned()
            .ok_or_else(|| AssistError::NotFound(format!("hospital {id}")))
    }

    /// Set the available bed count, clamped to `0..=total_beds`.
    pub fn update_available(&self, id: &str, available_beds: i64) -> AssistResult<Hospital> {
        let mut hospitals = self.hospitals.write().unwrap_or_else(PoisonError::into_inner);
        let hospital = hospitals
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| AssistError::NotFound(format!("hospital {id}")))?;

        let clamped = available_beds.clamp(0, i64::from(hospital.total_beds));
        if clamped != available_beds {
            tracing::debug!(
                hospital = %hospital.id,
                requested = available_beds,
                clamped,
                "clamped bed count"
            );
        }
        // In range of u32 after clamping to total_beds.
        hospital.available_beds = clamped as u32;
        hospital.last_updated = Utc::now();

        tracing::info!(
            hospital = %hospital.id,
            available_beds = hospital.available_beds,
            "bed availability updated"
        );
        Ok(hospital.clone())
    }

    /// Register a new hospital with all beds available.
    ///
    /// # Errors
    /// Returns [`AssistError::InvalidInput`] if the name is blank or `total_beds` is zero.
    pub fn add_hospital(
        &self,
        hospital_name: &str,
        total_beds: u32,
        location: Option<String>,
        contact: Option<String>,
    ) -> AssistResult<Hospital> {
        let name = NonEmptyText::new(hospital_name)?;
        if total_beds == 0 {
            return Err(AssistError::InvalidInput(
                "total_beds must be greater than zero".into(),
            ));
        }

        let hospital = Hospital {
            id: Uuid::new_v4().simple().to_string(),
            hospital_name: name.into_string(),
            total_beds,
            available_beds: total_beds,
            last_updated: Utc::now(),
            location: non_blank(location),
            contact: non_blank(contact),
        };

        self.hospitals
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hospital.clone());

        tracing::info!(hospital = %hospital.id, total_beds, "hospital added");
        Ok(hospital)
    }

    /// Snapshot of all hospitals in insertion order.
    pub fn all(&self) -> Vec<Hospital> {
        self.hospitals
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
