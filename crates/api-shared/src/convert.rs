//! Conversions from core domain types into protobuf messages.
//!
//! Optional core fields map to empty strings, matching proto3 defaults.

use crate::pb;
use mediassist_core::beds::Hospital;
use mediassist_core::medicines::{InventoryItem, MedicineAvailability, PharmacyAvailability};
use mediassist_core::roles::{NavigationItem, Session};
use mediassist_core::{AdminStats, PharmacyStats, SuggestConditionsOutput};

impl From<SuggestConditionsOutput> for pb::SuggestConditionsRes {
    fn from(output: SuggestConditionsOutput) -> Self {
        Self {
            possible_conditions: output.possible_conditions,
        }
    }
}

impl From<&Hospital> for pb::Hospital {
    fn from(h: &Hospital) -> Self {
        Self {
            id: h.id.clone(),
            hospital_name: h.hospital_name.clone(),
            total_beds: h.total_beds,
            available_beds: h.available_beds,
            last_updated: h.last_updated.to_rfc3339(),
            location: h.location.clone().unwrap_or_default(),
            contact: h.contact.clone().unwrap_or_default(),
            availability_level: h.availability_level().as_str().to_string(),
        }
    }
}

impl From<Vec<Hospital>> for pb::ListBedsRes {
    fn from(hospitals: Vec<Hospital>) -> Self {
        Self {
            hospitals: hospitals.iter().map(pb::Hospital::from).collect(),
        }
    }
}

impl From<&PharmacyAvailability> for pb::PharmacyAvailability {
    fn from(p: &PharmacyAvailability) -> Self {
        Self {
            pharmacy_name: p.pharmacy_name.clone(),
            pharmacy_address: p.pharmacy_address.clone(),
            availability: p.availability.as_str().to_string(),
            distance: p.distance.clone().unwrap_or_default(),
            last_updated: p.last_updated.to_rfc3339(),
            maps_url: p.maps_url.clone(),
        }
    }
}

impl From<Option<MedicineAvailability>> for pb::CheckMedicineRes {
    fn from(found: Option<MedicineAvailability>) -> Self {
        match found {
            Some(found) => Self {
                found: true,
                medicine_id: found.medicine.id,
                medicine_name: found.medicine.name,
                generic_name: found.medicine.generic_name.unwrap_or_default(),
                results: found
                    .results
                    .iter()
                    .map(pb::PharmacyAvailability::from)
                    .collect(),
            },
            None => Self::default(),
        }
    }
}

impl From<&InventoryItem> for pb::InventoryItem {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.medicine.id.clone(),
            name: item.medicine.name.clone(),
            generic_name: item.medicine.generic_name.clone().unwrap_or_default(),
            availability: item.availability.as_str().to_string(),
        }
    }
}

impl From<Vec<InventoryItem>> for pb::ListInventoryRes {
    fn from(items: Vec<InventoryItem>) -> Self {
        Self {
            items: items.iter().map(pb::InventoryItem::from).collect(),
        }
    }
}

impl From<Session> for pb::LoginRes {
    fn from(session: Session) -> Self {
        Self {
            user: Some(pb::User {
                id: session.user.id.to_string(),
                name: session.user.name.to_string(),
                email: session.user.email.to_string(),
                role: session.user.role.as_str().to_string(),
            }),
            dashboard_path: session.dashboard_path.to_string(),
        }
    }
}

impl From<Vec<NavigationItem>> for pb::NavigationRes {
    fn from(items: Vec<NavigationItem>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| pb::NavigationItem {
                    href: item.href.to_string(),
                    label: item.label.to_string(),
                })
                .collect(),
        }
    }
}

impl From<AdminStats> for pb::AdminStatsRes {
    fn from(stats: AdminStats) -> Self {
        Self {
            hospitals: saturating_u32(stats.hospitals),
            total_beds: stats.total_beds,
            available_beds: stats.available_beds,
            occupancy_percent: stats.occupancy_percent,
        }
    }
}

impl From<PharmacyStats> for pb::PharmacyStatsRes {
    fn from(stats: PharmacyStats) -> Self {
        Self {
            total_items: saturating_u32(stats.total_items),
            in_stock: saturating_u32(stats.in_stock),
            low_stock: saturating_u32(stats.low_stock),
            out_of_stock: saturating_u32(stats.out_of_stock),
        }
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod convert_tests {
    use super::*;
    use mediassist_core::roles::{login, navigation_for};
    use mediassist_core::{BedDirectory, MedicineDirectory, Role};

    #[test]
    fn hospital_conversion_fills_optional_fields_and_level() {
        let dir = BedDirectory::seeded(chrono::Utc::now());
        let full = pb::Hospital::from(&dir.get("5").expect("hospital"));
        assert_eq!(full.hospital_name, "Downtown Emergency Care");
        assert_eq!(full.availability_level, "full");
        assert_eq!(full.location, "Metropolis");
    }

    #[test]
    fn missing_medicine_converts_to_not_found() {
        let res = pb::CheckMedicineRes::from(None);
        assert!(!res.found);
        assert!(res.results.is_empty());
    }

    #[test]
    fn medicine_availability_converts_levels_to_display_names() {
        let dir = MedicineDirectory::seeded(chrono::Utc::now());
        let res = pb::CheckMedicineRes::from(dir.check_availability("cetirizine").expect("ok"));
        assert!(res.found);
        assert_eq!(res.medicine_name, "Cetirizine 10mg");
        assert_eq!(res.results[1].availability, "Not Available");
        assert!(res.results[0].maps_url.starts_with("https://www.google.com/maps/search/"));
    }

    #[test]
    fn session_and_navigation_convert() {
        let login_res = pb::LoginRes::from(login(Role::Pharmacy));
        let user = login_res.user.expect("user present");
        assert_eq!(user.role, "pharmacy");
        assert_eq!(login_res.dashboard_path, "/pharmacy/dashboard");

        let nav = pb::NavigationRes::from(navigation_for(Some(Role::Admin)));
        assert_eq!(nav.items.len(), 3);
    }
}
