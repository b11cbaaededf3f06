//! Medicine availability across pharmacies, and a single pharmacy's inventory.
//!
//! Both are in-memory demo data. Stock levels are fixed seed data so that lookups are
//! repeatable.

use crate::constants::MAPS_SEARCH_URL;
use crate::{AssistError, AssistResult};
use chrono::{DateTime, Duration, Utc};
use mediassist_types::NonEmptyText;
use reqwest::Url;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub generic_name: Option<String>,
}

impl Medicine {
    fn new(id: &str, name: &str, generic_name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            generic_name: Some(generic_name.into()),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .generic_name
                .as_deref()
                .is_some_and(|g| g.to_lowercase().contains(needle))
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum StockLevel {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl StockLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::InStock => "In Stock",
            StockLevel::LowStock => "Low Stock",
            StockLevel::OutOfStock => "Out of Stock",
            StockLevel::NotAvailable => "Not Available",
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockLevel {
    type Err = AssistError;

    /// Accepts display names ("Low Stock") and snake/kebab forms ("low_stock", "low-stock").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalised.as_str() {
            "instock" => Ok(StockLevel::InStock),
            "lowstock" => Ok(StockLevel::LowStock),
            "outofstock" => Ok(StockLevel::OutOfStock),
            "notavailable" => Ok(StockLevel::NotAvailable),
            _ => Err(AssistError::InvalidInput(format!("unknown stock level '{s}'"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Pharmacy {
    pub name: String,
    pub address: String,
    pub distance: Option<String>,
    pub last_updated: DateTime<Utc>,
    stock: HashMap<String, StockLevel>,
}

impl Pharmacy {
    /// Stock level for a medicine; medicines the pharmacy does not carry are `NotAvailable`.
    pub fn stock_of(&self, medicine_id: &str) -> StockLevel {
        self.stock
            .get(medicine_id)
            .copied()
            .unwrap_or(StockLevel::NotAvailable)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyAvailability {
    pub pharmacy_name: String,
    pub pharmacy_address: String,
    pub availability: StockLevel,
    pub distance: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub maps_url: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MedicineAvailability {
    pub medicine: Medicine,
    pub results: Vec<PharmacyAvailability>,
}

/// Read-only directory of medicines and the pharmacies stocking them.
#[derive(Clone, Debug)]
pub struct MedicineDirectory {
    catalogue: Arc<Vec<Medicine>>,
    pharmacies: Arc<Vec<Pharmacy>>,
}

impl MedicineDirectory {
    pub fn new(catalogue: Vec<Medicine>, pharmacies: Vec<Pharmacy>) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            pharmacies: Arc::new(pharmacies),
        }
    }

    pub fn seeded(now: DateTime<Utc>) -> Self {
        use StockLevel::*;

        let pharmacy = |name: &str,
                        address: &str,
                        distance: &str,
                        minutes_ago: i64,
                        stock: &[(&str, StockLevel)]| Pharmacy {
            name: name.into(),
            address: address.into(),
            distance: Some(distance.into()),
            last_updated: now - Duration::minutes(minutes_ago),
            stock: stock
                .iter()
                .map(|(id, level)| (id.to_string(), *level))
                .collect(),
        };

        Self::new(
            seed_medicines(),
            vec![
                pharmacy(
                    "HealthFirst Pharmacy",
                    "123 Main St, Metropolis",
                    "1.2 km",
                    60,
                    &[("med1", InStock), ("med2", InStock), ("med3", LowStock), ("med4", InStock)],
                ),
                pharmacy(
                    "Wellness Drugstore",
                    "456 Oak Ave, Metropolis",
                    "2.5 km",
                    180,
                    &[("med1", LowStock), ("med2", OutOfStock), ("med3", InStock)],
                ),
                pharmacy(
                    "Community Meds",
                    "789 Pine Ln, Suburbia",
                    "5.1 km",
                    30,
                    &[("med1", OutOfStock), ("med3", InStock), ("med4", LowStock)],
                ),
                pharmacy(
                    "QuickCare Pharma",
                    "101 Elm Rd, Metropolis",
                    "0.8 km",
                    120,
                    &[("med1", InStock), ("med2", LowStock), ("med4", OutOfStock)],
                ),
            ],
        )
    }

    /// Look up a medicine by name and report its availability at every pharmacy.
    ///
    /// The first catalogue entry whose name contains `term` (case-insensitive) is used.
    /// Returns `Ok(None)` when nothing matches.
    ///
    /// # Errors
    /// Returns [`AssistError::InvalidInput`] if `term` is blank.
    pub fn check_availability(&self, term: &str) -> AssistResult<Option<MedicineAvailability>> {
        let needle = NonEmptyText::new(term)?.as_str().to_lowercase();

        let Some(medicine) = self
            .catalogue
            .iter()
            .find(|m| m.name.to_lowercase().contains(&needle))
        else {
            tracing::debug!(term, "no medicine matched");
            return Ok(None);
        };

        let results = self
            .pharmacies
            .iter()
            .map(|p| PharmacyAvailability {
                pharmacy_name: p.name.clone(),
                pharmacy_address: p.address.clone(),
                availability: p.stock_of(&medicine.id),
                distance: p.distance.clone(),
                last_updated: p.last_updated,
                maps_url: maps_search_url(Some(&p.address), &p.name),
            })
            .collect();

        Ok(Some(MedicineAvailability {
            medicine: medicine.clone(),
            results,
        }))
    }
}

/// Map search link for an address, falling back to the pharmacy name.
pub fn maps_search_url(address: Option<&str>, name: &str) -> String {
    let query = address
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(name);
    match Url::parse_with_params(MAPS_SEARCH_URL, &[("api", "1"), ("query", query)]) {
        Ok(url) => url.into(),
        Err(e) => {
            tracing::warn!("failed to build maps URL: {}", e);
            String::new()
        }
    }
}

fn seed_medicines() -> Vec<Medicine> {
    vec![
        Medicine::new("med1", "Paracetamol 500mg", "Acetaminophen"),
        Medicine::new("med2", "Amoxicillin 250mg", "Amoxicillin"),
        Medicine::new("med3", "Ibuprofen 200mg", "Ibuprofen"),
        Medicine::new("med4", "Cetirizine 10mg", "Cetirizine"),
        Medicine::new("med5", "Lisinopril 10mg", "Lisinopril"),
    ]
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct InventoryItem {
    pub medicine: Medicine,
    pub availability: StockLevel,
}

/// A single pharmacy's editable stock list.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    items: Arc<RwLock<Vec<InventoryItem>>>,
}

impl Inventory {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    pub fn seeded() -> Self {
        let levels = [
            StockLevel::InStock,
            StockLevel::LowStock,
            StockLevel::InStock,
            StockLevel::OutOfStock,
            StockLevel::LowStock,
        ];
        Self::new(
            seed_medicines()
                .into_iter()
                .zip(levels)
                .map(|(medicine, availability)| InventoryItem {
                    medicine,
                    availability,
                })
                .collect(),
        )
    }

    /// Items whose name or generic name contains `term` (case-insensitive), sorted by name.
    pub fn search(&self, term: Option<&str>) -> Vec<InventoryItem> {
        let needle = term.map(|t| t.trim().to_lowercase()).unwrap_or_default();
        let mut found: Vec<InventoryItem> = self
            .items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|item| item.medicine.matches(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.medicine.name.cmp(&b.medicine.name));
        found
    }

    pub fn all(&self) -> Vec<InventoryItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_availability(&self, id: &str, availability: StockLevel) -> AssistResult<InventoryItem> {
        check_inventory_level(availability)?;

        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        let item = items
            .iter_mut()
            .find(|item| item.medicine.id == id)
            .ok_or_else(|| AssistError::NotFound(format!("inventory item {id}")))?;
        item.availability = availability;

        tracing::info!(medicine = %id, availability = %availability, "inventory updated");
        Ok(item.clone())
    }

    /// Add a medicine to the inventory.
    ///
    /// # Errors
    /// Returns [`AssistError::InvalidInput`] if the name is blank or the level is
    /// `NotAvailable` (not a stock level a pharmacy records for its own items).
    pub fn add(
        &self,
        name: &str,
        generic_name: Option<String>,
        availability: StockLevel,
    ) -> AssistResult<InventoryItem> {
        let name = NonEmptyText::new(name)?;
        check_inventory_level(availability)?;

        let item = InventoryItem {
            medicine: Medicine {
                id: format!("med-{}", Uuid::new_v4().simple()),
                name: name.into_string(),
                generic_name: generic_name
                    .map(|g| g.trim().to_string())
                    .filter(|g| !g.is_empty()),
            },
            availability,
        };

        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item.clone());

        tracing::info!(medicine = %item.medicine.id, "inventory item added");
        Ok(item)
    }
}

fn check_inventory_level(level: StockLevel) -> AssistResult<()> {
    if level == StockLevel::NotAvailable {
        return Err(AssistError::InvalidInput(
            "inventory items must be In Stock, Low Stock or Out of Stock".into(),
        ));
    }
    Ok(())
}
