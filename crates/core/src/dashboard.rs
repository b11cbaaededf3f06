//! Summary figures for the admin and pharmacy dashboards.

use crate::beds::BedDirectory;
use crate::medicines::{Inventory, StockLevel};
use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub hospitals: usize,
    pub total_beds: u64,
    pub available_beds: u64,
    /// Occupied beds as a percentage of capacity, rounded to one decimal place.
    pub occupancy_percent: f64,
}

impl AdminStats {
    pub fn from_directory(beds: &BedDirectory) -> Self {
        let hospitals = beds.all();
        let total_beds: u64 = hospitals.iter().map(|h| u64::from(h.total_beds)).sum();
        let available_beds: u64 = hospitals.iter().map(|h| u64::from(h.available_beds)).sum();

        let occupancy_percent = if total_beds == 0 {
            0.0
        } else {
            let occupied = total_beds.saturating_sub(available_beds) as f64;
            (occupied / total_beds as f64 * 1000.0).round() / 10.0
        };

        Self {
            hospitals: hospitals.len(),
            total_beds,
            available_beds,
            occupancy_percent,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyStats {
    pub total_items: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl PharmacyStats {
    pub fn from_inventory(inventory: &Inventory) -> Self {
        let items = inventory.all();
        let count = |level: StockLevel| items.iter().filter(|i| i.availability == level).count();

        Self {
            total_items: items.len(),
            in_stock: count(StockLevel::InStock),
            low_stock: count(StockLevel::LowStock),
            out_of_stock: count(StockLevel::OutOfStock),
        }
    }
}
