//! Construction of the service set shared by every front end.

use crate::beds::BedDirectory;
use crate::config::CoreConfig;
use crate::generation::{GenerationClient, HttpGenerationClient};
use crate::medicines::{Inventory, MedicineDirectory};
use crate::symptoms::SymptomService;
use crate::AssistResult;
use chrono::Utc;
use std::sync::Arc;

/// All core services, seeded with demo data.
///
/// Cheap to clone; clones share the same directories.
#[derive(Clone)]
pub struct Services {
    pub symptoms: SymptomService,
    pub beds: BedDirectory,
    pub medicines: MedicineDirectory,
    pub inventory: Inventory,
}

impl Services {
    /// Seed the demo directories and wire the symptom service to `client`.
    pub fn seeded(client: Arc<dyn GenerationClient>) -> Self {
        let now = Utc::now();
        Self {
            symptoms: SymptomService::new(client),
            beds: BedDirectory::seeded(now),
            medicines: MedicineDirectory::seeded(now),
            inventory: Inventory::seeded(),
        }
    }

    /// Seeded services backed by the hosted generation service.
    ///
    /// # Errors
    /// Returns [`crate::AssistError::Config`] if the generation client cannot be built (for
    /// example, no API key is configured).
    pub fn from_config(cfg: &CoreConfig) -> AssistResult<Self> {
        let client = HttpGenerationClient::new(cfg)?;
        tracing::info!(
            model = cfg.generation_model(),
            endpoint = %client.endpoint(),
            "generation client configured"
        );
        Ok(Self::seeded(Arc::new(client)))
    }
}
