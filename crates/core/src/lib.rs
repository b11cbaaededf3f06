//! # MediAssist Core
//!
//! Core business logic for the MediAssist service.
//!
//! This crate contains pure domain operations:
//! - Symptom suggestions: prompt rendering, the outbound generation call and validation of the
//!   reply into a condition list
//! - Mock hospital-bed and medicine-availability directories held in memory
//! - Role gating, mock users and per-role navigation
//! - Dashboard statistics derived from the directories
//!
//! **No API concerns**: HTTP/gRPC servers, protobuf types and API-key checks belong in
//! `api-grpc`, `api-rest`, or `api-shared`.

pub mod beds;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod generation;
pub mod medicines;
pub mod prompt;
pub mod roles;
pub mod services;
pub mod symptoms;
pub mod validation;

pub use beds::{AvailabilityLevel, BedDirectory, Hospital};
pub use config::CoreConfig;
pub use dashboard::{AdminStats, PharmacyStats};
pub use error::{AssistError, AssistResult};
pub use generation::{GenerationClient, HttpGenerationClient, StubGenerationClient};
pub use medicines::{Inventory, InventoryItem, Medicine, MedicineDirectory, StockLevel};
pub use mediassist_types::{NonEmptyText, Role, SymptomDescription, TextError};
pub use roles::{MockUser, NavigationItem, Session};
pub use services::Services;
pub use symptoms::{SuggestConditionsInput, SuggestConditionsOutput, SymptomService};
