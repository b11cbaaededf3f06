//! Constants used throughout the MediAssist core crate.

/// Default base URL of the hosted generation service.
pub const DEFAULT_GENERATION_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for symptom suggestions.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.0-flash";

/// Default timeout for a single generation call.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

/// Header carrying the generation service API key.
pub const GENERATION_API_KEY_HEADER: &str = "x-goog-api-key";

/// Header (REST) and metadata key (gRPC) carrying the caller's mock role.
pub const ROLE_HEADER: &str = "x-mediassist-role";

/// Below this percentage of free beds a hospital is reported as `Limited`.
pub const LOW_BED_AVAILABILITY_PERCENT: f64 = 20.0;

/// Location filter value meaning "any location".
pub const ALL_LOCATIONS: &str = "all";

/// Base URL for map search links attached to pharmacy results.
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";
