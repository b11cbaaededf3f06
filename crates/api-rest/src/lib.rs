//! # API REST
//!
//! REST API implementation for MediAssist.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, role header extraction)
//!
//! Uses `api-shared` for the request/response types.

#![warn(rust_2018_idioms)]

mod error;

pub use error::ApiError;

use api_shared::{pb, HealthService};
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, HeaderMap, StatusCode},
    response::Json,
    routing::{get, post, put},
    Router,
};
use mediassist_core::constants::ROLE_HEADER;
use mediassist_core::roles::{
    self, ADMIN_DASHBOARD_ROLES, BED_MANAGE_ROLES, BED_VIEW_ROLES, INVENTORY_ROLES,
    MEDICINE_CHECKER_ROLES, PHARMACY_DASHBOARD_ROLES, SYMPTOM_CHECKER_ROLES,
};
use mediassist_core::{
    AdminStats, AssistError, PharmacyStats, Role, Services, StockLevel, SuggestConditionsInput,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Application state for the REST API server
///
/// Every handler shares the same seeded [`Services`]; clones share the directories.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        login,
        navigation,
        suggest_conditions,
        list_beds,
        list_locations,
        add_hospital,
        update_beds,
        check_medicine,
        list_inventory,
        add_inventory_item,
        update_inventory_item,
        admin_stats,
        pharmacy_stats,
    ),
    components(schemas(
        pb::HealthRes,
        pb::ErrorRes,
        pb::LoginReq,
        pb::LoginRes,
        pb::User,
        pb::NavigationRes,
        pb::NavigationItem,
        pb::SuggestConditionsReq,
        pb::SuggestConditionsRes,
        pb::Hospital,
        pb::ListBedsRes,
        pb::ListLocationsRes,
        pb::AddHospitalReq,
        pb::UpdateBedsReq,
        pb::CheckMedicineRes,
        pb::PharmacyAvailability,
        pb::InventoryItem,
        pb::ListInventoryRes,
        pb::AddInventoryItemReq,
        pb::UpdateInventoryItemReq,
        pb::AdminStatsRes,
        pb::PharmacyStatsRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router, including Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/navigation", get(navigation))
        .route("/symptoms/suggest", post(suggest_conditions))
        .route("/beds", get(list_beds).post(add_hospital))
        .route("/beds/locations", get(list_locations))
        .route("/beds/:id", put(update_beds))
        .route("/medicines/availability", get(check_medicine))
        .route("/inventory", get(list_inventory).post(add_inventory_item))
        .route("/inventory/:id", put(update_inventory_item))
        .route("/admin/stats", get(admin_stats))
        .route("/pharmacy/stats", get(pharmacy_stats))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Role of the caller, taken from the `x-mediassist-role` header.
///
/// Rejects with 401 when the header is absent and 400 when it names no known role.
pub struct CallerRole(pub Role);

#[async_trait]
impl<S> FromRequestParts<S> for CallerRole
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|v| v.to_str().ok());
        Ok(CallerRole(roles::role_from_header(value)?))
    }
}

impl CallerRole {
    fn require(self, allowed: &[Role], action: &'static str) -> Result<(), ApiError> {
        Ok(roles::require_role(self.0, allowed, action)?)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BedsQuery {
    /// Case-insensitive substring of the hospital name.
    search: Option<String>,
    /// Exact location, or `all`.
    location: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MedicineQuery {
    /// Medicine name (case-insensitive substring).
    term: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = pb::HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Does not contact the generation service.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<pb::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = pb::LoginReq,
    responses(
        (status = 200, description = "Mock user for the role and its dashboard", body = pb::LoginRes),
        (status = 400, description = "Unknown role", body = pb::ErrorRes)
    )
)]
/// Sign in as the mock user for a role.
#[axum::debug_handler]
async fn login(
    State(_state): State<AppState>,
    Json(req): Json<pb::LoginReq>,
) -> Result<Json<pb::LoginRes>, ApiError> {
    let role: Role = req.role.parse().map_err(AssistError::from)?;
    Ok(Json(roles::login(role).into()))
}

#[utoipa::path(
    get,
    path = "/navigation",
    params(
        ("x-mediassist-role" = Option<String>, Header, description = "Caller role; omit when signed out")
    ),
    responses(
        (status = 200, description = "Navigation entries visible to the caller", body = pb::NavigationRes),
        (status = 400, description = "Unknown role", body = pb::ErrorRes)
    )
)]
/// Navigation entries for the caller's role, or the public entries when signed out.
#[axum::debug_handler]
async fn navigation(
    State(_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<pb::NavigationRes>, ApiError> {
    let value = headers.get(ROLE_HEADER).and_then(|v| v.to_str().ok());
    let role = match roles::role_from_header(value) {
        Ok(role) => Some(role),
        Err(AssistError::MissingRole) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(Json(roles::navigation_for(role).into()))
}

#[utoipa::path(
    post,
    path = "/symptoms/suggest",
    request_body = pb::SuggestConditionsReq,
    params(
        ("x-mediassist-role" = String, Header, description = "Caller role (patient)")
    ),
    responses(
        (status = 200, description = "Possible conditions, in the order suggested", body = pb::SuggestConditionsRes),
        (status = 400, description = "Empty symptom description", body = pb::ErrorRes),
        (status = 401, description = "Missing role header", body = pb::ErrorRes),
        (status = 403, description = "Role may not use the symptom checker", body = pb::ErrorRes),
        (status = 502, description = "Generation service unreachable or reply malformed", body = pb::ErrorRes)
    )
)]
/// Suggest possible conditions for a free-text symptom description.
///
/// The list is what the generation service returned, validated but never filtered or reordered.
///
/// # Errors
/// - `400` if the description is empty or whitespace-only.
/// - `502` with kind `transport_failure` if the generation service could not be reached.
/// - `502` with kind `schema_mismatch` if its reply was not a JSON array of strings.
#[axum::debug_handler]
async fn suggest_conditions(
    State(state): State<AppState>,
    caller: CallerRole,
    Json(req): Json<pb::SuggestConditionsReq>,
) -> Result<Json<pb::SuggestConditionsRes>, ApiError> {
    caller.require(SYMPTOM_CHECKER_ROLES, "use the symptom checker")?;

    let output = state
        .services
        .symptoms
        .suggest_possible_conditions(SuggestConditionsInput {
            symptoms: req.symptoms,
        })
        .await?;
    Ok(Json(output.into()))
}

#[utoipa::path(
    get,
    path = "/beds",
    params(
        BedsQuery,
        ("x-mediassist-role" = String, Header, description = "Caller role (patient or admin)")
    ),
    responses(
        (status = 200, description = "Matching hospitals sorted by name", body = pb::ListBedsRes),
        (status = 401, description = "Missing role header", body = pb::ErrorRes),
        (status = 403, description = "Role may not view beds", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_beds(
    State(state): State<AppState>,
    caller: CallerRole,
    Query(query): Query<BedsQuery>,
) -> Result<Json<pb::ListBedsRes>, ApiError> {
    caller.require(BED_VIEW_ROLES, "view bed availability")?;

    let hospitals = state
        .services
        .beds
        .list(query.search.as_deref(), query.location.as_deref());
    Ok(Json(hospitals.into()))
}

#[utoipa::path(
    get,
    path = "/beds/locations",
    params(
        ("x-mediassist-role" = String, Header, description = "Caller role (patient or admin)")
    ),
    responses(
        (status = 200, description = "`all` followed by each known location", body = pb::ListLocationsRes),
        (status = 401, description = "Missing role header", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_locations(
    State(state): State<AppState>,
    caller: CallerRole,
) -> Result<Json<pb::ListLocationsRes>, ApiError> {
    caller.require(BED_VIEW_ROLES, "view bed availability")?;
    Ok(Json(pb::ListLocationsRes {
        locations: state.services.beds.locations(),
    }))
}

#[utoipa::path(
    post,
    path = "/beds",
    request_body = pb::AddHospitalReq,
    params(
        ("x-mediassist-role" = String, Header, description = "Caller role (admin)")
    ),
    responses(
        (status = 201, description = "Hospital added with all beds available", body = pb::Hospital),
        (status = 400, description = "Blank name or zero beds", body = pb::ErrorRes),
        (status = 403, description = "Role may not manage beds", body = pb::ErrorRes)
    )
)]
/// Register a hospital.
#[axum::debug_handler]
async fn add_hospital(
    State(state): State<AppState>,
    caller: CallerRole,
    Json(req): Json<pb::AddHospitalReq>,
) -> Result<(StatusCode, Json<pb::Hospital>), ApiError> {
    caller.require(BED_MANAGE_ROLES, "manage bed availability")?;

    let hospital = state.services.beds.add_hospital(
        &req.hospital_name,
        req.total_beds,
        non_empty(req.location),
        non_empty(req.contact),
    )?;
    Ok((StatusCode::CREATED, Json((&hospital).into())))
}

#[utoipa::path(
    put,
    path = "/beds/{id}",
    request_body = pb::UpdateBedsReq,
    params(
        ("id" = String, Path, description = "Hospital id"),
        ("x-mediassist-role" = String, Header, description = "Caller role (admin)")
    ),
    responses(
        (status = 200, description = "Updated hospital; the count is clamped to capacity", body = pb::Hospital),
        (status = 403, description = "Role may not manage beds", body = pb::ErrorRes),
        (status = 404, description = "Unknown hospital", body = pb::ErrorRes)
    )
)]
/// Set a hospital's available bed count.
#[axum::debug_handler]
async fn update_beds(
    State(state): State<AppState>,
    caller: CallerRole,
    Path(id): Path<String>,
    Json(req): Json<pb::UpdateBedsReq>,
) -> Result<Json<pb::Hospital>, ApiError> {
    caller.require(BED_MANAGE_ROLES, "manage bed availability")?;

    let hospital = state
        .services
        .beds
        .update_available(&id, req.available_beds)?;
    Ok(Json((&hospital).into()))
}

#[utoipa::path(
    get,
    path = "/medicines/availability",
    params(
        MedicineQuery,
        ("x-mediassist-role" = String, Header, description = "Caller role (patient or pharmacy)")
    ),
    responses(
        (status = 200, description = "Availability across pharmacies; `found` is false for an unknown medicine", body = pb::CheckMedicineRes),
        (status = 400, description = "Blank search term", body = pb::ErrorRes),
        (status = 403, description = "Role may not check medicines", body = pb::ErrorRes)
    )
)]
/// Look up a medicine and report its stock level at each pharmacy.
#[axum::debug_handler]
async fn check_medicine(
    State(state): State<AppState>,
    caller: CallerRole,
    Query(query): Query<MedicineQuery>,
) -> Result<Json<pb::CheckMedicineRes>, ApiError> {
    caller.require(MEDICINE_CHECKER_ROLES, "check medicine availability")?;

    let found = state
        .services
        .medicines
        .check_availability(query.term.as_deref().unwrap_or_default())?;
    Ok(Json(found.into()))
}

#[utoipa::path(
    get,
    path = "/inventory",
    params(
        InventoryQuery,
        ("x-mediassist-role" = String, Header, description = "Caller role (pharmacy)")
    ),
    responses(
        (status = 200, description = "Inventory items sorted by name", body = pb::ListInventoryRes),
        (status = 403, description = "Role may not manage inventory", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn list_inventory(
    State(state): State<AppState>,
    caller: CallerRole,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<pb::ListInventoryRes>, ApiError> {
    caller.require(INVENTORY_ROLES, "manage inventory")?;
    Ok(Json(
        state
            .services
            .inventory
            .search(query.search.as_deref())
            .into(),
    ))
}

#[utoipa::path(
    post,
    path = "/inventory",
    request_body = pb::AddInventoryItemReq,
    params(
        ("x-mediassist-role" = String, Header, description = "Caller role (pharmacy)")
    ),
    responses(
        (status = 201, description = "Item added", body = pb::InventoryItem),
        (status = 400, description = "Blank name or invalid stock level", body = pb::ErrorRes),
        (status = 403, description = "Role may not manage inventory", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn add_inventory_item(
    State(state): State<AppState>,
    caller: CallerRole,
    Json(req): Json<pb::AddInventoryItemReq>,
) -> Result<(StatusCode, Json<pb::InventoryItem>), ApiError> {
    caller.require(INVENTORY_ROLES, "manage inventory")?;

    let availability: StockLevel = req.availability.parse()?;
    let item =
        state
            .services
            .inventory
            .add(&req.name, non_empty(req.generic_name), availability)?;
    Ok((StatusCode::CREATED, Json((&item).into())))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}",
    request_body = pb::UpdateInventoryItemReq,
    params(
        ("id" = String, Path, description = "Medicine id"),
        ("x-mediassist-role" = String, Header, description = "Caller role (pharmacy)")
    ),
    responses(
        (status = 200, description = "Updated item", body = pb::InventoryItem),
        (status = 400, description = "Invalid stock level", body = pb::ErrorRes),
        (status = 404, description = "Unknown item", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn update_inventory_item(
    State(state): State<AppState>,
    caller: CallerRole,
    Path(id): Path<String>,
    Json(req): Json<pb::UpdateInventoryItemReq>,
) -> Result<Json<pb::InventoryItem>, ApiError> {
    caller.require(INVENTORY_ROLES, "manage inventory")?;

    let availability: StockLevel = req.availability.parse()?;
    let item = state
        .services
        .inventory
        .set_availability(&id, availability)?;
    Ok(Json((&item).into()))
}

#[utoipa::path(
    get,
    path = "/admin/stats",
    params(
        ("x-mediassist-role" = String, Header, description = "Caller role (admin)")
    ),
    responses(
        (status = 200, description = "Bed totals across all hospitals", body = pb::AdminStatsRes),
        (status = 403, description = "Role may not view the admin dashboard", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn admin_stats(
    State(state): State<AppState>,
    caller: CallerRole,
) -> Result<Json<pb::AdminStatsRes>, ApiError> {
    caller.require(ADMIN_DASHBOARD_ROLES, "view the admin dashboard")?;
    Ok(Json(AdminStats::from_directory(&state.services.beds).into()))
}

#[utoipa::path(
    get,
    path = "/pharmacy/stats",
    params(
        ("x-mediassist-role" = String, Header, description = "Caller role (pharmacy)")
    ),
    responses(
        (status = 200, description = "Inventory counts by stock level", body = pb::PharmacyStatsRes),
        (status = 403, description = "Role may not view the pharmacy dashboard", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn pharmacy_stats(
    State(state): State<AppState>,
    caller: CallerRole,
) -> Result<Json<pb::PharmacyStatsRes>, ApiError> {
    caller.require(PHARMACY_DASHBOARD_ROLES, "view the pharmacy dashboard")?;
    Ok(Json(
        PharmacyStats::from_inventory(&state.services.inventory).into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use mediassist_core::StubGenerationClient;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(stub: StubGenerationClient) -> Router {
        router(AppState {
            services: Services::seeded(Arc::new(stub)),
        })
    }

    fn request(method: &str, uri: &str, role: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            builder = builder.header(ROLE_HEADER, role);
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        }
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = res.into_body().collect().await.expect("body").to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    #[tokio::test]
    async fn health_reports_alive() {
        let (status, body) = send(
            app(StubGenerationClient::replying("[]")),
            request("GET", "/health", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn suggest_returns_conditions_in_order() {
        let (status, body) = send(
            app(StubGenerationClient::replying(
                r#"["Migraine", "Tension headache", "Migraine"]"#,
            )),
            request(
                "POST",
                "/symptoms/suggest",
                Some("patient"),
                Some(json!({ "symptoms": "throbbing headache and light sensitivity" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["possible_conditions"],
            json!(["Migraine", "Tension headache", "Migraine"])
        );
    }

    #[tokio::test]
    async fn suggest_reports_upstream_failures_distinctly() {
        let symptoms = json!({ "symptoms": "fever" });

        let (status, body) = send(
            app(StubGenerationClient::replying("I think it is the flu")),
            request("POST", "/symptoms/suggest", Some("patient"), Some(symptoms.clone())),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["kind"], "schema_mismatch");

        let (status, body) = send(
            app(StubGenerationClient::failing("connection refused")),
            request("POST", "/symptoms/suggest", Some("patient"), Some(symptoms)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["kind"], "transport_failure");
    }

    #[tokio::test]
    async fn suggest_rejects_blank_symptoms_and_wrong_roles() {
        let (status, _) = send(
            app(StubGenerationClient::replying("[]")),
            request("POST", "/symptoms/suggest", Some("patient"), Some(json!({ "symptoms": "   " }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            app(StubGenerationClient::replying("[]")),
            request("POST", "/symptoms/suggest", None, Some(json!({ "symptoms": "cough" }))),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            app(StubGenerationClient::replying("[]")),
            request("POST", "/symptoms/suggest", Some("admin"), Some(json!({ "symptoms": "cough" }))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["kind"], "forbidden");
    }

    #[tokio::test]
    async fn beds_can_be_listed_added_and_updated() {
        let app = app(StubGenerationClient::replying("[]"));

        let (status, body) = send(
            app.clone(),
            request("GET", "/beds?location=Suburbia", Some("patient"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hospitals"].as_array().map(Vec::len), Some(2));

        let (status, body) = send(
            app.clone(),
            request(
                "POST",
                "/beds",
                Some("admin"),
                Some(json!({ "hospital_name": "Northside Clinic", "total_beds": 40 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["available_beds"], 40);

        let (status, body) = send(
            app.clone(),
            request("PUT", "/beds/1", Some("admin"), Some(json!({ "available_beds": 999 }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available_beds"], 200);

        let (status, _) = send(
            app,
            request("PUT", "/beds/1", Some("patient"), Some(json!({ "available_beds": 1 }))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn medicine_lookup_reports_found_and_missing() {
        let app = app(StubGenerationClient::replying("[]"));

        let (status, body) = send(
            app.clone(),
            request("GET", "/medicines/availability?term=ibuprofen", Some("patient"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["found"], true);
        assert_eq!(body["medicine_name"], "Ibuprofen 200mg");

        let (status, body) = send(
            app.clone(),
            request("GET", "/medicines/availability?term=unobtainium", Some("patient"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["found"], false);

        let (status, _) = send(
            app,
            request("GET", "/medicines/availability", Some("pharmacy"), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn inventory_updates_feed_pharmacy_stats() {
        let app = app(StubGenerationClient::replying("[]"));

        let (status, _) = send(
            app.clone(),
            request(
                "PUT",
                "/inventory/med4",
                Some("pharmacy"),
                Some(json!({ "availability": "in_stock" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            app.clone(),
            request(
                "PUT",
                "/inventory/med4",
                Some("pharmacy"),
                Some(json!({ "availability": "plenty" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(app, request("GET", "/pharmacy/stats", Some("pharmacy"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["in_stock"], 3);
        assert_eq!(body["out_of_stock"], 0);
    }

    #[tokio::test]
    async fn login_and_navigation_follow_role() {
        let app = app(StubGenerationClient::replying("[]"));

        let (status, body) = send(
            app.clone(),
            request("POST", "/login", None, Some(json!({ "role": "Admin" }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dashboard_path"], "/admin/dashboard");

        let (status, _) = send(
            app.clone(),
            request("POST", "/login", None, Some(json!({ "role": "surgeon" }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(app, request("GET", "/navigation", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["href"], "/");
    }

    #[tokio::test]
    async fn admin_stats_require_admin() {
        let app = app(StubGenerationClient::replying("[]"));

        let (status, body) = send(app.clone(), request("GET", "/admin/stats", Some("admin"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_beds"], 600);

        let (status, _) = send(app, request("GET", "/admin/stats", Some("pharmacy"), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = send(
            app(StubGenerationClient::replying("[]")),
            request("GET", "/api-docs/openapi.json", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/symptoms/suggest"].is_object());
    }
}
