// Re-export the proto module from the shared `api-shared` crate so callers
// can reference `api_grpc::pb`.
pub use api_shared::pb;

use api_shared::pb::medi_assist_server::MediAssist;
use api_shared::{auth, HealthService};
use mediassist_core::constants::ROLE_HEADER;
use mediassist_core::roles::{self, BED_VIEW_ROLES, MEDICINE_CHECKER_ROLES, SYMPTOM_CHECKER_ROLES};
use mediassist_core::{AssistError, Role, Services, SuggestConditionsInput};
use std::sync::Arc;
use tonic::service::Interceptor;
use tonic::{Request, Response, Status};

/// Authentication interceptor for gRPC requests.
///
/// Every call must carry an `x-api-key` header matching the key configured at startup.
#[derive(Clone)]
pub struct ApiKeyInterceptor {
    expected: Option<Arc<str>>,
}

impl ApiKeyInterceptor {
    pub fn new(expected: Option<String>) -> Self {
        Self {
            expected: expected.map(Arc::from),
        }
    }
}

impl Interceptor for ApiKeyInterceptor {
    fn call(&mut self, req: Request<()>) -> Result<Request<()>, Status> {
        let api_key = req
            .metadata()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Status::unauthenticated("Missing x-api-key header"))?;

        auth::validate_api_key(api_key, self.expected.as_deref())?;
        Ok(req)
    }
}

/// Map a core error onto a gRPC status.
pub fn status_from_error(err: &AssistError) -> Status {
    match err {
        AssistError::InvalidInput(_) => Status::invalid_argument(err.to_string()),
        AssistError::MissingRole => {
            Status::unauthenticated(format!("missing {ROLE_HEADER} metadata"))
        }
        AssistError::Forbidden { .. } => Status::permission_denied(err.to_string()),
        AssistError::NotFound(_) => Status::not_found(err.to_string()),
        AssistError::TransportFailure(_) => Status::unavailable(err.to_string()),
        AssistError::SchemaMismatch(_) | AssistError::Config(_) => {
            Status::internal(err.to_string())
        }
    }
}

fn require_role<T>(req: &Request<T>, allowed: &[Role], action: &'static str) -> Result<Role, Status> {
    let value = req.metadata().get(ROLE_HEADER).and_then(|v| v.to_str().ok());
    let role = roles::role_from_header(value).map_err(|e| status_from_error(&e))?;
    roles::require_role(role, allowed, action).map_err(|e| status_from_error(&e))?;
    Ok(role)
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct MediAssistService {
    services: Services,
}

impl MediAssistService {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[tonic::async_trait]
impl MediAssist for MediAssistService {
    async fn health(&self, _req: Request<()>) -> Result<Response<pb::HealthRes>, Status> {
        Ok(Response::new(HealthService::check_health()))
    }

    async fn suggest_conditions(
        &self,
        req: Request<pb::SuggestConditionsReq>,
    ) -> Result<Response<pb::SuggestConditionsRes>, Status> {
        require_role(&req, SYMPTOM_CHECKER_ROLES, "use the symptom checker")?;

        let req = req.into_inner();
        match self
            .services
            .symptoms
            .suggest_possible_conditions(SuggestConditionsInput {
                symptoms: req.symptoms,
            })
            .await
        {
            Ok(output) => Ok(Response::new(output.into())),
            Err(e) => {
                tracing::error!("Suggest conditions error: {:?}", e);
                Err(status_from_error(&e))
            }
        }
    }

    async fn list_beds(
        &self,
        req: Request<pb::ListBedsReq>,
    ) -> Result<Response<pb::ListBedsRes>, Status> {
        require_role(&req, BED_VIEW_ROLES, "view bed availability")?;

        let req = req.into_inner();
        let hospitals = self
            .services
            .beds
            .list(non_empty(&req.search), non_empty(&req.location));
        Ok(Response::new(hospitals.into()))
    }

    async fn check_medicine(
        &self,
        req: Request<pb::CheckMedicineReq>,
    ) -> Result<Response<pb::CheckMedicineRes>, Status> {
        require_role(&req, MEDICINE_CHECKER_ROLES, "check medicine availability")?;

        let req = req.into_inner();
        match self.services.medicines.check_availability(&req.term) {
            Ok(found) => Ok(Response::new(found.into())),
            Err(e) => {
                tracing::error!("Check medicine error: {:?}", e);
                Err(status_from_error(&e))
            }
        }
    }
}
