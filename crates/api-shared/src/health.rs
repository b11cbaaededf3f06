use crate::pb::HealthRes;

/// Health check shared by the gRPC and REST APIs.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Report the service as alive.
    ///
    /// The check does not reach the generation service: a healthy process with an unreachable
    /// generation backend still reports `ok`, and suggestion calls fail individually.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MediAssist is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_alive() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert_eq!(res.message, "MediAssist is alive");
    }
}
