//! API-key checks for the gRPC surface.

/// Read the expected API key from the environment.
///
/// Call once at startup and pass the result to [`validate_api_key`].
pub fn api_key_from_env() -> Option<String> {
    std::env::var("API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

/// Validates the provided API key against the expected key.
///
/// Returns `Ok(())` if the key is valid. A server started without an expected key refuses every
/// request rather than allowing all of them.
#[allow(clippy::result_large_err)]
pub fn validate_api_key(provided_key: &str, expected_key: Option<&str>) -> Result<(), tonic::Status> {
    let expected_key =
        expected_key.ok_or_else(|| tonic::Status::internal("API_KEY not configured"))?;

    if provided_key == expected_key {
        Ok(())
    } else {
        Err(tonic::Status::unauthenticated("Invalid API key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn accepts_matching_key() {
        validate_api_key("k1", Some("k1")).expect("matching key");
    }

    #[test]
    fn rejects_wrong_key() {
        let status = validate_api_key("k2", Some("k1")).expect_err("wrong key");
        assert_eq!(status.code(), Code::Unauthenticated);
    }

    #[test]
    fn missing_expected_key_is_internal_error() {
        let status = validate_api_key("k1", None).expect_err("no key configured");
        assert_eq!(status.code(), Code::Internal);
    }
}
