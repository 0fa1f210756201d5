//! Ephemeral object-URL service contracts.

/// Host service creating short-lived object URLs for binary display/download.
///
/// Implementations own the release schedule: every created URL must be
/// revoked after a bounded delay, whether or not the consuming view used it.
pub trait ObjectUrlService {
    /// Creates an object URL for `bytes` tagged with `mime`.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot mint object URLs.
    fn create_for_bytes(&self, bytes: &[u8], mime: &str) -> Result<String, String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op object-URL service for unsupported targets.
pub struct NoopObjectUrlService;

impl ObjectUrlService for NoopObjectUrlService {
    fn create_for_bytes(&self, _bytes: &[u8], _mime: &str) -> Result<String, String> {
        Err("object URLs unavailable".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_object_url_service_reports_unavailable() {
        let service = NoopObjectUrlService;
        let service_obj: &dyn ObjectUrlService = &service;
        let err = service_obj
            .create_for_bytes(b"bytes", "application/octet-stream")
            .expect_err("noop should not mint URLs");
        assert!(err.contains("unavailable"));
    }
}
