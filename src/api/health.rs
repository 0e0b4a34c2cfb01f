use poem_openapi::{payload::PlainText, OpenApi};

/// Health check endpoint
pub struct HealthApi;

#[OpenApi]
impl HealthApi {
    /// Liveness probe
    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> PlainText<&'static str> {
        PlainText("ok")
    }
}
