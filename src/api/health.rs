use poem_openapi::{payload::Json, Object, OpenApi};

/// Health check endpoint
pub struct HealthApi;

#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

#[OpenApi]
impl HealthApi {
    /// Liveness probe
    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".to_string(),
        })
    }
}
