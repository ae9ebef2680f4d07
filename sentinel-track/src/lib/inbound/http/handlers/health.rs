/// Liveness probe. Reports `Healthy` whenever the server can answer.
pub async fn health() -> &'static str {
    "Healthy"
}
