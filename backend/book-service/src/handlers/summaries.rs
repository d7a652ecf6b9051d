/// Summary handler - direct pass-through to the generation service
use crate::error::Result;
use crate::models::{GenerateSummaryRequest, SummaryResponse};
use crate::services::SummaryClient;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// Generate a summary for arbitrary text; upstream failure surfaces as 502
pub async fn generate_summary(
    summary_client: web::Data<Arc<SummaryClient>>,
    req: web::Json<GenerateSummaryRequest>,
) -> Result<HttpResponse> {
    let summary = summary_client.generate(&req.text).await?;

    Ok(HttpResponse::Ok().json(SummaryResponse {
        summary: Some(summary),
        rating: None,
    }))
}
