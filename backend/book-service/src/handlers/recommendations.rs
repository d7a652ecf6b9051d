/// Recommendation handler - runs the preference-based pipeline
use crate::error::Result;
use crate::models::UserPreferences;
use crate::services::RecommendationService;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// Recommend up to 10 books for the submitted preferences.
///
/// Genres are required and effective; a genre with no rated books yields 422.
/// Authors and keywords are accepted but inert.
pub async fn get_recommendations(
    service: web::Data<Arc<RecommendationService>>,
    req: web::Json<UserPreferences>,
) -> Result<HttpResponse> {
    let recommendations = service.recommend(&req).await?;

    Ok(HttpResponse::Ok().json(recommendations))
}
