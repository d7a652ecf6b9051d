/// Review handlers - HTTP endpoints for review submission and retrieval
use crate::error::Result;
use crate::models::CreateReviewRequest;
use crate::services::ReviewService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

/// Submit a review for a book
pub async fn create_review(
    pool: web::Data<PgPool>,
    book_id: web::Path<Uuid>,
    req: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse> {
    let service = ReviewService::new((**pool).clone());
    let review = service.create_review(*book_id, &req).await?;

    Ok(HttpResponse::Created().json(review))
}

/// List a book's reviews
pub async fn get_reviews(
    pool: web::Data<PgPool>,
    book_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ReviewService::new((**pool).clone());
    let reviews = service.list_for_book(*book_id).await?;

    Ok(HttpResponse::Ok().json(reviews))
}

/// Stored summary plus mean rating for a book
pub async fn get_book_summary(
    pool: web::Data<PgPool>,
    book_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = ReviewService::new((**pool).clone());
    let summary = service.book_summary(*book_id).await?;

    Ok(HttpResponse::Ok().json(summary))
}
