/// Book handlers - HTTP endpoints for catalog operations
use crate::error::Result;
use crate::models::{CreateBookRequest, UpdateBookRequest};
use crate::services::{BookService, SummaryClient};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Create a new book
pub async fn create_book(
    pool: web::Data<PgPool>,
    summary_client: web::Data<Arc<SummaryClient>>,
    req: web::Json<CreateBookRequest>,
) -> Result<HttpResponse> {
    let service =
        BookService::with_summary_client((**pool).clone(), summary_client.get_ref().clone());
    let book = service.create_book(&req).await?;

    Ok(HttpResponse::Created().json(book))
}

/// List all books
pub async fn list_books(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let books = service.list_books().await?;

    Ok(HttpResponse::Ok().json(books))
}

/// Get a book by ID
pub async fn get_book(pool: web::Data<PgPool>, book_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let book = service.get_book(*book_id).await?;

    Ok(HttpResponse::Ok().json(book))
}

/// Partially update a book
pub async fn update_book(
    pool: web::Data<PgPool>,
    book_id: web::Path<Uuid>,
    req: web::Json<UpdateBookRequest>,
) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    let book = service.update_book(*book_id, &req).await?;

    Ok(HttpResponse::Ok().json(book))
}

/// Delete a book and its reviews
pub async fn delete_book(
    pool: web::Data<PgPool>,
    book_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = BookService::new((**pool).clone());
    service.delete_book(*book_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Book and associated reviews deleted successfully"
    })))
}
