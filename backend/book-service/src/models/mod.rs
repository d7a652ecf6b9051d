/// Data models for book-service
///
/// Persisted rows (`Book`, `Review`) plus the request/response DTOs of the
/// HTTP API.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book in the catalog
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    /// Free-text genre label
    pub genre: String,
    pub year_published: i32,
    /// Generated at creation time; null when the summary service was
    /// unavailable
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A reader review of a book. Immutable once created; deleted only by the
/// cascade when its book is deleted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub book_id: Uuid,
    pub reviewer_id: i64,
    /// Continuous rating, 1.0 to 5.0
    pub rating: f64,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year_published: i32,
}

/// Partial update: only provided fields change
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year_published: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub reviewer_id: i64,
    pub rating: f64,
    pub review_text: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: Option<String>,
    /// Mean review rating; null when the book has no reviews
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateSummaryRequest {
    pub text: String,
}

/// Reader preferences submitted to the recommendation endpoint.
///
/// Genre order is significant: it is the iteration and result order of the
/// selection algorithm. Authors and keywords are accepted for forward
/// compatibility but do not participate in selection.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPreferences {
    pub genres: Vec<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One recommendation result entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub author: String,
}
