/// Review service - review submission and per-book rating summaries
use crate::error::{AppError, Result};
use crate::models::{CreateReviewRequest, Review, SummaryResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submit a review for a book. 404 for unknown books; ratings outside
    /// the 1.0..=5.0 range are rejected.
    pub async fn create_review(&self, book_id: Uuid, req: &CreateReviewRequest) -> Result<Review> {
        if !(1.0..=5.0).contains(&req.rating) {
            return Err(AppError::BadRequest(format!(
                "rating must be between 1.0 and 5.0, got {}",
                req.rating
            )));
        }

        let book_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                .bind(book_id)
                .fetch_one(&self.pool)
                .await?;

        if !book_exists {
            return Err(AppError::NotFound(format!("book {book_id}")));
        }

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (book_id, reviewer_id, rating, review_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, reviewer_id, rating, review_text, created_at
            "#,
        )
        .bind(book_id)
        .bind(req.reviewer_id)
        .bind(req.rating)
        .bind(&req.review_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    /// List a book's reviews. A book with no reviews yields `NotFound`,
    /// matching the API contract.
    pub async fn list_for_book(&self, book_id: Uuid) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, book_id, reviewer_id, rating, review_text, created_at
            FROM reviews
            WHERE book_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        if reviews.is_empty() {
            return Err(AppError::NotFound(format!("reviews for book {book_id}")));
        }

        Ok(reviews)
    }

    /// Stored summary plus mean rating; rating is null for unreviewed books
    pub async fn book_summary(&self, book_id: Uuid) -> Result<SummaryResponse> {
        let row: Option<(Option<String>, Option<f64>)> = sqlx::query_as(
            r#"
            SELECT b.summary, AVG(r.rating) AS rating
            FROM books b
            LEFT JOIN reviews r ON r.book_id = b.id
            WHERE b.id = $1
            GROUP BY b.id
            "#,
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        let (summary, rating) =
            row.ok_or_else(|| AppError::NotFound(format!("book {book_id}")))?;

        Ok(SummaryResponse { summary, rating })
    }
}
