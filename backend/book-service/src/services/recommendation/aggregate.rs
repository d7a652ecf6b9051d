/// Rating Aggregation
///
/// One row per book with at least one review, carrying the mean of its review
/// ratings. Inner-join semantics: unreviewed books never appear. The result
/// is recomputed fresh on every recommendation request and never cached.
use sqlx::PgPool;
use uuid::Uuid;

/// One book's identity plus its mean review rating
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatingAggregate {
    pub book_id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub avg_rating: f64,
}

/// Load the aggregate rows.
///
/// Row order is stable (book creation time, then id) so tie resolution in the
/// selector is reproducible across identical requests.
pub async fn load_rating_aggregates(pool: &PgPool) -> Result<Vec<RatingAggregate>, sqlx::Error> {
    sqlx::query_as::<_, RatingAggregate>(
        r#"
        SELECT b.id AS book_id, b.title, b.author, b.genre,
               AVG(r.rating) AS avg_rating
        FROM books b
        JOIN reviews r ON r.book_id = b.id
        GROUP BY b.id
        ORDER BY b.created_at, b.id
        "#,
    )
    .fetch_all(pool)
    .await
}
