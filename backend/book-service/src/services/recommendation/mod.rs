/// Recommendation Pipeline
///
/// Turns reader genre preferences into a bounded list of book
/// recommendations:
///
/// 1. **Aggregate**: mean review rating per book (inner join, fresh per
///    request)
/// 2. **Encode**: genre label → integer code, from the current aggregate
/// 3. **Features**: one (genre code, rating level) row per requested genre ×
///    level 1..=5
/// 4. **Score**: batch inference through the pre-fitted regression model
/// 5. **Select**: per-genre ranking by predicted score, matched back to books
///    by rounded mean rating, capped at 10 results
///
/// Steps 2-5 are CPU-bound and run on a blocking worker so inference cannot
/// stall the async executor.
pub mod aggregate;
pub mod encoder;
pub mod features;
pub mod model;
pub mod selector;

pub use aggregate::{load_rating_aggregates, RatingAggregate};
pub use encoder::GenreEncoder;
pub use features::{build_feature_rows, feature_matrix, FeatureRow, RATING_LEVELS};
pub use model::ScoringModel;
pub use selector::{select_recommendations, MAX_RECOMMENDATIONS};

use crate::models::{Recommendation, UserPreferences};
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RecommendationError {
    /// Requested genre has no rated books in the current aggregate
    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    #[error("model loading failed: {0}")]
    ModelLoad(String),

    #[error("model inference failed: {0}")]
    Inference(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RecommendationError>;

/// Orchestrates one recommendation request end to end.
///
/// Holds the shared model artifact; everything else is recomputed per request
/// so concurrent requests never share mutable state.
pub struct RecommendationService {
    pool: PgPool,
    model: Arc<ScoringModel>,
}

impl RecommendationService {
    pub fn new(pool: PgPool, model: Arc<ScoringModel>) -> Self {
        Self { pool, model }
    }

    /// Run the full pipeline for one set of preferences.
    ///
    /// A genre with no rated books aborts the whole request with
    /// `UnknownGenre`; partial results are never returned for that case.
    pub async fn recommend(
        &self,
        preferences: &UserPreferences,
    ) -> crate::error::Result<Vec<Recommendation>> {
        let aggregates = load_rating_aggregates(&self.pool).await?;
        let genres = preferences.genres.clone();
        let model = self.model.clone();

        debug!(
            aggregate_rows = aggregates.len(),
            requested_genres = genres.len(),
            "Running recommendation pipeline"
        );

        let recommendations = tokio::task::spawn_blocking(move || -> Result<Vec<Recommendation>> {
            let encoder = GenreEncoder::from_aggregates(&aggregates);
            let rows = build_feature_rows(&encoder, &genres)?;
            let scores = model.predict(feature_matrix(&rows))?;
            Ok(select_recommendations(&aggregates, &genres, &rows, &scores))
        })
        .await
        .map_err(|e| crate::error::AppError::Internal(format!("pipeline task failed: {e}")))??;

        debug!(
            result_count = recommendations.len(),
            "Recommendation pipeline complete"
        );

        Ok(recommendations)
    }
}
