/// Feature Construction
///
/// For every requested genre and every discrete rating level, one model input
/// row (genre code, rating level). Row order is requested-genre order (outer)
/// then ascending level (inner); the selector relies on that layout to slice
/// a genre's rows out of the batch.
use super::encoder::GenreEncoder;
use super::Result;
use ndarray::Array2;
use std::ops::RangeInclusive;

/// Discretized rating axis submitted to the scoring model, distinct from a
/// review's continuous rating value
pub const RATING_LEVELS: RangeInclusive<i32> = 1..=5;

/// Number of rating levels, i.e. feature rows emitted per genre
pub const LEVELS_PER_GENRE: usize = 5;

/// One (genre code, rating level) pair submitted to the scoring model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRow {
    pub genre_code: usize,
    pub level: i32,
}

/// Build the feature rows for the requested genres, in request order.
///
/// Fails with `UnknownGenre` before any inference happens when a requested
/// genre has no code in the current encoding.
pub fn build_feature_rows(encoder: &GenreEncoder, genres: &[String]) -> Result<Vec<FeatureRow>> {
    let mut rows = Vec::with_capacity(genres.len() * LEVELS_PER_GENRE);

    for genre in genres {
        let genre_code = encoder.encode(genre)?;
        for level in RATING_LEVELS {
            rows.push(FeatureRow { genre_code, level });
        }
    }

    Ok(rows)
}

/// Convert feature rows to the 2-column f32 matrix the model consumes
pub fn feature_matrix(rows: &[FeatureRow]) -> Array2<f32> {
    let mut matrix = Array2::zeros((rows.len(), 2));

    for (i, row) in rows.iter().enumerate() {
        matrix[[i, 0]] = row.genre_code as f32;
        matrix[[i, 1]] = row.level as f32;
    }

    matrix
}
