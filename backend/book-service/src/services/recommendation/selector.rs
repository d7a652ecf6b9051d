/// Ranking and Selection
///
/// The final stage of the pipeline: orders each requested genre's scored
/// rows, matches them back to concrete books by rounded mean rating, and
/// accumulates a capped result list.
use super::aggregate::RatingAggregate;
use super::features::{FeatureRow, LEVELS_PER_GENRE};
use crate::models::Recommendation;
use ndarray::Array1;

/// Hard cap on the result list; selection stops the instant it is reached
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Select up to `MAX_RECOMMENDATIONS` books.
///
/// `rows` and `scores` are parallel and laid out genre-major (5 rows per
/// requested genre, levels ascending) as emitted by the feature builder.
///
/// Per genre, rows are sorted by predicted score descending with a stable
/// sort, so equal scores keep ascending level order. Each sorted row is then
/// matched against the aggregate in aggregate order: genre equality plus
/// `avg_rating.round() == level` (half-away-from-zero). A book may appear
/// more than once when it matches multiple scored rows; no deduplication is
/// performed. Fewer than the cap is not an error.
pub fn select_recommendations(
    aggregates: &[RatingAggregate],
    genres: &[String],
    rows: &[FeatureRow],
    scores: &Array1<f32>,
) -> Vec<Recommendation> {
    debug_assert_eq!(rows.len(), genres.len() * LEVELS_PER_GENRE);
    debug_assert_eq!(rows.len(), scores.len());

    let mut recommendations = Vec::new();

    for (genre_idx, genre) in genres.iter().enumerate() {
        let offset = genre_idx * LEVELS_PER_GENRE;

        let mut scored: Vec<(i32, f32)> = rows[offset..offset + LEVELS_PER_GENRE]
            .iter()
            .zip(scores.iter().skip(offset))
            .map(|(row, &score)| (row.level, score))
            .collect();

        // Stable sort: score ties keep the ascending level emission order.
        // NaN scores sink without aborting the request.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (level, _score) in scored {
            for book in aggregates {
                if book.genre == *genre && book.avg_rating.round() as i32 == level {
                    recommendations.push(Recommendation {
                        title: book.title.clone(),
                        author: book.author.clone(),
                    });
                    if recommendations.len() >= MAX_RECOMMENDATIONS {
                        return recommendations;
                    }
                }
            }
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn book(title: &str, genre: &str, avg_rating: f64) -> RatingAggregate {
        RatingAggregate {
            book_id: Uuid::new_v4(),
            title: title.to_string(),
            author: format!("author of {title}"),
            genre: genre.to_string(),
            avg_rating,
        }
    }

    fn rows_for(genres: &[&str]) -> Vec<FeatureRow> {
        genres
            .iter()
            .enumerate()
            .flat_map(|(code, _)| {
                (1..=5).map(move |level| FeatureRow {
                    genre_code: code,
                    level,
                })
            })
            .collect()
    }

    /// Scores that rank levels descending (5 first), like the identity model
    fn identity_scores(genre_count: usize) -> Array1<f32> {
        Array1::from_iter((0..genre_count).flat_map(|_| (1..=5).map(|l| l as f32)))
    }

    #[test]
    fn highest_scored_level_matches_first() {
        let aggregates = vec![book("Book A", "Fiction", 4.6), book("Book B", "Fiction", 2.1)];
        let genres = vec!["Fiction".to_string()];
        let rows = rows_for(&["Fiction"]);
        // level 5 scores highest, level 1 second; 2..4 score low
        let scores = Array1::from_vec(vec![2.0, 0.5, 0.5, 0.5, 4.9]);

        let result = select_recommendations(&aggregates, &genres, &rows, &scores);

        // 4.6 rounds to 5 → Book A first; level 1 matches nothing (2.1 → 2)
        assert_eq!(result[0].title, "Book A");
        // Book B surfaces via the level-2 row
        assert!(result.iter().any(|r| r.title == "Book B"));
    }

    #[test]
    fn result_is_capped_at_ten_in_ranked_order() {
        // 15 books all rounding to level 5 in one genre
        let aggregates: Vec<RatingAggregate> = (0..15)
            .map(|i| book(&format!("Book {i}"), "Fiction", 4.8))
            .collect();
        let genres = vec!["Fiction".to_string()];
        let rows = rows_for(&["Fiction"]);
        let scores = identity_scores(1);

        let result = select_recommendations(&aggregates, &genres, &rows, &scores);

        assert_eq!(result.len(), MAX_RECOMMENDATIONS);
        // Aggregate order is preserved within the winning level
        assert_eq!(result[0].title, "Book 0");
        assert_eq!(result[9].title, "Book 9");
    }

    #[test]
    fn genres_are_processed_in_request_order() {
        let aggregates = vec![
            book("Mystery Hit", "Mystery", 5.0),
            book("Fiction Hit", "Fiction", 5.0),
        ];
        let genres = vec!["Fiction".to_string(), "Mystery".to_string()];
        let rows = rows_for(&["Fiction", "Mystery"]);
        let scores = identity_scores(2);

        let result = select_recommendations(&aggregates, &genres, &rows, &scores);

        assert_eq!(result[0].title, "Fiction Hit");
        assert_eq!(result[1].title, "Mystery Hit");
    }

    #[test]
    fn duplicate_matches_are_preserved() {
        // Requesting the same genre twice yields two matching rows for the
        // same book; no deduplication is performed.
        let aggregates = vec![book("Only Book", "Fiction", 3.0)];
        let genres = vec!["Fiction".to_string(), "Fiction".to_string()];
        let rows = rows_for(&["Fiction", "Fiction"]);
        let scores = identity_scores(2);

        let result = select_recommendations(&aggregates, &genres, &rows, &scores);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0], result[1]);
    }

    #[test]
    fn score_ties_keep_ascending_level_order() {
        let aggregates = vec![
            book("Level Two", "Fiction", 2.0),
            book("Level Four", "Fiction", 4.0),
        ];
        let genres = vec!["Fiction".to_string()];
        let rows = rows_for(&["Fiction"]);
        // All levels tie: stable sort keeps emission order 1,2,3,4,5
        let scores = Array1::from_vec(vec![3.0; 5]);

        let result = select_recommendations(&aggregates, &genres, &rows, &scores);

        assert_eq!(result[0].title, "Level Two");
        assert_eq!(result[1].title, "Level Four");
    }

    #[test]
    fn half_ratings_round_away_from_zero() {
        let aggregates = vec![book("Boundary", "Fiction", 2.5)];
        let genres = vec!["Fiction".to_string()];
        let rows = rows_for(&["Fiction"]);
        let scores = identity_scores(1);

        let result = select_recommendations(&aggregates, &genres, &rows, &scores);

        // 2.5 rounds to 3, not 2
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn underfill_returns_short_list() {
        let aggregates = vec![book("Solo", "Fiction", 4.0)];
        let genres = vec!["Fiction".to_string()];
        let rows = rows_for(&["Fiction"]);
        let scores = identity_scores(1);

        let result = select_recommendations(&aggregates, &genres, &rows, &scores);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Solo");
    }
}
