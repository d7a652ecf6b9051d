/// Genre Encoding
///
/// Maps the distinct genre labels of the current rating aggregate to integer
/// codes. Labels are sorted lexicographically before assignment, so the
/// encoding is deterministic for a given aggregate. Only genres with at least
/// one rated book are encodable.
use super::aggregate::RatingAggregate;
use super::{RecommendationError, Result};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct GenreEncoder {
    codes: HashMap<String, usize>,
}

impl GenreEncoder {
    /// Build the encoding from the aggregate rows of the current request
    pub fn from_aggregates(rows: &[RatingAggregate]) -> Self {
        let distinct: BTreeSet<&str> = rows.iter().map(|r| r.genre.as_str()).collect();

        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, genre)| (genre.to_string(), code))
            .collect();

        Self { codes }
    }

    /// Look up the code for a genre.
    ///
    /// A genre absent from the mapping is a lookup failure that must abort
    /// the whole request, never be silently skipped.
    pub fn encode(&self, genre: &str) -> Result<usize> {
        self.codes
            .get(genre)
            .copied()
            .ok_or_else(|| RecommendationError::UnknownGenre(genre.to_string()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn aggregate(genre: &str) -> RatingAggregate {
        RatingAggregate {
            book_id: Uuid::new_v4(),
            title: "t".to_string(),
            author: "a".to_string(),
            genre: genre.to_string(),
            avg_rating: 3.0,
        }
    }

    #[test]
    fn codes_are_assigned_in_lexicographic_order() {
        let rows = vec![
            aggregate("Sci-Fi"),
            aggregate("Fiction"),
            aggregate("Mystery"),
            aggregate("Fiction"),
        ];

        let encoder = GenreEncoder::from_aggregates(&rows);

        assert_eq!(encoder.len(), 3);
        assert_eq!(encoder.encode("Fiction").unwrap(), 0);
        assert_eq!(encoder.encode("Mystery").unwrap(), 1);
        assert_eq!(encoder.encode("Sci-Fi").unwrap(), 2);
    }

    #[test]
    fn unknown_genre_is_a_lookup_failure() {
        let encoder = GenreEncoder::from_aggregates(&[aggregate("Fiction")]);

        let result = encoder.encode("Poetry");

        assert!(matches!(result, Err(RecommendationError::UnknownGenre(g)) if g == "Poetry"));
    }

    #[test]
    fn empty_aggregate_yields_empty_mapping() {
        let encoder = GenreEncoder::from_aggregates(&[]);

        assert!(encoder.is_empty());
        assert!(encoder.encode("Fiction").is_err());
    }
}
