pub mod books;
pub mod recommendation;
pub mod reviews;
pub mod summary;

pub use books::BookService;
pub use recommendation::RecommendationService;
pub use reviews::ReviewService;
pub use summary::SummaryClient;
