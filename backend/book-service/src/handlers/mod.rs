/// HTTP handlers for book-service
pub mod books;
pub mod recommendations;
pub mod reviews;
pub mod summaries;

pub use books::*;
pub use recommendations::*;
pub use reviews::*;
pub use summaries::*;
