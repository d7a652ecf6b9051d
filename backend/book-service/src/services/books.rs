/// Book service - catalog creation, retrieval, and management
use crate::error::{AppError, Result};
use crate::models::{Book, CreateBookRequest, UpdateBookRequest};
use crate::services::summary::SummaryClient;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct BookService {
    pool: PgPool,
    summary_client: Option<Arc<SummaryClient>>,
}

impl BookService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            summary_client: None,
        }
    }

    pub fn with_summary_client(pool: PgPool, summary_client: Arc<SummaryClient>) -> Self {
        Self {
            pool,
            summary_client: Some(summary_client),
        }
    }

    /// Create a book, attaching a generated summary when the summary service
    /// answers. A summary failure degrades to `summary = NULL` rather than
    /// failing the request.
    pub async fn create_book(&self, req: &CreateBookRequest) -> Result<Book> {
        let summary = match &self.summary_client {
            Some(client) => {
                let prompt = format!("{} {} {}", req.title, req.author, req.genre);
                match client.generate(&prompt).await {
                    Ok(text) => Some(text),
                    Err(err) => {
                        tracing::warn!(title = %req.title, "summary generation failed: {}", err);
                        None
                    }
                }
            }
            None => None,
        };

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, genre, year_published, summary)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, genre, year_published, summary, created_at
            "#,
        )
        .bind(&req.title)
        .bind(&req.author)
        .bind(&req.genre)
        .bind(req.year_published)
        .bind(&summary)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    pub async fn list_books(&self) -> Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, genre, year_published, summary, created_at
            FROM books
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    pub async fn get_book(&self, book_id: Uuid) -> Result<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, genre, year_published, summary, created_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {book_id}")))
    }

    /// Partial update: only the provided fields change
    pub async fn update_book(&self, book_id: Uuid, req: &UpdateBookRequest) -> Result<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                genre = COALESCE($4, genre),
                year_published = COALESCE($5, year_published)
            WHERE id = $1
            RETURNING id, title, author, genre, year_published, summary, created_at
            "#,
        )
        .bind(book_id)
        .bind(&req.title)
        .bind(&req.author)
        .bind(&req.genre)
        .bind(req.year_published)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {book_id}")))
    }

    /// Delete a book; its reviews cascade at the database level
    pub async fn delete_book(&self, book_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("book {book_id}")));
        }

        Ok(())
    }
}
