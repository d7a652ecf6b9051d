/// Book Service
///
/// HTTP service for a book review platform: catalog and review CRUD,
/// LLM-generated book summaries, and ML-backed recommendations from reader
/// genre preferences.
///
/// # Routes
///
/// - `POST/GET /books`, `GET/PUT/DELETE /books/{id}` - catalog management
/// - `POST/GET /books/{id}/reviews` - review submission and retrieval
/// - `GET /books/{id}/summary` - stored summary plus mean rating
/// - `POST /generate-summary` - direct summary generation
/// - `POST /recommendations` - preference-based recommendation pipeline
/// - `GET /health` - unauthenticated liveness + database check
///
/// All routes except `/health` require HTTP Basic auth.
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use book_service::middleware::BasicAuthMiddleware;
use book_service::services::recommendation::ScoringModel;
use book_service::services::{RecommendationService, SummaryClient};
use book_service::{db, handlers, Config};
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "book-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "book-service"
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting book-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Load the recommendation model. No request can be served without it, so
    // an unloadable artifact fails startup rather than failing per-request.
    let model = match ScoringModel::load(&config.model.path) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            tracing::error!("Recommendation model loading failed: {}", e);
            eprintln!("ERROR: Failed to load recommendation model: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Recommendation model loaded from {}", config.model.path);

    // Initialize database connection pool
    let db_pool = match db::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    db::ensure_schema(&db_pool).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to ensure database schema: {e}"),
        )
    })?;

    tracing::info!("Connected to database, schema ensured");

    let summary_client = Arc::new(SummaryClient::new(&config.summary).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to build summary client: {e}"),
        )
    })?);

    let recommendation_service = Arc::new(RecommendationService::new(db_pool.clone(), model));

    let auth_config = Arc::new(config.auth.clone());
    let allowed_origins = config.cors.allowed_origins.clone();

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(summary_client.clone()))
            .app_data(web::Data::new(recommendation_service.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health_summary))
            .service(
                web::scope("")
                    .wrap(BasicAuthMiddleware::new(auth_config.clone()))
                    .service(
                        web::scope("/books")
                            .service(
                                web::resource("")
                                    .route(web::post().to(handlers::create_book))
                                    .route(web::get().to(handlers::list_books)),
                            )
                            .service(
                                web::resource("/{book_id}")
                                    .route(web::get().to(handlers::get_book))
                                    .route(web::put().to(handlers::update_book))
                                    .route(web::delete().to(handlers::delete_book)),
                            )
                            .service(
                                web::resource("/{book_id}/reviews")
                                    .route(web::post().to(handlers::create_review))
                                    .route(web::get().to(handlers::get_reviews)),
                            )
                            .route(
                                "/{book_id}/summary",
                                web::get().to(handlers::get_book_summary),
                            ),
                    )
                    .route(
                        "/generate-summary",
                        web::post().to(handlers::generate_summary),
                    )
                    .route(
                        "/recommendations",
                        web::post().to(handlers::get_recommendations),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await
}
