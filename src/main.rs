//! Caseflow server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use sea_orm_migration::MigratorTrait;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use caseflow_lib::api;
use caseflow_lib::cache::Cache;
use caseflow_lib::config::Config;
use caseflow_lib::db::DbPool;
use caseflow_lib::middleware::RequestLogger;
use caseflow_lib::migration::Migrator;
use caseflow_lib::services::Notifier;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - APP_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and JWT_SECRET must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Caseflow Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development defaults for DATABASE_URL and JWT_SECRET");
    }

    // Connect to PostgreSQL
    let pool = DbPool::connect(&config)
        .await
        .expect("Failed to connect to database");
    info!("Database connection established");

    // Run migrations. Failures are logged but do not abort startup: the
    // additive migrations are written IF NOT EXISTS, and deployment
    // availability is preferred over fail-fast here.
    match Migrator::up(pool.connection(), None).await {
        Ok(()) => info!("Database migrations complete"),
        Err(e) => {
            error!("Database migration failed: {}", e);
            warn!("Continuing startup with the existing schema");
        }
    }

    // Connect to Redis (best-effort; a failure disables the cache)
    let cache = Cache::connect(&config.redis_url).await;
    info!("Cache layer initialized");

    // Outbound mail for assignment notifications
    let notifier = Notifier::from_config(&config);
    if config.smtp.is_some() {
        info!("SMTP notifications enabled");
    } else {
        info!("SMTP not configured; assignment notifications disabled");
    }

    let bind_address = config.bind_address();
    let is_development = config.is_development();

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        // Configure CORS
        let cors = if is_development {
            // Permissive CORS for development
            Cors::default()
                .allowed_origin("http://localhost:5173")
                .allowed_origin("http://127.0.0.1:5173")
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                ])
                .max_age(3600)
        } else {
            // Restrictive CORS for production (same-origin only)
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec![
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::CONTENT_TYPE,
                ])
                .max_age(3600)
        };

        App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            // Add request logging middleware
            .wrap(RequestLogger)
            // Add shared state
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(notifier.clone()))
            // Configure API routes
            .service(
                web::scope("/api")
                    .configure(api::configure_auth_routes)
                    .configure(api::configure_user_routes)
                    .configure(api::configure_project_routes)
                    .configure(api::configure_test_suite_routes)
                    .configure(api::configure_test_case_routes)
                    .configure(api::configure_comment_routes)
                    .configure(api::configure_test_case_status_routes)
                    .configure(api::configure_test_execution_routes)
                    .configure(api::configure_execution_permission_routes)
                    .configure(api::configure_analytics_routes),
            )
            // Health probes live at the root, outside the API scope
            .configure(api::configure_health_routes)
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
            )
    });

    server.workers(worker_count).bind(&bind_address)?.run().await
}
