//! Quiz Server
//!
//! A minimal quiz web application: users register/log in by username, fetch
//! a static set of questions, submit answers, and retrieve per-question
//! correct/incorrect history.
//!
//! Uses SQLite (embedded) so a single binary plus a questions file is a
//! complete deployment.

mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use services::{ProgressLedger, QuestionCatalog, UserDirectory};
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub directory: Arc<UserDirectory>,
    pub ledger: Arc<ProgressLedger>,
    pub catalog: Arc<QuestionCatalog>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Quiz Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    info!("Loading configuration...");
    let config = load_config()
        .await
        .context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, db={}, questions={}",
        config.bind_address, config.database_path, config.questions_path
    );

    info!("Initializing SQLite database...");
    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );
    info!("SQLite database initialized at: {}", config.database_path);

    // Initialize services
    let catalog = Arc::new(QuestionCatalog::new(&config.questions_path));
    let directory = Arc::new(UserDirectory::new(db.clone()));
    let ledger = Arc::new(ProgressLedger::new(db.clone()));
    info!("Services initialized");

    // Seed the questions table from the catalog. A missing catalog is not
    // fatal here; the questions endpoint reports it per request.
    match catalog.load().await {
        Ok(questions) => {
            db.seed_questions(&questions).await.map_err(|e| {
                anyhow::anyhow!("Failed to seed questions table: {}", e)
            })?;
            info!("Seeded {} questions from catalog", questions.len());
        }
        Err(e) => {
            warn!("Question catalog unavailable at startup: {}", e);
        }
    }

    let state = AppState {
        db,
        directory,
        ledger,
        catalog,
    };

    info!("Building HTTP router...");
    let app = create_router(state, &config.static_dir);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server ready to accept connections");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn create_router(state: AppState, static_dir: &str) -> Router {
    let index_path = PathBuf::from(static_dir).join("index.html");
    let login_path = PathBuf::from(static_dir).join("login.html");

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // REST API routes
        .nest("/api", api_routes())
        // Quiz and login pages
        .route_service("/", ServeFile::new(index_path))
        .route_service("/login", ServeFile::new(login_path))
        .nest_service("/static", ServeDir::new(static_dir))
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login::login))
        .route("/questions", get(handlers::questions::list))
        .route("/progress/:username", get(handlers::progress::get))
        .route("/answer", post(handlers::answer::record))
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    database_path: String,
    questions_path: String,
    static_dir: String,
}

async fn load_config() -> Result<Config> {
    let data_dir = std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));
    info!("Data directory: {}", data_dir.display());

    tokio::fs::create_dir_all(&data_dir)
        .await
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
        data_dir.join("quiz.db").to_string_lossy().to_string()
    });

    let questions_path = std::env::var("QUESTIONS_PATH").unwrap_or_else(|_| {
        data_dir
            .join("questions.json")
            .to_string_lossy()
            .to_string()
    });

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());

    Ok(Config {
        bind_address,
        database_path,
        questions_path,
        static_dir,
    })
}
