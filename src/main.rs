use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use policy_optimizer::config::{LogFormat, LoggingSettings, Settings};
use policy_optimizer::core::{Advisor, Scorer};
use policy_optimizer::routes::{self, AppState};
use policy_optimizer::services::PolicyCatalog;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let log_format = std::env::var("LOG_FORMAT").ok();

    let directives = logging.filter_directives(rust_log.as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.output_format(log_format.as_deref()) {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging is configured by the settings, so a load failure is logged with defaults
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting policy optimizer service...");
    info!(
        "Configuration loaded (log level {}, format {})",
        settings.logging.level, settings.logging.format
    );

    let catalog = PolicyCatalog::load(&settings.catalog.path).await.map_err(|e| {
        error!("Failed to load policy catalog from {}: {}", settings.catalog.path, e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    let scorer = Scorer::new(settings.scoring.risk.clone(), settings.scoring.value.clone());
    info!("Scorer initialized with weights: {:?}", scorer.weights());

    let app_state = AppState {
        catalog: Arc::new(catalog),
        advisor: Advisor::new(scorer, settings.recommendation.clone()),
        premium_rates: settings.premium.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_extractors)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
