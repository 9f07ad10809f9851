use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tripsync::config::Settings;
use tripsync::routes::{self, error::{json_config, query_config}, AppState};
use tripsync::services::{Catalog, ImageCache};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting TripSync recommendation service...");

    let catalog = Catalog::load(&settings.catalog.path).map_err(|e| {
        error!("Failed to load destination catalog from {}: {}", settings.catalog.path, e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    // Image cache: Redis tier is optional, the in-memory tier always exists
    let l1_size = settings.images.l1_cache_size;
    let image_ttl = settings.images.ttl_secs;
    let images = match settings.images.redis_url.as_deref() {
        Some(url) => match ImageCache::with_redis(url, l1_size, image_ttl).await {
            Ok(cache) => {
                info!("Image cache initialized (L1: {} entries, Redis tier enabled)", l1_size);
                cache
            }
            Err(e) => {
                warn!("Failed to connect to Redis ({}), image cache is in-memory only", e);
                ImageCache::in_memory(l1_size, image_ttl)
            }
        },
        None => {
            info!("Image cache initialized (L1: {} entries, in-memory only)", l1_size);
            ImageCache::in_memory(l1_size, image_ttl)
        }
    };

    let app_state = AppState::new(settings.clone(), catalog, images);

    info!("Matcher initialized with weights: {:?}", app_state.matcher.weights());
    info!("Image cache stats: {:?}", app_state.images.stats());

    // Evict idle groups in the background
    let registry = app_state.registry().clone();
    let sweep_every = Duration::from_secs(settings.groups.sweep_interval_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        loop {
            ticker.tick().await;
            registry.evict_expired(chrono::Utc::now()).await;
        }
    });

    info!(
        "Group registry ready (TTL: {}s, max members: {})",
        settings.groups.ttl_secs,
        app_state.registry().max_members()
    );

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(json_config())
            .app_data(query_config())
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
