use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leadhub_core::{
    changes::ChangeFeed,
    leads::{LeadService, LeadServiceTrait},
};
use leadhub_storage_sqlite::{
    create_pool, db, init, run_migrations, LeadRepository, SqliteChangeFeed, UserRepository,
};

use crate::{
    auth::{CredentialVerifier, JwtVerifier},
    config::Config,
    realtime::ConnectionRegistry,
};

const CHANGE_FEED_CAPACITY: usize = 256;

pub struct AppState {
    pub lead_service: Arc<dyn LeadServiceTrait>,
    pub change_feed: Arc<dyn ChangeFeed>,
    pub registry: Arc<ConnectionRegistry>,
    pub verifier: Option<Arc<dyn CredentialVerifier>>,
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false),
        )
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    init(&config.db_path)?;
    let pool = create_pool(&config.db_path)?;
    run_migrations(&pool)?;
    let writer = db::write_actor::spawn_writer((*pool).clone());

    let change_feed = Arc::new(SqliteChangeFeed::new(CHANGE_FEED_CAPACITY));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let lead_repository = Arc::new(LeadRepository::new(
        pool.clone(),
        writer,
        change_feed.clone(),
    ));
    let lead_service = Arc::new(LeadService::new(lead_repository, user_repository));

    let verifier: Option<Arc<dyn CredentialVerifier>> = config
        .jwt_secret
        .as_deref()
        .map(|secret| Arc::new(JwtVerifier::new(secret)) as Arc<dyn CredentialVerifier>);
    if verifier.is_none() {
        tracing::warn!("No JWT secret configured, API authentication is disabled");
    }

    Ok(Arc::new(AppState {
        lead_service,
        change_feed,
        registry: Arc::new(ConnectionRegistry::new()),
        verifier,
    }))
}
