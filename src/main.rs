use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use batchpress::application::ports::{ImageFetcher, JobRepository, RowParser, WebhookNotifier};
use batchpress::application::services::{BatchProcessor, ImageTransformer, IntakeService};
use batchpress::infrastructure::http::{HttpWebhookNotifier, ReqwestImageFetcher};
use batchpress::infrastructure::imaging::ImageCrateEncoder;
use batchpress::infrastructure::observability::{TracingConfig, init_tracing};
use batchpress::infrastructure::persistence::{
    InMemoryJobRepository, PgJobRepository, create_pool, run_migrations,
};
use batchpress::infrastructure::storage::ImageStoreFactory;
use batchpress::infrastructure::tabular::CsvRowParser;
use batchpress::presentation::config::{DatabaseProviderSetting, DatabaseSettings};
use batchpress::presentation::{AppState, Environment, Settings, create_router};

async fn build_job_repository(
    settings: &DatabaseSettings,
) -> anyhow::Result<Arc<dyn JobRepository>> {
    match settings.provider {
        DatabaseProviderSetting::Postgres => {
            let pool = create_pool(&settings.url, settings.max_connections).await?;
            if settings.run_migrations {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(PgJobRepository::new(pool)))
        }
        DatabaseProviderSetting::Memory => {
            tracing::warn!("Using in-memory job store; jobs will not survive a restart");
            Ok(Arc::new(InMemoryJobRepository::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(
        TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    let job_repository = build_job_repository(&settings.database).await?;

    let image_store = ImageStoreFactory::create(&settings.storage)?;
    let fetcher: Arc<dyn ImageFetcher> = Arc::new(ReqwestImageFetcher::new(
        settings.processing.fetch_timeout(),
        settings.processing.max_image_bytes,
    )?);
    let encoder = Arc::new(ImageCrateEncoder::new(settings.processing.quality));
    let notifier: Arc<dyn WebhookNotifier> = Arc::new(HttpWebhookNotifier::new(
        Arc::clone(&job_repository),
        settings.webhook.timeout(),
    )?);
    let row_parser: Arc<dyn RowParser> = Arc::new(CsvRowParser);

    let transformer = Arc::new(ImageTransformer::new(fetcher, encoder, image_store));
    let batch_processor = Arc::new(BatchProcessor::new(
        transformer,
        Arc::clone(&job_repository),
        Arc::clone(&notifier),
        settings.processing.job_deadline(),
    ));
    let intake_service = Arc::new(IntakeService::new(
        row_parser,
        Arc::clone(&job_repository),
        notifier,
        batch_processor,
    ));

    let state = AppState {
        intake_service,
        job_repository,
        max_upload_bytes: settings.server.max_upload_bytes,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
