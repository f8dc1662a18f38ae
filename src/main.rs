use std::sync::Arc;

use anyhow::Context;

use ai_photobooth::assets::S3AssetStorage;
use ai_photobooth::config::{MailRelayConfig, WorkerConfig};
use ai_photobooth::faceswap::ReactorClient;
use ai_photobooth::handler::{self, DEFAULT_LOCAL_ID};
use ai_photobooth::mail::{MailRelay, SesRelay, SmtpRelay};
use ai_photobooth::pipeline::{PhotoPipeline, PipelineDeps, PipelineSettings};
use ai_photobooth::queue::SqsAcknowledger;
use ai_photobooth::store::DynamoMetadataStore;
use ai_photobooth::templates::TemplateCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // lettre's SMTP transport needs a process-wide rustls provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    let config = match WorkerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        table = %config.table_name,
        bucket = %config.bucket_name,
        faceswap = %format!("{}:{}", config.faceswap_host, config.faceswap_port),
        acknowledge = config.acknowledge,
        templates = %config.template_dir.display(),
        "AI Photobooth worker starting"
    );

    // ── AWS clients ──────────────────────────────────────────────────────
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let relay: Arc<dyn MailRelay> = match &config.mail_relay {
        MailRelayConfig::Ses => Arc::new(SesRelay::new(aws_sdk_ses::Client::new(&sdk_config))),
        MailRelayConfig::Smtp(smtp) => Arc::new(SmtpRelay::new(smtp.clone())),
    };
    tracing::info!(relay = relay.name(), "Mail relay configured");

    let deps = PipelineDeps {
        metadata: Arc::new(DynamoMetadataStore::new(
            aws_sdk_dynamodb::Client::new(&sdk_config),
            config.table_name.clone(),
        )),
        assets: Arc::new(S3AssetStorage::new(
            aws_sdk_s3::Client::new(&sdk_config),
            config.bucket_name.clone(),
        )),
        swapper: Arc::new(ReactorClient::new(
            &config.faceswap_host,
            config.faceswap_port,
        )),
        relay,
        queue: Arc::new(SqsAcknowledger::new(
            aws_sdk_sqs::Client::new(&sdk_config),
            config.queue_url.clone(),
        )),
    };

    let settings = PipelineSettings {
        email_from: config.email_from.clone(),
        acknowledge: config.acknowledge,
        templates: TemplateCatalog::new(config.template_dir.clone()),
    };
    let pipeline = Arc::new(PhotoPipeline::new(deps, settings));

    if std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some() {
        handler::run_lambda(pipeline)
            .await
            .map_err(|e| anyhow::anyhow!(e))
            .context("Lambda runtime exited with an error")?;
    } else {
        let work_item =
            std::env::var("METADATA_ID").unwrap_or_else(|_| DEFAULT_LOCAL_ID.to_string());
        let report = handler::run_local(&pipeline, &work_item).await;
        tracing::info!(
            report = %serde_json::to_string(&report).context("Failed to serialize report")?,
            "Local run finished"
        );
    }

    Ok(())
}
