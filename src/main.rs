use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sparks_onboarding::adapters::ai::provider_from_config;
use sparks_onboarding::adapters::clock::SystemClock;
use sparks_onboarding::adapters::http::{app_router, default_handlers};
use sparks_onboarding::adapters::voice::TerminalVoice;
use sparks_onboarding::application::handlers::onboarding::{OnboardingRunner, ResponseGenerator};
use sparks_onboarding::config::AppConfig;
use sparks_onboarding::domain::onboarding::{OnboardingSession, QuestionScript};
use sparks_onboarding::ports::Clock;

#[derive(Parser)]
#[command(name = "sparks-onboarding", about = "Conversational onboarding engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the onboarding HTTP API.
    Serve,

    /// Run one onboarding session on the terminal.
    Chat {
        /// Seed for the session's random choices.
        #[arg(long)]
        seed: Option<u64>,

        /// Conversation time budget in seconds (60-600).
        #[arg(long)]
        time_limit: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    let provider = provider_from_config(&config.ai).context("failed to build AI provider")?;
    let generator = ResponseGenerator::from_config(&config.ai, provider);

    match cli.command {
        Commands::Serve => serve(config, generator).await,
        Commands::Chat { seed, time_limit } => chat(config, generator, seed, time_limit).await,
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

async fn serve(config: AppConfig, generator: ResponseGenerator) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;
    let app = app_router(default_handlers(&config, generator), &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, config = ?config.snapshot(), "Onboarding API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}

async fn chat(
    config: AppConfig,
    generator: ResponseGenerator,
    seed: Option<u64>,
    time_limit: Option<u64>,
) -> anyhow::Result<()> {
    let mut policy = config.onboarding.policy();
    if let Some(secs) = time_limit {
        policy = policy.with_time_limit(secs);
    }
    let rng = match seed.or(config.onboarding.random_seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let clock = Arc::new(SystemClock);
    let mut session = OnboardingSession::start(QuestionScript::standard(), policy, rng, clock.now())?;
    let runner = OnboardingRunner::new(Arc::new(TerminalVoice::stdio()), clock, generator);

    let outcome = runner.run(&mut session).await?;
    println!("{}", serde_json::to_string_pretty(&outcome.profile)?);
    tracing::info!(reason = %outcome.reason, turns = outcome.turns, "Chat finished");
    Ok(())
}
