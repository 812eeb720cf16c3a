use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voiceboard::ui::VoiceboardApp;
use voiceboard::SessionConfig;

fn load_config() -> Result<SessionConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("VOICEBOARD_CONFIG").ok());

    let config = match path {
        Some(path) => {
            info!("Loading config from {}", path);
            SessionConfig::load(&path).with_context(|| format!("loading {}", path))?
        }
        None => SessionConfig::default(),
    };

    let config = config.with_env().context("applying environment overrides")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voiceboard=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    info!(
        "Starting Voiceboard (skin={}, orchestrator={})",
        config.skin,
        config.orchestrator.ws_url()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 560.0])
            .with_title("Voiceboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Voiceboard",
        options,
        Box::new(|cc| Ok(Box::new(VoiceboardApp::new(cc, config)?))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
