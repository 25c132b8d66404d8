//! Wiring & DI. Entry point: bootstrap adapters, mount the page, run the front-end.
//! No business logic here.

use dotenv::dotenv;
use email_triage::adapters::clipboard::Osc52Clipboard;
use email_triage::adapters::http::{AnalyzeClient, DemoAnalyzer};
use email_triage::adapters::ui::tui::TuiInputPort;
use email_triage::ports::{AnalyzePort, ClipboardPort, InputPort};
use email_triage::shared::config::AppConfig;
use email_triage::usecases::{Page, PageElements};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "invalid configuration, using defaults");
            AppConfig::default()
        }
    };

    email_triage::adapters::ui::init_ui();

    // --- Transport: real endpoint or offline demo ---
    let analyzer: Arc<dyn AnalyzePort> = if cfg.is_demo() {
        warn!("EMAIL_TRIAGE_DEMO set, using offline demo analyzer");
        Arc::new(DemoAnalyzer::new())
    } else {
        let endpoint = cfg.endpoint_or_default();
        info!(url = %endpoint, "analysis endpoint");
        Arc::new(AnalyzeClient::new(endpoint))
    };
    let clipboard: Arc<dyn ClipboardPort> = Arc::new(Osc52Clipboard::new());

    // --- Page: missing host elements abort setup ---
    let page = Page::mount(
        &PageElements::standard(),
        analyzer,
        clipboard,
        cfg.page_settings(),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(page));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
