use anyhow::Context;
use clap::Parser;
use roadchaser::{
    core::config::ClientConfig, rendering::RecordingRenderer, HttpBackend, RoadChaser,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Drives the region loader against a live backend without a map engine
#[derive(Parser, Debug, Clone)]
#[command(name = "roadchaser-app", version)]
struct Args {
    /// Backend base URL, e.g. http://localhost:8080/api
    #[arg(long)]
    api_url: Option<String>,

    /// Region token to activate after the initial region; may be repeated
    #[arg(long = "region")]
    regions: Vec<String>,

    /// JSON configuration file; environment overrides are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every renderer call and the final coverage summary
    #[arg(long, default_value_t = false)]
    headless: bool,
}

fn load_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ClientConfig::from_json_str(&json)?
        }
        None => ClientConfig::from_env()?,
    };
    if let Some(api_url) = &args.api_url {
        config = config.with_api_base(api_url.clone());
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    log::info!("using backend {}", config.api_base);
    log::info!("base map style {}", config.base_style_url);

    let backend = HttpBackend::new(&config)?;
    let mut session = RoadChaser::new(RecordingRenderer::new(), config, Arc::new(backend))?;

    session.on_map_load();
    let applied = session.settle().await;
    log::debug!("initial region settled after {} responses", applied);

    for token in &args.regions {
        session.select(token);
        let applied = session.settle().await;
        log::debug!("{} settled after {} responses", token, applied);
    }

    let loader = session.loader();
    if args.headless {
        for op in loader.renderer().ops() {
            println!("{}", op);
        }
        println!();
    }

    match loader.active_region() {
        Some(region) => println!("active region: {}", region),
        None => println!("no active region"),
    }
    println!("layers: {}", loader.active_layers().join(", "));

    if loader.panel().is_visible() {
        for (label, value) in loader.panel().summary() {
            println!("{:<24}{}", label, value);
        }
    } else {
        println!("no coverage statistics");
    }

    Ok(())
}
