use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tzimage::api;
use tzimage::assets::{AssetCategory, AssetLoader};
use tzimage::models::AppConfig;
use tzimage::server;
use tzimage::services::{time_formatter, RenderService, TemplateService};

#[derive(Parser)]
#[command(name = "tzimage")]
#[command(about = "Render the current time in any timezone as a PNG image")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render the current time directly to a PNG file
    Render {
        /// IANA timezone identifier (e.g., America/New_York)
        #[arg(short, long)]
        timezone: String,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List the timezones offered by the picker page
    Zones,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "tzimage API",
        description = "Render the current time in any timezone as a PNG image",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_generate_image),
    components(schemas(tzimage::error::ErrorResponse)),
    tags((name = "Image", description = "Time image generation"))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Render { timezone, output }) => run_render_command(&timezone, &output),
        Some(Commands::Zones) => run_zones_command(),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tzimage=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Render an image directly to a PNG file (no server needed)
fn run_render_command(timezone: &str, output: &PathBuf) -> anyhow::Result<()> {
    init_cli_logging();

    let asset_loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&asset_loader);
    let templates = Arc::new(TemplateService::new()?);
    let renderer = RenderService::new(&asset_loader, &config, templates)?;

    let png_bytes = renderer
        .render_time_blocking(timezone, chrono::Utc::now())
        .map_err(|e| anyhow::anyhow!("Render error: {e}"))?;

    std::fs::write(output, &png_bytes)?;
    println!("Rendered {} ({} bytes)", output.display(), png_bytes.len());

    Ok(())
}

/// Print the configured picker timezones, flagging unknown identifiers
fn run_zones_command() -> anyhow::Result<()> {
    init_cli_logging();

    let asset_loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&asset_loader);
    let now = chrono::Utc::now();

    let width = config
        .timezones
        .iter()
        .map(|tz| tz.value.len())
        .max()
        .unwrap_or(0);

    let mut unknown = 0;
    for preset in &config.timezones {
        match time_formatter::format_time(&preset.value, now) {
            Ok(time) => println!("{:width$}  {:24}  {}", preset.value, time, preset.label),
            Err(_) => {
                unknown += 1;
                println!("{:width$}  {:24}  {}", preset.value, "(unknown timezone)", preset.label);
            }
        }
    }

    if unknown > 0 {
        anyhow::bail!("{unknown} configured timezone(s) are not in the timezone database");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let fonts_dir = std::env::var("FONTS_DIR").ok();

    println!("tzimage v{VERSION}");
    println!("The current time in any timezone, as a PNG image\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  FONTS_DIR   = {}",
        fonts_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");

    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:  {config_source}");

    let loader = AssetLoader::new(fonts_dir.clone().map(PathBuf::from), None);
    let fonts_count = loader.get_fonts().len();
    let embedded_fonts_count = AssetLoader::list_embedded(AssetCategory::Fonts).len();
    match fonts_dir {
        Some(ref path) if PathBuf::from(path).exists() => println!(
            "  Fonts:   {path} ({fonts_count} files, {embedded_fonts_count} embedded) + system fonts"
        ),
        _ => println!("  Fonts:   embedded ({embedded_fonts_count} files) + system fonts"),
    }

    println!("\nCommands:");
    println!("  tzimage serve    Start the HTTP server");
    println!("  tzimage render   Render a timezone to a PNG file");
    println!("  tzimage zones    List the picker timezones");
    println!("\nRun 'tzimage --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tzimage=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let asset_loader = Arc::new(AssetLoader::from_env());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    tracing::info!(
        fonts = ?asset_loader.fonts_dir().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        config = ?asset_loader.config_file().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "tzimage server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
