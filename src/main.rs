use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cover_ambient::api;
use cover_ambient::models::{AppConfig, PaletteView};
use cover_ambient::server;
use cover_ambient::services::decode_cover;
use cover_palette::{AccessibilitySettings, CanvasSize, ColorScheme};

#[derive(Parser)]
#[command(name = "cover-ambient")]
#[command(about = "Ambient color and gradient backgrounds from book covers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Analyze a cover file and print the palette and gradient as JSON
    Analyze {
        /// Cover image (PNG, JPEG, GIF or WebP); genre fallback when omitted
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Book title, used for genre and pattern selection
        #[arg(short, long)]
        title: Option<String>,

        /// Book author
        #[arg(short, long)]
        author: Option<String>,

        /// Canvas width in points
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height in points
        #[arg(long)]
        height: Option<f64>,

        /// Compose for a dark host appearance
        #[arg(long)]
        dark: bool,

        /// Use the flat low-transparency composition
        #[arg(long)]
        reduce_transparency: bool,

        /// Also print orb positions at this animation phase (radians)
        #[arg(long)]
        phase: Option<f64>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cover Ambient API",
        description = "Ambient color and gradient backgrounds from book covers",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_extract,
        api::handle_current,
        api::handle_genre,
    ),
    components(schemas(
        cover_ambient::models::AmbientRequest,
        cover_ambient::models::AmbientResponse,
        cover_ambient::models::CanvasRequest,
        cover_ambient::models::GenreResponse,
        cover_ambient::models::PaletteView,
    )),
    tags(
        (name = "Ambient", description = "Cover extraction and committed state"),
        (name = "Genre", description = "Title/author classification")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            image,
            title,
            author,
            width,
            height,
            dark,
            reduce_transparency,
            phase,
        }) => run_analyze_command(
            image,
            title.as_deref(),
            author.as_deref(),
            (width, height),
            dark,
            reduce_transparency,
            phase,
        ),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Analyze a cover directly (no server needed)
fn run_analyze_command(
    image: Option<PathBuf>,
    title: Option<&str>,
    author: Option<&str>,
    (width, height): (Option<f64>, Option<f64>),
    dark: bool,
    reduce_transparency: bool,
    phase: Option<f64>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cover_ambient=warn,cover_palette=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    let analyzer = config.analyzer();

    let analysis = match image {
        Some(path) => {
            let bytes = std::fs::read(&path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
            analyzer.analyze_decoded(decode_cover(&bytes), title, author)
        }
        None => analyzer.analyze(None, title, author),
    };

    let default_canvas = config.default_canvas();
    let canvas = CanvasSize::new(
        width.unwrap_or(default_canvas.width),
        height.unwrap_or(default_canvas.height),
    );
    let scheme = if dark {
        ColorScheme::Dark
    } else {
        ColorScheme::Light
    };
    let accessibility = AccessibilitySettings {
        reduce_transparency,
        ..Default::default()
    };

    let gradient = analyzer.render_spec(&analysis, canvas, accessibility, scheme);

    let mut output = serde_json::json!({
        "genre": analysis.genre,
        "pattern": analysis.pattern,
        "fallback": analysis.is_fallback(),
        "profile": analysis.profile,
        "palette": PaletteView::from(&analysis.palette),
        "gradient": gradient,
    });
    if let Some(phase) = phase {
        output["animated_orbs"] = serde_json::to_value(gradient.at_phase(phase))?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    // Header
    println!("Cover Ambient v{VERSION}");
    println!("Ambient color and gradient backgrounds from book covers\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    // Config source
    let config_source = match config_file {
        Some(ref path) if PathBuf::from(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig: {config_source}");

    // Commands section
    println!("\nCommands:");
    println!("  cover-ambient serve     Start the HTTP server");
    println!("  cover-ambient analyze   Analyze a cover file and print JSON");
    println!("\nRun 'cover-ambient --help' for more details.");
}

async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cover_ambient=debug,cover_palette=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();

    tracing::info!(
        max_dimension = config.sampling.max_dimension,
        stride = config.sampling.stride,
        cache_entries = config.cache.max_entries,
        fetch_timeout_secs = config.fetch.timeout_secs,
        "Configuration loaded"
    );

    // Create application state using shared server module
    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Cover ambient server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
