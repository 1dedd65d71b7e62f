use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use db::{ConnectOpts, DbHandle};
use foodgram_server::{build_router, shutdown};
use recipes::client::RecipesApi;
use recipes::model::{NewTag, NewUser};
use recipes::{RecipesConfig, RecipesModule};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const DEFAULT_DSN: &str = "sqlite://foodgram.db";

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as "sqlite::memory:".
/// - Normalizes backslashes into forward slashes.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };
    if path_str.is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }

    let mut path = PathBuf::from(path_str);
    if path.is_relative() {
        path = base_dir.join(path);
    }
    if create_dirs {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
    }

    let mut out = format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Foodgram Server - recipe sharing backend
#[derive(Parser)]
#[command(name = "foodgram-server")]
#[command(about = "Foodgram Server - recipe sharing backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
    /// Load ingredients from a `name,measurement_unit` CSV file
    ImportIngredients {
        /// CSV file to read
        path: PathBuf,
    },
    /// Create a tag
    AddTag {
        #[arg(long)]
        name: String,
        /// Hex color, e.g. #E26C2D
        #[arg(long)]
        color: String,
        #[arg(long)]
        slug: String,
    },
    /// Create a user
    AddUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (home_dir is normalized and created inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("Foodgram Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
        Commands::ImportIngredients { path } => {
            let module = open_module(&config, &args).await?;
            let csv = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let written = module.client().import_ingredients_csv(csv).await?;
            println!("Imported {written} ingredients");
            Ok(())
        }
        Commands::AddTag { name, color, slug } => {
            let module = open_module(&config, &args).await?;
            let tag = module
                .client()
                .create_tag(NewTag { name, color, slug })
                .await?;
            println!("Created tag {} ({})", tag.id, tag.slug);
            Ok(())
        }
        Commands::AddUser {
            email,
            username,
            first_name,
            last_name,
        } => {
            let module = open_module(&config, &args).await?;
            let user = module
                .client()
                .create_user(NewUser {
                    email,
                    username,
                    first_name,
                    last_name,
                })
                .await?;
            println!("Created user {} ({})", user.id, user.username);
            Ok(())
        }
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(dsn: &str) -> Result<&'static str> {
    let url = Url::parse(dsn).map_err(|e| anyhow!("Invalid database DSN '{}': {}", dsn, e))?;
    match url.scheme() {
        "sqlite" | "sqlite3" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

async fn connect_db(config: &AppConfig, args: &CliArgs) -> Result<DbHandle> {
    let db_config = config.database.clone().unwrap_or_else(|| {
        tracing::warn!("No database configuration found, using {}", DEFAULT_DSN);
        DatabaseConfig {
            url: DEFAULT_DSN.to_string(),
            max_conns: None,
            busy_timeout_ms: None,
        }
    });

    let mut dsn = if args.mock {
        "sqlite::memory:".to_string()
    } else {
        db_config.url.trim().to_owned()
    };
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    if dsn.starts_with("sqlite://") {
        dsn = absolutize_sqlite_dsn(&dsn, &config.home_dir(), true)?;
    } else if !dsn.starts_with("sqlite:") {
        detect_from_dsn(&dsn)?;
    }

    let opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms))),
        create_sqlite_dirs: true,
        ..Default::default()
    };

    tracing::info!("Connecting to database: {}", db::redact_credentials(&dsn));
    let db = DbHandle::connect(&dsn, opts).await?;
    tracing::info!("Connected DB backend: {:?}", db.engine());
    Ok(db)
}

async fn open_module(config: &AppConfig, args: &CliArgs) -> Result<RecipesModule> {
    let db = connect_db(config, args).await?;
    let conn = db.sea();
    RecipesModule::migrate(&conn).await?;
    let recipes_cfg: RecipesConfig = config.module_config("recipes")?;
    Ok(RecipesModule::new(conn, &recipes_cfg))
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");
    let module = open_module(&config, &args).await?;
    let router = build_router(&module, &config.server);

    let bind = format!("{}:{}", config.server.host, config.server.port);
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| anyhow!("Invalid bind address '{}': {}", bind, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async {
        if let Err(e) = shutdown::wait_for_shutdown().await {
            tracing::warn!("shutdown signal listener failed: {e}");
        }
        tracing::info!("HTTP server shutting down gracefully");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow!(e))
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // Surface module section errors before anything binds or connects
    let _: RecipesConfig = config.module_config("recipes")?;
    if let Some(db) = &config.database {
        if !db.url.starts_with("sqlite:") {
            detect_from_dsn(&db.url)?;
        }
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
