//! CLI administration tool for link-resolver.
//!
//! Inspects the store and runs the same checks the server runs, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Probe a URL the way link creation does
//! cargo run --bin admin -- probe https://example.com/
//!
//! # Show what a key resolves to
//! cargo run --bin admin -- resolve f684a3c4 --revalidate
//!
//! # Show the key a URL would get
//! cargo run --bin admin -- key https://example.com/
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `stats`, `resolve` and `db`): PostgreSQL connection string
//! - `PROBE_TIMEOUT_SECS` (optional): per-attempt probe timeout, default 5

use link_resolver::application::services::{MetricsService, ResolutionPolicy, ResolutionService};
use link_resolver::domain::services::{IdentifierService, ReachabilityValidator};
use link_resolver::infrastructure::identifier::HashIdentifierService;
use link_resolver::infrastructure::persistence::{PgClickRepository, PgMappingRepository};
use link_resolver::infrastructure::task_pool::{TaskPool, TaskPoolConfig};
use link_resolver::infrastructure::validation::HttpReachabilityValidator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// CLI tool for inspecting link-resolver.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Probe a URL for reachability with the server's retry policy
    Probe {
        url: String,
    },

    /// Resolve a key to its target
    Resolve {
        key: String,

        /// Probe the stored target as well
        #[arg(long)]
        revalidate: bool,
    },

    /// Print the key derived for a URL
    Key {
        url: String,

        /// Custom word to use instead of the URL digest
        #[arg(long, default_value = "")]
        custom_word: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database diagnostic subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Test database connection
    Check,

    /// Show database information
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Probe { url } => handle_probe(&url).await,
        Commands::Key { url, custom_word } => {
            handle_key(&url, &custom_word);
            Ok(())
        }
        Commands::Stats => handle_stats(connect().await?).await,
        Commands::Resolve { key, revalidate } => {
            handle_resolve(connect().await?, &key, revalidate).await
        }
        Commands::Db { action } => handle_db_action(action, &connect().await?).await,
    }
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn validator() -> Result<HttpReachabilityValidator> {
    let timeout = std::env::var("PROBE_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);

    HttpReachabilityValidator::new(Duration::from_secs(timeout))
        .context("Failed to build HTTP client")
}

/// Displays mapping and click counts.
async fn handle_stats(pool: PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool);
    let metrics = MetricsService::new(
        Arc::new(PgMappingRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool.clone())),
    );
    let snapshot = metrics
        .snapshot()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read counters: {}", e))?;

    let interstitial: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE interstitial_enabled")
            .fetch_one(pool.as_ref())
            .await?;

    println!(
        "  Links:         {}",
        snapshot.urls_shortened.to_string().bright_green().bold()
    );
    println!(
        "  Interstitial:  {}",
        interstitial.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        snapshot
            .redirections_executed
            .to_string()
            .bright_green()
            .bold()
    );
    println!();

    Ok(())
}

/// Runs the creation-time reachability check against `url`.
async fn handle_probe(url: &str) -> Result<()> {
    let validator = validator()?;

    let policy = validator.retry_policy();

    println!("{} {}", "🔍 Probing".bright_blue(), url.cyan());
    println!(
        "  {}",
        format!(
            "up to {} attempts, {}s apart",
            policy.attempts,
            policy.interval.as_secs_f64()
        )
        .bright_black()
    );

    if !validator.is_syntactically_valid(url) {
        println!(
            "{}",
            "❌ Not an http(s) URL, creation would fail with InvalidUrl"
                .red()
                .bold()
        );
        return Ok(());
    }

    let started = Instant::now();
    let reachable = validator.is_reachable(url).await;
    let elapsed = format!("{:.1}s", started.elapsed().as_secs_f64());

    if reachable {
        println!(
            "{} {}",
            "✅ Reachable".green().bold(),
            elapsed.bright_black()
        );
    } else {
        println!(
            "{} {}",
            "❌ Not reachable after retries".red().bold(),
            elapsed.bright_black()
        );
    }

    Ok(())
}

/// Resolves `key` against the database.
async fn handle_resolve(pool: PgPool, key: &str, revalidate: bool) -> Result<()> {
    let mappings = Arc::new(PgMappingRepository::new(Arc::new(pool)));
    let policy = if revalidate {
        ResolutionPolicy::Revalidate
    } else {
        ResolutionPolicy::StoredOnly
    };

    let service = ResolutionService::new(
        mappings,
        Arc::new(validator()?),
        TaskPool::new(TaskPoolConfig {
            workers: 1,
            queue_capacity: 1,
        }),
        policy,
    );

    match service.resolve(key).await {
        Ok(resolution) => {
            println!("  Key:      {}", key.cyan());
            println!("  Policy:   {}", format!("{:?}", service.policy()).bright_black());
            println!("  Target:   {}", resolution.target.bright_white());
            println!(
                "  Redirect: {}",
                resolution.redirect_mode.status_code().to_string().yellow()
            );
            println!(
                "  Delivery: {}",
                if resolution.interstitial {
                    "interstitial".magenta()
                } else {
                    "direct".green()
                }
            );
            if let Ok(qr) = service.is_qr_enabled(key).await {
                println!("  QR:       {}", if qr { "yes".green() } else { "no".bright_black() });
            }
        }
        Err(e) => println!("{} {}", "❌".red(), e.to_string().red()),
    }

    Ok(())
}

fn handle_key(url: &str, custom_word: &str) {
    let key = HashIdentifierService.derive_key(url, custom_word);
    println!("{}", key.bright_yellow().bold());
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());
            sqlx::query("SELECT 1").fetch_one(pool).await?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let size: String =
                sqlx::query_scalar("SELECT pg_size_pretty(pg_database_size(current_database()))")
                    .fetch_one(pool)
                    .await?;
            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  Version:    {}", version.bright_black());
            println!("  Size:       {}", size.cyan());
            println!("  Migrations: {}", migrations.to_string().cyan());
            println!();
        }
    }

    Ok(())
}
