//! CLI administration tool for snaplink.
//!
//! Works directly against the configured storage, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/very/long --alias promo --expires-in-days 30
//!
//! # List links, newest first
//! cargo run --bin admin -- list --page 2 --page-size 50
//!
//! # Show analytics for a code
//! cargo run --bin admin -- stats promo
//!
//! # Deactivate a code
//! cargo run --bin admin -- deactivate promo
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `snaplink::config`.

use snaplink::application::services::SharedRegistry;
use snaplink::config::{self, Config};
use snaplink::domain::repositories::{DimensionCount, SortOrder, VisitQuery};
use snaplink::prelude::{CreateLink, Expiry};
use snaplink::server::build_registry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;

/// Number of recent visits printed by `stats`.
const RECENT_VISITS: usize = 10;

/// CLI tool for managing snaplink.
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
    /// Create a short link
    Shorten {
        /// URL to shorten (http or https)
        url: String,

        /// Custom alias instead of a generated code
        #[arg(short, long)]
        alias: Option<String>,

        /// Expire the link after this many days (1-365)
        #[arg(short, long)]
        expires_in_days: Option<i64>,
    },

    /// List links, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 25)]
        page_size: i64,
    },

    /// Show analytics for a short code
    Stats {
        code: String,
    },

    /// Deactivate a short code permanently
    Deactivate {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Shorten {
            url,
            alias,
            expires_in_days,
        } => {
            let registry = build_registry(&config).await?;
            shorten(&registry, url, alias, expires_in_days).await?
        }
        Commands::List { page, page_size } => {
            let registry = build_registry(&config).await?;
            list(&registry, page, page_size).await?
        }
        Commands::Stats { code } => {
            let registry = build_registry(&config).await?;
            stats(&registry, &code).await?
        }
        Commands::Deactivate { code, yes } => {
            let registry = build_registry(&config).await?;
            deactivate(&registry, &code, yes).await?
        }
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn shorten(
    registry: &SharedRegistry,
    url: String,
    alias: Option<String>,
    expires_in_days: Option<i64>,
) -> Result<()> {
    let mut request = CreateLink::new(url);
    if let Some(alias) = alias {
        request = request.with_alias(alias);
    }
    if let Some(days) = expires_in_days {
        request = request.with_expiry(Expiry::InDays(days));
    }

    let link = registry
        .create(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!(
        "  Short URL: {}",
        registry.short_url(&link.short_code).bright_yellow().bold()
    );
    println!("  Target:    {}", link.original_url.cyan());
    match link.expires_at {
        Some(at) => println!("  Expires:   {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("  Expires:   {}", "never".bright_black()),
    }
    println!();

    Ok(())
}

/// Prints one page of links.
///
/// # Output Format
///
/// ```text
/// 📋 Links (page 1, 2 of 2)
///
///   Code         Created           Status    Target
///   ──────────────────────────────────────────────────────────────
///   promo        2026-01-15 10:30  ACTIVE    https://example.com
///   x7Kp2Q       2026-01-14 09:12  INACTIVE  https://example.org
/// ```
async fn list(registry: &SharedRegistry, page: i64, page_size: i64) -> Result<()> {
    if page < 1 {
        anyhow::bail!("--page must be at least 1");
    }

    let offset = (page - 1).saturating_mul(page_size.max(1));
    let (links, total) = tokio::try_join!(registry.list(offset, page_size), registry.count())
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    println!(
        "{}",
        format!("📋 Links (page {}, {} of {})", page, links.len(), total)
            .bright_blue()
            .bold()
    );
    println!();

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<17} {:<9} {}",
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let status = if link.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };

        println!(
            "  {:<12} {:<17} {:<9} {}",
            link.short_code.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status,
            link.original_url
        );
    }
    println!();

    Ok(())
}

async fn stats(registry: &SharedRegistry, code: &str) -> Result<()> {
    let query = VisitQuery::all()
        .paged(0, RECENT_VISITS as i64)
        .with_order(SortOrder::Descending);

    let stats = registry
        .stats(code, query)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load stats: {}", e))?;

    println!("{}", format!("📊 Statistics for {}", code).bright_blue().bold());
    println!();
    println!("  Target:  {}", stats.link.original_url.cyan());
    println!(
        "  Status:  {}",
        if stats.link.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        }
    );
    println!(
        "  Clicks:  {}",
        stats.total_clicks.to_string().bright_green().bold()
    );
    println!();

    print_breakdown("Top referers", &stats.top_referers);
    print_breakdown("Top user agents", &stats.top_user_agents);

    if !stats.visits.is_empty() {
        println!("  {}", "Recent visits".bright_white().bold());
        for visit in &stats.visits {
            println!(
                "    {}  {}",
                visit.visited_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black(),
                visit.ip_address.as_deref().unwrap_or("-")
            );
        }
        println!();
    }

    Ok(())
}

fn print_breakdown(title: &str, groups: &[DimensionCount]) {
    if groups.is_empty() {
        return;
    }

    println!("  {}", title.bright_white().bold());
    for group in groups {
        println!(
            "    {:>6}  {}",
            group.count.to_string().bright_green(),
            group.value.as_deref().unwrap_or("(none)")
        );
    }
    println!();
}

/// Deactivates a link after confirmation (default: No).
async fn deactivate(registry: &SharedRegistry, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔒 Deactivate short link".bright_blue().bold());
    println!();

    let link = registry
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to find link: {}", e))?;

    if !link.is_active {
        println!("{}", "⚠️  This link is already inactive".yellow());
        return Ok(());
    }

    println!("  Code:   {}", link.short_code.cyan());
    println!("  Target: {}", link.original_url);
    println!();
    println!(
        "{}",
        "The code will never be reissued and redirects will return 410 Gone.".yellow()
    );

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    registry
        .deactivate(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate link: {}", e))?;

    println!();
    println!("{}", "✅ Link deactivated".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set (STORAGE_BACKEND=postgres)")?;

            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = PgPool::connect(url)
                .await
                .context("Failed to connect to database")?;
            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
