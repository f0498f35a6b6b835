//! `site-content`: print a tenant's normalized content as JSON.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use site_content::config::resolve_config_with;
use site_content::observability::logging::init_logging;
use site_content::services::{ServiceQuery, WidgetKind};
use site_content::{ContentApi, Scope};

#[derive(Parser)]
#[command(name = "site-content")]
#[command(about = "Fetch and normalize website content from the content backend", long_about = None)]
struct Cli {
    /// TOML config file; SITE_* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    base_url: Option<String>,

    #[arg(short, long)]
    tenant: Option<String>,

    #[arg(short, long)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List services
    Services {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one service by id or slug
    Service { id_or_slug: String },
    /// List navigation menus
    Menus {
        #[arg(long)]
        location: Option<String>,
    },
    /// List hero slides
    Sliders,
    /// List contact forms
    Forms,
    /// List enabled languages
    Languages,
    /// Show settings for the given categories (default set when empty)
    Settings { categories: Vec<String> },
    /// Show a widget (whatsapp, ratings, service-highlights)
    Widget { kind: WidgetKind },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let base_url = cli.base_url;
    let config = resolve_config_with(cli.config.as_deref(), |config| {
        if let Some(url) = base_url {
            config.api_base_url = url;
        }
    })?;
    init_logging(&config.log_level);

    tracing::info!(
        api_base_url = %config.api_base_url,
        tenant = ?cli.tenant.as_deref().or(config.tenant_id.as_deref()),
        "site-content v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let api = ContentApi::from_config(&config)?;
    let scope = api.scope(cli.tenant.as_deref(), cli.locale.as_deref());

    run(&api, &scope, cli.command).await
}

async fn run(api: &ContentApi, scope: &Scope, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Services { page, per_page, city, category } => {
            let query = ServiceQuery { page, per_page, city, category };
            print_json(&api.fetch_services(scope, &query).await?)
        }
        Commands::Service { id_or_slug } => print_json(&api.fetch_service(scope, &id_or_slug).await?),
        Commands::Menus { location } => print_json(&api.fetch_menus(scope, location.as_deref()).await?),
        Commands::Sliders => print_json(&api.fetch_sliders(scope).await?),
        Commands::Forms => print_json(&api.fetch_contact_forms(scope).await?),
        Commands::Languages => print_json(&api.fetch_languages(scope).await?),
        Commands::Settings { categories } => {
            let categories = if categories.is_empty() {
                site_content::services::DEFAULT_SETTINGS_CATEGORIES
                    .iter()
                    .map(|c| c.to_string())
                    .collect()
            } else {
                categories
            };
            print_json(&api.fetch_all_settings(scope, &categories).await?)
        }
        Commands::Widget { kind } => print_json(&api.fetch_widget(scope, kind).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
