//! unisite CLI
//!
//! Lists, shows and checks site content from the terminal.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use unisite::{
    error::{AppError, Result},
    locale::{Locale, LocaleState},
    models::{Config, Endpoint, Record, decode_detail, decode_listing},
    pipeline::{self, ListRequest},
    services::{LocalizedFieldResolver, field_families},
    sources::{ContentSource, FixtureSource, HttpSource},
    storage::PreferenceStore,
    utils::{self, url},
};

/// unisite - University site content client
#[derive(Parser, Debug)]
#[command(
    name = "unisite",
    version,
    about = "Fetch and localize university site content"
)]
struct Cli {
    /// Directory holding config.toml and the preference file
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Config file (default: {data_dir}/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Display language for this run (ru, kg/ky, en)
    #[arg(short, long)]
    lang: Option<String>,

    /// Read listings from a fixture directory instead of the backend
    #[arg(long)]
    fixtures: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of an endpoint
    List {
        /// Endpoint key, e.g. announcements
        endpoint: Endpoint,

        /// Only show this category ("all" for every category)
        #[arg(long, default_value = "all")]
        category: String,

        /// One-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show one record with every localized field
    Show {
        endpoint: Endpoint,
        id: String,
    },

    /// Probe endpoints and report loaded, empty or failed
    Check {
        /// Endpoints to probe (default: all)
        #[arg(short, long)]
        endpoint: Vec<Endpoint>,
    },

    /// Save live listings as fixtures
    Snapshot {
        /// Output directory (default: {data_dir}/fixtures)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Endpoints to save (default: all)
        #[arg(short, long)]
        endpoint: Vec<Endpoint>,

        /// Locales to save (default: all)
        #[arg(long = "locale")]
        locales: Vec<Locale>,
    },

    /// Resolve localized fields of records in a JSON file
    Resolve {
        file: PathBuf,

        /// Field base names (default: every localized family found)
        #[arg(short, long)]
        field: Vec<String>,
    },

    /// Show or change the persisted display language
    Lang {
        /// New language to persist
        #[arg(long)]
        set: Option<Locale>,
    },

    /// List endpoints and their effective URLs
    Endpoints,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (_, true) => "warn",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Open the fixture directory or the HTTP backend.
fn open_source(cli: &Cli, config: &Config) -> Result<Box<dyn ContentSource>> {
    Ok(match &cli.fixtures {
        Some(dir) => {
            log::info!("Using fixtures from {}", dir.display());
            Box::new(FixtureSource::new(dir))
        }
        None => Box::new(HttpSource::new(config)?),
    })
}

fn preference_store(data_dir: &Path, config: &Config) -> PreferenceStore {
    PreferenceStore::new(data_dir.join(&config.locale.preference_file))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("config.toml"));
    let config = Config::load_or_default(&config_path);
    utils::log::init(&config.logging, cli.quiet);
    log::debug!("Loaded configuration from {}", config_path.display());

    let prefs = preference_store(&cli.data_dir, &config);
    let persisted = prefs.load_or_default().await.locale;
    let state = LocaleState::from_tags(cli.lang.as_deref(), persisted, config.locale.default);
    let resolver = LocalizedFieldResolver::from_config(&config.locale);

    match &cli.command {
        Command::List {
            endpoint,
            category,
            page,
        } => {
            let source = open_source(&cli, &config)?;
            let request = ListRequest {
                endpoint: *endpoint,
                locale: state.get(),
                category: category.parse().unwrap_or_default(),
                page: *page,
            };
            let report =
                pipeline::build_list(source.as_ref(), &resolver, &config.listing, &request).await?;
            pipeline::print_list(&report);
        }

        Command::Show { endpoint, id } => {
            let source = open_source(&cli, &config)?;
            let report =
                pipeline::build_detail(source.as_ref(), &resolver, *endpoint, id, state.get())
                    .await?;
            pipeline::print_detail(&report);
        }

        Command::Check { endpoint } => {
            let source = open_source(&cli, &config)?;
            let endpoints = if endpoint.is_empty() {
                Endpoint::ALL.to_vec()
            } else {
                endpoint.clone()
            };
            let checks = pipeline::check_all(
                source.as_ref(),
                &endpoints,
                state.get(),
                config.api.max_concurrent,
            )
            .await;
            let failed = pipeline::print_checks(source.name(), &checks);
            if failed > 0 {
                return Err(AppError::validation(format!(
                    "{failed} of {} endpoints failed",
                    checks.len()
                )));
            }
        }

        Command::Snapshot {
            out,
            endpoint,
            locales,
        } => {
            let source = open_source(&cli, &config)?;
            let target =
                FixtureSource::new(out.clone().unwrap_or_else(|| cli.data_dir.join("fixtures")));
            let endpoints = if endpoint.is_empty() {
                Endpoint::ALL.to_vec()
            } else {
                endpoint.clone()
            };
            let locales = if locales.is_empty() {
                Locale::ALL.to_vec()
            } else {
                locales.clone()
            };
            pipeline::run_snapshot(
                source.as_ref(),
                &target,
                &endpoints,
                &locales,
                config.api.max_concurrent,
            )
            .await?;
        }

        Command::Resolve { file, field } => {
            let body = tokio::fs::read(file).await?;
            let name = file.display().to_string();
            let records = match decode_listing(&name, &body) {
                Ok(records) => records,
                Err(_) => vec![decode_detail(&name, &body)?],
            };
            let locale = state.get();

            for (n, record) in records.iter().enumerate() {
                utils::log::header(&format!(
                    "{} #{} [{}]",
                    name,
                    record.id().unwrap_or_else(|| (n + 1).to_string()),
                    locale
                ));
                for (family, text) in resolve_fields(&resolver, record, field, locale) {
                    utils::log::info(&format!("{family}: {text:?}"));
                }
            }
        }

        Command::Lang { set } => match set {
            Some(locale) => {
                let previous = state.set(*locale);
                prefs.save_locale(*locale).await?;
                utils::log::success(&format!(
                    "Language {} → {} (saved to {})",
                    previous,
                    locale,
                    prefs.path().display()
                ));
            }
            None => {
                let active = state.get();
                let order: Vec<String> = resolver
                    .chain()
                    .order_for(active)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                utils::log::info(&format!("Active language: {active}"));
                utils::log::sub_item(&format!(
                    "Persisted: {}",
                    persisted.map_or_else(|| "none".to_string(), |l| l.to_string())
                ));
                utils::log::sub_item(&format!("Fallback order: {}", order.join(" → ")));
            }
        },

        Command::Endpoints => {
            utils::log::header(&format!("Endpoints at {}", config.api.base_url));
            for endpoint in Endpoint::ALL {
                let path = config.endpoint_path(endpoint);
                let target = url::join_endpoint(&config.api.base_url, path)?;
                utils::log::info(&format!("{endpoint:<22} {target}"));
                utils::log::sub_item(&format!(
                    "category: {} · fields: {}",
                    endpoint.category_key(),
                    endpoint.display_fields().join(", ")
                ));
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({})", config_path.display());
        }
    }

    Ok(())
}

/// Resolve the requested fields, or every family present when none are named.
fn resolve_fields(
    resolver: &LocalizedFieldResolver,
    record: &Record,
    fields: &[String],
    locale: Locale,
) -> Vec<(String, String)> {
    let names: Vec<String> = if fields.is_empty() {
        field_families(record).into_iter().collect()
    } else {
        fields.to_vec()
    };

    names
        .into_iter()
        .map(|name| {
            let text = if name == "full_name" {
                resolver.full_name(record, locale)
            } else {
                resolver.resolve(record, &name, locale)
            };
            (name, text)
        })
        .collect()
}
