//! Foodshare CLI entry point.
//!
//! Mirrors the dashboard menu: home overview, data exploration, SQL analysis
//! and CRUD operations on food listings. Each invocation runs one statement.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

use foodshare::application::clock::parse_instant;
use foodshare::application::{AnalysisQuery, DataTable, EvaluationClock, Exploration, table_counts};
use foodshare::domain::{FoodId, FoodType, MealType, NewFoodListing, ProviderId};
use foodshare::infra::app_config::{self, AppConfig};
use foodshare::infra::cli::render::{OutputFormat, render, render_json};
use foodshare::infra::db::Database;

#[derive(Parser, Debug)]
#[command(name = "foodshare")]
#[command(version)]
#[command(about = "Local food wastage management dashboard", long_about = None)]
struct Args {
    /// SQLite database file (overrides $FOODSHARE_DB_PATH and the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Evaluate date-relative queries at this instant instead of now
    #[arg(long, global = true, value_parser = parse_instant)]
    as_of: Option<NaiveDateTime>,

    /// Output format: aligned text or JSON
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Project overview and table sizes
    Home,

    /// Show the rows of one table
    Explore {
        /// providers, receivers, food-listings or claims
        table: DataTable,

        /// Only listings at this location (food-listings only)
        #[arg(long)]
        location: Option<String>,
    },

    /// List the distinct food listing locations
    Locations,

    /// Run one of the canned analysis queries
    Analyze {
        /// Menu number, slug or label of the query
        #[arg(required_unless_present = "list")]
        query: Option<AnalysisQuery>,

        /// Print the query menu instead of running a query
        #[arg(long)]
        list: bool,
    },

    /// List food listing ids and names
    Listings,

    /// Add a food listing
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        expiry: NaiveDate,

        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        provider_id: ProviderId,

        #[arg(long)]
        provider_type: String,

        #[arg(long)]
        location: String,

        /// Vegetarian, Non-Vegetarian or Vegan
        #[arg(long)]
        food_type: FoodType,

        /// Breakfast, Lunch, Dinner or Snacks
        #[arg(long)]
        meal_type: MealType,
    },

    /// Change the quantity and name of a food listing
    Update {
        id: FoodId,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        #[arg(long)]
        name: String,
    },

    /// Delete a food listing
    Delete { id: FoodId },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = app_config::load_config().context("Failed to load configuration")?;
    init_logging(&config);

    let db_path = app_config::resolve_database_path(args.db.as_deref(), &config);
    let db = Database::open_at(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let clock = match args.as_of {
        Some(at) => EvaluationClock::Fixed(at),
        None => EvaluationClock::System(config.timezone),
    };

    run(&db, args.command, clock, args.format, &mut std::io::stdout().lock())?;

    db.close().context("Failed to close database")
}

fn init_logging(config: &AppConfig) {
    let default_filter = config.log_level.as_deref().unwrap_or("warn");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(
    db: &Database,
    command: Commands,
    clock: EvaluationClock,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Home => {
            let counts = table_counts(db)?;
            if format == OutputFormat::Json {
                let tables: serde_json::Map<String, serde_json::Value> = counts
                    .iter()
                    .map(|(table, count)| (table.table_name().to_string(), json!(count)))
                    .collect();
                let overview = json!({
                    "database": db.path().map(|p| p.display().to_string()),
                    "tables": tables,
                });
                write!(out, "{}", render_json(&overview)?)?;
                return Ok(());
            }
            writeln!(out, "Local Food Wastage Management System")?;
            writeln!(out)?;
            writeln!(out, "Connects surplus food providers with receivers to reduce food wastage.")?;
            writeln!(out, "Explore the data, run SQL analysis queries, and manage food listings.")?;
            writeln!(out)?;
            if let Some(path) = db.path() {
                writeln!(out, "Database: {}", path.display())?;
            }
            for (table, count) in counts {
                writeln!(out, "  {:<14} {count}", table.table_name())?;
            }
        }
        Commands::Explore { table, location } => {
            let exploration = Exploration::new(table, location)?;
            let result = exploration.run(db)?;
            write!(out, "{}", render(&result, format)?)?;
        }
        Commands::Locations => {
            let locations = db.listing_repo().distinct_locations()?;
            if format == OutputFormat::Json {
                write!(out, "{}", render_json(&locations)?)?;
                return Ok(());
            }
            for location in locations {
                writeln!(out, "{location}")?;
            }
        }
        Commands::Analyze { list: true, .. } => {
            if format == OutputFormat::Json {
                let menu: Vec<_> = AnalysisQuery::ALL
                    .iter()
                    .map(|q| json!({ "number": q.number(), "label": q.label(), "slug": q.slug() }))
                    .collect();
                write!(out, "{}", render_json(&menu)?)?;
                return Ok(());
            }
            for query in AnalysisQuery::ALL {
                writeln!(out, "{:>2}. {:<42} {}", query.number(), query.label(), query.slug())?;
            }
        }
        Commands::Analyze { query, .. } => {
            let query = query.context("No analysis query selected")?;
            let now = clock.now();
            log::info!("Running \"{query}\" at {now}");
            let result = query
                .run(db, now)
                .with_context(|| format!("Failed to run \"{query}\""))?;
            if format == OutputFormat::Table {
                writeln!(out, "{query}")?;
            }
            write!(out, "{}", render(&result, format)?)?;
        }
        Commands::Listings => {
            if format == OutputFormat::Json {
                let listings = db.listing_repo().list_all()?;
                write!(out, "{}", render_json(&listings)?)?;
                return Ok(());
            }
            for (id, name) in db.listing_repo().list_choices()? {
                writeln!(out, "{id:>6}  {name}")?;
            }
        }
        Commands::Add {
            name,
            quantity,
            expiry,
            provider_id,
            provider_type,
            location,
            food_type,
            meal_type,
        } => {
            let listing = NewFoodListing {
                name,
                quantity,
                expiry_date: expiry,
                provider_id,
                provider_type,
                location,
                food_type,
                meal_type,
            };
            let id = db
                .listing_repo()
                .add(&listing)
                .with_context(|| format!("Failed to add food listing \"{}\"", listing.name))?;
            if format == OutputFormat::Json {
                write!(out, "{}", render_json(&listing.into_listing(id))?)?;
            } else {
                writeln!(out, "Food listing added successfully (Food_ID {id}).")?;
            }
        }
        Commands::Update { id, quantity, name } => {
            let updated = db
                .listing_repo()
                .update_quantity_and_name(id, quantity, &name)
                .with_context(|| format!("Failed to update Food_ID {id}"))?;
            if updated == 0 {
                log::warn!("No food listing with Food_ID {id}");
            }
            report_mutation(out, format, id, "updated", updated)?;
        }
        Commands::Delete { id } => {
            let deleted = db
                .listing_repo()
                .delete(id)
                .with_context(|| format!("Failed to delete Food_ID {id}"))?;
            report_mutation(out, format, id, "deleted", deleted)?;
        }
    }
    Ok(())
}

fn report_mutation(
    out: &mut impl Write,
    format: OutputFormat,
    id: FoodId,
    action: &str,
    affected: usize,
) -> Result<()> {
    match (format, affected) {
        (OutputFormat::Json, _) => write!(
            out,
            "{}",
            render_json(&json!({ "food_id": id, "action": action, "affected": affected }))?
        )?,
        (OutputFormat::Table, 0) => {
            writeln!(out, "No food listing with Food_ID {id}; nothing {action}.")?
        }
        (OutputFormat::Table, _) => writeln!(out, "Food listing {action} successfully.")?,
    }
    Ok(())
}
