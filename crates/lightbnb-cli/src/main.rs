use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use lightbnb_db::{DEFAULT_LIMIT, Database, QueryService, StoreConfig};
use lightbnb_types::{NewProperty, NewUser, PropertyFilters};

/// Query the LightBnB listing database and print the result as JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database file (overrides LIGHTBNB_DB_NAME)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a user by email or id
    User {
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        email: Option<String>,
        #[arg(long)]
        id: Option<i64>,
    },
    /// Register a user (the password is hashed before it is stored)
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Past reservations for a guest
    Reservations {
        #[arg(long)]
        guest_id: i64,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Search properties
    Search(SearchArgs),
    /// Create a property from a JSON document
    AddProperty {
        #[arg(long)]
        json: PathBuf,
    },
}

#[derive(Args)]
struct SearchArgs {
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    owner_id: Option<i64>,
    /// Minimum nightly cost
    #[arg(long)]
    min_price: Option<i64>,
    /// Maximum nightly cost
    #[arg(long)]
    max_price: Option<i64>,
    #[arg(long)]
    min_rating: Option<f64>,
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,
}

impl SearchArgs {
    fn filters(&self) -> PropertyFilters {
        PropertyFilters {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lightbnb=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = StoreConfig::from_env()?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    info!(database = %config.database, "Opening store");

    let db = Database::connect(&config)?;
    let service = QueryService::new(Arc::new(db));

    match cli.command {
        Command::User { email, id } => {
            let user = match (email, id) {
                (Some(email), _) => service.get_user_by_email(&email).await?,
                (None, Some(id)) => service.get_user_by_id(id).await?,
                (None, None) => return Err(anyhow!("either --email or --id is required")),
            };
            print_json(&user)
        }
        Command::AddUser {
            name,
            email,
            password,
        } => {
            let password = hash_password(&password)?;
            let user = service
                .create_user(NewUser {
                    name,
                    email,
                    password,
                })
                .await?;
            print_json(&user)
        }
        Command::Reservations { guest_id, limit } => {
            let history = service
                .get_reservations_for_guest(guest_id, Some(limit))
                .await?;
            print_json(&history)
        }
        Command::Search(args) => {
            let listings = service
                .search_properties(args.filters(), Some(args.limit))
                .await?;
            print_json(&listings)
        }
        Command::AddProperty { json } => {
            let raw = std::fs::read_to_string(&json)
                .with_context(|| format!("reading {}", json.display()))?;
            let property: NewProperty = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", json.display()))?;
            let created = service.create_property(property).await?;
            print_json(&created)
        }
    }
}

/// Argon2id, the same scheme the web login verifies against.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {}", e))?
        .to_string();
    Ok(hash)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
