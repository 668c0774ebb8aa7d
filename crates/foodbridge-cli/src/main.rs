mod search;

use clap::{Args, Parser, Subcommand, ValueEnum};
use foodbridge_core::SearchDomain;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "foodbridge-cli")]
#[command(about = "Find food banks and grocery stores near a US postal code or coordinate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for food banks and other food-assistance locations
    FoodBanks(SearchArgs),
    /// Search for grocery stores, supermarkets and convenience stores
    GroceryStores(SearchArgs),
    /// Print the Overpass QL a search would send, without any network call
    Query {
        #[arg(long, value_enum)]
        domain: DomainArg,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in miles
        #[arg(long, default_value_t = foodbridge_locator::DEFAULT_RADIUS_MILES)]
        radius: f64,
    },
}

#[derive(Debug, Args, PartialEq)]
struct SearchArgs {
    /// US postal code (geocoded through Nominatim)
    #[arg(long)]
    zip: Option<String>,
    /// Latitude of the search center; takes precedence over --zip
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude of the search center
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
    /// Search radius in miles
    #[arg(long)]
    radius: Option<f64>,
    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DomainArg {
    FoodBanks,
    GroceryStores,
}

impl From<DomainArg> for SearchDomain {
    fn from(value: DomainArg) -> Self {
        match value {
            DomainArg::FoodBanks => SearchDomain::FoodBanks,
            DomainArg::GroceryStores => SearchDomain::GroceryStores,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = foodbridge_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::FoodBanks(args) => {
            search::run_search(&config, SearchDomain::FoodBanks, &args).await?;
        }
        Commands::GroceryStores(args) => {
            search::run_search(&config, SearchDomain::GroceryStores, &args).await?;
        }
        Commands::Query {
            domain,
            lat,
            lon,
            radius,
        } => search::run_query(&config, domain.into(), lat, lon, radius)?,
    }

    Ok(())
}
