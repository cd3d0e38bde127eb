use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use property_listings::error::AppError;
use property_listings::listings::{dataset, filter_listings, ListingQuery};

use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Property Listings API",
    about = "Browse, filter, and administer real-estate property listings over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run a filter against the dataset and print the page as JSON
    Query(QueryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct QueryArgs {
    /// Case-insensitive substring match on the listing location
    #[arg(long)]
    location: Option<String>,
    /// Property type matched against the first status tag (e.g. House)
    #[arg(long = "type")]
    property_type: Option<String>,
    /// Rental type matched against the second status tag (e.g. "For Rent")
    #[arg(long)]
    rental_type: Option<String>,
    /// Inclusive lower price bound
    #[arg(long)]
    min_price: Option<u64>,
    /// Inclusive upper price bound
    #[arg(long)]
    max_price: Option<u64>,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u64,
    /// Page size
    #[arg(long, default_value_t = 10)]
    limit: u64,
    /// Listings JSON file to query instead of the bundled dataset
    #[arg(long)]
    dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Query(args) => run_query(args),
    }
}

/// Runs the same engine as the HTTP search route against a dataset file,
/// without standing the server up.
fn run_query(args: QueryArgs) -> Result<(), AppError> {
    let listings = match &args.dataset {
        Some(path) => dataset::load_from_path(path)?,
        None => dataset::load_default()?,
    };

    let query = ListingQuery {
        location: args.location,
        property_type: args.property_type,
        rental_type: args.rental_type,
        min_price: args.min_price,
        max_price: args.max_price,
        page: args.page,
        limit: args.limit,
    };

    let page = filter_listings(&listings, &query);
    println!(
        "{}",
        serde_json::to_string_pretty(&page).expect("page serializes")
    );
    Ok(())
}
