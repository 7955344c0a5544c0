//! Bazaar CLI - catalog browsing, cart, orders, and favorites.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog a page at a time
//! bazaar products list --page 2
//!
//! # Search and filter
//! bazaar products list --search chair
//! bazaar products list --brand Aston --sort PRICE_LOW_TO_HIGH
//!
//! # Cart and checkout
//! bazaar cart add 12
//! bazaar cart update 12 --quantity 3
//! bazaar cart checkout
//!
//! # Order history
//! bazaar orders list
//! bazaar orders set-status <id> SHIPPED
//!
//! # Favorites
//! bazaar favorites toggle 12
//! ```
//!
//! # Environment Variables
//!
//! - `BAZAAR_API_BASE_URL` - Catalog API base URL
//! - `BAZAAR_DATABASE_PATH` - SQLite database file path

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use bazaar_client::catalog::SortOrder;
use bazaar_client::config::AppConfig;
use bazaar_client::state::AppState;
use bazaar_core::OrderStatus;

mod commands;

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, one page at a time
    List {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Case-insensitive search over name and description
        #[arg(long)]
        search: Option<String>,

        /// Sort order (`OLD_TO_NEW`, `NEW_TO_OLD`, `PRICE_HIGH_TO_LOW`,
        /// `PRICE_LOW_TO_HIGH`); switches to the unpaged filtered view
        #[arg(long)]
        sort: Option<SortOrder>,

        /// Restrict to a brand (repeatable); switches to the unpaged
        /// filtered view
        #[arg(long)]
        brand: Vec<String>,

        /// Restrict to a model (repeatable); switches to the unpaged
        /// filtered view
        #[arg(long)]
        model: Vec<String>,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// List the distinct brand and model facets
    Facets,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: String,
    },
    /// Set the quantity of a cart line
    Update {
        /// Product id
        product_id: String,

        /// New quantity (at least 1)
        #[arg(long)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: String,
    },
    /// Remove everything from the cart
    Clear,
    /// Place an order from the cart contents
    Checkout,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List placed orders, newest first
    List,
    /// Show one order with its line items
    Show {
        /// Order id
        id: String,
    },
    /// Update an order's status
    SetStatus {
        /// Order id
        id: String,

        /// New status (`PENDING`, `CONFIRMED`, `SHIPPED`, `DELIVERED`,
        /// `CANCELLED`)
        status: OrderStatus,
    },
    /// Delete an order
    Delete {
        /// Order id
        id: String,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorited products, newest first
    List,
    /// Toggle a product's favorite mark
    Toggle {
        /// Product id
        product_id: String,
    },
    /// Remove a product's favorite mark
    Remove {
        /// Product id
        product_id: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let state = AppState::new(config).await?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                page,
                search,
                sort,
                brand,
                model,
            } => {
                commands::products::list(&state, page, search, sort, brand, model).await?;
            }
            ProductsAction::Show { id } => commands::products::show(&state, &id).await?,
            ProductsAction::Facets => commands::products::facets(&state).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state).await?,
            CartAction::Add { product_id } => commands::cart::add(&state, &product_id).await?,
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&state, &product_id, quantity).await?,
            CartAction::Remove { product_id } => {
                commands::cart::remove(&state, &product_id).await?;
            }
            CartAction::Clear => commands::cart::clear(&state).await?,
            CartAction::Checkout => commands::cart::checkout(&state).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&state).await?,
            OrdersAction::Show { id } => commands::orders::show(&state, &id).await?,
            OrdersAction::SetStatus { id, status } => {
                commands::orders::set_status(&state, &id, status).await?;
            }
            OrdersAction::Delete { id } => commands::orders::delete(&state, &id).await?,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(&state).await?,
            FavoritesAction::Toggle { product_id } => {
                commands::favorites::toggle(&state, &product_id).await?;
            }
            FavoritesAction::Remove { product_id } => {
                commands::favorites::remove(&state, &product_id).await?;
            }
        },
    }
    Ok(())
}
