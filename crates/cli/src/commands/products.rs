//! Catalog browsing commands.

use std::collections::BTreeSet;

use bazaar_client::catalog::{self, FilterSelection, SortOrder};
use bazaar_client::models::Product;
use bazaar_client::paging::{PAGE_SIZE, ProductPagingSource};
use bazaar_client::remote::ProductSource;
use bazaar_client::state::AppState;

use super::CommandError;

/// List products: one page of the (optionally searched) catalog, or the full
/// filtered view when a sort or facet restriction is given.
pub async fn list(
    state: &AppState,
    page: u32,
    search: Option<String>,
    sort: Option<SortOrder>,
    brands: Vec<String>,
    models: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = FilterSelection {
        sort,
        brands: brands.into_iter().collect::<BTreeSet<_>>(),
        models: models.into_iter().collect::<BTreeSet<_>>(),
    };

    if selection.is_empty() {
        let source = ProductPagingSource::new(state.product_source(), search);
        let loaded = source.load(Some(page), PAGE_SIZE).await?;

        if loaded.items.is_empty() {
            println!("No products on page {page}.");
        } else {
            for product in &loaded.items {
                print_line(product);
            }
        }
        if let Some(next) = loaded.next_key {
            println!("(more available: --page {next})");
        }
        return Ok(());
    }

    let mut products = state.products().fetch_products().await?;
    if let Some(query) = search.as_deref() {
        products.retain(|product| product.matches_query(query));
    }
    let filtered = catalog::apply(&products, &selection);

    if filtered.is_empty() {
        println!("No products match.");
    } else {
        for product in &filtered {
            print_line(product);
        }
        println!("({} matching)", filtered.len());
    }
    Ok(())
}

/// Show one product in full.
pub async fn show(state: &AppState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = state
        .products()
        .get_product(&id.into())
        .await?
        .ok_or_else(|| CommandError::ProductNotFound(id.to_owned()))?;

    println!("{} ({})", product.name, product.id);
    println!("  brand:   {}", product.brand);
    println!("  model:   {}", product.model);
    println!("  price:   {}", product.price);
    println!("  created: {}", product.created_at);
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
    Ok(())
}

/// List the distinct brand and model facets of the full catalog.
pub async fn facets(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let products = state.products().fetch_products().await?;
    let facets = catalog::facets(&products);

    println!("Brands:");
    for brand in &facets.brands {
        println!("  {brand}");
    }
    println!("Models:");
    for model in &facets.models {
        println!("  {model}");
    }
    Ok(())
}

fn print_line(product: &Product) {
    println!(
        "{:>6}  {:<40} {:>10}  {}",
        product.id, product.name, product.price, product.brand
    );
}
