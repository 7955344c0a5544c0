//! Favorites commands.

use bazaar_client::state::AppState;
use bazaar_core::ProductId;

use super::CommandError;

/// List favorited products, newest first.
pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let favorites = state.db().favorites().all().await?;

    if favorites.is_empty() {
        println!("No favorites.");
        return Ok(());
    }

    for mark in &favorites {
        println!(
            "{:>6}  {:<40} {:>10}  {}",
            mark.product_id, mark.name, mark.price, mark.brand
        );
    }
    Ok(())
}

/// Toggle a product's favorite mark.
pub async fn toggle(state: &AppState, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let favorites = state.db().favorites();
    let id = ProductId::from(product_id);

    if favorites.is_favorite(&id).await? {
        favorites.remove(&id).await?;
        println!("Removed {product_id} from favorites.");
    } else {
        let product = state
            .products()
            .get_product(&id)
            .await?
            .ok_or_else(|| CommandError::ProductNotFound(product_id.to_owned()))?;
        favorites.add(&product).await?;
        println!("Added {} to favorites.", product.name);
    }
    Ok(())
}

/// Remove a product's favorite mark.
pub async fn remove(state: &AppState, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    state.db().favorites().remove(&product_id.into()).await?;
    println!("Removed {product_id} from favorites.");
    Ok(())
}
