//! Cart and checkout commands.
//!
//! The quantity floor lives here: the repository accepts any quantity, but
//! the user-facing surface refuses anything below 1.

use bazaar_client::state::AppState;
use bazaar_core::ProductId;

use super::CommandError;

/// Show the cart contents, line count, and total.
pub async fn show(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let cart = state.db().cart();
    let lines = cart.all().await?;

    if lines.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }

    for line in &lines {
        println!(
            "{:>6}  {:<40} {:>10} x{}  = {:.2}",
            line.product_id,
            line.product_name,
            line.product_price,
            line.quantity,
            line.line_total()
        );
    }
    println!("Total: {:.2}", cart.total_amount().await?);
    Ok(())
}

/// Add a product to the cart as a new quantity-1 line.
pub async fn add(state: &AppState, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = state
        .products()
        .get_product(&product_id.into())
        .await?
        .ok_or_else(|| CommandError::ProductNotFound(product_id.to_owned()))?;

    let line = state.db().cart().add(&product).await?;
    println!("Added {} to cart (line {}).", product.name, line.id);
    Ok(())
}

/// Set the quantity of a cart line.
pub async fn update(
    state: &AppState,
    product_id: &str,
    quantity: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    if quantity < 1 {
        return Err(CommandError::InvalidQuantity(quantity).into());
    }

    let id = ProductId::from(product_id);
    if state.db().cart().get(&id).await?.is_none() {
        return Err(CommandError::ProductNotFound(product_id.to_owned()).into());
    }

    state.db().cart().update_quantity(&id, quantity).await?;
    println!("Set quantity of {product_id} to {quantity}.");
    Ok(())
}

/// Remove a product from the cart.
pub async fn remove(state: &AppState, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    state.db().cart().remove(&product_id.into()).await?;
    println!("Removed {product_id} from cart.");
    Ok(())
}

/// Remove everything from the cart.
pub async fn clear(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    state.db().cart().clear().await?;
    println!("Cart cleared.");
    Ok(())
}

/// Place an order from the cart contents.
pub async fn checkout(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let order_number = state.db().cart().place_order().await?;
    println!("Order placed: {order_number}");
    Ok(())
}
