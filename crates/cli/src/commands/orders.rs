//! Order history commands.

use chrono::DateTime;

use bazaar_client::models::Order;
use bazaar_client::state::AppState;
use bazaar_core::{OrderId, OrderStatus};

use super::CommandError;

/// List placed orders, newest first.
pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let orders = state.db().orders().all().await?;

    if orders.is_empty() {
        println!("No orders.");
        return Ok(());
    }

    for order in &orders {
        println!(
            "{}  {}  {:>10.2}  {:<10}  {} item(s)",
            order.order_number,
            format_date(order.order_date),
            order.total_amount,
            order.status,
            order.unit_count()
        );
    }
    Ok(())
}

/// Show one order with its line items.
pub async fn show(state: &AppState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order = fetch(state, id).await?;

    println!("{} ({})", order.order_number, order.id);
    println!("  placed: {}", format_date(order.order_date));
    println!("  status: {}", order.status);
    println!("  total:  {:.2}", order.total_amount);
    for line in &order.items {
        println!(
            "    {:<40} {:>10} x{}",
            line.product_name, line.product_price, line.quantity
        );
    }
    Ok(())
}

/// Update an order's status.
pub async fn set_status(
    state: &AppState,
    id: &str,
    status: OrderStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let order = fetch(state, id).await?;

    state.db().orders().update_status(&order.id, status).await?;
    println!("{} is now {status}.", order.order_number);
    Ok(())
}

/// Delete an order.
pub async fn delete(state: &AppState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order = fetch(state, id).await?;

    state.db().orders().delete(&order.id).await?;
    println!("Deleted {}.", order.order_number);
    Ok(())
}

async fn fetch(state: &AppState, id: &str) -> Result<Order, Box<dyn std::error::Error>> {
    let order = state
        .db()
        .orders()
        .get(&OrderId::from(id))
        .await?
        .ok_or_else(|| CommandError::OrderNotFound(id.to_owned()))?;
    Ok(order)
}

fn format_date(epoch_millis: i64) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .map_or_else(|| epoch_millis.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}
