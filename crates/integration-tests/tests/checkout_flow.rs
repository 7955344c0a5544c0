//! End-to-end checkout: browse, add to cart, place the order, see it in the
//! order history.

use bazaar_core::OrderStatus;

use bazaar_client::stores::{
    CartEffect, CartEvent, CartStore, CatalogEvent, CatalogStore, OrdersStore,
};
use bazaar_integration_tests::{TestContext, product};

#[tokio::test]
async fn test_checkout_flow() {
    let ctx = TestContext::new(10).await;
    let (catalog, _catalog_effects) =
        CatalogStore::new(ctx.source.clone(), ctx.favorites(), ctx.cart());
    let (cart, mut cart_effects) = CartStore::new(ctx.cart());
    let (orders, _order_effects) = OrdersStore::new(ctx.orders());

    // Add two products from the catalog screen; the second twice, which
    // creates two separate quantity-1 lines.
    catalog.handle(CatalogEvent::AddToCart(product(1))).await;
    catalog.handle(CatalogEvent::AddToCart(product(2))).await;
    catalog.handle(CatalogEvent::AddToCart(product(2))).await;

    // The cart screen sees the writes without an explicit refresh.
    let mut cart_rx = cart.subscribe();
    let cart_state = cart_rx
        .wait_for(|state| state.item_count == 3)
        .await
        .unwrap()
        .clone();
    // 10.99 + 20.99 * 2
    assert!((cart_state.total_amount - 52.97).abs() < 1e-9);

    // Bump one line's quantity from the cart screen.
    cart.handle(CartEvent::UpdateQuantity {
        product_id: product(1).id,
        quantity: 2,
    })
    .await;
    cart_rx
        .wait_for(|state| (state.total_amount - 63.96).abs() < 1e-9)
        .await
        .unwrap();

    // Checkout.
    cart.handle(CartEvent::PlaceOrder).await;
    let order_number = match cart_effects.recv().await {
        Some(CartEffect::OrderPlaced(number)) => number,
        other => panic!("unexpected effect: {other:?}"),
    };
    assert!(order_number.as_str().starts_with("ORD-"));

    // The cart is now empty.
    cart_rx
        .wait_for(|state| state.item_count == 0)
        .await
        .unwrap();

    // The order history screen picks the order up reactively.
    let mut orders_rx = orders.subscribe();
    let orders_state = orders_rx
        .wait_for(|state| state.orders.len() == 1)
        .await
        .unwrap()
        .clone();
    let order = &orders_state.orders[0];
    assert_eq!(order.order_number, order_number);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 3);
    assert_eq!(order.unit_count(), 4);
    assert!((order.total_amount - 63.96).abs() < 1e-9);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let ctx = TestContext::new(3).await;
    let (cart, mut cart_effects) = CartStore::new(ctx.cart());

    let mut cart_rx = cart.subscribe();
    cart_rx.wait_for(|state| !state.is_loading).await.unwrap();

    cart.handle(CartEvent::PlaceOrder).await;

    assert!(matches!(
        cart_effects.recv().await,
        Some(CartEffect::ShowError(_))
    ));
    assert!(!cart.state().order_placed);
    assert_eq!(ctx.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_order_status_updates_are_visible_reactively() {
    let ctx = TestContext::new(3).await;
    ctx.cart().add(&product(1)).await.unwrap();
    ctx.cart().place_order().await.unwrap();

    let (orders, _effects) = OrdersStore::new(ctx.orders());
    let mut rx = orders.subscribe();
    let state = rx
        .wait_for(|state| state.orders.len() == 1)
        .await
        .unwrap()
        .clone();

    ctx.orders()
        .update_status(&state.orders[0].id, OrderStatus::Delivered)
        .await
        .unwrap();

    rx.wait_for(|state| {
        state
            .orders
            .first()
            .is_some_and(|order| order.status == OrderStatus::Delivered)
    })
    .await
    .unwrap();
}
