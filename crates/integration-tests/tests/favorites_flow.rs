//! Favorites: toggling from the catalog and detail screens, with every
//! screen observing the same table.

use bazaar_client::stores::{
    CatalogEvent, CatalogStore, FavoritesEffect, FavoritesEvent, FavoritesStore,
    ProductDetailEvent, ProductDetailStore,
};
use bazaar_integration_tests::{TestContext, product};

#[tokio::test]
async fn test_toggle_from_catalog_reaches_every_screen() {
    let ctx = TestContext::new(10).await;
    let (catalog, _catalog_effects) =
        CatalogStore::new(ctx.source.clone(), ctx.favorites(), ctx.cart());
    let (favorites, _favorites_effects) = FavoritesStore::new(ctx.favorites());
    let (detail, _detail_effects) =
        ProductDetailStore::new(product(3), ctx.favorites(), ctx.cart());

    catalog.handle(CatalogEvent::ToggleFavorite(product(3))).await;

    // The favorites screen lists the new mark.
    let mut favorites_rx = favorites.subscribe();
    let state = favorites_rx
        .wait_for(|state| state.favorites.len() == 1)
        .await
        .unwrap()
        .clone();
    assert_eq!(state.favorites[0].product_id.as_str(), "3");

    // The detail screen's flag follows.
    let mut detail_rx = detail.subscribe();
    detail_rx.wait_for(|state| state.is_favorite).await.unwrap();

    // Toggling again clears the mark everywhere.
    catalog.handle(CatalogEvent::ToggleFavorite(product(3))).await;
    favorites_rx
        .wait_for(|state| state.favorites.is_empty())
        .await
        .unwrap();
    detail_rx.wait_for(|state| !state.is_favorite).await.unwrap();
}

#[tokio::test]
async fn test_toggle_is_a_single_flip_per_event() {
    let ctx = TestContext::new(5).await;
    let (detail, _effects) = ProductDetailStore::new(product(1), ctx.favorites(), ctx.cart());

    detail.handle(ProductDetailEvent::ToggleFavorite).await;
    assert_eq!(ctx.favorites().count().await.unwrap(), 1);

    detail.handle(ProductDetailEvent::ToggleFavorite).await;
    assert_eq!(ctx.favorites().count().await.unwrap(), 0);

    detail.handle(ProductDetailEvent::ToggleFavorite).await;
    assert_eq!(ctx.favorites().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_remove_from_favorites_screen() {
    let ctx = TestContext::new(5).await;
    ctx.favorites().add(&product(1)).await.unwrap();
    ctx.favorites().add(&product(2)).await.unwrap();

    let (favorites, mut effects) = FavoritesStore::new(ctx.favorites());
    let mut rx = favorites.subscribe();
    rx.wait_for(|state| state.favorites.len() == 2)
        .await
        .unwrap();

    favorites
        .handle(FavoritesEvent::Remove(product(1).id))
        .await;

    assert!(matches!(
        effects.recv().await,
        Some(FavoritesEffect::Removed(id)) if id.as_str() == "1"
    ));
    let state = rx
        .wait_for(|state| state.favorites.len() == 1)
        .await
        .unwrap()
        .clone();
    assert_eq!(state.favorites[0].product_id.as_str(), "2");
}
