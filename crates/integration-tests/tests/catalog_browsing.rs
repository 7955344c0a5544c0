//! Catalog browsing: paging, search, and the filter screen feeding the
//! catalog screen.

use std::sync::Arc;

use bazaar_client::catalog::SortOrder;
use bazaar_client::paging::PAGE_SIZE;
use bazaar_client::stores::{
    CatalogEvent, CatalogStore, FilterEffect, FilterEvent, FilterStore,
};
use bazaar_integration_tests::{FailingCatalog, TestContext, fixture_catalog};

#[tokio::test]
async fn test_paging_through_the_catalog() {
    let ctx = TestContext::new(45).await;
    let (catalog, _effects) =
        CatalogStore::new(fixture_catalog(45), ctx.favorites(), ctx.cart());

    catalog.handle(CatalogEvent::Refresh).await;
    assert_eq!(catalog.state().products.len(), PAGE_SIZE);

    catalog.handle(CatalogEvent::LoadNextPage).await;
    catalog.handle(CatalogEvent::LoadNextPage).await;

    let state = catalog.state();
    assert_eq!(state.products.len(), 45);
    assert_eq!(state.next_key, None);
}

#[tokio::test]
async fn test_search_then_clear() {
    let ctx = TestContext::new(30).await;
    let (catalog, _effects) =
        CatalogStore::new(ctx.source.clone(), ctx.favorites(), ctx.cart());

    catalog
        .handle(CatalogEvent::Search("Product 7".to_owned()))
        .await;
    let state = catalog.state();
    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].name, "Product 7");

    catalog.handle(CatalogEvent::ClearSearch).await;
    assert_eq!(catalog.state().products.len(), PAGE_SIZE);
}

#[tokio::test]
async fn test_filter_screen_drives_catalog_screen() {
    let ctx = TestContext::new(30).await;
    let (catalog, _catalog_effects) =
        CatalogStore::new(ctx.source.clone(), ctx.favorites(), ctx.cart());
    let (filter, mut filter_effects) = FilterStore::new(ctx.source.clone());

    catalog.handle(CatalogEvent::Refresh).await;
    filter.handle(FilterEvent::Load).await;

    let brand = filter.state().facets.brands[0].clone();
    filter
        .handle(FilterEvent::ToggleBrand {
            name: brand.clone(),
            selected: true,
        })
        .await;
    filter
        .handle(FilterEvent::SelectSort(SortOrder::PriceHighToLow))
        .await;
    filter.handle(FilterEvent::Apply).await;

    let FilterEffect::Applied(selection) = filter_effects.recv().await.unwrap();
    catalog.handle(CatalogEvent::ApplyFilters(selection)).await;

    let state = catalog.state();
    assert!(state.is_filtered);
    assert!(!state.visible().is_empty());
    assert!(state.visible().iter().all(|p| p.brand == brand));
    let amounts: Vec<f64> = state.visible().iter().map(|p| p.price.amount()).collect();
    assert!(amounts.windows(2).all(|w| w[0] >= w[1]));

    // Clearing restores the paged listing.
    catalog.handle(CatalogEvent::ClearFilters).await;
    let state = catalog.state();
    assert!(!state.is_filtered);
    assert_eq!(state.visible().len(), PAGE_SIZE);
}

#[tokio::test]
async fn test_remote_failure_shows_template_and_retry_recovers() {
    let ctx = TestContext::new(5).await;
    let (catalog, _effects) =
        CatalogStore::new(Arc::new(FailingCatalog), ctx.favorites(), ctx.cart());

    catalog.handle(CatalogEvent::Refresh).await;
    assert_eq!(
        catalog.state().error.as_deref(),
        Some("Server error. Please try again later")
    );

    // A store wired to a healthy source recovers on retry.
    let (catalog, _effects) =
        CatalogStore::new(ctx.source.clone(), ctx.favorites(), ctx.cart());
    catalog.handle(CatalogEvent::Retry).await;
    let state = catalog.state();
    assert!(state.error.is_none());
    assert_eq!(state.products.len(), 5);
}
