//! End-to-end exercises of the adapter against the mock collaborators,
//! through the public API only.

use marqo_instantapi::testing::{MockExtractor, MockIndexEngine};
use marqo_instantapi::types::{AddDocumentsParams, CrawlParams};
use marqo_instantapi::{
    document_id, InstantApiMarqoAdapter, SearchMethod, SearchParams, SOURCE_URL_FIELD,
};
use serde_json::json;

fn product_schema() -> serde_json::Value {
    json!({
        "title": "<the name of the product (string)>",
        "price": "<the price of the product (string)>",
        "image_url": "<the url of the main product image (string)>",
    })
}

fn product_params() -> AddDocumentsParams {
    AddDocumentsParams::new("getProductListingDetails", product_schema())
        .with_text_fields(["title", "price"])
        .with_image_fields(["image_url"])
}

fn product_page(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "price": "$12.99",
        "image_url": format!("https://shop.test/images/{title}.png"),
    })
}

#[tokio::test]
async fn ingest_provisions_index_and_serves_search() {
    let extractor = MockExtractor::new()
        .with_page("https://shop.test/item/1", product_page("Coffee Mug"))
        .with_page("https://shop.test/item/2", product_page("Tea Pot"));
    let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

    let outcomes = adapter
        .add_documents(
            &[
                "https://shop.test/item/1".to_string(),
                "https://shop.test/item/2".to_string(),
            ],
            "products",
            &product_params(),
        )
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| !o.is_failure()));

    // Image fields present, so the index was created multimodal.
    let settings = adapter.engine().settings_for("products").unwrap();
    assert!(settings.treat_urls_and_pointers_as_images);
    assert_eq!(
        settings.model.as_deref(),
        Some("open_clip/ViT-B-32/laion2b_s34b_b79k")
    );

    // Every submitted document carries its identity and provenance.
    let submissions = adapter.engine().submissions();
    for doc in &submissions[0].documents {
        let url = doc[SOURCE_URL_FIELD].as_str().unwrap();
        assert_eq!(doc["_id"].as_str().unwrap(), document_id(url));
    }

    adapter
        .engine()
        .set_hits("coffee mug", vec![json!({"title": "Coffee Mug"})]);
    let response = adapter
        .search(
            "coffee mug",
            "products",
            &SearchParams::new().with_method(SearchMethod::Tensor),
        )
        .await
        .unwrap();
    assert_eq!(response.hits.len(), 1);
}

#[tokio::test]
async fn reingesting_a_url_keeps_the_same_identity() {
    let extractor =
        MockExtractor::new().with_page("https://shop.test/item/1", product_page("Coffee Mug"));
    let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

    let first = adapter
        .add_documents(
            &["https://shop.test/item/1".to_string()],
            "products",
            &product_params(),
        )
        .await
        .unwrap();
    let second = adapter
        .add_documents(
            &["https://shop.test/item/1".to_string()],
            "products",
            &product_params(),
        )
        .await
        .unwrap();

    // Same URL, same document: the second run overwrites, not duplicates.
    assert_eq!(first[0].document_id(), second[0].document_id());
}

#[tokio::test]
async fn crawl_ingests_discovered_pages_into_one_index() {
    let extractor = MockExtractor::new()
        .with_page("https://shop.test/catalog", product_page("Catalog"))
        .with_page("https://shop.test/item/1", product_page("Coffee Mug"))
        .with_next_pages("https://shop.test/catalog", &["https://shop.test/item/1"]);
    let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

    let outcomes = adapter
        .crawl(
            &["https://shop.test/catalog".to_string()],
            "products",
            &CrawlParams::new(product_params()),
        )
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| !o.is_failure()));

    // Crawl calls add_documents per page, so one submission each.
    assert_eq!(adapter.engine().submissions().len(), 2);
}

#[tokio::test]
async fn mixed_batch_reports_failures_alongside_successes() {
    let extractor = MockExtractor::new()
        .with_page("https://shop.test/item/1", product_page("Coffee Mug"))
        .with_failure("https://shop.test/item/404", "page not found")
        .with_page("https://shop.test/item/2", json!({"unexpected": "shape"}));
    let adapter = InstantApiMarqoAdapter::new(extractor, MockIndexEngine::new());

    let outcomes = adapter
        .add_documents(
            &[
                "https://shop.test/item/1".to_string(),
                "https://shop.test/item/404".to_string(),
                "https://shop.test/item/2".to_string(),
            ],
            "products",
            &product_params(),
        )
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes.iter().filter(|o| o.is_failure()).count(), 2);
    assert_eq!(adapter.engine().submissions()[0].documents.len(), 1);
}

#[tokio::test]
async fn index_lifecycle_round_trip() {
    let adapter = InstantApiMarqoAdapter::new(MockExtractor::new(), MockIndexEngine::new());

    assert!(!adapter.index_exists("products").await.unwrap());
    adapter
        .create_index("products", false, None, false)
        .await
        .unwrap();
    assert!(adapter.index_exists("products").await.unwrap());

    // Idempotent re-create, then confirmed deletion.
    adapter
        .create_index("products", false, None, true)
        .await
        .unwrap();
    let deleted = adapter.delete_index("products", true, false).await.unwrap();
    assert!(deleted.unwrap().acknowledged);
    assert!(!adapter.index_exists("products").await.unwrap());

    // Gone already: skip flag turns the engine's 404 into a no-op.
    let skipped = adapter.delete_index("products", true, true).await.unwrap();
    assert!(skipped.is_none());
}
