//! Index a few live product listings and run a tensor search.
//!
//! Needs a local Marqo instance and an `INSTANTAPI_KEY` in the
//! environment (or a `.env` file):
//!
//! ```sh
//! cargo run --example product_search
//! ```

use anyhow::Context;
use marqo_instantapi::{AddDocumentsParams, InstantApiMarqoAdapter, SearchParams};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const INDEX_NAME: &str = "product-listings";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let instantapi_key =
        std::env::var("INSTANTAPI_KEY").context("INSTANTAPI_KEY must be set")?;
    let marqo_url = std::env::var("MARQO_URL")
        .unwrap_or_else(|_| InstantApiMarqoAdapter::DEFAULT_MARQO_URL.to_string());

    let adapter = InstantApiMarqoAdapter::connect(&marqo_url, None, &instantapi_key);

    // Start from a clean slate.
    adapter.delete_index(INDEX_NAME, true, true).await?;

    let params = AddDocumentsParams::new(
        "getProductListingDetails",
        json!({
            "title": "<the name of the product (string)>",
            "price": "<the price of the product, with currency symbol (string)>",
            "description": "<a short description of the product (string)>",
            "image_url": "<the url of the main product image (string)>",
        }),
    )
    .with_text_fields(["title", "price", "description"])
    .with_image_fields(["image_url"]);

    let webpage_urls = vec![
        "https://www.ebay.com/itm/256308523856".to_string(),
        "https://www.ebay.com/itm/235027417338".to_string(),
        "https://www.ebay.com/itm/194528152826".to_string(),
    ];

    let outcomes = adapter
        .add_documents(&webpage_urls, INDEX_NAME, &params)
        .await?;
    for outcome in &outcomes {
        println!("{outcome:?}");
    }

    let response = adapter
        .search("coffee mug", INDEX_NAME, &SearchParams::new().with_limit(3))
        .await?;
    for hit in &response.hits {
        println!(
            "{} — {}",
            hit["title"].as_str().unwrap_or("?"),
            hit["price"].as_str().unwrap_or("?"),
        );
    }

    Ok(())
}
