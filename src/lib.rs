//! Feed proxy and description sanitizer behind the CreateAI Builder "What's New" page.
//!
//! The reusable surface is [`parse_feed`] and [`process`]; the HTTP side only
//! wires them to axum.

pub mod api;
pub mod config;
pub mod core;

pub use crate::config::{Config, ConfigError};
pub use crate::core::content::{
    process, process_with_title, ExtractedMetadata, FeedDate, FeedTag, SanitizedContent,
};
pub use crate::core::feed::parser::{parse_feed, FeedParseError};
pub use crate::core::feed::types::{FeedItem, ProcessedFeedItem};

pub async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.bind_address();
    tracing::info!("Proxying RSS feed from {}", config.feed_url);

    let state = api::AppState::new(config)?;
    let app = api::create_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
