//! Feed command: one page of the post list.

use std::sync::Arc;

use anyhow::Result;
use plaza_application::PagedFetcher;
use plaza_core::page::PageFilter;
use plaza_interaction::POSTS_ENDPOINT;

use super::context::Context;

pub async fn show(
    ctx: &Context,
    page: u32,
    realm: Option<String>,
    author: Option<String>,
    category: Option<String>,
    tag: Option<String>,
) -> Result<()> {
    let mut filter = PageFilter::new();
    if let Some(realm) = realm {
        filter.insert("realm_id".to_string(), realm);
    }
    if let Some(author) = author {
        filter.insert("author_id".to_string(), author);
    }
    if let Some(category) = category {
        filter.insert("category".to_string(), category);
    }
    if let Some(tag) = tag {
        filter.insert("tag".to_string(), tag);
    }

    let fetcher = PagedFetcher::with_filter(ctx.api.clone(), POSTS_ENDPOINT, filter);
    fetcher
        .set_error_sink(Arc::new(|message| {
            if let Some(message) = message {
                eprintln!("Error: {}", message);
            }
        }))
        .await;

    fetcher.set_page(page).await;
    let state = fetcher.state().await;

    if state.error.is_some() {
        // the sink already printed the server's message
        return Ok(());
    }

    for item in &state.items {
        let id = item.get("id").and_then(|v| v.as_u64()).unwrap_or_default();
        let author = item
            .get("author")
            .and_then(|a| a.get("nick"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        let content = item
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        println!("#{id} {author}: {content}");
    }

    println!(
        "Page {} of {} ({} posts){}{}",
        state.page,
        state.page_count(),
        state.total_count,
        if state.has_previous() { "  [prev]" } else { "" },
        if state.has_next() { "  [next]" } else { "" },
    );

    Ok(())
}
