pub mod client;

pub use client::{ApiClient, POSTS_ENDPOINT};
