pub mod context;
pub mod feed;
pub mod post;
pub mod session;
