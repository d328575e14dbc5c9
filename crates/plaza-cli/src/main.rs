use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::context::Context;
use commands::post::CliReaction;

#[derive(Parser)]
#[command(name = "plaza")]
#[command(about = "Plaza CLI - client for a posting/feed/realm platform", long_about = None)]
struct Cli {
    /// Override the API base URL from config.toml
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an access/refresh token pair
    Login {
        #[arg(long)]
        access_token: String,
        #[arg(long)]
        refresh_token: String,
    },
    /// Clear the stored session
    Logout,
    /// Resolve and print the current user
    Whoami,
    /// Show a page of the post feed
    Feed {
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Filter by realm id
        #[arg(long)]
        realm: Option<String>,
        /// Filter by author id
        #[arg(long)]
        author: Option<String>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Publish a new post
    Post { content: String },
    /// React to a post
    React {
        id: u64,
        #[arg(value_enum)]
        reaction: CliReaction,
    },
    /// Delete a post
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::new(cli.api_base)?;

    match cli.command {
        Commands::Login {
            access_token,
            refresh_token,
        } => commands::session::login(&ctx, access_token, refresh_token).await?,
        Commands::Logout => commands::session::logout(&ctx).await?,
        Commands::Whoami => commands::session::whoami(&ctx).await?,
        Commands::Feed {
            page,
            realm,
            author,
            category,
            tag,
        } => commands::feed::show(&ctx, page, realm, author, category, tag).await?,
        Commands::Post { content } => commands::post::publish(&ctx, &content).await?,
        Commands::React { id, reaction } => commands::post::react(&ctx, id, reaction).await?,
        Commands::Delete { id } => commands::post::delete(&ctx, id).await?,
    }

    Ok(())
}
