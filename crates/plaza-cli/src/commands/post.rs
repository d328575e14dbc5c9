//! Mutation commands: post, react, delete.

use anyhow::Result;
use clap::ValueEnum;
use plaza_application::Composer;
use plaza_core::api::Reaction;

use super::context::Context;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliReaction {
    Like,
    Dislike,
}

impl From<CliReaction> for Reaction {
    fn from(value: CliReaction) -> Self {
        match value {
            CliReaction::Like => Reaction::Like,
            CliReaction::Dislike => Reaction::Dislike,
        }
    }
}

pub async fn publish(ctx: &Context, content: &str) -> Result<()> {
    let composer = Composer::new(ctx.api.clone(), ctx.tokens.clone());
    composer.publish(content).await?;
    println!("Posted.");
    Ok(())
}

pub async fn react(ctx: &Context, id: u64, reaction: CliReaction) -> Result<()> {
    let composer = Composer::new(ctx.api.clone(), ctx.tokens.clone());
    composer.react(id, reaction.into()).await?;
    println!("Reacted to post #{id}.");
    Ok(())
}

pub async fn delete(ctx: &Context, id: u64) -> Result<()> {
    let composer = Composer::new(ctx.api.clone(), ctx.tokens.clone());
    composer.delete(id).await?;
    println!("Deleted post #{id}.");
    Ok(())
}
