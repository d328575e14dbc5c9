//! Session commands: login, logout, whoami.

use std::sync::Arc;

use anyhow::Result;
use plaza_application::SessionOutcome;
use plaza_core::token::TokenPair;

use super::context::Context;

pub async fn login(ctx: &Context, access_token: String, refresh_token: String) -> Result<()> {
    ctx.tokens
        .store(TokenPair {
            access_token,
            refresh_token,
        })
        .await?;

    // Confirm the credential right away so a typo surfaces here, not on the
    // first feed fetch.
    let service = ctx.session_service();
    match service.load_profile().await? {
        SessionOutcome::Authenticated => {
            println!("Logged in as {}", service.userinfo().await.display_name);
        }
        SessionOutcome::Reset => {
            println!("The provided credentials were rejected and have been cleared.");
        }
        SessionOutcome::Anonymous => {
            println!("No credential found after storing; check the credential file permissions.");
        }
    }
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    let service = ctx.session_service();
    service
        .set_reload_handler(Arc::new(|| {
            println!("Session cleared.");
        }))
        .await;
    service.logout().await?;
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let service = ctx.session_service();
    match service.load_profile().await? {
        SessionOutcome::Anonymous => println!("Not logged in."),
        SessionOutcome::Authenticated => {
            let info = service.userinfo().await;
            println!("Logged in as {}", info.display_name);
            if let Some(profile) = info.profile {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            }
        }
        SessionOutcome::Reset => {
            println!("Session expired and could not be refreshed; credentials cleared.");
        }
    }
    Ok(())
}
