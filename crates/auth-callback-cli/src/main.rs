//! auth-callback: run the login callback handler against a URL.
//!
//! Notices and navigations are printed instead of shown. Tokens are checked
//! against the `tokens` list in the config file.

mod console;

use std::path::PathBuf;

use anyhow::{Context, Result};
use auth_callback::{
    CallbackConfig, CallbackHandler, CallbackQuery, Navigation, Notice, SessionStore,
    StaticTokenVerifier,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::console::{ConsoleNavigator, ConsoleNotifier};

/// Role the admin setup route expects
const ADMIN_ROLE: &str = "admin";

#[derive(Parser, Debug)]
#[command(name = "auth-callback")]
#[command(about = "Handle a login callback URL")]
struct Args {
    /// Callback URL, absolute or relative (e.g. "/auth/callback?token=...")
    url: String,

    /// Path to the JSON config file
    #[arg(short, long, default_value = "auth-callback.json", env = "AUTH_CALLBACK_CONFIG")]
    config: PathBuf,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "auth_callback=debug"
    } else {
        "auth_callback=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CallbackConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    let query = CallbackQuery::from_url(&args.url)
        .with_context(|| format!("Failed to parse callback URL: {}", args.url))?;

    let store = SessionStore::new(StaticTokenVerifier::from_config(&config));
    let handler = CallbackHandler::new(config, &store, ConsoleNotifier, ConsoleNavigator);

    let outcome = handler.handle(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        let notice = match &outcome.notice {
            Some(Notice::Success(m)) => format!("success: {}", m),
            Some(Notice::Error(m)) => format!("error: {}", m),
            None => "none".to_string(),
        };
        let navigation = match &outcome.navigation {
            Navigation::Route(r) => format!("route {}", r),
            Navigation::Redirect(u) => format!("redirect {}", u),
        };
        println!("outcome: {:?}", outcome.kind);
        println!("notice: {}", notice);
        println!("navigation: {}", navigation);
        if let Some(session) = store.current() {
            println!(
                "session: user={} roles=[{}] admin={}",
                session.user_id.as_deref().unwrap_or("-"),
                session.roles.join(", "),
                if session.has_role(ADMIN_ROLE) { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}
