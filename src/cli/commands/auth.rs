//! cli::commands::auth
//!
//! Stores the org access token.
//!
//! # Design
//!
//! The auth command:
//! - Stores tokens via SecretStore, keyed by instance host
//! - NEVER prints tokens to stdout/stderr
//! - Supports both interactive and non-interactive modes
//!
//! # Example
//!
//! ```bash
//! # Interactive (prompts for token)
//! flexipatch auth
//!
//! # Non-interactive
//! flexipatch auth --token 00D...
//!
//! # Check status
//! flexipatch auth --status
//!
//! # Remove stored token
//! flexipatch auth --logout
//! ```

use super::connection::instance_url;
use crate::core::config::Config;
use crate::engine::Context;
use crate::secrets::{self, access_token_key, SecretStore};
use crate::ui::output;
use anyhow::{anyhow, bail, Context as _, Result};
use std::io::{self, Write};

/// Run the auth command.
///
/// # Arguments
///
/// * `ctx` - Engine context with interactive flag
/// * `token` - Optional token provided via --token flag
/// * `status` - If true, show authentication status instead of storing
/// * `logout` - If true, remove stored authentication
///
/// # Security
///
/// This function NEVER prints the token value. It only confirms success/failure.
pub fn auth(ctx: &Context, token: Option<&str>, status: bool, logout: bool) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let url = instance_url(ctx, &config)?;
    let key = access_token_key(&url);

    let store = secrets::create_store(config.secrets_provider())
        .context("Failed to initialize secret store")?;

    if status {
        return show_status(store.as_ref(), &config, &key, &url, ctx.quiet);
    }

    if logout {
        store
            .delete(&key)
            .context("Failed to remove stored token")?;
        if !ctx.quiet {
            println!("Logged out from {}.", url);
        }
        return Ok(());
    }

    let token_value = get_token(ctx, token)?;
    validate_token(&token_value)?;

    store
        .set(&key, &token_value)
        .context("Failed to store token")?;

    if config.env_access_token().is_some() {
        output::warn(
            "FLEXIPATCH_ACCESS_TOKEN is set and takes precedence over the stored token",
            ctx.verbosity(),
        );
    }

    if !ctx.quiet {
        println!("Authentication configured for {}.", url);
    }

    Ok(())
}

/// Show authentication status.
fn show_status(
    store: &dyn SecretStore,
    config: &Config,
    key: &str,
    url: &str,
    quiet: bool,
) -> Result<()> {
    let from_env = config.env_access_token().is_some();
    let exists = from_env || store.exists(key)?;

    if quiet {
        // Machine-readable output
        if exists {
            println!("authenticated");
        } else {
            println!("not_authenticated");
        }
    } else if from_env {
        println!("Authenticated with {} (token from environment).", url);
    } else if exists {
        println!("Authenticated with {}.", url);
    } else {
        println!("Not authenticated with {}.", url);
        println!("Run 'flexipatch auth' to authenticate.");
    }

    Ok(())
}

/// Get token from argument or interactive prompt.
fn get_token(ctx: &Context, token_arg: Option<&str>) -> Result<String> {
    if let Some(t) = token_arg {
        return Ok(t.to_string());
    }

    if ctx.quiet || !ctx.interactive {
        bail!("Token required. Use --token <TOKEN> or run interactively.");
    }

    print!("Salesforce access token: ");
    io::stdout().flush()?;

    let token = rpassword::read_password().context("Failed to read token")?;

    if token.is_empty() {
        bail!("Token cannot be empty.");
    }

    Ok(token)
}

/// Basic format checks; the token is not verified against the org.
fn validate_token(token: &str) -> Result<()> {
    if token.trim().is_empty() {
        bail!("Token cannot be empty.");
    }

    if token.len() < 10 {
        bail!("Token appears to be too short.");
    }

    if token.contains(' ') {
        bail!("Token should not contain spaces.");
    }

    if token.contains('\n') || token.contains('\r') {
        bail!("Token should not contain newlines.");
    }

    Ok(())
}

/// Get the stored access token for an instance.
///
/// # Errors
///
/// Returns an error if the secret store is unavailable or holds no token for
/// the instance.
pub fn stored_access_token(config: &Config, instance_url: &str) -> Result<String> {
    let store = secrets::create_store(config.secrets_provider())
        .context("Failed to initialize secret store")?;

    store.get(&access_token_key(instance_url))?.ok_or_else(|| {
        anyhow!(
            "Not authenticated with {}. Run 'flexipatch auth' or set FLEXIPATCH_ACCESS_TOKEN.",
            instance_url
        )
    })
}
