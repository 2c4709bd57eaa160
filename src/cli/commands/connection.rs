//! cli::commands::connection
//!
//! Builds the org client and session identity for commands that need them.
//!
//! # Precedence
//!
//! - Instance URL: `--instance-url` > `FLEXIPATCH_INSTANCE_URL` > config
//! - API version: `--api-version` > config > default
//! - Token: `FLEXIPATCH_ACCESS_TOKEN` > secret store
//! - Username / org id: config override > `userinfo` endpoint

use anyhow::{anyhow, Context as _, Result};

use super::auth::stored_access_token;
use crate::core::config::schema::{validate_api_version, validate_instance_url};
use crate::core::config::Config;
use crate::core::resolve::{ResolutionMode, VariableName};
use crate::engine::Context;
use crate::org::{connect, OrgSettings, SalesforceClient, SessionContext};
use crate::ui::output;

/// Instance URL for this invocation.
pub(crate) fn instance_url(ctx: &Context, config: &Config) -> Result<String> {
    let url = ctx
        .instance_url
        .as_deref()
        .or_else(|| config.instance_url())
        .ok_or_else(|| {
            anyhow!(
                "No org instance URL configured. Run 'flexipatch config set org.instance_url <URL>' \
                 or pass --instance-url."
            )
        })?;
    validate_instance_url(url)?;
    Ok(url.trim_end_matches('/').to_string())
}

/// Open a client for the configured org and work out the session identity
/// `mode` needs.
pub(crate) async fn open(
    ctx: &Context,
    config: &Config,
    mode: &ResolutionMode,
) -> Result<(SalesforceClient, SessionContext)> {
    let verbosity = ctx.verbosity();
    let instance_url = instance_url(ctx, config)?;

    let api_version = ctx
        .api_version
        .clone()
        .unwrap_or_else(|| config.api_version().to_string());
    validate_api_version(&api_version)?;

    let access_token = match config.env_access_token() {
        Some(token) => token.to_string(),
        None => stored_access_token(config, &instance_url)?,
    };

    let settings = OrgSettings {
        instance_url,
        api_version,
        access_token,
        timeout: config.timeout(),
    };
    output::debug(format!("org settings: {:?}", settings), verbosity);

    let client = connect(&settings).context("Failed to connect to org")?;

    let mut session = if needs_userinfo(mode, config) {
        output::debug("fetching session identity from userinfo", verbosity);
        client
            .session()
            .await
            .context("Failed to read session identity")?
    } else {
        SessionContext {
            instance_url: client.instance_url().to_string(),
            ..Default::default()
        }
    };

    if let Some(username) = config.username() {
        session.username = username.to_string();
    }
    if let Some(org_id) = config.org_id() {
        session.org_id = org_id.to_string();
    }

    Ok((client, session))
}

/// Whether the session identity has to be fetched from the org.
fn needs_userinfo(mode: &ResolutionMode, config: &Config) -> bool {
    match mode {
        ResolutionMode::Variable {
            name: VariableName::OrgId,
            ..
        } => config.org_id().is_none(),
        ResolutionMode::Variable {
            name: VariableName::Username,
            ..
        } => config.username().is_none(),
        _ => false,
    }
}
