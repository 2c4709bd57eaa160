//! set command - Patch one component property

use super::connection;
use crate::core::config::Config;
use crate::core::resolve::OrgHandle;
use crate::engine::{update, Context, UpdateRequest};
use crate::store::JsonFileStore;
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Run the set command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn set(ctx: &Context, request: UpdateRequest) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(set_async(ctx, request))
}

/// Async implementation of set.
async fn set_async(ctx: &Context, request: UpdateRequest) -> Result<()> {
    let verbosity = ctx.verbosity();
    let store = JsonFileStore::new();
    let path = request.path.clone();
    let id = request.component_id.clone();

    // Invalid inputs fall through to the updater, which reports them before
    // touching the file. Only a valid org-backed mode opens a connection.
    let org_mode = request
        .inputs
        .clone()
        .into_mode()
        .ok()
        .filter(|mode| mode.requires_org());

    let outcome = match org_mode {
        Some(mode) => {
            let config = Config::load().context("Failed to load config")?;
            let (client, session) = connection::open(ctx, &config, &mode).await?;
            let org = OrgHandle {
                client: &client,
                session: &session,
            };
            update(request, &store, Some(org), verbosity).await
        }
        None => update(request, &store, None, verbosity).await,
    }
    .with_context(|| format!("Failed to set '{}' in {}", id, path.display()))?;

    if outcome.committed {
        output::debug(
            format!("wrote {} ({})", path.display(), outcome.coordinate),
            verbosity,
        );
    }

    Ok(())
}
