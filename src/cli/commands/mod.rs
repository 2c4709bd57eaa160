//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine or a store to do the work
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `set` may query the org, so it builds a tokio runtime and blocks on the
//! async update. Every other command is synchronous.

mod auth;
mod completion;
mod config_cmd;
mod connection;
mod set;
mod show;

pub use auth::{auth, stored_access_token};
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use set::set;
pub use show::show;

use crate::cli::args::{Command, ConfigAction};
use crate::core::patch::PatchTarget;
use crate::core::resolve::ValueInputs;
use crate::engine::{Context, UpdateRequest};
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Set {
            file,
            id,
            property,
            subproperty,
            value,
            query,
            field,
            tooling,
            variable,
            truncate,
            commit,
        } => {
            let target = match subproperty {
                Some(sub) => PatchTarget::subproperty(property, sub),
                None => PatchTarget::property(property),
            };
            let request = UpdateRequest {
                path: file,
                component_id: id,
                target,
                inputs: ValueInputs {
                    value,
                    query,
                    field,
                    tooling,
                    variable,
                    truncate,
                },
                commit,
            };
            set::set(ctx, request)
        }
        Command::Show { file, id } => show::show(ctx, &file, id.as_deref()),
        Command::Auth {
            token,
            status,
            logout,
        } => auth::auth(ctx, token.as_deref(), status, logout),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
