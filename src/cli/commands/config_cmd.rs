//! config command - Get, set, or list configuration values

use crate::core::config::schema::{validate_api_version, validate_instance_url};
use crate::core::config::{Config, GlobalConfig, OrgConfig};
use crate::engine::Context;
use anyhow::{bail, Context as _, Result};

/// Keys accepted by `config get` and `config set`.
pub const KEYS: &[&str] = &[
    "org.instance_url",
    "org.api_version",
    "org.username",
    "org.org_id",
    "org.timeout_secs",
];

/// Get a configuration value.
pub fn get(_ctx: &Context, key: &str) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;

    // Key exists but has no value - exit silently
    if let Some(value) = lookup(&config.global, key)? {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let path = Config::config_path().context("Failed to locate config file")?;
    let mut global = if path.exists() {
        Config::load_from(&path)
            .context("Failed to load config")?
            .global
    } else {
        GlobalConfig::default()
    };

    assign(&mut global, key, value)?;

    Config::write(&path, &global).context("Failed to write config")?;

    if !ctx.quiet {
        println!("Set {} = {}", key, value);
    }

    Ok(())
}

/// List all configuration values.
pub fn list(_ctx: &Context) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;

    match config.loaded_from() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config file)"),
    }

    for key in KEYS {
        let value = lookup(&config.global, key)?.unwrap_or_else(|| "(not set)".to_string());
        println!("{} = {}", key, value);
    }

    if config.env.instance_url.is_some() {
        println!("# org.instance_url is overridden by FLEXIPATCH_INSTANCE_URL");
    }

    Ok(())
}

fn lookup(global: &GlobalConfig, key: &str) -> Result<Option<String>> {
    let org = global.org.clone().unwrap_or_default();
    let value = match key {
        "org.instance_url" => org.instance_url,
        "org.api_version" => org.api_version,
        "org.username" => org.username,
        "org.org_id" => org.org_id,
        "org.timeout_secs" => org.timeout_secs.map(|t| t.to_string()),
        _ => bail!("Unknown configuration key: {} (valid: {})", key, KEYS.join(", ")),
    };
    Ok(value)
}

fn assign(global: &mut GlobalConfig, key: &str, value: &str) -> Result<()> {
    let org: &mut OrgConfig = global.org.get_or_insert_with(OrgConfig::default);
    match key {
        "org.instance_url" => {
            validate_instance_url(value)?;
            org.instance_url = Some(value.trim_end_matches('/').to_string());
        }
        "org.api_version" => {
            validate_api_version(value)?;
            org.api_version = Some(value.to_string());
        }
        "org.username" => org.username = Some(value.to_string()),
        "org.org_id" => org.org_id = Some(value.to_string()),
        "org.timeout_secs" => {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("Invalid timeout '{}', expected seconds", value))?;
            org.timeout_secs = Some(secs);
        }
        _ => bail!("Unknown configuration key: {} (valid: {})", key, KEYS.join(", ")),
    }
    Ok(())
}
