//! secrets
//!
//! Secret storage for org access tokens.
//!
//! # Architecture
//!
//! Secrets go through the `SecretStore` trait. [`FileSecretStore`] keeps them
//! in `~/.flexipatch/secrets.toml` and is the only provider.
//!
//! # Example
//!
//! ```ignore
//! use flexipatch::secrets::{access_token_key, create_store, SecretStore};
//!
//! let store = create_store("file")?;
//! let key = access_token_key("https://acme.my.salesforce.com");
//! store.set(&key, token)?;
//! ```

mod file_store;
mod traits;

pub use file_store::FileSecretStore;
pub use traits::{access_token_key, SecretError, SecretStore};

/// The default secret store provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Create a secret store based on the provider name.
///
/// # Errors
///
/// - Unknown provider name
/// - Initialization errors from the store
pub fn create_store(provider: &str) -> Result<Box<dyn SecretStore>, SecretError> {
    match provider {
        "file" => Ok(Box::new(FileSecretStore::new()?)),
        other => Err(SecretError::ProviderNotAvailable(format!(
            "unknown secret provider: '{}' (valid: file)",
            other
        ))),
    }
}
