//! core::resolve
//!
//! Produce the value to write from exactly one source.
//!
//! # Sources
//!
//! - **Literal**: the given string, unchanged.
//! - **Query**: one field of the single record a SOQL query returns.
//! - **Variable**: a value of the active session (org id, instance URL, username).
//!
//! # Mutual exclusion
//!
//! Raw command-line inputs arrive as [`ValueInputs`] and are turned into a
//! [`ResolutionMode`] by [`ValueInputs::into_mode`]. That conversion is the
//! only place the "exactly one source" rule is checked. Past it, the enum
//! makes any other combination unrepresentable.
//!
//! # Truncation
//!
//! Platform ids have a 15-character case-sensitive short form. Truncation
//! keeps the first [`SHORT_ID_LEN`] characters and never pads.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use super::errors::PatchError;
use crate::org::{QueryClient, SessionContext};

/// Length of the short form of a platform id.
pub const SHORT_ID_LEN: usize = 15;

/// Field extracted from a query result when none is given.
pub const DEFAULT_FIELD: &str = "Id";

/// A session value usable as a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableName {
    /// Organization id.
    OrgId,
    /// Instance base URL, without trailing slash.
    InstanceUrl,
    /// Username of the connected user.
    Username,
}

impl VariableName {
    /// All variable names, in help order.
    pub const ALL: [VariableName; 3] = [
        VariableName::OrgId,
        VariableName::InstanceUrl,
        VariableName::Username,
    ];

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableName::OrgId => "OrgId",
            VariableName::InstanceUrl => "InstanceUrl",
            VariableName::Username => "Username",
        }
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableName {
    type Err = PatchError;

    /// Parse a variable name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariableName::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let valid: Vec<_> = VariableName::ALL.iter().map(|v| v.as_str()).collect();
                PatchError::Configuration(format!(
                    "unknown variable '{}', must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Where the new value comes from. Exactly one variant per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Use the value as given.
    Literal { value: String },
    /// Run a query and take one field of its single record.
    Query {
        soql: String,
        field: String,
        tooling: bool,
        truncate: bool,
    },
    /// Take a value from the session.
    Variable { name: VariableName, truncate: bool },
}

impl ResolutionMode {
    /// Whether resolving this mode needs an org connection.
    pub fn requires_org(&self) -> bool {
        !matches!(self, ResolutionMode::Literal { .. })
    }
}

/// Raw, unvalidated value-source inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueInputs {
    /// Literal value.
    pub value: Option<String>,
    /// SOQL query.
    pub query: Option<String>,
    /// Field to extract from the query result.
    pub field: Option<String>,
    /// Query the Tooling API.
    pub tooling: bool,
    /// Session variable name.
    pub variable: Option<String>,
    /// Keep only the first 15 characters.
    pub truncate: bool,
}

impl ValueInputs {
    /// Validate the inputs and build the resolution mode.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::Configuration`] when:
    /// - none or more than one of value, query, variable is given
    /// - truncate is combined with a literal value
    /// - field or tooling is given without a query
    /// - the variable name is unknown
    pub fn into_mode(self) -> Result<ResolutionMode, PatchError> {
        let given: Vec<&str> = [
            self.value.as_ref().map(|_| "--value"),
            self.query.as_ref().map(|_| "--query"),
            self.variable.as_ref().map(|_| "--variable"),
        ]
        .into_iter()
        .flatten()
        .collect();

        match given.len() {
            0 => {
                return Err(PatchError::Configuration(
                    "one of --value, --query or --variable is required".into(),
                ))
            }
            1 => {}
            _ => {
                return Err(PatchError::Configuration(format!(
                    "{} are mutually exclusive, give exactly one",
                    given.join(", ")
                )))
            }
        }

        if self.query.is_none() {
            if self.field.is_some() {
                return Err(PatchError::Configuration(
                    "--field requires --query".into(),
                ));
            }
            if self.tooling {
                return Err(PatchError::Configuration(
                    "--tooling requires --query".into(),
                ));
            }
        }

        if let Some(value) = self.value {
            if self.truncate {
                return Err(PatchError::Configuration(
                    "--truncate cannot be used with --value".into(),
                ));
            }
            return Ok(ResolutionMode::Literal { value });
        }

        if let Some(soql) = self.query {
            return Ok(ResolutionMode::Query {
                soql,
                field: self.field.unwrap_or_else(|| DEFAULT_FIELD.to_string()),
                tooling: self.tooling,
                truncate: self.truncate,
            });
        }

        let name: VariableName = self.variable.unwrap_or_default().parse()?;
        Ok(ResolutionMode::Variable {
            name,
            truncate: self.truncate,
        })
    }
}

/// Org access handed to the resolver.
#[derive(Clone, Copy)]
pub struct OrgHandle<'a> {
    /// Query capability.
    pub client: &'a dyn QueryClient,
    /// Identity of the connected session.
    pub session: &'a SessionContext,
}

impl fmt::Debug for OrgHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrgHandle")
            .field("client", &self.client.name())
            .field("session", self.session)
            .finish()
    }
}

/// Resolve the value to write.
///
/// `org` may be `None` for literal values. Query and variable values need it.
///
/// # Errors
///
/// - `Configuration` if an org is needed but none was provided
/// - `NoRecords` / `AmbiguousQuery` unless the query matches exactly one record
/// - `MissingField` if the record has no usable value for the field
/// - `Query` if the query itself fails
pub async fn resolve(
    mode: &ResolutionMode,
    org: Option<OrgHandle<'_>>,
) -> Result<String, PatchError> {
    match mode {
        ResolutionMode::Literal { value } => Ok(value.clone()),

        ResolutionMode::Query {
            soql,
            field,
            tooling,
            truncate,
        } => {
            let org = require_org(org)?;
            let result = org.client.query(soql, *tooling).await?;

            // totalSize decides; COUNT() queries report a size with no records.
            let no_records = || PatchError::NoRecords {
                query: soql.clone(),
            };
            let record = match result.total_size {
                0 => return Err(no_records()),
                count if count > 1 => {
                    return Err(PatchError::AmbiguousQuery {
                        query: soql.clone(),
                        count,
                    })
                }
                _ => result.records.first().ok_or_else(no_records)?,
            };

            let value = extract_field(record, field)?;
            Ok(apply_truncate(value, *truncate))
        }

        ResolutionMode::Variable { name, truncate } => {
            let session = require_org(org)?.session;
            let value = match name {
                VariableName::OrgId => session.org_id.clone(),
                VariableName::InstanceUrl => {
                    session.instance_url.trim_end_matches('/').to_string()
                }
                VariableName::Username => session.username.clone(),
            };
            Ok(apply_truncate(value, *truncate))
        }
    }
}

fn require_org(org: Option<OrgHandle<'_>>) -> Result<OrgHandle<'_>, PatchError> {
    org.ok_or_else(|| {
        PatchError::Configuration(
            "no org connection configured; set an instance URL and run 'flexipatch auth'".into(),
        )
    })
}

/// Keep the first [`SHORT_ID_LEN`] characters when requested.
pub fn apply_truncate(value: String, truncate: bool) -> String {
    if truncate {
        value.chars().take(SHORT_ID_LEN).collect()
    } else {
        value
    }
}

/// Read a field from a record.
///
/// Dotted names walk relationship objects (`Owner.Name`). Strings are
/// returned as-is, numbers and booleans as their JSON text.
///
/// # Errors
///
/// Returns [`PatchError::MissingField`] if any step is absent or the value
/// is null, an object, or an array.
pub fn extract_field(record: &Map<String, Value>, field: &str) -> Result<String, PatchError> {
    let missing = || PatchError::MissingField {
        field: field.to_string(),
    };

    let mut parts = field.split('.');
    let first = parts.next().ok_or_else(missing)?;
    let mut current = record.get(first).ok_or_else(missing)?;
    for part in parts {
        current = current.get(part).ok_or_else(missing)?;
    }

    match current {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => Err(missing()),
    }
}
