//! Environment variable parsing utilities for configuration.

use crate::errors::Error;

use super::{ENV_DB_URL, ENV_EMBEDDING_DIMS, Lookup};

const POSTGRES_SCHEME: &str = "postgresql://";

/// Parse environment variable value or return error if empty/whitespace.
fn parse_env_string(name: &str, value: &str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(value.trim().to_string())
}

/// Parse the embedding dimension. Must be a positive integer.
fn parse_env_dims(value: &str) -> Result<usize, Error> {
    let dims: i64 = value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{ENV_EMBEDDING_DIMS} must be an integer.")))?;
    if dims <= 0 {
        return Err(Error::Config(format!(
            "{ENV_EMBEDDING_DIMS} must be a positive integer."
        )));
    }
    usize::try_from(dims)
        .map_err(|_| Error::Config(format!("{ENV_EMBEDDING_DIMS} is out of range.")))
}

/// Parse a boolean flag value.
fn parse_env_bool(name: &str, value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "Invalid {name} value: {other:?} (expected true or false)"
        ))),
    }
}

/// Resolve the database URL from the environment only.
///
/// The URL is required and must use the `postgresql://` scheme.
pub fn resolve_db_url(lookup: Lookup<'_>) -> Result<String, Error> {
    match lookup(ENV_DB_URL) {
        Some(url) if url.trim().starts_with(POSTGRES_SCHEME) => Ok(url.trim().to_string()),
        _ => Err(Error::Config(format!(
            "{ENV_DB_URL} is not set or is not a valid {POSTGRES_SCHEME} URL. \
             Please set it in your environment or .env file."
        ))),
    }
}

/// Apply a string environment override; empty values are rejected.
pub fn apply_string_override(
    lookup: Lookup<'_>,
    name: &str,
    target: &mut String,
) -> Result<(), Error> {
    if let Some(val) = lookup(name) {
        *target = parse_env_string(name, &val)?;
    }
    Ok(())
}

/// Apply MEM0_EMBEDDING_DIMS environment variable override.
pub fn apply_dims_override(lookup: Lookup<'_>, dims: &mut usize) -> Result<(), Error> {
    if let Some(val) = lookup(ENV_EMBEDDING_DIMS) {
        *dims = parse_env_dims(&val)?;
    }
    Ok(())
}

/// Apply a boolean environment override.
pub fn apply_bool_override(lookup: Lookup<'_>, name: &str, target: &mut bool) -> Result<(), Error> {
    if let Some(val) = lookup(name) {
        *target = parse_env_bool(name, &val)?;
    }
    Ok(())
}

/// Read an optional credential. Unset and blank are both `None`.
pub fn optional_secret(lookup: Lookup<'_>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
