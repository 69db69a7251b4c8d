use std::str::FromStr;

use crate::error::CommonError;

/// Read an optional environment variable and parse it.
///
/// Unset or empty values yield `Ok(None)`; a value that fails to parse is an error rather
/// than a silent fallback to the default.
pub fn optional<T>(var: &str) -> Result<Option<T>, CommonError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CommonError::InvalidEnv {
                var: var.to_string(),
                message: e.to_string(),
            }),
        _ => Ok(None),
    }
}

/// Like [`optional`], falling back to `default` when the variable is unset.
pub fn or_default<T>(var: &str, default: T) -> Result<T, CommonError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(optional(var)?.unwrap_or(default))
}
