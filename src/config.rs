//! Token file loading.
//!
//! The token lives in a small JSON document, `{"token": "<app token>"}`, so it never has to
//! appear on the command line.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read token file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse token file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("environment variable {name} referenced in {input:?} is not set")]
    MissingVariable { name: String, input: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenFile {
    pub token: String,
}

/// Read the token from `path`.
///
/// The token is returned as stored; an empty value is rejected when a client is built.
pub fn load_token(path: impl AsRef<Path>) -> Result<String, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    let parsed: TokenFile = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;
    Ok(parsed.token)
}

/// Expand `$NAME` and `${NAME}` references using the process environment.
pub fn expand_env(input: &str) -> Result<String, ConfigError> {
    expand_with(input, |name| env::var(name).ok())
}

fn expand_with(
    input: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(idx) = rest.find('$') {
        out.push_str(&rest[..idx]);
        let after = &rest[idx + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        if name.is_empty() {
            out.push('$');
            rest = after;
            continue;
        }

        let value = lookup(name).ok_or_else(|| ConfigError::MissingVariable {
            name: name.to_owned(),
            input: input.to_owned(),
        })?;
        out.push_str(&value);
        rest = &after[consumed..];
    }

    out.push_str(rest);
    Ok(out)
}
