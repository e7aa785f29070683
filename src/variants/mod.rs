//! Per-family request shapes: legal values, endpoint paths, and bodies.

pub mod dalle;
pub mod gpt_image;
pub mod stable_diffusion;
pub mod vision;

use crate::validation::AllowList;
use crate::{Error, Result};
use serde::Serialize;

/// Picks the requested token, falling back to the descriptor default, in allow-list spelling.
pub(crate) fn resolve(
    list: AllowList,
    requested: Option<&str>,
    default: Option<&str>,
) -> Option<String> {
    let token = requested.or(default)?;
    Some(
        list.canonical(token)
            .map(str::to_string)
            .unwrap_or_else(|| token.to_string()),
    )
}

pub(crate) fn to_json<T: Serialize>(model: &str, body: &T) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| {
        Error::Validation(format!("Failed to serialize {} request: {}", model, e))
    })
}
