// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Search and listing request models.

use crate::error::AppError;
use serde::Deserialize;
use utoipa::IntoParams;

/// Maximum accepted length of an index field name.
pub const MAX_FIELD_NAME_LEN: usize = 100;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Check that a field name is safe to use in a query.
///
/// Accepts ASCII letters, digits, `_`, `.` and `-` (dots address nested fields).
pub fn validate_field_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::BadRequest("Field name is empty".to_string()));
    }
    if name.len() > MAX_FIELD_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Field name exceeds {} characters",
            MAX_FIELD_NAME_LEN
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::BadRequest(format!(
            "Invalid field name '{}'",
            name
        )));
    }
    Ok(())
}

/// Field filters taken from the query string, e.g. `?skills=Rust&skills=Go&verified=true`.
///
/// Keeps fields in order of first appearance; repeated keys collect values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    fields: Vec<(String, Vec<String>)>,
}

impl SearchFilters {
    /// Group raw query pairs by field, rejecting empty filters and blank values.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields: Vec<(String, Vec<String>)> = Vec::new();

        for (field, value) in pairs {
            validate_field_name(&field)?;
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!(
                    "Value(s) for '{}' is empty",
                    field
                )));
            }

            match fields.iter_mut().find(|(name, _)| *name == field) {
                Some((_, values)) => values.push(value),
                None => fields.push((field, vec![value])),
            }
        }

        if fields.is_empty() {
            return Err(AppError::BadRequest(
                "At least one search field is required".to_string(),
            ));
        }

        Ok(Self { fields })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, values)| (field.as_str(), values.as_slice()))
    }

    /// First field and its first value.
    pub fn first(&self) -> Option<(&str, &str)> {
        self.fields
            .first()
            .and_then(|(field, values)| values.first().map(|v| (field.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Offset pagination for listing employees.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Offset of the first hit
    #[serde(default)]
    pub from: u32,
    /// Number of hits to return (1-100)
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Reject a zero size and clamp oversized pages.
    pub fn validated(self) -> Result<Self, AppError> {
        if self.size == 0 {
            return Err(AppError::BadRequest(
                "Size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            from: self.from,
            size: self.size.min(MAX_PAGE_SIZE),
        })
    }
}
