//! Resume Document: the normalized input both renderers consume.
//!
//! Every field is optional on the wire. Missing or `null` values become empty
//! strings or empty sequences, so the renderers never branch on presence.
//! Two fields accept alternate shapes:
//! - `education` may be a mapping of keyed entries; its values are taken in input order.
//! - `projects[].tech` (and skill lists) may be a comma-separated string.
//!
//! Scalar text fields also take numbers and booleans, written out as text.

use serde::{Deserialize, Serialize};

use crate::errors::RenderError;
use crate::models::de::{
    entries_in_order, list_or_csv, null_as_default, opt_string_or_scalar, seq_or_map,
    string_or_scalar,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    #[serde(deserialize_with = "string_or_scalar")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: Contact,
    #[serde(deserialize_with = "string_or_scalar")]
    pub summary: String,
    /// Category → skills, in the order the categories appear in the input.
    #[serde(deserialize_with = "entries_in_order")]
    pub skills: Vec<SkillCategory>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "seq_or_map")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub certificates: Vec<String>,
}

/// Contact fields. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "opt_string_or_scalar")]
    pub email: Option<String>,
    #[serde(deserialize_with = "opt_string_or_scalar")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "opt_string_or_scalar")]
    pub location: Option<String>,
    #[serde(deserialize_with = "opt_string_or_scalar")]
    pub website: Option<String>,
    #[serde(deserialize_with = "opt_string_or_scalar")]
    pub github: Option<String>,
    #[serde(deserialize_with = "opt_string_or_scalar")]
    pub linkedin: Option<String>,
}

impl Contact {
    /// Present fields in display order: location, email, website, phone, github, linkedin.
    pub fn present_fields(&self) -> Vec<&str> {
        [
            &self.location,
            &self.email,
            &self.website,
            &self.phone,
            &self.github,
            &self.linkedin,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref().map(str::trim))
        .filter(|value| !value.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(deserialize_with = "string_or_scalar")]
    pub company: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub title: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub location: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub start: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub end: String,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "string_or_scalar")]
    pub program: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub school: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub location: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub start: String,
    #[serde(deserialize_with = "string_or_scalar")]
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "string_or_scalar")]
    pub title: String,
    #[serde(deserialize_with = "list_or_csv")]
    pub tech: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

impl ResumeDocument {
    /// Parses a JSON request body.
    ///
    /// Syntax errors are reported separately from shape errors: the caller treats the
    /// former as a bad request and the latter as a malformed document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DocumentParseError> {
        serde_json::from_slice(bytes).map_err(|e| match e.classify() {
            serde_json::error::Category::Data => {
                DocumentParseError::Malformed(RenderError::MalformedInput(e.to_string()))
            }
            _ => DocumentParseError::Syntax(e.to_string()),
        })
    }

    /// Converts an already-parsed JSON value.
    ///
    /// Mapping-shaped fields follow the key order of `serde_json::Map`, which is sorted;
    /// use [`ResumeDocument::from_json`] when input order matters.
    #[cfg(test)]
    pub fn from_value(value: serde_json::Value) -> Result<Self, RenderError> {
        serde_json::from_value(value).map_err(|e| RenderError::MalformedInput(e.to_string()))
    }

    /// First whitespace-separated token of the name, used for export file names.
    pub fn first_name_token(&self) -> Option<&str> {
        self.name.split_whitespace().next()
    }
}

#[derive(Debug)]
pub enum DocumentParseError {
    Syntax(String),
    Malformed(RenderError),
}
