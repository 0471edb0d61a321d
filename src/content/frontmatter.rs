//! Front-matter parsing and validation

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::schema::Schema;
use crate::error::{BuildError, Result};

/// Separates the metadata block from the body
pub const DELIMITER: &str = "---";

/// Post-processing applied to a validated field value
pub type FieldTransform = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Field name to transform, applied after schema validation succeeds
#[derive(Default)]
pub struct FieldTransforms {
    transforms: BTreeMap<&'static str, FieldTransform>,
}

impl FieldTransforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, field: &'static str, transform: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.transforms.insert(field, Box::new(transform));
        self
    }

    /// Transform a string field; non-string values pass through
    pub fn with_str<F>(self, field: &'static str, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.with(field, move |value| match value.as_str() {
            Some(s) => Value::String(transform(s)),
            None => value.clone(),
        })
    }

    fn apply(&self, fields: &mut Mapping) {
        for (name, transform) in &self.transforms {
            if let Some(value) = fields.get_mut(*name) {
                *value = transform(value);
            }
        }
    }
}

impl fmt::Debug for FieldTransforms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.transforms.keys()).finish()
    }
}

/// A validated document: typed front-matter and its trimmed Markdown body
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    pub front_matter: T,
    pub content: String,
}

/// Split `text` into front-matter and body, then validate both
///
/// Everything before the first `---` is discarded, the block up to the second
/// `---` is the front-matter, and the rest (including any later `---`) is the body.
pub fn parse<T>(
    text: &str,
    path: &Path,
    schema: &Schema,
    transforms: &FieldTransforms,
) -> Result<Document<T>>
where
    T: DeserializeOwned,
{
    let mut parts = text.split(DELIMITER);
    let _preamble = parts.next();
    let block = match parts.next() {
        Some(block) if !block.is_empty() => block,
        _ => return Err(BuildError::frontmatter_missing(path)),
    };
    let body = parts.collect::<Vec<_>>().join(DELIMITER);

    let data: Value =
        serde_yaml::from_str(block).map_err(|e| BuildError::frontmatter_malformed(path, e))?;

    let mut fields = schema
        .validate(&data)
        .map_err(|reason| BuildError::frontmatter_invalid(path, reason))?;
    transforms.apply(&mut fields);

    let front_matter: T = serde_yaml::from_value(Value::Mapping(fields))
        .map_err(|e| BuildError::frontmatter_invalid(path, e))?;

    let content = body.trim();
    if content.is_empty() {
        return Err(BuildError::content_empty(path));
    }

    tracing::debug!("Validated {} front-matter in {:?}", schema.name(), path);

    Ok(Document {
        front_matter,
        content: content.to_string(),
    })
}
