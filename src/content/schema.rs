//! Declared front-matter shapes
//!
//! A [`Schema`] lists the fields a metadata block may carry, their kind and
//! whether they are required. Validation returns a new mapping holding only
//! the declared fields, with dates normalized to RFC 3339 in UTC.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_yaml::{Mapping, Value};

use crate::helpers::url::is_absolute_http_url;

/// Expected kind of a front-matter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// Integer or float, NaN excluded
    Number,
    Date,
    /// Absolute `http(s)` URL, or a path under the schema's asset prefix
    AssetUrl,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Front-matter schema
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
    asset_prefix: String,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self {
            name,
            fields,
            asset_prefix: "/public".to_string(),
        }
    }

    /// Set the prefix accepted by [`FieldKind::AssetUrl`] fields
    pub fn with_asset_prefix(mut self, prefix: &str) -> Self {
        self.asset_prefix = prefix.to_string();
        self
    }

    /// Schema of a course's `index.md`
    pub fn course(asset_prefix: &str) -> Self {
        Self::new(
            "course",
            vec![
                Field::required("id", FieldKind::String),
                Field::required("title", FieldKind::String),
                Field::required("description", FieldKind::String),
                Field::optional("publishedAt", FieldKind::Date),
                Field::required("thumbnail", FieldKind::AssetUrl),
            ],
        )
        .with_asset_prefix(asset_prefix)
    }

    /// Schema of a section file
    pub fn section() -> Self {
        Self::new(
            "section",
            vec![
                Field::required("title", FieldKind::String),
                Field::required("order", FieldKind::Number),
            ],
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Validate `data` field by field
    ///
    /// Fails on the first field that is missing or of the wrong kind.
    /// Undeclared keys are dropped from the result.
    pub fn validate(&self, data: &Value) -> Result<Mapping, String> {
        let map = match data {
            Value::Mapping(map) => map,
            other => return Err(format!("expected a mapping, found {}", describe(other))),
        };

        let mut validated = Mapping::new();
        for field in &self.fields {
            match map.get(field.name) {
                Some(value) => {
                    let value = self
                        .check(field.kind, value)
                        .map_err(|reason| format!("field `{}`: {}", field.name, reason))?;
                    validated.insert(Value::String(field.name.to_string()), value);
                }
                None if field.required => {
                    return Err(format!("missing field `{}`", field.name));
                }
                None => {}
            }
        }
        Ok(validated)
    }

    fn check(&self, kind: FieldKind, value: &Value) -> Result<Value, String> {
        match (kind, value) {
            (FieldKind::String, Value::String(_)) => Ok(value.clone()),
            (FieldKind::Number, Value::Number(n)) if !n.is_nan() => Ok(value.clone()),
            (FieldKind::Number, Value::Number(_)) => Err("expected a number, found NaN".into()),
            (FieldKind::Date, Value::String(s)) => parse_date(s)
                .map(|dt| Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
                .ok_or_else(|| format!("{:?} is not a valid date", s)),
            (FieldKind::AssetUrl, Value::String(s)) => {
                if is_absolute_http_url(s) || s.starts_with(&self.asset_prefix) {
                    Ok(value.clone())
                } else {
                    Err(format!(
                        "{:?} is neither an http(s) URL nor under {}",
                        s, self.asset_prefix
                    ))
                }
            }
            (kind, other) => Err(format!(
                "expected {}, found {}",
                expected(kind),
                describe(other)
            )),
        }
    }
}

fn expected(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::String => "a string",
        FieldKind::Number => "a number",
        FieldKind::Date => "a date",
        FieldKind::AssetUrl => "a URL string",
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

lazy_static! {
    static ref YAML_DATE: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();
    static ref YAML_TIMESTAMP: Regex = Regex::new(concat!(
        r"^(\d{4})-(\d{1,2})-(\d{1,2})",
        r"(?:[Tt]|[ \t]+)(\d{1,2}):(\d{2}):(\d{2})(?:\.(\d*))?",
        r"(?:[ \t]*(Z|([-+])(\d{1,2})(?::(\d{2}))?))?$",
    ))
    .unwrap();
}

/// Parse a YAML timestamp; forms without a zone are taken as UTC
///
/// Accepts `YYYY-MM-DD`, or a date followed by `T` (or spaces) and
/// `HH:MM:SS[.fraction][Z|+HH[:MM]]`. Seconds are required.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Some(caps) = YAML_DATE.captures(s) {
        let date = NaiveDate::from_ymd_opt(
            number(&caps, 1)?,
            number(&caps, 2)?,
            number(&caps, 3)?,
        )?;
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    let caps = YAML_TIMESTAMP.captures(s)?;
    let date = NaiveDate::from_ymd_opt(number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?)?;
    let nanos = match caps.get(7) {
        Some(fraction) => {
            let digits = &fraction.as_str()[..fraction.len().min(9)];
            format!("{:0<9}", digits).parse().ok()?
        }
        None => 0,
    };
    let local = date.and_hms_nano_opt(
        number(&caps, 4)?,
        number(&caps, 5)?,
        number(&caps, 6)?,
        nanos,
    )?;

    let offset_minutes: i64 = match caps.get(9) {
        Some(sign) => {
            let minutes = number::<i64>(&caps, 10)? * 60 + number::<i64>(&caps, 11).unwrap_or(0);
            if sign.as_str() == "-" {
                -minutes
            } else {
                minutes
            }
        }
        None => 0,
    };

    Some(local.and_utc() - Duration::minutes(offset_minutes))
}

fn number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse().ok()
}
