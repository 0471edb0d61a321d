//! Course and Section models

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Validated front-matter of a course's `index.md`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFrontMatter {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail: String,
}

/// Validated front-matter of a section file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionFrontMatter {
    pub title: String,
    #[serde(serialize_with = "serialize_order")]
    pub order: f64,
}

/// A course with its rendered body and ordered sections
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub published_at: Option<DateTime<Utc>>,
    /// Absolute thumbnail URL
    pub thumbnail: String,
    /// Directory name
    pub slug: String,
    /// Rendered HTML
    pub content: String,
    pub sections: Vec<Section>,
}

impl Course {
    pub fn new(
        front_matter: CourseFrontMatter,
        slug: String,
        content: String,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            id: front_matter.id,
            title: front_matter.title,
            description: front_matter.description,
            published_at: front_matter.published_at,
            thumbnail: front_matter.thumbnail,
            slug,
            content,
            sections,
        }
    }

    /// Manifest entry: no body, no sections, only their count
    pub fn entry(&self) -> CourseEntry<'_> {
        CourseEntry {
            id: &self.id,
            title: &self.title,
            description: &self.description,
            published_at: self.published_at,
            thumbnail: &self.thumbnail,
            slug: &self.slug,
            sections_count: self.sections.len(),
        }
    }

    /// Full course with summarized sections
    pub fn detail(&self) -> CourseDetail<'_> {
        CourseDetail {
            id: &self.id,
            title: &self.title,
            description: &self.description,
            published_at: self.published_at,
            thumbnail: &self.thumbnail,
            slug: &self.slug,
            content: &self.content,
            sections: self.sections.iter().map(Section::summary).collect(),
        }
    }
}

/// A section of a course
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: String,
    #[serde(serialize_with = "serialize_order")]
    pub order: f64,
    /// Rendered HTML
    pub content: String,
    /// File name without extension
    pub slug: String,
}

impl Section {
    pub fn new(front_matter: SectionFrontMatter, slug: String, content: String) -> Self {
        Self {
            title: front_matter.title,
            order: front_matter.order,
            content,
            slug,
        }
    }

    pub fn summary(&self) -> SectionSummary<'_> {
        SectionSummary {
            title: &self.title,
            order: self.order,
            slug: &self.slug,
        }
    }
}

/// Course as listed in the root manifest
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail: &'a str,
    pub slug: &'a str,
    pub sections_count: usize,
}

/// Course as written to its own directory
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail: &'a str,
    pub slug: &'a str,
    pub content: &'a str,
    pub sections: Vec<SectionSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SectionSummary<'a> {
    pub title: &'a str,
    #[serde(serialize_with = "serialize_order")]
    pub order: f64,
    pub slug: &'a str,
}

/// `2023-01-01T00:00:00.000Z`
fn serialize_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

/// Integral orders are written as integers
fn serialize_order<S>(order: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if order.fract() == 0.0 && order.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*order as i64)
    } else {
        serializer.serialize_f64(*order)
    }
}
