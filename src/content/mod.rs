//! Content module - handles courses, sections, and content processing

pub mod course;
pub mod frontmatter;
pub mod loader;
mod markdown;
pub mod scan;
pub mod schema;

pub use course::{Course, CourseFrontMatter, Section, SectionFrontMatter};
pub use frontmatter::{Document, FieldTransforms};
pub use loader::{sort_courses, CourseLoader, ValidationReport};
pub use markdown::MarkdownRenderer;
pub use schema::Schema;
