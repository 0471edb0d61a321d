//! Content loader - assembles courses and sections from the course directory
//!
//! Every course and every section is loaded by its own task. Tasks return
//! their record and are joined in discovery order, so the first failure
//! reported is deterministic for a given tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::course::{Course, CourseFrontMatter, Section, SectionFrontMatter};
use super::frontmatter::{self, Document, FieldTransforms};
use super::markdown::MarkdownRenderer;
use super::scan;
use super::schema::Schema;
use crate::config::SiteConfig;
use crate::error::{BuildError, Result};
use crate::helpers::AssetResolver;

/// Outcome of a successful validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub courses: usize,
    pub sections: usize,
}

impl ValidationReport {
    pub fn files(&self) -> usize {
        self.courses + self.sections
    }
}

struct Shared {
    renderer: MarkdownRenderer,
    course_schema: Schema,
    section_schema: Schema,
    course_transforms: FieldTransforms,
    section_transforms: FieldTransforms,
}

/// Loads courses from the course directory
#[derive(Clone)]
pub struct CourseLoader {
    course_dir: PathBuf,
    shared: Arc<Shared>,
}

impl CourseLoader {
    /// Create a new loader for `course_dir`
    pub fn new(course_dir: impl Into<PathBuf>, config: &SiteConfig) -> Self {
        let assets = AssetResolver::from_config(config);
        let thumbnails = assets.clone();
        let shared = Shared {
            renderer: MarkdownRenderer::new(assets),
            course_schema: Schema::course(&config.asset_prefix),
            section_schema: Schema::section(),
            course_transforms: FieldTransforms::new()
                .with_str("thumbnail", move |src| thumbnails.resolve(src)),
            section_transforms: FieldTransforms::new(),
        };
        Self {
            course_dir: course_dir.into(),
            shared: Arc::new(shared),
        }
    }

    fn parse_course(&self, text: &str, path: &Path) -> Result<Document<CourseFrontMatter>> {
        let shared = &self.shared;
        frontmatter::parse(text, path, &shared.course_schema, &shared.course_transforms)
    }

    fn parse_section(&self, text: &str, path: &Path) -> Result<Document<SectionFrontMatter>> {
        let shared = &self.shared;
        frontmatter::parse(text, path, &shared.section_schema, &shared.section_transforms)
    }

    /// Load, render and sort every course
    pub async fn load_courses(&self) -> Result<Vec<Course>> {
        let root = self.course_dir.clone();
        let course_dirs = scan_blocking(move || scan::directories(&root)).await?;

        let tasks: Vec<JoinHandle<Result<Course>>> = course_dirs
            .into_iter()
            .map(|dir| {
                let loader = self.clone();
                tokio::spawn(async move { loader.load_course(dir).await })
            })
            .collect();

        let mut courses = Vec::with_capacity(tasks.len());
        for task in tasks {
            courses.push(task.await??);
        }

        sort_courses(&mut courses);
        Ok(courses)
    }

    /// Load a single course directory
    async fn load_course(&self, dir: PathBuf) -> Result<Course> {
        let index_path = dir.join("index.md");
        let text = read_text(&index_path).await?;
        let doc = self.parse_course(&text, &index_path)?;

        let course_root = dir.clone();
        let section_paths =
            scan_blocking(move || scan::files(&course_root, scan::is_section_file)).await?;
        let tasks: Vec<JoinHandle<Result<Section>>> = section_paths
            .into_iter()
            .map(|path| {
                let loader = self.clone();
                tokio::spawn(async move { loader.load_section(path).await })
            })
            .collect();

        let mut sections = Vec::with_capacity(tasks.len());
        for task in tasks {
            sections.push(task.await??);
        }

        let slug = scan::dir_slug(&index_path);
        tracing::debug!("Loaded course {} with {} sections", slug, sections.len());

        let content = self.shared.renderer.render(&doc.content);
        Ok(Course::new(doc.front_matter, slug, content, sections))
    }

    /// Load a single section file
    async fn load_section(&self, path: PathBuf) -> Result<Section> {
        let text = read_text(&path).await?;
        let doc = self.parse_section(&text, &path)?;
        let content = self.shared.renderer.render(&doc.content);
        Ok(Section::new(doc.front_matter, scan::file_slug(&path), content))
    }

    /// Validate every course and section file without rendering
    ///
    /// All files are checked and every failure is logged; the first failure in
    /// discovery order (course files, then section files) is returned.
    pub async fn validate(&self) -> Result<ValidationReport> {
        let root = self.course_dir.clone();
        let course_scan = scan_blocking(move || scan::files_deep(&root, scan::is_index_file));
        let root = self.course_dir.clone();
        let section_scan = scan_blocking(move || scan::files_deep(&root, scan::is_section_file));

        let (course_files, section_files) = tokio::try_join!(course_scan, section_scan)?;

        let report = ValidationReport {
            courses: course_files.len(),
            sections: section_files.len(),
        };

        let mut tasks: Vec<JoinHandle<Result<()>>> = Vec::with_capacity(report.files());
        for path in course_files {
            let loader = self.clone();
            tasks.push(tokio::spawn(async move {
                let text = read_text(&path).await?;
                loader.parse_course(&text, &path).map(drop)
            }));
        }
        for path in section_files {
            let loader = self.clone();
            tasks.push(tokio::spawn(async move {
                let text = read_text(&path).await?;
                loader.parse_section(&text, &path).map(drop)
            }));
        }

        let mut first_error = None;
        let mut failed = 0;
        for task in tasks {
            if let Err(err) = task.await? {
                failed += 1;
                match err.path() {
                    Some(path) => tracing::error!("{} ({:?})", err, path),
                    None => tracing::error!("{}", err),
                }
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => {
                tracing::error!("{} of {} files failed validation", failed, report.files());
                Err(err)
            }
            None => Ok(report),
        }
    }
}

/// Run a directory walk on the blocking pool
async fn scan_blocking<T, F>(walk: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(walk).await?
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| BuildError::io(path, e))
}

/// Order sections by `order` within each course, and courses by publish date
///
/// Undated courses go last. Both sorts are stable, so ties keep discovery order.
pub fn sort_courses(courses: &mut [Course]) {
    for course in courses.iter_mut() {
        course
            .sections
            .sort_by(|a, b| a.order.total_cmp(&b.order));
    }
    courses.sort_by_key(|course| (course.published_at.is_none(), course.published_at));
}
