//! Generator module - writes the course tree as JSON files
//!
//! Layout under the output directory:
//!
//! ```text
//! index.json                          # manifest: every course, no bodies
//! <course>/index.json                 # course with summarized sections
//! <course>/<section>/index.json       # full section
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

use crate::content::Course;
use crate::error::{BuildError, Result};

const INDEX_FILE: &str = "index.json";

/// Writes assembled courses to the output directory
pub struct Generator {
    output_dir: PathBuf,
}

impl Generator {
    /// Create a new generator
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the manifest, then every course and section concurrently
    ///
    /// Returns the number of files written.
    pub async fn generate(&self, courses: &[Course]) -> Result<usize> {
        let manifest_path = self.output_dir.join(INDEX_FILE);
        let entries: Vec<_> = courses.iter().map(Course::entry).collect();
        let manifest = to_json(&entries, &manifest_path)?;

        let outputs = courses
            .iter()
            .map(|course| self.prepare_course(course))
            .collect::<Result<Vec<_>>>()?;
        let files = 1 + outputs.iter().map(CourseOutput::files).sum::<usize>();

        create_dir(&self.output_dir).await?;
        write_file(&manifest_path, manifest).await?;
        tracing::info!("Generated {:?}", manifest_path);

        let tasks: Vec<JoinHandle<Result<()>>> = outputs
            .into_iter()
            .map(|output| tokio::spawn(output.write()))
            .collect();
        for task in tasks {
            task.await??;
        }

        Ok(files)
    }

    fn prepare_course(&self, course: &Course) -> Result<CourseOutput> {
        let dir = self.output_dir.join(&course.slug);
        let json = to_json(&course.detail(), &dir.join(INDEX_FILE))?;

        let sections = course
            .sections
            .iter()
            .map(|section| {
                let dir = dir.join(&section.slug);
                let json = to_json(section, &dir.join(INDEX_FILE))?;
                Ok(FileOutput { dir, json })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CourseOutput {
            course: FileOutput { dir, json },
            sections,
        })
    }
}

/// A directory holding a single `index.json`
struct FileOutput {
    dir: PathBuf,
    json: String,
}

impl FileOutput {
    async fn write(self) -> Result<()> {
        create_dir(&self.dir).await?;
        write_file(&self.dir.join(INDEX_FILE), self.json).await
    }
}

struct CourseOutput {
    course: FileOutput,
    sections: Vec<FileOutput>,
}

impl CourseOutput {
    fn files(&self) -> usize {
        1 + self.sections.len()
    }

    async fn write(self) -> Result<()> {
        let dir = self.course.dir.clone();
        self.course.write().await?;

        let tasks: Vec<JoinHandle<Result<()>>> = self
            .sections
            .into_iter()
            .map(|section| tokio::spawn(section.write()))
            .collect();
        for task in tasks {
            task.await??;
        }

        tracing::debug!("Generated {:?}", dir);
        Ok(())
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| BuildError::serialize(path, e))
}

async fn create_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| BuildError::io(dir, e))
}

async fn write_file(path: &Path, contents: String) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| BuildError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CourseFrontMatter, Section, SectionFrontMatter};
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    fn section(slug: &str, order: f64) -> Section {
        Section::new(
            SectionFrontMatter {
                title: slug.to_uppercase(),
                order,
            },
            slug.to_string(),
            format!("<p>{slug}</p>\n"),
        )
    }

    fn course(slug: &str, sections: Vec<Section>) -> Course {
        Course::new(
            CourseFrontMatter {
                id: format!("{slug}-id"),
                title: slug.to_uppercase(),
                description: "about".to_string(),
                published_at: None,
                thumbnail: "https://cdn.example.com/t.png".to_string(),
            },
            slug.to_string(),
            format!("<p>{slug} body</p>\n"),
            sections,
        )
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_generate_layout() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist/course");
        let courses = vec![
            course("rust", vec![section("intro", 1.0), section("ownership", 2.0)]),
            course("go", vec![]),
        ];

        let written = Generator::new(&out).generate(&courses).await.unwrap();
        assert_eq!(written, 5);

        let manifest = read_json(&out.join("index.json"));
        let entries = manifest.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["slug"], "rust");
        assert_eq!(entries[0]["sectionsCount"], 2);
        assert_eq!(entries[1]["sectionsCount"], 0);
        assert!(entries[0].get("content").is_none());
        assert!(entries[0].get("sections").is_none());

        let rust = read_json(&out.join("rust/index.json"));
        assert_eq!(rust["content"], "<p>rust body</p>\n");
        let sections = rust["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1]["slug"], "ownership");
        assert!(sections[0].get("content").is_none());

        let intro = read_json(&out.join("rust/intro/index.json"));
        assert_eq!(intro["title"], "INTRO");
        assert_eq!(intro["order"], 1);
        assert_eq!(intro["content"], "<p>intro</p>\n");

        assert!(out.join("go/index.json").is_file());
    }

    #[tokio::test]
    async fn test_generate_pretty_prints() {
        let dir = TempDir::new().unwrap();
        Generator::new(dir.path())
            .generate(&[course("rust", vec![])])
            .await
            .unwrap();

        let text = fs::read_to_string(dir.path().join("index.json")).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": \"rust-id\""), "{text}");
    }

    #[tokio::test]
    async fn test_generate_empty_list() {
        let dir = TempDir::new().unwrap();
        let written = Generator::new(dir.path().join("out"))
            .generate(&[])
            .await
            .unwrap();
        assert_eq!(written, 1);
        let text = fs::read_to_string(dir.path().join("out/index.json")).unwrap();
        assert_eq!(text, "[]");
    }
}
