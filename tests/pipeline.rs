//! End-to-end build and validate runs over a temporary course tree

use std::fs;
use std::path::Path;

use course_cms::config::SiteConfig;
use course_cms::{BuildError, CourseCms};
use serde_json::Value;
use tempfile::TempDir;

const ORIGIN: &str = "https://cms.example.com";

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn site(dir: &TempDir) -> CourseCms {
    let config = SiteConfig {
        origin: ORIGIN.to_string(),
        ..Default::default()
    };
    CourseCms::with_config(dir.path(), config).unwrap()
}

fn course_index(id: &str, published_at: Option<&str>) -> String {
    let date = published_at
        .map(|d| format!("publishedAt: {d}\n"))
        .unwrap_or_default();
    format!(
        "---\nid: {id}\ntitle: {id} course\ndescription: About {id}\n{date}thumbnail: /public/{id}.png\n---\n\n# {id}\n\n![hero](/public/{id}/hero.png)\n"
    )
}

fn section(title: &str, order: i64) -> String {
    format!("---\ntitle: {title}\norder: {order}\n---\n\n{title} body with ![x](https://cdn.example.com/x.png)\n")
}

#[tokio::test]
async fn build_writes_manifest_course_and_sections() {
    let dir = TempDir::new().unwrap();
    let course = dir.path().join("course");
    write(&course, "rust/index.md", &course_index("rust", Some("2023-01-01")));
    write(&course, "rust/ownership.md", &section("Ownership", 2));
    write(&course, "rust/intro.md", &section("Intro", 1));

    let cms = site(&dir);
    cms.build().await.unwrap();
    let out = dir.path().join("dist/course");

    let manifest = read_json(&out.join("index.json"));
    let entries = manifest.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["sectionsCount"], 2);
    assert_eq!(entries[0]["slug"], "rust");
    assert_eq!(entries[0]["publishedAt"], "2023-01-01T00:00:00.000Z");
    assert_eq!(entries[0]["thumbnail"], format!("{ORIGIN}/public/rust.png"));
    assert!(entries[0].get("content").is_none());

    let detail = read_json(&out.join("rust/index.json"));
    let sections = detail["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0]["slug"], "intro");
    assert_eq!(sections[1]["slug"], "ownership");
    assert!(sections.iter().all(|s| s.get("content").is_none()));
    let body = detail["content"].as_str().unwrap();
    assert!(body.contains(&format!(r#"src="{ORIGIN}/public/rust/hero.png""#)), "{body}");

    for slug in ["intro", "ownership"] {
        let full = read_json(&out.join("rust").join(slug).join("index.json"));
        let content = full["content"].as_str().unwrap();
        assert!(content.starts_with("<p>"), "{content}");
        assert!(content.contains(r#"src="https://cdn.example.com/x.png""#));
    }
}

#[tokio::test]
async fn build_orders_courses_by_publish_date() {
    let dir = TempDir::new().unwrap();
    let course = dir.path().join("course");
    write(&course, "a/index.md", &course_index("a", None));
    write(&course, "b/index.md", &course_index("b", Some("2023-01-01")));
    write(&course, "c/index.md", &course_index("c", None));
    write(&course, "d/index.md", &course_index("d", Some("2022-01-01")));

    site(&dir).build().await.unwrap();

    let manifest = read_json(&dir.path().join("dist/course/index.json"));
    let slugs: Vec<&str> = manifest
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["d", "b", "a", "c"]);
}

#[tokio::test]
async fn build_fails_on_missing_frontmatter() {
    let dir = TempDir::new().unwrap();
    let course = dir.path().join("course");
    write(&course, "rust/index.md", &course_index("rust", None));
    write(&course, "rust/intro.md", "# No front-matter here\n");

    let err = site(&dir).build().await.unwrap_err();
    let err = err.downcast_ref::<BuildError>().unwrap();
    assert!(matches!(err, BuildError::FrontmatterMissing { .. }));
    assert_eq!(err.path(), Some(course.join("rust/intro.md").as_path()));
}

#[tokio::test]
async fn validate_reports_malformed_section_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let course = dir.path().join("course");
    write(&course, "rust/index.md", &course_index("rust", None));
    write(&course, "rust/intro.md", &section("Intro", 1));
    write(&course, "rust/broken.md", "---\ntitle: \"unterminated\norder: 2\n---\nbody\n");
    write(&course, "go/index.md", &course_index("go", Some("2024-05-01")));

    let cms = site(&dir);
    let err = cms.validate().await.unwrap_err();
    let err = err.downcast_ref::<BuildError>().unwrap();
    assert!(matches!(err, BuildError::FrontmatterMalformed { .. }));
    assert_eq!(err.path(), Some(course.join("rust/broken.md").as_path()));
    assert!(!dir.path().join("dist").exists());
}

#[tokio::test]
async fn validate_passes_on_clean_tree() {
    let dir = TempDir::new().unwrap();
    let course = dir.path().join("course");
    write(&course, "rust/index.md", &course_index("rust", None));
    write(&course, "rust/intro.md", &section("Intro", 1));

    let report = site(&dir).validate().await.unwrap();
    assert_eq!(report.courses, 1);
    assert_eq!(report.sections, 1);
    assert!(!dir.path().join("dist").exists());
}

#[tokio::test]
async fn build_fails_when_course_dir_is_missing() {
    let dir = TempDir::new().unwrap();
    let err = site(&dir).build().await.unwrap_err();
    let err = err.downcast_ref::<BuildError>().unwrap();
    assert!(matches!(err, BuildError::Io { .. }));
    assert_eq!(err.path(), Some(dir.path().join("course").as_path()));
}
