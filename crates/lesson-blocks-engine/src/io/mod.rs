//! Filesystem access for the lesson library.
//!
//! Lessons are markdown files under a content root; paths are handled as
//! [`RelativePath`]s against that root so a library can be relocated without
//! touching stored references.

use crate::models::LessonFile;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Lesson not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
}

/// Read a lesson's markdown from the content root.
pub fn read_lesson(relative_path: &RelativePath, content_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(content_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write a lesson's markdown under the content root, creating parent
/// directories as needed.
pub fn write_lesson(
    relative_path: &RelativePath,
    content_root: &Path,
    markdown: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(content_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, markdown).map_err(IoError::Io)
}

/// Scan the content root for markdown files, sorted by path.
pub fn scan_lesson_files(content_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !content_root.exists() {
        return Err(IoError::InvalidContentDir(
            "content directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(content_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// List the lessons under the content root as [`LessonFile`] models.
pub fn list_lessons(content_root: &Path) -> Result<Vec<LessonFile>, IoError> {
    let files = scan_lesson_files(content_root)?;

    let mut lessons = Vec::new();
    for path in files {
        let relative = path
            .strip_prefix(content_root)
            .ok()
            .and_then(|p| RelativePathBuf::from_path(p).ok());
        if let Some(relative) = relative {
            lessons.push(LessonFile::new(relative));
        }
    }
    Ok(lessons)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_content_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidContentDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn library() -> TempDir {
        let dir = TempDir::new().expect("temp dir");
        fs::create_dir_all(dir.path().join("radiography")).unwrap();
        fs::write(dir.path().join("intro.md"), "# Intro").unwrap();
        fs::write(
            dir.path().join("radiography/chest.md"),
            "# Chest\n\nPA view.",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not a lesson").unwrap();
        dir
    }

    #[test]
    fn scan_finds_only_markdown_sorted() {
        let dir = library();
        let files = scan_lesson_files(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["intro.md", "radiography/chest.md"]);
    }

    #[test]
    fn read_round_trips_through_write() {
        let dir = library();
        let rel = RelativePath::new("radiography/skull.md");

        write_lesson(rel, dir.path(), "# Skull").unwrap();
        let content = read_lesson(rel, dir.path()).unwrap();
        assert_eq!(content, "# Skull");
    }

    #[test]
    fn read_missing_lesson_is_not_found() {
        let dir = library();
        let err = read_lesson(RelativePath::new("missing.md"), dir.path()).unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));
    }

    #[test]
    fn list_lessons_yields_relative_models() {
        let dir = library();
        let lessons = list_lessons(dir.path()).unwrap();

        assert_eq!(lessons.len(), 2);
        assert_eq!(lessons[0].title(), "intro");
        assert_eq!(lessons[1].relative_path().as_str(), "radiography/chest.md");
    }

    #[test]
    fn missing_content_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("nope");
        assert!(matches!(
            validate_content_dir(&gone),
            Err(IoError::InvalidContentDir(_))
        ));
        assert!(matches!(
            scan_lesson_files(&gone),
            Err(IoError::InvalidContentDir(_))
        ));
    }
}
