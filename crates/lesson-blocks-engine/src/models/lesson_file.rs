use relative_path::{RelativePath, RelativePathBuf};

/// A lesson in the content library: a markdown file addressed relative to
/// the content root, with a display title derived from its file name.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonFile {
    relative_path: RelativePathBuf,
    title: String,
}

impl LessonFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let title = relative_path
            .file_name()
            .map(|name| name.strip_suffix(".md").unwrap_or(name))
            .unwrap_or("Untitled")
            .to_string();

        Self {
            relative_path,
            title,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without the `.md` extension, used as the lesson title in
    /// listings.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Full relative path without the `.md` extension, for window titles and
    /// breadcrumbs.
    pub fn slug(&self) -> String {
        let path = self.relative_path.as_str();
        path.strip_suffix(".md").unwrap_or(path).to_string()
    }
}

impl From<RelativePathBuf> for LessonFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}
