//! The searchable entry model.

use std::{fmt, path::Path};

use serde::Serialize;

use crate::FieldKey;

/// Extension of the primary document type.
pub const DOCUMENT_EXTENSION: &str = "md";

/// One searchable unit in the catalog.
///
/// Every entry has a display `name`, a `basename` without extension and a `path` that
/// uniquely identifies it within a catalog. Kind-specific data lives in [`EntryKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    /// Display name including the extension.
    pub name: String,
    /// Display name without the extension.
    pub basename: String,
    /// Unique identifier within the catalog (vault-relative path or URL).
    pub path: String,
    /// Kind-specific payload.
    pub kind: EntryKind,
}

/// The kind of an entry and its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// A file in the vault, or a placeholder for one that would be created.
    File(FileEntry),
    /// A link target referenced by some document that does not exist yet.
    Unresolved,
    /// A navigable external location.
    WebLink {
        /// Target URL.
        url: String,
    },
}

/// Payload of a file entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Lowercased extension without the dot (empty when the file has none).
    pub extension: String,
    /// Category derived from the extension.
    pub file_type: FileType,
    /// False for a synthesized "would create" placeholder.
    pub created: bool,
    /// Document metadata; only present for [`FileType::Markdown`].
    pub document: Option<DocumentMeta>,
}

/// Metadata carried by primary documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentMeta {
    /// Alternative names, in frontmatter order.
    pub aliases: Vec<String>,
    /// Document title when it differs from the basename.
    pub title: Option<String>,
    /// Section headings in document order.
    pub headings: Vec<String>,
}

/// File category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Markdown document; the only type with aliases, title and headings.
    Markdown,
    /// Canvas board.
    Canvas,
    /// PDF document.
    Pdf,
    /// Raster or vector image.
    Image,
    /// Audio file.
    Audio,
    /// Video file.
    Video,
    /// Anything else.
    Other,
}

impl FileType {
    /// Classifies a lowercased extension.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "md" | "markdown" => Self::Markdown,
            "canvas" => Self::Canvas,
            "pdf" => Self::Pdf,
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "svg" | "webp" | "avif" => Self::Image,
            "mp3" | "wav" | "m4a" | "ogg" | "flac" | "3gp" => Self::Audio,
            "mp4" | "webm" | "ogv" | "mov" | "mkv" => Self::Video,
            _ => Self::Other,
        }
    }

    /// Returns the lowercase name used in filters and output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Canvas => "canvas",
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Other => "other",
        }
    }

    /// Parses a type name as produced by [`FileType::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        let parsed = match name {
            "markdown" => Self::Markdown,
            "canvas" => Self::Canvas,
            "pdf" => Self::Pdf,
            "image" => Self::Image,
            "audio" => Self::Audio,
            "video" => Self::Video,
            "other" => Self::Other,
            _ => return None,
        };
        Some(parsed)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SearchEntry {
    /// Creates an existing file entry from a vault-relative path.
    ///
    /// Markdown files get an empty [`DocumentMeta`]; use [`SearchEntry::document`] to
    /// attach parsed metadata.
    pub fn file(path: &str) -> Self {
        let (name, basename, extension) = split_path(path);
        let file_type = FileType::from_extension(&extension);
        let document = (file_type == FileType::Markdown).then(DocumentMeta::default);
        Self {
            name,
            basename,
            path: path.to_string(),
            kind: EntryKind::File(FileEntry {
                extension,
                file_type,
                created: true,
                document,
            }),
        }
    }

    /// Creates an existing markdown document entry with metadata.
    pub fn document(path: &str, meta: DocumentMeta) -> Self {
        let mut entry = Self::file(path);
        if let EntryKind::File(file) = &mut entry.kind {
            file.file_type = FileType::Markdown;
            file.document = Some(meta);
        }
        entry
    }

    /// Creates a "would create" placeholder for a new markdown note named `basename`.
    pub fn placeholder(basename: &str) -> Self {
        let mut entry = Self::file(&format!("{basename}.{DOCUMENT_EXTENSION}"));
        if let EntryKind::File(file) = &mut entry.kind {
            file.created = false;
        }
        entry
    }

    /// Creates an entry for a link target that does not exist yet.
    ///
    /// Targets without an extension are assumed to be markdown notes.
    pub fn unresolved(target: &str) -> Self {
        let target = target.trim();
        let has_extension = Path::new(target).extension().is_some();
        let path = if has_extension {
            target.to_string()
        } else {
            format!("{target}.{DOCUMENT_EXTENSION}")
        };
        let (name, basename, _) = split_path(&path);
        Self {
            name,
            basename,
            path,
            kind: EntryKind::Unresolved,
        }
    }

    /// Creates a web link entry; the URL doubles as its path.
    pub fn web_link(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            basename: name.to_string(),
            path: url.to_string(),
            kind: EntryKind::WebLink {
                url: url.to_string(),
            },
        }
    }

    /// Returns the document metadata, if this is a markdown file.
    pub fn document_meta(&self) -> Option<&DocumentMeta> {
        match &self.kind {
            EntryKind::File(file) => file.document.as_ref(),
            EntryKind::Unresolved | EntryKind::WebLink { .. } => None,
        }
    }

    /// Returns mutable document metadata, if this is a markdown file.
    pub fn document_meta_mut(&mut self) -> Option<&mut DocumentMeta> {
        match &mut self.kind {
            EntryKind::File(file) => file.document.as_mut(),
            EntryKind::Unresolved | EntryKind::WebLink { .. } => None,
        }
    }

    /// Returns the aliases (empty for non-documents).
    pub fn aliases(&self) -> &[String] {
        self.document_meta()
            .map(|d| d.aliases.as_slice())
            .unwrap_or_default()
    }

    /// Returns the document title, if any.
    pub fn title(&self) -> Option<&str> {
        self.document_meta().and_then(|d| d.title.as_deref())
    }

    /// Returns the headings (empty for non-documents).
    pub fn headings(&self) -> &[String] {
        self.document_meta()
            .map(|d| d.headings.as_slice())
            .unwrap_or_default()
    }

    /// Returns the values an entry carries for `key`, in entry order.
    pub fn field_values(&self, key: FieldKey) -> Vec<&str> {
        match key {
            FieldKey::Basename => vec![self.basename.as_str()],
            FieldKey::Aliases => self.aliases().iter().map(String::as_str).collect(),
            FieldKey::Title => self.title().into_iter().collect(),
            FieldKey::Headings => self.headings().iter().map(String::as_str).collect(),
        }
    }

    /// Returns true when the entry carries exactly `value` in field `key`.
    pub fn has_field_value(&self, key: FieldKey, value: &str) -> bool {
        self.field_values(key).contains(&value)
    }

    /// Returns the lowercased extension.
    ///
    /// Unresolved entries report the extension of the file they would create; web links
    /// have none.
    pub fn extension(&self) -> &str {
        match &self.kind {
            EntryKind::File(file) => &file.extension,
            EntryKind::Unresolved => self.name.rsplit_once('.').map_or("", |(_, ext)| ext),
            EntryKind::WebLink { .. } => "",
        }
    }

    /// Returns the file type, if this is a file entry.
    pub fn file_type(&self) -> Option<FileType> {
        match &self.kind {
            EntryKind::File(file) => Some(file.file_type),
            EntryKind::Unresolved | EntryKind::WebLink { .. } => None,
        }
    }

    /// Returns true when the entry names an existing resource.
    pub fn is_created(&self) -> bool {
        match &self.kind {
            EntryKind::File(file) => file.created,
            EntryKind::Unresolved => false,
            EntryKind::WebLink { .. } => true,
        }
    }

    /// Returns true for unresolved link targets.
    pub fn is_unresolved(&self) -> bool {
        matches!(self.kind, EntryKind::Unresolved)
    }

    /// Returns true for web link entries.
    pub fn is_web_url(&self) -> bool {
        matches!(self.kind, EntryKind::WebLink { .. })
    }

    /// Returns the URL of a web link entry.
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::WebLink { url } => Some(url),
            EntryKind::File(_) | EntryKind::Unresolved => None,
        }
    }
}

/// Splits a path into (name, basename, lowercased extension).
fn split_path(path: &str) -> (String, String, String) {
    let name = path.rsplit('/').next().unwrap_or(path).to_string();
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let basename = stem.to_string();
            (name.clone(), basename, ext.to_lowercase())
        }
        _ => (name.clone(), name, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entry_splits_path() {
        let entry = SearchEntry::file("projects/Project Plan.md");
        assert_eq!(entry.name, "Project Plan.md");
        assert_eq!(entry.basename, "Project Plan");
        assert_eq!(entry.path, "projects/Project Plan.md");
        assert_eq!(entry.extension(), "md");
        assert_eq!(entry.file_type(), Some(FileType::Markdown));
        assert!(entry.is_created());
        assert!(entry.document_meta().is_some());
    }

    #[test]
    fn non_document_has_no_metadata() {
        let entry = SearchEntry::file("assets/Diagram.PNG");
        assert_eq!(entry.extension(), "png");
        assert_eq!(entry.file_type(), Some(FileType::Image));
        assert!(entry.aliases().is_empty());
        assert!(entry.headings().is_empty());
        assert!(entry.title().is_none());
    }

    #[test]
    fn dotfiles_keep_their_name_as_basename() {
        let entry = SearchEntry::file(".hidden");
        assert_eq!(entry.basename, ".hidden");
        assert_eq!(entry.extension(), "");
    }

    #[test]
    fn document_carries_metadata() {
        let meta = DocumentMeta {
            aliases: vec!["plan".into()],
            title: Some("Quarterly Plan".into()),
            headings: vec!["Goals".into()],
        };
        let entry = SearchEntry::document("Plan.md", meta);
        assert_eq!(entry.aliases(), ["plan"]);
        assert_eq!(entry.title(), Some("Quarterly Plan"));
        assert_eq!(entry.headings(), ["Goals"]);
    }

    #[test]
    fn unresolved_gets_markdown_extension() {
        let entry = SearchEntry::unresolved("Someday Ideas");
        assert_eq!(entry.path, "Someday Ideas.md");
        assert_eq!(entry.basename, "Someday Ideas");
        assert_eq!(entry.extension(), "md");
        assert!(entry.is_unresolved());
        assert!(!entry.is_created());
        assert!(entry.file_type().is_none());
    }

    #[test]
    fn unresolved_keeps_explicit_extension() {
        let entry = SearchEntry::unresolved("scan.pdf");
        assert_eq!(entry.path, "scan.pdf");
        assert_eq!(entry.basename, "scan");
    }

    #[test]
    fn placeholder_is_not_created() {
        let entry = SearchEntry::placeholder("New Idea");
        assert_eq!(entry.path, "New Idea.md");
        assert!(!entry.is_created());
        assert!(!entry.is_unresolved());
    }

    #[test]
    fn web_link_uses_url_as_path() {
        let entry = SearchEntry::web_link("Rust Book", "https://doc.rust-lang.org/book/");
        assert_eq!(entry.path, "https://doc.rust-lang.org/book/");
        assert_eq!(entry.url(), Some("https://doc.rust-lang.org/book/"));
        assert!(entry.is_web_url());
        assert!(entry.is_created());
    }

    #[test]
    fn file_type_names_round_trip() {
        for ty in [
            FileType::Markdown,
            FileType::Canvas,
            FileType::Pdf,
            FileType::Image,
            FileType::Audio,
            FileType::Video,
            FileType::Other,
        ] {
            assert_eq!(FileType::from_name(ty.as_str()), Some(ty));
        }
        assert_eq!(FileType::from_name("spreadsheet"), None);
    }
}
