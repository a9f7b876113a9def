//! Narrowing the searchable subset of the catalog.

use std::fmt;

use qs_config::{FilterSettings, normalize_extension};
use qs_entry::{DOCUMENT_EXTENSION, FileType, SearchEntry};

use crate::IndexError;

/// Selects which catalog entries are searchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EntryFilter {
    /// Every entry.
    #[default]
    All,
    /// Markdown documents plus files with one of the listed extensions.
    MarkdownOnly {
        /// Normalized extensions admitted alongside markdown.
        additional_extensions: Vec<String>,
    },
    /// Files of one type.
    FileType(FileType),
    /// Files with one extension.
    Extension(String),
}

impl EntryFilter {
    /// Builds the default filter from configuration.
    pub fn from_settings(settings: &FilterSettings) -> Self {
        if settings.markdown_only {
            Self::MarkdownOnly {
                additional_extensions: settings.additional_extensions.clone(),
            }
        } else {
            Self::All
        }
    }

    /// Parses a filter expression.
    ///
    /// Accepts `all`, `markdown` (admitting `additional_extensions`), a file type name such as
    /// `pdf` or `image`, or an extension written with a leading dot such as `.canvas`.
    pub fn parse(expr: &str, additional_extensions: &[String]) -> Result<Self, IndexError> {
        let expr = expr.trim();
        if let Some(ext) = expr.strip_prefix('.') {
            return normalize_extension(ext)
                .map(Self::Extension)
                .ok_or_else(|| IndexError::InvalidFilter(expr.to_string()));
        }
        let lower = expr.to_lowercase();
        match lower.as_str() {
            "all" => Ok(Self::All),
            "markdown" | "md" => Ok(Self::MarkdownOnly {
                additional_extensions: additional_extensions.to_vec(),
            }),
            name => FileType::from_name(name)
                .map(Self::FileType)
                .ok_or_else(|| IndexError::InvalidFilter(expr.to_string())),
        }
    }

    /// Returns true when `entry` belongs to the searchable subset.
    ///
    /// Web links only pass [`EntryFilter::All`]. Unresolved entries are judged by the file
    /// they would create.
    pub fn matches(&self, entry: &SearchEntry) -> bool {
        if entry.is_web_url() {
            return matches!(self, Self::All);
        }
        let extension = entry.extension();
        match self {
            Self::All => true,
            Self::MarkdownOnly {
                additional_extensions,
            } => {
                effective_file_type(entry) == FileType::Markdown
                    || additional_extensions.iter().any(|e| e == extension)
            }
            Self::FileType(file_type) => effective_file_type(entry) == *file_type,
            Self::Extension(ext) => extension == ext,
        }
    }
}

impl fmt::Display for EntryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::MarkdownOnly {
                additional_extensions,
            } if additional_extensions.is_empty() => f.write_str(DOCUMENT_EXTENSION),
            Self::MarkdownOnly {
                additional_extensions,
            } => write!(f, "{DOCUMENT_EXTENSION}+{}", additional_extensions.join(",")),
            Self::FileType(file_type) => write!(f, "{file_type}"),
            Self::Extension(ext) => write!(f, ".{ext}"),
        }
    }
}

/// Returns the file type an entry has, or would have once created.
fn effective_file_type(entry: &SearchEntry) -> FileType {
    entry
        .file_type()
        .unwrap_or_else(|| FileType::from_extension(entry.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<SearchEntry> {
        vec![
            SearchEntry::file("Note.md"),
            SearchEntry::file("Board.canvas"),
            SearchEntry::file("scan.pdf"),
            SearchEntry::file("photo.PNG"),
            SearchEntry::unresolved("Someday"),
            SearchEntry::web_link("Docs", "https://example.com"),
        ]
    }

    fn matching(filter: &EntryFilter) -> Vec<String> {
        entries()
            .into_iter()
            .filter(|e| filter.matches(e))
            .map(|e| e.path)
            .collect()
    }

    #[test]
    fn all_matches_everything() {
        assert_eq!(matching(&EntryFilter::All).len(), 6);
    }

    #[test]
    fn markdown_only_with_additional_extensions() {
        let filter = EntryFilter::MarkdownOnly {
            additional_extensions: vec!["canvas".into()],
        };
        assert_eq!(matching(&filter), ["Note.md", "Board.canvas", "Someday.md"]);
    }

    #[test]
    fn file_type_and_extension() {
        assert_eq!(
            matching(&EntryFilter::FileType(FileType::Image)),
            ["photo.PNG"]
        );
        assert_eq!(
            matching(&EntryFilter::Extension("pdf".into())),
            ["scan.pdf"]
        );
    }

    #[test]
    fn from_settings() {
        let settings = FilterSettings {
            markdown_only: true,
            additional_extensions: vec!["pdf".into()],
        };
        assert_eq!(
            EntryFilter::from_settings(&settings),
            EntryFilter::MarkdownOnly {
                additional_extensions: vec!["pdf".into()]
            }
        );
        assert_eq!(
            EntryFilter::from_settings(&FilterSettings::default()),
            EntryFilter::All
        );
    }

    #[test]
    fn parse_expressions() {
        let extra = vec!["pdf".to_string()];
        assert_eq!(EntryFilter::parse("all", &extra).unwrap(), EntryFilter::All);
        assert_eq!(
            EntryFilter::parse("Markdown", &extra).unwrap(),
            EntryFilter::MarkdownOnly {
                additional_extensions: extra.clone()
            }
        );
        assert_eq!(
            EntryFilter::parse("image", &extra).unwrap(),
            EntryFilter::FileType(FileType::Image)
        );
        assert_eq!(
            EntryFilter::parse(".Canvas", &extra).unwrap(),
            EntryFilter::Extension("canvas".into())
        );
        assert!(matches!(
            EntryFilter::parse("spreadsheets", &extra),
            Err(IndexError::InvalidFilter(_))
        ));
        assert!(EntryFilter::parse(".", &extra).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(EntryFilter::All.to_string(), "all");
        assert_eq!(
            EntryFilter::MarkdownOnly {
                additional_extensions: vec!["pdf".into(), "canvas".into()]
            }
            .to_string(),
            "md+pdf,canvas"
        );
        assert_eq!(EntryFilter::Extension("pdf".into()).to_string(), ".pdf");
    }
}
