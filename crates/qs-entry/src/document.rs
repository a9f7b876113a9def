//! Turning vault files into entries.

use std::{fs, path::Path};

use crate::{
    DocumentMeta, EntryError, SearchEntry, extract_headings, extract_links, parse_frontmatter,
};

/// An entry together with the link targets its document references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// The searchable entry.
    pub entry: SearchEntry,
    /// Outgoing link targets, as written (not yet resolved against the vault).
    pub links: Vec<String>,
}

/// Parses markdown `content` stored at vault-relative `path`.
///
/// The title comes from the frontmatter, falling back to the first level-one heading. A title
/// that merely repeats the basename (ignoring case) is dropped so that it does not compete
/// with the basename field.
pub fn parse_markdown(path: &str, content: &str) -> ParsedEntry {
    let (frontmatter, body) = parse_frontmatter(content);
    let frontmatter = frontmatter.unwrap_or_default();
    let headings = extract_headings(body);

    let title = frontmatter
        .title()
        .map(str::to_string)
        .or_else(|| headings.iter().find(|h| h.level == 1).map(|h| h.text.clone()));

    let mut entry = SearchEntry::document(
        path,
        DocumentMeta {
            aliases: frontmatter.alias_list(),
            title: None,
            headings: headings.into_iter().map(|h| h.text).collect(),
        },
    );
    let title = title.filter(|t| t.to_lowercase() != entry.basename.to_lowercase());
    if let Some(meta) = entry.document_meta_mut() {
        meta.title = title;
    }

    ParsedEntry {
        entry,
        links: extract_links(body),
    }
}

/// Reads the file at `abs_path` and builds its entry under vault-relative `rel_path`.
///
/// Markdown files are parsed for metadata; anything else becomes a plain file entry without
/// touching its contents.
pub fn parse_file(abs_path: &Path, rel_path: &str) -> Result<ParsedEntry, EntryError> {
    let entry = SearchEntry::file(rel_path);
    if entry.document_meta().is_none() {
        return Ok(ParsedEntry {
            entry,
            links: Vec::new(),
        });
    }

    let content = fs::read_to_string(abs_path).map_err(|source| EntryError::ReadFile {
        path: abs_path.to_path_buf(),
        source,
    })?;
    Ok(parse_markdown(rel_path, &content))
}
