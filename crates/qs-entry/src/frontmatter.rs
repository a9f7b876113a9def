//! YAML frontmatter extraction.
//!
//! Only the keys the switcher searches are read: `title` and `aliases`. Aliases may be a
//! single string or a list, and the singular `alias` key is accepted too.

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

/// Searchable frontmatter keys of a document.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// Declared title.
    pub title: Option<String>,
    /// Alternative names.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    #[serde(default, alias = "alias")]
    pub aliases: Option<Vec<String>>,
}

impl Frontmatter {
    /// Returns the non-blank aliases, trimmed, in declaration order.
    pub fn alias_list(&self) -> Vec<String> {
        self.aliases
            .iter()
            .flatten()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns the title when it is not blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Splits a leading `---` frontmatter block off `content` and parses it.
///
/// Returns the frontmatter and the body that follows it. A missing closing fence or YAML
/// that does not parse yields `None` and the whole content as body.
pub fn parse_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(yaml_start) = fence_end(content, 0) else {
        return (None, content);
    };

    let mut offset = yaml_start;
    while offset < content.len() {
        let line_end = content[offset..]
            .find('\n')
            .map_or(content.len(), |i| offset + i + 1);
        if let Some(body_start) = fence_end(content, offset) {
            let yaml = &content[yaml_start..offset];
            return match parse_yaml(yaml) {
                Some(fm) => (Some(fm), skip_blank_line(&content[body_start..])),
                None => (None, content),
            };
        }
        offset = line_end;
    }
    (None, content)
}

/// If the line starting at `offset` is a `---` fence, returns the offset just after it.
fn fence_end(content: &str, offset: usize) -> Option<usize> {
    let rest = &content[offset..];
    let line_len = rest.find('\n').map_or(rest.len(), |i| i + 1);
    let line = rest[..line_len].trim_end_matches(['\n', '\r']);
    (line == "---").then_some(offset + line_len)
}

/// Parses the YAML between the fences; an empty block is an empty frontmatter.
fn parse_yaml(yaml: &str) -> Option<Frontmatter> {
    if yaml.trim().is_empty() {
        return Some(Frontmatter::default());
    }
    serde_yaml::from_str(yaml).ok()
}

/// Drops a single blank line separating frontmatter from the body.
fn skip_blank_line(body: &str) -> &str {
    body.strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body)
}
