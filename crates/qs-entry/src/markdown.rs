//! Heading and link extraction from markdown bodies.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// A heading found in a document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading depth, 1 through 6.
    pub level: u8,
    /// Heading text including inline code.
    pub text: String,
}

/// Extracts all headings from a markdown body, in document order.
///
/// Headings whose text is blank are skipped.
pub fn extract_headings(body: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut current: Option<(HeadingLevel, String)> = None;

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level, String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, ref mut heading)) = current {
                    heading.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = current.take() {
                    let text = text.trim();
                    if !text.is_empty() {
                        headings.push(Heading {
                            level: level_number(level),
                            text: text.to_string(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    headings
}

/// Maps a parser heading level to its depth.
fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Extracts the targets of outgoing links, deduplicated in first-seen order.
///
/// Two link forms are recognised:
/// - wiki links `[[target]]`, `[[target#heading]]` and `[[target|label]]`
/// - inline markdown links to relative paths, `[label](some%20note.md#part)`
///
/// Heading and label suffixes are dropped. Same-document links (`[[#heading]]`, `(#part)`),
/// external URLs and links inside code are ignored.
pub fn extract_links(body: &str) -> Vec<String> {
    let mut targets: Vec<String> = Vec::new();
    let mut push = |target: String| {
        if !targets.contains(&target) {
            targets.push(target);
        }
    };

    let mut text = String::new();
    let mut in_code_block = false;

    for event in Parser::new(body) {
        match event {
            Event::Text(chunk) if !in_code_block => {
                text.push_str(&chunk);
                continue;
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(target) = relative_link_target(&dest_url) {
                    push(target);
                }
            }
            _ => {}
        }
        wiki_link_targets(&text).into_iter().for_each(&mut push);
        text.clear();
    }
    wiki_link_targets(&text).into_iter().for_each(push);

    targets
}

/// Finds the wiki link targets in a run of plain text.
fn wiki_link_targets(text: &str) -> Vec<String> {
    let mut targets = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find("[[") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("]]") else {
            break;
        };
        let inner = &after[..close];
        let target = inner
            .split(['|', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        if !target.is_empty() && !inner.contains('\n') {
            targets.push(target.to_string());
        }
        rest = &after[close + 2..];
    }
    targets
}

/// Normalizes an inline link destination to a vault path, skipping external and local links.
fn relative_link_target(dest: &str) -> Option<String> {
    let dest = dest.trim();
    if dest.is_empty() || dest.starts_with('#') || dest.contains("://") || dest.starts_with("mailto:")
    {
        return None;
    }
    let path = dest.split('#').next().unwrap_or_default();
    let path = path.replace("%20", " ");
    let path = path.trim_start_matches("./").trim();
    (!path.is_empty()).then(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_headings_in_order() {
        let body = "# Title\n\nText\n\n## Goals `v2`\n\n### Risks\n";
        let headings = extract_headings(body);
        assert_eq!(
            headings,
            vec![
                Heading {
                    level: 1,
                    text: "Title".into()
                },
                Heading {
                    level: 2,
                    text: "Goals v2".into()
                },
                Heading {
                    level: 3,
                    text: "Risks".into()
                },
            ]
        );
    }

    #[test]
    fn test_setext_headings() {
        let headings = extract_headings("Overview\n========\n\nDetails\n-------\n");
        let texts: Vec<&str> = headings.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, ["Overview", "Details"]);
        assert_eq!(headings[1].level, 2);
    }

    #[test]
    fn test_heading_in_code_block_ignored() {
        let headings = extract_headings("```\n# not a heading\n```\n\n# Real\n");
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Real");
    }

    #[test]
    fn test_wiki_links() {
        let body = "See [[Project Plan]] and [[Ideas#Later|later ideas]].\n\nAlso [[#Local]].";
        assert_eq!(extract_links(body), ["Project Plan", "Ideas"]);
    }

    #[test]
    fn test_wiki_links_deduplicated() {
        let body = "[[A]] then [[B]] and [[A|again]]";
        assert_eq!(extract_links(body), ["A", "B"]);
    }

    #[test]
    fn test_links_in_code_ignored() {
        let body = "```\n[[Hidden]]\n```\n\nInline `[[Also Hidden]]` but [[Shown]].";
        assert_eq!(extract_links(body), ["Shown"]);
    }

    #[test]
    fn test_markdown_links() {
        let body = "[a](notes/My%20Note.md#part) [b](https://example.com) [c](#local) \
                    [d](mailto:me@example.com) [e](./Other.md)";
        assert_eq!(extract_links(body), ["notes/My Note.md", "Other.md"]);
    }

    #[test]
    fn test_unclosed_wiki_link() {
        assert!(extract_links("broken [[link without end").is_empty());
    }
}
