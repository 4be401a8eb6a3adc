//! Minimal CSS selector support: comma-separated compound selectors made of
//! an optional tag, `.class`, `#id` and `[attr]` / `[attr=value]` parts.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::DomError;
use crate::node::Node;

fn part_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^(?:([.#])([A-Za-z0-9_-]+)|\[([A-Za-z0-9_-]+)(?:=["']?([^"'\]]*)["']?)?\])"#,
        )
        .expect("Invalid selector part regex")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\*|[A-Za-z][A-Za-z0-9-]*)")
            .expect("Invalid selector tag regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Class(String),
    Id(String),
    Attr(String, Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    parts: Vec<Part>,
}

impl Compound {
    fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(input.to_string());
        let mut rest = input.trim();
        if rest.is_empty() {
            return Err(invalid());
        }

        let mut tag = None;
        if let Some(m) = tag_regex().find(rest) {
            if m.as_str() != "*" {
                tag = Some(m.as_str().to_ascii_lowercase());
            }
            rest = &rest[m.end()..];
        }

        let mut parts = Vec::new();
        while !rest.is_empty() {
            let caps = part_regex().captures(rest).ok_or_else(invalid)?;
            let whole = caps.get(0).ok_or_else(invalid)?;
            let part = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(sigil), Some(name), _) if sigil.as_str() == "." => {
                    Part::Class(name.as_str().to_string())
                }
                (Some(_), Some(name), _) => Part::Id(name.as_str().to_string()),
                (None, None, Some(attr)) => Part::Attr(
                    attr.as_str().to_string(),
                    caps.get(4).map(|v| v.as_str().to_string()),
                ),
                _ => return Err(invalid()),
            };
            parts.push(part);
            rest = &rest[whole.end()..];
        }

        Ok(Self { tag, parts })
    }

    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if &node.tag != tag {
                return false;
            }
        }
        self.parts.iter().all(|part| match part {
            Part::Class(class) => node.has_class(class),
            Part::Id(id) => node.html_id() == Some(id.as_str()),
            Part::Attr(name, None) => node.has_attr(name),
            Part::Attr(name, Some(value)) => node.attr(name) == Some(value.as_str()),
        })
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let alternatives = input
            .split(',')
            .map(Compound::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { alternatives })
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.alternatives.iter().any(|c| c.matches(node))
    }
}
