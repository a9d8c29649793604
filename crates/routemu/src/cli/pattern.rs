//! Command patterns: literal keywords interleaved with `<placeholder>`
//! segments.
//!
//! ```text
//! set interfaces ethernet <interface> address <address>
//! ```
//!
//! Matching is word based and case-sensitive, so any run of whitespace
//! between words is accepted.

use std::fmt;
use std::str::FromStr;

use super::command::CommandError;

/// One word of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A keyword that must appear verbatim.
    Literal(String),
    /// A variable word, captured under this name.
    Placeholder(String),
}

impl Segment {
    fn parse(word: &str) -> Self {
        match word.strip_prefix('<').and_then(|w| w.strip_suffix('>')) {
            Some(name) => Self::Placeholder(name.to_string()),
            None => Self::Literal(word.to_string()),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// What completion offers for this segment when nothing better is
    /// known.
    pub fn hint(&self) -> String {
        match self {
            Self::Literal(word) => word.clone(),
            Self::Placeholder(name) => match name.as_str() {
                "destination" | "address" => "<x.x.x.x/prefix>".to_string(),
                "next-hop" => "<x.x.x.x>".to_string(),
                "distance" => "<1-255>".to_string(),
                other => format!("<{}>", other),
            },
        }
    }
}

/// A compiled command pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.split_whitespace().collect::<Vec<_>>().join(" "),
            segments: text.split_whitespace().map(Segment::parse).collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// First keyword of the pattern (`set`, `show`, ...).
    pub fn verb(&self) -> Option<&str> {
        match self.segments.first() {
            Some(Segment::Literal(word)) => Some(word.as_str()),
            _ => None,
        }
    }

    pub fn has_placeholders(&self) -> bool {
        self.segments.iter().any(|s| !s.is_literal())
    }

    /// Match a complete input, capturing placeholder values.
    pub fn matches<'a>(&'a self, words: &[&'a str]) -> Option<Args<'a>> {
        if words.len() != self.segments.len() {
            return None;
        }
        let mut args = Args::default();
        for (segment, word) in self.segments.iter().zip(words) {
            match segment {
                Segment::Literal(literal) if literal == word => {}
                Segment::Literal(_) => return None,
                Segment::Placeholder(name) => args.values.push((name.as_str(), *word)),
            }
        }
        Some(args)
    }

    /// The keywords before the first placeholder.
    pub fn literal_prefix(&self) -> &[Segment] {
        let end = self
            .segments
            .iter()
            .position(|s| !s.is_literal())
            .unwrap_or(self.segments.len());
        &self.segments[..end]
    }

    /// Whether `words` abbreviates this pattern's literal prefix: no more
    /// words than the prefix has keywords, each equal to or a prefix of the
    /// corresponding keyword.
    pub fn abbreviated_by(&self, words: &[&str]) -> bool {
        let prefix = self.literal_prefix();
        !words.is_empty()
            && words.len() <= prefix.len()
            && prefix
                .iter()
                .zip(words)
                .all(|(segment, word)| match segment {
                    Segment::Literal(literal) => literal.starts_with(word),
                    Segment::Placeholder(_) => false,
                })
    }

    /// Whether the leading `words` are consistent with this pattern:
    /// keywords equal, placeholders take anything.
    pub fn starts_with(&self, words: &[&str]) -> bool {
        words.len() <= self.segments.len()
            && self
                .segments
                .iter()
                .zip(words)
                .all(|(segment, word)| match segment {
                    Segment::Literal(literal) => literal == word,
                    Segment::Placeholder(_) => true,
                })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Placeholder values captured by a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args<'a> {
    values: Vec<(&'a str, &'a str)>,
}

impl<'a> Args<'a> {
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw value of a placeholder.
    pub fn value(&self, name: &str) -> Result<&'a str, CommandError> {
        self.get(name).ok_or_else(|| CommandError::Value {
            value: format!("<{}>", name),
            reason: "missing argument".to_string(),
        })
    }

    /// Parse a placeholder value.
    pub fn parse<T>(&self, name: &str) -> Result<T, CommandError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.value(name)?;
        value.parse().map_err(|e: T::Err| CommandError::Value {
            value: value.to_string(),
            reason: e.to_string(),
        })
    }
}
