//! Hierarchical brace syntax, as printed by `show configuration`.
//!
//! ```text
//! interfaces {
//!     ethernet eth0 {
//!         address 10.0.0.1/24
//!     }
//! }
//! protocols {
//!     static {
//!         route 0.0.0.0/0 {
//!             next-hop 10.0.0.254
//!             distance 5
//!         }
//!     }
//! }
//! ```
//!
//! A line ending in `{` opens a block and extends the current path with its
//! words; a lone `}` closes the innermost block; any other line is a leaf
//! under the current path. Route blocks are collected whole before they
//! become a statement, so their children may appear in any order.
//!
//! Sections this router does not model (`system { ... }`, `service`,
//! `interfaces loopback`, ...) are skipped with a warning.

use tracing::warn;

use super::directive::{DirectiveSource, Statement, Words, check_interface, parse_path};
use super::error::{ConfigError, Result};
use super::token::{Token, is_blank_or_comment, tokenize_line};
use crate::router::Router;

#[derive(Debug, Clone)]
enum Line {
    Open { words: Vec<Token>, brace: Token },
    Close(Token),
    Leaf(Vec<Token>),
}

fn is_vyos_comment(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*")
}

fn classify_line(line_no: usize, text: &str) -> Option<Line> {
    if is_blank_or_comment(text) || is_vyos_comment(text) {
        return None;
    }
    let mut words = tokenize_line(line_no, text);
    let last = words.last()?;
    if words.len() == 1 && last.is("}") {
        return words.pop().map(Line::Close);
    }
    if last.value.ends_with('{') {
        let mut brace = words.pop()?;
        let name = brace.value.trim_end_matches('{').to_string();
        if !name.is_empty() {
            words.push(Token::new(name.clone(), brace.line, brace.column));
            brace.column += name.chars().count();
            brace.value = "{".to_string();
        }
        return Some(Line::Open { words, brace });
    }
    Some(Line::Leaf(words))
}

/// What to do with a block or leaf at a given path.
enum Action {
    Skip,
    Enter,
    Route,
    Parse,
}

fn classify(path: &[Token], block: bool) -> Action {
    let word = |i: usize| path.get(i).map(Token::as_str);
    match word(0) {
        Some("interfaces") => {
            if word(1).is_some_and(|w| w != "ethernet") {
                return Action::Skip;
            }
            match (block, path.len()) {
                (true, 0..=3) => Action::Enter,
                (true, _) => Action::Skip,
                (false, _) => match word(3) {
                    Some("address" | "disable") | None => Action::Parse,
                    Some(_) => Action::Skip,
                },
            }
        }
        Some("protocols") => {
            if word(1).is_some_and(|w| w != "static") || word(2).is_some_and(|w| w != "route") {
                return Action::Skip;
            }
            match (block, path.len()) {
                (true, 0..=3) => Action::Enter,
                (true, _) => Action::Route,
                (false, _) => Action::Parse,
            }
        }
        _ => Action::Skip,
    }
}

fn path_text(path: &[Token]) -> String {
    path.iter()
        .map(Token::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

struct Frame {
    words: Vec<Token>,
    brace: Token,
}

/// The parts of a route block, collected before the statement is built.
#[derive(Default)]
struct RouteParts {
    target: Option<(Token, Token)>,
    distance: Option<(Token, Token)>,
    disable: Option<Token>,
}

impl RouteParts {
    fn absorb(&mut self, words: &[Token], line: usize) -> Result<()> {
        let Some(key) = words.first() else {
            return Ok(());
        };
        let value = || {
            words
                .get(1)
                .cloned()
                .ok_or(ConfigError::UnexpectedEnd { line })
        };
        match key.as_str() {
            "next-hop" | "interface" => {
                if self.target.is_some() {
                    return Err(ConfigError::syntax(
                        "Route must have exactly one next-hop or interface",
                        key,
                    ));
                }
                self.target = Some((key.clone(), value()?));
            }
            "distance" => self.distance = Some((key.clone(), value()?)),
            "disable" => self.disable = Some(key.clone()),
            _ => return Err(ConfigError::syntax("Unrecognized route option", key)),
        }
        let consumed = if key.is("disable") { 1 } else { 2 };
        match words.get(consumed) {
            Some(extra) => Err(ConfigError::syntax("Unexpected trailing token", extra)),
            None => Ok(()),
        }
    }

    /// Canonical `protocols static route <cidr> <target> [distance] [disable]`.
    fn into_path(self, header: &[Token]) -> Result<Vec<Token>> {
        let dest = &header[3];
        let (kind, value) = self.target.ok_or_else(|| {
            ConfigError::syntax("Route needs a next-hop or an interface", dest)
        })?;
        let mut path = header[..4].to_vec();
        path.push(kind);
        path.push(value);
        if let Some((key, value)) = self.distance {
            path.push(key);
            path.push(value);
        }
        path.extend(self.disable);
        Ok(path)
    }
}

/// Parser for hierarchical brace text.
pub struct HierarchicalParser {
    lines: Vec<Line>,
    pos: usize,
    frames: Vec<Frame>,
    last_line: usize,
}

impl HierarchicalParser {
    pub fn new(text: &str) -> Self {
        let lines: Vec<Line> = text
            .lines()
            .enumerate()
            .filter_map(|(idx, text)| classify_line(idx + 1, text))
            .collect();
        Self {
            lines,
            pos: 0,
            frames: Vec::new(),
            last_line: text.lines().count().max(1),
        }
    }

    fn current_path(&self) -> Vec<Token> {
        self.frames
            .iter()
            .flat_map(|f| f.words.iter().cloned())
            .collect()
    }

    fn next_line(&mut self) -> Option<Line> {
        let line = self.lines.get(self.pos).cloned();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    fn unclosed(brace: &Token) -> ConfigError {
        ConfigError::syntax("Unbalanced braces: block is never closed", brace)
    }

    /// Skip the rest of a block whose opening line was just consumed.
    fn skip_block(&mut self, brace: &Token) -> Result<()> {
        let mut depth = 1usize;
        while let Some(line) = self.next_line() {
            match line {
                Line::Open { .. } => depth += 1,
                Line::Close(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Line::Leaf(_) => {}
            }
        }
        Err(Self::unclosed(brace))
    }

    /// Collect a route block whose opening line was just consumed.
    fn route_block(&mut self, header: Vec<Token>, brace: &Token) -> Result<Vec<Token>> {
        let mut parts = RouteParts::default();
        parts.absorb(&header[4..], brace.line)?;

        let mut nested: Option<Token> = None;
        loop {
            let Some(line) = self.next_line() else {
                return Err(Self::unclosed(nested.as_ref().unwrap_or(brace)));
            };
            match line {
                Line::Close(_) => {
                    if nested.take().is_none() {
                        break;
                    }
                }
                Line::Leaf(words) => parts.absorb(&words, brace.line)?,
                Line::Open { words, brace: inner } => {
                    // `next-hop 10.0.0.254 { distance 5 }`
                    let nestable = nested.is_none()
                        && words
                            .first()
                            .is_some_and(|w| w.is("next-hop") || w.is("interface"));
                    if !nestable {
                        let at = words.first().unwrap_or(&inner);
                        return Err(ConfigError::syntax("Unexpected block in route", at));
                    }
                    parts.absorb(&words, inner.line)?;
                    nested = Some(inner);
                }
            }
        }
        parts.into_path(&header)
    }
}

impl DirectiveSource for HierarchicalParser {
    fn next_statement(&mut self, router: &Router) -> Result<Option<Statement>> {
        while let Some(line) = self.next_line() {
            match line {
                Line::Close(brace) => {
                    if self.frames.pop().is_none() {
                        return Err(ConfigError::syntax("Unbalanced braces: unexpected '}'", &brace));
                    }
                }
                Line::Open { words, brace } => {
                    if words.is_empty() {
                        return Err(ConfigError::syntax("Block has no name", &brace));
                    }
                    let mut path = self.current_path();
                    path.extend(words.iter().cloned());
                    match classify(&path, true) {
                        Action::Skip => {
                            warn!(section = %path_text(&path), line = brace.line, "skipping unsupported configuration section");
                            self.skip_block(&brace)?;
                        }
                        Action::Enter => {
                            if path.len() == 3 && path[0].is("interfaces") {
                                check_interface(router, &path[2])?;
                            }
                            self.frames.push(Frame { words, brace });
                        }
                        Action::Route => {
                            let route = self.route_block(path, &brace)?;
                            let mut cursor = Words::new(&route, brace.line);
                            if let Some(statement) = parse_path(&mut cursor, router)? {
                                return Ok(Some(statement));
                            }
                        }
                        Action::Parse => {
                            let at = words.first().unwrap_or(&brace);
                            return Err(ConfigError::syntax("Unexpected block", at));
                        }
                    }
                }
                Line::Leaf(words) => {
                    let line_no = words.first().map_or(self.last_line, |w| w.line);
                    let mut path = self.current_path();
                    path.extend(words);
                    match classify(&path, false) {
                        Action::Parse => {
                            let mut cursor = Words::new(&path, line_no);
                            if let Some(statement) = parse_path(&mut cursor, router)? {
                                return Ok(Some(statement));
                            }
                        }
                        _ => {
                            if path.len() >= 3 && path[0].is("interfaces") && path[1].is("ethernet") {
                                check_interface(router, &path[2])?;
                            }
                            warn!(setting = %path_text(&path), line = line_no, "skipping unsupported configuration setting");
                        }
                    }
                }
            }
        }
        match self.frames.last() {
            Some(frame) => Err(Self::unclosed(&frame.brace)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::directive::Directive;
    use crate::router::RouteTarget;

    fn statements(text: &str) -> Result<Vec<Directive>> {
        let router = Router::new("R1");
        let mut parser = HierarchicalParser::new(text);
        let mut out = Vec::new();
        while let Some(statement) = parser.next_statement(&router)? {
            out.push(statement.directive);
        }
        Ok(out)
    }

    #[test]
    fn test_interfaces_and_routes() {
        let text = "\
interfaces {
    ethernet eth0 {
        address 10.0.0.1/24
        disable
    }
}
protocols {
    static {
        route 0.0.0.0/0 {
            distance 10
            next-hop 10.0.0.254
        }
        route 192.168.0.0/16 {
            interface eth0
            disable
        }
    }
}
";
        let directives = statements(text).unwrap();
        assert_eq!(directives.len(), 4);
        assert!(matches!(directives[1], Directive::InterfaceDisable { .. }));
        let Directive::Route(ref first) = directives[2] else {
            panic!("expected route");
        };
        assert_eq!(first.distance(), 10);
        assert_eq!(first.target(), &RouteTarget::NextHop("10.0.0.254".parse().unwrap()));
        let Directive::Route(ref second) = directives[3] else {
            panic!("expected route");
        };
        assert!(second.is_disabled());
    }

    #[test]
    fn test_nested_next_hop_block() {
        let text = "\
protocols {
    static {
        route 10.0.0.0/8 {
            next-hop 192.168.1.1 {
                distance 20
            }
        }
    }
}
";
        let directives = statements(text).unwrap();
        let [Directive::Route(route)] = directives.as_slice() else {
            panic!("expected one route");
        };
        assert_eq!(route.distance(), 20);
    }

    #[test]
    fn test_skips_unsupported_sections() {
        let text = "\
system {
    host-name R1
    login {
        user vyos
    }
}
interfaces {
    ethernet eth0 {
        address dhcp
        hw-id 00:50:56:00:00:01
    }
    loopback lo {
    }
}
// Warning: Do not remove the following line.
";
        assert_eq!(statements(text).unwrap(), vec![]);
    }

    #[test]
    fn test_route_target_rules() {
        let both = "\
protocols {
    static {
        route 10.0.0.0/8 {
            next-hop 1.1.1.1
            interface eth0
        }
    }
}
";
        assert!(matches!(statements(both), Err(ConfigError::Syntax { .. })));

        let neither = "\
protocols {
    static {
        route 10.0.0.0/8 {
            distance 5
        }
    }
}
";
        let err = statements(neither).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(matches!(
            statements("interfaces {\n    ethernet eth0 {\n        address 10.0.0.1/24\n    }\n"),
            Err(ConfigError::Syntax { .. })
        ));
        assert!(matches!(
            statements("}\n"),
            Err(ConfigError::Syntax { .. })
        ));
    }

    #[test]
    fn test_unknown_interface_block() {
        let err = statements("interfaces {\n    ethernet eth5 {\n        disable\n    }\n}\n")
            .unwrap_err();
        assert_eq!(err, ConfigError::unknown_interface(&Token::new("eth5", 2, 14)));
    }

    #[test]
    fn test_brace_attached_to_word() {
        let directives = statements("interfaces {\n ethernet eth0{\n  disable\n }\n}\n").unwrap();
        assert_eq!(
            directives,
            vec![Directive::InterfaceDisable {
                interface: "eth0".into()
            }]
        );
    }
}
