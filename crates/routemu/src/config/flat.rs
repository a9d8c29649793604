//! Flat `set` command syntax.
//!
//! ```text
//! set interfaces ethernet eth0 address 10.0.0.1/24
//! set interfaces ethernet eth1 disable
//! set protocols static route 0.0.0.0/0 next-hop 10.0.0.254
//! set protocols static route 192.168.0.0/16 interface eth1 distance 20 disable
//! ```
//!
//! One statement per line. Blank lines and `#` comments are ignored.

use super::directive::{DirectiveSource, Statement, Words, parse_path};
use super::error::{ConfigError, Result};
use super::token::{Token, tokenize_lines};
use crate::router::Router;

/// Parser for flat `set` text.
#[derive(Debug, Clone)]
pub struct FlatParser {
    lines: Vec<Vec<Token>>,
    pos: usize,
}

impl FlatParser {
    pub fn new(text: &str) -> Self {
        Self {
            lines: tokenize_lines(text),
            pos: 0,
        }
    }
}

impl DirectiveSource for FlatParser {
    fn next_statement(&mut self, router: &Router) -> Result<Option<Statement>> {
        while let Some(line) = self.lines.get(self.pos) {
            self.pos += 1;
            let Some((verb, path)) = line.split_first() else {
                continue;
            };
            if !verb.is("set") {
                return Err(ConfigError::syntax("Expected 'set' command", verb));
            }
            let mut words = Words::new(path, verb.line);
            if let Some(statement) = parse_path(&mut words, router)? {
                return Ok(Some(statement));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::directive::Directive;

    fn statements(text: &str) -> Result<Vec<Directive>> {
        let router = Router::new("R1");
        let mut parser = FlatParser::new(text);
        let mut out = Vec::new();
        while let Some(statement) = parser.next_statement(&router)? {
            out.push(statement.directive);
        }
        Ok(out)
    }

    #[test]
    fn test_parses_lines() {
        let text = "\
# uplink
set interfaces ethernet eth0 address 10.0.0.1/24

set protocols static route 0.0.0.0/0 next-hop 10.0.0.254
set interfaces ethernet eth0 address dhcp
set protocols static route 172.16.0.0/12 interface eth0 distance 200
";
        let directives = statements(text).unwrap();
        assert_eq!(directives.len(), 3);
        assert!(matches!(directives[2], Directive::Route(ref r) if r.distance() == 200));
    }

    #[test]
    fn test_requires_set() {
        let err = statements("delete interfaces ethernet eth0 address 10.0.0.1/24").unwrap_err();
        assert_eq!(
            err,
            ConfigError::syntax("Expected 'set' command", &Token::new("delete", 1, 1))
        );
    }

    #[test]
    fn test_error_line_numbers() {
        let text = "set interfaces ethernet eth0 address 10.0.0.1/24\n\nset interfaces ethernet eth9 disable\n";
        let err = statements(text).unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("Interface eth9 does not exist"));
    }

    #[test]
    fn test_truncated_statement() {
        assert_eq!(
            statements("set protocols static").unwrap_err(),
            ConfigError::UnexpectedEnd { line: 1 }
        );
    }
}
