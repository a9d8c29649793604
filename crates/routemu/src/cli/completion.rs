//! Completion candidates for a partially typed line.

use super::pattern::Segment;
use super::registry::Registry;
use crate::router::{Router, RouterMode};

/// Candidates for the word under the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Byte offset in the line where the completed word starts.
    pub start: usize,
    pub candidates: Vec<String>,
}

/// Complete `line` up to byte offset `pos`.
///
/// Only commands available in the router's current mode are considered.
/// The next keyword of each command consistent with the words typed so far
/// is offered; an `<interface>` placeholder offers the router's interface
/// names, other placeholders a hint such as `<x.x.x.x/prefix>`.
pub fn complete(registry: &Registry, router: &Router, line: &str, pos: usize) -> Completion {
    let head = line.get(..pos).unwrap_or(line);
    let partial_len = head
        .chars()
        .rev()
        .take_while(|c| !c.is_whitespace())
        .map(char::len_utf8)
        .sum::<usize>();
    let start = head.len() - partial_len;
    let partial = &head[start..];
    let typed: Vec<&str> = head[..start].split_whitespace().collect();

    let mut candidates: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    };

    for command in registry
        .commands()
        .iter()
        .filter(|c| c.available_in(router.mode()))
    {
        let pattern = command.pattern();
        if !pattern.starts_with(&typed) {
            continue;
        }
        let Some(next) = pattern.segments().get(typed.len()) else {
            continue;
        };
        match next {
            Segment::Literal(word) if word.starts_with(partial) => push(word.clone()),
            Segment::Literal(_) => {}
            Segment::Placeholder(name) if name == "interface" => {
                for iface in interface_names(router) {
                    if iface.starts_with(partial) {
                        push(iface);
                    }
                }
            }
            Segment::Placeholder(_) if partial.is_empty() => push(next.hint()),
            Segment::Placeholder(_) => {}
        }
    }

    Completion { start, candidates }
}

fn interface_names(router: &Router) -> Vec<String> {
    let list = match router.mode() {
        RouterMode::Configuration => router.staged_interfaces(),
        RouterMode::Operational => router.interfaces(),
    };
    list.iter().map(|i| i.name().to_string()).collect()
}
