//! Interactive terminal frontend.

use std::path::PathBuf;

use routemu::cli::{Registry, complete};
use routemu::router::Router;
use rustyline::completion::Completer;
use rustyline::config::{CompletionType, Config};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tracing::{debug, warn};

fn editor_config() -> Config {
    Config::builder()
        .auto_add_history(false)
        .history_ignore_dups(true)
        .max_history_size(400)
        .completion_type(CompletionType::List)
        .build()
}

/// Tab completion against a snapshot of the router.
///
/// The snapshot only needs the mode and interface names, so it is
/// refreshed before every prompt.
pub struct CommandCompleter {
    registry: Registry,
    router: Router,
}

impl CommandCompleter {
    pub fn new(router: Router) -> Self {
        Self {
            registry: Registry::default(),
            router,
        }
    }

    pub fn refresh(&mut self, router: &Router) {
        self.router = router.clone();
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}
impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}
impl Completer for CommandCompleter {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let completion = complete(&self.registry, &self.router, line, pos);
        Ok((completion.start, completion.candidates))
    }
}

/// A line read from the terminal.
pub enum Input {
    Line(String),
    /// Ctrl-C: abandon the current line.
    Interrupted,
    /// Ctrl-D or a closed terminal.
    Eof,
}

pub struct Terminal {
    editor: Editor<CommandCompleter>,
    history: Option<PathBuf>,
}

impl Terminal {
    /// Create a terminal. With a history path, previous history is loaded
    /// and saved back on drop.
    pub fn new(router: &Router, history: Option<PathBuf>) -> Self {
        let mut editor = Editor::<CommandCompleter>::with_config(editor_config());
        editor.set_helper(Some(CommandCompleter::new(router.clone())));
        if let Some(ref path) = history
            && let Err(e) = editor.load_history(path)
        {
            debug!(path = %path.display(), error = %e, "no history loaded");
        }
        Self { editor, history }
    }

    /// Read one line with `router`'s prompt.
    pub fn read(&mut self, router: &Router) -> anyhow::Result<Input> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.refresh(router);
        }
        match self.editor.readline(&router.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Some(ref path) = self.history
            && let Err(e) = self.editor.save_history(path)
        {
            warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }
}

/// Default history file: `~/.routemu_history`.
pub fn default_history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".routemu_history"))
}
