//! Session controller
//!
//! [`Session`] wires the editor, the interpreter boundary, the execution
//! bridge and the output log together and owns every piece of observable
//! playground state. The UI calls its entry points and reads it back through
//! accessors; nothing else mutates that state.
//!
//! Observable changes (parse flag, output, snippet selection, preferences,
//! boundary state) bump [`Session::revision`]. Writing the source cell alone
//! does not.

use crate::bridge::{ExecutionBridge, Lifecycle, Pump};
use crate::editor::{EditOutcome, EditorError, EditorHost, SourceEditor, DEFAULT_TAB_WIDTH};
use crate::interpreter::{events, Interpreter, InterpreterError, RunId};
use crate::language::{registry, LANGUAGE_ID};
use crate::output::{OutputLog, DEFAULT_MAX_LINES};
use crate::prefs::{self, Layout, PreferenceStore, ThemeMode, LAYOUT_KEY, THEME_KEY};
use crate::snippets::{Snippet, SnippetCatalog};
use crate::source::SourceCell;
use crossterm::event::KeyEvent;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("editor could not be created: {0}")]
    Editor(#[from] EditorError),

    #[error("unknown snippet '{0}'")]
    UnknownSnippet(String),

    #[error("interpreter is still starting")]
    InterpreterNotReady,

    #[error("interpreter unavailable: {0}")]
    InterpreterFailed(String),
}

/// Where the interpreter boundary is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState {
    Initializing,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub tab_width: usize,
    pub max_output_lines: usize,
    /// Viewport width below which the panes are stacked
    pub narrow_width: u16,
    /// Snippet shown at startup instead of the catalog's first entry
    pub initial_snippet: Option<String>,
    /// Theme to use and persist instead of the stored one
    pub theme_override: Option<ThemeMode>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            tab_width: DEFAULT_TAB_WIDTH,
            max_output_lines: DEFAULT_MAX_LINES,
            narrow_width: 100,
            initial_snippet: None,
            theme_override: None,
        }
    }
}

pub struct Session {
    source: SourceCell,
    editor: SourceEditor,
    interpreter: Box<dyn Interpreter>,
    bridge: ExecutionBridge,
    output: OutputLog,
    boundary: BoundaryState,
    parse_error: bool,
    catalog: SnippetCatalog,
    snippet: Snippet,
    layout: Layout,
    theme: ThemeMode,
    store: Box<dyn PreferenceStore>,
    narrow_width: u16,
    revision: u64,
}

impl Session {
    /// Load preferences, mount the editor on `host` with the initial snippet
    /// and start initializing `interpreter`.
    pub fn new(
        mut interpreter: Box<dyn Interpreter>,
        mut store: Box<dyn PreferenceStore>,
        catalog: SnippetCatalog,
        host: &EditorHost,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        registry::ensure_registered();

        let layout: Layout = prefs::load(store.as_ref(), LAYOUT_KEY);
        let theme = match options.theme_override {
            Some(theme) => {
                if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
                    tracing::warn!(error = %e, "could not persist theme");
                }
                theme
            }
            None => prefs::load(store.as_ref(), THEME_KEY),
        };

        let snippet = match &options.initial_snippet {
            Some(key) => catalog
                .get(key)
                .ok_or_else(|| SessionError::UnknownSnippet(key.clone()))?
                .clone(),
            None => catalog.first().clone(),
        };

        let source = SourceCell::default();
        let editor = SourceEditor::create(&snippet.code, LANGUAGE_ID, theme, host, source.clone())?
            .with_tab_width(options.tab_width);

        let (emitter, subscription) = events::channel();
        interpreter.initialize(emitter);
        tracing::info!(%layout, %theme, snippet = %snippet.key, "session started");

        Ok(Session {
            source,
            editor,
            interpreter,
            bridge: ExecutionBridge::new(subscription),
            output: OutputLog::new(options.max_output_lines),
            boundary: BoundaryState::Initializing,
            parse_error: false,
            catalog,
            snippet,
            layout,
            theme,
            store,
            narrow_width: options.narrow_width,
            revision: 0,
        })
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Clear the output and start a run of the current source
    pub fn run_clicked(&mut self) -> Result<RunId, SessionError> {
        match &self.boundary {
            BoundaryState::Ready => {}
            BoundaryState::Initializing => return Err(SessionError::InterpreterNotReady),
            BoundaryState::Failed(reason) => {
                return Err(SessionError::InterpreterFailed(reason.clone()))
            }
        }

        self.output.clear();
        let run = self
            .source
            .with(|text| self.bridge.issue(self.interpreter.as_mut(), text));
        self.bump();
        Ok(run)
    }

    /// Show snippet `key`: editor content and source cell change together
    pub fn snippet_changed(&mut self, key: &str) -> Result<(), SessionError> {
        let snippet = self
            .catalog
            .get(key)
            .ok_or_else(|| SessionError::UnknownSnippet(key.to_string()))?
            .clone();

        self.editor.set_text(&snippet.code);
        tracing::debug!(snippet = %snippet.key, "snippet selected");
        self.snippet = snippet;
        self.bump();
        self.recheck();
        Ok(())
    }

    pub fn layout_toggled(&mut self) {
        self.layout = self.layout.toggled();
        self.persist(LAYOUT_KEY, self.layout.as_str());
        self.bump();
    }

    /// Switch between dark and light; the live editor keeps its content,
    /// cursor and undo history.
    pub fn theme_toggled(&mut self) {
        self.theme = self.theme.toggled();
        self.editor.apply_theme(self.theme);
        self.persist(THEME_KEY, self.theme.as_str());
        self.bump();
    }

    /// Record new source text and refresh the parse-error flag
    pub fn source_changed(&mut self, text: &str) {
        self.source.replace(text);
        self.recheck();
    }

    /// Feed a key to the editor; content changes go through `source_changed`
    pub fn handle_editor_key(&mut self, key: KeyEvent) -> EditOutcome {
        let outcome = self.editor.handle_key(key);
        if outcome == EditOutcome::Changed {
            let text = self.source.snapshot();
            self.source_changed(&text);
        }
        outcome
    }

    /// Deliver pending boundary events
    pub fn pump(&mut self) -> Pump {
        let pump = self.bridge.pump(&mut self.output);

        for change in &pump.lifecycle {
            match change {
                Lifecycle::Ready => {
                    if self.boundary == BoundaryState::Initializing {
                        tracing::info!("interpreter ready");
                        self.boundary = BoundaryState::Ready;
                        self.recheck();
                    }
                }
                Lifecycle::Failed(reason) => {
                    tracing::error!(%reason, "interpreter failed to initialize");
                    self.boundary = BoundaryState::Failed(reason.clone());
                }
            }
        }

        if !pump.is_empty() {
            self.bump();
        }
        pump
    }

    /// Re-evaluate the parse-error flag. Skipped until the boundary is
    /// ready; a failing check counts as "no error".
    fn recheck(&mut self) {
        if self.boundary != BoundaryState::Ready {
            return;
        }

        let result = self
            .source
            .with(|text| self.interpreter.check_parse_error(text));
        let parse_error = match result {
            Ok(flag) => flag,
            Err(InterpreterError::CheckUnsupported) => false,
            Err(e) => {
                tracing::warn!(error = %e, "syntax check failed");
                false
            }
        };

        if parse_error != self.parse_error {
            self.parse_error = parse_error;
            self.bump();
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key, value, error = %e, "could not save preference");
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn source_text(&self) -> String {
        self.source.snapshot()
    }

    pub fn editor(&self) -> &SourceEditor {
        &self.editor
    }

    pub fn boundary(&self) -> &BoundaryState {
        &self.boundary
    }

    pub fn can_run(&self) -> bool {
        self.boundary == BoundaryState::Ready
    }

    pub fn parse_error(&self) -> bool {
        self.parse_error
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn stdout(&self) -> &[String] {
        self.output.stdout()
    }

    pub fn stderr(&self) -> &[String] {
        self.output.stderr()
    }

    pub fn catalog(&self) -> &SnippetCatalog {
        &self.catalog
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    /// Stored layout preference
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Layout to render at `viewport_width` columns
    pub fn effective_layout(&self, viewport_width: u16) -> Layout {
        self.layout.effective(viewport_width, self.narrow_width)
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::Emitter;
    use crate::prefs::MemoryStore;

    /// Boundary that becomes ready on the first pump and never prints
    struct Silent;

    impl Interpreter for Silent {
        fn initialize(&mut self, emitter: Emitter) {
            emitter.ready();
        }

        fn run(&mut self, _run: RunId, _source: &str) {}

        fn check_parse_error(&mut self, _source: &str) -> Result<bool, InterpreterError> {
            Err(InterpreterError::CheckUnsupported)
        }
    }

    fn session() -> Session {
        Session::new(
            Box::new(Silent),
            Box::new(MemoryStore::new()),
            SnippetCatalog::builtin(),
            &EditorHost::new(),
            SessionOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_run_rejected_until_ready() {
        let mut session = session();
        assert!(matches!(session.run_clicked(), Err(SessionError::InterpreterNotReady)));

        session.pump();
        assert!(session.can_run());
        assert_eq!(session.run_clicked().unwrap(), RunId(1));
    }

    #[test]
    fn test_source_write_alone_keeps_revision() {
        let mut session = session();
        session.pump();
        let revision = session.revision();

        session.source_changed("print(2);");
        assert_eq!(session.revision(), revision);
        assert!(!session.parse_error());
        assert_eq!(session.source_text(), "print(2);");
    }

    #[test]
    fn test_unknown_initial_snippet() {
        let result = Session::new(
            Box::new(Silent),
            Box::new(MemoryStore::new()),
            SnippetCatalog::builtin(),
            &EditorHost::new(),
            SessionOptions {
                initial_snippet: Some("nope".to_string()),
                ..SessionOptions::default()
            },
        );
        assert!(matches!(result, Err(SessionError::UnknownSnippet(key)) if key == "nope"));
    }
}
