use crate::ast::{Field, Line, Rune};
use crate::markup;
use crate::parser::{parse_field, parse_line, split_lines};
use crate::scope::{DocumentScopeStore, GLOBAL_SCOPE};
use crate::types::{CompileOutput, ContentNode, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Put each rendered node on its own line.
    pub pretty: bool,
    /// Scope written by variables sections until a `{name` line picks another.
    pub default_scope: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            default_scope: GLOBAL_SCOPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Variables,
    Tag,
}

pub struct CompilerState<'a> {
    pub mode: Mode,
    pub active_tag_name: String,
    pub active_scope_name: String,
    pub nodes: Vec<ContentNode>,

    options: CompileOptions,
    store: &'a mut DocumentScopeStore,
    line_no: usize,
}

impl<'a> CompilerState<'a> {
    pub fn new(store: &'a mut DocumentScopeStore) -> Self {
        Self::with_options(store, CompileOptions::default())
    }

    pub fn with_options(store: &'a mut DocumentScopeStore, options: CompileOptions) -> Self {
        Self {
            mode: Mode::Normal,
            active_tag_name: String::new(),
            active_scope_name: options.default_scope.clone(),
            nodes: Vec::new(),
            options,
            store,
            line_no: 0,
        }
    }

    pub fn compile(mut self, script: &str) -> CompileOutput {
        for (line_no, line) in split_lines(script) {
            self.line_no = line_no;
            self.feed(line);
        }

        match self.mode {
            Mode::Normal => {}
            Mode::Tag => tracing::debug!(
                tag = %self.active_tag_name,
                "script ended inside a tag section, no embed emitted"
            ),
            Mode::Variables => tracing::debug!(
                scope = %self.active_scope_name,
                "script ended inside a variables section"
            ),
        }

        let markup = markup::render(&self.nodes, self.options.pretty);
        tracing::debug!(nodes = self.nodes.len(), lines = self.line_no, "compiled script");

        CompileOutput {
            markup,
            nodes: self.nodes,
        }
    }

    fn feed(&mut self, line: &str) {
        match self.mode {
            Mode::Normal => self.handle_normal(line),
            Mode::Variables => self.handle_variables(line),
            Mode::Tag => self.handle_tag(line),
        }
    }

    fn handle_normal(&mut self, line: &str) {
        match parse_line(line) {
            Line::Blank => self.nodes.push(ContentNode::blank(self.line_no)),
            Line::Rune { rune, text } => {
                self.nodes
                    .push(ContentNode::simple(rune_kind(rune), text, self.line_no));
            }
            Line::TagOpen(name) => {
                self.active_tag_name = name.to_string();
                self.store.reset_attributes(name);
                self.set_mode(Mode::Tag);
            }
            Line::ScopeOpen(name) => {
                self.active_scope_name = name.to_string();
                self.store.reset_attributes(name);
                self.set_mode(Mode::Variables);
            }
            Line::Action(text) => {
                self.nodes
                    .push(ContentNode::simple(NodeKind::Action, text, self.line_no));
            }
        }
    }

    // The active scope name outlives the section on purpose; only a new
    // compile pass starts again at the default scope.
    fn handle_variables(&mut self, line: &str) {
        match parse_field(line) {
            Field::End => self.set_mode(Mode::Normal),
            Field::Entry { key, value } => {
                self.store.set(&self.active_scope_name, key, value);
            }
        }
    }

    fn handle_tag(&mut self, line: &str) {
        match parse_field(line) {
            Field::End => {
                let attributes = self.store.attributes(&self.active_tag_name);
                self.nodes.push(ContentNode::embed(
                    self.active_tag_name.clone(),
                    attributes,
                    self.line_no,
                ));
                self.set_mode(Mode::Normal);
            }
            Field::Entry { key, value } => {
                self.store
                    .push_attribute(&self.active_tag_name, key, value);
            }
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        tracing::trace!(line_no = self.line_no, from = ?self.mode, to = ?mode, "mode change");
        self.mode = mode;
    }
}

fn rune_kind(rune: Rune) -> NodeKind {
    match rune {
        Rune::Comment => NodeKind::Comment,
        Rune::Heading => NodeKind::Heading,
        Rune::Character => NodeKind::Character,
        Rune::Quote => NodeKind::Quote,
        Rune::Parenthetical => NodeKind::Parenthetical,
        Rune::Effect => NodeKind::Effect,
    }
}

/// Compiles a script against a document's scope store.
pub fn compile(
    script: &str,
    store: &mut DocumentScopeStore,
    options: &CompileOptions,
) -> CompileOutput {
    CompilerState::with_options(store, options.clone()).compile(script)
}

/// Compiles a standalone script with default options and a throwaway store.
pub fn compile_text(script: &str) -> CompileOutput {
    let mut store = DocumentScopeStore::new();
    CompilerState::new(&mut store).compile(script)
}
