use crate::compiler::{compile, CompileOptions};
use crate::markup::escape_hyper_text;
use crate::motion::{beats_of, is_displayable_beat, Playhead};
use crate::scope::DocumentScopeStore;
use crate::types::{CompileOutput, ContentNode, MotionWindow};

pub const STARTER_SCRIPT: &str = include_str!("../fixtures/starter.hype");

/// One authoring session: source text, its scopes, the last compile and
/// the performance playhead.
pub struct Document {
    source: String,
    store: DocumentScopeStore,
    options: CompileOptions,
    output: CompileOutput,
    beats: Vec<ContentNode>,
    playhead: Playhead,
}

impl Document {
    pub fn new(options: CompileOptions) -> Self {
        let mut store = DocumentScopeStore::new();
        let output = compile(STARTER_SCRIPT, &mut store, &options);
        Self {
            source: STARTER_SCRIPT.to_string(),
            store,
            options,
            output,
            beats: Vec::new(),
            playhead: Playhead::default(),
        }
    }

    pub fn starter() -> Self {
        Self::new(CompileOptions::default())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text safe to place back into an edit surface.
    pub fn escaped_source(&self) -> String {
        escape_hyper_text(&self.source).into_owned()
    }

    pub fn output(&self) -> &CompileOutput {
        &self.output
    }

    pub fn markup(&self) -> &str {
        &self.output.markup
    }

    pub fn scopes(&self) -> &DocumentScopeStore {
        &self.store
    }

    pub fn beats(&self) -> &[ContentNode] {
        &self.beats
    }

    pub fn playhead(&self) -> Playhead {
        self.playhead
    }

    /// Recompiles from scratch. Variable scopes keep accumulating.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.output = compile(&self.source, &mut self.store, &self.options);
    }

    /// Loads another document, dropping every scope of the previous one.
    pub fn reload(&mut self, text: impl Into<String>) {
        self.store.clear();
        self.beats.clear();
        self.playhead = Playhead::default();
        self.edit(text);
    }

    /// Starts a performance of the current markup from the first beat.
    pub fn perform(&mut self) -> MotionWindow {
        self.beats = beats_of(&self.output.nodes, is_displayable_beat);
        self.playhead = Playhead::new(self.beats.len());
        tracing::debug!(beats = self.beats.len(), "performance started");
        self.window()
    }

    pub fn next(&mut self) -> MotionWindow {
        self.playhead.next();
        self.window()
    }

    pub fn back(&mut self) -> MotionWindow {
        self.playhead.back();
        self.window()
    }

    pub fn jump(&mut self, index: i64) -> MotionWindow {
        self.playhead.jump_signed(index);
        self.window()
    }

    pub fn window(&self) -> MotionWindow {
        self.playhead.window(&self.beats)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::starter()
    }
}
