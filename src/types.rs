use crate::error::HypeError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompileOutput {
    pub markup: String,
    pub nodes: Vec<ContentNode>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Comment,
    Heading,
    Character,
    Quote,
    Parenthetical,
    Effect,
    Action,
    Blank,
    Embed,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContentNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub text: String,
    pub line_no: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub attributes: IndexMap<String, String>,
}

impl ContentNode {
    pub fn simple(kind: NodeKind, text: impl Into<String>, line_no: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line_no,
            tag_name: None,
            attributes: IndexMap::new(),
        }
    }

    pub fn blank(line_no: usize) -> Self {
        Self::simple(NodeKind::Blank, String::new(), line_no)
    }

    pub fn embed(
        tag_name: impl Into<String>,
        attributes: IndexMap<String, String>,
        line_no: usize,
    ) -> Self {
        Self {
            kind: NodeKind::Embed,
            text: String::new(),
            line_no,
            tag_name: Some(tag_name.into()),
            attributes,
        }
    }
}

/// Travel direction of the last playback step.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl FromStr for Direction {
    type Err = HypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" | "forwards" | "next" => Ok(Direction::Forward),
            "backward" | "backwards" | "back" => Ok(Direction::Backward),
            other => Err(HypeError::UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRole {
    #[default]
    None,
    Enter,
    Leave,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Beat {
    /// Position in the full beat list.
    pub index: usize,
    pub node: ContentNode,
    pub is_active: bool,
    pub edge_role: EdgeRole,
    /// Set on backward steps so the presentation mirrors the animation.
    pub reversed: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct MotionWindow {
    pub active_index: usize,
    pub direction: Direction,
    pub start: usize,
    pub end: usize,
    pub total: usize,
    pub beats: Vec<Beat>,
}

impl MotionWindow {
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }
}
