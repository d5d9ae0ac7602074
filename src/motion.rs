use crate::types::{Beat, ContentNode, Direction, EdgeRole, MotionWindow, NodeKind};
use serde::{Deserialize, Serialize};

/// Default stage filter: comments and blank lines never become beats.
pub fn is_displayable_beat(node: &ContentNode) -> bool {
    !matches!(node.kind, NodeKind::Comment | NodeKind::Blank)
}

pub fn beats_of<F>(nodes: &[ContentNode], predicate: F) -> Vec<ContentNode>
where
    F: Fn(&ContentNode) -> bool,
{
    nodes.iter().filter(|n| predicate(n)).cloned().collect()
}

/// Computes the beats around `active_index` and their transition flags.
///
/// The window holds at most the previous, active and next beat. On a
/// forward step the leading edge leaves and the trailing edge enters; a
/// backward step evaluates the same rule against the reversed window and
/// marks every beat `reversed`. Beats are always returned in forward order.
pub fn compute_window(
    beats: &[ContentNode],
    active_index: usize,
    direction: Direction,
) -> MotionWindow {
    let total = beats.len();
    let start = active_index.saturating_sub(1);
    let end = active_index.saturating_add(2).min(total);

    let mut window = MotionWindow {
        active_index,
        direction,
        start,
        end,
        total,
        beats: Vec::new(),
    };
    if start >= end {
        return window;
    }

    let reversed = direction == Direction::Backward;
    window.beats = beats[start..end]
        .iter()
        .enumerate()
        .map(|(offset, node)| {
            let index = start + offset;
            Beat {
                index,
                node: node.clone(),
                is_active: index == active_index,
                edge_role: EdgeRole::None,
                reversed,
            }
        })
        .collect();

    if window.beats.len() < 2 {
        return window;
    }

    let last = window.beats.len() - 1;
    let (leaving, entering) = match direction {
        Direction::Forward => (0, last),
        Direction::Backward => (last, 0),
    };
    mark_edge(&mut window.beats[leaving], EdgeRole::Leave);
    mark_edge(&mut window.beats[entering], EdgeRole::Enter);

    window
}

fn mark_edge(beat: &mut Beat, role: EdgeRole) {
    if !beat.is_active {
        beat.edge_role = role;
    }
}

/// Playback position over a performed beat list.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Playhead {
    pub active: usize,
    pub total: usize,
    pub last_direction: Direction,
}

impl Playhead {
    pub fn new(total: usize) -> Self {
        Self {
            active: 0,
            total,
            last_direction: Direction::Forward,
        }
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1).min(self.total);
        self.last_direction = Direction::Forward;
    }

    pub fn back(&mut self) {
        self.active = self.active.saturating_sub(1);
        self.last_direction = Direction::Backward;
    }

    pub fn jump(&mut self, index: usize) {
        let target = index.min(self.total);
        self.last_direction = if target >= self.active {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.active = target;
    }

    /// Jump from a raw numeric input; negatives land on the first beat.
    pub fn jump_signed(&mut self, index: i64) {
        self.jump(usize::try_from(index).unwrap_or(0));
    }

    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    pub fn is_last(&self) -> bool {
        self.active == self.total
    }

    pub fn window(&self, beats: &[ContentNode]) -> MotionWindow {
        compute_window(beats, self.active, self.last_direction)
    }
}
