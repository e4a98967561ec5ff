use crate::backend::{DrawingBackend, LinkKey, NodeShape, NodeStyle, ShapeId, Transition};
use crate::geometry::Transform;
use crate::path::LinkPath;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    CreateNode(NodeShape),
    RemoveNode(ShapeId),
    AnimateNode {
        id: ShapeId,
        to: NodeStyle,
        transition: Transition,
    },
    CreateLink {
        key: LinkKey,
        path: LinkPath,
    },
    RemoveLink(LinkKey),
    AnimateLink {
        key: LinkKey,
        to: LinkPath,
        transition: Transition,
    },
    ResetTransform {
        to: Transform,
        duration: Duration,
    },
}

/// Backend that records every call, for tests and headless dumps.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
}

impl RecordingBackend {
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Return and clear the recorded calls.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn created_nodes(&self) -> Vec<&NodeShape> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::CreateNode(shape) => Some(shape),
                _ => None,
            })
            .collect()
    }

    /// Final animation target recorded for `id`, if any.
    pub fn last_node_target(&self, id: ShapeId) -> Option<(&NodeStyle, &Transition)> {
        self.calls.iter().rev().find_map(|call| match call {
            DrawCall::AnimateNode {
                id: target,
                to,
                transition,
            } if *target == id => Some((to, transition)),
            _ => None,
        })
    }

    /// Nodes animated with `remove_on_end`.
    pub fn exiting_nodes(&self) -> Vec<ShapeId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::AnimateNode { id, transition, .. } if transition.remove_on_end => {
                    Some(*id)
                }
                _ => None,
            })
            .collect()
    }

    pub fn created_links(&self) -> Vec<(LinkKey, LinkPath)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::CreateLink { key, path } => Some((*key, *path)),
                _ => None,
            })
            .collect()
    }

    pub fn exiting_links(&self) -> Vec<LinkKey> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::AnimateLink { key, transition, .. } if transition.remove_on_end => {
                    Some(*key)
                }
                _ => None,
            })
            .collect()
    }
}

impl DrawingBackend for RecordingBackend {
    fn create_node(&mut self, shape: NodeShape) {
        self.calls.push(DrawCall::CreateNode(shape));
    }

    fn remove_node(&mut self, id: ShapeId) {
        self.calls.push(DrawCall::RemoveNode(id));
    }

    fn animate_node(&mut self, id: ShapeId, to: NodeStyle, transition: Transition) {
        self.calls.push(DrawCall::AnimateNode { id, to, transition });
    }

    fn create_link(&mut self, key: LinkKey, path: LinkPath) {
        self.calls.push(DrawCall::CreateLink { key, path });
    }

    fn remove_link(&mut self, key: LinkKey) {
        self.calls.push(DrawCall::RemoveLink(key));
    }

    fn animate_link(&mut self, key: LinkKey, to: LinkPath, transition: Transition) {
        self.calls.push(DrawCall::AnimateLink { key, to, transition });
    }

    fn reset_transform(&mut self, to: Transform, duration: Duration) {
        self.calls.push(DrawCall::ResetTransform { to, duration });
    }
}
