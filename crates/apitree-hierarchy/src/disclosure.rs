//! Expand/collapse state over a static [`Node`] tree.
//!
//! The tree is flattened into an arena indexed by [`NodeKey`]. Each node
//! owns the keys of its children, held either as visible or as hidden.
//! Toggling moves the list from one side to the other without touching the
//! subtree underneath, so a re-expanded node shows its descendants exactly
//! as they were left.

use crate::backend::ShapeId;
use crate::geometry::Position;
use crate::node::Node;
use serde::Serialize;

/// Index of a node in a [`DisclosureTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(pub(crate) usize);

impl NodeKey {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disclosure {
    Leaf,
    Expanded,
    Collapsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Children {
    Leaf,
    Visible(Vec<NodeKey>),
    Hidden(Vec<NodeKey>),
}

#[derive(Debug, Clone)]
pub struct DisclosureNode {
    pub name: String,
    /// Assigned by the view the first time the node is laid out.
    pub id: Option<ShapeId>,
    pub position: Position,
    /// Position at the end of the previous update; entering children grow
    /// out of their parent's previous position.
    pub previous_position: Position,
    children: Children,
}

impl DisclosureNode {
    pub fn disclosure(&self) -> Disclosure {
        match self.children {
            Children::Leaf => Disclosure::Leaf,
            Children::Visible(_) => Disclosure::Expanded,
            Children::Hidden(_) => Disclosure::Collapsed,
        }
    }

    pub fn visible_children(&self) -> &[NodeKey] {
        match &self.children {
            Children::Visible(keys) => keys,
            _ => &[],
        }
    }

    pub fn hidden_children(&self) -> &[NodeKey] {
        match &self.children {
            Children::Hidden(keys) => keys,
            _ => &[],
        }
    }

    /// Children regardless of whether they are shown.
    pub fn children(&self) -> &[NodeKey] {
        match &self.children {
            Children::Visible(keys) | Children::Hidden(keys) => keys,
            Children::Leaf => &[],
        }
    }

    pub fn has_children(&self) -> bool {
        !matches!(self.children, Children::Leaf)
    }

    pub fn has_hidden_children(&self) -> bool {
        matches!(self.children, Children::Hidden(_))
    }
}

#[derive(Debug, Clone)]
pub struct DisclosureTree {
    nodes: Vec<DisclosureNode>,
}

impl DisclosureTree {
    /// Flatten `root` into an arena with every node expanded.
    pub fn new(root: &Node) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(root.count()),
        };
        tree.insert(root);
        tree
    }

    fn insert(&mut self, node: &Node) -> NodeKey {
        let key = NodeKey(self.nodes.len());
        self.nodes.push(DisclosureNode {
            name: node.name.clone(),
            id: None,
            position: Position::default(),
            previous_position: Position::default(),
            children: Children::Leaf,
        });

        if !node.is_leaf() {
            let children: Vec<NodeKey> =
                node.children.iter().map(|child| self.insert(child)).collect();
            self.nodes[key.0].children = Children::Visible(children);
        }
        key
    }

    pub fn root(&self) -> NodeKey {
        NodeKey(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, key: NodeKey) -> &DisclosureNode {
        &self.nodes[key.0]
    }

    pub fn node_mut(&mut self, key: NodeKey) -> &mut DisclosureNode {
        &mut self.nodes[key.0]
    }

    pub fn disclosure(&self, key: NodeKey) -> Disclosure {
        self.node(key).disclosure()
    }

    /// Swap visible and hidden children. Returns `false` for leaves,
    /// which have nothing to show or hide.
    pub fn toggle(&mut self, key: NodeKey) -> bool {
        let node = &mut self.nodes[key.0];
        node.children = match std::mem::replace(&mut node.children, Children::Leaf) {
            Children::Visible(keys) => Children::Hidden(keys),
            Children::Hidden(keys) => Children::Visible(keys),
            Children::Leaf => return false,
        };
        true
    }

    pub fn expand(&mut self, key: NodeKey) {
        if self.node(key).has_hidden_children() {
            self.toggle(key);
        }
    }

    pub fn collapse(&mut self, key: NodeKey) {
        if self.disclosure(key) == Disclosure::Expanded {
            self.toggle(key);
        }
    }

    /// Expand `key` and every node below it.
    pub fn expand_all_descendants(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            self.expand(current);
            stack.extend_from_slice(self.node(current).children());
        }
    }

    /// Collapse `key` and every node below it, including nodes that were
    /// already hidden under a collapsed ancestor.
    pub fn collapse_subtree(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            self.collapse(current);
            stack.extend_from_slice(self.node(current).children());
        }
    }

    /// Expand `key` itself and fully collapse each of its children.
    pub fn collapse_all_children(&mut self, key: NodeKey) {
        self.expand(key);
        let children = self.node(key).children().to_vec();
        for child in children {
            self.collapse_subtree(child);
        }
    }

    /// Visible nodes in depth-first pre-order.
    pub fn visible(&self) -> Vec<NodeKey> {
        let mut order = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(key) = stack.pop() {
            order.push(key);
            stack.extend(self.node(key).visible_children().iter().rev());
        }
        order
    }

    /// Disclosure of every node under `key` (inclusive), in pre-order over
    /// all children whether shown or not.
    pub fn subtree_state(&self, key: NodeKey) -> Vec<(NodeKey, Disclosure)> {
        let mut state = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            state.push((current, self.disclosure(current)));
            stack.extend(self.node(current).children().iter().rev());
        }
        state
    }

    pub fn find(&self, name: &str) -> Option<NodeKey> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeKey)
    }
}
