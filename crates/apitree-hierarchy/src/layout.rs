//! Tidy tree layout over the visible part of a [`DisclosureTree`].
//!
//! Subtrees are packed bottom-up: each child is shifted right until its
//! left contour clears the accumulated right contour of its earlier
//! siblings, then the parent is centered over its first and last child.
//! Adjacent siblings are kept one unit apart, nodes of different parents two
//! units. The result is scaled to span the configured breadth with half a
//! separation of padding on each side.
//!
//! The depth coordinate ignores the packing and is `depth * depth_step`, so
//! every level sits at a fixed indentation.

use crate::disclosure::{DisclosureTree, NodeKey};
use crate::geometry::Position;

const SIBLING_SEPARATION: f64 = 1.0;
const COUSIN_SEPARATION: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeLayout {
    pub breadth: f64,
    pub depth_step: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutNode {
    pub key: NodeKey,
    pub parent: Option<NodeKey>,
    pub depth: usize,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutLink {
    pub parent: NodeKey,
    pub child: NodeKey,
}

/// One layout of the visible tree: nodes in pre-order and the edges
/// between visible parents and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPass {
    pub nodes: Vec<LaidOutNode>,
    pub links: Vec<LayoutLink>,
}

impl LayoutPass {
    pub fn get(&self, key: NodeKey) -> Option<&LaidOutNode> {
        self.nodes.iter().find(|node| node.key == key)
    }
}

/// Horizontal extent of a subtree per depth level, relative to its root.
type Contour = Vec<(f64, f64)>;

struct Slot {
    key: NodeKey,
    parent: Option<usize>,
    depth: usize,
    children: Vec<usize>,
    /// Offset from the parent's x.
    offset: f64,
}

impl TreeLayout {
    pub fn new(breadth: f64, depth_step: f64) -> Self {
        Self {
            breadth,
            depth_step,
        }
    }

    pub fn compute(&self, tree: &DisclosureTree) -> LayoutPass {
        let mut slots = collect_visible(tree);

        pack(&mut slots);

        let mut xs = vec![0.0; slots.len()];
        for i in 1..slots.len() {
            if let Some(parent) = slots[i].parent {
                xs[i] = xs[parent] + slots[i].offset;
            }
        }

        let scaled = self.scale(&slots, &xs);

        let nodes = slots
            .iter()
            .zip(scaled)
            .map(|(slot, x)| LaidOutNode {
                key: slot.key,
                parent: slot.parent.map(|p| slots[p].key),
                depth: slot.depth,
                position: Position::new(x, slot.depth as f64 * self.depth_step),
            })
            .collect();

        let links = slots
            .iter()
            .filter_map(|slot| {
                slot.parent.map(|p| LayoutLink {
                    parent: slots[p].key,
                    child: slot.key,
                })
            })
            .collect();

        LayoutPass { nodes, links }
    }

    /// Map packed x values onto `[0, breadth]`, padding the outermost nodes
    /// by half their separation.
    fn scale(&self, slots: &[Slot], xs: &[f64]) -> Vec<f64> {
        let mut left = 0;
        let mut right = 0;
        for (i, x) in xs.iter().enumerate() {
            if *x < xs[left] {
                left = i;
            }
            if *x > xs[right] {
                right = i;
            }
        }

        let separation = if slots[left].parent == slots[right].parent {
            SIBLING_SEPARATION
        } else {
            COUSIN_SEPARATION
        };
        let pad = separation / 2.0;
        let tx = pad - xs[left];
        let kx = self.breadth / (xs[right] + pad + tx);

        xs.iter().map(|x| (x + tx) * kx).collect()
    }
}

/// Visible nodes in pre-order with parent/child indices into the result.
fn collect_visible(tree: &DisclosureTree) -> Vec<Slot> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut stack = vec![(tree.root(), None, 0usize)];

    while let Some((key, parent, depth)) = stack.pop() {
        let index = slots.len();
        slots.push(Slot {
            key,
            parent,
            depth,
            children: Vec::new(),
            offset: 0.0,
        });
        if let Some(p) = parent {
            slots[p].children.push(index);
        }
        for child in tree.node(key).visible_children().iter().rev() {
            stack.push((*child, Some(index), depth + 1));
        }
    }

    slots
}

/// Assign each slot its offset from its parent.
fn pack(slots: &mut [Slot]) {
    let mut contours: Vec<Option<Contour>> = vec![None; slots.len()];

    // Pre-order reversed visits every child before its parent.
    for v in (0..slots.len()).rev() {
        let children = slots[v].children.clone();
        if children.is_empty() {
            contours[v] = Some(vec![(0.0, 0.0)]);
            continue;
        }

        let mut merged: Contour = Vec::new();
        let mut offsets = Vec::with_capacity(children.len());

        for &child in &children {
            let contour = contours[child].take().unwrap_or_else(|| vec![(0.0, 0.0)]);
            let offset = if merged.is_empty() {
                0.0
            } else {
                required_offset(&merged, &contour)
            };
            merge(&mut merged, &contour, offset);
            offsets.push(offset);
        }

        let first = offsets[0];
        let last = offsets[offsets.len() - 1];
        let center = (first + last) / 2.0;

        for (&child, offset) in children.iter().zip(&offsets) {
            slots[child].offset = offset - center;
        }

        let mut contour = Vec::with_capacity(merged.len() + 1);
        contour.push((0.0, 0.0));
        contour.extend(merged.iter().map(|(min, max)| (min - center, max - center)));
        contours[v] = Some(contour);
    }
}

/// Smallest offset placing `next` clear of `placed` on every shared level.
fn required_offset(placed: &Contour, next: &Contour) -> f64 {
    placed
        .iter()
        .zip(next)
        .enumerate()
        .map(|(level, ((_, right), (left, _)))| {
            let separation = if level == 0 {
                SIBLING_SEPARATION
            } else {
                COUSIN_SEPARATION
            };
            right + separation - left
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

fn merge(merged: &mut Contour, contour: &Contour, offset: f64) {
    for (level, (min, max)) in contour.iter().enumerate() {
        let (min, max) = (min + offset, max + offset);
        match merged.get_mut(level) {
            Some(extent) => {
                extent.0 = extent.0.min(min);
                extent.1 = extent.1.max(max);
            }
            None => merged.push((min, max)),
        }
    }
}
