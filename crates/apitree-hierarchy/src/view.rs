//! The collapsible tree view.
//!
//! Every state change runs one update: lay out the visible tree, give newly
//! visible nodes an id, then match nodes by id and links by
//! `(parent id, child id)` against what was drawn last time. Entering
//! shapes grow out of the clicked node's previous position, exiting shapes
//! shrink into its new one.

use crate::backend::{
    DrawingBackend, Fill, LabelSide, LinkKey, NodeShape, NodeStyle, ShapeId, Transition,
};
use crate::config::ViewConfig;
use crate::disclosure::{Disclosure, DisclosureTree, NodeKey};
use crate::geometry::Position;
use crate::layout::{LayoutPass, TreeLayout};
use crate::node::Node;
use crate::path::LinkPath;
use crate::reconcile::reconcile;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Host input mapped onto the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// A click on the node with this id.
    Toggle(ShapeId),
    ExpandAll,
    CollapseAll,
    ResetView,
}

/// Counts from one update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
    pub links_entered: usize,
    pub links_updated: usize,
    pub links_exited: usize,
    /// Nodes in the new layout pass.
    pub visible: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleEvent {
    pub id: ShapeId,
    pub name: String,
    /// State after the toggle.
    pub disclosure: Disclosure,
    pub report: UpdateReport,
}

/// Hands out shape ids. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> ShapeId {
        self.last += 1;
        ShapeId(self.last)
    }

    pub fn issued(&self) -> u64 {
        self.last
    }
}

/// A node of the current layout pass, as printed by headless hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleNode {
    pub id: ShapeId,
    pub name: String,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub disclosure: Disclosure,
}

type Handler<E> = Box<dyn FnMut(&E)>;

pub struct HierarchyView {
    tree: DisclosureTree,
    config: ViewConfig,
    layout: TreeLayout,
    ids: IdAllocator,
    by_id: BTreeMap<ShapeId, NodeKey>,
    drawn_nodes: BTreeSet<ShapeId>,
    drawn_links: BTreeSet<LinkKey>,
    pass: LayoutPass,
    toggle_handlers: Vec<Handler<ToggleEvent>>,
    expand_all_handlers: Vec<Handler<UpdateReport>>,
    collapse_all_handlers: Vec<Handler<UpdateReport>>,
    reset_view_handlers: Vec<Box<dyn FnMut()>>,
}

impl HierarchyView {
    /// Build the view in its initial state: root expanded, everything below
    /// the root's children collapsed. Nothing is drawn until [`Self::mount`].
    pub fn new(root: &Node, config: ViewConfig) -> Self {
        let mut tree = DisclosureTree::new(root);
        let root_key = tree.root();
        tree.collapse_all_children(root_key);

        let start = Position::new(config.inner_height() / 2.0, 0.0);
        let root_node = tree.node_mut(root_key);
        root_node.position = start;
        root_node.previous_position = start;

        Self {
            tree,
            layout: config.layout(),
            config,
            ids: IdAllocator::default(),
            by_id: BTreeMap::new(),
            drawn_nodes: BTreeSet::new(),
            drawn_links: BTreeSet::new(),
            pass: LayoutPass::default(),
            toggle_handlers: Vec::new(),
            expand_all_handlers: Vec::new(),
            collapse_all_handlers: Vec::new(),
            reset_view_handlers: Vec::new(),
        }
    }

    pub fn on_toggle(&mut self, handler: impl FnMut(&ToggleEvent) + 'static) {
        self.toggle_handlers.push(Box::new(handler));
    }

    pub fn on_expand_all(&mut self, handler: impl FnMut(&UpdateReport) + 'static) {
        self.expand_all_handlers.push(Box::new(handler));
    }

    pub fn on_collapse_all(&mut self, handler: impl FnMut(&UpdateReport) + 'static) {
        self.collapse_all_handlers.push(Box::new(handler));
    }

    pub fn on_reset_view(&mut self, handler: impl FnMut() + 'static) {
        self.reset_view_handlers.push(Box::new(handler));
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn tree(&self) -> &DisclosureTree {
        &self.tree
    }

    /// The most recent layout pass.
    pub fn layout_pass(&self) -> &LayoutPass {
        &self.pass
    }

    pub fn key_of(&self, id: ShapeId) -> Option<NodeKey> {
        self.by_id.get(&id).copied()
    }

    pub fn id_of(&self, key: NodeKey) -> Option<ShapeId> {
        self.tree.node(key).id
    }

    /// Id of the first materialized node called `name`.
    pub fn find_id(&self, name: &str) -> Option<ShapeId> {
        self.by_id
            .iter()
            .find(|(_, key)| self.tree.node(**key).name == name)
            .map(|(id, _)| *id)
    }

    /// Allocate a fresh shape id.
    pub fn next_id(&mut self) -> ShapeId {
        self.ids.next_id()
    }

    /// First render: every initially visible node enters from the root.
    pub fn mount<B: DrawingBackend + ?Sized>(&mut self, backend: &mut B) -> UpdateReport {
        let root = self.tree.root();
        self.update(root, backend)
    }

    /// Re-lay out the visible tree and reconcile the drawn shapes against
    /// it, animating relative to `source`.
    pub fn update<B: DrawingBackend + ?Sized>(
        &mut self,
        source: NodeKey,
        backend: &mut B,
    ) -> UpdateReport {
        let pass = self.layout.compute(&self.tree);

        for laid_out in &pass.nodes {
            if self.tree.node(laid_out.key).id.is_none() {
                let id = self.ids.next_id();
                self.tree.node_mut(laid_out.key).id = Some(id);
                self.by_id.insert(id, laid_out.key);
            }
            self.tree.node_mut(laid_out.key).position = laid_out.position;
        }

        let source_before = self.tree.node(source).previous_position;
        let source_after = self.tree.node(source).position;
        let duration = self.config.duration();
        let mut report = UpdateReport {
            visible: pass.nodes.len(),
            ..UpdateReport::default()
        };

        let node_ids: Vec<ShapeId> = pass
            .nodes
            .iter()
            .filter_map(|laid_out| self.tree.node(laid_out.key).id)
            .collect();
        let nodes = reconcile(&self.drawn_nodes, &node_ids);

        for id in &nodes.enter {
            let key = self.by_id[id];
            backend.create_node(NodeShape {
                id: *id,
                label: self.tree.node(key).name.clone(),
                label_side: self.label_side(key),
                style: NodeStyle::hidden_at(source_before.screen(), self.fill(key)),
            });
            backend.animate_node(*id, self.shown_style(key), Transition::to(duration));
        }
        for id in &nodes.update {
            let key = self.by_id[id];
            backend.animate_node(*id, self.shown_style(key), Transition::to(duration));
        }
        for id in &nodes.exit {
            let key = self.by_id[id];
            backend.animate_node(
                *id,
                NodeStyle::hidden_at(source_after.screen(), self.fill(key)),
                Transition::removing(duration),
            );
        }

        let link_keys: Vec<LinkKey> = pass
            .links
            .iter()
            .filter_map(|link| {
                Some(LinkKey::new(
                    self.tree.node(link.parent).id?,
                    self.tree.node(link.child).id?,
                ))
            })
            .collect();
        let links = reconcile(&self.drawn_links, &link_keys);

        for key in &links.enter {
            backend.create_link(*key, LinkPath::degenerate(source_before));
            backend.animate_link(*key, self.link_path(*key), Transition::to(duration));
        }
        for key in &links.update {
            backend.animate_link(*key, self.link_path(*key), Transition::to(duration));
        }
        for key in &links.exit {
            backend.animate_link(
                *key,
                LinkPath::degenerate(source_after),
                Transition::removing(duration),
            );
        }

        report.entered = nodes.enter.len();
        report.updated = nodes.update.len();
        report.exited = nodes.exit.len();
        report.links_entered = links.enter.len();
        report.links_updated = links.update.len();
        report.links_exited = links.exit.len();

        self.drawn_nodes = node_ids.into_iter().collect();
        self.drawn_links = link_keys.into_iter().collect();

        for laid_out in &pass.nodes {
            let node = self.tree.node_mut(laid_out.key);
            node.previous_position = node.position;
        }
        self.pass = pass;

        tracing::debug!(
            source = %self.tree.node(source).name,
            visible = report.visible,
            entered = report.entered,
            updated = report.updated,
            exited = report.exited,
            "hierarchy updated"
        );
        report
    }

    /// Toggle the node with `id`. Returns `None` (and draws nothing) for
    /// leaves and unknown ids.
    pub fn toggle<B: DrawingBackend + ?Sized>(
        &mut self,
        id: ShapeId,
        backend: &mut B,
    ) -> Option<UpdateReport> {
        let key = self.key_of(id)?;
        if !self.tree.toggle(key) {
            return None;
        }
        let report = self.update(key, backend);

        let event = ToggleEvent {
            id,
            name: self.tree.node(key).name.clone(),
            disclosure: self.tree.disclosure(key),
            report,
        };
        for handler in &mut self.toggle_handlers {
            handler(&event);
        }
        Some(report)
    }

    pub fn expand_all<B: DrawingBackend + ?Sized>(&mut self, backend: &mut B) -> UpdateReport {
        let root = self.tree.root();
        self.tree.expand_all_descendants(root);
        let report = self.update(root, backend);
        for handler in &mut self.expand_all_handlers {
            handler(&report);
        }
        report
    }

    pub fn collapse_all<B: DrawingBackend + ?Sized>(&mut self, backend: &mut B) -> UpdateReport {
        let root = self.tree.root();
        self.tree.collapse_all_children(root);
        let report = self.update(root, backend);
        for handler in &mut self.collapse_all_handlers {
            handler(&report);
        }
        report
    }

    /// Animate the pan/zoom transform back to its initial value.
    pub fn reset_view<B: DrawingBackend + ?Sized>(&mut self, backend: &mut B) {
        backend.reset_transform(self.config.home_transform(), self.config.duration());
        for handler in &mut self.reset_view_handlers {
            handler();
        }
    }

    pub fn dispatch<B: DrawingBackend + ?Sized>(
        &mut self,
        command: ViewCommand,
        backend: &mut B,
    ) -> Option<UpdateReport> {
        match command {
            ViewCommand::Toggle(id) => self.toggle(id, backend),
            ViewCommand::ExpandAll => Some(self.expand_all(backend)),
            ViewCommand::CollapseAll => Some(self.collapse_all(backend)),
            ViewCommand::ResetView => {
                self.reset_view(backend);
                None
            }
        }
    }

    /// Remove every drawn shape immediately.
    pub fn teardown<B: DrawingBackend + ?Sized>(&mut self, backend: &mut B) {
        for key in std::mem::take(&mut self.drawn_links) {
            backend.remove_link(key);
        }
        for id in std::mem::take(&mut self.drawn_nodes) {
            backend.remove_node(id);
        }
    }

    pub fn visible_nodes(&self) -> Vec<VisibleNode> {
        self.pass
            .nodes
            .iter()
            .filter_map(|laid_out| {
                let node = self.tree.node(laid_out.key);
                Some(VisibleNode {
                    id: node.id?,
                    name: node.name.clone(),
                    depth: laid_out.depth,
                    x: laid_out.position.x,
                    y: laid_out.position.y,
                    disclosure: node.disclosure(),
                })
            })
            .collect()
    }

    fn fill(&self, key: NodeKey) -> Fill {
        if self.tree.node(key).has_hidden_children() {
            Fill::Collapsed
        } else {
            Fill::Plain
        }
    }

    fn label_side(&self, key: NodeKey) -> LabelSide {
        if self.tree.node(key).has_children() {
            LabelSide::Before
        } else {
            LabelSide::After
        }
    }

    fn shown_style(&self, key: NodeKey) -> NodeStyle {
        NodeStyle {
            position: self.tree.node(key).position.screen(),
            radius: self.config.radius,
            label_opacity: 1.0,
            fill: self.fill(key),
        }
    }

    fn link_path(&self, key: LinkKey) -> LinkPath {
        let position = |id: ShapeId| self.tree.node(self.by_id[&id]).position;
        LinkPath::new(position(key.parent), position(key.child))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HIDDEN;
    use crate::geometry::{Point, Transform};
    use crate::recording::{DrawCall, RecordingBackend};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn scenario() -> Node {
        Node::branch(
            "root",
            vec![
                Node::branch(
                    "a",
                    vec![
                        Node::leaf("a1"),
                        Node::branch("a2", vec![Node::leaf("a2x"), Node::leaf("a2y")]),
                        Node::leaf("a3"),
                    ],
                ),
                Node::leaf("b"),
                Node::leaf("c"),
            ],
        )
    }

    fn mounted() -> (HierarchyView, RecordingBackend) {
        let mut view = HierarchyView::new(&scenario(), ViewConfig::default());
        let mut backend = RecordingBackend::default();
        view.mount(&mut backend);
        (view, backend)
    }

    fn position_of(view: &HierarchyView, name: &str) -> Position {
        view.tree().node(view.tree().find(name).unwrap()).position
    }

    #[test]
    fn test_initial_pass_shows_root_and_children() {
        let (view, backend) = mounted();

        assert_eq!(view.layout_pass().nodes.len(), 4);
        assert_eq!(backend.created_nodes().len(), 4);
        assert_eq!(backend.created_links().len(), 3);

        // everything grows out of the root's starting point
        let origin = Position::new(280.0, 0.0).screen();
        for shape in backend.created_nodes() {
            assert_eq!(shape.style.position, origin);
            assert_eq!(shape.style.radius, HIDDEN);
            assert_eq!(shape.style.label_opacity, HIDDEN);
        }
        for (_, path) in backend.created_links() {
            assert_eq!(path, LinkPath::degenerate(Position::new(280.0, 0.0)));
        }
    }

    #[test]
    fn test_expanding_first_child_shows_seven() {
        let (mut view, mut backend) = mounted();
        let a = view.find_id("a").unwrap();
        let a_before = position_of(&view, "a");
        backend.take();

        let report = view.toggle(a, &mut backend).unwrap();

        assert_eq!(report.visible, 7);
        assert_eq!(report.entered, 3);
        assert_eq!(report.updated, 4);
        assert_eq!(report.exited, 0);
        assert_eq!(report.links_entered, 3);
        assert_eq!(report.links_updated, 3);
        for shape in backend.created_nodes() {
            assert_eq!(shape.style.position, a_before.screen());
        }
    }

    #[test]
    fn test_entering_nodes_animate_to_full_size() {
        let (view, backend) = mounted();
        let b = view.find_id("b").unwrap();

        let (style, transition) = backend.last_node_target(b).unwrap();
        assert_eq!(style.position, position_of(&view, "b").screen());
        assert_eq!(style.radius, 10.0);
        assert_eq!(style.label_opacity, 1.0);
        assert_eq!(transition.duration, Duration::from_millis(750));
        assert!(!transition.remove_on_end);
    }

    #[test]
    fn test_collapsing_exits_toward_source() {
        let (mut view, mut backend) = mounted();
        let a = view.find_id("a").unwrap();
        view.toggle(a, &mut backend);
        backend.take();

        let report = view.toggle(a, &mut backend).unwrap();
        let a_now = position_of(&view, "a");

        assert_eq!(report.visible, 4);
        assert_eq!(report.exited, 3);
        assert_eq!(backend.exiting_nodes().len(), 3);
        assert_eq!(backend.exiting_links().len(), 3);
        for id in backend.exiting_nodes() {
            let (style, _) = backend.last_node_target(id).unwrap();
            assert_eq!(style.position, a_now.screen());
            assert_eq!(style.radius, HIDDEN);
        }
        assert!(backend.calls().iter().any(|call| matches!(
            call,
            DrawCall::AnimateLink { to, transition, .. }
                if transition.remove_on_end && *to == LinkPath::degenerate(a_now)
        )));
    }

    #[test]
    fn test_fill_tracks_hidden_children() {
        let (mut view, mut backend) = mounted();
        let a = view.find_id("a").unwrap();
        let b = view.find_id("b").unwrap();

        assert_eq!(backend.last_node_target(a).unwrap().0.fill, Fill::Collapsed);
        assert_eq!(backend.last_node_target(b).unwrap().0.fill, Fill::Plain);

        view.toggle(a, &mut backend);
        assert_eq!(backend.last_node_target(a).unwrap().0.fill, Fill::Plain);

        let a2 = view.find_id("a2").unwrap();
        assert_eq!(backend.last_node_target(a2).unwrap().0.fill, Fill::Collapsed);
    }

    #[test]
    fn test_labels_sit_before_nodes_with_children() {
        let (view, backend) = mounted();
        let side = |name: &str| {
            let id = view.find_id(name).unwrap();
            backend
                .created_nodes()
                .into_iter()
                .find(|shape| shape.id == id)
                .unwrap()
                .label_side
        };

        assert_eq!(side("root"), LabelSide::Before);
        assert_eq!(side("a"), LabelSide::Before);
        assert_eq!(side("b"), LabelSide::After);
    }

    #[test]
    fn test_ids_are_stable_across_toggles() {
        let (mut view, mut backend) = mounted();
        let a = view.find_id("a").unwrap();
        view.toggle(a, &mut backend);
        let a1 = view.find_id("a1").unwrap();

        view.toggle(a, &mut backend);
        view.toggle(a, &mut backend);

        assert_eq!(view.find_id("a1"), Some(a1));
        assert_eq!(view.ids.issued(), 7);
        assert!(view.next_id() > a1);
    }

    #[test]
    fn test_toggle_twice_restores_layout() {
        let (mut view, mut backend) = mounted();
        let a = view.find_id("a").unwrap();
        let before = view.visible_nodes();

        view.toggle(a, &mut backend);
        view.toggle(a, &mut backend);

        assert_eq!(view.visible_nodes(), before);
    }

    #[test]
    fn test_leaf_toggle_draws_nothing() {
        let (mut view, mut backend) = mounted();
        let b = view.find_id("b").unwrap();
        backend.take();

        assert!(view.toggle(b, &mut backend).is_none());
        assert!(view.toggle(ShapeId(999), &mut backend).is_none());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_expand_and_collapse_all() {
        let (mut view, mut backend) = mounted();

        let expanded = view.expand_all(&mut backend);
        assert_eq!(expanded.visible, 9);
        let mut ids: Vec<ShapeId> = view.visible_nodes().iter().map(|n| n.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 9);

        let collapsed = view.collapse_all(&mut backend);
        assert_eq!(collapsed.visible, 4);
        assert_eq!(collapsed.exited, 5);
        assert_eq!(
            view.tree().disclosure(view.tree().find("a2").unwrap()),
            Disclosure::Collapsed
        );
    }

    #[test]
    fn test_previous_positions_are_persisted() {
        let (view, _) = mounted();

        for laid_out in &view.layout_pass().nodes {
            let node = view.tree().node(laid_out.key);
            assert_eq!(node.previous_position, laid_out.position);
        }
    }

    #[test]
    fn test_handlers_observe_commands() {
        let (mut view, mut backend) = mounted();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&seen);
        view.on_toggle(move |event| {
            log.borrow_mut()
                .push(format!("toggle {} {:?}", event.name, event.disclosure))
        });
        let log = Rc::clone(&seen);
        view.on_expand_all(move |report| log.borrow_mut().push(format!("expand {}", report.visible)));
        let log = Rc::clone(&seen);
        view.on_collapse_all(move |report| {
            log.borrow_mut().push(format!("collapse {}", report.visible))
        });
        let log = Rc::clone(&seen);
        view.on_reset_view(move || log.borrow_mut().push("reset".to_string()));

        let a = view.find_id("a").unwrap();
        view.dispatch(ViewCommand::Toggle(a), &mut backend);
        view.dispatch(ViewCommand::ExpandAll, &mut backend);
        view.dispatch(ViewCommand::CollapseAll, &mut backend);
        backend.take();
        assert!(view.dispatch(ViewCommand::ResetView, &mut backend).is_none());

        assert_eq!(
            *seen.borrow(),
            vec!["toggle a Expanded", "expand 9", "collapse 4", "reset"]
        );
        assert_eq!(
            backend.calls(),
            &[DrawCall::ResetTransform {
                to: Transform::translate(120.0, 20.0),
                duration: Duration::from_millis(750),
            }]
        );
    }

    #[test]
    fn test_teardown_removes_drawn_shapes() {
        let (mut view, mut backend) = mounted();
        backend.take();

        view.teardown(&mut backend);

        let removed_nodes = backend
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::RemoveNode(_)))
            .count();
        let removed_links = backend
            .calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::RemoveLink(_)))
            .count();
        assert_eq!((removed_nodes, removed_links), (4, 3));
    }

    #[test]
    fn test_scene_settles_on_layout() {
        let mut view = HierarchyView::new(&Node::sample(), ViewConfig::default());
        let mut scene = crate::scene::AnimatedScene::new(view.config().home_transform());
        view.mount(&mut scene);
        scene.advance(Duration::from_millis(750));

        for node in view.visible_nodes() {
            let drawn = scene.node(node.id).unwrap();
            assert_eq!(drawn.style.position, Point::new(node.y, node.x));
            assert_eq!(drawn.style.radius, 10.0);
        }
        assert!(!scene.is_animating());
    }
}
