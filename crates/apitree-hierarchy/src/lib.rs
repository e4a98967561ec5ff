//! Collapsible hierarchy diagram.
//!
//! [`HierarchyView`] keeps the expand/collapse state of a static tree and, on
//! every change, lays the visible part out again and reconciles the drawn
//! shapes against the previous frame by stable [`ShapeId`]. Drawing is
//! delegated to a [`DrawingBackend`]; [`AnimatedScene`] is an in-memory
//! backend that interpolates transitions for a host renderer, and
//! [`RecordingBackend`] logs calls for tests.
//!
//! ```
//! use apitree_hierarchy::{HierarchyView, Node, RecordingBackend, ViewCommand, ViewConfig};
//!
//! let mut view = HierarchyView::new(&Node::sample(), ViewConfig::default());
//! let mut backend = RecordingBackend::default();
//!
//! let report = view.mount(&mut backend);
//! assert_eq!(report.visible, 4);
//!
//! view.dispatch(ViewCommand::ExpandAll, &mut backend);
//! assert_eq!(view.layout_pass().nodes.len(), Node::sample().count());
//! ```

pub mod backend;
pub mod config;
pub mod disclosure;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod node;
pub mod path;
pub mod reconcile;
pub mod recording;
pub mod scene;
pub mod view;

pub use backend::{DrawingBackend, Fill, LabelSide, LinkKey, NodeShape, NodeStyle, ShapeId, Transition};
pub use config::{Margin, ViewConfig};
pub use disclosure::{Disclosure, DisclosureNode, DisclosureTree, NodeKey};
pub use error::{Error, Result};
pub use geometry::{Lerp, Point, Position, Transform};
pub use layout::{LaidOutNode, LayoutLink, LayoutPass, TreeLayout};
pub use node::Node;
pub use path::LinkPath;
pub use reconcile::{Diff, reconcile};
pub use recording::{DrawCall, RecordingBackend};
pub use scene::{AnimatedScene, SceneNode};
pub use view::{HierarchyView, IdAllocator, ToggleEvent, UpdateReport, ViewCommand, VisibleNode};
