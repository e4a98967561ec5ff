use apitree_hierarchy::{
    AnimatedScene, Disclosure, HierarchyView, Node, Point, ShapeId, ViewCommand, ViewConfig,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Drawing-space distance moved per pan key.
const PAN_STEP: f64 = 40.0;
const ZOOM_STEP: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

pub(crate) struct App {
    pub view: HierarchyView,
    pub scene: AnimatedScene,
    pub selected: Option<ShapeId>,
    pub status: Rc<RefCell<String>>,
    /// Inner diagram area from the last draw, for mapping mouse clicks.
    pub canvas: Rect,
}

impl App {
    pub fn new(root: &Node, config: ViewConfig, expand_all: bool) -> Self {
        let mut view = HierarchyView::new(root, config);
        let mut scene = AnimatedScene::new(view.config().home_transform());
        view.mount(&mut scene);
        if expand_all {
            view.expand_all(&mut scene);
        }

        let status = Rc::new(RefCell::new(String::new()));
        let log = Rc::clone(&status);
        view.on_toggle(move |event| {
            let verb = match event.disclosure {
                Disclosure::Expanded => "expanded",
                _ => "collapsed",
            };
            *log.borrow_mut() = format!("{} {} ({} shown)", verb, event.name, event.report.visible);
        });
        let log = Rc::clone(&status);
        view.on_expand_all(move |report| {
            *log.borrow_mut() = format!("expanded all ({} shown)", report.visible);
        });
        let log = Rc::clone(&status);
        view.on_collapse_all(move |report| {
            *log.borrow_mut() = format!("collapsed all ({} shown)", report.visible);
        });
        let log = Rc::clone(&status);
        view.on_reset_view(move || *log.borrow_mut() = "view reset".to_string());

        let selected = view.visible_nodes().first().map(|node| node.id);
        Self {
            view,
            scene,
            selected,
            status,
            canvas: Rect::default(),
        }
    }

    /// Move the animation clock to `now`, measured from startup.
    pub fn tick(&mut self, now: Duration) {
        self.scene.advance(now);
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit;
            }
            KeyCode::Up if shift => self.pan(0.0, PAN_STEP),
            KeyCode::Down if shift => self.pan(0.0, -PAN_STEP),
            KeyCode::Left if shift => self.pan(PAN_STEP, 0.0),
            KeyCode::Right if shift => self.pan(-PAN_STEP, 0.0),
            KeyCode::Up => self.select(-1),
            KeyCode::Down => self.select(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.selected {
                    self.dispatch(ViewCommand::Toggle(id));
                }
            }
            KeyCode::Char('e') => self.dispatch(ViewCommand::ExpandAll),
            KeyCode::Char('c') => self.dispatch(ViewCommand::CollapseAll),
            KeyCode::Char('r') => self.dispatch(ViewCommand::ResetView),
            KeyCode::Char('h') => self.pan(PAN_STEP, 0.0),
            KeyCode::Char('l') => self.pan(-PAN_STEP, 0.0),
            KeyCode::Char('k') => self.pan(0.0, PAN_STEP),
            KeyCode::Char('j') => self.pan(0.0, -PAN_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom(ZOOM_STEP),
            KeyCode::Char('-') => self.zoom(1.0 / ZOOM_STEP),
            _ => {}
        }
        Flow::Continue
    }

    /// Toggle the node under the terminal cell, if any. Returns whether a
    /// node was hit.
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        let Some(point) = self.cell_to_drawing(column, row) else {
            return false;
        };
        let slop = self.cell_extent() / self.scene.transform().scale;
        match self.scene.hit_test(point, slop) {
            Some(id) => {
                self.selected = Some(id);
                self.dispatch(ViewCommand::Toggle(id));
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, command: ViewCommand) {
        self.view.dispatch(command, &mut self.scene);
        self.keep_selection_visible();
    }

    fn select(&mut self, delta: isize) {
        let visible = self.view.visible_nodes();
        if visible.is_empty() {
            return;
        }
        let current = self
            .selected
            .and_then(|id| visible.iter().position(|node| node.id == id))
            .unwrap_or(0);
        let next = (current as isize + delta).clamp(0, visible.len() as isize - 1) as usize;
        self.selected = Some(visible[next].id);
    }

    /// After a collapse, move the selection up to its closest visible ancestor.
    fn keep_selection_visible(&mut self) {
        let Some(selected) = self.selected.and_then(|id| self.view.key_of(id)) else {
            return;
        };
        let tree = self.view.tree();
        let pass = self.view.layout_pass();
        if pass.get(selected).is_some() {
            return;
        }
        self.selected = pass
            .nodes
            .iter()
            .rev()
            .find(|node| {
                tree.subtree_state(node.key)
                    .iter()
                    .any(|(key, _)| *key == selected)
            })
            .and_then(|node| self.view.id_of(node.key));
    }

    fn pan(&mut self, dx: f64, dy: f64) {
        let transform = self.scene.transform().panned(dx, dy);
        self.scene.set_transform(transform);
    }

    fn zoom(&mut self, factor: f64) {
        let config = self.view.config();
        let anchor = Point::new(config.width / 2.0, config.height / 2.0);
        let transform = self.scene.transform().zoomed(factor, anchor);
        self.scene.set_transform(transform);
    }

    /// Size of one terminal cell in screen units, along its longer side.
    fn cell_extent(&self) -> f64 {
        let config = self.view.config();
        let columns = self.canvas.width.max(1) as f64;
        let rows = self.canvas.height.max(1) as f64;
        (config.width / columns).max(config.height / rows)
    }

    fn cell_to_drawing(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.canvas;
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }
        let config = self.view.config();
        let screen = Point::new(
            ((column - area.x) as f64 + 0.5) * config.width / area.width as f64,
            ((row - area.y) as f64 + 0.5) * config.height / area.height as f64,
        );
        Some(self.scene.transform().invert(screen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn settled(expand_all: bool) -> App {
        let mut app = App::new(&Node::sample(), ViewConfig::default(), expand_all);
        app.canvas = Rect::new(0, 0, 96, 60);
        app.tick(Duration::from_secs(1));
        app
    }

    #[test]
    fn test_starts_on_root() {
        let app = settled(false);

        assert_eq!(app.view.layout_pass().nodes.len(), 4);
        assert_eq!(app.selected, app.view.find_id("Root"));
        assert_eq!(settled(true).view.layout_pass().nodes.len(), 16);
    }

    #[test]
    fn test_selection_moves_and_toggles() {
        let mut app = settled(false);

        app.on_key(key(KeyCode::Down));
        assert_eq!(app.selected, app.view.find_id("Branch 1"));

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.view.layout_pass().nodes.len(), 7);
        assert_eq!(*app.status.borrow(), "expanded Branch 1 (7 shown)");

        app.on_key(key(KeyCode::Up));
        app.on_key(key(KeyCode::Up));
        assert_eq!(app.selected, app.view.find_id("Root"));
    }

    #[test]
    fn test_global_commands() {
        let mut app = settled(false);

        app.on_key(key(KeyCode::Char('e')));
        assert_eq!(app.view.layout_pass().nodes.len(), 16);
        assert_eq!(*app.status.borrow(), "expanded all (16 shown)");

        app.on_key(key(KeyCode::Char('c')));
        assert_eq!(app.view.layout_pass().nodes.len(), 4);
    }

    #[test]
    fn test_selection_follows_collapse() {
        let mut app = settled(true);
        app.selected = app.view.find_id("Leaf 1.2.1");

        app.on_key(key(KeyCode::Char('c')));

        assert_eq!(app.selected, app.view.find_id("Branch 1"));
    }

    #[test]
    fn test_pan_zoom_and_reset() {
        let mut app = settled(false);
        let home = app.scene.transform();

        app.on_key(key(KeyCode::Char('h')));
        app.on_key(key(KeyCode::Char('+')));
        assert_ne!(app.scene.transform(), home);

        app.on_key(key(KeyCode::Char('r')));
        app.tick(Duration::from_secs(3));
        assert_eq!(app.scene.transform(), home);
        assert_eq!(*app.status.borrow(), "view reset");
    }

    #[test]
    fn test_click_toggles_node_under_cursor() {
        let mut app = settled(false);

        // root sits at (0, 280) in drawing space, (120, 300) after the home
        // transform, which is cell (12, 30) at ten units per cell
        assert!(app.click(12, 30));
        assert_eq!(app.view.layout_pass().nodes.len(), 1);

        assert!(!app.click(95, 0));
        assert!(!app.click(200, 200));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = settled(false);

        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Flow::Quit);
        assert_eq!(app.on_key(key(KeyCode::Esc)), Flow::Quit);
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );
        assert_eq!(app.on_key(key(KeyCode::Char('x'))), Flow::Continue);
    }
}
