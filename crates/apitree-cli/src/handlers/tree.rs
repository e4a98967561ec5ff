use crate::presentation::{console, tui};
use anyhow::{Context, Result};
use apitree_hierarchy::{HierarchyView, Node, RecordingBackend, ViewConfig};
use is_terminal::IsTerminal;
use std::path::Path;

pub fn handle(input: Option<&Path>, config: ViewConfig, print: bool, expand_all: bool) -> Result<()> {
    let root = match input {
        Some(path) => Node::load(path)
            .with_context(|| format!("failed to load tree dataset {}", path.display()))?,
        None => Node::sample(),
    };
    tracing::debug!(nodes = root.count(), depth = root.height(), "dataset loaded");

    if print {
        let mut view = HierarchyView::new(&root, config);
        let mut backend = RecordingBackend::default();
        view.mount(&mut backend);
        if expand_all {
            view.expand_all(&mut backend);
        }
        return console::print_json(&view.visible_nodes());
    }

    if !std::io::stdout().is_terminal() {
        anyhow::bail!("the tree viewer needs a terminal; use --print for headless output");
    }

    tui::run(&root, config, expand_all)
}
