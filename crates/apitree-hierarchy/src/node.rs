use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Element of the static dataset. Leaves have no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Depth of the deepest node below `self` (0 for a leaf).
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Built-in demo dataset: three branches, two of them with a nested level.
    pub fn sample() -> Self {
        Node::branch(
            "Root",
            vec![
                Node::branch(
                    "Branch 1",
                    vec![
                        Node::leaf("Leaf 1.1"),
                        Node::branch(
                            "Leaf 1.2",
                            vec![Node::leaf("Leaf 1.2.1"), Node::leaf("Leaf 1.2.2")],
                        ),
                        Node::leaf("Leaf 1.3"),
                    ],
                ),
                Node::branch(
                    "Branch 2",
                    vec![Node::leaf("Leaf 2.1"), Node::leaf("Leaf 2.2")],
                ),
                Node::branch(
                    "Branch 3",
                    vec![
                        Node::branch(
                            "Leaf 3.1",
                            vec![
                                Node::leaf("Leaf 3.1.1"),
                                Node::leaf("Leaf 3.1.2"),
                                Node::leaf("Leaf 3.1.3"),
                            ],
                        ),
                        Node::leaf("Leaf 3.2"),
                    ],
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let root = Node::sample();
        assert_eq!(root.count(), 16);
        assert_eq!(root.height(), 3);
        assert_eq!(root.children.len(), 3);
    }

    #[test]
    fn test_children_are_optional_in_json() {
        let root = Node::from_json(r#"{"name":"a","children":[{"name":"b"}]}"#).unwrap();

        assert_eq!(root, Node::branch("a", vec![Node::leaf("b")]));
        assert_eq!(
            serde_json::to_string(&root).unwrap(),
            r#"{"name":"a","children":[{"name":"b"}]}"#
        );
    }

    #[test]
    fn test_invalid_dataset() {
        let err = Node::from_json(r#"{"children": []}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid tree dataset"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tree.json");
        std::fs::write(&path, serde_json::to_string(&Node::sample()).unwrap()).unwrap();

        assert_eq!(Node::load(&path).unwrap(), Node::sample());
        assert!(Node::load(&dir.path().join("missing.json")).is_err());
    }
}
