//! Datasets and config files shared by the integration tests.

use apitree_hierarchy::Node;

/// Root with three children; the first has three children of its own, the
/// middle one of which has two leaves.
pub fn scenario_tree() -> Node {
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

/// Config file that moves the output and switches to the extended profile.
pub const EXTENDED_CONFIG: &str = r#"
[collection]
collection_name = "Staging Smoke Tests"
output_dir = "artifacts"
profile = "extended"
"#;
