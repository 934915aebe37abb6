//! Read-only analysis over the program tree, run before generation.
//!
//! Plugins walk the tree and record facts into [`AnalysisMetadata`], which is
//! then checked against the run's options to produce errors and warnings.

mod const_detect;
mod embed_detect;
mod main_detect;
mod metadata;

pub use const_detect::ConstTypePlugin;
pub use embed_detect::EmbedResourcePlugin;
pub use main_detect::MainFunctionPlugin;
pub use metadata::{AnalysisMetadata, Diagnostic};

use crate::program::{Node, NodePath, Program};

/// Visitor trait for tree analysis
pub trait Visitor {
    /// Called before visiting children. Return `false` to skip children.
    fn enter(&mut self, _node: &Node, _path: &NodePath, _metadata: &mut AnalysisMetadata) -> bool {
        true
    }

    /// Called after visiting children.
    fn exit(&mut self, _node: &Node, _path: &NodePath, _metadata: &mut AnalysisMetadata) {}
}

/// Runs a series of plugins over a program tree
pub struct Analyzer {
    plugins: Vec<Box<dyn Visitor>>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn add<V: Visitor + 'static>(mut self, visitor: V) -> Self {
        self.plugins.push(Box::new(visitor));
        self
    }

    pub fn analyze(&mut self, program: &Program) -> AnalysisMetadata {
        let mut metadata = AnalysisMetadata::new();
        for plugin in &mut self.plugins {
            let mut path = NodePath::new();
            Self::visit_nodes(&program.nodes, plugin.as_mut(), &mut path, &mut metadata);
        }
        metadata
    }

    /// `path` holds the node's ancestors; the node's own label is appended for callbacks
    fn visit_nodes(nodes: &[Node], visitor: &mut dyn Visitor, path: &mut NodePath, metadata: &mut AnalysisMetadata) {
        for node in nodes {
            path.push(node.label());
            if visitor.enter(node, path, metadata) {
                Self::visit_nodes(node.children(), visitor, path, metadata);
            }
            visitor.exit(node, path, metadata);
            path.pop();
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an analyzer with the standard plugins
pub fn standard_plugins() -> Analyzer {
    Analyzer::new()
        .add(MainFunctionPlugin)
        .add(ConstTypePlugin)
        .add(EmbedResourcePlugin)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder(Vec<String>);

    impl Visitor for Recorder {
        fn enter(&mut self, _node: &Node, path: &NodePath, _metadata: &mut AnalysisMetadata) -> bool {
            self.0.push(path.to_string());
            true
        }
    }

    #[test]
    fn test_visit_order_is_document_order() {
        let program = Program::new(vec![
            Node::comment("gen"),
            Node::class(
                "Foo",
                vec![Node::static_function("run", vec![Node::call("train")]), Node::main_function(vec![])],
            ),
        ]);

        let mut recorder = Recorder(Vec::new());
        let mut path = NodePath::new();
        let mut metadata = AnalysisMetadata::new();
        Analyzer::visit_nodes(&program.nodes, &mut recorder, &mut path, &mut metadata);

        assert_eq!(recorder.0, vec!["comment", "Foo", "Foo > run", "Foo > run > train", "Foo > main"]);
        assert!(path.is_empty());
    }
}
