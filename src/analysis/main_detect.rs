use super::Visitor;
use crate::program::{Node, NodePath};

/// Records every main function so duplicates can be rejected
pub struct MainFunctionPlugin;

impl Visitor for MainFunctionPlugin {
    fn enter(&mut self, node: &Node, path: &NodePath, metadata: &mut super::AnalysisMetadata) -> bool {
        if let Node::MainFunction(_) = node {
            metadata.main_functions.push(path.to_string());
        }
        true
    }
}
