use super::Visitor;
use crate::program::{Node, NodePath};

/// Flags constants whose declared type does not match their quoted value
pub struct ConstTypePlugin;

impl Visitor for ConstTypePlugin {
    fn enter(&mut self, node: &Node, path: &NodePath, metadata: &mut super::AnalysisMetadata) -> bool {
        if let Node::Const(constant) = node {
            if constant.type_name != "String" {
                metadata
                    .quoted_consts
                    .push((path.to_string(), constant.type_name.clone()));
            }
        }
        true
    }
}
