use super::Visitor;
use crate::program::{Node, NodePath};

/// Tracks the pieces embedded code depends on: weight arrays, networks and
/// training data
pub struct EmbedResourcePlugin;

impl Visitor for EmbedResourcePlugin {
    fn enter(&mut self, node: &Node, path: &NodePath, metadata: &mut super::AnalysisMetadata) -> bool {
        match node {
            Node::InitArray(array) => metadata.array_names.push(array.name.clone()),
            Node::CreateNetwork(_) => metadata.networks.push(path.to_string()),
            Node::EmbedTraining(_) => metadata.embeds_training = true,
            Node::LoadTraining(_) => metadata.training_loaders.push(path.to_string()),
            _ => {}
        }
        true
    }
}
