use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Program tree handed to a generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    pub nodes: Vec<Node>,
}

impl Program {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Name of the first top-level class, used by drivers to pick a file name
    pub fn primary_class(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::Class(class) => Some(class.name.as_str()),
            _ => None,
        })
    }
}

/// Program tree node.
///
/// Names are emitted verbatim as target-language identifiers; they are never
/// sanitized, so the producer of the tree is responsible for their validity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    // Structure
    Comment(CommentNode),
    Class(ClassNode),
    MainFunction(MainFunctionNode),
    StaticFunction(StaticFunctionNode),

    // Statements
    Const(ConstNode),
    FunctionCall(FunctionCallNode),
    InitArray(InitArrayNode),

    // Models and data
    CreateNetwork(CreateNetworkNode),
    EmbedTraining(EmbedTrainingNode),
    LoadTraining(LoadTrainingNode),
}

/// Single-line comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    pub text: String,
}

/// Class declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Program entry point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainFunctionNode {
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Static helper function without parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticFunctionNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Static immutable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstNode {
    pub name: String,
    pub type_name: String,
    pub value: String,
}

/// Call to a parameterless function, optionally binding its result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<CallResult>,
}

/// Local variable receiving a call result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallResult {
    pub type_name: String,
    pub var: String,
}

/// Static flat numeric array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitArrayNode {
    pub name: String,
    pub values: Vec<f64>,
}

/// Function that rebuilds a persisted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNetworkNode {
    pub name: String,
    pub model: PathBuf,
}

/// Inline training data (embed mode only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedTrainingNode {
    pub data: PathBuf,
}

/// Function returning the training data set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTrainingNode {
    pub name: String,
    pub data: PathBuf,
}

impl Node {
    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment(CommentNode { text: text.into() })
    }

    pub fn class(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Class(ClassNode { name: name.into(), children })
    }

    pub fn main_function(children: Vec<Node>) -> Self {
        Node::MainFunction(MainFunctionNode { children })
    }

    pub fn static_function(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::StaticFunction(StaticFunctionNode { name: name.into(), children })
    }

    pub fn constant(name: impl Into<String>, type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Const(ConstNode {
            name: name.into(),
            type_name: type_name.into(),
            value: value.into(),
        })
    }

    /// Bare call statement: `name();`
    pub fn call(name: impl Into<String>) -> Self {
        Node::FunctionCall(FunctionCallNode { name: name.into(), result: None })
    }

    /// Call bound to a new local: `Type var = name();`
    pub fn call_into(type_name: impl Into<String>, var: impl Into<String>, name: impl Into<String>) -> Self {
        Node::FunctionCall(FunctionCallNode {
            name: name.into(),
            result: Some(CallResult { type_name: type_name.into(), var: var.into() }),
        })
    }

    pub fn init_array(name: impl Into<String>, values: Vec<f64>) -> Self {
        Node::InitArray(InitArrayNode { name: name.into(), values })
    }

    pub fn create_network(name: impl Into<String>, model: impl Into<PathBuf>) -> Self {
        Node::CreateNetwork(CreateNetworkNode { name: name.into(), model: model.into() })
    }

    pub fn embed_training(data: impl Into<PathBuf>) -> Self {
        Node::EmbedTraining(EmbedTrainingNode { data: data.into() })
    }

    pub fn load_training(name: impl Into<String>, data: impl Into<PathBuf>) -> Self {
        Node::LoadTraining(LoadTrainingNode { name: name.into(), data: data.into() })
    }

    /// Children of container nodes; empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Class(class) => &class.children,
            Node::MainFunction(main) => &main.children,
            Node::StaticFunction(function) => &function.children,
            Node::Comment(_)
            | Node::Const(_)
            | Node::FunctionCall(_)
            | Node::InitArray(_)
            | Node::CreateNetwork(_)
            | Node::EmbedTraining(_)
            | Node::LoadTraining(_) => &[],
        }
    }

    /// Short label identifying the node inside a [`NodePath`]
    pub fn label(&self) -> &str {
        match self {
            Node::Comment(_) => "comment",
            Node::Class(class) => &class.name,
            Node::MainFunction(_) => "main",
            Node::StaticFunction(function) => &function.name,
            Node::Const(constant) => &constant.name,
            Node::FunctionCall(call) => &call.name,
            Node::InitArray(array) => &array.name,
            Node::CreateNetwork(network) => &network.name,
            Node::EmbedTraining(_) => "embed_training",
            Node::LoadTraining(load) => &load.name,
        }
    }
}

/// Location of a node in the tree, e.g. `Foo > run > createNetwork`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>) {
        self.0.push(label.into());
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    /// Copy of this path extended by one segment
    pub fn child(&self, label: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(label);
        path
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_nodes() {
        let json = r#"[
            {"type": "comment", "text": "gen"},
            {"type": "class", "name": "Foo", "children": [
                {"type": "const", "name": "VERSION", "type_name": "String", "value": "1.0"},
                {"type": "function_call", "name": "run"}
            ]}
        ]"#;
        let program: Program = serde_json::from_str(json).unwrap();

        assert_eq!(
            program,
            Program::new(vec![
                Node::comment("gen"),
                Node::class("Foo", vec![Node::constant("VERSION", "String", "1.0"), Node::call("run")]),
            ])
        );
        assert_eq!(program.primary_class(), Some("Foo"));
    }

    #[test]
    fn test_unknown_discriminant_is_rejected() {
        let json = r#"[{"type": "while_loop", "name": "x"}]"#;
        let err = serde_json::from_str::<Program>(json).unwrap_err();
        assert!(err.to_string().contains("while_loop"));
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        let json = r#"[{"type": "create_network", "name": "createNetwork"}]"#;
        let err = serde_json::from_str::<Program>(json).unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn test_node_path_display() {
        let mut path = NodePath::new();
        path.push("Foo");
        path.push("run");
        assert_eq!(path.child("createNetwork").to_string(), "Foo > run > createNetwork");
        path.pop();
        assert_eq!(path.to_string(), "Foo");
    }
}
