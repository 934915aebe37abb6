use super::{
    ARRAY_BATCH, DEFAULT_PRECISION, EmbedMode, GenerateOptions, GenerateResult, Generator, HeaderRegistry, Output,
    batch_lines, number_list,
};
use crate::error::{ErrorKind, GenerateError};
use crate::program::*;
use crate::resources::ResourceLoader;
use std::path::Path;
use tracing::debug;

const ML_METHOD: &str = "org.encog.ml.MLMethod";
const ML_ENCODABLE: &str = "org.encog.ml.MLEncodable";
const ML_METHOD_FACTORY: &str = "org.encog.ml.factory.MLMethodFactory";
const DIRECTORY_PERSISTENCE: &str = "org.encog.persist.EncogDirectoryPersistence";
const ML_DATA_SET: &str = "org.encog.ml.data.MLDataSet";
const BASIC_ML_DATA_SET: &str = "org.encog.ml.data.basic.BasicMLDataSet";
const ENCOG_UTILITY: &str = "org.encog.util.simple.EncogUtility";
const JAVA_FILE: &str = "java.io.File";

/// Java backend targeting the Encog runtime
pub struct JavaGenerator;

impl JavaGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Render collected headers as `import` lines followed by one blank line
    fn render_imports(headers: &HeaderRegistry) -> Vec<String> {
        let mut lines: Vec<String> = headers.iter().map(|entry| format!("import {};", entry)).collect();
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}

impl Default for JavaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for JavaGenerator {
    #[tracing::instrument(skip_all, fields(nodes = program.nodes.len(), embed = ?options.embed))]
    fn generate(
        &self,
        program: &Program,
        loader: &dyn ResourceLoader,
        options: &GenerateOptions,
    ) -> Result<GenerateResult, GenerateError> {
        let mut emitter = Emitter::new(loader, options);
        emitter.emit_nodes(&program.nodes)?;
        let (body, headers) = emitter.finish();

        // Headers and body are separate outputs until this single concatenation
        let mut lines = Self::render_imports(&headers);
        lines.extend(body);

        let mut code = lines.join("\n");
        if !code.is_empty() {
            code.push('\n');
        }

        debug!(lines = lines.len(), headers = headers.len(), "generated java source");

        Ok(GenerateResult {
            code,
            headers: headers.into_vec(),
            warnings: Vec::new(),
        })
    }
}

/// Per-run state: body lines, headers and the path of the node being emitted
struct Emitter<'a> {
    loader: &'a dyn ResourceLoader,
    embed: EmbedMode,
    output: Output,
    headers: HeaderRegistry,
    path: NodePath,
}

impl<'a> Emitter<'a> {
    fn new(loader: &'a dyn ResourceLoader, options: &GenerateOptions) -> Self {
        Self {
            loader,
            embed: options.embed,
            output: Output::new(options.indent_width),
            headers: HeaderRegistry::new(),
            path: NodePath::new(),
        }
    }

    fn finish(self) -> (Vec<String>, HeaderRegistry) {
        (self.output.finish(), self.headers)
    }

    fn emit_nodes(&mut self, nodes: &[Node]) -> Result<(), GenerateError> {
        for node in nodes {
            self.emit_node(node)?;
        }
        Ok(())
    }

    fn emit_node(&mut self, node: &Node) -> Result<(), GenerateError> {
        match node {
            Node::Comment(comment) => self.emit_comment(comment),
            Node::Class(class) => self.emit_class(class)?,
            Node::MainFunction(main) => self.emit_main_function(main)?,
            Node::StaticFunction(function) => self.emit_static_function(function)?,
            Node::Const(constant) => self.emit_const(constant),
            Node::FunctionCall(call) => self.emit_function_call(call),
            Node::InitArray(array) => self.emit_init_array(array),
            Node::CreateNetwork(network) => self.emit_create_network(network)?,
            Node::EmbedTraining(training) => self.emit_embed_training(training)?,
            Node::LoadTraining(training) => self.emit_load_training(training),
        }
        Ok(())
    }

    /// Emit the children of a container node with its label on the path
    fn emit_children(&mut self, label: &str, children: &[Node]) -> Result<(), GenerateError> {
        self.path.push(label);
        let result = self.emit_nodes(children);
        self.path.pop();
        result
    }

    fn emit_comment(&mut self, comment: &CommentNode) {
        self.output.add_line(&format!("// {}", comment.text));
    }

    fn emit_class(&mut self, class: &ClassNode) -> Result<(), GenerateError> {
        debug!(class = %class.name, children = class.children.len(), "emitting class");
        self.output.add_break();
        self.output.indent_line(&format!("public class {} {{", class.name));
        self.emit_children(&class.name, &class.children)?;
        self.output.unindent_line("}");
        Ok(())
    }

    fn emit_main_function(&mut self, main: &MainFunctionNode) -> Result<(), GenerateError> {
        self.output.add_break();
        self.output.indent_line("public static void main(String[] args) {");
        self.emit_children("main", &main.children)?;
        self.output.unindent_line("}");
        Ok(())
    }

    fn emit_static_function(&mut self, function: &StaticFunctionNode) -> Result<(), GenerateError> {
        debug!(function = %function.name, children = function.children.len(), "emitting function");
        self.output.add_break();
        self.output.indent_line(&format!("public static void {}() {{", function.name));
        self.emit_children(&function.name, &function.children)?;
        self.output.unindent_line("}");
        Ok(())
    }

    /// The value is always emitted as a string literal, whatever the declared type
    fn emit_const(&mut self, constant: &ConstNode) {
        self.output.add_line(&format!(
            "public static final {} {} = \"{}\";",
            constant.type_name,
            constant.name,
            escape_string(&constant.value)
        ));
    }

    fn emit_function_call(&mut self, call: &FunctionCallNode) {
        self.output.add_break();
        let line = match &call.result {
            Some(result) => format!("{} {} = {}();", result.type_name, result.var, call.name),
            None => format!("{}();", call.name),
        };
        self.output.add_line(&line);
    }

    fn emit_init_array(&mut self, array: &InitArrayNode) {
        self.output.indent_line(&format!("public static final double[] {} = {{", array.name));
        for line in batch_lines(&array.values, DEFAULT_PRECISION, ARRAY_BATCH) {
            self.output.add_line(&line);
        }
        self.output.unindent_line("};");
    }

    fn emit_create_network(&mut self, network: &CreateNetworkNode) -> Result<(), GenerateError> {
        match self.embed {
            EmbedMode::Embed => self.embed_network(network),
            EmbedMode::Link => {
                self.link_network(network);
                Ok(())
            }
        }
    }

    /// Rebuild the model from its factory recipe and the `WEIGHTS` array
    fn embed_network(&mut self, network: &CreateNetworkNode) -> Result<(), GenerateError> {
        let node_path = self.path.child(&network.name);
        let method = self.loader.load_model(&network.model).map_err(|err| {
            GenerateError::new(
                ErrorKind::ResourceLoad,
                format!("failed to load model {}", network.model.display()),
            )
            .at(&node_path)
            .with_source(err)
        })?;

        let Some(factory) = method.factory() else {
            return Err(GenerateError::new(
                ErrorKind::UnsupportedModel,
                format!("code generation not yet supported for: {}", method.kind()),
            )
            .at(&node_path)
            .with_help("only models exposing factory metadata can be embedded\ngenerate without --embed to link the model file instead"));
        };

        debug!(model = %network.model.display(), factory = %factory.factory_type, "embedding network");

        self.output.add_break();
        self.headers.add(ML_METHOD);
        self.output.indent_line(&format!("public static MLMethod {}() {{", network.name));

        self.headers.add(ML_METHOD_FACTORY);
        self.output.add_line("MLMethodFactory methodFactory = new MLMethodFactory();");
        self.output.add_line(&format!(
            "MLMethod result = methodFactory.create(\"{}\",\"{}\", 0, 0);",
            escape_string(&factory.factory_type),
            escape_string(&factory.architecture)
        ));

        self.headers.add(ML_ENCODABLE);
        self.output.add_line("((MLEncodable)result).decodeFromArray(WEIGHTS);");

        self.output.add_line("return result;");
        self.output.unindent_line("}");
        Ok(())
    }

    /// Load the persisted model at run time; the model itself is never read here
    fn link_network(&mut self, network: &CreateNetworkNode) {
        self.output.add_break();
        self.headers.add(ML_METHOD);
        self.headers.add(DIRECTORY_PERSISTENCE);
        self.headers.add(JAVA_FILE);
        self.output.indent_line(&format!("public static MLMethod {}() {{", network.name));
        self.output.add_line(&format!(
            "MLMethod result = (MLMethod)EncogDirectoryPersistence.loadObject(new File(\"{}\"));",
            quote_path(&network.model)
        ));
        self.output.add_line("return result;");
        self.output.unindent_line("}");
    }

    fn emit_embed_training(&mut self, training: &EmbedTrainingNode) -> Result<(), GenerateError> {
        if !self.embed.is_embed() {
            return Ok(());
        }

        let dataset = self.loader.load_dataset(&training.data).map_err(|err| {
            GenerateError::new(
                ErrorKind::ResourceLoad,
                format!("failed to load training data {}", training.data.display()),
            )
            .at(&self.path.child("embed_training"))
            .with_source(err)
        })?;

        debug!(data = %training.data.display(), pairs = dataset.len(), "embedding training data");

        self.output.indent_line("public static final double[][] INPUT_DATA = {");
        for pair in &dataset {
            self.output.add_line(&format!("{{ {} }},", number_list(&pair.input, DEFAULT_PRECISION)));
        }
        self.output.unindent_line("};");

        self.output.add_break();

        self.output.indent_line("public static final double[][] IDEAL_DATA = {");
        for pair in &dataset {
            self.output.add_line(&format!("{{ {} }},", number_list(&pair.ideal, DEFAULT_PRECISION)));
        }
        self.output.unindent_line("};");
        Ok(())
    }

    fn emit_load_training(&mut self, training: &LoadTrainingNode) {
        self.output.add_break();
        self.headers.add(ML_DATA_SET);
        self.output.indent_line(&format!("public static MLDataSet {}() {{", training.name));

        let line = match self.embed {
            EmbedMode::Embed => {
                self.headers.add(BASIC_ML_DATA_SET);
                "MLDataSet result = new BasicMLDataSet(INPUT_DATA,IDEAL_DATA);".to_string()
            }
            EmbedMode::Link => {
                self.headers.add(ENCOG_UTILITY);
                self.headers.add(JAVA_FILE);
                format!(
                    "MLDataSet result = EncogUtility.loadEGB2Memory(new File(\"{}\"));",
                    quote_path(&training.data)
                )
            }
        };
        self.output.add_line(&line);

        self.output.add_line("return result;");
        self.output.unindent_line("}");
    }
}

fn quote_path(path: &Path) -> String {
    escape_string(&path.display().to_string())
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\"', "\\\"")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}
