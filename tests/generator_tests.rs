use mlgen::{GenerateOptions, JavaGenerator, Generator, Node, Program, ResourceStore, generate};
use pretty_assertions::assert_eq;

fn compile(program: &Program) -> String {
    generate(program, &ResourceStore::new(), &GenerateOptions::default())
        .unwrap()
        .code
}

fn hello_program() -> Program {
    Program::new(vec![
        Node::comment("gen"),
        Node::class(
            "Foo",
            vec![
                Node::constant("VERSION", "String", "1.0"),
                Node::static_function("run", vec![Node::call("run")]),
            ],
        ),
    ])
}

#[test]
fn test_end_to_end_line_order() {
    let output = compile(&hello_program());

    let expected = [
        "// gen",
        "",
        "public class Foo {",
        "    public static final String VERSION = \"1.0\";",
        "",
        "    public static void run() {",
        "",
        "        run();",
        "    }",
        "}",
    ];
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    assert!(output.ends_with("}\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let program = Program::new(vec![Node::class(
        "Foo",
        vec![
            Node::init_array("WEIGHTS", (0..37).map(|i| f64::from(i) * 0.1).collect()),
            Node::create_network("createNetwork", "net.eg"),
            Node::load_training("createTraining", "data.egb"),
        ],
    )]);

    let first = compile(&program);
    let second = compile(&program);
    assert_eq!(first, second);
}

#[test]
fn test_indentation_is_balanced_for_nested_containers() {
    let program = Program::new(vec![Node::class(
        "Outer",
        vec![
            Node::class(
                "Inner",
                vec![Node::static_function(
                    "helper",
                    vec![Node::comment("deep"), Node::call("work")],
                )],
            ),
            Node::main_function(vec![Node::call_into("int", "x", "compute")]),
        ],
    )]);

    let output = compile(&program);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines,
        vec![
            "",
            "public class Outer {",
            "",
            "    public class Inner {",
            "",
            "        public static void helper() {",
            "            // deep",
            "",
            "            work();",
            "        }",
            "    }",
            "",
            "    public static void main(String[] args) {",
            "",
            "        int x = compute();",
            "    }",
            "}",
        ]
    );

    let opens = lines.iter().filter(|line| line.ends_with('{')).count();
    let closes = lines.iter().filter(|line| line.trim() == "}").count();
    assert_eq!(opens, closes);
}

#[test]
fn test_headers_precede_body_in_first_added_order() {
    let program = Program::new(vec![Node::class(
        "Foo",
        vec![
            Node::load_training("createTraining", "a.egb"),
            Node::create_network("createNetwork", "a.eg"),
            Node::load_training("createOther", "b.egb"),
        ],
    )]);

    let result = generate(&program, &ResourceStore::new(), &GenerateOptions::default()).unwrap();
    assert_eq!(
        result.headers,
        vec![
            "org.encog.ml.data.MLDataSet",
            "org.encog.util.simple.EncogUtility",
            "java.io.File",
            "org.encog.ml.MLMethod",
            "org.encog.persist.EncogDirectoryPersistence",
        ]
    );

    let lines: Vec<&str> = result.code.lines().collect();
    let import_lines: Vec<&str> = lines.iter().take_while(|l| l.starts_with("import ")).copied().collect();
    assert_eq!(import_lines.len(), 5);
    assert_eq!(import_lines[0], "import org.encog.ml.data.MLDataSet;");
    // One blank separator, then the body; no import appears later
    assert_eq!(lines[5], "");
    assert!(lines[6..].iter().all(|l| !l.starts_with("import ")));
}

#[test]
fn test_function_call_forms() {
    let program = Program::new(vec![
        Node::call("train"),
        Node::call_into("MLMethod", "method", "createNetwork"),
    ]);
    assert_eq!(compile(&program), "\ntrain();\n\nMLMethod method = createNetwork();\n");
}

#[test]
fn test_const_value_is_escaped_and_quoted() {
    let program = Program::new(vec![Node::constant("PATH", "String", r#"C:\data\"x""#)]);
    assert_eq!(
        compile(&program),
        "public static final String PATH = \"C:\\\\data\\\\\\\"x\\\"\";\n"
    );
}

#[test]
fn test_init_array_batches_ten_per_line() {
    for n in [1usize, 9, 10, 11, 20, 21, 55] {
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let program = Program::new(vec![Node::init_array("W", values)]);
        let output = compile(&program);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "public static final double[] W = {");
        assert_eq!(*lines.last().unwrap(), "};");

        let numeric = &lines[1..lines.len() - 1];
        assert_eq!(numeric.len(), n.div_ceil(10), "n = {}", n);

        let commas: usize = numeric.iter().map(|l| l.matches(',').count()).sum();
        assert_eq!(commas, n - 1, "n = {}", n);
        assert!(!numeric.last().unwrap().ends_with(','));
        for line in &numeric[..numeric.len() - 1] {
            assert!(line.ends_with(','));
            assert_eq!(line.trim().split(',').filter(|s| !s.is_empty()).count(), 10);
        }
    }
}

#[test]
fn test_empty_program_generates_nothing() {
    let result = JavaGenerator::new()
        .generate(&Program::default(), &ResourceStore::new(), &GenerateOptions::default())
        .unwrap();
    assert_eq!(result.code, "");
    assert!(result.headers.is_empty());
}

#[test]
fn test_indent_width_option() {
    let options = GenerateOptions {
        indent_width: 2,
        ..GenerateOptions::default()
    };
    let program = Program::new(vec![Node::class("Foo", vec![Node::comment("x")])]);
    let output = generate(&program, &ResourceStore::new(), &options).unwrap().code;
    assert_eq!(output, "\npublic class Foo {\n  // x\n}\n");
}
