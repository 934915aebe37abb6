use indexmap::IndexSet;

/// Output buffer that accumulates generated lines with indentation
pub struct Output {
    lines: Vec<String>,
    depth: usize,
    indent: String,
}

impl Output {
    pub fn new(indent_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            indent: " ".repeat(indent_width),
        }
    }

    /// Add a line at the current indentation
    pub fn add_line(&mut self, text: &str) {
        let mut line = self.indent.repeat(self.depth);
        line.push_str(text);
        self.lines.push(line);
    }

    /// Add an empty separator line
    pub fn add_break(&mut self) {
        self.lines.push(String::new());
    }

    /// Add a block-opening line and indent everything after it
    pub fn indent_line(&mut self, text: &str) {
        self.add_line(text);
        self.depth += 1;
    }

    /// Close a block opened by [`Output::indent_line`]
    pub fn unindent_line(&mut self, text: &str) {
        debug_assert!(self.depth > 0, "unbalanced block close: {text}");
        self.depth = self.depth.saturating_sub(1);
        self.add_line(text);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Finish and return the emitted lines
    pub fn finish(self) -> Vec<String> {
        debug_assert_eq!(self.depth, 0, "unbalanced indentation at end of output");
        self.lines
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(4)
    }
}

/// Header entries (imports) collected during generation.
///
/// Deduplicated, first-added order. Rules only ever add to the registry.
#[derive(Debug, Clone, Default)]
pub struct HeaderRegistry {
    entries: IndexSet<String>,
}

impl HeaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        self.entries.insert(entry.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_round_trip() {
        let mut output = Output::new(4);
        output.indent_line("public class Foo {");
        output.add_line("int x;");
        output.indent_line("void f() {");
        output.add_break();
        output.unindent_line("}");
        output.unindent_line("}");

        assert_eq!(output.depth(), 0);
        assert_eq!(
            output.finish(),
            vec!["public class Foo {", "    int x;", "    void f() {", "", "    }", "}"]
        );
    }

    #[test]
    fn test_indent_width() {
        let mut output = Output::new(2);
        output.indent_line("{");
        output.add_line("a");
        output.unindent_line("}");
        assert_eq!(output.lines(), ["{", "  a", "}"]);
    }

    #[test]
    fn test_header_registry_dedup_keeps_first_order() {
        let mut headers = HeaderRegistry::new();
        headers.add("org.encog.ml.MLMethod");
        headers.add("org.encog.ml.data.MLDataSet");
        headers.add("org.encog.ml.MLMethod");

        assert_eq!(headers.len(), 2);
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["org.encog.ml.MLMethod", "org.encog.ml.data.MLDataSet"]
        );
    }
}
