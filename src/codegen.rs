//! Shell code generation from a block tree.
//!
//! `Generator` is the context object for one generation pass: it owns the
//! helper-definitions table, the helper-name table, and the identifier
//! database. Per-construct emission lives in the submodules; this module
//! carries the dispatch, the socket-rendering plumbing, and the pass
//! lifecycle (init, walk, finish).

pub mod lists;
pub mod logic;
pub mod loops;
pub mod math;
pub mod procedures;
pub mod text;
pub mod variables;

use crate::block::{Stmt, StmtKind, Value};
use crate::emit::{self, Expression};
use crate::error::CompileError;
use crate::names::NameDb;
use crate::order::Rank;
use crate::target::TargetShell;

pub const INDENT: &str = "  ";
const COMMENT_WRAP: usize = 76;

/// Replaced with the deduplicated helper name when a definition is
/// registered through `provide_function`.
pub(crate) const FUNC_PLACEHOLDER: &str = "%{FUNC}%";

#[derive(Debug, Clone, Copy)]
pub struct CodegenOptions {
    pub target: TargetShell,
    /// User-facing indices start at 1 rather than 0.
    pub one_based_index: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            target: TargetShell::Bash,
            one_based_index: true,
        }
    }
}

pub struct Generator {
    opts: CodegenOptions,
    /// Helper/procedure definitions hoisted above the body, in first
    /// registration order. Re-registration under a known key is a no-op.
    definitions: Vec<(String, String)>,
    /// Desired helper name to the actual (collision-free) name in use.
    function_names: std::collections::HashMap<String, String>,
    pub names: NameDb,
}

impl Generator {
    pub fn new(opts: CodegenOptions) -> Self {
        Self {
            opts,
            definitions: Vec::new(),
            function_names: std::collections::HashMap::new(),
            names: NameDb::new(),
        }
    }

    pub fn target(&self) -> TargetShell {
        self.opts.target
    }

    pub fn one_based_index(&self) -> bool {
        self.opts.one_based_index
    }

    /// Run one full generation pass over a program.
    pub fn generate(&mut self, program: &[Stmt]) -> Result<String, CompileError> {
        self.init();
        let mut body = String::new();
        for stmt in program {
            body.push_str(&self.stmt(stmt)?);
        }
        Ok(self.finish(&body))
    }

    fn init(&mut self) {
        self.definitions.clear();
        self.function_names.clear();
        self.names.reset();
    }

    fn finish(&mut self, body: &str) -> String {
        let mut out = String::new();
        out.push_str(self.opts.target.shebang());
        out.push('\n');
        if !self.definitions.is_empty() {
            let defs: Vec<&str> = self.definitions.iter().map(|(_, text)| text.as_str()).collect();
            out.push('\n');
            out.push_str(&defs.join("\n\n"));
            out.push_str("\n\n");
        }
        out.push('\n');
        out.push_str(body);
        out
    }

    pub(crate) fn stmt(&mut self, stmt: &Stmt) -> Result<String, CompileError> {
        let code = match &stmt.kind {
            StmtKind::If { branches, else_body } => logic::controls_if(self, branches, else_body)?,
            StmtKind::Repeat { times, body } => loops::repeat(self, times, body)?,
            StmtKind::While { until, cond, body } => loops::while_until(self, *until, cond, body)?,
            StmtKind::ForRange { var, from, to, by, body } => {
                loops::for_range(self, var, from, to, by, body)?
            }
            StmtKind::ForEach { var, list, body } => loops::for_each(self, var, list, body)?,
            StmtKind::Flow(kind) => loops::flow(*kind),
            StmtKind::SetVariable { var, value } => variables::set(self, var, value)?,
            StmtKind::ChangeVariable { var, delta } => variables::change(self, var, delta)?,
            StmtKind::TextAppend { var, value } => text::append(self, var, value)?,
            StmtKind::Print { value } => text::print(self, value)?,
            StmtKind::ListSet { mode, anchor, at, list, value } => {
                lists::set_index(self, *mode, *anchor, at, list, value)?
            }
            StmtKind::ListRemoveAt { anchor, at, list } => {
                lists::remove_at(self, *anchor, at, list)?
            }
            StmtKind::ProcDef { name, params, body, ret } => {
                procedures::definition(self, name, params, body, ret)?
            }
            StmtKind::ProcCall { name, args } => procedures::call_statement(self, name, args)?,
            StmtKind::IfReturn { cond, value } => procedures::if_return(self, cond, value)?,
            StmtKind::Naked(value) => {
                // Naked values become standalone lines.
                let expr = self.value(value)?;
                format!("{}\n", expr.text)
            }
        };
        match &stmt.comment {
            Some(comment) => Ok(format!(
                "{}{}",
                prefix_lines(&wrap_comment(comment, COMMENT_WRAP), "# "),
                code
            )),
            None => Ok(code),
        }
    }

    /// Render a statement body and indent it one level.
    pub(crate) fn statements(&mut self, body: &[Stmt]) -> Result<String, CompileError> {
        let mut out = String::new();
        for stmt in body {
            out.push_str(&self.stmt(stmt)?);
        }
        Ok(prefix_lines(&out, INDENT))
    }

    pub(crate) fn value(&mut self, value: &Value) -> Result<Expression, CompileError> {
        match value {
            Value::Number(n) => Ok(math::number(*n)),
            Value::Text(s) => Ok(text::literal(s)),
            Value::Boolean(b) => Ok(logic::boolean(*b)),
            Value::Null => Ok(logic::null()),
            Value::Variable(name) => Ok(variables::get(self, name)),
            Value::Constant(c) => Ok(math::constant(*c)),
            Value::Arithmetic { op, a, b } => math::arithmetic(self, *op, a, b),
            Value::UnaryMath { op, num } => math::unary(self, *op, num),
            Value::Modulo { dividend, divisor } => math::modulo(self, dividend, divisor),
            Value::RandomInt { from, to } => math::random_int(self, from, to),
            Value::Compare { op, a, b } => logic::compare(self, *op, a, b),
            Value::Operation { op, a, b } => logic::operation(self, *op, a, b),
            Value::Negate { value } => logic::negate(self, value),
            Value::Ternary { cond, then, otherwise } => logic::ternary(self, cond, then, otherwise),
            Value::TextJoin { items } => text::join(self, items),
            Value::TextLength { value } => text::length(self, value),
            Value::TextIsEmpty { value } => text::is_empty(self, value),
            Value::TextIndexOf { mode, find, value } => text::index_of(self, *mode, find, value),
            Value::TextCharAt { anchor, at, value } => text::char_at(self, *anchor, at, value),
            Value::TextSubstring { from, at1, to, at2, value } => {
                text::substring(self, *from, at1, *to, at2, value)
            }
            Value::TextChangeCase { mode, value } => text::change_case(self, *mode, value),
            Value::TextTrim { mode, value } => text::trim(self, *mode, value),
            Value::TextPrompt => Ok(text::prompt()),
            Value::ListEmpty => Ok(lists::empty()),
            Value::ListCreate { items } => lists::create(self, items),
            Value::ListRepeat { item, times } => lists::repeat(self, item, times),
            Value::ListLength { list } => lists::length(self, list),
            Value::ListIsEmpty { list } => lists::is_empty(self, list),
            Value::ListIndexOf { mode, find, list } => lists::index_of(self, *mode, find, list),
            Value::ListGet { mode, anchor, at, list } => {
                lists::get_index(self, *mode, *anchor, at, list)
            }
            Value::ListSublist { from, at1, to, at2, list } => {
                lists::sublist(self, *from, at1, *to, at2, list)
            }
            Value::ListSort { kind, ascending, list } => lists::sort(self, *kind, *ascending, list),
            Value::ListSplit { join, input, delim } => lists::split(self, *join, input, delim),
            Value::CallReturn { name, args } => procedures::call_value(self, name, args),
        }
    }

    /// Render a value socket for a position demanding `context`, falling
    /// back to `default` when the socket is unplugged. The default text is
    /// the caller's responsibility and must be self-delimiting.
    pub(crate) fn value_to_code(
        &mut self,
        socket: &Option<Box<Value>>,
        context: Rank,
        default: &str,
    ) -> Result<String, CompileError> {
        match socket {
            Some(value) => {
                let expr = self.value(value)?;
                Ok(expr.wrapped_for(context))
            }
            None => Ok(default.to_string()),
        }
    }

    /// Render an index socket shifted by `delta` (optionally negated) for a
    /// position demanding `context`. An unplugged socket falls back to the
    /// indexing convention's first index.
    pub(crate) fn adjusted_index(
        &mut self,
        socket: &Option<Box<Value>>,
        delta: i64,
        negate: bool,
        context: Rank,
    ) -> Result<String, CompileError> {
        let one_based = self.opts.one_based_index;
        let base = match socket {
            Some(value) => self.value(value)?,
            None => Expression::atomic(if one_based { "1" } else { "0" }),
        };
        Ok(emit::adjust_index(&base, delta, negate, context, one_based).text)
    }

    /// Register a named helper definition once per pass and hand back its
    /// actual (collision-free) name. `lines` carry `FUNC_PLACEHOLDER` where
    /// the name goes.
    pub(crate) fn provide_function(&mut self, desired: &str, lines: &[String]) -> String {
        if let Some(actual) = self.function_names.get(desired) {
            return actual.clone();
        }
        let actual = self.names.distinct_name(desired);
        let text = lines.join("\n").replace(FUNC_PLACEHOLDER, &actual);
        self.function_names.insert(desired.to_string(), actual.clone());
        self.define(desired, text);
        actual
    }

    /// First registration wins; later registrations under the same key are
    /// no-ops.
    pub(crate) fn define(&mut self, key: &str, text: String) {
        if !self.definitions.iter().any(|(k, _)| k == key) {
            self.definitions.push((key.to_string(), text));
        }
    }

    /// Opening line of a function definition for the selected target.
    pub(crate) fn def_header(&self) -> String {
        match self.opts.target {
            TargetShell::Bash => format!("function {} {{", FUNC_PLACEHOLDER),
            TargetShell::Posix => format!("{}() {{", FUNC_PLACEHOLDER),
        }
    }
}

/// Encode a string as a quoted shell word.
pub(crate) fn quote(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('\n', "\\\n")
        .replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Prefix every non-empty line of `text` with `prefix`.
pub(crate) fn prefix_lines(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if line != "\n" {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

/// Greedy word wrap for comment text.
pub(crate) fn wrap_comment(text: &str, width: usize) -> String {
    let mut out = String::new();
    for source_line in text.lines() {
        let mut line_len = 0;
        for word in source_line.split_whitespace() {
            if line_len > 0 && line_len + 1 + word.len() > width {
                out.push('\n');
                line_len = 0;
            } else if line_len > 0 {
                out.push(' ');
                line_len += 1;
            }
            out.push_str(word);
            line_len += word.len();
        }
        out.push('\n');
    }
    out
}

/// Recover the bare variable name from a rendered `${name}` reference so it
/// can be spliced into array syntax. Anything else passes through.
pub(crate) fn var_name(text: &str) -> String {
    if let Some(inner) = text.strip_prefix("${").and_then(|t| t.strip_suffix('}')) {
        inner.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_lines_skips_blank_lines() {
        assert_eq!(prefix_lines("a\n\nb\n", "# "), "# a\n\n# b\n");
    }

    #[test]
    fn quote_escapes_backslash_and_quotes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn wrap_comment_breaks_long_lines() {
        let wrapped = wrap_comment("one two three four", 9);
        assert_eq!(wrapped, "one two\nthree\nfour\n");
    }

    #[test]
    fn var_name_strips_braced_reference() {
        assert_eq!(var_name("${items}"), "items");
        assert_eq!(var_name("()"), "()");
    }

    #[test]
    fn definitions_register_once() {
        let mut g = Generator::new(CodegenOptions::default());
        g.define("helper", "function helper { :; }".to_string());
        g.define("helper", "function helper { other; }".to_string());
        assert_eq!(g.definitions.len(), 1);
        assert_eq!(g.definitions[0].1, "function helper { :; }");
    }

    #[test]
    fn provide_function_dedupes_and_renames() {
        let mut g = Generator::new(CodegenOptions::default());
        // user variable grabs the plain name first
        let taken = g.names.get_name("helper", crate::names::Realm::Variable);
        assert_eq!(taken, "helper");
        let lines = vec![
            format!("function {} {{", FUNC_PLACEHOLDER),
            "  :".to_string(),
            "}".to_string(),
        ];
        let first = g.provide_function("helper", &lines);
        assert_ne!(first, "helper");
        let second = g.provide_function("helper", &lines);
        assert_eq!(first, second);
        assert_eq!(g.definitions.len(), 1);
    }
}
