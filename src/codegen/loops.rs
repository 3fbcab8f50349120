//! Loop statements.
//!
//! The bash target keeps the C-style `for (( ... ))` form; posix has no
//! such loop, so counted loops lower to a `while` with an explicit counter.

use crate::block::{FlowKind, Socket, Stmt};
use crate::codegen::{self, Generator, INDENT};
use crate::emit;
use crate::error::CompileError;
use crate::order::Rank;
use crate::target::TargetShell;

/// A rendered bound that is neither a plain word nor a number gets cached
/// in a variable so the loop does not re-evaluate it.
fn is_simple(text: &str) -> bool {
    emit::is_number(text)
        || (!text.is_empty()
            && text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

pub(crate) fn repeat(
    g: &mut Generator,
    times: &Socket,
    body: &[Stmt],
) -> Result<String, CompileError> {
    let repeats = g.value_to_code(times, Rank::ASSIGNMENT, "0")?;
    let branch = g.statements(body)?;
    let mut code = String::new();
    let loop_var = g.names.distinct_name("count");
    let end_var = if is_simple(&repeats) {
        repeats
    } else {
        let cached = g.names.distinct_name("repeat_end");
        code.push_str(&format!("{}={}\n", cached, repeats));
        format!("${}", cached)
    };
    match g.target() {
        TargetShell::Bash => {
            code.push_str(&format!(
                "for (( {0}=0; {0}<{1}; {0}++ )); do\n{2}done\n",
                loop_var, end_var, branch
            ));
        }
        TargetShell::Posix => {
            code.push_str(&format!(
                "{0}=0\nwhile [ ${0} -lt {1} ]; do\n{2}{3}{0}=$(( {0} + 1 ))\ndone\n",
                loop_var, end_var, branch, INDENT
            ));
        }
    }
    Ok(code)
}

pub(crate) fn while_until(
    g: &mut Generator,
    until: bool,
    cond: &Socket,
    body: &[Stmt],
) -> Result<String, CompileError> {
    let context = if until { Rank::LOGICAL_NOT } else { Rank::NONE };
    let mut cond = g.value_to_code(cond, context, "false")?;
    if until {
        cond = format!("!{}", cond);
    }
    let branch = g.statements(body)?;
    Ok(format!("while [ {} ]; do\n{}done\n", cond, branch))
}

pub(crate) fn for_range(
    g: &mut Generator,
    var: &str,
    from: &Socket,
    to: &Socket,
    by: &Socket,
    body: &[Stmt],
) -> Result<String, CompileError> {
    let variable = g.names.get_name(var, crate::names::Realm::Variable);
    let start = g.value_to_code(from, Rank::ASSIGNMENT, "0")?;
    let end = g.value_to_code(to, Rank::ASSIGNMENT, "0")?;
    let step = g.value_to_code(by, Rank::ASSIGNMENT, "1")?;
    let branch = g.statements(body)?;

    if emit::is_number(&start) && emit::is_number(&end) && emit::is_number(&step) {
        return Ok(literal_range(g, &variable, &start, &end, &step, &branch));
    }
    dynamic_range(g, &variable, &start, &end, &step, &branch)
}

/// All bounds known at generation time: direction and step are folded in.
fn literal_range(
    g: &Generator,
    variable: &str,
    start: &str,
    end: &str,
    step: &str,
    branch: &str,
) -> String {
    let up = start.trim().parse::<f64>().unwrap_or(0.0)
        <= end.trim().parse::<f64>().unwrap_or(0.0);
    let magnitude = step.trim().parse::<f64>().unwrap_or(1.0).abs();
    match g.target() {
        TargetShell::Bash => {
            let mut code = format!(
                "for (( {0}={1}; {0}{2}{3}; {0}",
                variable,
                start,
                if up { "<=" } else { ">=" },
                end
            );
            if magnitude == 1.0 {
                code.push_str(if up { "++" } else { "--" });
            } else {
                code.push_str(&format!("{}{}", if up { "+=" } else { "-=" }, magnitude));
            }
            code.push_str(&format!(" )); do\n{}done\n", branch));
            code
        }
        TargetShell::Posix => {
            let compare = if up { "-le" } else { "-ge" };
            let operator = if up { "+" } else { "-" };
            format!(
                "{0}={1}\nwhile [ ${0} {2} {3} ]; do\n{4}{5}{0}=$(( {0} {6} {7} ))\ndone\n",
                variable, start, compare, end, branch, INDENT, operator, magnitude
            )
        }
    }
}

/// Dynamic bounds: cache them, pick the direction at runtime, and loop on
/// an arithmetic condition that works for either direction.
fn dynamic_range(
    g: &mut Generator,
    variable: &str,
    start: &str,
    end: &str,
    step: &str,
    branch: &str,
) -> Result<String, CompileError> {
    let mut code = String::new();
    let start_var = if is_simple(start) {
        start.to_string()
    } else {
        let cached = g.names.distinct_name(&format!("{}_start", variable));
        code.push_str(&format!("{}={}\n", cached, start));
        format!("${}", cached)
    };
    let end_var = if is_simple(end) {
        end.to_string()
    } else {
        let cached = g.names.distinct_name(&format!("{}_end", variable));
        code.push_str(&format!("{}={}\n", cached, end));
        format!("${}", cached)
    };
    let inc_var = g.names.distinct_name(&format!("{}_inc", variable));
    if emit::is_number(step) {
        let magnitude = step.trim().parse::<f64>().unwrap_or(1.0).abs();
        code.push_str(&format!("{}={}\n", inc_var, super::math::number(magnitude).text));
    } else {
        code.push_str(&format!("{}={}\n", inc_var, step));
        code.push_str(&format!(
            "[ ${0} -lt 0 ] && {0}=$(( -{0} ))\n",
            inc_var
        ));
    }
    code.push_str(&format!(
        "if [ {} -gt {} ]; then\n{}{}=$(( -{} ))\nfi\n",
        start_var, end_var, INDENT, inc_var, inc_var
    ));
    code.push_str(&format!(
        "{0}={1}\nwhile [ $(( ({2} > 0 && {0} <= {3}) || ({2} < 0 && {0} >= {3}) )) -eq 1 ]; do\n{4}{5}{0}=$(( {0} + {2} ))\ndone\n",
        variable,
        start_var,
        inc_var,
        end_var.trim_start_matches('$'),
        branch,
        INDENT
    ));
    Ok(code)
}

pub(crate) fn for_each(
    g: &mut Generator,
    var: &str,
    list: &Socket,
    body: &[Stmt],
) -> Result<String, CompileError> {
    let variable = g.names.get_name(var, crate::names::Realm::Variable);
    let rendered = g.value_to_code(list, Rank::ASSIGNMENT, "()")?;
    let branch = g.statements(body)?;
    let items = if let Some(inner) = rendered.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        // Inline list literal: splice the elements straight into the loop.
        inner.to_string()
    } else {
        if g.target() == TargetShell::Posix {
            return Err(CompileError::unsupported("list variables", g.target()));
        }
        format!("\"${{{}[@]}}\"", codegen::var_name(&rendered))
    };
    Ok(format!(
        "for {} in {}; do\n{}done\n",
        variable, items, branch
    ))
}

pub(crate) fn flow(kind: FlowKind) -> String {
    match kind {
        FlowKind::Break => "break\n".to_string(),
        FlowKind::Continue => "continue\n".to_string(),
    }
}
