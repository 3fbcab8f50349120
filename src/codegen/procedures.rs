//! User-defined procedures.
//!
//! Definitions do not emit in place: they register in the definitions table
//! (keyed with a `%` prefix so user procedures cannot collide with helper
//! keys) and are hoisted above the body. Calls read positional parameters;
//! a returning procedure echoes its result and is consumed through command
//! substitution.

use crate::block::{Socket, Stmt};
use crate::codegen::{Generator, INDENT};
use crate::emit::Expression;
use crate::error::CompileError;
use crate::names::Realm;
use crate::order::Rank;
use crate::target::TargetShell;

pub(crate) fn definition(
    g: &mut Generator,
    name: &str,
    params: &[String],
    body: &[Stmt],
    ret: &Socket,
) -> Result<String, CompileError> {
    let func_name = g.names.get_name(name, Realm::Procedure);
    let mut bindings = String::new();
    for (i, param) in params.iter().enumerate() {
        let param = g.names.get_name(param, Realm::Variable);
        match g.target() {
            TargetShell::Bash => {
                bindings.push_str(&format!("{}local {}=\"${}\"\n", INDENT, param, i + 1));
            }
            TargetShell::Posix => {
                bindings.push_str(&format!("{}{}=\"${}\"\n", INDENT, param, i + 1));
            }
        }
    }
    let branch = g.statements(body)?;
    let return_value = g.value_to_code(ret, Rank::NONE, "")?;
    let mut code = match g.target() {
        TargetShell::Bash => format!("function {} {{\n", func_name),
        TargetShell::Posix => format!("{}() {{\n", func_name),
    };
    code.push_str(&bindings);
    code.push_str(&branch);
    if !return_value.is_empty() {
        code.push_str(&format!("{}echo {}\n", INDENT, return_value));
    }
    code.push('}');
    g.define(&format!("%{}", func_name), code);
    Ok(String::new())
}

fn rendered_args(g: &mut Generator, args: &[Socket]) -> Result<String, CompileError> {
    let mut out = String::new();
    for arg in args {
        out.push(' ');
        out.push_str(&g.value_to_code(arg, Rank::COMMA, "\"\"")?);
    }
    Ok(out)
}

pub(crate) fn call_value(
    g: &mut Generator,
    name: &str,
    args: &[Socket],
) -> Result<Expression, CompileError> {
    let func_name = g.names.get_name(name, Realm::Procedure);
    let args = rendered_args(g, args)?;
    Ok(Expression::new(
        format!("$( {}{} )", func_name, args),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn call_statement(
    g: &mut Generator,
    name: &str,
    args: &[Socket],
) -> Result<String, CompileError> {
    let func_name = g.names.get_name(name, Realm::Procedure);
    let args = rendered_args(g, args)?;
    Ok(format!("{}{}\n", func_name, args))
}

pub(crate) fn if_return(
    g: &mut Generator,
    cond: &Socket,
    value: &Socket,
) -> Result<String, CompileError> {
    let cond = g.value_to_code(cond, Rank::NONE, "false")?;
    let mut code = format!("if [ {} ]; then\n", cond);
    if value.is_some() {
        let value = g.value_to_code(value, Rank::NONE, "\"\"")?;
        code.push_str(&format!("{}echo {}\n", INDENT, value));
    }
    code.push_str(&format!("{}return 0\nfi\n", INDENT));
    Ok(code)
}
