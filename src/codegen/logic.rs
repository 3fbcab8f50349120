//! Boolean constructs and the if/elif/else statement.
//!
//! Booleans use the generator's shell encoding: `1` for true and the empty
//! string for false, so `[ $flag ]` tests them directly.

use crate::block::{CompareOp, LogicOp, Socket, Stmt};
use crate::codegen::Generator;
use crate::emit::{self, Expression};
use crate::error::CompileError;
use crate::order::Rank;

pub(crate) fn boolean(value: bool) -> Expression {
    Expression::atomic(if value { "1" } else { "" })
}

pub(crate) fn null() -> Expression {
    Expression::atomic("\"\"")
}

pub(crate) fn compare(
    g: &mut Generator,
    op: CompareOp,
    a: &Socket,
    b: &Socket,
) -> Result<Expression, CompileError> {
    let rank = match op {
        CompareOp::Eq | CompareOp::Neq => Rank::EQUALITY,
        _ => Rank::RELATIONAL,
    };
    let lhs = g.value_to_code(a, rank, "0")?;
    let rhs = g.value_to_code(b, rank, "0")?;

    // Operator spelling depends on what the operands look like: two
    // variable references compare as strings for (in)equality but
    // numerically for ordering; any bare string operand forces the string
    // comparators; plain numbers use the arithmetic ones.
    let both_vars = lhs.starts_with('$') && rhs.starts_with('$');
    let any_string = (!lhs.starts_with('$') && !emit::is_number(&lhs))
        || (!rhs.starts_with('$') && !emit::is_number(&rhs));
    let operator = if both_vars {
        match op {
            CompareOp::Eq => "==",
            CompareOp::Neq => "!=",
            CompareOp::Lt => "-lt",
            CompareOp::Lte => "-le",
            CompareOp::Gt => "-gt",
            CompareOp::Gte => "-ge",
        }
    } else if any_string {
        match op {
            CompareOp::Eq => "==",
            CompareOp::Neq => "!=",
            CompareOp::Lt => "\\<",
            CompareOp::Lte => "\\<=",
            CompareOp::Gt => "\\>",
            CompareOp::Gte => "\\>=",
        }
    } else {
        match op {
            CompareOp::Eq => "-eq",
            CompareOp::Neq => "-ne",
            CompareOp::Lt => "-lt",
            CompareOp::Lte => "-le",
            CompareOp::Gt => "-gt",
            CompareOp::Gte => "-ge",
        }
    };

    Ok(Expression::new(format!("[ {} {} {} ]", lhs, operator, rhs), rank))
}

pub(crate) fn operation(
    g: &mut Generator,
    op: LogicOp,
    a: &Socket,
    b: &Socket,
) -> Result<Expression, CompileError> {
    let (operator, rank) = match op {
        LogicOp::And => ("&&", Rank::LOGICAL_AND),
        LogicOp::Or => ("||", Rank::LOGICAL_OR),
    };
    // A single unplugged operand must not change the result: the neutral
    // element fills in. Both unplugged means the whole block is false.
    let neutral = match op {
        LogicOp::And => "1",
        LogicOp::Or => "",
    };
    let (lhs, rhs) = if a.is_none() && b.is_none() {
        (String::new(), String::new())
    } else {
        (
            g.value_to_code(a, rank, neutral)?,
            g.value_to_code(b, rank, neutral)?,
        )
    };
    Ok(Expression::new(format!("{} {} {}", lhs, operator, rhs), rank))
}

pub(crate) fn negate(g: &mut Generator, value: &Socket) -> Result<Expression, CompileError> {
    let arg = g.value_to_code(value, Rank::LOGICAL_NOT, "1")?;
    Ok(Expression::new(format!("!{}", arg), Rank::LOGICAL_NOT))
}

pub(crate) fn ternary(
    g: &mut Generator,
    cond: &Socket,
    then: &Socket,
    otherwise: &Socket,
) -> Result<Expression, CompileError> {
    let cond = g.value_to_code(cond, Rank::CONDITIONAL, "")?;
    let then = g.value_to_code(then, Rank::CONDITIONAL, "\"\"")?;
    let otherwise = g.value_to_code(otherwise, Rank::CONDITIONAL, "\"\"")?;
    Ok(Expression::new(
        format!("$( [ {} ] && echo {} || echo {} )", cond, then, otherwise),
        Rank::CONDITIONAL,
    ))
}

/// Wrap a rendered condition in `[ ... ]` unless it already carries its own
/// test brackets.
fn test_brackets(cond: &str) -> String {
    if cond.contains('[') {
        cond.to_string()
    } else {
        format!("[ {} ]", cond)
    }
}

pub(crate) fn controls_if(
    g: &mut Generator,
    branches: &[(Socket, Vec<Stmt>)],
    else_body: &[Stmt],
) -> Result<String, CompileError> {
    let mut code = String::new();
    for (i, (cond, body)) in branches.iter().enumerate() {
        let cond = g.value_to_code(cond, Rank::NONE, "")?;
        let keyword = if i == 0 { "if" } else { "elif" };
        code.push_str(&format!("{} {}; then\n", keyword, test_brackets(&cond)));
        code.push_str(&g.statements(body)?);
    }
    if !else_body.is_empty() {
        code.push_str("else\n");
        code.push_str(&g.statements(else_body)?);
    }
    code.push_str("fi\n");
    Ok(code)
}
