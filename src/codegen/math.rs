//! Number and arithmetic constructs.

use crate::block::{ArithOp, MathConstant, Socket, UnaryMathOp};
use crate::codegen::Generator;
use crate::emit::Expression;
use crate::error::CompileError;
use crate::order::Rank;
use crate::target::TargetShell;

pub(crate) fn number(n: f64) -> Expression {
    let text = if n == f64::INFINITY {
        "INF".to_string()
    } else if n == f64::NEG_INFINITY {
        "-INF".to_string()
    } else if n == n.trunc() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    };
    Expression::atomic(text)
}

pub(crate) fn constant(c: MathConstant) -> Expression {
    match c {
        MathConstant::Pi => Expression::atomic("$( echo \"4*a(1)\" | bc -l )"),
        MathConstant::E => Expression::atomic("$( echo \"e(1)\" | bc -l )"),
        MathConstant::GoldenRatio => Expression::new(
            "$( echo \"(1 + sqrt(5)) / 2\" | bc -l )",
            Rank::DIVISION,
        ),
        MathConstant::Sqrt2 => Expression::atomic("$( echo \"sqrt(2)\" | bc -l )"),
        MathConstant::SqrtHalf => Expression::atomic("$( echo \"1/sqrt(2)\" | bc -l )"),
        MathConstant::Infinity => Expression::atomic("INF"),
    }
}

pub(crate) fn arithmetic(
    g: &mut Generator,
    op: ArithOp,
    a: &Socket,
    b: &Socket,
) -> Result<Expression, CompileError> {
    let (operator, rank) = match op {
        ArithOp::Add => (" + ", Rank::ADDITION),
        ArithOp::Minus => (" - ", Rank::SUBTRACTION),
        ArithOp::Multiply => (" * ", Rank::MULTIPLICATION),
        ArithOp::Divide => (" / ", Rank::DIVISION),
        ArithOp::Power => (" ** ", Rank::POWER),
    };
    if op == ArithOp::Power && g.target() == TargetShell::Posix {
        return Err(CompileError::unsupported("the power operator", g.target()));
    }
    let lhs = g.value_to_code(a, rank, "0")?;
    let rhs = g.value_to_code(b, rank, "0")?;
    Ok(Expression::new(format!("$(({}{}{}))", lhs, operator, rhs), rank))
}

pub(crate) fn modulo(
    g: &mut Generator,
    dividend: &Socket,
    divisor: &Socket,
) -> Result<Expression, CompileError> {
    let lhs = g.value_to_code(dividend, Rank::MODULUS, "0")?;
    let rhs = g.value_to_code(divisor, Rank::MODULUS, "0")?;
    Ok(Expression::new(format!("$(({} % {}))", lhs, rhs), Rank::MODULUS))
}

pub(crate) fn random_int(
    g: &mut Generator,
    from: &Socket,
    to: &Socket,
) -> Result<Expression, CompileError> {
    if g.target() == TargetShell::Posix {
        return Err(CompileError::unsupported("random integers", g.target()));
    }
    let lo = g.value_to_code(from, Rank::COMMA, "0")?;
    let hi = g.value_to_code(to, Rank::COMMA, "0")?;
    let name = g.provide_function(
        "math_random_int",
        &[
            g.def_header(),
            "  local min=$1".to_string(),
            "  local max=$2".to_string(),
            "  if [ $min -gt $max ]; then".to_string(),
            "    local swap=$min".to_string(),
            "    min=$max".to_string(),
            "    max=$swap".to_string(),
            "  fi".to_string(),
            "  echo $(( RANDOM % (max - min + 1) + min ))".to_string(),
            "}".to_string(),
        ],
    );
    Ok(Expression::new(
        format!("$( {} {} {} )", name, lo, hi),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn unary(
    g: &mut Generator,
    op: UnaryMathOp,
    num: &Socket,
) -> Result<Expression, CompileError> {
    if op == UnaryMathOp::Neg {
        // Negation binds by its own rank; a leading minus on the operand
        // needs a space so the dashes do not fuse.
        let mut arg = g.value_to_code(num, Rank::UNARY_NEGATION, "0")?;
        if arg.starts_with('-') {
            arg = format!(" {}", arg);
        }
        return Ok(Expression::new(format!("-{}", arg), Rank::UNARY_NEGATION));
    }

    let arg = match op {
        UnaryMathOp::Sin | UnaryMathOp::Cos | UnaryMathOp::Tan => {
            g.value_to_code(num, Rank::DIVISION, "0")?
        }
        _ => g.value_to_code(num, Rank::NONE, "0")?,
    };

    let code = match op {
        UnaryMathOp::Abs => {
            let name = g.provide_function(
                "math_abs",
                &[
                    g.def_header(),
                    "  [ $1 -lt 0 ] && echo $((- $1)) || echo $1".to_string(),
                    "}".to_string(),
                ],
            );
            format!("$( {} {} )", name, arg)
        }
        UnaryMathOp::Root => format!("$( echo \"sqrt({})\" | bc -l )", arg),
        UnaryMathOp::Ln => format!("$( echo \"l({})\" | bc -l )", arg),
        UnaryMathOp::Log10 => format!("$( echo \"l({}) / l(10)\" | bc -l )", arg),
        UnaryMathOp::Exp => format!("$( echo \"e({})\" | bc -l )", arg),
        UnaryMathOp::Pow10 => format!("$( echo \"10^{}\" | bc -l )", arg),
        UnaryMathOp::Round => format!("$( printf \"%.0f\" {} )", arg),
        UnaryMathOp::RoundUp => format!(
            "$( echo {} | awk '{{print int($1) + (($1 > int($1)) ? 1 : 0)}}' )",
            arg
        ),
        UnaryMathOp::RoundDown => format!(
            "$( echo {} | awk '{{print int($1) - (($1 < int($1)) ? 1 : 0)}}' )",
            arg
        ),
        UnaryMathOp::Sin => format!("$( echo \"s({})\" | bc -l )", arg),
        UnaryMathOp::Cos => format!("$( echo \"c({})\" | bc -l )", arg),
        UnaryMathOp::Tan => format!("$( echo \"s({})/c({})\" | bc -l )", arg, arg),
        UnaryMathOp::Neg => unreachable!("handled above"),
    };
    Ok(Expression::new(code, Rank::FUNCTION_CALL))
}
