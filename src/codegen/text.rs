//! String constructs.
//!
//! Substring expansion (`${var:offset:length}`) and `$RANDOM` are bashisms;
//! the posix target rejects the constructs that need them. Everything built
//! on `awk`, `sed`, `tr`, and prefix/suffix stripping works on both targets.

use crate::block::{Anchor, Bound, CaseMode, FindMode, Socket, TrimMode};
use crate::codegen::{self, Generator};
use crate::emit::Expression;
use crate::error::CompileError;
use crate::order::Rank;
use crate::target::TargetShell;

pub(crate) fn literal(s: &str) -> Expression {
    // Quote, then defuse history expansion, parameter expansion, and
    // comment introducers inside the generated double quotes.
    let quoted = codegen::quote(s)
        .replace('!', "\\!")
        .replace('$', "\\$")
        .replace('#', "\\#");
    Expression::atomic(quoted)
}

pub(crate) fn join(g: &mut Generator, items: &[Socket]) -> Result<Expression, CompileError> {
    match items.len() {
        0 => Ok(Expression::atomic("\"\"")),
        1 => {
            let element = g.value_to_code(&items[0], Rank::NONE, "\"\"")?;
            Ok(Expression::new(element, Rank::FUNCTION_CALL))
        }
        2 => {
            let first = g.value_to_code(&items[0], Rank::NONE, "\"\"")?;
            let second = g.value_to_code(&items[1], Rank::NONE, "\"\"")?;
            Ok(Expression::new(format!("\"{}{}\"", first, second), Rank::ADDITION))
        }
        _ => {
            let mut code = String::new();
            for item in items {
                code.push_str(&g.value_to_code(item, Rank::COMMA, "\"\"")?);
            }
            Ok(Expression::new(code, Rank::FUNCTION_CALL))
        }
    }
}

pub(crate) fn append(
    g: &mut Generator,
    var: &str,
    value: &Socket,
) -> Result<String, CompileError> {
    let name = g.names.get_name(var, crate::names::Realm::Variable);
    let value = g.value_to_code(value, Rank::ASSIGNMENT, "\"\"")?;
    Ok(format!("{}=\"${{{}}}\"{}\n", name, name, value))
}

pub(crate) fn length(g: &mut Generator, value: &Socket) -> Result<Expression, CompileError> {
    let text = g.value_to_code(value, Rank::NONE, "\"\"")?;
    Ok(Expression::new(
        format!("$( echo {} | awk '{{print length}}' )", text),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn is_empty(g: &mut Generator, value: &Socket) -> Result<Expression, CompileError> {
    let text = g.value_to_code(value, Rank::NONE, "\"\"")?;
    Ok(Expression::new(
        format!("$( [ -z {} ] && echo 1 )", text),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn index_of(
    g: &mut Generator,
    mode: FindMode,
    find: &Socket,
    value: &Socket,
) -> Result<Expression, CompileError> {
    let substring = g.value_to_code(find, Rank::NONE, "\"\"")?;
    let text = g.value_to_code(value, Rank::NONE, "\"\"")?;
    // Reported positions follow the workspace indexing convention.
    let adjustment = if g.one_based_index() { " + 1" } else { "" };
    let name = match mode {
        FindMode::First => g.provide_function(
            "text_index_of",
            &[
                g.def_header(),
                "  text=\"$1\"".to_string(),
                "  search=\"$2\"".to_string(),
                "  prefix=\"${text%%\"$search\"*}\"".to_string(),
                format!("  echo $(( ${{#prefix}}{} ))", adjustment),
                "}".to_string(),
            ],
        ),
        FindMode::Last => g.provide_function(
            "text_last_index_of",
            &[
                g.def_header(),
                "  text=\"$1\"".to_string(),
                "  search=\"$2\"".to_string(),
                "  suffix=\"${text##*\"$search\"}\"".to_string(),
                format!(
                    "  echo $(( ${{#text}} - ${{#suffix}} - ${{#search}}{} ))",
                    adjustment
                ),
                "}".to_string(),
            ],
        ),
    };
    Ok(Expression::new(
        format!("$( {} {} {} )", name, text, substring),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn char_at(
    g: &mut Generator,
    anchor: Anchor,
    at: &Socket,
    value: &Socket,
) -> Result<Expression, CompileError> {
    if g.target() == TargetShell::Posix {
        return Err(CompileError::unsupported("substring expansion", g.target()));
    }
    let context = if anchor == Anchor::Random { Rank::NONE } else { Rank::COMMA };
    let text = codegen::var_name(&g.value_to_code(value, context, "''")?);
    let code = match anchor {
        Anchor::First => format!("${{{}:0:1}}", text),
        Anchor::Last => format!("${{{}:(-1):1}}", text),
        Anchor::FromStart => {
            let at = g.adjusted_index(at, 0, false, Rank::NONE)?;
            format!("${{{}:{}:1}}", text, at)
        }
        Anchor::FromEnd => {
            let at = g.adjusted_index(at, 1, true, Rank::NONE)?;
            format!("${{{}:({}):1}}", text, at)
        }
        Anchor::Random => {
            let name = g.provide_function(
                "text_random_letter",
                &[
                    g.def_header(),
                    "  local text=\"$1\"".to_string(),
                    "  local i=$(( RANDOM % ${#text} ))".to_string(),
                    "  echo \"${text:$i:1}\"".to_string(),
                    "}".to_string(),
                ],
            );
            format!("$( {} \"${{{}}}\" )", name, text)
        }
    };
    Ok(Expression::new(code, Rank::FUNCTION_CALL))
}

fn bound_word(b: Bound) -> &'static str {
    match b {
        Bound::First => "first",
        Bound::Last => "last",
        Bound::FromStart => "from_start",
        Bound::FromEnd => "from_end",
    }
}

pub(crate) fn substring(
    g: &mut Generator,
    from: Bound,
    at1: &Socket,
    to: Bound,
    at2: &Socket,
    value: &Socket,
) -> Result<Expression, CompileError> {
    if from == Bound::First && to == Bound::Last {
        let text = g.value_to_code(value, Rank::FUNCTION_CALL, "''")?;
        return Ok(Expression::new(text, Rank::FUNCTION_CALL));
    }
    if g.target() == TargetShell::Posix {
        return Err(CompileError::unsupported("substring expansion", g.target()));
    }
    let text = g.value_to_code(value, Rank::COMMA, "''")?;
    let at1 = g.adjusted_index(at1, 0, false, Rank::NONE)?;
    let at2 = g.adjusted_index(at2, 0, false, Rank::NONE)?;
    let name = g.provide_function(
        "text_get_substring",
        &[
            g.def_header(),
            "  text=\"$1\"".to_string(),
            "  where1=\"$2\"".to_string(),
            "  at1=\"$3\"".to_string(),
            "  where2=\"$4\"".to_string(),
            "  at2=\"$5\"".to_string(),
            "  if [ $where1 == from_end ]; then".to_string(),
            "    at1=$(( ${#text} - 1 - $at1 ))".to_string(),
            "  elif [ $where1 == first ]; then".to_string(),
            "    at1=0".to_string(),
            "  elif [ $where1 != from_start ]; then".to_string(),
            "    exit 1".to_string(),
            "  fi".to_string(),
            "  length=0".to_string(),
            "  if [ $where2 == from_start ]; then".to_string(),
            "    length=$(( $at2 - $at1 + 1 ))".to_string(),
            "  elif [ $where2 == from_end ]; then".to_string(),
            "    length=$(( ${#text} - $at1 - $at2 ))".to_string(),
            "  elif [ $where2 == last ]; then".to_string(),
            "    length=$(( ${#text} - $at1 ))".to_string(),
            "  else".to_string(),
            "    exit 1".to_string(),
            "  fi".to_string(),
            "  echo \"${text:$at1:$length}\"".to_string(),
            "}".to_string(),
        ],
    );
    Ok(Expression::new(
        format!(
            "$( {} {} \"{}\" {} \"{}\" {} )",
            name,
            text,
            bound_word(from),
            at1,
            bound_word(to),
            at2
        ),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn change_case(
    g: &mut Generator,
    mode: CaseMode,
    value: &Socket,
) -> Result<Expression, CompileError> {
    let text = g.value_to_code(value, Rank::NONE, "''")?;
    let code = match mode {
        CaseMode::Upper => format!("$( echo {} | tr '[:lower:]' '[:upper:]' )", text),
        CaseMode::Lower => format!("$( echo {} | tr '[:upper:]' '[:lower:]' )", text),
        CaseMode::Title => format!(
            "$( echo {} | awk '{{for(j=1;j<=NF;j++){{ $j=toupper(substr($j,1,1)) tolower(substr($j,2)) }}}}1' )",
            text
        ),
    };
    Ok(Expression::new(code, Rank::FUNCTION_CALL))
}

pub(crate) fn trim(
    g: &mut Generator,
    mode: TrimMode,
    value: &Socket,
) -> Result<Expression, CompileError> {
    let filter = match mode {
        TrimMode::Left => "sed -e 's/^[ \\t]*//'",
        TrimMode::Right => "sed 's/[ \\t]*$//'",
        TrimMode::Both => "sed 's/^[ \\t]*//;s/[ \\t]*$//'",
    };
    let text = g.value_to_code(value, Rank::NONE, "''")?;
    Ok(Expression::new(
        format!("$( echo {} | {} )", text, filter),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn prompt() -> Expression {
    Expression::new("$( read -r reply; echo $reply )", Rank::FUNCTION_CALL)
}

pub(crate) fn print(g: &mut Generator, value: &Socket) -> Result<String, CompileError> {
    let msg = g.value_to_code(value, Rank::NONE, "''")?;
    Ok(format!("echo {}\n", msg))
}
