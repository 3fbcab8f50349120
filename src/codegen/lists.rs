//! List constructs. Arrays are a bash feature; every construct in this
//! module except a literal `for ... in` sequence refuses the posix target.

use crate::block::{Anchor, Bound, FindMode, GetMode, SetMode, Socket, SortKind};
use crate::codegen::{self, Generator};
use crate::emit::Expression;
use crate::error::CompileError;
use crate::order::Rank;
use crate::target::TargetShell;

fn require_bash(g: &Generator, feature: &str) -> Result<(), CompileError> {
    if g.target() == TargetShell::Posix {
        Err(CompileError::unsupported(feature, g.target()))
    } else {
        Ok(())
    }
}

/// Render the list socket and recover the bare array name for splicing
/// into subscript syntax.
fn list_name(
    g: &mut Generator,
    list: &Socket,
    context: Rank,
) -> Result<String, CompileError> {
    let rendered = g.value_to_code(list, context, "()")?;
    Ok(codegen::var_name(&rendered))
}

pub(crate) fn empty() -> Expression {
    Expression::new("()", Rank::FUNCTION_CALL)
}

pub(crate) fn create(g: &mut Generator, items: &[Socket]) -> Result<Expression, CompileError> {
    require_bash(g, "list literals")?;
    let mut rendered = Vec::with_capacity(items.len());
    for item in items {
        rendered.push(g.value_to_code(item, Rank::COMMA, "\"\"")?);
    }
    Ok(Expression::new(
        format!("({})", rendered.join(" ")),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn repeat(
    g: &mut Generator,
    item: &Socket,
    times: &Socket,
) -> Result<Expression, CompileError> {
    require_bash(g, "lists")?;
    let element = g.value_to_code(item, Rank::COMMA, "\"\"")?;
    let count = g.value_to_code(times, Rank::COMMA, "0")?;
    let name = g.provide_function(
        "lists_repeat",
        &[
            g.def_header(),
            "  local result=()".to_string(),
            "  local i".to_string(),
            "  for (( i=0; i<$2; i++ )); do".to_string(),
            "    result+=(\"$1\")".to_string(),
            "  done".to_string(),
            "  echo \"${result[@]}\"".to_string(),
            "}".to_string(),
        ],
    );
    Ok(Expression::new(
        format!("($( {} {} {} ))", name, element, count),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn length(g: &mut Generator, list: &Socket) -> Result<Expression, CompileError> {
    require_bash(g, "lists")?;
    let name = list_name(g, list, Rank::NONE)?;
    Ok(Expression::new(
        format!("\"${{#{}[@]}}\"", name),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn is_empty(g: &mut Generator, list: &Socket) -> Result<Expression, CompileError> {
    require_bash(g, "lists")?;
    let name = list_name(g, list, Rank::FUNCTION_CALL)?;
    Ok(Expression::new(
        format!("$( [ \"${{#{}[@]}}\" -eq 0 ] && echo 1 )", name),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn index_of(
    g: &mut Generator,
    mode: FindMode,
    find: &Socket,
    list: &Socket,
) -> Result<Expression, CompileError> {
    require_bash(g, "lists")?;
    let needle = g.value_to_code(find, Rank::NONE, "''")?;
    let name = list_name(g, list, Rank::MEMBER)?;
    // Found positions follow the workspace indexing convention; the
    // not-found sentinel sits one below the first valid index.
    let (adjustment, missing) = if g.one_based_index() {
        (" + 1", "0")
    } else {
        ("", "-1")
    };
    let helper = match mode {
        FindMode::First => g.provide_function(
            "list_index_of",
            &[
                g.def_header(),
                "  local name=\"$1[@]\"".to_string(),
                "  local haystack=(\"${!name}\")".to_string(),
                "  local needle=\"$2\"".to_string(),
                "  local i".to_string(),
                "  for i in \"${!haystack[@]}\"; do".to_string(),
                "    if [ \"${haystack[$i]}\" = \"$needle\" ]; then".to_string(),
                format!("      echo $(( i{} ))", adjustment),
                "      return 0".to_string(),
                "    fi".to_string(),
                "  done".to_string(),
                format!("  echo {}", missing),
                "}".to_string(),
            ],
        ),
        FindMode::Last => g.provide_function(
            "list_last_index_of",
            &[
                g.def_header(),
                "  local name=\"$1[@]\"".to_string(),
                "  local haystack=(\"${!name}\")".to_string(),
                "  local needle=\"$2\"".to_string(),
                format!("  local last={}", missing),
                "  local i".to_string(),
                "  for i in \"${!haystack[@]}\"; do".to_string(),
                "    if [ \"${haystack[$i]}\" = \"$needle\" ]; then".to_string(),
                format!("      last=$(( i{} ))", adjustment),
                "    fi".to_string(),
                "  done".to_string(),
                "  echo $last".to_string(),
                "}".to_string(),
            ],
        ),
    };
    Ok(Expression::new(
        format!("$( {} {} {} )", helper, name, needle),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn get_index(
    g: &mut Generator,
    mode: GetMode,
    anchor: Anchor,
    at: &Socket,
    list: &Socket,
) -> Result<Expression, CompileError> {
    require_bash(g, "lists")?;
    match (anchor, mode) {
        (Anchor::First, GetMode::Get) => {
            let name = list_name(g, list, Rank::MEMBER)?;
            Ok(Expression::new(format!("\"${{{}[0]}}\"", name), Rank::MEMBER))
        }
        (Anchor::First, GetMode::GetRemove) => {
            let name = list_name(g, list, Rank::NONE)?;
            Ok(Expression::new(
                format!("\"${{{0}[0]}}\"; {0}=(\"${{{0}[@]:1}}\")", name),
                Rank::FUNCTION_CALL,
            ))
        }
        (Anchor::Last, GetMode::Get) => {
            let name = list_name(g, list, Rank::NONE)?;
            Ok(Expression::new(
                format!("\"${{{0}[${{#{0}[@]}}-1]}}\"", name),
                Rank::FUNCTION_CALL,
            ))
        }
        (Anchor::Last, GetMode::GetRemove) => {
            let name = list_name(g, list, Rank::NONE)?;
            Ok(Expression::new(
                format!(
                    "\"${{{0}[${{#{0}[@]}}-1]}}\"; unset {0}[${{#{0}[@]}}-1]; {0}=(\"${{{0}[@]}}\")",
                    name
                ),
                Rank::FUNCTION_CALL,
            ))
        }
        (Anchor::FromStart, GetMode::Get) => {
            let at = g.adjusted_index(at, 0, false, Rank::NONE)?;
            let name = list_name(g, list, Rank::MEMBER)?;
            Ok(Expression::new(
                format!("\"${{{}[{}]}}\"", name, at),
                Rank::MEMBER,
            ))
        }
        (Anchor::FromStart, GetMode::GetRemove) => {
            let at = g.adjusted_index(at, 0, false, Rank::NONE)?;
            let name = list_name(g, list, Rank::COMMA)?;
            Ok(Expression::new(
                format!(
                    "\"${{{0}[{1}]}}\"; unset {0}[{1}]; {0}=(\"${{{0}[@]}}\")",
                    name, at
                ),
                Rank::FUNCTION_CALL,
            ))
        }
        (Anchor::FromEnd, GetMode::Get) => {
            let at = g.adjusted_index(at, 1, true, Rank::NONE)?;
            let name = list_name(g, list, Rank::COMMA)?;
            Ok(Expression::new(
                format!("\"${{{0}[${{#{0}[@]}}{1}]}}\"", name, at),
                Rank::FUNCTION_CALL,
            ))
        }
        (Anchor::FromEnd, GetMode::GetRemove) => {
            // The index sits to the right of a binary minus, so a dynamic
            // adjustment must bind at least as tightly as unary negation.
            let at = g.adjusted_index(at, 1, false, Rank::UNARY_NEGATION)?;
            let name = list_name(g, list, Rank::NONE)?;
            Ok(Expression::new(
                format!(
                    "\"${{{0}[${{#{0}[@]}}-{1}]}}\"; unset {0}[${{#{0}[@]}}-{1}]; {0}=(\"${{{0}[@]}}\")",
                    name, at
                ),
                Rank::FUNCTION_CALL,
            ))
        }
        (Anchor::Random, GetMode::Get) => {
            let name = list_name(g, list, Rank::NONE)?;
            let helper = g.provide_function(
                "lists_get_random_item",
                &[
                    g.def_header(),
                    "  local name=\"$1[@]\"".to_string(),
                    "  local items=(\"${!name}\")".to_string(),
                    "  local i=$(( RANDOM % ${#items[@]} ))".to_string(),
                    "  echo \"${items[$i]}\"".to_string(),
                    "}".to_string(),
                ],
            );
            Ok(Expression::new(
                format!("$( {} {} )", helper, name),
                Rank::FUNCTION_CALL,
            ))
        }
        (Anchor::Random, GetMode::GetRemove) => {
            let name = list_name(g, list, Rank::NONE)?;
            let helper = g.provide_function(
                "lists_get_remove_random_item",
                &[
                    g.def_header(),
                    "  local name=\"$1[@]\"".to_string(),
                    "  local items=(\"${!name}\")".to_string(),
                    "  local i=$(( RANDOM % ${#items[@]} ))".to_string(),
                    "  echo \"${items[$i]}\"".to_string(),
                    "  unset items[$i]".to_string(),
                    "  eval \"$1=(\\\"\\${items[@]}\\\")\"".to_string(),
                    "}".to_string(),
                ],
            );
            Ok(Expression::new(
                format!("$( {} {} )", helper, name),
                Rank::FUNCTION_CALL,
            ))
        }
    }
}

pub(crate) fn remove_at(
    g: &mut Generator,
    anchor: Anchor,
    at: &Socket,
    list: &Socket,
) -> Result<String, CompileError> {
    require_bash(g, "lists")?;
    match anchor {
        Anchor::First => {
            let name = list_name(g, list, Rank::NONE)?;
            Ok(format!("{0}=(\"${{{0}[@]:1}}\")\n", name))
        }
        Anchor::Last => {
            let name = list_name(g, list, Rank::NONE)?;
            Ok(format!("unset {0}[${{#{0}[@]}}-1]\n", name))
        }
        Anchor::FromStart => {
            let at = g.adjusted_index(at, 0, false, Rank::NONE)?;
            let name = list_name(g, list, Rank::COMMA)?;
            Ok(format!(
                "unset {0}[{1}]; {0}=(\"${{{0}[@]}}\")\n",
                name, at
            ))
        }
        Anchor::FromEnd => {
            let at = g.adjusted_index(at, 1, false, Rank::UNARY_NEGATION)?;
            let name = list_name(g, list, Rank::NONE)?;
            Ok(format!(
                "unset {0}[${{#{0}[@]}}-{1}]; {0}=(\"${{{0}[@]}}\")\n",
                name, at
            ))
        }
        Anchor::Random => {
            let name = list_name(g, list, Rank::NONE)?;
            let helper = g.provide_function(
                "lists_remove_random_item",
                &[
                    g.def_header(),
                    "  local name=\"$1[@]\"".to_string(),
                    "  local items=(\"${!name}\")".to_string(),
                    "  local i=$(( RANDOM % ${#items[@]} ))".to_string(),
                    "  unset items[$i]".to_string(),
                    "  eval \"$1=(\\\"\\${items[@]}\\\")\"".to_string(),
                    "}".to_string(),
                ],
            );
            Ok(format!("{} {}\n", helper, name))
        }
    }
}

pub(crate) fn set_index(
    g: &mut Generator,
    mode: SetMode,
    anchor: Anchor,
    at: &Socket,
    list: &Socket,
    value: &Socket,
) -> Result<String, CompileError> {
    require_bash(g, "lists")?;
    let value = g.value_to_code(value, Rank::ASSIGNMENT, "\"\"")?;
    match (anchor, mode) {
        (Anchor::First, SetMode::Set) => {
            let name = list_name(g, list, Rank::MEMBER)?;
            Ok(format!("{}[0]={}\n", name, value))
        }
        (Anchor::First, SetMode::Insert) => {
            let name = list_name(g, list, Rank::MEMBER)?;
            Ok(format!("{0}=({1} \"${{{0}[@]}}\")\n", name, value))
        }
        (Anchor::Last, SetMode::Set) => {
            let name = list_name(g, list, Rank::COMMA)?;
            Ok(format!("{0}[${{#{0}[@]}} - 1]={1}\n", name, value))
        }
        (Anchor::Last, SetMode::Insert) => {
            let name = list_name(g, list, Rank::COMMA)?;
            Ok(format!("{0}=(\"${{{0}[@]}}\" {1})\n", name, value))
        }
        (Anchor::FromStart, SetMode::Set) => {
            let at = g.adjusted_index(at, 0, false, Rank::NONE)?;
            let name = list_name(g, list, Rank::MEMBER)?;
            Ok(format!("{}[{}]={}\n", name, at, value))
        }
        (Anchor::FromStart, SetMode::Insert) => {
            let at = g.adjusted_index(at, 0, false, Rank::NONE)?;
            let name = list_name(g, list, Rank::MEMBER)?;
            Ok(format!(
                "{0}=(\"${{{0}[@]:0:{1}}}\" {2} \"${{{0}[@]:{1}}}\")\n",
                name, at, value
            ))
        }
        (Anchor::FromEnd, SetMode::Set) => {
            let at = g.adjusted_index(at, 1, false, Rank::UNARY_NEGATION)?;
            let name = list_name(g, list, Rank::COMMA)?;
            Ok(format!("{0}[${{#{0}[@]}} - {1}]={2}\n", name, at, value))
        }
        (Anchor::FromEnd, SetMode::Insert) => {
            let at = g.adjusted_index(at, 1, false, Rank::UNARY_NEGATION)?;
            let name = list_name(g, list, Rank::COMMA)?;
            Ok(format!(
                "{0}=(\"${{{0}[@]:0:${{#{0}[@]}} - {1}}}\" {2} \"${{{0}[@]:${{#{0}[@]}} - {1}}}\")\n",
                name, at, value
            ))
        }
        (Anchor::Random, SetMode::Set) => {
            let name = list_name(g, list, Rank::COMMA)?;
            Ok(format!(
                "{0}[$(( RANDOM % ${{#{0}[@]}} ))]={1}\n",
                name, value
            ))
        }
        (Anchor::Random, SetMode::Insert) => {
            let name = list_name(g, list, Rank::COMMA)?;
            let helper = g.provide_function(
                "lists_insert_random_item",
                &[
                    g.def_header(),
                    "  local name=\"$1[@]\"".to_string(),
                    "  local items=(\"${!name}\")".to_string(),
                    "  local value=\"$2\"".to_string(),
                    "  local i=$(( RANDOM % ${#items[@]} ))".to_string(),
                    "  items=(\"${items[@]:0:$i}\" \"$value\" \"${items[@]:$i}\")".to_string(),
                    "  echo \"${items[@]}\"".to_string(),
                    "}".to_string(),
                ],
            );
            Ok(format!("{0}=($( {1} {0} {2} ))\n", name, helper, value))
        }
    }
}

fn bound_expr(
    g: &mut Generator,
    bound: Bound,
    at: &Socket,
    name: &str,
    is_start: bool,
) -> Result<String, CompileError> {
    match bound {
        Bound::First => Ok("0".to_string()),
        Bound::Last => Ok(format!("\"${{#{}[@]}}\"", name)),
        Bound::FromStart => {
            let delta = if is_start { 0 } else { 1 };
            g.adjusted_index(at, delta, false, Rank::NONE)
        }
        Bound::FromEnd => {
            let delta = if is_start { 1 } else { 0 };
            let at = g.adjusted_index(at, delta, true, Rank::NONE)?;
            Ok(format!("\"${{#{}[@]}}\" {}", name, at))
        }
    }
}

pub(crate) fn sublist(
    g: &mut Generator,
    from: Bound,
    at1: &Socket,
    to: Bound,
    at2: &Socket,
    list: &Socket,
) -> Result<Expression, CompileError> {
    require_bash(g, "lists")?;
    let name = list_name(g, list, Rank::MEMBER)?;
    let start = bound_expr(g, from, at1, &name, true)?;
    let end = bound_expr(g, to, at2, &name, false)?;
    Ok(Expression::new(
        format!("(\"${{{}[@]:{} : {}}}\")", name, start, end),
        Rank::MEMBER,
    ))
}

pub(crate) fn sort(
    g: &mut Generator,
    kind: SortKind,
    ascending: bool,
    list: &Socket,
) -> Result<Expression, CompileError> {
    require_bash(g, "lists")?;
    let name = list_name(g, list, Rank::COMMA)?;
    let mut args = String::new();
    if !ascending {
        args.push_str(" -r");
    }
    match kind {
        SortKind::Numeric => args.push_str(" -n"),
        SortKind::IgnoreCase => args.push_str(" -f"),
        SortKind::Alphabetic => {}
    }
    Ok(Expression::new(
        format!(
            "$( echo \"${{{}[@]}}\" | tr \" \" \"\\n\" | sort{} | tr \"\\n\" \" \" )",
            name, args
        ),
        Rank::FUNCTION_CALL,
    ))
}

pub(crate) fn split(
    g: &mut Generator,
    join: bool,
    input: &Socket,
    delim: &Socket,
) -> Result<Expression, CompileError> {
    require_bash(g, "lists")?;
    let delim = g.value_to_code(delim, Rank::COMMA, "''")?;
    if join {
        let name = list_name(g, input, Rank::COMMA)?;
        Ok(Expression::new(
            format!("$( printf \"%s\" \"${{{}[@]/#/{}}}\" )", name, delim),
            Rank::FUNCTION_CALL,
        ))
    } else {
        let name = codegen::var_name(&g.value_to_code(input, Rank::COMMA, "''")?);
        Ok(Expression::new(
            format!("(\"${{{}//{}/ }}\")", name, delim),
            Rank::FUNCTION_CALL,
        ))
    }
}
