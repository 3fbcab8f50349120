//! Decode the host's serialized block tree (JSON) into the closed block
//! model.
//!
//! The document is an array of statement blocks. Each block object carries
//! `"type"` plus optional `"fields"` (scalars keyed by field name),
//! `"inputs"` (value sockets: a nested block object, or null for an
//! unplugged socket), `"statements"` (arrays of statement blocks), and
//! `"comment"`. Errors name the path of the offending node.

use crate::block::*;
use crate::error::CompileError;
use serde_json::Value as Json;

/// Every construct name the loader accepts, for "did you mean" hints.
const BLOCK_TYPES: &[&str] = &[
    "math_number",
    "math_arithmetic",
    "math_single",
    "math_constant",
    "math_modulo",
    "math_random_int",
    "math_change",
    "logic_boolean",
    "logic_null",
    "logic_compare",
    "logic_operation",
    "logic_negate",
    "logic_ternary",
    "controls_if",
    "controls_repeat_ext",
    "controls_whileUntil",
    "controls_for",
    "controls_forEach",
    "controls_flow_statements",
    "text",
    "text_join",
    "text_append",
    "text_length",
    "text_isEmpty",
    "text_indexOf",
    "text_charAt",
    "text_getSubstring",
    "text_changeCase",
    "text_trim",
    "text_prompt",
    "text_print",
    "lists_create_empty",
    "lists_create_with",
    "lists_repeat",
    "lists_length",
    "lists_isEmpty",
    "lists_indexOf",
    "lists_getIndex",
    "lists_setIndex",
    "lists_getSublist",
    "lists_sort",
    "lists_split",
    "variables_get",
    "variables_set",
    "procedures_defreturn",
    "procedures_defnoreturn",
    "procedures_callreturn",
    "procedures_callnoreturn",
    "procedures_ifreturn",
];

pub fn parse_program(src: &str) -> Result<Vec<Stmt>, CompileError> {
    let doc: Json = serde_json::from_str(src)
        .map_err(|e| CompileError::load(format!("invalid JSON: {}", e)))?;
    let blocks = doc
        .as_array()
        .ok_or_else(|| CompileError::load("expected a top-level array of blocks"))?;
    let mut program = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        program.push(stmt_from(block, &format!("program[{}]", i))?);
    }
    Ok(program)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b_chars.len()]
}

fn suggest_type(name: &str) -> Option<&'static str> {
    let threshold = 1.max(2.min(name.len() / 2));
    BLOCK_TYPES
        .iter()
        .map(|&t| (edit_distance(name, t), t))
        .filter(|&(d, _)| d <= threshold)
        .min_by_key(|&(d, _)| d)
        .map(|(_, t)| t)
}

fn block_type<'a>(json: &'a Json, path: &str) -> Result<&'a str, CompileError> {
    json.get("type")
        .and_then(Json::as_str)
        .ok_or_else(|| CompileError::load("block has no \"type\"").with_location(path.to_string()))
}

fn field<'a>(json: &'a Json, name: &str) -> Option<&'a Json> {
    json.get("fields").and_then(|f| f.get(name))
}

fn field_str<'a>(json: &'a Json, name: &str, path: &str) -> Result<&'a str, CompileError> {
    field(json, name).and_then(Json::as_str).ok_or_else(|| {
        CompileError::load(format!("missing string field \"{}\"", name))
            .with_location(path.to_string())
    })
}

fn field_str_or<'a>(json: &'a Json, name: &str, default: &'a str) -> &'a str {
    field(json, name).and_then(Json::as_str).unwrap_or(default)
}

fn field_f64(json: &Json, name: &str, path: &str) -> Result<f64, CompileError> {
    field(json, name).and_then(Json::as_f64).ok_or_else(|| {
        CompileError::load(format!("missing numeric field \"{}\"", name))
            .with_location(path.to_string())
    })
}

/// A value socket: absent key or JSON null mean unplugged.
fn socket(json: &Json, name: &str, path: &str) -> Result<Socket, CompileError> {
    match json.get("inputs").and_then(|i| i.get(name)) {
        None | Some(Json::Null) => Ok(None),
        Some(child) => Ok(Some(Box::new(value_from(
            child,
            &format!("{}.inputs.{}", path, name),
        )?))),
    }
}

/// A variadic socket row (e.g. the join/create item lists).
fn socket_list(json: &Json, name: &str, path: &str) -> Result<Vec<Socket>, CompileError> {
    match json.get("inputs").and_then(|i| i.get(name)) {
        None | Some(Json::Null) => Ok(Vec::new()),
        Some(Json::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}.inputs.{}[{}]", path, name, i);
                out.push(match item {
                    Json::Null => None,
                    other => Some(Box::new(value_from(other, &item_path)?)),
                });
            }
            Ok(out)
        }
        Some(_) => Err(CompileError::load(format!("input \"{}\" must be an array", name))
            .with_location(path.to_string())),
    }
}

fn stmt_list(json: &Json, name: &str, path: &str) -> Result<Vec<Stmt>, CompileError> {
    match json.get("statements").and_then(|s| s.get(name)) {
        None | Some(Json::Null) => Ok(Vec::new()),
        Some(Json::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(stmt_from(item, &format!("{}.statements.{}[{}]", path, name, i))?);
            }
            Ok(out)
        }
        Some(_) => Err(
            CompileError::load(format!("statement input \"{}\" must be an array", name))
                .with_location(path.to_string()),
        ),
    }
}

fn anchor(token: &str, path: &str) -> Result<Anchor, CompileError> {
    match token {
        "FIRST" => Ok(Anchor::First),
        "LAST" => Ok(Anchor::Last),
        "FROM_START" => Ok(Anchor::FromStart),
        "FROM_END" => Ok(Anchor::FromEnd),
        "RANDOM" => Ok(Anchor::Random),
        other => Err(CompileError::load(format!("unknown position \"{}\"", other))
            .with_location(path.to_string())),
    }
}

fn bound(token: &str, path: &str) -> Result<Bound, CompileError> {
    match token {
        "FIRST" => Ok(Bound::First),
        "LAST" => Ok(Bound::Last),
        "FROM_START" => Ok(Bound::FromStart),
        "FROM_END" => Ok(Bound::FromEnd),
        other => Err(CompileError::load(format!("unknown boundary \"{}\"", other))
            .with_location(path.to_string())),
    }
}

fn find_mode(token: &str, path: &str) -> Result<FindMode, CompileError> {
    match token {
        "FIRST" => Ok(FindMode::First),
        "LAST" => Ok(FindMode::Last),
        other => Err(CompileError::load(format!("unknown search end \"{}\"", other))
            .with_location(path.to_string())),
    }
}

fn param_names(json: &Json, path: &str) -> Result<Vec<String>, CompileError> {
    match field(json, "PARAMS") {
        None | Some(Json::Null) => Ok(Vec::new()),
        Some(Json::Array(items)) => items
            .iter()
            .map(|p| {
                p.as_str().map(str::to_string).ok_or_else(|| {
                    CompileError::load("procedure parameters must be strings")
                        .with_location(path.to_string())
                })
            })
            .collect(),
        Some(_) => Err(CompileError::load("field \"PARAMS\" must be an array")
            .with_location(path.to_string())),
    }
}

fn stmt_from(json: &Json, path: &str) -> Result<Stmt, CompileError> {
    let comment = json
        .get("comment")
        .and_then(Json::as_str)
        .map(str::to_string);
    let kind = match block_type(json, path)? {
        "controls_if" => {
            let branch_nodes = json
                .get("inputs")
                .and_then(|i| i.get("branches"))
                .and_then(Json::as_array)
                .ok_or_else(|| {
                    CompileError::load("controls_if needs an array input \"branches\"")
                        .with_location(path.to_string())
                })?;
            let mut branches = Vec::with_capacity(branch_nodes.len());
            for (i, node) in branch_nodes.iter().enumerate() {
                let branch_path = format!("{}.inputs.branches[{}]", path, i);
                let cond = socket(node, "if", &branch_path)?;
                let body = stmt_list(node, "do", &branch_path)?;
                branches.push((cond, body));
            }
            StmtKind::If {
                branches,
                else_body: stmt_list(json, "else", path)?,
            }
        }
        "controls_repeat_ext" => StmtKind::Repeat {
            times: socket(json, "times", path)?,
            body: stmt_list(json, "do", path)?,
        },
        "controls_whileUntil" => StmtKind::While {
            until: field_str_or(json, "MODE", "WHILE") == "UNTIL",
            cond: socket(json, "cond", path)?,
            body: stmt_list(json, "do", path)?,
        },
        "controls_for" => StmtKind::ForRange {
            var: field_str(json, "VAR", path)?.to_string(),
            from: socket(json, "from", path)?,
            to: socket(json, "to", path)?,
            by: socket(json, "by", path)?,
            body: stmt_list(json, "do", path)?,
        },
        "controls_forEach" => StmtKind::ForEach {
            var: field_str(json, "VAR", path)?.to_string(),
            list: socket(json, "list", path)?,
            body: stmt_list(json, "do", path)?,
        },
        "controls_flow_statements" => match field_str(json, "FLOW", path)? {
            "BREAK" => StmtKind::Flow(FlowKind::Break),
            "CONTINUE" => StmtKind::Flow(FlowKind::Continue),
            other => {
                return Err(CompileError::load(format!("unknown flow statement \"{}\"", other))
                    .with_location(path.to_string()));
            }
        },
        "variables_set" => StmtKind::SetVariable {
            var: field_str(json, "VAR", path)?.to_string(),
            value: socket(json, "value", path)?,
        },
        "math_change" => StmtKind::ChangeVariable {
            var: field_str(json, "VAR", path)?.to_string(),
            delta: socket(json, "delta", path)?,
        },
        "text_append" => StmtKind::TextAppend {
            var: field_str(json, "VAR", path)?.to_string(),
            value: socket(json, "value", path)?,
        },
        "text_print" => StmtKind::Print {
            value: socket(json, "value", path)?,
        },
        "lists_setIndex" => StmtKind::ListSet {
            mode: match field_str_or(json, "MODE", "SET") {
                "SET" => SetMode::Set,
                "INSERT" => SetMode::Insert,
                other => {
                    return Err(CompileError::load(format!("unknown set mode \"{}\"", other))
                        .with_location(path.to_string()));
                }
            },
            anchor: anchor(field_str_or(json, "WHERE", "FROM_START"), path)?,
            at: socket(json, "at", path)?,
            list: socket(json, "list", path)?,
            value: socket(json, "value", path)?,
        },
        "lists_getIndex" if field_str_or(json, "MODE", "GET") == "REMOVE" => {
            StmtKind::ListRemoveAt {
                anchor: anchor(field_str_or(json, "WHERE", "FROM_START"), path)?,
                at: socket(json, "at", path)?,
                list: socket(json, "list", path)?,
            }
        }
        "procedures_defreturn" | "procedures_defnoreturn" => StmtKind::ProcDef {
            name: field_str(json, "NAME", path)?.to_string(),
            params: param_names(json, path)?,
            body: stmt_list(json, "do", path)?,
            ret: socket(json, "return", path)?,
        },
        "procedures_callnoreturn" => StmtKind::ProcCall {
            name: field_str(json, "NAME", path)?.to_string(),
            args: socket_list(json, "args", path)?,
        },
        "procedures_ifreturn" => StmtKind::IfReturn {
            cond: socket(json, "cond", path)?,
            value: socket(json, "value", path)?,
        },
        // Anything else in statement position is a naked value block.
        _ => StmtKind::Naked(value_from(json, path)?),
    };
    Ok(Stmt { comment, kind })
}

fn value_from(json: &Json, path: &str) -> Result<Value, CompileError> {
    let value = match block_type(json, path)? {
        "math_number" => Value::Number(field_f64(json, "NUM", path)?),
        "math_arithmetic" => Value::Arithmetic {
            op: match field_str(json, "OP", path)? {
                "ADD" => ArithOp::Add,
                "MINUS" => ArithOp::Minus,
                "MULTIPLY" => ArithOp::Multiply,
                "DIVIDE" => ArithOp::Divide,
                "POWER" => ArithOp::Power,
                other => {
                    return Err(CompileError::load(format!("unknown operator \"{}\"", other))
                        .with_location(path.to_string()));
                }
            },
            a: socket(json, "a", path)?,
            b: socket(json, "b", path)?,
        },
        "math_single" => Value::UnaryMath {
            op: match field_str(json, "OP", path)? {
                "NEG" => UnaryMathOp::Neg,
                "ABS" => UnaryMathOp::Abs,
                "ROOT" => UnaryMathOp::Root,
                "LN" => UnaryMathOp::Ln,
                "LOG10" => UnaryMathOp::Log10,
                "EXP" => UnaryMathOp::Exp,
                "POW10" => UnaryMathOp::Pow10,
                "ROUND" => UnaryMathOp::Round,
                "ROUNDUP" => UnaryMathOp::RoundUp,
                "ROUNDDOWN" => UnaryMathOp::RoundDown,
                "SIN" => UnaryMathOp::Sin,
                "COS" => UnaryMathOp::Cos,
                "TAN" => UnaryMathOp::Tan,
                other => {
                    return Err(CompileError::load(format!("unknown operator \"{}\"", other))
                        .with_location(path.to_string()));
                }
            },
            num: socket(json, "num", path)?,
        },
        "math_constant" => Value::Constant(match field_str(json, "CONSTANT", path)? {
            "PI" => MathConstant::Pi,
            "E" => MathConstant::E,
            "GOLDEN_RATIO" => MathConstant::GoldenRatio,
            "SQRT2" => MathConstant::Sqrt2,
            "SQRT1_2" => MathConstant::SqrtHalf,
            "INFINITY" => MathConstant::Infinity,
            other => {
                return Err(CompileError::load(format!("unknown constant \"{}\"", other))
                    .with_location(path.to_string()));
            }
        }),
        "math_modulo" => Value::Modulo {
            dividend: socket(json, "dividend", path)?,
            divisor: socket(json, "divisor", path)?,
        },
        "math_random_int" => Value::RandomInt {
            from: socket(json, "from", path)?,
            to: socket(json, "to", path)?,
        },
        "logic_boolean" => Value::Boolean(field_str_or(json, "BOOL", "FALSE") == "TRUE"),
        "logic_null" => Value::Null,
        "logic_compare" => Value::Compare {
            op: match field_str(json, "OP", path)? {
                "EQ" => CompareOp::Eq,
                "NEQ" => CompareOp::Neq,
                "LT" => CompareOp::Lt,
                "LTE" => CompareOp::Lte,
                "GT" => CompareOp::Gt,
                "GTE" => CompareOp::Gte,
                other => {
                    return Err(CompileError::load(format!("unknown comparison \"{}\"", other))
                        .with_location(path.to_string()));
                }
            },
            a: socket(json, "a", path)?,
            b: socket(json, "b", path)?,
        },
        "logic_operation" => Value::Operation {
            op: if field_str_or(json, "OP", "AND") == "AND" {
                LogicOp::And
            } else {
                LogicOp::Or
            },
            a: socket(json, "a", path)?,
            b: socket(json, "b", path)?,
        },
        "logic_negate" => Value::Negate {
            value: socket(json, "value", path)?,
        },
        "logic_ternary" => Value::Ternary {
            cond: socket(json, "if", path)?,
            then: socket(json, "then", path)?,
            otherwise: socket(json, "else", path)?,
        },
        "text" => Value::Text(field_str(json, "TEXT", path)?.to_string()),
        "text_join" => Value::TextJoin {
            items: socket_list(json, "items", path)?,
        },
        "text_length" => Value::TextLength {
            value: socket(json, "value", path)?,
        },
        "text_isEmpty" => Value::TextIsEmpty {
            value: socket(json, "value", path)?,
        },
        "text_indexOf" => Value::TextIndexOf {
            mode: find_mode(field_str_or(json, "END", "FIRST"), path)?,
            find: socket(json, "find", path)?,
            value: socket(json, "value", path)?,
        },
        "text_charAt" => Value::TextCharAt {
            anchor: anchor(field_str_or(json, "WHERE", "FROM_START"), path)?,
            at: socket(json, "at", path)?,
            value: socket(json, "value", path)?,
        },
        "text_getSubstring" => Value::TextSubstring {
            from: bound(field_str_or(json, "WHERE1", "FROM_START"), path)?,
            at1: socket(json, "at1", path)?,
            to: bound(field_str_or(json, "WHERE2", "FROM_START"), path)?,
            at2: socket(json, "at2", path)?,
            value: socket(json, "value", path)?,
        },
        "text_changeCase" => Value::TextChangeCase {
            mode: match field_str(json, "CASE", path)? {
                "UPPERCASE" => CaseMode::Upper,
                "LOWERCASE" => CaseMode::Lower,
                "TITLECASE" => CaseMode::Title,
                other => {
                    return Err(CompileError::load(format!("unknown case mode \"{}\"", other))
                        .with_location(path.to_string()));
                }
            },
            value: socket(json, "value", path)?,
        },
        "text_trim" => Value::TextTrim {
            mode: match field_str_or(json, "MODE", "BOTH") {
                "LEFT" => TrimMode::Left,
                "RIGHT" => TrimMode::Right,
                "BOTH" => TrimMode::Both,
                other => {
                    return Err(CompileError::load(format!("unknown trim mode \"{}\"", other))
                        .with_location(path.to_string()));
                }
            },
            value: socket(json, "value", path)?,
        },
        "text_prompt" => Value::TextPrompt,
        "lists_create_empty" => Value::ListEmpty,
        "lists_create_with" => Value::ListCreate {
            items: socket_list(json, "items", path)?,
        },
        "lists_repeat" => Value::ListRepeat {
            item: socket(json, "item", path)?,
            times: socket(json, "times", path)?,
        },
        "lists_length" => Value::ListLength {
            list: socket(json, "list", path)?,
        },
        "lists_isEmpty" => Value::ListIsEmpty {
            list: socket(json, "list", path)?,
        },
        "lists_indexOf" => Value::ListIndexOf {
            mode: find_mode(field_str_or(json, "END", "FIRST"), path)?,
            find: socket(json, "find", path)?,
            list: socket(json, "list", path)?,
        },
        "lists_getIndex" => Value::ListGet {
            mode: match field_str_or(json, "MODE", "GET") {
                "GET" => GetMode::Get,
                "GET_REMOVE" => GetMode::GetRemove,
                other => {
                    return Err(CompileError::load(format!(
                        "list access mode \"{}\" is not a value",
                        other
                    ))
                    .with_location(path.to_string()));
                }
            },
            anchor: anchor(field_str_or(json, "WHERE", "FROM_START"), path)?,
            at: socket(json, "at", path)?,
            list: socket(json, "list", path)?,
        },
        "lists_getSublist" => Value::ListSublist {
            from: bound(field_str_or(json, "WHERE1", "FROM_START"), path)?,
            at1: socket(json, "at1", path)?,
            to: bound(field_str_or(json, "WHERE2", "FROM_START"), path)?,
            at2: socket(json, "at2", path)?,
            list: socket(json, "list", path)?,
        },
        "lists_sort" => Value::ListSort {
            kind: match field_str_or(json, "TYPE", "TEXT") {
                "NUMERIC" => SortKind::Numeric,
                "IGNORE_CASE" => SortKind::IgnoreCase,
                _ => SortKind::Alphabetic,
            },
            ascending: field_str_or(json, "DIRECTION", "1") == "1",
            list: socket(json, "list", path)?,
        },
        "lists_split" => Value::ListSplit {
            join: field_str_or(json, "MODE", "SPLIT") == "JOIN",
            input: socket(json, "input", path)?,
            delim: socket(json, "delim", path)?,
        },
        "variables_get" => Value::Variable(field_str(json, "VAR", path)?.to_string()),
        "procedures_callreturn" => Value::CallReturn {
            name: field_str(json, "NAME", path)?.to_string(),
            args: socket_list(json, "args", path)?,
        },
        other => {
            return Err(
                CompileError::unknown_construct(other, suggest_type(other))
                    .with_location(path.to_string()),
            );
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parses_a_minimal_program() {
        let src = r#"[
            {"type": "variables_set", "fields": {"VAR": "x"},
             "inputs": {"value": {"type": "math_number", "fields": {"NUM": 3}}}}
        ]"#;
        let program = parse_program(src).unwrap();
        assert_eq!(program.len(), 1);
        match &program[0].kind {
            StmtKind::SetVariable { var, value } => {
                assert_eq!(var, "x");
                assert_eq!(**value.as_ref().unwrap(), Value::Number(3.0));
            }
            other => panic!("unexpected statement: {:?}", other),
        }
    }

    #[test]
    fn unplugged_socket_is_none() {
        let src = r#"[
            {"type": "text_print", "inputs": {"value": null}}
        ]"#;
        let program = parse_program(src).unwrap();
        match &program[0].kind {
            StmtKind::Print { value } => assert!(value.is_none()),
            other => panic!("unexpected statement: {:?}", other),
        }
    }

    #[test]
    fn unknown_type_suggests_a_close_name() {
        let src = r#"[{"type": "math_numbre", "fields": {"NUM": 1}}]"#;
        let err = parse_program(src).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownConstruct);
        assert!(err.message.contains("math_number"), "message: {}", err.message);
        assert!(err.location.is_some());
    }

    #[test]
    fn malformed_json_reports_load_error() {
        let err = parse_program("[{").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Load);
    }

    #[test]
    fn remove_mode_loads_as_statement() {
        let src = r#"[
            {"type": "lists_getIndex",
             "fields": {"MODE": "REMOVE", "WHERE": "FROM_START"},
             "inputs": {"at": {"type": "math_number", "fields": {"NUM": 1}},
                        "list": {"type": "variables_get", "fields": {"VAR": "items"}}}}
        ]"#;
        let program = parse_program(src).unwrap();
        assert!(matches!(program[0].kind, StmtKind::ListRemoveAt { .. }));
    }

    #[test]
    fn comment_is_preserved() {
        let src = r#"[{"type": "text_print", "comment": "say hello"}]"#;
        let program = parse_program(src).unwrap();
        assert_eq!(program[0].comment.as_deref(), Some("say hello"));
    }
}
