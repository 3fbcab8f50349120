//! Variable get/set/change.

use crate::block::Socket;
use crate::codegen::Generator;
use crate::emit::Expression;
use crate::error::CompileError;
use crate::names::Realm;
use crate::order::Rank;

pub(crate) fn get(g: &mut Generator, var: &str) -> Expression {
    let name = g.names.get_name(var, Realm::Variable);
    Expression::atomic(format!("${{{}}}", name))
}

pub(crate) fn set(g: &mut Generator, var: &str, value: &Socket) -> Result<String, CompileError> {
    let value = g.value_to_code(value, Rank::ASSIGNMENT, "0")?;
    let name = g.names.get_name(var, Realm::Variable);
    Ok(format!("{}={}\n", name, value))
}

pub(crate) fn change(g: &mut Generator, var: &str, delta: &Socket) -> Result<String, CompileError> {
    let delta = g.value_to_code(delta, Rank::ADDITION, "0")?;
    let name = g.names.get_name(var, Realm::Variable);
    Ok(format!("{0}=$(( {0} + {1} ))\n", name, delta))
}
