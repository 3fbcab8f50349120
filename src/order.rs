//! Operator precedence ranks for the generated shell expressions.
//!
//! A rank is the binding strength of an expression's outermost operator;
//! lower binds tighter. Parent generators compare a child's rank against the
//! rank their position demands to decide whether the child needs parentheses.
//! Fractional sub-ranks break ties inside a band (member access vs call,
//! multiplication vs division) without changing the band's relative position.

use crate::error::CompileError;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rank(f64);

impl Rank {
    pub const ATOMIC: Rank = Rank(0.0);
    pub const MEMBER: Rank = Rank(2.1);
    pub const FUNCTION_CALL: Rank = Rank(2.2);
    pub const POWER: Rank = Rank(3.0);
    pub const BITWISE_NOT: Rank = Rank(4.0);
    pub const LOGICAL_NOT: Rank = Rank(6.0);
    pub const UNARY_PLUS: Rank = Rank(7.1);
    pub const UNARY_NEGATION: Rank = Rank(7.2);
    pub const MULTIPLICATION: Rank = Rank(8.1);
    pub const DIVISION: Rank = Rank(8.2);
    pub const MODULUS: Rank = Rank(8.3);
    pub const ADDITION: Rank = Rank(9.1);
    pub const SUBTRACTION: Rank = Rank(9.2);
    pub const CONCAT: Rank = Rank(9.3);
    pub const SHIFT: Rank = Rank(10.0);
    pub const RELATIONAL: Rank = Rank(11.0);
    pub const EQUALITY: Rank = Rank(12.0);
    pub const BITWISE_AND: Rank = Rank(13.0);
    pub const BITWISE_XOR: Rank = Rank(14.0);
    pub const BITWISE_OR: Rank = Rank(15.0);
    pub const LOGICAL_AND: Rank = Rank(16.0);
    pub const LOGICAL_OR: Rank = Rank(17.0);
    pub const IF_NULL: Rank = Rank(18.0);
    pub const CONDITIONAL: Rank = Rank(19.0);
    pub const ASSIGNMENT: Rank = Rank(20.0);
    pub const WEAK_LOGICAL_AND: Rank = Rank(21.0);
    pub const WEAK_LOGICAL_XOR: Rank = Rank(22.0);
    pub const WEAK_LOGICAL_OR: Rank = Rank(23.0);
    pub const COMMA: Rank = Rank(24.0);
    /// Sentinel for positions that impose no grouping of their own.
    pub const NONE: Rank = Rank(99.0);

    /// Validate a raw rank value coming from outside the constant table.
    pub fn new(value: f64) -> Result<Rank, CompileError> {
        if value.is_finite() {
            Ok(Rank(value))
        } else {
            Err(CompileError::invalid_rank(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Outer/inner pairings that do NOT require parentheses even though the
/// plain rank comparison would add them. Membership is exact: the set is
/// neither reflexive nor transitive beyond what is listed.
const OVERRIDES: &[(Rank, Rank)] = &[
    // $( foo )[0] stays unwrapped under member access
    (Rank::MEMBER, Rank::FUNCTION_CALL),
    // a[0][1] chains
    (Rank::MEMBER, Rank::MEMBER),
    // !!a
    (Rank::LOGICAL_NOT, Rank::LOGICAL_NOT),
    // a * b * c
    (Rank::MULTIPLICATION, Rank::MULTIPLICATION),
    // a + b + c
    (Rank::ADDITION, Rank::ADDITION),
    // a && b && c
    (Rank::LOGICAL_AND, Rank::LOGICAL_AND),
    // a || b || c
    (Rank::LOGICAL_OR, Rank::LOGICAL_OR),
];

/// True when `inner` may sit directly under `outer` without parentheses
/// despite binding more loosely.
pub fn is_overridden(outer: Rank, inner: Rank) -> bool {
    OVERRIDES.iter().any(|&(o, i)| o == outer && i == inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn ranks_are_ordered_tighter_to_looser() {
        assert!(Rank::ATOMIC < Rank::MEMBER);
        assert!(Rank::MEMBER < Rank::FUNCTION_CALL);
        assert!(Rank::MULTIPLICATION < Rank::ADDITION);
        assert!(Rank::ADDITION < Rank::SUBTRACTION);
        assert!(Rank::LOGICAL_AND < Rank::LOGICAL_OR);
        assert!(Rank::COMMA < Rank::NONE);
    }

    #[test]
    fn override_set_is_exact_membership() {
        assert!(is_overridden(Rank::ADDITION, Rank::ADDITION));
        assert!(is_overridden(Rank::MEMBER, Rank::FUNCTION_CALL));
        // not symmetric
        assert!(!is_overridden(Rank::FUNCTION_CALL, Rank::MEMBER));
        // not declared
        assert!(!is_overridden(Rank::MULTIPLICATION, Rank::ADDITION));
        assert!(!is_overridden(Rank::SUBTRACTION, Rank::SUBTRACTION));
    }

    #[test]
    fn rank_new_accepts_finite_values() {
        assert_eq!(Rank::new(9.1).unwrap(), Rank::ADDITION);
    }

    #[test]
    fn rank_new_rejects_non_finite_values() {
        let err = Rank::new(f64::NAN).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRank);
        let err = Rank::new(f64::INFINITY).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRank);
    }
}
