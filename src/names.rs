//! Identifier database for one generation pass.
//!
//! User-chosen block names (variables, procedures) arrive as arbitrary text
//! and must leave as shell-safe identifiers that collide neither with shell
//! words nor with each other. The database keeps the mapping stable within a
//! pass and is reset between passes.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Shell keywords, common builtins, and special parameters we refuse to
/// shadow. Not a security boundary, just collision avoidance.
static RESERVED: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "if", "then", "else", "elif", "fi", "case", "esac", "for", "select",
        "while", "until", "do", "done", "in", "function", "time", "coproc",
        "break", "continue", "return", "exit", "export", "readonly", "local",
        "declare", "typeset", "unset", "shift", "source", "alias", "eval",
        "exec", "set", "trap", "wait", "cd", "pwd", "echo", "printf", "read",
        "test", "true", "false", "let", "getopts", "umask", "kill", "jobs",
        "bg", "fg", "hash", "type", "ulimit", "command",
        "RANDOM", "REPLY", "IFS", "PATH", "HOME", "PWD", "OLDPWD", "SECONDS",
        "LINENO", "PPID", "UID", "EUID", "HOSTNAME", "OPTARG", "OPTIND",
    ]
    .into_iter()
    .collect()
});

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name)
}

/// Which kind of entity a name identifies. Variables and procedures live in
/// separate realms: a variable `total` and a procedure `total` may coexist
/// in the editor and must not be forced onto one shell identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Realm {
    Variable,
    Procedure,
}

#[derive(Debug, Default)]
pub struct NameDb {
    assigned: HashMap<(Realm, String), String>,
    used: HashSet<String>,
}

/// Strip everything a shell identifier cannot carry; prefix names that
/// would start with a digit.
fn safe_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        out.push_str("unnamed");
    }
    if out.as_bytes()[0].is_ascii_digit() {
        out.insert_str(0, "my_");
    }
    out
}

impl NameDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all assignments; called at the start of a generation pass.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.used.clear();
    }

    /// The shell identifier for `name` in `realm`. Stable: the same input
    /// maps to the same identifier for the rest of the pass.
    pub fn get_name(&mut self, name: &str, realm: Realm) -> String {
        let key = (realm, name.to_string());
        if let Some(existing) = self.assigned.get(&key) {
            return existing.clone();
        }
        let minted = self.mint(&safe_name(name));
        self.assigned.insert(key, minted.clone());
        minted
    }

    /// A fresh identifier near `name`, never handed out before in this
    /// pass. Used for loop counters, cached bounds, and helper functions.
    pub fn distinct_name(&mut self, name: &str) -> String {
        self.mint(&safe_name(name))
    }

    fn mint(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 2u32;
        while is_reserved(&candidate) || self.used.contains(&candidate) {
            candidate = format!("{}{}", base, n);
            n += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_sanitized() {
        let mut db = NameDb::new();
        assert_eq!(db.get_name("list size", Realm::Variable), "list_size");
        assert_eq!(db.get_name("2nd item", Realm::Variable), "my_2nd_item");
    }

    #[test]
    fn reserved_words_are_suffixed() {
        let mut db = NameDb::new();
        assert_eq!(db.get_name("done", Realm::Variable), "done2");
        assert_eq!(db.get_name("if", Realm::Variable), "if2");
    }

    #[test]
    fn mapping_is_stable_within_a_pass() {
        let mut db = NameDb::new();
        let first = db.get_name("total", Realm::Variable);
        assert_eq!(db.get_name("total", Realm::Variable), first);
    }

    #[test]
    fn realms_do_not_collide_silently() {
        let mut db = NameDb::new();
        let var = db.get_name("total", Realm::Variable);
        let proc = db.get_name("total", Realm::Procedure);
        assert_ne!(var, proc);
    }

    #[test]
    fn distinct_names_never_repeat() {
        let mut db = NameDb::new();
        let a = db.distinct_name("count");
        let b = db.distinct_name("count");
        assert_ne!(a, b);
    }

    #[test]
    fn reset_clears_assignments() {
        let mut db = NameDb::new();
        let a = db.distinct_name("count");
        db.reset();
        assert_eq!(db.distinct_name("count"), a);
    }
}
