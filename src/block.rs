//! The block-tree model handed to the generator.
//!
//! Two closed enums, one for value constructs and one for statement
//! constructs, so the per-construct dispatch is an exhaustive match instead
//! of a name-keyed table. A value socket is `Option<Box<Value>>`: `None`
//! means the socket was left unplugged in the editor and the generator
//! substitutes that construct's default literal.

pub type Socket = Option<Box<Value>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Minus,
    Multiply,
    Divide,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryMathOp {
    Neg,
    Abs,
    Root,
    Ln,
    Log10,
    Exp,
    Pow10,
    Round,
    RoundUp,
    RoundDown,
    Sin,
    Cos,
    Tan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathConstant {
    Pi,
    E,
    GoldenRatio,
    Sqrt2,
    SqrtHalf,
    Infinity,
}

/// Which occurrence an index-of search reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindMode {
    First,
    Last,
}

/// Where an element access anchors inside a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    First,
    Last,
    FromStart,
    FromEnd,
    Random,
}

/// Substring boundary anchors (no random endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    First,
    Last,
    FromStart,
    FromEnd,
}

/// Element access in value position: read, or read-and-remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetMode {
    Get,
    GetRemove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMode {
    Set,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Upper,
    Lower,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimMode {
    Left,
    Right,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Break,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Alphabetic,
    Numeric,
    IgnoreCase,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Boolean(bool),
    Null,
    Variable(String),
    Constant(MathConstant),
    Arithmetic { op: ArithOp, a: Socket, b: Socket },
    UnaryMath { op: UnaryMathOp, num: Socket },
    Modulo { dividend: Socket, divisor: Socket },
    RandomInt { from: Socket, to: Socket },
    Compare { op: CompareOp, a: Socket, b: Socket },
    Operation { op: LogicOp, a: Socket, b: Socket },
    Negate { value: Socket },
    Ternary { cond: Socket, then: Socket, otherwise: Socket },
    TextJoin { items: Vec<Socket> },
    TextLength { value: Socket },
    TextIsEmpty { value: Socket },
    TextIndexOf { mode: FindMode, find: Socket, value: Socket },
    TextCharAt { anchor: Anchor, at: Socket, value: Socket },
    TextSubstring {
        from: Bound,
        at1: Socket,
        to: Bound,
        at2: Socket,
        value: Socket,
    },
    TextChangeCase { mode: CaseMode, value: Socket },
    TextTrim { mode: TrimMode, value: Socket },
    TextPrompt,
    ListEmpty,
    ListCreate { items: Vec<Socket> },
    ListRepeat { item: Socket, times: Socket },
    ListLength { list: Socket },
    ListIsEmpty { list: Socket },
    ListIndexOf { mode: FindMode, find: Socket, list: Socket },
    ListGet { mode: GetMode, anchor: Anchor, at: Socket, list: Socket },
    ListSublist {
        from: Bound,
        at1: Socket,
        to: Bound,
        at2: Socket,
        list: Socket,
    },
    ListSort { kind: SortKind, ascending: bool, list: Socket },
    ListSplit { join: bool, input: Socket, delim: Socket },
    CallReturn { name: String, args: Vec<Socket> },
}

/// A statement block plus the comment its author attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub comment: Option<String>,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn plain(kind: StmtKind) -> Self {
        Self { comment: None, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    If {
        /// (condition, body) per if/elif arm, in order.
        branches: Vec<(Socket, Vec<Stmt>)>,
        else_body: Vec<Stmt>,
    },
    Repeat { times: Socket, body: Vec<Stmt> },
    While { until: bool, cond: Socket, body: Vec<Stmt> },
    ForRange {
        var: String,
        from: Socket,
        to: Socket,
        by: Socket,
        body: Vec<Stmt>,
    },
    ForEach { var: String, list: Socket, body: Vec<Stmt> },
    Flow(FlowKind),
    SetVariable { var: String, value: Socket },
    ChangeVariable { var: String, delta: Socket },
    TextAppend { var: String, value: Socket },
    Print { value: Socket },
    ListSet {
        mode: SetMode,
        anchor: Anchor,
        at: Socket,
        list: Socket,
        value: Socket,
    },
    ListRemoveAt { anchor: Anchor, at: Socket, list: Socket },
    ProcDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        ret: Socket,
    },
    ProcCall { name: String, args: Vec<Socket> },
    IfReturn { cond: Socket, value: Socket },
    /// A top-level value block not plugged into anything.
    Naked(Value),
}
