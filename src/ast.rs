//! Typed syntax tree for shell scripts.
//!
//! The node set is closed and discriminated by enum variant, so the
//! generator's dispatch is an exhaustive match and the compiler flags
//! any missing case when a node kind is added. Composite nodes own
//! their children; the tree is acyclic with exactly one owner per
//! child. Every node carries the `Span` of the source it came from.

use crate::token::Span;

/// Root node: an ordered list of statements.
///
/// Also used for every braced body (function, if, loop, switch
/// clause, try/catch/finally); the span then covers the braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// A top-level or block-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Pipeline(Pipeline),
    FunctionDef(FunctionDef),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    ForEach(ForEachStatement),
    Switch(SwitchStatement),
    Try(TryStatement),
    /// Parse-failure fallback carrying the original source verbatim.
    RawText(RawText),
}

impl Statement {
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::Pipeline(s) => &s.span,
            Self::FunctionDef(s) => &s.span,
            Self::If(s) => &s.span,
            Self::While(s) => &s.span,
            Self::For(s) => &s.span,
            Self::ForEach(s) => &s.span,
            Self::Switch(s) => &s.span,
            Self::Try(s) => &s.span,
            Self::RawText(s) => &s.span,
        }
    }
}

/// A chain of expressions connected by `|`. A single expression is a
/// pipeline of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub elements: Vec<Expr>,
    pub span: Span,
}

/// Expression forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Command(Command),
    Assignment(Assignment),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Paren(ParenExpr),
    Variable(Variable),
    Literal(Literal),
    Array(ArrayLiteral),
    Hashtable(Hashtable),
    /// Brace-delimited literal kept as an opaque, verbatim-preserved
    /// source fragment rather than being structurally parsed.
    ScriptBlockExpr(ScriptBlockExpr),
}

impl Expr {
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::Command(e) => &e.span,
            Self::Assignment(e) => &e.span,
            Self::Binary(e) => &e.span,
            Self::Unary(e) => &e.span,
            Self::Paren(e) => &e.span,
            Self::Variable(e) => &e.span,
            Self::Literal(e) => &e.span,
            Self::Array(e) => &e.span,
            Self::Hashtable(e) => &e.span,
            Self::ScriptBlockExpr(e) => &e.span,
        }
    }
}

/// Command invocation: name, named parameters, positional arguments.
/// Order within each list is preserved exactly as parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub parameters: Vec<CommandParameter>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// A named parameter (`-Path value` or a bare switch `-Recurse`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParameter {
    pub name: String,
    pub value: Option<Expr>,
}

/// Right-associative assignment. The operator text is preserved as
/// written (`=`, `+=`, `-=`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: Box<Expr>,
    pub operator: String,
    pub value: Box<Expr>,
    pub span: Span,
}

/// Binary expression. The operator text is preserved as written so
/// the generator decides whether to normalize casing (`-EQ` vs
/// `-eq`). Member access (`.`, `::`) and indexing (`[`) are binary
/// nodes with those operator strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpr {
    pub operator: String,
    pub operand: Box<Expr>,
    pub span: Span,
}

/// Parenthesized group. The inner node is a pipeline so that piped
/// sub-expressions like `(Get-Process | Sort-Object)` parse without a
/// dedicated node; a plain `(1 + 2)` is a pipeline of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenExpr {
    pub inner: Pipeline,
    pub span: Span,
}

/// Variable reference, sigil included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub text: String,
    pub span: Span,
}

/// What kind of literal a leaf holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// Quoted string; the text keeps its original quotes.
    String,
    /// Here-string; always emitted verbatim.
    HereString,
    Number,
    /// Bare word treated as a string (identifiers, type literals,
    /// unrecognized primaries).
    Bare,
}

/// Leaf literal carrying its raw lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub text: String,
    pub kind: LiteralKind,
    pub span: Span,
}

/// Array literal `@( ... )`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayLiteral {
    pub elements: Vec<Expr>,
    pub span: Span,
}

/// Hashtable literal `@{ key = value; ... }`, entries ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hashtable {
    pub entries: Vec<HashtableEntry>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtableEntry {
    pub key: String,
    pub value: Expr,
}

/// Verbatim source slice of a brace-delimited script block, braces
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlockExpr {
    pub text: String,
    pub span: Span,
}

/// `function Name($a, $b) { ... }`. An empty parameter list renders
/// without parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: ScriptBlock,
    pub span: Span,
}

/// `if (cond) { } elseif (cond) { } else { }`. The condition is
/// optional only because a damaged source may omit it; formatting
/// still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatement {
    pub condition: Option<Expr>,
    pub body: ScriptBlock,
    pub elseif_clauses: Vec<ElseIfClause>,
    pub else_body: Option<ScriptBlock>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseIfClause {
    pub condition: Expr,
    pub body: ScriptBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: ScriptBlock,
    pub span: Span,
}

/// `for (init; cond; update) { ... }`; any clause may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForStatement {
    pub init: Option<Expr>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: ScriptBlock,
    pub span: Span,
}

/// `foreach ($item in $collection) { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForEachStatement {
    pub variable: Variable,
    pub iterable: Expr,
    pub body: ScriptBlock,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchStatement {
    pub subject: Expr,
    pub clauses: Vec<SwitchClause>,
    pub default: Option<ScriptBlock>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchClause {
    pub pattern: Expr,
    pub body: ScriptBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryStatement {
    pub body: ScriptBlock,
    pub catch_clauses: Vec<CatchClause>,
    pub finally_body: Option<ScriptBlock>,
    pub span: Span,
}

/// `catch [Type] { ... }`; the type filter keeps its brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchClause {
    pub type_filter: Option<String>,
    pub body: ScriptBlock,
}

/// A comment collected at a statement boundary. Comments live in a
/// side list rather than in the tree: their placement relative to
/// statements is a presentation concern the generator resolves by
/// source offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub multiline: bool,
    pub span: Span,
}

/// Original source preserved verbatim when parsing failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    pub text: String,
    pub span: Span,
}
