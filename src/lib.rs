//! PowerShell lexer, parser, and formatter.
//!
//! A typed AST for PowerShell scripts with tools to parse script text,
//! inspect or rewrite the tree, and format it back to canonical
//! syntax. Parsing is resilient: input that cannot be structured is
//! carried through formatting verbatim instead of being rejected.
//!
//! # Quick start
//!
//! ## Format a script
//!
//! ```
//! use pwshfmt::{FormatterOptions, safe_format};
//!
//! let script = "if($x -eq 1){  Write-Host \"hi\" }";
//! let formatted = safe_format(script, &FormatterOptions::default());
//! assert_eq!(formatted, "if ($x -eq 1) {\n    Write-Host \"hi\"\n}\n");
//! ```
//!
//! ## Parse, then format explicitly
//!
//! ```
//! use pwshfmt::{FormatterOptions, format, parse_str};
//!
//! let (script, comments) = parse_str("$x=1").unwrap();
//! let output = format(&script, &comments, &FormatterOptions::default());
//! assert_eq!(output, "$x = 1\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod formatter;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod rules;
pub mod token;

pub use ast::{
    ArrayLiteral, Assignment, BinaryExpr, CatchClause, Command, CommandParameter, Comment,
    ElseIfClause, Expr, ForEachStatement, ForStatement, FunctionDef, Hashtable, HashtableEntry,
    IfStatement, Literal, LiteralKind, ParenExpr, Pipeline, RawText, ScriptBlock, ScriptBlockExpr,
    Statement, SwitchClause, SwitchStatement, TryStatement, UnaryExpr, Variable, WhileStatement,
};
pub use formatter::generate;
pub use lexer::tokenize;
pub use options::{
    BraceStyle, Casing, ContainerStyle, FormatterOptions, IndentStyle, LineEnding, PipelineStyle,
    QuoteStyle,
};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use rules::FormatterRules;
pub use token::{Keyword, Span, Token, TokenKind};

/// Tokenize and parse a script source string in one step.
///
/// Fails only on structural errors (a missing closing delimiter);
/// anything else degrades to literal nodes inside the tree.
pub fn parse_str(input: &str) -> Result<(ScriptBlock, Vec<Comment>), ParseError> {
    let tokens = tokenize(input);
    parse(&tokens, input)
}

/// A parse result that always exists: either a structured tree or the
/// original text wrapped as a single raw statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedScript {
    pub ast: ScriptBlock,
    pub comments: Vec<Comment>,
    /// The unmodified input, kept for diffing and error reporting.
    pub original: String,
}

impl ParsedScript {
    /// Whether parsing fell back to carrying the input verbatim.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.ast.statements.as_slice(), [Statement::RawText(_)])
    }
}

/// Parse a script, falling back to a raw-text tree when the input has
/// a structural error. The result always formats back to something
/// containing the input's content.
#[must_use]
pub fn parse_source(input: &str) -> ParsedScript {
    match parse_str(input) {
        Ok((ast, comments)) => ParsedScript {
            ast,
            comments,
            original: input.to_string(),
        },
        Err(_) => {
            let span = Span {
                line: 1,
                column: 1,
                start: 0,
                end: input.len(),
            };
            ParsedScript {
                ast: ScriptBlock {
                    statements: vec![Statement::RawText(RawText {
                        text: input.to_string(),
                        span: span.clone(),
                    })],
                    span,
                },
                comments: Vec::new(),
                original: input.to_string(),
            }
        }
    }
}

/// Format a parsed script under the given options.
#[must_use]
pub fn format(script: &ScriptBlock, comments: &[Comment], options: &FormatterOptions) -> String {
    generate(script, comments, &FormatterRules::new(options))
}

/// Parse and format in one step, never failing and never returning
/// an empty string. Structurally broken input comes back verbatim
/// (modulo the trailing-newline policy) instead of being dropped.
#[must_use]
pub fn safe_format(input: &str, options: &FormatterOptions) -> String {
    let parsed = parse_source(input);
    let output = format(&parsed.ast, &parsed.comments, options);
    if output.is_empty() {
        // The never-empty guarantee outranks the newline option.
        FormatterRules::new(options).newline().to_string()
    } else {
        output
    }
}
