/// Source location for error reporting and verbatim slicing.
///
/// `start`/`end` are byte offsets into the original source and are
/// authoritative: the parser slices script-block expressions out of the
/// source text using them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub start: usize,
    pub end: usize,
}

/// Control-flow and declaration keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    ElseIf,
    Else,
    While,
    For,
    ForEach,
    Switch,
    Try,
    Catch,
    Finally,
    Function,
}

impl Keyword {
    /// Classify a lowercased identifier as a keyword, if it is one.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "if" => Some(Self::If),
            "elseif" => Some(Self::ElseIf),
            "else" => Some(Self::Else),
            "while" => Some(Self::While),
            "for" => Some(Self::For),
            "foreach" => Some(Self::ForEach),
            "switch" => Some(Self::Switch),
            "try" => Some(Self::Try),
            "catch" => Some(Self::Catch),
            "finally" => Some(Self::Finally),
            "function" => Some(Self::Function),
            _ => None,
        }
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Single- or double-quoted string, quotes included in the text.
    String,
    /// Here-string (`@" ... "@` or `@' ... '@`), delimiters included.
    HereString,
    /// Number, with an optional size-unit suffix (`10MB`).
    Number,
    /// Variable reference, sigil included (`$x`, `${a b}`, `$_`).
    Variable,
    /// Opening parenthesis `(`.
    LeftParen,
    /// Closing parenthesis `)`.
    RightParen,
    /// Opening brace. Text is `{` for blocks or `@{` for hashtables.
    LeftBrace,
    /// Closing brace `}`.
    RightBrace,
    /// Opening bracket `[` (when not part of a type literal).
    LeftBracket,
    /// Closing bracket `]`.
    RightBracket,
    /// Pipeline separator `|`.
    Pipe,
    /// Comma `,`.
    Comma,
    /// Semicolon `;`.
    Semicolon,
    /// Member access `.`.
    Dot,
    /// Static member access `::`.
    DoubleColon,
    /// Assignment operator (`=`, `+=`, `-=`, `*=`, `/=`, `%=`).
    Assignment,
    /// Comparison operator (`-eq`, `-like`, `==`, `!=`, ...).
    Comparison,
    /// Logical or bitwise operator (`-and`, `-not`, `-bor`, ...).
    Logical,
    /// Arithmetic operator (`+`, `-`, `*`, `/`, `%`).
    Arithmetic,
    /// Language keyword.
    Keyword(Keyword),
    /// Free-form identifier, including bracketed type literals.
    Identifier,
    /// Shell-command-shaped identifier (`Verb-Noun[-Noun]`).
    Cmdlet,
    /// Hyphen-prefixed flag that is not a known operator (`-Name`).
    Parameter,
    /// Single-line comment (`# ...`).
    Comment,
    /// Block comment (`<# ... #>`).
    BlockComment,
    /// Newline (line separator).
    Newline,
    /// End of input.
    Eof,
    /// Fallback for anything the lexer cannot classify.
    Unknown,
}

/// A single token with its kind, original text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// True for tokens that terminate a command's argument list.
    ///
    /// Commands take a variable number of flags and positional
    /// arguments, so the list ends at a structural boundary or an
    /// operator rather than at a fixed arity.
    #[must_use]
    pub const fn ends_command(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Pipe
                | TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::RightParen
                | TokenKind::RightBrace
                | TokenKind::RightBracket
                | TokenKind::Comma
                | TokenKind::Comment
                | TokenKind::BlockComment
                | TokenKind::Eof
                | TokenKind::Assignment
                | TokenKind::Comparison
                | TokenKind::Logical
                | TokenKind::Arithmetic
        )
    }
}
