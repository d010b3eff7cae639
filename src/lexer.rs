//! Tokenizer for shell script source text.
//!
//! The lexer is total: every input character is consumed into some
//! token and no input can make it fail. Malformed constructs degrade
//! into more, smaller, lower-confidence tokens (worst case a run of
//! single-character identifiers), which degrades parser accuracy but
//! never lexer correctness.

use crate::token::{Keyword, Span, Token, TokenKind};

/// Hyphen-prefixed comparison operators, lowercased.
const COMPARISON_OPERATORS: &[&str] = &[
    "-eq",
    "-ne",
    "-lt",
    "-le",
    "-gt",
    "-ge",
    "-like",
    "-notlike",
    "-match",
    "-notmatch",
    "-contains",
    "-notcontains",
    "-in",
    "-notin",
    "-is",
    "-isnot",
    "-as",
];

/// Hyphen-prefixed logical and bitwise operators, lowercased.
const LOGICAL_OPERATORS: &[&str] = &[
    "-and", "-or", "-not", "-xor", "-band", "-bor", "-bxor", "-bnot",
];

/// Type names recognized inside a bracketed type literal without a dot.
const KNOWN_TYPES: &[&str] = &[
    "int",
    "long",
    "string",
    "char",
    "bool",
    "byte",
    "double",
    "decimal",
    "float",
    "single",
    "array",
    "hashtable",
    "xml",
    "regex",
    "datetime",
    "timespan",
    "guid",
    "scriptblock",
    "math",
    "switch",
    "object",
    "psobject",
    "pscustomobject",
    "void",
    "uri",
    "version",
];

/// Size-unit suffixes accepted on numeric literals, lowercased.
const NUMBER_SUFFIXES: &[&str] = &["kb", "mb", "gb", "tb", "pb"];

/// Tokenize a source string into a flat token sequence.
///
/// The result always ends with a single `Eof` token. This function
/// never fails: unterminated strings, here-strings, and block
/// comments consume to end of input, and unrecognized characters
/// become `Unknown` tokens.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

struct Lexer<'a> {
    src: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

const fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Characters that may continue a bare word after a path separator,
/// so `C:\Temp\file.txt` and `http://host/x` lex as one token.
const fn is_path_char(b: u8) -> bool {
    is_ident_char(b) || matches!(b, b'\\' | b'/' | b'.' | b'~')
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        let bytes = input.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            src: input,
            input: bytes,
            pos: start,
            line: 1,
            col: 1,
        }
    }

    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while self.pos < self.input.len() {
            let ch = self.input[self.pos];

            match ch {
                b'\n' => {
                    tokens.push(self.single(TokenKind::Newline));
                }
                b'\r' => {
                    let mark = self.mark();
                    self.advance();
                    if self.peek() == Some(b'\n') {
                        self.advance();
                    }
                    tokens.push(self.token_at(mark, TokenKind::Newline, "\n".to_string()));
                }
                b' ' | b'\t' => {
                    self.advance();
                }
                b'#' => {
                    tokens.push(self.read_line_comment());
                }
                b'<' if self.peek_at(1) == Some(b'#') => {
                    tokens.push(self.read_block_comment());
                }
                b'"' | b'\'' => {
                    tokens.push(self.read_string(ch));
                }
                b'@' => {
                    tokens.push(self.read_at_sign());
                }
                b'$' => {
                    tokens.push(self.read_variable());
                }
                b'0'..=b'9' => {
                    tokens.push(self.read_number());
                }
                b'.' if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                    tokens.push(self.read_number());
                }
                b'.' | b'\\' if self.peek_at(1).is_some_and(|b| matches!(b, b'\\' | b'/' | b'.')) => {
                    // relative or UNC path: .\run.ps1, ..\lib, \\server\share
                    tokens.push(self.read_identifier());
                }
                b'\\' if self.peek_at(1).is_some_and(is_ident_char) => {
                    tokens.push(self.read_identifier());
                }
                b'[' => {
                    tokens.push(self.read_bracket());
                }
                b':' if self.peek_at(1) == Some(b':') => {
                    let mark = self.mark();
                    self.advance();
                    self.advance();
                    tokens.push(self.token_at(mark, TokenKind::DoubleColon, "::".to_string()));
                }
                b'-' => {
                    tokens.push(self.read_hyphen());
                }
                _ if is_ident_start(ch) => {
                    tokens.push(self.read_identifier());
                }
                _ => {
                    tokens.push(self.read_symbol());
                }
            }
        }

        let end = Span {
            line: self.line,
            column: self.col,
            start: self.pos,
            end: self.pos,
        };
        tokens.push(Token {
            kind: TokenKind::Eof,
            text: String::new(),
            span: end,
        });
        tokens
    }

    // -- cursor helpers --

    const fn mark(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.col)
    }

    fn token_at(&self, mark: (usize, usize, usize), kind: TokenKind, text: String) -> Token {
        let (start, line, column) = mark;
        Token {
            kind,
            text,
            span: Span {
                line,
                column,
                start,
                end: self.pos,
            },
        }
    }

    /// Emit the token covering everything from `mark` to the cursor,
    /// with the text taken verbatim from the source.
    fn slice_token(&self, mark: (usize, usize, usize), kind: TokenKind) -> Token {
        let text = self.src[mark.0..self.pos].to_string();
        self.token_at(mark, kind, text)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let mark = self.mark();
        let text = char::from(self.input[self.pos]).to_string();
        self.advance();
        self.token_at(mark, kind, text)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    // -- token readers --

    fn read_line_comment(&mut self) -> Token {
        let mark = self.mark();
        while self.pos < self.input.len() && self.input[self.pos] != b'\n' {
            self.advance();
        }
        self.slice_token(mark, TokenKind::Comment)
    }

    /// Block comment `<# ... #>`. An unterminated comment consumes to
    /// end of input rather than failing.
    fn read_block_comment(&mut self) -> Token {
        let mark = self.mark();
        self.advance(); // <
        self.advance(); // #
        while self.pos < self.input.len() {
            if self.input[self.pos] == b'#' && self.peek_at(1) == Some(b'>') {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
        self.slice_token(mark, TokenKind::BlockComment)
    }

    /// Quoted string. Inside double quotes a backtick escapes the next
    /// character; a doubled quote of either style is content. The raw
    /// lexeme, quotes included, becomes the token text so the
    /// generator can preserve or normalize the quoting style later.
    /// Unterminated strings consume to end of input.
    fn read_string(&mut self, quote: u8) -> Token {
        let mark = self.mark();
        self.advance(); // opening quote
        while self.pos < self.input.len() {
            let b = self.input[self.pos];
            if quote == b'"' && b == b'`' {
                self.advance();
                self.advance();
            } else if b == quote {
                if self.peek_at(1) == Some(quote) {
                    self.advance();
                    self.advance();
                } else {
                    self.advance();
                    break;
                }
            } else {
                self.advance();
            }
        }
        self.slice_token(mark, TokenKind::String)
    }

    /// `@"`, `@'`, or `@{`. A plain `@` that opens none of these
    /// becomes a one-character identifier (the parser recognizes
    /// `@` + `(` as an array literal).
    fn read_at_sign(&mut self) -> Token {
        match self.peek_at(1) {
            Some(q @ (b'"' | b'\'')) => self.read_here_string(q),
            Some(b'{') => {
                let mark = self.mark();
                self.advance();
                self.advance();
                self.token_at(mark, TokenKind::LeftBrace, "@{".to_string())
            }
            _ => {
                let mark = self.mark();
                self.advance();
                self.slice_token(mark, TokenKind::Identifier)
            }
        }
    }

    /// Here-string `@" ... "@` (or the single-quote form), closed by
    /// the matching quote immediately followed by `@` at line start.
    /// Unterminated here-strings consume to end of input.
    fn read_here_string(&mut self, quote: u8) -> Token {
        let mark = self.mark();
        self.advance(); // @
        self.advance(); // quote
        while self.pos < self.input.len() {
            if self.input[self.pos] == b'\n' {
                self.advance();
                if self.peek() == Some(quote) && self.peek_at(1) == Some(b'@') {
                    self.advance();
                    self.advance();
                    break;
                }
            } else {
                self.advance();
            }
        }
        self.slice_token(mark, TokenKind::HereString)
    }

    fn read_variable(&mut self) -> Token {
        let mark = self.mark();
        self.advance(); // $
        match self.peek() {
            Some(b'{') => {
                // ${name with spaces}
                self.advance();
                while self.pos < self.input.len() && self.input[self.pos] != b'}' {
                    self.advance();
                }
                if self.peek() == Some(b'}') {
                    self.advance();
                }
            }
            Some(b'$' | b'^' | b'?') => {
                self.advance();
            }
            Some(b) if is_ident_char(b) => {
                while let Some(b) = self.peek() {
                    if is_ident_char(b) {
                        self.advance();
                    } else if b == b':'
                        && self.peek_at(1) != Some(b':')
                        && self.peek_at(1).is_some_and(is_ident_char)
                    {
                        // scope qualifier: $env:PATH, $script:state
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            _ => {}
        }
        self.slice_token(mark, TokenKind::Variable)
    }

    fn read_number(&mut self) -> Token {
        let mark = self.mark();
        let mut seen_dot = false;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                self.advance();
            } else if b == b'.' && !seen_dot && self.peek_at(1).is_some_and(|b| b.is_ascii_digit())
            {
                seen_dot = true;
                self.advance();
            } else {
                break;
            }
        }
        // Greedy size-unit suffix: 10MB is one number token.
        if let (Some(a), Some(b)) = (self.peek(), self.peek_at(1)) {
            let suffix = [a.to_ascii_lowercase(), b.to_ascii_lowercase()];
            let boundary = self.peek_at(2).is_none_or(|b| !is_ident_char(b));
            if boundary
                && NUMBER_SUFFIXES
                    .iter()
                    .any(|s| s.as_bytes() == suffix.as_slice())
            {
                self.advance();
                self.advance();
            }
        }
        self.slice_token(mark, TokenKind::Number)
    }

    /// `[` either opens a type literal (`[int]`, `[System.IO.Path]`)
    /// emitted as one identifier token, or is a plain bracket.
    fn read_bracket(&mut self) -> Token {
        let mut j = self.pos + 1;
        while j < self.input.len() && (is_ident_char(self.input[j]) || self.input[j] == b'.') {
            j += 1;
        }
        let is_type = j > self.pos + 1 && self.input.get(j) == Some(&b']') && {
            let name = &self.src[self.pos + 1..j];
            name.contains('.') || KNOWN_TYPES.contains(&name.to_ascii_lowercase().as_str())
        };
        if is_type {
            let mark = self.mark();
            while self.pos <= j {
                self.advance();
            }
            self.slice_token(mark, TokenKind::Identifier)
        } else {
            self.single(TokenKind::LeftBracket)
        }
    }

    /// `-` starts a two-character assignment (`-=`), a textual
    /// operator (`-eq`, `-and`, ...), a flag (`-Name`), or plain
    /// subtraction.
    fn read_hyphen(&mut self) -> Token {
        if self.peek_at(1) == Some(b'=') {
            let mark = self.mark();
            self.advance();
            self.advance();
            return self.token_at(mark, TokenKind::Assignment, "-=".to_string());
        }
        if !self.peek_at(1).is_some_and(is_ident_start) {
            return self.single(TokenKind::Arithmetic);
        }

        // Consume the whole identifier/hyphen run, then classify. The
        // run itself is the trailing-boundary check: "-eqx" can never
        // partially match "-eq".
        let mark = self.mark();
        self.advance(); // -
        while let Some(b) = self.peek() {
            if is_ident_char(b) || b == b'-' {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.src[mark.0..self.pos];
        let lower = text.to_ascii_lowercase();
        let kind = if COMPARISON_OPERATORS.contains(&lower.as_str()) {
            TokenKind::Comparison
        } else if LOGICAL_OPERATORS.contains(&lower.as_str()) {
            TokenKind::Logical
        } else {
            TokenKind::Parameter
        };
        self.slice_token(mark, kind)
    }

    /// Identifier run. An internal hyphen stays part of the run only
    /// when followed by an identifier-start that does not itself begin
    /// a recognized operator, which is what lets multi-hyphen
    /// verb-noun command names lex as one token.
    fn read_identifier(&mut self) -> Token {
        let mark = self.mark();
        while let Some(b) = self.peek() {
            if is_ident_char(b) {
                self.advance();
            } else if b == b'-'
                && self.peek_at(1).is_some_and(is_ident_start)
                && !self.hyphen_starts_operator()
            {
                self.advance();
            } else if matches!(b, b':' | b'\\' | b'/' | b'.')
                && self.peek_at(1).is_some_and(is_path_char)
            {
                // bare words swallow path separators: C:\Temp\x.txt
                self.advance();
            } else if b == b'.' && self.pos > mark.0 && self.input[self.pos - 1] == b'.' {
                // a dot extends a dot run even at end of input: ".."
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.src[mark.0..self.pos];
        let kind = Keyword::from_text(&text.to_ascii_lowercase()).map_or_else(
            || {
                if is_cmdlet_shaped(text) {
                    TokenKind::Cmdlet
                } else {
                    TokenKind::Identifier
                }
            },
            TokenKind::Keyword,
        );
        self.slice_token(mark, kind)
    }

    /// True when the hyphen at the cursor begins a recognized operator
    /// with a proper trailing boundary.
    fn hyphen_starts_operator(&self) -> bool {
        let mut j = self.pos + 1;
        while j < self.input.len() && is_ident_char(self.input[j]) {
            j += 1;
        }
        if self.input.get(j) == Some(&b'-') {
            return false;
        }
        let word = self.src[self.pos..j].to_ascii_lowercase();
        COMPARISON_OPERATORS.contains(&word.as_str()) || LOGICAL_OPERATORS.contains(&word.as_str())
    }

    /// Structural punctuation, operator symbols (two-character forms
    /// before one-character forms), and the `Unknown` fallback for
    /// anything else.
    fn read_symbol(&mut self) -> Token {
        let ch = self.input[self.pos];
        let next = self.peek_at(1);

        let two: Option<(TokenKind, &str)> = match (ch, next) {
            (b'=', Some(b'=')) => Some((TokenKind::Comparison, "==")),
            (b'!', Some(b'=')) => Some((TokenKind::Comparison, "!=")),
            (b'+', Some(b'=')) => Some((TokenKind::Assignment, "+=")),
            (b'*', Some(b'=')) => Some((TokenKind::Assignment, "*=")),
            (b'/', Some(b'=')) => Some((TokenKind::Assignment, "/=")),
            (b'%', Some(b'=')) => Some((TokenKind::Assignment, "%=")),
            _ => None,
        };
        if let Some((kind, text)) = two {
            let mark = self.mark();
            self.advance();
            self.advance();
            return self.token_at(mark, kind, text.to_string());
        }

        match ch {
            b'(' => self.single(TokenKind::LeftParen),
            b')' => self.single(TokenKind::RightParen),
            b'{' => self.single(TokenKind::LeftBrace),
            b'}' => self.single(TokenKind::RightBrace),
            b']' => self.single(TokenKind::RightBracket),
            b'|' => self.single(TokenKind::Pipe),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'.' => self.single(TokenKind::Dot),
            b'=' => self.single(TokenKind::Assignment),
            b'+' | b'*' | b'/' | b'%' => self.single(TokenKind::Arithmetic),
            b'!' => self.single(TokenKind::Logical),
            _ => self.read_fallback_char(),
        }
    }

    /// Any other character becomes a one-character `Unknown` token,
    /// multi-byte UTF-8 sequences included. The parser degrades these
    /// to bare literals, so nothing is ever dropped.
    fn read_fallback_char(&mut self) -> Token {
        let mark = self.mark();
        self.advance();
        while self.pos < self.input.len() && self.input[self.pos] & 0xC0 == 0x80 {
            self.advance();
        }
        self.slice_token(mark, TokenKind::Unknown)
    }
}

/// `^[A-Za-z]+(-[A-Za-z]+)+$`: the verb-noun command-name shape.
fn is_cmdlet_shaped(text: &str) -> bool {
    let mut segments = 0usize;
    for segment in text.split('-') {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_alphabetic()) {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn simple_assignment() {
        let tokens = tokenize("$x = 1");
        assert_eq!(tokens[0].kind, TokenKind::Variable);
        assert_eq!(tokens[0].text, "$x");
        assert_eq!(tokens[1].kind, TokenKind::Assignment);
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn cmdlet_name_is_one_token() {
        let tokens = tokenize("Get-ChildItem");
        assert_eq!(tokens[0].kind, TokenKind::Cmdlet);
        assert_eq!(tokens[0].text, "Get-ChildItem");
    }

    #[test]
    fn multi_hyphen_cmdlet() {
        let tokens = tokenize("Get-Item-Property");
        assert_eq!(tokens[0].kind, TokenKind::Cmdlet);
        assert_eq!(tokens[0].text, "Get-Item-Property");
    }

    #[test]
    fn comparison_operator_case_insensitive() {
        let tokens = tokenize("$a -EQ $b");
        assert_eq!(tokens[1].kind, TokenKind::Comparison);
        assert_eq!(tokens[1].text, "-EQ");
    }

    #[test]
    fn operator_needs_trailing_boundary() {
        // -eqx is a flag, not a mangled -eq.
        let tokens = tokenize("-eqx");
        assert_eq!(tokens[0].kind, TokenKind::Parameter);
        assert_eq!(tokens[0].text, "-eqx");
    }

    #[test]
    fn flag_parameter() {
        let tokens = tokenize("Get-ChildItem -Recurse -Path foo");
        assert_eq!(tokens[1].kind, TokenKind::Parameter);
        assert_eq!(tokens[1].text, "-Recurse");
        assert_eq!(tokens[2].kind, TokenKind::Parameter);
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
    }

    #[test]
    fn hashtable_open_is_one_token() {
        let tokens = tokenize("@{a = 1}");
        assert_eq!(tokens[0].kind, TokenKind::LeftBrace);
        assert_eq!(tokens[0].text, "@{");
    }

    #[test]
    fn block_brace_text() {
        let tokens = tokenize("{ $x }");
        assert_eq!(tokens[0].kind, TokenKind::LeftBrace);
        assert_eq!(tokens[0].text, "{");
    }

    #[test]
    fn variable_forms() {
        assert_eq!(tokenize("$_")[0].text, "$_");
        assert_eq!(tokenize("${a b}")[0].text, "${a b}");
        assert_eq!(tokenize("$env:PATH")[0].text, "$env:PATH");
        assert_eq!(tokenize("$?")[0].text, "$?");
    }

    #[test]
    fn number_with_unit_suffix() {
        let tokens = tokenize("10MB");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "10MB");
        let tokens = tokenize("2.5gb");
        assert_eq!(tokens[0].text, "2.5gb");
    }

    #[test]
    fn leading_dot_number() {
        let tokens = tokenize(".5");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, ".5");
    }

    #[test]
    fn type_literal() {
        let tokens = tokenize("[int]$x");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "[int]");
        assert_eq!(tokens[1].kind, TokenKind::Variable);
    }

    #[test]
    fn dotted_type_literal() {
        let tokens = tokenize("[System.IO.Path]::GetTempPath()");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "[System.IO.Path]");
        assert_eq!(tokens[1].kind, TokenKind::DoubleColon);
    }

    #[test]
    fn indexing_brackets_stay_plain() {
        let tokens = tokenize("$a[0]");
        assert_eq!(tokens[1].kind, TokenKind::LeftBracket);
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[3].kind, TokenKind::RightBracket);
    }

    #[test]
    fn double_quoted_string_with_backtick_escape() {
        let tokens = tokenize("\"a`\"b\"");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "\"a`\"b\"");
    }

    #[test]
    fn single_quoted_string_with_doubled_quote() {
        let tokens = tokenize("'it''s'");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "'it''s'");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn unterminated_string_consumes_to_eof() {
        let tokens = tokenize("'never closed");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "'never closed");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn here_string() {
        let input = "@\"\nline one\nline two\n\"@";
        let tokens = tokenize(input);
        assert_eq!(tokens[0].kind, TokenKind::HereString);
        assert_eq!(tokens[0].text, input);
    }

    #[test]
    fn line_comment() {
        let tokens = tokenize("# hello\n$x");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "# hello");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
    }

    #[test]
    fn block_comment() {
        let tokens = tokenize("<# multi\nline #>$x");
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[0].text, "<# multi\nline #>");
        assert_eq!(tokens[1].kind, TokenKind::Variable);
    }

    #[test]
    fn unterminated_block_comment_consumes_to_eof() {
        let tokens = tokenize("<# never closed\n$x = 1");
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[0].text, "<# never closed\n$x = 1");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn keywords_classified() {
        assert_eq!(
            kinds("if"),
            vec![TokenKind::Keyword(Keyword::If), TokenKind::Eof]
        );
        assert_eq!(
            kinds("ForEach"),
            vec![TokenKind::Keyword(Keyword::ForEach), TokenKind::Eof]
        );
    }

    #[test]
    fn two_char_operators_before_one_char() {
        let tokens = tokenize("$x += 1");
        assert_eq!(tokens[1].kind, TokenKind::Assignment);
        assert_eq!(tokens[1].text, "+=");
        let tokens = tokenize("$x == $y");
        assert_eq!(tokens[1].kind, TokenKind::Comparison);
    }

    #[test]
    fn bare_paths_lex_as_one_token() {
        assert_eq!(tokenize("C:\\Temp\\file.txt")[0].text, "C:\\Temp\\file.txt");
        assert_eq!(tokenize(".\\run.ps1")[0].text, ".\\run.ps1");
        assert_eq!(tokenize("..")[0].text, "..");
        let tokens = tokenize("http://host/a.b");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "http://host/a.b");
    }

    #[test]
    fn member_access_still_splits_on_dot() {
        let tokens = tokenize("$x.Name");
        assert_eq!(tokens[0].text, "$x");
        assert_eq!(tokens[1].kind, TokenKind::Dot);
        assert_eq!(tokens[2].text, "Name");
    }

    #[test]
    fn unrecognized_char_becomes_unknown() {
        let tokens = tokenize("~");
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].text, "~");
    }

    #[test]
    fn multibyte_fallback_is_one_token() {
        let tokens = tokenize("é");
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].text, "é");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn span_tracking() {
        let tokens = tokenize("$a\n$b");
        assert_eq!(tokens[0].span.line, 1);
        assert_eq!(tokens[0].span.column, 1);
        assert_eq!(tokens[0].span.start, 0);
        assert_eq!(tokens[0].span.end, 2);
        assert_eq!(tokens[2].span.line, 2);
        assert_eq!(tokens[2].span.column, 1);
        assert_eq!(tokens[2].span.start, 3);
    }

    #[test]
    fn crlf_collapses_to_newline_token() {
        let tokens = tokenize("$a\r\n$b");
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].text, "\n");
    }

    #[test]
    fn bom_stripping() {
        let tokens = tokenize("\u{FEFF}$x");
        assert_eq!(tokens[0].text, "$x");
    }

    #[test]
    fn identifier_splits_before_operator_hyphen() {
        // "Get-eq" must not swallow the operator; the run stops at
        // the hyphen that begins "-eq".
        let tokens = tokenize("Get-eq");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "Get");
        assert_eq!(tokens[1].kind, TokenKind::Comparison);
    }
}
