//! Recursive-descent parser over the token stream.
//!
//! The parser is soft-total at expression level: unrecognized primary
//! tokens are wrapped as bare string literals rather than rejected,
//! so only a missing required closing delimiter produces an error.
//! Comments are collected into a side list instead of the tree --
//! their placement relative to statements is a presentation concern
//! the generator resolves later by source offset.

use std::fmt;

use crate::ast::{
    ArrayLiteral, Assignment, BinaryExpr, CatchClause, Command, CommandParameter, Comment,
    ElseIfClause, Expr, ForEachStatement, ForStatement, FunctionDef, Hashtable, HashtableEntry,
    IfStatement, Literal, LiteralKind, ParenExpr, Pipeline, ScriptBlock, ScriptBlockExpr,
    Statement, SwitchClause, SwitchStatement, TryStatement, UnaryExpr, Variable, WhileStatement,
};
use crate::token::{Keyword, Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expected `{`, found something else or EOF.
    ExpectedOpenBrace { found: Option<String> },
    /// Expected `}`, found something else or EOF.
    ExpectedCloseBrace { found: Option<String> },
    /// Expected `(`, found something else or EOF.
    ExpectedOpenParen { found: Option<String> },
    /// Expected `)`, found something else or EOF.
    ExpectedCloseParen { found: Option<String> },
    /// Expected `]`, found something else or EOF.
    ExpectedCloseBracket { found: Option<String> },
}

impl ParseErrorKind {
    const fn expected(&self) -> char {
        match self {
            Self::ExpectedOpenBrace { .. } => '{',
            Self::ExpectedCloseBrace { .. } => '}',
            Self::ExpectedOpenParen { .. } => '(',
            Self::ExpectedCloseParen { .. } => ')',
            Self::ExpectedCloseBracket { .. } => ']',
        }
    }

    const fn found(&self) -> &Option<String> {
        match self {
            Self::ExpectedOpenBrace { found }
            | Self::ExpectedCloseBrace { found }
            | Self::ExpectedOpenParen { found }
            | Self::ExpectedCloseParen { found }
            | Self::ExpectedCloseBracket { found } => found,
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found() {
            None => write!(f, "expected '{}'", self.expected()),
            Some(t) => write!(f, "expected '{}', got '{t}'", self.expected()),
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Textual logical operators that bind at the or level.
const OR_LEVEL: &[&str] = &["-or", "-xor", "-bor", "-bxor"];
/// Textual logical operators that bind at the and level.
const AND_LEVEL: &[&str] = &["-and", "-band"];

/// Parse a token stream into a script block plus a side list of
/// comments.
///
/// `source` must be the string the tokens were produced from; it is
/// the authority for verbatim script-block slices.
///
/// # Errors
///
/// Returns `ParseError` when a required closing delimiter is missing.
/// Everything else degrades to bare string literals.
pub fn parse(tokens: &[Token], source: &str) -> Result<(ScriptBlock, Vec<Comment>), ParseError> {
    Parser::new(tokens, source).parse()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source: &'a str,
    comments: Vec<Comment>,
}

const fn span_join(a: &Span, b: &Span) -> Span {
    Span {
        line: a.line,
        column: a.column,
        start: a.start,
        end: b.end,
    }
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            comments: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<(ScriptBlock, Vec<Comment>), ParseError> {
        let mut statements = Vec::new();

        loop {
            self.skip_separators();
            if self.at_end() {
                break;
            }
            statements.push(self.parse_statement()?);
        }

        let span = Span {
            line: 1,
            column: 1,
            start: 0,
            end: self.source.len(),
        };
        Ok((ScriptBlock { statements, span }, self.comments))
    }

    // -- cursor helpers --

    fn current(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[idx]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.kind() == TokenKind::Eof
    }

    fn bump(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span.clone()
    }

    fn eof_span(&self) -> Span {
        self.tokens.last().map_or(
            Span {
                line: 1,
                column: 1,
                start: 0,
                end: 0,
            },
            |t| t.span.clone(),
        )
    }

    /// Skip statement separators, collecting comments into the side
    /// list.
    fn skip_separators(&mut self) {
        loop {
            match self.kind() {
                TokenKind::Newline | TokenKind::Semicolon => {
                    self.bump();
                }
                TokenKind::Comment | TokenKind::BlockComment => {
                    self.collect_comment();
                }
                _ => break,
            }
        }
    }

    fn skip_newlines_and_comments(&mut self) {
        loop {
            match self.kind() {
                TokenKind::Newline => {
                    self.bump();
                }
                TokenKind::Comment | TokenKind::BlockComment => {
                    self.collect_comment();
                }
                _ => break,
            }
        }
    }

    fn collect_comment(&mut self) {
        let multiline = self.kind() == TokenKind::BlockComment;
        let tok = self.bump();
        self.comments.push(Comment {
            text: tok.text,
            multiline,
            span: tok.span,
        });
    }

    /// If the next token past newlines and comments is one of the
    /// given keywords, consume the run (collecting the comments) and
    /// position the cursor on the keyword.
    fn keyword_after_newlines(&mut self, wanted: &[Keyword]) -> Option<Keyword> {
        let mut i = self.pos;
        while i < self.tokens.len()
            && matches!(
                self.tokens[i].kind,
                TokenKind::Newline | TokenKind::Comment | TokenKind::BlockComment
            )
        {
            i += 1;
        }
        if let TokenKind::Keyword(k) = self.tokens.get(i)?.kind {
            if wanted.contains(&k) {
                self.skip_newlines_and_comments();
                return Some(k);
            }
        }
        None
    }

    // -- expect helpers --

    fn expect(
        &mut self,
        kind: TokenKind,
        make: fn(Option<String>) -> ParseErrorKind,
    ) -> Result<Token, ParseError> {
        if self.at_end() {
            return Err(ParseError {
                kind: make(None),
                span: self.eof_span(),
            });
        }
        if self.kind() != kind {
            return Err(ParseError {
                kind: make(Some(self.current().text.clone())),
                span: self.current().span.clone(),
            });
        }
        Ok(self.bump())
    }

    fn expect_open_brace(&mut self) -> Result<Token, ParseError> {
        self.skip_newlines_and_comments();
        self.expect(TokenKind::LeftBrace, |found| {
            ParseErrorKind::ExpectedOpenBrace { found }
        })
    }

    fn expect_close_brace(&mut self) -> Result<Token, ParseError> {
        self.skip_newlines_and_comments();
        self.expect(TokenKind::RightBrace, |found| {
            ParseErrorKind::ExpectedCloseBrace { found }
        })
    }

    fn expect_open_paren(&mut self) -> Result<Token, ParseError> {
        self.skip_newlines_and_comments();
        self.expect(TokenKind::LeftParen, |found| {
            ParseErrorKind::ExpectedOpenParen { found }
        })
    }

    fn expect_close_paren(&mut self) -> Result<Token, ParseError> {
        self.skip_newlines_and_comments();
        self.expect(TokenKind::RightParen, |found| {
            ParseErrorKind::ExpectedCloseParen { found }
        })
    }

    fn expect_close_bracket(&mut self) -> Result<Token, ParseError> {
        self.skip_newlines_and_comments();
        self.expect(TokenKind::RightBracket, |found| {
            ParseErrorKind::ExpectedCloseBracket { found }
        })
    }

    // -- statements --

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.kind() {
            TokenKind::Keyword(Keyword::Function) => {
                self.parse_function_def().map(Statement::FunctionDef)
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if().map(Statement::If),
            TokenKind::Keyword(Keyword::While) => self.parse_while().map(Statement::While),
            TokenKind::Keyword(Keyword::For) => self.parse_for().map(Statement::For),
            TokenKind::Keyword(Keyword::ForEach) => self.parse_foreach().map(Statement::ForEach),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch().map(Statement::Switch),
            TokenKind::Keyword(Keyword::Try) => self.parse_try().map(Statement::Try),
            _ => self.parse_pipeline().map(Statement::Pipeline),
        }
    }

    fn parse_braced_block(&mut self) -> Result<ScriptBlock, ParseError> {
        let open = self.expect_open_brace()?;
        let mut statements = Vec::new();
        loop {
            self.skip_separators();
            if self.at_end() || self.kind() == TokenKind::RightBrace {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        let close = self.expect_close_brace()?;
        Ok(ScriptBlock {
            statements,
            span: span_join(&open.span, &close.span),
        })
    }

    fn parse_function_def(&mut self) -> Result<FunctionDef, ParseError> {
        let kw = self.bump();
        let name = if matches!(self.kind(), TokenKind::Identifier | TokenKind::Cmdlet) {
            self.bump().text
        } else {
            String::new()
        };

        let mut parameters = Vec::new();
        if self.kind() == TokenKind::LeftParen {
            self.bump();
            // A type annotation sticks to the variable that follows
            // it: ([int]$x) round-trips as one parameter entry.
            let mut type_prefix = String::new();
            loop {
                self.skip_newlines_and_comments();
                match self.kind() {
                    TokenKind::RightParen => {
                        self.bump();
                        break;
                    }
                    TokenKind::Eof => {
                        return Err(ParseError {
                            kind: ParseErrorKind::ExpectedCloseParen { found: None },
                            span: self.eof_span(),
                        });
                    }
                    TokenKind::Variable => {
                        let var = self.bump().text;
                        parameters.push(std::mem::take(&mut type_prefix) + &var);
                    }
                    TokenKind::Identifier if self.current().text.starts_with('[') => {
                        type_prefix = self.bump().text;
                    }
                    TokenKind::Comma => {
                        self.bump();
                    }
                    _ => {
                        self.bump();
                    }
                }
            }
        }

        let body = self.parse_braced_block()?;
        let span = span_join(&kw.span, &body.span);
        Ok(FunctionDef {
            name,
            parameters,
            body,
            span,
        })
    }

    fn parse_if(&mut self) -> Result<IfStatement, ParseError> {
        let kw = self.bump();
        let condition = if self.kind() == TokenKind::LeftParen {
            Some(self.parse_paren_group()?)
        } else {
            None
        };
        let body = self.parse_braced_block()?;

        let mut elseif_clauses = Vec::new();
        let mut else_body = None;
        while let Some(k) = self.keyword_after_newlines(&[Keyword::ElseIf, Keyword::Else]) {
            self.bump();
            if k == Keyword::ElseIf {
                let cond = self.parse_paren_group()?;
                let clause_body = self.parse_braced_block()?;
                elseif_clauses.push(ElseIfClause {
                    condition: cond,
                    body: clause_body,
                });
            } else {
                else_body = Some(self.parse_braced_block()?);
                break;
            }
        }

        let span = span_join(&kw.span, &self.prev_span());
        Ok(IfStatement {
            condition,
            body,
            elseif_clauses,
            else_body,
            span,
        })
    }

    fn parse_while(&mut self) -> Result<WhileStatement, ParseError> {
        let kw = self.bump();
        let condition = self.parse_paren_group()?;
        let body = self.parse_braced_block()?;
        let span = span_join(&kw.span, &body.span);
        Ok(WhileStatement {
            condition,
            body,
            span,
        })
    }

    fn parse_for(&mut self) -> Result<ForStatement, ParseError> {
        let kw = self.bump();
        self.expect_open_paren()?;

        let init = self.parse_for_clause(TokenKind::Semicolon)?;
        if self.kind() == TokenKind::Semicolon {
            self.bump();
        }
        let condition = self.parse_for_clause(TokenKind::Semicolon)?;
        if self.kind() == TokenKind::Semicolon {
            self.bump();
        }
        let update = self.parse_for_clause(TokenKind::RightParen)?;
        self.expect_close_paren()?;

        let body = self.parse_braced_block()?;
        let span = span_join(&kw.span, &body.span);
        Ok(ForStatement {
            init,
            condition,
            update,
            body,
            span,
        })
    }

    fn parse_for_clause(&mut self, stop: TokenKind) -> Result<Option<Expr>, ParseError> {
        self.skip_newlines_and_comments();
        if self.kind() == stop || self.kind() == TokenKind::RightParen || self.at_end() {
            return Ok(None);
        }
        Ok(Some(self.parse_assignment()?))
    }

    fn parse_foreach(&mut self) -> Result<ForEachStatement, ParseError> {
        let kw = self.bump();
        self.expect_open_paren()?;
        self.skip_newlines_and_comments();

        let var_tok = self.bump();
        let variable = Variable {
            text: var_tok.text,
            span: var_tok.span,
        };

        self.skip_newlines_and_comments();
        if self.kind() == TokenKind::Identifier && self.current().text.eq_ignore_ascii_case("in") {
            self.bump();
        }

        let iterable = self.parse_assignment()?;
        self.expect_close_paren()?;

        let body = self.parse_braced_block()?;
        let span = span_join(&kw.span, &body.span);
        Ok(ForEachStatement {
            variable,
            iterable,
            body,
            span,
        })
    }

    fn parse_switch(&mut self) -> Result<SwitchStatement, ParseError> {
        let kw = self.bump();
        let subject = self.parse_paren_group()?;
        self.expect_open_brace()?;

        let mut clauses = Vec::new();
        let mut default = None;
        loop {
            self.skip_separators();
            if self.at_end() || self.kind() == TokenKind::RightBrace {
                break;
            }
            if self.kind() == TokenKind::Identifier
                && self.current().text.eq_ignore_ascii_case("default")
            {
                self.bump();
                default = Some(self.parse_braced_block()?);
            } else {
                let pattern = self.parse_command_value()?;
                let body = self.parse_braced_block()?;
                clauses.push(SwitchClause { pattern, body });
            }
        }
        self.expect_close_brace()?;

        let span = span_join(&kw.span, &self.prev_span());
        Ok(SwitchStatement {
            subject,
            clauses,
            default,
            span,
        })
    }

    fn parse_try(&mut self) -> Result<TryStatement, ParseError> {
        let kw = self.bump();
        let body = self.parse_braced_block()?;

        let mut catch_clauses = Vec::new();
        let mut finally_body = None;
        while let Some(k) = self.keyword_after_newlines(&[Keyword::Catch, Keyword::Finally]) {
            self.bump();
            if k == Keyword::Catch {
                self.skip_newlines_and_comments();
                let type_filter = if self.kind() == TokenKind::Identifier
                    && self.current().text.starts_with('[')
                {
                    Some(self.bump().text)
                } else {
                    None
                };
                let clause_body = self.parse_braced_block()?;
                catch_clauses.push(CatchClause {
                    type_filter,
                    body: clause_body,
                });
            } else {
                finally_body = Some(self.parse_braced_block()?);
                break;
            }
        }

        let span = span_join(&kw.span, &self.prev_span());
        Ok(TryStatement {
            body,
            catch_clauses,
            finally_body,
            span,
        })
    }

    // -- expressions --

    fn parse_pipeline(&mut self) -> Result<Pipeline, ParseError> {
        let start = self.current().span.clone();
        let mut elements = vec![self.parse_assignment()?];
        while self.kind() == TokenKind::Pipe {
            self.bump();
            // Allow the next segment on its own line.
            self.skip_newlines_and_comments();
            elements.push(self.parse_assignment()?);
        }
        let span = span_join(&start, &self.prev_span());
        Ok(Pipeline { elements, span })
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        // Comma binds looser than any operator here, so `1, 2, 3`
        // stays a single element.
        let target = self.parse_comma_chain()?;
        if self.kind() == TokenKind::Assignment {
            let op = self.bump();
            // Right-associative: a = b = c nests to the right.
            let value = self.parse_assignment()?;
            let span = span_join(target.span(), value.span());
            return Ok(Expr::Assignment(Assignment {
                target: Box::new(target),
                operator: op.text,
                value: Box::new(value),
                span,
            }));
        }
        Ok(target)
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;
        while self.kind() == TokenKind::Logical
            && OR_LEVEL.contains(&self.current().text.to_ascii_lowercase().as_str())
        {
            let op = self.bump();
            let right = self.parse_logical_and()?;
            left = binary(left, op.text, right);
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while self.kind() == TokenKind::Logical
            && AND_LEVEL.contains(&self.current().text.to_ascii_lowercase().as_str())
        {
            let op = self.bump();
            let right = self.parse_comparison()?;
            left = binary(left, op.text, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        while self.kind() == TokenKind::Comparison {
            // Operator text, not the matched class, so that the
            // original casing of -EQ vs -eq survives for the
            // generator to normalize or preserve.
            let op = self.bump();
            let right = self.parse_additive()?;
            left = binary(left, op.text, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while self.kind() == TokenKind::Arithmetic
            && matches!(self.current().text.as_str(), "+" | "-")
        {
            let op = self.bump();
            let right = self.parse_multiplicative()?;
            left = binary(left, op.text, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while self.kind() == TokenKind::Arithmetic
            && matches!(self.current().text.as_str(), "*" | "/" | "%")
        {
            let op = self.bump();
            let right = self.parse_unary()?;
            left = binary(left, op.text, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let is_unary_op = match self.kind() {
            TokenKind::Logical => {
                let lower = self.current().text.to_ascii_lowercase();
                lower == "-not" || lower == "-bnot" || lower == "!"
            }
            TokenKind::Arithmetic => matches!(self.current().text.as_str(), "+" | "-"),
            _ => false,
        };
        if is_unary_op {
            let op = self.bump();
            let operand = self.parse_unary()?;
            let span = span_join(&op.span, operand.span());
            return Ok(Expr::Unary(UnaryExpr {
                operator: op.text,
                operand: Box::new(operand),
                span,
            }));
        }
        let base = self.parse_primary()?;
        self.parse_postfix(base)
    }

    /// Member access, static member access, calls, and indexing.
    fn parse_postfix(&mut self, mut base: Expr) -> Result<Expr, ParseError> {
        loop {
            match self.kind() {
                TokenKind::Dot | TokenKind::DoubleColon => {
                    let member_ok = matches!(
                        self.tokens.get(self.pos + 1).map(|t| t.kind),
                        Some(
                            TokenKind::Identifier
                                | TokenKind::Cmdlet
                                | TokenKind::Keyword(_)
                                | TokenKind::Number
                        )
                    );
                    if !member_ok {
                        break;
                    }
                    let op = self.bump();
                    let member_tok = self.bump();
                    let mut member = Expr::Literal(Literal {
                        text: member_tok.text,
                        kind: LiteralKind::Bare,
                        span: member_tok.span,
                    });
                    if self.kind() == TokenKind::LeftParen {
                        member = self.parse_call_arguments(member)?;
                    }
                    base = binary(base, op.text, member);
                }
                TokenKind::LeftBracket => {
                    self.bump();
                    self.skip_newlines_and_comments();
                    let index = self.parse_comma_chain()?;
                    self.expect_close_bracket()?;
                    base = binary(base, "[".to_string(), index);
                }
                _ => break,
            }
        }
        Ok(base)
    }

    /// `member(...)`: the argument group renders tight against the
    /// member name, so it is a binary node with operator `(`.
    fn parse_call_arguments(&mut self, member: Expr) -> Result<Expr, ParseError> {
        let open = self.bump();
        self.skip_newlines_and_comments();
        let args = if self.kind() == TokenKind::RightParen {
            Expr::Literal(Literal {
                text: String::new(),
                kind: LiteralKind::Bare,
                span: open.span,
            })
        } else {
            self.parse_comma_chain()?
        };
        self.expect_close_paren()?;
        Ok(binary(member, "(".to_string(), args))
    }

    fn parse_comma_chain(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_or()?;
        while self.kind() == TokenKind::Comma {
            self.bump();
            self.skip_newlines_and_comments();
            let right = self.parse_logical_or()?;
            left = binary(left, ",".to_string(), right);
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::Variable => {
                let tok = self.bump();
                Ok(Expr::Variable(Variable {
                    text: tok.text,
                    span: tok.span,
                }))
            }
            TokenKind::String => Ok(self.literal(LiteralKind::String)),
            TokenKind::HereString => Ok(self.literal(LiteralKind::HereString)),
            TokenKind::Number => Ok(self.literal(LiteralKind::Number)),
            TokenKind::LeftParen => self.parse_paren_group(),
            TokenKind::LeftBrace if self.current().text == "@{" => self.parse_hashtable(),
            TokenKind::LeftBrace => self.slice_script_block(),
            TokenKind::Identifier if self.is_array_open() => self.parse_array(),
            TokenKind::Identifier | TokenKind::Cmdlet if self.postfix_follows() => {
                // [Math]::Max, name[0]: leave the name as a literal
                // so the postfix pass owns what follows.
                Ok(self.literal(LiteralKind::Bare))
            }
            TokenKind::Identifier | TokenKind::Cmdlet => self.parse_command(),
            _ => {
                // Soft-total fallback: advance and wrap the token
                // text as a string literal.
                let tok = self.bump();
                Ok(Expr::Literal(Literal {
                    text: tok.text,
                    kind: LiteralKind::Bare,
                    span: tok.span,
                }))
            }
        }
    }

    fn literal(&mut self, kind: LiteralKind) -> Expr {
        let tok = self.bump();
        Expr::Literal(Literal {
            text: tok.text,
            kind,
            span: tok.span,
        })
    }

    fn postfix_follows(&self) -> bool {
        matches!(
            self.tokens.get(self.pos + 1).map(|t| t.kind),
            Some(TokenKind::Dot | TokenKind::DoubleColon | TokenKind::LeftBracket)
        )
    }

    fn is_array_open(&self) -> bool {
        self.current().text == "@"
            && self
                .tokens
                .get(self.pos + 1)
                .is_some_and(|t| t.kind == TokenKind::LeftParen)
    }

    /// A command: name, then flags and positional arguments until a
    /// structural boundary. Commands take a variable number of
    /// arguments, so the list has no fixed arity. A plain identifier
    /// containing a hyphen still counts as a command name here, as a
    /// defense against lexer misclassification.
    fn parse_command(&mut self) -> Result<Expr, ParseError> {
        let name_tok = self.bump();
        let start = name_tok.span.clone();
        let mut parameters = Vec::new();
        let mut arguments = Vec::new();

        loop {
            let tok = self.current();
            if tok.ends_command() {
                break;
            }
            if tok.kind == TokenKind::Parameter {
                let name = self.bump().text;
                let value = if self.current().ends_command()
                    || self.kind() == TokenKind::Parameter
                {
                    None
                } else {
                    Some(self.parse_command_value_chain()?)
                };
                parameters.push(CommandParameter { name, value });
            } else {
                let value = self.parse_command_value_chain()?;
                arguments.push(value);
            }
        }

        let span = span_join(&start, &self.prev_span());
        Ok(Expr::Command(Command {
            name: name_tok.text,
            parameters,
            arguments,
            span,
        }))
    }

    /// A single value in argument position: a leaf, a container, a
    /// parenthesized group, or a verbatim script block; with postfix
    /// member access and indexing applied so `$x.Length` stays one
    /// argument.
    fn parse_command_value(&mut self) -> Result<Expr, ParseError> {
        let base = match self.kind() {
            TokenKind::Variable => {
                let tok = self.bump();
                Expr::Variable(Variable {
                    text: tok.text,
                    span: tok.span,
                })
            }
            TokenKind::String => self.literal(LiteralKind::String),
            TokenKind::HereString => self.literal(LiteralKind::HereString),
            TokenKind::Number => self.literal(LiteralKind::Number),
            TokenKind::LeftParen => self.parse_paren_group()?,
            TokenKind::LeftBrace if self.current().text == "@{" => self.parse_hashtable()?,
            TokenKind::LeftBrace => self.slice_script_block()?,
            TokenKind::Identifier if self.is_array_open() => self.parse_array()?,
            _ => {
                let tok = self.bump();
                Expr::Literal(Literal {
                    text: tok.text,
                    kind: LiteralKind::Bare,
                    span: tok.span,
                })
            }
        };
        self.parse_postfix(base)
    }

    /// An argument value with any `, value` continuations attached,
    /// so `Write-Output a, b` keeps `a, b` as one argument.
    fn parse_command_value_chain(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_command_value()?;
        while self.kind() == TokenKind::Comma {
            self.bump();
            self.skip_newlines_and_comments();
            let right = self.parse_command_value()?;
            left = binary(left, ",".to_string(), right);
        }
        Ok(left)
    }

    /// `( pipeline )`.
    fn parse_paren_group(&mut self) -> Result<Expr, ParseError> {
        let open = self.expect_open_paren()?;
        self.skip_newlines_and_comments();

        let mut elements = Vec::new();
        if self.kind() != TokenKind::RightParen {
            elements.push(self.parse_assignment()?);
            while self.kind() == TokenKind::Pipe {
                self.bump();
                self.skip_newlines_and_comments();
                elements.push(self.parse_assignment()?);
            }
        }

        let close = self.expect_close_paren()?;
        let span = span_join(&open.span, &close.span);
        Ok(Expr::Paren(ParenExpr {
            inner: Pipeline {
                elements,
                span: span.clone(),
            },
            span,
        }))
    }

    /// `@( elements )`, comma-separated.
    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        let at = self.bump(); // @
        self.bump(); // (
        let mut elements = Vec::new();
        loop {
            self.skip_newlines_and_comments();
            match self.kind() {
                TokenKind::RightParen => {
                    break;
                }
                TokenKind::Comma => {
                    self.bump();
                }
                TokenKind::Eof => {
                    return Err(ParseError {
                        kind: ParseErrorKind::ExpectedCloseParen { found: None },
                        span: self.eof_span(),
                    });
                }
                _ => {
                    elements.push(self.parse_command_value()?);
                }
            }
        }
        let close = self.expect_close_paren()?;
        let span = span_join(&at.span, &close.span);
        Ok(Expr::Array(ArrayLiteral { elements, span }))
    }

    /// `@{ key = value; ... }`. Values opening with a plain `{` are
    /// not recursively parsed: the matching close brace is located by
    /// depth counting and the original source substring is kept
    /// verbatim. Offsets are authoritative, so this is safe.
    fn parse_hashtable(&mut self) -> Result<Expr, ParseError> {
        let open = self.bump();
        let mut entries = Vec::new();

        loop {
            self.skip_separators();
            if self.at_end() || self.kind() == TokenKind::RightBrace {
                break;
            }

            let key = self.bump().text;
            let value = if self.kind() == TokenKind::Assignment {
                self.bump();
                self.skip_newlines_and_comments();
                if self.kind() == TokenKind::LeftBrace && self.current().text == "{" {
                    self.slice_script_block()?
                } else {
                    self.parse_comma_chain()?
                }
            } else {
                // Key without '=': degrade to an empty value rather
                // than failing.
                Expr::Literal(Literal {
                    text: String::new(),
                    kind: LiteralKind::Bare,
                    span: self.prev_span(),
                })
            };
            entries.push(HashtableEntry { key, value });
        }

        let close = self.expect_close_brace()?;
        let span = span_join(&open.span, &close.span);
        Ok(Expr::Hashtable(Hashtable { entries, span }))
    }

    /// Verbatim-slice a brace-delimited script block: scan forward
    /// counting brace depth, then cut the original source between the
    /// opening and matching closing brace.
    fn slice_script_block(&mut self) -> Result<Expr, ParseError> {
        let open_idx = self.pos;
        let mut depth = 0usize;
        let mut close_idx = None;
        for (i, tok) in self.tokens.iter().enumerate().skip(open_idx) {
            match tok.kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        close_idx = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }

        let Some(close_idx) = close_idx else {
            return Err(ParseError {
                kind: ParseErrorKind::ExpectedCloseBrace { found: None },
                span: self.eof_span(),
            });
        };

        let open_span = &self.tokens[open_idx].span;
        let close_span = &self.tokens[close_idx].span;
        let text = self.source[open_span.start..close_span.end].to_string();
        let span = span_join(open_span, close_span);
        self.pos = close_idx + 1;
        Ok(Expr::ScriptBlockExpr(ScriptBlockExpr { text, span }))
    }
}

fn binary(left: Expr, operator: String, right: Expr) -> Expr {
    let span = span_join(left.span(), right.span());
    Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        span,
    })
}
