//! Code generator that serializes a script AST back into text.
//!
//! Walks the tree with an indentation counter, asking `FormatterRules`
//! for every spacing, casing, and layout decision. Comments ride in a
//! side list and are re-interleaved by byte offset. Verbatim regions
//! (script blocks, here-strings, raw fallback text) pass through
//! untouched apart from a small regex touch-up pass on script blocks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{
    ArrayLiteral, Command, Comment, Expr, ForEachStatement, ForStatement, FunctionDef, Hashtable,
    IfStatement, LiteralKind, ParenExpr, Pipeline, ScriptBlock, Statement, SwitchStatement,
    TryStatement, WhileStatement,
};
use crate::options::{BraceStyle, LineEnding, PipelineStyle};
use crate::rules::FormatterRules;

/// Serialize a script to formatted text.
///
/// `comments` must be ordered by byte offset, which the parser
/// guarantees. Output always goes through the whitespace post-pass,
/// so blank-line capping, trailing-space trimming, line endings, and
/// the final newline reflect the active options.
#[must_use]
pub fn generate(script: &ScriptBlock, comments: &[Comment], rules: &FormatterRules) -> String {
    let mut generator = Generator {
        rules,
        comments,
        next_comment: 0,
        out: String::new(),
    };
    generator.emit_statements(&script.statements, 0, usize::MAX);
    postprocess(&generator.out, rules)
}

struct Generator<'a> {
    rules: &'a FormatterRules,
    comments: &'a [Comment],
    next_comment: usize,
    out: String,
}

impl Generator<'_> {
    /// Emit all comments originally located before `limit`.
    fn flush_comments(&mut self, limit: usize, level: usize) {
        while let Some(comment) = self.comments.get(self.next_comment) {
            if comment.span.start >= limit {
                break;
            }
            self.out.push_str(&self.rules.indent(level));
            self.out.push_str(&comment.text);
            self.out.push('\n');
            self.next_comment += 1;
        }
    }

    /// Emit a statement list at one indent level. `end` is the byte
    /// offset of the enclosing block's close brace, so comments that
    /// sit after the last statement still land inside the block.
    fn emit_statements(&mut self, statements: &[Statement], level: usize, end: usize) {
        let mut prev_was_function = false;
        for (i, stmt) in statements.iter().enumerate() {
            let is_function = matches!(stmt, Statement::FunctionDef(_));
            if i > 0 && (is_function || prev_was_function) {
                for _ in 0..self.rules.options().blank_lines_around_functions {
                    self.out.push('\n');
                }
            }
            self.flush_comments(stmt.span().start, level);
            self.emit_statement(stmt, level);
            prev_was_function = is_function;
        }
        self.flush_comments(end, level);
    }

    fn emit_statement(&mut self, stmt: &Statement, level: usize) {
        match stmt {
            Statement::Pipeline(p) => self.emit_pipeline(p, level),
            Statement::FunctionDef(f) => self.emit_function(f, level),
            Statement::If(s) => self.emit_if(s, level),
            Statement::While(s) => self.emit_while(s, level),
            Statement::For(s) => self.emit_for(s, level),
            Statement::ForEach(s) => self.emit_foreach(s, level),
            Statement::Switch(s) => self.emit_switch(s, level),
            Statement::Try(s) => self.emit_try(s, level),
            Statement::RawText(raw) => {
                // Unparseable input survives byte-for-byte; the
                // post-pass owns the final-newline decision.
                self.out.push_str(&raw.text);
            }
        }
    }

    fn emit_pipeline(&mut self, pipeline: &Pipeline, level: usize) {
        if !self.rules.pipeline_multiline(pipeline.elements.len()) {
            let mark = self.out.len();
            self.out.push_str(&self.rules.indent(level));
            for (i, element) in pipeline.elements.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(" | ");
                }
                self.write_expr(element, level);
            }
            let fits = self.out.len() - mark <= self.rules.options().print_width
                || pipeline.elements.len() < 2
                || self.rules.options().pipeline_style != PipelineStyle::Auto;
            if fits {
                self.out.push('\n');
                return;
            }
            // In auto mode an overlong one-liner falls back to the
            // multiline shape.
            self.out.truncate(mark);
        }

        self.out.push_str(&self.rules.indent(level));
        let continuation = self.rules.indent(level + 1);
        for (i, element) in pipeline.elements.iter().enumerate() {
            if i > 0 {
                self.out.push_str(" |\n");
                self.out.push_str(&continuation);
            }
            self.write_expr(element, level + 1);
        }
        self.out.push('\n');
    }

    fn emit_function(&mut self, def: &FunctionDef, level: usize) {
        self.out.push_str(&self.rules.indent(level));
        self.out.push_str("function ");
        self.out.push_str(&self.rules.command_case(&def.name));
        if !def.parameters.is_empty() {
            self.out.push('(');
            for (i, param) in def.parameters.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(self.rules.comma());
                }
                self.out.push_str(param);
            }
            self.out.push(')');
        }
        self.write_block(&def.body, level);
        self.out.push('\n');
    }

    fn emit_if(&mut self, stmt: &IfStatement, level: usize) {
        let indent = self.rules.indent(level);
        self.out.push_str(&indent);
        self.out.push_str("if");
        if let Some(condition) = &stmt.condition {
            self.out.push(' ');
            self.write_condition(condition, level);
        }
        self.write_block(&stmt.body, level);

        for clause in &stmt.elseif_clauses {
            self.push_clause_joiner(&indent);
            self.out.push_str("elseif ");
            self.write_condition(&clause.condition, level);
            self.write_block(&clause.body, level);
        }
        if let Some(else_body) = &stmt.else_body {
            self.push_clause_joiner(&indent);
            self.out.push_str("else");
            self.write_block(else_body, level);
        }
        self.out.push('\n');
    }

    fn emit_while(&mut self, stmt: &WhileStatement, level: usize) {
        self.out.push_str(&self.rules.indent(level));
        self.out.push_str("while ");
        self.write_condition(&stmt.condition, level);
        self.write_block(&stmt.body, level);
        self.out.push('\n');
    }

    fn emit_for(&mut self, stmt: &ForStatement, level: usize) {
        self.out.push_str(&self.rules.indent(level));
        self.out.push_str("for (");
        let clauses = [&stmt.init, &stmt.condition, &stmt.update];
        for (i, clause) in clauses.iter().enumerate() {
            if i > 0 {
                self.out.push(';');
            }
            if let Some(expr) = clause {
                if i > 0 && self.rules.options().space_after_semicolon {
                    self.out.push(' ');
                }
                self.write_expr(expr, level);
            }
        }
        self.out.push(')');
        self.write_block(&stmt.body, level);
        self.out.push('\n');
    }

    fn emit_foreach(&mut self, stmt: &ForEachStatement, level: usize) {
        self.out.push_str(&self.rules.indent(level));
        self.out.push_str("foreach (");
        self.out.push_str(&self.rules.variable_case(&stmt.variable.text));
        self.out.push_str(" in ");
        self.write_expr(&stmt.iterable, level);
        self.out.push(')');
        self.write_block(&stmt.body, level);
        self.out.push('\n');
    }

    fn emit_switch(&mut self, stmt: &SwitchStatement, level: usize) {
        let indent = self.rules.indent(level);
        self.out.push_str(&indent);
        self.out.push_str("switch ");
        self.write_condition(&stmt.subject, level);
        self.out.push_str(&self.rules.open_brace(&indent));
        self.out.push('\n');

        for clause in &stmt.clauses {
            self.out.push_str(&self.rules.indent(level + 1));
            self.write_expr(&clause.pattern, level + 1);
            self.write_block(&clause.body, level + 1);
            self.out.push('\n');
        }
        if let Some(default) = &stmt.default {
            self.out.push_str(&self.rules.indent(level + 1));
            self.out.push_str("default");
            self.write_block(default, level + 1);
            self.out.push('\n');
        }

        self.out.push_str(&indent);
        self.out.push_str("}\n");
    }

    fn emit_try(&mut self, stmt: &TryStatement, level: usize) {
        let indent = self.rules.indent(level);
        self.out.push_str(&indent);
        self.out.push_str("try");
        self.write_block(&stmt.body, level);

        for clause in &stmt.catch_clauses {
            self.push_clause_joiner(&indent);
            self.out.push_str("catch");
            if let Some(filter) = &clause.type_filter {
                self.out.push(' ');
                self.out.push_str(filter);
            }
            self.write_block(&clause.body, level);
        }
        if let Some(finally_body) = &stmt.finally_body {
            self.push_clause_joiner(&indent);
            self.out.push_str("finally");
            self.write_block(finally_body, level);
        }
        self.out.push('\n');
    }

    /// Open brace, inner statements one level deeper, close brace.
    /// The close brace gets no trailing newline so chained clauses
    /// (`} elseif`, `} catch`) can continue the line.
    fn write_block(&mut self, block: &ScriptBlock, level: usize) {
        let indent = self.rules.indent(level);
        self.out.push_str(&self.rules.open_brace(&indent));
        self.out.push('\n');
        self.emit_statements(&block.statements, level + 1, block.span.end);
        self.out.push_str(&indent);
        self.out.push('}');
    }

    /// `} elseif` / `} catch` style joiner between a close brace and
    /// the next clause keyword.
    fn push_clause_joiner(&mut self, indent: &str) {
        match self.rules.options().brace_style {
            BraceStyle::SameLine => self.out.push(' '),
            BraceStyle::NextLine => {
                self.out.push('\n');
                self.out.push_str(indent);
            }
        }
    }

    /// A condition always renders parenthesized, whether or not the
    /// source carried parens.
    fn write_condition(&mut self, condition: &Expr, level: usize) {
        if matches!(condition, Expr::Paren(_)) {
            self.write_expr(condition, level);
        } else {
            self.out.push('(');
            self.write_expr(condition, level);
            self.out.push(')');
        }
    }

    fn write_expr(&mut self, expr: &Expr, level: usize) {
        match expr {
            Expr::Command(c) => self.write_command(c, level),
            Expr::Assignment(a) => {
                self.write_expr(&a.target, level);
                self.out.push_str(&self.rules.spaced_operator(&a.operator));
                self.write_expr(&a.value, level);
            }
            Expr::Binary(b) => match b.operator.as_str() {
                "," => {
                    self.write_expr(&b.left, level);
                    self.out.push_str(self.rules.comma());
                    self.write_expr(&b.right, level);
                }
                "(" => {
                    self.write_expr(&b.left, level);
                    self.out.push('(');
                    self.write_expr(&b.right, level);
                    self.out.push(')');
                }
                "[" => {
                    self.write_expr(&b.left, level);
                    self.out.push('[');
                    self.write_expr(&b.right, level);
                    self.out.push(']');
                }
                _ => {
                    self.write_expr(&b.left, level);
                    self.out.push_str(&self.rules.spaced_operator(&b.operator));
                    self.write_expr(&b.right, level);
                }
            },
            Expr::Unary(u) => {
                self.out.push_str(&u.operator);
                // Textual operators need the separating space back;
                // symbolic ones stay tight ("!", "-", "+").
                if u.operator.len() > 1 {
                    self.out.push(' ');
                }
                self.write_expr(&u.operand, level);
            }
            Expr::Paren(p) => self.write_paren(p, level),
            Expr::Variable(v) => {
                self.out.push_str(&self.rules.variable_case(&v.text));
            }
            Expr::Literal(l) => match l.kind {
                LiteralKind::String => {
                    self.out.push_str(&self.rules.normalize_quotes(&l.text));
                }
                LiteralKind::HereString | LiteralKind::Number | LiteralKind::Bare => {
                    self.out.push_str(&l.text);
                }
            },
            Expr::Array(a) => self.write_array(a, level),
            Expr::Hashtable(h) => self.write_hashtable(h, level),
            Expr::ScriptBlockExpr(sb) => {
                self.out.push_str(&touch_up(&sb.text));
            }
        }
    }

    fn write_command(&mut self, command: &Command, level: usize) {
        self.out.push_str(&self.rules.command_case(&command.name));
        for param in &command.parameters {
            self.out.push(' ');
            self.out.push_str(&self.rules.parameter_case(&param.name));
            if let Some(value) = &param.value {
                self.out.push(' ');
                self.write_expr(value, level);
            }
        }
        for argument in &command.arguments {
            self.out.push(' ');
            self.write_expr(argument, level);
        }
    }

    /// Parenthesized pipelines always render on one line.
    fn write_paren(&mut self, paren: &ParenExpr, level: usize) {
        self.out.push('(');
        for (i, element) in paren.inner.elements.iter().enumerate() {
            if i > 0 {
                self.out.push_str(" | ");
            }
            self.write_expr(element, level);
        }
        self.out.push(')');
    }

    fn write_array(&mut self, array: &ArrayLiteral, level: usize) {
        if self.rules.array_expanded(array.elements.len()) {
            self.out.push_str("@(\n");
            let inner = self.rules.indent(level + 1);
            for (i, element) in array.elements.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(",\n");
                }
                self.out.push_str(&inner);
                self.write_expr(element, level + 1);
            }
            self.out.push('\n');
            self.out.push_str(&self.rules.indent(level));
            self.out.push(')');
        } else {
            self.out.push_str("@(");
            for (i, element) in array.elements.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(self.rules.comma());
                }
                self.write_expr(element, level);
            }
            self.out.push(')');
        }
    }

    fn write_hashtable(&mut self, hashtable: &Hashtable, level: usize) {
        if self.rules.hashtable_expanded(hashtable.entries.len()) {
            self.out.push_str("@{\n");
            let inner = self.rules.indent(level + 1);
            for entry in &hashtable.entries {
                self.out.push_str(&inner);
                self.out.push_str(&entry.key);
                self.out.push_str(&self.rules.spaced_operator("="));
                self.write_expr(&entry.value, level + 1);
                self.out.push('\n');
            }
            self.out.push_str(&self.rules.indent(level));
            self.out.push('}');
        } else {
            self.out.push_str("@{");
            for (i, entry) in hashtable.entries.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(self.rules.entry_separator());
                }
                self.out.push_str(&entry.key);
                self.out.push_str(&self.rules.spaced_operator("="));
                self.write_expr(&entry.value, level);
            }
            self.out.push('}');
        }
    }
}

static DOT_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w\)\]])\s*\.\s*([A-Za-z_])").unwrap());
static UNIT_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d)[ \t]+(kb|mb|gb|tb|pb)\b").unwrap());
static OP_GAP_LEFT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}(-[A-Za-z]+\b)").unwrap());
static OP_GAP_RIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(-[A-Za-z]+)[ \t]{2,}").unwrap());

/// Light cleanup inside verbatim script blocks: rejoin spaced member
/// access and split size suffixes, and collapse runs of spaces around
/// textual operators. Every substitution is idempotent; everything
/// the patterns do not match passes through as written.
fn touch_up(text: &str) -> String {
    let text = DOT_GAP.replace_all(text, "${1}.${2}");
    let text = UNIT_GAP.replace_all(&text, "${1}${2}");
    let text = OP_GAP_LEFT.replace_all(&text, " ${1}");
    OP_GAP_RIGHT.replace_all(&text, "${1} ").into_owned()
}

/// Whitespace post-pass over the emitted text: trim line ends, cap
/// consecutive blank lines, settle the final newline, and apply the
/// configured line ending.
fn postprocess(text: &str, rules: &FormatterRules) -> String {
    let options = rules.options();

    let mut lines: Vec<&str> = Vec::new();
    let mut blanks = 0usize;
    for raw_line in text.split('\n') {
        let line = if options.trim_trailing_whitespace {
            raw_line.trim_end()
        } else {
            raw_line
        };
        if line.is_empty() {
            blanks += 1;
            if blanks > options.max_consecutive_blank_lines {
                continue;
            }
        } else {
            blanks = 0;
        }
        lines.push(line);
    }
    let mut result = lines.join("\n");

    if options.insert_final_newline {
        while result.ends_with("\n\n") {
            result.pop();
        }
        if !result.ends_with('\n') {
            result.push('\n');
        }
    } else {
        while result.ends_with('\n') {
            result.pop();
        }
    }

    match options.line_ending {
        LineEnding::Lf => result,
        LineEnding::CrLf => result.replace("\r\n", "\n").replace('\n', "\r\n"),
    }
}
