//! Parser tests over the public API: statement shapes, the comment
//! side list, and the structural error surface.

use pwshfmt::{
    Expr, ParseErrorKind, Statement, parse_str,
};

fn statements(input: &str) -> Vec<Statement> {
    let (script, _) = parse_str(input).expect("parse failed");
    script.statements
}

#[test]
fn mixed_script_statement_shapes() {
    let stmts = statements(
        "$x = 1\n\
         function Get-Thing { $x }\n\
         if ($x) { $x }\n\
         while ($x) { $x }\n\
         for (;;) { $x }\n\
         foreach ($i in $x) { $i }\n\
         switch ($x) { 1 { $x } }\n\
         try { $x } catch { $x }\n",
    );
    assert_eq!(stmts.len(), 8);
    assert!(matches!(stmts[0], Statement::Pipeline(_)));
    assert!(matches!(stmts[1], Statement::FunctionDef(_)));
    assert!(matches!(stmts[2], Statement::If(_)));
    assert!(matches!(stmts[3], Statement::While(_)));
    assert!(matches!(stmts[4], Statement::For(_)));
    assert!(matches!(stmts[5], Statement::ForEach(_)));
    assert!(matches!(stmts[6], Statement::Switch(_)));
    assert!(matches!(stmts[7], Statement::Try(_)));
}

#[test]
fn comments_come_back_in_source_order() {
    let (_, comments) = parse_str(
        "# first\n\
         $a = 1\n\
         # second\n\
         if ($a) {\n\
             # third\n\
             $b = 2\n\
         }\n",
    )
    .expect("parse failed");
    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["# first", "# second", "# third"]);
    assert!(comments.windows(2).all(|w| w[0].span.start < w[1].span.start));
}

#[test]
fn block_comment_is_flagged_multiline() {
    let (_, comments) = parse_str("<# a\nb #>\n$x = 1\n").expect("parse failed");
    assert_eq!(comments.len(), 1);
    assert!(comments[0].multiline);
}

#[test]
fn command_parameters_and_arguments_separate() {
    let stmts = statements("Copy-Item -Path $src -Recurse $dest\n");
    let Statement::Pipeline(p) = &stmts[0] else {
        panic!("expected pipeline");
    };
    let Expr::Command(c) = &p.elements[0] else {
        panic!("expected command");
    };
    assert_eq!(c.name, "Copy-Item");
    assert_eq!(c.parameters.len(), 2);
    assert_eq!(c.parameters[0].name, "-Path");
    assert!(c.parameters[0].value.is_some());
    // -Recurse captures the value that follows it
    assert_eq!(c.parameters[1].name, "-Recurse");
    assert!(c.parameters[1].value.is_some());
}

#[test]
fn switch_flag_stays_a_flag() {
    let stmts = statements("Get-ChildItem -Recurse\n");
    let Statement::Pipeline(p) = &stmts[0] else {
        panic!("expected pipeline");
    };
    let Expr::Command(c) = &p.elements[0] else {
        panic!("expected command");
    };
    assert_eq!(c.parameters[0].name, "-Recurse");
    assert!(c.parameters[0].value.is_none());
    assert!(c.arguments.is_empty());
}

#[test]
fn comma_separated_assignment_value_stays_one_statement() {
    let stmts = statements("$a = 1, 2, 3\n");
    assert_eq!(stmts.len(), 1);
    let Statement::Pipeline(p) = &stmts[0] else {
        panic!("expected pipeline");
    };
    let Expr::Assignment(a) = &p.elements[0] else {
        panic!("expected assignment");
    };
    assert!(matches!(&*a.value, Expr::Binary(b) if b.operator == ","));
}

#[test]
fn comma_separated_arguments_stay_one_argument() {
    let stmts = statements("Write-Output a, b\n");
    assert_eq!(stmts.len(), 1);
    let Statement::Pipeline(p) = &stmts[0] else {
        panic!("expected pipeline");
    };
    let Expr::Command(c) = &p.elements[0] else {
        panic!("expected command");
    };
    assert_eq!(c.arguments.len(), 1);
    assert!(matches!(&c.arguments[0], Expr::Binary(b) if b.operator == ","));
}

#[test]
fn comment_before_else_keeps_clause_attached() {
    let (script, comments) =
        parse_str("if ($x) {\n    $a\n}\n# why not\nelse {\n    $b\n}\n").expect("parse failed");
    assert_eq!(script.statements.len(), 1);
    let Statement::If(s) = &script.statements[0] else {
        panic!("expected if");
    };
    assert!(s.else_body.is_some());
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "# why not");
}

#[test]
fn missing_close_brace_reports_eof() {
    let err = parse_str("function Broken {\n$x = 1\n").unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::ExpectedCloseBrace { found: None }
    ));
}

#[test]
fn missing_close_paren_reports_found_token() {
    let err = parse_str("while ($x { }\n").unwrap_err();
    match err.kind {
        ParseErrorKind::ExpectedCloseParen { found } => {
            assert_eq!(found.as_deref(), Some("{"));
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}

#[test]
fn error_display_names_both_sides() {
    let err = parse_str("if ($x) {").unwrap_err();
    let message = err.to_string();
    assert!(message.contains('}'), "got: {message}");
}

#[test]
fn stray_tokens_do_not_error() {
    // Soft totality: only missing closers fail.
    for input in ["]", ")", "= 1", "| Get-Process"] {
        assert!(parse_str(input).is_ok(), "input: {input:?}");
    }
}

#[test]
fn empty_input_parses_to_empty_script() {
    let (script, comments) = parse_str("").expect("parse failed");
    assert!(script.statements.is_empty());
    assert!(comments.is_empty());
}
