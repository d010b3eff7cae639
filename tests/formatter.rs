//! Formatter option coverage through the public API: every knob on
//! `FormatterOptions` observable in output.

use pwshfmt::{
    BraceStyle, FormatterOptions, IndentStyle, PipelineStyle, QuoteStyle, safe_format,
};

fn fmt_with(input: &str, options: &FormatterOptions) -> String {
    safe_format(input, options)
}

#[test]
fn tab_indentation() {
    let options = FormatterOptions {
        indent_style: IndentStyle::Tabs,
        ..FormatterOptions::default()
    };
    assert_eq!(
        fmt_with("if ($x) { $y }", &options),
        "if ($x) {\n\t$y\n}\n"
    );
}

#[test]
fn two_space_indentation() {
    let options = FormatterOptions {
        indent_size: 2,
        ..FormatterOptions::default()
    };
    assert_eq!(
        fmt_with("if ($x) { $y }", &options),
        "if ($x) {\n  $y\n}\n"
    );
}

#[test]
fn next_line_braces() {
    let options = FormatterOptions {
        brace_style: BraceStyle::NextLine,
        ..FormatterOptions::default()
    };
    let out = fmt_with("if ($x) { $y } else { $z }", &options);
    let expected = "\
if ($x)
{
    $y
}
else
{
    $z
}
";
    assert_eq!(out, expected);
}

#[test]
fn single_quote_normalization() {
    let options = FormatterOptions {
        quote_style: QuoteStyle::Single,
        ..FormatterOptions::default()
    };
    assert_eq!(fmt_with("$x = \"hi\"", &options), "$x = 'hi'\n");
}

#[test]
fn double_quote_normalization() {
    let options = FormatterOptions {
        quote_style: QuoteStyle::Double,
        ..FormatterOptions::default()
    };
    assert_eq!(fmt_with("$x = 'hi'", &options), "$x = \"hi\"\n");
}

#[test]
fn forced_multiline_pipelines() {
    let options = FormatterOptions {
        pipeline_style: PipelineStyle::Multiline,
        ..FormatterOptions::default()
    };
    assert_eq!(
        fmt_with("Get-Process | Stop-Process", &options),
        "Get-Process |\n    Stop-Process\n"
    );
}

#[test]
fn forced_one_line_pipelines() {
    let options = FormatterOptions {
        pipeline_style: PipelineStyle::OneLine,
        ..FormatterOptions::default()
    };
    assert_eq!(
        fmt_with("Get-Process | Sort-Object CPU | Stop-Process", &options),
        "Get-Process | Sort-Object CPU | Stop-Process\n"
    );
}

#[test]
fn no_space_around_operators() {
    let options = FormatterOptions {
        space_around_operators: false,
        ..FormatterOptions::default()
    };
    assert_eq!(fmt_with("$x = 1", &options), "$x=1\n");
}

#[test]
fn no_space_after_comma() {
    let options = FormatterOptions {
        space_after_comma: false,
        ..FormatterOptions::default()
    };
    assert_eq!(fmt_with("$a = @(1, 2, 3)", &options), "$a = @(1,2,3)\n");
}

#[test]
fn no_final_newline() {
    let options = FormatterOptions {
        insert_final_newline: false,
        ..FormatterOptions::default()
    };
    assert_eq!(fmt_with("$x = 1", &options), "$x = 1");
}

#[test]
fn quote_preserve_leaves_both_styles() {
    let out = safe_format(
        "$a = 'single'\n$b = \"double\"\n",
        &FormatterOptions::default(),
    );
    assert_eq!(out, "$a = 'single'\n$b = \"double\"\n");
}
