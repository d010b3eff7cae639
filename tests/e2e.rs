//! End-to-end tests over whole scripts: messy input in, canonical
//! output out, and the failure-mode guarantees of `safe_format`.

mod common;

use common::stable;
use pwshfmt::{Casing, FormatterOptions, safe_format};

fn fmt(input: &str) -> String {
    safe_format(input, &FormatterOptions::default())
}

// -----------------------------------------------------------
// Whole-script formatting.
// -----------------------------------------------------------

#[test]
fn deploy_script_normalizes() {
    let input = "\
$ErrorActionPreference=\"Stop\"
function Deploy-App($env){
$config=@{Name=\"app\";Port=8080}
if($env -eq \"prod\"){
Write-Host \"deploying\"
}
}
Deploy-App \"prod\"
";
    let expected = "\
$ErrorActionPreference = \"Stop\"

function Deploy-App($env) {
    $config = @{Name = \"app\"; Port = 8080}
    if ($env -eq \"prod\") {
        Write-Host \"deploying\"
    }
}

Deploy-App \"prod\"
";
    assert_eq!(fmt(input), expected);
    stable(input);
}

#[test]
fn cleanup_script_normalizes() {
    let input = "\
foreach($f in Get-ChildItem C:\\Temp){
try{Remove-Item $f}catch{Write-Warning \"skipped\"}
}
";
    let expected = "\
foreach ($f in Get-ChildItem C:\\Temp) {
    try {
        Remove-Item $f
    } catch {
        Write-Warning \"skipped\"
    }
}
";
    assert_eq!(fmt(input), expected);
    stable(input);
}

// -----------------------------------------------------------
// Failure-mode guarantees.
// -----------------------------------------------------------

#[test]
fn output_is_never_empty() {
    assert_eq!(fmt(""), "\n");
    assert_eq!(fmt("   "), "\n");
    assert!(!fmt("\n\n\n").is_empty());
}

#[test]
fn unterminated_block_comment_is_preserved() {
    let out = fmt("<# never closed\n$x = 1");
    assert!(out.contains("never closed"), "got: {out}");
    assert!(out.contains("$x = 1"), "got: {out}");
}

#[test]
fn structurally_broken_input_passes_through() {
    let input = "if ($x -eq 1) {\nWrite-Host \"hi\"";
    let out = fmt(input);
    assert!(out.starts_with(input), "got: {out}");
}

#[test]
fn unterminated_string_is_preserved() {
    let out = fmt("$msg = \"no closing quote");
    assert!(out.contains("no closing quote"), "got: {out}");
}

// -----------------------------------------------------------
// Casing never touches hyphens.
// -----------------------------------------------------------

#[test]
fn hyphens_survive_every_casing() {
    let cases = [
        (Casing::Preserve, "Get-ChildItem -Recurse\n"),
        (Casing::Lower, "get-childitem -recurse\n"),
        (Casing::Upper, "GET-CHILDITEM -RECURSE\n"),
        (Casing::Pascal, "Get-ChildItem -Recurse\n"),
        (Casing::Camel, "get-ChildItem -Recurse\n"),
    ];
    for (casing, expected) in cases {
        let options = FormatterOptions {
            command_casing: casing,
            parameter_casing: casing,
            ..FormatterOptions::default()
        };
        let out = safe_format("Get-ChildItem -Recurse", &options);
        assert_eq!(out, expected, "casing: {casing:?}");
    }
}

// -----------------------------------------------------------
// No-space operators stay tight through a full pass.
// -----------------------------------------------------------

#[test]
fn access_operators_never_gain_spaces() {
    let out = fmt("$obj.Items[0].Name\n");
    assert_eq!(out, "$obj.Items[0].Name\n");
    assert!(!out.contains(" ."));
    assert!(!out.contains(". "));
    assert!(!out.contains(" ["));

    let out = fmt("[System.IO.Path]::GetTempPath()\n");
    assert_eq!(out, "[System.IO.Path]::GetTempPath()\n");
    assert!(!out.contains(" ::"));
}

// -----------------------------------------------------------
// Pipeline layout threshold.
// -----------------------------------------------------------

#[test]
fn two_element_pipeline_stays_flat() {
    assert_eq!(fmt("Get-Process | Stop-Process"), "Get-Process | Stop-Process\n");
}

#[test]
fn three_element_pipeline_breaks() {
    let out = fmt("Get-Process | Sort-Object CPU | Select-Object -First 5");
    assert_eq!(out.lines().count(), 3);
    assert!(out.lines().next().is_some_and(|l| l.ends_with(" |")));
}

// -----------------------------------------------------------
// Comparison operator casing is preserved, spacing normalized.
// -----------------------------------------------------------

#[test]
fn operator_casing_survives() {
    assert_eq!(fmt("if ($x -EQ 1) { $y }"), "if ($x -EQ 1) {\n    $y\n}\n");
}

#[test]
fn here_string_is_untouched() {
    let input = "$banner = @\"\n  ragged   text\n\"@\n";
    let out = fmt(input);
    assert!(out.contains("  ragged   text"), "got: {out}");
}
