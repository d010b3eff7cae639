//! Round-trip tests: canonical scripts format back to themselves.

mod common;

use common::{roundtrip, stable};

// -----------------------------------------------------------
// Basic round-trip tests.
// -----------------------------------------------------------

#[test]
fn roundtrip_assignment() {
    roundtrip("$x = 1\n");
}

#[test]
fn roundtrip_short_pipeline() {
    roundtrip("Get-Process | Stop-Process\n");
}

#[test]
fn roundtrip_if_statement() {
    roundtrip("if ($x -eq 1) {\n    Write-Host \"hi\"\n}\n");
}

#[test]
fn roundtrip_if_elseif_else() {
    roundtrip(
        "if ($x -eq 1) {\n\
         \x20   $a = 1\n\
         } elseif ($x -eq 2) {\n\
         \x20   $a = 2\n\
         } else {\n\
         \x20   $a = 3\n\
         }\n",
    );
}

#[test]
fn roundtrip_function() {
    roundtrip("function Get-Thing($name) {\n    Write-Output $name\n}\n");
}

#[test]
fn roundtrip_while_loop() {
    roundtrip("while ($i -lt 10) {\n    $i = $i + 1\n}\n");
}

#[test]
fn roundtrip_for_loop() {
    roundtrip(
        "for ($i = 0; $i -lt 5; $i = $i + 1) {\n\
         \x20   Write-Host $i\n\
         }\n",
    );
}

#[test]
fn roundtrip_foreach_loop() {
    roundtrip("foreach ($item in $items) {\n    Write-Host $item\n}\n");
}

#[test]
fn roundtrip_try_catch_finally() {
    roundtrip(
        "try {\n\
         \x20   Remove-Item $path\n\
         } catch [System.Exception] {\n\
         \x20   Write-Error $_\n\
         } finally {\n\
         \x20   Write-Host \"done\"\n\
         }\n",
    );
}

#[test]
fn roundtrip_switch_statement() {
    roundtrip(
        "switch ($code) {\n\
         \x20   200 {\n\
         \x20       Write-Host \"ok\"\n\
         \x20   }\n\
         \x20   default {\n\
         \x20       Write-Host \"other\"\n\
         \x20   }\n\
         }\n",
    );
}

#[test]
fn roundtrip_multiline_pipeline() {
    roundtrip(
        "Get-Process |\n\
         \x20   Sort-Object CPU |\n\
         \x20   Select-Object -First 5\n",
    );
}

#[test]
fn roundtrip_hashtable() {
    roundtrip("$config = @{Name = \"app\"; Port = 8080}\n");
}

#[test]
fn roundtrip_array() {
    roundtrip("$a = @(1, 2, 3)\n");
}

#[test]
fn roundtrip_comma_separated_assignment() {
    roundtrip("$a = 1, 2, 3\n");
}

#[test]
fn roundtrip_comma_separated_arguments() {
    roundtrip("Write-Output a, b\n");
}

#[test]
fn roundtrip_comma_separated_parameter_value() {
    roundtrip("Copy-Item -Path a, b -Destination c\n");
}

#[test]
fn roundtrip_comment_above_statement() {
    roundtrip("# setup\n$x = 1\n");
}

#[test]
fn roundtrip_script_block_argument() {
    roundtrip("Where-Object { $_.Name -eq \"x\" }\n");
}

#[test]
fn roundtrip_member_call_chain() {
    roundtrip("$name.Trim().Length\n");
}

#[test]
fn roundtrip_static_member_call() {
    roundtrip("[Math]::Max(1, 2)\n");
}

// -----------------------------------------------------------
// Idempotence on messy input: the first pass must be a fixed
// point of the second.
// -----------------------------------------------------------

#[test]
fn stable_on_cramped_spacing() {
    stable("$x=1;$y=2");
}

#[test]
fn stable_on_nested_blocks() {
    stable("if($a){if($b){Write-Host \"deep\"}}");
}

#[test]
fn stable_on_long_pipeline() {
    stable("Get-ChildItem | Where-Object { $_.Length -gt 0 } | Sort-Object Name | Select-Object -First 3");
}

#[test]
fn stable_on_hashtable_with_newlines() {
    stable("@{a = 1\nb = 2\nc = 3}");
}

#[test]
fn stable_on_broken_input() {
    stable("if ($x {");
}
