//! CLI tool to validate and format PowerShell scripts.

use std::fs;
use std::process::ExitCode;

use pwshfmt::FormatterOptions;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: pwshfmt <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  validate  Check if script(s) parse cleanly");
        eprintln!("  fmt       Format script(s) and print to stdout");
        eprintln!("  check     Check if script(s) are formatted");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  pwshfmt validate deploy.ps1");
        eprintln!("  pwshfmt fmt deploy.ps1");
        eprintln!("  pwshfmt check deploy.ps1");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let options = FormatterOptions::default();
    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        match command {
            "validate" => match pwshfmt::parse_str(&content) {
                Ok((script, comments)) => {
                    let statements = script.statements.len();
                    let comments = comments.len();
                    eprintln!("{path}: valid ({statements} statement(s), {comments} comment(s))");
                }
                Err(e) => {
                    eprintln!("{path}: {e}");
                    had_error = true;
                }
            },
            "fmt" => {
                // Formatting never fails; broken input passes through.
                print!("{}", pwshfmt::safe_format(&content, &options));
            }
            "check" => {
                let formatted = pwshfmt::safe_format(&content, &options);
                if formatted == content {
                    eprintln!("{path}: formatted");
                } else {
                    eprintln!("{path}: not formatted");
                    had_error = true;
                }
            }
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
