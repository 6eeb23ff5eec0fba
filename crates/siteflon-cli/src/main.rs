use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use serde::Serialize;
use siteflon_core::{CompileOptions, Diagnostic, compile_bytes_with_diagnostics};
use siteflon_renderer::Shell;

fn main() {
    let mut input: Option<String> = None;
    let mut output: Option<PathBuf> = None;
    let mut preserve_new_lines = false;
    let mut raw = false;
    let mut stylesheet: Option<String> = None;
    let mut emit_css: Option<PathBuf> = None;
    let mut diagnostics_mode: Option<DiagnosticsMode> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--preserve-newlines" => preserve_new_lines = true,
            "--raw" => raw = true,
            "--stylesheet" => stylesheet = Some(expect_value(&mut args, &arg, "HREF")),
            "--emit-css" => emit_css = Some(expect_value(&mut args, &arg, "DIR").into()),
            "-o" | "--output" => output = Some(expect_value(&mut args, &arg, "OUT").into()),
            "--diagnostics" => {
                let mode = match args.next().as_deref() {
                    Some("json") => DiagnosticsMode::Json,
                    Some("pretty") => DiagnosticsMode::Pretty,
                    _ => {
                        eprintln!("--diagnostics expects: json | pretty");
                        print_usage();
                        process::exit(2);
                    }
                };
                diagnostics_mode = Some(mode);
            }
            _ if arg.starts_with('-') && arg != "-" => {
                eprintln!("unknown option: {}", arg);
                print_usage();
                process::exit(2);
            }
            _ => {
                if input.is_none() {
                    input = Some(arg);
                } else {
                    eprintln!("unexpected argument: {}", arg);
                    print_usage();
                    process::exit(2);
                }
            }
        }
    }

    let source = match input.as_deref() {
        Some(path) if path != "-" => fs::read(path).unwrap_or_else(|err| {
            eprintln!("failed to read {}: {}", path, err);
            process::exit(1);
        }),
        _ => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .unwrap_or_else(|err| {
                    eprintln!("failed to read stdin: {}", err);
                    process::exit(1);
                });
            buffer
        }
    };

    let options = CompileOptions {
        preserve_new_lines,
        ..Default::default()
    };
    let result = compile_bytes_with_diagnostics(&source, &options);

    let shell = match stylesheet {
        Some(href) => Shell::default().with_stylesheet(href),
        None => Shell::default(),
    };

    if let Some(dir) = emit_css {
        if let Err(err) = shell.generate_files(&dir) {
            eprintln!("failed to write stylesheet to {}: {}", dir.display(), err);
            process::exit(1);
        }
    }

    match diagnostics_mode {
        Some(mode) => emit_diagnostics(&result.diagnostics, mode),
        None => {
            if let Some(error) = result.diagnostics.iter().find(|diag| diag.is_error()) {
                eprintln!("error: {}", error.message);
            }
        }
    }

    let has_errors = result.has_errors();
    let html = if raw {
        result.html
    } else {
        shell.wrap_bytes(&result.html)
    };

    match output {
        Some(path) => {
            if let Err(err) = fs::write(&path, &html) {
                eprintln!("failed to write {}: {}", path.display(), err);
                process::exit(1);
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            if let Err(err) = stdout.write_all(&html).and_then(|()| stdout.flush()) {
                eprintln!("failed to write stdout: {}", err);
                process::exit(1);
            }
        }
    }

    if has_errors {
        process::exit(1);
    }
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str, name: &str) -> String {
    match args.next() {
        Some(value) => value,
        None => {
            eprintln!("{} expects a value: {}", flag, name);
            print_usage();
            process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!(
        "Usage: siteflon [--preserve-newlines] [--raw] [--stylesheet HREF] [--emit-css DIR] [--diagnostics json|pretty] [-o OUT] [input]"
    );
}

#[derive(Clone, Copy)]
enum DiagnosticsMode {
    Json,
    Pretty,
}

fn emit_diagnostics(diagnostics: &[Diagnostic], mode: DiagnosticsMode) {
    match mode {
        DiagnosticsMode::Json => eprintln!("{}", diagnostics_to_json(diagnostics)),
        DiagnosticsMode::Pretty => {
            for diagnostic in diagnostics {
                eprintln!("{}", diagnostic_to_pretty(diagnostic));
            }
        }
    }
}

fn diagnostic_to_pretty(diagnostic: &Diagnostic) -> String {
    let start_line = diagnostic.range.start.line + 1;
    let start_col = diagnostic.range.start.character + 1;
    format!(
        "{}:{} {} {} {}",
        start_line,
        start_col,
        diagnostic.severity.label(),
        diagnostic.code,
        diagnostic.message
    )
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    code: &'a str,
    severity: &'a str,
    message: &'a str,
    range: JsonRange,
}

#[derive(Serialize)]
struct JsonRange {
    start: JsonPosition,
    end: JsonPosition,
}

#[derive(Serialize)]
struct JsonPosition {
    line: usize,
    character: usize,
}

fn diagnostics_to_json(diagnostics: &[Diagnostic]) -> String {
    let view: Vec<JsonDiagnostic<'_>> = diagnostics
        .iter()
        .map(|diag| JsonDiagnostic {
            code: diag.code,
            severity: diag.severity.label(),
            message: &diag.message,
            range: JsonRange {
                start: JsonPosition {
                    line: diag.range.start.line,
                    character: diag.range.start.character,
                },
                end: JsonPosition {
                    line: diag.range.end.line,
                    character: diag.range.end.character,
                },
            },
        })
        .collect();
    serde_json::to_string_pretty(&view).unwrap_or_else(|err| {
        eprintln!("failed to encode diagnostics: {}", err);
        process::exit(1);
    })
}
