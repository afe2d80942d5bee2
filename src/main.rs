//! CLI tool that checks whether a PDF is suitable for vector-graphics work.
//!
//! This binary is the presentation layer around the vectorcheck crate: it
//! picks the input file, hands its bytes to the classifier and prints the
//! verdict.

use std::path::Path;
use std::{env, process};
use vectorcheck::{CheckError, ClassifierConfig, PdfAnalyzer, Status, StructureHeuristic, Verdict};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let pdf_path = &args[1];
    let json = args.contains(&"--json".to_string());

    let config = ClassifierConfig {
        structure_heuristic: if args.contains(&"--strict".to_string()) {
            StructureHeuristic::Strict
        } else {
            StructureHeuristic::Legacy
        },
        short_circuit: !args.contains(&"--no-short-circuit".to_string()),
        max_input_size: Some(512 * 1024 * 1024), // 512MB limit
    };

    if !has_pdf_extension(pdf_path) {
        eprintln!("❌ '{}' is not a .pdf file", pdf_path);
        process::exit(1);
    }

    match run_check(pdf_path, config) {
        Ok(verdict) if json => match serde_json::to_string_pretty(&verdict) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("❌ Failed to serialize verdict: {}", e);
                process::exit(1);
            }
        },
        Ok(verdict) => print_verdict(&verdict),
        Err(CheckError::DocumentUnreadable(reason)) => {
            if json {
                println!("{}", serde_json::json!({ "status": "Unreadable", "error": reason }));
            } else {
                eprintln!("\n⚠️  Unreadable document: {}", reason);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage(program_name: &str) {
    println!("📄 vectorcheck - Vector PDF Quality Checker");
    println!();
    println!("USAGE:");
    println!("    {} <pdf_file> [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <pdf_file>            Path to the PDF file to check");
    println!();
    println!("OPTIONS:");
    println!("    --json                Print the verdict as JSON");
    println!("    --strict              Require a structure tree or optional content groups");
    println!("    --no-short-circuit    Visit every page even once the verdict is settled");
    println!("    -h, --help            Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    {} drawing.pdf", program_name);
    println!("    {} scan.pdf --json", program_name);
    println!();
    println!("Set RUST_LOG=debug to see per-page signals.");
}

fn has_pdf_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn run_check(pdf_path: &str, config: ClassifierConfig) -> vectorcheck::Result<Verdict> {
    PdfAnalyzer::with_config(pdf_path, config)?.classify()
}

fn print_verdict(verdict: &Verdict) {
    let marker = match verdict.status() {
        Status::Good => "✅",
        Status::Bad => "❌",
    };
    println!("{}", "─".repeat(60));
    println!("{} Result: {}", marker, verdict.status());
    for reason in verdict.reasons() {
        println!("   • {}", reason);
    }
    println!("{}", "─".repeat(60));
}
