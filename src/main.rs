use std::{env, fs, path::Path};

use pofile::lexer::Lexer;
use pofile::parser::Parser;
use pofile::parser_error::ParseError;
use pofile::token_dumper::TokenDumper;
use pofile::Catalog;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let tokens_only = args.contains(&"--tokens".to_string());
    let no_color = args.contains(&"--no-color".to_string());
    let pretty = args.contains(&"--pretty".to_string());
    let entries = args.contains(&"--entries".to_string());
    let out = args
        .iter()
        .position(|a| a == "--out")
        .and_then(|i| args.get(i + 1));

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    // first non-flag argument that is not the value of --out is the filename
    let filename = args
        .iter()
        .enumerate()
        .skip(1)
        .find(|(i, a)| !a.starts_with('-') && args[i - 1] != "--out")
        .map(|(_, a)| a);

    match filename {
        Some(filename) => {
            ensure_extension(filename);
            match fs::read_to_string(filename) {
                Ok(source) => {
                    if tokens_only {
                        dump_tokens(&source, no_color, pretty);
                    } else {
                        run(&source, filename, entries, out.map(String::as_str));
                    }
                }
                Err(e) => {
                    eprintln!("Failed to read '{}': {}", filename, e);
                    std::process::exit(1);
                }
            }
        }
        None => print_usage(),
    }
}

fn ensure_extension(filename: &str) {
    let path = Path::new(filename);
    match path.extension().and_then(|e| e.to_str()) {
        Some("po") | Some("pot") => {}
        _ => {
            eprintln!("Error: expected a .po or .pot file, got {}", filename);
            std::process::exit(1);
        }
    }
}

fn dump_tokens(source: &str, no_color: bool, pretty: bool) {
    let tokens = Lexer::new(source).tokenize();

    let mut dumper = TokenDumper::new();
    if no_color {
        dumper = dumper.no_color();
    }
    if pretty {
        dumper = dumper.pretty();
    }

    dumper.dump(&tokens);
}

fn print_usage() {
    println!("pofile - gettext PO catalog parser");
    println!();
    println!("Usage:");
    println!("  pofile <file.po>                 Parse and summarize a catalog");
    println!("  pofile <file.po> --entries       Print every entry");
    println!("  pofile <file.po> --out <file>    Write the compiled catalog");
    println!("  pofile --tokens <file.po>        Show tokens only (--no-color, --pretty)");
    println!("  pofile --help, -h                Show this help");
    println!();
    println!("Logging is controlled with RUST_LOG, e.g. RUST_LOG=pofile=debug");
}

fn run(source: &str, filename: &str, entries: bool, out: Option<&str>) {
    let catalog = match Parser::new(Lexer::new(source)).parse() {
        Ok(catalog) => catalog,
        Err(ParseError::Failure(failure)) => {
            eprintln!("{}:{}", filename, failure);
            eprintln!("{}", failure.snippet(source));
            std::process::exit(1);
        }
        Err(ParseError::Integration(fault)) => {
            eprintln!("{}: {}", filename, fault);
            std::process::exit(2);
        }
    };

    if entries {
        print_entries(&catalog);
    } else {
        print_summary(&catalog);
    }

    if let Some(out) = out {
        let bytes = match catalog.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = fs::write(out, bytes) {
            eprintln!("Failed to write '{}': {}", out, e);
            std::process::exit(1);
        }
    }
}

fn print_summary(catalog: &Catalog) {
    let plural = catalog.iter().filter(|e| e.is_plural()).count();
    let fuzzy = catalog.iter().filter(|e| e.is_fuzzy()).count();
    let untranslated = catalog
        .iter()
        .filter(|e| !e.is_header() && e.translations.iter().all(String::is_empty))
        .count();

    println!("entries:      {}", catalog.len());
    println!("plural:       {}", plural);
    println!("fuzzy:        {}", fuzzy);
    println!("untranslated: {}", untranslated);
    if let Some(forms) = catalog.header_field("Plural-Forms") {
        println!("plural forms: {}", forms);
    }
}

fn print_entries(catalog: &Catalog) {
    for entry in catalog {
        if entry.is_header() {
            continue;
        }
        match &entry.context {
            Some(ctx) => println!("[{}] {:?}", ctx, entry.id),
            None => println!("{:?}", entry.id),
        }
        for (i, translation) in entry.translations.iter().enumerate() {
            println!("  {}: {:?}", i, translation);
        }
    }
}
