//! Munch CLI
//!
//! Command-line tools for munch lexers.

use clap::Parser;
use munch::automata::Dfa;
use munch::lexer::{LexerConfig, Pattern, Token};
use munch::{LexerError, Span};
use munch_tools::cli::{Cli, Commands, OutputFormat};
use munch_tools::rules::{RuleKind, RuleSet};
use munch_tools::visualize::{dfa_to_dot, nfa_to_dot};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'a str,
    text: &'a str,
    span: Span,
}

#[derive(Serialize)]
struct ErrorRecord {
    message: String,
    span: Span,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Lex {
            rules,
            input,
            format,
            strict,
        } => {
            let rule_set = RuleSet::parse(&fs::read_to_string(&rules)?)?;
            let config = if strict {
                LexerConfig::strict()
            } else {
                LexerConfig::default()
            };
            let lexer = rule_set.build(config)?;
            let source = read_input(input.as_deref())?;
            log::info!(
                "lexing {} bytes with {} rules",
                source.len(),
                rule_set.rules().len()
            );

            match lexer.tokenize(&source) {
                Ok(tokens) => print_tokens(&rule_set, &tokens, format)?,
                Err(errors) => {
                    print_errors(&source, &errors, format)?;
                    std::process::exit(1);
                }
            }
        }
        Commands::Dot {
            pattern,
            nfa,
            no_minimize,
            output,
        } => {
            let pattern = Pattern::regex(pattern.as_str());
            let content = if nfa {
                nfa_to_dot(&pattern.to_nfa()?)?
            } else {
                let dfa: Dfa = pattern.compile(!no_minimize)?;
                log::info!("DFA has {} states", dfa.state_count());
                dfa_to_dot(&dfa)?
            };

            if let Some(output_path) = output {
                fs::write(&output_path, content)?;
                println!("Wrote automaton to {}", output_path.display());
            } else {
                print!("{content}");
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn print_tokens(
    rules: &RuleSet,
    tokens: &[Token<RuleKind>],
    format: OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            for token in tokens {
                println!(
                    "{}\t{}\t{:?}",
                    token.span.start,
                    rules.name(token.kind),
                    token.text
                );
            }
        }
        OutputFormat::Json => {
            let records: Vec<_> = tokens
                .iter()
                .map(|token| TokenRecord {
                    kind: rules.name(token.kind),
                    text: &token.text,
                    span: token.span,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}

fn print_errors(
    source: &str,
    errors: &[LexerError],
    format: OutputFormat,
) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            for error in errors {
                eprintln!("error: {}", error.format_with_context(source));
            }
        }
        OutputFormat::Json => {
            let records: Vec<_> = errors
                .iter()
                .map(|error| ErrorRecord {
                    message: error.kind.to_string(),
                    span: error.span,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}
