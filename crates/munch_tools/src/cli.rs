//! CLI interface for munch

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "munch")]
#[command(about = "Build lexers from rules files and inspect their automata")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenize input with the lexer described by a rules file
    Lex {
        /// Rules file, one `NAME /regex/` or `NAME "literal"` per line
        #[arg(short, long)]
        rules: PathBuf,

        /// Input file (default: stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Stop at the first error
        #[arg(long)]
        strict: bool,
    },

    /// Render the automaton for a regex as Graphviz DOT
    Dot {
        /// Pattern in munch regex syntax
        pattern: String,

        /// Show the NFA instead of the DFA
        #[arg(long)]
        nfa: bool,

        /// Skip DFA minimization
        #[arg(long)]
        no_minimize: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dot_command() {
        let cli = Cli::parse_from(["munch", "dot", "a|b*", "--nfa"]);
        match cli.command {
            Commands::Dot {
                pattern,
                nfa,
                no_minimize,
                output,
            } => {
                assert_eq!(pattern, "a|b*");
                assert!(nfa);
                assert!(!no_minimize);
                assert!(output.is_none());
            }
            Commands::Lex { .. } => panic!("expected dot"),
        }
    }

    #[test]
    fn test_parse_lex_format() {
        let cli = Cli::parse_from(["munch", "lex", "-r", "x.rules", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Commands::Lex {
                format: OutputFormat::Json,
                strict: false,
                ..
            }
        ));
    }
}
