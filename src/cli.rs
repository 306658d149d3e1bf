use crate::engine::builtins::change::{combination_to_expr, list_change};
use crate::engine::builtins::list::enumerate_expr;
use crate::engine::parser::parse_single;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// List exercises over s-expressions: enumeration, change-making, and `let` desugaring.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(name = "rsp-questions", bin_name = "rsp-questions")]
#[clap(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pairs every element of a list with its index, e.g. (a b) => ((0 a) (1 b)).
    Enumerate(EnumerateArgs),
    /// Lists every way to make change for a total from the given denominations.
    Change(ChangeArgs),
    /// Rewrites `let` forms into immediately-applied lambdas.
    Analyze(AnalyzeArgs),
    /// Starts an interactive read-analyze-print loop.
    Repl(ReplArgs),
}

#[derive(Args, Debug)]
pub struct EnumerateArgs {
    /// A list datum such as "(a b c)".
    #[clap(value_name = "LIST")]
    pub list: String,
}

#[derive(Args, Debug)]
pub struct ChangeArgs {
    /// The amount to make change for.
    #[clap(value_name = "TOTAL", allow_negative_numbers = true)]
    pub total: i64,

    /// Denominations, consumed in the order given.
    #[clap(value_name = "DENOMS", allow_negative_numbers = true)]
    pub denoms: Vec<i64>,

    /// Print only the number of combinations.
    #[clap(long)]
    pub count: bool,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Source text to rewrite.
    #[clap(short, long, value_name = "SCHEME_CODE", conflicts_with = "file")]
    pub expr: Option<String>,

    /// Path to a source file to rewrite.
    #[clap(value_name = "FILE_PATH", conflicts_with = "expr", required_unless_present = "expr")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReplArgs {
    /// Where to keep line-editing history. Defaults to the platform data directory.
    #[clap(long, value_name = "PATH", env = "RSP_QUESTIONS_HISTORY")]
    pub history_file: Option<PathBuf>,
}

/// Runs one subcommand, writing results to `out`.
#[instrument(skip(cli, out), fields(command = ?cli.command))]
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.command {
        Commands::Enumerate(args) => {
            let list = parse_single(&args.list)?;
            writeln!(out, "{}", enumerate_expr(&list)?)?;
        }
        Commands::Change(args) => {
            let ways = list_change(args.total, &args.denoms)?;
            debug!(count = ways.len(), "Computed change combinations");
            if args.count {
                writeln!(out, "{}", ways.len())?;
            } else {
                for way in &ways {
                    writeln!(out, "{}", combination_to_expr(way))?;
                }
            }
        }
        Commands::Analyze(args) => {
            let (source, source_name) = match (args.expr, args.file) {
                (Some(expr), _) => (expr, "<expr>".to_string()),
                (None, Some(path)) => {
                    info!(path = %path.display(), "Reading source file");
                    let source = std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    (source, path.display().to_string())
                }
                (None, None) => anyhow::bail!("Either --expr or a file path is required"),
            };
            for rewritten in crate::analyze_source(&source, &source_name)? {
                writeln!(out, "{}", rewritten)?;
            }
        }
        Commands::Repl(args) => crate::repl::start_repl(args.history_file)?,
    }
    Ok(())
}
