use anyhow::Result;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tcalc::Interpreter;

#[derive(Parser)]
#[command(name = "tcalc", version, about = "Command-line calculator with operation history")]
struct Cli {
    /// Expression to evaluate; starts an interactive prompt when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

const BANNER: &str = "\
==================================================
CALCULATOR
==================================================
Basic: +, -, *, /, ** (power)
Advanced: sqrt, %, !, log, ln
Trigonometric: sin, cos, tan (in degrees)
Type 'help' for details, 'quit' to leave.
==================================================";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut interp = Interpreter::new();

    if !cli.expression.is_empty() {
        let line = cli.expression.join(" ");
        debug!(%line, "one-shot mode");
        let reply = interp.interpret(&line);
        if !reply.is_empty() {
            println!("{}", reply);
        }
        return Ok(());
    }

    run_interactive(&mut interp)
}

fn run_interactive(interp: &mut Interpreter) -> Result<()> {
    println!("{}", BANNER);

    let mut rl = DefaultEditor::new()?;
    while interp.is_running() {
        match rl.readline("calc> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                let reply = interp.interpret(&line);
                if !reply.is_empty() {
                    println!("{}", reply);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
