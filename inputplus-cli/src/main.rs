use inputplus::utils::LineReader;
use inputplus::{Constraint, PromptError, Terminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("------------------------------------------------------------");
    println!("                         INPUTPLUS                          ");
    println!("   numbers accept expressions: 6*7, (1+2)**2, 2^3, 7/2      ");
    println!("------------------------------------------------------------");

    match ask_all(&mut Terminal::interactive()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PromptError::Closed) | Err(PromptError::Interrupted) => {
            tracing::info!("input ended before all questions were answered");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Both questions go through the same terminal, so editor history from the
/// first answer is available at the second prompt.
fn ask_all<L: LineReader>(terminal: &mut Terminal<L>) -> Result<(), PromptError> {
    let name = terminal.ask_string(
        "What's your name?",
        &[Constraint::MinLength(2), Constraint::MaxLength(35)],
    )?;
    println!("{}", name);

    let cups = terminal.ask_int(
        "How many cups of coffee did you have today?",
        &[Constraint::at_least(0)],
    )?;
    println!("{}", cups);

    Ok(())
}
