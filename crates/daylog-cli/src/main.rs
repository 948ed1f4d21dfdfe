use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use daylog_infrastructure::TomlActivityRepository;
use daylog_interaction::OpenAiClient;

mod app;

use app::App;

/// Slash commands offered for completion, in help order.
const COMMANDS: &[&str] = &[
    "/log", "/schedule", "/day", "/cal", "/prev", "/next", "/suggest", "/help", "/quit",
];

/// Readline helper: completes and hints slash commands, highlights them cyan.
#[derive(Clone, Default)]
struct CliHelper;

impl CliHelper {
    /// Commands whose spelling starts with the (possibly partial) input.
    fn matching(prefix: &str) -> impl Iterator<Item = &'static str> {
        COMMANDS.iter().copied().filter(move |cmd| cmd.starts_with(prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates = Self::matching(line)
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }

        Self::matching(line)
            .find(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daylog=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Missing credentials must halt before any prompt is shown.
    let provider = match OpenAiClient::try_from_env() {
        Ok(provider) => provider,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1);
        }
    };

    let repository: Arc<dyn daylog_core::activity::ActivityRepository> =
        Arc::new(TomlActivityRepository::at_default_path()?);
    let mut app = App::init(repository, provider).await?;

    let mut rl: Editor<CliHelper, rustyline::history::DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== daylog ===".bright_magenta().bold());
    println!(
        "{}",
        "Log activities with /log, browse the calendar with /cal, or just chat. /help for usage."
            .bright_black()
    );
    println!();

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                if App::<OpenAiClient>::is_quit(trimmed) {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                for output in app.handle_line(trimmed).await {
                    println!("{}", output.bright_blue());
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    if let Err(err) = app.shutdown().await {
        eprintln!("{}", format!("Failed to save activities: {err}").red());
    }

    Ok(())
}
