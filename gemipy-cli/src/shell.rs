//! Interactive read-eval-print loop

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use console::style;
use gemipy_agent::QueryDispatcher;
use gemipy_core::{ConfigKey, ConfigManager, SessionManager};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::commands::{SlashCommand, COMMAND_NAMES};
use crate::render;
use crate::spinner::Spinner;

/// Line-editor helper: completion, hints and prompt colors for slash commands
#[derive(Clone)]
struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_NAMES.to_vec(),
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }

        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for CommandHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        match prompt.split_once('@') {
            Some((name, rest)) => {
                let (user, dir) = rest.split_once(':').unwrap_or((rest, ""));
                Owned(format!(
                    "{}{}{}{}",
                    style(name).green(),
                    style("@").cyan(),
                    style(user).blue(),
                    style(format!(":{}", dir)).cyan()
                ))
            }
            None => Borrowed(prompt),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(style(hint).dim().to_string())
    }

    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(style(line).cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for CommandHelper {}

/// On-disk name for a key typed by the user, as shown by `/config`
fn stored_key_name(raw: &str) -> &str {
    raw.parse::<ConfigKey>().map_or(raw, |key| key.as_str())
}

enum Flow {
    Continue,
    Exit,
}

/// Interactive session over the history and configuration managers
pub struct Shell {
    dispatcher: QueryDispatcher,
    session: SessionManager,
    config: ConfigManager,
    input_history: PathBuf,
    interrupted: Arc<AtomicBool>,
}

impl Shell {
    pub fn new(
        dispatcher: QueryDispatcher,
        session: SessionManager,
        config: ConfigManager,
        input_history: PathBuf,
    ) -> Self {
        Self {
            dispatcher,
            session,
            config,
            input_history,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Print the start-up banner for the current state
    pub fn banner(&self) {
        render::print_banner(
            self.session.conversations().len(),
            self.config.config(),
            self.dispatcher.has_credential(),
        );
    }

    /// Send one prompt without entering the loop
    pub async fn run_once(&mut self, prompt: &str) {
        self.ask(prompt, "Processing...").await;
    }

    /// Run until exit, EOF or interrupt. History is saved on every path out.
    pub async fn run(&mut self) -> Result<()> {
        let mut editor: Editor<CommandHelper, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(CommandHelper::new()));
        if let Err(e) = editor.load_history(&self.input_history) {
            debug!(
                "No input history loaded from {}: {}",
                self.input_history.display(),
                e
            );
        }

        let listener = self.listen_for_interrupt();
        let result = self.read_loop(&mut editor).await;
        listener.abort();

        self.shutdown(&mut editor);
        result
    }

    /// SIGINT outside the line editor only raises a flag; a call in flight
    /// finishes before the loop exits.
    fn listen_for_interrupt(&self) -> JoinHandle<()> {
        let flag = Arc::clone(&self.interrupted);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.store(true, Ordering::Release);
            }
        })
    }

    async fn read_loop(&mut self, editor: &mut Editor<CommandHelper, DefaultHistory>) -> Result<()> {
        loop {
            if self.interrupted.load(Ordering::Acquire) {
                render::notice("Interrupted by user.");
                return Ok(());
            }

            let line = match editor.readline(render::PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    render::notice("Interrupted by user.");
                    return Ok(());
                }
                Err(ReadlineError::Eof) => {
                    render::notice("Leaving...");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if let Err(e) = editor.add_history_entry(input) {
                debug!("Input not added to line history: {}", e);
            }
            self.save_input_history(editor);

            if let Some(command) = SlashCommand::parse(input) {
                match self.handle_command(command) {
                    Flow::Continue => continue,
                    Flow::Exit => return Ok(()),
                }
            }

            self.ask(input, "Thinking...").await;
            println!();
        }
    }

    fn handle_command(&mut self, command: SlashCommand) -> Flow {
        debug!("Slash command: {:?}", command);
        match command {
            SlashCommand::Exit => {
                render::notice("Goodbye!");
                return Flow::Exit;
            }
            SlashCommand::Clear => {
                render::clear_screen();
                self.banner();
            }
            SlashCommand::History => render::print_history(self.session.conversations()),
            SlashCommand::Load(id) => match self.session.load_conversation(&id) {
                Ok(messages) => render::success(&format!(
                    "Conversation {} loaded ({} messages).",
                    id,
                    messages.len()
                )),
                Err(e) => render::failure(&e.to_string()),
            },
            SlashCommand::LoadUsage => render::failure("Usage: /load <id>"),
            SlashCommand::Save(title) => {
                let max_history = self.config.config().max_history;
                match self.session.archive(&title, max_history) {
                    Some(entry) => {
                        info!("Archived conversation {} ({})", entry.id, entry.title);
                        render::success(&format!(
                            "Conversation saved as [{}] {}.",
                            entry.id, entry.title
                        ));
                    }
                    None => render::failure("Nothing to save: the current conversation is empty."),
                }
            }
            SlashCommand::ConfigShow => render::print_config(&self.config.entries()),
            SlashCommand::ConfigSet { key, value } => match self.config.set(&key, &value) {
                Ok(applied) => {
                    render::success(&format!(
                        "Config updated: {} = {}",
                        stored_key_name(&key),
                        applied
                    ));
                }
                Err(e) => render::failure(&e.to_string()),
            },
            SlashCommand::ConfigUsage => render::failure("Usage: /config <key> <value>"),
            SlashCommand::Help => render::print_help(),
            SlashCommand::Unknown(name) => {
                render::failure(&format!("Unknown command: /{}", name));
            }
        }
        Flow::Continue
    }

    async fn ask(&mut self, prompt: &str, waiting: &str) {
        let spinner = Spinner::start(waiting);
        let outcome = self
            .dispatcher
            .exchange(&mut self.session, self.config.config(), prompt)
            .await;
        spinner.stop();
        render::print_response(&outcome);
    }

    fn save_input_history(&self, editor: &mut Editor<CommandHelper, DefaultHistory>) {
        if let Err(e) = editor.save_history(&self.input_history) {
            warn!(
                "Failed to write input history {}: {}",
                self.input_history.display(),
                e
            );
        }
    }

    fn shutdown(&self, editor: &mut Editor<CommandHelper, DefaultHistory>) {
        if let Err(e) = self.session.save() {
            warn!("Failed to save history on exit: {}", e);
        }
        self.save_input_history(editor);
        info!("Shell closed");
    }
}
