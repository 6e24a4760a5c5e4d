//! Terminal output: banner, listings and the typing effect

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use console::{style, Term};
use gemipy_agent::QueryOutcome;
use gemipy_core::utils::{short_date, truncate_chars};
use gemipy_core::{ArchivedConversation, ChatConfig, ConfigKey, ConfigValue};

/// Plain prompt text; colors are applied by the line editor
pub const PROMPT: &str = "gemipy@user:~$ ";

const TYPING_DELAY: Duration = Duration::from_millis(10);
const RULE_WIDTH: usize = 60;
const TITLE_WIDTH: usize = 40;

const LOGO: &str = r"
    ██████╗ ███████╗███╗   ███╗██╗██████╗ ██╗   ██╗
   ██╔════╝ ██╔════╝████╗ ████║██║██╔══██╗╚██╗ ██╔╝
   ██║  ███╗█████╗  ██╔████╔██║██║██████╔╝ ╚████╔╝
   ██║   ██║██╔══╝  ██║╚██╔╝██║██║██╔═══╝   ╚██╔╝
   ╚██████╔╝███████╗██║ ╚═╝ ██║██║██║        ██║
    ╚═════╝ ╚══════╝╚═╝     ╚═╝╚═╝╚═╝        ╚═╝
";

pub fn clear_screen() {
    let _ = Term::stdout().clear_screen();
}

fn rule() {
    println!("{}", style("-".repeat(RULE_WIDTH)).yellow());
}

fn boxed_title(title: &str) {
    let bar = "═".repeat(RULE_WIDTH + 2);
    println!("\n{}", style(format!("╔{}╗", bar)).blue());
    println!("{}", style(format!("║{:^width$}║", title, width = RULE_WIDTH + 2)).blue());
    println!("{}", style(format!("╚{}╝", bar)).blue());
}

/// Start-up banner with the current state
pub fn print_banner(archived: usize, config: &ChatConfig, has_credential: bool) {
    println!("{}", style(LOGO).magenta().bold());
    rule();
    let status = if has_credential {
        style("Ready for Gemini".to_string()).green()
    } else {
        style("No API key configured".to_string()).red()
    };
    println!("{} {}", style(">> Status:").cyan(), status);
    println!(
        "{} {}",
        style(">> History:").cyan(),
        style(format!("{} conversations", archived)).green()
    );
    println!("{} {}", style(">> Model:").cyan(), style(&config.model).green());
    rule();
    println!(
        "{}",
        style("Commands: /help, /hist, /save, /config, /exit").green()
    );
    rule();
    println!();
}

pub fn print_help() {
    let entries = [
        ("/help", "Show this help"),
        ("/hist", "List saved conversations"),
        ("/save [title]", "Save the current conversation"),
        ("/load <id>", "Load a saved conversation"),
        ("/config [key value]", "Show or change settings"),
        ("/clear", "Clear the screen"),
        ("/exit", "Quit"),
    ];

    boxed_title("GEMIPY HELP");
    let mut text = String::from("\nCommands:\n");
    for (command, description) in entries {
        text.push_str(&format!("  {:<20} - {}\n", command, description));
    }
    text.push_str("\nFeatures:\n");
    text.push_str("  • Persistent history\n");
    text.push_str("  • Conversation context\n");
    text.push_str("  • Configurable model\n");
    type_out(&text, TYPING_DELAY);
}

pub fn print_history(conversations: &[ArchivedConversation]) {
    if conversations.is_empty() {
        println!("{}", style("No saved conversations.").yellow());
        return;
    }

    boxed_title("CHAT HISTORY");
    for conversation in conversations {
        println!(
            "{} {} {}",
            style(format!("[{}]", conversation.id)).cyan(),
            style(short_date(&conversation.created_at)).green(),
            style(format!(
                "- {}",
                truncate_chars(&conversation.title, TITLE_WIDTH)
            ))
            .cyan()
        );
    }
    println!(
        "\n{}",
        style("Use '/load <id>' to load a conversation.").yellow()
    );
}

pub fn print_config(entries: &[(ConfigKey, ConfigValue)]) {
    boxed_title("CONFIGURATION");
    for (key, value) in entries {
        println!(
            "{} {}",
            style(format!("{:15}", key.as_str())).cyan(),
            style(value).green()
        );
    }
    println!(
        "\n{}",
        style("Use '/config <key> <value>' to change a setting.").yellow()
    );
}

/// Model output under the response header, typed out
pub fn print_response(outcome: &QueryOutcome) {
    println!("\n{}\n", style(">> RESPONSE:").cyan());
    if outcome.is_failure() {
        type_out(&style(outcome.text()).red().to_string(), TYPING_DELAY);
    } else {
        type_out(outcome.text(), TYPING_DELAY);
    }
}

pub fn success(message: &str) {
    println!("{}", style(message).green());
}

pub fn failure(message: &str) {
    println!("{}", style(message).red());
}

pub fn notice(message: &str) {
    println!("\n{}", style(message).yellow());
}

/// Write `text` one character at a time, then a newline
pub fn type_out(text: &str, delay: Duration) {
    let mut stdout = io::stdout().lock();
    for ch in text.chars() {
        let _ = write!(stdout, "{}", ch);
        let _ = stdout.flush();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    let _ = writeln!(stdout);
}
