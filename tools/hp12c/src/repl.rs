//! Interactive keypad
//!
//! Each line is split on whitespace and pressed key by key; the display is
//! printed after every line. Lines starting with `:` are REPL commands.

use anyhow::{Context, Result};
use colored::*;
use hp12c_engine::keys;
use hp12c_engine::Calculator;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

use crate::keymap;
use crate::view;

const COMMANDS: [&str; 5] = [":stack", ":regs", ":help", ":quit", ":exit"];

// ============================================================================
// Tab Completion Helper
// ============================================================================

/// REPL helper providing Tab completion for key legends and commands
struct KeypadHelper;

impl Helper for KeypadHelper {}

impl Hinter for KeypadHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for KeypadHelper {}

impl Validator for KeypadHelper {}

impl Completer for KeypadHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let start = line.rfind(char::is_whitespace).map_or(0, |i| i + 1);
        Ok((start, complete_word(&line[start..])))
    }
}

/// Legends, aliases and (at the start of a word) commands matching `prefix`
fn complete_word(prefix: &str) -> Vec<Pair> {
    let candidates: Vec<&str> = if prefix.starts_with(':') {
        COMMANDS.to_vec()
    } else {
        keys::legends().chain(keymap::aliases()).collect()
    };

    candidates
        .into_iter()
        .filter(|c| !prefix.is_empty() && c.starts_with(prefix))
        .map(|c| Pair {
            display: c.to_string(),
            replacement: c.to_string(),
        })
        .collect()
}

// ============================================================================
// REPL loop
// ============================================================================

/// What the loop does after a line
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive REPL loop
pub fn run(calc: &mut Calculator) -> Result<()> {
    let config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl = Editor::with_config(config).context("Failed to initialize readline")?;
    rl.set_helper(Some(KeypadHelper));

    println!("{}", "HP-12C keypad".bright_cyan().bold());
    println!(
        "Type keys separated by spaces, '{}' for help, {} for completion\n",
        ":help".bright_yellow(),
        "Tab".bright_cyan()
    );
    println!("{}", view::display_line(calc));

    loop {
        match rl.readline("hp12c> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                // Add to history (ignore errors)
                let _ = rl.add_history_entry(line);

                if execute_line(calc, line) == Flow::Quit {
                    break;
                }
            },
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - ignore and continue
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                break;
            },
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    println!("Bye!");
    Ok(())
}

/// Run one REPL line
fn execute_line(calc: &mut Calculator, line: &str) -> Flow {
    match line {
        ":quit" | ":exit" | ":q" => return Flow::Quit,
        ":stack" => view::print_stack(calc),
        ":regs" => view::print_registers(calc),
        ":help" | "?" => print_help(),
        command if command.starts_with(':') => {
            println!(
                "Unknown command '{}'. Type '{}' for available commands.",
                command.red(),
                ":help".bright_yellow()
            );
        },
        input => {
            for key in keymap::expand_line(input) {
                if let Err(e) = calc.try_press_key(&key) {
                    eprintln!("{} {}", "Ignored:".yellow(), e);
                }
            }
            println!("{}", view::display_line(calc));
        },
    }
    Flow::Continue
}

fn print_help() {
    println!("{}", "Keys".bright_cyan().bold());
    println!("  0-9 , .        number entry (',' and '.' are the decimal separator)");
    println!("  ENTER CLx CHS EEX + - × ÷ x<>y R↓ y^x 1/x √x % Δ%");
    println!("  n i PV PMT FV  store a typed value, or solve for the register");
    println!("  STO d / RCL d  storage registers 0-9");
    println!("  f / g          shift; f followed by a digit sets decimal places");
    println!("  Σ+ CLΣ x̄ s SL SOYD DB ΔDYS DATE ON");
    println!("{}", "Aliases".bright_cyan().bold());
    println!("  {}", keymap::aliases().collect::<Vec<_>>().join(" "));
    println!("{}", "Commands".bright_cyan().bold());
    println!("  :stack  :regs  :help  :quit");
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn replacements(prefix: &str) -> Vec<String> {
        complete_word(prefix).into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_complete_legends_and_aliases() {
        let found = replacements("P");
        assert!(found.contains(&"PV".to_string()));
        assert!(found.contains(&"PMT".to_string()));
        assert!(replacements("sq").contains(&"sqrt".to_string()));
        assert!(replacements("").is_empty());
    }

    #[test]
    fn test_complete_commands() {
        assert_eq!(replacements(":st"), [":stack"]);
    }

    #[test]
    fn test_execute_line() {
        let mut calc = Calculator::new();
        assert_eq!(execute_line(&mut calc, "3 enter 4 +"), Flow::Continue);
        assert_eq!(calc.display(), "7,00");
        assert_eq!(execute_line(&mut calc, ":bogus"), Flow::Continue);
        assert_eq!(execute_line(&mut calc, ":quit"), Flow::Quit);
    }
}
