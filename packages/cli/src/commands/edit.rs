use super::{show::lookup, Context};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use profile_editor::{EditKey, EditSession, FieldVariant, Storage};
use profile_workspace::StorageWatcher;
use std::io::{self, BufRead, Write};
use tracing::warn;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Field to focus on start
    pub path: Option<String>,

    /// Do not follow changes made by other writers
    #[arg(long)]
    pub no_watch: bool,
}

/// One line of the interactive editor
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    Focus { path: String, variant: FieldVariant },
    Type(String),
    Enter,
    Escape,
    Blur,
    Undo,
    Show(Option<String>),
    Help,
    Quit,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        let command = match word {
            "focus" | "f" => ReplCommand::Focus {
                path: required(rest, "focus <path>")?,
                variant: FieldVariant::SingleLine,
            },
            "multi" | "m" => ReplCommand::Focus {
                path: required(rest, "multi <path>")?,
                variant: FieldVariant::MultiLine,
            },
            // Everything after the first space is the draft, spaces included
            "type" | "t" => ReplCommand::Type(rest.to_string()),
            "enter" => ReplCommand::Enter,
            "esc" | "escape" => ReplCommand::Escape,
            "blur" => ReplCommand::Blur,
            "undo" | "u" => ReplCommand::Undo,
            "show" | "s" => {
                let path = rest.trim();
                ReplCommand::Show((!path.is_empty()).then(|| path.to_string()))
            }
            "help" | "?" => ReplCommand::Help,
            "quit" | "q" | "exit" => ReplCommand::Quit,
            other => return Err(anyhow!("Unknown command: {}. Type help", other)),
        };
        Ok(command)
    }
}

fn required(rest: &str, usage: &str) -> Result<String> {
    let value = rest.trim();
    if value.is_empty() {
        return Err(anyhow!("Usage: {}", usage));
    }
    Ok(value.to_string())
}

pub fn edit(args: EditArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let mut watcher = if args.no_watch {
        None
    } else {
        match StorageWatcher::new(store.storage()) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!(error = %e, "Not following external changes");
                None
            }
        }
    };

    let mut session = EditSession::new(store);
    println!(
        "{} {} mode. Type {} for commands.",
        "✏️ Editing profile in".bright_blue().bold(),
        session.store().mode(),
        "help".bright_white()
    );

    let stdout = io::stdout();
    if let Some(path) = args.path {
        run_command(
            &mut session,
            ReplCommand::Focus {
                path,
                variant: FieldVariant::SingleLine,
            },
            &mut stdout.lock(),
        )?;
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", prompt(&session));
        stdout.lock().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        if let Some(watcher) = watcher.as_mut() {
            while let Some(event) = watcher.try_next_event() {
                if session.apply_external(&event) {
                    println!("  {} Reloaded changes from another editor", "↻".green());
                }
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        let result = ReplCommand::parse(&line)
            .and_then(|command| run_command(&mut session, command, &mut stdout.lock()));
        match result {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) => println!("  {} {}", "✗".red(), e),
        }
    }

    // Leaving commits whatever is still being edited
    if session.blur()? {
        println!("  {} Saved", "✓".green());
    }
    Ok(())
}

fn prompt<S: Storage>(session: &EditSession<S>) -> String {
    match session.focused() {
        Some(path) => format!("[{}]>", path),
        None => ">".to_string(),
    }
}

/// Run one command. Returns `false` when the session should end.
pub fn run_command<S: Storage>(
    session: &mut EditSession<S>,
    command: ReplCommand,
    out: &mut impl Write,
) -> Result<bool> {
    match command {
        ReplCommand::Focus { path, variant } => {
            session.focus_dotted(&path, variant)?;
            if let Some(focused) = session.focused().cloned() {
                writeln!(out, "  {}", session.displayed(&focused).unwrap_or_default())?;
            }
        }
        ReplCommand::Type(text) => session.type_text(text)?,
        ReplCommand::Enter => {
            if session.press(EditKey::Confirm)? {
                writeln!(out, "  {} Saved", "✓".green())?;
            }
        }
        ReplCommand::Escape => {
            session.press(EditKey::Cancel)?;
        }
        ReplCommand::Blur => {
            if session.blur()? {
                writeln!(out, "  {} Saved", "✓".green())?;
            }
        }
        ReplCommand::Undo => {
            if session.undo()? {
                writeln!(out, "  {} Undone", "↶".green())?;
            } else {
                writeln!(out, "  Nothing to undo")?;
            }
        }
        ReplCommand::Show(path) => {
            let value = match (path, session.focused().cloned()) {
                (Some(path), _) => lookup(session.document(), &path)?,
                (None, Some(focused)) => session
                    .displayed(&focused)
                    .unwrap_or_default()
                    .to_string(),
                (None, None) => return Err(anyhow!("Usage: show <path>")),
            };
            writeln!(out, "{}", value)?;
        }
        ReplCommand::Help => {
            writeln!(out, "  focus <path>   edit a single-line field")?;
            writeln!(out, "  multi <path>   edit a multi-line field")?;
            writeln!(out, "  type <text>    replace the draft")?;
            writeln!(out, "  enter          commit (adds a line break in multi-line fields)")?;
            writeln!(out, "  esc            discard the draft")?;
            writeln!(out, "  blur           commit and leave the field")?;
            writeln!(out, "  undo           revert the last change")?;
            writeln!(out, "  show [path]    print a value")?;
            writeln!(out, "  quit")?;
        }
        ReplCommand::Quit => return Ok(false),
    }
    Ok(true)
}
