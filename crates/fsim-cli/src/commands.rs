use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::Context;
use colored::Colorize;
use fsim_journal::JournalSink;
use fsim_namespace::{Namespace, NamespaceResult};
use tracing::{error, info};

use crate::cli::*;
use crate::settings::Settings;
use crate::shell::{ShellCommand, HELP};

/// Whether the session keeps reading commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    run_with_output(cli, &mut out)
}

fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let settings = Settings::resolve(cli.config.as_deref(), cli.journal.as_deref())?;

    let script = match &cli.command {
        Some(Command::Run(args)) => Some(
            fs::read_to_string(&args.script)
                .with_context(|| format!("reading script {}", args.script.display()))?,
        ),
        Some(Command::Shell) | None => None,
    };

    let mut ns = Namespace::open(&settings.journal_path, settings.journal_config())
        .with_context(|| format!("opening journal {}", settings.journal_path.display()))?;
    info!(journal = %settings.journal_path.display(), "namespace ready");

    let result = match script {
        Some(text) => run_session(&mut ns, text.as_bytes(), out, None, cli.format),
        None => run_session(
            &mut ns,
            io::stdin().lock(),
            out,
            Some(settings.prompt.as_str()),
            cli.format,
        ),
    };
    close_after_session(&mut ns, result)
}

/// Close the journal exactly once, whichever way the session ended.
///
/// A session error wins over a close error; the close error is still logged.
fn close_after_session<J: JournalSink>(
    ns: &mut Namespace<J>,
    session: anyhow::Result<()>,
) -> anyhow::Result<()> {
    let closed = ns.close().context("closing journal");
    if let (Err(_), Err(e)) = (&session, &closed) {
        let e = format!("{e:#}");
        error!(error = %e, "journal close failed after session error");
    }
    session.and(closed)
}

/// Read commands from `input` until `exit` or end of input.
///
/// A prompt is written before each line when given (interactive use).
pub fn run_session<J, R, W>(
    ns: &mut Namespace<J>,
    mut input: R,
    out: &mut W,
    prompt: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    J: JournalSink,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        if let Some(prompt) = prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e.to_string().yellow())?;
                continue;
            }
        };

        if execute(ns, command, format, out)? == Flow::Exit {
            break;
        }
    }
    Ok(())
}

/// Run one shell command against the namespace.
///
/// Namespace errors are printed and the session continues. Only failures to
/// write output are returned.
pub fn execute<J, W>(
    ns: &mut Namespace<J>,
    command: ShellCommand,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<Flow>
where
    J: JournalSink,
    W: Write,
{
    let outcome: NamespaceResult<String> = match command {
        ShellCommand::Mkdir { path } => ns
            .create_directory(&path)
            .map(|()| format!("Created directory {}", path.bold())),
        ShellCommand::Rmdir { path } => ns
            .delete_directory(&path)
            .map(|()| format!("Removed directory {}", path.bold())),
        ShellCommand::RenameDir { old, new } => ns
            .rename_directory(&old, &new)
            .map(|()| format!("Renamed {} → {}", old.bold(), new.bold())),
        ShellCommand::Ls { path } => {
            return match ns.list_directory(&path) {
                Ok(listing) => {
                    match format {
                        OutputFormat::Text => writeln!(out, "{listing}")?,
                        OutputFormat::Json => {
                            writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?
                        }
                    }
                    Ok(Flow::Continue)
                }
                Err(e) => {
                    report_error(out, &e)?;
                    Ok(Flow::Continue)
                }
            };
        }
        ShellCommand::CreateFile { dir, name } => ns
            .create_file(&dir, &name)
            .map(|()| format!("Created file {} in {}", name.cyan(), dir.bold())),
        ShellCommand::DeleteFile { dir, name } => ns
            .delete_file(&dir, &name)
            .map(|()| format!("Deleted file {} from {}", name.cyan(), dir.bold())),
        ShellCommand::RenameFile { dir, old, new } => ns
            .rename_file(&dir, &old, &new)
            .map(|()| format!("Renamed file {} → {} in {}", old.cyan(), new.cyan(), dir.bold())),
        ShellCommand::CopyFile { src, dst, name } => ns
            .copy_file(&src, &dst, &name)
            .map(|()| format!("Copied {} from {} to {}", name.cyan(), src.bold(), dst.bold())),
        ShellCommand::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        ShellCommand::Exit => return Ok(Flow::Exit),
    };

    match outcome {
        Ok(message) => writeln!(out, "{} {message}", "✓".green().bold())?,
        Err(e) => report_error(out, &e)?,
    }

    if let Some(fault) = ns.take_journal_fault() {
        writeln!(
            out,
            "{} journal write failed: {fault}",
            "warning:".yellow().bold()
        )?;
    }
    Ok(Flow::Continue)
}

fn report_error<W: Write>(out: &mut W, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "{} {}", "✗".red().bold(), err.to_string().red())
}
