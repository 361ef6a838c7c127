//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Installs the logging subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Locate the project and load settings
//! 3. **Dispatch**: One `match` over [`Commands`]
//! 4. **Interaction**: Disambiguation and confirmation prompts, the editor
//! 5. **Error Handling**: Everything bubbles up as `anyhow::Error` to `main`

use super::prompt::{choose_section, confirm, Choice};
use super::render::{render_list, render_messages, route_messages};
use super::setup::{build_command, parse_cli, Commands, CompletionShell};
use anyhow::{bail, Context, Result};
use clap_complete::CompleteEnv;
use kodbapp::api::{check_programs, new_project};
use kodbapp::commands::edit::EditTarget;
use kodbapp::commands::CmdResult;
use kodbapp::config::load_config;
use kodbapp::editor::{get_editor, open_in_editor};
use kodbapp::error::KodbError;
use kodbapp::init::{initialize, KodbContext};
use kodbapp::model::Section;
use kodbapp::pipeline::{PandocTectonic, PandocWordCount};
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "KODB_LOG";

pub fn run() -> Result<()> {
    // Answers shell completion requests and exits when `COMPLETE` is set
    CompleteEnv::with_factory(build_command).complete();

    let cli = parse_cli();
    let verbose = cli.verbose;
    init_logging(verbose);

    let cwd = std::env::current_dir().context("Cannot read the current directory")?;

    match cli.command {
        Commands::Init { default } => print_result(new_project(&cwd, default)?, verbose),
        Commands::New { dir, default } => {
            print_result(new_project(&cwd.join(dir), default)?, verbose)
        }
        Commands::Completions { shell } => print_completions(shell),
        Commands::Check => handle_check(&cwd),
        Commands::Add { name, position } => {
            let ctx = initialize(&cwd)?;
            print_result(ctx.api.add(&name, position.as_deref())?, verbose)
        }
        Commands::Remove { tokens, yes } => {
            handle_remove(&initialize(&cwd)?, &tokens, yes, verbose)
        }
        Commands::Switch { first, second } => {
            let ctx = initialize(&cwd)?;
            let Some(a) = pick_section(&ctx, &first)? else {
                return Ok(());
            };
            let Some(b) = pick_section(&ctx, &second)? else {
                return Ok(());
            };
            print_result(ctx.api.switch(&a, &b)?, verbose)
        }
        Commands::Move { token, position } => {
            let ctx = initialize(&cwd)?;
            let Some(section) = pick_section(&ctx, &token)? else {
                return Ok(());
            };
            print_result(ctx.api.move_section(&section, &position)?, verbose)
        }
        Commands::Edit { token } => handle_edit(&initialize(&cwd)?, token.as_deref()),
        Commands::List => {
            let ctx = initialize(&cwd)?;
            let result = ctx.api.list()?;
            print!(
                "{}",
                render_list(result.title.as_deref(), &result.listed_sections, ctx.api.paths().root())
            );
            print_report(result)
        }
        Commands::Build => {
            let ctx = initialize(&cwd)?;
            let pipeline = PandocTectonic::from_config(&ctx.config);
            print_result(ctx.api.build(&pipeline)?, verbose)
        }
        Commands::Stats => {
            let ctx = initialize(&cwd)?;
            let counter = PandocWordCount::from_config(&ctx.config, ctx.api.paths().root());
            print_report(ctx.api.stats(&counter)?)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Output of a command that changes the project: silent on success unless
/// `verbose`, problems on stderr.
fn print_result(result: CmdResult, verbose: bool) -> Result<()> {
    let (out, err) = route_messages(&result.messages, verbose);
    print!("{}", out);
    eprint!("{}", err);
    Ok(())
}

/// Output of a command whose messages are what the user asked for.
fn print_report(result: CmdResult) -> Result<()> {
    print!("{}", render_messages(&result.messages));
    Ok(())
}

/// Resolves a token to one section, asking the user when it is ambiguous.
/// `None` means the user cancelled. Input ending without an answer leaves the
/// ambiguity unresolved, which is an error.
fn pick_section(ctx: &KodbContext, token: &str) -> Result<Option<Section>> {
    let candidates = ctx.api.resolve(token)?;
    choose_one(token, candidates)
}

fn choose_one(token: &str, mut candidates: Vec<Section>) -> Result<Option<Section>> {
    match candidates.len() {
        0 => Err(KodbError::SectionNotFound(token.to_string()).into()),
        1 => Ok(candidates.pop()),
        _ => {
            let choice =
                choose_section(&mut io::stdin().lock(), &mut io::stderr(), token, &candidates)?;
            match choice {
                Choice::Picked(section) => Ok(Some(section)),
                Choice::Cancelled => Ok(None),
                Choice::NoAnswer => Err(KodbError::AmbiguousSection {
                    token: token.to_string(),
                    candidates: candidates.into_iter().map(|s| s.path).collect(),
                }
                .into()),
            }
        }
    }
}

fn handle_remove(ctx: &KodbContext, tokens: &[String], yes: bool, verbose: bool) -> Result<()> {
    // Every token is resolved against the listing before anything is removed
    let mut sections = Vec::with_capacity(tokens.len());
    for token in tokens {
        match pick_section(ctx, token)? {
            Some(section) => sections.push(section),
            None => return Ok(()),
        }
    }

    if !yes {
        let names: Vec<String> = sections
            .iter()
            .map(|s| format!("{} ({})", s.name, s.index))
            .collect();
        let question = format!("Remove {}?", names.join(", "));
        if !confirm(&mut io::stdin().lock(), &mut io::stderr(), &question)? {
            eprintln!("Nothing removed");
            return Ok(());
        }
    }

    print_result(ctx.api.remove(&sections)?, verbose)
}

fn handle_edit(ctx: &KodbContext, token: Option<&str>) -> Result<()> {
    let path = match ctx.api.edit_target(token)? {
        EditTarget::Sources(path) | EditTarget::Metadata(path) => path,
        EditTarget::Sections(candidates) => {
            let token = token.unwrap_or_default();
            match choose_one(token, candidates)? {
                Some(section) => section.path,
                None => return Ok(()),
            }
        }
    };

    let editor = get_editor(ctx.config.editor.as_deref())?;
    tracing::debug!("opening {} with {}", path.display(), editor);
    open_in_editor(&editor, &path)?;
    Ok(())
}

/// Works inside a project (using its settings) and outside one (global settings only).
fn handle_check(cwd: &Path) -> Result<()> {
    let result = match initialize(cwd) {
        Ok(ctx) => ctx.api.check()?,
        Err(_) => check_programs(&load_config(None))?,
    };
    let failed = result.has_errors();
    print_report(result)?;
    if failed {
        bail!("Some programs needed to build are missing");
    }
    Ok(())
}

fn print_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = build_command();
    clap_complete::generate(
        clap_complete::Shell::from(shell),
        &mut cmd,
        "kodb",
        &mut io::stdout(),
    );
    Ok(())
}
