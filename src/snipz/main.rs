use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use snipz::api::{CmdMessage, CmdResult, MessageLevel, SnipzApi};
use snipz::config::SnipzConfig;
use snipz::editor::edit_draft;
use snipz::error::{Result, SnipzError};
use snipz::index::DisplaySnippet;
use snipz::model::SnippetDraft;
use snipz::store::Backend;
use std::io::{self, BufRead, Read, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands, SnippetFields};

const LOG_VAR: &str = "SNIPZ_LOG";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the command ran but reported an error message.
async fn run() -> Result<bool> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SnipzConfig::from_env()?;
    let backend = Backend::from_config(&config)?;

    if let Some(Commands::Backend) = cli.command {
        println!("{}", backend.describe());
        return Ok(true);
    }

    let mut api = SnipzApi::new(backend);
    let loaded = api.load().await?;
    print_messages(&loaded.messages);

    let result = match cli.command {
        Some(Commands::View { selectors }) => handle_view(&api, &selectors)?,
        Some(Commands::Add { fields }) => handle_add(&mut api, fields).await?,
        Some(Commands::Edit { selector, fields }) => {
            handle_edit(&mut api, &selector, fields).await?
        }
        Some(Commands::Delete { selector, yes }) => handle_delete(&mut api, &selector, yes).await?,
        Some(Commands::List) | Some(Commands::Backend) | None => handle_list(&api),
    };

    print_messages(&result.messages);
    Ok(!result.has_errors())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "snipz=debug" } else { "snipz=warn" };
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_list(api: &SnipzApi<Backend>) -> CmdResult {
    let result = api.list_snippets();
    print_snippets(&result.listed_snippets);
    result
}

fn handle_view(api: &SnipzApi<Backend>, selectors: &[String]) -> Result<CmdResult> {
    let result = api.view_snippets(selectors)?;
    print_full_snippets(&result.listed_snippets);
    Ok(result)
}

async fn handle_add(api: &mut SnipzApi<Backend>, fields: SnippetFields) -> Result<CmdResult> {
    let has_required = fields.title.is_some() && (fields.code.is_some() || fields.code_file.is_some());
    let draft = fields_to_draft(fields, SnippetDraft::default())?;
    let draft = if has_required {
        draft
    } else {
        edit_draft(&draft)?
    };
    api.submit(&draft).await
}

async fn handle_edit(
    api: &mut SnipzApi<Backend>,
    selector: &str,
    fields: SnippetFields,
) -> Result<CmdResult> {
    let target = api.begin_edit(selector)?;
    let current = SnippetDraft::from_snippet(&target);

    let draft = if fields.is_empty() {
        let edited = edit_draft(&current)?;
        if edited == current {
            api.cancel_edit();
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info("No changes."));
            return Ok(result);
        }
        edited
    } else {
        fields_to_draft(fields, current)?
    };

    api.submit(&draft).await
}

async fn handle_delete(api: &mut SnipzApi<Backend>, selector: &str, yes: bool) -> Result<CmdResult> {
    let found = api.find(selector)?;
    if !yes && !confirm(&format!("Delete this snippet? ({})", found.snippet.title))? {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Nothing deleted."));
        return Ok(result);
    }
    api.delete_by_id(&found.snippet.id).await
}

/// Overlays the given flags on top of `base`.
fn fields_to_draft(fields: SnippetFields, base: SnippetDraft) -> Result<SnippetDraft> {
    let code = match (&fields.code, &fields.code_file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => read_code_file(path)?,
        (None, None) => base.code,
    };
    Ok(SnippetDraft {
        title: fields.title.unwrap_or(base.title),
        description: fields.description.unwrap_or(base.description),
        code,
    })
}

fn read_code_file(path: &std::path::Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(SnipzError::Io)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).map_err(SnipzError::Io)
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush().map_err(SnipzError::Io)?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(SnipzError::Io)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_full_snippets(snippets: &[DisplaySnippet]) {
    for (i, ds) in snippets.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {}",
            format!("{}.", ds.index).yellow(),
            ds.snippet.title.bold()
        );
        println!("{}", format!("{}  {}", ds.snippet.id, format_updated(ds.snippet.updated_at)).dimmed());
        if !ds.snippet.description.is_empty() {
            println!("\n{}", ds.snippet.description);
        }
        println!("--------------------------------");
        println!("{}", ds.snippet.code);
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 20;

fn print_snippets(snippets: &[DisplaySnippet]) {
    if snippets.is_empty() {
        println!("No snippets yet. Add one with `snipz add`.");
        return;
    }

    for ds in snippets {
        let idx_str = format!("{:>3}. ", ds.index);
        let summary = if ds.snippet.description.is_empty() {
            ds.snippet.title.clone()
        } else {
            format!("{} {}", ds.snippet.title, ds.snippet.description.replace('\n', " "))
        };

        let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);
        let summary = truncate_to_width(&summary, available);
        let padding = available.saturating_sub(summary.width());

        println!(
            "{}{}{}{}",
            idx_str.yellow(),
            summary,
            " ".repeat(padding),
            format!("{:>width$}", format_updated(ds.snippet.updated_at), width = TIME_WIDTH).dimmed()
        );
    }
}

/// Cuts `s` to at most `max_width` columns, ending in `…` when shortened.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    if max_width > 0 {
        result.push('…');
    }
    result
}

fn format_updated(updated_at: i64) -> String {
    let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(updated_at) else {
        return "Updated ?".to_string();
    };
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    format!(
        "Updated {}",
        formatter.convert(duration.to_std().unwrap_or_default())
    )
}
