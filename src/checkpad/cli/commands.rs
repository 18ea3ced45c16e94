//! Dispatch from parsed arguments to the API, and from results to stdout.
//!
//! - `run()`: parses, sets up logging and the context, dispatches
//! - `handle_*()`: one per command; calls the API and prints the result

use super::render::{
    print_messages, render_config, render_document_list, render_report, render_text_list,
};
use super::setup::{Cli, Commands};
use checkpad::api::{CheckpadApi, CmdResult, ConfigAction};
use checkpad::config::CheckpadConfig;
use checkpad::error::Result;
use checkpad::export::{ExportFormat, DEFAULT_MARKDOWN_NAME};
use checkpad::init::initialize;
use checkpad::model::Scope;
use checkpad::source::DocumentSource;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

struct AppContext {
    api: CheckpadApi<Box<dyn DocumentSource>>,
    scope: Scope,
    config: CheckpadConfig,
    cwd: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Show { document }) => handle_show(&ctx, &document),
        Some(Commands::Check { document, items }) => {
            let result = ctx.api.check(&document, &items)?;
            print_update(&result);
            Ok(())
        }
        Some(Commands::Uncheck { document, items }) => {
            let result = ctx.api.uncheck(&document, &items)?;
            print_update(&result);
            Ok(())
        }
        Some(Commands::Toggle { document, items }) => {
            let result = ctx.api.toggle(&document, &items)?;
            print_update(&result);
            Ok(())
        }
        Some(Commands::All { document }) => {
            let result = ctx.api.toggle_all(&document)?;
            print_update(&result);
            Ok(())
        }
        Some(Commands::Export {
            document,
            name,
            markdown,
            out,
        }) => handle_export(&ctx, &document, name, markdown, out),
        Some(Commands::Complete { input }) => handle_complete(&ctx, &input),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let ctx = initialize(&cwd, cli.global)?;

    Ok(AppContext {
        api: ctx.api,
        scope: ctx.scope,
        config: ctx.config,
        cwd,
    })
}

/// Prints `text`, ending it with exactly one newline.
fn print_block(text: &str) {
    let text = text.trim_end_matches('\n');
    if !text.is_empty() {
        println!("{}", text);
    }
}

fn print_update(result: &CmdResult) {
    if let Some(report) = &result.report {
        print_block(&render_report(report));
        println!();
    }
    print_messages(&result.messages);
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_documents()?;
    print_block(&render_document_list(&result.documents));
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, document: &str) -> Result<()> {
    let result = ctx.api.show(document)?;
    if let Some(report) = &result.report {
        print_block(&render_report(report));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    document: &str,
    name: Option<String>,
    markdown: bool,
    out: Option<String>,
) -> Result<()> {
    let (format, default_name) = if markdown {
        (ExportFormat::Markdown, DEFAULT_MARKDOWN_NAME.to_string())
    } else {
        (ExportFormat::Html, ctx.config.export_name.clone())
    };
    let out_dir = match out {
        Some(dir) => ctx.cwd.join(dir),
        None => ctx.cwd.clone(),
    };

    let result = ctx
        .api
        .export(document, format, name.as_deref(), &default_name, &out_dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_complete(ctx: &AppContext, input: &str) -> Result<()> {
    let result = ctx.api.complete(input)?;
    print_block(&render_text_list(&result.suggestions));
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(ctx.scope, action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_block(&render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init(ctx.scope)?;
    print_messages(&result.messages);
    Ok(())
}
