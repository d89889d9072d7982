//! Terminal front end for browsing and editing the merchant list.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use merchant_admin::controller::MerchantList;
use merchant_admin::error::MerchantAdminError;
use merchant_admin::form::{FormErrors, FormField, MerchantForm};
use merchant_admin::models::{Merchant, MerchantId, MerchantStatus, SortField, SortOrder};
use merchant_admin::query::{MerchantPage, SortConfig};
use merchant_admin::storage::{InMemoryStorage, MerchantStore};
use owo_colors::OwoColorize;

/// Typed at a form prompt to abandon the form.
const CANCEL_INPUT: &str = ":cancel";

/// Merchant admin: search, sort, page through and edit merchant records.
#[derive(Debug, Parser)]
#[command(name = "merchant-admin", version, about)]
struct Cli {
    /// Start with an empty list instead of the built-in merchants.
    #[arg(long, global = true)]
    empty: bool,
    /// Initial search term (matches name, email or store).
    #[arg(long, global = true, value_name = "TERM")]
    search: Option<String>,
    /// Initial sort field: name, store, status or `joinDate`.
    #[arg(long, global = true, value_name = "FIELD", default_value = "name")]
    sort: SortField,
    /// Sort descending instead of ascending.
    #[arg(long, global = true)]
    desc: bool,
    /// Subcommand to execute (defaults to `shell`).
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Print one page of merchants and exit.
    List {
        /// 1-based page to print.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Print every matching merchant as JSON and exit.
    Export,
    /// Browse and edit merchants interactively.
    Shell,
}

/// A single line typed at the interactive prompt.
#[derive(Debug, Parser)]
#[command(name = "merchants", no_binary_name = true)]
struct ShellLine {
    /// Command to run.
    #[command(subcommand)]
    command: ShellCommand,
}

/// Commands understood by the interactive shell.
#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// Show the current page.
    #[command(alias = "ls")]
    List,
    /// Filter by name, email or store; no term clears the filter.
    Search {
        /// Words to search for.
        terms: Vec<String>,
    },
    /// Sort by a field; sorting by the same field again flips direction.
    Sort {
        /// One of name, store, status or `joinDate`.
        field: SortField,
    },
    /// Jump to a page.
    Page {
        /// 1-based page number.
        number: usize,
    },
    /// Go to the first page.
    First,
    /// Go to the previous page.
    #[command(alias = "previous")]
    Prev,
    /// Go to the next page.
    Next,
    /// Go to the last page.
    Last,
    /// Show every field of one merchant.
    Show {
        /// Merchant ID.
        id: MerchantId,
    },
    /// Add a new merchant.
    Add,
    /// Edit an existing merchant.
    Edit {
        /// Merchant ID.
        id: MerchantId,
    },
    /// Delete a merchant after confirmation.
    Delete {
        /// Merchant ID.
        id: MerchantId,
    },
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

/// Whether the shell keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Read the next command.
    Continue,
    /// Stop the shell.
    Quit,
}

/// What the user typed at a form field prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldInput {
    /// Keep the current value.
    Keep,
    /// Replace the value.
    Value(String),
    /// Abandon the form.
    Cancel,
}

/// Builds the controller from command-line options.
fn build_list(cli: &Cli) -> merchant_admin::error::Result<MerchantList<InMemoryStorage>> {
    let storage = if cli.empty {
        InMemoryStorage::new()
    } else {
        InMemoryStorage::seeded()?
    };
    let order = if cli.desc {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    };
    let mut builder = MerchantList::builder()
        .storage(storage)
        .sort(SortConfig::new(cli.sort, order));
    if let Some(term) = cli.search.as_deref() {
        builder = builder.search(term);
    }
    builder.build()
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    let _dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut list = match build_list(&cli) {
        Ok(list) => list,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize merchant list: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    dispatch(&mut list, cli.command.unwrap_or(Command::Shell))
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: MerchantStore>(list: &mut MerchantList<S>, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::List { page } => cmd_list(list, page),
        Command::Export => cmd_export(list),
        Command::Shell => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout().lock();
            run_shell(list, &mut input, &mut out)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the `list` subcommand: prints one page.
fn cmd_list<S: MerchantStore>(list: &mut MerchantList<S>, page: usize) -> io::Result<ExitCode> {
    let result = list.go_to_page(page).and_then(|_| list.view());
    match result {
        Ok(view) => {
            print_page(&mut io::stdout().lock(), &view, list.sort_config(), list.search_term())?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&mut io::stderr().lock(), &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `export` subcommand: prints all matching merchants as
/// JSON.
fn cmd_export<S: MerchantStore>(list: &MerchantList<S>) -> io::Result<ExitCode> {
    match export_json(list) {
        Ok(json) => {
            writeln!(io::stdout().lock(), "{json}")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&mut io::stderr().lock(), &err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Serializes the filtered, sorted merchants as pretty JSON.
fn export_json<S: MerchantStore>(list: &MerchantList<S>) -> merchant_admin::error::Result<String> {
    let merchants = list.ordered()?;
    Ok(serde_json::to_string_pretty(&merchants)?)
}

// ── Interactive shell ───────────────────────────────────────────────────

/// Reads one line, without its line terminator. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_owned()))
}

/// Runs the interactive loop until `quit` or end of input.
fn run_shell<S, R, W>(list: &mut MerchantList<S>, input: &mut R, out: &mut W) -> io::Result<()>
where
    S: MerchantStore,
    R: BufRead,
    W: Write,
{
    writeln!(
        out,
        "{} {}",
        "Merchants".green().bold(),
        "(type `help` for commands)".dimmed()
    )?;
    show_current_page(list, out)?;
    loop {
        write!(out, "{} ", "merchants>".cyan().bold())?;
        out.flush()?;
        let Some(raw) = read_line(input)? else {
            writeln!(out)?;
            break;
        };
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        match ShellLine::try_parse_from(words) {
            Ok(parsed) => {
                if execute(list, parsed.command, &raw, input, out)? == Flow::Quit {
                    break;
                }
            }
            Err(err) => write!(out, "{}", err.render())?,
        }
    }
    Ok(())
}

/// Returns everything after the first word of `line`, spacing included.
fn rest_of_line(line: &str) -> &str {
    line.trim_start()
        .split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest)
}

/// Runs one shell command. `line` is the raw text it was parsed from.
fn execute<S, R, W>(
    list: &mut MerchantList<S>,
    command: ShellCommand,
    line: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<Flow>
where
    S: MerchantStore,
    R: BufRead,
    W: Write,
{
    let moved = match command {
        ShellCommand::List => Ok(0),
        ShellCommand::Search { terms } => {
            // The term is taken verbatim so inner spacing survives.
            let term = if terms.is_empty() { "" } else { rest_of_line(line) };
            list.set_search(term);
            Ok(1)
        }
        ShellCommand::Sort { field } => {
            let config = list.sort_by(field);
            writeln!(
                out,
                "Sorted by {} ({})",
                config.field.label(),
                config.order.describe()
            )?;
            Ok(1)
        }
        ShellCommand::Page { number } => list.go_to_page(number),
        ShellCommand::First => Ok(list.first_page()),
        ShellCommand::Prev => list.previous_page(),
        ShellCommand::Next => list.next_page(),
        ShellCommand::Last => list.last_page(),
        ShellCommand::Show { id } => {
            match list.merchant(id) {
                Ok(merchant) => print_merchant(out, &merchant)?,
                Err(err) => print_error(out, &err)?,
            }
            return Ok(Flow::Continue);
        }
        ShellCommand::Add => {
            let form = list.open_create();
            writeln!(out, "{}", "Add New Merchant".green().bold())?;
            run_form(list, form, input, out)?;
            Ok(0)
        }
        ShellCommand::Edit { id } => {
            match list.open_edit(id) {
                Ok(form) => {
                    writeln!(out, "{} {}", "Edit Merchant".green().bold(), format_args!("#{id}").dimmed())?;
                    run_form(list, form, input, out)?;
                }
                Err(err) => print_error(out, &err)?,
            }
            Ok(0)
        }
        ShellCommand::Delete { id } => {
            confirm_delete(list, id, input, out)?;
            Ok(0)
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    };
    match moved {
        Ok(_) => show_current_page(list, out)?,
        Err(err) => print_error(out, &err)?,
    }
    Ok(Flow::Continue)
}

/// Prints the page the controller is currently on.
fn show_current_page<S: MerchantStore, W: Write>(list: &MerchantList<S>, out: &mut W) -> io::Result<()> {
    match list.view() {
        Ok(view) => print_page(out, &view, list.sort_config(), list.search_term()),
        Err(err) => print_error(out, &err),
    }
}

/// Prompts for form fields until the form validates or is cancelled.
///
/// The first pass visits every field; later passes revisit only the
/// fields that failed validation.
fn run_form<S, R, W>(
    list: &mut MerchantList<S>,
    initial: MerchantForm,
    input: &mut R,
    out: &mut W,
) -> io::Result<()>
where
    S: MerchantStore,
    R: BufRead,
    W: Write,
{
    let mut form = initial;
    let mut pending: Vec<FormField> = FormField::ALL.to_vec();
    loop {
        for &field in &pending {
            match prompt_field(input, out, field, form.value(field))? {
                FieldInput::Keep => {}
                FieldInput::Value(value) => form.set(field, value),
                FieldInput::Cancel => {
                    list.cancel_form();
                    writeln!(out, "{}", "Cancelled.".dimmed())?;
                    return Ok(());
                }
            }
        }
        match list.submit_form(&form) {
            Ok(merchant) => {
                writeln!(
                    out,
                    "{} {} {}",
                    "Saved".green().bold(),
                    merchant.name,
                    format_args!("(#{})", merchant.id).dimmed()
                )?;
                return Ok(());
            }
            Err(MerchantAdminError::Validation(errors)) => {
                print_form_errors(out, &errors)?;
                pending = errors.fields();
            }
            Err(err) => {
                print_error(out, &err)?;
                return Ok(());
            }
        }
    }
}

/// Prompts for a single form field.
fn prompt_field<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    field: FormField,
    current: &str,
) -> io::Result<FieldInput> {
    writeln!(out, "  {}", field.help().dimmed())?;
    if field == FormField::Status {
        write!(
            out,
            "{} ({}/{})",
            field.label().bold(),
            MerchantStatus::Active,
            MerchantStatus::Inactive
        )?;
    } else {
        write!(out, "{}", field.label().bold())?;
    }
    if current.is_empty() {
        write!(out, ": ")?;
    } else {
        write!(out, " [{current}]: ")?;
    }
    out.flush()?;
    let Some(line) = read_line(input)? else {
        return Ok(FieldInput::Cancel);
    };
    let entered = line.trim();
    Ok(if entered == CANCEL_INPUT {
        FieldInput::Cancel
    } else if entered.is_empty() {
        FieldInput::Keep
    } else {
        FieldInput::Value(entered.to_owned())
    })
}

/// Asks before deleting a merchant; only `y` or `yes` confirms.
fn confirm_delete<S, R, W>(
    list: &mut MerchantList<S>,
    id: MerchantId,
    input: &mut R,
    out: &mut W,
) -> io::Result<()>
where
    S: MerchantStore,
    R: BufRead,
    W: Write,
{
    let target = match list.request_delete(id) {
        Ok(target) => target,
        Err(err) => return print_error(out, &err),
    };
    write!(
        out,
        "Are you sure you want to delete merchant \"{}\"? This action cannot be undone. {} ",
        target.name,
        "[y/N]".dimmed()
    )?;
    out.flush()?;
    let answer = read_line(input)?.unwrap_or_default();
    if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        match list.confirm_delete() {
            Ok(removed) => writeln!(out, "{} {}", "Deleted".red().bold(), removed.name)?,
            Err(err) => print_error(out, &err)?,
        }
    } else {
        list.cancel_delete();
        writeln!(out, "{}", "Cancelled.".dimmed())?;
    }
    Ok(())
}

// ── Rendering ───────────────────────────────────────────────────────────

/// Returns a column heading, marked with an arrow when it is the active
/// sort field.
fn sort_heading(field: SortField, config: SortConfig) -> String {
    if config.field != field {
        return field.label().to_owned();
    }
    let arrow = match config.order {
        SortOrder::Asc => "\u{25b2}",
        SortOrder::Desc => "\u{25bc}",
    };
    format!("{} {arrow}", field.label())
}

/// Renders the page-number links, e.g. `... 2 [3] 4 ...`.
fn pagination_links(view: &MerchantPage) -> String {
    let mut parts: Vec<String> = Vec::new();
    if view.has_leading_gap() {
        parts.push("...".to_owned());
    }
    for number in view.page_numbers() {
        if number == view.page {
            parts.push(format!("[{number}]"));
        } else {
            parts.push(number.to_string());
        }
    }
    if view.has_trailing_gap() {
        parts.push("...".to_owned());
    }
    parts.join(" ")
}

/// Prints one page of merchants as a table with a summary line.
fn print_page<W: Write>(out: &mut W, view: &MerchantPage, sort: SortConfig, search: &str) -> io::Result<()> {
    if !search.is_empty() {
        writeln!(out, "{} {search}", "Search:".bold())?;
    }
    if view.items.is_empty() {
        writeln!(out, "{}", "No merchants found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new(sort_heading(SortField::Name, sort)).fg(Color::Cyan),
        Cell::new("Email").fg(Color::Cyan),
        Cell::new(sort_heading(SortField::Store, sort)).fg(Color::Cyan),
        Cell::new(sort_heading(SortField::Status, sort)).fg(Color::Cyan),
        Cell::new(sort_heading(SortField::JoinDate, sort)).fg(Color::Cyan),
    ]);

    for merchant in &view.items {
        _ = table.add_row(vec![
            Cell::new(merchant.id),
            Cell::new(&merchant.name),
            Cell::new(&merchant.email),
            Cell::new(&merchant.store),
            status_cell(merchant.status),
            Cell::new(merchant.join_date),
        ]);
    }

    writeln!(out, "{table}")?;
    if let Some((first, last)) = view.showing() {
        writeln!(
            out,
            "Showing {first} to {last} of {} results  {}",
            view.total_items,
            format_args!("page {} of {}: {}", view.page, view.total_pages, pagination_links(view)).dimmed()
        )?;
    }
    Ok(())
}

/// Colours a status cell.
fn status_cell(status: MerchantStatus) -> Cell {
    match status {
        MerchantStatus::Active => Cell::new(status).fg(Color::Green),
        MerchantStatus::Inactive => Cell::new(status).fg(Color::Red),
    }
}

/// Prints every field of one merchant.
fn print_merchant<W: Write>(out: &mut W, merchant: &Merchant) -> io::Result<()> {
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    let rows = [
        ("ID", merchant.id.to_string()),
        (FormField::Name.label(), merchant.name.clone()),
        (FormField::Email.label(), merchant.email.clone()),
        (FormField::Store.label(), merchant.store.clone()),
        (FormField::Status.label(), merchant.status.to_string()),
        ("Join Date", merchant.join_date.to_string()),
    ];
    for (label, value) in rows {
        _ = table.add_row(vec![Cell::new(label).fg(Color::Cyan), Cell::new(value)]);
    }
    writeln!(out, "{table}")
}

/// Prints field errors under a heading.
fn print_form_errors<W: Write>(out: &mut W, errors: &FormErrors) -> io::Result<()> {
    writeln!(out, "{}", "Please fix the following:".yellow().bold())?;
    for (field, message) in errors.iter() {
        writeln!(out, "  {} {message}", format_args!("{}:", field.label()).bold())?;
    }
    Ok(())
}

/// Prints an error line.
fn print_error<W: Write>(out: &mut W, err: &MerchantAdminError) -> io::Result<()> {
    writeln!(out, "{} {err}", "error:".red().bold())
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output; if stderr itself failed there is
            // nowhere left to report to.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
