use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use authbook_sdk::{
    AccountUpdate, AuthBook, BookConfig, Credential, OrderedEntry, OrderedMap, StepHeader,
    YamlFileStore,
};
use authbook_store::codec::decode_update;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let book = open_book(cli.config.as_deref(), cli.data_file.as_deref())?;
    let format = cli.format;
    match cli.command {
        Command::Generate(args) => cmd_generate(&book, args, format),
        Command::Provision(args) => cmd_provision(&book, args, format),
        Command::Write(args) => cmd_write(&book, args),
        Command::Step(args) => cmd_step(&book, args),
        Command::Read(args) => cmd_read(&book, args, format),
        Command::Resolve(args) => cmd_resolve(&book, args, format),
        Command::List(args) => cmd_list(&book, args, format),
    }
}

fn open_book(
    config: Option<&Path>,
    data_file: Option<&Path>,
) -> anyhow::Result<AuthBook<YamlFileStore>> {
    let mut config = match config {
        Some(path) => BookConfig::load(path)?,
        None => BookConfig::default(),
    };
    if let Some(path) = data_file {
        let file_name = path
            .file_name()
            .with_context(|| format!("--data-file {} does not name a file", path.display()))?;
        config.data_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.file_name = file_name.to_string_lossy().into_owned();
    }
    debug!(path = %config.data_path().display(), lock = config.lock, "opening book");
    Ok(AuthBook::open(&config))
}

/// Resolve an `--input` argument to JSON text.
fn read_input(raw: &str) -> anyhow::Result<String> {
    if raw == "-" {
        return io::read_to_string(io::stdin()).context("failed to read stdin");
    }
    match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {path}")),
        None => Ok(raw.to_string()),
    }
}

fn parse_update(raw: &str) -> anyhow::Result<AccountUpdate> {
    let text = read_input(raw)?;
    let json: serde_json::Value =
        serde_json::from_str(&text).context("--input is not valid JSON")?;
    let tree = serde_yaml::to_value(&json)?;
    decode_update(&tree).context("--input is not a valid account update")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_accounts(accounts: &OrderedMap<Credential>) {
    if accounts.is_empty() {
        println!("No accounts.");
    }
    for (address, credential) in accounts {
        println!(
            "{}  {}  {}",
            address.bold(),
            credential.email.cyan(),
            credential.password.dimmed()
        );
    }
}

fn print_entries(entries: &[OrderedEntry]) {
    if entries.is_empty() {
        println!("No accounts.");
    }
    for (i, entry) in entries.iter().enumerate() {
        let email = if entry.email.is_empty() {
            "(none)".dimmed()
        } else {
            entry.email.cyan()
        };
        println!(
            "{:>3}  {}  {}  {}",
            i,
            entry.address.bold(),
            email,
            entry.password.dimmed()
        );
    }
}

fn cmd_generate(
    book: &AuthBook<YamlFileStore>,
    args: GenerateArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if args.list {
        let list = book.generate_list_for_addresses(&args.addresses);
        if format == OutputFormat::Json {
            return print_json(&list);
        }
        let entries: Vec<OrderedEntry> = args
            .addresses
            .iter()
            .zip(&list)
            .map(|(address, credential)| credential.at(address.trim()))
            .collect();
        print_entries(&entries);
    } else {
        let accounts = book.generate_for_addresses(&args.addresses);
        if format == OutputFormat::Json {
            return print_json(&accounts);
        }
        print_accounts(&accounts);
    }
    Ok(())
}

fn cmd_provision(
    book: &AuthBook<YamlFileStore>,
    args: ProvisionArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let NodeArgs { project, file } = &args.node;
    let written = book.provision(project, file, &args.addresses)?;
    if format == OutputFormat::Json {
        return print_json(&written);
    }
    let list = written.accounts_list.unwrap_or_default();
    println!(
        "{} Provisioned {} accounts for {}/{}",
        "✓".green().bold(),
        list.len(),
        project.yellow(),
        file.yellow()
    );
    print_entries(&list);
    Ok(())
}

fn cmd_write(book: &AuthBook<YamlFileStore>, args: WriteArgs) -> anyhow::Result<()> {
    let update = parse_update(&args.input)?;
    book.write(&args.node.project, &args.node.file, &update)?;
    println!(
        "{} Written to {}/{}",
        "✓".green().bold(),
        args.node.project.yellow(),
        args.node.file.yellow()
    );
    Ok(())
}

fn cmd_step(book: &AuthBook<YamlFileStore>, args: StepArgs) -> anyhow::Result<()> {
    let update = parse_update(&args.input)?;
    let header = StepHeader::new(args.index, args.name, args.event);
    book.write_step(&args.node.project, &args.node.file, &header, &update)?;
    println!(
        "{} Recorded {} on {}/{}",
        "✓".green().bold(),
        header.resolved_name().cyan(),
        args.node.project.yellow(),
        args.node.file.yellow()
    );
    Ok(())
}

fn cmd_read(
    book: &AuthBook<YamlFileStore>,
    args: ReadArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let NodeArgs { project, file } = &args.node;
    let json = format == OutputFormat::Json;
    match args.view {
        View::Address => {
            let accounts = book.read(project, file)?;
            if json {
                return print_json(&accounts);
            }
            print_accounts(&accounts);
        }
        View::Order => {
            let list = book.read_list(project, file)?;
            if json {
                return print_json(&list);
            }
            print_entries(&list);
        }
        View::Slots => {
            let slots = book.read_slots(project, file)?;
            if json {
                return print_json(&slots);
            }
            if slots.is_empty() {
                println!("No slots.");
            }
            for (slot, entry) in &slots {
                println!("{}  {}  {}", slot.bold(), entry.address, entry.email.cyan());
            }
        }
        View::AddressSlots => {
            let slots = book.read_address_slots(project, file)?;
            if json {
                return print_json(&slots);
            }
            if slots.is_empty() {
                println!("No slots.");
            }
            for (slot, address) in &slots {
                println!("{} → {}", slot.bold(), address);
            }
        }
        View::Steps => {
            let steps = book.read_steps(project, file)?;
            if json {
                return print_json(&steps);
            }
            if steps.is_empty() {
                println!("No steps.");
            }
            for step in &steps {
                println!(
                    "{}  {}  {}  ({} accounts)",
                    format!("#{}", step.step_index).yellow(),
                    step.step_name.bold(),
                    step.operation_event.dimmed(),
                    step.by_address.len() + step.by_order.len()
                );
            }
        }
    }
    Ok(())
}

fn cmd_resolve(
    book: &AuthBook<YamlFileStore>,
    args: ResolveArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let resolution = book.resolve(&args.addresses)?;
    if format == OutputFormat::Json {
        return print_json(&resolution);
    }
    println!(
        "Resolved {} of {} addresses",
        resolution.accounts.len().to_string().bold(),
        args.addresses.len()
    );
    print_entries(&resolution.accounts_list);
    Ok(())
}

fn cmd_list(
    book: &AuthBook<YamlFileStore>,
    args: ListArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let projects = match args.project {
        Some(project) => vec![project],
        None => book.projects()?,
    };
    let mut listing: OrderedMap<Vec<String>> = OrderedMap::new();
    for project in projects {
        let files = book.files(&project)?;
        listing.insert(project, files);
    }
    if format == OutputFormat::Json {
        return print_json(&listing);
    }
    if listing.is_empty() {
        println!("No projects.");
    }
    for (project, files) in &listing {
        println!("{}", project.yellow().bold());
        for file in files {
            println!("  {}", file);
        }
    }
    Ok(())
}
