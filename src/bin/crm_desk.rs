//! Desktop command line front end: browse clients, import CSV exports,
//! generate suitability letters and manage saved documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio_util::sync::CancellationToken;

use wealth_crm::build_capabilities;
use wealth_crm::domain::suitability::SuitabilityFormState;
use wealth_crm::dto::suitability::LetterDelivery;
use wealth_crm::files::{Capabilities, DialogHost, PresetAnswer, TerminalDialog};
use wealth_crm::forms::import::parse_clients_csv;
use wealth_crm::letter::pdf::PdfLetterRenderer;
use wealth_crm::models::config::{ServerConfig, load_server_config};
use wealth_crm::services::{
    ServiceError, ServiceResult, clients, documents, import, suitability,
};

#[derive(Parser)]
#[command(name = "crm_desk", version, about = "Suitability CRM desktop tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List clients, optionally filtered by name or account number.
    Clients {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Print one client as JSON.
    Show { id: String },
    /// Replace every client with the records in a CSV file.
    Import {
        csv: PathBuf,
        /// Do not ask before replacing the current records.
        #[arg(long, short)]
        yes: bool,
    },
    /// Generate a suitability letter from a JSON form.
    Letter {
        form: PathBuf,
        /// Replace an existing letter without asking.
        #[arg(long, short)]
        yes: bool,
    },
    /// Render the HTML preview of a JSON form.
    Preview {
        form: PathBuf,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Manage generated letters.
    Documents {
        #[command(subcommand)]
        command: DocumentsCommand,
    },
}

#[derive(Subcommand)]
enum DocumentsCommand {
    List,
    Delete {
        name: String,
        #[arg(long, short)]
        yes: bool,
    },
}

fn dialog(yes: bool) -> Box<dyn DialogHost> {
    if yes {
        Box::new(PresetAnswer(true))
    } else {
        Box::new(TerminalDialog)
    }
}

fn read_form(path: &Path) -> ServiceResult<SuitabilityFormState> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|err| ServiceError::Form(format!("{}: {err}", path.display())))
}

fn print_json<T: serde::Serialize>(value: &T) -> ServiceResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| ServiceError::Internal(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn run(command: Command, caps: &Capabilities, server_config: &ServerConfig) -> ServiceResult<()> {
    match command {
        Command::Clients { search } => {
            let list = clients::list_clients(caps.store.as_ref(), search.as_deref())?;
            for client in &list.items {
                println!(
                    "{:<16} {:<32} {}",
                    client.id,
                    client.full_name(),
                    client.account_number
                );
            }
            println!("{} clients", list.total);
        }
        Command::Show { id } => {
            print_json(&clients::get_client(caps.store.as_ref(), &id)?)?;
        }
        Command::Import { csv, yes } => {
            let data = fs::read(&csv)?;
            let new_clients = parse_clients_csv(&data, Utc::now())?;
            let imported =
                import::import_clients(caps.store.as_ref(), dialog(yes).as_ref(), &new_clients)?;
            println!("Imported {imported} clients");
        }
        Command::Letter { form, yes } => {
            let form = read_form(&form)?;
            let renderer = PdfLetterRenderer::new(server_config.fonts.clone());
            let delivery = suitability::generate_letter(
                caps,
                &renderer,
                dialog(yes).as_ref(),
                &server_config.firm,
                &form,
                Local::now().naive_local(),
                &CancellationToken::new(),
            )?;
            match delivery {
                LetterDelivery::Saved { path, .. } => {
                    println!("Letter saved to:\n{}", path.display());
                }
                LetterDelivery::Download { file_name, bytes } => {
                    fs::write(&file_name, bytes)?;
                    println!("Letter written to {file_name}");
                }
            }
        }
        Command::Preview { form, out } => {
            let html = suitability::preview_letter(&read_form(&form)?, &server_config.firm)?;
            match out {
                Some(out) => fs::write(out, html)?,
                None => println!("{html}"),
            }
        }
        Command::Documents { command } => match command {
            DocumentsCommand::List => {
                for document in documents::list_documents(caps)? {
                    println!(
                        "{}  {}",
                        document.created.with_timezone(&Local).format("%d/%m/%Y %H:%M"),
                        document.name
                    );
                }
            }
            DocumentsCommand::Delete { name, yes } => {
                let remaining = documents::delete_document(caps, dialog(yes).as_ref(), &name)?;
                println!("Deleted {name}; {} documents remain", remaining.len());
            }
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();

    let server_config = match load_server_config() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let caps = build_capabilities(&server_config);

    match run(cli.command, &caps, &server_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ServiceError::Declined(_)) => {
            println!("Cancelled.");
            ExitCode::SUCCESS
        }
        Err(ServiceError::Import(rows)) => {
            for row in rows {
                eprintln!("row {}: {}", row.row, row.message);
            }
            ExitCode::FAILURE
        }
        Err(ServiceError::Validation(errors)) => {
            eprintln!("The form has validation errors:");
            if let Ok(json) = serde_json::to_string_pretty(&errors) {
                eprintln!("{json}");
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
