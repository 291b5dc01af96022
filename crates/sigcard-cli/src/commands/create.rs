//! Create command - scan a message and create a contact from it.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use sigcard_core::{
    create_contact, scan_message, ActionStatus, ContactRecord, FieldEdits, GraphContactsClient,
    SignatureScanner, StaticTokenProvider,
};

use super::scan::SenderArgs;
use super::{load_config, FileBody};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// HTML message body file ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    sender: SenderArgs,

    /// Full name to use instead of the extracted one
    #[arg(long)]
    full_name: Option<String>,

    /// Phone number to use instead of the extracted one
    #[arg(long)]
    phone: Option<String>,

    /// Email address to use instead of the sender's
    #[arg(long)]
    email: Option<String>,

    /// Access token for the contacts API
    #[arg(long, env = "SIGCARD_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Print the contact payload instead of creating it
    #[arg(long)]
    dry_run: bool,
}

pub async fn run(args: CreateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let scanner = SignatureScanner::from_config(&config.extraction);

    let scanned = scan_message(&FileBody::new(&args.input), &args.sender.identity(), &scanner).await;
    let scan_status = ActionStatus::from_scan(&scanned);
    let Ok(report) = scanned else {
        anyhow::bail!("{}", scan_status.message());
    };

    let fields = report.result.apply_edits(FieldEdits {
        full_name: args.full_name,
        phone: args.phone,
        email: args.email,
    });

    if args.dry_run {
        let record = ContactRecord::from_fields(&fields);
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    info!("Creating contact for {:?}", fields.full_name);

    let tokens = StaticTokenProvider::new(args.token);
    let api = GraphContactsClient::new(&config.graph)?;

    let created = create_contact(&fields, &tokens, &api, &config.graph).await;
    let status = ActionStatus::from_create(&created);

    match created {
        Ok(contact) => {
            eprintln!("{} {}", style("✓").green(), status.message());
            println!("{}", serde_json::to_string_pretty(&contact)?);
            Ok(())
        }
        Err(_) => {
            eprintln!("{} {}", style("✗").red(), status.message());
            anyhow::bail!("contact was not created");
        }
    }
}
