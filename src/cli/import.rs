//! CLI command handler for statement import
//!
//! Reads the card export, reconciles it against the ledger partition for the
//! statement date and prompts on the terminal for each new transaction.

use std::io;
use std::path::PathBuf;

use clap::Args;

use crate::audit::AuditLogger;
use crate::config::resolve::{parse_statement_date, validate_export_file};
use crate::config::{CardsplitPaths, ResolvedConfig, RunOptions};
use crate::display::format_run_summary;
use crate::error::CardsplitResult;
use crate::services::{AllocationPrompt, ImportService, RunSummary, StatementRun};
use crate::storage::CsvLedger;

/// Where the ledger lives and which categories it uses
#[derive(Args, Debug, Clone, Default)]
pub struct LedgerArgs {
    /// Directory holding ledgers
    #[arg(long, env = "CARDSPLIT_LEDGER_DIR")]
    pub ledger_dir: Option<PathBuf>,

    /// Ledger name
    #[arg(long)]
    pub document_id: Option<String>,

    /// Allocation categories, colon separated (e.g. "ap:pc:af")
    #[arg(long)]
    pub alloc_columns: Option<String>,

    /// Config file to use instead of the default one
    #[arg(long)]
    pub config_file: Option<PathBuf>,
}

impl LedgerArgs {
    /// Convert to run options for config resolution
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            ledger_dir: self.ledger_dir.clone(),
            document_id: self.document_id.clone(),
            alloc_columns: self.alloc_columns.clone(),
            config_file: self.config_file.clone(),
        }
    }
}

/// Arguments of the import command
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Card export (CSV) to import
    #[arg(long, value_parser = validate_export_file)]
    pub export_file: PathBuf,

    /// Statement date (YYYYMMDD); names the ledger partition
    #[arg(long, value_parser = parse_statement_date)]
    pub statement_date: String,

    #[command(flatten)]
    pub ledger: LedgerArgs,
}

/// Handle the import command
pub fn handle_import_command(paths: &CardsplitPaths, args: &ImportArgs) -> CardsplitResult<RunSummary> {
    let config = ResolvedConfig::resolve(&args.ledger.to_options(), paths)?;
    log::debug!(
        "ledger {} in {}, categories {:?}",
        config.document_id,
        config.ledger_dir.display(),
        config.categories.codes()
    );

    let records = ImportService::new().parse_file(&args.export_file)?;
    println!("Found {} export transactions.", records.len());

    let ledger = CsvLedger::new(&config.ledger_dir, &config.document_id);
    let audit = AuditLogger::new(paths.audit_log());
    let run = StatementRun::new(&ledger, &config.categories, args.statement_date.as_str())
        .with_audit(&audit);

    let mut prompt = AllocationPrompt::new(io::stdin().lock(), io::stdout());
    let summary = run.run(&records, &mut prompt)?;

    println!();
    print!("{}", format_run_summary(&summary));
    Ok(summary)
}
