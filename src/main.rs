use anyhow::Result;
use clap::{Parser, Subcommand};

use cardsplit::cli::{
    handle_categories_command, handle_history_command, handle_import_command, CategoriesArgs,
    ImportArgs,
};
use cardsplit::config::{paths::CardsplitPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "cardsplit",
    author = "Kaylee Beyene",
    version,
    about = "Split credit card statement transactions across spending categories",
    long_about = "cardsplit reads a credit card export, skips the transactions already \
                  recorded for the statement and asks how to split each new one across \
                  your spending categories before appending it to a CSV ledger."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a statement export and allocate its new transactions
    Import(ImportArgs),

    /// List the allocation categories in use
    Categories(CategoriesArgs),

    /// Show recent ledger activity from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write a default config file if there is none yet
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let paths = CardsplitPaths::new()?;

    match cli.command {
        Some(Commands::Import(args)) => {
            let summary = handle_import_command(&paths, &args)?;
            log::info!("run finished: {:?}", summary);
        }
        Some(Commands::Categories(args)) => {
            handle_categories_command(&paths, &args)?;
        }
        Some(Commands::History { count }) => {
            handle_history_command(&paths, count)?;
        }
        Some(Commands::Config { init }) => {
            if init {
                if paths.settings_file().exists() {
                    println!("Config file already exists: {}", paths.settings_file().display());
                } else {
                    Settings::default().save(&paths)?;
                    println!("Created {}", paths.settings_file().display());
                }
                println!();
            }

            let settings = Settings::load_or_default(&paths)?;
            println!("cardsplit Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Config file:      {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!(
                "Ledger directory: {}",
                settings
                    .ledger_dir()
                    .unwrap_or_else(|| paths.ledger_dir())
                    .display()
            );
            println!();
            println!("Settings:");
            println!(
                "  Document id:    {}",
                settings
                    .document_id
                    .as_deref()
                    .unwrap_or(cardsplit::config::resolve::DEFAULT_DOCUMENT_ID)
            );
            if settings.alloc_columns.is_empty() {
                println!("  Alloc columns:  (none)");
            } else {
                println!("  Alloc columns:");
                for column in &settings.alloc_columns {
                    println!("    {:8} {}", column.short, column.long);
                }
            }
        }
        None => {
            println!("cardsplit - split card statements across categories");
            println!();
            println!("Run 'cardsplit --help' for usage information.");
            println!("Run 'cardsplit import --help' to import a statement.");
        }
    }

    Ok(())
}
