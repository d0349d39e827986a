//! CLI command handler for listing categories

use std::path::PathBuf;

use clap::Args;

use crate::config::{CardsplitPaths, ResolvedConfig, RunOptions};
use crate::display::format_category_list;
use crate::error::CardsplitResult;

/// Arguments of the categories command
#[derive(Args, Debug, Clone, Default)]
pub struct CategoriesArgs {
    /// Allocation categories, colon separated (e.g. "ap:pc:af")
    #[arg(long)]
    pub alloc_columns: Option<String>,

    /// Config file to use instead of the default one
    #[arg(long)]
    pub config_file: Option<PathBuf>,
}

/// Handle the categories command
pub fn handle_categories_command(paths: &CardsplitPaths, args: &CategoriesArgs) -> CardsplitResult<()> {
    let options = RunOptions {
        alloc_columns: args.alloc_columns.clone(),
        config_file: args.config_file.clone(),
        ..RunOptions::default()
    };
    let config = ResolvedConfig::resolve(&options, paths)?;

    print!("{}", format_category_list(&config.categories));
    Ok(())
}
