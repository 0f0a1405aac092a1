//! Category CLI commands

use clap::Subcommand;

use crate::display::{format_category_details, format_category_list};
use crate::error::{LedgerError, LedgerResult};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Add a custom category
    Add {
        /// Category name
        name: String,
    },

    /// Show a category's sub-categories
    Show {
        /// Category name
        name: String,
    },

    /// Delete a category ("Income" and "Food & Groceries" are protected)
    Delete {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }

        CategoryCommands::Add { name } => {
            if service.add(&name)? {
                println!("Added category: {}", name.trim());
            } else {
                println!("Category already exists: {}", name.trim());
            }
        }

        CategoryCommands::Show { name } => {
            if !service.list()?.contains(&name) {
                return Err(LedgerError::category_not_found(&name));
            }
            print!("{}", format_category_details(&name));
        }

        CategoryCommands::Delete { name } => {
            service.delete(&name)?;
            println!("Deleted category: {}", name.trim());
        }
    }

    Ok(())
}
