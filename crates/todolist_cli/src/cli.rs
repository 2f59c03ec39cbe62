use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use todolist_core::{ConfigError, ItemScope, ServiceConfig};

/// Flags override the `TODOLIST_*` environment settings one by one.
#[derive(Parser, Debug)]
#[command(name = "todolist", version, about = "Key-guarded todo lists")]
pub struct Cli {
    #[arg(long, global = true, help = "SQLite file (in-memory when omitted)")]
    pub db: Option<PathBuf>,
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[arg(long, global = true, help = "Absolute directory for rolling log files")]
    pub log_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Item lookup scope: lenient|strict")]
    pub item_scope: Option<ItemScope>,
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config(&self) -> Result<ServiceConfig, ConfigError> {
        let mut config = ServiceConfig::from_env()?;
        if let Some(db) = &self.db {
            config.db_path = Some(db.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if let Some(scope) = self.item_scope {
            config.item_scope = scope;
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage lists.
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Manage items inside a list.
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
}

#[derive(Args, Debug)]
pub struct KeyArg {
    #[arg(long, help = "Secret key returned when the list was created")]
    pub key: String,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    Create {
        name: String,
    },
    Get {
        list_id: String,
        #[command(flatten)]
        key: KeyArg,
    },
    Update {
        list_id: String,
        name: String,
        #[command(flatten)]
        key: KeyArg,
    },
    Delete {
        list_id: String,
        #[command(flatten)]
        key: KeyArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Show every item of a list.
    List {
        list_id: String,
        #[command(flatten)]
        key: KeyArg,
    },
    Create {
        list_id: String,
        content: String,
        #[arg(long, default_value_t = false)]
        complete: bool,
        #[command(flatten)]
        key: KeyArg,
    },
    Get {
        list_id: String,
        item_id: String,
        #[command(flatten)]
        key: KeyArg,
    },
    /// Replace content and completion flag of an item.
    Update {
        list_id: String,
        item_id: String,
        content: String,
        #[arg(long, default_value_t = false)]
        complete: bool,
        #[command(flatten)]
        key: KeyArg,
    },
    Delete {
        list_id: String,
        item_id: String,
        #[command(flatten)]
        key: KeyArg,
    },
}
