use crate::record::Project;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shiptrack")]
#[command(about = "Shipment notification and purchase order tracking tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a shipment notification and file it under a purchase order
    Add {
        /// Shipment notification spreadsheet (.xlsx)
        #[arg(required = true)]
        spreadsheet: PathBuf,

        /// Purchase order document
        #[arg(required = true)]
        purchase_order: PathBuf,

        /// Project the item belongs to
        #[arg(short, long, value_enum, default_value_t = Project::Other)]
        project: Project,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the tracked items grouped by project and status
    List,

    /// Show one tracked item by its node id from `list`
    Show {
        #[arg(required = true)]
        id: u32,
    },

    /// Archive a tracked item (moves it under Inactive)
    Archive {
        #[arg(required = true)]
        id: u32,
    },

    /// Generate the notification email draft for a tracked item
    Email {
        #[arg(required = true)]
        id: u32,

        /// Output path (default: the item folder)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactively review tracked items
    Review,

    /// Look up a station code in the site directory
    Site {
        #[arg(required = true)]
        station: String,

        /// Area name, for station codes that appear more than once
        #[arg(short, long, default_value = "")]
        area: String,
    },

    /// Index stored notification emails and trace tracking numbers
    Track {
        /// Tracking number to look up (omit to just refresh the index)
        number: Option<String>,
    },

    /// Show or edit the configuration
    Config {
        /// Show the current configuration
        #[arg(long)]
        show: bool,

        /// Set the files root folder
        #[arg(long)]
        set_files_root: Option<PathBuf>,

        /// Set the site list workbook
        #[arg(long)]
        set_site_list: Option<PathBuf>,

        /// Set the stored-emails folder
        #[arg(long)]
        set_emails_dir: Option<PathBuf>,

        /// Set a custom notification template file
        #[arg(long)]
        set_template: Option<PathBuf>,
    },
}
