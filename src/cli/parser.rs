use crate::export::ExportFormat;
use crate::models::roster::RosterKind;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rollcall
/// Mark, save and report daily school attendance with SQLite
#[derive(Parser)]
#[command(
    name = "rollcall",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daily attendance for school classes and staff departments, stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update, no simulated latency)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Load a roster, mark attendance and optionally save it
    Mark {
        #[command(subcommand)]
        target: MarkTarget,
    },

    /// List saved attendance for one day
    List {
        #[arg(long, help = "Day to show (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long, value_enum, help = "Only students or only staff")]
        kind: Option<RosterKind>,
    },

    /// Attendance statistics over a period
    Report {
        #[arg(long, value_enum, help = "Only students or only staff")]
        kind: Option<RosterKind>,

        #[arg(long, short, help = "YYYY, YYYY-MM, YYYY-MM-DD, a start:end range or 'all'")]
        period: Option<String>,

        #[arg(long, help = "How many frequently absent people to list (default 5)")]
        top: Option<usize>,
    },

    /// Export saved attendance
    Export {
        #[arg(long, value_enum, help = "Output format")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(long, value_enum, help = "Only students or only staff")]
        kind: Option<RosterKind>,

        #[arg(long, short, help = "YYYY, YYYY-MM, YYYY-MM-DD, a start:end range or 'all'")]
        period: Option<String>,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum MarkTarget {
    /// Student roster of one class section
    Students {
        #[arg(long, help = "Class, e.g. \"Class 3\" or 3")]
        class: String,

        #[arg(long, help = "Section, e.g. \"Section B\" or B")]
        section: String,

        #[command(flatten)]
        edits: MarkArgs,
    },

    /// Staff roster of one department, or "all"
    Staff {
        #[arg(long, help = "Department name or \"all\"")]
        department: String,

        #[command(flatten)]
        edits: MarkArgs,
    },
}

/// Edits applied after loading, in order: --all, --set, --clear.
#[derive(Args, Debug, Clone, Default)]
pub struct MarkArgs {
    #[arg(long, help = "Attendance date (YYYY-MM-DD, default today)")]
    pub date: Option<String>,

    #[arg(long, help = "Show only names or identifiers containing this text")]
    pub search: Option<String>,

    #[arg(
        long = "all",
        value_name = "STATUS",
        help = "Mark everyone: P=Present, A=Absent, L=Late, O=On Leave"
    )]
    pub all: Option<String>,

    #[arg(
        long = "set",
        value_name = "ID=STATUS",
        help = "Mark one person, e.g. --set 5=A (repeatable)"
    )]
    pub set: Vec<String>,

    #[arg(long = "clear", value_name = "ID", help = "Remove a mark (repeatable)")]
    pub clear: Vec<u32>,

    #[arg(long, help = "Save the attendance once everyone is marked")]
    pub save: bool,
}
