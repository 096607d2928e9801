use crate::export::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for presensi
/// QR attendance CLI backed by SQLite
#[derive(Parser)]
#[command(
    name = "presensi",
    version = env!("CARGO_PKG_VERSION"),
    about = "QR attendance tracking: time-window check-in/out, holidays, shifts and report export",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the current timestamp "YYYY-MM-DD HH:MM:SS" (for tests)
    #[arg(global = true, long = "at", hide = true)]
    pub at: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportShape {
    Daily,
    Range,
    Monthly,
    Individual,
    Dashboard,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
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

    /// Manage the person directory
    Person {
        #[arg(long, help = "Add a person (requires --key, --name, --population)")]
        add: bool,

        #[arg(long, help = "List persons")]
        list: bool,

        #[arg(
            long,
            value_name = "FILE",
            help = "Import persons from CSV (key,name,population,class,phone)"
        )]
        import: Option<String>,

        #[arg(long, help = "Natural key: NIS (students) or staff ID")]
        key: Option<String>,

        #[arg(long, help = "Display name")]
        name: Option<String>,

        #[arg(long, help = "Population: student, teacher, staff or security")]
        population: Option<String>,

        #[arg(long = "class", help = "Class name (students)")]
        class_name: Option<String>,

        #[arg(long, help = "Guardian phone (students, scan notifications)")]
        phone: Option<String>,
    },

    /// Manage attendance window configurations
    Window {
        #[arg(long, help = "Show all window configurations")]
        show: bool,

        #[arg(
            long,
            value_name = "CATEGORY",
            help = "Set windows for a category: student, staff or a shift name"
        )]
        set: Option<String>,

        #[arg(long = "entry-start", help = "Entry window start (HH:MM)")]
        entry_start: Option<String>,

        #[arg(long = "entry-end", help = "Entry window end (HH:MM)")]
        entry_end: Option<String>,

        #[arg(long = "late-cutoff", help = "Late cutoff (HH:MM, optional)")]
        late_cutoff: Option<String>,

        #[arg(long = "exit-start", help = "Exit window start (HH:MM)")]
        exit_start: Option<String>,

        #[arg(long = "exit-end", help = "Exit window end (HH:MM)")]
        exit_end: Option<String>,

        #[arg(
            long,
            value_name = "DAYS",
            help = "Set routine holidays for --category (e.g. \"Sabtu,Minggu\")"
        )]
        routine: Option<String>,

        #[arg(long, help = "Category targeted by --routine (student or staff)")]
        category: Option<String>,

        #[arg(
            long,
            value_name = "CATEGORY",
            help = "Delete the window configuration of a category"
        )]
        reset: Option<String>,
    },

    /// Manage special holidays
    Holiday {
        #[arg(long, value_name = "DATE", help = "Add a holiday (YYYY-MM-DD)")]
        add: Option<String>,

        #[arg(long, help = "Holiday description (with --add)")]
        desc: Option<String>,

        #[arg(long, value_name = "DATE", help = "Remove a holiday")]
        del: Option<String>,

        #[arg(long, help = "List holidays")]
        list: bool,
    },

    /// Manage the security shift roster
    Schedule {
        #[arg(long, value_name = "YYYY-MM", help = "Month the action applies to")]
        month: Option<String>,

        #[arg(long, help = "Show the month's roster")]
        show: bool,

        #[arg(long, help = "Person key for --set")]
        person: Option<String>,

        #[arg(long, value_name = "DATE", help = "Date for --set (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, help = "Shift name for --set (e.g. shift1, Off)")]
        shift: Option<String>,

        #[arg(
            long = "copy-previous",
            help = "Copy last month's roster into empty slots of --month"
        )]
        copy_previous: bool,

        #[arg(
            long,
            value_name = "FILE",
            help = "Import the month's roster from CSV (key,shift_tgl1..N)"
        )]
        import: Option<String>,
    },

    /// Process one QR scan (tag format: S<NIS> or P<ID>)
    Scan {
        /// Raw scanned payload
        tag: String,
    },

    /// Override the attendance of one or more persons for a day
    Override {
        #[arg(long, help = "Person key; repeat for a bulk override")]
        person: Vec<String>,

        #[arg(long, help = "New status: Hadir, Terlambat, Sakit, Izin or Alfa")]
        status: String,

        #[arg(long, value_name = "DATE", help = "Day to override (default today)")]
        date: Option<String>,

        #[arg(long, help = "Note stored with the replacement records")]
        note: Option<String>,
    },

    /// Manage leave requests
    Leave {
        #[arg(long, help = "Submit a request (requires --person and --kind)")]
        submit: bool,

        #[arg(long, help = "Person key (with --submit)")]
        person: Option<String>,

        #[arg(long, help = "Leave kind: Sakit or Izin (with --submit)")]
        kind: Option<String>,

        #[arg(long, help = "Free-form note (with --submit)")]
        note: Option<String>,

        #[arg(long, help = "List requests")]
        list: bool,

        #[arg(long, value_name = "DATE", help = "Submission day filter for --list")]
        date: Option<String>,

        #[arg(long, value_name = "ID", help = "Approve a request for --for-date")]
        approve: Option<i64>,

        #[arg(
            long = "for-date",
            value_name = "DATE",
            help = "Ledger day an approval applies to (default today)"
        )]
        for_date: Option<String>,

        #[arg(long, value_name = "ID", help = "Reject a request")]
        reject: Option<i64>,
    },

    /// Build a report, rendered to the terminal or exported with --file
    Report {
        #[arg(long, value_enum, help = "Report shape")]
        shape: ReportShape,

        #[arg(
            long,
            help = "Scope: student or employee (daily/range/monthly shapes)"
        )]
        population: Option<String>,

        #[arg(long, help = "Employee role filter: teacher, staff or security")]
        role: Option<String>,

        #[arg(long = "class", help = "Class filter (student scope)")]
        class_name: Option<String>,

        #[arg(long, value_name = "DATE", help = "Day for daily/dashboard (default today)")]
        date: Option<String>,

        #[arg(long, value_name = "YYYY-MM", help = "Month for monthly/individual")]
        month: Option<String>,

        #[arg(long, value_name = "DATE", help = "Range start (range shape)")]
        start: Option<String>,

        #[arg(long, value_name = "DATE", help = "Range end (range shape)")]
        end: Option<String>,

        #[arg(long, help = "Person key (individual shape)")]
        person: Option<String>,

        #[arg(long, value_enum, help = "Export format (with --file)")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", help = "Export to a file instead of the terminal")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing export file")]
        force: bool,
    },

    /// Late-scan notification sweep
    Notify {
        #[arg(long, help = "Run the sweep immediately")]
        run: bool,

        #[arg(
            long,
            help = "Sleep until late-cutoff + 1 minute (today or tomorrow), then run once"
        )]
        schedule: bool,
    },
}
