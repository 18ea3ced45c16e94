use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "checkpad", bin_name = "checkpad", version)]
#[command(
    about = "Markdown checklists with progress, task estimates and standalone export",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use the global documents and config instead of the project's
    #[arg(short, long, global = true, help_heading = "Options")]
    pub global: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List documents
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Show a document's numbered checklist and progress
    #[command(alias = "s", display_order = 2)]
    Show {
        /// Document name (the .md is optional)
        document: String,
    },

    /// Check one or more items
    #[command(alias = "x", display_order = 10)]
    Check {
        document: String,

        /// Item numbers (e.g. 1 3 5-7)
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,
    },

    /// Uncheck one or more items
    #[command(display_order = 11)]
    Uncheck {
        document: String,

        /// Item numbers (e.g. 1 3 5-7)
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,
    },

    /// Flip one or more items
    #[command(alias = "t", display_order = 12)]
    Toggle {
        document: String,

        /// Item numbers (e.g. 1 3 5-7)
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,
    },

    /// Check every item, or uncheck all when everything is checked
    #[command(display_order = 13)]
    All { document: String },

    /// Export a document as standalone HTML (or its markdown source)
    #[command(display_order = 20)]
    Export {
        document: String,

        /// Output file name; the extension is set by the format
        #[arg(short, long)]
        name: Option<String>,

        /// Export the markdown source instead of HTML
        #[arg(long)]
        markdown: bool,

        /// Output directory (defaults to the current directory)
        #[arg(short, long, value_name = "DIR")]
        out: Option<String>,
    },

    /// Suggest document names for a reference being typed
    #[command(display_order = 21)]
    Complete {
        /// Partial name, or text ending in an open `![[`
        #[arg(default_value = "")]
        input: String,
    },

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (docs-dir, server-url, export-name)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the config and documents directory
    #[command(display_order = 31)]
    Init,
}
