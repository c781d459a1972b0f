use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the Postline binary.
#[derive(Debug, Parser)]
#[command(name = "postline", version, about = "Postline blog client")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "POSTLINE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the posts API base URL.
    #[arg(long = "api-base-url", value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Override the site title shown in the header.
    #[arg(long = "site-title", value_name = "TITLE", global = true)]
    pub site_title: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// Browse and edit interactively, one command per line on stdin.
    Shell,
    /// Print the home feed.
    Home {
        /// Only list posts whose title or body contains this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// Print a single post.
    Show { id: String },
    /// Create a post and print the resulting page.
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Edit a post; omitted fields keep their current text.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a post and print the resulting page.
    Delete { id: String },
    /// Print the About page.
    About,
    /// Print the page at a route path, e.g. `/post/3`.
    Open { path: String },
}
