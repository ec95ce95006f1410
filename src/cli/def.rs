use clap::Parser;
use std::path::PathBuf;

/// Generate confd templates from the keys of a populated key/value backend
#[derive(Parser)]
#[command(author, about, long_about=None, disable_version_flag(true))]
pub struct Args {
    /// force color mode (defaults to check tty)
    #[arg(long)]
    pub color: bool,

    /// force no-color mode (defaults to check tty)
    #[arg(long)]
    pub no_color: bool,

    /// display version and quit
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// prepend time to each log line
    #[arg(long)]
    pub log_time: bool,

    /// Turn general verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configure component wise logging (COMPONENT[=LEVEL])
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub log: Option<Vec<String>>,

    /// Key/value backend (env, file)
    #[arg(long, env = "CONFD_TEMPLATE_BACKEND", default_value = "env")]
    pub backend: String,

    /// Document(s) read by the file backend
    #[arg(long = "file", value_name = "PATH", action = clap::ArgAction::Append)]
    pub files: Vec<PathBuf>,

    /// Key delimiter
    #[arg(long, env = "CONFD_TEMPLATE_DELIMITER", default_value = "/")]
    pub delimiter: String,

    /// Optional regex key filter, matched against prefix-stripped key names
    #[arg(long, env = "CONFD_TEMPLATE_FILTER")]
    pub filter: Option<String>,

    /// Template format
    #[arg(long, env = "CONFD_TEMPLATE_FORMAT", default_value = "yaml")]
    pub format: String,

    /// Output template path (defaults to stdout)
    #[arg(long = "out", env = "CONFD_TEMPLATE_OUT", value_name = "PATH")]
    pub outfile: Option<PathBuf>,

    /// Key prefix to scan, removed from rendered key names
    #[arg(long, env = "CONFD_TEMPLATE_PREFIX", default_value = "/")]
    pub prefix: String,

    /// Give placeholders a "null" default so absent keys render
    #[arg(long)]
    pub optional: bool,
}
