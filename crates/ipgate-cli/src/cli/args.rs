use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ipgate",
    version,
    about = "Fail-open IP gating: hide a page element for blocklisted visitors"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the gate once against an in-memory page and report the outcome
    Check(CheckArgs),
    /// Serve the check-ip authorization API
    Serve(ServeArgs),
    Version,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Identity endpoint returning {"ip": "..."} [env: IPGATE_IDENTITY_URL]
    #[arg(long)]
    pub identity_url: Option<String>,

    /// Authorization endpoint returning {"blocked": bool} [env: IPGATE_AUTHORIZATION_URL]
    #[arg(long)]
    pub authorization_url: Option<String>,

    /// Identifier of the element to hide [env: IPGATE_ELEMENT_ID]
    #[arg(long)]
    pub element_id: Option<String>,

    /// Initial display value of the element
    #[arg(long, default_value = "block")]
    pub display: String,

    /// Run against a page that lacks the element
    #[arg(long)]
    pub missing_element: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Listen address [env: HOST]
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Listen port [env: PORT]
    #[arg(long)]
    pub port: Option<u16>,

    /// Blocklist file, one IP per line [env: IPGATE_BLOCKLIST_FILE]
    #[arg(long)]
    pub blocklist: Option<PathBuf>,

    /// Directory served under /static [env: IPGATE_STATIC_DIR]
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Also append logs to this file [env: IPGATE_LOG_FILE]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
