use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "csr",
    about = "Checksum Registry client: register and verify files, audit the ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Registry backend, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// TOML file with client settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the backend is reachable
    Health(HealthArgs),
    /// Register a file under a name and version
    Register(UploadArgs),
    /// Verify a file against its registration
    Verify(UploadArgs),
    /// List all registered records
    List(ListArgs),
    /// Validate the ledger hash chain and its signature
    Ledger(LedgerArgs),
    /// Fetch the latest ledger anchor
    Anchor(AnchorArgs),
    /// Show the backend's signing public key
    Key(KeyArgs),
    /// Interactive session sharing one anchor cache
    Console(ConsoleArgs),
}

#[derive(Args)]
pub struct HealthArgs {}

#[derive(Args)]
pub struct UploadArgs {
    pub name: String,
    #[arg(value_name = "VERSION")]
    pub release: String,
    /// File to upload; omitting it is rejected before any request is sent
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Also write the table as HTML
    #[arg(long)]
    pub html: Option<PathBuf>,
}

#[derive(Args)]
pub struct LedgerArgs {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum CopyTarget {
    Hash,
    Signature,
}

#[derive(Args)]
pub struct AnchorArgs {
    /// Copy a field of the fetched anchor to the clipboard
    #[arg(long, value_enum)]
    pub copy: Option<CopyTarget>,
}

#[derive(Args)]
pub struct KeyArgs {
    /// Print the PEM after the key id
    #[arg(long)]
    pub pem: bool,
}

#[derive(Args)]
pub struct ConsoleArgs {
    /// Skip the startup health probe
    #[arg(long)]
    pub no_health: bool,
}
