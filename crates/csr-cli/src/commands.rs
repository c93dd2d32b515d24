use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use colored::Colorize;
use csr_client::{
    ClientConfig, Dashboard, FileBlob, PublicKeyOutcome, Tone, Transport, UploadInput,
};

use crate::cli::*;
use crate::console;
use crate::terminal::Terminal;

/// A file upload as typed by the user, before the file is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingUpload {
    pub name: String,
    pub version: String,
    pub file: Option<PathBuf>,
}

impl From<UploadArgs> for PendingUpload {
    fn from(args: UploadArgs) -> Self {
        Self { name: args.name, version: args.release, file: args.file }
    }
}

/// One user action, shared by the one-shot subcommands and the console.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Health,
    Register(PendingUpload),
    Verify(PendingUpload),
    List { html: Option<PathBuf> },
    Ledger,
    Anchor { copy: Option<CopyTarget> },
    CopyHash,
    CopySignature,
    Key { pem: bool },
}

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = resolve_config(cli.config.as_deref(), cli.base_url)?;
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, dispatch(cli.command, config))
}

/// `--base-url` wins over the config file, which wins over defaults.
pub fn resolve_config(path: Option<&Path>, base_url: Option<String>) -> anyhow::Result<ClientConfig> {
    let config = match path {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    Ok(match base_url {
        Some(url) => config.with_base_url(url),
        None => config,
    })
}

async fn dispatch(command: Command, config: ClientConfig) -> anyhow::Result<ExitCode> {
    let terminal = Terminal::new();
    let dashboard = Dashboard::new(config.transport()?, terminal.surfaces());
    tracing::debug!(base_url = %config.base_url, "dashboard ready");

    let request = match command {
        Command::Health(_) => Request::Health,
        Command::Register(args) => Request::Register(args.into()),
        Command::Verify(args) => Request::Verify(args.into()),
        Command::List(args) => Request::List { html: args.html },
        Command::Ledger(_) => Request::Ledger,
        Command::Anchor(args) => Request::Anchor { copy: args.copy },
        Command::Key(args) => Request::Key { pem: args.pem },
        Command::Console(args) => {
            console::run(Rc::new(dashboard), terminal, !args.no_health).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };
    let succeeded = execute(&dashboard, &terminal, request).await?;
    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Run one request against the dashboard. Returns whether every rendered
/// result came out ok.
pub async fn execute<T: Transport>(
    dashboard: &Dashboard<T>,
    terminal: &Terminal,
    request: Request,
) -> anyhow::Result<bool> {
    let tone = match request {
        Request::Health => {
            return Ok(dashboard.check_health().await.is_online());
        }
        Request::Register(pending) => {
            let input = load_upload(pending).await;
            dashboard.on_register(input).await.map(|o| o.rendered().tone)
        }
        Request::Verify(pending) => {
            let input = load_upload(pending).await;
            dashboard.on_verify(input).await.map(|o| o.rendered().tone)
        }
        Request::List { html } => {
            let tone = dashboard.on_reload().await.map(|o| o.rendered().tone);
            if let (Some(path), Some(Tone::Ok)) = (html, tone) {
                terminal.table.write_html(&path)?;
                println!("  {} {}", "wrote".green(), path.display());
            }
            tone
        }
        Request::Ledger => dashboard.on_verify_ledger().await.map(|o| {
            let report = o.report();
            if report.chain.tone == Tone::Ok && report.signature.tone == Tone::Ok {
                Tone::Ok
            } else {
                Tone::Ng
            }
        }),
        Request::Anchor { copy } => {
            let fetched = dashboard.on_fetch_anchor().await.map(|o| o.rendered().tone);
            match (fetched, copy) {
                (Some(Tone::Ok), Some(CopyTarget::Hash)) => {
                    Some(dashboard.on_copy_hash().await.rendered().tone)
                }
                (Some(Tone::Ok), Some(CopyTarget::Signature)) => {
                    Some(dashboard.on_copy_signature().await.rendered().tone)
                }
                (fetched, _) => fetched,
            }
        }
        Request::CopyHash => Some(dashboard.on_copy_hash().await.rendered().tone),
        Request::CopySignature => Some(dashboard.on_copy_signature().await.rendered().tone),
        Request::Key { pem } => {
            let outcome = dashboard.on_fetch_public_key().await;
            if let (true, Some(PublicKeyOutcome::Fetched(key))) = (pem, &outcome) {
                print!("{}", key.public_key_pem);
            }
            outcome.map(|o| o.rendered().tone)
        }
    };
    match tone {
        Some(tone) => Ok(tone == Tone::Ok),
        None => {
            println!("  {}", "already running; wait for it to finish".yellow());
            Ok(false)
        }
    }
}

/// Read the upload's file from disk. An unreadable file counts as no file, so
/// the flow rejects it without a request.
pub async fn load_upload(pending: PendingUpload) -> UploadInput {
    let file = match &pending.file {
        Some(path) => match tokio::fs::read(path).await {
            Ok(content) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Some(FileBlob::new(filename, content))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read upload file");
                None
            }
        },
        None => None,
    };
    UploadInput::new(pending.name, pending.version, file)
}
