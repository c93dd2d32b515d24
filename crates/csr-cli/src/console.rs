//! Interactive session. Each line starts its action as a local task, so a
//! slow request never blocks the prompt and busy triggers behave the way
//! disabled buttons do.

use std::path::PathBuf;
use std::rc::Rc;

use colored::Colorize;
use csr_client::{Dashboard, Transport};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use crate::commands::{self, Request, PendingUpload};
use crate::terminal::Terminal;

const HELP: &str = "\
commands:
  register <name> <version> [file]   register a file
  verify <name> <version> [file]     verify a file
  list                               reload the record table
  ledger                             validate the ledger chain and signature
  anchor                             fetch the latest anchor
  copy-hash                          copy the cached block hash
  copy-signature                     copy the cached anchor signature
  key                                show the signing public key
  health                             probe the backend
  help                               show this text
  quit                               leave the console";

#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Run(Request),
    Help,
    Quit,
}

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Line>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let line = match (verb, rest.as_slice()) {
        ("register", args) => Line::Run(Request::Register(upload(verb, args)?)),
        ("verify", args) => Line::Run(Request::Verify(upload(verb, args)?)),
        ("list", []) => Line::Run(Request::List { html: None }),
        ("ledger", []) => Line::Run(Request::Ledger),
        ("anchor", []) => Line::Run(Request::Anchor { copy: None }),
        ("copy-hash", []) => Line::Run(Request::CopyHash),
        ("copy-signature", []) => Line::Run(Request::CopySignature),
        ("key", []) => Line::Run(Request::Key { pem: false }),
        ("health", []) => Line::Run(Request::Health),
        ("help", _) => Line::Help,
        ("quit" | "exit", []) => Line::Quit,
        (
            "list" | "ledger" | "anchor" | "copy-hash" | "copy-signature" | "key" | "health"
            | "quit" | "exit",
            _,
        ) => return Err(format!("{verb} takes no arguments")),
        _ => return Err(format!("unknown command: {verb} (try help)")),
    };
    Ok(Some(line))
}

fn upload(verb: &str, args: &[&str]) -> Result<PendingUpload, String> {
    match args {
        [name, version] => Ok(PendingUpload {
            name: (*name).into(),
            version: (*version).into(),
            file: None,
        }),
        [name, version, file] => Ok(PendingUpload {
            name: (*name).into(),
            version: (*version).into(),
            file: Some(PathBuf::from(file)),
        }),
        _ => Err(format!("usage: {verb} <name> <version> [file]")),
    }
}

pub async fn run<T: Transport + 'static>(
    dashboard: Rc<Dashboard<T>>,
    terminal: Terminal,
    probe_health: bool,
) -> anyhow::Result<()> {
    if probe_health {
        dashboard.check_health().await;
    }
    println!("{}", "type help for commands".dimmed());
    run_lines(dashboard, terminal, BufReader::new(tokio::io::stdin())).await
}

/// Read commands until `quit` or end of input, then wait for every action
/// still in flight so each one renders its result.
pub async fn run_lines<T, R>(
    dashboard: Rc<Dashboard<T>>,
    terminal: Terminal,
    input: R,
) -> anyhow::Result<()>
where
    T: Transport + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut in_flight: Vec<JoinHandle<()>> = Vec::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Line::Help)) => println!("{HELP}"),
            Ok(Some(Line::Quit)) => break,
            Ok(Some(Line::Run(request))) => {
                let dashboard = dashboard.clone();
                let terminal = terminal.clone();
                in_flight.retain(|handle| !handle.is_finished());
                in_flight.push(tokio::task::spawn_local(async move {
                    if let Err(e) = commands::execute(&dashboard, &terminal, request).await {
                        eprintln!("{} {e:#}", "error:".red().bold());
                    }
                }));
            }
            Err(message) => eprintln!("{} {message}", "error:".red().bold()),
        }
    }
    tracing::debug!(pending = in_flight.len(), "console closed, draining actions");
    for handle in in_flight {
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "console action aborted");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csr_protocol::{HttpResponse, ProtocolError, ProtocolResult, UploadForm};

    fn request(line: &str) -> Request {
        match parse_line(line) {
            Ok(Some(Line::Run(request))) => request,
            other => panic!("unexpected parse of {line:?}: {other:?}"),
        }
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn register_with_and_without_file() {
        assert_eq!(
            request("register svc 1.0 ./svc.tar"),
            Request::Register(PendingUpload {
                name: "svc".into(),
                version: "1.0".into(),
                file: Some(PathBuf::from("./svc.tar")),
            })
        );
        match request("verify svc 1.0") {
            Request::Verify(pending) => assert!(pending.file.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn upload_needs_name_and_version() {
        assert!(parse_line("register svc").unwrap_err().starts_with("usage: register"));
        assert!(parse_line("verify a b c d").is_err());
    }

    #[test]
    fn bare_verbs() {
        assert_eq!(request("list"), Request::List { html: None });
        assert_eq!(request("  ledger "), Request::Ledger);
        assert_eq!(request("anchor"), Request::Anchor { copy: None });
        assert_eq!(request("copy-hash"), Request::CopyHash);
        assert_eq!(request("copy-signature"), Request::CopySignature);
        assert_eq!(request("key"), Request::Key { pem: false });
        assert_eq!(request("health"), Request::Health);
        assert_eq!(parse_line("help"), Ok(Some(Line::Help)));
        assert_eq!(parse_line("quit"), Ok(Some(Line::Quit)));
        assert_eq!(parse_line("exit"), Ok(Some(Line::Quit)));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert_eq!(parse_line("ledger now"), Err("ledger takes no arguments".into()));
    }

    #[test]
    fn unknown_verb() {
        assert!(parse_line("delete svc").unwrap_err().contains("unknown command"));
    }

    /// Answers the record listing after a short delay.
    struct SlowListing;

    #[async_trait::async_trait(?Send)]
    impl Transport for SlowListing {
        async fn get(&self, _path: &str) -> ProtocolResult<HttpResponse> {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            Ok(HttpResponse::new(
                200,
                r#"{"count":1,"items":[{"index":1,"timestamp_utc":"2024-01-01T00:00:00Z",
                    "name":"svc","version":"1.0","sha256":"abc","file_size_bytes":3,
                    "original_filename":"a.bin"}]}"#,
            ))
        }

        async fn post_empty(&self, _path: &str) -> ProtocolResult<HttpResponse> {
            Err(ProtocolError::Transport("unused".into()))
        }

        async fn post_multipart(&self, _path: &str, _form: &UploadForm) -> ProtocolResult<HttpResponse> {
            Err(ProtocolError::Transport("unused".into()))
        }
    }

    async fn listing_after(input: &'static [u8]) -> usize {
        let terminal = Terminal::new();
        let dashboard = Rc::new(Dashboard::new(SlowListing, terminal.surfaces()));
        tokio::task::LocalSet::new()
            .run_until(run_lines(dashboard, terminal.clone(), BufReader::new(input)))
            .await
            .unwrap();
        terminal.table.rows().len()
    }

    #[tokio::test]
    async fn end_of_input_waits_for_running_actions() {
        assert_eq!(listing_after(b"list\n").await, 1);
    }

    #[tokio::test]
    async fn quit_waits_for_running_actions() {
        assert_eq!(listing_after(b"list\nquit\nlist\n").await, 1);
    }
}
