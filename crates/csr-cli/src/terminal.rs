use std::cell::{Cell, RefCell};
use std::io::{IsTerminal, Write};
use std::path::Path;
use std::rc::Rc;

use async_trait::async_trait;
use base64::Engine;
use colored::{ColoredString, Colorize};

use csr_client::{
    Clipboard, ClientError, ClientResult, Indicator, RecordTable, Surfaces, TableRow, TextRegion,
    Tone, TriggerControl, RECORD_COLUMNS,
};

pub fn styled(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Ok => text.green(),
        Tone::Warn => text.yellow(),
        Tone::Ng => text.red().bold(),
        Tone::Neutral => text.dimmed(),
    }
}

/// A titled line of output.
pub struct TerminalRegion {
    title: &'static str,
}

impl TerminalRegion {
    pub fn new(title: &'static str) -> Self {
        Self { title }
    }
}

impl TextRegion for TerminalRegion {
    fn show(&self, text: &str, tone: Tone) {
        println!("{} {}", format!("[{}]", self.title).bold(), styled(text, tone));
    }
}

/// A console verb. Disabled while its action is in flight.
pub struct TerminalTrigger {
    label: RefCell<String>,
    enabled: Cell<bool>,
}

impl TerminalTrigger {
    pub fn new(label: &str) -> Self {
        Self { label: RefCell::new(label.into()), enabled: Cell::new(true) }
    }
}

impl TriggerControl for TerminalTrigger {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.into();
    }

    fn set_enabled(&self, enabled: bool) {
        tracing::debug!(label = %self.label.borrow(), enabled, "trigger state");
        self.enabled.set(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

#[derive(Default)]
pub struct TerminalTable {
    rows: RefCell<Vec<TableRow>>,
}

impl TerminalTable {
    pub fn rows(&self) -> Vec<TableRow> {
        self.rows.borrow().clone()
    }

    /// Write the current rows as a standalone HTML table.
    pub fn write_html(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, table_html(&self.rows.borrow()))
    }
}

impl RecordTable for TerminalTable {
    fn replace_rows(&self, rows: Vec<TableRow>) {
        println!("{}", RECORD_COLUMNS.join("  ").bold());
        for row in &rows {
            println!("{}", row.cells().join("  "));
        }
        *self.rows.borrow_mut() = rows;
    }
}

pub fn table_html(rows: &[TableRow]) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for column in RECORD_COLUMNS {
        out.push_str(&format!("<th>{column}</th>"));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        out.push_str(&row.to_markup());
        out.push('\n');
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

pub struct TerminalIndicator {
    name: &'static str,
    on: &'static str,
    off: &'static str,
}

impl TerminalIndicator {
    pub fn new(name: &'static str, on: &'static str, off: &'static str) -> Self {
        Self { name, on, off }
    }
}

impl Indicator for TerminalIndicator {
    fn set_active(&self, active: bool) {
        let state = if active {
            format!("● {}", self.on).green()
        } else {
            format!("○ {}", self.off).red()
        };
        println!("{} {}", format!("[{}]", self.name).bold(), state);
    }
}

/// Clipboard over the OSC 52 terminal escape sequence.
pub struct Osc52Clipboard;

pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{payload}\x07")
}

#[async_trait(?Send)]
impl Clipboard for Osc52Clipboard {
    async fn write_text(&self, text: &str) -> ClientResult<()> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(ClientError::Clipboard("stdout is not a terminal".into()));
        }
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// The full set of terminal surfaces for one session.
#[derive(Clone)]
pub struct Terminal {
    pub table: Rc<TerminalTable>,
    surfaces: Surfaces,
}

impl Terminal {
    pub fn new() -> Self {
        let table = Rc::new(TerminalTable::default());
        let surfaces = Surfaces {
            health: Rc::new(TerminalIndicator::new("api", "online", "offline")),
            register_trigger: Rc::new(TerminalTrigger::new("register")),
            register_result: Rc::new(TerminalRegion::new("register")),
            verify_trigger: Rc::new(TerminalTrigger::new("verify")),
            verify_result: Rc::new(TerminalRegion::new("verify")),
            reload_trigger: Rc::new(TerminalTrigger::new("list")),
            records_result: Rc::new(TerminalRegion::new("records")),
            records_table: table.clone(),
            ledger_trigger: Rc::new(TerminalTrigger::new("ledger")),
            ledger_chain_result: Rc::new(TerminalRegion::new("ledger")),
            ledger_signature_result: Rc::new(TerminalRegion::new("signature")),
            anchor_trigger: Rc::new(TerminalTrigger::new("anchor")),
            anchor_result: Rc::new(TerminalRegion::new("anchor")),
            anchor_ready: Rc::new(TerminalIndicator::new("anchor", "ready", "not ready")),
            copy_result: Rc::new(TerminalRegion::new("copy")),
            clipboard: Rc::new(Osc52Clipboard),
            key_trigger: Rc::new(TerminalTrigger::new("key")),
            key_result: Rc::new(TerminalRegion::new("key")),
        };
        Self { table, surfaces }
    }

    pub fn surfaces(&self) -> Surfaces {
        self.surfaces.clone()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
