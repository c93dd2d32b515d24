//! Recording surfaces and a scripted transport for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use csr_protocol::{HttpResponse, ProtocolError, ProtocolResult, Transport, UploadForm};

use crate::error::{ClientError, ClientResult};
use crate::markup::TableRow;
use crate::render::Rendered;
use crate::surface::{Clipboard, Indicator, RecordTable, TextRegion, TriggerControl, Tone};

#[derive(Default)]
pub struct RecordingRegion {
    shown: RefCell<Vec<Rendered>>,
}

impl RecordingRegion {
    pub fn current(&self) -> Option<Rendered> {
        self.shown.borrow().last().cloned()
    }

    pub fn history(&self) -> Vec<Rendered> {
        self.shown.borrow().clone()
    }
}

impl TextRegion for RecordingRegion {
    fn show(&self, text: &str, tone: Tone) {
        self.shown.borrow_mut().push(Rendered::new(text, tone));
    }
}

pub struct RecordingTrigger {
    label: RefCell<String>,
    enabled: Cell<bool>,
    enabled_history: RefCell<Vec<bool>>,
}

impl RecordingTrigger {
    pub fn new(label: &str) -> Self {
        Self {
            label: RefCell::new(label.into()),
            enabled: Cell::new(true),
            enabled_history: RefCell::new(Vec::new()),
        }
    }

    pub fn enabled_history(&self) -> Vec<bool> {
        self.enabled_history.borrow().clone()
    }
}

impl TriggerControl for RecordingTrigger {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.into();
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        self.enabled_history.borrow_mut().push(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

#[derive(Default)]
pub struct RecordingTable {
    rows: RefCell<Option<Vec<TableRow>>>,
    replacements: Cell<usize>,
}

impl RecordingTable {
    pub fn rows(&self) -> Option<Vec<TableRow>> {
        self.rows.borrow().clone()
    }

    pub fn replacements(&self) -> usize {
        self.replacements.get()
    }
}

impl RecordTable for RecordingTable {
    fn replace_rows(&self, rows: Vec<TableRow>) {
        *self.rows.borrow_mut() = Some(rows);
        self.replacements.set(self.replacements.get() + 1);
    }
}

#[derive(Default)]
pub struct RecordingIndicator {
    states: RefCell<Vec<bool>>,
}

impl RecordingIndicator {
    pub fn current(&self) -> Option<bool> {
        self.states.borrow().last().copied()
    }
}

impl Indicator for RecordingIndicator {
    fn set_active(&self, active: bool) {
        self.states.borrow_mut().push(active);
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    writes: RefCell<Vec<String>>,
    broken: Cell<bool>,
}

impl RecordingClipboard {
    pub fn broken() -> Self {
        let c = Self::default();
        c.broken.set(true);
        c
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> ClientResult<()> {
        self.writes.borrow_mut().push(text.into());
        if self.broken.get() {
            return Err(ClientError::Clipboard("permission denied".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub form: Option<UploadForm>,
}

enum Scripted {
    /// A reply delivered after yielding to the scheduler `n` times.
    Reply(HttpResponse, usize),
    Fail,
}

/// Answers each `(method, path)` from a queue of scripted replies.
/// Unscripted requests fail like an unreachable backend.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<HashMap<(&'static str, String), VecDeque<Scripted>>>,
    calls: RefCell<Vec<Call>>,
    observer: RefCell<Option<Box<dyn Fn(&Call)>>>,
}

impl ScriptedTransport {
    pub fn reply(&self, method: &'static str, path: &str, status: u16, body: &str) -> &Self {
        self.reply_slow(method, path, status, body, 0)
    }

    /// Like [`reply`](Self::reply), but the request stays pending for
    /// `yields` scheduler turns so other actions can run meanwhile.
    pub fn reply_slow(
        &self,
        method: &'static str,
        path: &str,
        status: u16,
        body: &str,
        yields: usize,
    ) -> &Self {
        let resp = HttpResponse::new(status, body.to_string());
        self.push(method, path, Scripted::Reply(resp, yields));
        self
    }

    pub fn fail(&self, method: &'static str, path: &str) -> &Self {
        self.push(method, path, Scripted::Fail);
        self
    }

    /// Run `f` at the moment each request is dispatched.
    pub fn observe(&self, f: impl Fn(&Call) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(f));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.path == path).count()
    }

    fn push(&self, method: &'static str, path: &str, scripted: Scripted) {
        self.replies
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    async fn answer(&self, call: Call) -> ProtocolResult<HttpResponse> {
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(&call);
        }
        let key = (call.method, call.path.clone());
        self.calls.borrow_mut().push(call);
        let next = self.replies.borrow_mut().get_mut(&key).and_then(VecDeque::pop_front);
        match next {
            Some(Scripted::Reply(resp, yields)) => {
                for _ in 0..yields {
                    tokio::task::yield_now().await;
                }
                Ok(resp)
            }
            Some(Scripted::Fail) | None => {
                Err(ProtocolError::Transport("connection refused".into()))
            }
        }
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str) -> ProtocolResult<HttpResponse> {
        self.answer(Call { method: "GET", path: path.into(), form: None }).await
    }

    async fn post_empty(&self, path: &str) -> ProtocolResult<HttpResponse> {
        self.answer(Call { method: "POST", path: path.into(), form: None }).await
    }

    async fn post_multipart(&self, path: &str, form: &UploadForm) -> ProtocolResult<HttpResponse> {
        self.answer(Call { method: "POST", path: path.into(), form: Some(form.clone()) }).await
    }
}
