use std::cell::Cell;
use std::rc::Rc;

use csr_protocol::Transport;

use crate::anchor::{self, AnchorCache, AnchorField, AnchorOutcome, CopyOutcome};
use crate::busy::BusyControl;
use crate::health::{self, HealthStatus};
use crate::keys::{self, PublicKeyOutcome};
use crate::ledger::{self, LedgerOutcome, LedgerReport};
use crate::listing::{self, ListingOutcome};
use crate::messages;
use crate::register::{self, RegistrationOutcome};
use crate::surface::{Clipboard, Indicator, RecordTable, TextRegion, TriggerControl};
use crate::upload::UploadInput;
use crate::verify::{self, VerificationOutcome};

/// The controls and display regions a front end provides.
#[derive(Clone)]
pub struct Surfaces {
    pub health: Rc<dyn Indicator>,

    pub register_trigger: Rc<dyn TriggerControl>,
    pub register_result: Rc<dyn TextRegion>,

    pub verify_trigger: Rc<dyn TriggerControl>,
    pub verify_result: Rc<dyn TextRegion>,

    pub reload_trigger: Rc<dyn TriggerControl>,
    pub records_result: Rc<dyn TextRegion>,
    pub records_table: Rc<dyn RecordTable>,

    pub ledger_trigger: Rc<dyn TriggerControl>,
    pub ledger_chain_result: Rc<dyn TextRegion>,
    pub ledger_signature_result: Rc<dyn TextRegion>,

    pub anchor_trigger: Rc<dyn TriggerControl>,
    pub anchor_result: Rc<dyn TextRegion>,
    pub anchor_ready: Rc<dyn Indicator>,
    pub copy_result: Rc<dyn TextRegion>,
    pub clipboard: Rc<dyn Clipboard>,

    pub key_trigger: Rc<dyn TriggerControl>,
    pub key_result: Rc<dyn TextRegion>,
}

/// Actions guarded by a busy trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Register,
    Verify,
    Reload,
    VerifyLedger,
    FetchAnchor,
    FetchPublicKey,
}

/// Binds each user action to its control, its result region and the backend.
///
/// Handlers return `None` when their trigger is already busy, the same way a
/// disabled button ignores clicks. Apart from the anchor cache and a queued
/// listing refresh, handlers share no state, so a failure in one never
/// affects another.
pub struct Dashboard<T> {
    transport: T,
    surfaces: Surfaces,
    register: BusyControl,
    verify: BusyControl,
    reload: BusyControl,
    ledger: BusyControl,
    anchor: BusyControl,
    key: BusyControl,
    anchors: AnchorCache,
    refresh_queued: Cell<bool>,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(transport: T, surfaces: Surfaces) -> Self {
        Self {
            register: BusyControl::new(surfaces.register_trigger.clone()),
            verify: BusyControl::new(surfaces.verify_trigger.clone()),
            reload: BusyControl::new(surfaces.reload_trigger.clone()),
            ledger: BusyControl::new(surfaces.ledger_trigger.clone()),
            anchor: BusyControl::new(surfaces.anchor_trigger.clone()),
            key: BusyControl::new(surfaces.key_trigger.clone()),
            anchors: AnchorCache::new(),
            refresh_queued: Cell::new(false),
            transport,
            surfaces,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn anchors(&self) -> &AnchorCache {
        &self.anchors
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.busy_control(action).is_busy()
    }

    fn busy_control(&self, action: Action) -> &BusyControl {
        match action {
            Action::Register => &self.register,
            Action::Verify => &self.verify,
            Action::Reload => &self.reload,
            Action::VerifyLedger => &self.ledger,
            Action::FetchAnchor => &self.anchor,
            Action::FetchPublicKey => &self.key,
        }
    }

    fn refuse_if_busy(&self, action: Action) -> bool {
        let busy = self.is_busy(action);
        if busy {
            tracing::debug!(?action, "trigger busy, ignoring");
        }
        busy
    }

    pub async fn check_health(&self) -> HealthStatus {
        let status = health::probe(&self.transport).await;
        tracing::info!(online = status.is_online(), "health probed");
        self.surfaces.health.set_active(status.is_online());
        status
    }

    pub async fn on_register(&self, input: UploadInput) -> Option<RegistrationOutcome> {
        if self.refuse_if_busy(Action::Register) {
            return None;
        }
        let outcome = {
            let _busy = self.register.acquire(messages::REGISTER_BUSY);
            let outcome = register::submit(&self.transport, input).await;
            outcome.rendered().show_on(self.surfaces.register_result.as_ref());
            outcome
        };
        if outcome.refreshes_listing() {
            self.refresh_listing().await;
        }
        Some(outcome)
    }

    /// A reload already in flight was dispatched before the change, so the
    /// refresh is queued behind it instead of being dropped.
    async fn refresh_listing(&self) {
        if self.reload.is_busy() {
            tracing::debug!("reload in flight, queueing refresh");
            self.refresh_queued.set(true);
        } else {
            self.on_reload().await;
        }
    }

    pub async fn on_verify(&self, input: UploadInput) -> Option<VerificationOutcome> {
        if self.refuse_if_busy(Action::Verify) {
            return None;
        }
        let _busy = self.verify.acquire(messages::VERIFY_BUSY);
        let outcome = verify::submit(&self.transport, input).await;
        outcome.rendered().show_on(self.surfaces.verify_result.as_ref());
        Some(outcome)
    }

    /// Replace the table wholesale on success; leave it untouched on failure.
    pub async fn on_reload(&self) -> Option<ListingOutcome> {
        if self.refuse_if_busy(Action::Reload) {
            return None;
        }
        let _busy = self.reload.acquire(messages::LIST_BUSY);
        let mut outcome = self.fetch_listing().await;
        while self.refresh_queued.replace(false) {
            outcome = self.fetch_listing().await;
        }
        Some(outcome)
    }

    async fn fetch_listing(&self) -> ListingOutcome {
        let outcome = listing::fetch(&self.transport).await;
        if let Some(rows) = outcome.rows() {
            self.surfaces.records_table.replace_rows(rows);
        }
        outcome.rendered().show_on(self.surfaces.records_result.as_ref());
        outcome
    }

    pub async fn on_verify_ledger(&self) -> Option<LedgerOutcome> {
        if self.refuse_if_busy(Action::VerifyLedger) {
            return None;
        }
        let _busy = self.ledger.acquire(messages::LEDGER_BUSY);
        self.show_ledger(&LedgerReport::running());
        let outcome = ledger::run(&self.transport).await;
        self.show_ledger(&outcome.report());
        Some(outcome)
    }

    fn show_ledger(&self, report: &LedgerReport) {
        report.chain.show_on(self.surfaces.ledger_chain_result.as_ref());
        report.signature.show_on(self.surfaces.ledger_signature_result.as_ref());
    }

    pub async fn on_fetch_anchor(&self) -> Option<AnchorOutcome> {
        if self.refuse_if_busy(Action::FetchAnchor) {
            return None;
        }
        let _busy = self.anchor.acquire(messages::ANCHOR_BUSY);
        let outcome = anchor::fetch(&self.transport).await;
        self.anchors.set(outcome.snapshot());
        self.surfaces.anchor_ready.set_active(self.anchors.is_ready());
        outcome.rendered().show_on(self.surfaces.anchor_result.as_ref());
        Some(outcome)
    }

    pub async fn on_copy_hash(&self) -> CopyOutcome {
        self.copy(AnchorField::BlockHash).await
    }

    pub async fn on_copy_signature(&self) -> CopyOutcome {
        self.copy(AnchorField::Signature).await
    }

    async fn copy(&self, field: AnchorField) -> CopyOutcome {
        let outcome = anchor::copy_field(&self.anchors, self.surfaces.clipboard.as_ref(), field).await;
        outcome.rendered().show_on(self.surfaces.copy_result.as_ref());
        outcome
    }

    pub async fn on_fetch_public_key(&self) -> Option<PublicKeyOutcome> {
        if self.refuse_if_busy(Action::FetchPublicKey) {
            return None;
        }
        let _busy = self.key.acquire(messages::KEY_BUSY);
        let outcome = keys::fetch(&self.transport).await;
        outcome.rendered().show_on(self.surfaces.key_result.as_ref());
        Some(outcome)
    }
}
