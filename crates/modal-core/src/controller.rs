//! Trigger binding, decision recording and timed presentation.
//!
//! All work happens inside host-dispatched callbacks on one thread. A
//! decision is written synchronously inside the activation handler before the
//! dialog closes, so any later timed check for the same dialog observes it.

use crate::action::ModalAction;
use crate::config::ModalConfig;
use crate::host::{Element, Host};
use crate::markup::{self, ModalDescriptor, TRIGGER_ATTR};
use crate::store::DecisionStore;
use fnv::FnvHashSet;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Counts gathered while scanning the document once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub triggers_bound: usize,
    pub triggers_skipped: usize,
    pub links_bound: usize,
    pub timers_scheduled: usize,
    pub timers_suppressed: usize,
}

pub struct ModalController<H: Host, S: DecisionStore> {
    inner: Rc<Inner<H, S>>,
}

impl<H: Host, S: DecisionStore> Clone for ModalController<H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<H: Host, S: DecisionStore> {
    host: H,
    store: S,
    config: ModalConfig,
    // dialog elements whose response controls already have handlers
    bound: RefCell<Vec<H::Element>>,
    // dialog ids with a pending or fired auto-open timer
    scheduled: RefCell<FnvHashSet<String>>,
}

impl<H: Host, S: DecisionStore + 'static> ModalController<H, S> {
    pub fn new(host: H, store: S, config: ModalConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                store,
                config,
                bound: RefCell::new(Vec::new()),
                scheduled: RefCell::new(FnvHashSet::default()),
            }),
        }
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    pub fn config(&self) -> &ModalConfig {
        &self.inner.config
    }

    /// Run every scan once. Call when the document is ready.
    pub fn init(&self) -> ScanReport {
        let mut report = ScanReport::default();
        self.inner.scan_triggers(&mut report);
        if self.inner.config.external_triggers {
            self.inner.scan_external_links(&mut report);
        }
        self.inner.present_timed(&mut report);
        log::info!(
            "[modals] triggers={} skipped={} links={} timed={} suppressed={}",
            report.triggers_bound,
            report.triggers_skipped,
            report.links_bound,
            report.timers_scheduled,
            report.timers_suppressed
        );
        report
    }

    pub fn scan_triggers(&self) -> ScanReport {
        let mut report = ScanReport::default();
        self.inner.scan_triggers(&mut report);
        report
    }

    pub fn scan_external_links(&self) -> ScanReport {
        let mut report = ScanReport::default();
        self.inner.scan_external_links(&mut report);
        report
    }

    pub fn present_timed(&self) -> ScanReport {
        let mut report = ScanReport::default();
        self.inner.present_timed(&mut report);
        report
    }

    /// Attach response handlers to `dialog`'s controls. Repeated calls for the same element are no-ops.
    pub fn bind_actions(&self, dialog: &H::Element) {
        self.inner.bind_actions(dialog, &dialog.id());
    }

    /// The recorded action for `modal_id`, if it parses as one.
    pub fn decision(&self, modal_id: &str) -> Option<ModalAction> {
        self.inner
            .store
            .get(&self.inner.key(modal_id))
            .and_then(|v| v.parse().ok())
    }

    pub fn is_decided(&self, modal_id: &str) -> bool {
        self.inner.is_decided(modal_id)
    }
}

impl<H: Host, S: DecisionStore + 'static> Inner<H, S> {
    fn key(&self, modal_id: &str) -> String {
        markup::decision_key(&self.config.key_prefix, modal_id)
    }

    fn is_decided(&self, modal_id: &str) -> bool {
        self.store
            .get(&self.key(modal_id))
            .is_some_and(|v| !v.is_empty())
    }

    fn scan_triggers(self: &Rc<Self>, report: &mut ScanReport) {
        for trigger in self.host.triggers() {
            let modal_id = trigger.attribute(TRIGGER_ATTR).unwrap_or_default();
            let Some(dialog) = self.host.element_by_id(&modal_id) else {
                log::debug!("[modals] trigger targets missing dialog {modal_id:?}");
                report.triggers_skipped += 1;
                continue;
            };
            if self.config.skip_decided_triggers && self.is_decided(&modal_id) {
                log::debug!("[modals] {modal_id} already decided; trigger left unbound");
                report.triggers_skipped += 1;
                continue;
            }

            self.bind_actions(&dialog, &modal_id);
            let this = self.clone();
            self.host.on_activate(
                &trigger,
                false,
                Box::new(move || this.open(&dialog, &modal_id)),
            );
            report.triggers_bound += 1;
        }
    }

    fn scan_external_links(self: &Rc<Self>, report: &mut ScanReport) {
        for link in self.host.external_links() {
            let href = link.attribute("href").unwrap_or_default();
            let Some(modal_id) = markup::fragment_target(&href).map(str::to_string) else {
                continue;
            };
            let this = self.clone();
            self.host.on_activate(
                &link,
                true,
                Box::new(move || match this.host.element_by_id(&modal_id) {
                    Some(dialog) => this.open(&dialog, &modal_id),
                    None => log::debug!("[modals] link targets missing dialog {modal_id:?}"),
                }),
            );
            report.links_bound += 1;
        }
    }

    fn present_timed(self: &Rc<Self>, report: &mut ScanReport) {
        for dialog in self.host.timed_dialogs() {
            let desc = ModalDescriptor::read(&dialog, self.config.default_retention_days);
            if desc.id.is_empty() {
                log::debug!("[modals] timed dialog without id ignored");
                continue;
            }
            if self.is_decided(&desc.id) {
                report.timers_suppressed += 1;
                continue;
            }
            if !self.scheduled.borrow_mut().insert(desc.id.clone()) {
                continue;
            }
            let delay = match desc.delay {
                Some(Some(delay)) => delay,
                _ => {
                    log::warn!("[modals] {} has a malformed delay; opening now", desc.id);
                    Duration::ZERO
                }
            };

            let this = self.clone();
            let modal_id = desc.id;
            self.host.schedule(
                delay,
                Box::new(move || {
                    if !dialog.is_connected() || this.is_decided(&modal_id) {
                        return;
                    }
                    this.open(&dialog, &modal_id);
                }),
            );
            report.timers_scheduled += 1;
        }
    }

    fn open(self: &Rc<Self>, dialog: &H::Element, modal_id: &str) {
        if !dialog.is_open() {
            dialog.show_modal();
        }
        self.bind_actions(dialog, modal_id);
        if self.config.active_marker {
            self.host.set_active_marker(true);
        }
    }

    fn bind_actions(self: &Rc<Self>, dialog: &H::Element, modal_id: &str) {
        if self.bound.borrow().iter().any(|d| d.is_same(dialog)) {
            return;
        }
        let mut wired = 0;
        for control in self.host.response_controls(dialog) {
            let markers = ModalAction::markers(|attr| control.has_attribute(attr));
            let Some(&action) = markers.first() else {
                continue;
            };
            if markers.len() > 1 {
                log::warn!("[modals] control in {modal_id} has markers {markers:?}; using {action}");
            }
            let this = self.clone();
            let dialog = dialog.clone();
            let modal_id = modal_id.to_string();
            self.host.on_activate(
                &control,
                false,
                Box::new(move || this.respond(&dialog, &modal_id, action)),
            );
            wired += 1;
        }
        // a dialog without controls yet is rescanned on its next opening
        if wired > 0 {
            self.bound.borrow_mut().push(dialog.clone());
        }
    }

    fn respond(&self, dialog: &H::Element, modal_id: &str, action: ModalAction) {
        // second activation of an already-closed dialog records nothing
        if !dialog.is_open() {
            return;
        }
        let retention = markup::parse_retention_days(
            dialog.attribute(markup::RETENTION_ATTR).as_deref(),
            self.config.default_retention_days,
        );
        if let Err(e) = self.store.set(&self.key(modal_id), action.as_str(), retention) {
            log::warn!("[modals] could not record {action} for {modal_id}: {e}");
        }
        dialog.close();
        if self.config.active_marker {
            self.host.set_active_marker(false);
        }
    }
}
