// In-memory document used to drive the controller from host-side tests.

#![allow(dead_code)]

use modal_core::markup::{EXTERNAL_CONTAINER_CLASS, TIMED_ATTR, TRIGGER_ATTR};
use modal_core::{
    Callback, Clock, CookieStore, DecisionStore, Element, Host, ManualClock, MemoryCookieJar,
    ModalAction, ModalConfig, ModalController, OnceCallback, StoreError,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

pub type Store = Rc<CountingStore<CookieStore<Rc<MemoryCookieJar<Rc<ManualClock>>>, Rc<ManualClock>>>>;
pub type Controller = ModalController<FakeHost, Store>;

struct Node {
    tag: String,
    id: String,
    classes: Vec<String>,
    attrs: RefCell<HashMap<String, String>>,
    children: RefCell<Vec<FakeElement>>,
    open: Cell<bool>,
    connected: Cell<bool>,
    shown: Cell<usize>,
}

#[derive(Clone)]
pub struct FakeElement(Rc<Node>);

impl FakeElement {
    pub fn new(tag: &str, id: &str) -> Self {
        Self::build(tag, id, Vec::new())
    }

    pub fn with_class(tag: &str, class: &str) -> Self {
        Self::build(tag, "", vec![class.to_string()])
    }

    fn build(tag: &str, id: &str, classes: Vec<String>) -> Self {
        Self(Rc::new(Node {
            tag: tag.to_string(),
            id: id.to_string(),
            classes,
            attrs: RefCell::new(HashMap::new()),
            children: RefCell::new(Vec::new()),
            open: Cell::new(false),
            connected: Cell::new(false),
            shown: Cell::new(0),
        }))
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.0
            .attrs
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(self, child: FakeElement) -> Self {
        self.0.children.borrow_mut().push(child);
        self
    }

    /// Times `show_modal` opened this dialog.
    pub fn shown(&self) -> usize {
        self.0.shown.get()
    }

    fn same(&self, other: &FakeElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn set_connected(&self, connected: bool) {
        self.0.connected.set(connected);
        for c in self.0.children.borrow().iter() {
            c.set_connected(connected);
        }
    }

    fn walk(&self, out: &mut Vec<FakeElement>) {
        out.push(self.clone());
        for c in self.0.children.borrow().iter() {
            c.walk(out);
        }
    }

    fn descendants(&self) -> Vec<FakeElement> {
        let mut out = Vec::new();
        for c in self.0.children.borrow().iter() {
            c.walk(&mut out);
        }
        out
    }
}

impl Element for FakeElement {
    fn id(&self) -> String {
        self.0.id.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attrs.borrow().get(name).cloned()
    }

    fn is_same(&self, other: &Self) -> bool {
        self.same(other)
    }

    fn is_connected(&self) -> bool {
        self.0.connected.get()
    }

    fn is_open(&self) -> bool {
        self.0.open.get()
    }

    fn show_modal(&self) {
        self.0.open.set(true);
        self.0.shown.set(self.0.shown.get() + 1);
    }

    fn close(&self) {
        self.0.open.set(false);
    }
}

struct Listener {
    target: FakeElement,
    prevent_default: bool,
    handler: Rc<RefCell<Callback>>,
}

struct Timer {
    due_ms: i64,
    callback: OnceCallback,
}

struct Page {
    clock: Rc<ManualClock>,
    roots: RefCell<Vec<FakeElement>>,
    listeners: RefCell<Vec<Listener>>,
    timers: RefCell<Vec<Timer>>,
    marker: Cell<bool>,
}

#[derive(Clone)]
pub struct FakeHost(Rc<Page>);

impl FakeHost {
    pub fn new(clock: Rc<ManualClock>) -> Self {
        Self(Rc::new(Page {
            clock,
            roots: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
            marker: Cell::new(false),
        }))
    }

    pub fn append(&self, el: &FakeElement) {
        el.set_connected(true);
        self.0.roots.borrow_mut().push(el.clone());
    }

    pub fn remove(&self, el: &FakeElement) {
        el.set_connected(false);
        self.0.roots.borrow_mut().retain(|r| !r.same(el));
    }

    /// Dispatch a click; returns whether a handler asked to prevent the default action.
    pub fn click(&self, el: &FakeElement) -> bool {
        let matching: Vec<(bool, Rc<RefCell<Callback>>)> = self
            .0
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.target.same(el))
            .map(|l| (l.prevent_default, l.handler.clone()))
            .collect();
        let mut prevented = false;
        for (prevent, handler) in matching {
            prevented |= prevent;
            (&mut *handler.borrow_mut())();
        }
        prevented
    }

    pub fn listener_count(&self, el: &FakeElement) -> usize {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.target.same(el))
            .count()
    }

    pub fn pending_timers(&self) -> usize {
        self.0.timers.borrow().len()
    }

    /// Move simulated time forward, firing timers as they fall due.
    pub fn advance(&self, by: Duration) {
        let end = self.0.clock.now_ms() + by.as_millis() as i64;
        loop {
            let next = {
                let mut timers = self.0.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due_ms <= end)
                    .min_by_key(|(_, t)| t.due_ms)
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            match next {
                Some(timer) => {
                    if timer.due_ms > self.0.clock.now_ms() {
                        self.0.clock.set(timer.due_ms);
                    }
                    (timer.callback)();
                }
                None => break,
            }
        }
        self.0.clock.set(end);
    }

    pub fn marker(&self) -> bool {
        self.0.marker.get()
    }

    fn all(&self) -> Vec<FakeElement> {
        let mut out = Vec::new();
        for r in self.0.roots.borrow().iter() {
            r.walk(&mut out);
        }
        out
    }
}

impl Host for FakeHost {
    type Element = FakeElement;

    fn element_by_id(&self, id: &str) -> Option<FakeElement> {
        if id.is_empty() {
            return None;
        }
        self.all().into_iter().find(|e| e.0.id == id)
    }

    fn triggers(&self) -> Vec<FakeElement> {
        self.all()
            .into_iter()
            .filter(|e| e.has_attribute(TRIGGER_ATTR))
            .collect()
    }

    fn timed_dialogs(&self) -> Vec<FakeElement> {
        self.all()
            .into_iter()
            .filter(|e| e.0.tag == "dialog" && e.has_attribute(TIMED_ATTR))
            .collect()
    }

    fn external_links(&self) -> Vec<FakeElement> {
        self.all()
            .into_iter()
            .filter(|e| e.0.classes.iter().any(|c| c == EXTERNAL_CONTAINER_CLASS))
            .flat_map(|container| container.descendants())
            .filter(|e| e.0.tag == "a")
            .collect()
    }

    fn response_controls(&self, dialog: &FakeElement) -> Vec<FakeElement> {
        dialog
            .descendants()
            .into_iter()
            .filter(|e| !ModalAction::markers(|a| e.has_attribute(a)).is_empty())
            .collect()
    }

    fn on_activate(&self, target: &FakeElement, prevent_default: bool, handler: Callback) {
        self.0.listeners.borrow_mut().push(Listener {
            target: target.clone(),
            prevent_default,
            handler: Rc::new(RefCell::new(handler)),
        });
    }

    fn schedule(&self, delay: Duration, callback: OnceCallback) {
        let due_ms = self.0.clock.now_ms() + delay.as_millis() as i64;
        self.0.timers.borrow_mut().push(Timer { due_ms, callback });
    }

    fn set_active_marker(&self, active: bool) {
        self.0.marker.set(active);
    }
}

/// Decision store wrapper that counts writes.
pub struct CountingStore<S> {
    inner: S,
    writes: Cell<usize>,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            writes: Cell::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl<S: DecisionStore> DecisionStore for CountingStore<S> {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str, retention_days: i64) -> Result<(), StoreError> {
        self.writes.set(self.writes.get() + 1);
        self.inner.set(key, value, retention_days)
    }
}

/// One browsing context: clock, cookie jar and store survive "reloads".
pub struct Browser {
    pub clock: Rc<ManualClock>,
    pub jar: Rc<MemoryCookieJar<Rc<ManualClock>>>,
    pub store: Store,
}

impl Browser {
    pub fn new() -> Self {
        // 2024-01-01T00:00:00Z
        let clock = Rc::new(ManualClock::new(1_704_067_200_000));
        let jar = Rc::new(MemoryCookieJar::new(clock.clone()));
        let store = Rc::new(CountingStore::new(CookieStore::new(jar.clone(), clock.clone())));
        Self { clock, jar, store }
    }

    /// A fresh page sharing this browser's cookies.
    pub fn page(&self) -> FakeHost {
        FakeHost::new(self.clock.clone())
    }

    pub fn controller(&self, host: &FakeHost, config: ModalConfig) -> Controller {
        ModalController::new(host.clone(), self.store.clone(), config)
    }
}

pub fn dialog(id: &str) -> FakeElement {
    FakeElement::new("dialog", id)
}

pub fn button(marker: &str) -> FakeElement {
    FakeElement::new("button", "").attr(marker, "")
}

pub fn trigger(target: &str) -> FakeElement {
    FakeElement::new("button", "").attr(TRIGGER_ATTR, target)
}
