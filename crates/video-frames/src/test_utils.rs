//! Test doubles for host services
//!
//! Recording implementations of [`WebViewFactory`] and [`UriOpener`] that
//! remember every call, for tests that run without a UI toolkit.

use crate::view::{EmbeddedView, NavigationDecision, NewWindowHandler, UriOpener, WebViewFactory};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use transcript::ChildId;

#[derive(Default)]
struct ViewLog {
    created: Vec<ChildId>,
    loads: HashMap<ChildId, String>,
    destroyed: Vec<ChildId>,
    handlers: HashMap<ChildId, NewWindowHandler>,
}

/// View factory recording what happens to the views it creates
#[derive(Clone, Default)]
pub struct RecordingViews {
    log: Arc<Mutex<ViewLog>>,
}

impl RecordingViews {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Children of every view created so far
    pub fn created(&self) -> Vec<ChildId> {
        self.log.lock().created.clone()
    }

    /// Children of every destroyed view
    pub fn destroyed(&self) -> Vec<ChildId> {
        self.log.lock().destroyed.clone()
    }

    /// Children of views created and not yet destroyed
    pub fn live(&self) -> Vec<ChildId> {
        let log = self.log.lock();
        log.created.iter().filter(|c| !log.destroyed.contains(c)).copied().collect()
    }

    /// Last URI the view at `child` was asked to load
    pub fn loaded_uri(&self, child: ChildId) -> Option<String> {
        self.log.lock().loads.get(&child).cloned()
    }

    /// Simulate the content of the view at `child` opening a new window
    ///
    /// Returns `None` if the view has no handler (never connected, or
    /// destroyed).
    pub fn request_new_window(&self, child: ChildId, uri: &str) -> Option<NavigationDecision> {
        self.log.lock().handlers.get(&child).map(|handler| handler(uri))
    }
}

impl WebViewFactory for RecordingViews {
    fn create_view(&self, child: ChildId) -> Box<dyn EmbeddedView> {
        self.log.lock().created.push(child);
        Box::new(RecordingView { child, log: Arc::clone(&self.log) })
    }
}

struct RecordingView {
    child: ChildId,
    log: Arc<Mutex<ViewLog>>,
}

impl EmbeddedView for RecordingView {
    fn load_uri(&mut self, uri: &str) {
        self.log.lock().loads.insert(self.child, uri.to_string());
    }

    fn connect_new_window(&mut self, handler: NewWindowHandler) {
        self.log.lock().handlers.insert(self.child, handler);
    }

    fn destroy(&mut self) {
        let mut log = self.log.lock();
        log.handlers.remove(&self.child);
        log.destroyed.push(self.child);
    }
}

/// URI opener recording every URI
#[derive(Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// URIs opened so far
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }
}

impl UriOpener for RecordingOpener {
    fn open_uri(&self, uri: &str) {
        self.opened.lock().push(uri.to_string());
    }
}
