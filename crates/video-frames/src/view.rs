//! Host integration for embedded players
//!
//! The embedded web view and the host's URI opener are supplied by the
//! application. Views load their page asynchronously; nothing here waits for
//! a load to finish, and destroying a view mid-load must be safe on the host
//! side.

use std::sync::Arc;
use transcript::ChildId;

/// Answer to a request from embedded content to open a new window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// The request was handled outside the view
    Intercept,
    /// Let the view navigate
    Allow,
}

/// Handler invoked with the URI a new-window request targets
pub type NewWindowHandler = Box<dyn Fn(&str) -> NavigationDecision + Send + Sync>;

/// An embeddable web view
pub trait EmbeddedView {
    /// Start loading `uri` without waiting for it
    fn load_uri(&mut self, uri: &str);

    /// Install the handler for new-window requests
    fn connect_new_window(&mut self, handler: NewWindowHandler);

    /// Release the view and abandon any load in flight
    fn destroy(&mut self);
}

/// Creates embedded views
pub trait WebViewFactory {
    /// Create a view that will be shown at the child position `child`
    fn create_view(&self, child: ChildId) -> Box<dyn EmbeddedView>;
}

/// Host service opening URIs outside the transcript
#[cfg_attr(test, mockall::automock)]
pub trait UriOpener: Send + Sync {
    /// Open `uri` (typically in the user's browser)
    fn open_uri(&self, uri: &str);
}

/// Handler forwarding every new-window request to `opener`
///
/// Keeps the player from navigating away inside the transcript.
pub fn forward_new_windows(opener: Arc<dyn UriOpener>) -> NewWindowHandler {
    Box::new(move |uri: &str| {
        tracing::debug!(uri, "Forwarding new-window request");
        opener.open_uri(uri);
        NavigationDecision::Intercept
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_forward_new_windows() {
        let mut opener = MockUriOpener::new();
        opener
            .expect_open_uri()
            .with(eq("https://www.youtube.com/watch?v=dQw4w9WgXcQ"))
            .times(1)
            .return_const(());

        let handler = forward_new_windows(Arc::new(opener));
        let decision = handler("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(decision, NavigationDecision::Intercept);
    }
}
