use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::services::common::Property;

/// Errors from the display backend
#[derive(thiserror::Error, Debug)]
pub enum DisplayError {
    /// The backend rejected or failed the geometry transition
    #[error("display transition failed: {0}")]
    TransitionFailed(String),

    /// The backend is not available (headless run, element unmounted)
    #[error("display backend unavailable")]
    Unavailable,
}

/// Capability surface for fullscreen/PiP geometry transitions.
///
/// Supplied by the embedding UI; the controller never touches window
/// geometry directly.
#[async_trait]
pub trait FullscreenBackend: Send + Sync {
    /// Enter fullscreen.
    ///
    /// # Errors
    ///
    /// Returns `DisplayError` if the transition fails.
    async fn enter_fullscreen(&self) -> Result<(), DisplayError>;

    /// Exit fullscreen.
    ///
    /// # Errors
    ///
    /// Returns `DisplayError` if the transition fails.
    async fn exit_fullscreen(&self) -> Result<(), DisplayError>;

    /// Enter picture-in-picture.
    ///
    /// # Errors
    ///
    /// Returns `DisplayError` if the transition fails.
    async fn enter_pip(&self) -> Result<(), DisplayError>;

    /// Exit picture-in-picture.
    ///
    /// # Errors
    ///
    /// Returns `DisplayError` if the transition fails.
    async fn exit_pip(&self) -> Result<(), DisplayError>;
}

/// Who asked for a fullscreen transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    /// Explicit operator action
    User,

    /// A scheduled auto-enable/auto-disable event
    Scheduled,
}

/// Reconciles fullscreen/PiP state across user, scheduled and native triggers.
///
/// A user-initiated exit (native change while our last request was
/// fullscreen) sets a `user_exited` flag; while set, scheduled auto-enable
/// is suppressed, since the operator made a deliberate choice that
/// automation must not override. An explicit user enter, or an orchestrator
/// restart, clears the flag.
pub struct FullscreenPipController {
    backend: Arc<dyn FullscreenBackend>,
    fullscreen: Property<bool>,
    pip: Property<bool>,
    user_exited: AtomicBool,
    requested_fullscreen: AtomicBool,
}

impl FullscreenPipController {
    /// Create a controller over the given backend.
    pub fn new(backend: Arc<dyn FullscreenBackend>) -> Self {
        Self {
            backend,
            fullscreen: Property::new(false),
            pip: Property::new(false),
            user_exited: AtomicBool::new(false),
            requested_fullscreen: AtomicBool::new(false),
        }
    }

    /// Observable fullscreen state.
    pub fn fullscreen(&self) -> Property<bool> {
        self.fullscreen.clone()
    }

    /// Observable picture-in-picture state.
    pub fn pip(&self) -> Property<bool> {
        self.pip.clone()
    }

    /// Whether the operator's manual exit is currently suppressing
    /// scheduled fullscreen enables.
    pub fn user_exited(&self) -> bool {
        self.user_exited.load(Ordering::SeqCst)
    }

    /// Clear the manual-exit suppression (restart path).
    pub fn clear_user_exited(&self) {
        self.user_exited.store(false, Ordering::SeqCst);
    }

    /// Request fullscreen entry.
    ///
    /// Scheduled requests are suppressed while the operator's manual exit
    /// flag is set; user requests clear that flag.
    pub async fn request_fullscreen(&self, source: RequestSource) {
        match source {
            RequestSource::User => self.user_exited.store(false, Ordering::SeqCst),
            RequestSource::Scheduled => {
                if self.user_exited.load(Ordering::SeqCst) {
                    debug!("scheduled fullscreen enable suppressed after manual exit");
                    return;
                }
            }
        }

        if self.fullscreen.get() {
            debug!("already fullscreen, enable is a no-op");
            return;
        }

        self.requested_fullscreen.store(true, Ordering::SeqCst);
        if let Err(e) = self.backend.enter_fullscreen().await {
            warn!("fullscreen enter failed: {e}");
            self.requested_fullscreen.store(false, Ordering::SeqCst);
            return;
        }
        self.fullscreen.set(true);
    }

    /// Request fullscreen exit.
    pub async fn exit_fullscreen(&self, source: RequestSource) {
        if !self.fullscreen.get() {
            debug!("not fullscreen, disable is a no-op ({source:?})");
            return;
        }

        self.requested_fullscreen.store(false, Ordering::SeqCst);
        if let Err(e) = self.backend.exit_fullscreen().await {
            warn!("fullscreen exit failed: {e}");
            return;
        }
        self.fullscreen.set(false);
    }

    /// Reconcile a native fullscreen-change notification.
    ///
    /// An exit we did not request, while our last requested state was
    /// fullscreen, is the operator escaping; remember it so automation
    /// backs off.
    pub fn handle_native_change(&self, is_fullscreen: bool) {
        if !is_fullscreen && self.requested_fullscreen.swap(false, Ordering::SeqCst) {
            debug!("operator exited fullscreen manually, suppressing auto re-entry");
            self.user_exited.store(true, Ordering::SeqCst);
        }
        if is_fullscreen {
            self.requested_fullscreen.store(true, Ordering::SeqCst);
        }
        self.fullscreen.set(is_fullscreen);
    }

    /// Enter picture-in-picture. Idempotent: enabling while already enabled
    /// is a logged no-op, because manual keypresses and scheduled events can
    /// both target the same transition.
    pub async fn enable_pip(&self) {
        if self.pip.get() {
            debug!("pip already enabled");
            return;
        }
        if let Err(e) = self.backend.enter_pip().await {
            warn!("pip enter failed: {e}");
            return;
        }
        self.pip.set(true);
    }

    /// Exit picture-in-picture. Idempotent like [`enable_pip`](Self::enable_pip).
    pub async fn disable_pip(&self) {
        if !self.pip.get() {
            debug!("pip already disabled");
            return;
        }
        if let Err(e) = self.backend.exit_pip().await {
            warn!("pip exit failed: {e}");
            return;
        }
        self.pip.set(false);
    }
}
