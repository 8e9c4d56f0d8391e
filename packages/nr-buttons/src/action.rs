//! Action button: runs an asynchronous operation per tap.
//!
//! The button is a two-state machine:
//!
//! ```text
//! Idle --activate()--> Busy --operation finishes--> Idle (+ callback)
//!                      Busy --activate()--> Busy (suppressed)
//! ```
//!
//! All transitions happen on the thread that owns the button. Operations are
//! spawned with [`tokio::task::spawn_local`], so an [`ActionButton`] must be
//! activated from inside a [`tokio::task::LocalSet`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::color::Hsla;
use crate::operation::{self, Operation, OperationError, OperationResult};
use crate::render::ButtonFrame;
use crate::style::{BusyIndicator, ButtonContent, ButtonStyle};
use crate::{Error, Result};

/// Delay used by [`ActionButton::loading`].
pub const LOADING_DELAY: Duration = Duration::from_secs(2);

/// Whether an operation is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationState {
    #[default]
    Idle,
    Busy,
}

/// What a call to `activate()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The button went busy and the operation was started
    Started,
    /// The button was already busy (or gone); nothing happened
    Suppressed,
}

type CompleteCallback = Box<dyn FnMut()>;
type ErrorCallback = Box<dyn FnMut(OperationError)>;

/// State shared between the button and its in-flight activation task.
struct Shared {
    label: String,
    state: Cell<ActivationState>,
    operation: RefCell<Operation>,
    on_complete: RefCell<CompleteCallback>,
    on_error: RefCell<Option<ErrorCallback>>,
    /// Cancelled when the owning [`ActionButton`] is dropped.
    lifetime: CancellationToken,
}

impl Shared {
    fn activate(self: &Rc<Self>) -> ActivationOutcome {
        if self.lifetime.is_cancelled() {
            tracing::trace!(label = %self.label, "activation after teardown ignored");
            return ActivationOutcome::Suppressed;
        }
        if self.state.get() == ActivationState::Busy {
            tracing::trace!(label = %self.label, "activation suppressed while busy");
            return ActivationOutcome::Suppressed;
        }

        self.state.set(ActivationState::Busy);
        tracing::debug!(label = %self.label, "action started");

        // Back to idle if building or spawning the operation unwinds.
        let guard = IdleOnUnwind(&self.state);

        let work = {
            let mut operation = self.operation.borrow_mut();
            (*operation)()
        };
        let token = self.lifetime.child_token();
        let shared = Rc::clone(self);

        tokio::task::spawn_local(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(label = %shared.label, "action cancelled with its button");
                    return;
                }
                result = work => result,
            };
            shared.finish(result);
        });

        std::mem::forget(guard);
        ActivationOutcome::Started
    }

    fn finish(&self, result: OperationResult) {
        // Back to idle before any callback runs, so callbacks may re-activate.
        self.state.set(ActivationState::Idle);

        match result {
            Ok(()) => {
                tracing::debug!(label = %self.label, "action completed");
                let mut on_complete = self.on_complete.borrow_mut();
                (*on_complete)();
            }
            Err(err) => {
                let mut on_error = self.on_error.borrow_mut();
                match on_error.as_mut() {
                    Some(callback) => {
                        tracing::debug!(label = %self.label, error = %err, "action failed");
                        callback(err);
                    }
                    None => {
                        tracing::warn!(
                            label = %self.label,
                            error = %err,
                            "action failed with no error handler"
                        );
                    }
                }
            }
        }
    }
}

/// Resets the state to idle when dropped before being forgotten.
struct IdleOnUnwind<'a>(&'a Cell<ActivationState>);

impl Drop for IdleOnUnwind<'_> {
    fn drop(&mut self) {
        self.0.set(ActivationState::Idle);
    }
}

/// A button that goes busy while its operation runs.
///
/// Each accepted activation fires exactly one callback: `on_complete` on
/// success, `on_error` on failure. Taps while busy are ignored. Dropping the
/// button cancels the in-flight operation and no callback fires afterwards.
pub struct ActionButton {
    content: ButtonContent,
    style: ButtonStyle,
    indicator: BusyIndicator,
    shared: Rc<Shared>,
}

impl std::fmt::Debug for ActionButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionButton")
            .field("content", &self.content)
            .field("style", &self.style)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl ActionButton {
    /// Start building a button showing `content`.
    pub fn builder(content: impl Into<ButtonContent>) -> ActionButtonBuilder {
        ActionButtonBuilder::new(content.into())
    }

    /// Solid button that spins for [`LOADING_DELAY`] and then calls `action`.
    pub fn loading(
        title: &str,
        background: Hsla,
        foreground: Hsla,
        loading_color: Hsla,
        action: impl FnMut() + 'static,
    ) -> Self {
        let content = ButtonContent::from(title);
        Self::assemble(
            content,
            ButtonStyle::Solid {
                background,
                foreground,
            },
            BusyIndicator {
                tint: loading_color,
            },
            operation::delay(LOADING_DELAY),
            Box::new(action),
            None,
        )
    }

    fn assemble(
        content: ButtonContent,
        style: ButtonStyle,
        indicator: BusyIndicator,
        operation: Operation,
        on_complete: CompleteCallback,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        let shared = Rc::new(Shared {
            label: content.label().to_string(),
            state: Cell::new(ActivationState::Idle),
            operation: RefCell::new(operation),
            on_complete: RefCell::new(on_complete),
            on_error: RefCell::new(on_error),
            lifetime: CancellationToken::new(),
        });

        Self {
            content,
            style,
            indicator,
            shared,
        }
    }

    /// Handle a tap.
    ///
    /// # Panics
    ///
    /// Panics when a new operation has to be started outside a
    /// [`tokio::task::LocalSet`]. The button is left idle in that case.
    pub fn activate(&self) -> ActivationOutcome {
        self.shared.activate()
    }

    /// A weak handle that can activate this button from elsewhere, such as
    /// from inside its own callbacks.
    pub fn handle(&self) -> ActionHandle {
        ActionHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    pub fn state(&self) -> ActivationState {
        self.shared.state.get()
    }

    pub fn is_busy(&self) -> bool {
        self.state() == ActivationState::Busy
    }

    pub fn content(&self) -> &ButtonContent {
        &self.content
    }

    pub fn label(&self) -> &str {
        self.content.label()
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    pub fn busy_indicator(&self) -> &BusyIndicator {
        &self.indicator
    }

    /// Frame for the current state.
    pub fn render(&self) -> ButtonFrame {
        match self.state() {
            ActivationState::Idle => ButtonFrame::idle(&self.content, &self.style),
            ActivationState::Busy => ButtonFrame::busy(&self.content, &self.style, &self.indicator),
        }
    }
}

impl Drop for ActionButton {
    fn drop(&mut self) {
        if self.is_busy() {
            tracing::debug!(label = %self.shared.label, "dropping busy action button");
        }
        self.shared.lifetime.cancel();
    }
}

/// Weak reference to an [`ActionButton`].
#[derive(Clone)]
pub struct ActionHandle {
    shared: Weak<Shared>,
}

impl ActionHandle {
    /// Activate the button. Suppressed once the button has been dropped.
    pub fn activate(&self) -> ActivationOutcome {
        match self.shared.upgrade() {
            Some(shared) => shared.activate(),
            None => ActivationOutcome::Suppressed,
        }
    }
}

/// Builder for [`ActionButton`].
pub struct ActionButtonBuilder {
    content: ButtonContent,
    style: ButtonStyle,
    indicator: BusyIndicator,
    operation: Option<Operation>,
    on_complete: Option<CompleteCallback>,
    on_error: Option<ErrorCallback>,
}

impl ActionButtonBuilder {
    fn new(content: ButtonContent) -> Self {
        Self {
            content,
            style: ButtonStyle::default(),
            indicator: BusyIndicator::default(),
            operation: None,
            on_complete: None,
            on_error: None,
        }
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn busy_indicator(mut self, indicator: BusyIndicator) -> Self {
        self.indicator = indicator;
        self
    }

    /// Operation started on every accepted activation.
    pub fn on_activate(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Called once per activation whose operation succeeded.
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Called once per activation whose operation failed.
    pub fn on_error(mut self, callback: impl FnMut(OperationError) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Result<ActionButton> {
        let operation = self.operation.ok_or(Error::MissingOperation)?;
        let on_complete = self.on_complete.ok_or(Error::MissingCallback)?;
        self.style.validate()?;

        Ok(ActionButton::assemble(
            self.content,
            self.style,
            self.indicator,
            operation,
            on_complete,
            self.on_error,
        ))
    }
}
