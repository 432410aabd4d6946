//! View-level models shared by the app shell and components.

use std::rc::Rc;
use yew::Reducible;

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Error toast.
    Error,
}

/// Toast payload used by the host and app state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}

/// Request to show a toast, emitted by any view through context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Severity classification.
    pub kind: ToastKind,
    /// Display message.
    pub message: String,
}

impl Notice {
    /// Error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    /// Success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

/// Toast list mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastAction {
    /// Append a toast with the next id.
    Push(Notice),
    /// Remove the toast with this id.
    Dismiss(u64),
}

/// Visible toasts plus the id counter, driven through `use_reducer`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastList {
    /// Toasts in display order.
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(notice) => {
                next.next_id += 1;
                next.toasts.push(Toast {
                    id: next.next_id,
                    message: notice.message,
                    kind: notice.kind,
                });
            }
            ToastAction::Dismiss(id) => next.toasts.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}
