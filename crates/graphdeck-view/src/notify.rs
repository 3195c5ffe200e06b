//! Toast notifications. Backend failures land here and are never fatal;
//! the host UI drains pending toasts each frame.

use parking_lot::RwLock;

use graphdeck_core::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Pending-toast buffer shared between view-models and the host UI.
#[derive(Default)]
pub struct Notifier {
    toasts: RwLock<Vec<Toast>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    /// Surface a backend error with its user-facing message.
    pub fn backend_error(&self, err: &Error) {
        self.push(ToastLevel::Error, err.user_message());
    }

    fn push(&self, level: ToastLevel, message: String) {
        self.toasts.write().push(Toast { level, message });
    }

    /// Take all pending toasts, leaving the buffer empty.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.write())
    }

    pub fn pending(&self) -> usize {
        self.toasts.read().len()
    }
}
