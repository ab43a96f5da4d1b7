use leptos::prelude::*;

/// Сколько миллисекунд уведомление остаётся на экране
const TOAST_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub title: String,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub toast: RwSignal<Option<Toast>>,
    next_toast_id: RwSignal<u32>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            toast: RwSignal::new(None),
            next_toast_id: RwSignal::new(0),
        }
    }

    pub fn notify_success(&self, title: impl Into<String>, text: impl Into<String>) {
        self.notify(ToastKind::Success, title.into(), text.into());
    }

    pub fn notify_error(&self, title: impl Into<String>, text: impl Into<String>) {
        self.notify(ToastKind::Error, title.into(), text.into());
    }

    pub fn dismiss(&self) {
        self.toast.set(None);
    }

    /// Показать уведомление; оно скрывается само, если его не сменило более новое
    fn notify(&self, kind: ToastKind, title: String, text: String) {
        let id = self.next_toast_id.get_untracked().wrapping_add(1);
        self.next_toast_id.set(id);
        self.toast.set(Some(Toast {
            id,
            kind,
            title,
            text,
        }));

        let toast = self.toast;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
            let still_shown = toast.with_untracked(|t| t.as_ref().map(|t| t.id) == Some(id));
            if still_shown {
                toast.set(None);
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
