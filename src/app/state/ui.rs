use std::time::Instant;

/// A transient, auto-dismissing notification.
pub struct Toast {
    pub(in crate::app) id: u64,
    pub(in crate::app) body: String,
    pub(in crate::app) expires_at: Instant,
}

pub struct UiState {
    pub(in crate::app) toasts: Vec<Toast>,
    pub(in crate::app) next_toast_id: u64,
    /// Index of the photo message shown full-window, if any.
    pub(in crate::app) lightbox: Option<usize>,
}

impl UiState {
    pub(in crate::app) fn new() -> Self {
        UiState {
            toasts: Vec::new(),
            next_toast_id: 0,
            lightbox: None,
        }
    }

    pub(in crate::app) fn push_toast(&mut self, body: impl Into<String>, expires_at: Instant) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id = self.next_toast_id.wrapping_add(1);
        self.toasts.push(Toast {
            id,
            body: body.into(),
            expires_at,
        });
        id
    }

    pub(in crate::app) fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub(in crate::app) fn prune_expired_toasts(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }
}

#[cfg(test)]
mod tests {
    use super::UiState;
    use std::time::{Duration, Instant};

    #[test]
    fn toasts_expire_at_their_deadline() {
        let mut ui = UiState::new();
        let now = Instant::now();
        ui.push_toast("short", now + Duration::from_millis(100));
        ui.push_toast("long", now + Duration::from_secs(10));

        ui.prune_expired_toasts(now + Duration::from_secs(1));
        assert_eq!(ui.toasts.len(), 1);
        assert_eq!(ui.toasts[0].body, "long");
    }

    #[test]
    fn toast_ids_are_unique() {
        let mut ui = UiState::new();
        let now = Instant::now();
        let a = ui.push_toast("a", now);
        let b = ui.push_toast("b", now);
        assert_ne!(a, b);
    }
}
