use dioxus::prelude::*;

/// Notices beyond this count push the oldest one out.
const MAX_VISIBLE_NOTICES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Handle to the notification tray, provided as context by `App`.
#[derive(Clone, Copy, PartialEq)]
pub struct Notices {
    items: Signal<Vec<Notice>>,
    next_id: Signal<u64>,
}

impl Notices {
    #[must_use]
    pub fn new(items: Signal<Vec<Notice>>, next_id: Signal<u64>) -> Self {
        Self { items, next_id }
    }

    pub fn success(self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into());
    }

    pub fn error(self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into());
    }

    pub fn dismiss(self, id: u64) {
        let mut items = self.items;
        items.write().retain(|notice| notice.id != id);
    }

    #[must_use]
    pub fn items(&self) -> Vec<Notice> {
        self.items.read().clone()
    }

    fn push(self, kind: NoticeKind, message: String) {
        let mut next_id = self.next_id;
        let mut items = self.items;
        let id = *next_id.read();
        next_id.set(id + 1);

        let mut items = items.write();
        items.push(Notice { id, kind, message });
        let overflow = items.len().saturating_sub(MAX_VISIBLE_NOTICES);
        items.drain(..overflow);
    }
}

/// Install the notice tray handle in the current scope.
pub fn use_notices_provider() -> Notices {
    let items = use_signal(Vec::new);
    let next_id = use_signal(|| 0_u64);
    use_context_provider(|| Notices::new(items, next_id))
}

#[component]
pub fn NoticeTray() -> Element {
    let notices = use_context::<Notices>();
    let items = notices.items();

    rsx! {
        div { class: "notice-tray",
            for notice in items {
                div {
                    key: "{notice.id}",
                    class: notice.kind.class(),
                    onclick: move |_| notices.dismiss(notice.id),
                    "{notice.message}"
                }
            }
        }
    }
}
