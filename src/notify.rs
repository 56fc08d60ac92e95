//! Transient status messages shown in the corner of the page.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::{TOAST_FADE_MS, TOAST_LIFETIME_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Danger,
}

impl NoticeLevel {
    fn css(self) -> &'static str {
        match self {
            NoticeLevel::Success => "text-bg-success",
            NoticeLevel::Info => "text-bg-info",
            NoticeLevel::Danger => "text-bg-danger",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Danger,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub notice: Notice,
    /// Set once the fade-out has started.
    pub hiding: bool,
}

/// Toasts currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    next_id: u32,
    pub items: Vec<Toast>,
}

pub enum ToastAction {
    Push(Notice),
    Hide(u32),
    Remove(u32),
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(notice) => {
                next.items.push(Toast {
                    id: next.next_id,
                    notice,
                    hiding: false,
                });
                next.next_id = next.next_id.wrapping_add(1);
            }
            ToastAction::Hide(id) => match next.items.iter_mut().find(|t| t.id == id) {
                Some(toast) if !toast.hiding => toast.hiding = true,
                _ => return self,
            },
            ToastAction::Remove(id) => {
                if !next.items.iter().any(|t| t.id == id) {
                    return self;
                }
                next.items.retain(|t| t.id != id);
            }
        }
        next.into()
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastContainerProps {
    pub items: Vec<Toast>,
    pub on_hide: Callback<u32>,
    pub on_remove: Callback<u32>,
}

#[function_component(ToastContainer)]
pub fn toast_container(props: &ToastContainerProps) -> Html {
    html! {
        <div id="toastContainer" class="toast-container position-fixed top-0 end-0 p-3">
            { for props.items.iter().map(|toast| html! {
                <ToastView
                    key={toast.id}
                    toast={toast.clone()}
                    on_hide={props.on_hide.clone()}
                    on_remove={props.on_remove.clone()}
                />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastViewProps {
    toast: Toast,
    on_hide: Callback<u32>,
    on_remove: Callback<u32>,
}

/// Starts the fade-out and drops the toast once the transition is over.
fn dismiss(id: u32, on_hide: Callback<u32>, on_remove: Callback<u32>) {
    on_hide.emit(id);
    spawn_local(async move {
        TimeoutFuture::new(TOAST_FADE_MS).await;
        on_remove.emit(id);
    });
}

/// Bootstrap hides a `.toast` without `.show` instantly, so a fading toast
/// keeps `show` and gets `showing`, which drops its opacity through the
/// `.fade` transition.
fn toast_classes(toast: &Toast) -> Classes {
    classes!(
        "toast",
        "align-items-center",
        toast.notice.level.css(),
        "border-0",
        "fade",
        "show",
        toast.hiding.then_some("showing"),
    )
}

#[function_component(ToastView)]
fn toast_view(props: &ToastViewProps) -> Html {
    let id = props.toast.id;

    {
        let on_hide = props.on_hide.clone();
        let on_remove = props.on_remove.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    TimeoutFuture::new(TOAST_LIFETIME_MS).await;
                    dismiss(id, on_hide, on_remove);
                });
                || ()
            },
            (),
        );
    }

    let on_close = {
        let on_hide = props.on_hide.clone();
        let on_remove = props.on_remove.clone();
        Callback::from(move |_| dismiss(id, on_hide.clone(), on_remove.clone()))
    };

    let class = toast_classes(&props.toast);

    html! {
        <div class={class} role="alert" aria-live="assertive" aria-atomic="true">
            <div class="d-flex">
                <div class="toast-body">{ props.toast.notice.message.clone() }</div>
                <button type="button" class="btn-close btn-close-white me-2 m-auto" aria-label="Fechar" onclick={on_close}></button>
            </div>
        </div>
    }
}
