use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::use_profile;
use crate::notify::{Notice, NoticeAction, NoticeKind};

#[function_component(NoticeHost)]
pub fn notice_host() -> Html {
    let ctx = use_profile();
    let Some(ctx) = ctx else {
        return html! {};
    };

    let on_dismiss = {
        let notices = ctx.notices.clone();
        Callback::from(move |id: u64| notices.dispatch(NoticeAction::Dismiss(id)))
    };

    html! {
        <div class="fixed top-4 right-4 z-[60] flex flex-col gap-2 w-80">
            { for ctx.notices.items().iter().map(|notice| html! {
                <NoticeItem
                    key={notice.id}
                    notice={notice.clone()}
                    auto_dismiss_ms={ctx.config.success_banner_ms}
                    on_dismiss={on_dismiss.clone()}
                />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NoticeItemProps {
    notice: Notice,
    auto_dismiss_ms: u32,
    on_dismiss: Callback<u64>,
}

/// Success notices close themselves; errors stay until dismissed.
#[function_component(NoticeItem)]
fn notice_item(props: &NoticeItemProps) -> Html {
    {
        let id = props.notice.id;
        let kind = props.notice.kind;
        let delay = props.auto_dismiss_ms;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |_| {
                let timer = (kind == NoticeKind::Success)
                    .then(|| Timeout::new(delay, move || on_dismiss.emit(id)));
                move || drop(timer)
            },
            id,
        );
    }

    let class_name = match props.notice.kind {
        NoticeKind::Success => "flex items-start gap-3 px-4 py-3 rounded-xl shadow-lg border bg-green-50 border-green-200 text-green-800 text-sm",
        NoticeKind::Error => "flex items-start gap-3 px-4 py-3 rounded-xl shadow-lg border bg-red-50 border-red-200 text-red-800 text-sm",
    };
    let onclick = {
        let id = props.notice.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={class_name} role="status">
            <p class="flex-1">{ props.notice.message.clone() }</p>
            <button class="text-xs font-bold opacity-60 hover:opacity-100" aria-label="Dismiss" onclick={onclick}>{"✕"}</button>
        </div>
    }
}
