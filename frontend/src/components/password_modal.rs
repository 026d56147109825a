use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::icons::{icon_eye, icon_eye_off};
use super::{input_value, use_profile};
use crate::security::{GateField, GateMode, PasswordGate};

#[derive(Properties, PartialEq)]
pub struct PasswordGateModalProps {
    pub gate: PasswordGate,
    pub on_update: Callback<PasswordGate>,
    /// Receives the password that was just saved.
    pub on_success: Callback<String>,
    pub on_cancel: Callback<()>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub description: Option<AttrValue>,
}

/// Credential dialog for both "change password" and "set password".
#[function_component(PasswordGateModal)]
pub fn password_gate_modal(props: &PasswordGateModalProps) -> Html {
    let ctx = use_profile();
    let Some(ctx) = ctx else {
        return html! {};
    };
    let gate = &props.gate;

    let on_submit = {
        let gate = gate.clone();
        let on_update = props.on_update.clone();
        let on_success = props.on_success.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = gate.clone();
            let submission = next.begin_submit();
            on_update.emit(next.clone());
            let Some(submission) = submission else {
                return;
            };

            let on_update = on_update.clone();
            let on_success = on_success.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                match submission.send(&ctx.api).await {
                    Ok(done) => {
                        ctx.notify_success(done.message);
                        on_success.emit(done.new_password);
                    }
                    Err(err) => {
                        let message = next.fail(&err);
                        ctx.notify_error(message);
                        on_update.emit(next);
                    }
                }
            });
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    let (default_title, submit_label) = match gate.mode() {
        GateMode::Change => ("Change Password", "Update Password"),
        GateMode::Set => ("Create Password", "Create Password"),
    };
    let title = props
        .title
        .clone()
        .unwrap_or_else(|| AttrValue::from(default_title));

    let field = |field: GateField, label: &'static str, autocomplete: &'static str| {
        let visible = gate.is_visible(field);
        let oninput = {
            let gate = gate.clone();
            let on_update = props.on_update.clone();
            Callback::from(move |e: InputEvent| {
                let mut next = gate.clone();
                next.set_value(field, &input_value(&e));
                on_update.emit(next);
            })
        };
        let on_toggle = {
            let gate = gate.clone();
            let on_update = props.on_update.clone();
            Callback::from(move |_| {
                let mut next = gate.clone();
                next.toggle_visibility(field);
                on_update.emit(next);
            })
        };
        let error = gate.errors().get(field).map(str::to_string);
        html! {
            <div class="space-y-1">
                <label class="text-sm font-medium text-foreground">{ label }</label>
                <div class="relative">
                    <input
                        type={if visible { "text" } else { "password" }}
                        autocomplete={autocomplete}
                        class="w-full px-4 py-2 pr-10 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                        value={gate.value(field).to_string()}
                        oninput={oninput}
                    />
                    <button type="button" class="absolute right-3 top-1/2 -translate-y-1/2 text-muted-foreground" aria-label="Toggle visibility" onclick={on_toggle}>
                        { if visible { icon_eye_off() } else { icon_eye() } }
                    </button>
                </div>
                if let Some(msg) = error {
                    <div class="text-xs text-red-500">{ msg }</div>
                }
            </div>
        }
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <h2 class="text-xl font-bold text-foreground">{ title }</h2>
                if let Some(description) = props.description.clone() {
                    <p class="text-sm text-muted-foreground mt-2">{ description }</p>
                }

                <form class="space-y-4 mt-6" onsubmit={on_submit}>
                    if gate.shows_current() {
                        { field(GateField::Current, "Current Password", "current-password") }
                    }
                    { field(GateField::New, "New Password", "new-password") }
                    { field(GateField::Confirm, "Confirm New Password", "new-password") }

                    <div class="flex gap-3 pt-2">
                        <button type="button" class="flex-1 py-2 rounded-lg border border-border font-semibold" onclick={on_cancel} disabled={gate.is_submitting()}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="flex-1 bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity" disabled={gate.is_submitting()}>
                            { if gate.is_submitting() { "Please wait..." } else { submit_label } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
