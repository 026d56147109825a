use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::danger_zone::DangerZone;
use super::icons::icon_lock;
use super::password_modal::PasswordGateModal;
use super::use_profile;
use crate::models::DeletionTarget;
use crate::security::PasswordGate;

#[function_component(SecurityTab)]
pub fn security_tab() -> Html {
    let ctx = use_profile();
    let gate = use_state(|| None::<PasswordGate>);
    let Some(ctx) = ctx else {
        return html! {};
    };
    let has_password = ctx.has_password();

    let on_open = {
        let gate = gate.clone();
        Callback::from(move |_| gate.set(Some(PasswordGate::for_account(has_password))))
    };
    let on_update = {
        let gate = gate.clone();
        Callback::from(move |next: PasswordGate| gate.set(Some(next)))
    };
    let on_cancel = {
        let gate = gate.clone();
        Callback::from(move |_| gate.set(None))
    };
    let on_success = {
        let gate = gate.clone();
        let ctx = ctx.clone();
        Callback::from(move |_: String| {
            gate.set(None);
            let ctx = ctx.clone();
            spawn_local(async move { ctx.refresh().await });
        })
    };

    let (heading, blurb, action) = if has_password {
        (
            "Password",
            "Change the password you use to sign in.",
            "Change Password",
        )
    } else {
        (
            "Create a password",
            "You signed up with a linked account. Add a password to sign in directly and to confirm sensitive actions.",
            "Set Password",
        )
    };

    html! {
        <div class="space-y-6">
            <div class="bg-card rounded-lg p-6 border border-border">
                <div class="flex items-center gap-3 mb-2 text-[#173E63]">
                    { icon_lock() }
                    <h2 class="text-xl font-bold text-foreground">{ heading }</h2>
                </div>
                <p class="text-sm text-muted-foreground mb-4">{ blurb }</p>
                <button class="px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-semibold hover:opacity-90" onclick={on_open}>
                    { action }
                </button>
            </div>

            <DangerZone title="Sessions" targets={vec![DeletionTarget::Devices]} />

            if let Some(current) = (*gate).clone() {
                <PasswordGateModal
                    gate={current}
                    on_update={on_update}
                    on_success={on_success}
                    on_cancel={on_cancel}
                />
            }
        </div>
    }
}
