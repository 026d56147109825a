use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::icons::icon_alert;
use super::password_modal::PasswordGateModal;
use super::{input_value, use_profile, ProfileContext};
use crate::categories::{BookChange, CategoryBook};
use crate::config::{clear_access_token, AppConfig};
use crate::models::DeletionTarget;
use crate::security::{
    execute, DestructiveActionWorkflow, PendingDeletionRequest, WorkflowAction, WorkflowState,
};

#[derive(Properties, PartialEq)]
pub struct DangerZoneProps {
    pub title: AttrValue,
    pub targets: Vec<DeletionTarget>,
}

#[function_component(DangerZone)]
pub fn danger_zone(props: &DangerZoneProps) -> Html {
    let ctx = use_profile();
    let workflow = use_reducer(DestructiveActionWorkflow::default);

    {
        let workflow = workflow.clone();
        let delay = ctx
            .as_ref()
            .map(|ctx| ctx.config.success_banner_ms)
            .unwrap_or_else(|| AppConfig::default().success_banner_ms);
        let done = matches!(workflow.state(), WorkflowState::Done { .. });
        use_effect_with_deps(
            move |done| {
                let timer = done.then(|| {
                    Timeout::new(delay, move || workflow.dispatch(WorkflowAction::DismissDone))
                });
                move || drop(timer)
            },
            done,
        );
    }

    let Some(ctx) = ctx else {
        return html! {};
    };

    let send = {
        let workflow = workflow.clone();
        Callback::from(move |action: WorkflowAction| workflow.dispatch(action))
    };

    let run = {
        let workflow = workflow.clone();
        let ctx = ctx.clone();
        Callback::from(move |request: PendingDeletionRequest| {
            run_deletion(ctx.clone(), workflow.clone(), request)
        })
    };

    let buttons = props.targets.iter().map(|target| {
        let target = *target;
        let onclick = send.reform(move |_: MouseEvent| WorkflowAction::Select(target));
        let class_name = if target == DeletionTarget::Account {
            "w-full text-left px-4 py-3 rounded-lg border border-red-300 bg-red-50 text-red-700 text-sm font-semibold hover:bg-red-100"
        } else {
            "w-full text-left px-4 py-3 rounded-lg border border-border text-sm font-medium text-foreground hover:bg-red-50 hover:text-red-700"
        };
        html! {
            <button class={class_name} onclick={onclick} disabled={workflow.is_executing()}>
                { target.button_label() }
            </button>
        }
    });

    html! {
        <div class="bg-card rounded-lg p-6 border border-border">
            <h2 class="text-xl font-bold text-foreground mb-2">{ props.title.clone() }</h2>
            <p class="text-sm text-muted-foreground mb-6">{"These actions are permanent and cannot be undone."}</p>
            { result_banner(&workflow, &send) }
            <div class="space-y-3">
                { for buttons }
            </div>
            { modal_for(&ctx, &workflow, &send, &run) }
        </div>
    }
}

fn run_deletion(
    ctx: ProfileContext,
    workflow: UseReducerHandle<DestructiveActionWorkflow>,
    request: PendingDeletionRequest,
) {
    spawn_local(async move {
        let report = execute(&ctx.api, request, ctx.config.logout_delay_ms).await;
        match report.profile {
            Ok(profile) => {
                ctx.book
                    .dispatch(BookChange::Reset(CategoryBook::from_profile(&profile)));
                ctx.profile.set(Some(profile));
            }
            Err(err) => tracing::warn!(error = %err, "profile refresh after deletion failed"),
        }
        workflow.dispatch(WorkflowAction::Finish(report.outcome));

        if let Some(delay) = report.logout_after_ms {
            TimeoutFuture::new(delay).await;
            if let Err(err) = ctx.api.logout().await {
                tracing::warn!(error = %err, "logout after account deletion failed");
            }
            clear_access_token();
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        }
    });
}

fn result_banner(
    workflow: &UseReducerHandle<DestructiveActionWorkflow>,
    send: &Callback<WorkflowAction>,
) -> Html {
    match workflow.state() {
        WorkflowState::Done { message, .. } => html! {
            <div class="flex items-start gap-3 mb-4 px-4 py-3 rounded-lg bg-green-50 border border-green-200 text-green-800 text-sm" role="status">
                <p class="flex-1">{ message.clone() }</p>
                <button class="text-xs font-bold" aria-label="Dismiss" onclick={send.reform(|_: MouseEvent| WorkflowAction::Dismiss)}>{"✕"}</button>
            </div>
        },
        _ => html! {},
    }
}

fn modal_shell(title: &str, body: Html) -> Html {
    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="flex items-center gap-3 text-red-600 mb-4">
                    { icon_alert() }
                    <h2 class="text-xl font-bold">{ title.to_string() }</h2>
                </div>
                { body }
            </div>
        </div>
    }
}

fn modal_for(
    ctx: &ProfileContext,
    workflow: &UseReducerHandle<DestructiveActionWorkflow>,
    send: &Callback<WorkflowAction>,
    run: &Callback<PendingDeletionRequest>,
) -> Html {
    let on_cancel = send.reform(|_: MouseEvent| WorkflowAction::Cancel);

    match workflow.state() {
        WorkflowState::Idle | WorkflowState::Done { .. } => html! {},

        WorkflowState::FirstConfirm { target } => {
            let has_password = ctx.has_password();
            let on_proceed =
                send.reform(move |_: MouseEvent| WorkflowAction::Proceed { has_password });
            modal_shell(
                target.button_label(),
                html! {
                    <>
                        <p class="text-sm text-foreground">{ workflow.warning() }</p>
                        <div class="flex gap-3 pt-6">
                            <button class="flex-1 py-2 rounded-lg border border-border font-semibold" onclick={on_cancel}>{"Cancel"}</button>
                            <button class="flex-1 py-2 rounded-lg bg-red-600 text-white font-semibold" onclick={on_proceed}>{"Proceed"}</button>
                        </div>
                    </>
                },
            )
        }

        WorkflowState::SecondConfirm {
            target,
            password,
            confirm_text,
        } => {
            let on_password =
                send.reform(|e: InputEvent| WorkflowAction::SetPassword(input_value(&e)));
            let on_confirm_text =
                send.reform(|e: InputEvent| WorkflowAction::SetConfirmText(input_value(&e)));
            let on_execute = {
                // The reducer repeats this check against the latest state.
                let snapshot = (**workflow).clone();
                let send = send.clone();
                let run = run.clone();
                Callback::from(move |e: SubmitEvent| {
                    e.prevent_default();
                    let mut next = snapshot.clone();
                    match next.begin_execute() {
                        Ok(request) => {
                            send.emit(WorkflowAction::BeginExecute);
                            run.emit(request);
                        }
                        Err(err) => tracing::debug!(error = %err, "deletion not yet confirmed"),
                    }
                })
            };
            let phrase = target.confirmation_phrase();
            modal_shell(
                "Confirm Deletion",
                html! {
                    <form class="space-y-4" onsubmit={on_execute}>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Password"}</label>
                            <input
                                type="password"
                                autocomplete="current-password"
                                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                value={password.clone()}
                                oninput={on_password}
                            />
                        </div>
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">
                                {"Type "}<span class="font-mono font-bold">{ phrase }</span>{" to confirm"}
                            </label>
                            <input
                                type="text"
                                placeholder={phrase}
                                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                value={confirm_text.clone()}
                                oninput={on_confirm_text}
                            />
                        </div>
                        <div class="flex gap-3 pt-2">
                            <button type="button" class="flex-1 py-2 rounded-lg border border-border font-semibold" onclick={on_cancel}>{"Cancel"}</button>
                            <button type="submit" class="flex-1 py-2 rounded-lg bg-red-600 text-white font-semibold disabled:opacity-50" disabled={!workflow.can_execute()}>
                                {"Confirm Deletion"}
                            </button>
                        </div>
                    </form>
                },
            )
        }

        WorkflowState::CreatePassword { target, gate } => {
            let on_update = send.reform(WorkflowAction::UpdateGate);
            // The new password goes straight into the deletion request.
            let on_success = {
                let snapshot = (**workflow).clone();
                let send = send.clone();
                let run = run.clone();
                Callback::from(move |new_password: String| {
                    let mut next = snapshot.clone();
                    match next.password_created(&new_password) {
                        Ok(request) => {
                            send.emit(WorkflowAction::PasswordCreated(new_password));
                            run.emit(request);
                        }
                        Err(err) => tracing::warn!(error = %err, "password created outside the deletion flow"),
                    }
                })
            };
            html! {
                <PasswordGateModal
                    gate={gate.clone()}
                    on_update={on_update}
                    on_success={on_success}
                    on_cancel={send.reform(|_: ()| WorkflowAction::Cancel)}
                    title={AttrValue::from("Create a password first")}
                    description={AttrValue::from(format!(
                        "Your account has no password yet. Create one to confirm: {}",
                        target.button_label()
                    ))}
                />
            }
        }

        WorkflowState::Executing { target } => modal_shell(
            target.button_label(),
            html! {
                <div class="flex gap-3 pt-2">
                    <button class="flex-1 py-2 rounded-lg bg-red-600 text-white font-semibold opacity-60" disabled={true}>
                        {"Deleting..."}
                    </button>
                </div>
            },
        ),

        WorkflowState::Failed { message, .. } => modal_shell(
            "Deletion failed",
            html! {
                <>
                    <p class="text-sm text-red-700">{ message.clone() }</p>
                    <div class="flex gap-3 pt-6">
                        <button class="flex-1 py-2 rounded-lg border border-border font-semibold" onclick={send.reform(|_: MouseEvent| WorkflowAction::Dismiss)}>{"OK"}</button>
                    </div>
                </>
            },
        ),
    }
}
