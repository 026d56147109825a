use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{input_value, use_profile};
use crate::categories::{CategoryEditor, CategorySyncClient, EditorPhase};

#[derive(Properties, PartialEq)]
pub struct CategoryModalProps {
    pub editor: CategoryEditor,
    pub on_update: Callback<CategoryEditor>,
}

#[function_component(CategoryModal)]
pub fn category_modal(props: &CategoryModalProps) -> Html {
    let ctx = use_profile();
    let Some(ctx) = ctx else {
        return html! {};
    };
    let editor = &props.editor;
    if !editor.is_open() {
        return html! {};
    }
    let submitting = editor.phase() == EditorPhase::Submitting;

    let on_submit = {
        let editor = editor.clone();
        let on_update = props.on_update.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = editor.clone();
            let submission = next.begin_submit(&ctx.book);
            on_update.emit(next.clone());
            let Ok(submission) = submission else {
                return;
            };

            let on_update = on_update.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                let client = CategorySyncClient::new(ctx.api.clone());
                let result = submission.run(&client).await;
                next.finish(&result);
                match result {
                    Ok(synced) => {
                        ctx.book.dispatch(synced.change);
                        ctx.notify_success(synced.message.unwrap_or_default());
                    }
                    Err(err) => ctx.notify_error(err.user_message("Could not save the category.")),
                }
                on_update.emit(next);
            });
        })
    };

    let on_cancel = {
        let editor = editor.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |_| {
            let mut next = editor.clone();
            next.cancel();
            on_update.emit(next);
        })
    };

    let on_custom = {
        let editor = editor.clone();
        let on_update = props.on_update.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = editor.clone();
            next.set_custom_text(&input_value(&e));
            on_update.emit(next);
        })
    };

    let kind = editor.kind();
    let title = match editor.editing() {
        Some(category) => format!("Edit \"{}\"", category.name),
        None => format!("Add {} Category", kind.label()),
    };
    let suggestions = if editor.editing().is_none() {
        editor.available_suggestions(&ctx.book)
    } else {
        Vec::new()
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/40">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <h2 class="text-xl font-bold text-foreground">{ title }</h2>
                <form class="space-y-4 mt-6" onsubmit={on_submit}>
                    if !suggestions.is_empty() {
                        <div>
                            <p class="text-sm font-medium text-foreground mb-2">{"Suggestions"}</p>
                            <div class="flex flex-wrap gap-2">
                                { for suggestions.iter().map(|name| {
                                    let selected = editor.selected_suggestion() == Some(*name);
                                    let class_name = if selected {
                                        "px-3 py-1 rounded-full text-xs font-semibold bg-[#173E63] text-white"
                                    } else {
                                        "px-3 py-1 rounded-full text-xs font-semibold bg-[#eef4f9] text-[#173E63] hover:bg-[#B2CBDE]"
                                    };
                                    let onclick = {
                                        let editor = editor.clone();
                                        let on_update = props.on_update.clone();
                                        let name = *name;
                                        Callback::from(move |_| {
                                            let mut next = editor.clone();
                                            next.select_suggestion(name);
                                            on_update.emit(next);
                                        })
                                    };
                                    html! {
                                        <button type="button" class={class_name} onclick={onclick}>{ *name }</button>
                                    }
                                }) }
                            </div>
                        </div>
                    }
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">
                            { if suggestions.is_empty() { "Name" } else { "Or type a custom name" } }
                        </label>
                        <input
                            type="text"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                            value={editor.custom_text().to_string()}
                            oninput={on_custom}
                        />
                    </div>
                    if let Some(msg) = editor.error() {
                        <div class="text-sm text-red-500">{ msg.to_string() }</div>
                    }
                    <div class="flex gap-3 pt-2">
                        <button type="button" class="flex-1 py-2 rounded-lg border border-border font-semibold" onclick={on_cancel} disabled={submitting}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="flex-1 bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity" disabled={submitting}>
                            { if submitting { "Saving..." } else { "Save" } }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
