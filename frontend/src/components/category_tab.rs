use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

use super::category_modal::CategoryModal;
use super::icons::{icon_grip, icon_pencil, icon_plus, icon_trash};
use super::{use_profile, ProfileContext};
use crate::categories::{
    BookChange, CategoryEditor, CategorySyncClient, DragReorderController, ReorderOutcome,
};
use crate::models::{Category, CategoryType};

#[function_component(CategoryTab)]
pub fn category_tab() -> Html {
    let ctx = use_profile();
    let editor = use_state(CategoryEditor::default);
    // (list, index) of the row being dragged.
    let dragging = use_state(|| None::<(CategoryType, usize)>);
    let deleting = use_state(|| None::<String>);
    let Some(ctx) = ctx else {
        return html! {};
    };

    let on_editor_update = {
        let editor = editor.clone();
        Callback::from(move |next: CategoryEditor| editor.set(next))
    };

    let column = |kind: CategoryType| {
        let on_add = {
            let editor = editor.clone();
            Callback::from(move |_| editor.set(CategoryEditor::open_add(kind)))
        };
        html! {
            <div class="bg-card rounded-lg p-6 border border-border">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-bold text-foreground">{ format!("{} Categories", kind.label()) }</h2>
                    <button class="flex items-center gap-2 px-3 py-2 rounded-lg bg-[#173E63] text-white text-sm font-semibold" onclick={on_add}>
                        { icon_plus() }<span>{"Add"}</span>
                    </button>
                </div>
                if ctx.book.list(kind).is_empty() {
                    <p class="text-sm text-muted-foreground">{"No custom categories yet."}</p>
                }
                <ul class="space-y-2">
                    { for ctx.book.list(kind).iter().enumerate().map(|(index, category)| {
                        category_row(&ctx, &editor, &dragging, &deleting, kind, index, category)
                    }) }
                </ul>
                <p class="text-xs text-muted-foreground mt-4">{"Drag a category to change the order it appears in."}</p>
            </div>
        }
    };

    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                { column(CategoryType::Income) }
                { column(CategoryType::Expense) }
            </div>
            <CategoryModal editor={(*editor).clone()} on_update={on_editor_update} />
        </>
    }
}

fn category_row(
    ctx: &ProfileContext,
    editor: &UseStateHandle<CategoryEditor>,
    dragging: &UseStateHandle<Option<(CategoryType, usize)>>,
    deleting: &UseStateHandle<Option<String>>,
    kind: CategoryType,
    index: usize,
    category: &Category,
) -> Html {
    let ondragstart = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            if let Some(transfer) = e.data_transfer() {
                let _ = transfer.set_data("text/plain", &index.to_string());
            }
            tracing::debug!(kind = kind.as_str(), index, "category drag start");
            dragging.set(Some((kind, index)));
        })
    };
    let ondragover = {
        let dragging = dragging.clone();
        Callback::from(move |e: DragEvent| {
            // Only rows of the same list accept the drop.
            if matches!(*dragging, Some((from_kind, _)) if from_kind == kind) {
                e.prevent_default();
            }
        })
    };
    let ondragend = {
        let dragging = dragging.clone();
        Callback::from(move |_: DragEvent| dragging.set(None))
    };
    let ondrop = {
        let dragging = dragging.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            let Some((from_kind, source)) = *dragging else {
                return;
            };
            dragging.set(None);
            if from_kind != kind {
                return;
            }

            let Some(order) = DragReorderController::plan(&ctx.book, kind, source, Some(index))
            else {
                return;
            };
            ctx.book.dispatch(BookChange::Reorder(kind, order.clone()));

            let ctx = ctx.clone();
            spawn_local(async move {
                let controller =
                    DragReorderController::new(CategorySyncClient::new(ctx.api.clone()));
                if let ReorderOutcome::NotPersisted { error, .. } =
                    controller.persist(kind, order).await
                {
                    ctx.notify_error(error.user_message("Could not save the new order."));
                }
            });
        })
    };

    let on_edit = {
        let editor = editor.clone();
        let category = category.clone();
        Callback::from(move |_| editor.set(CategoryEditor::open_edit(kind, category.clone())))
    };
    let on_delete = {
        let ctx = ctx.clone();
        let deleting = deleting.clone();
        let id = category.id.clone();
        let name = category.name.clone();
        Callback::from(move |_| {
            if deleting.is_some() {
                return;
            }
            deleting.set(Some(id.clone()));
            let ctx = ctx.clone();
            let deleting = deleting.clone();
            let id = id.clone();
            let name = name.clone();
            spawn_local(async move {
                let client = CategorySyncClient::new(ctx.api.clone());
                match client.delete(kind, &id).await {
                    Ok(synced) => {
                        // Applied to the current book, not the one at click time.
                        ctx.book.dispatch(synced.change);
                        ctx.notify_success(
                            synced
                                .message
                                .unwrap_or_else(|| format!("Deleted \"{}\"", name)),
                        );
                    }
                    Err(err) => {
                        ctx.notify_error(err.user_message("Could not delete the category."))
                    }
                }
                deleting.set(None);
            });
        })
    };

    let is_dragged = **dragging == Some((kind, index));
    let is_deleting = deleting.as_deref() == Some(category.id.as_str());
    let class_name = if is_dragged {
        "flex items-center gap-3 px-3 py-2 rounded-lg border border-dashed border-[#173E63] bg-[#eef4f9] opacity-60"
    } else {
        "flex items-center gap-3 px-3 py-2 rounded-lg border border-border bg-white hover:bg-slate-50"
    };

    html! {
        <li
            key={category.id.clone()}
            class={class_name}
            draggable="true"
            ondragstart={ondragstart}
            ondragover={ondragover}
            ondragend={ondragend}
            ondrop={ondrop}
        >
            <span class="cursor-grab text-slate-400">{ icon_grip() }</span>
            <span class="flex-1 text-sm font-medium text-foreground">{ category.name.clone() }</span>
            <button class="p-1 text-slate-500 hover:text-[#173E63]" aria-label="Edit" onclick={on_edit}>{ icon_pencil() }</button>
            <button class="p-1 text-slate-500 hover:text-red-600" aria-label="Delete" onclick={on_delete} disabled={is_deleting}>{ icon_trash() }</button>
        </li>
    }
}
