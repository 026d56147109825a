use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::category_tab::CategoryTab;
use super::danger_zone::DangerZone;
use super::icons::{icon_lock, icon_log_out, icon_settings, icon_tag, icon_user};
use super::notices::NoticeHost;
use super::security_tab::SecurityTab;
use super::{input_value, use_profile, ProfileContext};
use crate::api::{GlooTransport, ProfileApi};
use crate::categories::CategoryBook;
use crate::config::{clear_access_token, load_config, save_config, AppConfig};
use crate::models::DeletionTarget;
use crate::notify::Notices;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Personal,
    Categories,
    Security,
    Preferences,
}

struct NavItem {
    label: &'static str,
    tab: Tab,
    icon: fn() -> Html,
}

const DATA_TARGETS: [DeletionTarget; 6] = [
    DeletionTarget::Expenses,
    DeletionTarget::Income,
    DeletionTarget::Bills,
    DeletionTarget::Budgets,
    DeletionTarget::Categories,
    DeletionTarget::Transactions,
];

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo(|_| load_config(), ());
    let api = use_memo(
        |config| ProfileApi::new(Rc::new(GlooTransport::new((**config).clone()))),
        config.clone(),
    );
    let notices = {
        let limit = config.notice_limit;
        use_reducer(move || Notices::new(limit))
    };
    let profile = use_state(|| None);
    let book = use_reducer(CategoryBook::default);
    let active_tab = use_state(|| Tab::Personal);

    let ctx = ProfileContext {
        api: (*api).clone(),
        config: (*config).clone(),
        notices,
        profile,
        book,
    };

    {
        let ctx = ctx.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move { ctx.refresh().await });
                || ()
            },
            (),
        );
    }

    let on_select = {
        let active_tab = active_tab.clone();
        Callback::from(move |tab: Tab| active_tab.set(tab))
    };

    let content = match *active_tab {
        Tab::Personal => html! { <PersonalTab /> },
        Tab::Categories => html! { <CategoryTab /> },
        Tab::Security => html! { <SecurityTab /> },
        Tab::Preferences => html! { <PreferencesTab /> },
    };

    html! {
        <ContextProvider<ProfileContext> context={ctx}>
            <div class="flex h-screen bg-background">
                <div class="hidden md:flex">
                    <Sidebar active_tab={*active_tab} on_select={on_select} />
                </div>
                <main class="flex-1 overflow-y-auto p-6">
                    <h1 class="text-3xl font-bold text-foreground mb-6">{"Profile"}</h1>
                    { content }
                </main>
            </div>
            <NoticeHost />
        </ContextProvider<ProfileContext>>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_tab: Tab,
    on_select: Callback<Tab>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let ctx = use_profile();
    let nav_items = [
        NavItem {
            label: "Personal Info",
            tab: Tab::Personal,
            icon: icon_user,
        },
        NavItem {
            label: "Categories",
            tab: Tab::Categories,
            icon: icon_tag,
        },
        NavItem {
            label: "Security",
            tab: Tab::Security,
            icon: icon_lock,
        },
        NavItem {
            label: "Preferences",
            tab: Tab::Preferences,
            icon: icon_settings,
        },
    ];

    let on_logout = Callback::from(move |_| {
        let Some(ctx) = ctx.clone() else {
            return;
        };
        spawn_local(async move {
            if let Err(err) = ctx.api.logout().await {
                tracing::warn!(error = %err, "logout request failed");
            }
            clear_access_token();
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        });
    });

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let is_active = item.tab == props.active_tab;
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let tab = item.tab;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(tab))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>

                <div class="mt-auto pt-4">
                    <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                        { icon_log_out() }
                        <span>{"Log Out"}</span>
                    </button>
                </div>
            </div>
        </div>
    }
}

#[function_component(PersonalTab)]
fn personal_tab() -> Html {
    let ctx = use_profile();
    let Some(ctx) = ctx else {
        return html! {};
    };
    let Some(profile) = (*ctx.profile).clone() else {
        return html! {
            <div class="text-muted-foreground">{"Loading profile..."}</div>
        };
    };

    let row = |label: &'static str, value: String| {
        html! {
            <div class="flex items-center justify-between py-3 border-b border-border last:border-b-0">
                <span class="text-sm text-muted-foreground">{ label }</span>
                <span class="text-sm font-medium text-foreground">{ value }</span>
            </div>
        }
    };

    html! {
        <div class="bg-card rounded-lg p-6 border border-border max-w-xl">
            <h2 class="text-xl font-bold text-foreground mb-4">{"Personal Info"}</h2>
            { row("Name", profile.name) }
            { row("Email", profile.email) }
            { row("Password", if profile.has_password { "Set".to_string() } else { "Not set".to_string() }) }
            { row("Remembered devices", profile.devices.to_string()) }
        </div>
    }
}

#[function_component(PreferencesTab)]
fn preferences_tab() -> Html {
    let ctx = use_profile();
    let draft = use_state(load_config);
    let Some(ctx) = ctx else {
        return html! {};
    };

    let on_base_url = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            next.api_base_url = input_value(&e);
            draft.set(next);
        })
    };
    let on_save = {
        let draft = draft.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let trimmed = draft.api_base_url.trim();
            let next = AppConfig {
                api_base_url: if trimmed.is_empty() {
                    AppConfig::default().api_base_url
                } else {
                    trimmed.to_string()
                },
                ..(*draft).clone()
            };
            save_config(&next);
            tracing::info!(api_base_url = %next.api_base_url, "connection settings saved");
            ctx.notify_success("Saved. Reload the page to use the new server.");
            draft.set(next);
        })
    };

    html! {
        <div class="space-y-6">
            <div class="bg-card rounded-lg p-6 border border-border">
                <h2 class="text-xl font-bold text-foreground mb-6">{"Connection"}</h2>
                <form class="space-y-4" onsubmit={on_save}>
                    <div>
                        <label class="block text-sm font-medium text-foreground mb-2">{"API server"}</label>
                        <input
                            type="url"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                            value={draft.api_base_url.clone()}
                            oninput={on_base_url}
                        />
                        <p class="text-xs text-muted-foreground mt-2">{"Applied the next time the page loads."}</p>
                    </div>
                    <button type="submit" class="px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-semibold hover:opacity-90">
                        {"Save"}
                    </button>
                </form>
            </div>

            <DangerZone title="Delete Data" targets={DATA_TARGETS.to_vec()} />
            <DangerZone title="Delete Account" targets={vec![DeletionTarget::Account]} />
        </div>
    }
}
