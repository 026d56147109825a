mod app;
mod category_modal;
mod category_tab;
mod danger_zone;
mod icons;
mod notices;
mod password_modal;
mod security_tab;

pub use app::App;
pub use category_tab::CategoryTab;
pub use danger_zone::DangerZone;
pub use password_modal::PasswordGateModal;

use yew::prelude::*;

use crate::api::ProfileApi;
use crate::categories::{BookChange, CategoryBook};
use crate::config::AppConfig;
use crate::models::UserProfile;
use crate::notify::{NoticeAction, NoticeKind, Notices};

#[derive(Clone, PartialEq)]
pub struct ProfileContext {
    pub api: ProfileApi,
    pub config: AppConfig,
    pub notices: UseReducerHandle<Notices>,
    pub profile: UseStateHandle<Option<UserProfile>>,
    pub book: UseReducerHandle<CategoryBook>,
}

impl ProfileContext {
    pub fn notify_success(&self, message: impl Into<String>) {
        self.notices
            .dispatch(NoticeAction::Push(NoticeKind::Success, message.into()));
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notices
            .dispatch(NoticeAction::Push(NoticeKind::Error, message.into()));
    }

    pub fn has_password(&self) -> bool {
        self.profile
            .as_ref()
            .map(|p| p.has_password)
            .unwrap_or(false)
    }

    /// Re-read the user record and rebuild the local category copy from it.
    pub async fn refresh(&self) {
        match self.api.fetch_profile().await {
            Ok(profile) => {
                self.book
                    .dispatch(BookChange::Reset(CategoryBook::from_profile(&profile)));
                self.profile.set(Some(profile));
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile refresh failed");
                self.notify_error(err.user_message("Could not refresh your profile."));
            }
        }
    }
}

/// `None` outside of `<App>`; callers render nothing in that case.
#[hook]
pub fn use_profile() -> Option<ProfileContext> {
    use_context::<ProfileContext>()
}

pub(crate) fn input_value(e: &InputEvent) -> String {
    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
    input.value()
}
