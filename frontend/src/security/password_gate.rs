use crate::api::ProfileApi;
use crate::error::ProfileError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateMode {
    Change,
    Set,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateField {
    Current,
    New,
    Confirm,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub current: Option<String>,
    pub new_password: Option<String>,
    pub confirm: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.new_password.is_none() && self.confirm.is_none()
    }

    pub fn get(&self, field: GateField) -> Option<&str> {
        match field {
            GateField::Current => self.current.as_deref(),
            GateField::New => self.new_password.as_deref(),
            GateField::Confirm => self.confirm.as_deref(),
        }
    }

    fn slot(&mut self, field: GateField) -> &mut Option<String> {
        match field {
            GateField::Current => &mut self.current,
            GateField::New => &mut self.new_password,
            GateField::Confirm => &mut self.confirm,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordSubmission {
    pub current: Option<String>,
    pub new_password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateSuccess {
    pub message: String,
    pub new_password: String,
}

impl PasswordSubmission {
    pub async fn send(self, api: &ProfileApi) -> Result<GateSuccess, ProfileError> {
        let message = match &self.current {
            Some(current) => api.change_password(current, &self.new_password).await?,
            None => api.set_password(&self.new_password).await?,
        };
        let message = message.unwrap_or_else(|| match self.current {
            Some(_) => "Password changed successfully".to_string(),
            None => "Password set successfully".to_string(),
        });
        tracing::info!(changed = self.current.is_some(), "password updated");
        Ok(GateSuccess {
            message,
            new_password: self.new_password,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PasswordGate {
    mode: GateMode,
    current: String,
    new_password: String,
    confirm: String,
    show_current: bool,
    show_new: bool,
    show_confirm: bool,
    submitting: bool,
    errors: FieldErrors,
}

impl PasswordGate {
    pub fn new(mode: GateMode) -> Self {
        Self {
            mode,
            current: String::new(),
            new_password: String::new(),
            confirm: String::new(),
            show_current: false,
            show_new: false,
            show_confirm: false,
            submitting: false,
            errors: FieldErrors::default(),
        }
    }

    pub fn for_account(has_password: bool) -> Self {
        Self::new(if has_password {
            GateMode::Change
        } else {
            GateMode::Set
        })
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn shows_current(&self) -> bool {
        self.mode == GateMode::Change
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn value(&self, field: GateField) -> &str {
        match field {
            GateField::Current => &self.current,
            GateField::New => &self.new_password,
            GateField::Confirm => &self.confirm,
        }
    }

    pub fn set_value(&mut self, field: GateField, value: &str) {
        match field {
            GateField::Current => self.current = value.to_string(),
            GateField::New => self.new_password = value.to_string(),
            GateField::Confirm => self.confirm = value.to_string(),
        }
        *self.errors.slot(field) = None;
    }

    pub fn is_visible(&self, field: GateField) -> bool {
        match field {
            GateField::Current => self.show_current,
            GateField::New => self.show_new,
            GateField::Confirm => self.show_confirm,
        }
    }

    pub fn toggle_visibility(&mut self, field: GateField) {
        match field {
            GateField::Current => self.show_current = !self.show_current,
            GateField::New => self.show_new = !self.show_new,
            GateField::Confirm => self.show_confirm = !self.show_confirm,
        }
    }

    pub fn validate(&self) -> Result<PasswordSubmission, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.shows_current() && self.current.is_empty() {
            errors.current = Some("Current password is required".to_string());
        }
        if self.new_password.is_empty() {
            errors.new_password = Some("New password is required".to_string());
        } else if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            errors.new_password = Some(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        if self.confirm != self.new_password {
            errors.confirm = Some("Passwords do not match".to_string());
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PasswordSubmission {
            current: self.shows_current().then(|| self.current.clone()),
            new_password: self.new_password.clone(),
        })
    }

    /// Validate and mark the dialog busy. `None` means nothing may be sent.
    pub fn begin_submit(&mut self) -> Option<PasswordSubmission> {
        if self.submitting {
            return None;
        }
        match self.validate() {
            Ok(submission) => {
                self.errors = FieldErrors::default();
                self.submitting = true;
                Some(submission)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Attach a server failure to the field it most likely concerns and
    /// return the text for the general notification.
    pub fn fail(&mut self, error: &ProfileError) -> String {
        self.submitting = false;
        let message = error.user_message("Could not update your password");
        let field = match error {
            ProfileError::InvalidCredential(_) if self.shows_current() => GateField::Current,
            _ => GateField::New,
        };
        *self.errors.slot(field) = Some(message.clone());
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::ScriptedTransport;
    use serde_json::json;

    fn filled(mode: GateMode, current: &str, new_password: &str, confirm: &str) -> PasswordGate {
        let mut gate = PasswordGate::new(mode);
        gate.set_value(GateField::Current, current);
        gate.set_value(GateField::New, new_password);
        gate.set_value(GateField::Confirm, confirm);
        gate
    }

    #[test]
    fn change_mode_requires_current_password() {
        let errors = filled(GateMode::Change, "", "secret1", "secret1")
            .validate()
            .unwrap_err();
        assert!(errors.current.is_some());
        assert!(errors.new_password.is_none());
    }

    #[test]
    fn set_mode_never_asks_for_current() {
        let gate = filled(GateMode::Set, "", "secret1", "secret1");
        assert!(!gate.shows_current());
        assert_eq!(
            gate.validate(),
            Ok(PasswordSubmission {
                current: None,
                new_password: "secret1".to_string(),
            })
        );
    }

    #[test]
    fn short_or_mismatched_new_password_is_rejected() {
        let errors = filled(GateMode::Set, "", "abc", "abc").validate().unwrap_err();
        assert_eq!(
            errors.new_password.as_deref(),
            Some("Password must be at least 6 characters")
        );

        let errors = filled(GateMode::Set, "", "abcdef", "abcdeg")
            .validate()
            .unwrap_err();
        assert_eq!(errors.confirm.as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn typing_clears_that_fields_error() {
        let mut gate = PasswordGate::new(GateMode::Change);
        assert!(gate.begin_submit().is_none());
        assert!(gate.errors().current.is_some());
        gate.set_value(GateField::Current, "old-pass");
        assert!(gate.errors().current.is_none());
        assert!(gate.errors().new_password.is_some());
    }

    #[test]
    fn wrong_current_password_lands_on_current_field() {
        let mut gate = filled(GateMode::Change, "old-pass", "new-pass", "new-pass");
        assert!(gate.begin_submit().is_some());
        assert!(gate.is_submitting());

        let note = gate.fail(&ProfileError::InvalidCredential(Some(
            "Current password is incorrect".to_string(),
        )));

        assert_eq!(note, "Current password is incorrect");
        assert_eq!(
            gate.errors().get(GateField::Current),
            Some("Current password is incorrect")
        );
        assert!(!gate.is_submitting());
    }

    #[test]
    fn other_failures_land_on_new_password_field() {
        let mut gate = filled(GateMode::Set, "", "new-pass", "new-pass");
        gate.begin_submit();
        gate.fail(&ProfileError::Validation("Password too weak".to_string()));
        assert_eq!(gate.errors().get(GateField::New), Some("Password too weak"));
    }

    #[tokio::test]
    async fn change_posts_both_passwords() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true, "message": "Password changed" }));
        let api = ProfileApi::new(transport.clone());

        let mut gate = filled(GateMode::Change, "old-pass", "new-pass", "new-pass");
        let submission = gate.begin_submit().expect("valid");
        let success = submission.send(&api).await.expect("changed");

        assert_eq!(success.message, "Password changed");
        assert_eq!(success.new_password, "new-pass");
        let sent = transport.requests();
        assert_eq!(sent[0].path, "/api/auth/change-password");
        assert_eq!(
            sent[0].body,
            Some(json!({ "currentPassword": "old-pass", "newPassword": "new-pass" }))
        );
    }

    #[tokio::test]
    async fn set_posts_only_new_password() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true }));
        let api = ProfileApi::new(transport.clone());

        let submission = filled(GateMode::Set, "ignored", "new-pass", "new-pass")
            .begin_submit()
            .expect("valid");
        let success = submission.send(&api).await.expect("set");

        assert_eq!(success.message, "Password set successfully");
        let sent = transport.requests();
        assert_eq!(sent[0].path, "/api/auth/set-password");
        assert_eq!(sent[0].body, Some(json!({ "newPassword": "new-pass" })));
    }
}
