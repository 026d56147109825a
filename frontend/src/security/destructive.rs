//! Two-stage confirmation for irreversible bulk deletions.
//!
//! ```text
//! Idle -> FirstConfirm -> SecondConfirm  --+
//!                      \-> CreatePassword -+-> Executing -> Done | Failed -> Idle
//! ```
//!
//! `CreatePassword` replaces `SecondConfirm` when the account has no password
//! yet; the freshly created password is handed straight to the execution step.

use std::rc::Rc;

use yew::Reducible;

use crate::api::ProfileApi;
use crate::error::ProfileError;
use crate::models::{DeletionTarget, UserProfile};

use super::password_gate::{GateMode, PasswordGate};

#[derive(Clone, PartialEq, Eq)]
pub struct PendingDeletionRequest {
    target: DeletionTarget,
    credential: String,
}

// Keep the credential out of logs and panic messages.
impl std::fmt::Debug for PendingDeletionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingDeletionRequest")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

pub fn phrase_matches(target: DeletionTarget, typed: &str) -> bool {
    typed
        .trim()
        .eq_ignore_ascii_case(target.confirmation_phrase())
}

impl PendingDeletionRequest {
    /// Only way to build a request: the phrase must match and the
    /// credential must be present.
    pub fn authorize(
        target: DeletionTarget,
        typed_phrase: &str,
        credential: &str,
    ) -> Result<Self, ProfileError> {
        if !phrase_matches(target, typed_phrase) {
            return Err(ProfileError::Validation(format!(
                "Type \"{}\" to confirm",
                target.confirmation_phrase()
            )));
        }
        if credential.is_empty() {
            return Err(ProfileError::Validation(
                "Enter your password to confirm".to_string(),
            ));
        }
        Ok(Self {
            target,
            credential: credential.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WorkflowState {
    Idle,
    FirstConfirm {
        target: DeletionTarget,
    },
    SecondConfirm {
        target: DeletionTarget,
        password: String,
        confirm_text: String,
    },
    CreatePassword {
        target: DeletionTarget,
        gate: PasswordGate,
    },
    Executing {
        target: DeletionTarget,
    },
    Done {
        target: DeletionTarget,
        message: String,
    },
    Failed {
        target: DeletionTarget,
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionReport {
    pub target: DeletionTarget,
    pub outcome: Result<String, ProfileError>,
    /// The refreshed user record; fetched whether or not the deletion worked.
    pub profile: Result<UserProfile, ProfileError>,
    /// Set after a successful account deletion: log out after this many ms.
    pub logout_after_ms: Option<u32>,
}

pub async fn execute(
    api: &ProfileApi,
    request: PendingDeletionRequest,
    logout_delay_ms: u32,
) -> ExecutionReport {
    let target = request.target;
    tracing::info!(data = target.as_str(), "executing bulk deletion");
    let outcome = api
        .delete_data(target, &request.credential)
        .await
        .map(|message| message.unwrap_or_else(|| target.success_message()));
    if let Err(err) = &outcome {
        tracing::error!(data = target.as_str(), error = %err, "bulk deletion failed");
    }

    let profile = api.fetch_profile().await;
    let logout_after_ms =
        (outcome.is_ok() && target == DeletionTarget::Account).then_some(logout_delay_ms);

    ExecutionReport {
        target,
        outcome,
        profile,
        logout_after_ms,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DestructiveActionWorkflow {
    state: WorkflowState,
}

impl Default for DestructiveActionWorkflow {
    fn default() -> Self {
        Self {
            state: WorkflowState::Idle,
        }
    }
}

impl DestructiveActionWorkflow {
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn target(&self) -> Option<DeletionTarget> {
        match &self.state {
            WorkflowState::Idle => None,
            WorkflowState::FirstConfirm { target }
            | WorkflowState::SecondConfirm { target, .. }
            | WorkflowState::CreatePassword { target, .. }
            | WorkflowState::Executing { target }
            | WorkflowState::Done { target, .. }
            | WorkflowState::Failed { target, .. } => Some(*target),
        }
    }

    pub fn is_executing(&self) -> bool {
        matches!(self.state, WorkflowState::Executing { .. })
    }

    pub fn warning(&self) -> &'static str {
        match self.target() {
            Some(target) => target.warning(),
            None => "This action cannot be undone.",
        }
    }

    /// Start over for `target`. Ignored while a deletion is in flight or a
    /// failure has not been acknowledged.
    pub fn select(&mut self, target: DeletionTarget) -> bool {
        match self.state {
            WorkflowState::Idle | WorkflowState::Done { .. } => {
                tracing::debug!(data = target.as_str(), "deletion selected");
                self.state = WorkflowState::FirstConfirm { target };
                true
            }
            _ => false,
        }
    }

    pub fn proceed(&mut self, has_password: bool) -> bool {
        let WorkflowState::FirstConfirm { target } = self.state else {
            return false;
        };
        self.state = if has_password {
            WorkflowState::SecondConfirm {
                target,
                password: String::new(),
                confirm_text: String::new(),
            }
        } else {
            tracing::debug!(data = target.as_str(), "no password on file, asking to create one");
            WorkflowState::CreatePassword {
                target,
                gate: PasswordGate::new(GateMode::Set),
            }
        };
        true
    }

    pub fn set_password(&mut self, value: &str) {
        if let WorkflowState::SecondConfirm { password, .. } = &mut self.state {
            *password = value.to_string();
        }
    }

    pub fn set_confirm_text(&mut self, value: &str) {
        if let WorkflowState::SecondConfirm { confirm_text, .. } = &mut self.state {
            *confirm_text = value.to_string();
        }
    }

    pub fn can_execute(&self) -> bool {
        match &self.state {
            WorkflowState::SecondConfirm {
                target,
                password,
                confirm_text,
            } => !password.is_empty() && phrase_matches(*target, confirm_text),
            _ => false,
        }
    }

    pub fn begin_execute(&mut self) -> Result<PendingDeletionRequest, ProfileError> {
        let WorkflowState::SecondConfirm {
            target,
            password,
            confirm_text,
        } = &self.state
        else {
            return Err(ProfileError::Validation(
                "Nothing is waiting for confirmation".to_string(),
            ));
        };
        let target = *target;
        let request = PendingDeletionRequest::authorize(target, confirm_text, password)?;
        self.state = WorkflowState::Executing { target };
        Ok(request)
    }

    pub fn gate(&self) -> Option<&PasswordGate> {
        match &self.state {
            WorkflowState::CreatePassword { gate, .. } => Some(gate),
            _ => None,
        }
    }

    pub fn gate_mut(&mut self) -> Option<&mut PasswordGate> {
        match &mut self.state {
            WorkflowState::CreatePassword { gate, .. } => Some(gate),
            _ => None,
        }
    }

    /// Creating the password stands in for typing the phrase, so the request
    /// is authorized with the target's own phrase.
    pub fn password_created(
        &mut self,
        new_password: &str,
    ) -> Result<PendingDeletionRequest, ProfileError> {
        let WorkflowState::CreatePassword { target, .. } = &self.state else {
            return Err(ProfileError::Validation(
                "No password was being created".to_string(),
            ));
        };
        let target = *target;
        let request =
            PendingDeletionRequest::authorize(target, target.confirmation_phrase(), new_password)?;
        self.state = WorkflowState::Executing { target };
        Ok(request)
    }

    pub fn finish(&mut self, outcome: &Result<String, ProfileError>) {
        let WorkflowState::Executing { target } = self.state else {
            return;
        };
        self.state = match outcome {
            Ok(message) => WorkflowState::Done {
                target,
                message: message.clone(),
            },
            Err(err) => WorkflowState::Failed {
                target,
                message: err.user_message(&format!(
                    "Failed to delete {}. Please try again.",
                    target.as_str()
                )),
            },
        };
    }

    pub fn dismiss(&mut self) {
        if matches!(
            self.state,
            WorkflowState::Done { .. } | WorkflowState::Failed { .. }
        ) {
            self.state = WorkflowState::Idle;
        }
    }

    pub fn cancel(&mut self) {
        if !self.is_executing() {
            self.state = WorkflowState::Idle;
        }
    }
}

/// Events the deletion UI sends. Each one goes through the matching
/// transition, so an event that does not fit the current state is dropped.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkflowAction {
    Select(DeletionTarget),
    Proceed { has_password: bool },
    SetPassword(String),
    SetConfirmText(String),
    UpdateGate(PasswordGate),
    BeginExecute,
    PasswordCreated(String),
    Finish(Result<String, ProfileError>),
    Dismiss,
    /// Timer-driven: only clears a success banner, never a failure alert.
    DismissDone,
    Cancel,
}

impl DestructiveActionWorkflow {
    pub fn apply(&mut self, action: WorkflowAction) {
        match action {
            WorkflowAction::Select(target) => {
                self.select(target);
            }
            WorkflowAction::Proceed { has_password } => {
                self.proceed(has_password);
            }
            WorkflowAction::SetPassword(value) => self.set_password(&value),
            WorkflowAction::SetConfirmText(value) => self.set_confirm_text(&value),
            WorkflowAction::UpdateGate(gate) => {
                if let Some(slot) = self.gate_mut() {
                    *slot = gate;
                }
            }
            WorkflowAction::BeginExecute => {
                if let Err(err) = self.begin_execute() {
                    tracing::debug!(error = %err, "execute ignored");
                }
            }
            WorkflowAction::PasswordCreated(new_password) => {
                if let Err(err) = self.password_created(&new_password) {
                    tracing::debug!(error = %err, "created password ignored");
                }
            }
            WorkflowAction::Finish(outcome) => self.finish(&outcome),
            WorkflowAction::Dismiss => self.dismiss(),
            WorkflowAction::DismissDone => {
                if matches!(self.state, WorkflowState::Done { .. }) {
                    self.dismiss();
                }
            }
            WorkflowAction::Cancel => self.cancel(),
        }
    }
}

impl Reducible for DestructiveActionWorkflow {
    type Action = WorkflowAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::ScriptedTransport;
    use crate::api::Method;
    use crate::security::password_gate::GateField;
    use serde_json::json;

    fn at_second_confirm(target: DeletionTarget) -> DestructiveActionWorkflow {
        let mut workflow = DestructiveActionWorkflow::default();
        assert!(workflow.select(target));
        assert!(workflow.proceed(true));
        workflow
    }

    fn profile_reply() -> serde_json::Value {
        json!({ "success": true, "user": { "name": "Ana", "hasPassword": true } })
    }

    #[test]
    fn reducer_drops_events_that_do_not_fit() {
        let workflow = Rc::new(DestructiveActionWorkflow::default());
        let workflow = workflow.reduce(WorkflowAction::BeginExecute);
        assert_eq!(workflow.state(), &WorkflowState::Idle);

        let workflow = workflow.reduce(WorkflowAction::Select(DeletionTarget::Bills));
        let workflow = workflow.reduce(WorkflowAction::SetPassword("pw".to_string()));
        let workflow = workflow.reduce(WorkflowAction::BeginExecute);
        assert_eq!(
            workflow.state(),
            &WorkflowState::FirstConfirm {
                target: DeletionTarget::Bills
            }
        );

        let workflow = workflow.reduce(WorkflowAction::Proceed { has_password: true });
        let workflow = workflow.reduce(WorkflowAction::SetPassword("pw".to_string()));
        let workflow = workflow.reduce(WorkflowAction::SetConfirmText("BILLS".to_string()));
        let workflow = workflow.reduce(WorkflowAction::BeginExecute);
        assert!(workflow.is_executing());

        let workflow = workflow.reduce(WorkflowAction::Cancel);
        let workflow = workflow.reduce(WorkflowAction::Select(DeletionTarget::Income));
        assert!(workflow.is_executing());
    }

    #[test]
    fn banner_timer_leaves_failures_alone() {
        let mut workflow = at_second_confirm(DeletionTarget::Budgets);
        workflow.apply(WorkflowAction::SetPassword("pw".to_string()));
        workflow.apply(WorkflowAction::SetConfirmText("budgets".to_string()));
        workflow.apply(WorkflowAction::BeginExecute);
        workflow.apply(WorkflowAction::Finish(Err(ProfileError::Network("down".to_string()))));

        workflow.apply(WorkflowAction::DismissDone);
        assert!(matches!(workflow.state(), WorkflowState::Failed { .. }));
        workflow.apply(WorkflowAction::Dismiss);
        assert_eq!(workflow.state(), &WorkflowState::Idle);
    }

    #[test]
    fn gate_updates_only_reach_the_create_password_step() {
        let mut workflow = at_second_confirm(DeletionTarget::Income);
        let mut gate = PasswordGate::new(GateMode::Set);
        gate.set_value(GateField::New, "secret1");
        workflow.apply(WorkflowAction::UpdateGate(gate.clone()));
        assert_eq!(workflow.gate(), None);

        let mut workflow = DestructiveActionWorkflow::default();
        workflow.apply(WorkflowAction::Select(DeletionTarget::Income));
        workflow.apply(WorkflowAction::Proceed { has_password: false });
        workflow.apply(WorkflowAction::UpdateGate(gate.clone()));
        assert_eq!(workflow.gate(), Some(&gate));

        workflow.apply(WorkflowAction::PasswordCreated("secret1".to_string()));
        assert!(workflow.is_executing());
    }

    #[test]
    fn cancel_from_first_confirm_returns_to_idle() {
        let mut workflow = DestructiveActionWorkflow::default();
        workflow.select(DeletionTarget::Budgets);
        assert_eq!(workflow.warning(), DeletionTarget::Budgets.warning());
        workflow.cancel();
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert!(!workflow.proceed(true));
    }

    #[test]
    fn phrase_and_password_gate_execution() {
        let mut workflow = at_second_confirm(DeletionTarget::Expenses);
        workflow.set_confirm_text("EXPENSES");
        assert!(!workflow.can_execute());

        workflow.set_password("hunter22");
        assert!(workflow.can_execute());

        workflow.set_confirm_text("expensez");
        assert!(!workflow.can_execute());
        assert!(matches!(
            workflow.begin_execute(),
            Err(ProfileError::Validation(_))
        ));
    }

    #[test]
    fn account_needs_delete_not_its_name() {
        let mut workflow = at_second_confirm(DeletionTarget::Account);
        workflow.set_password("hunter22");
        workflow.set_confirm_text("account");
        assert!(!workflow.can_execute());
        workflow.set_confirm_text("delete");
        assert!(workflow.can_execute());
    }

    #[test]
    fn no_password_swaps_in_create_password_step() {
        let mut workflow = DestructiveActionWorkflow::default();
        workflow.select(DeletionTarget::Income);
        workflow.proceed(false);

        let gate = workflow.gate().expect("gate shown");
        assert_eq!(gate.mode(), GateMode::Set);
        assert!(!gate.shows_current());
        assert!(!workflow.can_execute());
    }

    #[test]
    fn failure_clears_inputs_and_waits_for_dismiss() {
        let mut workflow = at_second_confirm(DeletionTarget::Bills);
        workflow.set_password("hunter22");
        workflow.set_confirm_text("bills");
        workflow.begin_execute().expect("authorized");
        assert!(!workflow.select(DeletionTarget::Income));

        workflow.finish(&Err(ProfileError::InvalidCredential(None)));
        assert_eq!(
            workflow.state(),
            &WorkflowState::Failed {
                target: DeletionTarget::Bills,
                message: "Incorrect password".to_string(),
            }
        );
        assert!(!workflow.select(DeletionTarget::Income));

        workflow.dismiss();
        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert!(workflow.select(DeletionTarget::Bills));
        workflow.proceed(true);
        assert_eq!(
            workflow.state(),
            &WorkflowState::SecondConfirm {
                target: DeletionTarget::Bills,
                password: String::new(),
                confirm_text: String::new(),
            }
        );
    }

    #[test]
    fn cancel_is_ignored_while_executing() {
        let mut workflow = at_second_confirm(DeletionTarget::Devices);
        workflow.set_password("pw");
        workflow.set_confirm_text("devices");
        workflow.begin_execute().expect("authorized");
        workflow.cancel();
        assert!(workflow.is_executing());
    }

    #[tokio::test]
    async fn delete_all_bills_end_to_end() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true, "message": "Deleted 12 bills" }));
        transport.push_ok(profile_reply());
        let api = ProfileApi::new(transport.clone());

        let mut workflow = DestructiveActionWorkflow::default();
        workflow.select(DeletionTarget::Bills);
        assert_eq!(workflow.warning(), DeletionTarget::Bills.warning());
        workflow.proceed(true);
        workflow.set_password("hunter22");
        workflow.set_confirm_text("bills");
        assert!(workflow.can_execute());

        let request = workflow.begin_execute().expect("authorized");
        let report = execute(&api, request, 2000).await;
        workflow.finish(&report.outcome);

        assert_eq!(
            workflow.state(),
            &WorkflowState::Done {
                target: DeletionTarget::Bills,
                message: "Deleted 12 bills".to_string(),
            }
        );
        assert!(report.profile.is_ok());
        assert_eq!(report.logout_after_ms, None);

        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, Method::Delete);
        assert_eq!(sent[0].path, "/api/auth/delete-all-bills");
        assert_eq!(sent[0].body, Some(json!({ "password": "hunter22" })));
        assert_eq!(sent[1].path, "/api/auth/profile");
    }

    #[tokio::test]
    async fn refresh_runs_even_when_deletion_fails() {
        let transport = ScriptedTransport::new();
        transport.push(500, json!({ "success": false }));
        transport.push_ok(profile_reply());
        let api = ProfileApi::new(transport.clone());

        let request =
            PendingDeletionRequest::authorize(DeletionTarget::Budgets, "budgets", "pw").expect("ok");
        let report = execute(&api, request, 2000).await;

        assert!(report.outcome.is_err());
        assert!(report.profile.is_ok());
        assert_eq!(
            transport.paths(),
            vec!["/api/auth/delete-all-budgets", "/api/auth/profile"]
        );
    }

    #[tokio::test]
    async fn account_deletion_schedules_logout() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true }));
        transport.push(401, json!({ "success": false }));
        let api = ProfileApi::new(transport.clone());

        let request =
            PendingDeletionRequest::authorize(DeletionTarget::Account, "Delete", "pw").expect("ok");
        let report = execute(&api, request, 1500).await;

        assert_eq!(report.outcome, Ok("Your account has been deleted.".to_string()));
        assert_eq!(report.logout_after_ms, Some(1500));
        assert_eq!(transport.paths()[0], "/api/auth/delete-account");
    }

    #[tokio::test]
    async fn account_failure_does_not_log_out() {
        let transport = ScriptedTransport::new();
        transport.push(400, json!({ "success": false, "message": "Wrong password" }));
        transport.push_ok(profile_reply());
        let api = ProfileApi::new(transport.clone());

        let request =
            PendingDeletionRequest::authorize(DeletionTarget::Account, "DELETE", "pw").expect("ok");
        let report = execute(&api, request, 2000).await;

        assert_eq!(
            report.outcome,
            Err(ProfileError::InvalidCredential(Some("Wrong password".to_string())))
        );
        assert_eq!(report.logout_after_ms, None);
        assert!(report.profile.is_ok());
    }

    #[tokio::test]
    async fn created_password_flows_straight_into_deletion() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true, "message": "Password set" }));
        transport.push_ok(json!({ "success": true }));
        transport.push_ok(profile_reply());
        let api = ProfileApi::new(transport.clone());

        let mut workflow = DestructiveActionWorkflow::default();
        workflow.select(DeletionTarget::Transactions);
        workflow.proceed(false);
        let gate = workflow.gate_mut().expect("gate");
        gate.set_value(GateField::New, "fresh-secret");
        gate.set_value(GateField::Confirm, "fresh-secret");
        let submission = gate.begin_submit().expect("valid");

        let created = submission.send(&api).await.expect("password set");
        let request = workflow
            .password_created(&created.new_password)
            .expect("continues");
        assert!(workflow.is_executing());
        let report = execute(&api, request, 2000).await;
        workflow.finish(&report.outcome);

        assert!(matches!(workflow.state(), WorkflowState::Done { .. }));
        let sent = transport.requests();
        assert_eq!(sent[0].path, "/api/auth/set-password");
        assert_eq!(sent[1].path, "/api/auth/delete-all-transactions");
        assert_eq!(sent[1].body, Some(json!({ "password": "fresh-secret" })));
    }
}
