pub mod destructive;
pub mod password_gate;

pub use destructive::{
    execute, DestructiveActionWorkflow, ExecutionReport, PendingDeletionRequest, WorkflowAction,
    WorkflowState,
};
pub use password_gate::{GateField, GateMode, GateSuccess, PasswordGate, PasswordSubmission};
