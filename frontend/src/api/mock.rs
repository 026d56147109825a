use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiReply, ApiRequest, Transport};
use crate::error::ProfileError;

/// Replays queued replies in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<ApiReply, ProfileError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn push(&self, status: u16, body: Value) {
        self.replies
            .borrow_mut()
            .push_back(Ok(ApiReply { status, body }));
    }

    pub(crate) fn push_ok(&self, body: Value) {
        self.push(200, body);
    }

    pub(crate) fn push_network_error(&self) {
        self.replies
            .borrow_mut()
            .push_back(Err(ProfileError::Network("connection refused".to_string())));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.path.clone()).collect()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, ProfileError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ProfileError::Network("no scripted reply".to_string())))
    }
}
