//! Typed access to the `/api/auth/*` endpoints the profile screen uses.
//!
//! The wire goes through a [`Transport`] so the same calls run against the
//! browser's fetch in production and a scripted transport in tests.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::GlooTransport;

use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ProfileError;
use crate::models::{Category, CategoryType, DeletionTarget, UserProfile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    /// The body carries a password the server will check.
    pub carries_credential: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            carries_credential: false,
        }
    }

    fn with_credential(mut self) -> Self {
        self.carries_credential = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

#[async_trait(?Send)]
pub trait Transport {
    /// Deliver one request. Only transport failures are errors here; HTTP
    /// error statuses come back as a normal [`ApiReply`].
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, ProfileError>;
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn message_of(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Turn a raw reply into either the response body or a classified error.
///
/// A 2xx reply whose `success` flag is false is still a failure.
pub fn interpret(reply: ApiReply, carries_credential: bool) -> Result<Value, ProfileError> {
    let message = message_of(&reply.body);
    match reply.status {
        200..=299 => {
            let envelope = Envelope::deserialize(&reply.body)
                .map_err(|e| ProfileError::Decode(e.to_string()))?;
            if envelope.success {
                Ok(reply.body)
            } else {
                Err(ProfileError::Rejected(envelope.message))
            }
        }
        403 if carries_credential => Err(ProfileError::InvalidCredential(message)),
        401 | 403 => Err(ProfileError::Auth(message)),
        404 => Err(ProfileError::NotFound(message)),
        400 | 409 | 422 if carries_credential => Err(ProfileError::InvalidCredential(message)),
        400 | 409 | 422 => Err(ProfileError::Validation(
            message.unwrap_or_else(|| "The request was not valid".to_string()),
        )),
        status => Err(ProfileError::Server {
            status: Some(status),
            message,
        }),
    }
}

#[derive(Deserialize)]
struct CategoryCreated {
    category: Category,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    user: UserProfile,
}

#[derive(Clone)]
pub struct ProfileApi {
    transport: Rc<dyn Transport>,
}

impl PartialEq for ProfileApi {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.transport, &other.transport)
    }
}

impl ProfileApi {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call(&self, request: ApiRequest) -> Result<Value, ProfileError> {
        let method = request.method;
        let path = request.path.clone();
        let carries_credential = request.carries_credential;
        tracing::debug!(?method, %path, "api request");
        let reply = self.transport.send(request).await?;
        let status = reply.status;
        let result = interpret(reply, carries_credential);
        if let Err(err) = &result {
            tracing::warn!(?method, %path, status, error = %err, "api request failed");
        }
        result
    }

    async fn call_for_message(&self, request: ApiRequest) -> Result<Option<String>, ProfileError> {
        let body = self.call(request).await?;
        Ok(message_of(&body))
    }

    pub async fn add_category(
        &self,
        kind: CategoryType,
        name: &str,
    ) -> Result<Category, ProfileError> {
        let body = self
            .call(ApiRequest::new(
                Method::Post,
                "/api/auth/add-category",
                Some(json!({ "categoryType": kind.as_str(), "categoryName": name })),
            ))
            .await?;
        let created = CategoryCreated::deserialize(&body)
            .map_err(|e| ProfileError::Decode(e.to_string()))?;
        Ok(created.category)
    }

    pub async fn edit_category(
        &self,
        kind: CategoryType,
        id: &str,
        new_name: &str,
    ) -> Result<Option<String>, ProfileError> {
        self.call_for_message(ApiRequest::new(
            Method::Put,
            "/api/auth/edit-category",
            Some(json!({
                "categoryType": kind.as_str(),
                "categoryId": id,
                "newCategoryName": new_name,
            })),
        ))
        .await
    }

    pub async fn delete_category(
        &self,
        kind: CategoryType,
        id: &str,
    ) -> Result<Option<String>, ProfileError> {
        self.call_for_message(ApiRequest::new(
            Method::Delete,
            "/api/auth/delete-category",
            Some(json!({ "categoryType": kind.as_str(), "categoryId": id })),
        ))
        .await
    }

    pub async fn update_category_order(
        &self,
        kind: CategoryType,
        ordered: &[Category],
    ) -> Result<Option<String>, ProfileError> {
        self.call_for_message(ApiRequest::new(
            Method::Put,
            "/api/auth/update-category-order",
            Some(json!({ "categoryType": kind.as_str(), "categories": ordered })),
        ))
        .await
    }

    pub async fn change_password(
        &self,
        current: &str,
        new_password: &str,
    ) -> Result<Option<String>, ProfileError> {
        self.call_for_message(
            ApiRequest::new(
                Method::Post,
                "/api/auth/change-password",
                Some(json!({ "currentPassword": current, "newPassword": new_password })),
            )
            .with_credential(),
        )
        .await
    }

    pub async fn set_password(&self, new_password: &str) -> Result<Option<String>, ProfileError> {
        self.call_for_message(ApiRequest::new(
            Method::Post,
            "/api/auth/set-password",
            Some(json!({ "newPassword": new_password })),
        ))
        .await
    }

    pub async fn delete_data(
        &self,
        target: DeletionTarget,
        password: &str,
    ) -> Result<Option<String>, ProfileError> {
        self.call_for_message(
            ApiRequest::new(
                Method::Delete,
                target.endpoint(),
                Some(json!({ "password": password })),
            )
            .with_credential(),
        )
        .await
    }

    pub async fn fetch_profile(&self) -> Result<UserProfile, ProfileError> {
        let body = self
            .call(ApiRequest::new(Method::Get, "/api/auth/profile", None))
            .await?;
        let envelope = ProfileEnvelope::deserialize(&body)
            .map_err(|e| ProfileError::Decode(e.to_string()))?;
        Ok(envelope.user)
    }

    pub async fn logout(&self) -> Result<(), ProfileError> {
        self.transport
            .send(ApiRequest::new(Method::Post, "/api/auth/logout", None))
            .await
            .map(|_| ())
    }
}
