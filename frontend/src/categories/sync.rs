use crate::api::ProfileApi;
use crate::error::ProfileError;
use crate::models::{Category, CategoryType};

use super::BookChange;

/// A mutation the server accepted, with the local change to apply for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Synced {
    pub change: BookChange,
    pub message: Option<String>,
}

/// Runs category mutations against the backend. Nothing is applied locally
/// here; callers fold [`Synced::change`] into whichever book is current once
/// the call returns.
#[derive(Clone, PartialEq)]
pub struct CategorySyncClient {
    api: ProfileApi,
}

impl CategorySyncClient {
    pub fn new(api: ProfileApi) -> Self {
        Self { api }
    }

    pub async fn add(&self, kind: CategoryType, name: &str) -> Result<Synced, ProfileError> {
        let created = self.api.add_category(kind, name).await?;
        tracing::info!(kind = kind.as_str(), id = %created.id, "category added");
        Ok(Synced {
            change: BookChange::Append(kind, created),
            message: None,
        })
    }

    pub async fn edit(
        &self,
        kind: CategoryType,
        id: &str,
        new_name: &str,
    ) -> Result<Synced, ProfileError> {
        let message = self.api.edit_category(kind, id, new_name).await?;
        Ok(Synced {
            change: BookChange::Rename {
                kind,
                id: id.to_string(),
                name: new_name.to_string(),
            },
            message,
        })
    }

    pub async fn delete(&self, kind: CategoryType, id: &str) -> Result<Synced, ProfileError> {
        let message = self.api.delete_category(kind, id).await?;
        tracing::info!(kind = kind.as_str(), %id, "category deleted");
        Ok(Synced {
            change: BookChange::Remove(kind, id.to_string()),
            message,
        })
    }

    pub async fn update_order(
        &self,
        kind: CategoryType,
        ordered: &[Category],
    ) -> Result<Option<String>, ProfileError> {
        self.api.update_category_order(kind, ordered).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::ScriptedTransport;
    use crate::categories::CategoryBook;
    use serde_json::json;

    fn client(transport: &std::rc::Rc<ScriptedTransport>) -> CategorySyncClient {
        CategorySyncClient::new(ProfileApi::new(transport.clone()))
    }

    fn book() -> CategoryBook {
        CategoryBook::new(
            vec![Category::new("i1", "Salary")],
            vec![Category::new("e1", "Food"), Category::new("e2", "Rent")],
        )
    }

    #[tokio::test]
    async fn add_appends_server_category() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true, "category": { "_id": "i2", "name": "Bonus" } }));
        let mut book = book();

        let synced = client(&transport)
            .add(CategoryType::Income, "Bonus")
            .await
            .expect("added");
        book.apply(synced.change);

        assert_eq!(
            book.list(CategoryType::Income),
            &[Category::new("i1", "Salary"), Category::new("i2", "Bonus")]
        );
    }

    #[tokio::test]
    async fn edit_replaces_by_id() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true, "message": "Category updated" }));
        let mut book = book();

        let synced = client(&transport)
            .edit(CategoryType::Expense, "e2", "Housing")
            .await
            .expect("edited");

        assert_eq!(synced.message.as_deref(), Some("Category updated"));
        book.apply(synced.change);
        assert_eq!(
            book.list(CategoryType::Expense),
            &[Category::new("e1", "Food"), Category::new("e2", "Housing")]
        );
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let transport = ScriptedTransport::new();
        transport.push(404, json!({ "success": false, "message": "Category not found" }));

        let err = client(&transport)
            .delete(CategoryType::Expense, "e9")
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true }));
        let mut book = book();

        let synced = client(&transport)
            .delete(CategoryType::Expense, "e1")
            .await
            .expect("deleted");
        book.apply(synced.change);

        assert_eq!(book.list(CategoryType::Expense), &[Category::new("e2", "Rent")]);
        assert_eq!(transport.paths(), vec!["/api/auth/delete-category"]);
    }

    #[tokio::test]
    async fn network_failure_yields_no_change() {
        let transport = ScriptedTransport::new();
        transport.push_network_error();

        let err = client(&transport)
            .add(CategoryType::Expense, "Travel")
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::Network(_)));
    }
}
