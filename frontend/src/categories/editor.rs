use crate::error::ProfileError;
use crate::models::{Category, CategoryType};

use super::{CategoryBook, CategorySyncClient, Synced};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    FormOpen,
    Submitting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorSubmission {
    Add {
        kind: CategoryType,
        name: String,
    },
    Edit {
        kind: CategoryType,
        id: String,
        name: String,
    },
}

impl EditorSubmission {
    /// Send the change. The returned message is always filled in.
    pub async fn run(&self, client: &CategorySyncClient) -> Result<Synced, ProfileError> {
        let mut synced = match self {
            EditorSubmission::Add { kind, name } => client.add(*kind, name).await?,
            EditorSubmission::Edit { kind, id, name } => client.edit(*kind, id, name).await?,
        };
        if synced.message.is_none() {
            synced.message = Some(match self {
                EditorSubmission::Add { kind, name } => {
                    format!("Added \"{}\" to {} categories", name, kind.as_str())
                }
                EditorSubmission::Edit { name, .. } => format!("Renamed category to \"{}\"", name),
            });
        }
        Ok(synced)
    }
}

/// The name comes either from a suggestion chip or from free text, never
/// both: picking one clears the other.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryEditor {
    phase: EditorPhase,
    kind: CategoryType,
    editing: Option<Category>,
    custom_text: String,
    selected_suggestion: Option<String>,
    error: Option<String>,
}

impl Default for CategoryEditor {
    fn default() -> Self {
        Self {
            phase: EditorPhase::Idle,
            kind: CategoryType::Expense,
            editing: None,
            custom_text: String::new(),
            selected_suggestion: None,
            error: None,
        }
    }
}

impl CategoryEditor {
    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn kind(&self) -> CategoryType {
        self.kind
    }

    pub fn editing(&self) -> Option<&Category> {
        self.editing.as_ref()
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn selected_suggestion(&self) -> Option<&str> {
        self.selected_suggestion.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.phase != EditorPhase::Idle
    }

    pub fn open_add(kind: CategoryType) -> Self {
        Self {
            phase: EditorPhase::FormOpen,
            kind,
            ..Self::default()
        }
    }

    pub fn open_edit(kind: CategoryType, category: Category) -> Self {
        Self {
            phase: EditorPhase::FormOpen,
            kind,
            custom_text: category.name.clone(),
            editing: Some(category),
            ..Self::default()
        }
    }

    pub fn select_suggestion(&mut self, name: &str) {
        self.selected_suggestion = Some(name.to_string());
        self.custom_text.clear();
        self.error = None;
    }

    pub fn set_custom_text(&mut self, text: &str) {
        self.custom_text = text.to_string();
        if !text.trim().is_empty() {
            self.selected_suggestion = None;
        }
        self.error = None;
    }

    /// Typed text wins over a selected chip.
    pub fn effective_name(&self) -> Option<String> {
        let custom = self.custom_text.trim();
        if !custom.is_empty() {
            return Some(custom.to_string());
        }
        self.selected_suggestion
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn validate(&self, book: &CategoryBook) -> Result<EditorSubmission, ProfileError> {
        let name = self.effective_name().ok_or(ProfileError::EmptyName)?;
        let except_id = self.editing.as_ref().map(|c| c.id.as_str());
        if let Some(existing) = book.find_by_name(self.kind, &name, except_id) {
            return Err(ProfileError::DuplicateName(existing.name.clone()));
        }
        Ok(match &self.editing {
            Some(category) => EditorSubmission::Edit {
                kind: self.kind,
                id: category.id.clone(),
                name,
            },
            None => EditorSubmission::Add {
                kind: self.kind,
                name,
            },
        })
    }

    /// Validate and move to `Submitting`. On a validation error the form
    /// stays open with the error shown and nothing is sent.
    pub fn begin_submit(&mut self, book: &CategoryBook) -> Result<EditorSubmission, ProfileError> {
        if self.phase != EditorPhase::FormOpen {
            return Err(ProfileError::Validation(
                "The category form is not open".to_string(),
            ));
        }
        match self.validate(book) {
            Ok(submission) => {
                self.error = None;
                self.phase = EditorPhase::Submitting;
                Ok(submission)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn finish(&mut self, result: &Result<Synced, ProfileError>) {
        match result {
            Ok(_) => *self = Self::default(),
            Err(err) => {
                self.phase = EditorPhase::FormOpen;
                self.error = Some(err.user_message("Could not save the category."));
            }
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn available_suggestions(&self, book: &CategoryBook) -> Vec<&'static str> {
        self.kind
            .suggestions()
            .iter()
            .copied()
            .filter(|s| book.find_by_name(self.kind, s, None).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::ScriptedTransport;
    use crate::api::ProfileApi;
    use serde_json::json;

    fn book() -> CategoryBook {
        CategoryBook::new(
            vec![Category::new("i1", "Salary")],
            vec![Category::new("e1", "Food"), Category::new("e2", "Travel")],
        )
    }

    #[test]
    fn empty_form_is_rejected() {
        let mut editor = CategoryEditor::open_add(CategoryType::Expense);
        editor.set_custom_text("   ");
        assert_eq!(editor.begin_submit(&book()), Err(ProfileError::EmptyName));
        assert_eq!(editor.phase(), EditorPhase::FormOpen);
        assert!(editor.error().is_some());
    }

    #[test]
    fn duplicate_differs_only_by_case() {
        let mut editor = CategoryEditor::open_add(CategoryType::Expense);
        editor.set_custom_text("fOOD");
        assert_eq!(
            editor.begin_submit(&book()),
            Err(ProfileError::DuplicateName("Food".to_string()))
        );

        // Same name under the other type is fine.
        let mut editor = CategoryEditor::open_add(CategoryType::Income);
        editor.set_custom_text("Food");
        assert!(editor.begin_submit(&book()).is_ok());
    }

    #[test]
    fn editing_to_own_name_is_not_a_duplicate() {
        let mut editor =
            CategoryEditor::open_edit(CategoryType::Expense, Category::new("e2", "Travel"));
        assert_eq!(
            editor.begin_submit(&book()),
            Ok(EditorSubmission::Edit {
                kind: CategoryType::Expense,
                id: "e2".to_string(),
                name: "Travel".to_string(),
            })
        );

        let mut editor =
            CategoryEditor::open_edit(CategoryType::Expense, Category::new("e2", "Travel"));
        editor.set_custom_text("food");
        assert!(matches!(
            editor.begin_submit(&book()),
            Err(ProfileError::DuplicateName(_))
        ));
    }

    #[test]
    fn chip_and_custom_text_are_exclusive() {
        let mut editor = CategoryEditor::open_add(CategoryType::Income);
        editor.select_suggestion("Bonus");
        assert_eq!(editor.effective_name().as_deref(), Some("Bonus"));

        editor.set_custom_text("Side gig");
        assert_eq!(editor.selected_suggestion(), None);
        assert_eq!(editor.effective_name().as_deref(), Some("Side gig"));

        editor.select_suggestion("Rental");
        assert_eq!(editor.custom_text(), "");
        assert_eq!(editor.effective_name().as_deref(), Some("Rental"));
    }

    #[test]
    fn used_suggestions_are_hidden() {
        let editor = CategoryEditor::open_add(CategoryType::Income);
        let suggestions = editor.available_suggestions(&book());
        assert!(!suggestions.contains(&"Salary"));
        assert!(suggestions.contains(&"Freelance"));
    }

    #[tokio::test]
    async fn failed_save_reopens_form_with_server_message() {
        let transport = ScriptedTransport::new();
        transport.push(409, json!({ "success": false, "message": "Category already exists" }));
        let client = CategorySyncClient::new(ProfileApi::new(transport.clone()));
        let book = book();

        let mut editor = CategoryEditor::open_add(CategoryType::Income);
        editor.set_custom_text("Dividends");
        let submission = editor.begin_submit(&book).expect("valid");
        assert_eq!(editor.phase(), EditorPhase::Submitting);

        let result = submission.run(&client).await;
        editor.finish(&result);

        assert_eq!(editor.phase(), EditorPhase::FormOpen);
        assert_eq!(editor.error(), Some("Category already exists"));
    }

    #[tokio::test]
    async fn successful_add_closes_form() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "success": true, "category": { "_id": "i7", "name": "Dividends" } }));
        let client = CategorySyncClient::new(ProfileApi::new(transport.clone()));
        let mut book = book();

        let mut editor = CategoryEditor::open_add(CategoryType::Income);
        editor.set_custom_text("Dividends");
        let submission = editor.begin_submit(&book).expect("valid");
        let result = submission.run(&client).await;
        editor.finish(&result);
        let synced = result.expect("saved");
        assert_eq!(synced.message.as_deref(), Some("Added \"Dividends\" to income categories"));
        book.apply(synced.change);

        assert!(!editor.is_open());
        assert_eq!(
            book.list(CategoryType::Income).last(),
            Some(&Category::new("i7", "Dividends"))
        );
    }
}
