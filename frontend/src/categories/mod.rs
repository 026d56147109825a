pub mod editor;
pub mod reorder;
pub mod sync;

pub use editor::{CategoryEditor, EditorPhase, EditorSubmission};
pub use reorder::{move_item, DragReorderController, ReorderOutcome};
pub use sync::{CategorySyncClient, Synced};

use std::rc::Rc;

use yew::Reducible;

use crate::models::{Category, CategoryType, UserProfile};

#[derive(Clone, Debug, PartialEq)]
pub enum BookChange {
    Append(CategoryType, Category),
    Rename {
        kind: CategoryType,
        id: String,
        name: String,
    },
    Remove(CategoryType, String),
    Reorder(CategoryType, Vec<Category>),
    Reset(CategoryBook),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryBook {
    income: Vec<Category>,
    expense: Vec<Category>,
}

impl CategoryBook {
    pub fn new(income: Vec<Category>, expense: Vec<Category>) -> Self {
        Self { income, expense }
    }

    pub fn from_profile(profile: &UserProfile) -> Self {
        Self::new(
            profile.income_categories.clone(),
            profile.expense_categories.clone(),
        )
    }

    pub fn list(&self, kind: CategoryType) -> &[Category] {
        match kind {
            CategoryType::Income => &self.income,
            CategoryType::Expense => &self.expense,
        }
    }

    fn list_mut(&mut self, kind: CategoryType) -> &mut Vec<Category> {
        match kind {
            CategoryType::Income => &mut self.income,
            CategoryType::Expense => &mut self.expense,
        }
    }

    pub fn append(&mut self, kind: CategoryType, category: Category) {
        self.list_mut(kind).push(category);
    }

    /// Rename in place. Returns false when no entry carries `id`.
    pub fn replace_name(&mut self, kind: CategoryType, id: &str, name: &str) -> bool {
        match self.list_mut(kind).iter_mut().find(|c| c.id == id) {
            Some(entry) => {
                entry.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, kind: CategoryType, id: &str) -> Option<Category> {
        let list = self.list_mut(kind);
        let index = list.iter().position(|c| c.id == id)?;
        Some(list.remove(index))
    }

    pub fn set_order(&mut self, kind: CategoryType, ordered: Vec<Category>) {
        *self.list_mut(kind) = ordered;
    }

    pub fn apply(&mut self, change: BookChange) {
        match change {
            BookChange::Append(kind, category) => self.append(kind, category),
            BookChange::Rename { kind, id, name } => {
                if !self.replace_name(kind, &id, &name) {
                    tracing::warn!(kind = kind.as_str(), %id, "renamed category missing from local list");
                }
            }
            BookChange::Remove(kind, id) => {
                self.remove(kind, &id);
            }
            BookChange::Reorder(kind, ordered) => self.set_order(kind, ordered),
            BookChange::Reset(book) => *self = book,
        }
    }

    /// Case-insensitive lookup, optionally ignoring the category with `except_id`.
    pub fn find_by_name(
        &self,
        kind: CategoryType,
        name: &str,
        except_id: Option<&str>,
    ) -> Option<&Category> {
        let needle = name.trim().to_lowercase();
        self.list(kind)
            .iter()
            .filter(|c| Some(c.id.as_str()) != except_id)
            .find(|c| c.name.trim().to_lowercase() == needle)
    }
}

impl Reducible for CategoryBook {
    type Action = BookChange;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
