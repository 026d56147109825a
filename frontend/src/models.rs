use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryType::Income => "Income",
            CategoryType::Expense => "Expense",
        }
    }

    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            CategoryType::Income => &[
                "Salary",
                "Freelance",
                "Business",
                "Investments",
                "Rental",
                "Gifts",
                "Bonus",
            ],
            CategoryType::Expense => &[
                "Food",
                "Transport",
                "Housing",
                "Utilities",
                "Healthcare",
                "Entertainment",
                "Shopping",
                "Education",
                "Insurance",
                "Travel",
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeletionTarget {
    Expenses,
    Income,
    Bills,
    Budgets,
    Categories,
    Transactions,
    Devices,
    Account,
}

impl DeletionTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            DeletionTarget::Expenses => "expenses",
            DeletionTarget::Income => "income",
            DeletionTarget::Bills => "bills",
            DeletionTarget::Budgets => "budgets",
            DeletionTarget::Categories => "categories",
            DeletionTarget::Transactions => "transactions",
            DeletionTarget::Devices => "devices",
            DeletionTarget::Account => "account",
        }
    }

    /// The word the user has to type before the deletion is allowed.
    pub fn confirmation_phrase(self) -> &'static str {
        match self {
            DeletionTarget::Account => "DELETE",
            other => other.as_str(),
        }
    }

    pub fn endpoint(self) -> String {
        match self {
            DeletionTarget::Account => "/api/auth/delete-account".to_string(),
            other => format!("/api/auth/delete-all-{}", other.as_str()),
        }
    }

    pub fn button_label(self) -> &'static str {
        match self {
            DeletionTarget::Expenses => "Delete All Expenses",
            DeletionTarget::Income => "Delete All Income",
            DeletionTarget::Bills => "Delete All Bills",
            DeletionTarget::Budgets => "Delete All Budgets",
            DeletionTarget::Categories => "Delete Custom Categories",
            DeletionTarget::Transactions => "Delete All Transactions",
            DeletionTarget::Devices => "Sign Out All Devices",
            DeletionTarget::Account => "Delete Account",
        }
    }

    pub fn warning(self) -> &'static str {
        match self {
            DeletionTarget::Expenses => {
                "This will permanently delete every expense you have recorded. Your budgets will no longer reflect past spending."
            }
            DeletionTarget::Income => {
                "This will permanently delete every income entry you have recorded."
            }
            DeletionTarget::Bills => {
                "This will permanently delete all of your bills and their reminders."
            }
            DeletionTarget::Budgets => {
                "This will permanently delete all of your budgets and their limits."
            }
            DeletionTarget::Categories => {
                "This will permanently delete all of your custom income and expense categories."
            }
            DeletionTarget::Transactions => {
                "This will permanently delete your full transaction history."
            }
            DeletionTarget::Devices => {
                "This will remove every remembered device. You will need to sign in again everywhere."
            }
            DeletionTarget::Account => {
                "This will permanently delete your account and all associated data. This cannot be undone."
            }
        }
    }

    pub fn success_message(self) -> String {
        match self {
            DeletionTarget::Account => "Your account has been deleted.".to_string(),
            DeletionTarget::Devices => "All devices have been removed.".to_string(),
            other => format!("All your {} have been deleted.", other.as_str()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub has_password: bool,
    pub income_categories: Vec<Category>,
    pub expense_categories: Vec<Category>,
    pub devices: u32,
}
