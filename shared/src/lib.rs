use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which ledger a record belongs to. The hosted store keeps income and
/// expenses in separate collections; all code paths discriminate on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    /// Collection name used by the document store.
    pub fn collection_name(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expenses",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single income or expense entry owned by a user.
///
/// Documents in the hosted store are schemaless maps; category and
/// subcategory are therefore kept as strings and validated against the fixed
/// tables below on the write path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned identifier.
    pub id: String,
    /// Identifier of the owning user; every query is scoped by this.
    pub owner_id: String,
    pub kind: RecordKind,
    /// Non-negative amount.
    pub amount: f64,
    pub category: String,
    pub sub_category: String,
    /// Free-text description (optional, may be empty).
    pub note: String,
    /// Creation timestamp (RFC 3339).
    pub date: String,
}

/// Fixed income categories. Adding a variant without a subcategory list is a
/// compile error (exhaustive match in `subcategories`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeCategory {
    Job,
    Business,
    Freelancing,
    Investments,
    Other,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 5] = [
        IncomeCategory::Job,
        IncomeCategory::Business,
        IncomeCategory::Freelancing,
        IncomeCategory::Investments,
        IncomeCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IncomeCategory::Job => "Job",
            IncomeCategory::Business => "Business",
            IncomeCategory::Freelancing => "Freelancing",
            IncomeCategory::Investments => "Investments",
            IncomeCategory::Other => "Other",
        }
    }

    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            IncomeCategory::Job => &[
                "Base Salary",
                "Performance Bonus",
                "Overtime Pay",
                "Commission",
            ],
            IncomeCategory::Business => &[
                "E-commerce Sales",
                "Consulting Fees",
                "Product Revenue",
                "Service Contracts",
            ],
            IncomeCategory::Freelancing => &[
                "Web Development",
                "Graphic Design",
                "Content Writing",
                "Translation Services",
            ],
            IncomeCategory::Investments => &[
                "Stock Dividends",
                "Bond Interest",
                "Rental Income",
                "Capital Gains",
            ],
            IncomeCategory::Other => &[
                "Gifts",
                "Inheritance",
                "Lottery Winnings",
                "Royalties",
            ],
        }
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IncomeCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IncomeCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or(())
    }
}

/// Fixed expense categories, same shape as [`IncomeCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Bill,
    Food,
    Travel,
    Shopping,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Bill,
        ExpenseCategory::Food,
        ExpenseCategory::Travel,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Bill => "Bill",
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Other => "Other",
        }
    }

    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            ExpenseCategory::Bill => &[
                "Electricity",
                "Natural Gas",
                "Water & Sewage",
                "Internet",
                "Mobile Phone",
                "Streaming Services",
            ],
            ExpenseCategory::Food => &[
                "Groceries",
                "Dining Out",
                "Coffee Shops",
                "Drinks",
                "Work Lunches",
                "Food Delivery",
            ],
            ExpenseCategory::Travel => &[
                "Gasoline",
                "Public Transport",
                "Ride Sharing",
                "Car Payment",
                "Car Insurance",
                "Parking Fees",
            ],
            ExpenseCategory::Shopping => &[
                "Clothing",
                "Electronics",
                "Home Goods",
                "Gifts",
                "Books",
                "Hobby Supplies",
            ],
            ExpenseCategory::Other => &[
                "Healthcare",
                "Education",
                "Charity",
                "Subscriptions",
                "Pet Care",
                "Repairs",
            ],
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or(())
    }
}

/// Category labels for a record kind, in form display order.
pub fn categories_for(kind: RecordKind) -> Vec<&'static str> {
    match kind {
        RecordKind::Income => IncomeCategory::ALL.iter().map(|c| c.label()).collect(),
        RecordKind::Expense => ExpenseCategory::ALL.iter().map(|c| c.label()).collect(),
    }
}

/// Subcategory list for a category label, `None` when the label is not one of
/// the fixed categories for that kind.
pub fn subcategories_for(kind: RecordKind, category: &str) -> Option<&'static [&'static str]> {
    match kind {
        RecordKind::Income => category
            .parse::<IncomeCategory>()
            .ok()
            .map(|c| c.subcategories()),
        RecordKind::Expense => category
            .parse::<ExpenseCategory>()
            .ok()
            .map(|c| c.subcategories()),
    }
}

/// Whether `sub_category` belongs to `category`'s fixed list.
pub fn subcategory_belongs(kind: RecordKind, category: &str, sub_category: &str) -> bool {
    subcategories_for(kind, category)
        .map(|subs| subs.contains(&sub_category))
        .unwrap_or(false)
}

/// Shown when a user has not uploaded a profile image.
pub const DEFAULT_PROFILE_IMAGE: &str =
    "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460_960_720.png";

/// User document stored in the `users` collection. Created at sign-up,
/// mutated via the profile page, never deleted by the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub bio: String,
    /// Base64 data URL or plain URL.
    pub profile_image: String,
}

/// Session exposed by the identity service after sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user identifier; scopes every record query.
    pub user_id: String,
    pub email: String,
    /// Display name from the identity provider, when it has one.
    pub display_name: Option<String>,
    /// Account creation timestamp (RFC 3339).
    pub created_at: String,
}

/// Validated form payload for creating a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRecordRequest {
    pub kind: RecordKind,
    pub amount: f64,
    pub category: String,
    pub sub_category: String,
    pub note: String,
}

/// Mutable profile fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub bio: String,
    pub profile_image: String,
}

/// One point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub amount: f64,
}

/// Income and expense series sharing one x-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSeries {
    /// Unique dates across both record sets, first-appearance order.
    pub labels: Vec<String>,
    pub income: Vec<SeriesPoint>,
    pub expense: Vec<SeriesPoint>,
}

/// Summed amounts for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetStatus {
    Gain,
    Loss,
}

impl NetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NetStatus::Gain => "Gain",
            NetStatus::Loss => "Loss",
        }
    }
}

/// Net position of a user's ledger at one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetPosition {
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    pub status: NetStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_subcategories() {
        for cat in IncomeCategory::ALL {
            assert!(!cat.subcategories().is_empty(), "{} has no subcategories", cat);
        }
        for cat in ExpenseCategory::ALL {
            assert!(!cat.subcategories().is_empty(), "{} has no subcategories", cat);
        }
    }

    #[test]
    fn test_category_labels_round_trip() {
        for cat in IncomeCategory::ALL {
            assert_eq!(cat.label().parse::<IncomeCategory>(), Ok(cat));
        }
        for cat in ExpenseCategory::ALL {
            assert_eq!(cat.label().parse::<ExpenseCategory>(), Ok(cat));
        }
    }

    #[test]
    fn test_subcategory_membership() {
        assert!(subcategory_belongs(RecordKind::Expense, "Food", "Groceries"));
        assert!(!subcategory_belongs(RecordKind::Expense, "Food", "Gasoline"));
        assert!(!subcategory_belongs(RecordKind::Expense, "Snacks", "Groceries"));
        assert!(subcategory_belongs(RecordKind::Income, "Job", "Base Salary"));
    }

    #[test]
    fn test_subcategory_options_restricted_to_category() {
        let food = subcategories_for(RecordKind::Expense, "Food").unwrap();
        assert_eq!(
            food,
            &["Groceries", "Dining Out", "Coffee Shops", "Drinks", "Work Lunches", "Food Delivery"]
        );
        assert!(subcategories_for(RecordKind::Income, "Bill").is_none());
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(RecordKind::Income.collection_name(), "income");
        assert_eq!(RecordKind::Expense.collection_name(), "expenses");
    }

    #[test]
    fn test_record_document_shape() {
        let record = Record {
            id: "r1".to_string(),
            owner_id: "u1".to_string(),
            kind: RecordKind::Expense,
            amount: 12.5,
            category: "Food".to_string(),
            sub_category: "Groceries".to_string(),
            note: String::new(),
            date: "2025-01-10T09:00:00+00:00".to_string(),
        };

        let document = serde_json::to_value(&record).unwrap();
        assert_eq!(document["owner_id"], "u1");
        assert_eq!(document["kind"], "Expense");
        assert_eq!(document["sub_category"], "Groceries");

        let parsed: Record = serde_json::from_value(document).unwrap();
        assert_eq!(parsed, record);
    }
}
