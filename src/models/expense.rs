use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{parse_variant, ParseEnumError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Materials,
    Labor,
    Transportation,
    Equipment,
    Permits,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Materials,
        ExpenseCategory::Labor,
        ExpenseCategory::Transportation,
        ExpenseCategory::Equipment,
        ExpenseCategory::Permits,
        ExpenseCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseCategory::Materials => "Materials",
            ExpenseCategory::Labor => "Labor",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Equipment => "Equipment",
            ExpenseCategory::Permits => "Permits",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("expense category", &Self::ALL, Self::as_str, s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub project_id: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub receipt: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub project_id: String,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub receipt: Option<String>,
}

/// `receipt: Some(None)` clears the receipt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub project_id: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub receipt: Option<Option<String>>,
}
