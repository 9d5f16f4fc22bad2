use chrono::NaiveDate;

use crate::models::{EntityKind, Expense, ExpenseCategory, ExpensePatch, NewExpense};
use crate::ui::form::{FormField, FormState};

use super::{amount, choice, date, optional, options, required, FormError};

fn fields(expense: Option<&Expense>, today: NaiveDate) -> Vec<FormField> {
    let category = expense.map_or(ExpenseCategory::Materials, |e| e.category);
    vec![
        FormField::required("Project ID", expense.map_or("", |e| e.project_id.as_str())),
        FormField::required("Category", category.as_str())
            .with_hint(options(&ExpenseCategory::ALL, ExpenseCategory::as_str)),
        FormField::required("Amount", expense.map(|e| e.amount.to_string()).unwrap_or_default()),
        FormField::required(
            "Date",
            expense.map_or(today, |e| e.date).format("%Y-%m-%d").to_string(),
        )
            .with_hint("YYYY-MM-DD"),
        FormField::required("Description", expense.map_or("", |e| e.description.as_str())),
        FormField::optional("Receipt", expense.and_then(|e| e.receipt.clone()).unwrap_or_default()),
    ]
}

pub fn blank(today: NaiveDate) -> FormState {
    FormState::new(EntityKind::Expense, None, fields(None, today))
}

pub fn filled(expense: &Expense) -> FormState {
    FormState::new(
        EntityKind::Expense,
        Some(expense.id.clone()),
        fields(Some(expense), expense.date),
    )
}

pub fn new(form: &FormState) -> Result<NewExpense, FormError> {
    Ok(NewExpense {
        project_id: required(form, "Project ID")?,
        category: choice(form, "Category")?,
        amount: amount(form, "Amount")?,
        date: date(form, "Date")?,
        description: required(form, "Description")?,
        receipt: optional(form, "Receipt"),
    })
}

/// A blank receipt field clears the stored receipt.
pub fn patch(form: &FormState) -> Result<ExpensePatch, FormError> {
    let fields = new(form)?;
    Ok(ExpensePatch {
        project_id: Some(fields.project_id),
        category: Some(fields.category),
        amount: Some(fields.amount),
        date: Some(fields.date),
        description: Some(fields.description),
        receipt: Some(fields.receipt),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn receipt_round_trips_through_the_form() {
        let seed = SeedData::bundled().unwrap();
        let with_receipt = patch(&filled(&seed.expenses[0])).unwrap();
        assert_eq!(with_receipt.receipt, Some(Some("RCPT-10482".to_string())));
        assert_eq!(with_receipt.amount, Some(48250.75));

        let without_receipt = patch(&filled(&seed.expenses[1])).unwrap();
        assert_eq!(without_receipt.receipt, Some(None));
    }
}
