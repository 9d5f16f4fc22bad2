use crate::clock::Clock;
use crate::models::{EntityKind, Expense, ExpensePatch, NewExpense};
use crate::store::Keyed;

use super::{EntityService, Record};

pub type ExpenseService = EntityService<Expense>;

impl Keyed for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Expense {
    const KIND: EntityKind = EntityKind::Expense;

    type New = NewExpense;
    type Patch = ExpensePatch;

    fn create(id: String, fields: NewExpense, _clock: &dyn Clock) -> Self {
        Expense {
            id,
            project_id: fields.project_id,
            category: fields.category,
            amount: fields.amount,
            date: fields.date,
            description: fields.description,
            receipt: fields.receipt,
        }
    }

    fn apply(&mut self, patch: ExpensePatch) {
        if let Some(project_id) = patch.project_id {
            self.project_id = project_id;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(receipt) = patch.receipt {
            self.receipt = receipt;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::ExpenseCategory;
    use crate::service::testing::services;

    #[tokio::test]
    async fn create_keeps_caller_fields_verbatim() {
        let (services, _) = services();
        let fields = NewExpense {
            project_id: "2".to_string(),
            category: ExpenseCategory::Materials,
            amount: 1_250.40,
            date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            description: "Gym floor underlayment".to_string(),
            receipt: Some("RCPT-20001".to_string()),
        };

        let created = services.expenses.create(fields.clone()).await;
        assert_eq!(created.project_id, fields.project_id);
        assert_eq!(created.amount, fields.amount);
        assert_eq!(created.receipt, fields.receipt);
        assert!(services.expenses.get_by_id(&created.id).await.is_some());
    }

    #[tokio::test]
    async fn patch_can_clear_the_receipt() {
        let (services, _) = services();
        let patch = ExpensePatch {
            receipt: Some(None),
            ..Default::default()
        };
        let updated = services.expenses.update("1", patch).await.unwrap();
        assert_eq!(updated.receipt, None);
        assert_eq!(updated.amount, 48_250.75);
    }

    #[tokio::test]
    async fn delete_shrinks_the_collection_by_one() {
        let (services, _) = services();
        services.expenses.delete("6").await.unwrap();
        assert_eq!(services.expenses.get_all().await.len(), 5);
        assert!(services.expenses.delete("6").await.is_err());
        assert_eq!(services.expenses.get_all().await.len(), 5);
    }
}
