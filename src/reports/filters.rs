use crate::models::{Document, DocumentCategory, Expense, ExpenseCategory};

/// `None` keeps every category.
pub fn filter_expenses(expenses: &[Expense], category: Option<ExpenseCategory>) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| category.is_none_or(|c| e.category == c))
        .cloned()
        .collect()
}

/// Name/tag search combined with an optional category. An empty term matches everything.
pub fn search_documents(
    documents: &[Document],
    term: &str,
    category: Option<DocumentCategory>,
) -> Vec<Document> {
    documents
        .iter()
        .filter(|d| d.matches_search(term))
        .filter(|d| category.is_none_or(|c| d.category == c))
        .cloned()
        .collect()
}
