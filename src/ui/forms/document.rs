use crate::models::{Document, DocumentCategory, DocumentPatch, EntityKind, NewDocument};
use crate::ui::form::{FormField, FormState};

use super::{choice, list, options, required, FormError};

const COMMON_TAGS: &str = "Important, Urgent, Legal, Reference, Archive";

fn fields(document: Option<&Document>) -> Vec<FormField> {
    let category = document.map_or(DocumentCategory::Contracts, |d| d.category);
    vec![
        FormField::required("Name", document.map_or("", |d| d.name.as_str())),
        FormField::required("Category", category.as_str())
            .with_hint(options(&DocumentCategory::ALL, DocumentCategory::as_str)),
        FormField::required("File URL", document.map_or("", |d| d.file_url.as_str())),
        FormField::optional("Tags", document.map(|d| d.tags.join(", ")).unwrap_or_default())
            .with_hint(COMMON_TAGS),
    ]
}

pub fn blank() -> FormState {
    FormState::new(EntityKind::Document, None, fields(None))
}

pub fn filled(document: &Document) -> FormState {
    FormState::new(EntityKind::Document, Some(document.id.clone()), fields(Some(document)))
}

/// Upload date and size are assigned by the document service.
pub fn new(form: &FormState) -> Result<NewDocument, FormError> {
    Ok(NewDocument {
        name: required(form, "Name")?,
        category: choice(form, "Category")?,
        tags: list(form, "Tags"),
        file_url: required(form, "File URL")?,
        size: None,
    })
}

pub fn patch(form: &FormState) -> Result<DocumentPatch, FormError> {
    let fields = new(form)?;
    Ok(DocumentPatch {
        name: Some(fields.name),
        category: Some(fields.category),
        tags: Some(fields.tags),
        file_url: Some(fields.file_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn filled_form_parses_back_without_size() {
        let seed = SeedData::bundled().unwrap();
        let mut document = seed.documents[2].clone();
        document.category = DocumentCategory::Manuals;
        let parsed = new(&filled(&document)).unwrap();
        assert_eq!(parsed.category, DocumentCategory::Manuals);
        assert_eq!(parsed.tags, ["Safety", "Reference"]);
        assert_eq!(parsed.size, None);

        assert_eq!(blank().value("Category"), "Contracts");
    }
}
