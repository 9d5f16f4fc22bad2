use crate::models::{Client, ClientPatch, EntityKind, NewClient};
use crate::ui::form::{FormField, FormState};

use super::{list, required, text, FormError};

fn fields(client: Option<&Client>) -> Vec<FormField> {
    let value = |get: fn(&Client) -> &str| client.map_or("", get).to_string();
    vec![
        FormField::required("Company Name", value(|c| c.company_name.as_str())),
        FormField::required("Contact Person", value(|c| c.contact_person.as_str())),
        FormField::required("Email", value(|c| c.email.as_str())),
        FormField::required("Phone", value(|c| c.phone.as_str())),
        FormField::optional("Address", value(|c| c.address.as_str())),
        FormField::optional("Notes", value(|c| c.notes.as_str())),
    ]
}

pub fn blank() -> FormState {
    FormState::new(EntityKind::Client, None, fields(None))
}

/// Project links are only editable once the client exists.
pub fn filled(client: &Client) -> FormState {
    let mut fields = fields(Some(client));
    fields.push(
        FormField::optional("Project IDs", client.project_ids.join(", "))
            .with_hint("comma separated"),
    );
    FormState::new(EntityKind::Client, Some(client.id.clone()), fields)
}

pub fn new(form: &FormState) -> Result<NewClient, FormError> {
    Ok(NewClient {
        company_name: required(form, "Company Name")?,
        contact_person: required(form, "Contact Person")?,
        email: required(form, "Email")?,
        phone: required(form, "Phone")?,
        address: text(form, "Address"),
        notes: text(form, "Notes"),
    })
}

pub fn patch(form: &FormState) -> Result<ClientPatch, FormError> {
    let fields = new(form)?;
    Ok(ClientPatch {
        company_name: Some(fields.company_name),
        contact_person: Some(fields.contact_person),
        email: Some(fields.email),
        phone: Some(fields.phone),
        address: Some(fields.address),
        notes: Some(fields.notes),
        project_ids: Some(list(form, "Project IDs")),
    })
}
