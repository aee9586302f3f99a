use serde::{Deserialize, Serialize};

use crate::resources::{Resource, UpdatePolicy};

/// A message submitted through the public contact form. Never edited once stored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl_document!(ContactForm, "contact_forms");

impl Resource for ContactForm {
    const NAME: &'static str = "Contact";
    const UPDATE_POLICY: UpdatePolicy<Self> = UpdatePolicy::Immutable;
}
