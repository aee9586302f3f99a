use serde::{Deserialize, Serialize};

use crate::resources::{Resource, UpdatePolicy};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub email_address: Option<String>,
    pub nic_number: Option<String>,
    pub phone_number: Option<String>,
    pub course_id: Option<String>,
    pub course_name: Option<String>,
    pub learning_mode: Option<String>,
}

impl_document!(Enrollment, "enrollments");

impl Enrollment {
    fn merge_from(&mut self, incoming: Self) {
        merge_present!(self, incoming;
            full_name,
            email_address,
            nic_number,
            phone_number,
            course_id,
            course_name,
            learning_mode,
        );
    }
}

impl Resource for Enrollment {
    const NAME: &'static str = "Enrollment";
    const UPDATE_POLICY: UpdatePolicy<Self> = UpdatePolicy::MergeFields(Self::merge_from);
}
