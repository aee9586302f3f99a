use serde::{Deserialize, Serialize};

use crate::resources::{Resource, UpdatePolicy};

/// One module of a course syllabus with its ordered topics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseModule {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub module: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub topics: Vec<String>,
}

/// A course offered on the platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Learning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub course_id: Option<String>,
    pub course_name: Option<String>,
    pub course_fee: Option<f64>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub job_opportunities: Option<String>,
    pub course_content: Option<Vec<CourseModule>>,
}

impl_document!(Learning, "learnings");

impl Learning {
    fn merge_from(&mut self, incoming: Self) {
        merge_present!(self, incoming;
            course_id,
            course_name,
            course_fee,
            description,
            duration,
            job_opportunities,
            course_content,
        );
    }
}

impl Resource for Learning {
    const NAME: &'static str = "Learning";
    const UPDATE_POLICY: UpdatePolicy<Self> = UpdatePolicy::MergeFields(Self::merge_from);
}
