use serde::{Deserialize, Serialize};

use crate::resources::{Resource, UpdatePolicy};

/// A learner's progress through one course.
///
/// Two progress records are equal when they carry the same id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub course_id: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub completed_modules: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total_modules: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub progress_percentage: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub certificate_eligible: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub badges_earned: Vec<String>,
    pub feedback: Option<String>,
}

impl PartialEq for SkillProgress {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl_document!(SkillProgress, "skill_progress", indexed = ["userId", "courseId"]);

impl Resource for SkillProgress {
    const NAME: &'static str = "Progress";
    const UPDATE_POLICY: UpdatePolicy<Self> = UpdatePolicy::GuardedOverwrite;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_id() {
        let a = SkillProgress {
            id: Some("p1".into()),
            progress_percentage: 10.0,
            ..Default::default()
        };
        let b = SkillProgress {
            id: Some("p1".into()),
            progress_percentage: 90.0,
            ..Default::default()
        };
        let c = SkillProgress {
            id: Some("p2".into()),
            progress_percentage: 10.0,
            ..Default::default()
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_wire_names() {
        let p = SkillProgress {
            user_id: Some("u1".into()),
            certificate_eligible: true,
            total_modules: 8,
            ..Default::default()
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["userId"], "u1");
        assert_eq!(v["certificateEligible"], true);
        assert_eq!(v["totalModules"], 8);
    }
}
