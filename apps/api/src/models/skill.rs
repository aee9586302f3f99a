use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::resources::{Resource, UpdatePolicy};

/// A skill a member shares with the community.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub skill_title: Option<String>,
    pub skill_description: Option<String>,
    pub experience_level: Option<String>,
    pub how_you_use_it: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub availability_for_collaboration: bool,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl_document!(Skill, "skills");

impl Resource for Skill {
    const NAME: &'static str = "Skill";
    const UPDATE_POLICY: UpdatePolicy<Self> = UpdatePolicy::ForcedOverwrite;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_date_time_and_flags() {
        let s: Skill = serde_json::from_str(
            r#"{
                "name": "Nimal",
                "skillTitle": "Woodworking",
                "tags": ["craft", "hands-on"],
                "availabilityForCollaboration": true,
                "date": "2025-03-14",
                "time": "09:30:00"
            }"#,
        )
        .unwrap();

        assert_eq!(s.date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(s.time, NaiveTime::from_hms_opt(9, 30, 0));
        assert!(s.availability_for_collaboration);
        assert_eq!(s.tags, vec!["craft", "hands-on"]);
    }

    #[test]
    fn test_missing_flag_and_tags_default() {
        let s: Skill = serde_json::from_str(r#"{"skillTitle":"Pottery"}"#).unwrap();
        assert!(!s.availability_for_collaboration);
        assert!(s.tags.is_empty());
    }
}
