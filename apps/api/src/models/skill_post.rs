use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::resources::{Resource, UpdatePolicy};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: Option<String>,
    pub commenter: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

/// A community post showing off a skill, with likes and a comment thread.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub media_urls: Vec<String>,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub liked_user_ids: Vec<String>,
    /// Oldest first.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub comments: Vec<Comment>,
}

impl_document!(SkillPost, "skill_posts");

impl Resource for SkillPost {
    const NAME: &'static str = "Post";
    const UPDATE_POLICY: UpdatePolicy<Self> = UpdatePolicy::ForcedOverwrite;
}

impl SkillPost {
    /// Adds `user_id` to the likes if absent, removes it otherwise.
    /// Returns whether the user now likes the post.
    pub fn toggle_like(&mut self, user_id: &str) -> bool {
        if let Some(pos) = self.liked_user_ids.iter().position(|u| u == user_id) {
            self.liked_user_ids.remove(pos);
            false
        } else {
            self.liked_user_ids.push(user_id.to_string());
            true
        }
    }
}
