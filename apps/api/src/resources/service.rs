use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::store::DocumentStore;

use super::{Lookup, Resource, UpdatePolicy};

/// Lifecycle of one record family against its store adapter.
pub struct ResourceService<T: Resource> {
    pub(super) store: Arc<dyn DocumentStore<T>>,
}

impl<T: Resource> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T: Resource> ResourceService<T> {
    pub fn new(store: Arc<dyn DocumentStore<T>>) -> Self {
        Self { store }
    }

    /// Persists `record`; the store assigns an id when the record has none.
    pub async fn create(&self, record: T) -> Result<T, AppError> {
        let saved = self.store.save(record).await?;
        info!("Created {} {}", T::NAME, saved.id().unwrap_or_default());
        Ok(saved)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Lookup<T>, AppError> {
        let lookup: Lookup<T> = self.store.find_by_id(id).await?.into();
        if !lookup.is_found() {
            debug!("{} {id} not found", T::NAME);
        }
        Ok(lookup)
    }

    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        Ok(self.store.find_all().await?)
    }

    /// Applies `T::UPDATE_POLICY` to the record stored under `id`.
    pub async fn update(&self, id: &str, mut incoming: T) -> Result<Lookup<T>, AppError> {
        match T::UPDATE_POLICY {
            UpdatePolicy::MergeFields(merge) => match self.store.find_by_id(id).await? {
                Some(mut existing) => {
                    merge(&mut existing, incoming);
                    existing.set_id(id.to_string());
                    let saved = self.store.save(existing).await?;
                    info!("Merged update into {} {id}", T::NAME);
                    Ok(Lookup::Found(saved))
                }
                None => {
                    incoming.set_id(id.to_string());
                    let saved = self.store.save(incoming).await?;
                    info!("Update of missing {} {id} inserted a new record", T::NAME);
                    Ok(Lookup::Found(saved))
                }
            },
            UpdatePolicy::ForcedOverwrite => {
                incoming.set_id(id.to_string());
                let saved = self.store.save(incoming).await?;
                info!("Overwrote {} {id}", T::NAME);
                Ok(Lookup::Found(saved))
            }
            UpdatePolicy::GuardedOverwrite => {
                if self.store.find_by_id(id).await?.is_none() {
                    debug!("Skipped update of missing {} {id}", T::NAME);
                    return Ok(Lookup::NotFound);
                }
                incoming.set_id(id.to_string());
                let saved = self.store.save(incoming).await?;
                info!("Overwrote {} {id}", T::NAME);
                Ok(Lookup::Found(saved))
            }
            UpdatePolicy::Immutable => Err(AppError::Conflict(format!(
                "{} records cannot be modified once submitted",
                T::NAME
            ))),
        }
    }

    /// Removes the record. Deleting a missing id succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store.delete_by_id(id).await?;
        info!("Deleted {} {id}", T::NAME);
        Ok(())
    }

    pub(super) async fn list_by(&self, field: &str, value: &str) -> Result<Vec<T>, AppError> {
        Ok(self.store.find_by_field(field, value).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::models::learning::CourseModule;
    use crate::models::{
        Comment, ContactForm, Enrollment, Learning, Skill, SkillPost, SkillProgress,
    };
    use crate::store::{Document, MemoryDocumentStore};

    fn service<T: Resource>() -> ResourceService<T> {
        ResourceService::new(Arc::new(MemoryDocumentStore::<T>::new()))
    }

    /// Creates `input`, reads it back by the assigned id, and compares the
    /// wire form field by field.
    async fn assert_create_get_round_trip<T: Resource>(input: T) {
        let svc = service::<T>();
        let created = svc.create(input.clone()).await.unwrap();
        let id = created.id().unwrap().to_string();
        let fetched = svc.get_by_id(&id).await.unwrap().into_option().unwrap();

        let mut expected = input;
        expected.set_id(id);
        assert_eq!(
            serde_json::to_value(&fetched).unwrap(),
            serde_json::to_value(&expected).unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input_with_new_id() {
        let svc = service::<Enrollment>();
        let input = Enrollment {
            full_name: Some("A".into()),
            course_id: Some("C1".into()),
            ..Default::default()
        };

        let created = svc.create(input.clone()).await.unwrap();
        let id = created.id.clone().unwrap();
        let fetched = svc.get_by_id(&id).await.unwrap();

        let mut expected = input;
        expected.id = Some(id);
        assert_eq!(fetched, Lookup::Found(expected));
    }

    #[tokio::test]
    async fn test_contact_round_trips_through_create_and_get() {
        assert_create_get_round_trip(ContactForm {
            name: Some("Kamal".into()),
            email: Some("kamal@example.com".into()),
            subject: Some("Hello".into()),
            message: Some("Is the pottery course still open?".into()),
            ..Default::default()
        })
        .await;
    }

    #[tokio::test]
    async fn test_learning_round_trips_with_course_content() {
        assert_create_get_round_trip(Learning {
            course_id: Some("RUST-101".into()),
            course_name: Some("Rust 101".into()),
            course_fee: Some(150.5),
            description: Some("Intro".into()),
            duration: Some("6 weeks".into()),
            job_opportunities: Some("Systems".into()),
            course_content: Some(vec![
                CourseModule {
                    module: "Ownership".into(),
                    topics: vec!["moves".into(), "borrows".into()],
                },
                CourseModule {
                    module: "Traits".into(),
                    topics: vec![],
                },
            ]),
            ..Default::default()
        })
        .await;
    }

    #[tokio::test]
    async fn test_skill_round_trips_with_date_time_and_tags() {
        assert_create_get_round_trip(Skill {
            name: Some("Nimal".into()),
            email_address: Some("nimal@example.com".into()),
            skill_title: Some("Woodworking".into()),
            skill_description: Some("Furniture".into()),
            experience_level: Some("Expert".into()),
            how_you_use_it: Some("Weekends".into()),
            tags: vec!["craft".into(), "hands-on".into()],
            availability_for_collaboration: true,
            date: NaiveDate::from_ymd_opt(2025, 3, 14),
            time: NaiveTime::from_hms_opt(9, 30, 0),
            ..Default::default()
        })
        .await;
    }

    #[tokio::test]
    async fn test_post_round_trips_with_comments_and_likes() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(10, 15, 0));
        assert_create_get_round_trip(SkillPost {
            media_urls: vec!["https://cdn.example.com/a.png".into()],
            description: Some("First bowl".into()),
            created_at: at,
            updated_at: at,
            user_id: Some(7),
            username: Some("nimal".into()),
            liked_user_ids: vec!["u2".into()],
            comments: vec![Comment {
                id: Some("c1".into()),
                content: Some("Nice".into()),
                commenter: Some("u2".into()),
                timestamp: at,
            }],
            ..Default::default()
        })
        .await;
    }

    #[tokio::test]
    async fn test_progress_round_trips_every_field() {
        assert_create_get_round_trip(SkillProgress {
            user_id: Some("u1".into()),
            course_id: Some("RUST-101".into()),
            completed_modules: vec!["m1".into(), "m2".into()],
            total_modules: 4,
            progress_percentage: 50.0,
            certificate_eligible: true,
            badges_earned: vec!["starter".into()],
            feedback: Some("Going well".into()),
            ..Default::default()
        })
        .await;
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let svc = service::<Skill>();
        assert_eq!(svc.get_by_id("nope").await.unwrap(), Lookup::NotFound);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found_and_second_delete_is_noop() {
        let svc = service::<ContactForm>();
        let created = svc
            .create(ContactForm {
                name: Some("Kamal".into()),
                message: Some("Hi".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        svc.delete(&id).await.unwrap();
        assert!(!svc.get_by_id(&id).await.unwrap().is_found());
        svc.delete(&id).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_merge_update_preserves_unspecified_fields() {
        let svc = service::<Enrollment>();
        let created = svc
            .create(Enrollment {
                full_name: Some("A".into()),
                course_id: Some("C1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        svc.update(
            &id,
            Enrollment {
                full_name: Some("B".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .into_option()
        .unwrap();

        let stored = svc.get_by_id(&id).await.unwrap().into_option().unwrap();
        assert_eq!(stored.full_name.as_deref(), Some("B"));
        assert_eq!(stored.course_id.as_deref(), Some("C1"));
    }

    #[tokio::test]
    async fn test_merge_update_of_missing_learning_inserts_under_path_id() {
        let svc = service::<Learning>();
        let updated = svc
            .update(
                "course-42",
                Learning {
                    id: Some("body-id".into()),
                    course_name: Some("Rust".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_found());
        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.as_deref(), Some("course-42"));
        assert_eq!(all[0].course_name.as_deref(), Some("Rust"));
    }

    #[tokio::test]
    async fn test_forced_overwrite_uses_path_id_and_drops_omitted_fields() {
        let svc = service::<Skill>();
        let created = svc
            .create(Skill {
                skill_title: Some("Carving".into()),
                experience_level: Some("Expert".into()),
                tags: vec!["wood".into()],
                ..Default::default()
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        svc.update(
            &id,
            Skill {
                id: Some("someone-else".into()),
                skill_title: Some("Whittling".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .into_option()
        .unwrap();

        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.as_deref(), Some(id.as_str()));
        assert_eq!(all[0].skill_title.as_deref(), Some("Whittling"));
        assert_eq!(all[0].experience_level, None);
        assert!(all[0].tags.is_empty());
        assert_eq!(svc.get_by_id("someone-else").await.unwrap(), Lookup::NotFound);
    }

    #[tokio::test]
    async fn test_forced_overwrite_of_post_keeps_path_id() {
        let svc = service::<SkillPost>();
        let created = svc
            .create(SkillPost {
                description: Some("v1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        let updated = svc
            .update(
                &id,
                SkillPost {
                    id: Some("other".into()),
                    description: Some("v2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .into_option()
            .unwrap();
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_guarded_overwrite_of_missing_id_creates_nothing() {
        let svc = service::<SkillProgress>();
        let result = svc
            .update(
                "ghost",
                SkillProgress {
                    user_id: Some("u1".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(result, Lookup::NotFound);
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_guarded_overwrite_replaces_existing() {
        let svc = service::<SkillProgress>();
        let created = svc
            .create(SkillProgress {
                user_id: Some("u1".into()),
                completed_modules: vec!["m1".into()],
                total_modules: 4,
                ..Default::default()
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        svc.update(
            &id,
            SkillProgress {
                user_id: Some("u1".into()),
                completed_modules: vec!["m1".into(), "m2".into()],
                total_modules: 4,
                progress_percentage: 50.0,
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .into_option()
        .unwrap();

        let stored = svc.get_by_id(&id).await.unwrap().into_option().unwrap();
        assert_eq!(stored.completed_modules, vec!["m1", "m2"]);
        assert_eq!(stored.progress_percentage, 50.0);
    }

    #[tokio::test]
    async fn test_immutable_records_reject_updates() {
        let svc = service::<ContactForm>();
        let created = svc.create(ContactForm::default()).await.unwrap();
        let id = created.id.unwrap();

        let err = svc.update(&id, ContactForm::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
