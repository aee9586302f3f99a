use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::chat_client::ChatClient;
use crate::models::{ContactForm, Enrollment, Learning, Skill, SkillPost, SkillProgress};
use crate::resources::{Resource, ResourceService};
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each field is its own `FromRef` substate, so a handler asks for exactly
/// the service it needs, e.g. `State<ResourceService<Skill>>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub contacts: ResourceService<ContactForm>,
    pub enrollments: ResourceService<Enrollment>,
    pub learnings: ResourceService<Learning>,
    pub skills: ResourceService<Skill>,
    pub posts: ResourceService<SkillPost>,
    pub progress: ResourceService<SkillProgress>,
    pub chat: ChatClient,
}

impl AppState {
    /// Services backed by one Postgres table per record family.
    pub fn postgres(pool: &PgPool, chat: ChatClient) -> Self {
        fn service<T: Resource>(pool: &PgPool) -> ResourceService<T> {
            let store: Arc<dyn DocumentStore<T>> =
                Arc::new(PgDocumentStore::<T>::new(pool.clone()));
            ResourceService::new(store)
        }

        Self {
            contacts: service(pool),
            enrollments: service(pool),
            learnings: service(pool),
            skills: service(pool),
            posts: service(pool),
            progress: service(pool),
            chat,
        }
    }

    /// Services backed by in-process memory; contents are lost on restart.
    pub fn in_memory(chat: ChatClient) -> Self {
        fn service<T: Resource>() -> ResourceService<T> {
            let store: Arc<dyn DocumentStore<T>> = Arc::new(MemoryDocumentStore::<T>::new());
            ResourceService::new(store)
        }

        Self {
            contacts: service(),
            enrollments: service(),
            learnings: service(),
            skills: service(),
            posts: service(),
            progress: service(),
            chat,
        }
    }
}
