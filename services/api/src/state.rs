//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    credentials::PasswordHasher,
    models::{
        Coordinator, Department, HomepageImage, OfficerCredential, Program, RegisteredStudent,
        StudentReport,
    },
    repositories::{Repository, memory::MemoryRepository, postgres::PgStore},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub departments: Arc<dyn Repository<Department>>,
    pub coordinators: Arc<dyn Repository<Coordinator>>,
    pub students: Arc<dyn Repository<RegisteredStudent>>,
    pub officers: Arc<dyn Repository<OfficerCredential>>,
    pub programs: Arc<dyn Repository<Program>>,
    pub homepage_images: Arc<dyn Repository<HomepageImage>>,
    pub student_reports: Arc<dyn Repository<StudentReport>>,
    pub hasher: PasswordHasher,
}

impl AppState {
    /// State backed by PostgreSQL; every resource shares the pool
    pub fn postgres(pool: PgPool, hasher: PasswordHasher) -> Self {
        let store = Arc::new(PgStore::new(pool));

        Self {
            departments: store.clone(),
            coordinators: store.clone(),
            students: store.clone(),
            officers: store.clone(),
            programs: store.clone(),
            homepage_images: store.clone(),
            student_reports: store,
            hasher,
        }
    }

    /// State backed by empty in-process stores
    pub fn in_memory(hasher: PasswordHasher) -> Self {
        Self {
            departments: Arc::new(MemoryRepository::<Department>::new()),
            coordinators: Arc::new(MemoryRepository::<Coordinator>::new()),
            students: Arc::new(MemoryRepository::<RegisteredStudent>::new()),
            officers: Arc::new(MemoryRepository::<OfficerCredential>::new()),
            programs: Arc::new(MemoryRepository::<Program>::new()),
            homepage_images: Arc::new(MemoryRepository::<HomepageImage>::new()),
            student_reports: Arc::new(MemoryRepository::<StudentReport>::new()),
            hasher,
        }
    }
}
