//! PostgreSQL store
//!
//! One generic [`Repository`] implementation drives every entity; each
//! entity describes its table through [`Table`]. Listing SQL takes the filter
//! parameters first and a trailing `LIMIT` parameter (`NULL` means no limit),
//! so `list` and `find_first` share a statement. Update SQL takes the id as
//! `$1` and keeps stored values for absent fields through `COALESCE`; a
//! nullable column takes a "set" flag followed by its new value instead.

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use serde_json::Value;
use sqlx::{
    PgPool, Postgres, Row,
    migrate::Migrator,
    postgres::{PgArguments, PgRow},
    query::Query,
    types::Json,
};

use super::{Record, Repository};
use crate::models::{
    Coordinator, CoordinatorChanges, CoordinatorFilter, Department, DepartmentChanges,
    HomepageImage, HomepageImageChanges, HomepageImageFilter, OfficerChanges, OfficerCredential,
    OfficerFilter, Program, ProgramChanges, RegisteredStudent, StudentChanges, StudentFilter,
    StudentReport, StudentReportChanges,
};

/// Schema migrations for the service
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// How a record type maps onto its table
pub trait Table: Record {
    const NAME: &'static str;
    /// Filtered, ordered select ending in `LIMIT $n`
    const SELECT: &'static str;
    const INSERT: &'static str;
    const UPDATE: &'static str;

    fn bind_filter<'q>(filter: &'q Self::Filter, query: PgQuery<'q>) -> PgQuery<'q>;
    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
    fn bind_changes<'q>(changes: &'q Self::Changes, query: PgQuery<'q>) -> PgQuery<'q>;
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error>;
}

/// PostgreSQL-backed store shared by every resource
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn select<R: Table>(&self, filter: &R::Filter, limit: Option<i64>) -> DatabaseResult<Vec<R>> {
        let rows = R::bind_filter(filter, sqlx::query(R::SELECT))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        rows.iter()
            .map(R::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::from_query)
    }
}

#[async_trait]
impl<R: Table> Repository<R> for PgStore {
    async fn list(&self, filter: &R::Filter) -> DatabaseResult<Vec<R>> {
        self.select(filter, None).await
    }

    async fn find(&self, id: &str) -> DatabaseResult<Option<R>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", R::NAME);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        row.as_ref()
            .map(R::from_row)
            .transpose()
            .map_err(DatabaseError::from_query)
    }

    async fn find_first(&self, filter: &R::Filter) -> DatabaseResult<Option<R>> {
        let mut rows = self.select(filter, Some(1)).await?;
        Ok(rows.pop())
    }

    async fn create(&self, record: &R) -> DatabaseResult<R> {
        let row = record
            .bind_insert(sqlx::query(R::INSERT))
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        R::from_row(&row).map_err(DatabaseError::from_query)
    }

    async fn update(&self, id: &str, changes: &R::Changes) -> DatabaseResult<R> {
        let row = R::bind_changes(changes, sqlx::query(R::UPDATE).bind(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?
            .ok_or(DatabaseError::NotFound)?;

        R::from_row(&row).map_err(DatabaseError::from_query)
    }

    async fn delete(&self, id: &str) -> DatabaseResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", R::NAME);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}

impl Table for Department {
    const NAME: &'static str = "departments";
    const SELECT: &'static str = "SELECT * FROM departments ORDER BY name ASC LIMIT $1";
    const INSERT: &'static str = r#"
        INSERT INTO departments (id, name, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
    "#;
    const UPDATE: &'static str = r#"
        UPDATE departments
        SET name = COALESCE($2, name),
            is_active = COALESCE($3, is_active),
            updated_at = now()
        WHERE id = $1
        RETURNING *
    "#;

    fn bind_filter<'q>(_filter: &'q (), query: PgQuery<'q>) -> PgQuery<'q> {
        query
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.id)
            .bind(&self.name)
            .bind(self.is_active)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_changes<'q>(changes: &'q DepartmentChanges, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(changes.name.as_deref()).bind(changes.is_active)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Department {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Table for Coordinator {
    const NAME: &'static str = "coordinators";
    const SELECT: &'static str = r#"
        SELECT * FROM coordinators
        WHERE (NOT $1 OR is_active)
        ORDER BY name ASC
        LIMIT $2
    "#;
    const INSERT: &'static str = r#"
        INSERT INTO coordinators
            (id, name, email, phone, department, position, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
    "#;
    const UPDATE: &'static str = r#"
        UPDATE coordinators
        SET name = COALESCE($2, name),
            email = COALESCE($3, email),
            phone = COALESCE($4, phone),
            department = COALESCE($5, department),
            position = COALESCE($6, position),
            is_active = COALESCE($7, is_active),
            updated_at = now()
        WHERE id = $1
        RETURNING *
    "#;

    fn bind_filter<'q>(filter: &'q CoordinatorFilter, query: PgQuery<'q>) -> PgQuery<'q> {
        query.bind(filter.active_only)
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.id)
            .bind(&self.name)
            .bind(&self.email)
            .bind(&self.phone)
            .bind(&self.department)
            .bind(&self.position)
            .bind(self.is_active)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_changes<'q>(changes: &'q CoordinatorChanges, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(changes.name.as_deref())
            .bind(changes.email.as_deref())
            .bind(changes.phone.as_deref())
            .bind(changes.department.as_deref())
            .bind(changes.position.as_deref())
            .bind(changes.is_active)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Coordinator {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            department: row.try_get("department")?,
            position: row.try_get("position")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Table for RegisteredStudent {
    const NAME: &'static str = "registered_students";
    const SELECT: &'static str = r#"
        SELECT * FROM registered_students
        WHERE ($1::text IS NULL OR email = $1)
          AND ($2::text IS NULL OR enrollment_number = $2)
          AND (NOT $3 OR is_active)
        ORDER BY created_at DESC
        LIMIT $4
    "#;
    const INSERT: &'static str = r#"
        INSERT INTO registered_students
            (id, name, email, phone, department, year, enrollment_number, password_hash,
             is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
    "#;
    const UPDATE: &'static str = r#"
        UPDATE registered_students
        SET name = COALESCE($2, name),
            email = COALESCE($3, email),
            phone = COALESCE($4, phone),
            department = COALESCE($5, department),
            year = COALESCE($6, year),
            enrollment_number = COALESCE($7, enrollment_number),
            is_active = COALESCE($8, is_active),
            password_hash = COALESCE($9, password_hash),
            updated_at = now()
        WHERE id = $1
        RETURNING *
    "#;

    fn bind_filter<'q>(filter: &'q StudentFilter, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(filter.email.as_deref())
            .bind(filter.enrollment_number.as_deref())
            .bind(filter.active_only)
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.id)
            .bind(&self.name)
            .bind(&self.email)
            .bind(&self.phone)
            .bind(&self.department)
            .bind(&self.year)
            .bind(&self.enrollment_number)
            .bind(self.password_hash.as_deref())
            .bind(self.is_active)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_changes<'q>(changes: &'q StudentChanges, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(changes.name.as_deref())
            .bind(changes.email.as_deref())
            .bind(changes.phone.as_deref())
            .bind(changes.department.as_deref())
            .bind(changes.year.as_deref())
            .bind(changes.enrollment_number.as_deref())
            .bind(changes.is_active)
            .bind(changes.password_hash.as_deref())
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(RegisteredStudent {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            department: row.try_get("department")?,
            year: row.try_get("year")?,
            enrollment_number: row.try_get("enrollment_number")?,
            password_hash: row.try_get("password_hash")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Table for OfficerCredential {
    const NAME: &'static str = "officer_credentials";
    const SELECT: &'static str = r#"
        SELECT * FROM officer_credentials
        WHERE ($1::text IS NULL OR username = $1)
          AND ($2::text IS NULL OR password_hash = $2)
          AND (NOT $3 OR is_active)
        ORDER BY name ASC
        LIMIT $4
    "#;
    const INSERT: &'static str = r#"
        INSERT INTO officer_credentials
            (id, username, password_hash, name, email, role, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
    "#;
    const UPDATE: &'static str = r#"
        UPDATE officer_credentials
        SET username = COALESCE($2, username),
            name = COALESCE($3, name),
            email = COALESCE($4, email),
            role = COALESCE($5, role),
            is_active = COALESCE($6, is_active),
            updated_at = now()
        WHERE id = $1
        RETURNING *
    "#;

    fn bind_filter<'q>(filter: &'q OfficerFilter, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(filter.username.as_deref())
            .bind(filter.password_hash.as_deref())
            .bind(filter.active_only)
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.id)
            .bind(&self.username)
            .bind(&self.password_hash)
            .bind(&self.name)
            .bind(&self.email)
            .bind(&self.role)
            .bind(self.is_active)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_changes<'q>(changes: &'q OfficerChanges, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(changes.username.as_deref())
            .bind(changes.name.as_deref())
            .bind(changes.email.as_deref())
            .bind(changes.role.as_deref())
            .bind(changes.is_active)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(OfficerCredential {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: row.try_get("role")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Table for Program {
    const NAME: &'static str = "programs";
    const SELECT: &'static str = "SELECT * FROM programs ORDER BY start_date DESC LIMIT $1";
    const INSERT: &'static str = r#"
        INSERT INTO programs
            (id, title, description, program_type, start_date, end_date, max_participants,
             registration_open, department, coordinator, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
    "#;
    const UPDATE: &'static str = r#"
        UPDATE programs
        SET title = COALESCE($2, title),
            description = CASE WHEN $3 THEN $4 ELSE description END,
            program_type = COALESCE($5, program_type),
            start_date = COALESCE($6, start_date),
            end_date = COALESCE($7, end_date),
            max_participants = COALESCE($8, max_participants),
            registration_open = COALESCE($9, registration_open),
            department = COALESCE($10, department),
            coordinator = COALESCE($11, coordinator),
            updated_at = now()
        WHERE id = $1
        RETURNING *
    "#;

    fn bind_filter<'q>(_filter: &'q (), query: PgQuery<'q>) -> PgQuery<'q> {
        query
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.id)
            .bind(&self.title)
            .bind(self.description.as_deref())
            .bind(&self.program_type)
            .bind(self.start_date)
            .bind(self.end_date)
            .bind(self.max_participants)
            .bind(self.registration_open)
            .bind(&self.department)
            .bind(&self.coordinator)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_changes<'q>(changes: &'q ProgramChanges, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(changes.title.as_deref())
            .bind(changes.description.is_some())
            .bind(changes.description.as_ref().and_then(|d| d.as_deref()))
            .bind(changes.program_type.as_deref())
            .bind(changes.start_date)
            .bind(changes.end_date)
            .bind(changes.max_participants)
            .bind(changes.registration_open)
            .bind(changes.department.as_deref())
            .bind(changes.coordinator.as_deref())
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Program {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            program_type: row.try_get("program_type")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            max_participants: row.try_get("max_participants")?,
            registration_open: row.try_get("registration_open")?,
            department: row.try_get("department")?,
            coordinator: row.try_get("coordinator")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Table for HomepageImage {
    const NAME: &'static str = "homepage_images";
    const SELECT: &'static str = r#"
        SELECT * FROM homepage_images
        WHERE ($1::text IS NULL OR image_type = $1)
          AND (NOT $2 OR is_active)
        ORDER BY display_order ASC
        LIMIT $3
    "#;
    const INSERT: &'static str = r#"
        INSERT INTO homepage_images
            (id, url, image_type, display_order, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
    "#;
    const UPDATE: &'static str = r#"
        UPDATE homepage_images
        SET url = COALESCE($2, url),
            image_type = COALESCE($3, image_type),
            display_order = COALESCE($4, display_order),
            is_active = COALESCE($5, is_active),
            updated_at = now()
        WHERE id = $1
        RETURNING *
    "#;

    fn bind_filter<'q>(filter: &'q HomepageImageFilter, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(filter.image_type.as_deref())
            .bind(filter.active_only)
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.id)
            .bind(&self.url)
            .bind(self.image_type.as_str())
            .bind(self.order)
            .bind(self.is_active)
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_changes<'q>(changes: &'q HomepageImageChanges, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(changes.url.as_deref())
            .bind(changes.image_type.map(|side| side.as_str()))
            .bind(changes.order)
            .bind(changes.is_active)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let image_type: String = row.try_get("image_type")?;

        Ok(HomepageImage {
            id: row.try_get("id")?,
            url: row.try_get("url")?,
            image_type: image_type
                .parse()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            order: row.try_get("display_order")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl Table for StudentReport {
    const NAME: &'static str = "student_reports";
    const SELECT: &'static str = "SELECT * FROM student_reports ORDER BY updated_at DESC LIMIT $1";
    const INSERT: &'static str = r#"
        INSERT INTO student_reports
            (id, student_id, student_name, department, year, activities, coordinated_programs,
             created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
    "#;
    const UPDATE: &'static str = r#"
        UPDATE student_reports
        SET student_id = COALESCE($2, student_id),
            student_name = COALESCE($3, student_name),
            department = COALESCE($4, department),
            year = COALESCE($5, year),
            activities = COALESCE($6, activities),
            coordinated_programs = COALESCE($7, coordinated_programs),
            updated_at = now()
        WHERE id = $1
        RETURNING *
    "#;

    fn bind_filter<'q>(_filter: &'q (), query: PgQuery<'q>) -> PgQuery<'q> {
        query
    }

    fn bind_insert<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.id)
            .bind(&self.student_id)
            .bind(&self.student_name)
            .bind(&self.department)
            .bind(&self.year)
            .bind(Json(&self.activities))
            .bind(Json(&self.coordinated_programs))
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_changes<'q>(changes: &'q StudentReportChanges, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(changes.student_id.as_deref())
            .bind(changes.student_name.as_deref())
            .bind(changes.department.as_deref())
            .bind(changes.year.as_deref())
            .bind(changes.activities.as_ref().map(Json))
            .bind(changes.coordinated_programs.as_ref().map(Json))
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let Json(activities): Json<Vec<Value>> = row.try_get("activities")?;
        let Json(coordinated_programs): Json<Vec<Value>> = row.try_get("coordinated_programs")?;

        Ok(StudentReport {
            id: row.try_get("id")?,
            student_id: row.try_get("student_id")?,
            student_name: row.try_get("student_name")?,
            department: row.try_get("department")?,
            year: row.try_get("year")?,
            activities,
            coordinated_programs,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
