use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr, TransactionError,
    TransactionTrait,
};

use advising_domain::advising::{AdvisingStatus, CourseEntry};
use advising_domain::course::CatalogKind;
use advising_portal_schema::{
    advising_history, course_catalog, course_plan, courses, prerequisites, sessions, temp_users,
    users,
};

use crate::domain::repository::{
    AdvisingRepository, CourseRepository, PendingSignupRepository, SessionRepository,
    UserRepository,
};
use crate::domain::types::{
    AdvisingRecord, AdvisingRevision, AdvisingSheet, AdvisingSheetSummary, AdvisingSummary,
    Course, NewAdvisingRecord, OtpTicket, PendingSignup, Profile, Session, User,
};
use crate::error::PortalError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PortalError> {
        let model = users::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), PortalError> {
        users::ActiveModel {
            email: Set(user.email.clone()),
            password: Set(user.password_hash.clone()),
            first_name: Set(user.profile.first_name.clone()),
            last_name: Set(user.profile.last_name.clone()),
            department: Set(user.profile.department.clone()),
            degree: Set(user.profile.degree.clone()),
            uin: Set(user.profile.uin.clone()),
            is_admin: Set(user.is_admin),
            is_verified: Set(user.is_verified),
            otp: Set(user.login_otp.as_ref().map(|t| t.code.clone())),
            otp_expiration: Set(user.login_otp.as_ref().map(|t| t.expires_at.timestamp_millis())),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn set_login_otp(&self, email: &str, ticket: &OtpTicket) -> Result<(), PortalError> {
        users::Entity::update_many()
            .col_expr(users::Column::Otp, Expr::value(ticket.code.clone()))
            .col_expr(
                users::Column::OtpExpiration,
                Expr::value(ticket.expires_at.timestamp_millis()),
            )
            .filter(users::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .context("set login otp")?;
        Ok(())
    }

    async fn clear_login_otp(&self, email: &str) -> Result<(), PortalError> {
        users::Entity::update_many()
            .col_expr(users::Column::Otp, Expr::value(Option::<String>::None))
            .col_expr(users::Column::OtpExpiration, Expr::value(Option::<i64>::None))
            .filter(users::Column::Email.eq(email))
            .exec(&self.db)
            .await
            .context("clear login otp")?;
        Ok(())
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, PortalError> {
        let Some(model) = users::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await
            .context("find user for password update")?
        else {
            return Ok(false);
        };
        let mut active: users::ActiveModel = model.into();
        active.password = Set(password_hash.to_owned());
        active.update(&self.db).await.context("update password")?;
        Ok(true)
    }

    async fn update_profile(&self, email: &str, profile: &Profile) -> Result<bool, PortalError> {
        let Some(model) = users::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await
            .context("find user for profile update")?
        else {
            return Ok(false);
        };
        let mut active: users::ActiveModel = model.into();
        active.first_name = Set(profile.first_name.clone());
        active.last_name = Set(profile.last_name.clone());
        active.department = Set(profile.department.clone());
        active.degree = Set(profile.degree.clone());
        active.uin = Set(profile.uin.clone());
        active.update(&self.db).await.context("update profile")?;
        Ok(true)
    }
}

fn user_from_model(model: users::Model) -> User {
    let login_otp = match (model.otp, model.otp_expiration) {
        (Some(code), Some(ms)) => {
            DateTime::from_timestamp_millis(ms).map(|expires_at| OtpTicket { code, expires_at })
        }
        _ => None,
    };
    User {
        email: model.email,
        password_hash: model.password,
        profile: Profile {
            first_name: model.first_name,
            last_name: model.last_name,
            department: model.department,
            degree: model.degree,
            uin: model.uin,
        },
        is_admin: model.is_admin,
        is_verified: model.is_verified,
        login_otp,
    }
}

// ── Pending signup repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPendingSignupRepository {
    pub db: DatabaseConnection,
}

impl PendingSignupRepository for DbPendingSignupRepository {
    async fn upsert(&self, pending: &PendingSignup) -> Result<(), PortalError> {
        let model = temp_users::ActiveModel {
            email: Set(pending.email.clone()),
            password: Set(pending.password_hash.clone()),
            first_name: Set(pending.profile.first_name.clone()),
            last_name: Set(pending.profile.last_name.clone()),
            department: Set(pending.profile.department.clone()),
            degree: Set(pending.profile.degree.clone()),
            uin: Set(pending.profile.uin.clone()),
            created_at: Set(pending.created_at),
        };
        temp_users::Entity::insert(model)
            .on_conflict(
                OnConflict::column(temp_users::Column::Email)
                    .update_columns([
                        temp_users::Column::Password,
                        temp_users::Column::FirstName,
                        temp_users::Column::LastName,
                        temp_users::Column::Department,
                        temp_users::Column::Degree,
                        temp_users::Column::Uin,
                        temp_users::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert pending signup")?;
        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<PendingSignup>, PortalError> {
        let model = temp_users::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await
            .context("find pending signup")?;
        Ok(model.map(|m| PendingSignup {
            email: m.email,
            password_hash: m.password,
            profile: Profile {
                first_name: m.first_name,
                last_name: m.last_name,
                department: m.department,
                degree: m.degree,
                uin: m.uin,
            },
            created_at: m.created_at,
        }))
    }

    async fn promote(&self, email: &str) -> Result<bool, PortalError> {
        let email = email.to_owned();
        let promoted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(pending) = temp_users::Entity::find_by_id(email.clone())
                        .one(txn)
                        .await?
                    else {
                        return Ok(false);
                    };
                    users::ActiveModel {
                        email: Set(pending.email),
                        password: Set(pending.password),
                        first_name: Set(pending.first_name),
                        last_name: Set(pending.last_name),
                        department: Set(pending.department),
                        degree: Set(pending.degree),
                        uin: Set(pending.uin),
                        is_admin: Set(false),
                        is_verified: Set(true),
                        otp: Set(None),
                        otp_expiration: Set(None),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;
                    temp_users::Entity::delete_by_id(email).exec(txn).await?;
                    Ok(true)
                })
            })
            .await
            .context("promote pending signup")?;
        Ok(promoted)
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &Session) -> Result<(), PortalError> {
        sessions::ActiveModel {
            id: Set(session.id.clone()),
            email: Set(session.email.clone()),
            is_admin: Set(session.is_admin),
            otp_verified: Set(session.otp_verified),
            expires_at: Set(session.expires_at),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn find_active(&self, id: &str) -> Result<Option<Session>, PortalError> {
        let model = sessions::Entity::find_by_id(id.to_owned())
            .filter(sessions::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
            .context("find active session")?;
        Ok(model.map(|m| Session {
            id: m.id,
            email: m.email,
            is_admin: m.is_admin,
            otp_verified: m.otp_verified,
            expires_at: m.expires_at,
        }))
    }

    async fn delete(&self, id: &str) -> Result<(), PortalError> {
        sessions::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await
            .context("delete session")?;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, PortalError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.db)
            .await
            .context("purge expired sessions")?;
        Ok(result.rows_affected)
    }
}

// ── Advising repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdvisingRepository {
    pub db: DatabaseConnection,
}

impl DbAdvisingRepository {
    async fn load_record(
        &self,
        model: advising_history::Model,
    ) -> Result<AdvisingRecord, PortalError> {
        let prerequisites = prerequisites::Entity::find()
            .filter(prerequisites::Column::AdvisingHistoryId.eq(model.id))
            .order_by_asc(prerequisites::Column::Position)
            .all(&self.db)
            .await
            .context("load prerequisites")?
            .into_iter()
            .map(|p| CourseEntry {
                level: p.course_level,
                course_name: p.course_name,
            })
            .collect();
        let course_plan = course_plan::Entity::find()
            .filter(course_plan::Column::AdvisingHistoryId.eq(model.id))
            .order_by_asc(course_plan::Column::Position)
            .all(&self.db)
            .await
            .context("load course plan")?
            .into_iter()
            .map(|p| CourseEntry {
                level: p.course_level,
                course_name: p.course_name,
            })
            .collect();

        Ok(AdvisingRecord {
            id: model.id,
            status: parse_status(&model.status)?,
            student_email: model.student_email,
            term: model.term,
            date_submitted: model.date_submitted,
            last_term: model.last_term,
            last_gpa: model.last_gpa,
            prerequisites,
            course_plan,
            admin_message: model.admin_message,
        })
    }
}

impl AdvisingRepository for DbAdvisingRepository {
    async fn find_by_term(
        &self,
        student_email: &str,
        term: &str,
    ) -> Result<Option<AdvisingRecord>, PortalError> {
        let model = advising_history::Entity::find()
            .filter(advising_history::Column::StudentEmail.eq(student_email))
            .filter(advising_history::Column::Term.eq(term))
            .one(&self.db)
            .await
            .context("find advising record by term")?;
        match model {
            Some(model) => Ok(Some(self.load_record(model).await?)),
            None => Ok(None),
        }
    }

    async fn taken_courses(
        &self,
        student_email: &str,
        exclude_term: Option<&str>,
        exclude_id: Option<i32>,
    ) -> Result<Vec<String>, PortalError> {
        let mut query = course_plan::Entity::find()
            .select_only()
            .column(course_plan::Column::CourseName)
            .join(
                sea_orm::JoinType::InnerJoin,
                course_plan::Relation::AdvisingHistory.def(),
            )
            .filter(advising_history::Column::StudentEmail.eq(student_email));
        if let Some(term) = exclude_term {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    advising_history::Entity,
                    advising_history::Column::Term,
                ))))
                .ne(term.to_lowercase()),
            );
        }
        if let Some(id) = exclude_id {
            query = query.filter(advising_history::Column::Id.ne(id));
        }
        let names: Vec<String> = query
            .into_tuple()
            .all(&self.db)
            .await
            .context("list taken courses")?;
        Ok(names)
    }

    async fn create(&self, record: &NewAdvisingRecord) -> Result<i32, PortalError> {
        let new = record.clone();
        let result = self
            .db
            .transaction::<_, i32, DbErr>(|txn| {
                Box::pin(async move {
                    let parent = advising_history::ActiveModel {
                        student_email: Set(new.student_email),
                        term: Set(new.term),
                        date_submitted: Set(new.date_submitted),
                        status: Set(AdvisingStatus::Pending.as_str().to_owned()),
                        last_term: Set(new.last_term),
                        last_gpa: Set(new.last_gpa),
                        admin_message: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    insert_entries(txn, parent.id, &new.prerequisites, &new.course_plan).await?;
                    Ok(parent.id)
                })
            })
            .await;

        match result {
            Ok(id) => Ok(id),
            Err(e) if is_unique_violation(&e) => Err(PortalError::DuplicateTerm(record.term.clone())),
            Err(e) => Err(anyhow::Error::new(e)
                .context("create advising record")
                .into()),
        }
    }

    async fn revise(&self, id: i32, revision: &AdvisingRevision) -> Result<(), PortalError> {
        let revision = revision.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    advising_history::ActiveModel {
                        id: Set(id),
                        date_submitted: Set(revision.date_submitted),
                        last_term: Set(revision.last_term),
                        last_gpa: Set(revision.last_gpa),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    prerequisites::Entity::delete_many()
                        .filter(prerequisites::Column::AdvisingHistoryId.eq(id))
                        .exec(txn)
                        .await?;
                    course_plan::Entity::delete_many()
                        .filter(course_plan::Column::AdvisingHistoryId.eq(id))
                        .exec(txn)
                        .await?;
                    insert_entries(txn, id, &revision.prerequisites, &revision.course_plan).await
                })
            })
            .await
            .context("revise advising record")?;
        Ok(())
    }

    async fn list_by_student(
        &self,
        student_email: &str,
    ) -> Result<Vec<AdvisingSummary>, PortalError> {
        let models = advising_history::Entity::find()
            .filter(advising_history::Column::StudentEmail.eq(student_email))
            .order_by_desc(advising_history::Column::DateSubmitted)
            .all(&self.db)
            .await
            .context("list advising history")?;
        models
            .into_iter()
            .map(|m| {
                Ok(AdvisingSummary {
                    id: m.id,
                    status: parse_status(&m.status)?,
                    term: m.term,
                    date_submitted: m.date_submitted,
                })
            })
            .collect()
    }

    async fn list_sheets(&self) -> Result<Vec<AdvisingSheetSummary>, PortalError> {
        let rows = advising_history::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(advising_history::Column::DateSubmitted)
            .all(&self.db)
            .await
            .context("list advising sheets")?;
        rows.into_iter()
            .map(|(sheet, student)| {
                let (first_name, last_name, uin) = student_names(student);
                Ok(AdvisingSheetSummary {
                    id: sheet.id,
                    status: parse_status(&sheet.status)?,
                    student_email: sheet.student_email,
                    first_name,
                    last_name,
                    uin,
                    term: sheet.term,
                    date_submitted: sheet.date_submitted,
                })
            })
            .collect()
    }

    async fn find_sheet(&self, id: i32) -> Result<Option<AdvisingSheet>, PortalError> {
        let row = advising_history::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find advising sheet")?;
        let Some((sheet, student)) = row else {
            return Ok(None);
        };
        let (first_name, last_name, uin) = student_names(student);
        Ok(Some(AdvisingSheet {
            record: self.load_record(sheet).await?,
            first_name,
            last_name,
            uin,
        }))
    }

    async fn decide(
        &self,
        id: i32,
        status: AdvisingStatus,
        message: &str,
    ) -> Result<bool, PortalError> {
        let Some(model) = advising_history::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find advising sheet for decision")?
        else {
            return Ok(false);
        };
        let mut active: advising_history::ActiveModel = model.into();
        active.status = Set(status.as_str().to_owned());
        active.admin_message = Set(Some(message.to_owned()));
        active.update(&self.db).await.context("decide advising sheet")?;
        Ok(true)
    }
}

async fn insert_entries<C: ConnectionTrait>(
    conn: &C,
    advising_history_id: i32,
    prerequisite_entries: &[CourseEntry],
    plan_entries: &[CourseEntry],
) -> Result<(), DbErr> {
    // insert_many rejects an empty batch.
    if !prerequisite_entries.is_empty() {
        prerequisites::Entity::insert_many(prerequisite_entries.iter().enumerate().map(
            |(i, e)| prerequisites::ActiveModel {
                advising_history_id: Set(advising_history_id),
                position: Set(i as i32),
                course_level: Set(e.level),
                course_name: Set(e.course_name.trim().to_owned()),
                ..Default::default()
            },
        ))
        .exec_without_returning(conn)
        .await?;
    }
    if !plan_entries.is_empty() {
        course_plan::Entity::insert_many(plan_entries.iter().enumerate().map(|(i, e)| {
            course_plan::ActiveModel {
                advising_history_id: Set(advising_history_id),
                position: Set(i as i32),
                course_level: Set(e.level),
                course_name: Set(e.course_name.trim().to_owned()),
                ..Default::default()
            }
        }))
        .exec_without_returning(conn)
        .await?;
    }
    Ok(())
}

fn is_unique_violation(err: &TransactionError<DbErr>) -> bool {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => {
            matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        }
    }
}

fn parse_status(raw: &str) -> Result<AdvisingStatus, PortalError> {
    raw.parse::<AdvisingStatus>()
        .map_err(|e| PortalError::Internal(anyhow!("corrupt advising status: {e}")))
}

/// Name columns for a sheet whose student row may have been removed.
fn student_names(student: Option<users::Model>) -> (String, String, String) {
    student
        .map(|u| (u.first_name, u.last_name, u.uin))
        .unwrap_or_default()
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn list(&self, kind: CatalogKind) -> Result<Vec<Course>, PortalError> {
        self.query(kind, false).await
    }

    async fn list_enabled(&self, kind: CatalogKind) -> Result<Vec<Course>, PortalError> {
        self.query(kind, true).await
    }

    async fn set_enabled(
        &self,
        kind: CatalogKind,
        id: i32,
        enabled: bool,
    ) -> Result<bool, PortalError> {
        match kind {
            CatalogKind::Prerequisite => {
                let Some(model) = courses::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .context("find course")?
                else {
                    return Ok(false);
                };
                let mut active: courses::ActiveModel = model.into();
                active.enabled = Set(enabled);
                active.update(&self.db).await.context("toggle course")?;
            }
            CatalogKind::Plan => {
                let Some(model) = course_catalog::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .context("find catalog course")?
                else {
                    return Ok(false);
                };
                let mut active: course_catalog::ActiveModel = model.into();
                active.enabled = Set(enabled);
                active
                    .update(&self.db)
                    .await
                    .context("toggle catalog course")?;
            }
        }
        Ok(true)
    }
}

impl DbCourseRepository {
    async fn query(&self, kind: CatalogKind, enabled_only: bool) -> Result<Vec<Course>, PortalError> {
        let courses = match kind {
            CatalogKind::Prerequisite => {
                let mut query = courses::Entity::find();
                if enabled_only {
                    query = query.filter(courses::Column::Enabled.eq(true));
                }
                query
                    .order_by_asc(courses::Column::Level)
                    .order_by_asc(courses::Column::CourseName)
                    .all(&self.db)
                    .await
                    .context("list courses")?
                    .into_iter()
                    .map(|m| Course {
                        id: m.id,
                        level: m.level,
                        course_name: m.course_name,
                        enabled: m.enabled,
                    })
                    .collect()
            }
            CatalogKind::Plan => {
                let mut query = course_catalog::Entity::find();
                if enabled_only {
                    query = query.filter(course_catalog::Column::Enabled.eq(true));
                }
                query
                    .order_by_asc(course_catalog::Column::Level)
                    .order_by_asc(course_catalog::Column::CourseName)
                    .all(&self.db)
                    .await
                    .context("list catalog courses")?
                    .into_iter()
                    .map(|m| Course {
                        id: m.id,
                        level: m.level,
                        course_name: m.course_name,
                        enabled: m.enabled,
                    })
                    .collect()
            }
        };
        Ok(courses)
    }
}
