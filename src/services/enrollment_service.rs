use chrono::{DateTime, Utc};
use sea_orm::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{EnrolledCourse, EnrollmentStats, EnrollmentView};
use crate::models::{courses, enrollments};
use crate::services::aggregation;
use crate::services::course_service::CourseService;

pub struct EnrollmentService;

/// Inscriptions de l'utilisateur courant, déjà chargées.
/// Les recherches par cours se font en mémoire (quelques dizaines de lignes au plus).
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrollmentSet {
    pub enrollments: Vec<EnrollmentView>,
}

impl EnrollmentSet {
    pub fn is_enrolled(&self, course_id: Uuid) -> bool {
        self.enrollments.iter().any(|e| e.course_id == course_id)
    }

    pub fn get(&self, course_id: Uuid) -> Option<&EnrollmentView> {
        self.enrollments.iter().find(|e| e.course_id == course_id)
    }

    pub fn len(&self) -> usize {
        self.enrollments.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.enrollments.is_empty()
    }

    /// Compteurs du dashboard étudiant
    pub fn stats(&self) -> EnrollmentStats {
        let enrolled = self.len();
        let completed = self
            .enrollments
            .iter()
            .filter(|e| e.completed_at.is_some())
            .count();
        let in_progress = self
            .enrollments
            .iter()
            .filter(|e| e.completed_at.is_none() && e.progress > 0 && e.progress < 100)
            .count();
        let average_progress = if enrolled == 0 {
            0.0
        } else {
            let total: i64 = self.enrollments.iter().map(|e| e.progress as i64).sum();
            total as f64 / enrolled as f64
        };

        EnrollmentStats {
            enrolled,
            completed,
            in_progress,
            average_progress,
        }
    }
}

impl EnrollmentService {
    /// Inscriptions de l'utilisateur, les plus récentes d'abord.
    /// Visiteur anonyme: ensemble vide, aucune requête.
    pub async fn fetch(
        db: &DatabaseConnection,
        session: Option<&AuthUser>,
    ) -> Result<EnrollmentSet, AppError> {
        let Some(user) = session else {
            return Ok(EnrollmentSet::default());
        };

        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user.user_id))
            .order_by_desc(enrollments::Column::EnrolledAt)
            .all(db)
            .await?;

        if rows.is_empty() {
            return Ok(EnrollmentSet::default());
        }

        // Cours + instructeurs en 2 requêtes
        let course_ids: Vec<Uuid> = rows
            .iter()
            .map(|e| e.course_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let courses_by_id: HashMap<Uuid, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let instructor_ids: Vec<Uuid> = courses_by_id
            .values()
            .map(|c| c.instructor_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let instructors = CourseService::profiles_by_id(db, instructor_ids).await?;

        let enrollments = rows
            .into_iter()
            .map(|row| {
                let course = courses_by_id.get(&row.course_id).map(|c| EnrolledCourse {
                    id: c.id,
                    title: c.title.clone(),
                    image_url: c.image_url.clone(),
                    duration: c.duration.clone(),
                    instructor_name: aggregation::instructor_name(instructors.get(&c.instructor_id)),
                });

                EnrollmentView {
                    id: row.id,
                    user_id: row.user_id,
                    course_id: row.course_id,
                    enrolled_at: row.enrolled_at,
                    progress: row.progress,
                    completed_at: row.completed_at,
                    last_accessed: row.last_accessed,
                    course,
                }
            })
            .collect();

        Ok(EnrollmentSet { enrollments })
    }

    /// Inscrit l'utilisateur à un cours publié, puis recharge ses inscriptions.
    ///
    /// La vérification "déjà inscrit" et l'insertion sont deux allers-retours:
    /// deux requêtes simultanées peuvent passer la vérification. C'est l'index
    /// UNIQUE (user_id, course_id) qui tranche, et sa violation est renvoyée
    /// comme `AlreadyEnrolled` (voir `enroll_conflict`).
    pub async fn enroll(
        db: &DatabaseConnection,
        session: Option<&AuthUser>,
        course_id: Uuid,
    ) -> Result<EnrollmentSet, AppError> {
        let user = session.ok_or(AppError::AuthRequired)?;

        // 1. Le cours doit exister et être publié
        let course = courses::Entity::find_by_id(course_id).one(db).await?;
        if !course.is_some_and(|c| c.is_published) {
            return Err(AppError::not_found("Course"));
        }

        // 2. Déjà inscrit ? (juste avant l'insertion)
        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user.user_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .one(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::AlreadyEnrolled);
        }

        // 3. Insertion avec progress = 0
        let new_enrollment = enrollments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.user_id),
            course_id: Set(course_id),
            enrolled_at: Set(Utc::now()),
            progress: Set(0),
            completed_at: Set(None),
            last_accessed: Set(None),
        };
        new_enrollment.insert(db).await.map_err(enroll_conflict)?;

        tracing::info!(user_id = %user.user_id, %course_id, "user enrolled");

        Self::fetch(db, Some(user)).await
    }

    /// Met à jour la progression d'une inscription de l'utilisateur.
    /// La progression n'est pas forcée à être croissante: un appelant peut la baisser.
    pub async fn update_progress(
        db: &DatabaseConnection,
        session: Option<&AuthUser>,
        enrollment_id: Uuid,
        progress: i32,
    ) -> Result<EnrollmentSet, AppError> {
        let user = session.ok_or(AppError::AuthRequired)?;

        if !(0..=100).contains(&progress) {
            return Err(AppError::Validation(format!(
                "Progress must be between 0 and 100 (got {})",
                progress
            )));
        }

        let enrollment = enrollments::Entity::find_by_id(enrollment_id)
            .one(db)
            .await?
            .filter(|e| e.user_id == user.user_id)
            .ok_or_else(|| AppError::not_found("Enrollment"))?;

        progress_update(enrollment, progress, Utc::now())
            .update(db)
            .await?;

        if progress >= 100 {
            tracing::info!(user_id = %user.user_id, %enrollment_id, "course completed");
        }

        Self::fetch(db, Some(user)).await
    }
}

/// Erreur d'insertion d'une inscription: seule la violation de l'index UNIQUE
/// (user_id, course_id) devient `AlreadyEnrolled`
fn enroll_conflict(err: DbErr) -> AppError {
    insert_error(err.sql_err(), err)
}

fn insert_error(sql_err: Option<SqlErr>, err: DbErr) -> AppError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyEnrolled,
        _ => AppError::from(err),
    }
}

/// Changements appliqués par une mise à jour de progression:
/// last_accessed toujours, completed_at seulement à 100%
fn progress_update(
    enrollment: enrollments::Model,
    progress: i32,
    now: DateTime<Utc>,
) -> enrollments::ActiveModel {
    let mut active: enrollments::ActiveModel = enrollment.into();
    active.progress = Set(progress);
    active.last_accessed = Set(Some(now));
    if progress >= 100 {
        active.completed_at = Set(Some(now));
    }
    active
}
