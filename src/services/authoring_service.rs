/*
Création de cours par un instructeur (formulaire en 3 étapes)

  1. Details     → titre, catégorie, niveau
  2. Curriculum  → sections et leçons
  3. Pricing     → prix, publication

Le front envoie le brouillon complet; chaque étape peut aussi être validée
seule (POST /instructor/courses/wizard/validate?step=...).
*/

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CourseDetail, CourseDraft, CourseSummary, InstructorDashboard};
use crate::models::{courses, lessons, sections};
use crate::services::course_service::CourseService;

pub const LEVELS: [&str; 4] = ["Beginner", "Intermediate", "Advanced", "All Levels"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Details,
    Curriculum,
    Pricing,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [WizardStep::Details, WizardStep::Curriculum, WizardStep::Pricing];

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Details => Some(WizardStep::Curriculum),
            WizardStep::Curriculum => Some(WizardStep::Pricing),
            WizardStep::Pricing => None,
        }
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Details => None,
            WizardStep::Curriculum => Some(WizardStep::Details),
            WizardStep::Pricing => Some(WizardStep::Curriculum),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Details => "Course Details",
            WizardStep::Curriculum => "Curriculum",
            WizardStep::Pricing => "Pricing",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("{step}: {message}")]
pub struct StepError {
    pub step: WizardStep,
    pub message: String,
}

impl StepError {
    fn new(step: WizardStep, message: impl Into<String>) -> Self {
        StepError {
            step,
            message: message.into(),
        }
    }
}

impl From<StepError> for AppError {
    fn from(err: StepError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl CourseDraft {
    /// Règles propres à une étape (champs requis, valeurs permises)
    pub fn validate_step(&self, step: WizardStep) -> Result<(), StepError> {
        match step {
            WizardStep::Details => {
                if self.title.trim().is_empty() {
                    return Err(StepError::new(step, "Title is required"));
                }
                if self.category.trim().is_empty() {
                    return Err(StepError::new(step, "Category is required"));
                }
                if !LEVELS.contains(&self.level.as_str()) {
                    return Err(StepError::new(
                        step,
                        format!("Level must be one of: {}", LEVELS.join(", ")),
                    ));
                }
            }
            WizardStep::Curriculum => {
                if self.curriculum.is_empty() {
                    return Err(StepError::new(step, "Add at least one section"));
                }
                for (i, section) in self.curriculum.iter().enumerate() {
                    if section.title.trim().is_empty() {
                        return Err(StepError::new(step, format!("Section {} needs a title", i + 1)));
                    }
                    if section.lessons.is_empty() {
                        return Err(StepError::new(step, format!("Section {} has no lessons", i + 1)));
                    }
                    if let Some(j) = section.lessons.iter().position(|l| l.title.trim().is_empty()) {
                        return Err(StepError::new(
                            step,
                            format!("Lesson {} of section {} needs a title", j + 1, i + 1),
                        ));
                    }
                }
            }
            WizardStep::Pricing => {
                let price = self
                    .price
                    .ok_or_else(|| StepError::new(step, "Price is required"))?;
                if price < Decimal::ZERO {
                    return Err(StepError::new(step, "Price must be greater than or equal to 0"));
                }
                if self.original_price.is_some_and(|p| p < Decimal::ZERO) {
                    return Err(StepError::new(step, "Original price must be greater than or equal to 0"));
                }
            }
        }
        Ok(())
    }

    /// Toutes les étapes dans l'ordre; renvoie la première en échec
    pub fn validate_all(&self) -> Result<(), StepError> {
        WizardStep::ALL
            .iter()
            .try_for_each(|step| self.validate_step(*step))
    }
}

pub struct AuthoringService;

impl AuthoringService {
    /// Crée le cours, ses sections et ses leçons dans une seule transaction
    pub async fn create_course(
        db: &DatabaseConnection,
        session: Option<&AuthUser>,
        draft: CourseDraft,
    ) -> Result<CourseDetail, AppError> {
        let user = session.ok_or(AppError::AuthRequired)?;

        draft.validate_all()?;
        draft.validate()?;

        let now = Utc::now();
        let course_id = Uuid::new_v4();
        let (section_rows, lesson_rows) = curriculum_rows(course_id, &draft, now);

        let new_course = courses::ActiveModel {
            id: Set(course_id),
            title: Set(draft.title.trim().to_string()),
            subtitle: Set(draft.subtitle.clone()),
            description: Set(draft.description.clone()),
            instructor_id: Set(user.user_id),
            category: Set(draft.category.clone()),
            level: Set(draft.level.clone()),
            price: Set(draft.price.unwrap_or(Decimal::ZERO)),
            original_price: Set(draft.original_price),
            image_url: Set(draft.image_url.clone()),
            duration: Set(draft.duration.clone()),
            language: Set(draft.language.clone()),
            is_published: Set(draft.publish),
            is_bestseller: Set(false),
            is_new: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let txn = db.begin().await?;
        new_course.insert(&txn).await?;
        sections::Entity::insert_many(section_rows).exec(&txn).await?;
        lessons::Entity::insert_many(lesson_rows).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(%course_id, instructor_id = %user.user_id, published = draft.publish, "course created");

        CourseService::get_course(db, course_id, Some(user)).await
    }

    /// Publie ou dépublie un cours de l'instructeur connecté
    pub async fn set_published(
        db: &DatabaseConnection,
        session: Option<&AuthUser>,
        course_id: Uuid,
        published: bool,
    ) -> Result<CourseSummary, AppError> {
        let user = session.ok_or(AppError::AuthRequired)?;

        // Un cours d'un autre instructeur est traité comme inexistant
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .filter(|c| c.instructor_id == user.user_id)
            .ok_or_else(|| AppError::not_found("Course"))?;

        let mut active: courses::ActiveModel = course.into();
        active.is_published = Set(published);
        active.updated_at = Set(Utc::now());
        let updated = active.update(db).await?;

        let mut summaries = CourseService::summarize_all(db, vec![updated]).await?;
        summaries.pop().ok_or_else(|| AppError::not_found("Course"))
    }

    /// Dashboard instructeur: tous ses cours (brouillons compris) + totaux
    pub async fn instructor_courses(
        db: &DatabaseConnection,
        session: Option<&AuthUser>,
    ) -> Result<InstructorDashboard, AppError> {
        let user = session.ok_or(AppError::AuthRequired)?;

        let owned = courses::Entity::find()
            .filter(courses::Column::InstructorId.eq(user.user_id))
            .order_by_desc(courses::Column::CreatedAt)
            .all(db)
            .await?;

        let courses = CourseService::summarize_all(db, owned).await?;
        Ok(dashboard(courses))
    }
}

fn dashboard(courses: Vec<CourseSummary>) -> InstructorDashboard {
    let rated: Vec<f64> = courses
        .iter()
        .filter(|c| c.review_count > 0)
        .map(|c| c.rating)
        .collect();
    let average_rating = if rated.is_empty() {
        0.0
    } else {
        rated.iter().sum::<f64>() / rated.len() as f64
    };

    InstructorDashboard {
        total_courses: courses.len(),
        published_courses: courses.iter().filter(|c| c.is_published).count(),
        total_students: courses.iter().map(|c| c.student_count).sum(),
        average_rating,
        courses,
    }
}

/// Lignes à insérer; order_index = position dans le brouillon
fn curriculum_rows(
    course_id: Uuid,
    draft: &CourseDraft,
    now: chrono::DateTime<Utc>,
) -> (Vec<sections::ActiveModel>, Vec<lessons::ActiveModel>) {
    let mut section_rows = Vec::with_capacity(draft.curriculum.len());
    let mut lesson_rows = Vec::new();

    for (section_index, section) in draft.curriculum.iter().enumerate() {
        let section_id = Uuid::new_v4();
        section_rows.push(sections::ActiveModel {
            id: Set(section_id),
            course_id: Set(course_id),
            title: Set(section.title.trim().to_string()),
            description: Set(section.description.clone()),
            order_index: Set(section_index as i32),
            created_at: Set(now),
            updated_at: Set(now),
        });

        for (lesson_index, lesson) in section.lessons.iter().enumerate() {
            lesson_rows.push(lessons::ActiveModel {
                id: Set(Uuid::new_v4()),
                course_id: Set(course_id),
                section_id: Set(section_id),
                title: Set(lesson.title.trim().to_string()),
                description: Set(None),
                video_url: Set(lesson.video_url.clone()),
                duration: Set(lesson.duration.clone()),
                order_index: Set(lesson_index as i32),
                is_preview: Set(lesson.is_preview),
                created_at: Set(now),
                updated_at: Set(now),
            });
        }
    }

    (section_rows, lesson_rows)
}
