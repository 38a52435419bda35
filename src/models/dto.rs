// Vues "à plat" renvoyées par l'API (après agrégation des relations)
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{course_reviews, lessons};

// Un cours tel qu'affiché dans les listes (cartes, recherche, dashboards)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    pub instructor_name: String,
    pub category: String,
    pub level: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub discount_percent: Option<u32>, // None = pas de badge
    pub image_url: Option<String>,
    pub duration: Option<String>,
    pub language: String,
    pub is_published: bool,
    pub is_bestseller: bool,
    pub is_new: bool,
    pub rating: f64,
    pub rating_label: String, // "New" si aucun avis
    pub student_count: usize,
    pub review_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Page détail d'un cours
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseSummary,
    pub instructor_avatar: Option<String>,
    pub sections: Vec<SectionView>,
    pub reviews: Vec<ReviewView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub lessons: Vec<lessons::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewer_name: String,
    pub reviewer_avatar: Option<String>,
}

impl ReviewView {
    pub fn new(review: course_reviews::Model, reviewer_name: String, reviewer_avatar: Option<String>) -> Self {
        Self {
            id: review.id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            reviewer_name,
            reviewer_avatar,
        }
    }
}

// Filtres optionnels de la recherche
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub level: Option<String>,
    pub price_range: Option<(Decimal, Decimal)>, // bornes inclusives
    pub min_rating: Option<f64>,                 // appliqué APRÈS agrégation
}

// Paramètres de GET /api/courses/search
#[derive(Debug, Deserialize, Validate)]
pub struct SearchParams {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub q: String,
    pub category: Option<String>,
    pub level: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub min_rating: Option<f64>,
}

impl SearchParams {
    /// Une seule borne de prix suffit: l'autre est ouverte
    pub fn filters(&self) -> SearchFilters {
        let price_range = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => Some((min.unwrap_or(Decimal::ZERO), max.unwrap_or(Decimal::MAX))),
        };

        SearchFilters {
            category: self.category.clone().filter(|c| !c.is_empty() && c != "all"),
            level: self.level.clone().filter(|l| !l.is_empty()),
            price_range,
            min_rating: self.min_rating,
        }
    }
}

// Le cours résumé attaché à une inscription
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrolledCourse {
    pub id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub duration: Option<String>,
    pub instructor_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub progress: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub course: Option<EnrolledCourse>, // None si le cours a été supprimé
}

// Statistiques du dashboard étudiant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentStats {
    pub enrolled: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub average_progress: f64,
}

#[derive(Deserialize)]
pub struct EnrollRequest {
    pub course_id: Uuid,
}

#[derive(Deserialize, Validate)]
pub struct UpdateProgressRequest {
    #[validate(range(min = 0, max = 100))]
    pub progress: i32,
}

#[derive(Deserialize)]
pub struct PublishRequest {
    pub published: bool,
}

// Dashboard instructeur
#[derive(Debug, Serialize)]
pub struct InstructorDashboard {
    pub total_courses: usize,
    pub published_courses: usize,
    pub total_students: usize,
    pub average_rating: f64, // moyenne sur les cours ayant au moins un avis
    pub courses: Vec<CourseSummary>,
}

// Brouillon du formulaire "Create course" (3 étapes)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CourseDraft {
    #[serde(default)]
    #[validate(length(max = 120))]
    pub title: String,
    #[validate(length(max = 200))]
    pub subtitle: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub image_url: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub curriculum: Vec<SectionDraft>,
    #[serde(default)]
    pub publish: bool,
}

fn default_language() -> String {
    "English".to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SectionDraft {
    #[validate(length(max = 120))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub lessons: Vec<LessonDraft>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LessonDraft {
    #[validate(length(max = 120))]
    pub title: String,
    pub duration: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub is_preview: bool,
}
