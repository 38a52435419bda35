// ============================================================================
// MODÈLE : COURSES
// ============================================================================
//
// Description:
//   Un cours du catalogue. Seuls les cours `is_published = true` sont
//   visibles publiquement; l'instructeur propriétaire voit aussi ses
//   brouillons.
//
// Colonnes de la table courses:
//   - id (UUID, PRIMARY KEY)
//   - instructor_id (UUID, NOT NULL, FK vers profiles)
//   - title, category, level, language (VARCHAR, NOT NULL)
//   - subtitle, description, image_url, duration (VARCHAR, NULL)
//   - price (NUMERIC, NOT NULL) - toujours >= 0
//   - original_price (NUMERIC, NULL) - prix barré pour les promotions
//   - is_published, is_bestseller, is_new (BOOLEAN, NOT NULL)
//   - created_at / updated_at (TIMESTAMPTZ, NOT NULL)
//
// Points d'attention:
//   - rating et student_count ne sont PAS stockés: ils sont calculés
//     depuis course_reviews et enrollments (voir services::aggregation)
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    pub category: String,
    pub level: String, // 'Beginner', 'Intermediate', 'Advanced', 'All Levels'
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub image_url: Option<String>,
    pub duration: Option<String>,
    pub language: String,
    pub is_published: bool,
    pub is_bestseller: bool,
    pub is_new: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::InstructorId",
        to = "super::profiles::Column::Id"
    )]
    Instructor,

    #[sea_orm(has_many = "super::sections::Entity")]
    Sections,

    #[sea_orm(has_many = "super::lessons::Entity")]
    Lessons,

    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,

    #[sea_orm(has_many = "super::course_reviews::Entity")]
    CourseReviews,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lessons.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::course_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseReviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
