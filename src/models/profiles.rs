// ============================================================================
// MODÈLE : PROFILES
// ============================================================================
//
// Description:
//   Profil public d'un utilisateur (étudiant ou instructeur).
//   L'id est le même que le `sub` du JWT émis par le fournisseur d'identité.
//
// Colonnes de la table profiles:
//   - id (UUID, PRIMARY KEY)
//   - username (VARCHAR, NULL)
//   - full_name (VARCHAR, NULL) - affiché comme nom d'instructeur
//   - avatar_url (VARCHAR, NULL)
//   - tier (VARCHAR, NOT NULL) - 'Free' ou 'Enterprise'
//   - created_at / updated_at (TIMESTAMPTZ, NULL)
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub tier: String, // 'Free', 'Enterprise'
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,

    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,

    #[sea_orm(has_many = "super::course_reviews::Entity")]
    CourseReviews,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
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
