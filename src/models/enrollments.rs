// ============================================================================
// MODÈLE : ENROLLMENTS
// ============================================================================
//
// Description:
//   Lien entre un étudiant et un cours, avec sa progression.
//
// Colonnes de la table enrollments:
//   - id (UUID, PRIMARY KEY)
//   - user_id (UUID, NOT NULL, FK vers profiles)
//   - course_id (UUID, NOT NULL, FK vers courses)
//   - enrolled_at (TIMESTAMPTZ, NOT NULL)
//   - progress (INTEGER, NOT NULL) - 0 à 100
//   - completed_at (TIMESTAMPTZ, NULL) - rempli quand progress atteint 100
//   - last_accessed (TIMESTAMPTZ, NULL)
//
// Points d'attention:
//   - UNIQUE (user_id, course_id): c'est la base qui empêche les doublons
//     quand deux requêtes "enroll" arrivent en même temps
//   - Les inscriptions ne sont jamais supprimées par l'étudiant
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTimeUtc,
    pub progress: i32,
    pub completed_at: Option<DateTimeUtc>,
    pub last_accessed: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::UserId",
        to = "super::profiles::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
