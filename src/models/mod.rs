// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque entité correspond à une table PostgreSQL avec SeaORM.
//
// Liste des modules:
//   - health : Health check API
//   - profiles : Profils publics (nom affiché, avatar)
//   - courses : Cours du catalogue (publiés ou brouillons)
//   - sections : Sections du curriculum d'un cours
//   - lessons : Leçons d'une section
//   - enrollments : Inscriptions utilisateur ↔ cours (progression 0-100)
//   - course_reviews : Avis (note 1-5) laissés sur un cours
//   - dto : Vues agrégées renvoyées par l'API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - Les clés primaires sont des UUID générés côté service
//   - Les comptes sont gérés par le fournisseur d'identité, pas ici
//
// ============================================================================

pub mod health;
pub mod profiles;
pub mod courses;
pub mod sections;
pub mod lessons;
pub mod enrollments;
pub mod course_reviews;
pub mod dto;
