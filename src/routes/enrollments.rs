use actix_web::{get, patch, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::{AuthUser, Session};
use crate::models::dto::{EnrollRequest, EnrollmentStats, EnrollmentView, UpdateProgressRequest};
use crate::services::enrollment_service::{EnrollmentService, EnrollmentSet};

// Réponse commune: les inscriptions + les compteurs du tableau de bord
#[derive(Serialize)]
pub struct EnrollmentsResponse {
    pub enrollments: Vec<EnrollmentView>,
    pub stats: EnrollmentStats,
}

impl From<EnrollmentSet> for EnrollmentsResponse {
    fn from(set: EnrollmentSet) -> Self {
        let stats = set.stats();
        EnrollmentsResponse {
            enrollments: set.enrollments,
            stats,
        }
    }
}

#[derive(Serialize)]
pub struct MembershipResponse {
    pub enrolled: bool,
    pub enrollment: Option<EnrollmentView>,
}

/// GET /api/enrollments - Inscriptions de l'utilisateur (vide si anonyme)
#[get("")]
pub async fn get_enrollments(
    session: Session,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let set = EnrollmentService::fetch(db.get_ref(), session.as_ref()).await?;
    Ok(HttpResponse::Ok().json(EnrollmentsResponse::from(set)))
}

/// POST /api/enrollments - S'inscrire à un cours publié
#[post("")]
pub async fn enroll(
    session: Session,
    body: web::Json<EnrollRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let set = EnrollmentService::enroll(db.get_ref(), session.as_ref(), body.course_id).await?;
    Ok(HttpResponse::Created().json(EnrollmentsResponse::from(set)))
}

/// PATCH /api/enrollments/{id}/progress - Progression 0-100 (100 = terminé)
#[patch("/{id}/progress")]
pub async fn update_progress(
    auth_user: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProgressRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    body.validate()?;

    let set = EnrollmentService::update_progress(
        db.get_ref(),
        Some(&auth_user),
        path.into_inner(),
        body.progress,
    )
    .await?;

    Ok(HttpResponse::Ok().json(EnrollmentsResponse::from(set)))
}

/// GET /api/enrollments/course/{course_id} - L'utilisateur suit-il ce cours ?
#[get("/course/{course_id}")]
pub async fn get_membership(
    session: Session,
    path: web::Path<Uuid>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let course_id = path.into_inner();
    let set = EnrollmentService::fetch(db.get_ref(), session.as_ref()).await?;

    Ok(HttpResponse::Ok().json(MembershipResponse {
        enrolled: set.is_enrolled(course_id),
        enrollment: set.get(course_id).cloned(),
    }))
}

pub fn enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/enrollments")
            .service(get_enrollments)
            .service(enroll)
            .service(update_progress)
            .service(get_membership),
    );
}

#[cfg(test)]
mod tests {
    use crate::config::test_config;
    use crate::routes::configure_routes;
    use crate::services::test_fixtures::*;
    use crate::utils::jwt;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn bearer(user_id: Uuid) -> (&'static str, String) {
        let token = jwt::generate_token(user_id, Some("Student"), &test_config().jwt_secret).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_anonymous_gets_empty_set() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/enrollments").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["enrollments"].as_array().map(Vec::len), Some(0));
        assert_eq!(body["stats"]["enrolled"], 0);
        assert_eq!(body["stats"]["average_progress"], 0.0);
    }

    #[actix_web::test]
    async fn test_enroll_requires_session() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/enrollments")
            .set_json(serde_json::json!({ "course_id": Uuid::new_v4() }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_enroll_twice_is_conflict() {
        let user_id = Uuid::new_v4();
        let c = course("Rust", Uuid::new_v4());
        let course_id = c.id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![c]])
            .append_query_results([vec![enrollment(user_id, course_id, 10)]])
            .into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/enrollments")
            .insert_header(bearer(user_id))
            .set_json(serde_json::json!({ "course_id": course_id }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_progress_out_of_range_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/enrollments/{}/progress", Uuid::new_v4()))
            .insert_header(bearer(Uuid::new_v4()))
            .set_json(serde_json::json!({ "progress": 150 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_progress_without_token_is_401() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/enrollments/{}/progress", Uuid::new_v4()))
            .set_json(serde_json::json!({ "progress": 50 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_membership_lookup() {
        let user_id = Uuid::new_v4();
        let instructor = profile("Ada Lovelace");
        let c = course("Rust", instructor.id);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![enrollment(user_id, c.id, 40)]])
            .append_query_results([vec![c.clone()]])
            .append_query_results([vec![instructor]])
            .into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/enrollments/course/{}", c.id))
            .insert_header(bearer(user_id))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["enrolled"], true);
        assert_eq!(body["enrollment"]["progress"], 40);
        assert_eq!(body["enrollment"]["course"]["title"], "Rust");
    }
}
