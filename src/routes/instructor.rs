use actix_web::{get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CourseDraft, PublishRequest};
use crate::services::authoring_service::{AuthoringService, WizardStep};

#[derive(Deserialize)]
pub struct StepQuery {
    pub step: WizardStep,
}

// Étape validée + étapes voisines (None aux extrémités)
#[derive(Serialize)]
pub struct StepResponse {
    pub step: WizardStep,
    pub valid: bool,
    pub previous_step: Option<WizardStep>,
    pub next_step: Option<WizardStep>,
}

/// GET /api/instructor/courses - Dashboard: tous mes cours + totaux
#[get("/courses")]
pub async fn dashboard(
    auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let dashboard = AuthoringService::instructor_courses(db.get_ref(), Some(&auth_user)).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// POST /api/instructor/courses - Crée un cours depuis le brouillon complet
#[post("/courses")]
pub async fn create_course(
    auth_user: AuthUser,
    body: web::Json<CourseDraft>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let course = AuthoringService::create_course(db.get_ref(), Some(&auth_user), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(course))
}

/// POST /api/instructor/courses/wizard/validate?step=details|curriculum|pricing
#[post("/courses/wizard/validate")]
pub async fn validate_step(
    query: web::Query<StepQuery>,
    body: web::Json<CourseDraft>,
) -> Result<HttpResponse, AppError> {
    let step = query.step;
    body.validate_step(step)?;

    Ok(HttpResponse::Ok().json(StepResponse {
        step,
        valid: true,
        previous_step: step.previous(),
        next_step: step.next(),
    }))
}

/// PUT /api/instructor/courses/{id}/publish - Publier / dépublier
#[put("/courses/{id}/publish")]
pub async fn publish_course(
    auth_user: AuthUser,
    path: web::Path<Uuid>,
    body: web::Json<PublishRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let course = AuthoringService::set_published(
        db.get_ref(),
        Some(&auth_user),
        path.into_inner(),
        body.published,
    )
    .await?;

    Ok(HttpResponse::Ok().json(course))
}

pub fn instructor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/instructor")
            .service(dashboard)
            .service(create_course)
            .service(validate_step)
            .service(publish_course),
    );
}

#[cfg(test)]
mod tests {
    use crate::config::test_config;
    use crate::models::courses;
    use crate::routes::configure_routes;
    use crate::utils::jwt;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn bearer(user_id: Uuid) -> (&'static str, String) {
        let token = jwt::generate_token(user_id, Some("Ada Lovelace"), &test_config().jwt_secret).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_dashboard_requires_token() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/instructor/courses").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_empty_dashboard() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<courses::Model>::new()])
            .into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/instructor/courses")
            .insert_header(bearer(Uuid::new_v4()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_courses"], 0);
        assert_eq!(body["average_rating"], 0.0);
    }

    #[actix_web::test]
    async fn test_wizard_step_advances() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/instructor/courses/wizard/validate?step=details")
            .set_json(serde_json::json!({
                "title": "Rust for beginners",
                "category": "Programming",
                "level": "Beginner"
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["valid"], true);
        assert_eq!(body["previous_step"], serde_json::Value::Null);
        assert_eq!(body["next_step"], "curriculum");
    }

    #[actix_web::test]
    async fn test_last_wizard_step_points_back() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/instructor/courses/wizard/validate?step=pricing")
            .set_json(serde_json::json!({ "price": "19.99" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["previous_step"], "curriculum");
        assert_eq!(body["next_step"], serde_json::Value::Null);
    }

    #[actix_web::test]
    async fn test_wizard_step_reports_failing_step() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/instructor/courses/wizard/validate?step=pricing")
            .set_json(serde_json::json!({ "title": "Rust", "price": "-5" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Pricing: Price must be greater than or equal to 0");
    }

    #[actix_web::test]
    async fn test_publish_foreign_course_is_404() {
        let owner = Uuid::new_v4();
        let c = crate::services::test_fixtures::course("Rust", owner);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![c.clone()]])
            .into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(test_config()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/instructor/courses/{}/publish", c.id))
            .insert_header(bearer(Uuid::new_v4()))
            .set_json(serde_json::json!({ "published": false }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
