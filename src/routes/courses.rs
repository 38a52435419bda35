use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::Session;
use crate::models::dto::SearchParams;
use crate::services::course_service::CourseService;

const TRENDING_LIMIT: usize = 3;

/// GET /api/courses - Catalogue des cours publiés
#[get("")]
pub async fn list_courses(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let courses = CourseService::list_published(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(courses))
}

/// GET /api/courses/search?q=&category=&level=&min_price=&max_price=&min_rating=
#[get("/search")]
pub async fn search_courses(
    params: web::Query<SearchParams>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    params.validate()?;

    let courses = CourseService::search(db.get_ref(), &params.q, &params.filters()).await?;
    Ok(HttpResponse::Ok().json(courses))
}

/// GET /api/courses/categories - Catégories distinctes du catalogue
#[get("/categories")]
pub async fn list_categories(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let courses = CourseService::list_published(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(CourseService::categories(&courses)))
}

/// GET /api/courses/trending - Nouveautés et bestsellers
#[get("/trending")]
pub async fn trending_courses(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let courses = CourseService::list_published(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(CourseService::trending(&courses, TRENDING_LIMIT)))
}

/// GET /api/courses/{id} - Détail (session optionnelle: l'instructeur voit ses brouillons)
#[get("/{id}")]
pub async fn get_course(
    path: web::Path<Uuid>,
    session: Session,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let course = CourseService::get_course(db.get_ref(), path.into_inner(), session.as_ref()).await?;
    Ok(HttpResponse::Ok().json(course))
}

// Les routes fixes avant /{id}
pub fn courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .service(list_courses)
            .service(search_courses)
            .service(list_categories)
            .service(trending_courses)
            .service(get_course),
    );
}
