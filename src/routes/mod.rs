pub mod courses;
pub mod enrollments;
pub mod health;
pub mod instructor;

use actix_web::web;

use crate::error::AppError;

// Corps JSON / query string illisibles: même format d'erreur que les services
fn bad_request(message: String) -> actix_web::Error {
    AppError::Validation(message).into()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err.to_string())))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err.to_string())));

    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .configure(courses::courses_routes)
            .configure(enrollments::enrollments_routes)
            .configure(instructor::instructor_routes),
    );
}
