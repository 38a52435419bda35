use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::utils::jwt;

/// Utilisateur authentifié (identité fournie par le fournisseur externe)
/// Utilisé comme extracteur dans les routes protégées
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Session passée explicitement aux services: None = visiteur anonyme
pub type Session = Option<AuthUser>;

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthUser, AppError> {
    // 1. Header Authorization absent = pas de session
    let auth_header = req
        .headers()
        .get("Authorization")
        .ok_or(AppError::AuthRequired)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::InvalidToken("invalid Authorization header".to_string()))?;

    // 2. Format attendu: "Bearer <token>"
    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::InvalidToken("expected: Bearer <token>".to_string())
    })?;

    // 3. Secret partagé avec le fournisseur d'identité
    let config = req
        .app_data::<web::Data<AppConfig>>()
        .ok_or_else(|| AppError::transient("Missing application configuration"))?;

    let claims = jwt::verify_token(token, &config.jwt_secret).map_err(AppError::InvalidToken)?;

    Ok(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        full_name: claims.user_metadata.full_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config as config;
    use actix_web::test::TestRequest;

    #[test]
    fn test_missing_header_requires_auth() {
        let req = TestRequest::default()
            .app_data(web::Data::new(config()))
            .to_http_request();

        assert!(matches!(extract_user(&req), Err(AppError::AuthRequired)));
    }

    #[test]
    fn test_bearer_token_is_decoded() {
        let user_id = Uuid::new_v4();
        let token = jwt::generate_token(user_id, Some("Grace Hopper"), "test-secret").unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(config()))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        let user = extract_user(&req).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.full_name.as_deref(), Some("Grace Hopper"));
    }

    #[test]
    fn test_wrong_scheme_is_rejected() {
        let req = TestRequest::default()
            .app_data(web::Data::new(config()))
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();

        assert!(matches!(extract_user(&req), Err(AppError::InvalidToken(_))));
    }
}
