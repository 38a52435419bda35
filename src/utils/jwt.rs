use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Métadonnées ajoutées par le fournisseur d'identité
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,       // id du profil
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    pub exp: i64,        // expiration timestamp
}

/// Vérifie et décode un JWT émis par le fournisseur d'identité
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Le fournisseur ajoute une audience ("authenticated") qu'on ne vérifie pas ici
    validation.validate_aud = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
        .map(|data| data.claims)
        .map_err(|e| e.to_string())
}

/// Génère un token comme le ferait le fournisseur (tests uniquement)
#[cfg(test)]
pub fn generate_token(user_id: Uuid, full_name: Option<&str>, secret: &str) -> Result<String, String> {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(1))
        .ok_or("Failed to calculate expiration")?
        .timestamp();

    let claims = Claims {
        sub: user_id,
        email: Some("student@example.com".to_string()),
        user_metadata: UserMetadata {
            full_name: full_name.map(str::to_string),
        },
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
        .map_err(|e| format!("Failed to generate token: {}", e))
}
