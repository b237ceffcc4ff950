use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only algorithm tokens may be signed with.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token signing and verification failures.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Header names an algorithm other than [`SIGNING_ALGORITHM`]
    #[error("Unexpected signing method: {0:?}")]
    UnexpectedAlgorithm(Algorithm),

    #[error("Token has expired")]
    Expired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Invalid token signature")]
    InvalidSignature,

    /// Signature is fine but the payload does not carry the expected claims
    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),

    #[error("Invalid jwt token: {0}")]
    Malformed(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::ImmatureSignature => TokenError::NotYetValid,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::Json(err) => TokenError::InvalidClaims(err.to_string()),
            ErrorKind::MissingRequiredClaim(claim) => {
                TokenError::InvalidClaims(format!("missing required claim '{}'", claim))
            }
            _ => TokenError::Malformed(e.to_string()),
        }
    }
}

/// Claims carried by every token this service issues and accepts.
///
/// `iat` and `exp` are optional on the way in; when `exp` is present it is
/// enforced.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Issued at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration time (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Creates claims valid for `expiration_hours` from now.
    pub fn new(subject: &str, username: &str, role: &str, expiration_hours: i64) -> Self {
        let now = Timestamp::now();
        let exp = now.as_second() + SignedDuration::from_hours(expiration_hours).as_secs();

        Self {
            sub: subject.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            iat: Some(now.as_second()),
            exp: Some(exp),
        }
    }
}

/// Signs a token for the given identity.
///
/// # Example
/// ```
/// use user_api::utils::jwt::generate_token;
///
/// let token = generate_token("u1", "alice", "admin", "secret", 1).unwrap();
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn generate_token(
    subject: &str,
    username: &str,
    role: &str,
    secret: &str,
    expiration_hours: i64,
) -> Result<String, TokenError> {
    let claims = Claims::new(subject, username, role, expiration_hours);

    encode(
        &Header::new(SIGNING_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verifies a token's algorithm, signature and expiry, then decodes its claims.
///
/// `exp` and `nbf` are checked without leeway when present. Audience and
/// issuer are not checked. Fails without panicking when any of `sub`,
/// `username` or `role` is missing or not a string.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let header = decode_header(token)?;
    if header.alg != SIGNING_ALGORITHM {
        return Err(TokenError::UnexpectedAlgorithm(header.alg));
    }

    let mut validation = Validation::new(SIGNING_ALGORITHM);
    validation.required_spec_claims.clear();
    validation.validate_aud = false;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(data.claims)
}
