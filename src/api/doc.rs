use utoipa::OpenApi;

pub const USER_TAG: &str = "User";
pub const AUTH_TAG: &str = "Auth";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        description = "User management and token issuance",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::User,
        )
    ),
    tags(
        (name = USER_TAG, description = "User management endpoints"),
        (name = AUTH_TAG, description = "Login and token refresh endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
