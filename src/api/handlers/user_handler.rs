//! User handlers under `/api/v1/usuarios`.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::{ApiPath, ValidatedJson};
use crate::api::AppState;
use crate::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, USERS_BASE_PATH};
use crate::domain::validation::EMAIL_SHAPE;
use crate::domain::{NewUser, User, UserId, UserPatch, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{HalCollection, HalResource, MessageResponse};

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Must be omitted; identifiers are assigned by the store
    pub id: Option<UserId>,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Ana")]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Soto")]
    pub last_name: String,
    #[validate(custom(function = "email_address"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[validate(
        custom(function = "not_blank"),
        length(
            min = MIN_PASSWORD_LENGTH,
            max = MAX_PASSWORD_LENGTH,
            message = "Password length is outside the allowed range"
        )
    )]
    #[schema(example = "secret123", min_length = 6, max_length = 255)]
    pub password: String,
    #[serde(default)]
    #[schema(example = "+56 9 1234 5678")]
    pub phone: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Av. Siempre Viva 742")]
    pub address: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Metropolitana de Santiago")]
    pub region: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Providencia")]
    pub commune: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            id: req.id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            address: req.address,
            region: req.region,
            commune: req.commune,
        }
    }
}

/// Partial user update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(example = "+56 9 8765 4321")]
    pub phone: Option<String>,
    pub address: Option<String>,
    pub region: Option<String>,
    pub commune: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            address: req.address,
            region: req.region,
            commune: req.commune,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

/// Identity returned after a successful login
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = 1)]
    pub id: UserId,
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
}

impl From<User> for LoginResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            email: user.email,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn email_address(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if !EMAIL_SHAPE.is_match(value) {
        let mut err = ValidationError::new("email");
        err.message = Some("must be a well-formed email address".into());
        return Err(err);
    }
    Ok(())
}

fn user_href(id: UserId) -> String {
    format!("{}/{}", USERS_BASE_PATH, id)
}

fn user_resource(user: User) -> HalResource<UserResponse> {
    let href = user_href(user.id);
    HalResource::new(UserResponse::from(user))
        .with_link("self", href)
        .with_link("users", USERS_BASE_PATH)
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/login", post(login))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/usuarios",
    tag = "Users",
    responses(
        (status = 200, description = "Every user, ascending by id", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<HalCollection<HalResource<UserResponse>>>> {
    let users = state.user_service.list_users().await?;
    let items = users.into_iter().map(user_resource).collect();

    Ok(Json(
        HalCollection::new("users", items).with_link("self", USERS_BASE_PATH),
    ))
}

/// Get user by id
#[utoipa::path(
    get,
    path = "/api/v1/usuarios/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> AppResult<Json<HalResource<UserResponse>>> {
    let user = state
        .user_service
        .get_user(id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user_resource(user)))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/usuarios",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed, duplicate email or client-supplied id")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(
    StatusCode,
    [(header::HeaderName, String); 1],
    Json<HalResource<UserResponse>>,
)> {
    let user = state.user_service.create_user(payload.into()).await?;
    let location = user_href(user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user_resource(user)),
    ))
}

/// Partially update a user
#[utoipa::path(
    put,
    path = "/api/v1/usuarios/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<HalResource<UserResponse>>> {
    let user = state.user_service.update_user(id, payload.into()).await?;

    Ok(Json(user_resource(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/usuarios/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> AppResult<Json<HalResource<MessageResponse>>> {
    if !state.user_service.delete_user(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(
        HalResource::new(MessageResponse::new("User deleted"))
            .with_link("users", USERS_BASE_PATH),
    ))
}

/// Check credentials
#[utoipa::path(
    post,
    path = "/api/v1/usuarios/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse::from(user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            id: None,
            first_name: "Ana".to_string(),
            last_name: "Soto".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret123".to_string(),
            phone: String::new(),
            address: "Calle 1".to_string(),
            region: "Maule".to_string(),
            commune: "Talca".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_blank_address_is_rejected() {
        let req = CreateUserRequest {
            address: "   ".to_string(),
            ..valid_request()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("address"));
    }

    #[test]
    fn test_short_password_is_rejected() {
        let req = CreateUserRequest {
            password: "12345".to_string(),
            ..valid_request()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_password_bounds_match_domain_rule() {
        let at = |len: u64| CreateUserRequest {
            password: "a".repeat(len as usize),
            ..valid_request()
        };

        assert!(at(MIN_PASSWORD_LENGTH).validate().is_ok());
        assert!(at(MAX_PASSWORD_LENGTH).validate().is_ok());
        assert!(at(MIN_PASSWORD_LENGTH - 1).validate().is_err());
        assert!(at(MAX_PASSWORD_LENGTH + 1).validate().is_err());
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let req = CreateUserRequest {
            email: "ana@localhost".to_string(),
            ..valid_request()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_phone_defaults_to_empty() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "firstName": "Ana",
            "lastName": "Soto",
            "email": "ana@example.com",
            "password": "secret123",
            "address": "Calle 1",
            "region": "Maule",
            "commune": "Talca"
        }))
        .unwrap();
        assert_eq!(req.phone, "");
        assert!(req.id.is_none());
    }

    #[test]
    fn test_update_request_maps_present_fields_only() {
        let req: UpdateUserRequest =
            serde_json::from_value(serde_json::json!({ "phone": "+56 2 2222 2222" })).unwrap();
        let patch = UserPatch::from(req);
        assert_eq!(patch.phone.as_deref(), Some("+56 2 2222 2222"));
        assert!(patch.first_name.is_none());
        assert!(patch.password.is_none());
    }
}
