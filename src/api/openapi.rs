//! OpenAPI document served through Swagger UI.

use utoipa::OpenApi;

use crate::api::handlers::{location_handler, user_handler};
use crate::domain::UserResponse;
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Usuarios service",
        version = "0.1.0",
        description = "User registration, profile maintenance, credential checks and region/commune lookups",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::login,
        location_handler::list_regions,
        location_handler::list_communes,
    ),
    components(
        schemas(
            UserResponse,
            MessageResponse,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::LoginRequest,
            user_handler::LoginResponse,
        )
    ),
    tags(
        (name = "Users", description = "User management"),
        (name = "Locations", description = "Region and commune lookups")
    )
)]
pub struct ApiDoc;
