use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `lat`/`lng` may also be sent as numeric strings.
#[derive(ToSchema)]
pub struct PlaceRequest { pub name: String, pub description: String, pub lat: f64, pub lng: f64 }

#[derive(ToSchema)]
pub struct PlaceDoc { pub id: i32, pub name: String, pub description: String, pub lat: f64, pub lng: f64 }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct SignupRequest { pub name: String, pub username: String, pub password: String, pub confirmPassword: Option<String> }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::places::add,
        crate::routes::places::update,
        crate::routes::places::list,
        crate::routes::places::delete,
        crate::routes::accounts::signup,
        crate::routes::accounts::login,
    ),
    components(
        schemas(
            HealthResponse,
            PlaceRequest,
            PlaceDoc,
            SignupRequest,
            LoginRequest,
            crate::routes::places::AddPlaceResponse,
            crate::routes::places::MessageResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "places"),
        (name = "accounts")
    )
)]
pub struct ApiDoc;
