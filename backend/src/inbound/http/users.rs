//! Users API handlers.
//!
//! ```text
//! POST   /users        {"username":"ada","firstname":"Ada","lastname":"Lovelace"}
//! GET    /users/{id}
//! PUT    /users/{id}   full replacement; omitted fields are cleared
//! DELETE /users/{id}
//! GET    /users?address_country=Japan&sort_by=username&sort_order=desc
//! ```

use actix_web::{delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::DeleteOutcome;
use crate::domain::{
    Address, Error, PersonName, User, UserFilter, UserId, UserListQuery, UserProfile, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DATE_OF_BIRTH, FIRSTNAME, LASTNAME, USERNAME, missing_fields_error, parse_optional_date,
    parse_user_id,
};

/// Request body for create and full-replacement update.
///
/// Every key is optional on the wire so that missing required fields produce
/// a validation error rather than a deserialisation failure. Empty strings
/// count as absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct UserRequest {
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(example = "Ada")]
    pub firstname: Option<String>,
    #[schema(example = "Lovelace")]
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    /// Calendar date, `YYYY-MM-DD`, not after today.
    #[schema(example = "1815-12-10")]
    pub date_of_birth: Option<String>,
    pub address_country: Option<String>,
    pub address_city: Option<String>,
    pub address_street_name: Option<String>,
    pub address_street_address: Option<String>,
}

impl TryFrom<UserRequest> for UserProfile {
    type Error = Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        let username = Username::new(value.username.unwrap_or_default());
        let first_name = PersonName::first(value.firstname.unwrap_or_default());
        let last_name = PersonName::last(value.lastname.unwrap_or_default());

        let (username, first_name, last_name) = match (username, first_name, last_name) {
            (Ok(username), Ok(first_name), Ok(last_name)) => (username, first_name, last_name),
            (username, first_name, last_name) => {
                let missing: Vec<_> = [
                    (username.is_err(), USERNAME),
                    (first_name.is_err(), FIRSTNAME),
                    (last_name.is_err(), LASTNAME),
                ]
                .into_iter()
                .filter_map(|(missing, field)| missing.then_some(field))
                .collect();
                return Err(missing_fields_error(&missing));
            }
        };

        let date_of_birth = parse_optional_date(value.date_of_birth.as_deref(), DATE_OF_BIRTH)?;

        Ok(UserProfile::new(username, first_name, last_name)
            .with_email(value.email)
            .with_avatar(value.avatar)
            .with_phone(value.phone)
            .with_date_of_birth(date_of_birth)
            .with_address(Address {
                country: value.address_country,
                city: value.address_city,
                street_name: value.address_street_name,
                street_address: value.address_street_address,
            }))
    }
}

/// User record as returned by every endpoint.
///
/// Absent optional fields serialise as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "1815-12-10")]
    pub date_of_birth: Option<NaiveDate>,
    pub address_country: Option<String>,
    pub address_city: Option<String>,
    pub address_street_name: Option<String>,
    pub address_street_address: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let id = user.id().get();
        let profile = user.into_profile();
        let address = profile.address().clone();
        Self {
            id,
            username: profile.username().to_string(),
            firstname: profile.first_name().to_string(),
            lastname: profile.last_name().to_string(),
            email: profile.email().map(str::to_owned),
            avatar: profile.avatar().map(str::to_owned),
            phone: profile.phone().map(str::to_owned),
            date_of_birth: profile.date_of_birth(),
            address_country: address.country,
            address_city: address.city,
            address_street_name: address.street_name,
            address_street_address: address.street_address,
        }
    }
}

/// Confirmation body for `DELETE /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "user deleted")]
    pub message: String,
}

/// Query parameters for `GET /users`.
///
/// Filters are exact matches; empty values are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub address_country: Option<String>,
    /// Column to order by. Defaults to `id`.
    #[param(example = "username")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`. Defaults to `asc`.
    #[param(example = "desc")]
    pub sort_order: Option<String>,
}

impl TryFrom<ListUsersParams> for UserListQuery {
    type Error = Error;

    fn try_from(value: ListUsersParams) -> Result<Self, Self::Error> {
        let filter = UserFilter {
            username: value.username,
            email: value.email,
            first_name: value.firstname,
            last_name: value.lastname,
            address_country: value.address_country,
        };
        UserListQuery::parse(filter, value.sort_by.as_deref(), value.sort_order.as_deref())
            .map_err(Error::from)
    }
}

fn user_id_from_path(path: web::Path<String>) -> Result<UserId, Error> {
    parse_user_id(&path.into_inner())
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username or email already in use", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let profile = UserProfile::try_from(payload.into_inner())?;
    let user = state.users_command.create(profile).await?;
    Ok(web::Json(user.into()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = user_id_from_path(path)?;
    let user = state.users_query.get(id).await?;
    Ok(web::Json(user.into()))
}

/// Replace every field of a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Username or email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = user_id_from_path(path)?;
    let profile = UserProfile::try_from(payload.into_inner())?;
    let user = state.users_command.update(id, profile).await?;
    Ok(web::Json(user.into()))
}

/// Delete a user. Succeeds whether or not the user existed.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted", body = DeleteResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = user_id_from_path(path)?;
    let outcome = state.users_command.delete(id).await?;
    if outcome == DeleteOutcome::AlreadyAbsent {
        debug!(user_id = %id, "delete of absent user reported as success");
    }
    Ok(web::Json(DeleteResponse {
        message: "user deleted".to_owned(),
    }))
}

/// List users with optional exact-match filters and ordering.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "Matching users", body = [UserResponse]),
        (status = 400, description = "Unknown sort column or direction", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    params: web::Query<ListUsersParams>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let query = UserListQuery::try_from(params.into_inner())?;
    let users = state.users_query.list(query).await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Register the user endpoints and their extractor error handling.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}
