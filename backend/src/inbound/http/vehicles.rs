//! Vehicle HTTP handlers.
//!
//! ```text
//! POST   /api/v1/users/{userId}/vehicles
//! GET    /api/v1/users/{userId}/vehicles
//! GET    /api/v1/users/{userId}/vehicles/{id}
//! DELETE /api/v1/users/{userId}/vehicles/{id}
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{EntityId, Vehicle, present_or_compensate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::encode_json;
use crate::inbound::http::validation::parse_entity_id;

/// Request body for `POST /api/v1/users/{userId}/vehicles`.
///
/// The owner comes from the path.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterVehicleRequest {
    /// Model year.
    pub year: i32,
    /// Manufacturer.
    pub make: String,
    /// Model name, optional.
    pub model: String,
    /// Body colour.
    pub color: String,
    /// Picture URL.
    pub photo: String,
    /// Passenger seats offered.
    pub seats: i32,
    /// Free-form extras.
    pub accessories: Vec<String>,
}

impl RegisterVehicleRequest {
    fn into_vehicle(self, user_id: EntityId) -> Vehicle {
        Vehicle {
            id: EntityId::zero(),
            user_id,
            year: self.year,
            make: self.make,
            model: self.model,
            color: self.color,
            photo: self.photo,
            seats: self.seats,
            accessories: self.accessories,
        }
    }
}

/// Register a vehicle under the caller's own user.
#[post("/users/{userId}/vehicles")]
pub async fn create_vehicle(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
    payload: web::Json<RegisterVehicleRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_entity_id(&path, "userId")?;
    let vehicle = payload.into_inner().into_vehicle(user_id);
    let vehicle = state.vehicles.register(vehicle, &caller.sub_id).await?;

    let body = present_or_compensate(encode_json(&vehicle), || {
        state
            .vehicles
            .delete(&vehicle.id, &vehicle.user_id, &caller.sub_id)
    })
    .await?;
    Ok(HttpResponse::Created()
        .content_type(ContentType::json())
        .body(body))
}

/// List a user's vehicles.
#[get("/users/{userId}/vehicles")]
pub async fn list_vehicles(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Vehicle>>> {
    let user_id = parse_entity_id(&path, "userId")?;
    let vehicles = state.vehicles.find_by_user_id(&user_id).await?;
    Ok(web::Json(vehicles))
}

/// Fetch one vehicle by id.
#[get("/users/{userId}/vehicles/{id}")]
pub async fn get_vehicle(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vehicle>> {
    let (raw_user_id, raw_id) = path.into_inner();
    parse_entity_id(&raw_user_id, "userId")?;
    let id = parse_entity_id(&raw_id, "id")?;
    let vehicle = state.vehicles.find_by_id(&id).await?;
    Ok(web::Json(vehicle))
}

/// Delete one of the caller's vehicles.
#[delete("/users/{userId}/vehicles/{id}")]
pub async fn delete_vehicle(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_user_id, raw_id) = path.into_inner();
    let user_id = parse_entity_id(&raw_user_id, "userId")?;
    let id = parse_entity_id(&raw_id, "id")?;
    state.vehicles.delete(&id, &user_id, &caller.sub_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
