//! End-to-end coverage for the vehicle endpoints over in-memory storage.

mod support;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use profile_backend::domain::{EntityId, Vehicle};
use support::{bearer, body_json, init_app, registration_body, state};

async fn register<S>(app: &S, sub_id: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer(sub_id))
        .set_json(registration_body())
        .to_request();
    let body = body_json(test::call_service(app, req).await).await;
    body["id"].as_str().expect("user id").to_owned()
}

fn toyota() -> Value {
    json!({ "year": 2020, "make": "Toyota", "color": "Red", "seats": 4 })
}

#[rstest]
#[actix_web::test]
async fn owner_registers_lists_and_deletes_vehicle() {
    let (state, backing) = state();
    let app = init_app(state).await;
    let user_id = register(&app, "abc").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/users/{user_id}/vehicles"))
        .insert_header(bearer("abc"))
        .set_json(toyota())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = body_json(res).await;
    let vehicle_id = created["id"].as_str().expect("vehicle id").to_owned();
    assert_eq!(created["userId"], user_id.as_str());
    assert_eq!(created["model"], "");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{user_id}/vehicles"))
        .insert_header(bearer("abc"))
        .to_request();
    let listed = body_json(test::call_service(&app, req).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{user_id}/vehicles/{vehicle_id}"))
        .insert_header(bearer("abc"))
        .to_request();
    let fetched = body_json(test::call_service(&app, req).await).await;
    assert_eq!(fetched["make"], "Toyota");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{user_id}/vehicles/{vehicle_id}"))
        .insert_header(bearer("abc"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(backing.vehicles.is_empty());
}

#[rstest]
#[actix_web::test]
async fn listing_unknown_owner_is_empty() {
    let (state, _backing) = state();
    let app = init_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/5f8d0d55b54764421b7156c3/vehicles")
        .insert_header(bearer("abc"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json!([]));
}

#[rstest]
#[actix_web::test]
async fn registering_for_another_user_is_forbidden() {
    let (state, backing) = state();
    let app = init_app(state).await;
    register(&app, "abc").await;
    let other = register(&app, "xyz").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/users/{other}/vehicles"))
        .insert_header(bearer("abc"))
        .set_json(toyota())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(backing.vehicles.is_empty());
}

#[rstest]
#[case(json!({ "year": 2020, "color": "Red", "seats": 4 }), "make")]
#[case(json!({ "year": 1899, "make": "Ford", "color": "Black", "seats": 4 }), "year")]
#[case(json!({ "year": 2025, "make": "Ford", "color": "Black", "seats": 4 }), "year")]
#[case(json!({ "year": 2020, "make": "Ford", "color": "Black", "seats": 0 }), "seats")]
#[actix_web::test]
async fn invalid_vehicle_is_a_bad_request(#[case] payload: Value, #[case] field: &str) {
    let (state, backing) = state();
    let app = init_app(state).await;
    let user_id = register(&app, "abc").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/users/{user_id}/vehicles"))
        .insert_header(bearer("abc"))
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["details"]["field"], field);
    assert!(backing.vehicles.is_empty());
}

#[rstest]
#[actix_web::test]
async fn deleting_someone_elses_vehicle_through_own_path_is_forbidden() {
    let (state, backing) = state();
    let app = init_app(state).await;
    let own_id = register(&app, "abc").await;
    let other_id = register(&app, "xyz").await;
    let foreign = backing.vehicles.seed(Vehicle {
        user_id: EntityId::parse(&other_id).expect("hex id"),
        year: 2020,
        make: "Saab".to_owned(),
        color: "Blue".to_owned(),
        seats: 4,
        ..Vehicle::default()
    });

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{own_id}/vehicles/{foreign}"))
        .insert_header(bearer("abc"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(backing.vehicles.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn deleting_missing_vehicle_is_not_found() {
    let (state, _backing) = state();
    let app = init_app(state).await;
    let user_id = register(&app, "abc").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{user_id}/vehicles/5f8d0d55b54764421b7156c3"))
        .insert_header(bearer("abc"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn unregistered_caller_cannot_register_vehicle() {
    let (state, _backing) = state();
    let app = init_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/5f8d0d55b54764421b7156c3/vehicles")
        .insert_header(bearer("ghost"))
        .set_json(toyota())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
