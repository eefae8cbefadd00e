//! User profile HTTP handlers.
//!
//! ```text
//! POST  /api/v1/users
//! GET   /api/v1/users/me
//! GET   /api/v1/users/{id}
//! PATCH /api/v1/users/{id}
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CallerIdentity, Error, ErrorCode, Preferences, PreferencesPatch, SignUpPhase, User, UserPatch,
    present_or_compensate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_entity_id, parse_optional};

/// Request body for `POST /api/v1/users`.
///
/// Subject and email come from the caller's identity, never from the body.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUserRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// RFC 3339 date of birth.
    pub date_of_birth: Option<DateTime<Utc>>,
    /// Contact number.
    pub phone_number: String,
    /// `Male`, `Female` or `Other`.
    pub gender: String,
    /// Avatar URL.
    pub photo: String,
    /// Free-text self description.
    pub description: String,
    /// Optional travel preferences.
    pub preferences: Option<Preferences>,
}

impl RegisterUserRequest {
    fn into_user(self, caller: &CallerIdentity) -> User {
        User {
            sub_id: caller.sub_id.clone(),
            email: caller.email.clone(),
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number,
            gender: self.gender,
            photo: self.photo,
            description: self.description,
            preferences: self.preferences,
            ..User::default()
        }
    }
}

/// Request body for `PATCH /api/v1/users/{id}`. Absent fields are kept.
///
/// Unknown keys, `email` among them, are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserRequest {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New date of birth.
    pub date_of_birth: Option<DateTime<Utc>>,
    /// New contact number.
    pub phone_number: Option<String>,
    /// New gender.
    pub gender: Option<String>,
    /// New avatar URL.
    pub photo: Option<String>,
    /// New self description.
    pub description: Option<String>,
    /// Preference ratings to change.
    pub preferences: Option<PreferencesPatch>,
    /// `personalInfo`, `preferences` or `done`.
    pub sign_up_phase: Option<String>,
    /// New passenger rating.
    pub user_rating: Option<i32>,
    /// New driver rating.
    pub driver_rating: Option<i32>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            sign_up_phase: parse_optional(value.sign_up_phase, str::parse::<SignUpPhase>)?,
            gender: value.gender,
            first_name: value.first_name,
            last_name: value.last_name,
            date_of_birth: value.date_of_birth,
            phone_number: value.phone_number,
            photo: value.photo,
            description: value.description,
            preferences: value.preferences,
            user_rating: value.user_rating,
            driver_rating: value.driver_rating,
        })
    }
}

/// Profile returned by `GET /users/me` before the caller has registered.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionalUserResponse {
    /// `email` claim.
    pub email: String,
    /// `given_name` claim.
    pub first_name: String,
    /// `family_name` claim.
    pub last_name: String,
    /// `picture` claim.
    pub photo: String,
    /// Always `personalInfo`.
    pub sign_up_phase: SignUpPhase,
}

impl From<CallerIdentity> for ProvisionalUserResponse {
    fn from(value: CallerIdentity) -> Self {
        Self {
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            photo: value.picture,
            sign_up_phase: SignUpPhase::PersonalInfo,
        }
    }
}

pub(crate) fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(value)
        .map_err(|err| Error::internal(format!("failed to encode response: {err}")))
}

/// Register the caller as a user.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = payload.into_inner().into_user(&caller);
    let user = state.users.register(user).await?;

    let body = present_or_compensate(encode_json(&user), || state.users.delete(&user.id)).await?;
    Ok(HttpResponse::Created()
        .content_type(ContentType::json())
        .body(body))
}

/// Fetch the caller's own profile, or a provisional one built from the
/// identity claims when the caller has not registered yet.
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
) -> ApiResult<HttpResponse> {
    let found = state.users.find_by_sub_id(&caller.sub_id).await;
    match found {
        Ok(user) => Ok(HttpResponse::Ok().json(user)),
        Err(err) if err.code() == ErrorCode::NotFound => Ok(HttpResponse::Ok()
            .json(ProvisionalUserResponse::from(caller.into_inner()))),
        Err(err) => Err(err),
    }
}

/// Fetch a user by id.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_entity_id(&path, "id")?;
    let user = state.users.find_by_id(&id).await?;
    Ok(web::Json(user))
}

/// Merge the supplied fields into a stored user.
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    _caller: AuthenticatedCaller,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = parse_entity_id(&path, "id")?;
    let patch = UserPatch::try_from(payload.into_inner())?;
    let user = state.users.update(&id, patch).await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests {
    //! Request mapping tests; end-to-end handler coverage lives in
    //! `tests/http_users.rs`.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn caller() -> CallerIdentity {
        CallerIdentity {
            sub_id: "abc".to_owned(),
            email: "a@example.com".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            picture: "https://example.com/a.png".to_owned(),
        }
    }

    #[rstest]
    fn registration_takes_subject_and_email_from_caller() {
        let request: RegisterUserRequest = serde_json::from_value(json!({
            "firstName": "A",
            "lastName": "B",
            "dateOfBirth": "1990-01-01T00:00:00Z",
            "gender": "Male",
        }))
        .expect("valid body");

        let user = request.into_user(&caller());

        assert_eq!(user.sub_id, "abc");
        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.gender, "Male");
        assert!(user.preferences.is_none());
    }

    #[rstest]
    fn registration_leaves_gender_for_validation() {
        let request = RegisterUserRequest {
            gender: "Robot".to_owned(),
            ..RegisterUserRequest::default()
        };
        let user = request.into_user(&caller());
        assert_eq!(user.gender, "Robot");
    }

    #[rstest]
    fn patch_ignores_email() {
        let request: UpdateUserRequest =
            serde_json::from_value(json!({ "email": "new@example.com", "gender": "Robot" }))
                .expect("valid body");
        let patch = UserPatch::try_from(request).expect("valid patch");
        assert_eq!(
            patch,
            UserPatch {
                gender: Some("Robot".to_owned()),
                ..UserPatch::default()
            }
        );
    }

    #[rstest]
    fn patch_rejects_unknown_sign_up_phase() {
        let request: UpdateUserRequest =
            serde_json::from_value(json!({ "signUpPhase": "finished" })).expect("valid body");
        let err = UserPatch::try_from(request).expect_err("unknown phase");
        assert_eq!(
            err.message(),
            "sign up phase must be personalInfo, preferences or done"
        );
    }

    #[rstest]
    fn patch_keeps_explicit_zero_preferences() {
        let request: UpdateUserRequest =
            serde_json::from_value(json!({ "preferences": { "smoking": 0 } }))
                .expect("valid body");
        let patch = UserPatch::try_from(request).expect("valid patch");
        assert_eq!(
            patch.preferences,
            Some(PreferencesPatch {
                smoking: Some(0),
                ..PreferencesPatch::default()
            })
        );
        assert!(patch.first_name.is_none());
    }

    #[rstest]
    fn provisional_profile_uses_claims() {
        let value = serde_json::to_value(ProvisionalUserResponse::from(caller()))
            .expect("serialise provisional user");
        assert_eq!(
            value,
            json!({
                "email": "a@example.com",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "photo": "https://example.com/a.png",
                "signUpPhase": "personalInfo",
            })
        );
    }
}
