use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use configs::StatusMode;
use service::accounts::{
    domain::{LoginInput, LoginOutcome, SignupInput, SignupOutcome},
    validation::ValidationErrors,
};
use tracing::{error, warn};

use crate::state::ServerState;

/// Account endpoints answer with a JSON string or a validation object.
/// In legacy mode every reply is 200 and only the body tells outcomes apart.
#[derive(Debug)]
pub struct AccountReply {
    status: StatusCode,
    body: AccountBody,
}

#[derive(Debug)]
enum AccountBody {
    Text(&'static str),
    Invalid(ValidationErrors),
}

impl AccountReply {
    fn text(mode: StatusMode, normalized: StatusCode, text: &'static str) -> Self {
        Self { status: status_for(mode, normalized), body: AccountBody::Text(text) }
    }

    fn invalid(mode: StatusMode, errs: ValidationErrors) -> Self {
        Self { status: status_for(mode, StatusCode::UNPROCESSABLE_ENTITY), body: AccountBody::Invalid(errs) }
    }
}

impl IntoResponse for AccountReply {
    fn into_response(self) -> Response {
        match self.body {
            AccountBody::Text(t) => (self.status, Json(t)).into_response(),
            AccountBody::Invalid(errs) => (self.status, Json(errs)).into_response(),
        }
    }
}

/// Unreadable bodies answer "Error", as a failed insert or lookup would.
fn unreadable_body(mode: StatusMode, rejection: JsonRejection) -> AccountReply {
    warn!(status = %rejection.status(), reason = %rejection.body_text(), "account body rejected");
    AccountReply::text(mode, rejection.status(), "Error")
}

fn status_for(mode: StatusMode, normalized: StatusCode) -> StatusCode {
    match mode {
        StatusMode::Legacy => StatusCode::OK,
        StatusMode::Normalized => normalized,
    }
}

#[utoipa::path(
    post, path = "/signup", tag = "accounts",
    request_body = crate::openapi::SignupRequest,
    responses(
        (status = 200, description = "\"Success\"; in legacy mode also \"Username already exists\" and \"Error\" (storage failure or unreadable body)", body = String),
        (status = 409, description = "\"Username already exists\" (normalized mode)", body = String),
        (status = 422, description = "Signup rules failed (enforced) or unreadable body, normalized mode"),
        (status = 500, description = "\"Error\" (normalized mode)", body = String)
    )
)]
pub async fn signup(State(state): State<ServerState>, body: Result<Json<SignupInput>, JsonRejection>) -> AccountReply {
    let mode = state.status_mode;
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return unreadable_body(mode, rejection),
    };
    match state.accounts.signup(input).await {
        Ok(SignupOutcome::Created) => AccountReply::text(mode, StatusCode::OK, "Success"),
        Ok(SignupOutcome::UsernameTaken) => AccountReply::text(mode, StatusCode::CONFLICT, "Username already exists"),
        Ok(SignupOutcome::Invalid(errs)) => AccountReply::invalid(mode, errs),
        Err(e) => {
            error!(code = e.code(), err = %e, "signup failed");
            AccountReply::text(mode, StatusCode::INTERNAL_SERVER_ERROR, "Error")
        }
    }
}

#[utoipa::path(
    post, path = "/login", tag = "accounts",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "\"Success\"; in legacy mode also \"Failed\", \"Error\" or the validation object", body = String),
        (status = 401, description = "\"Failed\" (normalized mode)", body = String),
        (status = 422, description = "Length gate failed or unreadable body (normalized mode)"),
        (status = 500, description = "\"Error\" (normalized mode)", body = String)
    )
)]
pub async fn login(State(state): State<ServerState>, body: Result<Json<LoginInput>, JsonRejection>) -> AccountReply {
    let mode = state.status_mode;
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return unreadable_body(mode, rejection),
    };
    match state.accounts.login(input).await {
        Ok(LoginOutcome::Authenticated(_)) => AccountReply::text(mode, StatusCode::OK, "Success"),
        Ok(LoginOutcome::Rejected) => AccountReply::text(mode, StatusCode::UNAUTHORIZED, "Failed"),
        Ok(LoginOutcome::Invalid(errs)) => AccountReply::invalid(mode, errs),
        Err(e) => {
            error!(code = e.code(), err = %e, "login failed");
            AccountReply::text(mode, StatusCode::INTERNAL_SERVER_ERROR, "Error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_mode_is_always_ok() {
        for code in [StatusCode::CONFLICT, StatusCode::UNAUTHORIZED, StatusCode::INTERNAL_SERVER_ERROR] {
            assert_eq!(status_for(StatusMode::Legacy, code), StatusCode::OK);
            assert_eq!(status_for(StatusMode::Normalized, code), code);
        }
    }
}
