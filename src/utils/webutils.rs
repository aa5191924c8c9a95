use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{dev::ServiceRequest, web, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use uuid::Uuid;

use crate::types::error::AppError;
use crate::utils::jwt::{Claims, SessionSigner};

/// Bearer middleware: checks the session JWT and stashes its claims for
/// handlers (`web::ReqData<Claims>`).
pub async fn validate_token(req: ServiceRequest, credentials: BearerAuth) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let verified = match req.app_data::<web::Data<SessionSigner>>() {
        Some(signer) => signer.verify(credentials.token()),
        None => Err(AppError::Internal("session signer not registered".into())),
    };

    match verified {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(e) => Err((e.into(), req)),
    }
}

/// A user may only act on their own account.
pub fn ensure_subject(claims: &Claims, user_id: Uuid) -> Result<(), AppError> {
    if claims.sub != user_id {
        return Err(AppError::Forbidden("cannot act on another user's account".into()));
    }
    Ok(())
}

// Extractor failures map to `Validation`. serde_json positions are not echoed.

pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "expected an application/json body",
        JsonPayloadError::Deserialize(e) if e.is_data() => "request body has missing or mistyped fields",
        JsonPayloadError::Deserialize(_) => "request body is not valid JSON",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => "request body is too large",
        _ => "request body could not be read",
    };
    AppError::Validation(message.into()).into()
}

pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        QueryPayloadError::Deserialize(e) => format!("invalid query string: {e}"),
        _ => "invalid query string".to_string(),
    };
    AppError::Validation(message).into()
}

pub fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        PathError::Deserialize(e) => format!("invalid path parameter: {e}"),
        _ => "invalid path parameter".to_string(),
    };
    AppError::Validation(message).into()
}
