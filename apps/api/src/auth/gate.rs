//! Request gate: authenticate, then authorize by role, then run the handler.
//!
//! `authenticate` is layered over every protected route. It validates the
//! `Authorization: Bearer <token>` header and stores a [`Principal`] in the request
//! extensions. `require_admin` / `require_applicant` sit inside it on the
//! role-specific route groups. Handlers take `Principal` as an extractor and never
//! see the token.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::token::TokenService;
use crate::errors::AppError;
use crate::models::user::Role;
use crate::state::AppState;

/// The authenticated caller, attached to the request after token validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .ok_or(AppError::Unauthenticated)
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Stage one: header → token → principal.
pub fn authenticate_headers(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Result<Principal, AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthenticated)?;
    let claims = tokens.validate(token)?;
    Ok(Principal {
        user_id: claims.user_id,
        role: claims.user_type,
    })
}

/// Stage two: the principal's role must equal the route's role.
pub fn authorize(principal: &Principal, required: Role) -> Result<(), AppError> {
    match (principal.role, required) {
        (Role::Admin, Role::Admin) | (Role::Applicant, Role::Applicant) => Ok(()),
        (Role::Applicant, Role::Admin) | (Role::Admin, Role::Applicant) => {
            Err(AppError::Forbidden(required.as_str()))
        }
    }
}

pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = authenticate_headers(req.headers(), &state.tokens)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

pub async fn require_admin(
    principal: Principal,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&principal, Role::Admin)?;
    Ok(next.run(req).await)
}

pub async fn require_applicant(
    principal: Principal,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&principal, Role::Applicant)?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn tokens() -> TokenService {
        TokenService::new("test-secret-key-at-least-32-characters-long".to_string(), 1)
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_is_unauthenticated() {
        let result = authenticate_headers(&HeaderMap::new(), &tokens());
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_wrong_scheme_is_unauthenticated() {
        let svc = tokens();
        let token = svc.issue(Uuid::new_v4(), Role::Admin).unwrap();
        for value in [token.clone(), format!("Token {token}"), format!("bearer {token}")] {
            let result = authenticate_headers(&headers_with(&value), &svc);
            assert!(matches!(result, Err(AppError::Unauthenticated)), "{value}");
        }
    }

    #[test]
    fn test_empty_bearer_is_unauthenticated() {
        assert!(bearer_token(&headers_with("Bearer ")).is_none());
    }

    #[test]
    fn test_valid_bearer_yields_principal() {
        let svc = tokens();
        let user_id = Uuid::new_v4();
        let token = svc.issue(user_id, Role::Applicant).unwrap();
        let principal = authenticate_headers(&headers_with(&format!("Bearer {token}")), &svc)
            .unwrap();
        assert_eq!(
            principal,
            Principal {
                user_id,
                role: Role::Applicant
            }
        );
    }

    #[test]
    fn test_role_mismatch_is_forbidden() {
        let applicant = Principal {
            user_id: Uuid::new_v4(),
            role: Role::Applicant,
        };
        assert!(matches!(
            authorize(&applicant, Role::Admin),
            Err(AppError::Forbidden("Admin"))
        ));
        assert!(authorize(&applicant, Role::Applicant).is_ok());
    }
}
