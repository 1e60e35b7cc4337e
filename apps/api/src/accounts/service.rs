//! Signup and login.

use tracing::info;

use crate::auth::password::{
    dummy_password_hash, hash_password_blocking, verify_password_blocking,
};
use crate::auth::token::TokenService;
use crate::errors::AppError;
use crate::models::user::{Account, LoginRequest, NewAccount, Role, SignUpRequest};
use crate::store::Store;

/// Creates an account plus its empty profile. The role must be `Admin` or `Applicant`.
pub async fn sign_up(store: &dyn Store, request: SignUpRequest) -> Result<Account, AppError> {
    let role: Role = request.user_type.parse().map_err(|_| {
        AppError::BadRequest("UserType must be 'Admin' or 'Applicant'".to_string())
    })?;

    let email = request.email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if request.password.is_empty() {
        return Err(AppError::BadRequest("Password cannot be empty".to_string()));
    }

    let password_hash = hash_password_blocking(request.password).await?;

    let account = store
        .create_account(NewAccount {
            name: request.name,
            email,
            address: request.address,
            user_type: role,
            password_hash,
            profile_headline: request.profile_headline,
        })
        .await?;

    info!("Signed up {} {}", account.user_type, account.id);
    Ok(account)
}

/// Checks credentials and issues a session token.
/// Unknown email and wrong password produce the same error.
pub async fn log_in(
    store: &dyn Store,
    tokens: &TokenService,
    request: LoginRequest,
) -> Result<String, AppError> {
    let account = store.find_account_by_email(request.email.trim()).await?;

    // Unknown emails still pay for a full verify.
    let stored_hash = match &account {
        Some(account) => account.password_hash.clone(),
        None => dummy_password_hash().to_string(),
    };
    let matched = verify_password_blocking(request.password, stored_hash).await;

    match account {
        Some(account) if matched => Ok(tokens.issue(account.id, account.user_type)?),
        _ => Err(AppError::InvalidCredentials),
    }
}
