use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};
use secrecy::ExposeSecret;
use subtle::ConstantTimeEq;

use crate::{
    audit::{self, Actor},
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterSellerRequest, RegisterUserRequest},
        catalog::required_text,
    },
    entity::{
        Sellers, Users, Warehouses,
        sellers::{ActiveModel as SellerActive, Column as SellerCol},
        users::{ActiveModel as UserActive, Column as UserCol},
    },
    error::{AppError, AppResult},
    middleware::auth::Role,
    models::{Seller, User},
    response::{ApiResponse, Meta},
    services::token_service::IssuedToken,
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 6;
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn register_user(
    state: &AppState,
    payload: RegisterUserRequest,
) -> AppResult<ApiResponse<User>> {
    let (Some(full_name), Some(phone_number)) = (
        required_text(Some(payload.full_name.as_str())),
        required_text(Some(payload.phone_number.as_str())),
    ) else {
        return Err(AppError::InvalidInput(
            "full_name, email, password and phone_number are required".into(),
        ));
    };
    let email = normalize_email(&payload.email)?;
    check_password(&payload.password)?;

    let exist = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict("Email is already taken".into()));
    }

    if let Some(warehouse_id) = payload.nearby_warehouse_id {
        if Warehouses::find_by_id(warehouse_id)
            .one(&state.orm)
            .await?
            .is_none()
        {
            return Err(AppError::InvalidReference(format!(
                "Invalid nearby_warehouse_id {warehouse_id} (warehouse not found)"
            )));
        }
    }

    let password_hash = hash_password(&payload.password)?;

    let user = UserActive {
        user_id: NotSet,
        full_name: Set(full_name),
        email: Set(email),
        password_hash: Set(password_hash),
        phone_number: Set(phone_number),
        nearby_warehouse_id: Set(payload.nearby_warehouse_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|e| AppError::from_write(e, "Email is already taken"))?;

    audit::record(
        &state.pool,
        Actor::new(Role::User, user.user_id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;

    Ok(ApiResponse::success("User created", User::from(user), None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = email.trim().to_lowercase();

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthenticated(INVALID_CREDENTIALS.into()))?;

    verify_password(&password, &user.password_hash)?;

    let issued = state.tokens.issue(user.user_id.to_string(), Role::User)?;

    audit::record(
        &state.pool,
        Actor::new(Role::User, user.user_id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        login_response(issued),
        Some(Meta::empty()),
    ))
}

pub async fn register_seller(
    state: &AppState,
    payload: RegisterSellerRequest,
) -> AppResult<ApiResponse<Seller>> {
    let (Some(company_name), Some(gst_number)) = (
        required_text(Some(payload.company_name.as_str())),
        required_text(Some(payload.gst_number.as_str())),
    ) else {
        return Err(AppError::InvalidInput(
            "company_name, contact_email, password and gst_number are required".into(),
        ));
    };
    let contact_email = normalize_email(&payload.contact_email)?;
    check_password(&payload.password)?;

    let exist = Sellers::find()
        .filter(SellerCol::ContactEmail.eq(contact_email.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict(
            "A seller with this email already exists".into(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;

    let seller = SellerActive {
        seller_id: NotSet,
        company_name: Set(company_name),
        contact_email: Set(contact_email),
        password_hash: Set(password_hash),
        gst_number: Set(gst_number),
        is_verified: Set(false),
        rating: NotSet,
        balance: NotSet,
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|e| AppError::from_write(e, "A seller with this email already exists"))?;

    audit::record(
        &state.pool,
        Actor::new(Role::Seller, seller.seller_id),
        "seller_register",
        "sellers",
        serde_json::json!({ "seller_id": seller.seller_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Seller registered, pending verification",
        Seller::from(seller),
        None,
    ))
}

pub async fn login_seller(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = email.trim().to_lowercase();

    let seller = Sellers::find()
        .filter(SellerCol::ContactEmail.eq(email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthenticated(INVALID_CREDENTIALS.into()))?;

    verify_password(&password, &seller.password_hash)?;

    if !seller.is_verified {
        return Err(AppError::Forbidden("Seller not verified".into()));
    }

    let issued = state
        .tokens
        .issue(seller.seller_id.to_string(), Role::Seller)?;

    audit::record(
        &state.pool,
        Actor::new(Role::Seller, seller.seller_id),
        "seller_login",
        "sellers",
        serde_json::json!({ "seller_id": seller.seller_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        login_response(issued),
        Some(Meta::empty()),
    ))
}

pub async fn login_admin(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "email and password are required".into(),
        ));
    }

    let admin = &state.config.admin;
    let password_ok: bool = password
        .as_bytes()
        .ct_eq(admin.password.expose_secret().as_bytes())
        .into();
    if !email.eq_ignore_ascii_case(&admin.email) || !password_ok {
        tracing::warn!("admin login rejected");
        return Err(AppError::Unauthenticated("Invalid admin credentials".into()));
    }

    let issued = state.tokens.issue(admin.email.clone(), Role::Admin)?;

    audit::record(
        &state.pool,
        Actor::new(Role::Admin, &admin.email),
        "admin_login",
        "admin",
        serde_json::json!({}),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        login_response(issued),
        Some(Meta::empty()),
    ))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, stored_hash: &str) -> AppResult<()> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthenticated(INVALID_CREDENTIALS.into()))
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::InvalidInput("A valid email is required".into()));
    }
    Ok(email)
}

fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn login_response(issued: IssuedToken) -> LoginResponse {
    LoginResponse {
        token: issued.token,
        role: issued.role,
        expires_in: issued.role.token_ttl().num_seconds(),
    }
}
