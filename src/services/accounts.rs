//! Account registration and credential checks.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;
use validator::Validate;

use crate::entities::{user, user_profile};
use crate::validation::{username_chars, FieldErrors};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Registration {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1 to 150 characters long."),
        custom(function = "username_chars")
    )]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Password must contain at least 8 characters."))]
    pub password: String,
    #[serde(default)]
    #[validate(must_match(other = "password", message = "The two password fields didn't match."))]
    pub password_confirm: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// Every problem found with the submitted form, in one list.
    #[error("registration rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),
    #[error("failed to hash password")]
    Hashing,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl Registration {
    fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            ..self
        }
    }

    fn form_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => FieldErrors::from(errors).into_messages(),
        }
    }
}

/// Creates the account and, in the same transaction, its household profile.
pub async fn register(
    db: &DatabaseConnection,
    registration: Registration,
) -> Result<user::Model, RegistrationError> {
    let registration = registration.normalized();
    let mut errors = registration.form_errors();
    let Registration {
        username,
        email,
        password,
        ..
    } = registration;

    if !username.is_empty() {
        let taken = user::Entity::find()
            .filter(user::Column::Username.eq(username.clone()))
            .one(db)
            .await?;
        if taken.is_some() {
            errors.push("A user with that username already exists.".to_string());
        }
    }
    if !email.is_empty() {
        let taken = user::Entity::find()
            .filter(user::Column::Email.eq(email.clone()))
            .one(db)
            .await?;
        if taken.is_some() {
            errors.push("A user with that email already exists.".to_string());
        }
    }
    if !errors.is_empty() {
        return Err(RegistrationError::Rejected(errors));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| RegistrationError::Hashing)?
        .to_string();

    let now = chrono::Utc::now().naive_utc();
    let txn = db.begin().await?;

    let new_user = user::ActiveModel {
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let user = match new_user.insert(&txn).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration for the same name.
        Err(e) if is_unique_violation(&e) => {
            return Err(RegistrationError::Rejected(vec![
                "A user with that username or email already exists.".to_string(),
            ]))
        }
        Err(e) => return Err(e.into()),
    };

    user_profile::default_for_user(user.id, now)
        .insert(&txn)
        .await?;
    txn.commit().await?;

    Ok(user)
}

fn is_unique_violation(err: &DbErr) -> bool {
    err.to_string()
        .contains("duplicate key value violates unique constraint")
}

/// Looks up the account and checks the password. `None` for an unknown
/// username or a wrong password alike.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>, DbErr> {
    let Some(user) = user::Entity::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let parsed_hash = match PasswordHash::new(&user.password_hash) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::warn!(user_id = user.id, "unreadable password hash: {}", e);
            return Ok(None);
        }
    };

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
    {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
