use itaudit_db::entities::auth_users;
use itaudit_model::{AuthUser, AuthUserPatch, NewAuthUser};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::error::StoreError;

pub const ADMIN_ROLE: &str = "admin";

/// Result of a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccount {
    pub username: String,
    pub role: Option<String>,
}

pub fn hash_password(password: &str) -> Result<String, StoreError> {
    use argon2::password_hash::{PasswordHasher, SaltString};
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    let argon2 = argon2::Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| StoreError::Password(e.to_string()))
}

/// Checks `password` against a stored Argon2 PHC string.
///
/// Databases written before hashing was introduced hold plaintext; anything
/// that does not parse as a PHC string is compared verbatim.
pub fn verify_password(stored: &str, password: &str) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    match PasswordHash::new(stored) {
        Ok(parsed) => argon2::Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => stored == password,
    }
}

fn to_dto(m: auth_users::Model) -> AuthUser {
    AuthUser {
        id: m.id,
        username: m.username,
        role: m.role,
    }
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<AuthUser>, StoreError> {
    let rows = auth_users::Entity::find()
        .order_by_asc(auth_users::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(to_dto).collect())
}

pub async fn insert(db: &DatabaseConnection, input: NewAuthUser) -> Result<i32, StoreError> {
    let model = auth_users::ActiveModel {
        username: Set(Some(input.username)),
        password: Set(Some(hash_password(&input.password)?)),
        role: Set(input.role),
        ..Default::default()
    };
    let res = auth_users::Entity::insert(model).exec(db).await?;
    Ok(res.last_insert_id)
}

pub async fn update(db: &DatabaseConnection, patch: AuthUserPatch) -> Result<u64, StoreError> {
    let mut active = auth_users::ActiveModel {
        ..Default::default()
    };
    if let Some(v) = patch.username {
        active.username = Set(Some(v));
    }
    if let Some(v) = patch.password.filter(|p| !p.is_empty()) {
        active.password = Set(Some(hash_password(&v)?));
    }
    if let Some(v) = patch.role {
        active.role = Set(v);
    }
    if !active.is_changed() {
        return Ok(0);
    }

    let res = auth_users::Entity::update_many()
        .set(active)
        .filter(auth_users::Column::Id.eq(patch.id.0))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, StoreError> {
    let res = auth_users::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}

/// Unknown usernames and wrong passwords both yield `None`.
pub async fn verify(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<VerifiedAccount>, StoreError> {
    let user = auth_users::Entity::find()
        .filter(auth_users::Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(user
        .filter(|u| {
            u.password
                .as_deref()
                .is_some_and(|stored| verify_password(stored, password))
        })
        .map(|u| VerifiedAccount {
            username: username.to_string(),
            role: u.role,
        }))
}

/// Creates the bootstrap admin account unless that username already exists.
pub async fn ensure_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<bool, StoreError> {
    let existing = auth_users::Entity::find()
        .filter(auth_users::Column::Username.eq(username))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    insert(
        db,
        NewAuthUser {
            username: username.to_string(),
            password: password.to_string(),
            role: Some(ADMIN_ROLE.to_string()),
        },
    )
    .await?;
    Ok(true)
}
