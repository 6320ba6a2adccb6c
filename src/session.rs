use std::str::FromStr;

use crate::app::AppError;
use crate::db;
use crate::domain::{Role, User};
use crate::repository::Repository;
use crate::store::Store;

const CURRENT_USER_KEY: &str = "currentUser";

/// The acting user, resolved once per command and handed to every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> u64 {
        self.user.id
    }

    pub fn role(&self) -> &Role {
        &self.user.role
    }

    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.user.role == role {
            return Ok(());
        }
        Err(AppError::Unauthorized(format!(
            "this action requires the {} role; signed in as {}",
            role, self.user.role
        )))
    }

    pub fn require_any(&self, roles: &[Role]) -> Result<(), AppError> {
        if roles.contains(&self.user.role) {
            return Ok(());
        }
        let allowed = roles
            .iter()
            .map(|role| role.as_str())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(AppError::Unauthorized(format!(
            "this action requires the {} role; signed in as {}",
            allowed, self.user.role
        )))
    }

    pub fn display_name(&self) -> String {
        format!("{} ({})", self.user.name, self.user.role)
    }
}

/// Matches username, password and role exactly; on success the user record
/// becomes the stored session.
pub fn login(store: &Store, username: &str, password: &str, role: &str) -> Result<Session, AppError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::InvalidArgument(
            "please enter both username and password".to_string(),
        ));
    }
    let role = Role::from_str(role)?;
    let users = Repository::<User>::load(store)?;
    let user = users
        .iter()
        .find(|user| user.username == username && user.password == password && user.role == role)
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("invalid username, password, or role".to_string()))?;

    let raw = serde_json::to_string(&user)
        .map_err(|err| AppError::InvalidArgument(format!("cannot encode session: {err}")))?;
    db::set_session(store.conn(), CURRENT_USER_KEY, &raw)?;
    log::info!("user {} signed in as {}", user.username, user.role);
    Ok(Session::new(user))
}

pub fn logout(store: &Store) -> Result<bool, AppError> {
    Ok(db::delete_session(store.conn(), CURRENT_USER_KEY)?)
}

pub fn current(store: &Store) -> Result<Option<Session>, AppError> {
    let Some(raw) = db::get_session(store.conn(), CURRENT_USER_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<User>(&raw) {
        Ok(user) => Ok(Some(Session::new(user))),
        Err(err) => {
            log::warn!("discarding unreadable session: {}", err);
            db::delete_session(store.conn(), CURRENT_USER_KEY)?;
            Ok(None)
        }
    }
}

/// The stored session, re-resolved against the user collection. A session
/// whose user was deleted or changed role is discarded.
pub fn require_current(store: &Store) -> Result<Session, AppError> {
    let session = current(store)?.ok_or(AppError::NotLoggedIn)?;
    let users = Repository::<User>::load(store)?;
    match users.get_by_id(session.user_id()) {
        Some(user) if user.role == session.user.role => Ok(Session::new(user.clone())),
        _ => {
            log::warn!(
                "discarding session for user {}: account no longer exists",
                session.user.username
            );
            db::delete_session(store.conn(), CURRENT_USER_KEY)?;
            Err(AppError::NotLoggedIn)
        }
    }
}
