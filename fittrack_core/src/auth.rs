//! Registration and login flows over the profile store.
//!
//! Credentials are a plaintext match against locally stored records.
//! This is a convenience for a single-user machine, not a security
//! boundary, and the system makes no claim otherwise.

use crate::{Error, Repository, Result, UserRecord};

/// Register a new account, seed its empty record, and start a session.
///
/// Email addresses are unique across the store.
pub fn register(
    repo: &mut dyn Repository,
    email: &str,
    password: &str,
    name: &str,
) -> Result<UserRecord> {
    if email.trim().is_empty() {
        return Err(Error::Auth("Email must not be empty".into()));
    }

    if repo.find_by_email(email)?.is_some() {
        return Err(Error::Auth(format!("User already exists: {}", email)));
    }

    let user = UserRecord::new(email, password, name);
    repo.put(user.clone())?;
    repo.set_current_user(user.id)?;

    tracing::info!("Registered user {} ({})", user.name, user.email);
    Ok(user)
}

/// Match credentials against the store and start a session
pub fn login(repo: &mut dyn Repository, email: &str, password: &str) -> Result<UserRecord> {
    let user = repo
        .find_by_email(email)?
        .filter(|u| u.password == password)
        .ok_or_else(|| Error::Auth("Invalid credentials".into()))?;

    repo.set_current_user(user.id)?;
    tracing::info!("User {} logged in", user.email);
    Ok(user)
}

/// End the current session, if any
pub fn logout(repo: &mut dyn Repository) -> Result<()> {
    repo.clear_current_user()
}

/// Resolve the session pointer to a full record.
///
/// A pointer to a record that no longer exists reads as logged out.
pub fn current_user(repo: &dyn Repository) -> Result<Option<UserRecord>> {
    match repo.current_user()? {
        Some(id) => repo.get(id),
        None => Ok(None),
    }
}
