//! Cross-user aggregation for the administrative view.
//!
//! Operates on a full `Repository::list()` snapshot. With one flat local
//! store there is no pagination to worry about.

use crate::UserRecord;

/// Aggregate statistics across every stored user
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GlobalStats {
    pub total_users: usize,
    pub total_measurements: usize,
    pub total_transformations: usize,
    pub avg_measurements_per_user: f64,
    pub avg_transformations_per_user: f64,
}

pub fn global_stats(users: &[UserRecord]) -> GlobalStats {
    let total_users = users.len();
    let total_measurements: usize = users.iter().map(|u| u.measurements.len()).sum();
    let total_transformations: usize = users.iter().map(|u| u.transformations.len()).sum();

    let (avg_measurements_per_user, avg_transformations_per_user) = if total_users > 0 {
        (
            total_measurements as f64 / total_users as f64,
            total_transformations as f64 / total_users as f64,
        )
    } else {
        (0.0, 0.0)
    };

    GlobalStats {
        total_users,
        total_measurements,
        total_transformations,
        avg_measurements_per_user,
        avg_transformations_per_user,
    }
}

/// Top `n` users by measurement count, descending
pub fn top_by_measurements(users: &[UserRecord], n: usize) -> Vec<(&UserRecord, usize)> {
    let mut ranked: Vec<_> = users.iter().map(|u| (u, u.measurements.len())).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Top `n` users by transformation count, descending
pub fn top_by_transformations(users: &[UserRecord], n: usize) -> Vec<(&UserRecord, usize)> {
    let mut ranked: Vec<_> = users.iter().map(|u| (u, u.transformations.len())).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Case-insensitive substring match on name or email
pub fn search_users<'a>(users: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    let term = term.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&term) || u.email.to_lowercase().contains(&term)
        })
        .collect()
}
