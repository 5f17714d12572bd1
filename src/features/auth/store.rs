use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::features::auth::model::{is_expired, Account, PasswordReset, PendingRegistration};
use crate::shared::constants::EXPIRED_LINK_RETENTION_HOURS;

/// Lowercased, trimmed form used as the account key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Outcome of looking up a routing id or reset token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Live,
    Expired,
    Unknown,
}

/// In-memory accounts and short-lived auth-flow tokens.
///
/// Keys are normalized emails for accounts, routing ids for pending
/// registrations and reset tokens for password resets. Expired routing ids
/// and reset tokens leave a tombstone holding their expiry, so they keep
/// reporting `Expired` until the retention window has passed.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<String, Account>,
    pending: HashMap<String, PendingRegistration>,
    resets: HashMap<String, PasswordReset>,
    expired_routings: HashMap<String, DateTime<Utc>>,
    expired_resets: HashMap<String, DateTime<Utc>>,
}

fn retention() -> Duration {
    Duration::hours(EXPIRED_LINK_RETENTION_HOURS)
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, email: &str) -> Option<&Account> {
        self.accounts.get(&normalize_email(email))
    }

    pub fn account_mut(&mut self, email: &str) -> Option<&mut Account> {
        self.accounts.get_mut(&normalize_email(email))
    }

    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(normalize_email(&account.email), account);
    }

    /// Store a pending registration, dropping any earlier one for the same email
    pub fn replace_pending(&mut self, registration: PendingRegistration) {
        let email = normalize_email(&registration.email);
        self.pending
            .retain(|_, existing| normalize_email(&existing.email) != email);
        self.pending
            .insert(registration.routing.clone(), registration);
    }

    /// Classify a routing id; an expired registration is moved to a tombstone
    pub fn routing_state(&mut self, routing: &str, now: DateTime<Utc>) -> LinkState {
        if let Some(p) = self.pending.get(routing) {
            if !is_expired(p.expires_at, now) {
                return LinkState::Live;
            }
            self.expired_routings
                .insert(routing.to_string(), p.expires_at);
            self.pending.remove(routing);
            return LinkState::Expired;
        }
        if self.expired_routings.contains_key(routing) {
            LinkState::Expired
        } else {
            LinkState::Unknown
        }
    }

    pub fn pending(&self, routing: &str) -> Option<&PendingRegistration> {
        self.pending.get(routing)
    }

    pub fn take_pending(&mut self, routing: &str) -> Option<PendingRegistration> {
        self.pending.remove(routing)
    }

    /// Store a reset token, dropping any earlier one for the same email
    pub fn replace_reset(&mut self, reset: PasswordReset) {
        let email = normalize_email(&reset.email);
        self.resets
            .retain(|_, existing| normalize_email(&existing.email) != email);
        self.resets.insert(reset.token.clone(), reset);
    }

    /// Classify a reset token; an expired reset is moved to a tombstone
    pub fn reset_state(&mut self, token: &str, now: DateTime<Utc>) -> LinkState {
        if let Some(r) = self.resets.get(token) {
            if !is_expired(r.expires_at, now) {
                return LinkState::Live;
            }
            self.expired_resets.insert(token.to_string(), r.expires_at);
            self.resets.remove(token);
            return LinkState::Expired;
        }
        if self.expired_resets.contains_key(token) {
            LinkState::Expired
        } else {
            LinkState::Unknown
        }
    }

    pub fn take_reset(&mut self, token: &str) -> Option<PasswordReset> {
        self.resets.remove(token)
    }

    /// Tombstone every expired pending registration and reset token, and
    /// forget tombstones older than the retention window.
    ///
    /// Returns how many live entries were expired.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.pending.len() + self.resets.len();

        let expired_pending: Vec<(String, DateTime<Utc>)> = self
            .pending
            .values()
            .filter(|p| is_expired(p.expires_at, now))
            .map(|p| (p.routing.clone(), p.expires_at))
            .collect();
        for (routing, expires_at) in expired_pending {
            self.pending.remove(&routing);
            self.expired_routings.insert(routing, expires_at);
        }

        let expired_resets: Vec<(String, DateTime<Utc>)> = self
            .resets
            .values()
            .filter(|r| is_expired(r.expires_at, now))
            .map(|r| (r.token.clone(), r.expires_at))
            .collect();
        for (token, expires_at) in expired_resets {
            self.resets.remove(&token);
            self.expired_resets.insert(token, expires_at);
        }

        let retention = retention();
        self.expired_routings
            .retain(|_, expires_at| !is_expired(*expires_at + retention, now));
        self.expired_resets
            .retain(|_, expires_at| !is_expired(*expires_at + retention, now));

        before - (self.pending.len() + self.resets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::services::password::hash_password;

    fn pending(routing: &str, email: &str, expires_at: DateTime<Utc>) -> PendingRegistration {
        PendingRegistration {
            routing: routing.to_string(),
            token: format!("token-{}", routing),
            email: email.to_string(),
            password: hash_password("hunter22").unwrap(),
            expires_at,
        }
    }

    #[test]
    fn test_accounts_are_case_insensitive() {
        let mut store = AccountStore::new();
        store.insert_account(Account {
            id: "acct-1".to_string(),
            email: "Ada@Example.com".to_string(),
            password: hash_password("hunter22").unwrap(),
            created_at: Utc::now(),
        });

        assert!(store.account("ada@example.com").is_some());
        assert!(store.account("  ADA@EXAMPLE.COM ").is_some());
        assert!(store.account("bob@example.com").is_none());
    }

    #[test]
    fn test_replace_pending_keeps_one_per_email() {
        let mut store = AccountStore::new();
        let later = Utc::now() + Duration::minutes(5);
        store.replace_pending(pending("r1", "ada@example.com", later));
        store.replace_pending(pending("r2", "ADA@example.com", later));

        assert!(store.pending("r1").is_none());
        assert!(store.pending("r2").is_some());
    }

    #[test]
    fn test_routing_state() {
        let mut store = AccountStore::new();
        let now = Utc::now();
        store.replace_pending(pending("live", "a@example.com", now + Duration::minutes(5)));
        store.replace_pending(pending("old", "b@example.com", now - Duration::seconds(1)));

        assert_eq!(store.routing_state("live", now), LinkState::Live);
        assert_eq!(store.routing_state("old", now), LinkState::Expired);
        assert_eq!(store.routing_state("old", now), LinkState::Expired);
        assert!(store.pending("old").is_none());
        assert_eq!(store.routing_state("missing", now), LinkState::Unknown);
    }

    #[test]
    fn test_reset_state_stays_expired() {
        let mut store = AccountStore::new();
        let now = Utc::now();
        store.replace_reset(PasswordReset {
            token: "old".to_string(),
            email: "a@example.com".to_string(),
            expires_at: now - Duration::seconds(1),
        });

        assert_eq!(store.reset_state("old", now), LinkState::Expired);
        assert_eq!(store.reset_state("old", now), LinkState::Expired);
        assert!(store.take_reset("old").is_none());
        assert_eq!(store.reset_state("missing", now), LinkState::Unknown);
    }

    #[test]
    fn test_purge_expired() {
        let mut store = AccountStore::new();
        let now = Utc::now();
        store.replace_pending(pending("live", "a@example.com", now + Duration::minutes(5)));
        store.replace_pending(pending("old", "b@example.com", now));
        store.replace_reset(PasswordReset {
            token: "reset".to_string(),
            email: "a@example.com".to_string(),
            expires_at: now - Duration::minutes(1),
        });

        assert_eq!(store.purge_expired(now), 2);
        assert!(store.pending("live").is_some());
        assert_eq!(store.routing_state("old", now), LinkState::Expired);
        assert_eq!(store.reset_state("reset", now), LinkState::Expired);
    }

    #[test]
    fn test_tombstones_are_forgotten_after_retention() {
        let mut store = AccountStore::new();
        let expired_at = Utc::now() - Duration::minutes(1);
        store.replace_pending(pending("old", "b@example.com", expired_at));
        store.replace_reset(PasswordReset {
            token: "reset".to_string(),
            email: "a@example.com".to_string(),
            expires_at: expired_at,
        });

        let within = expired_at + retention() - Duration::seconds(1);
        store.purge_expired(within);
        assert_eq!(store.routing_state("old", within), LinkState::Expired);
        assert_eq!(store.reset_state("reset", within), LinkState::Expired);

        let after = expired_at + retention();
        assert_eq!(store.purge_expired(after), 0);
        assert_eq!(store.routing_state("old", after), LinkState::Unknown);
        assert_eq!(store.reset_state("reset", after), LinkState::Unknown);
    }
}
