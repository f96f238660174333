//! Test utilities for the user registry crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`)
//! through the `test-support` feature.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    SortDirection, SortField, User, UserFilter, UserId, UserListQuery, UserProfile,
};

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn new(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }

    /// Noon UTC on the given day.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(Utc.from_utc_datetime(&noon))
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[derive(Debug, Default)]
struct Rows {
    last_id: i64,
    by_id: BTreeMap<i64, UserProfile>,
}

impl Rows {
    fn ensure_unique(
        &self,
        profile: &UserProfile,
        skip: Option<i64>,
    ) -> Result<(), UserPersistenceError> {
        for (id, existing) in &self.by_id {
            if Some(*id) == skip {
                continue;
            }
            if existing.username() == profile.username() {
                return Err(UserPersistenceError::conflict("username"));
            }
            if profile.email().is_some() && existing.email() == profile.email() {
                return Err(UserPersistenceError::conflict("email"));
            }
        }
        Ok(())
    }
}

/// In-memory [`UserRepository`] with the same identifier and uniqueness
/// rules as the PostgreSQL adapter.
///
/// Identifiers start at 1, increase monotonically and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Rows>,
}

impl InMemoryUserRepository {
    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock().map(|rows| rows.by_id.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Rows>, UserPersistenceError> {
        self.rows
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store lock poisoned"))
    }

    fn to_user(id: i64, profile: &UserProfile) -> Result<User, UserPersistenceError> {
        let id = UserId::new(id).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        Ok(User::new(id, profile.clone()))
    }
}

fn matches(filter: &UserFilter, profile: &UserProfile) -> bool {
    let eq = |wanted: &Option<String>, actual: Option<&str>| {
        wanted.as_deref().is_none_or(|wanted| actual == Some(wanted))
    };
    eq(&filter.username, Some(profile.username().as_str()))
        && eq(&filter.email, profile.email())
        && eq(&filter.first_name, Some(profile.first_name().as_str()))
        && eq(&filter.last_name, Some(profile.last_name().as_str()))
        && eq(&filter.address_country, profile.address().country.as_deref())
}

fn sort_text(profile: &UserProfile, field: SortField) -> Option<String> {
    let address = profile.address();
    match field {
        SortField::Id => None,
        SortField::Username => Some(profile.username().to_string()),
        SortField::FirstName => Some(profile.first_name().to_string()),
        SortField::LastName => Some(profile.last_name().to_string()),
        SortField::Email => profile.email().map(str::to_owned),
        SortField::Avatar => profile.avatar().map(str::to_owned),
        SortField::Phone => profile.phone().map(str::to_owned),
        SortField::DateOfBirth => profile.date_of_birth().map(|date| date.to_string()),
        SortField::AddressCountry => address.country.clone(),
        SortField::AddressCity => address.city.clone(),
        SortField::AddressStreetName => address.street_name.clone(),
        SortField::AddressStreetAddress => address.street_address.clone(),
    }
}

/// PostgreSQL ordering: NULLs sort last ascending and first descending.
fn compare_nullable(left: Option<&String>, right: Option<&String>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(right),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, profile: &UserProfile) -> Result<User, UserPersistenceError> {
        let mut rows = self.lock()?;
        rows.ensure_unique(profile, None)?;
        rows.last_id += 1;
        let id = rows.last_id;
        rows.by_id.insert(id, profile.clone());
        Self::to_user(id, profile)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let rows = self.lock()?;
        rows.by_id
            .get(&id.get())
            .map(|profile| Self::to_user(id.get(), profile))
            .transpose()
    }

    async fn replace(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut rows = self.lock()?;
        if !rows.by_id.contains_key(&id.get()) {
            return Ok(None);
        }
        rows.ensure_unique(profile, Some(id.get()))?;
        rows.by_id.insert(id.get(), profile.clone());
        Self::to_user(id.get(), profile).map(Some)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.by_id.remove(&id.get()).is_some())
    }

    async fn list(&self, query: &UserListQuery) -> Result<Vec<User>, UserPersistenceError> {
        let rows = self.lock()?;
        let mut found: Vec<(i64, &UserProfile)> = rows
            .by_id
            .iter()
            .filter(|(_, profile)| matches(&query.filter, profile))
            .map(|(id, profile)| (*id, profile))
            .collect();

        found.sort_by(|(left_id, left), (right_id, right)| {
            let primary = match query.sort_by {
                SortField::Id => left_id.cmp(right_id),
                field => compare_nullable(
                    sort_text(left, field).as_ref(),
                    sort_text(right, field).as_ref(),
                ),
            };
            let primary = match query.direction {
                SortDirection::Ascending => primary,
                SortDirection::Descending => primary.reverse(),
            };
            primary.then_with(|| left_id.cmp(right_id))
        });

        found
            .into_iter()
            .map(|(id, profile)| Self::to_user(id, profile))
            .collect()
    }
}
