//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Listing builds a boxed query: each present filter adds an equality
//! predicate and ordering is chosen from a closed set of columns, so no
//! caller text is spliced into SQL.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    SortDirection, SortField, User, UserFilter, UserId, UserListQuery, UserProfile,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from(row).map_err(|err| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    })
}

fn apply_filter(
    mut query: users::BoxedQuery<'static, Pg>,
    filter: &UserFilter,
) -> users::BoxedQuery<'static, Pg> {
    if let Some(username) = &filter.username {
        query = query.filter(users::username.eq(username.clone()));
    }
    if let Some(email) = &filter.email {
        query = query.filter(users::email.eq(email.clone()));
    }
    if let Some(first_name) = &filter.first_name {
        query = query.filter(users::firstname.eq(first_name.clone()));
    }
    if let Some(last_name) = &filter.last_name {
        query = query.filter(users::lastname.eq(last_name.clone()));
    }
    if let Some(country) = &filter.address_country {
        query = query.filter(users::address_country.eq(country.clone()));
    }
    query
}

fn apply_order(
    query: users::BoxedQuery<'static, Pg>,
    sort_by: SortField,
    direction: SortDirection,
) -> users::BoxedQuery<'static, Pg> {
    macro_rules! order {
        ($column:expr) => {
            match direction {
                SortDirection::Ascending => query.order_by($column.asc()),
                SortDirection::Descending => query.order_by($column.desc()),
            }
        };
    }

    let ordered = match sort_by {
        SortField::Id => return order!(users::id),
        SortField::Username => order!(users::username),
        SortField::FirstName => order!(users::firstname),
        SortField::LastName => order!(users::lastname),
        SortField::Email => order!(users::email),
        SortField::Avatar => order!(users::avatar),
        SortField::Phone => order!(users::phone),
        SortField::DateOfBirth => order!(users::date_of_birth),
        SortField::AddressCountry => order!(users::address_country),
        SortField::AddressCity => order!(users::address_city),
        SortField::AddressStreetName => order!(users::address_street_name),
        SortField::AddressStreetAddress => order!(users::address_street_address),
    };
    ordered.then_order_by(users::id.asc())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, profile: &UserProfile) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(users::table)
            .values(UserChangeset::from(profile))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(user_id = row.id, "inserted user row");
        row_to_user(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn replace(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(UserChangeset::from(profile))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn list(&self, query: &UserListQuery) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let statement = apply_filter(users::table.into_boxed(), &query.filter);
        let statement = apply_order(statement, query.sort_by, query.direction);

        let rows: Vec<UserRow> = statement
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}
