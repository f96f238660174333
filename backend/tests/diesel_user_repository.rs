//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! Opt in with `RUN_PG_EMBEDDED=1`. Each test provisions its own database on
//! a fresh cluster and drives the repository from a dedicated Tokio runtime,
//! since the embedded cluster bootstrap must not run inside one.

use chrono::NaiveDate;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use user_registry::domain::ports::{UserPersistenceError, UserRepository};
use user_registry::domain::{
    Address, PersonName, SortDirection, SortField, UserFilter, UserId, UserListQuery, UserProfile,
    Username,
};
use user_registry::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, ensure_users_table,
};

mod support;

use support::cluster_skip::{embedded_postgres_enabled, handle_cluster_setup_failure};
use support::pg_embed::{fresh_database, test_cluster};

struct Harness {
    runtime: Runtime,
    repository: DieselUserRepository,
    pool: DbPool,
    _cluster: TestCluster,
}

fn setup() -> Result<Harness, String> {
    let cluster = test_cluster()?;
    let url = fresh_database(&cluster)?;
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(
            PoolConfig::new(url).with_max_size(2).with_min_idle(Some(1)),
        ))
        .map_err(|err| err.to_string())?;
    runtime
        .block_on(ensure_users_table(&pool))
        .map_err(|err| err.to_string())?;
    Ok(Harness {
        runtime,
        repository: DieselUserRepository::new(pool.clone()),
        pool,
        _cluster: cluster,
    })
}

#[fixture]
fn harness() -> Option<Harness> {
    if !embedded_postgres_enabled() {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return None;
    }
    match setup() {
        Ok(harness) => Some(harness),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn profile(username: &str, email: Option<&str>, country: Option<&str>) -> UserProfile {
    UserProfile::new(
        Username::new(username).expect("username"),
        PersonName::first("Test").expect("first name"),
        PersonName::last(username).expect("last name"),
    )
    .with_email(email.map(str::to_owned))
    .with_address(Address {
        country: country.map(str::to_owned),
        ..Address::default()
    })
}

#[rstest]
fn insert_then_find_round_trips(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let ada = profile("ada", Some("ada@example.com"), Some("UK"))
        .with_phone(Some("+44 20 0000 0000".to_owned()))
        .with_date_of_birth(NaiveDate::from_ymd_opt(1815, 12, 10));

    let stored = h
        .runtime
        .block_on(h.repository.insert(&ada))
        .expect("insert");
    assert_eq!(stored.profile(), &ada);

    let found = h
        .runtime
        .block_on(h.repository.find_by_id(stored.id()))
        .expect("find");
    assert_eq!(found, Some(stored));
}

#[rstest]
fn identifiers_increase_and_are_not_reused(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let first = h
        .runtime
        .block_on(h.repository.insert(&profile("a", None, None)))
        .expect("insert a");
    let second = h
        .runtime
        .block_on(h.repository.insert(&profile("b", None, None)))
        .expect("insert b");
    assert!(second.id().get() > first.id().get());

    assert!(
        h.runtime
            .block_on(h.repository.delete(second.id()))
            .expect("delete")
    );
    let third = h
        .runtime
        .block_on(h.repository.insert(&profile("c", None, None)))
        .expect("insert c");
    assert!(third.id().get() > second.id().get());
}

#[rstest]
#[case(profile("ada", Some("other@example.com"), None), "username")]
#[case(profile("grace", Some("ada@example.com"), None), "email")]
fn duplicates_report_the_conflicting_column(
    harness: Option<Harness>,
    #[case] duplicate: UserProfile,
    #[case] field: &str,
) {
    let Some(h) = harness else { return };
    h.runtime
        .block_on(
            h.repository
                .insert(&profile("ada", Some("ada@example.com"), None)),
        )
        .expect("insert original");

    let error = h
        .runtime
        .block_on(h.repository.insert(&duplicate))
        .expect_err("duplicate rejected");
    assert_eq!(error, UserPersistenceError::conflict(field));
}

#[rstest]
fn several_users_may_omit_email(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    for name in ["a", "b", "c"] {
        h.runtime
            .block_on(h.repository.insert(&profile(name, None, None)))
            .expect("insert without email");
    }
}

#[rstest]
fn future_birth_date_violates_check(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let future = profile("ada", None, None).with_date_of_birth(NaiveDate::from_ymd_opt(9999, 1, 1));
    let error = h
        .runtime
        .block_on(h.repository.insert(&future))
        .expect_err("check violation");
    assert!(matches!(error, UserPersistenceError::Constraint { .. }));
}

#[rstest]
fn replace_overwrites_every_column(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let stored = h
        .runtime
        .block_on(
            h.repository
                .insert(&profile("ada", Some("ada@example.com"), Some("UK"))),
        )
        .expect("insert");

    let replacement = profile("ada", None, None);
    let replaced = h
        .runtime
        .block_on(h.repository.replace(stored.id(), &replacement))
        .expect("replace")
        .expect("row exists");
    assert_eq!(replaced.profile().email(), None);
    assert_eq!(replaced.profile().address().country, None);

    let missing = UserId::new(stored.id().get() + 1_000).expect("positive id");
    let absent = h
        .runtime
        .block_on(h.repository.replace(missing, &replacement))
        .expect("replace missing");
    assert!(absent.is_none());
}

#[rstest]
fn delete_reports_whether_a_row_was_removed(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    let stored = h
        .runtime
        .block_on(h.repository.insert(&profile("ada", None, None)))
        .expect("insert");

    let first = h.runtime.block_on(h.repository.delete(stored.id()));
    let second = h.runtime.block_on(h.repository.delete(stored.id()));
    assert_eq!(first, Ok(true));
    assert_eq!(second, Ok(false));
}

#[rstest]
fn list_filters_and_orders(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    for (name, country) in [("kenji", "Japan"), ("ada", "UK"), ("aiko", "Japan")] {
        h.runtime
            .block_on(h.repository.insert(&profile(name, None, Some(country))))
            .expect("insert");
    }

    let query = UserListQuery {
        filter: UserFilter {
            address_country: Some("Japan".to_owned()),
            ..UserFilter::default()
        },
        sort_by: SortField::Username,
        direction: SortDirection::Descending,
    };
    let users = h
        .runtime
        .block_on(h.repository.list(&query))
        .expect("list");
    let names: Vec<_> = users
        .iter()
        .map(|user| user.profile().username().as_str().to_owned())
        .collect();
    assert_eq!(names, ["kenji", "aiko"]);

    let none = UserListQuery {
        filter: UserFilter {
            address_country: Some("Peru".to_owned()),
            ..UserFilter::default()
        },
        ..UserListQuery::default()
    };
    assert_eq!(h.runtime.block_on(h.repository.list(&none)), Ok(Vec::new()));
}

#[rstest]
fn table_bootstrap_is_idempotent(harness: Option<Harness>) {
    let Some(h) = harness else { return };
    h.runtime
        .block_on(h.repository.insert(&profile("ada", None, None)))
        .expect("insert");
    h.runtime
        .block_on(ensure_users_table(&h.pool))
        .expect("second bootstrap");
    let users = h
        .runtime
        .block_on(h.repository.list(&UserListQuery::default()))
        .expect("list");
    assert_eq!(users.len(), 1);
}
