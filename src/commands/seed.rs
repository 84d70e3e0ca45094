//! Seed command - fills the store with generated users for local development.
//!
//! Rows are written straight through the repository with creation dates one
//! day apart. Generated values already satisfy the creation rules.

use std::sync::Arc;

use chrono::{Duration, Utc};
use fake::faker::address::raw::{BuildingNumber, CityName, StateName, StreetName};
use fake::faker::internet::raw::{Password as FakePassword, SafeEmail};
use fake::faker::name::raw::{FirstName, LastName};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::EN;
use fake::Fake;

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::validation::{is_valid_email, is_valid_name};
use crate::domain::{NewUser, Password, UserRecord};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, UserRepository, UserStore};

/// Some generated names carry apostrophes; those are drawn again.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));

    let created = seed_users(repo.as_ref(), args.count).await?;

    tracing::info!(created, requested = args.count, "Seeding finished");
    Ok(())
}

/// Insert `count` generated users, skipping emails already taken.
///
/// Prints `id<TAB>email<TAB>password` for each row so the accounts can be
/// used to log in.
pub async fn seed_users(repo: &dyn UserRepository, count: u32) -> AppResult<u32> {
    let start = Utc::now();
    let mut created = 0u32;

    for day in 0..count {
        let candidate = generate_user()?;
        let password = Password::new(&candidate.password)?;

        let record = UserRecord {
            id: None,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
            password_hash: password.into_string(),
            phone: candidate.phone,
            address: candidate.address,
            region: candidate.region,
            commune: candidate.commune,
            created_at: start + Duration::days(i64::from(day)),
        };

        match repo.save(record).await {
            Ok(user) => {
                created += 1;
                println!("{}\t{}\t{}", user.id, user.email, candidate.password);
            }
            Err(AppError::DuplicateEmail) => {
                tracing::warn!("Generated email already registered, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}

/// One creation candidate that passes every creation rule.
pub fn generate_user() -> AppResult<NewUser> {
    let first_name = generate_name(|| FirstName(EN).fake())?;
    let last_name = generate_name(|| LastName(EN).fake())?;

    let email = loop {
        let email: String = SafeEmail(EN).fake();
        if is_valid_email(&email) {
            break email;
        }
    };

    let building: String = BuildingNumber(EN).fake();
    let street: String = StreetName(EN).fake();

    Ok(NewUser {
        id: None,
        first_name,
        last_name,
        email,
        password: FakePassword(EN, 8..16).fake(),
        phone: PhoneNumber(EN).fake(),
        address: format!("{} {}", street, building),
        region: StateName(EN).fake(),
        commune: CityName(EN).fake(),
    })
}

fn generate_name(mut draw: impl FnMut() -> String) -> AppResult<String> {
    (0..MAX_NAME_ATTEMPTS)
        .map(|_| draw())
        .find(|name| is_valid_name(name))
        .ok_or_else(|| AppError::internal("Could not generate a valid name"))
}
