//! Service layer for map markers and accounts.
//! - Repositories abstract persistence (SeaORM implementation plus in-memory mocks).
//! - Services hold the business rules and return tagged outcomes.
//! - Nothing here knows about HTTP.

pub mod errors;
pub mod places;
pub mod accounts;
#[cfg(test)]
pub mod test_support;
