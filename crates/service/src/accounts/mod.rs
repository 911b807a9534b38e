//! Accounts: signup, login and the field rules guarding them.
//!
//! Same three layers as places (domain, repository, service) plus `validation`,
//! which holds both the server-side login gate and the form rule sets.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod validation;
pub mod repo {
    pub mod seaorm;
}

pub use service::AccountService;
