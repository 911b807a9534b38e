//! Marker store: add, update, list and delete places.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::PlaceService;
