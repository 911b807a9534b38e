pub mod errors;
pub mod db;
pub mod place;
pub mod account;

#[cfg(test)]
mod tests;
