//! SeaORM entities for the subscriber schema (`users` → `addresses` →
//! `services`) plus the small data-access helpers built on them.

pub mod errors;
pub mod db;
pub mod user;
pub mod address;
pub mod service;

#[cfg(test)]
mod tests;
