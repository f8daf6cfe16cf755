//! Business operations for users, their addresses and the services on those
//! addresses. Handlers in the `server` crate call into these functions; the
//! entities themselves live in the `models` crate.

pub mod errors;
pub mod validation;
pub mod domain;
pub mod user_service;
pub mod address_service;
pub mod service_service;
#[cfg(test)]
pub mod test_support;
