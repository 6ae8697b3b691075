//! Business logic services (use cases).
//!
//! Services orchestrate repository calls, probes and business rules. They
//! depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod cron_auth;
pub mod directory;
pub mod hash;
pub mod keygen;
pub mod sweep;

#[cfg(test)]
pub(crate) mod testing;
