//! Synthetic credential generation for AuthBook.
//!
//! A [`CredentialGenerator`] turns a batch of product addresses into
//! `{email, password}` pairs. Emails are unique within one call; nothing is
//! remembered between calls, since accounts are scoped per test environment.
//!
//! Randomness is injected: pass any [`rand::Rng`] (a seeded `StdRng` in
//! tests, `thread_rng()` in production).

pub mod config;
pub mod email;
pub mod generator;

pub use config::GeneratorConfig;
pub use generator::CredentialGenerator;
