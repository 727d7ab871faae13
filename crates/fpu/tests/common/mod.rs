//! Shared test infrastructure.


/// Mock collaborators.
pub mod mocks;
