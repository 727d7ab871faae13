//! Mock implementations of the unit's collaborators.

/// Mock reference model.
pub mod reference;
