//! Core business logic services

pub mod assembler;
pub mod country;
pub mod names;
pub mod overpass;
pub mod reconciler;
pub mod reference_registry;

#[cfg(test)]
pub mod test_support;
