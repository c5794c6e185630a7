pub mod abstraction;
pub mod action;
mod backup;
pub mod config;
pub mod controller;
pub mod enumerator;
pub mod environment;
pub mod error;
pub mod model;
pub mod policy_iteration;
pub mod q_learning;
pub mod snapshot;
pub mod tables;
pub mod value_iteration;

#[cfg(test)]
mod tests;
