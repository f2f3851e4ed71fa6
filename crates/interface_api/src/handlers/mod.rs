//! Request handlers

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod intake;
pub mod patients;
pub mod recommendations;
pub mod treatments;
