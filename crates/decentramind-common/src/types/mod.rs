//! Core data model shared by the DecentraMind engines

pub mod agent;
pub mod proposal;
pub mod treasury;
pub mod vote;
