//! Networking module - The contract with the rule authority service

pub mod client;

pub use client::{HttpAuthority, MoveOutcome, QueryReply, RuleAuthority};
