//! Tax Position Estimator for Australian individual income tax
//!
//! This crate estimates an Australian resident's tax position for an
//! assessment year from 2018-19 to 2024-25. It evaluates a taxpayer profile
//! against the year's rate table (progressive brackets, Medicare levy, low
//! income offsets and a family benefit estimate), compares alternative salary
//! sacrifice and deduction scenarios, and recommends the best one.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
