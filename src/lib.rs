//! Wheat Price Prediction Client
//!
//! This library provides the client-side request pipeline for the wheatcast
//! front end: form schema validation, GMT+1 (West Africa Time) date handling,
//! and the single and batch submission workflows against the remote
//! prediction service.

pub mod config;
pub mod models;
pub mod services;
pub mod workflows;
