//! Client orchestration for the transaction fraud assessment page.
//!
//! Two forms talk to the prediction backend: a single transaction check and
//! a date range analysis. Their controllers validate input, call the backend
//! through [`api::predictor::PredictionApi`], and render the response into an
//! in-memory [`page::Document`] with the stateless functions in
//! [`services::render_service`].

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod models;
pub mod page;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_support;
