//! Skillscope API: resume skill scoring, follow-up re-scoring and a program
//! assistant, all backed by one hosted chat model.

pub mod analysis;
pub mod assistant;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod llm_client;
pub mod models;
pub mod presentation;
pub mod routes;
pub mod session;
pub mod state;
pub mod taxonomy;
