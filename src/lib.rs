pub mod configuration;
pub mod console;
pub mod health;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod startup;
pub mod stores;
pub mod telemetry;
