pub mod app;
pub mod app_state;
pub mod audit;
pub mod completion;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod middleware;
pub mod scrape;
pub mod telemetry;
