// Quick-scan prediction: feature extraction, linear engine, result cache, batch runner.

pub mod batch;
pub mod cache;
pub mod engine;
pub mod features;
pub mod handlers;
pub mod keywords;
