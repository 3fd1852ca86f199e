pub mod doubt;
pub mod health_route;
pub mod ingest;
pub mod quiz;
pub mod summarize;
