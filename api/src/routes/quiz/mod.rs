pub mod quiz_request;
pub mod quiz_route;
