pub mod balancer;
pub mod dataset;
pub mod error;
pub mod materializer;
pub mod operations;
pub mod scanner;
pub mod splitter;
pub mod taxonomy;
pub mod verifier;
