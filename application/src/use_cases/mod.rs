//! Use cases
//!
//! - [`execute_parallel`] - fan a prompt out to every target model
//! - [`aggregate_responses`] - reduce a result list into one report

pub mod aggregate_responses;
pub mod execute_parallel;
