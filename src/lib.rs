pub mod calendar;
pub mod config;
pub mod graph;
pub mod output;
pub mod report;
pub mod scoring;
pub mod task;
