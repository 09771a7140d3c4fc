//! Integration tests for the Skillwright generation pipeline

mod build_command;
mod config_integration;
mod scheduler_lifecycle;
mod support;
mod wizard_flow;
