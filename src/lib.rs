//! mdk: master-data editor kit
//!
//! Schema-driven create/edit panels for simple master-data records (item
//! types, units of measure, ports of discharge) and a company profile form
//! with a validated logo upload. Records are stored as YAML files in a
//! project directory and edited from the `mdk` command line.

pub mod cli;
pub mod core;
pub mod entities;
pub mod form;
pub mod logging;
pub mod panel;
pub mod schema;
pub mod upload;
pub mod yaml;
