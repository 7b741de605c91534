//! MSSQL Kubernetes charm
//!
//! A Juju charm managing a containerized Microsoft SQL Server deployment
//! on Kubernetes. Each lifecycle hook validates operator configuration,
//! builds a declarative pod specification, and submits it through the
//! Juju pod-spec API. This library exposes the handlers, validators, and
//! builders for the hook binary and the integration tests.

// Core modules
pub mod config;
pub mod error;
pub mod validation;

// Juju surface
pub mod backend;
pub mod hooks;
pub mod status;

// Charm logic
pub mod charm;
pub mod podspec;

// Unit-local stored state
pub mod state;
