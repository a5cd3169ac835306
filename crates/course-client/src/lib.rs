//! # Course Client Library
//!
//! The course-marketplace client: store slices synced from the backend, the
//! voice/text search flow, and the lifecycle that wires them together.
//!
//! - **[model]**: Server records ([`Course`](model::Course), [`Review`](model::Review), [`User`](model::User)) and auth payloads.
//! - **[slices]**: The four store slices and their triggers.
//! - **[store]**: [`CourseStore`](store::CourseStore), the read side of every slice.
//! - **[clients]**: Typed wrappers over the search and auth endpoints.
//! - **[speech]**: Injectable recognition/synthesis capabilities.
//! - **[search]**: The search orchestrator actor.
//! - **[lifecycle]**: [`CourseSystem`](lifecycle::CourseSystem) and tracing setup.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod search;
pub mod slices;
pub mod speech;
pub mod store;
