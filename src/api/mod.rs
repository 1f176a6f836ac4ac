//! # Backend API
//!
//! Wire types and HTTP client for the classification backend.
//!
//! The backend exposes two analysis endpoints (`POST /api/identify` for raw
//! text, `POST /api/upload` for document files) plus a health probe at `/`.
//! Everything here is request/response plumbing — the classification itself
//! happens server-side.

pub mod client;
pub mod types;

pub use client::{AnalysisBackend, ApiError, HttpBackend};
pub use types::{
    AnalysisResponse, AnalysisStats, ComponentType, IdentifiedComponent, Location,
    ReusePotential, ServiceHealth,
};
