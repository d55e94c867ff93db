//! HTTP server layer for PrasoCam.
//!
//! This module provides the HTTP API for publishing and serving the snapshot.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        HTTP Layer                          │
//! │            GET/PUT /prasocam.jpg   GET /health             │
//! │                                                            │
//! │  ┌─────────────┐  ┌──────────────┐  ┌───────────────────┐  │
//! │  │  handlers   │  │     auth     │  │      routes       │  │
//! │  │ (requests)  │  │ (basic auth) │  │ (router config)   │  │
//! │  └─────────────┘  └──────────────┘  └───────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{basic_authorization, validate_put_request, Credentials};
pub use handlers::{
    get_image_handler, health_handler, put_image_handler, AppState, ErrorResponse, HealthResponse,
};
pub use routes::{create_router, RouterConfig, IMAGE_ROUTE};
