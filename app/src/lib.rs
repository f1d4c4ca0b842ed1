// Core game logic modules
pub mod core;

// Errors
pub mod error;

// Services (business logic)
pub mod services;

// Wire models (requests/responses)
pub mod models;

// HTTP and WebSocket routes
pub mod routes;

// Configuration
pub mod config;

// Application state
pub mod state;
