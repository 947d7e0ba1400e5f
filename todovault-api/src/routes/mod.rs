/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User collection and per-user endpoints
/// - `tasks`: Per-user task endpoints

pub mod health;
pub mod tasks;
pub mod users;
