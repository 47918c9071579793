// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Run sessions (one authoritative game per player, with optional spectators)
//! - Anti-spam protection and error frames shared by the WebSocket actors

pub mod state;
pub mod router;
pub mod run_session;
pub mod anti_spam;
pub mod ws_actor_utils;
pub mod ws_error;
