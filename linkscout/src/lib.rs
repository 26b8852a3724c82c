pub mod handlers;
pub mod server;

pub use server::{AppState, create_router};
