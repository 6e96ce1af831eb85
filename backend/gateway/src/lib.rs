pub mod server;
pub mod upload;

pub use server::{build_router, start_server, AppState};
