use crate::Result;
use crate::server::{self, AppState};
use colored::*;
use std::net::SocketAddr;

pub async fn execute_serve(port: u16) -> Result<()> {
    println!("{}", "Starting API server...".bright_blue());
    println!("  Port: {}", port);
    println!();

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    server::start_server(addr, AppState::default()).await
}
