//! MCP server for contact verification.
//!
//! This module exposes the verification operations as MCP tools so AI
//! assistants can trigger runs and ad-hoc lookups.

pub mod handlers;

pub use handlers::VerifierMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the verifier MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until the client
/// disconnects. It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: VerifierMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
