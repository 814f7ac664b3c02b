//! MCP tool handlers for the verifier server.
//!
//! Every tool forwards to the same service methods the CLI uses.

use crate::bootstrap::AppContext;
use crate::services::{ContactVerifier, RunOptions, VerificationRun};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing verification tools.
#[derive(Clone)]
pub struct VerifierMcpServer {
    context: Arc<AppContext>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for VerifierMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "contact-verifier".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Verifies CRM contact freshness against public search results or by data-quality assessment, and writes results back to the CRM.".into()),
        }
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct RunToolParams {
    /// Maximum number of contacts to verify
    #[serde(default)]
    pub limit: Option<usize>,
    /// Skip contacts verified within this many months
    #[serde(default)]
    pub months: Option<u32>,
    /// Preview results without writing to the CRM
    #[serde(default)]
    pub dry_run: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckPersonParams {
    /// Full name of the person
    pub name: String,
    /// Current company, if known
    #[serde(default)]
    pub company: Option<String>,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl serde::Serialize) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

#[tool_router]
impl VerifierMcpServer {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self {
            context,
            tool_router: Self::tool_router(),
        }
    }

    fn run_options(&self, params: &RunToolParams) -> RunOptions {
        let defaults = self.context.default_run_options();
        RunOptions {
            limit: params.limit.unwrap_or(defaults.limit),
            months: params.months.unwrap_or(defaults.months),
            dry_run: params.dry_run.unwrap_or(defaults.dry_run),
        }
    }

    async fn run_with(
        &self,
        verifier: &dyn ContactVerifier,
        params: &RunToolParams,
    ) -> Result<CallToolResult, McpError> {
        let options = self.run_options(params);
        let VerificationRun {
            report,
            report_path,
        } = self
            .context
            .service
            .run(verifier, &options)
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "report_path": report_path.map(|p| p.display().to_string()),
            "report": report,
        }))
    }

    /// Verify stale CRM contacts through public search engines.
    #[tool(
        description = "Verify stale CRM contacts against public professional-network search results and write the verification status back to the CRM. Returns the run report with per-contact results."
    )]
    async fn verify_contacts(
        &self,
        params: Parameters<RunToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let verifier = self.context.search_verifier.clone();
        self.run_with(verifier.as_ref(), &params.0).await
    }

    /// Assess stale CRM contacts from their own fields.
    #[tool(
        description = "Assess stale CRM contacts for data quality (missing fields, invalid email domains, stale records) without external search, and write the outcome back to the CRM. Returns the run report with confidence scores."
    )]
    async fn assess_contact_quality(
        &self,
        params: Parameters<RunToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let verifier = self.context.quality_verifier.clone();
        self.run_with(verifier.as_ref(), &params.0).await
    }

    /// Look up one person without touching the CRM.
    #[tool(
        description = "Search public professional-network results for a person by name and optional company and classify the best match. Does not read or write the CRM."
    )]
    async fn check_person(
        &self,
        params: Parameters<CheckPersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let check = self
            .context
            .search_verifier
            .check_person(&params.name, params.company.as_deref())
            .await
            .map_err(to_mcp_error)?;

        json_result(&check)
    }
}
