use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    cli::commands::check::run_checks, config::load_config, core::CheckContext, issues::Issue,
};

use super::types::{
    ConfigDto, ConfigValues, GetConfigParams, Pagination, ScanUnusedDataParams, UnusedDataItem,
    UnusedDataScanResult,
};

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

#[derive(Clone)]
pub struct VuedataMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for VuedataMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl VuedataMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get project configuration
    #[tool(
        description = "Get the vuedata configuration (.vuedatarc.json) that applies to a project, or the defaults when no config file exists."
    )]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        };

        to_tool_result(&config_dto)
    }

    /// Scan components for unused data() keys
    #[tool(
        description = "Scan Vue single-file components for data() keys that the template never references. Returns paginated list of issues."
    )]
    pub async fn scan_unused_data(
        &self,
        params: Parameters<ScanUnusedDataParams>,
    ) -> Result<CallToolResult, McpError> {
        let project_root = Path::new(&params.0.project_root_path);
        let limit = params
            .0
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.0.offset.map(|v| v as usize).unwrap_or(0);

        let config = load_config(project_root)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {}", e), None))?
            .config;
        let root_dir = project_root.join(&config.source_root);

        let ctx = CheckContext::with_config(config, root_dir, false)
            .map_err(|e| McpError::internal_error(format!("Failed to initialize: {}", e), None))?;
        let result = run_checks(&ctx);

        let mut files: HashSet<&str> = HashSet::new();
        let all_items: Vec<UnusedDataItem> = result
            .issues
            .iter()
            .filter_map(|issue| match issue {
                Issue::UnusedData(unused) => {
                    files.insert(unused.context.file_path());
                    Some(UnusedDataItem::from(unused))
                }
                Issue::ParseError(_) => None,
            })
            .collect();

        let total_count = all_items.len();
        let total_file_count = files.len();

        let items: Vec<UnusedDataItem> = all_items.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + items.len() < total_count;

        let scan_result = UnusedDataScanResult {
            total_count,
            total_file_count,
            parse_error_count: result.parse_error_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        };

        to_tool_result(&scan_result)
    }
}

fn to_tool_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for VuedataMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "vuedata MCP finds dead component state in Vue projects: keys returned by a \
                 component's data() that its <template> never references.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. scan_unused_data - Get unused data() keys (paginated)\n\n\
                 Only the component's own template is inspected. A key that is only read from \
                 script code (computed properties, methods, watchers) is reported too, so check \
                 the script before deleting it."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = VuedataMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
