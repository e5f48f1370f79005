use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use vuedata::mcp::{VuedataMcpServer, types::GetConfigParams};

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = VuedataMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["sourceRoot"], "./");
    assert_eq!(json_result["config"]["noUnusedData"], "warn");
    assert_eq!(json_result["config"]["ignoreTestFiles"], true);
    assert!(json_result["config"]["includes"].is_array());
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "sourceRoot": "client",
            "rules": { "no-unused-data": "error" }
        }))
        .unwrap();
    let server = VuedataMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["sourceRoot"], "client");
    assert_eq!(json_result["config"]["noUnusedData"], "error");
}

#[tokio::test]
async fn test_get_config_invalid_file_is_an_error() {
    let fixture = McpTestFixture::new().unwrap();
    std::fs::write(fixture.root_path().join(".vuedatarc.json"), "{ not json").unwrap();
    let server = VuedataMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    assert!(server.get_config(params).await.is_err());
}
