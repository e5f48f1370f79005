use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use vuedata::mcp::{VuedataMcpServer, types::ScanUnusedDataParams};

use crate::{
    McpTestFixture, assert_pagination, component_using_first, extract_tool_result_json,
    fixture_with_unused,
};

fn scan_params(
    fixture: &McpTestFixture,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Parameters<ScanUnusedDataParams> {
    Parameters(ScanUnusedDataParams {
        project_root_path: fixture.root(),
        limit,
        offset,
    })
}

// ============================================================================
// scan_unused_data tests
// ============================================================================

#[tokio::test]
async fn test_scan_unused_data_items() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_component("src/App.vue", &component_using_first(&["title", "draft"]))
        .unwrap();
    let server = VuedataMcpServer::new();

    let result = server
        .scan_unused_data(scan_params(&fixture, None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(json_result["totalFileCount"], 1);
    assert_eq!(json_result["parseErrorCount"], 0);

    let item = &json_result["items"][0];
    assert_eq!(item["name"], "draft");
    assert_eq!(item["line"], 9);
    assert_eq!(item["col"], 7);
    assert_eq!(item["severity"], "warning");
    assert_eq!(
        item["message"],
        "The \"draft\" has been defined in data but not used in the template."
    );
    assert!(item["filePath"].as_str().unwrap().ends_with("App.vue"));
    assert_pagination(&json_result, 0, 20, false);
}

#[tokio::test]
async fn test_scan_unused_data_empty_project() {
    let fixture = McpTestFixture::new().unwrap();
    let server = VuedataMcpServer::new();

    let result = server
        .scan_unused_data(scan_params(&fixture, None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 0);
    assert!(json_result["items"].as_array().unwrap().is_empty());
    assert_pagination(&json_result, 0, 20, false);
}

#[tokio::test]
async fn test_scan_unused_data_pagination() {
    let fixture = fixture_with_unused(5).unwrap();
    let server = VuedataMcpServer::new();

    let first = extract_tool_result_json(
        &server
            .scan_unused_data(scan_params(&fixture, Some(2), None))
            .await
            .unwrap(),
    );
    assert_eq!(first["totalCount"], 5);
    assert_eq!(first["totalFileCount"], 5);
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_eq!(first["items"][0]["name"], "unused0");
    assert_pagination(&first, 0, 2, true);

    let last = extract_tool_result_json(
        &server
            .scan_unused_data(scan_params(&fixture, Some(2), Some(4)))
            .await
            .unwrap(),
    );
    assert_eq!(last["items"].as_array().unwrap().len(), 1);
    assert_eq!(last["items"][0]["name"], "unused4");
    assert_pagination(&last, 4, 2, false);
}

#[tokio::test]
async fn test_scan_unused_data_limit_is_capped() {
    let fixture = fixture_with_unused(1).unwrap();
    let server = VuedataMcpServer::new();

    let result = server
        .scan_unused_data(scan_params(&fixture, Some(500), None))
        .await
        .unwrap();
    assert_pagination(&extract_tool_result_json(&result), 0, 100, false);
}

#[tokio::test]
async fn test_scan_unused_data_respects_config() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "sourceRoot": "client",
            "rules": { "no-unused-data": "error" }
        }))
        .unwrap();
    fixture
        .write_component("client/A.vue", &component_using_first(&["a", "b"]))
        .unwrap();
    fixture
        .write_component("server/B.vue", &component_using_first(&["c", "d"]))
        .unwrap();
    fixture
        .write_component("client/Broken.vue", "<script>export default {</script>")
        .unwrap();
    let server = VuedataMcpServer::new();

    let result = server
        .scan_unused_data(scan_params(&fixture, None, None))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(json_result["parseErrorCount"], 1);
    assert_eq!(json_result["items"][0]["name"], "b");
    assert_eq!(json_result["items"][0]["severity"], "error");
}

#[tokio::test]
async fn test_scan_unused_data_missing_root_is_an_error() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "sourceRoot": "does-not-exist" }))
        .unwrap();
    let server = VuedataMcpServer::new();

    let result = server
        .scan_unused_data(scan_params(&fixture, None, None))
        .await;
    assert!(result.is_err());
}
