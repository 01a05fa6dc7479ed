/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for mws-adapter tests

use mws_adapter::{ClientConfig, MwsClient};
use wiremock::MockServer;

#[allow(dead_code)]
pub const ACCESS_KEY_ID: &str = "AKIDEXAMPLE";
pub const SECRET_ACCESS_KEY: &str = "secret-key";
#[allow(dead_code)]
pub const MERCHANT_ID: &str = "A1SELLER";

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Config with a full set of test credentials
pub fn test_config() -> ClientConfig {
    ClientConfig::default()
        .with_credentials(ACCESS_KEY_ID, SECRET_ACCESS_KEY)
        .with_merchant_id(MERCHANT_ID)
}

/// Client that signs for the default host but dispatches to `server`
#[allow(dead_code)]
pub fn client_for(server: &MockServer, config: ClientConfig) -> MwsClient {
    MwsClient::with_base_url(config, &server.uri()).expect("client init")
}

/// Sample ListOrders response
#[allow(dead_code)]
pub fn list_orders_xml() -> &'static str {
    r#"<?xml version="1.0"?>
<ListOrdersResponse xmlns="https://mws.amazonservices.com/Orders/2013-09-01">
  <ListOrdersResult>
    <Orders>
      <Order>
        <AmazonOrderId>902-3159896-1390916</AmazonOrderId>
        <OrderStatus>Shipped</OrderStatus>
        <OrderTotal>
          <CurrencyCode>USD</CurrencyCode>
          <Amount>25.00</Amount>
        </OrderTotal>
      </Order>
      <Order>
        <AmazonOrderId>058-1233752-8214740</AmazonOrderId>
        <OrderStatus>Unshipped</OrderStatus>
      </Order>
    </Orders>
    <CreatedBefore>2024-01-01T00:00:00Z</CreatedBefore>
  </ListOrdersResult>
  <ResponseMetadata>
    <RequestId>88faca76-b600-46d2-b53c-0c8c4533e43a</RequestId>
  </ResponseMetadata>
</ListOrdersResponse>"#
}
