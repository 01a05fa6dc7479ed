/*
[INPUT]:  MWS credentials from environment variables
[OUTPUT]: Parsed ListOrders response printed as JSON
[POS]:    Examples - signed request round trip
[UPDATE]: When the client surface changes
*/

use mws_adapter::*;

/// Example: sign and send a ListOrders call
///
/// Set MWS_ACCESS_KEY_ID, MWS_SECRET_ACCESS_KEY and MWS_MERCHANT_ID first.
#[tokio::main]
async fn main() {
    println!("=== MWS ListOrders Example ===\n");

    let env = |name: &str| std::env::var(name).unwrap_or_default();
    let config = ClientConfig::default()
        .with_credentials(env("MWS_ACCESS_KEY_ID"), env("MWS_SECRET_ACCESS_KEY"))
        .with_merchant_id(env("MWS_MERCHANT_ID"));

    let client = match MwsClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let spec = RequestSpec::new("/Orders/2013-09-01")
        .param("Action", "ListOrders")
        .param("Version", "2013-09-01")
        .param("MarketplaceId.Id.1", "ATVPDKIKX0DER")
        .param("CreatedAfter", "2024-01-01T00:00:00Z");

    match client.build(&spec) {
        Ok(signed) => println!("Signed URL: {}\n", signed.url),
        Err(e) => {
            eprintln!("Failed to sign request: {}", e);
            return;
        }
    }

    match client.request(&spec).await {
        Ok(parsed) => match serde_json::to_string_pretty(&parsed) {
            Ok(json) => println!("✓ Response:\n{}", json),
            Err(e) => println!("✗ Could not render response: {}", e),
        },
        Err(e) => println!("✗ Error: {}", e),
    }
}
