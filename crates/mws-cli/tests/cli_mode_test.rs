use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mws-cli"))
}

fn demo_config() -> String {
    format!("{}/demos/dry_run.yaml", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn dry_run_prints_signed_request() {
    let output = binary()
        .arg("--config")
        .arg(demo_config())
        .arg("--param")
        .arg("Action=ListOrders")
        .arg("--param")
        .arg("CreatedAfter=2024-01-01T00:00:00Z")
        .arg("--dry-run")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to start mws-cli binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let signed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(
        signed["url"],
        "https://mws.amazonservices.com:443/Orders/2013-09-01"
    );
    assert_eq!(signed["query"]["Action"], "ListOrders");
    assert_eq!(signed["query"]["SellerId"], "A1SELLER");
    assert_eq!(signed["query"]["Version"], "2013-09-01");
    assert!(signed["query"]["Signature"].is_string());
    assert_eq!(
        signed["headers"]["Content-Type"],
        "application/x-www-form-urlencoded; charset=utf-8"
    );
}

#[test]
fn rejects_malformed_param() {
    let output = binary()
        .arg("--config")
        .arg(demo_config())
        .arg("--param")
        .arg("ActionListOrders")
        .arg("--dry-run")
        .output()
        .expect("Failed to start mws-cli binary");

    assert!(!output.status.success());
}
