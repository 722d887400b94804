//! Order registration walkthrough against the gateway sandbox.
//!
//! Registers a small test order, prints the payment form URL, and polls the
//! order status once.
//!
//! # Running this example
//!
//! Set your sandbox credentials and run:
//! ```bash
//! export GATEWAY_LOGIN=<your-test-login>
//! export GATEWAY_PASSWORD=<your-test-password>
//! cargo run --example register_and_poll
//! ```
//!
//! Set `RUST_LOG=sberbank_acquiring=debug` to watch the operation spans.

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    clippy::use_debug,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::env;

use sberbank_acquiring::{
    EndpointMode, Error, GatewayClient, OrderStatusRequest, RegisterOrderRequest,
};

/// Loads merchant credentials from environment variables.
///
/// # Security Warning
///
/// Never hardcode gateway credentials in source code or commit them to version
/// control. Always load them from secure storage (secrets manager, environment).
fn load_credentials() -> Result<(String, String), Box<dyn std::error::Error>> {
    let login = env::var("GATEWAY_LOGIN").map_err(|_| {
        "GATEWAY_LOGIN environment variable not set.\nSet it with: export GATEWAY_LOGIN=<login>"
    })?;
    let password = env::var("GATEWAY_PASSWORD").map_err(|_| {
        "GATEWAY_PASSWORD environment variable not set.\nSet it with: export \
         GATEWAY_PASSWORD=<password>"
    })?;
    Ok((login, password))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Sberbank Acquiring: Register and Poll Example\n");

    println!("SECURITY NOTICE:");
    println!("  Never hardcode gateway credentials in production code");
    println!("  Always load from secure storage (secrets manager, environment)");
    println!("  Never commit credentials to version control\n");

    // Step 1: Load merchant credentials from environment
    println!("1. Loading merchant credentials from environment...");
    let (login, password) = load_credentials()?;
    println!("   ✓ Credentials loaded");

    // Step 2: Build a sandbox-mode client
    println!("\n2. Building a sandbox-mode client...");
    let client = GatewayClient::builder(login, password).mode(EndpointMode::Test).build()?;
    println!("   ✓ Client addresses {}", client.endpoint().base_url());

    // Step 3: Register an order
    let order_number = format!("demo-{}", std::process::id());
    println!("\n3. Registering order {} for 100.00 RUB...", order_number);
    let order = RegisterOrderRequest {
        currency: Some(643),
        language: Some("ru".to_owned()),
        ..RegisterOrderRequest::new(&order_number, 10_000, "https://shop.example/return")
    };

    let order_id = match client.register_order(&order).await {
        Ok(reply) if reply.is_success() => {
            println!("   ✓ Order registered");
            println!("   Order ID: {}", reply.order_id.clone().unwrap_or_default());
            println!("   Payment form: {}", reply.form_url.unwrap_or_default());
            reply.order_id
        }
        Ok(reply) => {
            println!("   ✗ Gateway refused the order");
            println!("   errorCode: {:?}", reply.error_code);
            println!("   errorMessage: {}", reply.error_message.unwrap_or_default());
            None
        }
        Err(e) => {
            report_failure(&e);
            return Err(e.into());
        }
    };

    // Step 4: Poll the order status once
    println!("\n4. Polling the order status...");
    let status_request = match order_id {
        Some(order_id) => OrderStatusRequest::by_order_id(order_id),
        None => OrderStatusRequest::by_order_number(&order_number),
    };
    match client.order_status(&status_request).await {
        Ok(reply) => {
            println!("   ✓ Status received");
            println!("   orderStatus: {:?}", reply.order_status);
            println!("   state: {:?}", reply.order_state());
        }
        Err(e) => report_failure(&e),
    }

    println!("\n✓ Example complete");
    Ok(())
}

/// Prints recovery guidance for each error class.
fn report_failure(error: &Error) {
    match error {
        Error::Configuration(msg) => {
            eprintln!("   ✗ Configuration error: {}", msg);
            eprintln!("   → Fix: check credentials, base URL, and TLS settings");
        }
        Error::Validation { field, message } => {
            eprintln!("   ✗ Invalid `{}`: {}", field, message);
            eprintln!("   → Fix: correct the field and resubmit");
            eprintln!("   → Note: nothing was sent to the gateway");
        }
        Error::Transport(e) => {
            eprintln!("   ✗ Network failure: {}", e);
            eprintln!("   → The gateway may or may not have seen the request");
            eprintln!("   → Query the order status before retrying a registration");
        }
        Error::Decode(e) => {
            eprintln!("   ✗ Unreadable gateway reply: {}", e);
            eprintln!("   → Usually a maintenance page or an interfering proxy; retry later");
        }
    }
}
