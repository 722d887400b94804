//! Full payment lifecycle against an in-process scripted gateway.
//!
//! Demonstrates the transport seam: the whole client pipeline (validation,
//! parameter assembly, decoding) runs for real, while the gateway itself is a
//! scripted fake. No network, no credentials, reproducible output.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example fake_gateway
//! ```

#![allow(
    clippy::print_stdout,
    clippy::uninlined_format_args,
    clippy::use_debug,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::{collections::VecDeque, sync::Mutex};

use sberbank_acquiring::{
    GatewayClient, HttpMethod, HttpTransport, OrderStatusRequest, RegisterOrderRequest,
    ReverseOrderRequest, TransportError, TransportReply, TransportResult,
};
use url::Url;

/// Answers each exchange from a fixed script, printing what the wire carries.
#[derive(Debug)]
struct ScriptedGateway {
    replies: Mutex<VecDeque<&'static str>>,
}

impl HttpTransport for ScriptedGateway {
    async fn send<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a Url,
        params: &'a [(String, String)],
    ) -> TransportResult {
        println!("   wire: {} {} ({} parameters)", method.as_str(), url, params.len());
        let body = self
            .replies
            .lock()
            .map_err(|_| TransportError::new("reply script lock poisoned"))?
            .pop_front()
            .unwrap_or(r#"{"errorCode":0}"#);
        Ok(TransportReply { status: 200, body: body.as_bytes().to_vec() })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Sberbank Acquiring: Scripted Gateway Walkthrough\n");

    let gateway = ScriptedGateway {
        replies: Mutex::new(VecDeque::from([
            r#"{"errorCode":0,"orderId":"70906e55-7114-41d6-8332-4609dc6590f4","formUrl":"https://3dsec.sberbank.ru/payment/merchants/demo/payment_ru.html"}"#,
            r#"{"errorCode":0,"orderStatus":1,"orderNumber":"demo-1","amount":250000}"#,
            r#"{"errorCode":0,"orderStatus":3}"#,
        ])),
    };

    let client = GatewayClient::builder("demo-merchant", "demo-secret").build_with(gateway)?;

    // 1. Register: the fake assigns an orderId and a payment form URL
    println!("1. Registering order demo-1 for 2500.00 RUB...");
    let order = RegisterOrderRequest::new("demo-1", 250_000, "https://shop.example/return");
    let reply = client.register_order(&order).await?;
    let order_id = reply.order_id.unwrap_or_default();
    println!("   ✓ orderId: {}", order_id);
    println!("   ✓ formUrl: {}\n", reply.form_url.unwrap_or_default());

    // 2. Status: the authorization is holding the funds
    println!("2. Checking the order status...");
    let status = client.order_status(&OrderStatusRequest::by_order_id(&order_id)).await?;
    println!("   ✓ orderStatus: {:?} = {:?}\n", status.order_status, status.order_state());

    // 3. Reverse the authorization before settlement
    println!("3. Reversing the authorization...");
    let reversal = client.reverse_order(&ReverseOrderRequest::new(&order_id, 250_000)).await?;
    println!("   ✓ errorCode: {:?}, state now {:?}", reversal.error_code, reversal.order_state());

    println!("\n✓ Walkthrough complete");
    Ok(())
}
