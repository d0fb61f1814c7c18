//! JSON-RPC signing agent.
//!
//! Forwards typed-data signing requests to a node or wallet that exposes
//! `eth_signTypedData` over HTTP. The remote side holds the keys.

use crate::{AccountError, SigningAgent};
use alloy::dyn_abi::TypedData;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use tnft_types::Address;

#[derive(Debug, Deserialize)]
struct RpcResponse {
	#[serde(default)]
	result: Option<Value>,
	#[serde(default)]
	error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
	code: i64,
	message: String,
}

/// Signing agent reached over JSON-RPC 2.0.
pub struct RpcSigningAgent {
	client: reqwest::Client,
	url: String,
	next_id: AtomicU64,
}

impl RpcSigningAgent {
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			url: url.into(),
			next_id: AtomicU64::new(1),
		}
	}

	/// Sends one request and returns its `result` member.
	async fn call(&self, method: &str, params: Value) -> Result<Value, AccountError> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let request = json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": method,
			"params": params,
		});

		let response: RpcResponse = self
			.client
			.post(&self.url)
			.json(&request)
			.send()
			.await
			.and_then(|r| r.error_for_status())
			.map_err(|e| AccountError::Transport(format!("{} request failed: {}", method, e)))?
			.json()
			.await
			.map_err(|e| AccountError::Transport(format!("Invalid {} response: {}", method, e)))?;

		if let Some(error) = response.error {
			tracing::warn!(method, code = error.code, message = %error.message, "Signing agent returned an error");
			return Err(AccountError::Rejected(format!(
				"{} (code {})",
				error.message, error.code
			)));
		}

		response
			.result
			.filter(|r| !r.is_null())
			.ok_or_else(|| AccountError::Rejected(format!("{} returned no result", method)))
	}
}

#[async_trait]
impl SigningAgent for RpcSigningAgent {
	async fn sign_typed_data(
		&self,
		signer: Address,
		document: &TypedData,
	) -> Result<String, AccountError> {
		let params = json!([signer.to_checksum(None), document]);
		match self.call("eth_signTypedData", params).await? {
			Value::String(signature) => Ok(signature),
			other => Err(AccountError::Rejected(format!(
				"Expected a hex signature, got {}",
				other
			))),
		}
	}

	async fn accounts(&self) -> Result<Vec<Address>, AccountError> {
		let result = self.call("eth_accounts", json!([])).await?;
		serde_json::from_value(result)
			.map_err(|e| AccountError::Transport(format!("Invalid eth_accounts result: {}", e)))
	}
}

/// Factory function to create a JSON-RPC signing agent from configuration.
///
/// Configuration parameters:
/// - `url` (required): HTTP endpoint of the agent
pub fn create_account(config: &toml::Value) -> Result<Box<dyn SigningAgent>, AccountError> {
	let url = config
		.get("url")
		.and_then(|v| v.as_str())
		.filter(|url| !url.is_empty())
		.ok_or_else(|| AccountError::Implementation("url is required".into()))?;

	Ok(Box::new(RpcSigningAgent::new(url)))
}

/// Registry for the JSON-RPC implementation.
pub struct Registry;

impl tnft_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "rpc";
	type Factory = crate::AccountFactory;

	fn factory() -> Self::Factory {
		create_account
	}
}

impl crate::AccountRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{http::StatusCode, routing::post, Json, Router};
	use std::sync::{Arc, Mutex};

	const SIGNATURE: &str = "0x\
		1111111111111111111111111111111111111111111111111111111111111111\
		2222222222222222222222222222222222222222222222222222222222222222\
		1b";

	/// Starts a JSON-RPC stub that answers every request with `reply` and
	/// records what it received.
	async fn spawn_stub(reply: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let recorded = seen.clone();
		let app = Router::new().route(
			"/",
			post(move |Json(request): Json<Value>| {
				let mut body = reply.clone();
				let recorded = recorded.clone();
				async move {
					body["id"] = request["id"].clone();
					recorded.lock().unwrap().push(request);
					Json(body)
				}
			}),
		);

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});
		(format!("http://{}/", addr), seen)
	}

	fn document() -> TypedData {
		serde_json::from_value(json!({
			"types": {
				"EIP712Domain": [{ "name": "name", "type": "string" }],
				"Ping": [{ "name": "value", "type": "uint256" }]
			},
			"primaryType": "Ping",
			"domain": { "name": "Ping" },
			"message": { "value": 1 }
		}))
		.unwrap()
	}

	#[tokio::test]
	async fn test_sign_typed_data_request_shape() {
		let (url, seen) = spawn_stub(json!({ "jsonrpc": "2.0", "result": SIGNATURE })).await;
		let agent = RpcSigningAgent::new(url);
		let signer: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();

		let signature = agent.sign_typed_data(signer, &document()).await.unwrap();
		assert_eq!(signature, SIGNATURE);

		let requests = seen.lock().unwrap();
		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0]["method"], "eth_signTypedData");
		assert_eq!(requests[0]["jsonrpc"], "2.0");
		assert_eq!(
			requests[0]["params"][0],
			"0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
		);
		assert_eq!(requests[0]["params"][1]["primaryType"], "Ping");
	}

	#[tokio::test]
	async fn test_error_member_is_rejection() {
		let (url, _) = spawn_stub(json!({
			"jsonrpc": "2.0",
			"error": { "code": -32000, "message": "user denied" }
		}))
		.await;
		let agent = RpcSigningAgent::new(url);

		let result = agent
			.sign_typed_data(Address::ZERO, &document())
			.await;
		assert!(matches!(result, Err(AccountError::Rejected(msg)) if msg.contains("user denied")));
	}

	#[tokio::test]
	async fn test_missing_result_is_rejection() {
		let (url, _) = spawn_stub(json!({ "jsonrpc": "2.0" })).await;
		let agent = RpcSigningAgent::new(url);

		let result = agent
			.sign_typed_data(Address::ZERO, &document())
			.await;
		assert!(matches!(result, Err(AccountError::Rejected(_))));
	}

	#[tokio::test]
	async fn test_http_failure_is_transport_error() {
		let app = Router::new().route("/", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		tokio::spawn(async move {
			axum::serve(listener, app).await.unwrap();
		});

		let agent = RpcSigningAgent::new(format!("http://{}/", addr));
		let result = agent
			.sign_typed_data(Address::ZERO, &document())
			.await;
		assert!(matches!(result, Err(AccountError::Transport(_))));
	}

	#[tokio::test]
	async fn test_unreachable_agent_is_transport_error() {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);

		let agent = RpcSigningAgent::new(format!("http://{}/", addr));
		let result = agent.accounts().await;
		assert!(matches!(result, Err(AccountError::Transport(_))));
	}

	#[tokio::test]
	async fn test_accounts() {
		let (url, seen) = spawn_stub(json!({
			"jsonrpc": "2.0",
			"result": ["0x70997970c51812dc3a010c7d01b50e0d17dc79c8"]
		}))
		.await;
		let agent = RpcSigningAgent::new(url);

		let accounts = agent.accounts().await.unwrap();
		assert_eq!(
			accounts,
			vec!["0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
				.parse::<Address>()
				.unwrap()]
		);
		assert_eq!(seen.lock().unwrap()[0]["method"], "eth_accounts");
	}

	#[test]
	fn test_factory_requires_url() {
		let config = toml::Value::Table(toml::Table::new());
		assert!(matches!(
			create_account(&config),
			Err(AccountError::Implementation(_))
		));
	}
}
