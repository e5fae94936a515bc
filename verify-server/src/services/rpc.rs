//! Soroban RPC Client
//!
//! The submitter only needs two ledger capabilities, expressed by the
//! [`LedgerRpc`] trait. [`SorobanRpcClient`] implements them over Stellar
//! RPC's JSON-RPC 2.0 interface (`getLedgerEntries`, `simulateTransaction`).

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use stellar_strkey::ed25519::PublicKey;
use stellar_xdr::curr::{
    AccountId, LedgerEntryData, LedgerKey, LedgerKeyAccount, Limits, PublicKey as XdrPublicKey,
    ReadXdr, ScVal, TransactionEnvelope, Uint256, WriteXdr,
};
use thiserror::Error;
use tracing::{debug, instrument};

const JSONRPC_VERSION: &str = "2.0";

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Invalid RPC endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("RPC transport error: HTTP status {0}")]
    HttpStatus(StatusCode),
    #[error("RPC JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RPC returned an empty response")]
    EmptyResponse,
    #[error("RPC error [{code}]: {message}")]
    Rpc { code: i64, message: String },
    #[error("XDR error: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
}

/// Ledger state of the source account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    pub account_id: String,
    pub sequence: i64,
}

/// Outcome of a transaction simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Diagnostic reported by the RPC when the invocation failed
    pub error: Option<String>,
    /// Return value of the (single) host function invocation
    pub return_value: Option<ScVal>,
    pub latest_ledger: u32,
    pub min_resource_fee: Option<String>,
}

/// Ledger capabilities needed for read-only contract invocation
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Fetch the current account entry
    async fn get_account(&self, account: &PublicKey) -> Result<AccountState, RpcError>;

    /// Simulate a transaction without submitting it
    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulationResult, RpcError>;
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetLedgerEntriesResult {
    #[serde(default)]
    entries: Option<Vec<LedgerEntryResult>>,
}

#[derive(Debug, Deserialize)]
struct LedgerEntryResult {
    xdr: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulateTransactionResult {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    results: Option<Vec<SimulateHostFunctionResult>>,
    #[serde(default)]
    latest_ledger: u32,
    #[serde(default)]
    min_resource_fee: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SimulateHostFunctionResult {
    xdr: String,
}

/// JSON-RPC client for a Stellar RPC endpoint
#[derive(Clone)]
pub struct SorobanRpcClient {
    inner: Client,
    url: Url,
}

impl SorobanRpcClient {
    /// Build a client for an `http(s)://` endpoint
    pub fn new(endpoint: &str) -> Result<Self, RpcError> {
        let url = Url::parse(endpoint.trim())
            .map_err(|e| RpcError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RpcError::InvalidEndpoint(format!(
                "{endpoint}: unsupported scheme {}",
                url.scheme()
            )));
        }

        Ok(Self {
            inner: Client::builder().build()?,
            url,
        })
    }

    /// Endpoint used by the client
    pub fn endpoint(&self) -> &Url {
        &self.url
    }

    async fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, RpcError> {
        let payload = JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: 1,
            method,
            params,
        };

        let response = self.inner.post(self.url.clone()).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(RpcError::HttpStatus(response.status()));
        }

        let response: JsonRpcResponse = response.json().await?;
        if let Some(error) = response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = response.result.ok_or(RpcError::EmptyResponse)?;
        Ok(serde_json::from_value(result)?)
    }
}

/// Ledger key of an account entry, base64 XDR
pub fn account_ledger_key(account: &PublicKey) -> Result<String, RpcError> {
    let key = LedgerKey::Account(LedgerKeyAccount {
        account_id: AccountId(XdrPublicKey::PublicKeyTypeEd25519(Uint256(account.0))),
    });
    Ok(key.to_xdr_base64(Limits::none())?)
}

#[async_trait]
impl LedgerRpc for SorobanRpcClient {
    #[instrument(skip(self, account), fields(account = %account.to_string()))]
    async fn get_account(&self, account: &PublicKey) -> Result<AccountState, RpcError> {
        let key = account_ledger_key(account)?;
        let result: GetLedgerEntriesResult = self
            .call("getLedgerEntries", json!({ "keys": [key] }))
            .await?;

        let entry = result
            .entries
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| RpcError::AccountNotFound(account.to_string()))?;

        match LedgerEntryData::from_xdr_base64(&entry.xdr, Limits::none())? {
            LedgerEntryData::Account(entry) => {
                debug!(sequence = entry.seq_num.0, "Loaded account");
                Ok(AccountState {
                    account_id: account.to_string(),
                    sequence: entry.seq_num.0,
                })
            }
            _ => Err(RpcError::AccountNotFound(account.to_string())),
        }
    }

    #[instrument(skip(self, envelope))]
    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulationResult, RpcError> {
        let transaction = envelope.to_xdr_base64(Limits::none())?;
        let result: SimulateTransactionResult = self
            .call("simulateTransaction", json!({ "transaction": transaction }))
            .await?;

        let return_value = match result.results.unwrap_or_default().into_iter().next() {
            Some(first) if result.error.is_none() => {
                Some(ScVal::from_xdr_base64(&first.xdr, Limits::none())?)
            }
            _ => None,
        };

        Ok(SimulationResult {
            error: result.error,
            return_value,
            latest_ledger: result.latest_ledger,
            min_resource_fee: result.min_resource_fee,
        })
    }
}
