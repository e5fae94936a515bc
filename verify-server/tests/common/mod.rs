//! Shared fixtures for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use proof_codec::{encode_proof, encode_public_inputs, ProofObject, Scalar};
use std::sync::atomic::{AtomicUsize, Ordering};
use stellar_strkey::ed25519::{PrivateKey, PublicKey};
use stellar_strkey::Contract;
use stellar_xdr::curr::{HostFunction, OperationBody, ScVal, TransactionEnvelope};
use verify_server::services::rpc::{AccountState, LedgerRpc, RpcError, SimulationResult};

pub const SOURCE_SEED: [u8; 32] = [21u8; 32];
pub const CONTRACT_BYTES: [u8; 32] = [42u8; 32];

/// snarkjs-shaped proof for the statement 3 * 11 = 33
pub const MULTIPLIER_PROOF: &str = r#"{
    "pi_a": [
        "3685416753713387016781088315183077757961620795782546409894578378688607592378376318836054947676345821548104185464507",
        "1339506544944476473020471379941921221584933875938349620426543736416511423956333506472724655353366534992391756441569",
        "1"
    ],
    "pi_b": [
        [
            "352701069587466618187139116011060144890029952792775240219908644239793785735715026873347600343865175952761926303160",
            "3059144344244213709971259814753781636986470325476647558659373206291635324768958432433509563104347017837885763365758"
        ],
        [
            "1985150602287291935568054521177171638300868978215655730859378665066344726373823718423869104263333984641494340347905",
            "927553665492332455747201965776037880757740193453592970025027978793976877002675564980949289727957565575433344219582"
        ],
        ["1", "0"]
    ],
    "pi_c": [
        "2592156547383463093364217592347349893468391217427234218957262618736466617543934815916254513133364834766612134394917",
        "172085837399294425113578442402453398718489346620434436773022474961429838612099003087829398413003733765468398823071",
        "1"
    ],
    "protocol": "groth16",
    "curve": "bls12381"
}"#;

pub fn multiplier_proof() -> ProofObject {
    serde_json::from_str(MULTIPLIER_PROOF).unwrap()
}

pub fn multiplier_public() -> Vec<Scalar> {
    vec![Scalar::from(33u64)]
}

pub fn canonical_proof_hex() -> String {
    encode_proof(&multiplier_proof()).unwrap()
}

pub fn canonical_public_hex() -> String {
    encode_public_inputs(&multiplier_public()).unwrap()
}

pub fn source_secret() -> String {
    PrivateKey(SOURCE_SEED).to_string()
}

pub fn contract_id() -> String {
    Contract(CONTRACT_BYTES).to_string()
}

/// Verifier stand-in: accepts exactly the canonical multiplier payloads
pub struct FakeVerifier {
    proof: Vec<u8>,
    public: Vec<u8>,
    sequence: i64,
    pub account_loads: AtomicUsize,
    pub simulations: AtomicUsize,
}

impl FakeVerifier {
    pub fn accepting_multiplier() -> Self {
        Self {
            proof: hex::decode(canonical_proof_hex()).unwrap(),
            public: hex::decode(canonical_public_hex()).unwrap(),
            sequence: 1_234,
            account_loads: AtomicUsize::new(0),
            simulations: AtomicUsize::new(0),
        }
    }

    pub fn simulations(&self) -> usize {
        self.simulations.load(Ordering::SeqCst)
    }
}

fn invocation_args(envelope: &TransactionEnvelope) -> Option<&[ScVal]> {
    let TransactionEnvelope::Tx(v1) = envelope else {
        return None;
    };
    let OperationBody::InvokeHostFunction(op) = &v1.tx.operations.first()?.body else {
        return None;
    };
    let HostFunction::InvokeContract(call) = &op.host_function else {
        return None;
    };
    Some(call.args.as_slice())
}

#[async_trait]
impl LedgerRpc for FakeVerifier {
    async fn get_account(&self, account: &PublicKey) -> Result<AccountState, RpcError> {
        self.account_loads.fetch_add(1, Ordering::SeqCst);
        Ok(AccountState {
            account_id: account.to_string(),
            sequence: self.sequence,
        })
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulationResult, RpcError> {
        self.simulations.fetch_add(1, Ordering::SeqCst);

        let verified = match invocation_args(envelope) {
            Some([ScVal::Bytes(proof), ScVal::Bytes(public)]) => {
                proof.0.as_slice() == self.proof.as_slice()
                    && public.0.as_slice() == self.public.as_slice()
            }
            _ => {
                return Err(RpcError::Rpc {
                    code: -32602,
                    message: "unexpected invocation".to_string(),
                })
            }
        };

        Ok(SimulationResult {
            error: None,
            return_value: Some(ScVal::Bool(verified)),
            latest_ledger: 4_242,
            min_resource_fee: Some("100".to_string()),
        })
    }
}
