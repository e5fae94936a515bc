//! Transaction Assembly
//!
//! Builds the single-operation `invokeHostFunction` transaction used to call
//! the verifier contract. The envelope carries no signatures: it is only
//! ever simulated.

use sha2::{Digest, Sha256};
use stellar_strkey::ed25519::PublicKey;
use stellar_strkey::Contract;
use stellar_xdr::curr::{
    Hash, HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Limits, Memo, MuxedAccount,
    Operation, OperationBody, Preconditions, ScAddress, ScBytes, ScSymbol, ScVal, SequenceNumber,
    TimeBounds, TimePoint, Transaction, TransactionEnvelope, TransactionExt,
    TransactionSignaturePayload, TransactionSignaturePayloadTaggedTransaction,
    TransactionV1Envelope, Uint256, VecM, WriteXdr,
};
use thiserror::Error;

/// Contract entry point invoked for verification
pub const VERIFY_FUNCTION: &str = "verify";

#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("XDR encoding failed: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),
    #[error("Account sequence {0} cannot be incremented")]
    SequenceOverflow(i64),
}

/// Parameters of a contract invocation
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub source: &'a PublicKey,
    /// Current sequence number of the source account
    pub account_sequence: i64,
    pub contract: &'a Contract,
    pub function: &'a str,
    pub args: Vec<ScVal>,
    /// Fee in stroops
    pub fee: u32,
    /// Unix time the validity window starts at
    pub now: u64,
    /// Validity window in seconds
    pub valid_for: u64,
}

/// Unsigned envelope plus its network-bound hash
#[derive(Debug, Clone)]
pub struct BuiltTransaction {
    pub envelope: TransactionEnvelope,
    pub hash: [u8; 32],
}

impl BuiltTransaction {
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

/// Network id: SHA-256 of the passphrase
pub fn network_id(passphrase: &str) -> [u8; 32] {
    Sha256::digest(passphrase.as_bytes()).into()
}

/// Opaque byte-array contract argument
pub fn bytes_arg(bytes: Vec<u8>) -> Result<ScVal, TransactionError> {
    Ok(ScVal::Bytes(ScBytes(bytes.try_into()?)))
}

/// Assemble the invocation transaction for the given network
pub fn build_invocation(
    invocation: Invocation<'_>,
    network_passphrase: &str,
) -> Result<BuiltTransaction, TransactionError> {
    let seq_num = invocation
        .account_sequence
        .checked_add(1)
        .ok_or(TransactionError::SequenceOverflow(invocation.account_sequence))?;

    let operation = Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(InvokeContractArgs {
                contract_address: ScAddress::Contract(Hash(invocation.contract.0)),
                function_name: ScSymbol(invocation.function.try_into()?),
                args: invocation.args.try_into()?,
            }),
            auth: VecM::default(),
        }),
    };

    let tx = Transaction {
        source_account: MuxedAccount::Ed25519(Uint256(invocation.source.0)),
        fee: invocation.fee,
        seq_num: SequenceNumber(seq_num),
        cond: Preconditions::Time(TimeBounds {
            min_time: TimePoint(0),
            max_time: TimePoint(invocation.now.saturating_add(invocation.valid_for)),
        }),
        memo: Memo::None,
        operations: vec![operation].try_into()?,
        ext: TransactionExt::V0,
    };

    let hash = transaction_hash(&tx, network_passphrase)?;
    let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: VecM::default(),
    });

    Ok(BuiltTransaction { envelope, hash })
}

/// Hash signers would sign: SHA-256 of the network-tagged signature payload
pub fn transaction_hash(
    tx: &Transaction,
    network_passphrase: &str,
) -> Result<[u8; 32], TransactionError> {
    let payload = TransactionSignaturePayload {
        network_id: Hash(network_id(network_passphrase)),
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(tx.clone()),
    };
    let encoded = payload.to_xdr(Limits::none())?;
    Ok(Sha256::digest(&encoded).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TESTNET_PASSPHRASE;
    use stellar_xdr::curr::ReadXdr;

    fn invocation<'a>(source: &'a PublicKey, contract: &'a Contract) -> Invocation<'a> {
        Invocation {
            source,
            account_sequence: 41,
            contract,
            function: VERIFY_FUNCTION,
            args: vec![
                bytes_arg(vec![1, 2, 3]).unwrap(),
                bytes_arg(vec![0, 0, 0, 0]).unwrap(),
            ],
            fee: 100,
            now: 1_700_000_000,
            valid_for: 30,
        }
    }

    #[test]
    fn test_testnet_network_id() {
        assert_eq!(
            hex::encode(network_id(TESTNET_PASSPHRASE)),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn test_builds_single_unsigned_invocation() {
        let source = PublicKey([1u8; 32]);
        let contract = Contract([2u8; 32]);
        let built = build_invocation(invocation(&source, &contract), TESTNET_PASSPHRASE).unwrap();

        let TransactionEnvelope::Tx(TransactionV1Envelope { tx, signatures }) = &built.envelope
        else {
            panic!("expected a v1 envelope");
        };
        assert!(signatures.is_empty());
        assert_eq!(tx.fee, 100);
        assert_eq!(tx.seq_num, SequenceNumber(42));
        assert_eq!(tx.source_account, MuxedAccount::Ed25519(Uint256([1u8; 32])));
        assert_eq!(
            tx.cond,
            Preconditions::Time(TimeBounds {
                min_time: TimePoint(0),
                max_time: TimePoint(1_700_000_030),
            })
        );
        assert_eq!(tx.operations.len(), 1);

        let OperationBody::InvokeHostFunction(op) = &tx.operations[0].body else {
            panic!("expected invokeHostFunction");
        };
        let HostFunction::InvokeContract(call) = &op.host_function else {
            panic!("expected a contract call");
        };
        assert_eq!(call.contract_address, ScAddress::Contract(Hash([2u8; 32])));
        assert_eq!(call.function_name.0.as_slice(), VERIFY_FUNCTION.as_bytes());
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.args[0], ScVal::Bytes(ScBytes(vec![1, 2, 3].try_into().unwrap())));
    }

    #[test]
    fn test_envelope_round_trips_through_base64() {
        let source = PublicKey([1u8; 32]);
        let contract = Contract([2u8; 32]);
        let built = build_invocation(invocation(&source, &contract), TESTNET_PASSPHRASE).unwrap();

        let encoded = built.envelope.to_xdr_base64(Limits::none()).unwrap();
        let decoded = TransactionEnvelope::from_xdr_base64(&encoded, Limits::none()).unwrap();
        assert_eq!(decoded, built.envelope);
    }

    #[test]
    fn test_hash_depends_on_network() {
        let source = PublicKey([1u8; 32]);
        let contract = Contract([2u8; 32]);
        let testnet = build_invocation(invocation(&source, &contract), TESTNET_PASSPHRASE).unwrap();
        let other = build_invocation(
            invocation(&source, &contract),
            "Public Global Stellar Network ; September 2015",
        )
        .unwrap();
        assert_ne!(testnet.hash, other.hash);
        assert_eq!(testnet.hash_hex().len(), 64);
    }

    #[test]
    fn test_sequence_overflow() {
        let source = PublicKey([1u8; 32]);
        let contract = Contract([2u8; 32]);
        let result = build_invocation(
            Invocation {
                account_sequence: i64::MAX,
                ..invocation(&source, &contract)
            },
            TESTNET_PASSPHRASE,
        );
        assert!(matches!(result, Err(TransactionError::SequenceOverflow(_))));
    }
}
