use crate::domain::boxes::BoxReference;
use crate::domain::txn::encoding::{binary, canonical_map, decode_value, encode_value, map_get};
use crate::domain::txn::params::SuggestedParams;
use crate::foundation::util::encoding::{encode_base32, sha512_256};
use crate::foundation::{Address, AppId, AssetId, ClaimError, Hash32, Round, TxId, SIGNATURE_SIZE, TX_DOMAIN_PREFIX};
use rmpv::Value;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnComplete {
    #[default]
    NoOp = 0,
    OptIn = 1,
    CloseOut = 2,
    ClearState = 3,
    UpdateApplication = 4,
    DeleteApplication = 5,
}

/// Fields shared by every transaction type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionHeader {
    pub sender: Address,
    pub fee: u64,
    pub first_valid: Round,
    pub last_valid: Round,
    pub genesis_id: String,
    pub genesis_hash: Hash32,
    pub group: Option<Hash32>,
    pub note: Vec<u8>,
}

impl TransactionHeader {
    pub fn from_params(sender: Address, params: &SuggestedParams) -> Self {
        Self {
            sender,
            fee: 0,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
            group: None,
            note: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationCall {
    pub app_id: AppId,
    pub on_complete: OnComplete,
    pub app_args: Vec<Vec<u8>>,
    pub accounts: Vec<Address>,
    pub foreign_apps: Vec<AppId>,
    pub foreign_assets: Vec<AssetId>,
    pub boxes: Vec<BoxReference>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionBody {
    AssetTransfer { asset_id: AssetId, amount: u64, receiver: Address },
    ApplicationCall(ApplicationCall),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub header: TransactionHeader,
    pub body: TransactionBody,
}

impl Transaction {
    /// Build a transaction and set its fee from `params` and its encoded size.
    pub fn with_params(sender: Address, params: &SuggestedParams, body: TransactionBody) -> Result<Self, ClaimError> {
        let mut txn = Self { header: TransactionHeader::from_params(sender, params), body };
        let size = txn.estimate_signed_size()?;
        txn.header.fee = params.fee_for_size(size);
        Ok(txn)
    }

    /// Zero-amount self-transfer enabling `sender` to hold `asset_id`.
    pub fn asset_opt_in(sender: Address, params: &SuggestedParams, asset_id: AssetId) -> Result<Self, ClaimError> {
        Self::with_params(sender, params, TransactionBody::AssetTransfer { asset_id, amount: 0, receiver: sender })
    }

    pub fn sender(&self) -> &Address {
        &self.header.sender
    }

    pub fn type_tag(&self) -> &'static str {
        match self.body {
            TransactionBody::AssetTransfer { .. } => "axfer",
            TransactionBody::ApplicationCall(_) => "appl",
        }
    }

    pub fn is_asset_opt_in(&self) -> bool {
        matches!(self.body, TransactionBody::AssetTransfer { amount: 0, receiver, .. } if receiver == self.header.sender)
    }

    pub fn as_application_call(&self) -> Option<&ApplicationCall> {
        match &self.body {
            TransactionBody::ApplicationCall(call) => Some(call),
            TransactionBody::AssetTransfer { .. } => None,
        }
    }

    pub(crate) fn to_msgpack_value(&self) -> Value {
        let header = &self.header;
        let mut fields: Vec<(&'static str, Value)> = vec![
            ("fee", Value::from(header.fee)),
            ("fv", Value::from(header.first_valid)),
            ("lv", Value::from(header.last_valid)),
            ("gen", Value::from(header.genesis_id.as_str())),
            ("gh", binary(&header.genesis_hash)),
            ("grp", header.group.map(|group| binary(&group)).unwrap_or(Value::Nil)),
            ("note", binary(&header.note)),
            ("snd", binary(header.sender.as_bytes())),
            ("type", Value::from(self.type_tag())),
        ];
        match &self.body {
            TransactionBody::AssetTransfer { asset_id, amount, receiver } => {
                fields.push(("xaid", Value::from(asset_id.get())));
                fields.push(("aamt", Value::from(*amount)));
                fields.push(("arcv", binary(receiver.as_bytes())));
            }
            TransactionBody::ApplicationCall(call) => {
                fields.push(("apid", Value::from(call.app_id.get())));
                fields.push(("apan", Value::from(call.on_complete as u64)));
                fields.push(("apaa", Value::Array(call.app_args.iter().map(|arg| binary(arg)).collect())));
                fields.push(("apat", Value::Array(call.accounts.iter().map(|acct| binary(acct.as_bytes())).collect())));
                fields.push(("apfa", Value::Array(call.foreign_apps.iter().map(|app| Value::from(app.get())).collect())));
                fields.push(("apas", Value::Array(call.foreign_assets.iter().map(|asset| Value::from(asset.get())).collect())));
                fields.push((
                    "apbx",
                    Value::Array(
                        call.boxes
                            .iter()
                            .map(|reference| {
                                canonical_map(vec![("i", Value::from(reference.app_index)), ("n", binary(reference.name.as_bytes()))])
                            })
                            .collect(),
                    ),
                ));
            }
        }
        canonical_map(fields)
    }

    pub fn encode(&self) -> Result<Vec<u8>, ClaimError> {
        encode_value(&self.to_msgpack_value())
    }

    /// Bytes covered by the sender's signature: `"TX" || encoding`.
    pub fn bytes_to_sign(&self) -> Result<Vec<u8>, ClaimError> {
        let encoded = self.encode()?;
        let mut out = Vec::with_capacity(TX_DOMAIN_PREFIX.len() + encoded.len());
        out.extend_from_slice(TX_DOMAIN_PREFIX);
        out.extend_from_slice(&encoded);
        Ok(out)
    }

    pub fn raw_id(&self) -> Result<Hash32, ClaimError> {
        Ok(sha512_256(&[&self.bytes_to_sign()?]))
    }

    pub fn id(&self) -> Result<TxId, ClaimError> {
        Ok(TxId::new(encode_base32(&self.raw_id()?)))
    }

    fn estimate_signed_size(&self) -> Result<usize, ClaimError> {
        Ok(SignedTransaction::new(self.clone(), [0u8; SIGNATURE_SIZE]).encode()?.len())
    }
}

/// A transaction with its sender's ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub txn: Transaction,
    pub signature: [u8; SIGNATURE_SIZE],
}

impl SignedTransaction {
    pub fn new(txn: Transaction, signature: [u8; SIGNATURE_SIZE]) -> Self {
        Self { txn, signature }
    }

    pub fn encode(&self) -> Result<Vec<u8>, ClaimError> {
        let value = canonical_map(vec![("sig", binary(&self.signature)), ("txn", self.txn.to_msgpack_value())]);
        encode_value(&value)
    }
}

/// Wire-encoded signed transaction as produced by a wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransactionBytes(Vec<u8>);

impl SignedTransactionBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Raw signature and sender fields, for callers that verify what a wallet returned.
    pub fn signature_and_sender(&self) -> Result<([u8; SIGNATURE_SIZE], Address), ClaimError> {
        let value = decode_value(&self.0)?;
        let malformed = || ClaimError::EncodingError("malformed signed transaction".to_string());
        let sig = map_get(&value, "sig").and_then(Value::as_slice).ok_or_else(malformed)?;
        let signature: [u8; SIGNATURE_SIZE] = sig.try_into().map_err(|_| malformed())?;
        let txn = map_get(&value, "txn").ok_or_else(malformed)?;
        let sender = map_get(txn, "snd").and_then(Value::as_slice).ok_or_else(malformed)?;
        Ok((signature, Address::from_slice(sender)?))
    }

    /// Id of the wrapped transaction, recomputed from its canonical encoding.
    pub fn tx_id(&self) -> Result<TxId, ClaimError> {
        let value = decode_value(&self.0)?;
        let txn = map_get(&value, "txn").ok_or_else(|| ClaimError::EncodingError("signed transaction has no txn".to_string()))?;
        let encoded = encode_value(txn)?;
        Ok(TxId::new(encode_base32(&sha512_256(&[TX_DOMAIN_PREFIX, &encoded]))))
    }
}

impl TryFrom<&SignedTransaction> for SignedTransactionBytes {
    type Error = ClaimError;

    fn try_from(value: &SignedTransaction) -> Result<Self, Self::Error> {
        Ok(Self(value.encode()?))
    }
}
