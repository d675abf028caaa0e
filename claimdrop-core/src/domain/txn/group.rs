use crate::domain::boxes::BoxReference;
use crate::domain::txn::abi::{AbiMethod, AbiValue};
use crate::domain::txn::encoding::{binary, canonical_map, encode_value};
use crate::domain::txn::params::SuggestedParams;
use crate::domain::txn::types::{ApplicationCall, OnComplete, Transaction, TransactionBody};
use crate::foundation::util::encoding::sha512_256;
use crate::foundation::{Address, AppId, AssetId, ClaimError, Hash32, TxId, MAX_GROUP_SIZE, TX_GROUP_DOMAIN_PREFIX};
use log::debug;
use rmpv::Value;

/// Everything needed to add one ABI method call to a group.
#[derive(Clone, Debug)]
pub struct MethodCallParams {
    pub app_id: AppId,
    pub method: AbiMethod,
    pub args: Vec<AbiValue>,
    pub sender: Address,
    pub params: SuggestedParams,
    pub on_complete: OnComplete,
    pub foreign_assets: Vec<AssetId>,
    pub boxes: Vec<BoxReference>,
}

impl MethodCallParams {
    pub fn new(app_id: AppId, method: AbiMethod, sender: Address, params: SuggestedParams) -> Self {
        Self {
            app_id,
            method,
            args: Vec::new(),
            sender,
            params,
            on_complete: OnComplete::NoOp,
            foreign_assets: Vec::new(),
            boxes: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<AbiValue>) -> Self {
        self.args = args;
        self
    }

    pub fn with_foreign_asset(mut self, asset_id: AssetId) -> Self {
        self.foreign_assets.push(asset_id);
        self
    }

    pub fn with_boxes(mut self, boxes: Vec<BoxReference>) -> Self {
        self.boxes = boxes;
        self
    }

    fn into_transaction(self) -> Result<Transaction, ClaimError> {
        let app_args = self.method.encode_call(&self.args)?;
        let call = ApplicationCall {
            app_id: self.app_id,
            on_complete: self.on_complete,
            app_args,
            accounts: Vec::new(),
            foreign_apps: Vec::new(),
            foreign_assets: self.foreign_assets,
            boxes: self.boxes,
        };
        Transaction::with_params(self.sender, &self.params, TransactionBody::ApplicationCall(call))
    }
}

/// An ordered, atomically submitted set of transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionGroup {
    transactions: Vec<Transaction>,
    method_call_index: Option<usize>,
}

impl TransactionGroup {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn group_id(&self) -> Option<Hash32> {
        self.transactions.first().and_then(|txn| txn.header.group)
    }

    /// The single contract method call of the group.
    pub fn method_call(&self) -> Option<&Transaction> {
        self.method_call_index.and_then(|index| self.transactions.get(index))
    }

    pub fn tx_ids(&self) -> Result<Vec<TxId>, ClaimError> {
        self.transactions.iter().map(Transaction::id).collect()
    }

    /// Positions whose sender is `signer`.
    pub fn indexes_signed_by(&self, signer: &Address) -> Vec<usize> {
        self.transactions.iter().enumerate().filter(|(_, txn)| txn.sender() == signer).map(|(index, _)| index).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComposerStatus {
    Building,
    Built,
}

/// Assembles a transaction group. Once built, no further members may be added.
#[derive(Debug)]
pub struct GroupComposer {
    status: ComposerStatus,
    transactions: Vec<Transaction>,
    method_call_index: Option<usize>,
}

impl Default for GroupComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupComposer {
    pub fn new() -> Self {
        Self { status: ComposerStatus::Building, transactions: Vec::new(), method_call_index: None }
    }

    pub fn status(&self) -> ComposerStatus {
        self.status
    }

    pub fn count(&self) -> usize {
        self.transactions.len()
    }

    pub fn add_transaction(&mut self, txn: Transaction) -> Result<&mut Self, ClaimError> {
        self.ensure_building()?;
        if txn.header.group.is_some() {
            return Err(ClaimError::Validation("transaction already belongs to a group".to_string()));
        }
        if self.transactions.len() >= MAX_GROUP_SIZE {
            return Err(ClaimError::Validation(format!("transaction group exceeds {MAX_GROUP_SIZE} members")));
        }
        self.transactions.push(txn);
        Ok(self)
    }

    pub fn add_method_call(&mut self, params: MethodCallParams) -> Result<&mut Self, ClaimError> {
        self.ensure_building()?;
        if self.method_call_index.is_some() {
            return Err(ClaimError::Validation("transaction group already has a method call".to_string()));
        }
        let index = self.transactions.len();
        self.add_transaction(params.into_transaction()?)?;
        self.method_call_index = Some(index);
        Ok(self)
    }

    /// Finalize the group, assigning a group id when it has more than one member.
    pub fn build_group(&mut self) -> Result<TransactionGroup, ClaimError> {
        self.ensure_building()?;
        if self.transactions.is_empty() {
            return Err(ClaimError::Validation("cannot build an empty transaction group".to_string()));
        }
        if self.transactions.len() > 1 {
            let group_id = compute_group_id(&self.transactions)?;
            for txn in &mut self.transactions {
                txn.header.group = Some(group_id);
            }
            debug!("assigned group id group_id={} size={}", hex::encode(group_id), self.transactions.len());
        }
        self.status = ComposerStatus::Built;
        Ok(TransactionGroup { transactions: std::mem::take(&mut self.transactions), method_call_index: self.method_call_index })
    }

    fn ensure_building(&self) -> Result<(), ClaimError> {
        if self.status != ComposerStatus::Building {
            return Err(ClaimError::InvalidStateTransition { from: format!("{:?}", self.status), to: "Building".to_string() });
        }
        Ok(())
    }
}

/// `SHA-512/256("TG" || msgpack({txlist: [raw tx ids]}))`.
pub fn compute_group_id(transactions: &[Transaction]) -> Result<Hash32, ClaimError> {
    let ids = transactions.iter().map(|txn| txn.raw_id().map(|id| binary(&id))).collect::<Result<Vec<_>, _>>()?;
    let encoded = encode_value(&canonical_map(vec![("txlist", Value::Array(ids))]))?;
    Ok(sha512_256(&[TX_GROUP_DOMAIN_PREFIX, &encoded]))
}
