// common/src/transaction.rs
//! Programmable transaction building and BCS encoding.
//!
//! Enum variant order mirrors the on-chain definitions: BCS encodes a
//! variant by its index, so reordering breaks the wire format.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Fault, Result};
use crate::keys::Blake2b256;
use crate::types::{Digest, ObjectID, ObjectRef, SuiAddress, TransactionDigest};
use blake2::Digest as _;

/// Upper bound on gas payment objects per transaction.
pub const MAX_GAS_OBJECTS: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: SuiAddress,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: SuiAddress,
    pub price: u64,
    pub budget: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TransactionExpiration {
    None,
    Epoch(u64),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CallArg {
    Pure(Vec<u8>),
    Object(ObjectArg),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: ObjectID,
        initial_shared_version: u64,
        mutable: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(Vec<Argument>, Argument),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectID,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
}

impl TransactionData {
    pub fn new_programmable(sender: SuiAddress, pt: ProgrammableTransaction, gas: GasConfig) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(pt),
            sender,
            gas_data: GasData {
                payment: gas.payment,
                owner: sender,
                price: gas.price,
                budget: gas.budget,
            },
            expiration: TransactionExpiration::None,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    /// Digest the network will assign to this transaction.
    pub fn digest(&self) -> Result<TransactionDigest> {
        let mut hasher = Blake2b256::new();
        hasher.update(b"TransactionData::");
        hasher.update(self.to_bytes()?);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Ok(Digest(bytes))
    }

    pub fn sender(&self) -> SuiAddress {
        match self {
            TransactionData::V1(v1) => v1.sender,
        }
    }
}

/// Gas payment chosen before building: coins, price per unit and budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GasConfig {
    pub payment: Vec<ObjectRef>,
    pub price: u64,
    pub budget: u64,
}

// ─────────────────── Move call target ───────────────────

/// `package::module::function`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveTarget {
    pub package: ObjectID,
    pub module: String,
    pub function: String,
}

impl FromStr for MoveTarget {
    type Err = Fault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split("::").collect();
        let [package, module, function] = parts.as_slice() else {
            return Err(Fault::InvalidConfig(format!(
                "move target '{}' must look like package::module::function",
                s
            )));
        };
        for ident in [module, function] {
            if !is_valid_identifier(ident) {
                return Err(Fault::InvalidConfig(format!(
                    "'{}' is not a valid Move identifier",
                    ident
                )));
            }
        }
        Ok(Self {
            package: package.parse()?,
            module: module.to_string(),
            function: function.to_string(),
        })
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        Some('_') if s.len() > 1 => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ─────────────────── Builder ───────────────────

#[derive(Default)]
pub struct ProgrammableTransactionBuilder {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl ProgrammableTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a BCS-encoded pure input.
    pub fn pure<T: Serialize>(&mut self, value: &T) -> Result<Argument> {
        Ok(self.pure_bytes(bcs::to_bytes(value)?))
    }

    /// Adds already-serialized bytes as a pure input, unchanged.
    pub fn pure_bytes(&mut self, bytes: Vec<u8>) -> Argument {
        self.input(CallArg::Pure(bytes))
    }

    pub fn object(&mut self, arg: ObjectArg) -> Argument {
        self.input(CallArg::Object(arg))
    }

    fn input(&mut self, arg: CallArg) -> Argument {
        self.inputs.push(arg);
        Argument::Input((self.inputs.len() - 1) as u16)
    }

    fn command(&mut self, command: Command) -> Argument {
        self.commands.push(command);
        Argument::Result((self.commands.len() - 1) as u16)
    }

    pub fn move_call(
        &mut self,
        target: &MoveTarget,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Argument {
        self.command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package: target.package,
            module: target.module.clone(),
            function: target.function.clone(),
            type_arguments,
            arguments,
        })))
    }

    pub fn transfer_objects(&mut self, objects: Vec<Argument>, recipient: SuiAddress) -> Result<Argument> {
        let recipient = self.pure(&recipient)?;
        Ok(self.command(Command::TransferObjects(objects, recipient)))
    }

    pub fn finish(self) -> ProgrammableTransaction {
        ProgrammableTransaction {
            inputs: self.inputs,
            commands: self.commands,
        }
    }
}

/// BCS `vector<u8>`: ULEB128 length followed by the bytes.
pub fn serialize_bytes_arg(bytes: &[u8]) -> Result<Vec<u8>> {
    Ok(bcs::to_bytes(&bytes.to_vec())?)
}

/// Sends the whole gas coin to `recipient`.
pub fn transfer_gas_coin(sender: SuiAddress, recipient: SuiAddress, gas: GasConfig) -> Result<TransactionData> {
    let mut ptb = ProgrammableTransactionBuilder::new();
    ptb.transfer_objects(vec![Argument::GasCoin], recipient)?;
    Ok(TransactionData::new_programmable(sender, ptb.finish(), gas))
}

/// `target(cohort, bcs(github))`
pub fn enroll_call(
    sender: SuiAddress,
    target: &MoveTarget,
    cohort: ObjectArg,
    github: &[u8],
    gas: GasConfig,
) -> Result<TransactionData> {
    let mut ptb = ProgrammableTransactionBuilder::new();
    let cohort = ptb.object(cohort);
    let github = ptb.pure_bytes(serialize_bytes_arg(github)?);
    ptb.move_call(target, vec![], vec![cohort, github]);
    Ok(TransactionData::new_programmable(sender, ptb.finish(), gas))
}
