//! Transaction fixtures shared by the integration tests.

#![allow(dead_code)]

use passkey_soroban::xdr::{
    ContractId, FeeBumpTransaction, FeeBumpTransactionEnvelope, FeeBumpTransactionExt,
    FeeBumpTransactionInnerTx, Hash, HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Memo,
    MuxedAccount, Operation, OperationBody, Preconditions, ScAddress, ScSymbol, ScVal,
    SequenceNumber, SorobanAddressCredentials, SorobanAuthorizationEntry, SorobanAuthorizedFunction,
    SorobanAuthorizedInvocation, SorobanCredentials, Transaction, TransactionEnvelope,
    TransactionExt, TransactionV1Envelope, Uint256, VecM,
};

pub const CONTRACT: [u8; 32] = [0x11; 32];
pub const WALLET: [u8; 32] = [0xaa; 32];
pub const NONCE: i64 = 1_234_567_890_123;
pub const EXPIRATION_LEDGER: u32 = 1_000_000;

pub fn contract_call(contract: [u8; 32], function: &str, args: Vec<ScVal>) -> InvokeContractArgs {
    InvokeContractArgs {
        contract_address: ScAddress::Contract(ContractId(Hash(contract))),
        function_name: ScSymbol(function.try_into().unwrap()),
        args: args.try_into().unwrap(),
    }
}

pub fn invocation(function: &str, args: Vec<ScVal>) -> SorobanAuthorizedInvocation {
    SorobanAuthorizedInvocation {
        function: SorobanAuthorizedFunction::ContractFn(contract_call(CONTRACT, function, args)),
        sub_invocations: VecM::default(),
    }
}

pub fn address_entry(
    nonce: i64,
    signature_expiration_ledger: u32,
    root_invocation: SorobanAuthorizedInvocation,
) -> SorobanAuthorizationEntry {
    SorobanAuthorizationEntry {
        credentials: SorobanCredentials::Address(SorobanAddressCredentials {
            address: ScAddress::Contract(ContractId(Hash(WALLET))),
            nonce,
            signature_expiration_ledger,
            signature: ScVal::Void,
        }),
        root_invocation,
    }
}

pub fn source_account_entry() -> SorobanAuthorizationEntry {
    SorobanAuthorizationEntry {
        credentials: SorobanCredentials::SourceAccount,
        root_invocation: invocation("transfer", vec![]),
    }
}

pub fn invoke(auth: Vec<SorobanAuthorizationEntry>) -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(contract_call(CONTRACT, "transfer", vec![])),
            auth: auth.try_into().unwrap(),
        }),
    }
}

pub fn inflation() -> Operation {
    Operation {
        source_account: None,
        body: OperationBody::Inflation,
    }
}

pub fn v1_envelope(operations: Vec<Operation>) -> TransactionV1Envelope {
    TransactionV1Envelope {
        tx: Transaction {
            source_account: MuxedAccount::Ed25519(Uint256([7; 32])),
            fee: 100,
            seq_num: SequenceNumber(1),
            cond: Preconditions::None,
            memo: Memo::None,
            operations: operations.try_into().unwrap(),
            ext: TransactionExt::V0,
        },
        signatures: VecM::default(),
    }
}

pub fn envelope(operations: Vec<Operation>) -> TransactionEnvelope {
    TransactionEnvelope::Tx(v1_envelope(operations))
}

pub fn fee_bump(operations: Vec<Operation>) -> TransactionEnvelope {
    TransactionEnvelope::TxFeeBump(FeeBumpTransactionEnvelope {
        tx: FeeBumpTransaction {
            fee_source: MuxedAccount::Ed25519(Uint256([8; 32])),
            fee: 200,
            inner_tx: FeeBumpTransactionInnerTx::Tx(v1_envelope(operations)),
            ext: FeeBumpTransactionExt::V0,
        },
        signatures: VecM::default(),
    })
}

/// A transaction whose only authorization is the wallet's `transfer()`.
pub fn transfer_envelope() -> TransactionEnvelope {
    envelope(vec![invoke(vec![address_entry(
        NONCE,
        EXPIRATION_LEDGER,
        invocation("transfer", vec![]),
    )])])
}

/// The signature stored in the first authorization entry.
pub fn attached_signature(envelope: &TransactionEnvelope) -> Option<ScVal> {
    let TransactionEnvelope::Tx(envelope) = envelope else {
        return None;
    };
    envelope.tx.operations.iter().find_map(|operation| match &operation.body {
        OperationBody::InvokeHostFunction(invoke) => match &invoke.auth.first()?.credentials {
            SorobanCredentials::Address(credentials) => Some(credentials.signature.clone()),
            SorobanCredentials::SourceAccount => None,
        },
        _ => None,
    })
}
