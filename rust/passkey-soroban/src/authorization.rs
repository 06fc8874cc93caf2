//! Locating the authorization entry a passkey has to sign.
//!
//! A Soroban transaction carries at most one `InvokeHostFunction`
//! operation. Its `auth` list holds one entry per address whose
//! `require_auth` the invocation triggers; the first entry is the one the
//! bridge signs. Entries using `SourceAccount` credentials are covered by
//! the transaction signature and need nothing from a passkey.

use crate::SorobanError;
use stellar_xdr::curr::{
    FeeBumpTransactionInnerTx, InvokeHostFunctionOp, Operation, OperationBody, ScAddress,
    SorobanAddressCredentials, SorobanAuthorizationEntry, SorobanAuthorizedInvocation,
    SorobanCredentials, TransactionEnvelope, VecM,
};

/// Why a transaction needs no passkey signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotApplicableReason {
    /// No operation invokes a host function.
    NoInvokeHostFunction,
    /// The invocation has no authorization entries.
    NoAuthorizationEntry,
    /// The first entry is authorized by the transaction source account.
    SourceAccountCredentials,
}

impl std::fmt::Display for NotApplicableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NoInvokeHostFunction => "no InvokeHostFunction operation",
            Self::NoAuthorizationEntry => "no authorization entry",
            Self::SourceAccountCredentials => "authorized by source account",
        })
    }
}

/// The fields of an address-credential authorization entry that its
/// signature commits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressAuthorization {
    /// The account or contract whose authorization is being given.
    pub address: ScAddress,
    /// Replay-protection nonce chosen by the transaction builder.
    pub nonce: i64,
    /// Last ledger at which the signature is valid.
    pub signature_expiration_ledger: u32,
    /// The call tree being authorized.
    pub root_invocation: SorobanAuthorizedInvocation,
}

/// Result of looking for an [`AddressAuthorization`] in a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationLookup {
    /// The transaction needs no passkey signature.
    NotApplicable(NotApplicableReason),
    /// The authorization to sign.
    Found(AddressAuthorization),
}

impl AddressAuthorization {
    /// Read the signed fields from an authorization entry.
    ///
    /// Returns `None` for `SourceAccount` credentials.
    #[must_use]
    pub fn from_entry(entry: &SorobanAuthorizationEntry) -> Option<Self> {
        match &entry.credentials {
            SorobanCredentials::SourceAccount => None,
            SorobanCredentials::Address(SorobanAddressCredentials {
                address,
                nonce,
                signature_expiration_ledger,
                ..
            }) => Some(Self {
                address: address.clone(),
                nonce: *nonce,
                signature_expiration_ledger: *signature_expiration_ledger,
                root_invocation: entry.root_invocation.clone(),
            }),
        }
    }

    /// Find the authorization a passkey must sign for `envelope`.
    ///
    /// # Errors
    ///
    /// Returns [`SorobanError::MultipleInvocations`] if the transaction has
    /// more than one `InvokeHostFunction` operation.
    pub fn locate(envelope: &TransactionEnvelope) -> Result<AuthorizationLookup, SorobanError> {
        let operations = operations(envelope);
        let Some(index) = sole_invocation(operations)? else {
            return Ok(AuthorizationLookup::NotApplicable(
                NotApplicableReason::NoInvokeHostFunction,
            ));
        };
        let OperationBody::InvokeHostFunction(invoke) = &operations[index].body else {
            return Ok(AuthorizationLookup::NotApplicable(
                NotApplicableReason::NoInvokeHostFunction,
            ));
        };
        let Some(entry) = invoke.auth.first() else {
            return Ok(AuthorizationLookup::NotApplicable(
                NotApplicableReason::NoAuthorizationEntry,
            ));
        };
        Ok(match Self::from_entry(entry) {
            Some(authorization) => AuthorizationLookup::Found(authorization),
            None => AuthorizationLookup::NotApplicable(NotApplicableReason::SourceAccountCredentials),
        })
    }
}

/// Overwrite the signature of the entry [`AddressAuthorization::locate`]
/// finds.
///
/// # Errors
///
/// Returns [`SorobanError::NoAddressAuthorization`] if there is no such
/// entry, [`SorobanError::MultipleInvocations`] as for `locate`, and
/// [`SorobanError::Xdr`] if rebuilding a length-limited list fails.
pub(crate) fn set_address_signature(
    envelope: &mut TransactionEnvelope,
    signature: stellar_xdr::curr::ScVal,
) -> Result<(), SorobanError> {
    let mut operations = operations_mut(envelope).to_vec();
    let index = sole_invocation(&operations)?.ok_or(SorobanError::NoAddressAuthorization)?;
    let OperationBody::InvokeHostFunction(InvokeHostFunctionOp { auth, .. }) =
        &mut operations[index].body
    else {
        return Err(SorobanError::NoAddressAuthorization);
    };

    let mut entries = auth.to_vec();
    match entries.first_mut().map(|entry| &mut entry.credentials) {
        Some(SorobanCredentials::Address(credentials)) => credentials.signature = signature,
        _ => return Err(SorobanError::NoAddressAuthorization),
    }
    *auth = entries.try_into()?;
    *operations_mut(envelope) = operations.try_into()?;
    Ok(())
}

/// Index of the only `InvokeHostFunction` operation, if there is one.
fn sole_invocation(operations: &[Operation]) -> Result<Option<usize>, SorobanError> {
    let mut invocations = operations
        .iter()
        .enumerate()
        .filter(|(_, operation)| matches!(operation.body, OperationBody::InvokeHostFunction(_)))
        .map(|(index, _)| index);
    let first = invocations.next();
    match invocations.count() {
        0 => Ok(first),
        extra => Err(SorobanError::MultipleInvocations { count: extra + 1 }),
    }
}

fn operations(envelope: &TransactionEnvelope) -> &[Operation] {
    match envelope {
        TransactionEnvelope::TxV0(envelope) => envelope.tx.operations.as_slice(),
        TransactionEnvelope::Tx(envelope) => envelope.tx.operations.as_slice(),
        TransactionEnvelope::TxFeeBump(envelope) => match &envelope.tx.inner_tx {
            FeeBumpTransactionInnerTx::Tx(inner) => inner.tx.operations.as_slice(),
        },
    }
}

fn operations_mut(envelope: &mut TransactionEnvelope) -> &mut VecM<Operation, 100> {
    match envelope {
        TransactionEnvelope::TxV0(envelope) => &mut envelope.tx.operations,
        TransactionEnvelope::Tx(envelope) => &mut envelope.tx.operations,
        TransactionEnvelope::TxFeeBump(envelope) => match &mut envelope.tx.inner_tx {
            FeeBumpTransactionInnerTx::Tx(inner) => &mut inner.tx.operations,
        },
    }
}
