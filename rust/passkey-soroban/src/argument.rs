//! Encoding the WebAuthn signature argument as a Soroban value.

use crate::SorobanError;
use crate::authorization::set_address_signature;
use passkey_credentials::WebAuthnSignatureArgument;
use stellar_xdr::curr::{ScBytes, ScMap, ScMapEntry, ScSymbol, ScVal, TransactionEnvelope};

/// Encode `argument` as a `Symbol -> Bytes` map.
///
/// Soroban rejects maps whose keys are not in ascending order; the field
/// names are emitted sorted.
///
/// # Errors
///
/// Returns [`SorobanError::Xdr`] if a field exceeds an XDR length limit.
pub fn signature_argument_to_sc_val(argument: &WebAuthnSignatureArgument) -> Result<ScVal, SorobanError> {
    let entries = argument
        .fields()
        .into_iter()
        .map(|(name, bytes)| -> Result<ScMapEntry, SorobanError> {
            Ok(ScMapEntry {
                key: ScVal::Symbol(ScSymbol(name.try_into()?)),
                val: ScVal::Bytes(ScBytes(bytes.to_vec().try_into()?)),
            })
        })
        .collect::<Result<Vec<_>, SorobanError>>()?;
    Ok(ScVal::Map(Some(ScMap(entries.try_into()?))))
}

/// Store `signature` in the address credentials of the entry the signature
/// payload was built from.
///
/// # Errors
///
/// Returns [`SorobanError::NoAddressAuthorization`] if the transaction has
/// no such entry.
pub fn attach_signature(envelope: &mut TransactionEnvelope, signature: ScVal) -> Result<(), SorobanError> {
    set_address_signature(envelope, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use passkey_credentials::{CompactSignature, DeviceId};

    fn argument() -> WebAuthnSignatureArgument {
        WebAuthnSignatureArgument {
            authenticator_data: vec![1; 37],
            client_data_json: b"{}".to_vec(),
            device_id: DeviceId::from([2; 32]),
            signature: CompactSignature::try_from([3u8; 64].as_slice()).unwrap(),
        }
    }

    #[test]
    fn map_keys_are_sorted_symbols() {
        let ScVal::Map(Some(ScMap(entries))) = signature_argument_to_sc_val(&argument()).unwrap() else {
            panic!("expected a map");
        };
        let keys: Vec<String> = entries
            .iter()
            .map(|entry| match &entry.key {
                ScVal::Symbol(symbol) => symbol.0.to_utf8_string_lossy(),
                other => panic!("unexpected key {other:?}"),
            })
            .collect();
        assert_eq!(
            keys,
            ["authenticator_data", "client_data_json", "device_id", "signature"]
        );
    }

    #[test]
    fn map_values_are_the_raw_fields() {
        let ScVal::Map(Some(ScMap(entries))) = signature_argument_to_sc_val(&argument()).unwrap() else {
            panic!("expected a map");
        };
        let values: Vec<Vec<u8>> = entries
            .iter()
            .map(|entry| match &entry.val {
                ScVal::Bytes(ScBytes(bytes)) => bytes.to_vec(),
                other => panic!("unexpected value {other:?}"),
            })
            .collect();
        assert_eq!(
            values,
            vec![vec![1; 37], b"{}".to_vec(), vec![2; 32], vec![3; 64]]
        );
    }
}
