//! EVM signature plumbing shared by the aggregator boundary.
//!
//! Signatures travel as 130-hex-char strings (`r ‖ s ‖ v`, no 0x prefix):
//! 64 chars of `r`, 64 of `s` and a two-char recovery byte.

use alloy::primitives::B256;

use crate::error::SdkError;

pub const EVM_SIGNATURE_LEN: usize = 130;

/// Splits a wire-format signature into its `r`, `s` and `v` components.
pub fn split_evm_signature(signature: &str) -> Result<(B256, B256, u8), SdkError> {
    if signature.len() != EVM_SIGNATURE_LEN {
        return Err(SdkError::InvalidSignature(format!(
            "expected {} hex characters, got {}",
            EVM_SIGNATURE_LEN,
            signature.len()
        )));
    }
    // the length check counts bytes; multibyte input must not reach the
    // byte-offset slices below
    if !signature.is_ascii() {
        return Err(SdkError::InvalidSignature(signature.to_string()));
    }

    let component = |range: std::ops::Range<usize>| -> Result<B256, SdkError> {
        signature[range]
            .parse()
            .map_err(|_| SdkError::InvalidSignature(signature.to_string()))
    };

    let r = component(0..64)?;
    let s = component(64..128)?;
    let v = u8::from_str_radix(&signature[128..130], 16)
        .map_err(|_| SdkError::InvalidSignature(signature.to_string()))?;

    Ok((r, s, v))
}

/// Joins signature components back into the wire format.
pub fn join_evm_signature(r: B256, s: B256, v: u8) -> String {
    format!("{:x}{:x}{:02x}", r, s, v)
}
