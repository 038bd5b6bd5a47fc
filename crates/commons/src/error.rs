use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors surfaced by venue adapters.
///
/// RPC transport failures are boxed so that both the EVM and the Solana
/// client stacks flow through the same variant.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),

    #[error("RPC chain mismatch: got {actual}, expected {expected}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("offer does not exist: {0}")]
    UnknownOffer(String),

    #[error("account not found: {0}")]
    UnknownAccount(String),

    #[error("transaction reverted: {0}")]
    Reverted(String),

    #[error("operation not supported by this venue: {0}")]
    Unsupported(&'static str),

    #[error("rpc error: {0}")]
    Rpc(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl SdkError {
    /// Wraps any transport/client error into [`SdkError::Rpc`].
    pub fn rpc(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        SdkError::Rpc(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = SdkError::ChainMismatch { expected: 1, actual: 3 };
        assert_eq!(err.to_string(), "RPC chain mismatch: got 3, expected 1");
        assert_eq!(
            SdkError::UnknownOffer("42".to_string()).to_string(),
            "offer does not exist: 42"
        );
    }
}
