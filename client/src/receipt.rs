use std::fmt;

use solana_sdk::signature::Signature;

use crate::error::{ClientError, Result};

/// Identifier of a transaction the cluster accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionReceipt(Signature);

impl TransactionReceipt {
    /// Fails on the all-zero signature, which no signed transaction carries.
    pub fn new(signature: Signature) -> Result<Self> {
        if signature == Signature::default() {
            return Err(ClientError::EmptySignature);
        }
        Ok(Self(signature))
    }

    pub fn signature(&self) -> &Signature {
        &self.0
    }
}

impl fmt::Display for TransactionReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_signature_is_not_a_receipt() {
        assert!(matches!(
            TransactionReceipt::new(Signature::default()),
            Err(ClientError::EmptySignature)
        ));
    }

    #[test]
    fn displays_as_base58() {
        let signature = Signature::from([7u8; 64]);
        let receipt = TransactionReceipt::new(signature).unwrap();
        let shown = receipt.to_string();

        assert!(!shown.is_empty());
        assert_eq!(shown, signature.to_string());
        assert_eq!(receipt.signature(), &signature);
    }
}
