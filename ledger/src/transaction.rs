//! Transactions.

use crate::rlp;
use serde::{Deserialize, Serialize};
use ur_types::{Address, Signature, TxHash, Wei};

/// Default gas for a plain value transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// A UR transaction.
///
/// The sender is carried explicitly — signature recovery lives outside the
/// reward core — so the signature is opaque here and excluded from the hash,
/// which covers the signing payload only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub nonce: u64,
    pub from: Address,
    pub to: Address,
    pub value: Wei,
    pub gas: u64,
    pub gas_price: Wei,
    pub data: Vec<u8>,
    pub signature: Signature,
}

impl Transaction {
    /// A transfer with default gas parameters and an empty signature slot.
    pub fn new(nonce: u64, from: Address, to: Address, value: Wei, data: Vec<u8>) -> Self {
        Self {
            nonce,
            from,
            to,
            value,
            gas: TRANSFER_GAS,
            gas_price: Wei::ZERO,
            data,
            signature: Signature::EMPTY,
        }
    }

    /// Canonical encoding of the signing payload (everything but the
    /// signature), as an RLP list.
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut items = Vec::with_capacity(128);
        rlp::encode_u64(&mut items, self.nonce);
        rlp::encode_bytes(&mut items, self.from.as_bytes());
        rlp::encode_bytes(&mut items, self.to.as_bytes());
        rlp::encode_uint(&mut items, self.value.raw());
        rlp::encode_u64(&mut items, self.gas);
        rlp::encode_uint(&mut items, self.gas_price.raw());
        rlp::encode_bytes(&mut items, &self.data);
        rlp::encode_list(&items)
    }

    /// The transaction hash: the codec digest of the signing payload.
    pub fn hash(&self) -> TxHash {
        TxHash::new(rlp::digest(&self.signing_payload()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tx() -> Transaction {
        Transaction::new(
            0,
            Address::new([0x11; 20]),
            Address::new([0x22; 20]),
            Wei::from_wei(1),
            vec![0x01],
        )
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(test_tx().hash(), test_tx().hash());
    }

    #[test]
    fn hash_changes_with_payload() {
        let a = test_tx();
        let mut b = test_tx();
        b.data = vec![];
        assert_ne!(a.hash(), b.hash());

        let mut c = test_tx();
        c.value = Wei::from_wei(2);
        assert_ne!(a.hash(), c.hash());

        let mut d = test_tx();
        d.nonce = 1;
        assert_ne!(a.hash(), d.hash());
    }

    #[test]
    fn hash_excludes_signature() {
        let a = test_tx();
        let mut b = test_tx();
        b.signature = Signature([0xff; 65]);
        assert_eq!(a.hash(), b.hash());
    }
}
