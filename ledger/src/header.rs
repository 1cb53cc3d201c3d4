//! The extended block header.
//!
//! Carries the standard chain fields plus two running counters, `n_signups`
//! and `total_wei`, appended after the standard fields in the canonical RLP
//! encoding. The counters participate in the header hash, so a vanilla-chain
//! decoder rejects these headers — intended: the UR chain has a distinct
//! genesis and is not wire-compatible.

use crate::rlp::{self, Decoder, RlpError};
use serde::{Deserialize, Serialize};
use ur_types::{Address, BlockHash, Wei};

/// Gas limit written into the genesis header.
pub const GENESIS_GAS_LIMIT: u64 = 4_712_388;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub parent_hash: BlockHash,
    pub coinbase: Address,
    pub state_root: BlockHash,
    pub tx_root: BlockHash,
    pub receipts_root: BlockHash,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Vec<u8>,
    pub mix_digest: BlockHash,
    pub nonce: [u8; 8],
    /// Cumulative signup transactions from genesis through this block.
    pub n_signups: Wei,
    /// Cumulative wei issued by the reward system from genesis.
    pub total_wei: Wei,
}

impl BlockHeader {
    /// Canonical RLP encoding: the standard fields in order, then the two
    /// counter fields.
    pub fn encode(&self) -> Vec<u8> {
        let mut items = Vec::with_capacity(256);
        rlp::encode_bytes(&mut items, self.parent_hash.as_bytes());
        rlp::encode_bytes(&mut items, self.coinbase.as_bytes());
        rlp::encode_bytes(&mut items, self.state_root.as_bytes());
        rlp::encode_bytes(&mut items, self.tx_root.as_bytes());
        rlp::encode_bytes(&mut items, self.receipts_root.as_bytes());
        rlp::encode_u64(&mut items, self.number);
        rlp::encode_u64(&mut items, self.gas_limit);
        rlp::encode_u64(&mut items, self.gas_used);
        rlp::encode_u64(&mut items, self.timestamp);
        rlp::encode_bytes(&mut items, &self.extra_data);
        rlp::encode_bytes(&mut items, self.mix_digest.as_bytes());
        rlp::encode_bytes(&mut items, &self.nonce);
        rlp::encode_uint(&mut items, self.n_signups.raw());
        rlp::encode_uint(&mut items, self.total_wei.raw());
        rlp::encode_list(&items)
    }

    /// Decode a header from its canonical encoding. Strict: wrong item
    /// counts, padded integers, and trailing bytes are all rejected.
    pub fn decode(data: &[u8]) -> Result<Self, RlpError> {
        let mut outer = Decoder::new(data);
        let mut items = outer.next_list()?;
        let header = Self {
            parent_hash: BlockHash::new(items.next_fixed::<32>()?),
            coinbase: Address::new(items.next_fixed::<20>()?),
            state_root: BlockHash::new(items.next_fixed::<32>()?),
            tx_root: BlockHash::new(items.next_fixed::<32>()?),
            receipts_root: BlockHash::new(items.next_fixed::<32>()?),
            number: items.next_u64()?,
            gas_limit: items.next_u64()?,
            gas_used: items.next_u64()?,
            timestamp: items.next_u64()?,
            extra_data: items.next_bytes()?.to_vec(),
            mix_digest: BlockHash::new(items.next_fixed::<32>()?),
            nonce: items.next_fixed::<8>()?,
            n_signups: Wei::from_raw(items.next_uint()?),
            total_wei: Wei::from_raw(items.next_uint()?),
        };
        items.finish()?;
        outer.finish()?;
        Ok(header)
    }

    /// The header hash: the codec digest of the canonical encoding.
    pub fn hash(&self) -> BlockHash {
        BlockHash::new(rlp::digest(&self.encode()))
    }
}
