//! Storage keys and derived account addresses.
//!
//! Every record lives under exactly one [`DataKey`]. The key is fully
//! determined by the record kind and its natural key material, so a client
//! can locate any record without asking the contract:
//!
//! | Record       | Key material          |
//! |--------------|-----------------------|
//! | `Config`     | none (singleton)      |
//! | `UserStats`  | wallet                |
//! | `Poll`       | poll id               |
//! | `VoteRecord` | (poll id, wallet)     |

use soroban_sdk::{contracttype, xdr::ToXdr, Address, Bytes, BytesN, Env};

/// Domain separator mixed into every derived address.
const ADDRESS_SEED: &[u8] = b"mvote";

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    UserStats(Address),
    Poll(u64),
    VoteRecord(u64, Address),
}

/// Compute the 32-byte account address of a record.
///
/// `address = SHA-256(seed || xdr(key))`. XDR encoding is canonical, so equal
/// keys always hash to the same address and distinct keys collide only with
/// negligible probability.
pub fn derive_address(env: &Env, key: &DataKey) -> BytesN<32> {
    let mut preimage = Bytes::from_slice(env, ADDRESS_SEED);
    preimage.append(&key.clone().to_xdr(env));
    env.crypto().sha256(&preimage).into()
}
