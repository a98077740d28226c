/* This file is part of Caligo (https://caligo.network)
 *
 * Copyright (C) 2020-2026 Caligo developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use darkfi_serial::{SerialDecodable, SerialEncodable};
use pasta_curves::{
    group::{ff::Field, Group, GroupEncoding},
    pallas,
};
use rand_core::{CryptoRng, RngCore};

use super::util::{hash_to_base, mod_r_p};
use crate::error::ContractError;

/// Domain separator for the key set commitment
pub const PUB_KEYS_PERSONA: &[u8] = b"Caligo_PubKeys";

/// Secret counterpart of a `PublicKey`. Deployment tooling only ever
/// needs the public side, but wallets derive both.
#[derive(Copy, Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct SecretKey(pallas::Base);

impl SecretKey {
    pub fn random(rng: &mut (impl CryptoRng + RngCore)) -> Self {
        Self(pallas::Base::random(rng))
    }

    /// Get the inner `pallas::Base` element.
    pub fn inner(&self) -> pallas::Base {
        self.0
    }
}

impl From<pallas::Base> for SecretKey {
    fn from(x: pallas::Base) -> Self {
        Self(x)
    }
}

/// Public key attached to private contract state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct PublicKey(pallas::Point);

impl PublicKey {
    pub fn from_secret(s: SecretKey) -> Self {
        let p = pallas::Point::generator() * mod_r_p(s.inner());
        Self(p)
    }

    /// The identity point, used where an instance carries no key of
    /// this kind.
    pub fn identity() -> Self {
        Self(pallas::Point::identity())
    }

    /// Get the inner `pallas::Point`.
    pub fn inner(&self) -> pallas::Point {
        self.0
    }

    /// Create a `PublicKey` object from given bytes, erroring if the
    /// input bytes are not on the curve.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, ContractError> {
        match pallas::Point::from_bytes(&bytes).into() {
            Some(v) => Ok(Self(v)),
            None => {
                Err(ContractError::IoError("Failed to instantiate PublicKey from bytes".to_string()))
            }
        }
    }

    /// Convert the `PublicKey` to its canonical byte representation.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl core::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Base58 encoding
        let pubkey: String = bs58::encode(self.to_bytes()).into_string();
        write!(f, "{}", pubkey)
    }
}

/// The set of public keys bound to a contract instance at deployment.
/// The set is committed to as a whole, so rotating any key means
/// deploying a new instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct PublicKeys {
    /// Key authorizing spends of the instance's private state
    pub nullifier: PublicKey,
    /// Key able to decrypt the instance's private notes
    pub viewing: PublicKey,
}

impl PublicKeys {
    pub fn new(nullifier: PublicKey, viewing: PublicKey) -> Self {
        Self { nullifier, viewing }
    }

    /// Key set for instances that hold no private state.
    pub fn identity() -> Self {
        Self { nullifier: PublicKey::identity(), viewing: PublicKey::identity() }
    }

    /// Commit to the full key set as a single base field element.
    pub fn hash(&self) -> pallas::Base {
        hash_to_base(PUB_KEYS_PERSONA, &[&self.nullifier.to_bytes(), &self.viewing.to_bytes()])
    }
}

impl Default for PublicKeys {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn pubkey_from_secret_roundtrips_bytes() -> Result<(), ContractError> {
        let secret = SecretKey::random(&mut OsRng);
        let public = PublicKey::from_secret(secret);
        assert_eq!(PublicKey::from_bytes(public.to_bytes())?, public);
        Ok(())
    }

    #[test]
    fn key_set_commitment_binds_both_keys() {
        let a = SecretKey::random(&mut OsRng);
        let b = SecretKey::random(&mut OsRng);
        let keys = PublicKeys::new(PublicKey::from_secret(a), PublicKey::from_secret(b));
        let swapped = PublicKeys::new(PublicKey::from_secret(b), PublicKey::from_secret(a));
        assert_ne!(keys.hash(), swapped.hash());
        assert_ne!(keys.hash(), PublicKeys::identity().hash());
    }
}
