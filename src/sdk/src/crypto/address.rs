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
use pasta_curves::{group::ff::PrimeField, pallas};

use crate::error::ContractError;

/// ContractAddress represents the on-chain identifier of a deployed
/// contract instance. It is derived from the instance preimage, so two
/// parties deploying the same class with the same salt, initializer
/// arguments, deployer and keys will always agree on it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, SerialEncodable, SerialDecodable)]
pub struct ContractAddress(pallas::Base);

impl ContractAddress {
    pub fn new(address: pallas::Base) -> Self {
        Self(address)
    }

    /// Get the inner `pallas::Base` element.
    pub fn inner(&self) -> pallas::Base {
        self.0
    }

    /// Create a `ContractAddress` object from given bytes, erroring if
    /// the input bytes are noncanonical.
    pub fn from_bytes(x: [u8; 32]) -> Result<Self, ContractError> {
        match pallas::Base::from_repr(x).into() {
            Some(v) => Ok(Self(v)),
            None => Err(ContractError::IoError(
                "Failed to instantiate ContractAddress from bytes".to_string(),
            )),
        }
    }

    /// Convert the `ContractAddress` to its canonical byte representation.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_repr()
    }
}

impl From<pallas::Base> for ContractAddress {
    fn from(x: pallas::Base) -> Self {
        Self(x)
    }
}

impl core::fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Base58 encoding
        let address: String = bs58::encode(self.0.to_repr()).into_string();
        write!(f, "{}", address)
    }
}

impl TryFrom<&str> for ContractAddress {
    type Error = ContractError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = match bs58::decode(s).into_vec() {
            Ok(v) => {
                if v.len() != 32 {
                    return Err(ContractError::IoError(
                        "Decoded bs58 string for ContractAddress is not 32 bytes long".to_string(),
                    ))
                }

                v.try_into().unwrap()
            }
            Err(e) => {
                return Err(ContractError::IoError(format!(
                    "Failed to decode bs58 for ContractAddress: {}",
                    e
                )))
            }
        };

        Self::from_bytes(bytes)
    }
}
