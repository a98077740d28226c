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

/// ContractClassId identifies a contract class, which is the code of a
/// contract independent of any deployed instance of it. Registering a
/// class once is enough for any number of instances to reference it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, SerialEncodable, SerialDecodable)]
pub struct ContractClassId(pallas::Base);

impl ContractClassId {
    pub fn new(class_id: pallas::Base) -> Self {
        Self(class_id)
    }

    /// Get the inner `pallas::Base` element.
    pub fn inner(&self) -> pallas::Base {
        self.0
    }

    /// Create a `ContractClassId` object from given bytes, erroring if
    /// the input bytes are noncanonical.
    pub fn from_bytes(x: [u8; 32]) -> Result<Self, ContractError> {
        match pallas::Base::from_repr(x).into() {
            Some(v) => Ok(Self(v)),
            None => Err(ContractError::IoError(
                "Failed to instantiate ContractClassId from bytes".to_string(),
            )),
        }
    }

    /// Convert the `ContractClassId` to its canonical byte representation.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_repr()
    }
}

impl From<pallas::Base> for ContractClassId {
    fn from(x: pallas::Base) -> Self {
        Self(x)
    }
}

impl core::fmt::Display for ContractClassId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Base58 encoding
        let class_id: String = bs58::encode(self.0.to_repr()).into_string();
        write!(f, "{}", class_id)
    }
}

impl TryFrom<&str> for ContractClassId {
    type Error = ContractError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let bytes: [u8; 32] = match bs58::decode(s).into_vec() {
            Ok(v) => {
                if v.len() != 32 {
                    return Err(ContractError::IoError(
                        "Decoded bs58 string for ContractClassId is not 32 bytes long".to_string(),
                    ))
                }

                v.try_into().unwrap()
            }
            Err(e) => {
                return Err(ContractError::IoError(format!(
                    "Failed to decode bs58 for ContractClassId: {}",
                    e
                )))
            }
        };

        Self::from_bytes(bytes)
    }
}
