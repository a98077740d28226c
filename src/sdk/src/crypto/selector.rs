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

use super::util::hash_to_base;

/// Domain separator for function selector derivation
pub const FN_SELECT_PERSONA: &[u8] = b"Caligo_FnSelect";

/// FunctionSelector identifies a callable function of a contract.
/// It is derived from the function name only, so selectors stay stable
/// across recompilations of the same interface.
#[derive(Copy, Clone, Debug, Eq, PartialEq, SerialEncodable, SerialDecodable)]
pub struct FunctionSelector(pallas::Base);

impl FunctionSelector {
    pub fn new(selector: pallas::Base) -> Self {
        Self(selector)
    }

    /// Derive a `FunctionSelector` from a function name.
    pub fn from_name(name: &str) -> Self {
        Self(hash_to_base(FN_SELECT_PERSONA, &[name.as_bytes()]))
    }

    /// Get the inner `pallas::Base` element.
    pub fn inner(&self) -> pallas::Base {
        self.0
    }

    /// Convert the `FunctionSelector` to its canonical byte representation.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_repr()
    }
}

impl core::fmt::Display for FunctionSelector {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Base58 encoding
        let selector: String = bs58::encode(self.0.to_repr()).into_string();
        write!(f, "{}", selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_depends_on_name_only() {
        assert_eq!(FunctionSelector::from_name("transfer"), FunctionSelector::from_name("transfer"));
        assert_ne!(FunctionSelector::from_name("transfer"), FunctionSelector::from_name("mint"));
    }
}
