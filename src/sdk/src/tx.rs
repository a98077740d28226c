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

use std::fmt;

use darkfi_serial::{SerialDecodable, SerialEncodable};
use pasta_curves::pallas;

use super::crypto::{ContractAddress, FunctionSelector};

#[derive(Copy, Clone, Debug, Eq, PartialEq, SerialEncodable, SerialDecodable)]
// We have to introduce a type rather than using an alias so we can implement Display
pub struct TransactionHash(pub [u8; 32]);

impl TransactionHash {
    pub fn new(data: [u8; 32]) -> Self {
        Self(data)
    }

    pub fn inner(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn as_string(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.as_string())
    }
}

/// A ContractCall is the part of a transaction request that invokes
/// the function `selector` of the contract instance at `to`, passing
/// `args` as the call's arguments.
#[derive(Clone, Eq, PartialEq, SerialEncodable, SerialDecodable)]
pub struct ContractCall {
    /// Address of the contract instance invoked
    pub to: ContractAddress,
    /// Selector of the function invoked
    pub selector: FunctionSelector,
    /// Arguments passed to the function
    pub args: Vec<pallas::Base>,
}

impl ContractCall {
    pub fn new(to: ContractAddress, selector: FunctionSelector, args: Vec<pallas::Base>) -> Self {
        Self { to, selector, args }
    }
}

// Avoid showing the args in the debug output since often they are very long.
impl fmt::Debug for ContractCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractCall(to={}, selector={}, n_args={})", self.to, self.selector, self.args.len())
    }
}

/// A Capsule carries bulk data alongside a transaction request, bound
/// to the contract that will consume it. Payloads too large to pass as
/// call arguments, such as packed bytecode, travel here.
#[derive(Clone, Eq, PartialEq, SerialEncodable, SerialDecodable)]
pub struct Capsule {
    /// Contract the payload is addressed to
    pub contract: ContractAddress,
    /// Payload as packed field elements
    pub data: Vec<pallas::Base>,
}

impl Capsule {
    pub fn new(contract: ContractAddress, data: Vec<pallas::Base>) -> Self {
        Self { contract, data }
    }
}

// Same as for calls, the payload is elided from the debug output.
impl fmt::Debug for Capsule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capsule(contract={}, n_fields={})", self.contract, self.data.len())
    }
}
