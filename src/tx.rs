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

use darkfi_serial::{Encodable, SerialDecodable, SerialEncodable};

use caligo_sdk::tx::{Capsule, ContractCall, TransactionHash};

use crate::{contract::ContractInfo, error::Result};

/// An ordered set of calls produced by one planning stage, together
/// with the capsules those calls consume. Batches concatenate into a
/// `TransactionRequest`.
#[derive(Clone, Debug, Default, Eq, PartialEq, SerialEncodable, SerialDecodable)]
pub struct CallBatch {
    pub calls: Vec<ContractCall>,
    pub capsules: Vec<Capsule>,
}

impl CallBatch {
    pub fn new() -> Self {
        Self { calls: vec![], capsules: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.capsules.is_empty()
    }
}

/// A TransactionRequest is the unit a wallet signs and broadcasts:
/// an arbitrary number of `ContractCall` objects executing atomically
/// in array order, along with their capsules and the descriptors of
/// any contracts the request deploys.
#[derive(Clone, Debug, Eq, PartialEq, SerialEncodable, SerialDecodable)]
pub struct TransactionRequest {
    /// Calls to execute atomically, in order
    pub calls: Vec<ContractCall>,
    /// Bulk payloads accompanying the calls
    pub capsules: Vec<Capsule>,
    /// Descriptors of contracts this request deploys, so the wallet
    /// can index their instances once the request lands
    pub register_contracts: Vec<ContractInfo>,
}

impl TransactionRequest {
    /// Calculate the transaction request hash.
    pub fn hash(&self) -> Result<TransactionHash> {
        let mut hasher = blake3::Hasher::new();
        self.calls.encode(&mut hasher)?;
        self.capsules.encode(&mut hasher)?;
        self.register_contracts.encode(&mut hasher)?;
        Ok(TransactionHash(hasher.finalize().into()))
    }
}
