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

use std::sync::Arc;

use async_trait::async_trait;
use darkfi_serial::{SerialDecodable, SerialEncodable};

use caligo_sdk::{
    crypto::{ContractAddress, ContractClassId},
    pasta::pallas,
    tx::TransactionHash,
};

use crate::{tx::TransactionRequest, Result};

/// A contract class as recorded by a node.
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct ContractClassRecord {
    pub class_id: ContractClassId,
    pub artifact_hash: pallas::Base,
    pub bytecode_commitment: pallas::Base,
}

/// A deployed contract instance as recorded by a node.
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct ContractRecord {
    pub address: ContractAddress,
    pub class_id: ContractClassId,
}

/// Status a node assigns to a broadcast transaction.
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub enum TxStatus {
    /// Known to the node but not yet finalized
    Pending,
    /// Finalized in a block
    Confirmed,
    /// Dropped or failed, with the node's reason
    Rejected(String),
}

/// What a node reports about a broadcast transaction.
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct TransactionReceipt {
    pub tx_hash: TransactionHash,
    pub status: TxStatus,
    /// Height of the including block, once confirmed
    pub block_height: Option<u32>,
}

/// Read-only view of chain state, as served by a node. All lookups
/// return `None` for state the node has no record of, never an error.
#[async_trait]
pub trait NodeQuery: Send + Sync {
    /// Look up a registered contract class.
    async fn get_contract_class(
        &self,
        class_id: ContractClassId,
    ) -> Result<Option<ContractClassRecord>>;

    /// Look up a deployed contract instance.
    async fn get_contract(&self, address: ContractAddress) -> Result<Option<ContractRecord>>;

    /// Fetch the receipt of a broadcast transaction.
    async fn get_tx_receipt(&self, tx_hash: TransactionHash)
        -> Result<Option<TransactionReceipt>>;
}

/// An account able to sign and broadcast transaction requests. The
/// wallet keeps all signing material behind this trait, so deployment
/// tooling never touches a secret key.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Address of the account this wallet acts for.
    fn address(&self) -> ContractAddress;

    /// Node this wallet reads chain state from.
    fn node(&self) -> Arc<dyn NodeQuery>;

    /// Sign and broadcast an assembled request, returning the hash to
    /// track it by.
    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TransactionHash>;
}
