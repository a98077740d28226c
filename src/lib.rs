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

/// Contract deployment orchestration
pub mod contract;
pub use contract::{Contract, ContractDeployer, DeployOptions, DeploySentTx};

/// Error codes
pub mod error;
pub use error::{Error, Result};

/// Wallet session layer
pub mod session;

/// System primitives
pub mod system;

/// Transaction requests
pub mod tx;
pub use tx::TransactionRequest;

/// Wallet and node interfaces
pub mod wallet;
pub use wallet::{NodeQuery, Wallet};
