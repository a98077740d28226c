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

pub use pasta_curves as pasta;

/// Contract artifact structures
pub mod artifact;
pub use artifact::{ContractArtifact, FunctionArtifact};

/// Contract class packing and identification
pub mod class;
pub use class::ContractClass;

/// Crypto-related definitions
pub mod crypto;

/// Error handling
pub mod error;
pub use error::{ContractError, GenericResult};

/// Contract instance derivation
pub mod instance;
pub use instance::ContractInstance;

/// Transaction structures
pub mod tx;
pub use tx::{Capsule, ContractCall, TransactionHash};
