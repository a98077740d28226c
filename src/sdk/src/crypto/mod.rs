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

//! Minimal cryptographic primitives needed to address contracts and
//! derive their on-chain identities. Anything proof-related lives in
//! the full node libraries, not here, so contract tooling can stay a
//! lightweight dependency.

/// Miscellaneous hashing utilities
pub mod util;
pub use util::hash_to_base;

/// Public key material attached to a contract instance
pub mod keys;
pub use keys::{PublicKey, PublicKeys, SecretKey};

/// Contract address definitions and methods
pub mod address;
pub use address::ContractAddress;

/// Contract class ID definitions and methods
pub mod class_id;
pub use class_id::ContractClassId;

/// Function selector definitions and methods
pub mod selector;
pub use selector::FunctionSelector;
