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
use pasta_curves::pallas;

use crate::{
    crypto::{util::hash_to_base, FunctionSelector},
    error::GenericResult,
};

/// Domain separator for artifact hashing
pub const ARTIFACT_PERSONA: &[u8] = b"Caligo_Artifact";

/// Initializer names preferred when an artifact exports more than one
/// initializer-capable function, in lookup order.
pub const CANONICAL_INITIALIZERS: [&str; 2] = ["constructor", "initialize"];

/// Description of a single callable function in a compiled contract.
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct FunctionArtifact {
    /// Function name as exported by the compiler
    pub name: String,
    /// Number of field elements the function takes as arguments
    pub arity: u8,
    /// Whether this function may run as the instance initializer
    pub is_initializer: bool,
}

impl FunctionArtifact {
    /// Derive the on-chain selector for this function.
    pub fn selector(&self) -> FunctionSelector {
        FunctionSelector::from_name(&self.name)
    }
}

/// Output of the contract compiler: the bytecode together with the
/// function table describing its callable interface.
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct ContractArtifact {
    /// Contract name as exported by the compiler
    pub name: String,
    /// Compiled contract bytecode
    pub bytecode: Vec<u8>,
    /// Callable functions of the contract
    pub functions: Vec<FunctionArtifact>,
}

impl ContractArtifact {
    /// Commit to the contract interface, meaning its name and function
    /// table. The bytecode is committed separately when the class ID
    /// is formed, so interface and code commitments stay independent.
    pub fn hash(&self) -> GenericResult<pallas::Base> {
        let mut buf = vec![];
        self.name.encode(&mut buf)?;
        self.functions.encode(&mut buf)?;
        Ok(hash_to_base(ARTIFACT_PERSONA, &[&buf]))
    }

    /// Look up a function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionArtifact> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// The initializer used when a deployment does not name one.
    /// Prefers the canonical names, then falls back to the first
    /// initializer-capable function in declaration order. `None` means
    /// the contract takes no initializer at all.
    pub fn default_initializer(&self) -> Option<&FunctionArtifact> {
        for name in CANONICAL_INITIALIZERS {
            if let Some(func) = self.function(name) {
                if func.is_initializer {
                    return Some(func)
                }
            }
        }

        self.functions.iter().find(|f| f.is_initializer)
    }
}
