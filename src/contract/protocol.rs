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

use lazy_static::lazy_static;
use log::debug;

use caligo_sdk::{
    artifact::{ContractArtifact, FunctionArtifact},
    class::ContractClass,
    crypto::{ContractAddress, ContractClassId},
    pasta::pallas,
    GenericResult,
};

use super::Contract;
use crate::{
    error::{Error, Result},
    wallet::Wallet,
};

/// Function of the class registerer that records a new contract class
pub const REGISTER_FUNC: &str = "register_contract_class";

/// Function of the instance deployer that records a new instance
pub const DEPLOY_FUNC: &str = "deploy_contract_instance";

/// Length of the placeholder bytecode standing in for native code
const CANONICAL_BYTECODE_LEN: usize = 64;

lazy_static! {
    // Protocol contracts occupy reserved low addresses. Instance
    // addresses are hash outputs, so an honest deployment can never
    // collide with these.

    /// Address of the canonical class registerer
    pub static ref CLASS_REGISTERER_ADDRESS: ContractAddress =
        ContractAddress::from(pallas::Base::from(1));

    /// Address of the canonical instance deployer
    pub static ref INSTANCE_DEPLOYER_ADDRESS: ContractAddress =
        ContractAddress::from(pallas::Base::from(2));
}

/// The protocol contracts every node ships with. Deployments go
/// through these two, so their addresses and interfaces are fixed
/// network-wide.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProtocolContract {
    ClassRegisterer,
    InstanceDeployer,
}

impl ProtocolContract {
    pub const ALL: [Self; 2] = [Self::ClassRegisterer, Self::InstanceDeployer];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ClassRegisterer => "ContractClassRegisterer",
            Self::InstanceDeployer => "ContractInstanceDeployer",
        }
    }

    pub fn address(&self) -> ContractAddress {
        match self {
            Self::ClassRegisterer => *CLASS_REGISTERER_ADDRESS,
            Self::InstanceDeployer => *INSTANCE_DEPLOYER_ADDRESS,
        }
    }

    /// The canonical artifact of this protocol contract. The node runs
    /// these natively, so the bytecode is a stable placeholder whose
    /// only purpose is pinning the class commitments.
    pub fn artifact(&self) -> ContractArtifact {
        let functions = match self {
            Self::ClassRegisterer => vec![FunctionArtifact {
                name: REGISTER_FUNC.to_string(),
                arity: 3,
                is_initializer: false,
            }],
            Self::InstanceDeployer => vec![FunctionArtifact {
                name: DEPLOY_FUNC.to_string(),
                arity: 5,
                is_initializer: false,
            }],
        };

        ContractArtifact {
            name: self.name().to_string(),
            bytecode: canonical_bytecode(self.name()),
            functions,
        }
    }

    /// Class ID the canonical artifact registers as.
    pub fn class_id(&self) -> GenericResult<ContractClassId> {
        Ok(ContractClass::from_artifact(&self.artifact())?.class_id)
    }
}

/// Deterministic placeholder bytecode for a natively-executed
/// contract, derived from its name.
fn canonical_bytecode(name: &str) -> Vec<u8> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(name.as_bytes());

    let mut bytecode = vec![0_u8; CANONICAL_BYTECODE_LEN];
    hasher.finalize_xof().fill(&mut bytecode);
    bytecode
}

/// Identify which protocol contract is deployed at `address` and
/// return a typed handle to it. Read-only: an unknown address or an
/// unrecognized class is an error, never a deployment.
pub async fn resolve_protocol_contract(
    address: ContractAddress,
    wallet: Arc<dyn Wallet>,
) -> Result<Contract> {
    let Some(record) = wallet.node().get_contract(address).await? else {
        return Err(Error::ContractNotRegistered(address))
    };

    for candidate in ProtocolContract::ALL {
        if candidate.class_id()? == record.class_id {
            debug!(
                target: "contract::protocol",
                "Resolved {} at address {}", candidate.name(), address
            );
            return Ok(Contract::at(address, candidate.artifact(), wallet))
        }
    }

    Err(Error::ArtifactNotFound(address))
}
