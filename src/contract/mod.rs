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

use std::{fmt, sync::Arc};

use darkfi_serial::{SerialDecodable, SerialEncodable};

use caligo_sdk::{
    artifact::ContractArtifact,
    crypto::ContractAddress,
    instance::ContractInstance,
    pasta::pallas,
    tx::ContractCall,
};

use crate::{
    error::{Error, Result},
    wallet::Wallet,
};

/// Deployment orchestration
pub mod deploy;
pub use deploy::{ContractDeployer, DeployOptions, Initializer};

/// Protocol contract resolution
pub mod protocol;
pub use protocol::{resolve_protocol_contract, ProtocolContract};

/// In-flight deployment transactions
pub mod sent_tx;
pub use sent_tx::{DeployedContract, DeploySentTx, PostDeployFn, WaitOptions};

/// Everything a wallet or node needs to recognize a deployed contract:
/// the artifact it runs and the derived instance it runs as.
#[derive(Clone, Debug, Eq, PartialEq, SerialEncodable, SerialDecodable)]
pub struct ContractInfo {
    pub artifact: ContractArtifact,
    pub instance: ContractInstance,
}

impl ContractInfo {
    /// Address the instance lives at.
    pub fn address(&self) -> ContractAddress {
        self.instance.address
    }
}

/// A handle to a contract instance at a known address, bound to the
/// wallet used to interact with it. This is what deployments resolve
/// to once final.
#[derive(Clone)]
pub struct Contract {
    /// Address of the instance
    pub address: ContractAddress,
    /// Artifact describing the callable interface
    pub artifact: ContractArtifact,
    /// Wallet used for calls against this contract
    pub wallet: Arc<dyn Wallet>,
}

impl Contract {
    /// Attach to a contract instance at the given address.
    pub fn at(address: ContractAddress, artifact: ContractArtifact, wallet: Arc<dyn Wallet>) -> Self {
        Self { address, artifact, wallet }
    }

    /// Build a call against one of the contract's functions, checking
    /// the argument count against the artifact.
    pub fn method(&self, name: &str, args: &[pallas::Base]) -> Result<ContractCall> {
        let Some(func) = self.artifact.function(name) else {
            return Err(Error::FunctionNotFound(name.to_string()))
        };

        if args.len() != func.arity as usize {
            return Err(Error::WrongArgumentCount {
                function: name.to_string(),
                expected: func.arity as usize,
                given: args.len(),
            })
        }

        Ok(ContractCall::new(self.address, func.selector(), args.to_vec()))
    }
}

impl fmt::Debug for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contract(address={}, artifact={})", self.address, self.artifact.name)
    }
}
