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

use log::{debug, info};
use rand::rngs::OsRng;

use caligo_sdk::{
    artifact::{ContractArtifact, FunctionArtifact},
    class::ContractClass,
    crypto::{ContractAddress, PublicKeys},
    instance::ContractInstance,
    pasta::{group::ff::Field, pallas},
    tx::{Capsule, ContractCall},
};

use super::{
    protocol::{ProtocolContract, DEPLOY_FUNC, REGISTER_FUNC},
    sent_tx::{DeploySentTx, PostDeployFn},
    Contract, ContractInfo,
};
use crate::{
    error::{Error, Result},
    system::LazyInit,
    tx::{CallBatch, TransactionRequest},
    wallet::Wallet,
};

/// Which function runs as the instance initializer.
#[derive(Clone, Debug)]
pub enum Initializer {
    /// Resolve by name in the artifact's function table
    Name(String),
    /// Use the given function artifact as-is
    Artifact(FunctionArtifact),
}

/// Knobs for a single deployment flow. The defaults produce the full
/// register, deploy, initialize sequence.
#[derive(Clone, Debug, Default)]
pub struct DeployOptions {
    /// Deployment salt; drawn at random when not given
    pub salt: Option<pallas::Base>,
    /// Initializer override; the artifact's default otherwise
    pub initializer: Option<Initializer>,
    /// Public keys attached to the instance; "no keys" otherwise
    pub public_keys: Option<PublicKeys>,
    /// Account recorded as the instance's deployer; the wallet's own
    /// address otherwise. Ignored for universal deployments.
    pub deployer: Option<ContractAddress>,
    /// Do not bind the deploying account into the address
    pub universal_deploy: bool,
    /// Leave out the class registration call
    pub skip_class_registration: bool,
    /// Leave out the public deployment call
    pub skip_public_deployment: bool,
    /// Leave out the initializer call
    pub skip_initialization: bool,
}

/// Orchestrates one contract deployment: derives the instance, plans
/// the exact calls the chain still needs, assembles them into a single
/// atomic request, and broadcasts it through the wallet. Every derived
/// stage is computed once and reused, however callers interleave.
pub struct ContractDeployer<C: 'static = Contract> {
    artifact: ContractArtifact,
    wallet: Arc<dyn Wallet>,
    constructor_args: Vec<pallas::Base>,
    options: DeployOptions,
    post_deploy: PostDeployFn<C>,

    // One memo cell per derived stage
    info: LazyInit<ContractInfo>,
    deployment: LazyInit<CallBatch>,
    initialization: LazyInit<CallBatch>,
    request: LazyInit<TransactionRequest>,
}

impl ContractDeployer<Contract> {
    /// Deployer resolving to a generic `Contract` handle.
    pub fn new(
        artifact: ContractArtifact,
        wallet: Arc<dyn Wallet>,
        constructor_args: Vec<pallas::Base>,
    ) -> Self {
        let handle_artifact = artifact.clone();
        let post_deploy: PostDeployFn<Contract> = Arc::new(move |address, wallet| {
            let artifact = handle_artifact.clone();
            Box::pin(async move { Ok(Contract::at(address, artifact, wallet)) })
        });

        Self::with_post_deploy(artifact, wallet, constructor_args, post_deploy)
    }
}

impl<C: 'static> ContractDeployer<C> {
    /// Deployer resolving to a caller-defined handle type through
    /// `post_deploy`, which runs once the deployment is final.
    pub fn with_post_deploy(
        artifact: ContractArtifact,
        wallet: Arc<dyn Wallet>,
        constructor_args: Vec<pallas::Base>,
        post_deploy: PostDeployFn<C>,
    ) -> Self {
        Self {
            artifact,
            wallet,
            constructor_args,
            options: DeployOptions::default(),
            post_deploy,
            info: LazyInit::new(),
            deployment: LazyInit::new(),
            initialization: LazyInit::new(),
            request: LazyInit::new(),
        }
    }

    pub fn with_options(mut self, options: DeployOptions) -> Self {
        self.options = options;
        self
    }

    /// Build or return the deployment descriptor. The first call fixes
    /// the salt and the derived instance; every later call returns the
    /// same descriptor.
    pub async fn contract_info(&self) -> Result<ContractInfo> {
        self.info.get_or_try_init(async { self.build_contract_info() }).await
    }

    fn build_contract_info(&self) -> Result<ContractInfo> {
        if self.artifact.bytecode.is_empty() {
            return Err(Error::EmptyBytecode(self.artifact.name.clone()))
        }

        let initializer = resolve_initializer(&self.artifact, self.options.initializer.as_ref())?;

        match &initializer {
            None if !self.constructor_args.is_empty() => {
                return Err(Error::UnexpectedInitializerArgs)
            }
            Some(func) if self.constructor_args.len() != func.arity as usize => {
                return Err(Error::WrongArgumentCount {
                    function: func.name.clone(),
                    expected: func.arity as usize,
                    given: self.constructor_args.len(),
                })
            }
            _ => {}
        }

        let class = ContractClass::from_artifact(&self.artifact)?;
        let salt = self.options.salt.unwrap_or_else(|| pallas::Base::random(&mut OsRng));
        let public_keys = self.options.public_keys.unwrap_or_default();
        let deployer = if self.options.universal_deploy {
            None
        } else {
            Some(self.options.deployer.unwrap_or_else(|| self.wallet.address()))
        };

        let instance = ContractInstance::derive(
            class.class_id,
            salt,
            initializer.as_ref(),
            &self.constructor_args,
            deployer,
            public_keys,
        );

        let contract_info = ContractInfo { artifact: self.artifact.clone(), instance };
        check_class_consistency(&contract_info)?;

        debug!(
            target: "contract::deploy",
            "Derived {} instance at address {}", self.artifact.name, instance.address
        );

        Ok(contract_info)
    }

    /// Calls that put the class and the instance on chain, in order.
    /// Consults the node so an already-registered class is not
    /// re-registered.
    pub async fn deployment_calls(&self) -> Result<CallBatch> {
        self.deployment
            .get_or_try_init(async {
                let contract_info = self.contract_info().await?;
                self.plan_deployment(&contract_info).await
            })
            .await
    }

    async fn plan_deployment(&self, contract_info: &ContractInfo) -> Result<CallBatch> {
        let mut batch = CallBatch::new();

        if !self.options.skip_class_registration {
            let class = ContractClass::from_artifact(&contract_info.artifact)?;

            if self.wallet.node().get_contract_class(class.class_id).await?.is_none() {
                info!(
                    target: "contract::deploy",
                    "Registering class {} for {}", class.class_id, contract_info.artifact.name
                );

                let registerer = Contract::at(
                    ProtocolContract::ClassRegisterer.address(),
                    ProtocolContract::ClassRegisterer.artifact(),
                    self.wallet.clone(),
                );
                let args = [
                    class.artifact_hash,
                    class.bytecode_commitment,
                    pallas::Base::from(class.packed_bytecode.len() as u64),
                ];
                batch.calls.push(registerer.method(REGISTER_FUNC, &args)?);
                batch.capsules.push(Capsule::new(registerer.address, class.packed_bytecode));
            } else {
                debug!(
                    target: "contract::deploy",
                    "Class {} already registered, skipping registration", class.class_id
                );
            }
        }

        if !self.options.skip_public_deployment {
            if let Some(deployer) = contract_info.instance.deployer {
                if deployer != self.wallet.address() {
                    return Err(Error::DeployerMismatch {
                        expected: deployer,
                        actual: self.wallet.address(),
                    })
                }
            }

            let instance_deployer = Contract::at(
                ProtocolContract::InstanceDeployer.address(),
                ProtocolContract::InstanceDeployer.artifact(),
                self.wallet.clone(),
            );
            let universal = contract_info.instance.deployer.is_none();
            let args = [
                contract_info.instance.salt,
                contract_info.instance.class_id.inner(),
                contract_info.instance.initialization_hash,
                contract_info.instance.public_keys.hash(),
                pallas::Base::from(universal as u64),
            ];
            batch.calls.push(instance_deployer.method(DEPLOY_FUNC, &args)?);
        }

        Ok(batch)
    }

    /// The initializer call, when one runs.
    pub async fn initialization_calls(&self) -> Result<CallBatch> {
        self.initialization
            .get_or_try_init(async {
                let contract_info = self.contract_info().await?;
                self.plan_initialization(&contract_info)
            })
            .await
    }

    fn plan_initialization(&self, contract_info: &ContractInfo) -> Result<CallBatch> {
        let mut batch = CallBatch::new();

        if self.options.skip_initialization {
            return Ok(batch)
        }

        let Some(initializer) =
            resolve_initializer(&self.artifact, self.options.initializer.as_ref())?
        else {
            return Ok(batch)
        };

        // Calling the address this request itself deploys is valid:
        // calls execute in array order within the transaction.
        batch.calls.push(ContractCall::new(
            contract_info.instance.address,
            initializer.selector(),
            self.constructor_args.clone(),
        ));

        Ok(batch)
    }

    /// Build or return the full atomic request for this deployment.
    pub async fn request(&self) -> Result<TransactionRequest> {
        self.request
            .get_or_try_init(async {
                let contract_info = self.contract_info().await?;
                let (deployment, initialization) =
                    futures::try_join!(self.deployment_calls(), self.initialization_calls())?;
                assemble_request(deployment, initialization, contract_info)
            })
            .await
    }

    /// Broadcast the deployment and return the handle used to track
    /// it to finality.
    pub async fn send(&self) -> Result<DeploySentTx<C>> {
        let request = self.request().await?;
        let contract_info = self.contract_info().await?;

        let tx_hash = self.wallet.send_transaction(&request).await?;
        info!(
            target: "contract::deploy",
            "Broadcast deployment of {} as tx {}", contract_info.artifact.name, tx_hash
        );

        Ok(DeploySentTx::new(
            tx_hash,
            contract_info.address(),
            self.wallet.clone(),
            self.post_deploy.clone(),
        ))
    }
}

/// Resolve which function initializes the instance. `None` means the
/// contract takes no initializer, which is a valid deployment.
fn resolve_initializer(
    artifact: &ContractArtifact,
    initializer: Option<&Initializer>,
) -> Result<Option<FunctionArtifact>> {
    match initializer {
        Some(Initializer::Artifact(func)) => Ok(Some(func.clone())),

        Some(Initializer::Name(name)) => {
            let Some(func) = artifact.function(name) else {
                return Err(Error::InitializerNotFound(name.clone()))
            };
            if !func.is_initializer {
                return Err(Error::NotAnInitializer(name.clone()))
            }
            Ok(Some(func.clone()))
        }

        None => Ok(artifact.default_initializer().cloned()),
    }
}

/// Recompute the class commitment straight from the descriptor's
/// artifact and require it to match the instance. Catches drift
/// between the artifact in hand and the instance about to broadcast.
fn check_class_consistency(contract_info: &ContractInfo) -> Result<()> {
    let computed = ContractClass::from_artifact(&contract_info.artifact)?.class_id;
    if computed != contract_info.instance.class_id {
        return Err(Error::ContractClassMismatch {
            computed,
            registered: contract_info.instance.class_id,
        })
    }

    Ok(())
}

/// Concatenate the planned batches into the final request, keeping
/// registration before deployment before initialization. A request
/// with no calls at all is refused here.
fn assemble_request(
    deployment: CallBatch,
    initialization: CallBatch,
    contract_info: ContractInfo,
) -> Result<TransactionRequest> {
    let mut calls = deployment.calls;
    calls.extend(initialization.calls);

    let mut capsules = deployment.capsules;
    capsules.extend(initialization.capsules);

    if calls.is_empty() {
        return Err(Error::NothingToDeploy)
    }

    Ok(TransactionRequest { calls, capsules, register_contracts: vec![contract_info] })
}

#[cfg(test)]
mod tests {
    use caligo_sdk::crypto::ContractClassId;

    use super::*;

    fn artifact() -> ContractArtifact {
        ContractArtifact {
            name: "Counter".to_string(),
            bytecode: vec![0xca, 0x11, 0x60],
            functions: vec![
                FunctionArtifact { name: "constructor".to_string(), arity: 1, is_initializer: true },
                FunctionArtifact { name: "reset".to_string(), arity: 0, is_initializer: true },
                FunctionArtifact {
                    name: "increment".to_string(),
                    arity: 1,
                    is_initializer: false,
                },
            ],
        }
    }

    #[test]
    fn initializer_resolution() -> Result<()> {
        let artifact = artifact();

        // Default falls back to the canonical name.
        let func = resolve_initializer(&artifact, None)?.unwrap();
        assert_eq!(func.name, "constructor");

        // Explicit name.
        let by_name = Initializer::Name("reset".to_string());
        let func = resolve_initializer(&artifact, Some(&by_name))?.unwrap();
        assert_eq!(func.name, "reset");

        // Explicit artifact is taken as-is, even if foreign.
        let foreign =
            FunctionArtifact { name: "setup".to_string(), arity: 2, is_initializer: true };
        let by_artifact = Initializer::Artifact(foreign.clone());
        assert_eq!(resolve_initializer(&artifact, Some(&by_artifact))?, Some(foreign));

        // Unknown names and non-initializers are refused.
        let unknown = Initializer::Name("missing".to_string());
        assert!(matches!(
            resolve_initializer(&artifact, Some(&unknown)),
            Err(Error::InitializerNotFound(_))
        ));
        let not_init = Initializer::Name("increment".to_string());
        assert!(matches!(
            resolve_initializer(&artifact, Some(&not_init)),
            Err(Error::NotAnInitializer(_))
        ));

        // No initializer at all is valid.
        let stateless = ContractArtifact {
            name: "Stateless".to_string(),
            bytecode: vec![0x00],
            functions: vec![],
        };
        assert_eq!(resolve_initializer(&stateless, None)?, None);

        Ok(())
    }

    #[test]
    fn class_consistency_rejects_tampering() -> Result<()> {
        let artifact = artifact();
        let class = ContractClass::from_artifact(&artifact)?;
        let instance = ContractInstance::derive(
            class.class_id,
            pallas::Base::from(11),
            None,
            &[],
            None,
            PublicKeys::identity(),
        );

        let good = ContractInfo { artifact: artifact.clone(), instance };
        assert!(check_class_consistency(&good).is_ok());

        let mut tampered = good.clone();
        tampered.instance.class_id = ContractClassId::from(pallas::Base::from(666));
        assert!(matches!(
            check_class_consistency(&tampered),
            Err(Error::ContractClassMismatch { .. })
        ));

        Ok(())
    }

    #[test]
    fn assembly_preserves_order_and_refuses_empty() -> Result<()> {
        let artifact = artifact();
        let class = ContractClass::from_artifact(&artifact)?;
        let instance = ContractInstance::derive(
            class.class_id,
            pallas::Base::from(11),
            None,
            &[],
            None,
            PublicKeys::identity(),
        );
        let contract_info = ContractInfo { artifact, instance };

        let deployment = CallBatch {
            calls: vec![ContractCall::new(
                ProtocolContract::ClassRegisterer.address(),
                FunctionArtifact {
                    name: REGISTER_FUNC.to_string(),
                    arity: 3,
                    is_initializer: false,
                }
                .selector(),
                vec![],
            )],
            capsules: vec![Capsule::new(ProtocolContract::ClassRegisterer.address(), vec![])],
        };
        let initialization = CallBatch {
            calls: vec![ContractCall::new(
                instance.address,
                FunctionArtifact { name: "constructor".to_string(), arity: 0, is_initializer: true }
                    .selector(),
                vec![],
            )],
            capsules: vec![],
        };

        let request =
            assemble_request(deployment.clone(), initialization, contract_info.clone())?;
        assert_eq!(request.calls.len(), 2);
        assert_eq!(request.calls[0].to, ProtocolContract::ClassRegisterer.address());
        assert_eq!(request.calls[1].to, instance.address);
        assert_eq!(request.capsules.len(), 1);
        assert_eq!(request.register_contracts, vec![contract_info.clone()]);

        assert!(matches!(
            assemble_request(CallBatch::new(), CallBatch::new(), contract_info),
            Err(Error::NothingToDeploy)
        ));

        Ok(())
    }
}
