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

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use futures::future::BoxFuture;
use log::debug;

use caligo_sdk::{crypto::ContractAddress, tx::TransactionHash};

use super::Contract;
use crate::{
    error::{Error, Result},
    system::LazyInit,
    wallet::{TransactionReceipt, TxStatus, Wallet},
};

/// Strategy producing the typed contract handle once its deployment
/// is final.
pub type PostDeployFn<C> =
    Arc<dyn Fn(ContractAddress, Arc<dyn Wallet>) -> BoxFuture<'static, Result<C>> + Send + Sync>;

/// How long and how eagerly to wait for finalization.
#[derive(Copy, Clone, Debug)]
pub struct WaitOptions {
    /// Give up after this much wall-clock time
    pub timeout: Duration,
    /// Pause between receipt polls
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(60), poll_interval: Duration::from_millis(500) }
    }
}

/// A deployment in flight: the broadcast transaction hash plus
/// everything needed to resolve the typed handle once the chain
/// finalizes it. Waiting any number of times, through any accessor,
/// settles on one receipt and one handle.
pub struct DeploySentTx<C: 'static = Contract> {
    tx_hash: TransactionHash,
    address: ContractAddress,
    wallet: Arc<dyn Wallet>,
    post_deploy: PostDeployFn<C>,
    receipt: LazyInit<TransactionReceipt>,
    contract: LazyInit<C>,
}

/// A finalized deployment: the receipt and the typed handle.
#[derive(Clone, Debug)]
pub struct DeployedContract<C = Contract> {
    pub receipt: TransactionReceipt,
    pub contract: C,
}

impl<C: 'static> DeploySentTx<C> {
    pub(crate) fn new(
        tx_hash: TransactionHash,
        address: ContractAddress,
        wallet: Arc<dyn Wallet>,
        post_deploy: PostDeployFn<C>,
    ) -> Self {
        Self {
            tx_hash,
            address,
            wallet,
            post_deploy,
            receipt: LazyInit::new(),
            contract: LazyInit::new(),
        }
    }

    /// Hash of the broadcast transaction.
    pub fn tx_hash(&self) -> TransactionHash {
        self.tx_hash
    }

    /// Address the deployment resolves to.
    pub fn address(&self) -> ContractAddress {
        self.address
    }

    /// Wait until the node reports the transaction final, polling on
    /// the configured cadence. A rejection surfaces the node's reason
    /// verbatim. The settled receipt is kept, so waiting again does
    /// not touch the node.
    pub async fn receipt(&self, options: &WaitOptions) -> Result<TransactionReceipt> {
        self.receipt.get_or_try_init(self.poll_receipt(options)).await
    }

    async fn poll_receipt(&self, options: &WaitOptions) -> Result<TransactionReceipt> {
        let node = self.wallet.node();
        let started = Instant::now();

        loop {
            if let Some(receipt) = node.get_tx_receipt(self.tx_hash).await? {
                match &receipt.status {
                    TxStatus::Pending => {
                        debug!(
                            target: "contract::sent_tx",
                            "Transaction {} still pending", self.tx_hash
                        )
                    }
                    TxStatus::Confirmed => return Ok(receipt),
                    TxStatus::Rejected(reason) => {
                        return Err(Error::TransactionRejected(self.tx_hash, reason.clone()))
                    }
                }
            }

            if started.elapsed() >= options.timeout {
                return Err(Error::WaitTimeout(self.tx_hash))
            }

            smol::Timer::after(options.poll_interval).await;
        }
    }
}

impl<C: Clone + 'static> DeploySentTx<C> {
    /// The typed contract handle, once the deployment is final. The
    /// post-deploy constructor runs exactly once across all waiters.
    pub async fn deployed(&self, options: &WaitOptions) -> Result<C> {
        self.receipt(options).await?;
        self.contract
            .get_or_try_init((self.post_deploy)(self.address, self.wallet.clone()))
            .await
    }

    /// Receipt and handle together.
    pub async fn wait(&self, options: &WaitOptions) -> Result<DeployedContract<C>> {
        let receipt = self.receipt(options).await?;
        let contract = self.deployed(options).await?;
        Ok(DeployedContract { receipt, contract })
    }
}
