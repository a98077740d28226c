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
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use caligo::{
    contract::{Contract, ContractDeployer, PostDeployFn, WaitOptions},
    wallet::TxStatus,
    Error, Result,
};
use caligo_sdk::pasta::pallas;

use harness::{address_from, counter_artifact, init_logger, MemoryNode, SendBehavior, StubWallet};

fn fast_wait() -> WaitOptions {
    WaitOptions { timeout: Duration::from_secs(5), poll_interval: Duration::from_millis(5) }
}

#[test]
fn pending_transaction_confirms_through_polling() -> Result<()> {
    init_logger();

    smol::block_on(async {
        let node = MemoryNode::new();
        let wallet = StubWallet::new(address_from(42), node.clone(), SendBehavior::ConfirmAfter(3));

        let deployer =
            ContractDeployer::new(counter_artifact(), wallet, vec![pallas::Base::from(7)]);
        let sent = deployer.send().await?;

        let receipt = sent.receipt(&fast_wait()).await?;
        assert_eq!(receipt.status, TxStatus::Confirmed);
        assert_eq!(receipt.block_height, Some(3));
        assert_eq!(receipt.tx_hash, sent.tx_hash());

        // Three pending polls, then the confirming one
        assert_eq!(node.receipt_queries.load(Ordering::SeqCst), 4);

        // Thanks for reading
        Ok(())
    })
}

#[test]
fn rejection_reason_passes_through_verbatim() -> Result<()> {
    init_logger();

    smol::block_on(async {
        let reason = "Bytecode commitment mismatch at class registry";

        let node = MemoryNode::new();
        let wallet =
            StubWallet::new(address_from(42), node, SendBehavior::Reject(reason.to_string()));

        let deployer =
            ContractDeployer::new(counter_artifact(), wallet, vec![pallas::Base::from(7)]);
        let sent = deployer.send().await?;

        match sent.receipt(&fast_wait()).await {
            Err(Error::TransactionRejected(tx_hash, got)) => {
                assert_eq!(tx_hash, sent.tx_hash());
                assert_eq!(got, reason);
            }
            other => panic!("Expected TransactionRejected, got {other:?}"),
        }

        // Thanks for reading
        Ok(())
    })
}

#[test]
fn vanished_transaction_times_out() -> Result<()> {
    init_logger();

    smol::block_on(async {
        let node = MemoryNode::new();
        let wallet = StubWallet::new(address_from(42), node, SendBehavior::Vanish);

        let deployer =
            ContractDeployer::new(counter_artifact(), wallet, vec![pallas::Base::from(7)]);
        let sent = deployer.send().await?;

        let options = WaitOptions {
            timeout: Duration::from_millis(30),
            poll_interval: Duration::from_millis(5),
        };
        match sent.receipt(&options).await {
            Err(Error::WaitTimeout(tx_hash)) => assert_eq!(tx_hash, sent.tx_hash()),
            other => panic!("Expected WaitTimeout, got {other:?}"),
        }

        // Thanks for reading
        Ok(())
    })
}

#[test]
fn waiting_twice_settles_once() -> Result<()> {
    init_logger();

    smol::block_on(async {
        let node = MemoryNode::new();
        let wallet = StubWallet::new(address_from(42), node.clone(), SendBehavior::ConfirmAfter(1));

        let artifact = counter_artifact();
        let handle_artifact = artifact.clone();
        let runs = Arc::new(AtomicUsize::new(0));
        let post_runs = runs.clone();

        let post_deploy: PostDeployFn<Contract> = Arc::new(move |address, wallet| {
            post_runs.fetch_add(1, Ordering::SeqCst);
            let artifact = handle_artifact.clone();
            Box::pin(async move { Ok(Contract::at(address, artifact, wallet)) })
        });
        let deployer = ContractDeployer::with_post_deploy(
            artifact,
            wallet,
            vec![pallas::Base::from(7)],
            post_deploy,
        );

        let sent = deployer.send().await?;
        let first = sent.wait(&fast_wait()).await?;
        let second = sent.wait(&fast_wait()).await?;

        assert_eq!(first.receipt, second.receipt);
        assert_eq!(first.contract.address, second.contract.address);

        // The post-deploy constructor ran exactly once
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // One pending poll and one confirming poll, then both waits
        // were answered from the settled receipt
        assert_eq!(node.receipt_queries.load(Ordering::SeqCst), 2);

        // Thanks for reading
        Ok(())
    })
}
