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

use caligo::{
    contract::{protocol::REGISTER_FUNC, resolve_protocol_contract, ProtocolContract},
    wallet::ContractRecord,
    Error, Result,
};
use caligo_sdk::{class::ContractClass, pasta::pallas};

use harness::{address_from, counter_artifact, init_logger, MemoryNode, SendBehavior, StubWallet};

#[test]
fn resolves_both_protocol_contracts() -> Result<()> {
    init_logger();

    smol::block_on(async {
        let node = MemoryNode::new();
        for contract in ProtocolContract::ALL {
            node.insert_contract(ContractRecord {
                address: contract.address(),
                class_id: contract.class_id()?,
            });
        }
        let wallet = StubWallet::new(address_from(42), node, SendBehavior::ConfirmAfter(0));

        for contract in ProtocolContract::ALL {
            let resolved = resolve_protocol_contract(contract.address(), wallet.clone()).await?;
            assert_eq!(resolved.address, contract.address());
            assert_eq!(resolved.artifact.name, contract.name());
        }

        // The resolved handle is immediately usable for building calls
        let registerer =
            resolve_protocol_contract(ProtocolContract::ClassRegisterer.address(), wallet.clone())
                .await?;
        let call = registerer.method(REGISTER_FUNC, &[pallas::Base::from(1); 3])?;
        assert_eq!(call.to, ProtocolContract::ClassRegisterer.address());

        // Thanks for reading
        Ok(())
    })
}

#[test]
fn unknown_address_is_not_registered() -> Result<()> {
    init_logger();

    smol::block_on(async {
        let node = MemoryNode::new();
        let wallet = StubWallet::new(address_from(42), node, SendBehavior::ConfirmAfter(0));

        let address = ProtocolContract::ClassRegisterer.address();
        match resolve_protocol_contract(address, wallet).await {
            Err(Error::ContractNotRegistered(missing)) => assert_eq!(missing, address),
            other => panic!("Expected ContractNotRegistered, got {other:?}"),
        }

        // Thanks for reading
        Ok(())
    })
}

#[test]
fn alien_class_is_not_matched() -> Result<()> {
    init_logger();

    smol::block_on(async {
        let node = MemoryNode::new();

        // A contract lives at the registerer address, but its class
        // does not belong to any canonical artifact
        let alien_class = ContractClass::from_artifact(&counter_artifact())?.class_id;
        let address = ProtocolContract::ClassRegisterer.address();
        node.insert_contract(ContractRecord { address, class_id: alien_class });

        let wallet = StubWallet::new(address_from(42), node, SendBehavior::ConfirmAfter(0));
        match resolve_protocol_contract(address, wallet).await {
            Err(Error::ArtifactNotFound(at)) => assert_eq!(at, address),
            other => panic!("Expected ArtifactNotFound, got {other:?}"),
        }

        // Thanks for reading
        Ok(())
    })
}
