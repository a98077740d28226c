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

use darkfi_serial::{SerialDecodable, SerialEncodable};
use pasta_curves::{group::ff::PrimeField, pallas};

use crate::{
    artifact::FunctionArtifact,
    crypto::{util::hash_to_base, ContractAddress, ContractClassId, PublicKeys},
};

/// Domain separator for the initialization hash
pub const INIT_HASH_PERSONA: &[u8] = b"Caligo_InitHash";

/// Domain separator for the instance partial commitment
pub const CONTRACT_PERSONA: &[u8] = b"Caligo_Contract";

/// Domain separator for the final address derivation
pub const ADDRESS_PERSONA: &[u8] = b"Caligo_Address";

/// Commit to the initializer invocation, meaning which function runs
/// at deployment and with which arguments. Instances deployed without
/// an initializer commit to zero.
pub fn compute_initialization_hash(
    initializer: Option<&FunctionArtifact>,
    args: &[pallas::Base],
) -> pallas::Base {
    let Some(func) = initializer else { return pallas::Base::from(0) };

    let mut messages = vec![func.selector().to_bytes()];
    messages.extend(args.iter().map(|arg| arg.to_repr()));
    let refs: Vec<&[u8]> = messages.iter().map(|m| m.as_slice()).collect();

    hash_to_base(INIT_HASH_PERSONA, &refs)
}

/// Derive the deterministic address of a contract instance. A `None`
/// deployer commits to zero, leaving the deployment replayable by any
/// account.
pub fn compute_contract_address(
    class_id: ContractClassId,
    salt: pallas::Base,
    initialization_hash: pallas::Base,
    deployer: Option<ContractAddress>,
    public_keys: &PublicKeys,
) -> ContractAddress {
    let deployer_field = deployer.map(|d| d.inner()).unwrap_or(pallas::Base::from(0));

    let partial = hash_to_base(
        CONTRACT_PERSONA,
        &[
            &class_id.to_bytes(),
            &salt.to_repr(),
            &initialization_hash.to_repr(),
            &deployer_field.to_repr(),
        ],
    );

    ContractAddress::new(hash_to_base(
        ADDRESS_PERSONA,
        &[&public_keys.hash().to_repr(), &partial.to_repr()],
    ))
}

/// A fully derived contract instance: everything the address commits
/// to, fixed at deployment time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct ContractInstance {
    /// Deterministic instance address
    pub address: ContractAddress,
    /// Class this instance runs
    pub class_id: ContractClassId,
    /// Deployment salt
    pub salt: pallas::Base,
    /// Commitment to the initializer invocation
    pub initialization_hash: pallas::Base,
    /// Account bound as deployer, or `None` for a universal deployment
    pub deployer: Option<ContractAddress>,
    /// Public keys attached to the instance
    pub public_keys: PublicKeys,
}

impl ContractInstance {
    /// Derive the instance and its address from the deployment preimage.
    pub fn derive(
        class_id: ContractClassId,
        salt: pallas::Base,
        initializer: Option<&FunctionArtifact>,
        args: &[pallas::Base],
        deployer: Option<ContractAddress>,
        public_keys: PublicKeys,
    ) -> Self {
        let initialization_hash = compute_initialization_hash(initializer, args);
        let address =
            compute_contract_address(class_id, salt, initialization_hash, deployer, &public_keys);

        Self { address, class_id, salt, initialization_hash, deployer, public_keys }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::FunctionArtifact;

    fn initializer() -> FunctionArtifact {
        FunctionArtifact { name: "constructor".to_string(), arity: 2, is_initializer: true }
    }

    fn preimage() -> (ContractClassId, pallas::Base, Vec<pallas::Base>) {
        let class_id = ContractClassId::from(pallas::Base::from(7));
        let salt = pallas::Base::from(99);
        let args = vec![pallas::Base::from(1), pallas::Base::from(2)];
        (class_id, salt, args)
    }

    #[test]
    fn address_derivation_is_deterministic() {
        let (class_id, salt, args) = preimage();
        let init = initializer();
        let keys = PublicKeys::identity();
        let deployer = Some(ContractAddress::from(pallas::Base::from(5)));

        let a = ContractInstance::derive(class_id, salt, Some(&init), &args, deployer, keys);
        let b = ContractInstance::derive(class_id, salt, Some(&init), &args, deployer, keys);
        assert_eq!(a.address, b.address);
        assert_eq!(a, b);
    }

    #[test]
    fn address_commits_to_every_preimage_part() {
        let (class_id, salt, args) = preimage();
        let init = initializer();
        let keys = PublicKeys::identity();
        let deployer = Some(ContractAddress::from(pallas::Base::from(5)));

        let base = ContractInstance::derive(class_id, salt, Some(&init), &args, deployer, keys);

        let other_class = ContractClassId::from(pallas::Base::from(8));
        let moved =
            ContractInstance::derive(other_class, salt, Some(&init), &args, deployer, keys);
        assert_ne!(base.address, moved.address);

        let moved = ContractInstance::derive(
            class_id,
            pallas::Base::from(100),
            Some(&init),
            &args,
            deployer,
            keys,
        );
        assert_ne!(base.address, moved.address);

        let other_args = vec![pallas::Base::from(1), pallas::Base::from(3)];
        let moved =
            ContractInstance::derive(class_id, salt, Some(&init), &other_args, deployer, keys);
        assert_ne!(base.address, moved.address);

        let moved = ContractInstance::derive(class_id, salt, Some(&init), &args, None, keys);
        assert_ne!(base.address, moved.address);
    }

    #[test]
    fn missing_initializer_commits_to_zero() {
        assert_eq!(compute_initialization_hash(None, &[]), pallas::Base::from(0));
        let init = initializer();
        assert_ne!(compute_initialization_hash(Some(&init), &[]), pallas::Base::from(0));
    }
}
