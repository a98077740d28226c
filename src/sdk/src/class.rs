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
    artifact::ContractArtifact,
    crypto::{util::hash_to_base, ContractClassId},
    error::{ContractError, GenericResult},
};

/// Domain separator for class ID derivation
pub const CLASS_ID_PERSONA: &[u8] = b"Caligo_ClassId";

/// Domain separator for the bytecode commitment
pub const BYTECODE_PERSONA: &[u8] = b"Caligo_Bytecode";

/// Number of bytecode bytes carried per packed field element
pub const BYTECODE_BYTES_PER_FIELD: usize = 31;

/// Upper bound on packed bytecode length, in field elements, counting
/// the length prefix. Registration payloads above this are rejected
/// before anything is broadcast.
pub const MAX_PACKED_BYTECODE_FIELDS: usize = 3000;

/// Pack raw bytecode into base field elements for broadcast. Each
/// element carries 31 little-endian bytes, keeping the value below the
/// field modulus. The first element holds the unpadded byte length so
/// unpacking recovers the exact bytecode.
pub fn pack_bytecode(bytecode: &[u8]) -> GenericResult<Vec<pallas::Base>> {
    let n_fields = 1 + bytecode.len().div_ceil(BYTECODE_BYTES_PER_FIELD);
    if n_fields > MAX_PACKED_BYTECODE_FIELDS {
        return Err(ContractError::BytecodeTooLarge(bytecode.len(), MAX_PACKED_BYTECODE_FIELDS))
    }

    let mut fields = Vec::with_capacity(n_fields);
    fields.push(pallas::Base::from(bytecode.len() as u64));

    for chunk in bytecode.chunks(BYTECODE_BYTES_PER_FIELD) {
        let mut repr = [0_u8; 32];
        repr[..chunk.len()].copy_from_slice(chunk);
        match pallas::Base::from_repr(repr).into() {
            Some(v) => fields.push(v),
            None => {
                return Err(ContractError::DecodingFailed("Packed bytecode chunk is noncanonical"))
            }
        }
    }

    Ok(fields)
}

/// Recover raw bytecode from its packed field representation.
pub fn unpack_bytecode(fields: &[pallas::Base]) -> GenericResult<Vec<u8>> {
    let Some((len_field, chunks)) = fields.split_first() else {
        return Err(ContractError::DecodingFailed("Packed bytecode is missing its length prefix"))
    };

    let len_repr = len_field.to_repr();
    if len_repr[8..].iter().any(|b| *b != 0) {
        return Err(ContractError::DecodingFailed("Packed bytecode length is out of range"))
    }
    let len = u64::from_le_bytes(len_repr[..8].try_into().unwrap()) as usize;

    if chunks.len() != len.div_ceil(BYTECODE_BYTES_PER_FIELD) {
        return Err(ContractError::DecodingFailed("Packed bytecode length does not match field count"))
    }

    let mut bytecode = Vec::with_capacity(chunks.len() * BYTECODE_BYTES_PER_FIELD);
    for chunk in chunks {
        let repr = chunk.to_repr();
        if repr[31] != 0 {
            return Err(ContractError::DecodingFailed("Packed bytecode chunk is overfull"))
        }
        bytecode.extend_from_slice(&repr[..BYTECODE_BYTES_PER_FIELD]);
    }
    bytecode.truncate(len);

    Ok(bytecode)
}

/// Commit to raw bytecode as a single base field element.
pub fn bytecode_commitment(bytecode: &[u8]) -> pallas::Base {
    hash_to_base(BYTECODE_PERSONA, &[bytecode])
}

/// Derive the class ID from the interface and bytecode commitments.
pub fn compute_contract_class_id(
    artifact_hash: pallas::Base,
    bytecode_commitment: pallas::Base,
) -> ContractClassId {
    ContractClassId::new(hash_to_base(
        CLASS_ID_PERSONA,
        &[&artifact_hash.to_repr(), &bytecode_commitment.to_repr()],
    ))
}

/// A contract class ready for registration: the interface and bytecode
/// commitments, the packed payload that gets broadcast, and the class
/// ID derived from the commitments.
#[derive(Clone, Debug, PartialEq, Eq, SerialEncodable, SerialDecodable)]
pub struct ContractClass {
    /// Commitment to the artifact interface
    pub artifact_hash: pallas::Base,
    /// Commitment to the raw bytecode
    pub bytecode_commitment: pallas::Base,
    /// Bytecode packed into field elements for broadcast
    pub packed_bytecode: Vec<pallas::Base>,
    /// Class ID derived from the two commitments
    pub class_id: ContractClassId,
}

impl ContractClass {
    /// Build the full class from a compiled artifact.
    pub fn from_artifact(artifact: &ContractArtifact) -> GenericResult<Self> {
        let artifact_hash = artifact.hash()?;
        let commitment = bytecode_commitment(&artifact.bytecode);
        let packed_bytecode = pack_bytecode(&artifact.bytecode)?;
        let class_id = compute_contract_class_id(artifact_hash, commitment);

        Ok(Self { artifact_hash, bytecode_commitment: commitment, packed_bytecode, class_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytecode_packing_roundtrips() -> GenericResult<()> {
        for len in [0_usize, 1, 30, 31, 32, 62, 100] {
            let bytecode: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let fields = pack_bytecode(&bytecode)?;
            assert_eq!(fields.len(), 1 + len.div_ceil(BYTECODE_BYTES_PER_FIELD));
            assert_eq!(fields[0], pallas::Base::from(len as u64));
            assert_eq!(unpack_bytecode(&fields)?, bytecode);
        }
        Ok(())
    }

    #[test]
    fn bytecode_packing_enforces_limit() -> GenericResult<()> {
        let largest = vec![0xaa_u8; (MAX_PACKED_BYTECODE_FIELDS - 1) * BYTECODE_BYTES_PER_FIELD];
        assert_eq!(pack_bytecode(&largest)?.len(), MAX_PACKED_BYTECODE_FIELDS);

        let oversized = vec![0xaa_u8; (MAX_PACKED_BYTECODE_FIELDS - 1) * BYTECODE_BYTES_PER_FIELD + 1];
        assert!(matches!(pack_bytecode(&oversized), Err(ContractError::BytecodeTooLarge(_, _))));

        Ok(())
    }

    #[test]
    fn unpacking_validates_length_prefix() -> GenericResult<()> {
        let mut fields = pack_bytecode(&[1, 2, 3])?;
        fields[0] = pallas::Base::from(90_u64);
        assert!(unpack_bytecode(&fields).is_err());
        assert!(unpack_bytecode(&[]).is_err());
        Ok(())
    }

    #[test]
    fn class_id_binds_interface_and_bytecode() {
        let a = compute_contract_class_id(pallas::Base::from(1_u64), pallas::Base::from(2_u64));
        let b = compute_contract_class_id(pallas::Base::from(1_u64), pallas::Base::from(3_u64));
        let c = compute_contract_class_id(pallas::Base::from(2_u64), pallas::Base::from(2_u64));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
