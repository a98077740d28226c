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

use pasta_curves::{
    group::ff::{FromUniformBytes, PrimeField},
    pallas,
};

/// Hash `messages` together with a prefix `persona` and return a
/// `pallas::Base` element from the digest. The persona must be at most
/// 16 bytes, as required by BLAKE2b personalization.
pub fn hash_to_base(persona: &[u8], messages: &[&[u8]]) -> pallas::Base {
    let mut hasher = blake2b_simd::Params::new().hash_length(64).personal(persona).to_state();
    for msg in messages {
        hasher.update(msg);
    }
    let ret = hasher.finalize();
    pallas::Base::from_uniform_bytes(ret.as_array())
}

/// Converts from pallas::Base to pallas::Scalar (aka $x \pmod{r_\mathbb{P}}$).
///
/// This requires no modular reduction because Pallas' base field is smaller than its
/// scalar field.
pub fn mod_r_p(x: pallas::Base) -> pallas::Scalar {
    pallas::Scalar::from_repr(x.to_repr()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_to_base_is_deterministic() {
        let a = hash_to_base(b"Caligo_Testing", &[b"hello", b"world"]);
        let b = hash_to_base(b"Caligo_Testing", &[b"hello", b"world"]);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_to_base_separates_personas() {
        let a = hash_to_base(b"Caligo_PersonaA", &[b"hello"]);
        let b = hash_to_base(b"Caligo_PersonaB", &[b"hello"]);
        assert_ne!(a, b);
    }
}
