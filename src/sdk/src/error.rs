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

/// Result type used in the SDK
pub type GenericResult<T> = core::result::Result<T, ContractError>;

/// Error type used in the SDK
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContractError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Decoding failed: {0}")]
    DecodingFailed(&'static str),

    #[error("Bytecode of {0} bytes does not fit in {1} packed field elements")]
    BytecodeTooLarge(usize, usize),

    #[error("Custom contract error: {0}")]
    Custom(&'static str),
}

impl From<std::io::Error> for ContractError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
