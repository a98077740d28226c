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

// Hello developer. Please add your error to the according subsection
// that is commented, or make a new subsection. Keep it clean.

use caligo_sdk::{
    crypto::{ContractAddress, ContractClassId},
    tx::TransactionHash,
};

/// Main result type used throughout the codebase.
pub type Result<T> = std::result::Result<T, Error>;

/// General library errors used throughout the codebase.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    // ===============
    // Artifact errors
    // ===============
    #[error("Contract artifact \"{0}\" carries no bytecode")]
    EmptyBytecode(String),

    #[error("Artifact exports no initializer named \"{0}\"")]
    InitializerNotFound(String),

    #[error("Function \"{0}\" cannot initialize an instance")]
    NotAnInitializer(String),

    #[error("Function \"{function}\" takes {expected} arguments but {given} were given")]
    WrongArgumentCount { function: String, expected: usize, given: usize },

    #[error("Initializer arguments given but the contract takes no initializer")]
    UnexpectedInitializerArgs,

    #[error("Artifact exports no function named \"{0}\"")]
    FunctionNotFound(String),

    // ======================
    // Deployment plan errors
    // ======================
    #[error("Deployment is bound to deployer {expected} but the sending account is {actual}")]
    DeployerMismatch { expected: ContractAddress, actual: ContractAddress },

    #[error("Computed class {computed} does not match the descriptor class {registered}")]
    ContractClassMismatch { computed: ContractClassId, registered: ContractClassId },

    #[error("Deployment request contains no calls to broadcast")]
    NothingToDeploy,

    // ================
    // Resolver errors
    // ================
    #[error("No contract is registered at address {0}")]
    ContractNotRegistered(ContractAddress),

    #[error("No known artifact matches the class of the contract at {0}")]
    ArtifactNotFound(ContractAddress),

    // =======================
    // Transaction wait errors
    // =======================
    #[error("Transaction {0} was rejected: {1}")]
    TransactionRejected(TransactionHash, String),

    #[error("Gave up waiting for transaction {0}")]
    WaitTimeout(TransactionHash),

    // ===============
    // Session errors
    // ===============
    #[error("Session request \"{0}\" failed: {1}")]
    SessionRequestFailed(String, String),

    #[error("Unexpected session reply for \"{0}\"")]
    UnexpectedSessionReply(&'static str),

    #[error("No account is selected in the connected wallet")]
    NoAccountSelected,

    // ====================
    // Miscellaneous errors
    // ====================
    #[error("Parse failed: {0}")]
    ParseFailed(&'static str),

    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),

    #[error("Contract SDK error: {0}")]
    ContractError(#[from] caligo_sdk::ContractError),

    #[error("Custom error: {0}")]
    Custom(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.kind())
    }
}
