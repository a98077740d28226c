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

//! Wallet-session boundary. A host wallet exposes one JSON-RPC-shaped
//! request surface to embedded tooling; everything here funnels
//! through it. Chain payloads travel serial-encoded and hex-wrapped,
//! so the session itself stays a dumb pipe.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tinyjson::JsonValue;

use darkfi_serial::{deserialize, serialize, Decodable};

use caligo_sdk::{
    crypto::{ContractAddress, ContractClassId},
    tx::TransactionHash,
};

use crate::{
    error::{Error, Result},
    tx::TransactionRequest,
    wallet::{ContractClassRecord, ContractRecord, NodeQuery, TransactionReceipt, Wallet},
};

/// The single surface a host wallet session exposes. Implementations
/// carry the actual pipe, whatever it is made of.
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// Perform one request against the session and return its reply.
    async fn request(&self, method: &str, params: JsonValue) -> Result<JsonValue>;

    /// The account the user has selected in the host wallet, if any.
    fn selected_account(&self) -> Option<ContractAddress>;
}

/// Token for the session's confirmation side channel. While the scope
/// is open the host wallet surfaces the pending request to the user.
/// It must be released on every exit path; dropping an unfinished
/// scope fires a best-effort release in the background.
pub struct ConfirmationScope {
    transport: Arc<dyn SessionTransport>,
    scope_id: String,
    finished: bool,
}

impl ConfirmationScope {
    /// Open a confirmation scope for the given account.
    pub async fn begin(
        transport: Arc<dyn SessionTransport>,
        account: ContractAddress,
    ) -> Result<Self> {
        let params = JsonValue::Array(vec![JsonValue::String(account.to_string())]);
        let reply = transport.request("session.request_confirmation", params).await?;
        let scope_id = reply_string(&reply, "session.request_confirmation")?;

        debug!(target: "contract::session", "Opened confirmation scope {scope_id}");
        Ok(Self { transport, scope_id, finished: false })
    }

    /// Release the scope.
    pub async fn finish(mut self) -> Result<()> {
        self.finished = true;
        release_scope(&self.transport, &self.scope_id).await
    }
}

impl Drop for ConfirmationScope {
    fn drop(&mut self) {
        if self.finished {
            return
        }

        // The owning future was cancelled before it could finish the
        // scope. Without this the host wallet keeps showing a request
        // nobody is waiting on.
        let transport = self.transport.clone();
        let scope_id = std::mem::take(&mut self.scope_id);
        smol::spawn(async move {
            if let Err(e) = release_scope(&transport, &scope_id).await {
                warn!(
                    target: "contract::session",
                    "Failed releasing confirmation scope {scope_id}: {e}"
                );
            }
        })
        .detach();
    }
}

async fn release_scope(transport: &Arc<dyn SessionTransport>, scope_id: &str) -> Result<()> {
    let params = JsonValue::Array(vec![JsonValue::String(scope_id.to_string())]);
    transport.request("session.release_confirmation", params).await?;
    debug!(target: "contract::session", "Released confirmation scope {scope_id}");
    Ok(())
}

/// A `Wallet` served by a host wallet session. The account is fixed to
/// the one selected at connection time, and all chain access proxies
/// through the transport.
pub struct SessionWallet {
    transport: Arc<dyn SessionTransport>,
    account: ContractAddress,
    node: Arc<SessionNodeQuery>,
}

impl SessionWallet {
    /// Bind to the session's selected account.
    pub fn connect(transport: Arc<dyn SessionTransport>) -> Result<Arc<Self>> {
        let Some(account) = transport.selected_account() else {
            return Err(Error::NoAccountSelected)
        };

        let node = Arc::new(SessionNodeQuery { transport: transport.clone() });
        debug!(target: "contract::session", "Session connected with account {account}");
        Ok(Arc::new(Self { transport, account, node }))
    }
}

#[async_trait]
impl Wallet for SessionWallet {
    fn address(&self) -> ContractAddress {
        self.account
    }

    fn node(&self) -> Arc<dyn NodeQuery> {
        self.node.clone()
    }

    async fn send_transaction(&self, request: &TransactionRequest) -> Result<TransactionHash> {
        let scope = ConfirmationScope::begin(self.transport.clone(), self.account).await?;

        let params = JsonValue::Array(vec![JsonValue::String(hex::encode(serialize(request)))]);
        let sent = self.transport.request("account.send_transaction", params).await;

        match sent.and_then(|reply| parse_tx_hash(&reply, "account.send_transaction")) {
            Ok(tx_hash) => {
                scope.finish().await?;
                Ok(tx_hash)
            }
            Err(e) => {
                if let Err(release_err) = scope.finish().await {
                    warn!(
                        target: "contract::session",
                        "Failed releasing confirmation scope: {release_err}"
                    );
                }
                Err(e)
            }
        }
    }
}

/// `NodeQuery` proxied through the session transport. The host wallet
/// answers from its own node connection.
pub struct SessionNodeQuery {
    transport: Arc<dyn SessionTransport>,
}

#[async_trait]
impl NodeQuery for SessionNodeQuery {
    async fn get_contract_class(
        &self,
        class_id: ContractClassId,
    ) -> Result<Option<ContractClassRecord>> {
        let params = JsonValue::Array(vec![JsonValue::String(class_id.to_string())]);
        let reply = self.transport.request("node.get_contract_class", params).await?;
        decode_payload(&reply, "node.get_contract_class")
    }

    async fn get_contract(&self, address: ContractAddress) -> Result<Option<ContractRecord>> {
        let params = JsonValue::Array(vec![JsonValue::String(address.to_string())]);
        let reply = self.transport.request("node.get_contract", params).await?;
        decode_payload(&reply, "node.get_contract")
    }

    async fn get_tx_receipt(
        &self,
        tx_hash: TransactionHash,
    ) -> Result<Option<TransactionReceipt>> {
        let params = JsonValue::Array(vec![JsonValue::String(tx_hash.as_string())]);
        let reply = self.transport.request("node.get_tx_receipt", params).await?;
        decode_payload(&reply, "node.get_tx_receipt")
    }
}

fn reply_string(reply: &JsonValue, method: &'static str) -> Result<String> {
    let Some(s) = reply.get::<String>() else { return Err(Error::UnexpectedSessionReply(method)) };
    Ok(s.clone())
}

/// Decode a hex-wrapped serial payload out of a session reply. `Null`
/// means the queried state does not exist.
fn decode_payload<D: Decodable>(reply: &JsonValue, method: &'static str) -> Result<Option<D>> {
    if matches!(reply, JsonValue::Null) {
        return Ok(None)
    }

    let encoded = reply_string(reply, method)?;
    let Ok(bytes) = hex::decode(&encoded) else {
        return Err(Error::ParseFailed("Session payload is not valid hex"))
    };

    Ok(Some(deserialize(&bytes)?))
}

fn parse_tx_hash(reply: &JsonValue, method: &'static str) -> Result<TransactionHash> {
    let encoded = reply_string(reply, method)?;
    let Ok(bytes) = hex::decode(&encoded) else {
        return Err(Error::ParseFailed("Transaction hash is not valid hex"))
    };
    let Ok(raw) = <[u8; 32]>::try_from(bytes.as_slice()) else {
        return Err(Error::ParseFailed("Transaction hash has wrong length"))
    };

    Ok(TransactionHash::new(raw))
}
