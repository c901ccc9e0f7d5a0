//! The connection registry: every client the server currently knows about.
//!
//! Clients live in a `BTreeMap` keyed by [`ConnectionId`], so every scan
//! (broadcast, matchmaking, the readiness sweep) visits clients in the same
//! ascending order. Clients never hold references to one another; an
//! opponent is just another id to look up here.

use std::collections::BTreeMap;

use skirmish_protocol::Notice;
use skirmish_transport::ConnectionId;

use crate::{Client, SessionError};

/// The authoritative set of connected clients.
#[derive(Debug, Default)]
pub struct Registry {
    clients: BTreeMap<ConnectionId, Client>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly accepted client.
    ///
    /// # Errors
    /// Returns [`SessionError::Duplicate`] if the id is already present; the
    /// existing client is left untouched.
    pub fn insert(&mut self, client: Client) -> Result<(), SessionError> {
        let id = client.id();
        if self.clients.contains_key(&id) {
            return Err(SessionError::Duplicate(id));
        }
        self.clients.insert(id, client);
        tracing::debug!(%id, clients = self.clients.len(), "client registered");
        Ok(())
    }

    /// Removes a client and hands it back. Dropping the returned client
    /// releases its connection.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if no client has this id.
    pub fn remove(&mut self, id: ConnectionId) -> Result<Client, SessionError> {
        let client = self
            .clients
            .remove(&id)
            .ok_or(SessionError::NotFound(id))?;
        tracing::debug!(%id, clients = self.clients.len(), "client unregistered");
        Ok(client)
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.clients.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// All ids, ascending.
    pub fn ids(&self) -> Vec<ConnectionId> {
        self.clients.keys().copied().collect()
    }

    /// Iterates clients in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    /// Borrows two distinct clients mutably at once, in the order asked.
    ///
    /// Returns `None` if `a == b` or either id is missing.
    pub fn pair_mut(
        &mut self,
        a: ConnectionId,
        b: ConnectionId,
    ) -> Option<(&mut Client, &mut Client)> {
        if a == b {
            return None;
        }
        let mut first = None;
        let mut second = None;
        for (id, client) in self.clients.iter_mut() {
            if *id == a {
                first = Some(client);
            } else if *id == b {
                second = Some(client);
            }
        }
        Some((first?, second?))
    }

    /// Sends a notice to every registered client.
    ///
    /// A failed write only marks that one client hung up; delivery to the
    /// rest carries on.
    pub fn broadcast(&mut self, notice: &Notice) {
        for client in self.clients.values_mut() {
            client.send(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use skirmish_transport::Outbox;
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;

    fn client(id: u64) -> (Client, UnboundedReceiver<Vec<u8>>) {
        let (outbox, rx) = Outbox::channel();
        let peer: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        (Client::new(ConnectionId::new(id), peer, outbox, 255), rx)
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = Registry::new();
        let (c, _rx) = client(1);
        registry.insert(c).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ConnectionId::new(1)));
        assert_eq!(
            registry.get(ConnectionId::new(1)).map(Client::id),
            Some(ConnectionId::new(1))
        );
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut registry = Registry::new();
        let (a, _rx_a) = client(1);
        let (b, _rx_b) = client(1);
        registry.insert(a).unwrap();

        let err = registry.insert(b).unwrap_err();
        assert_eq!(err, SessionError::Duplicate(ConnectionId::new(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_unknown_returns_not_found() {
        let mut registry = Registry::new();

        let err = registry.remove(ConnectionId::new(9)).unwrap_err();
        assert_eq!(err, SessionError::NotFound(ConnectionId::new(9)));
    }

    #[test]
    fn test_remove_drops_membership() {
        let mut registry = Registry::new();
        let (c, _rx) = client(3);
        registry.insert(c).unwrap();

        let removed = registry.remove(ConnectionId::new(3)).unwrap();
        assert_eq!(removed.id(), ConnectionId::new(3));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_ascending_regardless_of_insert_order() {
        let mut registry = Registry::new();
        let mut rxs = Vec::new();
        for id in [5, 2, 9] {
            let (c, rx) = client(id);
            registry.insert(c).unwrap();
            rxs.push(rx);
        }

        let ids: Vec<u64> =
            registry.ids().into_iter().map(ConnectionId::into_inner).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_pair_mut_returns_requested_order() {
        let mut registry = Registry::new();
        let (a, _rx_a) = client(1);
        let (b, _rx_b) = client(2);
        registry.insert(a).unwrap();
        registry.insert(b).unwrap();

        let (x, y) = registry
            .pair_mut(ConnectionId::new(2), ConnectionId::new(1))
            .unwrap();
        assert_eq!(x.id(), ConnectionId::new(2));
        assert_eq!(y.id(), ConnectionId::new(1));
    }

    #[test]
    fn test_pair_mut_same_or_missing_is_none() {
        let mut registry = Registry::new();
        let (a, _rx) = client(1);
        registry.insert(a).unwrap();

        assert!(
            registry
                .pair_mut(ConnectionId::new(1), ConnectionId::new(1))
                .is_none()
        );
        assert!(
            registry
                .pair_mut(ConnectionId::new(1), ConnectionId::new(2))
                .is_none()
        );
    }

    #[test]
    fn test_broadcast_skips_past_failed_writer() {
        let mut registry = Registry::new();
        let (a, rx_a) = client(1);
        let (b, mut rx_b) = client(2);
        registry.insert(a).unwrap();
        registry.insert(b).unwrap();
        drop(rx_a);

        registry.broadcast(&Notice::AwaitingOpponent);

        assert!(
            registry
                .get(ConnectionId::new(1))
                .is_some_and(Client::is_hung_up)
        );
        assert_eq!(rx_b.try_recv().unwrap(), b"Awaiting opponent...\n".to_vec());
    }
}
