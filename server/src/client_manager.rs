//! Server-side roster of connected clients.
//!
//! Each entry pairs a client id with the ship it controls and the outbound
//! channel its writer task drains. The registry shares the world's lock, so
//! a client is either fully inside a given tick's broadcast or fully outside
//! it, never half-registered.

use crate::ids::IdAllocator;
use log::info;
use shared::DELIMITER;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// How many consecutive failed sends a client survives before removal.
const MAX_SEND_FAILURES: u32 = 2;

/// One connected, handshake-complete client.
#[derive(Debug)]
pub struct Client {
    /// Unique client identifier assigned during the handshake.
    pub id: i32,
    /// Id of the ship this client steers.
    pub ship_id: i32,
    /// Outbound channel drained by the connection's writer task.
    sender: mpsc::UnboundedSender<String>,
    /// Consecutive sends that could not be delivered.
    failed_sends: u32,
    /// Set once the socket reported closed; removal follows on the sweep.
    disconnected: bool,
}

impl Client {
    pub fn new(id: i32, ship_id: i32, sender: mpsc::UnboundedSender<String>) -> Self {
        Client {
            id,
            ship_id,
            sender,
            failed_sends: 0,
            disconnected: false,
        }
    }

    /// Frames `message` with the protocol delimiter and queues it for
    /// delivery.
    pub fn send_line(&mut self, message: &str) {
        let mut framed = String::with_capacity(message.len() + 1);
        framed.push_str(message);
        framed.push(DELIMITER);
        self.send_raw(framed);
    }

    /// Queues an already-framed payload. Delivery failures are counted; the
    /// registry sweep removes the client once they repeat.
    pub fn send_raw(&mut self, payload: String) {
        if self.sender.send(payload).is_err() {
            self.failed_sends += 1;
        } else {
            self.failed_sends = 0;
        }
    }

    fn is_dead(&self) -> bool {
        self.disconnected || self.failed_sends >= MAX_SEND_FAILURES
    }
}

/// All connected clients plus the id sequences for clients and ships.
pub struct ClientRegistry {
    clients: HashMap<i32, Client>,
    client_ids: IdAllocator,
    ship_ids: IdAllocator,
}

impl ClientRegistry {
    pub fn new() -> Self {
        ClientRegistry {
            clients: HashMap::new(),
            client_ids: IdAllocator::new(),
            ship_ids: IdAllocator::new(),
        }
    }

    /// Reserves a fresh (client id, ship id) pair for a handshake.
    pub fn allocate_ids(&mut self) -> (i32, i32) {
        (self.client_ids.next(), self.ship_ids.next())
    }

    pub fn register(&mut self, client: Client) {
        info!("Client {} registered with ship {}", client.id, client.ship_id);
        self.clients.insert(client.id, client);
    }

    /// Flags a client whose socket closed. Its ship stays in the world until
    /// the next broadcast sweep removes both together.
    pub fn mark_disconnected(&mut self, client_id: i32) {
        if let Some(client) = self.clients.get_mut(&client_id) {
            client.disconnected = true;
        }
    }

    /// Queues one snapshot batch to every registered client.
    pub fn broadcast(&mut self, batch: &str) {
        for client in self.clients.values_mut() {
            client.send_raw(batch.to_string());
        }
    }

    /// Removes every dead client and returns their (client id, ship id)
    /// pairs so the caller can delete the matching ships.
    pub fn sweep_dead(&mut self) -> Vec<(i32, i32)> {
        let dead: Vec<(i32, i32)> = self
            .clients
            .values()
            .filter(|client| client.is_dead())
            .map(|client| (client.id, client.ship_id))
            .collect();

        for (client_id, _) in &dead {
            self.clients.remove(client_id);
            info!("Client {} removed", client_id);
        }

        dead
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        ClientRegistry::new()
    }
}
