//! TCP transport, session dispatch and the simulation loop.
//!
//! One task per connection reads raw chunks into the framing buffer and
//! dispatches complete messages according to the connection's protocol
//! stage. A separate writer task per connection drains an outbound channel
//! so no socket write ever happens under the world lock. The simulation
//! task owns the tick cadence: advance the world, serialize one snapshot,
//! queue it to every registered client, then sweep dead connections.

use crate::client_manager::{Client, ClientRegistry};
use crate::config::ServerConfig;
use crate::framing::{MessageBuffer, RECEIVE_BUFFER_SIZE};
use crate::game::World;
use log::{debug, info, warn};
use shared::DELIMITER;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Protocol stage of one connection.
///
/// The first complete message is the player's display name; every message
/// after the handshake is a control string for that player's ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolStage {
    AwaitingHandshake,
    AwaitingCommands,
}

/// The world tables and the client registry, guarded by one coarse lock.
/// Dispatch, the tick and the broadcast all acquire this single resource
/// and never nest it with another lock.
pub struct ServerState {
    pub world: World,
    pub clients: ClientRegistry,
}

/// The authoritative game server: accept loop plus simulation loop.
pub struct Server {
    listener: TcpListener,
    state: Arc<Mutex<ServerState>>,
    config: ServerConfig,
}

impl Server {
    /// Binds the listener and builds the initial world from configuration.
    pub async fn bind(config: ServerConfig) -> std::io::Result<Server> {
        let address = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&address).await?;
        info!("Server listening on {}", listener.local_addr()?);

        let state = ServerState {
            world: World::new(&config),
            clients: ClientRegistry::new(),
        };

        Ok(Server {
            listener,
            state: Arc::new(Mutex::new(state)),
            config,
        })
    }

    /// The address the listener actually bound, for callers that asked for
    /// an ephemeral port.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the simulation loop and the accept loop until the process exits.
    pub async fn run(self) {
        let sim_state = Arc::clone(&self.state);
        let frame = Duration::from_millis(self.config.ms_per_frame);
        tokio::spawn(run_simulation(sim_state, frame));

        loop {
            match self.listener.accept().await {
                Ok((socket, addr)) => {
                    info!("New client from {}, initiating handshake", addr);
                    let state = Arc::clone(&self.state);
                    tokio::spawn(handle_connection(socket, state));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                }
            }
        }
    }
}

/// Fixed-cadence tick loop. An overrunning tick is followed immediately by
/// the next one with no catch-up accounting.
async fn run_simulation(state: Arc<Mutex<ServerState>>, frame: Duration) {
    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let mut guard = state.lock().await;
        let ServerState { world, clients } = &mut *guard;

        world.update();

        if let Some(batch) = world.serialize_snapshot() {
            clients.broadcast(&batch);
        }

        // Dead connections surface here; their ships leave the world only
        // after the broadcast completed.
        for (client_id, ship_id) in clients.sweep_dead() {
            warn!("Client {} unresponsive, removing ship {}", client_id, ship_id);
            world.remove_ship(ship_id);
        }

        if world.tick % 600 == 0 {
            debug!(
                "Tick {}: {} ships, {} projectiles, {} stars, {} clients",
                world.tick,
                world.ships.len(),
                world.projectiles.len(),
                world.stars.len(),
                clients.len()
            );
        }
    }
}

/// Reads one connection until it closes, advancing its protocol stage as
/// messages complete. Any receive failure ends the session; the ship is
/// removed on the next simulation pass.
async fn handle_connection(socket: TcpStream, state: Arc<Mutex<ServerState>>) {
    let (mut reader, writer) = socket.into_split();
    let (sender, outbound) = mpsc::unbounded_channel::<String>();
    tokio::spawn(write_loop(writer, outbound));

    let mut buffer = MessageBuffer::new();
    let mut raw = [0u8; RECEIVE_BUFFER_SIZE];
    let mut stage = ProtocolStage::AwaitingHandshake;
    let mut session: Option<(i32, i32)> = None;

    loop {
        let received = match reader.read(&mut raw).await {
            // A zero-length read means the peer closed the connection
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                debug!("Receive failed: {}", e);
                break;
            }
        };

        buffer.push_chunk(&raw[..received]);
        for message in buffer.extract_messages() {
            match stage {
                ProtocolStage::AwaitingHandshake => {
                    let name = message.trim_end_matches(DELIMITER).to_string();

                    let mut guard = state.lock().await;
                    let ServerState { world, clients } = &mut *guard;
                    let (client_id, ship_id) = clients.allocate_ids();
                    world.add_ship(ship_id, name);

                    // Startup info goes out before the client can appear in
                    // any broadcast: its id, then the world size.
                    let mut client = Client::new(client_id, ship_id, sender.clone());
                    client.send_line(&client_id.to_string());
                    client.send_line(&world.world_size().to_string());
                    clients.register(client);

                    session = Some((client_id, ship_id));
                    stage = ProtocolStage::AwaitingCommands;
                    info!("Finished handshake with client {}", client_id);
                }
                ProtocolStage::AwaitingCommands => {
                    if let Some((_, ship_id)) = session {
                        state.lock().await.world.set_command(ship_id, message);
                    }
                }
            }
        }
    }

    if let Some((client_id, _)) = session {
        info!("Client {} disconnected", client_id);
        state.lock().await.clients.mark_disconnected(client_id);
    }
}

/// Drains one connection's outbound queue onto its socket. A failed write
/// shuts the socket down; the registry notices through the closed channel.
async fn write_loop(mut writer: OwnedWriteHalf, mut outbound: mpsc::UnboundedReceiver<String>) {
    while let Some(payload) = outbound.recv().await {
        if let Err(e) = writer.write_all(payload.as_bytes()).await {
            debug!("Send failed, shutting connection down: {}", e);
            let _ = writer.shutdown().await;
            return;
        }
    }
}
