//! Per-connection handling
//!
//! Each connection gets a uuid player id, an unbounded outbound queue, and a
//! writer task that drains the queue into the socket. The read loop decodes
//! client messages and dispatches into the core. Errors are delivered to the
//! offending sender only; accepted room guesses broadcast to every occupant.

use crate::core::WORD_LENGTH;
use crate::engine::MAX_GUESSES;
use crate::multiplayer::{MatchState, MatchStatus, Room};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::registry::Handle;
use crate::server::AppState;
use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Serve one WebSocket connection until it closes
pub(crate) async fn handle_connection(stream: TcpStream, state: Arc<AppState>) -> Result<()> {
    let ws_stream = accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Writer task: the only place that touches the socket's send half
    let writer = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            match serde_json::to_string(&message) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!(%e, "failed to serialize server message"),
            }
        }
    });

    let player_id = Uuid::new_v4().to_string();
    debug!(player = %player_id, "client connected");
    let _ = outbound.send(ServerMessage::Connected {
        player_id: player_id.clone(),
    });

    // The room this connection has attached to, if any
    let mut current_room: Option<Handle<Room>> = None;

    while let Some(message) = ws_receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(request) => {
                    dispatch(&state, &outbound, &player_id, &mut current_room, request).await;
                }
                Err(_) => {
                    let _ = outbound.send(ServerMessage::Error {
                        message: "Unrecognized message".to_string(),
                    });
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(player = %player_id, %e, "websocket error");
                break;
            }
        }
    }

    // The opponent's engine is untouched; their match simply stalls.
    // Room teardown is a separate lifecycle policy.
    info!(player = %player_id, "client disconnected");
    writer.abort();
    Ok(())
}

/// Route one decoded client request
async fn dispatch(
    state: &Arc<AppState>,
    outbound: &mpsc::UnboundedSender<ServerMessage>,
    player_id: &str,
    current_room: &mut Option<Handle<Room>>,
    request: ClientMessage,
) {
    match request {
        ClientMessage::CreateGame { mode } => {
            let game_id = state.create_game(mode).await;
            let _ = outbound.send(ServerMessage::GameCreated {
                game_id,
                word_length: WORD_LENGTH,
                max_guesses: MAX_GUESSES,
            });
        }

        ClientMessage::Guess { payload } => {
            if let Some(game_id) = payload.game_id {
                // Single-player: reply to the sender only
                match state.submit_solo_guess(&game_id, &payload.guess).await {
                    Ok(reply) => {
                        let _ = outbound.send(ServerMessage::GameState { payload: reply });
                    }
                    Err(e) => {
                        let _ = outbound.send(ServerMessage::from_error(&e));
                    }
                }
            } else if let Some(room) = current_room {
                submit_room_guess(state, room, outbound, player_id, &payload.guess).await;
            } else {
                let _ = outbound.send(ServerMessage::Error {
                    message: "Join a room before guessing".to_string(),
                });
            }
        }

        ClientMessage::CreateRoom { word } => {
            match state.create_room(word.as_deref()).await {
                Ok((room_id, handle)) => {
                    let attached = handle
                        .lock()
                        .await
                        .attach_first(player_id, outbound.clone());
                    match attached {
                        Ok(()) => {
                            *current_room = Some(handle);
                            let _ = outbound.send(ServerMessage::RoomCreated { room_id });
                            let _ = outbound.send(ServerMessage::Waiting {
                                message: "Waiting for opponent...".to_string(),
                            });
                        }
                        Err(e) => {
                            let _ = outbound.send(ServerMessage::from_error(&e));
                        }
                    }
                }
                Err(e) => {
                    let _ = outbound.send(ServerMessage::from_error(&e));
                }
            }
        }

        ClientMessage::JoinRoom { room_id, word } => {
            let result = join_room(state, outbound, player_id, &room_id, word.as_deref()).await;
            match result {
                Ok(handle) => {
                    info!(room = %room_id, player = %player_id, "match started");
                    *current_room = Some(handle);
                }
                Err(e) => {
                    let _ = outbound.send(ServerMessage::from_error(&e));
                }
            }
        }
    }
}

/// Validate, attach as the second player, and broadcast the opening state
async fn join_room(
    state: &Arc<AppState>,
    outbound: &mpsc::UnboundedSender<ServerMessage>,
    player_id: &str,
    room_id: &str,
    word: Option<&str>,
) -> Result<Handle<Room>, crate::error::GameError> {
    let contribution = state.validate_contribution(word)?;
    let handle = state.find_room(room_id).await?;

    {
        let mut room = handle.lock().await;
        room.attach_second(player_id, outbound.clone(), contribution, state.words())?;

        // Broadcast while the lock is held: both players see the same
        // fully-settled opening state
        let snapshot = MatchState::snapshot(&room);
        room.broadcast(&ServerMessage::GameStart { payload: snapshot });
    }

    Ok(Arc::clone(&handle))
}

/// Score a room guess and fan out the updated state
async fn submit_room_guess(
    state: &Arc<AppState>,
    room: &Handle<Room>,
    outbound: &mpsc::UnboundedSender<ServerMessage>,
    player_id: &str,
    guess: &str,
) {
    let mut room = room.lock().await;
    match room.submit_guess(player_id, guess, state.words()) {
        Ok(_) => {
            let snapshot = MatchState::snapshot(&room);
            if snapshot.status == MatchStatus::Finished {
                info!(room = %room.id(), "match finished");
            }
            room.broadcast(&ServerMessage::GameUpdate { payload: snapshot });
        }
        Err(e) => {
            // Errors go to the sender alone
            let _ = outbound.send(ServerMessage::from_error(&e));
        }
    }
}
