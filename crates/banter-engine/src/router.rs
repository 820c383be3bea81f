//! Event router
//!
//! Receives inbound client events, validates them against the session
//! registry, mutates it, and fans the resulting notifications out through
//! the delivery channel. Group and private messages are appended to the
//! history store before any live delivery, so a history query issued by
//! another client can never miss a message that client has already seen
//! broadcast.
//!
//! No handler surfaces an error to the transport for an invalid or
//! unknown-state event: those resolve to `RouteOutcome::Ignored` with a
//! reason tag. The one reportable failure is a history append error, which
//! suppresses the broadcast and propagates.

use std::sync::Arc;

use banter_core::{
    ConnectionId, DeliveryChannel, DomainError, HistoryStore, NewGroupMessage, NewPrivateMessage,
    NoticeAction, OutboundEvent, RoomCatalog, RoomId,
};

use crate::registry::SessionRegistry;

/// Inbound events consumed by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Claim a display name for this connection
    Register { display_name: String },
    /// Join a room, implicitly leaving the current one
    Join { room: RoomId },
    /// Leave the current room
    Leave,
    /// Send a message to the current room
    GroupMessage { message: String },
    /// Send a direct message to a named user
    PrivateMessage { to_user: String, message: String },
    /// Typing indicator; direct when `to_user` is given, room-wide otherwise
    Typing { to_user: Option<String> },
    /// End-of-typing indicator; same targeting as `Typing`
    StopTyping { to_user: Option<String> },
    /// Connection closed; the only session-destroying event
    Disconnect,
}

/// Why an event was dropped without effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No registry entry for the connection
    UnknownSession,
    /// The event needs a current room and the session has none
    NotInRoom,
    /// The room is not in the configured catalog
    RoomNotInCatalog,
    /// No connected session matches the target display name
    RecipientNotFound,
}

/// Outcome of handling one inbound event.
///
/// `Ignored` never crosses the transport boundary; it exists so tests and
/// callers can observe why an event had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl RouteOutcome {
    /// Check whether the event took effect
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The presence & message-routing engine
pub struct Router {
    registry: Arc<SessionRegistry>,
    history: Arc<dyn HistoryStore>,
    delivery: Arc<dyn DeliveryChannel>,
    catalog: RoomCatalog,
}

impl Router {
    /// Create a new router
    pub fn new(
        registry: Arc<SessionRegistry>,
        history: Arc<dyn HistoryStore>,
        delivery: Arc<dyn DeliveryChannel>,
        catalog: RoomCatalog,
    ) -> Self {
        Self {
            registry,
            history,
            delivery,
            catalog,
        }
    }

    /// Get the session registry
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Get the history store
    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    /// Handle one inbound event for a connection.
    ///
    /// # Errors
    /// Returns an error only when a history append fails; the message is
    /// then not broadcast.
    pub async fn handle(
        &self,
        connection_id: ConnectionId,
        event: ClientEvent,
    ) -> Result<RouteOutcome, DomainError> {
        let outcome = match event {
            ClientEvent::Register { display_name } => {
                self.handle_register(connection_id, display_name)
            }
            ClientEvent::Join { room } => self.handle_join(connection_id, room).await?,
            ClientEvent::Leave => self.handle_leave(connection_id).await?,
            ClientEvent::GroupMessage { message } => {
                self.handle_group_message(connection_id, message).await?
            }
            ClientEvent::PrivateMessage { to_user, message } => {
                self.handle_private_message(connection_id, to_user, message)
                    .await?
            }
            ClientEvent::Typing { to_user } => {
                self.handle_typing(connection_id, to_user, false).await?
            }
            ClientEvent::StopTyping { to_user } => {
                self.handle_typing(connection_id, to_user, true).await?
            }
            ClientEvent::Disconnect => self.handle_disconnect(connection_id).await?,
        };

        if let RouteOutcome::Ignored(reason) = outcome {
            tracing::debug!(
                connection_id = %connection_id,
                reason = ?reason,
                "Event ignored"
            );
        }

        Ok(outcome)
    }

    fn handle_register(&self, connection_id: ConnectionId, display_name: String) -> RouteOutcome {
        self.registry.register(connection_id, display_name);
        RouteOutcome::Applied
    }

    async fn handle_join(
        &self,
        connection_id: ConnectionId,
        room: RoomId,
    ) -> Result<RouteOutcome, DomainError> {
        if !self.catalog.allows(&room) {
            return Ok(RouteOutcome::Ignored(IgnoreReason::RoomNotInCatalog));
        }

        // One atomic swap covers both the implicit leave and the join, so
        // no occupant scan can catch the session in neither or both rooms.
        let prior = match self.registry.set_room(connection_id, Some(room.clone())) {
            Some(prior) => prior,
            None => return Ok(RouteOutcome::Ignored(IgnoreReason::UnknownSession)),
        };

        // Leave-side notifications go out before join-side ones.
        if let Some(old_room) = prior.current_room {
            self.delivery.leave_room(connection_id, &old_room).await;
            self.notify_departure(&old_room, &prior.display_name, NoticeAction::Left)
                .await;
        }

        self.delivery.join_room(connection_id, &room).await;
        self.delivery
            .broadcast_to_room(
                &room,
                OutboundEvent::SystemNotice {
                    room: room.clone(),
                    user: prior.display_name.clone(),
                    action: NoticeAction::Joined,
                },
            )
            .await;
        self.broadcast_occupants(&room).await;

        tracing::info!(
            connection_id = %connection_id,
            user = %prior.display_name,
            room = %room,
            "Joined room"
        );

        Ok(RouteOutcome::Applied)
    }

    async fn handle_leave(&self, connection_id: ConnectionId) -> Result<RouteOutcome, DomainError> {
        let prior = match self.registry.set_room(connection_id, None) {
            Some(prior) => prior,
            None => return Ok(RouteOutcome::Ignored(IgnoreReason::UnknownSession)),
        };

        let Some(room) = prior.current_room else {
            return Ok(RouteOutcome::Ignored(IgnoreReason::NotInRoom));
        };

        self.delivery.leave_room(connection_id, &room).await;
        self.notify_departure(&room, &prior.display_name, NoticeAction::Left)
            .await;

        tracing::info!(
            connection_id = %connection_id,
            user = %prior.display_name,
            room = %room,
            "Left room"
        );

        Ok(RouteOutcome::Applied)
    }

    async fn handle_group_message(
        &self,
        connection_id: ConnectionId,
        message: String,
    ) -> Result<RouteOutcome, DomainError> {
        let session = match self.registry.lookup(connection_id) {
            Some(session) => session,
            None => return Ok(RouteOutcome::Ignored(IgnoreReason::UnknownSession)),
        };

        let Some(room) = session.current_room else {
            return Ok(RouteOutcome::Ignored(IgnoreReason::NotInRoom));
        };

        // Persist happens-before broadcast; a failed append suppresses
        // delivery entirely.
        let stored = self
            .history
            .append_group(NewGroupMessage::new(
                session.display_name,
                room.clone(),
                message,
            ))
            .await?;

        self.delivery
            .broadcast_to_room(&room, OutboundEvent::RoomMessage(stored))
            .await;

        Ok(RouteOutcome::Applied)
    }

    async fn handle_private_message(
        &self,
        connection_id: ConnectionId,
        to_user: String,
        message: String,
    ) -> Result<RouteOutcome, DomainError> {
        let session = match self.registry.lookup(connection_id) {
            Some(session) => session,
            None => return Ok(RouteOutcome::Ignored(IgnoreReason::UnknownSession)),
        };

        // Persisted whether or not the recipient is currently connected.
        let stored = self
            .history
            .append_private(NewPrivateMessage::new(
                session.display_name,
                to_user.clone(),
                message,
            ))
            .await?;

        let recipient = self.registry.resolve_name(&to_user);
        match recipient {
            Some(target) if target != connection_id => {
                self.delivery
                    .send_to(target, OutboundEvent::PrivateMessage(stored.clone()))
                    .await;
            }
            Some(_) => {} // messaging yourself; the echo below covers it
            None => {
                tracing::debug!(
                    connection_id = %connection_id,
                    to_user = %to_user,
                    "Private message recipient offline; persisted without delivery"
                );
            }
        }

        // The sender has no other confirmation channel.
        self.delivery
            .send_to(connection_id, OutboundEvent::PrivateMessage(stored))
            .await;

        Ok(RouteOutcome::Applied)
    }

    async fn handle_typing(
        &self,
        connection_id: ConnectionId,
        to_user: Option<String>,
        stop: bool,
    ) -> Result<RouteOutcome, DomainError> {
        let session = match self.registry.lookup(connection_id) {
            Some(session) => session,
            None => return Ok(RouteOutcome::Ignored(IgnoreReason::UnknownSession)),
        };

        let event = if stop {
            OutboundEvent::StopTyping {
                from_user: session.display_name.clone(),
            }
        } else {
            OutboundEvent::Typing {
                from_user: session.display_name.clone(),
            }
        };

        match to_user {
            Some(name) => match self.registry.resolve_name(&name) {
                Some(target) => {
                    if target != connection_id {
                        self.delivery.send_to(target, event).await;
                    }
                    Ok(RouteOutcome::Applied)
                }
                None => Ok(RouteOutcome::Ignored(IgnoreReason::RecipientNotFound)),
            },
            None => match session.current_room {
                Some(room) => {
                    // Room mode never reaches the sender itself.
                    self.delivery
                        .broadcast_to_room_except(&room, connection_id, event)
                        .await;
                    Ok(RouteOutcome::Applied)
                }
                None => Ok(RouteOutcome::Ignored(IgnoreReason::NotInRoom)),
            },
        }
    }

    async fn handle_disconnect(
        &self,
        connection_id: ConnectionId,
    ) -> Result<RouteOutcome, DomainError> {
        // Idempotent removal: a second disconnect, or any event racing in
        // after removal, finds no session and is a no-op.
        let Some(prior) = self.registry.remove(connection_id) else {
            return Ok(RouteOutcome::Ignored(IgnoreReason::UnknownSession));
        };

        if let Some(room) = prior.current_room {
            self.delivery.leave_room(connection_id, &room).await;
            self.notify_departure(&room, &prior.display_name, NoticeAction::Disconnected)
                .await;
        }

        tracing::info!(
            connection_id = %connection_id,
            user = %prior.display_name,
            "Session disconnected"
        );

        Ok(RouteOutcome::Applied)
    }

    /// Broadcast a departure notice and the refreshed occupant list to a
    /// room the user just left
    async fn notify_departure(&self, room: &RoomId, user: &str, action: NoticeAction) {
        self.delivery
            .broadcast_to_room(
                room,
                OutboundEvent::SystemNotice {
                    room: room.clone(),
                    user: user.to_string(),
                    action,
                },
            )
            .await;
        self.broadcast_occupants(room).await;
    }

    /// Broadcast the current occupant list of a room to its members
    async fn broadcast_occupants(&self, room: &RoomId) {
        let occupants = self.registry.occupants(room);
        self.delivery
            .broadcast_to_room(
                room,
                OutboundEvent::UpdateUsers {
                    room: room.clone(),
                    occupants,
                },
            )
            .await;
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
