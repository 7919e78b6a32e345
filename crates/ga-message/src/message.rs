//! Message kinds and their payloads.

use std::fmt;
use std::mem;

use ga_core::{AgentId, Vector2D};

/// A message payload that can travel inside a [`Telegram`][crate::Telegram].
///
/// Implement this for an enum whose variants are the message kinds and
/// whose fields are the per-kind payload.  Receivers `match` on it, so every
/// kind is decoded exhaustively and there is no untyped payload to cast.
pub trait Message: Clone + fmt::Debug + 'static {
    /// Short name of the kind, for logs.
    fn kind_name(&self) -> &'static str;

    /// `true` if both messages are the same kind, ignoring payload.
    ///
    /// Used by the duplicate-telegram relation.
    fn same_kind(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// The message vocabulary shared by the bundled demos.
///
/// Applications with their own vocabulary define their own enum and
/// implement [`Message`] for it; the dispatcher is generic.
#[derive(Debug, Clone, PartialEq)]
pub enum GameMessage {
    // ── Combat ────────────────────────────────────────────────────────────
    /// The receiver was hit by the sender.
    TakeDamage { amount: u32 },
    /// The sender died from the receiver's shot.
    YouGotMe,
    /// The receiver heard the sender fire.
    GunshotSound { origin: Vector2D },
    /// An agent left the world; receivers should forget it.
    AgentRemoved { id: AgentId },
    /// The user took control of, or removed, the receiving bot.
    UserHasRemovedBot,

    // ── Navigation ────────────────────────────────────────────────────────
    PathReady,
    NoPathAvailable,
    OpenSesame,
    ProximityDoorOpened,
    /// The receiver's current goal finished.
    GoalComplete,

    // ── Team play ─────────────────────────────────────────────────────────
    ReceiveBall { target: Vector2D },
    PassToMe { receiver: AgentId },
    SupportAttacker,
    GoHome,
    Wait,
    PlayerReady,
}

impl Message for GameMessage {
    fn kind_name(&self) -> &'static str {
        match self {
            GameMessage::TakeDamage { .. }   => "TakeDamage",
            GameMessage::YouGotMe            => "YouGotMe",
            GameMessage::GunshotSound { .. } => "GunshotSound",
            GameMessage::AgentRemoved { .. } => "AgentRemoved",
            GameMessage::UserHasRemovedBot   => "UserHasRemovedBot",
            GameMessage::PathReady           => "PathReady",
            GameMessage::NoPathAvailable     => "NoPathAvailable",
            GameMessage::OpenSesame          => "OpenSesame",
            GameMessage::ProximityDoorOpened => "ProximityDoorOpened",
            GameMessage::GoalComplete        => "GoalComplete",
            GameMessage::ReceiveBall { .. }  => "ReceiveBall",
            GameMessage::PassToMe { .. }     => "PassToMe",
            GameMessage::SupportAttacker     => "SupportAttacker",
            GameMessage::GoHome              => "GoHome",
            GameMessage::Wait                => "Wait",
            GameMessage::PlayerReady         => "PlayerReady",
        }
    }
}
