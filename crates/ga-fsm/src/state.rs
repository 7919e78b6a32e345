//! The `State` trait — the main extension point for agent behavior.

use std::any::TypeId;

use ga_message::Telegram;

use crate::Stateful;

/// One behavior an agent of type `E` can be in.
///
/// # Required methods
///
/// Only [`name`][Self::name] is required.  Every hook defaults to doing
/// nothing, and [`on_message`][Self::on_message] defaults to "not handled".
///
/// # Sharing
///
/// Implementations are used through `&'static dyn State<E>` and shared by
/// every agent in that state.  Keep them stateless: read and write the
/// agent passed in, never fields of `self`.
pub trait State<E: Stateful>: Send + Sync + 'static {
    /// Name for logs and debugging.
    fn name(&self) -> &'static str;

    /// Called once when the agent enters this state.
    fn enter(&self, _entity: &mut E, _ctx: &mut E::Context<'_>) {}

    /// Called every update while this is the current (or global) state.
    fn execute(&self, _entity: &mut E, _ctx: &mut E::Context<'_>) {}

    /// Called once when the agent leaves this state.
    fn exit(&self, _entity: &mut E, _ctx: &mut E::Context<'_>) {}

    /// Offered every telegram delivered to the agent.  Return `true` if the
    /// message was consumed.
    fn on_message(
        &self,
        _entity:   &mut E,
        _telegram: &Telegram<E::Message>,
        _ctx:      &mut E::Context<'_>,
    ) -> bool {
        false
    }

    /// Identity of the concrete state type, for `is_in_state` queries.
    #[doc(hidden)]
    fn state_type(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}
