//! Errors raised by value operations.

use crate::types::ChanDir;

/// Failure to send on or close a channel.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("operation on nil channel")]
    Nil,
    #[error("channel is closed")]
    Closed,
    #[error("channel direction {dir:?} does not permit sending")]
    WrongDirection { dir: ChanDir },
}
