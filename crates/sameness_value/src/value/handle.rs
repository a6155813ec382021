//! Opaque handles: channels and functions.
//!
//! Handles have no inspectable content. The only thing that can be said
//! about two handles is whether they are the same handle, so both types
//! expose an address (`handle`) and nothing else to the comparator.

use std::fmt;
use std::sync::Arc;

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;

use super::Value;
use crate::errors::ChannelError;
use crate::types::{ChanDir, Type};

// Channels

struct ChanInner {
    /// Taken on close; receivers observe disconnection once drained.
    sender: Mutex<Option<Sender<Value>>>,
    receiver: Receiver<Value>,
}

/// Channel handle carrying values of one element type, or nil.
///
/// Views returned by `recv_only` and `send_only` share the underlying
/// channel and therefore its identity.
#[derive(Clone)]
pub struct ChanValue {
    elem: Arc<Type>,
    dir: ChanDir,
    inner: Option<Arc<ChanInner>>,
}

impl ChanValue {
    /// Channel buffering up to `cap` values.
    pub fn bounded(elem: Type, cap: usize) -> Self {
        let (sender, receiver) = channel::bounded(cap);
        Self::from_parts(elem, sender, receiver)
    }

    /// Channel with an unlimited buffer.
    pub fn unbounded(elem: Type) -> Self {
        let (sender, receiver) = channel::unbounded();
        Self::from_parts(elem, sender, receiver)
    }

    /// The nil channel: never yields, cannot be sent to.
    pub fn nil(elem: Type) -> Self {
        ChanValue {
            elem: Arc::new(elem),
            dir: ChanDir::BOTH,
            inner: None,
        }
    }

    fn from_parts(elem: Type, sender: Sender<Value>, receiver: Receiver<Value>) -> Self {
        ChanValue {
            elem: Arc::new(elem),
            dir: ChanDir::BOTH,
            inner: Some(Arc::new(ChanInner {
                sender: Mutex::new(Some(sender)),
                receiver,
            })),
        }
    }

    pub fn elem(&self) -> &Type {
        &self.elem
    }

    pub fn dir(&self) -> ChanDir {
        self.dir
    }

    pub fn is_nil(&self) -> bool {
        self.inner.is_none()
    }

    /// Receive-only view of the same channel.
    pub fn recv_only(&self) -> Self {
        self.with_dir(ChanDir::RECV)
    }

    /// Send-only view of the same channel.
    pub fn send_only(&self) -> Self {
        self.with_dir(ChanDir::SEND)
    }

    fn with_dir(&self, dir: ChanDir) -> Self {
        ChanValue {
            elem: Arc::clone(&self.elem),
            dir,
            inner: self.inner.clone(),
        }
    }

    /// Send a value, blocking while a bounded buffer is full.
    pub fn send(&self, value: Value) -> Result<(), ChannelError> {
        if !self.dir.can_send() {
            return Err(ChannelError::WrongDirection { dir: self.dir });
        }
        let inner = self.inner.as_ref().ok_or(ChannelError::Nil)?;
        let sender = inner.sender.lock().clone().ok_or(ChannelError::Closed)?;
        sender.send(value).map_err(|_| ChannelError::Closed)
    }

    /// Close the channel. Buffered values stay receivable.
    pub fn close(&self) -> Result<(), ChannelError> {
        let inner = self.inner.as_ref().ok_or(ChannelError::Nil)?;
        match inner.sender.lock().take() {
            Some(_) => Ok(()),
            None => Err(ChannelError::Closed),
        }
    }

    /// Non-blocking receive.
    ///
    /// Returns `None` when nothing is buffered right now, when the channel
    /// is closed and drained, for nil channels, and for send-only views.
    pub fn try_recv(&self) -> Option<Value> {
        if !self.dir.can_recv() {
            return None;
        }
        let inner = self.inner.as_ref()?;
        match inner.receiver.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Number of values currently buffered.
    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |i| i.receiver.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identity of the underlying channel; zero for nil.
    pub fn handle(&self) -> usize {
        self.inner.as_ref().map_or(0, |i| Arc::as_ptr(i) as usize)
    }
}

impl fmt::Debug for ChanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChanValue({}, {:#x})",
            Type::chan_of(self.dir, (*self.elem).clone()),
            self.handle()
        )
    }
}

// Functions

/// Callable body of a function value.
pub type FuncBody = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Function handle with its signature, or nil.
#[derive(Clone)]
pub struct FuncValue {
    signature: Arc<str>,
    body: Option<Arc<FuncBody>>,
}

impl FuncValue {
    pub fn new<F>(signature: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        FuncValue {
            signature: Arc::from(signature),
            body: Some(Arc::new(body)),
        }
    }

    pub fn nil(signature: &str) -> Self {
        FuncValue {
            signature: Arc::from(signature),
            body: None,
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn is_nil(&self) -> bool {
        self.body.is_none()
    }

    /// Invoke the function; `None` for nil functions.
    pub fn call(&self, args: &[Value]) -> Option<Value> {
        self.body.as_ref().map(|body| body(args))
    }

    /// Identity of the closure; zero for nil.
    pub fn handle(&self) -> usize {
        self.body
            .as_ref()
            .map_or(0, |b| Arc::as_ptr(b).cast::<()>() as usize)
    }
}

impl fmt::Debug for FuncValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncValue({}, {:#x})", self.signature, self.handle())
    }
}
