//! Background cover decoding.
//!
//! Cover bytes are read through the host's [`CoverSource`] and decoded to
//! RGBA on tokio's blocking pool. Finished work comes back over an unbounded
//! channel and is applied on the owning thread, where the paging surface
//! checks the ticket against the slot table before showing anything.

use pageflow_contracts::media::{CoverSource, MediaFailure};
use pageflow_model::{MediaRef, PageId, SlotId};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::slots::SlotBinding;

/// Identifies the slot binding a decode was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeTicket {
    pub slot: SlotId,
    pub page: PageId,
    pub generation: u64,
}

impl DecodeTicket {
    pub fn new(slot: SlotId, binding: SlotBinding) -> Self {
        Self {
            slot,
            page: binding.page,
            generation: binding.generation,
        }
    }
}

/// Decoded cover pixels, tightly packed RGBA8.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedCover {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<Vec<u8>>,
}

impl fmt::Debug for DecodedCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedCover")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverState {
    /// A decode is in flight for this slot binding.
    Pending(DecodeTicket),
    Ready(DecodedCover),
    /// Decode failed; the host draws its placeholder artwork.
    Placeholder,
}

impl CoverState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CoverState::Ready(_))
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Source(#[from] MediaFailure),

    #[error("cover image could not be decoded")]
    Image(#[from] image::ImageError),
}

#[derive(Debug)]
pub struct DecodeOutcome {
    pub ticket: DecodeTicket,
    pub result: Result<DecodedCover, DecodeError>,
}

/// Read and decode one cover. Blocking.
pub fn decode_cover(
    source: &dyn CoverSource,
    media: &MediaRef,
) -> Result<DecodedCover, DecodeError> {
    let bytes = source.load_cover(media)?;
    let image = image::load_from_memory(&bytes)?.into_rgba8();
    let (width, height) = image.dimensions();
    Ok(DecodedCover {
        width,
        height,
        rgba: Arc::new(image.into_raw()),
    })
}

pub struct CoverDecoder {
    runtime: Handle,
    source: Arc<dyn CoverSource>,
    tx: mpsc::UnboundedSender<DecodeOutcome>,
    rx: mpsc::UnboundedReceiver<DecodeOutcome>,
    in_flight: usize,
}

impl fmt::Debug for CoverDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverDecoder")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl CoverDecoder {
    pub fn new(runtime: Handle, source: Arc<dyn CoverSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            source,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Start decoding `media`'s cover for the binding in `ticket`.
    pub fn dispatch(&mut self, ticket: DecodeTicket, media: MediaRef) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tracing::trace!(page = %ticket.page, slot = %ticket.slot, "cover decode dispatched");

        self.runtime.spawn_blocking(move || {
            let result = decode_cover(source.as_ref(), &media);
            if tx.send(DecodeOutcome { ticket, result }).is_err() {
                tracing::trace!("cover receiver dropped before decode finished");
            }
        });
    }

    /// Decodes dispatched but not yet collected.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Collect one finished decode without blocking.
    pub fn try_next(&mut self) -> Option<DecodeOutcome> {
        let outcome = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }

    /// Wait for the next finished decode. Returns `None` when nothing is in
    /// flight.
    pub async fn next(&mut self) -> Option<DecodeOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.rx.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }
}
