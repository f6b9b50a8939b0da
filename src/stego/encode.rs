// Copyright (c) 2026 the stegmask authors
// SPDX-License-Identifier: GPL-3.0-only

//! Single-carrier encode pipeline.
//!
//! A short-lived producer thread reads the payload stream to EOF, quarters
//! every byte, and pushes the quarters into a bounded queue; the calling
//! thread walks the carrier's pixels in scan order (outer x, inner y,
//! channels R then G then B), skipping the reserved header region, and pulls
//! one quarter into each eligible channel. The queue bound gives
//! backpressure: the producer blocks when it is 128 quarters ahead, the
//! consumer blocks while the queue is empty. Quarters arrive strictly FIFO,
//! so byte order is preserved end to end.
//!
//! A separate one-slot channel carries a producer-side read error; the
//! consumer surfaces it once the data queue drains. Dropping the consumer's
//! receiver (on any early error) unblocks a producer stuck on a full queue,
//! so the scope join below cannot deadlock.

use std::io::{self, BufReader, Read};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::debug;

use crate::bits::{set_low_bits, split_into_quarters};
use crate::stego::carrier::Carrier;
use crate::stego::error::StegoError;
use crate::stego::header::{self, MAX_SEQ_NUM, MAX_UNIT_COUNT, RESERVED_PIXELS};
use crate::stego::mask::Mask;
use crate::stego::StegoConfig;

/// Capacity of the quarter queue between producer and consumer.
pub const QUEUE_DEPTH: usize = 128;

/// Embed `payload` into `carrier`, returning the modified carrier.
///
/// The carrier is consumed, written pixel by pixel, stamped with the header
/// (`set_id`, `seq_num`, and the number of quarters actually embedded) and
/// returned ready to be PNG-encoded. The mask decides channel eligibility
/// unless `config.use_mask` is false, in which case every non-header channel
/// carries data.
///
/// # Errors
/// - [`StegoError::SequenceOutOfRange`] if `seq_num` exceeds the 6-bit field.
/// - [`StegoError::CarrierTooSmall`] if the carrier cannot hold the header.
/// - [`StegoError::PayloadTooLarge`] if payload quarters remain once every
///   eligible channel has been filled.
/// - [`StegoError::UnitCountOverflow`] if the carrier would absorb more
///   quarters than the 24-bit header field can record.
/// - [`StegoError::PayloadRead`] if the payload stream fails mid-read.
pub fn encode<R: Read + Send>(
    mut carrier: Carrier,
    payload: R,
    seq_num: u16,
    set_id: u64,
    mask: &Mask,
    config: StegoConfig,
) -> Result<Carrier, StegoError> {
    if seq_num > MAX_SEQ_NUM {
        return Err(StegoError::SequenceOutOfRange(seq_num));
    }
    carrier.check_header_room()?;

    if config.use_mask {
        debug!(
            "carrier {}: {} mask-eligible slots ({}x{})",
            seq_num,
            carrier.open_slots(mask),
            carrier.width(),
            carrier.height()
        );
    }

    let (quarter_tx, quarter_rx) = bounded::<u8>(QUEUE_DEPTH);
    let (err_tx, err_rx) = bounded::<io::Error>(1);

    let unit_count = thread::scope(|scope| {
        scope.spawn(move || pump_quarters(payload, quarter_tx, err_tx));
        embed_stream(&mut carrier, quarter_rx, err_rx, mask, config)
    })?;

    debug!("carrier {seq_num}: embedded {unit_count} quarters");
    header::write_header(&mut carrier, set_id, seq_num, unit_count)?;
    Ok(carrier)
}

/// Producer: quarter every payload byte into the queue, FIFO.
///
/// On EOF the sender is dropped, closing the queue. On a read error the
/// error goes into the one-slot side channel and production stops. A failed
/// send means the consumer is gone (it hit an error of its own); just stop.
fn pump_quarters<R: Read>(payload: R, quarter_tx: Sender<u8>, err_tx: Sender<io::Error>) {
    for byte in BufReader::new(payload).bytes() {
        match byte {
            Ok(b) => {
                for quarter in split_into_quarters(b) {
                    if quarter_tx.send(quarter).is_err() {
                        return;
                    }
                }
            }
            Err(e) => {
                let _ = err_tx.send(e);
                return;
            }
        }
    }
}

/// Consumer: walk the pixel grid and drain the quarter queue into eligible
/// channels. Returns the number of quarters embedded.
fn embed_stream(
    carrier: &mut Carrier,
    quarter_rx: Receiver<u8>,
    err_rx: Receiver<io::Error>,
    mask: &Mask,
    config: StegoConfig,
) -> Result<u32, StegoError> {
    let mut unit_count: u32 = 0;
    let mut exhausted = false;

    'scan: for x in 0..carrier.width() {
        for y in 0..carrier.height() {
            if x == 0 && y < RESERVED_PIXELS {
                continue;
            }
            let mut px = carrier.rgb(x, y);
            for channel in px.iter_mut() {
                if config.use_mask && !mask.eligible(*channel) {
                    continue;
                }
                match next_quarter(&quarter_rx, &err_rx)? {
                    Some(quarter) => {
                        if unit_count == MAX_UNIT_COUNT {
                            return Err(StegoError::UnitCountOverflow);
                        }
                        *channel = set_low_bits(*channel, quarter);
                        unit_count += 1;
                    }
                    None => {
                        exhausted = true;
                        carrier.set_rgb(x, y, px);
                        break 'scan;
                    }
                }
            }
            carrier.set_rgb(x, y, px);
        }
    }

    if !exhausted {
        // The scan ran out of eligible channels without seeing the queue
        // close. Block until the producer either delivers one more quarter
        // (payload does not fit) or closes the queue (payload fit exactly).
        if quarter_rx.recv().is_ok() {
            return Err(StegoError::PayloadTooLarge);
        }
        if let Ok(e) = err_rx.try_recv() {
            return Err(StegoError::PayloadRead(e));
        }
    }

    Ok(unit_count)
}

/// Pull the next quarter, blocking until one arrives or the queue closes.
///
/// `Ok(None)` means end of payload. A queue that closed because the producer
/// hit a read error yields that error instead.
fn next_quarter(
    quarter_rx: &Receiver<u8>,
    err_rx: &Receiver<io::Error>,
) -> Result<Option<u8>, StegoError> {
    match quarter_rx.recv() {
        Ok(quarter) => Ok(Some(quarter)),
        Err(_) => match err_rx.try_recv() {
            Ok(e) => Err(StegoError::PayloadRead(e)),
            Err(_) => Ok(None),
        },
    }
}
