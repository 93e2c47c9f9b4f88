//! One writer, N readers: the latest-frame simulation behind the CLI.

use std::thread;
use std::time::{Duration, Instant};

use avring::{CancelSignal, RingConfig, Sink, ValueRing};
use crossbeam::channel;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::DemoError;

/// Parameters of one simulation run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub ring: RingConfig,
    pub readers: usize,
    pub frames: u64,
    pub frame_interval: Duration,
    /// How long readers get to catch up after the last frame is published.
    pub drain: Duration,
}

/// Running count of what one reader observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTally {
    pub received: u64,
    pub skipped: u64,
    pub last_frame: Option<u64>,
}

impl FrameTally {
    /// Record one observed frame number. Gaps in the sequence count as skipped.
    pub fn observe(&mut self, frame: u64) {
        self.received += 1;
        let expected = self.last_frame.map_or(0, |last| last + 1);
        self.skipped += frame.saturating_sub(expected);
        self.last_frame = Some(frame);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReaderReport {
    pub id: usize,
    pub sink: &'static str,
    pub received: u64,
    pub skipped: u64,
    pub last_frame: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub slots: usize,
    pub poll_interval_us: u64,
    pub frames_written: u64,
    pub elapsed_ms: u128,
    pub readers: Vec<ReaderReport>,
}

fn sink_kind(id: usize) -> &'static str {
    if id % 2 == 0 { "channel" } else { "callback" }
}

fn spawn_reader(
    id: usize,
    mut view: ValueRing<u64>,
) -> thread::JoinHandle<Result<FrameTally, DemoError>> {
    thread::spawn(move || {
        let mut tally = FrameTally::default();
        if sink_kind(id) == "channel" {
            let (tx, rx) = channel::bounded(64);
            let counter = thread::spawn(move || {
                let mut tally = FrameTally::default();
                for frame in rx {
                    tally.observe(frame);
                }
                tally
            });
            let summary = view.read_loop(Sink::channel(tx));
            tally = counter.join().map_err(|_| DemoError::ReaderPanicked(id))?;
            let summary = summary?;
            debug!(reader = id, delivered = summary.delivered, "reader finished");
        } else {
            let summary = view.read_loop(Sink::callback(|frame| tally.observe(frame)))?;
            debug!(reader = id, delivered = summary.delivered, "reader finished");
        }
        Ok(tally)
    })
}

/// Run the simulation and collect a per-reader report.
pub fn run(settings: &RunSettings) -> Result<DemoReport, DemoError> {
    if settings.readers == 0 {
        return Err(DemoError::InvalidConfiguration(
            "at least one reader is required".to_string(),
        ));
    }

    let cancel = CancelSignal::new();
    let mut writer = ValueRing::<u64>::from_config(cancel.clone(), &settings.ring)?;
    info!(
        slots = settings.ring.slots,
        readers = settings.readers,
        frames = settings.frames,
        "starting demo"
    );

    let readers: Vec<_> = (0..settings.readers)
        .map(|id| spawn_reader(id, writer.clone()))
        .collect();

    let started = Instant::now();
    let frames = settings.frames;
    let pacing = settings.frame_interval;
    let producer = thread::spawn(move || {
        for frame in 0..frames {
            writer.write(frame);
            writer.step();
            if !pacing.is_zero() {
                thread::sleep(pacing);
            }
        }
    });
    producer.join().map_err(|_| DemoError::WriterPanicked)?;
    debug!(frames, "writer finished");

    thread::sleep(settings.drain);
    cancel.cancel();

    let mut reports = Vec::with_capacity(readers.len());
    for (id, handle) in readers.into_iter().enumerate() {
        let tally = handle.join().map_err(|_| DemoError::ReaderPanicked(id))??;
        reports.push(ReaderReport {
            id,
            sink: sink_kind(id),
            received: tally.received,
            skipped: tally.skipped,
            last_frame: tally.last_frame,
        });
    }

    Ok(DemoReport {
        slots: settings.ring.slots,
        poll_interval_us: settings.ring.poll_interval_us,
        frames_written: settings.frames,
        elapsed_ms: started.elapsed().as_millis(),
        readers: reports,
    })
}
