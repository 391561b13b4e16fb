//! World file loader.
//!
//! # File format
//!
//! Space-separated records, one per line.  The first record is the header;
//! the remaining records are told apart by their field count and must come
//! in section order (parcels, then forklifts, then trucks).
//!
//! ```text
//! 10 8 500                  <width> <height> <rounds>
//! crate_a 2 3 green         <name> <x> <y> <yellow|green|blue>
//! crate_b 6 1 BLUE
//! lift_1 0 0                <name> <x> <y>
//! van 9 4 1500 12           <name> <x> <y> <capacity> <away_rounds>
//! ```
//!
//! | Fields | Record   | Notes                                        |
//! |--------|----------|----------------------------------------------|
//! | 3      | header   | first record only; rounds in `10..=100000`   |
//! | 4      | parcel   | colour is case-insensitive                   |
//! | 3      | forklift |                                              |
//! | 5      | truck    | capacity in weight units, away time in rounds|
//!
//! Blank lines, repeated spaces and `#` comment lines are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use wh_actor::WeightClass;
use wh_core::Vector;
use wh_sim::{ForkliftSpec, ParcelSpec, TruckSpec, WorldSnapshot};

use crate::{InputError, InputResult, Section};

/// Smallest accepted round budget.
pub const MIN_ROUNDS: u64 = 10;

/// Largest accepted round budget.
pub const MAX_ROUNDS: u64 = 100_000;

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct HeaderRecord {
    width:  u32,
    height: u32,
    rounds: u64,
}

#[derive(Deserialize)]
struct ParcelRecord {
    name:   String,
    x:      u32,
    y:      u32,
    colour: String,
}

#[derive(Deserialize)]
struct ForkliftRecord {
    name: String,
    x:    u32,
    y:    u32,
}

#[derive(Deserialize)]
struct TruckRecord {
    name:     String,
    x:        u32,
    y:        u32,
    capacity: u32,
    away:     u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a world from a file on disk.
pub fn load_world(path: &Path) -> InputResult<WorldSnapshot> {
    let file = File::open(path)?;
    load_world_reader(file)
}

/// Parse a world held in memory.
pub fn parse_world(text: &str) -> InputResult<WorldSnapshot> {
    load_world_reader(text.as_bytes())
}

/// Like [`load_world`] but accepts any `Read` source.
pub fn load_world_reader<R: Read>(reader: R) -> InputResult<WorldSnapshot> {
    let csv_reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);
    let mut records = records(csv_reader);

    // ── Header ────────────────────────────────────────────────────────────
    let (line, header) = records.next().transpose()?.ok_or(InputError::MissingHeader)?;
    if header.len() != 3 {
        return Err(InputError::MissingHeader);
    }
    let HeaderRecord { width, height, rounds } = deserialize(&header, line)?;
    if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&rounds) {
        return Err(InputError::RoundBudget { line, rounds, min: MIN_ROUNDS, max: MAX_ROUNDS });
    }
    let mut world = WorldSnapshot::new(width, height, rounds);

    // ── Entities ──────────────────────────────────────────────────────────
    let mut section = Section::Header;
    for item in records {
        let (line, record) = item?;
        match record.len() {
            4 => {
                enter(&mut section, Section::Parcels, line)?;
                let r: ParcelRecord = deserialize(&record, line)?;
                let class = r.colour.parse::<WeightClass>().map_err(|_| InputError::UnknownColour {
                    line,
                    colour: r.colour.clone(),
                })?;
                world.parcels.push(ParcelSpec { name: r.name, position: position(r.x, r.y, line)?, class });
            }
            3 => {
                enter(&mut section, Section::Forklifts, line)?;
                let r: ForkliftRecord = deserialize(&record, line)?;
                world.forklifts.push(ForkliftSpec { name: r.name, position: position(r.x, r.y, line)? });
            }
            5 => {
                enter(&mut section, Section::Trucks, line)?;
                let r: TruckRecord = deserialize(&record, line)?;
                world.trucks.push(TruckSpec {
                    name:          r.name,
                    position:      position(r.x, r.y, line)?,
                    capacity:      r.capacity,
                    away_duration: r.away,
                });
            }
            found => return Err(InputError::FieldCount { line, found }),
        }
    }

    debug!(
        width,
        height,
        rounds,
        parcels   = world.parcels.len(),
        forklifts = world.forklifts.len(),
        trucks    = world.trucks.len(),
        "world file parsed"
    );
    Ok(world)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Non-empty records with their 1-based line numbers.  Runs of spaces leave
/// empty fields behind; those are dropped here.
fn records<R: Read>(
    reader: csv::Reader<R>,
) -> impl Iterator<Item = InputResult<(u64, StringRecord)>> {
    reader.into_records().filter_map(|result| match result {
        Err(source) => {
            let line = source.position().map_or(0, |p| p.line());
            Some(Err(InputError::Csv { line, source }))
        }
        Ok(raw) => {
            let line = raw.position().map_or(0, |p| p.line());
            let record: StringRecord = raw.iter().filter(|field| !field.is_empty()).collect();
            (!record.is_empty()).then_some(Ok((line, record)))
        }
    })
}

fn deserialize<T: DeserializeOwned>(record: &StringRecord, line: u64) -> InputResult<T> {
    record
        .deserialize(None)
        .map_err(|source| InputError::Csv { line, source })
}

fn enter(current: &mut Section, next: Section, line: u64) -> InputResult<()> {
    if next < *current {
        return Err(InputError::SectionOrder { line, section: next, later: *current });
    }
    *current = next;
    Ok(())
}

fn position(x: u32, y: u32, line: u64) -> InputResult<Vector> {
    match (i32::try_from(x), i32::try_from(y)) {
        (Ok(x), Ok(y)) => Ok(Vector::new(x, y)),
        _ => Err(InputError::Malformed { line, reason: format!("coordinate ({x}, {y}) out of range") }),
    }
}
