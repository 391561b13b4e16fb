use std::fmt;

use thiserror::Error;

/// The four kinds of record in a world file, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Header,
    Parcels,
    Forklifts,
    Trucks,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Header    => "header",
            Section::Parcels   => "parcel",
            Section::Forklifts => "forklift",
            Section::Trucks    => "truck",
        })
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Csv {
        line:   u64,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: expected 3, 4 or 5 fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("line {line}: unknown parcel colour `{colour}`")]
    UnknownColour { line: u64, colour: String },

    #[error("line {line}: round budget {rounds} outside {min}..={max}")]
    RoundBudget { line: u64, rounds: u64, min: u64, max: u64 },

    #[error("line {line}: {section} record after {later} records")]
    SectionOrder { line: u64, section: Section, later: Section },

    #[error("missing `<width> <height> <rounds>` header line")]
    MissingHeader,
}

pub type InputResult<T> = Result<T, InputError>;
