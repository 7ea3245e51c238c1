//! Collaborator boundaries: host data bridge, geocoding, day data and
//! interaction logging. Failures stop here and surface as "no result".

pub mod bridge;
pub mod daylength;
pub mod log_sink;
pub mod search;
pub mod sequencer;

pub use bridge::{publish_records, Acknowledgement, DataBridge, JsonFileBridge, RecordSet};
pub use daylength::{derive_day_length, DayDataFetcher, DayLengthRecord, SolarTimes, SunEvents};
pub use log_sink::{InteractionLog, InteractionParams, InteractionRecord, LogFacadeSink, MemorySink};
pub use search::{Geocoder, Location, LocationSearch, SearchOutcome};
pub use sequencer::{RequestId, RequestSequencer};
