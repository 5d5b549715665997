//! Sidecar metadata loading
//!
//! Every case entry carries a `<entry>_case.meta` file and every payload a
//! `<stem>.meta` file, both JSON objects. The loader opens the file, parses it
//! and drops the handle before returning, on the error paths as well.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use zaak_common::{Result, ZaakError};

/// Suffix appended to the entry identifier to form the case metadata filename
pub const CASE_METADATA_SUFFIX: &str = "_case.meta";

/// Extension of every sidecar metadata file
pub const METADATA_EXTENSION: &str = "meta";

/// Filename of the case metadata file for an entry
pub fn case_metadata_filename(entry_id: &str) -> String {
    format!("{entry_id}{CASE_METADATA_SUFFIX}")
}

/// Load `dir/filename` as a JSON object
///
/// Missing or unreadable files yield [`ZaakError::MetadataUnavailable`];
/// anything that is not a JSON object yields [`ZaakError::MetadataMalformed`].
pub fn load_metadata(dir: &Path, filename: &str) -> Result<Map<String, Value>> {
    let path = dir.join(filename);
    let file = File::open(&path).map_err(|e| ZaakError::metadata_unavailable(&path, e))?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            ZaakError::metadata_unavailable(&path, e.into())
        } else {
            ZaakError::metadata_malformed(&path, e.to_string())
        }
    })
}

/// Load `dir/filename` and deserialize it into a typed model
///
/// A missing required field or a field of the wrong type is reported as
/// [`ZaakError::MetadataMalformed`].
pub fn load_typed<T: DeserializeOwned>(dir: &Path, filename: &str) -> Result<T> {
    let mapping = load_metadata(dir, filename)?;
    serde_json::from_value(Value::Object(mapping))
        .map_err(|e| ZaakError::metadata_malformed(dir.join(filename), e.to_string()))
}
