//! Message identity.
//!
//! A message is addressed by the storage coordinates of the entry holding it
//! (ledger id and entry id), the partition it was written to, and its index
//! inside a batch when the entry packs several messages.
//!
//! The canonical text form is `<ledger>:<entry>:<partition>:<batch>`, which is
//! also what the broker returns in the `X-Pulsar-Message-ID` header.

use crate::error::{PulsarTypesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel for "not partitioned" and "not batched".
pub const NO_INDEX: i32 = -1;

/// Identity of a single message on a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId {
    #[serde(rename = "ledgerId")]
    pub ledger_id: i64,
    #[serde(rename = "entryId")]
    pub entry_id: i64,
    #[serde(rename = "partitionIndex")]
    pub partition_index: i32,
    /// Not part of the JSON body the broker expects for cursor operations.
    #[serde(skip, default = "no_index")]
    pub batch_index: i32,
}

fn no_index() -> i32 {
    NO_INDEX
}

impl MessageId {
    /// Id of a non-partitioned, non-batched message.
    pub fn new(ledger_id: i64, entry_id: i64) -> Self {
        Self {
            ledger_id,
            entry_id,
            partition_index: NO_INDEX,
            batch_index: NO_INDEX,
        }
    }

    /// Position after the last message of a topic.
    pub fn latest() -> Self {
        Self::new(i64::MAX, i64::MAX)
    }

    /// Copy of this id pointing at message `batch_index` of the same entry.
    pub fn with_batch_index(self, batch_index: i32) -> Self {
        Self {
            batch_index,
            ..self
        }
    }

    pub fn is_partitioned(&self) -> bool {
        self.partition_index != NO_INDEX
    }

    pub fn is_batched(&self) -> bool {
        self.batch_index != NO_INDEX
    }

    /// Parse `ledger:entry[:partition[:batch]]`. Missing trailing fields
    /// default to `-1`.
    pub fn parse(s: &str) -> Result<Self> {
        let malformed = |reason: String| PulsarTypesError::MalformedIdentity {
            input: s.to_string(),
            reason,
        };

        let fields: Vec<&str> = s.trim().split(':').collect();
        if fields.len() < 2 || fields.len() > 4 {
            return Err(malformed(format!(
                "expected 2 to 4 ':'-separated fields, got {}",
                fields.len()
            )));
        }

        let ledger_id: i64 = fields[0]
            .parse()
            .map_err(|e| malformed(format!("ledger id '{}': {e}", fields[0])))?;
        let entry_id: i64 = fields[1]
            .parse()
            .map_err(|e| malformed(format!("entry id '{}': {e}", fields[1])))?;
        let partition_index = match fields.get(2) {
            Some(f) => f
                .parse::<i32>()
                .map_err(|e| malformed(format!("partition index '{f}': {e}")))?,
            None => NO_INDEX,
        };
        let batch_index = match fields.get(3) {
            Some(f) => f
                .parse::<i32>()
                .map_err(|e| malformed(format!("batch index '{f}': {e}")))?,
            None => NO_INDEX,
        };

        if ledger_id < 0 || entry_id < 0 {
            return Err(malformed(
                "ledger id and entry id must not be negative".to_string(),
            ));
        }
        if partition_index < NO_INDEX || batch_index < NO_INDEX {
            return Err(malformed(
                "partition and batch index must be -1 or non-negative".to_string(),
            ));
        }

        Ok(Self {
            ledger_id,
            entry_id,
            partition_index,
            batch_index,
        })
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.ledger_id, self.entry_id, self.partition_index, self.batch_index
        )
    }
}

impl FromStr for MessageId {
    type Err = PulsarTypesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
