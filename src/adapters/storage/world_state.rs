//! World state shared by the storage adapters.
//!
//! Current values are kept as UTF-8 JSON text so snapshots stay readable.
//! Each key remembers the order in which it was created, which is the
//! order query results are returned in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{Timestamp, TxId};
use crate::ports::{HistoryRecord, QueryRecord, Selector, StorageError, WriteOp, WriteSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    created: u64,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Version {
    tx_id: TxId,
    timestamp: Timestamp,
    /// `None` for a delete.
    value: Option<String>,
}

/// Keys, values and per-key history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    entries: BTreeMap<String, Entry>,
    history: BTreeMap<String, Vec<Version>>,
    next_created: u64,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .get(key)
            .map(|entry| entry.value.clone().into_bytes())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies every change, or none if any value is not UTF-8.
    pub fn apply(&mut self, writes: &WriteSet) -> Result<(), StorageError> {
        let mut staged = Vec::with_capacity(writes.len());
        for (key, op) in writes.iter() {
            let value = match op {
                WriteOp::Put(bytes) => Some(String::from_utf8(bytes.clone()).map_err(|e| {
                    StorageError::InvalidValue {
                        key: key.clone(),
                        reason: e.to_string(),
                    }
                })?),
                WriteOp::Delete => None,
            };
            staged.push((key.clone(), value));
        }

        for (key, value) in staged {
            match &value {
                Some(text) => {
                    let created = match self.entries.get(&key) {
                        Some(existing) => existing.created,
                        None => {
                            self.next_created += 1;
                            self.next_created
                        }
                    };
                    self.entries.insert(
                        key.clone(),
                        Entry {
                            created,
                            value: text.clone(),
                        },
                    );
                }
                None => {
                    self.entries.remove(&key);
                }
            }
            self.history.entry(key).or_default().push(Version {
                tx_id: writes.tx_id.clone(),
                timestamp: writes.timestamp,
                value,
            });
        }
        Ok(())
    }

    /// Current values matching `selector`, in key creation order.
    ///
    /// Values that are not JSON documents never match.
    pub fn query(&self, selector: &Selector) -> Vec<QueryRecord> {
        let mut matches: Vec<(u64, QueryRecord)> = self
            .entries
            .iter()
            .filter(|(_, entry)| {
                serde_json::from_str::<serde_json::Value>(&entry.value)
                    .map(|document| selector.matches(&document))
                    .unwrap_or(false)
            })
            .map(|(key, entry)| {
                (
                    entry.created,
                    QueryRecord {
                        key: key.clone(),
                        value: entry.value.clone().into_bytes(),
                    },
                )
            })
            .collect();
        matches.sort_by_key(|(created, _)| *created);
        matches.into_iter().map(|(_, record)| record).collect()
    }

    /// Every version of `key`, oldest first.
    pub fn history(&self, key: &str) -> Vec<HistoryRecord> {
        self.history
            .get(key)
            .map(|versions| {
                versions
                    .iter()
                    .map(|version| HistoryRecord {
                        tx_id: version.tx_id.clone(),
                        is_delete: version.value.is_none(),
                        value: version.value.clone().map(String::into_bytes),
                        timestamp: version.timestamp,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writes(tx: &str, secs: i64) -> WriteSet {
        WriteSet::new(TxId::new(tx).unwrap(), Timestamp::from_unix(secs, 0))
    }

    #[test]
    fn rejects_whole_write_set_on_non_utf8_value() {
        let mut state = WorldState::new();
        let mut set = writes("tx-1", 1);
        set.put("a", b"{}".to_vec());
        set.put("b", vec![0xff, 0xfe]);

        let err = state.apply(&set).unwrap_err();

        assert!(matches!(err, StorageError::InvalidValue { .. }));
        assert!(state.is_empty());
    }

    #[test]
    fn query_returns_creation_order_not_key_order() {
        let mut state = WorldState::new();
        let mut first = writes("tx-1", 1);
        first.put("z", br#"{"docType":"Activity"}"#.to_vec());
        state.apply(&first).unwrap();
        let mut second = writes("tx-2", 2);
        second.put("a", br#"{"docType":"Activity"}"#.to_vec());
        second.put("m", b"plain text".to_vec());
        state.apply(&second).unwrap();

        let keys: Vec<String> = state
            .query(&Selector::new().eq("docType", "Activity"))
            .into_iter()
            .map(|record| record.key)
            .collect();

        assert_eq!(keys, vec!["z".to_string(), "a".to_string()]);
    }

    #[test]
    fn history_records_every_version_including_delete() {
        let mut state = WorldState::new();
        let mut put = writes("tx-1", 1);
        put.put("k", b"1".to_vec());
        state.apply(&put).unwrap();
        let mut delete = writes("tx-2", 2);
        delete.delete("k");
        state.apply(&delete).unwrap();

        let history = state.history("k");

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].value, Some(b"1".to_vec()));
        assert!(history[1].is_delete);
        assert_eq!(history[1].value, None);
        assert_eq!(history[1].tx_id.as_str(), "tx-2");
        assert!(state.get("k").is_none());
    }
}
