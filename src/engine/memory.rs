//! In-memory reference engine
//!
//! BTreeMap-based ordered store behind a RwLock. Deletes leave tombstones
//! until `compact()`, every value carries a CRC32 that is checked on read,
//! and every slot remembers the sequence that last wrote it so optimistic
//! commits can detect conflicts. Compaction raises a floor below which
//! snapshots conflict on any key it may have erased.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::perf::EngineApi;
use crate::status::EngineStatus;

use super::perf_context::record_internal_delete_skipped;
use super::{BatchOp, EngineLogger, EngineResult, OrderedEngine, Sequence, WriteBatch};

/// Entry stored under a key
#[derive(Debug, Clone, PartialEq)]
enum SlotEntry {
    /// A live value and its checksum
    Value { bytes: Vec<u8>, crc: u32 },

    /// A deleted key
    Tombstone,
}

#[derive(Debug, Clone)]
struct Slot {
    entry: SlotEntry,
    /// Sequence of the batch that last wrote this key
    seq: Sequence,
}

#[derive(Debug, Default)]
struct Inner {
    map: BTreeMap<Vec<u8>, Slot>,
    sequence: Sequence,
    /// Sequence at the last compaction; absent keys may have been written up to here
    compacted_through: Sequence,
}

/// In-memory ordered engine
pub struct MemoryEngine {
    inner: RwLock<Inner>,
    api: EngineApi,
    closed: AtomicBool,
    info_log: Option<Arc<dyn EngineLogger>>,
}

impl MemoryEngine {
    /// Create an empty engine exposing perf counters through `api`
    pub fn new(api: EngineApi) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            api,
            closed: AtomicBool::new(false),
            info_log: None,
        }
    }

    /// Route engine diagnostics to `logger`
    pub fn with_info_log(mut self, logger: Arc<dyn EngineLogger>) -> Self {
        self.info_log = Some(logger);
        self
    }

    pub fn api(&self) -> EngineApi {
        self.api
    }

    /// Reject all further operations with `ShutdownInProgress`
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.log(format_args!("shutting down, last sequence {}", self.latest_sequence()));
        }
    }

    /// Drop tombstones; returns how many were removed
    pub fn compact(&self) -> EngineResult<usize> {
        self.ensure_open()?;

        let removed = {
            let mut inner = self.inner.write();
            let before = inner.map.len();
            inner.map.retain(|_, slot| slot.entry != SlotEntry::Tombstone);
            let removed = before - inner.map.len();
            if removed > 0 {
                inner.compacted_through = inner.sequence;
            }
            removed
        };

        self.log(format_args!("compaction removed {} tombstones", removed));
        Ok(removed)
    }

    /// Number of keys held, tombstones included
    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tombstones held
    pub fn tombstone_count(&self) -> usize {
        self.inner
            .read()
            .map
            .values()
            .filter(|slot| slot.entry == SlotEntry::Tombstone)
            .count()
    }

    /// Damage the stored value of `key` without updating its checksum
    ///
    /// Test hook. Returns false when `key` holds no live value.
    pub fn inject_corruption(&self, key: &[u8]) -> bool {
        let mut inner = self.inner.write();
        match inner.map.get_mut(key) {
            Some(Slot {
                entry: SlotEntry::Value { bytes, .. },
                ..
            }) => {
                match bytes.first_mut() {
                    Some(b) => *b ^= 0xFF,
                    None => bytes.push(0xFF),
                }
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn ensure_open(&self) -> EngineResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(EngineStatus::shutdown_in_progress("engine is closed"));
        }
        Ok(())
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        if let Some(logger) = &self.info_log {
            logger.logv(args);
        }
    }

    fn verify(bytes: &[u8], crc: u32) -> EngineResult<()> {
        if crc32fast::hash(bytes) != crc {
            return Err(EngineStatus::corruption("checksum mismatch"));
        }
        Ok(())
    }

    fn range<'a>(
        map: &'a BTreeMap<Vec<u8>, Slot>,
        lower: Bound<&'a [u8]>,
        upper: Option<&'a [u8]>,
    ) -> impl DoubleEndedIterator<Item = (&'a Vec<u8>, &'a Slot)> + 'a {
        let upper = upper.map_or(Bound::Unbounded, Bound::Excluded);

        // BTreeMap::range panics on inverted bounds
        let inverted = match (lower, upper) {
            (Bound::Included(l), Bound::Excluded(u)) => l > u,
            _ => false,
        };
        let bounds = if inverted {
            (Bound::Included(&[][..]), Bound::Excluded(&[][..]))
        } else {
            (lower, upper)
        };

        map.range::<[u8], _>(bounds)
    }

    fn conflicts(inner: &Inner, batch: &WriteBatch, read_sequence: Sequence) -> Option<Vec<u8>> {
        let newer = |slot: &Slot| slot.seq > read_sequence;
        // Tombstones dropped after the read may have hidden a newer delete
        let compacted_since_read = inner.compacted_through > read_sequence;

        for op in batch.ops() {
            match op {
                BatchOp::Put { key, .. } | BatchOp::Delete { key } => {
                    let changed = match inner.map.get(key) {
                        Some(slot) => newer(slot),
                        None => compacted_since_read,
                    };
                    if changed {
                        return Some(key.clone());
                    }
                }
                BatchOp::DeleteRange { start, end } => {
                    if compacted_since_read {
                        return Some(start.clone());
                    }
                    let found = Self::range(&inner.map, Bound::Included(start.as_slice()), end.as_deref())
                        .find(|(_, slot)| newer(*slot));
                    if let Some((key, _)) = found {
                        return Some(key.clone());
                    }
                }
            }
        }
        None
    }

    /// Apply a batch under the write lock; returns (sequence, keys range-deleted)
    fn apply(inner: &mut Inner, batch: WriteBatch) -> (Sequence, usize) {
        let seq = inner.sequence + 1;
        let mut range_deleted = 0;

        for op in batch.into_ops() {
            match op {
                BatchOp::Put { key, value } => {
                    let crc = crc32fast::hash(&value);
                    let entry = SlotEntry::Value { bytes: value, crc };
                    inner.map.insert(key, Slot { entry, seq });
                }
                BatchOp::Delete { key } => {
                    let entry = SlotEntry::Tombstone;
                    inner.map.insert(key, Slot { entry, seq });
                }
                BatchOp::DeleteRange { start, end } => {
                    if end.as_ref().is_some_and(|end| start >= *end) {
                        continue;
                    }
                    for (_, slot) in inner.map.range_mut::<[u8], _>((
                        Bound::Included(start.as_slice()),
                        end.as_deref().map_or(Bound::Unbounded, Bound::Excluded),
                    )) {
                        if slot.entry != SlotEntry::Tombstone {
                            slot.entry = SlotEntry::Tombstone;
                            slot.seq = seq;
                            range_deleted += 1;
                        }
                    }
                }
            }
        }

        inner.sequence = seq;
        (seq, range_deleted)
    }

    fn finish_write(&self, seq: Sequence, range_deleted: usize) -> Sequence {
        if range_deleted > 0 {
            self.log(format_args!(
                "range delete tombstoned {} keys at sequence {}",
                range_deleted, seq
            ));
        }
        seq
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new(EngineApi::default())
    }
}

impl OrderedEngine for MemoryEngine {
    fn get(&self, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
        self.ensure_open()?;

        let inner = self.inner.read();
        match inner.map.get(key).map(|slot| &slot.entry) {
            Some(SlotEntry::Value { bytes, crc }) => {
                Self::verify(bytes, *crc)?;
                Ok(Some(bytes.clone()))
            }
            Some(SlotEntry::Tombstone) | None => Ok(None),
        }
    }

    fn write(&self, batch: WriteBatch) -> EngineResult<Sequence> {
        self.ensure_open()?;

        let (seq, range_deleted) = {
            let mut inner = self.inner.write();
            Self::apply(&mut inner, batch)
        };
        Ok(self.finish_write(seq, range_deleted))
    }

    fn commit(&self, batch: WriteBatch, read_sequence: Sequence) -> EngineResult<Sequence> {
        self.ensure_open()?;

        let (seq, range_deleted) = {
            let mut inner = self.inner.write();
            if let Some(key) = Self::conflicts(&inner, &batch, read_sequence) {
                return Err(EngineStatus::busy(format!(
                    "write conflict on key {:02x?} (read at sequence {}, now {})",
                    key, read_sequence, inner.sequence
                )));
            }
            Self::apply(&mut inner, batch)
        };
        Ok(self.finish_write(seq, range_deleted))
    }

    fn seek(&self, target: &[u8]) -> EngineResult<Option<Vec<u8>>> {
        self.ensure_open()?;

        let inner = self.inner.read();
        let mut skipped = 0;
        let mut found = None;
        for (key, slot) in Self::range(&inner.map, Bound::Included(target), None) {
            if slot.entry == SlotEntry::Tombstone {
                skipped += 1;
                continue;
            }
            found = Some(key.clone());
            break;
        }

        record_internal_delete_skipped(self.api, skipped);
        Ok(found)
    }

    fn seek_for_prev(&self, upper: Option<&[u8]>) -> EngineResult<Option<Vec<u8>>> {
        self.ensure_open()?;

        let inner = self.inner.read();
        let mut skipped = 0;
        let mut found = None;
        for (key, slot) in Self::range(&inner.map, Bound::Unbounded, upper).rev() {
            if slot.entry == SlotEntry::Tombstone {
                skipped += 1;
                continue;
            }
            found = Some(key.clone());
            break;
        }

        record_internal_delete_skipped(self.api, skipped);
        Ok(found)
    }

    fn scan(&self, lower: &[u8], upper: Option<&[u8]>) -> EngineResult<Vec<(Vec<u8>, Vec<u8>)>> {
        self.ensure_open()?;

        let inner = self.inner.read();
        let mut skipped = 0;
        let mut entries = Vec::new();
        for (key, slot) in Self::range(&inner.map, Bound::Included(lower), upper) {
            match &slot.entry {
                SlotEntry::Value { bytes, crc } => {
                    if let Err(status) = Self::verify(bytes, *crc) {
                        record_internal_delete_skipped(self.api, skipped);
                        return Err(status);
                    }
                    entries.push((key.clone(), bytes.clone()));
                }
                SlotEntry::Tombstone => skipped += 1,
            }
        }

        record_internal_delete_skipped(self.api, skipped);
        Ok(entries)
    }

    fn latest_sequence(&self) -> Sequence {
        self.inner.read().sequence
    }
}
