//! Keyspace Module
//!
//! Hosts many namespaces on one ordered engine.
//!
//! ## Responsibilities
//! - Build stored keys from namespace-local keys
//! - Route every engine outcome through status translation
//! - Find the highest namespace and enumerate namespaces by prefix skipping
//! - Provide the write-conflict retry boundary with the configured policy

use std::sync::Arc;

use bytes::Bytes;

use crate::config::Config;
use crate::engine::{OrderedEngine, Sequence, WriteBatch};
use crate::error::Result;
use crate::perf::{self, PerfCounters};
use crate::prefix::{encode_key, encode_prefix, extract_prefix, NamespaceId, PrefixRange};
use crate::status::{check, write_conflict_retry};

/// Namespace-partitioned view over an ordered engine
pub struct Keyspace<E: OrderedEngine> {
    /// Keyspace configuration
    config: Config,

    /// The shared ordered store
    engine: Arc<E>,

    /// Perf counter accessor, picked once from `config.engine_api`
    perf: &'static dyn PerfCounters,
}

impl<E: OrderedEngine> Keyspace<E> {
    /// Open a keyspace over `engine`
    pub fn open(engine: Arc<E>, config: Config) -> Result<Self> {
        config.validate()?;

        let perf = perf::select(config.engine_api);
        tracing::debug!(api = ?config.engine_api, "keyspace opened");

        Ok(Self {
            config,
            engine,
            perf,
        })
    }

    /// Handle for the keys of one namespace
    pub fn partition(&self, namespace: NamespaceId) -> Partition<'_, E> {
        Partition {
            keyspace: self,
            range: PrefixRange::of(namespace),
        }
    }

    /// Highest namespace holding at least one key
    ///
    /// Seeks to the last key of the store and walks backwards past keys too
    /// short to carry a prefix.
    pub fn max_namespace(&self) -> Result<Option<NamespaceId>> {
        let mut cursor = check(self.engine.seek_for_prev(None))?;

        while let Some(key) = cursor {
            if let Some((namespace, _)) = extract_prefix(&key) {
                return Ok(Some(namespace));
            }
            tracing::trace!(len = key.len(), "skipping key without namespace prefix");
            cursor = check(self.engine.seek_for_prev(Some(key.as_slice())))?;
        }

        Ok(None)
    }

    /// Every namespace holding at least one key, ascending
    ///
    /// Visits one key per namespace, then seeks straight to the next prefix.
    pub fn namespaces(&self) -> Result<Vec<NamespaceId>> {
        let mut namespaces = Vec::new();
        let mut cursor = check(self.engine.seek(b""))?;

        while let Some(key) = cursor {
            let next_target = match extract_prefix(&key) {
                Some((namespace, _)) => {
                    namespaces.push(namespace);
                    match namespace.next() {
                        Some(next) => encode_prefix(next).as_bytes().to_vec(),
                        None => break,
                    }
                }
                None => {
                    // Smallest key greater than `key`
                    let mut next = key;
                    next.push(0);
                    next
                }
            };
            cursor = check(self.engine.seek(&next_target))?;
        }

        Ok(namespaces)
    }

    /// Sequence to read at before an optimistic [`Keyspace::commit`]
    pub fn snapshot(&self) -> Sequence {
        self.engine.latest_sequence()
    }

    /// Apply `batch` unless one of its keys changed after `snapshot`
    ///
    /// A conflict surfaces as `KeyspanError::WriteConflict`.
    pub fn commit(&self, batch: WriteBatch, snapshot: Sequence) -> Result<Sequence> {
        check(self.engine.commit(batch, snapshot))
    }

    /// Apply `batch` unconditionally
    pub fn write(&self, batch: WriteBatch) -> Result<Sequence> {
        check(self.engine.write(batch))
    }

    /// Run `op`, retrying on write conflicts per the configured policy
    pub fn write_conflict_retry<T, F>(&self, op_name: &str, op: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        write_conflict_retry(&self.config.retry, op_name, op)
    }

    /// Tombstones the engine stepped over, as seen through the selected accessor
    pub fn internal_delete_skipped_count(&self) -> u64 {
        self.perf.internal_delete_skipped_count()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Keys of one namespace
pub struct Partition<'a, E: OrderedEngine> {
    keyspace: &'a Keyspace<E>,
    range: PrefixRange,
}

impl<'a, E: OrderedEngine> Partition<'a, E> {
    pub fn namespace(&self) -> NamespaceId {
        self.range.namespace()
    }

    pub fn range(&self) -> &PrefixRange {
        &self.range
    }

    /// Stored key for a namespace-local key
    pub fn key(&self, local_key: &[u8]) -> Bytes {
        encode_key(self.range.namespace(), local_key)
    }

    pub fn get(&self, local_key: &[u8]) -> Result<Option<Vec<u8>>> {
        check(self.keyspace.engine.get(&self.key(local_key)))
    }

    pub fn put(&self, local_key: &[u8], value: &[u8]) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.put(self.key(local_key).to_vec(), value.to_vec());
        self.keyspace.write(batch).map(|_| ())
    }

    pub fn delete(&self, local_key: &[u8]) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.delete(self.key(local_key).to_vec());
        self.keyspace.write(batch).map(|_| ())
    }

    /// Live entries of this namespace, keys with the prefix stripped
    pub fn scan(&self) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let entries = check(
            self.keyspace
                .engine
                .scan(self.range.lower_bound(), self.range.upper_bound()),
        )?;

        Ok(entries
            .into_iter()
            .filter_map(|(key, value)| {
                extract_prefix(&key).map(|(_, local)| (local.to_vec(), value))
            })
            .collect())
    }

    /// Number of live keys in this namespace
    pub fn count(&self) -> Result<usize> {
        Ok(self.scan()?.len())
    }

    /// Delete every key of this namespace
    pub fn purge(&self) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.delete_range(
            self.range.lower_bound().to_vec(),
            self.range.upper_bound().map(<[u8]>::to_vec),
        );
        self.keyspace.write(batch)?;

        tracing::debug!(namespace = %self.range.namespace(), "namespace purged");
        Ok(())
    }
}
