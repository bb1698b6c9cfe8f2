//! # Proof Ledger
//!
//! The insertion-ordered mapping from proof id to issued record. One shared
//! handle per process; clones share the same map.
//!
//! All operations are synchronous behind a single `parking_lot::RwLock` and
//! never hold the lock across an `.await`. Id allocation and insertion happen
//! under one write guard, so concurrent attestations cannot draw the same id.
//! Records are never updated or removed.

use std::collections::HashMap;
use std::sync::Arc;

use gv_core::{IdentifierError, ProofId};
use parking_lot::RwLock;
use rand::Rng;

use crate::error::LedgerError;
use crate::record::ProofRecord;

/// Prefix of ledger-registered proof ids.
pub const PROOF_ID_PREFIX: &str = "GV";

/// Random draws before id allocation gives up. The id space holds 2^24 ids.
const MAX_ID_ATTEMPTS: usize = 64;

#[derive(Debug)]
struct Entry {
    seq: u64,
    record: ProofRecord,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<ProofId, Entry>,
    next_seq: u64,
}

impl Inner {
    fn push(&mut self, record: ProofRecord) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records
            .insert(record.proof_id.clone(), Entry { seq, record });
    }
}

/// Thread-safe, cloneable proof store.
#[derive(Debug, Clone, Default)]
pub struct ProofLedger {
    inner: Arc<RwLock<Inner>>,
}

/// Draw a `GV-XXXXXX` id: six uppercase hex digits.
pub fn random_proof_id<R: Rng + ?Sized>(rng: &mut R) -> Result<ProofId, IdentifierError> {
    let n: u32 = rng.gen_range(0..0x0100_0000);
    ProofId::new(format!("{PROOF_ID_PREFIX}-{n:06X}"))
}

impl ProofLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own id. Never overwrites.
    pub fn insert(&self, record: ProofRecord) -> Result<(), LedgerError> {
        let mut guard = self.inner.write();
        if guard.records.contains_key(&record.proof_id) {
            return Err(LedgerError::DuplicateProofId(record.proof_id));
        }
        guard.push(record);
        Ok(())
    }

    /// Allocate a fresh random id and insert the record `build` makes for it.
    pub fn issue(
        &self,
        build: impl FnOnce(ProofId) -> ProofRecord,
    ) -> Result<ProofRecord, LedgerError> {
        self.issue_with(|| random_proof_id(&mut rand::thread_rng()), build)
    }

    /// Like [`issue`](Self::issue) with a caller-supplied id generator.
    ///
    /// The generator is drawn until it yields an unused id, at most
    /// `MAX_ID_ATTEMPTS` times. The check and the insert share one write
    /// guard.
    pub fn issue_with(
        &self,
        mut generate: impl FnMut() -> Result<ProofId, IdentifierError>,
        build: impl FnOnce(ProofId) -> ProofRecord,
    ) -> Result<ProofRecord, LedgerError> {
        let mut guard = self.inner.write();
        let mut allocated = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = generate()?;
            if !guard.records.contains_key(&candidate) {
                allocated = Some(candidate);
                break;
            }
        }
        let id = allocated.ok_or(LedgerError::IdSpaceExhausted(MAX_ID_ATTEMPTS))?;

        let mut record = build(id.clone());
        record.proof_id = id;
        guard.push(record.clone());
        Ok(record)
    }

    pub fn get(&self, id: &ProofId) -> Option<ProofRecord> {
        self.inner.read().records.get(id).map(|e| e.record.clone())
    }

    /// Up to `n` records, newest `generatedAt` first. Equal timestamps fall
    /// back to insertion order, most recent first.
    pub fn list_recent(&self, n: usize) -> Vec<ProofRecord> {
        let guard = self.inner.read();
        let mut entries: Vec<&Entry> = guard.records.values().collect();
        entries.sort_unstable_by(|a, b| {
            b.record
                .generated_at
                .cmp(&a.record.generated_at)
                .then(b.seq.cmp(&a.seq))
        });
        entries
            .into_iter()
            .take(n)
            .map(|e| e.record.clone())
            .collect()
    }

    pub fn contains(&self, id: &ProofId) -> bool {
        self.inner.read().records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
