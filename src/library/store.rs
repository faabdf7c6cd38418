//! CRUD over the persisted proof collection.
//!
//! The whole collection lives under a single storage key as a JSON array.
//! Every operation reads it in full and every mutation writes it back in
//! full; there is no locking, so with two writers the last one wins.

use rand::Rng;

use super::{seed, KeyValueStorage, Proof, ProofDraft, ProofPatch};
use crate::error::Result;

/// Storage key holding the serialized collection.
pub const STORAGE_KEY: &str = "math_proofs_db";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 7;

pub struct ProofStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> ProofStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// All proofs, newest first. A library that was never written is seeded
    /// with the example proofs, which are persisted immediately.
    pub fn list(&mut self) -> Result<Vec<Proof>> {
        match self.storage.get(&self.key)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => {
                let proofs = seed::initial_proofs(now_millis());
                tracing::info!("Seeding empty library with {} proofs", proofs.len());
                self.persist(&proofs)?;
                Ok(proofs)
            }
        }
    }

    pub fn get_by_id(&mut self, id: &str) -> Result<Option<Proof>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// Store a new proof at the front of the collection.
    pub fn add(&mut self, draft: ProofDraft) -> Result<Proof> {
        draft.validate()?;
        let mut proofs = self.list()?;

        let proof = Proof {
            id: generate_id(),
            author: draft.author_or_default(),
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            tags: draft.tags,
            created_at: now_millis(),
        };
        proofs.insert(0, proof.clone());
        self.persist(&proofs)?;

        tracing::info!("Added proof {} ({})", proof.id, proof.title);
        Ok(proof)
    }

    /// Merge `patch` into the proof with `id`. Unknown ids return `None`
    /// without touching storage.
    pub fn update(&mut self, id: &str, patch: ProofPatch) -> Result<Option<Proof>> {
        patch.validate()?;
        let mut proofs = self.list()?;

        let Some(proof) = proofs.iter_mut().find(|p| p.id == id) else {
            tracing::debug!("Update skipped, no proof {id}");
            return Ok(None);
        };
        patch.apply(proof);
        let updated = proof.clone();
        self.persist(&proofs)?;

        tracing::info!("Updated proof {id}");
        Ok(Some(updated))
    }

    /// Remove the proof with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let mut proofs = self.list()?;
        let before = proofs.len();
        proofs.retain(|p| p.id != id);
        if proofs.len() == before {
            return Ok(false);
        }
        self.persist(&proofs)?;

        tracing::info!("Deleted proof {id}");
        Ok(true)
    }

    fn persist(&mut self, proofs: &[Proof]) -> Result<()> {
        let data = serde_json::to_string(proofs)?;
        self.storage.set(&self.key, &data)
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Random base-36 token; collisions are not checked at this scale.
fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}
