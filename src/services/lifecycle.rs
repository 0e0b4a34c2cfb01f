use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::{InternalError, LifecycleError};
use crate::types::internal::SessionUser;

/// Minimum length of a trimmed unarchive justification note
pub const UNARCHIVE_NOTE_MIN_CHARS: usize = 10;

/// Per-record-type lifecycle capabilities
///
/// Record types diverge: finance transactions archive and unarchive but are
/// never hard-deleted, installment orders hard-delete but never archive.
/// One generic manager consumes this policy instead of each record type
/// duplicating its own variant of the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecyclePolicy {
    pub supports_archive: bool,
    pub supports_hard_delete: bool,
    pub editable_while_archived: bool,
}

impl LifecyclePolicy {
    /// Archive/unarchive only; edits keep working on archived records
    pub const fn archive_only() -> Self {
        Self {
            supports_archive: true,
            supports_hard_delete: false,
            editable_while_archived: true,
        }
    }

    /// Hard delete only; no archive state at all
    pub const fn hard_delete_only() -> Self {
        Self {
            supports_archive: false,
            supports_hard_delete: true,
            editable_while_archived: false,
        }
    }
}

/// Who did it, and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditStamp {
    pub at: i64,
    pub by: i32,
}

impl AuditStamp {
    pub fn now(actor_id: i32) -> Self {
        Self {
            at: Utc::now().timestamp(),
            by: actor_id,
        }
    }
}

/// Storage seam for one archivable record type
///
/// The per-type store owns the table and the payload shape; the manager owns
/// the transition rules and audit stamping. Implementations apply stamps
/// exactly as given and never make policy decisions of their own.
#[async_trait]
pub trait ArchivableStore: Send + Sync {
    type Record: Send + Sync;
    type Payload: Send + Sync;

    async fn fetch(&self, id: i32) -> Result<Option<Self::Record>, InternalError>;

    /// Insert a new active record with created/updated stamps from `stamp`
    async fn insert(
        &self,
        payload: Self::Payload,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError>;

    /// Overwrite the payload and re-stamp updated_at/updated_by
    async fn apply_update(
        &self,
        record: Self::Record,
        payload: Self::Payload,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError>;

    /// Set the archive triple from `stamp`
    async fn apply_archive(
        &self,
        record: Self::Record,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError>;

    /// Clear the archive triple, replace the notes field and re-stamp
    async fn apply_unarchive(
        &self,
        record: Self::Record,
        notes: String,
        stamp: AuditStamp,
    ) -> Result<Self::Record, InternalError>;

    /// Physically remove the record
    async fn remove(&self, record: Self::Record) -> Result<(), InternalError>;

    fn is_archived(record: &Self::Record) -> bool;

    fn notes(record: &Self::Record) -> Option<&str>;
}

/// Generic record lifecycle state machine
///
/// ```text
///         create
///  [none] ------> [active]
///                   | archive         unarchive(note)
///                   v        <----------------------+
///                [archived] ----------+
///                   | hard_delete (where permitted)
///                   v
///                [gone]  (also reachable directly from active, where permitted)
/// ```
///
/// Does not authorize: callers must already have checked the permission
/// matrix / finance attribute before invoking any mutation.
pub struct LifecycleManager<S: ArchivableStore> {
    store: S,
    policy: LifecyclePolicy,
}

impl<S: ArchivableStore> LifecycleManager<S> {
    pub fn new(store: S, policy: LifecyclePolicy) -> Self {
        Self { store, policy }
    }

    /// Direct access for listing queries the manager does not mediate
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> LifecyclePolicy {
        self.policy
    }

    pub async fn create(
        &self,
        payload: S::Payload,
        actor: &SessionUser,
    ) -> Result<S::Record, InternalError> {
        self.store.insert(payload, AuditStamp::now(actor.id)).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: S::Payload,
        actor: &SessionUser,
    ) -> Result<S::Record, InternalError> {
        let record = self.fetch_existing(id).await?;
        if S::is_archived(&record) && !self.policy.editable_while_archived {
            return Err(LifecycleError::ArchivedRecordImmutable(id).into());
        }
        self.store
            .apply_update(record, payload, AuditStamp::now(actor.id))
            .await
    }

    /// Soft delete. Archiving an already-archived record is an error, not a
    /// no-op.
    pub async fn archive(&self, id: i32, actor: &SessionUser) -> Result<S::Record, InternalError> {
        if !self.policy.supports_archive {
            return Err(LifecycleError::ArchiveUnsupported.into());
        }
        let record = self.fetch_existing(id).await?;
        if S::is_archived(&record) {
            return Err(LifecycleError::AlreadyArchived(id).into());
        }
        self.store
            .apply_archive(record, AuditStamp::now(actor.id))
            .await
    }

    /// Restore an archived record. The justification note is mandatory and
    /// appended permanently to the record's notes; later edits never remove
    /// it.
    pub async fn unarchive(
        &self,
        id: i32,
        actor: &SessionUser,
        note: &str,
    ) -> Result<S::Record, InternalError> {
        if !self.policy.supports_archive {
            return Err(LifecycleError::ArchiveUnsupported.into());
        }
        let trimmed = note.trim();
        if trimmed.chars().count() < UNARCHIVE_NOTE_MIN_CHARS {
            return Err(LifecycleError::NoteTooShort {
                minimum: UNARCHIVE_NOTE_MIN_CHARS,
            }
            .into());
        }
        let record = self.fetch_existing(id).await?;
        if !S::is_archived(&record) {
            return Err(LifecycleError::NotArchived(id).into());
        }
        let notes = append_unarchive_note(S::notes(&record), trimmed, Utc::now());
        self.store
            .apply_unarchive(record, notes, AuditStamp::now(actor.id))
            .await
    }

    /// Irreversible removal, bypassing the archive state entirely
    pub async fn hard_delete(&self, id: i32, _actor: &SessionUser) -> Result<(), InternalError> {
        if !self.policy.supports_hard_delete {
            return Err(LifecycleError::HardDeleteUnsupported.into());
        }
        let record = self.fetch_existing(id).await?;
        self.store.remove(record).await
    }

    async fn fetch_existing(&self, id: i32) -> Result<S::Record, InternalError> {
        self.store
            .fetch(id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(id).into())
    }
}

/// Append the attributed unarchive line to the existing notes
pub fn append_unarchive_note(existing: Option<&str>, note: &str, at: DateTime<Utc>) -> String {
    let line = format!("[UNARCHIVED on {}]: {}", at.format("%Y-%m-%d %H:%M:%S UTC"), note);
    match existing {
        Some(prior) if !prior.is_empty() => format!("{}\n\n{}", prior, line),
        _ => line,
    }
}

/// Carry unarchive lines through an edit that replaces the notes field
///
/// The unarchive append is permanent: a later edit supplies its own notes
/// text, and any `[UNARCHIVED on ...]` lines from the stored record that the
/// incoming text does not already contain are re-appended. Per-type stores
/// call this from their update path.
pub fn preserve_unarchive_lines(
    existing: Option<&str>,
    incoming: Option<String>,
) -> Option<String> {
    let preserved: Vec<&str> = existing
        .unwrap_or_default()
        .lines()
        .filter(|line| line.starts_with("[UNARCHIVED on "))
        .collect();
    if preserved.is_empty() {
        return incoming;
    }

    let mut notes = incoming.unwrap_or_default();
    for line in preserved {
        if !notes.contains(line) {
            if notes.is_empty() {
                notes.push_str(line);
            } else {
                notes.push_str("\n\n");
                notes.push_str(line);
            }
        }
    }
    Some(notes)
}
