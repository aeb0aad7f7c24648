//! In-memory repository implementations for testing
//!
//! These back the repository traits with a `Mutex`-guarded store so handler
//! and service tests run without a database. Conditional-update semantics
//! (book-if-available, set-join-url-if-unset) match the SQL implementations.

use crate::error::DbError;
use crate::repositories::credential::{Credential, CredentialRepository};
use crate::repositories::slot::{AvailableSession, Slot, SlotRepository};
use async_trait::async_trait;
use std::sync::Mutex;

/// A seeded slot plus the display name of its tutor.
#[derive(Debug, Clone)]
struct SeededSlot {
    slot: Slot,
    tutor_name: String,
}

/// In-memory slot repository.
#[derive(Debug, Default)]
pub struct InMemorySlotRepository {
    slots: Mutex<Vec<SeededSlot>>,
}

impl InMemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an open slot for the given tutor.
    pub fn seed(&self, date: &str, tutor_id: i32, tutor_name: &str) {
        self.seed_slot(
            Slot {
                date: date.to_string(),
                tutor_id,
                student: None,
                email: None,
                join_url: None,
            },
            tutor_name,
        );
    }

    /// Seed a slot in an arbitrary state.
    pub fn seed_slot(&self, slot: Slot, tutor_name: &str) {
        self.slots.lock().expect("lock").push(SeededSlot {
            slot,
            tutor_name: tutor_name.to_string(),
        });
    }

    /// Snapshot of a slot by its (date, tutor) key.
    pub fn get(&self, date: &str, tutor_id: i32) -> Option<Slot> {
        self.slots
            .lock()
            .expect("lock")
            .iter()
            .find(|s| s.slot.date == date && s.slot.tutor_id == tutor_id)
            .map(|s| s.slot.clone())
    }
}

#[async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn list_available(&self, day: &str) -> Result<Vec<AvailableSession>, DbError> {
        let slots = self.slots.lock().expect("lock");
        let mut sessions: Vec<AvailableSession> = slots
            .iter()
            .filter(|s| {
                s.slot.is_available()
                    && s.slot.date.split(' ').next() == Some(day)
            })
            .map(|s| AvailableSession {
                name: s.tutor_name.clone(),
                date: s.slot.date.clone(),
            })
            .collect();
        sessions.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(sessions)
    }

    async fn book(
        &self,
        date: &str,
        student: &str,
        email: &str,
    ) -> Result<Option<i32>, DbError> {
        let mut slots = self.slots.lock().expect("lock");
        match slots
            .iter_mut()
            .find(|s| s.slot.date == date && s.slot.is_available())
        {
            Some(seeded) => {
                seeded.slot.student = Some(student.to_string());
                seeded.slot.email = Some(email.to_string());
                Ok(Some(seeded.slot.tutor_id))
            }
            None => Ok(None),
        }
    }

    async fn find(&self, date: &str, tutor_id: i32) -> Result<Option<Slot>, DbError> {
        Ok(self.get(date, tutor_id))
    }

    async fn set_join_url(
        &self,
        date: &str,
        tutor_id: i32,
        join_url: &str,
    ) -> Result<bool, DbError> {
        let mut slots = self.slots.lock().expect("lock");
        match slots.iter_mut().find(|s| {
            s.slot.date == date && s.slot.tutor_id == tutor_id && s.slot.join_url.is_none()
        }) {
            Some(seeded) => {
                seeded.slot.join_url = Some(join_url.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory credential repository holding the single credential record.
#[derive(Debug, Default)]
pub struct InMemoryCredentialRepository {
    credential: Mutex<Option<Credential>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }

    /// Snapshot of the stored credential.
    pub fn get(&self) -> Option<Credential> {
        self.credential.lock().expect("lock").clone()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn load(&self) -> Result<Option<Credential>, DbError> {
        Ok(self.credential.lock().expect("lock").clone())
    }

    async fn store(&self, credential: &Credential) -> Result<(), DbError> {
        *self.credential.lock().expect("lock") = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DbError> {
        *self.credential.lock().expect("lock") = None;
        Ok(())
    }
}
