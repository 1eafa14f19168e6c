//! In-memory repository adapters
//!
//! One [`MemoryStore`] implements every repository port over a single
//! `tokio::sync::Mutex`, so an admission's read-evaluate-insert sequence is
//! as atomic here as the row lock makes it in PostgreSQL.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gather_core::admission::{self, AdmissionRequest, AdmissionSnapshot, CapacityPolicy};
use gather_core::entities::{
    Attendee, Gathering, GatheringWithCount, GatheringWithRegistrations, Member, MemberGroup,
    MemberWithGroup, Registration, RegistrationDetails, RegistrationStatus, User,
};
use gather_core::traits::{
    GatheringRepository, MemberGroupRepository, MemberRepository, RegistrationRepository,
    RepoResult, StoreHealth, UserRepository,
};
use gather_core::{DomainError, EntityId, Page, PageRequest};
use tokio::sync::Mutex;

#[derive(Default)]
struct Tables {
    groups: Vec<MemberGroup>,
    members: Vec<Member>,
    gatherings: Vec<Gathering>,
    registrations: Vec<Registration>,
    users: Vec<(User, String)>,
}

impl Tables {
    fn group(&self, id: EntityId) -> Option<&MemberGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn member(&self, id: EntityId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    fn gathering(&self, id: EntityId) -> Option<&Gathering> {
        self.gatherings.iter().find(|g| g.id == id)
    }

    fn with_group(&self, member: &Member) -> RepoResult<MemberWithGroup> {
        let group = self
            .group(member.group_id)
            .cloned()
            .ok_or(DomainError::MemberGroupNotFound(member.group_id))?;
        Ok(MemberWithGroup {
            member: member.clone(),
            group,
        })
    }

    fn details(&self, registration: &Registration) -> RepoResult<RegistrationDetails> {
        let member = self
            .member(registration.member_id)
            .ok_or(DomainError::MemberNotFound(registration.member_id))?;
        let MemberWithGroup { member, group } = self.with_group(member)?;
        let gathering = self
            .gathering(registration.gathering_id)
            .cloned()
            .ok_or(DomainError::GatheringNotFound(registration.gathering_id))?;
        Ok(RegistrationDetails {
            registration: registration.clone(),
            member,
            group,
            gathering,
        })
    }

    fn occupied(&self, gathering_id: EntityId, policy: CapacityPolicy) -> i64 {
        self.registrations
            .iter()
            .filter(|r| r.gathering_id == gathering_id && policy.counts(r.status))
            .count() as i64
    }

    fn open_gatherings(&self, now: DateTime<Utc>) -> Vec<Gathering> {
        let mut open: Vec<Gathering> = self
            .gatherings
            .iter()
            .filter(|g| g.is_open_at(now))
            .cloned()
            .collect();
        open.sort_by_key(|g| g.date);
        open
    }
}

/// Paginate a list already sorted newest first
fn paged<T: Clone>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as i64;
    Page::new(page.slice(&items), total)
}

/// In-memory implementation of every repository port
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    admit_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of `admit` calls that reached the store
    pub fn admit_calls(&self) -> usize {
        self.admit_calls.load(Ordering::SeqCst)
    }

    /// Registrations stored for a gathering, every status included
    pub async fn registrations_for(&self, gathering_id: EntityId) -> Vec<Registration> {
        self.tables
            .lock()
            .await
            .registrations
            .iter()
            .filter(|r| r.gathering_id == gathering_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl GatheringRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Gathering>> {
        Ok(self.tables.lock().await.gathering(id).cloned())
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<Gathering>> {
        let mut all = self.tables.lock().await.gatherings.clone();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(paged(all, page))
    }

    async fn list_open_with_counts(
        &self,
        now: DateTime<Utc>,
        policy: CapacityPolicy,
    ) -> RepoResult<Vec<GatheringWithCount>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .open_gatherings(now)
            .into_iter()
            .map(|gathering| GatheringWithCount {
                registration_count: tables.occupied(gathering.id, policy),
                gathering,
            })
            .collect())
    }

    async fn list_open_with_registrations(
        &self,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<GatheringWithRegistrations>> {
        let tables = self.tables.lock().await;
        let mut result = Vec::new();
        for gathering in tables.open_gatherings(now) {
            let mut rows: Vec<&Registration> = tables
                .registrations
                .iter()
                .filter(|r| r.gathering_id == gathering.id)
                .collect();
            rows.sort_by_key(|r| r.created_at);

            let mut registrations = Vec::with_capacity(rows.len());
            for registration in rows {
                let details = tables.details(registration)?;
                registrations.push(Attendee {
                    registration: details.registration,
                    member: details.member,
                    group: details.group,
                });
            }
            result.push(GatheringWithRegistrations {
                gathering,
                registrations,
            });
        }
        Ok(result)
    }

    async fn create(&self, gathering: &Gathering) -> RepoResult<()> {
        self.tables.lock().await.gatherings.push(gathering.clone());
        Ok(())
    }

    async fn update(&self, gathering: &Gathering) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        let slot = tables
            .gatherings
            .iter_mut()
            .find(|g| g.id == gathering.id)
            .ok_or(DomainError::GatheringNotFound(gathering.id))?;
        *slot = gathering.clone();
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.gathering(id).is_none() {
            return Err(DomainError::GatheringNotFound(id));
        }
        tables.gatherings.retain(|g| g.id != id);
        tables.registrations.retain(|r| r.gathering_id != id);
        Ok(())
    }
}

#[async_trait]
impl MemberGroupRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<MemberGroup>> {
        Ok(self.tables.lock().await.group(id).cloned())
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<MemberGroup>> {
        let mut all = self.tables.lock().await.groups.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paged(all, page))
    }

    async fn list_active(&self) -> RepoResult<Vec<MemberGroup>> {
        let mut active: Vec<MemberGroup> = self
            .tables
            .lock()
            .await
            .groups
            .iter()
            .filter(|g| g.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    async fn create(&self, group: &MemberGroup) -> RepoResult<()> {
        self.tables.lock().await.groups.push(group.clone());
        Ok(())
    }

    async fn update(&self, group: &MemberGroup) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        let slot = tables
            .groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or(DomainError::MemberGroupNotFound(group.id))?;
        *slot = group.clone();
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.group(id).is_none() {
            return Err(DomainError::MemberGroupNotFound(id));
        }
        if tables.members.iter().any(|m| m.group_id == id) {
            return Err(DomainError::GroupHasMembers);
        }
        tables.groups.retain(|g| g.id != id);
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Member>> {
        Ok(self.tables.lock().await.member(id).cloned())
    }

    async fn find_with_group(&self, id: EntityId) -> RepoResult<Option<MemberWithGroup>> {
        let tables = self.tables.lock().await;
        tables.member(id).map(|m| tables.with_group(m)).transpose()
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<MemberWithGroup>> {
        let tables = self.tables.lock().await;
        let mut all = tables
            .members
            .iter()
            .map(|m| tables.with_group(m))
            .collect::<RepoResult<Vec<_>>>()?;
        all.sort_by(|a, b| b.member.created_at.cmp(&a.member.created_at));
        Ok(paged(all, page))
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.group(member.group_id).is_none() {
            return Err(DomainError::MemberGroupNotFound(member.group_id));
        }
        tables.members.push(member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.group(member.group_id).is_none() {
            return Err(DomainError::MemberGroupNotFound(member.group_id));
        }
        let slot = tables
            .members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or(DomainError::MemberNotFound(member.id))?;
        *slot = member.clone();
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.member(id).is_none() {
            return Err(DomainError::MemberNotFound(id));
        }
        tables.members.retain(|m| m.id != id);
        tables.registrations.retain(|r| r.member_id != id);
        Ok(())
    }
}

#[async_trait]
impl RegistrationRepository for MemoryStore {
    async fn admit(
        &self,
        request: &AdmissionRequest,
        policy: CapacityPolicy,
    ) -> RepoResult<RegistrationDetails> {
        self.admit_calls.fetch_add(1, Ordering::SeqCst);

        // Held from the first read to the insert
        let mut tables = self.tables.lock().await;

        let snapshot = AdmissionSnapshot {
            already_registered: tables.registrations.iter().any(|r| {
                r.member_id == request.member_id && r.gathering_id == request.gathering_id
            }),
            gathering: tables.gathering(request.gathering_id).cloned(),
            member: tables.member(request.member_id).cloned(),
            occupied: tables.occupied(request.gathering_id, policy),
        };

        admission::evaluate(request, &snapshot)?;

        // Let competing tasks queue on the lock between evaluation and insert
        tokio::task::yield_now().await;

        let registration =
            Registration::new(EntityId::generate(), request.member_id, request.gathering_id);
        let details = tables.details(&registration)?;
        tables.registrations.push(registration);
        Ok(details)
    }

    async fn find_details(&self, id: EntityId) -> RepoResult<Option<RegistrationDetails>> {
        let tables = self.tables.lock().await;
        tables
            .registrations
            .iter()
            .find(|r| r.id == id)
            .map(|r| tables.details(r))
            .transpose()
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<RegistrationDetails>> {
        let tables = self.tables.lock().await;
        let mut all = tables
            .registrations
            .iter()
            .map(|r| tables.details(r))
            .collect::<RepoResult<Vec<_>>>()?;
        all.sort_by(|a, b| b.registration.created_at.cmp(&a.registration.created_at));
        Ok(paged(all, page))
    }

    async fn update_status(&self, id: EntityId, status: RegistrationStatus) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        let registration = tables
            .registrations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DomainError::RegistrationNotFound(id))?;
        registration.set_status(status);
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        let before = tables.registrations.len();
        tables.registrations.retain(|r| r.id != id);
        if tables.registrations.len() == before {
            return Err(DomainError::RegistrationNotFound(id));
        }
        Ok(())
    }

    async fn count_for_gathering(&self, gathering_id: EntityId) -> RepoResult<i64> {
        Ok(self
            .tables
            .lock()
            .await
            .occupied(gathering_id, CapacityPolicy::AllRegistrations))
    }

    async fn available_members(
        &self,
        group_id: EntityId,
        gathering_id: EntityId,
    ) -> RepoResult<Vec<Member>> {
        let tables = self.tables.lock().await;
        let mut members: Vec<Member> = tables
            .members
            .iter()
            .filter(|m| m.group_id == group_id && m.is_active)
            .filter(|m| {
                !tables
                    .registrations
                    .iter()
                    .any(|r| r.member_id == m.id && r.gathering_id == gathering_id)
            })
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(members)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .await
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .await
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self
            .tables
            .lock()
            .await
            .users
            .iter()
            .any(|(u, _)| u.email == email))
    }

    async fn list(&self, page: PageRequest) -> RepoResult<Page<User>> {
        let mut all: Vec<User> = self
            .tables
            .lock()
            .await
            .users
            .iter()
            .map(|(u, _)| u.clone())
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paged(all, page))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        tables.users.push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        let slot = tables
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        slot.0 = user.clone();
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        let before = tables.users.len();
        tables.users.retain(|(u, _)| u.id != id);
        if tables.users.len() == before {
            return Err(DomainError::UserNotFound(id));
        }
        Ok(())
    }

    async fn get_password_hash(&self, id: EntityId) -> RepoResult<Option<String>> {
        Ok(self
            .tables
            .lock()
            .await
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, hash)| hash.clone()))
    }

    async fn update_password(&self, id: EntityId, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.tables.lock().await;
        let slot = tables
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        slot.1 = password_hash.to_string();
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
