//! Registration admission tests
//!
//! Run against the in-memory store; no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test admission_tests

use std::sync::Arc;

use futures::future::join_all;
use gather_core::{CapacityPolicy, DomainError, EntityId, RegistrationStatus};
use gather_service::dto::{AvailableMembersQuery, UpdateRegistrationStatusRequest};
use gather_service::{GatheringService, RegistrationService, ServiceError, ServiceResult};
use integration_tests::*;

fn domain(result: &ServiceResult<impl std::fmt::Debug>) -> Option<&DomainError> {
    result.as_ref().err().and_then(ServiceError::as_domain)
}

// ============================================================================
// Submitting and listing
// ============================================================================

#[tokio::test]
async fn test_fills_to_capacity_then_rejects() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Retreat", 2).await;
    let m1 = seed_member(&t.ctx, &group, "Ann").await;
    let m2 = seed_member(&t.ctx, &group, "Ben").await;
    let m3 = seed_member(&t.ctx, &group, "Cy").await;
    let service = RegistrationService::new(&t.ctx);

    let first = service.submit(submission(&m1, &gathering)).await.unwrap();
    assert_eq!(first.status, "registered");
    assert_eq!(first.member.member.id, m1.id.to_string());
    assert_eq!(first.member.group.name, "Youth");
    assert_eq!(first.gathering.id, gathering.id.to_string());
    assert_eq!(t.store.registrations_for(gathering.id).await.len(), 1);

    service.submit(submission(&m2, &gathering)).await.unwrap();
    assert_eq!(t.store.registrations_for(gathering.id).await.len(), 2);

    let third = service.submit(submission(&m3, &gathering)).await;
    assert!(matches!(domain(&third), Some(DomainError::CapacityExceeded)));
    assert_eq!(
        third.unwrap_err().to_string(),
        "Gathering is at full capacity"
    );
    assert_eq!(t.store.registrations_for(gathering.id).await.len(), 2);
}

#[tokio::test]
async fn test_duplicate_submission_rejected() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Choir").await;
    let gathering = seed_gathering(&t.ctx, "Concert", 5).await;
    let member = seed_member(&t.ctx, &group, "Dee").await;
    let service = RegistrationService::new(&t.ctx);

    service.submit(submission(&member, &gathering)).await.unwrap();
    let before = t.store.registrations_for(gathering.id).await;

    let again = service.submit(submission(&member, &gathering)).await;
    assert!(matches!(domain(&again), Some(DomainError::DuplicateRegistration)));
    assert_eq!(
        again.unwrap_err().to_string(),
        "Member is already registered for this gathering"
    );
    assert_eq!(t.store.registrations_for(gathering.id).await, before);
}

#[tokio::test]
async fn test_unknown_gathering_rejected() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Staff").await;
    let member = seed_member(&t.ctx, &group, "Eve").await;
    let missing = EntityId::generate();

    let result = RegistrationService::new(&t.ctx)
        .submit(submission_for(member.id, missing))
        .await;

    match domain(&result) {
        Some(DomainError::GatheringNotFound(id)) => assert_eq!(*id, missing),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(result.unwrap_err().status_code(), 404);
}

#[tokio::test]
async fn test_deleted_gathering_rejected() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Staff").await;
    let member = seed_member(&t.ctx, &group, "Fay").await;
    let gathering = seed_gathering(&t.ctx, "Cancelled trip", 3).await;

    GatheringService::new(&t.ctx)
        .delete(gathering.id)
        .await
        .unwrap();

    let result = RegistrationService::new(&t.ctx)
        .submit(submission(&member, &gathering))
        .await;
    assert!(matches!(domain(&result), Some(DomainError::GatheringNotFound(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_last_place_admits_one() {
    let t = Arc::new(MemoryContext::new());
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 2).await;
    let early = seed_member(&t.ctx, &group, "Gus").await;
    let a = seed_member(&t.ctx, &group, "Hal").await;
    let b = seed_member(&t.ctx, &group, "Ivy").await;

    RegistrationService::new(&t.ctx)
        .submit(submission(&early, &gathering))
        .await
        .unwrap();

    let tasks = [a, b].into_iter().map(|member| {
        let t = Arc::clone(&t);
        let request = submission(&member, &gathering);
        tokio::spawn(async move { RegistrationService::new(&t.ctx).submit(request).await })
    });
    let outcomes: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let admitted = outcomes.iter().filter(|r| r.is_ok()).count();
    let full = outcomes
        .iter()
        .filter(|r| matches!(domain(*r), Some(DomainError::CapacityExceeded)))
        .count();
    assert_eq!(admitted, 1);
    assert_eq!(full, 1);
    assert_eq!(t.store.registrations_for(gathering.id).await.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicates_admit_once() {
    let t = Arc::new(MemoryContext::new());
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 10).await;
    let member = seed_member(&t.ctx, &group, "Jo").await;

    let tasks = (0..6).map(|_| {
        let t = Arc::clone(&t);
        let request = submission(&member, &gathering);
        tokio::spawn(async move { RegistrationService::new(&t.ctx).submit(request).await })
    });
    let outcomes: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter(|r| r.is_err())
        .all(|r| matches!(domain(r), Some(DomainError::DuplicateRegistration))));
    assert_eq!(t.store.registrations_for(gathering.id).await.len(), 1);
}

#[tokio::test]
async fn test_available_members_excludes_registered() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let other_group = seed_group(&t.ctx, "Elders").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 10).await;
    let registered = seed_member(&t.ctx, &group, "Kim").await;
    seed_member(&t.ctx, &group, "Lou").await;
    seed_member(&t.ctx, &group, "Abe").await;
    seed_inactive_member(&t.ctx, &group, "Max").await;
    seed_member(&t.ctx, &other_group, "Ned").await;
    let service = RegistrationService::new(&t.ctx);

    service
        .submit(submission(&registered, &gathering))
        .await
        .unwrap();

    let available = service
        .available_members(AvailableMembersQuery {
            group_id: Some(group.id.to_string()),
            gathering_id: Some(gathering.id.to_string()),
        })
        .await
        .unwrap();

    let names: Vec<&str> = available.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Abe", "Lou"]);
}

#[tokio::test]
async fn test_available_members_requires_both_parameters() {
    let t = MemoryContext::new();
    let service = RegistrationService::new(&t.ctx);

    let err = service
        .available_members(AvailableMembersQuery {
            group_id: Some(EntityId::generate().to_string()),
            gathering_id: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_string(), "Missing required parameters");
}

// ============================================================================
// Capacity and uniqueness under contention
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_capacity_never_exceeded_under_contention() {
    let t = Arc::new(MemoryContext::new());
    let group = seed_group(&t.ctx, "Crowd").await;
    let gathering = seed_gathering(&t.ctx, "Small room", 3).await;

    let mut members = Vec::new();
    for i in 0..12 {
        members.push(seed_member(&t.ctx, &group, &format!("M{i}")).await);
    }

    let tasks = members.iter().map(|member| {
        let t = Arc::clone(&t);
        let request = submission(member, &gathering);
        tokio::spawn(async move { RegistrationService::new(&t.ctx).submit(request).await })
    });
    let outcomes: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 3);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(domain(*r), Some(DomainError::CapacityExceeded)))
            .count(),
        9
    );
    assert_eq!(t.store.registrations_for(gathering.id).await.len(), 3);
    assert_eq!(t.store.admit_calls(), 12);
}

#[tokio::test]
async fn test_rejections_write_nothing() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 1).await;
    let first = seed_member(&t.ctx, &group, "Oz").await;
    let second = seed_member(&t.ctx, &group, "Pia").await;
    let inactive = seed_inactive_member(&t.ctx, &group, "Quin").await;
    let service = RegistrationService::new(&t.ctx);

    service.submit(submission(&first, &gathering)).await.unwrap();
    let before = t.store.registrations_for(gathering.id).await;

    let rejected = [
        service.submit(submission(&first, &gathering)).await,
        service.submit(submission(&second, &gathering)).await,
        service.submit(submission(&inactive, &gathering)).await,
        service
            .submit(submission_for(EntityId::generate(), gathering.id))
            .await,
    ];

    assert!(rejected.iter().all(Result::is_err));
    assert_eq!(t.store.registrations_for(gathering.id).await, before);
}

#[tokio::test]
async fn test_sequential_duplicate_is_rejected_every_time() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 4).await;
    let member = seed_member(&t.ctx, &group, "Ray").await;
    let service = RegistrationService::new(&t.ctx);

    assert!(service.submit(submission(&member, &gathering)).await.is_ok());
    for _ in 0..3 {
        let again = service.submit(submission(&member, &gathering)).await;
        assert!(matches!(domain(&again), Some(DomainError::DuplicateRegistration)));
    }
    assert_eq!(t.store.registrations_for(gathering.id).await.len(), 1);
}

// ============================================================================
// Admission policy
// ============================================================================

#[tokio::test]
async fn test_inactive_member_and_gathering_rejected() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let member = seed_member(&t.ctx, &group, "Sal").await;
    let inactive = seed_inactive_member(&t.ctx, &group, "Tim").await;
    let open = seed_gathering(&t.ctx, "Open", 5).await;
    let mut closed = seed_gathering(&t.ctx, "Closed", 5).await;
    closed.is_active = false;
    t.ctx.gathering_repo().update(&closed).await.unwrap();
    let service = RegistrationService::new(&t.ctx);

    let result = service.submit(submission(&member, &closed)).await;
    assert!(matches!(domain(&result), Some(DomainError::GatheringInactive)));

    let result = service.submit(submission(&inactive, &open)).await;
    assert!(matches!(domain(&result), Some(DomainError::MemberInactive)));
}

#[tokio::test]
async fn test_unknown_member_rejected() {
    let t = MemoryContext::new();
    let gathering = seed_gathering(&t.ctx, "Camp", 5).await;

    let result = RegistrationService::new(&t.ctx)
        .submit(submission_for(EntityId::generate(), gathering.id))
        .await;

    assert!(matches!(domain(&result), Some(DomainError::MemberNotFound(_))));
    assert_eq!(result.unwrap_err().status_code(), 404);
}

#[tokio::test]
async fn test_malformed_ids_are_validation_errors() {
    let t = MemoryContext::new();
    let mut request = submission_for(EntityId::generate(), EntityId::generate());
    request.member_id = "not-an-id".to_string();

    let err = RegistrationService::new(&t.ctx)
        .submit(request)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_string(), "Invalid memberId");
    assert_eq!(t.store.admit_calls(), 0);
}

#[tokio::test]
async fn test_new_registration_status_must_be_registered() {
    let t = MemoryContext::new();
    let mut request = submission_for(EntityId::generate(), EntityId::generate());
    request.status = Some("attended".to_string());

    let err = RegistrationService::new(&t.ctx)
        .submit(request)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(t.store.admit_calls(), 0);
}

#[tokio::test]
async fn test_cancelled_registrations_hold_places_by_default() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 1).await;
    let first = seed_member(&t.ctx, &group, "Uma").await;
    let second = seed_member(&t.ctx, &group, "Vic").await;
    let service = RegistrationService::new(&t.ctx);

    let admitted = service.submit(submission(&first, &gathering)).await.unwrap();
    service
        .update_status(
            EntityId::parse(&admitted.id).unwrap(),
            UpdateRegistrationStatusRequest {
                status: "cancelled".to_string(),
            },
        )
        .await
        .unwrap();

    let result = service.submit(submission(&second, &gathering)).await;
    assert!(matches!(domain(&result), Some(DomainError::CapacityExceeded)));
}

#[tokio::test]
async fn test_cancelled_registrations_can_free_places() {
    let t = MemoryContext::with_policy(CapacityPolicy::ExcludeCancelled);
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 1).await;
    let first = seed_member(&t.ctx, &group, "Wes").await;
    let second = seed_member(&t.ctx, &group, "Xan").await;
    let service = RegistrationService::new(&t.ctx);

    let admitted = service.submit(submission(&first, &gathering)).await.unwrap();
    let cancelled = service
        .update_status(
            EntityId::parse(&admitted.id).unwrap(),
            UpdateRegistrationStatusRequest {
                status: "cancelled".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(cancelled.status, RegistrationStatus::Cancelled.as_str());

    service.submit(submission(&second, &gathering)).await.unwrap();
    assert_eq!(t.store.registrations_for(gathering.id).await.len(), 2);

    // The cancelled member still cannot register twice
    let again = service.submit(submission(&first, &gathering)).await;
    assert!(matches!(domain(&again), Some(DomainError::DuplicateRegistration)));
}

#[tokio::test]
async fn test_deleting_registration_reopens_place() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 1).await;
    let first = seed_member(&t.ctx, &group, "Yul").await;
    let second = seed_member(&t.ctx, &group, "Zed").await;
    let service = RegistrationService::new(&t.ctx);

    let admitted = service.submit(submission(&first, &gathering)).await.unwrap();
    let deleted = service
        .delete(EntityId::parse(&admitted.id).unwrap())
        .await
        .unwrap();
    assert_eq!(deleted.message, "Registration deleted successfully");

    service.submit(submission(&second, &gathering)).await.unwrap();
}
