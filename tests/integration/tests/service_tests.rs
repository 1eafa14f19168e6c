//! Administrative service tests
//!
//! Listings, the listing cache, and the CRUD services, run against the
//! in-memory store.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use chrono::{Duration, Utc};
use gather_common::AdminBootstrapConfig;
use gather_core::{EntityId, PageRequest};
use gather_service::dto::{
    CreateGatheringRequest, CreateMemberGroupRequest, CreateMemberRequest, CreateUserRequest,
    LoginRequest, UpdateGatheringRequest, UpdateUserRequest,
};
use gather_service::{
    AuthService, GatheringService, MemberGroupService, MemberService, RegistrationService,
    UserService,
};
use integration_tests::*;

// ============================================================================
// Gathering listings
// ============================================================================

#[tokio::test]
async fn test_active_listing_filters_and_orders() {
    let t = MemoryContext::uncached();
    let group = seed_group(&t.ctx, "Youth").await;
    let later = seed_gathering_at(&t.ctx, "Later", 5, 14).await;
    let sooner = seed_gathering_at(&t.ctx, "Sooner", 5, 2).await;
    let full = seed_gathering_at(&t.ctx, "Full", 1, 3).await;
    seed_gathering_at(&t.ctx, "Past", 5, -2).await;
    let mut hidden = seed_gathering_at(&t.ctx, "Hidden", 5, 4).await;
    hidden.is_active = false;
    t.ctx.gathering_repo().update(&hidden).await.unwrap();

    let member = seed_member(&t.ctx, &group, "Ann").await;
    let registrations = RegistrationService::new(&t.ctx);
    registrations.submit(submission(&member, &full)).await.unwrap();
    registrations.submit(submission(&member, &sooner)).await.unwrap();

    let active = GatheringService::new(&t.ctx).list_active().await.unwrap();

    let titles: Vec<&str> = active
        .gatherings
        .iter()
        .map(|g| g.gathering.title.as_str())
        .collect();
    assert_eq!(titles, ["Sooner", "Later"]);
    assert_eq!(active.gatherings[0].registration_count, 1);
    assert_eq!(active.gatherings[1].gathering.id, later.id.to_string());
    assert_eq!(active.gatherings[1].registration_count, 0);
}

#[tokio::test]
async fn test_listing_with_registrations_in_creation_order() {
    let t = MemoryContext::uncached();
    let group = seed_group(&t.ctx, "Choir").await;
    let gathering = seed_gathering(&t.ctx, "Concert", 5).await;
    let first = seed_member(&t.ctx, &group, "Zoe").await;
    let second = seed_member(&t.ctx, &group, "Amy").await;
    let service = RegistrationService::new(&t.ctx);
    service.submit(submission(&first, &gathering)).await.unwrap();
    service.submit(submission(&second, &gathering)).await.unwrap();

    let listing = GatheringService::new(&t.ctx)
        .list_with_registrations()
        .await
        .unwrap();

    assert_eq!(listing.gatherings.len(), 1);
    let entry = &listing.gatherings[0];
    assert_eq!(entry.registration_count, 2);
    let names: Vec<&str> = entry
        .registrations
        .iter()
        .map(|r| r.member.member.name.as_str())
        .collect();
    assert_eq!(names, ["Zoe", "Amy"]);
    assert_eq!(entry.registrations[0].member.group.name, "Choir");
}

#[tokio::test]
async fn test_active_listing_is_cached_until_a_write() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 3).await;
    let member = seed_member(&t.ctx, &group, "Bo").await;
    let gatherings = GatheringService::new(&t.ctx);

    assert_eq!(gatherings.list_active().await.unwrap().gatherings.len(), 1);

    // Written behind the service's back: the cached listing stays stale
    seed_gathering(&t.ctx, "Unseen", 3).await;
    assert_eq!(gatherings.list_active().await.unwrap().gatherings.len(), 1);

    // A registration invalidates the cached listings
    RegistrationService::new(&t.ctx)
        .submit(submission(&member, &gathering))
        .await
        .unwrap();

    let refreshed = gatherings.list_active().await.unwrap();
    assert_eq!(refreshed.gatherings.len(), 2);
    let camp = refreshed
        .gatherings
        .iter()
        .find(|g| g.gathering.id == gathering.id.to_string())
        .unwrap();
    assert_eq!(camp.registration_count, 1);
}

#[tokio::test]
async fn test_gathering_writes_invalidate_cache() {
    let t = MemoryContext::new();
    let service = GatheringService::new(&t.ctx);

    assert!(service.list_active().await.unwrap().gatherings.is_empty());

    let created = service
        .create(CreateGatheringRequest {
            title: "Picnic".to_string(),
            description: None,
            location: "Park".to_string(),
            date: Utc::now() + Duration::days(5),
            capacity: 20,
            is_active: None,
        })
        .await
        .unwrap();
    assert!(created.is_active);
    assert_eq!(service.list_active().await.unwrap().gatherings.len(), 1);

    let id = EntityId::parse(&created.id).unwrap();
    service
        .update(
            id,
            UpdateGatheringRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(service.list_active().await.unwrap().gatherings.is_empty());
}

// ============================================================================
// Gathering administration
// ============================================================================

#[tokio::test]
async fn test_gathering_validation_and_not_found() {
    let t = MemoryContext::new();
    let service = GatheringService::new(&t.ctx);

    let err = service
        .create(CreateGatheringRequest {
            title: "   ".to_string(),
            description: None,
            location: "Hall".to_string(),
            date: Utc::now(),
            capacity: 10,
            is_active: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = service
        .update(EntityId::generate(), UpdateGatheringRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = service.delete(EntityId::generate()).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_capacity_can_be_lowered_below_count() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 3).await;
    let registrations = RegistrationService::new(&t.ctx);
    for name in ["Cal", "Dan"] {
        let member = seed_member(&t.ctx, &group, name).await;
        registrations
            .submit(submission(&member, &gathering))
            .await
            .unwrap();
    }

    let updated = GatheringService::new(&t.ctx)
        .update(
            gathering.id,
            UpdateGatheringRequest {
                capacity: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.capacity, 1);

    let late = seed_member(&t.ctx, &group, "Eli").await;
    let err = registrations
        .submit(submission(&late, &gathering))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Gathering is at full capacity");
}

#[tokio::test]
async fn test_gathering_list_is_paginated_newest_date_first() {
    let t = MemoryContext::new();
    for days in [1, 3, 2] {
        seed_gathering_at(&t.ctx, &format!("In {days} days"), 5, days).await;
    }

    let service = GatheringService::new(&t.ctx);
    let page = service.list(PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(page.total, 3);
    let titles: Vec<&str> = page.gatherings.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, ["In 3 days", "In 2 days"]);

    let all = service.list(PageRequest::all()).await.unwrap();
    assert_eq!(all.gatherings.len(), 3);
}

// ============================================================================
// Member groups and members
// ============================================================================

#[tokio::test]
async fn test_group_with_members_cannot_be_deleted() {
    let t = MemoryContext::new();
    let groups = MemberGroupService::new(&t.ctx);
    let created = groups
        .create(CreateMemberGroupRequest {
            name: "Ushers".to_string(),
            description: None,
            is_active: None,
        })
        .await
        .unwrap();
    let group_id = EntityId::parse(&created.id).unwrap();
    let group = t.ctx.group_repo().find_by_id(group_id).await.unwrap().unwrap();
    let member = seed_member(&t.ctx, &group, "Flo").await;

    let err = groups.delete(group_id).await.unwrap_err();
    assert_eq!(err.status_code(), 409);

    MemberService::new(&t.ctx).delete(member.id).await.unwrap();
    let deleted = groups.delete(group_id).await.unwrap();
    assert_eq!(deleted.message, "Member group deleted successfully");
}

#[tokio::test]
async fn test_active_groups_sorted_by_name() {
    let t = MemoryContext::new();
    seed_group(&t.ctx, "Youth").await;
    seed_group(&t.ctx, "Adults").await;
    let groups = MemberGroupService::new(&t.ctx);
    groups
        .create(CreateMemberGroupRequest {
            name: "Retired".to_string(),
            description: None,
            is_active: Some(false),
        })
        .await
        .unwrap();

    let active = groups.list_active().await.unwrap();
    let names: Vec<&str> = active.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Adults", "Youth"]);
}

#[tokio::test]
async fn test_member_requires_existing_group() {
    let t = MemoryContext::new();

    let err = MemberService::new(&t.ctx)
        .create(CreateMemberRequest {
            name: "Gil".to_string(),
            email: "gil@example.com".to_string(),
            phone: None,
            address: None,
            group_id: EntityId::generate().to_string(),
            is_active: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "Member group not found");
}

#[tokio::test]
async fn test_member_is_returned_with_group() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Band").await;

    let created = MemberService::new(&t.ctx)
        .create(CreateMemberRequest {
            name: " Hana ".to_string(),
            email: "hana@example.com".to_string(),
            phone: Some("010-0000-0000".to_string()),
            address: None,
            group_id: group.id.to_string(),
            is_active: None,
        })
        .await
        .unwrap();

    assert_eq!(created.member.name, "Hana");
    assert_eq!(created.member.group_id, group.id.to_string());
    assert_eq!(created.group.name, "Band");
    assert!(created.member.is_active);
}

#[tokio::test]
async fn test_deleting_member_removes_registrations() {
    let t = MemoryContext::new();
    let group = seed_group(&t.ctx, "Youth").await;
    let gathering = seed_gathering(&t.ctx, "Camp", 1).await;
    let member = seed_member(&t.ctx, &group, "Ian").await;
    RegistrationService::new(&t.ctx)
        .submit(submission(&member, &gathering))
        .await
        .unwrap();

    MemberService::new(&t.ctx).delete(member.id).await.unwrap();

    assert!(t.store.registrations_for(gathering.id).await.is_empty());
    let active = GatheringService::new(&t.ctx).list_active().await.unwrap();
    assert_eq!(active.gatherings.len(), 1);
}

// ============================================================================
// Administrators and login
// ============================================================================

fn admin_request(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: Some("Admin".to_string()),
        email: email.to_string(),
        password: "CorrectHorse1".to_string(),
    }
}

#[tokio::test]
async fn test_user_email_is_unique() {
    let t = MemoryContext::new();
    let users = UserService::new(&t.ctx);

    let created = users.create(admin_request("Ops@Example.com")).await.unwrap();
    assert_eq!(created.email, "ops@example.com");

    let err = users
        .create(admin_request("ops@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_login_issues_token() {
    let t = MemoryContext::new();
    UserService::new(&t.ctx)
        .create(admin_request("desk@example.com"))
        .await
        .unwrap();

    let login = AuthService::new(&t.ctx)
        .login(LoginRequest {
            email: "DESK@example.com".to_string(),
            password: "CorrectHorse1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(login.token_type, "Bearer");
    assert_eq!(login.user.email, "desk@example.com");
    let claims = t.ctx.jwt_service().decode_token(&login.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap().to_string(), login.user.id);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let t = MemoryContext::new();
    UserService::new(&t.ctx)
        .create(admin_request("desk@example.com"))
        .await
        .unwrap();
    let auth = AuthService::new(&t.ctx);

    let wrong_password = auth
        .login(LoginRequest {
            email: "desk@example.com".to_string(),
            password: "WrongHorse1".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(wrong_password.status_code(), 401);

    let unknown = auth
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: "CorrectHorse1".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(unknown.status_code(), 401);
}

#[tokio::test]
async fn test_password_change_takes_effect() {
    let t = MemoryContext::new();
    let users = UserService::new(&t.ctx);
    let created = users.create(admin_request("desk@example.com")).await.unwrap();

    users
        .update(
            EntityId::parse(&created.id).unwrap(),
            UpdateUserRequest {
                password: Some("BatteryStaple2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let auth = AuthService::new(&t.ctx);
    let old = auth
        .login(LoginRequest {
            email: "desk@example.com".to_string(),
            password: "CorrectHorse1".to_string(),
        })
        .await;
    assert!(old.is_err());

    let new = auth
        .login(LoginRequest {
            email: "desk@example.com".to_string(),
            password: "BatteryStaple2".to_string(),
        })
        .await;
    assert!(new.is_ok());
}

#[tokio::test]
async fn test_admin_bootstrap_runs_once() {
    let t = MemoryContext::new();
    let admin = AdminBootstrapConfig {
        email: "root@example.com".to_string(),
        password: "BootstrapPass1".to_string(),
        name: None,
    };
    let auth = AuthService::new(&t.ctx);

    assert!(auth.ensure_admin(&admin).await.unwrap());
    assert!(!auth.ensure_admin(&admin).await.unwrap());

    let users = UserService::new(&t.ctx).list(PageRequest::all()).await.unwrap();
    assert_eq!(users.total, 1);
}
