use std::sync::atomic::Ordering;

use vivexa_domain::role::Role;
use vivexa_domain::staff::StaffStatus;

use vivexa_session::domain::allow_list::{AllowListMatching, SuperAdminAllowList};
use vivexa_session::domain::types::{
    DEFAULT_SUPER_ADMIN_NAME, DenialReason, GrantNotice, SessionProfile, StaffRecord, Verdict,
};
use vivexa_session::usecase::authorize::AuthorizeSessionUseCase;

use crate::helpers::{
    Failure, MockStaffDirectory, MockUserRecords, SUPER_ADMIN_EMAIL, identity, staff_record,
    user_record, usecase,
};

fn granted(verdict: Verdict) -> (SessionProfile, Option<StaffRecord>, Option<GrantNotice>) {
    match verdict {
        Verdict::Granted {
            profile,
            staff_profile,
            notice,
        } => (profile, staff_profile, notice),
        Verdict::Denied(reason) => panic!("expected granted verdict, got denial {reason:?}"),
    }
}

// ── Super-admin path ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_bootstrap_super_admin_without_user_record() {
    let uc = usecase(MockUserRecords::empty(), MockStaffDirectory::empty());
    let mut id = identity("uid-owner", SUPER_ADMIN_EMAIL);
    id.display_name = Some("Olivia Owner".into());

    let (profile, staff_profile, notice) = granted(uc.execute(&id).await);

    assert_eq!(profile.role, Role::Admin);
    assert_eq!(profile.name, "Olivia Owner");
    assert_eq!(profile.email, SUPER_ADMIN_EMAIL);
    assert!(profile.is_active);
    assert!(staff_profile.is_none());
    assert_eq!(notice, Some(GrantNotice::MissingUserRecord));
}

#[tokio::test]
async fn should_name_bootstrapped_super_admin_by_default() {
    let uc = usecase(MockUserRecords::empty(), MockStaffDirectory::empty());

    let (profile, _, _) = granted(uc.execute(&identity("uid-owner", SUPER_ADMIN_EMAIL)).await);

    assert_eq!(profile.name, DEFAULT_SUPER_ADMIN_NAME);
    assert_eq!(profile.role, Role::Admin);
}

#[tokio::test]
async fn should_treat_not_found_error_like_missing_record() {
    let uc = usecase(
        MockUserRecords::failing(Failure::NotFound),
        MockStaffDirectory::empty(),
    );

    let (profile, _, notice) = granted(uc.execute(&identity("uid-owner", SUPER_ADMIN_EMAIL)).await);

    assert_eq!(profile.role, Role::Admin);
    assert_eq!(notice, Some(GrantNotice::MissingUserRecord));
}

#[tokio::test]
async fn should_use_stored_profile_for_active_super_admin() {
    let users = MockUserRecords::new(vec![user_record(
        "uid-owner",
        SUPER_ADMIN_EMAIL,
        "staff",
        true,
    )]);
    let uc = usecase(users, MockStaffDirectory::empty());

    let (profile, _, notice) = granted(uc.execute(&identity("uid-owner", SUPER_ADMIN_EMAIL)).await);

    // Allow-list membership decides the role, not the stored value.
    assert_eq!(profile.role, Role::Admin);
    assert_eq!(profile.name, "Recorded Name");
    assert!(notice.is_none());
}

#[tokio::test]
async fn should_deny_inactive_super_admin() {
    let users = MockUserRecords::new(vec![user_record(
        "uid-owner",
        SUPER_ADMIN_EMAIL,
        "admin",
        false,
    )]);
    let uc = usecase(users, MockStaffDirectory::empty());

    let verdict = uc.execute(&identity("uid-owner", SUPER_ADMIN_EMAIL)).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::AccountInactive));
}

#[tokio::test]
async fn should_grant_super_admin_when_user_records_are_unreadable() {
    let uc = usecase(
        MockUserRecords::failing(Failure::PermissionDenied),
        MockStaffDirectory::empty(),
    );

    let (profile, staff_profile, notice) =
        granted(uc.execute(&identity("uid-owner", SUPER_ADMIN_EMAIL)).await);

    assert_eq!(profile.role, Role::Admin);
    assert!(staff_profile.is_none());
    assert_eq!(notice, Some(GrantNotice::UnreadableUserRecord));
}

#[tokio::test]
async fn should_never_grant_non_allow_listed_identity_on_permission_denied() {
    let uc = AuthorizeSessionUseCase {
        staff_accounts: false,
        ..usecase(
            MockUserRecords::failing(Failure::PermissionDenied),
            MockStaffDirectory::failing(Failure::PermissionDenied),
        )
    };

    let verdict = uc.execute(&identity("uid-x", "someone@x.com")).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::VerificationFailed));

    let uc = usecase(
        MockUserRecords::failing(Failure::PermissionDenied),
        MockStaffDirectory::failing(Failure::PermissionDenied),
    );
    let verdict = uc.execute(&identity("uid-x", "someone@x.com")).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::StaffVerificationFailed));
}

#[tokio::test]
async fn should_deny_super_admin_on_transient_failure() {
    let uc = usecase(
        MockUserRecords::failing(Failure::Transient),
        MockStaffDirectory::empty(),
    );

    let verdict = uc.execute(&identity("uid-owner", SUPER_ADMIN_EMAIL)).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::VerificationFailed));
}

#[tokio::test]
async fn should_not_match_allow_list_with_different_case_by_default() {
    let staff = MockStaffDirectory::empty();
    let queried = staff.queried_handle();
    let uc = usecase(MockUserRecords::empty(), staff);

    let verdict = uc.execute(&identity("uid-owner", "Owner@Vivexa.io")).await;

    // Falls through to the staff path and finds nothing.
    assert_eq!(verdict, Verdict::Denied(DenialReason::StaffRecordNotFound));
    assert_eq!(*queried.lock().unwrap(), vec!["owner@vivexa.io".to_owned()]);
}

#[tokio::test]
async fn should_match_allow_list_case_insensitively_when_configured() {
    let uc = AuthorizeSessionUseCase {
        allow_list: SuperAdminAllowList::new([SUPER_ADMIN_EMAIL], AllowListMatching::CaseInsensitive),
        ..usecase(MockUserRecords::empty(), MockStaffDirectory::empty())
    };

    let (profile, _, _) = granted(uc.execute(&identity("uid-owner", "Owner@Vivexa.io")).await);
    assert_eq!(profile.role, Role::Admin);
}

// ── Staff path ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_grant_active_staff_with_normalized_email() {
    let record = staff_record("staff@x.com", StaffStatus::Active);
    let record_id = record.id;
    let users = MockUserRecords::empty();
    let user_calls = users.calls_handle();
    let uc = usecase(users, MockStaffDirectory::new(vec![record]));

    let (profile, staff_profile, notice) =
        granted(uc.execute(&identity("uid-staff", "Staff@X.com")).await);

    assert_eq!(profile.role, Role::Staff);
    assert_eq!(profile.name, "Sam Rivera");
    assert_eq!(profile.email, "staff@x.com");
    let staff_profile = staff_profile.expect("staff profile populated");
    assert_eq!(staff_profile.id, record_id);
    assert_eq!(staff_profile.department.as_deref(), Some("Design"));
    assert!(notice.is_none());
    assert_eq!(user_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn should_deny_inactive_staff() {
    let uc = usecase(
        MockUserRecords::empty(),
        MockStaffDirectory::new(vec![staff_record("staff@x.com", StaffStatus::Inactive)]),
    );

    let verdict = uc.execute(&identity("uid-staff", "staff@x.com")).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::AccountInactive));
}

#[tokio::test]
async fn should_deny_identity_without_staff_record() {
    let uc = usecase(MockUserRecords::empty(), MockStaffDirectory::empty());

    let verdict = uc.execute(&identity("uid-x", "nobody@x.com")).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::StaffRecordNotFound));
}

#[tokio::test]
async fn should_use_first_of_duplicate_staff_records() {
    let first = staff_record("dup@x.com", StaffStatus::Inactive);
    let second = staff_record("dup@x.com", StaffStatus::Active);
    let uc = usecase(
        MockUserRecords::empty(),
        MockStaffDirectory::new(vec![first, second]),
    );

    let verdict = uc.execute(&identity("uid-dup", "dup@x.com")).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::AccountInactive));
}

#[tokio::test]
async fn should_deny_staff_on_lookup_failure() {
    let uc = usecase(
        MockUserRecords::empty(),
        MockStaffDirectory::failing(Failure::Transient),
    );

    let verdict = uc.execute(&identity("uid-staff", "staff@x.com")).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::StaffVerificationFailed));
}

// ── User-record path (staff accounts disabled) ───────────────────────────────

fn without_staff(
    users: MockUserRecords,
) -> AuthorizeSessionUseCase<MockUserRecords, MockStaffDirectory> {
    AuthorizeSessionUseCase {
        staff_accounts: false,
        ..usecase(users, MockStaffDirectory::empty())
    }
}

#[tokio::test]
async fn should_take_role_from_record_when_staff_accounts_disabled() {
    let uc = without_staff(MockUserRecords::new(vec![
        user_record("uid-a", "a@x.com", "admin", true),
        user_record("uid-b", "b@x.com", "editor", true),
    ]));

    let (admin, _, _) = granted(uc.execute(&identity("uid-a", "a@x.com")).await);
    assert_eq!(admin.role, Role::Admin);

    let (other, staff_profile, _) = granted(uc.execute(&identity("uid-b", "b@x.com")).await);
    assert_eq!(other.role, Role::Staff);
    assert!(staff_profile.is_none());
}

#[tokio::test]
async fn should_deny_missing_user_when_staff_accounts_disabled() {
    let uc = without_staff(MockUserRecords::empty());

    let verdict = uc.execute(&identity("uid-x", "x@x.com")).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::UserNotFound));
}

#[tokio::test]
async fn should_deny_inactive_user_when_staff_accounts_disabled() {
    let uc = without_staff(MockUserRecords::new(vec![user_record(
        "uid-a", "a@x.com", "admin", false,
    )]));

    let verdict = uc.execute(&identity("uid-a", "a@x.com")).await;
    assert_eq!(verdict, Verdict::Denied(DenialReason::AccountInactive));
}

// ── Idempotence ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_same_verdict_for_repeated_sign_ins() {
    let uc = usecase(
        MockUserRecords::empty(),
        MockStaffDirectory::new(vec![staff_record("staff@x.com", StaffStatus::Active)]),
    );
    let id = identity("uid-staff", "staff@x.com");

    let first = uc.execute(&id).await;
    let second = uc.execute(&id).await;
    let third = uc.execute(&id).await;
    assert_eq!(first, second);
    assert_eq!(second, third);
}
