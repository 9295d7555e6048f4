use vivexa_domain::staff::StaffStatus;

use vivexa_session::usecase::authorizer::AuthChange;
use vivexa_session::usecase::guard::{GuardOutcome, Route, guard};
use vivexa_session::usecase::session::SessionStore;

use crate::helpers::{
    MockIdentityProvider, MockStaffDirectory, MockUserRecords, RecordingNotifier,
    SUPER_ADMIN_EMAIL, authorizer, identity, staff_record,
};

#[tokio::test]
async fn should_route_super_admin_to_admin() {
    let auth = authorizer(
        MockUserRecords::empty(),
        MockStaffDirectory::empty(),
        MockIdentityProvider::default(),
    );
    let store = SessionStore::new();
    let snapshot = auth
        .on_auth_change(
            &store,
            &RecordingNotifier::default(),
            AuthChange::SignedIn(identity("uid-owner", SUPER_ADMIN_EMAIL)),
        )
        .await;
    let admin = auth.is_super_admin(&snapshot);

    assert_eq!(
        guard(&snapshot, Route::Login, admin),
        GuardOutcome::Redirect(Route::Admin)
    );
    assert_eq!(
        guard(&snapshot, Route::Portal, admin),
        GuardOutcome::Redirect(Route::Admin)
    );
    assert_eq!(guard(&snapshot, Route::Admin, admin), GuardOutcome::Allow);
}

#[tokio::test]
async fn should_route_staff_to_portal() {
    let auth = authorizer(
        MockUserRecords::empty(),
        MockStaffDirectory::new(vec![staff_record("staff@x.com", StaffStatus::Active)]),
        MockIdentityProvider::default(),
    );
    let store = SessionStore::new();
    let snapshot = auth
        .on_auth_change(
            &store,
            &RecordingNotifier::default(),
            AuthChange::SignedIn(identity("uid-staff", "staff@x.com")),
        )
        .await;
    let admin = auth.is_super_admin(&snapshot);

    assert!(!admin);
    assert_eq!(
        guard(&snapshot, Route::Login, admin),
        GuardOutcome::Redirect(Route::Portal)
    );
    assert_eq!(guard(&snapshot, Route::Portal, admin), GuardOutcome::Allow);
    assert_eq!(
        guard(&snapshot, Route::Admin, admin),
        GuardOutcome::Redirect(Route::Portal)
    );
}

#[tokio::test]
async fn should_route_denied_identity_to_login() {
    let auth = authorizer(
        MockUserRecords::empty(),
        MockStaffDirectory::empty(),
        MockIdentityProvider::default(),
    );
    let store = SessionStore::new();
    let snapshot = auth
        .on_auth_change(
            &store,
            &RecordingNotifier::default(),
            AuthChange::SignedIn(identity("uid-x", "nobody@x.com")),
        )
        .await;
    let admin = auth.is_super_admin(&snapshot);

    assert_eq!(guard(&snapshot, Route::Login, admin), GuardOutcome::Allow);
    assert_eq!(
        guard(&snapshot, Route::Portal, admin),
        GuardOutcome::Redirect(Route::Login)
    );
    assert_eq!(
        guard(&snapshot, Route::Admin, admin),
        GuardOutcome::Redirect(Route::Login)
    );
}

#[test]
fn should_hold_every_route_while_resolving() {
    let store = SessionStore::new();
    store.begin(identity("uid-owner", SUPER_ADMIN_EMAIL));
    let snapshot = store.snapshot();

    for route in [Route::Login, Route::Portal, Route::Admin] {
        assert_eq!(guard(&snapshot, route, true), GuardOutcome::Loading);
    }
}
