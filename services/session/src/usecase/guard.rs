use serde::{Deserialize, Serialize};

use crate::usecase::session::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Portal,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Allow,
    Redirect(Route),
}

/// Decide what a client navigating to `route` should see.
pub fn guard(snapshot: &SessionSnapshot, route: Route, is_super_admin: bool) -> GuardOutcome {
    if snapshot.loading {
        return GuardOutcome::Loading;
    }
    let authorized = snapshot.decision;
    let has_staff_profile = snapshot.staff_profile.is_some();

    match route {
        Route::Login if authorized => {
            if has_staff_profile {
                GuardOutcome::Redirect(Route::Portal)
            } else {
                GuardOutcome::Redirect(Route::Admin)
            }
        }
        Route::Login => GuardOutcome::Allow,
        Route::Portal if !authorized => GuardOutcome::Redirect(Route::Login),
        Route::Portal if is_super_admin => GuardOutcome::Redirect(Route::Admin),
        Route::Portal => GuardOutcome::Allow,
        Route::Admin if !authorized => GuardOutcome::Redirect(Route::Login),
        Route::Admin if !is_super_admin || has_staff_profile => {
            GuardOutcome::Redirect(Route::Portal)
        }
        Route::Admin => GuardOutcome::Allow,
    }
}
