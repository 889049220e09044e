//! Navigation gates: pure predicates over the session status, no IO and no
//! navigation history. Screens ask before entering a region; the gate only
//! says allow or where to go instead.
use crate::model::SessionStatus;

/// Where a redirected visitor is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allow,
    Redirect(Destination),
}

/// Guards the login/signup screens: an authenticated user has no business
/// there and goes home.
pub fn guest_gate(status: SessionStatus) -> Gate {
    match status {
        SessionStatus::Authenticated => Gate::Redirect(Destination::Home),
        _ => Gate::Allow,
    }
}

/// Guards everything else: anyone not authenticated goes to the login
/// entry point. `Pending` and `Failed` count as not authenticated.
pub fn protected_gate(status: SessionStatus) -> Gate {
    match status {
        SessionStatus::Authenticated => Gate::Allow,
        _ => Gate::Redirect(Destination::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_enters_guest_screens_only() {
        assert_eq!(guest_gate(SessionStatus::Anonymous), Gate::Allow);
        assert_eq!(
            protected_gate(SessionStatus::Anonymous),
            Gate::Redirect(Destination::Login)
        );
    }

    #[test]
    fn authenticated_enters_protected_screens_only() {
        assert_eq!(
            guest_gate(SessionStatus::Authenticated),
            Gate::Redirect(Destination::Home)
        );
        assert_eq!(protected_gate(SessionStatus::Authenticated), Gate::Allow);
    }

    #[test]
    fn pending_and_failed_count_as_not_authenticated() {
        for status in [SessionStatus::Pending, SessionStatus::Failed] {
            assert_eq!(guest_gate(status), Gate::Allow);
            assert_eq!(
                protected_gate(status),
                Gate::Redirect(Destination::Login)
            );
        }
    }
}
