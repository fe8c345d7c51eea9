use api::ApiClient;
use dioxus::prelude::*;
use shared_types::{
    AuthUser, FeatureFlags, NavEvent, NavState, Navigator, OrgNav, Role, Selection,
};

/// Local storage key for the persisted selection snapshot.
pub const SELECTION_KEY: &str = "lms.selection";

/// Global authentication state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            current_user: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    /// Session role; fixed from login until logout.
    pub fn role(&self) -> Option<Role> {
        self.current_user.read().as_ref().map(|u| u.role)
    }

    pub fn set_user(&mut self, user: AuthUser) {
        self.current_user.set(Some(user));
    }

    pub fn clear_auth(&mut self) {
        self.current_user.set(None);
    }
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// The session's navigator: role plus selection. Selector screens write
/// through [`SelectionStore::dispatch`]; everything else only reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionStore {
    navigator: Signal<Option<Navigator>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            navigator: Signal::new(None),
        }
    }

    /// Begin a session for `role`, restoring the last stored selection.
    pub fn start(&mut self, role: Role) {
        self.navigator.set(Some(restore(role, SELECTION_KEY)));
    }

    pub fn is_started(&self) -> bool {
        self.navigator.read().is_some()
    }

    pub fn selection(&self) -> Selection {
        self.navigator
            .read()
            .as_ref()
            .map(|n| n.selection().clone())
            .unwrap_or_default()
    }

    pub fn institute_id(&self) -> Option<String> {
        self.selection().institute_id().map(str::to_string)
    }

    /// Institute and class ids, when both are selected.
    pub fn class_ids(&self) -> Option<(String, String)> {
        let selection = self.selection();
        selection
            .institute_id()
            .zip(selection.class_id())
            .map(|(i, c)| (i.to_string(), c.to_string()))
    }

    /// Resolve what to show for the requested page id.
    pub fn resolve(&self, requested: &str, flags: &FeatureFlags) -> Option<NavState> {
        self.navigator.read().as_ref().map(|n| {
            shared_types::navigator::resolve_state_with(n.role(), requested, n.selection(), |p| {
                flags.page_enabled(p)
            })
        })
    }

    /// Apply one navigator event and persist the resulting selection.
    /// Returns `false` if there is no session or the selection was rejected.
    pub fn dispatch(&mut self, event: NavEvent) -> bool {
        let mut guard = self.navigator.write();
        let Some(nav) = guard.as_mut() else {
            return false;
        };
        apply_persisted(nav, event, SELECTION_KEY)
    }

    /// End the session: clear the selection and forget the navigator.
    /// The stored snapshot goes even when no session was started.
    pub fn end(&mut self) {
        end_session(self.navigator.write().as_mut(), SELECTION_KEY);
        self.navigator.set(None);
    }
}

/// Navigator for `role` over the selection stored under `key`. Snapshots
/// are normalised while loading.
fn restore(role: Role, key: &str) -> Navigator {
    let selection: Selection = api::storage::load_json(key).unwrap_or_default();
    tracing::info!(%role, restored = %selection.breadcrumb(), "session started");
    Navigator::new(role, selection)
}

/// Apply `event` to `nav`; selection changes are written under `key`, and
/// logout removes it. A rejected selection writes nothing.
fn apply_persisted(nav: &mut Navigator, event: NavEvent, key: &str) -> bool {
    let logout = matches!(event, NavEvent::Logout);
    let label = event_label(&event);
    match nav.apply(event) {
        Ok(state) => {
            if label != "navigate" {
                tracing::info!(event = label, ?state, selection = %nav.selection().breadcrumb(), "selection changed");
                if logout {
                    api::storage::remove_item(key);
                } else {
                    api::storage::save_json(key, nav.selection());
                }
            } else {
                tracing::debug!(?state, requested = nav.requested(), "navigated");
            }
            true
        }
        Err(e) => {
            tracing::warn!(event = label, error = %e, "selection rejected");
            false
        }
    }
}

fn end_session(nav: Option<&mut Navigator>, key: &str) {
    if let Some(nav) = nav {
        apply_persisted(nav, NavEvent::Logout, key);
    }
    api::storage::remove_item(key);
}

fn event_label(event: &NavEvent) -> &'static str {
    match event {
        NavEvent::Navigate(_) => "navigate",
        NavEvent::SelectInstitute(_) => "select_institute",
        NavEvent::SelectClass(_) => "select_class",
        NavEvent::SelectSubject(_) => "select_subject",
        NavEvent::SelectChild(_) => "select_child",
        NavEvent::SelectOrganization(_) => "select_organization",
        NavEvent::ChangeSelection(_) => "change_selection",
        NavEvent::Logout => "logout",
    }
}

pub fn use_selection() -> SelectionStore {
    use_context::<SelectionStore>()
}

/// Organization-area navigation and login, independent of the institute
/// selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrgState {
    pub nav: Signal<OrgNav>,
}

impl OrgState {
    pub fn new() -> Self {
        Self {
            nav: Signal::new(OrgNav::new()),
        }
    }
}

pub fn use_org() -> OrgState {
    use_context::<OrgState>()
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Log out everywhere: token, selection, organization login, user.
pub fn sign_out(api: &ApiClient, mut auth: AuthState, mut store: SelectionStore, mut org: OrgState) {
    api.logout();
    store.end();
    org.nav.write().reset();
    auth.clear_auth();
}
