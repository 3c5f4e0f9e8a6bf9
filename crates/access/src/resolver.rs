//! Pure permission resolution.

use selldesk_core::OperationId;

use crate::grant::OperationRole;
use crate::identity::Identity;
use crate::permissions::{Action, Module};
use crate::store::{AccessStore, AccessStoreError};

/// Pure decision function over the grant state.
///
/// No side effects; safe to call concurrently and repeatedly. For a fixed
/// grant state, `resolve` is idempotent. The store is constructor-injected:
/// the decision path performs no ambient lookups, which keeps the resolver
/// independently testable.
#[derive(Debug)]
pub struct PermissionResolver<S> {
    store: S,
}

impl<S: AccessStore> PermissionResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Decide whether `identity` may perform `action` on `module` within the
    /// operation.
    ///
    /// Strict order:
    /// 1. Platform `admin`/`super_admin`: allow. The store is not consulted;
    ///    platform roles are a global override independent of tenant state.
    /// 2. No grant for `(user, operation)`: deny. Absence of a grant is
    ///    equivalent to explicit denial.
    /// 3. Operation `owner`/`admin`: allow for every module/action. The role
    ///    dominates any stale `permissions` blob, so an owner cannot be
    ///    narrowed by leftover customization.
    /// 4. Viewer without customization: allow exactly `view`.
    /// 5. Viewer with customization: the override fully replaces the
    ///    baseline. Missing pairs deny; they do not fall back to step 4.
    ///
    /// A store fault is returned as `Err`; callers must treat it as denial.
    pub fn resolve(
        &self,
        identity: &Identity,
        operation_id: OperationId,
        module: Module,
        action: Action,
    ) -> Result<bool, AccessStoreError> {
        if identity.platform_role.bypasses_operation_checks() {
            return Ok(true);
        }

        let Some(grant) = self.store.grant_for(identity.user_id, operation_id)? else {
            return Ok(false);
        };

        Ok(match grant.role {
            OperationRole::Owner | OperationRole::Admin => true,
            OperationRole::Viewer => match &grant.permissions {
                None => action == Action::View,
                Some(overrides) => overrides.allows(module, action),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use selldesk_core::UserId;

    use crate::grant::AccessGrant;
    use crate::identity::PlatformRole;
    use crate::permissions::PermissionSet;

    /// Serves one fixed grant, keyed correctly.
    struct FixedStore {
        grant: Option<AccessGrant>,
    }

    impl AccessStore for FixedStore {
        fn grant_for(
            &self,
            user_id: UserId,
            operation_id: OperationId,
        ) -> Result<Option<AccessGrant>, AccessStoreError> {
            Ok(self
                .grant
                .clone()
                .filter(|g| g.user_id == user_id && g.operation_id == operation_id))
        }
    }

    /// Fails the test if the store is consulted at all.
    struct UntouchableStore;

    impl AccessStore for UntouchableStore {
        fn grant_for(
            &self,
            _user_id: UserId,
            _operation_id: OperationId,
        ) -> Result<Option<AccessGrant>, AccessStoreError> {
            panic!("the store must not be consulted on this path");
        }
    }

    struct FailingStore;

    impl AccessStore for FailingStore {
        fn grant_for(
            &self,
            _user_id: UserId,
            _operation_id: OperationId,
        ) -> Result<Option<AccessGrant>, AccessStoreError> {
            Err(AccessStoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn viewer_grant(
        user_id: UserId,
        operation_id: OperationId,
        permissions: Option<PermissionSet>,
    ) -> AccessGrant {
        AccessGrant {
            user_id,
            operation_id,
            role: OperationRole::Viewer,
            permissions,
        }
    }

    #[test]
    fn platform_roles_allow_everything_without_touching_the_store() {
        let resolver = PermissionResolver::new(UntouchableStore);
        let operation_id = OperationId::new();

        for platform_role in [PlatformRole::Admin, PlatformRole::SuperAdmin] {
            let identity = Identity::new(UserId::new(), platform_role);
            for module in Module::ALL {
                for &action in module.actions() {
                    assert!(resolver
                        .resolve(&identity, operation_id, module, action)
                        .unwrap());
                }
            }
        }
    }

    #[test]
    fn missing_grant_denies_everything() {
        let resolver = PermissionResolver::new(FixedStore { grant: None });
        let identity = Identity::user(UserId::new());
        let operation_id = OperationId::new();

        for module in Module::ALL {
            for &action in module.actions() {
                assert!(!resolver
                    .resolve(&identity, operation_id, module, action)
                    .unwrap());
            }
        }
    }

    #[test]
    fn owner_role_dominates_a_narrowing_override() {
        let user_id = UserId::new();
        let operation_id = OperationId::new();

        let mut overrides = PermissionSet::new();
        overrides.set(Module::Orders, Action::Create, false).unwrap();

        let grant = AccessGrant {
            user_id,
            operation_id,
            role: OperationRole::Owner,
            permissions: Some(overrides),
        };
        let resolver = PermissionResolver::new(FixedStore { grant: Some(grant) });
        let identity = Identity::user(user_id);

        assert!(resolver
            .resolve(&identity, operation_id, Module::Orders, Action::Create)
            .unwrap());
    }

    #[test]
    fn viewer_without_override_is_view_only() {
        let user_id = UserId::new();
        let operation_id = OperationId::new();
        let grant = viewer_grant(user_id, operation_id, None);
        let resolver = PermissionResolver::new(FixedStore { grant: Some(grant) });
        let identity = Identity::user(user_id);

        for module in Module::ALL {
            for &action in module.actions() {
                let allowed = resolver
                    .resolve(&identity, operation_id, module, action)
                    .unwrap();
                assert_eq!(allowed, action == Action::View, "{module}.{action}");
            }
        }
    }

    #[test]
    fn viewer_with_empty_override_loses_view() {
        // Deliberate fail-closed behavior: an empty customization fully
        // replaces the view-only baseline. See DESIGN.md open question 1.
        let user_id = UserId::new();
        let operation_id = OperationId::new();
        let grant = viewer_grant(user_id, operation_id, Some(PermissionSet::new()));
        let resolver = PermissionResolver::new(FixedStore { grant: Some(grant) });
        let identity = Identity::user(user_id);

        assert!(!resolver
            .resolve(&identity, operation_id, Module::Orders, Action::View)
            .unwrap());
    }

    #[test]
    fn viewer_override_fully_replaces_the_baseline() {
        let user_id = UserId::new();
        let operation_id = OperationId::new();

        let mut overrides = PermissionSet::new();
        overrides.set(Module::Orders, Action::Create, true).unwrap();

        let grant = viewer_grant(user_id, operation_id, Some(overrides));
        let resolver = PermissionResolver::new(FixedStore { grant: Some(grant) });
        let identity = Identity::user(user_id);

        assert!(resolver
            .resolve(&identity, operation_id, Module::Orders, Action::Create)
            .unwrap());
        // View was not explicitly re-granted, so it is gone.
        assert!(!resolver
            .resolve(&identity, operation_id, Module::Orders, Action::View)
            .unwrap());
    }

    #[test]
    fn grant_for_another_operation_does_not_leak() {
        let user_id = UserId::new();
        let granted_operation = OperationId::new();
        let other_operation = OperationId::new();
        let grant = AccessGrant::new(user_id, granted_operation, OperationRole::Owner);
        let resolver = PermissionResolver::new(FixedStore { grant: Some(grant) });
        let identity = Identity::user(user_id);

        assert!(resolver
            .resolve(&identity, granted_operation, Module::Orders, Action::Delete)
            .unwrap());
        assert!(!resolver
            .resolve(&identity, other_operation, Module::Orders, Action::Delete)
            .unwrap());
    }

    #[test]
    fn store_fault_propagates_instead_of_allowing() {
        let resolver = PermissionResolver::new(FailingStore);
        let identity = Identity::user(UserId::new());

        let result = resolver.resolve(&identity, OperationId::new(), Module::Orders, Action::View);
        assert!(matches!(result, Err(AccessStoreError::Unavailable(_))));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_module() -> impl Strategy<Value = Module> {
            prop::sample::select(Module::ALL.to_vec())
        }

        fn arb_action() -> impl Strategy<Value = Action> {
            prop::sample::select(Action::ALL.to_vec())
        }

        fn arb_role() -> impl Strategy<Value = OperationRole> {
            prop::sample::select(OperationRole::ALL.to_vec())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: resolution is idempotent for a fixed grant state.
            #[test]
            fn resolve_is_deterministic(
                module in arb_module(),
                action in arb_action(),
                role in arb_role(),
                customized in any::<bool>(),
                flag in any::<bool>(),
            ) {
                let user_id = UserId::new();
                let operation_id = OperationId::new();

                let permissions = customized.then(|| {
                    let mut set = PermissionSet::new();
                    if module.actions().contains(&action) {
                        set.set(module, action, flag).unwrap();
                    }
                    set
                });

                let grant = AccessGrant { user_id, operation_id, role, permissions };
                let resolver = PermissionResolver::new(FixedStore { grant: Some(grant) });
                let identity = Identity::user(user_id);

                let first = resolver.resolve(&identity, operation_id, module, action).unwrap();
                for _ in 0..3 {
                    prop_assert_eq!(
                        resolver.resolve(&identity, operation_id, module, action).unwrap(),
                        first
                    );
                }
            }

            /// Property: owners and admins are never narrowed by overrides.
            #[test]
            fn operation_admin_roles_ignore_overrides(
                module in arb_module(),
                action in arb_action(),
                admin_role in prop::sample::select(vec![OperationRole::Owner, OperationRole::Admin]),
                flag in any::<bool>(),
            ) {
                prop_assume!(module.actions().contains(&action));

                let user_id = UserId::new();
                let operation_id = OperationId::new();

                let mut overrides = PermissionSet::new();
                overrides.set(module, action, flag).unwrap();

                let grant = AccessGrant {
                    user_id,
                    operation_id,
                    role: admin_role,
                    permissions: Some(overrides),
                };
                let resolver = PermissionResolver::new(FixedStore { grant: Some(grant) });
                let identity = Identity::user(user_id);

                prop_assert!(resolver.resolve(&identity, operation_id, module, action).unwrap());
            }

            /// Property: platform roles allow regardless of grant state, and
            /// the store double proves the fast path never reads it.
            #[test]
            fn platform_roles_dominate_grant_state(
                module in arb_module(),
                action in arb_action(),
                platform_role in prop::sample::select(vec![PlatformRole::Admin, PlatformRole::SuperAdmin]),
            ) {
                let resolver = PermissionResolver::new(UntouchableStore);
                let identity = Identity::new(UserId::new(), platform_role);

                prop_assert!(resolver.resolve(&identity, OperationId::new(), module, action).unwrap());
            }
        }
    }
}
