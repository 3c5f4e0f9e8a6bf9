//! Closed module/action vocabulary and per-grant permission overrides.
//!
//! Modules and actions are closed enumerations: referencing an unknown one is
//! a compile-time mistake in this codebase. Stored grants, however, may carry
//! keys an older or newer build wrote, so decoding is lenient: anything not
//! recognized is dropped and can therefore only ever deny.

use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use selldesk_core::{DomainError, DomainResult};

// ─────────────────────────────────────────────────────────────────────────────
// Modules & Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Functional area within an operation that permissions are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Dashboard,
    Orders,
    Products,
    Ads,
    Integrations,
    Settings,
    Team,
}

/// Action on a module, drawn from the closed platform vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Export,
    Invite,
    Manage,
}

impl Module {
    pub const ALL: [Module; 7] = [
        Module::Dashboard,
        Module::Orders,
        Module::Products,
        Module::Ads,
        Module::Integrations,
        Module::Settings,
        Module::Team,
    ];

    /// Actions meaningful for this module. Anything outside this set is never
    /// grantable on the module, regardless of what a stored blob claims.
    pub fn actions(self) -> &'static [Action] {
        use Action::*;
        match self {
            Module::Dashboard => &[View, Export],
            Module::Orders => &[View, Create, Edit, Delete, Export],
            Module::Products => &[View, Create, Edit, Delete, Export],
            Module::Ads => &[View, Create, Edit, Delete],
            Module::Integrations => &[View, Create, Edit, Delete],
            Module::Settings => &[View, Edit],
            Module::Team => &[View, Invite, Manage],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Orders => "orders",
            Module::Products => "products",
            Module::Ads => "ads",
            Module::Integrations => "integrations",
            Module::Settings => "settings",
            Module::Team => "team",
        }
    }
}

impl core::fmt::Display for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Module::Dashboard),
            "orders" => Ok(Module::Orders),
            "products" => Ok(Module::Products),
            "ads" => Ok(Module::Ads),
            "integrations" => Ok(Module::Integrations),
            "settings" => Ok(Module::Settings),
            "team" => Ok(Module::Team),
            other => Err(DomainError::validation(format!("unknown module: {other}"))),
        }
    }
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Export,
        Action::Invite,
        Action::Manage,
    ];

    /// Whether the action mutates state. `view` and `export` are read-only.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Action::View | Action::Export)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Export => "export",
            Action::Invite => "invite",
            Action::Manage => "manage",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Action::View),
            "create" => Ok(Action::Create),
            "edit" => Ok(Action::Edit),
            "delete" => Ok(Action::Delete),
            "export" => Ok(Action::Export),
            "invite" => Ok(Action::Invite),
            "manage" => Ok(Action::Manage),
            other => Err(DomainError::validation(format!("unknown action: {other}"))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Permission Sets
// ─────────────────────────────────────────────────────────────────────────────

/// Action flags within one module. A flag absent from the map is denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionFlags(BTreeMap<Action, bool>);

impl ActionFlags {
    pub fn get(&self, action: Action) -> Option<bool> {
        self.0.get(&action).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, bool)> + '_ {
        self.0.iter().map(|(action, allowed)| (*action, *allowed))
    }

    fn insert(&mut self, action: Action, allowed: bool) {
        self.0.insert(action, allowed);
    }
}

/// Per-grant permission overrides: module → action flags.
///
/// Fail-closed on lookup: a module or action pair absent from the map is
/// denied, never "inherit the role default". An override therefore fully
/// replaces the role baseline, and an empty set denies everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionSet {
    modules: BTreeMap<Module, ActionFlags>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this set grants `action` on `module`.
    ///
    /// Denies when the pair is absent, and unconditionally when the action is
    /// not defined for the module (a stored blob claiming e.g.
    /// `dashboard.create` is malformed and must never grant).
    pub fn allows(&self, module: Module, action: Action) -> bool {
        if !module.actions().contains(&action) {
            return false;
        }
        self.modules
            .get(&module)
            .and_then(|flags| flags.get(action))
            .unwrap_or(false)
    }

    /// Set a flag. Rejects actions not defined for the module.
    pub fn set(&mut self, module: Module, action: Action, allowed: bool) -> DomainResult<()> {
        if !module.actions().contains(&action) {
            return Err(DomainError::validation(format!(
                "action '{action}' is not defined for module '{module}'"
            )));
        }
        self.insert(module, action, allowed);
        Ok(())
    }

    /// Infallible insert for callers that iterate `Module::actions` and are
    /// therefore structurally valid.
    pub(crate) fn insert(&mut self, module: Module, action: Action, allowed: bool) {
        self.modules.entry(module).or_default().insert(action, allowed);
    }

    pub fn module(&self, module: Module) -> Option<&ActionFlags> {
        self.modules.get(&module)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Module, &ActionFlags)> + '_ {
        self.modules.iter().map(|(module, flags)| (*module, flags))
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    /// Lenient decode for stored grants.
    ///
    /// Unknown module keys, unknown action keys, actions not defined for
    /// their module, and non-boolean flag values are dropped. A malformed
    /// blob can narrow access but can never widen it.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;

        let mut set = PermissionSet::new();
        for (module_key, flags) in raw {
            let Ok(module) = module_key.parse::<Module>() else {
                continue;
            };
            let Some(flags) = flags.as_object() else {
                continue;
            };
            let entry = set.modules.entry(module).or_default();
            for (action_key, value) in flags {
                let Ok(action) = action_key.parse::<Action>() else {
                    continue;
                };
                if !module.actions().contains(&action) {
                    continue;
                }
                let Some(allowed) = value.as_bool() else {
                    continue;
                };
                entry.insert(action, allowed);
            }
        }
        Ok(set)
    }
}
