//! Tenant-scoped access guard.
//!
//! Every condominium-scoped handler resolves its target record first (404
//! before any access evaluation, so error codes never reveal existence) and
//! then calls the two predicates here. Board members are bound to exactly one
//! condominium and are read-only; administrator and operator users are scoped
//! to every condominium owned by their administradora.

use uuid::Uuid;

use crate::database::models::condominium::Condominium;
use crate::error::ApiError;
use crate::types::{Plan, Role};

/// Authenticated actor as seen by the guard, reconstructed from JWT claims
/// by the auth middleware.
#[derive(Clone, Debug)]
pub struct Actor {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    /// Owning tenant for administrator/operator users.
    pub administrator_id: Option<Uuid>,
    /// Set only for board members.
    pub condominium_id: Option<Uuid>,
    pub plan: Plan,
}

/// Whether the actor may see the given condominium and anything scoped under it.
pub fn can_access(actor: &Actor, condominium: &Condominium) -> bool {
    match actor.role {
        Role::BoardMember => actor.condominium_id == Some(condominium.id),
        Role::Administrator | Role::Operator => match (actor.administrator_id, condominium.administrator_id) {
            (Some(actor_tenant), Some(owner)) => actor_tenant == owner,
            // A condominium without an owner is visible to nobody; an actor
            // without a tenant can see nothing.
            _ => false,
        },
    }
}

/// Whether the actor may perform mutating operations at all.
/// Board members are read-only across every resource type.
pub fn can_mutate(actor: &Actor) -> bool {
    match actor.role {
        Role::Administrator | Role::Operator => true,
        Role::BoardMember => false,
    }
}

/// Guard helper: `Forbidden` unless the actor is scoped to the condominium.
pub fn ensure_access(actor: &Actor, condominium: &Condominium) -> Result<(), ApiError> {
    if can_access(actor, condominium) {
        Ok(())
    } else {
        Err(ApiError::forbidden("You do not have access to this condominium"))
    }
}

/// Guard helper: `Forbidden` unless the actor's role allows writes.
pub fn ensure_mutate(actor: &Actor) -> Result<(), ApiError> {
    if can_mutate(actor) {
        Ok(())
    } else {
        Err(ApiError::forbidden("This role is read-only"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn condominium(id: Uuid, administrator_id: Option<Uuid>) -> Condominium {
        Condominium {
            id,
            name: "Residencial Aurora".to_string(),
            tax_id: None,
            address: None,
            administrator_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn actor(role: Role, administrator_id: Option<Uuid>, condominium_id: Option<Uuid>) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
            administrator_id,
            condominium_id,
            plan: Plan::Free,
        }
    }

    #[test]
    fn board_member_access_is_exact_condominium_match() {
        let condo_id = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let target = condominium(condo_id, Some(tenant));

        let bound = actor(Role::BoardMember, None, Some(condo_id));
        assert!(can_access(&bound, &target));

        let other = actor(Role::BoardMember, None, Some(Uuid::new_v4()));
        assert!(!can_access(&other, &target));

        // A board member without an assigned condominium sees nothing,
        // even one whose tenant would otherwise match.
        let unbound = actor(Role::BoardMember, Some(tenant), None);
        assert!(!can_access(&unbound, &target));
    }

    #[test]
    fn tenant_roles_require_matching_administrator() {
        let tenant = Uuid::new_v4();
        let target = condominium(Uuid::new_v4(), Some(tenant));

        for role in [Role::Administrator, Role::Operator] {
            let same_tenant = actor(role, Some(tenant), None);
            assert!(can_access(&same_tenant, &target));

            let other_tenant = actor(role, Some(Uuid::new_v4()), None);
            assert!(!can_access(&other_tenant, &target));

            let no_tenant = actor(role, None, None);
            assert!(!can_access(&no_tenant, &target));
        }
    }

    #[test]
    fn ownerless_condominium_is_inaccessible_to_tenant_roles() {
        let orphan = condominium(Uuid::new_v4(), None);
        let admin = actor(Role::Administrator, Some(Uuid::new_v4()), None);
        assert!(!can_access(&admin, &orphan));
    }

    #[test]
    fn only_tenant_roles_may_mutate() {
        assert!(can_mutate(&actor(Role::Administrator, Some(Uuid::new_v4()), None)));
        assert!(can_mutate(&actor(Role::Operator, Some(Uuid::new_v4()), None)));
        assert!(!can_mutate(&actor(Role::BoardMember, None, Some(Uuid::new_v4()))));
    }

    #[test]
    fn board_member_cannot_reach_sibling_condominium() {
        // Actor bound to C9 must not access C1 even within the same tenant.
        let tenant = Uuid::new_v4();
        let c9 = Uuid::new_v4();
        let c1 = condominium(Uuid::new_v4(), Some(tenant));

        let sindico = actor(Role::BoardMember, None, Some(c9));
        assert!(!can_access(&sindico, &c1));
        assert!(ensure_access(&sindico, &c1).is_err());
        assert!(ensure_mutate(&sindico).is_err());
    }

    #[test]
    fn ensure_helpers_map_to_forbidden() {
        let target = condominium(Uuid::new_v4(), Some(Uuid::new_v4()));
        let outsider = actor(Role::Operator, Some(Uuid::new_v4()), None);

        let err = ensure_access(&outsider, &target).unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
    }
}
