//! Per-tenant plan quotas.
//!
//! Advisory gates evaluated synchronously right before the insert. The
//! count-then-insert sequence is not atomic against concurrent creations from
//! the same tenant; at the boundary count both requests can pass, overrunning
//! the quota by one. Accepted for this workload's concurrency.

use crate::error::ApiError;
use crate::types::Plan;

/// Free tier: one condominium per administradora.
pub const FREE_MAX_CONDOMINIUMS: i64 = 1;

/// Free tier: fifteen units per condominium. Counted per condominium, not
/// per tenant, so sibling condominiums carry independent counters.
pub const FREE_MAX_UNITS_PER_CONDOMINIUM: i64 = 15;

pub fn can_create_condominium(plan: Plan, current_count: i64) -> bool {
    match plan {
        Plan::Free => current_count < FREE_MAX_CONDOMINIUMS,
        Plan::Pro => true,
    }
}

pub fn can_create_unit(plan: Plan, current_count: i64) -> bool {
    match plan {
        Plan::Free => current_count < FREE_MAX_UNITS_PER_CONDOMINIUM,
        Plan::Pro => true,
    }
}

pub fn ensure_condominium_quota(plan: Plan, current_count: i64) -> Result<(), ApiError> {
    if can_create_condominium(plan, current_count) {
        Ok(())
    } else {
        Err(ApiError::plan_limit_exceeded(
            "The free plan allows a single condominium; upgrade to add more",
        ))
    }
}

pub fn ensure_unit_quota(plan: Plan, current_count: i64) -> Result<(), ApiError> {
    if can_create_unit(plan, current_count) {
        Ok(())
    } else {
        Err(ApiError::plan_limit_exceeded(
            "The free plan allows up to 15 units per condominium; upgrade to add more",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_allows_a_single_condominium() {
        assert!(can_create_condominium(Plan::Free, 0));
        assert!(!can_create_condominium(Plan::Free, 1));
        assert!(!can_create_condominium(Plan::Free, 7));
    }

    #[test]
    fn pro_tier_never_rejects_condominiums() {
        for count in [0, 1, 100, 10_000] {
            assert!(can_create_condominium(Plan::Pro, count));
        }
    }

    #[test]
    fn free_tier_permits_fifteenth_unit_but_not_sixteenth() {
        // Creating with 14 existing units yields the 15th: allowed.
        assert!(can_create_unit(Plan::Free, 14));
        // Creating with 15 existing units would be the 16th: rejected.
        assert!(!can_create_unit(Plan::Free, 15));
    }

    #[test]
    fn pro_tier_never_rejects_units() {
        for count in [0, 15, 16, 5_000] {
            assert!(can_create_unit(Plan::Pro, count));
        }
    }

    #[test]
    fn quota_errors_use_plan_limit_code() {
        let err = ensure_condominium_quota(Plan::Free, 1).unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "PLAN_LIMIT_EXCEEDED");

        let err = ensure_unit_quota(Plan::Free, 15).unwrap_err();
        assert_eq!(err.error_code(), "PLAN_LIMIT_EXCEEDED");
    }
}
