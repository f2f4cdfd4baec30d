//! Cargo batch status machine.
//!
//! Every transition applies to the batch as a whole. The machine only decides
//! whether a transition is legal; the service applies it inside one transaction.

use rust_decimal::Decimal;

use crate::domain::actor::Actor;
use crate::domain::status::{CargoStatus, ContainerStatus, PaymentMethod};
use crate::error::{ApiError, ApiResult};

pub const DISTRIBUTED_NOTE: &str = "Paid and distributed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CargoTransition {
    /// Plain status overwrite with a history row.
    Relabel { from: CargoStatus, to: CargoStatus },
    /// Hand-over against payment: freezes the storage fee and records revenue.
    Distribute {
        from: CargoStatus,
        payment_method: PaymentMethod,
    },
    /// Admin-only undo of a distribution; deletes the batch's revenue rows.
    Reverse { reason: String },
}

impl CargoTransition {
    pub fn from_status(&self) -> CargoStatus {
        match self {
            CargoTransition::Relabel { from, .. } => *from,
            CargoTransition::Distribute { from, .. } => *from,
            CargoTransition::Reverse { .. } => CargoStatus::Distributed,
        }
    }

    pub fn to_status(&self) -> CargoStatus {
        match self {
            CargoTransition::Relabel { to, .. } => *to,
            CargoTransition::Distribute { .. } => CargoStatus::Distributed,
            CargoTransition::Reverse { .. } => CargoStatus::PendingDistribution,
        }
    }
}

fn require_payment_method(payment_method: Option<PaymentMethod>) -> ApiResult<PaymentMethod> {
    payment_method.ok_or_else(|| {
        ApiError::ValidationError("payment_method is required to distribute cargo".to_string())
    })
}

/// Dedicated distribution path.
pub fn plan_distribution(
    current: CargoStatus,
    payment_method: Option<PaymentMethod>,
) -> ApiResult<CargoTransition> {
    let payment_method = require_payment_method(payment_method)?;
    if current == CargoStatus::Distributed {
        return Err(ApiError::InvalidState(
            "cargo has already been distributed".to_string(),
        ));
    }
    Ok(CargoTransition::Distribute {
        from: current,
        payment_method,
    })
}

/// Generic status change.
///
/// A distributed batch is locked here and can only go back through
/// [`plan_reversal`]. Moving to `pending_distribution` is reserved for
/// containers already in their distribution phase.
pub fn plan_status_change(
    current: CargoStatus,
    target: CargoStatus,
    payment_method: Option<PaymentMethod>,
    container_status: ContainerStatus,
) -> ApiResult<CargoTransition> {
    if current == CargoStatus::Distributed {
        return Err(ApiError::InvalidState(
            "a distributed batch can only be changed by reversing the distribution".to_string(),
        ));
    }
    if current == target {
        return Err(ApiError::InvalidState(format!("cargo is already {current}")));
    }
    match target {
        CargoStatus::Distributed => plan_distribution(current, payment_method),
        CargoStatus::PendingDistribution if !container_status.is_distribution_phase() => {
            Err(ApiError::InvalidState(format!(
                "cargo becomes pending distribution only once its container is distributing (container is {container_status})"
            )))
        }
        _ => Ok(CargoTransition::Relabel {
            from: current,
            to: target,
        }),
    }
}

/// Admin-only reversal of a distribution.
pub fn plan_reversal(current: CargoStatus, actor: &Actor, reason: &str) -> ApiResult<CargoTransition> {
    actor.require_system_admin("reverse a distribution")?;
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ApiError::ValidationError(
            "a reason is required to reverse a distribution".to_string(),
        ));
    }
    if current != CargoStatus::Distributed {
        return Err(ApiError::InvalidState(format!(
            "only distributed cargo can be reversed (status is {current})"
        )));
    }
    Ok(CargoTransition::Reverse {
        reason: reason.to_string(),
    })
}

/// History note of a reversal. Keeps the deleted ledger amount on record.
pub fn reversal_note(reason: &str, deleted_records: u64, deleted_amount: Decimal) -> String {
    format!("{reason} (reversed {deleted_records} payment record(s), total {deleted_amount})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_distribution_requires_payment_method() {
        let result = plan_distribution(CargoStatus::PendingDistribution, None);
        assert!(matches!(result, Err(ApiError::ValidationError(_))));

        let generic = plan_status_change(
            CargoStatus::PendingDistribution,
            CargoStatus::Distributed,
            None,
            ContainerStatus::OpenDistribution,
        );
        assert!(matches!(generic, Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn test_distribute_from_any_open_status() {
        for status in [
            CargoStatus::Registered,
            CargoStatus::PendingDistribution,
            CargoStatus::OnHold,
            CargoStatus::CustomsProcessing,
        ] {
            let plan = plan_distribution(status, Some(PaymentMethod::Cash)).unwrap();
            assert_eq!(plan.from_status(), status);
            assert_eq!(plan.to_status(), CargoStatus::Distributed);
        }
    }

    #[test]
    fn test_cannot_distribute_twice() {
        let dedicated = plan_distribution(CargoStatus::Distributed, Some(PaymentMethod::Transfer));
        assert!(matches!(dedicated, Err(ApiError::InvalidState(_))));

        let generic = plan_status_change(
            CargoStatus::Distributed,
            CargoStatus::Distributed,
            Some(PaymentMethod::Transfer),
            ContainerStatus::OpenDistribution,
        );
        assert!(matches!(generic, Err(ApiError::InvalidState(_))));
    }

    #[test]
    fn test_distributed_batch_is_locked_for_generic_change() {
        let result = plan_status_change(
            CargoStatus::Distributed,
            CargoStatus::PendingDistribution,
            None,
            ContainerStatus::OpenDistribution,
        );
        assert!(matches!(result, Err(ApiError::InvalidState(_))));
    }

    #[test]
    fn test_pending_requires_distributing_container() {
        let early = plan_status_change(
            CargoStatus::Registered,
            CargoStatus::PendingDistribution,
            None,
            ContainerStatus::OpenRegistration,
        );
        assert!(matches!(early, Err(ApiError::InvalidState(_))));

        let late = plan_status_change(
            CargoStatus::OnHold,
            CargoStatus::PendingDistribution,
            None,
            ContainerStatus::OpenDistribution,
        )
        .unwrap();
        assert_eq!(
            late,
            CargoTransition::Relabel {
                from: CargoStatus::OnHold,
                to: CargoStatus::PendingDistribution
            }
        );
    }

    #[test]
    fn test_side_branches() {
        let hold = plan_status_change(
            CargoStatus::Registered,
            CargoStatus::OnHold,
            None,
            ContainerStatus::OpenRegistration,
        )
        .unwrap();
        assert_eq!(hold.to_status(), CargoStatus::OnHold);

        let same = plan_status_change(
            CargoStatus::OnHold,
            CargoStatus::OnHold,
            None,
            ContainerStatus::OpenRegistration,
        );
        assert!(matches!(same, Err(ApiError::InvalidState(_))));
    }

    #[test]
    fn test_reversal_rules() {
        let admin = Actor::system_admin(Uuid::new_v4());
        let staff = Actor::staff(Uuid::new_v4());

        let plan = plan_reversal(CargoStatus::Distributed, &admin, "  wrong price ").unwrap();
        assert_eq!(
            plan,
            CargoTransition::Reverse {
                reason: "wrong price".to_string()
            }
        );
        assert_eq!(plan.from_status(), CargoStatus::Distributed);
        assert_eq!(plan.to_status(), CargoStatus::PendingDistribution);

        assert!(matches!(
            plan_reversal(CargoStatus::Distributed, &staff, "wrong price"),
            Err(ApiError::Forbidden(_))
        ));
        assert!(matches!(
            plan_reversal(CargoStatus::Distributed, &admin, "   "),
            Err(ApiError::ValidationError(_))
        ));
        assert!(matches!(
            plan_reversal(CargoStatus::PendingDistribution, &admin, "wrong price"),
            Err(ApiError::InvalidState(_))
        ));
    }

    #[test]
    fn test_reversal_note_keeps_amount() {
        let note = reversal_note("wrong price", 1, Decimal::new(1250050, 2));
        assert_eq!(note, "wrong price (reversed 1 payment record(s), total 12500.50)");
    }
}
