//! Container status machine and the distribution-start cascade.

use uuid::Uuid;

use crate::domain::status::{CargoStatus, ContainerStatus};
use crate::error::{ApiError, ApiResult};

impl ContainerStatus {
    /// Cargo may only be registered while the container is open for registration.
    pub fn accepts_registration(&self) -> bool {
        matches!(self, ContainerStatus::OpenRegistration)
    }

    /// Statuses in which the container's cargo is being handed out.
    pub fn is_distribution_phase(&self) -> bool {
        matches!(
            self,
            ContainerStatus::OpenDistribution
                | ContainerStatus::Distributing
                | ContainerStatus::Completed
        )
    }

    pub fn can_start_distribution(&self) -> bool {
        matches!(
            self,
            ContainerStatus::OpenRegistration
                | ContainerStatus::ClosedFull
                | ContainerStatus::ClosedShipped
        )
    }

    /// Transitions reachable through a plain status change.
    ///
    /// `OpenDistribution` is absent on purpose: it is only entered through
    /// [`plan_start_distribution`], which also moves the cargo.
    pub fn can_transition_to(&self, target: ContainerStatus) -> bool {
        use ContainerStatus::*;
        matches!(
            (self, target),
            (OpenRegistration, ClosedFull)
                | (OpenRegistration, ClosedShipped)
                | (ClosedFull, OpenRegistration)
                | (ClosedFull, ClosedShipped)
                | (OpenDistribution, Distributing)
                | (OpenDistribution, Completed)
                | (Distributing, Completed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerTransition {
    /// Status overwrite with a history row and no effect on cargo.
    Relabel {
        from: ContainerStatus,
        to: ContainerStatus,
    },
    /// Entry into `open_distribution`, cascading to the cargo.
    StartDistribution { from: ContainerStatus },
}

impl ContainerTransition {
    pub fn from_status(&self) -> ContainerStatus {
        match self {
            ContainerTransition::Relabel { from, .. } => *from,
            ContainerTransition::StartDistribution { from } => *from,
        }
    }

    pub fn to_status(&self) -> ContainerStatus {
        match self {
            ContainerTransition::Relabel { to, .. } => *to,
            ContainerTransition::StartDistribution { .. } => ContainerStatus::OpenDistribution,
        }
    }
}

pub fn plan_start_distribution(current: ContainerStatus) -> ApiResult<ContainerTransition> {
    if current == ContainerStatus::OpenDistribution {
        return Err(ApiError::InvalidState(
            "distribution has already started for this container".to_string(),
        ));
    }
    if !current.can_start_distribution() {
        return Err(ApiError::InvalidState(format!(
            "cannot start distribution from status {current}"
        )));
    }
    Ok(ContainerTransition::StartDistribution { from: current })
}

/// Plans a status change requested by a user.
///
/// A request for `open_distribution` is routed through the distribution start.
pub fn plan_container_status_change(
    current: ContainerStatus,
    target: ContainerStatus,
) -> ApiResult<ContainerTransition> {
    if target == ContainerStatus::OpenDistribution {
        return plan_start_distribution(current);
    }
    if current == target {
        return Err(ApiError::InvalidState(format!(
            "container is already {current}"
        )));
    }
    if !current.can_transition_to(target) {
        return Err(ApiError::InvalidState(format!(
            "container cannot move from {current} to {target}"
        )));
    }
    Ok(ContainerTransition::Relabel {
        from: current,
        to: target,
    })
}

pub fn require_registration_open(status: ContainerStatus) -> ApiResult<()> {
    if status.accepts_registration() {
        Ok(())
    } else {
        Err(ApiError::InvalidState(format!(
            "container is closed for registration (status {status})"
        )))
    }
}

/// A batch as seen by the distribution cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeCandidate {
    pub batch_id: Uuid,
    pub batch_number: String,
    pub status: CargoStatus,
    pub total_pieces: i32,
}

/// What starting distribution does to a container's cargo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionCascade {
    /// Batches moved to `pending_distribution`, with their previous status.
    pub moved: Vec<CascadeCandidate>,
    pub untouched_batches: usize,
    pub total_batches: usize,
    pub moved_pieces: i64,
    pub total_pieces: i64,
}

impl DistributionCascade {
    /// Every batch not yet distributed moves; distributed batches keep their frozen snapshot.
    pub fn plan(candidates: Vec<CascadeCandidate>) -> Self {
        let total_batches = candidates.len();
        let total_pieces = candidates.iter().map(|c| i64::from(c.total_pieces)).sum();
        let moved: Vec<CascadeCandidate> = candidates
            .into_iter()
            .filter(|c| c.status != CargoStatus::Distributed)
            .collect();
        let moved_pieces = moved.iter().map(|c| i64::from(c.total_pieces)).sum();
        Self {
            untouched_batches: total_batches - moved.len(),
            total_batches,
            moved_pieces,
            total_pieces,
            moved,
        }
    }

    pub fn batch_note(candidate: &CascadeCandidate) -> String {
        format!(
            "Distribution started: {} pieces moved to pending distribution",
            candidate.total_pieces
        )
    }

    pub fn container_note(&self) -> String {
        format!(
            "Distribution started: {} of {} cargo pieces updated ({} of {} batches)",
            self.moved_pieces,
            self.total_pieces,
            self.moved.len(),
            self.total_batches
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(number: &str, status: CargoStatus, pieces: i32) -> CascadeCandidate {
        CascadeCandidate {
            batch_id: Uuid::new_v4(),
            batch_number: number.to_string(),
            status,
            total_pieces: pieces,
        }
    }

    #[test]
    fn test_start_distribution_only_once() {
        let first = plan_start_distribution(ContainerStatus::OpenRegistration).unwrap();
        assert_eq!(first.to_status(), ContainerStatus::OpenDistribution);

        let second = plan_start_distribution(first.to_status());
        assert!(matches!(second, Err(ApiError::InvalidState(_))));
    }

    #[test]
    fn test_start_distribution_from_closed_states() {
        assert!(plan_start_distribution(ContainerStatus::ClosedFull).is_ok());
        assert!(plan_start_distribution(ContainerStatus::ClosedShipped).is_ok());
        assert!(plan_start_distribution(ContainerStatus::Distributing).is_err());
        assert!(plan_start_distribution(ContainerStatus::Completed).is_err());
    }

    #[test]
    fn test_generic_change_routes_open_distribution_to_cascade() {
        let plan = plan_container_status_change(
            ContainerStatus::ClosedShipped,
            ContainerStatus::OpenDistribution,
        )
        .unwrap();

        assert_eq!(
            plan,
            ContainerTransition::StartDistribution {
                from: ContainerStatus::ClosedShipped
            }
        );
    }

    #[test]
    fn test_generic_change_allow_list() {
        assert!(plan_container_status_change(
            ContainerStatus::OpenRegistration,
            ContainerStatus::ClosedFull
        )
        .is_ok());
        assert!(plan_container_status_change(
            ContainerStatus::OpenDistribution,
            ContainerStatus::Completed
        )
        .is_ok());
        assert!(matches!(
            plan_container_status_change(
                ContainerStatus::Completed,
                ContainerStatus::OpenRegistration
            ),
            Err(ApiError::InvalidState(_))
        ));
        assert!(matches!(
            plan_container_status_change(
                ContainerStatus::ClosedFull,
                ContainerStatus::ClosedFull
            ),
            Err(ApiError::InvalidState(_))
        ));
    }

    #[test]
    fn test_registration_requires_open_container() {
        assert!(require_registration_open(ContainerStatus::OpenRegistration).is_ok());
        for status in [
            ContainerStatus::OpenDistribution,
            ContainerStatus::ClosedFull,
            ContainerStatus::ClosedShipped,
            ContainerStatus::Distributing,
            ContainerStatus::Completed,
        ] {
            assert!(matches!(
                require_registration_open(status),
                Err(ApiError::InvalidState(_))
            ));
        }
    }

    #[test]
    fn test_cascade_skips_distributed_batches() {
        let cascade = DistributionCascade::plan(vec![
            candidate("A-1", CargoStatus::Registered, 5),
            candidate("A-2", CargoStatus::Distributed, 2),
            candidate("A-3", CargoStatus::OnHold, 1),
        ]);

        assert_eq!(cascade.total_batches, 3);
        assert_eq!(cascade.untouched_batches, 1);
        assert_eq!(cascade.moved.len(), 2);
        assert_eq!(cascade.moved_pieces, 6);
        assert_eq!(cascade.total_pieces, 8);
        assert!(cascade.moved.iter().all(|c| c.batch_number != "A-2"));
        assert_eq!(
            cascade.container_note(),
            "Distribution started: 6 of 8 cargo pieces updated (2 of 3 batches)"
        );
    }

    #[test]
    fn test_cascade_of_empty_container() {
        let cascade = DistributionCascade::plan(Vec::new());

        assert!(cascade.moved.is_empty());
        assert_eq!(cascade.total_batches, 0);
    }
}
