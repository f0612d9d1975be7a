//! Generation job status enum backed by the `generation_job_statuses`
//! lookup table.

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

/// Lifecycle of a generation job. Transitions are monotonic:
/// queued -> running -> {succeeded, failed}, written by the worker only.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationJobStatus {
    Queued = 1,
    Running = 2,
    Succeeded = 3,
    Failed = 4,
}

impl GenerationJobStatus {
    /// The database status ID, matching the seeded lookup row.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Look up the variant for a raw status id.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Queued),
            2 => Some(Self::Running),
            3 => Some(Self::Succeeded),
            4 => Some(Self::Failed),
            _ => None,
        }
    }

    /// Status name matching the lookup table seed data.
    pub fn name(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl From<GenerationJobStatus> for StatusId {
    fn from(value: GenerationJobStatus) -> Self {
        value as StatusId
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for status in [
            GenerationJobStatus::Queued,
            GenerationJobStatus::Running,
            GenerationJobStatus::Succeeded,
            GenerationJobStatus::Failed,
        ] {
            assert_eq!(GenerationJobStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(GenerationJobStatus::from_id(0), None);
        assert_eq!(GenerationJobStatus::from_id(5), None);
    }

    #[test]
    fn only_the_end_states_are_terminal() {
        assert!(!GenerationJobStatus::Queued.is_terminal());
        assert!(!GenerationJobStatus::Running.is_terminal());
        assert!(GenerationJobStatus::Succeeded.is_terminal());
        assert!(GenerationJobStatus::Failed.is_terminal());
    }
}
