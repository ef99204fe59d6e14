//! Download jobs: one source location plus the id its output is named after.

/// Identifier of a job within one batch: its 0-based position in the input list.
pub type JobId = usize;

/// An immutable unit of work. Identity is `id`; ids are unique within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub location: String,
}

impl Job {
    pub fn new(id: JobId, location: impl Into<String>) -> Self {
        Self {
            id,
            location: location.into(),
        }
    }

    /// Builds one job per location, numbered by enumeration order.
    pub fn from_locations<I, S>(locations: I) -> Vec<Job>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        locations
            .into_iter()
            .enumerate()
            .map(|(id, location)| Job::new(id, location))
            .collect()
    }
}
