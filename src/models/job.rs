use serde::{Deserialize, Serialize};

/// A customer job. Seeded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: String,
    pub customer: String,
    pub description: String,
}

impl Job {
    pub fn new(
        job_id: impl Into<String>,
        customer: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            customer: customer.into(),
            description: description.into(),
        }
    }

    /// Case-insensitive substring match over id, customer and description.
    /// An empty needle matches every job.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.job_id, &self.customer, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
