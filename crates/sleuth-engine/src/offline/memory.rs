//! In-process incident memory.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use sleuth_core::entities::Incident;
use sleuth_core::timeutil::TimeWindow;

use crate::error::CollaboratorError;
use crate::traits::IncidentMemory;

/// Minimum shared tokens for an incident to count as similar.
const MIN_TOKEN_OVERLAP: usize = 2;

/// Token-overlap incident retrieval over an append-only in-process store.
///
/// Questions are tokenized into lowercase alphanumeric words of three or
/// more characters; an incident matches when it shares at least two
/// tokens with the current question. The time window is ignored:
/// historical incidents are useful regardless of when they happened.
pub struct InMemoryIncidentMemory {
    incidents: Mutex<Vec<Incident>>,
}

impl InMemoryIncidentMemory {
    #[must_use]
    pub fn new(seed: Vec<Incident>) -> Self {
        Self { incidents: Mutex::new(seed) }
    }

    /// Snapshot of everything stored, for persistence and tests.
    #[must_use]
    pub fn incidents(&self) -> Vec<Incident> {
        self.incidents.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= 3)
        .map(str::to_string)
        .collect()
}

fn overlap(a: &[String], b: &[String]) -> usize {
    a.iter().filter(|token| b.contains(token)).count()
}

#[async_trait]
impl IncidentMemory for InMemoryIncidentMemory {
    async fn retrieve_similar(
        &self,
        question: &str,
        _window: TimeWindow,
    ) -> Result<Vec<Incident>, CollaboratorError> {
        let tokens = tokenize(question);
        let incidents = self.incidents.lock().unwrap_or_else(PoisonError::into_inner);
        let mut scored: Vec<(usize, Incident)> = incidents
            .iter()
            .filter_map(|incident| {
                let score = overlap(&tokens, &tokenize(&incident.question));
                (score >= MIN_TOKEN_OVERLAP).then(|| (score, incident.clone()))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().map(|(_, incident)| incident).collect())
    }

    async fn store(&self, incident: Incident) -> Result<(), CollaboratorError> {
        self.incidents.lock().unwrap_or_else(PoisonError::into_inner).push(incident);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use sleuth_core::timeutil::parse_time_window;

    fn incident(id: &str, question: &str) -> Incident {
        Incident {
            id: id.to_string(),
            question: question.to_string(),
            answer: "resolved".to_string(),
            resolution: None,
            events: Vec::new(),
            occurred_at: None,
        }
    }

    fn window() -> TimeWindow {
        parse_time_window(None, Utc::now())
    }

    #[tokio::test]
    async fn retrieval_requires_two_shared_tokens() {
        let memory = InMemoryIncidentMemory::new(vec![
            incident("inc-1", "checkout service timeout errors"),
            incident("inc-2", "database migration plan"),
        ]);
        let similar = memory
            .retrieve_similar("why does the checkout service fail", window())
            .await
            .unwrap();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].id, "inc-1");
    }

    #[tokio::test]
    async fn best_overlap_sorts_first() {
        let memory = InMemoryIncidentMemory::new(vec![
            incident("inc-1", "payment timeout issue"),
            incident("inc-2", "payment timeout issue in checkout flow"),
        ]);
        let similar = memory
            .retrieve_similar("checkout flow payment timeout", window())
            .await
            .unwrap();
        assert_eq!(similar.len(), 2);
        assert_eq!(similar[0].id, "inc-2");
    }

    #[tokio::test]
    async fn store_appends() {
        let memory = InMemoryIncidentMemory::new(Vec::new());
        memory.store(incident("inc-9", "new question")).await.unwrap();
        assert_eq!(memory.incidents().len(), 1);
    }
}
