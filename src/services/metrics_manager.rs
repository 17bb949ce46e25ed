use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone)]
struct Counters {
    requests: u64,
    failures: u64,
    sentiment: BTreeMap<String, u64>,
}

/// Snapshot returned by `GET /stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsData {
    pub requests: u64,
    pub failures: u64,
    pub sentiment: BTreeMap<String, u64>,
    pub mood: String,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<Counters>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Counters::default())),
        }
    }

    pub async fn record_request(&self) {
        self.inner.write().await.requests += 1;
    }

    pub async fn record_failure(&self) {
        self.inner.write().await.failures += 1;
    }

    pub async fn record_sentiment(&self, label: &str) {
        let mut data = self.inner.write().await;
        *data.sentiment.entry(label.to_uppercase()).or_insert(0) += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        let data = self.inner.read().await;
        MetricsData {
            requests: data.requests,
            failures: data.failures,
            mood: mood(&data.sentiment).to_string(),
            sentiment: data.sentiment.clone(),
        }
    }
}

// Dominant polarity; ties go Positive, then Neutral.
fn mood(tally: &BTreeMap<String, u64>) -> &'static str {
    let count = |label: &str| tally.get(label).copied().unwrap_or(0);
    let (positive, neutral, negative) = (count("POSITIVE"), count("NEUTRAL"), count("NEGATIVE"));

    if positive + neutral + negative == 0 {
        "No Data"
    } else if positive >= neutral && positive >= negative {
        "Positive"
    } else if neutral >= negative {
        "Neutral"
    } else {
        "Negative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_manager_has_no_mood() {
        let metrics = MetricsManager::new();
        let data = metrics.get_metrics().await;
        assert_eq!(data.requests, 0);
        assert_eq!(data.mood, "No Data");
        assert!(data.sentiment.is_empty());
    }

    #[tokio::test]
    async fn tallies_labels_case_insensitively() {
        let metrics = MetricsManager::new();
        metrics.record_sentiment("positive").await;
        metrics.record_sentiment("NEGATIVE").await;
        metrics.record_sentiment("NEGATIVE").await;

        let data = metrics.get_metrics().await;
        assert_eq!(data.sentiment.get("POSITIVE"), Some(&1));
        assert_eq!(data.sentiment.get("NEGATIVE"), Some(&2));
        assert_eq!(data.mood, "Negative");
    }

    #[test]
    fn ties_favour_positive() {
        let tally = BTreeMap::from([("POSITIVE".to_string(), 2), ("NEGATIVE".to_string(), 2)]);
        assert_eq!(mood(&tally), "Positive");

        let tally = BTreeMap::from([("NEUTRAL".to_string(), 3), ("NEGATIVE".to_string(), 3)]);
        assert_eq!(mood(&tally), "Neutral");
    }
}
