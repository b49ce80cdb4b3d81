use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Month labels for the six-point review trend, oldest to newest.
pub const TREND_MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Review counts split by polarity. Always sums to the record's review total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

impl Sentiment {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.positive + self.neutral + self.negative
    }
}

/// One point of the monthly review-volume trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub count: u32,
}

/// The generated portion of a business record: everything the metrics
/// generator produces. Serialized camelCase to match the wire and snapshot
/// formats (`reviewTrends`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetrics {
    /// Star rating with one fractional digit, in `[2.0, 4.9]`.
    pub rating: f64,
    /// Total review count, never below 20.
    pub reviews: u32,
    pub headline: String,
    pub sentiment: Sentiment,
    pub suggestions: Vec<String>,
    /// Exactly six points; the last one always equals `reviews`.
    pub review_trends: Vec<TrendPoint>,
}

/// A saved business with its identity and generated metrics.
///
/// `id` is assigned once and never changes; `name` and `location` change only
/// through an explicit rename, never through regeneration. Metrics are
/// flattened so the persisted JSON stays a flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    #[serde(flatten)]
    pub metrics: BusinessMetrics,
}

impl BusinessRecord {
    #[must_use]
    pub fn key(&self) -> BusinessKey {
        BusinessKey::new(&self.name, &self.location)
    }
}

/// Upsert identity for a business: the (name, location) pair, trimmed and
/// lowercased so that `"Joe's Cafe" / "Austin"` and `" joe's cafe / AUSTIN "`
/// resolve to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BusinessKey {
    name: String,
    location: String,
}

impl BusinessKey {
    #[must_use]
    pub fn new(name: &str, location: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            location: location.trim().to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> BusinessRecord {
        BusinessRecord {
            id: Uuid::new_v4(),
            name: "Joe's Cafe".to_string(),
            location: "Austin".to_string(),
            metrics: BusinessMetrics {
                rating: 4.6,
                reviews: 100,
                headline: "Your Cozy Joe's Cafe: Best Coffee in Austin".to_string(),
                sentiment: Sentiment {
                    positive: 90,
                    neutral: 5,
                    negative: 5,
                },
                suggestions: vec!["Keep it up.".to_string()],
                review_trends: TREND_MONTHS
                    .iter()
                    .map(|m| TrendPoint {
                        month: (*m).to_string(),
                        count: 100,
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn key_is_trimmed_and_case_insensitive() {
        assert_eq!(
            BusinessKey::new("  Joe's Cafe ", "AUSTIN"),
            BusinessKey::new("joe's cafe", " austin"),
        );
    }

    #[test]
    fn key_distinguishes_locations() {
        assert_ne!(
            BusinessKey::new("Joe's Cafe", "Austin"),
            BusinessKey::new("Joe's Cafe", "Dallas"),
        );
    }

    #[test]
    fn record_serializes_flat_with_camel_case_trends() {
        let json = serde_json::to_value(sample_record()).expect("serialize record");
        assert!(json.get("metrics").is_none(), "metrics must be flattened");
        assert_eq!(json["reviews"].as_u64(), Some(100));
        assert_eq!(
            json["reviewTrends"].as_array().map(Vec::len),
            Some(6),
            "trend field must be camelCase with six points"
        );
        assert_eq!(json["sentiment"]["positive"].as_u64(), Some(90));
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = sample_record();
        let json = serde_json::to_string(&record).expect("serialize");
        let back: BusinessRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn sentiment_total_sums_all_three() {
        let s = Sentiment {
            positive: 7,
            neutral: 2,
            negative: 1,
        };
        assert_eq!(s.total(), 10);
    }
}
