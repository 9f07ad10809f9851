use std::collections::BTreeSet;
use crate::models::{Destination, SimilarDestination};

/// Feature vectors for "more like this" lookups.
///
/// Each destination becomes: one-hot tags, one-hot climate, popularity ordinal,
/// standardized daily cost and standardized mean trip length. Built once per
/// catalog.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    names: Vec<String>,
    regions: Vec<String>,
    vectors: Vec<Vec<f64>>,
}

impl SimilarityIndex {
    pub fn build(catalog: &[Destination]) -> Self {
        let tags: BTreeSet<String> = catalog
            .iter()
            .flat_map(|d| d.tags.iter().map(|t| t.to_lowercase()))
            .collect();
        let climates: BTreeSet<String> = catalog
            .iter()
            .filter_map(|d| d.climate.as_ref().map(|c| c.to_lowercase()))
            .collect();

        let costs: Vec<f64> = catalog.iter().map(|d| d.avg_cost_per_day).collect();
        let durations: Vec<f64> = catalog
            .iter()
            .map(|d| {
                d.trip_duration
                    .map(|r| (f64::from(r.min_days) + f64::from(r.max_days)) / 2.0)
                    .unwrap_or(0.0)
            })
            .collect();
        let costs = standardize(&costs);
        let durations = standardize(&durations);

        let vectors = catalog
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let mut v = Vec::with_capacity(tags.len() + climates.len() + 3);
                v.extend(tags.iter().map(|t| if d.has_tag(t) { 1.0 } else { 0.0 }));
                let climate = d.climate.as_ref().map(|c| c.to_lowercase());
                v.extend(
                    climates
                        .iter()
                        .map(|c| if climate.as_ref() == Some(c) { 1.0 } else { 0.0 }),
                );
                v.push(f64::from(d.popularity.rank()) / 3.0);
                v.push(costs[i]);
                v.push(durations[i]);
                v
            })
            .collect();

        Self {
            names: catalog.iter().map(|d| d.name.clone()).collect(),
            regions: catalog.iter().map(|d| d.region.clone()).collect(),
            vectors,
        }
    }

    /// Position of a destination by case-insensitive name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.eq_ignore_ascii_case(name.trim()))
    }

    /// Most similar destinations to `name`, excluding itself.
    /// `None` when the name is not in the catalog.
    pub fn similar_to(&self, name: &str, limit: usize) -> Option<Vec<SimilarDestination>> {
        let target = self.position(name)?;
        let base = &self.vectors[target];

        let mut scored: Vec<SimilarDestination> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target)
            .map(|(i, v)| SimilarDestination {
                name: self.names[i].clone(),
                region: self.regions[i].clone(),
                similarity: cosine_similarity(base, v),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);

        Some(scored)
    }
}

/// Cosine similarity of two equal-length vectors; 0.0 if either is all zeros
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Zero mean, unit variance. A constant column becomes all zeros.
fn standardize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std_dev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

    if std_dev == 0.0 {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - mean) / std_dev).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, Popularity};

    fn destination(name: &str, tags: &[&str], climate: &str, cost: f64) -> Destination {
        Destination {
            name: name.to_string(),
            region: "Test".to_string(),
            climate: Some(climate.to_string()),
            popularity: Popularity::High,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            best_for: vec![],
            budget: Some(BudgetTier::from_daily_cost(cost)),
            avg_cost_per_day: cost,
            trip_duration: None,
            best_months: vec![],
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_standardize() {
        let z = standardize(&[1.0, 2.0, 3.0]);
        assert!(z[1].abs() < 1e-12);
        assert!((z[0] + z[2]).abs() < 1e-12);
        assert_eq!(standardize(&[5.0, 5.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_similar_to_prefers_shared_features() {
        let catalog = vec![
            destination("Goa", &["beach", "nightlife"], "Tropical", 3000.0),
            destination("Manali", &["mountains", "trekking"], "Alpine", 3500.0),
            destination("Gokarna", &["beach", "peaceful"], "Tropical", 2500.0),
        ];
        let index = SimilarityIndex::build(&catalog);

        let similar = index.similar_to("goa", 5).unwrap();

        assert_eq!(similar.len(), 2);
        assert_eq!(similar[0].name, "Gokarna");
        assert!(similar.iter().all(|s| s.name != "Goa"));
    }

    #[test]
    fn test_similar_to_unknown() {
        let index = SimilarityIndex::build(&[destination("Goa", &["beach"], "Tropical", 3000.0)]);
        assert!(index.similar_to("Atlantis", 5).is_none());
    }
}
