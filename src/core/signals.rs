use crate::models::{BudgetTier, Destination, Popularity, TravelerType};

/// Fraction of the requested interests carried by the destination.
///
/// Returns the score (0.0 to 1.0) and the matched tags in request order.
#[inline]
pub fn interest_overlap(interests: &[String], destination: &Destination) -> (f64, Vec<String>) {
    if interests.is_empty() {
        return (0.0, Vec::new());
    }

    let matched: Vec<String> = interests
        .iter()
        .filter(|tag| destination.has_tag(tag))
        .cloned()
        .collect();

    (matched.len() as f64 / interests.len() as f64, matched)
}

/// Same tier = 1.0, adjacent tier = 0.5, otherwise 0.0
#[inline]
pub fn budget_compatibility(wanted: BudgetTier, offered: BudgetTier) -> f64 {
    match wanted.rank().abs_diff(offered.rank()) {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    }
}

/// 1.0 when the destination suits this kind of traveler.
/// A destination with no `best_for` list is neutral (0.5).
#[inline]
pub fn traveler_type_match(traveler_type: TravelerType, destination: &Destination) -> f64 {
    if destination.best_for.is_empty() {
        0.5
    } else if destination.best_for.contains(&traveler_type) {
        1.0
    } else {
        0.0
    }
}

/// Fraction of the traveler's months the destination recommends.
/// `None` when the traveler gave no months.
#[inline]
pub fn season_match(months: &[u8], destination: &Destination) -> Option<f64> {
    if months.is_empty() {
        return None;
    }
    if destination.is_year_round() {
        return Some(1.0);
    }

    let hits = months
        .iter()
        .filter(|m| destination.best_months.contains(m))
        .count();

    Some(hits as f64 / months.len() as f64)
}

/// 1.0 inside the recommended range, decaying linearly to 0.0 once the
/// distance from the range equals its upper bound.
#[inline]
pub fn duration_fit(days: Option<u16>, destination: &Destination) -> Option<f64> {
    let days = days?;
    let Some(range) = destination.trip_duration else {
        return Some(1.0);
    };

    if range.contains(days) {
        return Some(1.0);
    }

    let distance = f64::from(if days < range.min_days {
        range.min_days - days
    } else {
        days - range.max_days
    });
    let span = range.max_days.max(1) as f64;

    Some((1.0 - distance / span).max(0.0))
}

/// 1.0 if the destination climate is one the traveler asked for
#[inline]
pub fn climate_match(climates: &[String], destination: &Destination) -> Option<f64> {
    if climates.is_empty() {
        return None;
    }

    let hit = destination
        .climate
        .as_deref()
        .map(|c| climates.iter().any(|wanted| wanted.eq_ignore_ascii_case(c)))
        .unwrap_or(false);

    Some(if hit { 1.0 } else { 0.0 })
}

/// Exact popularity = 1.0, adjacent = 0.5, otherwise 0.0
#[inline]
pub fn popularity_match(wanted: Option<Popularity>, destination: &Destination) -> Option<f64> {
    let wanted = wanted?;

    Some(match wanted.rank().abs_diff(destination.popularity.rank()) {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    })
}
