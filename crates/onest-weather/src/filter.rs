use crate::types::{ForecastItem, ForecastPayload};

/// Narrow a forecast to areas whose name contains `location`.
///
/// Matching is a case-insensitive substring test on the trimmed location, so
/// partial names ("mo kio") work. Applies to both `items[].forecasts` and
/// `area_metadata`. An empty location, or a payload without `items`, yields an
/// unchanged copy.
pub fn filter_by_location(payload: &ForecastPayload, location: Option<&str>) -> ForecastPayload {
    let needle = location
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_lowercase);

    let (Some(needle), Some(items)) = (needle, payload.items.as_ref()) else {
        return payload.clone();
    };

    let matches = |area: &str| area.to_lowercase().contains(&needle);

    let items = items
        .iter()
        .map(|item| ForecastItem {
            valid_period: item.valid_period.clone(),
            forecasts: item
                .forecasts
                .iter()
                .filter(|f| matches(f.area.as_str()))
                .cloned()
                .collect(),
            extra: item.extra.clone(),
        })
        .collect();

    let area_metadata = payload.area_metadata.as_ref().map(|metadata| {
        metadata
            .iter()
            .filter(|area| matches(area.name.as_str()))
            .cloned()
            .collect()
    });

    ForecastPayload {
        area_metadata,
        items: Some(items),
        extra: payload.extra.clone(),
    }
}
