use super::model::Series;

/// JSON array of `{"timestamp", "weight"}` objects; gaps carry `"weight": null`.
pub fn chart_payload(series: &Series) -> Result<String, serde_json::Error> {
    serde_json::to_string(series)
}
