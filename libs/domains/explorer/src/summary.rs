use serde::{Deserialize, Serialize};

use crate::models::ResultSet;

/// One endpoint that answered successfully at least once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessSummary {
    pub endpoint: String,
    pub methods: Vec<String>,
    pub params: Vec<String>,
}

/// Endpoints with at least one successful method or query variant.
///
/// Any successful query variant counts as a working endpoint: an endpoint
/// whose plain GET and POST both failed but which answered with query
/// parameters is listed with an empty `methods` list.
pub fn summarize(results: &ResultSet) -> Vec<SuccessSummary> {
    results
        .iter()
        .filter(|(_, record)| record.has_success())
        .map(|(endpoint, record)| SuccessSummary {
            endpoint: endpoint.clone(),
            methods: record
                .successful_methods()
                .iter()
                .map(|method| method.to_string())
                .collect(),
            params: record.successful_params(),
        })
        .collect()
}
