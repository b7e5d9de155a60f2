use serde::{Deserialize, Serialize};

/// Aggregate returned by `GET /api/analytics`. Computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Analytics {
    pub total_rating: u64,
    pub avg_rating: f64,
    pub total_views: u64,
    pub top_by_views: Vec<TopContent>,
    pub top_by_rating: Vec<TopContent>,
    pub global_distribution: Vec<CountryCount>,
    pub device_breakdown: Vec<DeviceCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopContent {
    pub id: Option<i64>,
    pub title: String,
    pub views: u64,
    pub rating: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceCount {
    pub device: String,
    pub count: u64,
}
