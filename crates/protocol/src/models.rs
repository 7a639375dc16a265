use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDto {
    pub id: String,
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockEntryDto {
    pub id: String,
    pub inner_id: String,
    pub name: String,
    pub icon: String,
    pub is_docked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop_file: Option<String>,
    pub window_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_window: Option<u32>,
    pub menu: Vec<MenuItemDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupFailureDto {
    pub path: String,
    pub error: String,
}
