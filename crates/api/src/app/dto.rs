use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use pantry_inventory::{InventoryItem, Outcome};
use pantry_infra::{ActionResult, PantrySnapshot, VoiceReport};
use pantry_voice::VoiceCommand;

// -------------------------
// Request DTOs
// -------------------------

/// Form quantity: browsers post strings, scripts post numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl QuantityInput {
    /// Text handed to quantity validation; a fractional number stays
    /// fractional so it gets rejected instead of truncated.
    pub fn as_text(&self) -> String {
        match self {
            QuantityInput::Integer(n) => n.to_string(),
            QuantityInput::Float(f) => f.to_string(),
            QuantityInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    pub quantity: QuantityInput,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoiceCommandRequest {
    pub transcript: String,
}

/// Accepts a date-input value (`2024-09-01`) or a full RFC 3339 timestamp.
/// Blank means "no date".
pub fn parse_expiration_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| Some(dt.and_utc()))
            .ok_or_else(|| format!("invalid expiration date '{raw}'"));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| format!("invalid expiration date '{raw}'"))
}

// -------------------------
// Response DTOs
// -------------------------

/// One list row with the flags the UI highlights.
#[derive(Debug, Serialize)]
pub struct ItemView {
    pub name: String,
    pub display_name: String,
    pub quantity: u32,
    pub expiration_date: Option<DateTime<Utc>>,
    pub days_until_expiration: Option<i64>,
    pub expiring_soon: bool,
    pub needs_restock: bool,
}

impl ItemView {
    pub fn from_item(item: &InventoryItem, now: DateTime<Utc>) -> Self {
        let status = item.status(now);
        Self {
            name: item.name().to_string(),
            display_name: item.name().display_name(),
            quantity: item.quantity(),
            expiration_date: item.expiration_date(),
            days_until_expiration: status.days_until_expiration,
            expiring_soon: status.expiring_soon,
            needs_restock: status.needs_restock,
        }
    }
}

pub fn item_views(items: &[InventoryItem]) -> Vec<ItemView> {
    let now = Utc::now();
    items.iter().map(|i| ItemView::from_item(i, now)).collect()
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub items: Vec<ItemView>,
    pub feedback: Option<String>,
}

impl From<PantrySnapshot> for InventoryResponse {
    fn from(snapshot: PantrySnapshot) -> Self {
        Self {
            items: item_views(&snapshot.items),
            feedback: snapshot.feedback,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub outcome: Outcome,
    pub feedback: String,
    pub list_stale: bool,
    pub items: Vec<ItemView>,
}

impl ActionResponse {
    pub fn new(result: ActionResult, snapshot: PantrySnapshot) -> Self {
        Self {
            outcome: result.outcome,
            feedback: result.feedback,
            list_stale: result.list_stale,
            items: item_views(&snapshot.items),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoiceResponse {
    pub transcript: String,
    pub command: VoiceCommand,
    pub outcome: Outcome,
    pub feedback: String,
    pub items: Vec<ItemView>,
}

impl VoiceResponse {
    pub fn new(report: VoiceReport, snapshot: PantrySnapshot) -> Self {
        Self {
            transcript: report.transcript,
            command: report.command,
            outcome: report.outcome,
            feedback: report.feedback,
            items: item_views(&snapshot.items),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: Option<String>,
}
