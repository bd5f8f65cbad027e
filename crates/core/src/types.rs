/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// A page's content row as a flat column-to-raw-text mapping.
///
/// Columns holding list-shaped fields carry serialized JSON; everything
/// else is plain text. Columns that are NULL in the database are simply
/// absent from the map.
pub type PageRecord = std::collections::BTreeMap<String, String>;

/// A section's external view shape: a JSON object keyed by the section's
/// view keys. Scalar fields are JSON strings, list fields JSON arrays.
pub type SectionView = serde_json::Map<String, serde_json::Value>;
