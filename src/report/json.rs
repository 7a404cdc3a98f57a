use crate::types::report::ReportDocument;

pub fn to_json(document: &ReportDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}
