//! XML bodies returned by the Blob service

use blob_agent_application::StorageError;
use serde::Deserialize;

/// One page of a container listing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListPage {
    pub names: Vec<String>,
    /// Continuation marker; `None` on the last page
    pub next_marker: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EnumerationResults {
    #[serde(default)]
    blobs: BlobList,
    #[serde(default)]
    next_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BlobList {
    #[serde(rename = "Blob", default)]
    items: Vec<BlobItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BlobItem {
    name: String,
}

/// `<Error><Code>..</Code><Message>..</Message></Error>`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The service prefixes XML bodies with a UTF-8 byte order mark
fn strip_bom(xml: &str) -> &str {
    xml.trim_start_matches('\u{feff}')
}

pub fn parse_list_page(xml: &str) -> Result<ListPage, StorageError> {
    let results: EnumerationResults = quick_xml::de::from_str(strip_bom(xml))
        .map_err(|e| StorageError::InvalidResponse(format!("container listing: {}", e)))?;

    Ok(ListPage {
        names: results.blobs.items.into_iter().map(|b| b.name).collect(),
        next_marker: results
            .next_marker
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty()),
    })
}

/// Parse an error body; anything unparsable yields an empty [`ServiceError`]
pub fn parse_service_error(xml: &str) -> ServiceError {
    quick_xml::de::from_str(strip_bom(xml)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_with_marker() {
        let xml = "\u{feff}<?xml version=\"1.0\" encoding=\"utf-8\"?>\
            <EnumerationResults ServiceEndpoint=\"https://acct.blob.core.windows.net/\" ContainerName=\"data\">\
              <MaxResults>2</MaxResults>\
              <Blobs>\
                <Blob><Name>a.csv</Name><Properties><Content-Length>10</Content-Length></Properties></Blob>\
                <Blob><Name>csv-data/sales_data.csv</Name><Properties /></Blob>\
              </Blobs>\
              <NextMarker>2!72!MDAwMDA</NextMarker>\
            </EnumerationResults>";

        let page = parse_list_page(xml).unwrap();
        assert_eq!(page.names, vec!["a.csv", "csv-data/sales_data.csv"]);
        assert_eq!(page.next_marker.as_deref(), Some("2!72!MDAwMDA"));
    }

    #[test]
    fn test_parse_last_page() {
        let xml = "<EnumerationResults ContainerName=\"data\">\
              <Blobs><Blob><Name>only.csv</Name></Blob></Blobs>\
              <NextMarker />\
            </EnumerationResults>";

        let page = parse_list_page(xml).unwrap();
        assert_eq!(page.names, vec!["only.csv"]);
        assert!(page.next_marker.is_none());
    }

    #[test]
    fn test_parse_empty_container() {
        let xml = "<EnumerationResults ContainerName=\"data\"><Blobs /><NextMarker /></EnumerationResults>";
        let page = parse_list_page(xml).unwrap();
        assert_eq!(page, ListPage::default());
    }

    #[test]
    fn test_parse_blob_without_name() {
        let xml = "<EnumerationResults><Blobs><Blob><Size>1</Size></Blob></Blobs></EnumerationResults>";
        assert!(matches!(
            parse_list_page(xml),
            Err(StorageError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_service_error() {
        let xml = "\u{feff}<?xml version=\"1.0\" encoding=\"utf-8\"?>\
            <Error><Code>BlobNotFound</Code><Message>The specified blob does not exist.</Message></Error>";
        let error = parse_service_error(xml);
        assert_eq!(error.code.as_deref(), Some("BlobNotFound"));
        assert_eq!(
            error.message.as_deref(),
            Some("The specified blob does not exist.")
        );

        assert!(parse_service_error("").code.is_none());
    }
}
