use reqwest::Client;
use serde_json::Value;

use super::{send_json, DataSourceError};

const BUSINESS_INFO_URL: &str = "https://mybusinessbusinessinformation.googleapis.com/v1";
const READ_MASK: &str =
    "name,title,regularHours,primaryPhone,websiteUri,primaryCategory,labels,storefrontAddress";

/// Lists the locations of a Business Profile account.
pub(super) async fn locations(
    client: &Client,
    access_token: &str,
    account_id: &str,
) -> Result<Value, DataSourceError> {
    send_json(
        client
            .get(format!("{BUSINESS_INFO_URL}/accounts/{account_id}/locations"))
            .bearer_auth(access_token)
            .query(&[("readMask", READ_MASK)]),
    )
    .await
}
