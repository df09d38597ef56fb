use crate::{BacklinkCounter, BacklinkError, EntityId, WikidataApi};
use async_trait::async_trait;
use log::{info, warn};
use scraper::Html;

/// Finds the "Displayed N items" phrase in a rendered `Special:WhatLinksHere` page
/// and returns N. The phrase is the first text node containing both "Displayed"
/// and "item"; N is the token right after "Displayed" (punctuation around the
/// keyword, as in "(Displayed 5 items)", is ignored).
/// # Errors
/// Returns `DisplayedCountMissing` if no text node matches (with the given `id`),
/// or `DisplayedCountInvalid` if the number cannot be parsed.
pub fn displayed_items_in_html(html: &str, id: &EntityId) -> Result<u64, BacklinkError> {
    let document = Html::parse_document(html);
    let text = document
        .root_element()
        .text()
        .find(|t| t.contains("Displayed") && t.contains("item"))
        .ok_or_else(|| BacklinkError::DisplayedCountMissing(id.to_owned()))?;
    let mut tokens = text.split_whitespace();
    tokens
        .by_ref()
        .find(|token| token.trim_matches(|c: char| !c.is_alphanumeric()) == "Displayed")
        .and_then(|_| tokens.next())
        .and_then(|number| number.parse::<u64>().ok())
        .ok_or_else(|| BacklinkError::DisplayedCountInvalid(text.trim().to_string()))
}

/// Fetches `Special:WhatLinksHere/<id>` and returns the displayed items count.
/// # Errors
/// Returns an error on transport failure, a non-2xx status, or if the count cannot be scraped.
pub async fn get_displayed_items(api: &WikidataApi, id: &EntityId) -> Result<u64, BacklinkError> {
    let title = format!("Special:WhatLinksHere/{id}");
    let request = api.page_request_builder(&title)?.build()?;
    let response = api.execute(request).await?;
    let body = response.text().await?;
    displayed_items_in_html(&body, id)
}

#[async_trait]
impl BacklinkCounter for WikidataApi {
    async fn displayed_items(&self, id: &EntityId) -> Option<u64> {
        match get_displayed_items(self, id).await {
            Ok(count) => {
                info!("Displayed items: {count}");
                Some(count)
            }
            Err(e @ BacklinkError::DisplayedCountMissing(_))
            | Err(e @ BacklinkError::DisplayedCountInvalid(_)) => {
                warn!("{e}");
                None
            }
            Err(e) => {
                warn!("Request error for QID {id}: {e}");
                None
            }
        }
    }
}
