/// Transform logic for CMS pages
///
/// Turns the HTML of a `/cms/user/<id>` page into a [`ContributionReport`]:
/// 1. Find the display name (best-effort)
/// 2. Locate and entity-decode the `react-data` payload
/// 3. Parse the payload and read `credits`
/// 4. Map each credit to a [`Contribution`]
/// 5. Aggregate [`ContributionStats`]
use crate::clock::Clock;
use crate::errors::ScrapeError;
use crate::extractor::{decode_entities, PageExtractor};
use crate::models::{
    CmsPayload, Contribution, ContributionReport, ContributionStats, RawCredit,
    CREDIT_QUALITY_CHECKED, CREDIT_WRITTEN,
};

/// Site root used when building dex links.
pub const DEFAULT_SITE_BASE: &str = "https://www.smogon.com";

/// Parse a CMS page into a report.
///
/// Fails with [`ScrapeError::Extraction`] when the page carries no `react-data`
/// attribute and with [`ScrapeError::Decode`] when the payload is not valid JSON.
pub fn parse_contributions(
    html: &str,
    user_id: &str,
    site_base: &str,
    extractor: &impl PageExtractor,
    clock: &impl Clock,
) -> Result<ContributionReport, ScrapeError> {
    let username = extractor.username(html).unwrap_or_else(|| {
        tracing::warn!("No member link found, falling back to generic name for {}", user_id);
        format!("User {}", user_id)
    });

    let raw = extractor.react_data(html).ok_or_else(|| {
        ScrapeError::Extraction(
            "Could not find contribution data in HTML. The page structure may have changed or the data is missing."
                .to_string(),
        )
    })?;

    let credits = parse_credits(&decode_entities(raw))?;
    tracing::info!("Found {} total credit entries", credits.len());

    let contributions: Vec<Contribution> = credits
        .iter()
        .enumerate()
        .map(|(index, credit)| map_credit(credit, index, site_base))
        .collect();
    let stats = compute_stats(&contributions);

    Ok(ContributionReport {
        user_id: user_id.to_string(),
        username,
        fetched_at: clock.now(),
        total_count: contributions.len(),
        contributions,
        stats,
    })
}

/// Decode the JSON payload and return its `credits`, empty when absent.
pub fn parse_credits(json: &str) -> Result<Vec<RawCredit>, ScrapeError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        tracing::debug!("Payload is not an object, treating as no credits");
        return Ok(Vec::new());
    }

    let payload: CmsPayload = serde_json::from_value(value)?;
    Ok(payload.credits.unwrap_or_default())
}

/// Normalize one upstream credit. `index` is its position in the source list.
pub fn map_credit(credit: &RawCredit, index: usize, site_base: &str) -> Contribution {
    let generation = component(&credit.format_id, 0);
    let format = component(&credit.format_id, 1);
    let pokemon_name = component(&credit.pokemon_id, 1);

    let url = format!(
        "{}/dex/{}/pokemon/{}",
        site_base.trim_end_matches('/'),
        generation,
        pokemon_name.to_lowercase()
    );

    Contribution {
        id: format!(
            "{}_{}_{}_{}",
            credit.pokemon_id, credit.format_id, credit.set_order, index
        ),
        credit_type: credit.credit_type.clone(),
        pokemon_name,
        format,
        generation,
        language: credit.language.clone(),
        url,
        set_number: credit.set_order,
    }
}

/// Single aggregation pass over normalized contributions.
pub fn compute_stats(contributions: &[Contribution]) -> ContributionStats {
    let mut stats = ContributionStats::default();

    for c in contributions {
        match c.credit_type.as_str() {
            CREDIT_WRITTEN => stats.written_count += 1,
            CREDIT_QUALITY_CHECKED => stats.quality_checked_count += 1,
            _ => {}
        }
        *stats.counts_by_format.entry(c.format.clone()).or_insert(0) += 1;
        *stats
            .counts_by_generation
            .entry(c.generation.clone())
            .or_insert(0) += 1;
    }

    stats
}

fn component(id: &str, n: usize) -> String {
    id.split('/').nth(n).unwrap_or_default().to_string()
}
