//! Search filters and query-string construction.
//!
//! [`SearchFilters`] doubles as the argument schema of the `search_addins`
//! tool, so its serde names follow the tool surface while [`QueryBuilder`]
//! maps every field onto the key the remote search API expects.

use chrono::{NaiveDate, Utc};
use reqwest::Url;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::{AddinError, AddinResult};

/// Field used to sort search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum OrderField {
    #[serde(alias = "none")]
    None,
    #[serde(alias = "title")]
    Title,
    #[serde(alias = "date")]
    Date,
    #[serde(alias = "price")]
    Price,
    #[serde(alias = "rating")]
    Rating,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Title => "Title",
            Self::Date => "Date",
            Self::Price => "Price",
            Self::Rating => "Rating",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum OrderBy {
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "Asc",
            Self::Desc => "Desc",
        }
    }
}

/// Optional filters accepted by the add-in search endpoint.
///
/// Every field is independent; an unset field (or an empty list) is left
/// out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchFilters {
    /// Search keywords.
    #[schemars(description = "Search query/keywords to find specific add-ins")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[schemars(description = "Filter by categories, e.g. [\"Productivity\", \"Education\"]")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,

    #[schemars(description = "Filter for free add-ins (the API may not filter strictly)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,

    /// `Platform_Product` tokens such as `Win32_Excel` or `WAC_PowerPoint`.
    #[schemars(
        description = "Office client platform-product combinations, format Platform_Product (e.g. \"Win32_Excel\", \"Mac_Word\", \"WAC_PowerPoint\"). Platforms: Win32, Mac, WAC, Any. Products: Word, PowerPoint, Excel, OneNote, Outlook, PowerBI"
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<String>>,

    #[schemars(description = "Filter by product groups, e.g. [\"Office\"]")]
    #[serde(default, rename = "productgroup", skip_serializing_if = "Option::is_none")]
    pub product_group: Option<Vec<String>>,

    #[schemars(description = "Filter by product IDs/GUIDs")]
    #[serde(default, rename = "productids", skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<String>>,

    #[schemars(description = "Filter by asset IDs, e.g. [\"WA104381441\", \"WA102957665\"]")]
    #[serde(default, rename = "assetids", skip_serializing_if = "Option::is_none")]
    pub asset_ids: Option<Vec<String>>,

    #[schemars(description = "Filter by provider type, e.g. \"gmail\"")]
    #[serde(default, rename = "providertype", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,

    #[schemars(description = "Field to sort by: None, Title, Date, Price or Rating")]
    #[serde(default, rename = "orderfield", skip_serializing_if = "Option::is_none")]
    pub order_field: Option<OrderField>,

    #[schemars(description = "Sort direction: Asc or Desc")]
    #[serde(default, rename = "orderby", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,

    /// Page size. Negative values are forwarded as-is.
    #[schemars(description = "Number of results to return")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<i64>,

    /// Page offset. Negative values are forwarded as-is.
    #[schemars(description = "Number of results to skip (pagination offset)")]
    #[serde(default, rename = "skiptoitem", skip_serializing_if = "Option::is_none")]
    pub skip_to_item: Option<i64>,

    /// `yyyy-MM-dd`, only used to bypass the upstream cache.
    #[schemars(description = "Date override for cache bypass (yyyy-MM-dd)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[schemars(description = "Include MetaOS applications in results")]
    #[serde(default, rename = "getMetaOSApps", skip_serializing_if = "Option::is_none")]
    pub include_meta_os_apps: Option<bool>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category<I, T>(mut self, category: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.category = Some(category.into_iter().map(Into::into).collect());
        self
    }

    pub fn free(mut self, free: bool) -> Self {
        self.free = Some(free);
        self
    }

    pub fn clients<I, T>(mut self, clients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.clients = Some(clients.into_iter().map(Into::into).collect());
        self
    }

    pub fn asset_ids<I, T>(mut self, asset_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.asset_ids = Some(asset_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn order(mut self, field: OrderField, by: OrderBy) -> Self {
        self.order_field = Some(field);
        self.order_by = Some(by);
        self
    }

    pub fn top(mut self, top: i64) -> Self {
        self.top = Some(top);
        self
    }

    pub fn skip_to_item(mut self, skip: i64) -> Self {
        self.skip_to_item = Some(skip);
        self
    }

    /// Set the cache-busting date, rendered as `yyyy-MM-dd`.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date.format(DATE_FORMAT).to_string());
        self
    }

    /// Ask the directory for uncached results by sending today's UTC date.
    pub fn bypass_cache(self) -> Self {
        self.date(Utc::now().date_naive())
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turns search filters and asset ids into request parameters.
pub struct QueryBuilder;

impl QueryBuilder {
    /// Build the ordered query parameters for a search request.
    ///
    /// Pure and deterministic: the same filters always produce the same
    /// sequence, in the declaration order of [`SearchFilters`].
    pub fn build(filters: &SearchFilters) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        push_text(&mut params, "qu", filters.query.as_deref());
        push_list(&mut params, "category", filters.category.as_deref());
        push_bool(&mut params, "free", filters.free);
        push_list(&mut params, "clients", filters.clients.as_deref());
        push_list(&mut params, "productgroup", filters.product_group.as_deref());
        push_list(&mut params, "productids", filters.product_ids.as_deref());
        push_list(&mut params, "assetids", filters.asset_ids.as_deref());
        push_text(&mut params, "providertype", filters.provider_type.as_deref());
        push_text(
            &mut params,
            "orderfield",
            filters.order_field.as_ref().map(OrderField::as_str),
        );
        push_text(
            &mut params,
            "orderby",
            filters.order_by.as_ref().map(OrderBy::as_str),
        );
        push_int(&mut params, "top", filters.top);
        push_int(&mut params, "skiptoitem", filters.skip_to_item);
        push_text(&mut params, "date", filters.date.as_deref());
        push_bool(&mut params, "getMetaOSApps", filters.include_meta_os_apps);

        params
    }

    /// Render [`QueryBuilder::build`] as a form-encoded query string.
    pub fn to_query_string(filters: &SearchFilters) -> String {
        // Encoding a sequence of string pairs cannot fail.
        serde_urlencoded::to_string(Self::build(filters)).unwrap_or_default()
    }

    /// Build the URL of a search request against `endpoint`.
    pub fn build_search_target(endpoint: &Url, filters: &SearchFilters) -> Url {
        let mut url = endpoint.clone();
        let params = Self::build(filters);
        // An empty pair list would still leave a dangling '?'.
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }

    /// Build the URL of the details endpoint for one asset.
    ///
    /// Blank ids are rejected before any request is made.
    pub fn build_details_target(endpoint: &Url, asset_id: &str) -> AddinResult<Url> {
        let asset_id = asset_id.trim();
        if asset_id.is_empty() {
            return Err(AddinError::invalid_argument("asset_id must not be empty"));
        }

        let mut url = endpoint.clone();
        url.query_pairs_mut().clear().append_pair("assetid", asset_id);
        Ok(url)
    }
}

fn push_text(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

fn push_list(params: &mut Vec<(&'static str, String)>, key: &'static str, values: Option<&[String]>) {
    match values {
        Some(values) if !values.is_empty() => params.push((key, values.join(","))),
        _ => {}
    }
}

fn push_bool(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<bool>) {
    if let Some(value) = value {
        params.push((key, if value { "true" } else { "false" }.to_string()));
    }
}

fn push_int(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<i64>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAILS: &str = "https://api.addins.omex.office.net/api/addins/details";
    const SEARCH: &str = "https://api.addins.omex.office.net/api/addins/search";

    fn endpoint(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_empty_filters_produce_no_params() {
        assert!(QueryBuilder::build(&SearchFilters::default()).is_empty());
        assert_eq!(QueryBuilder::to_query_string(&SearchFilters::default()), "");
    }

    #[test]
    fn test_lists_are_comma_joined() {
        let filters = SearchFilters::new().clients(["Win32_Excel", "Mac_Excel", "WAC_Excel"]);
        let params = QueryBuilder::build(&filters);
        assert_eq!(
            params,
            vec![("clients", "Win32_Excel,Mac_Excel,WAC_Excel".to_string())]
        );
    }

    #[test]
    fn test_empty_lists_are_omitted() {
        let filters = SearchFilters {
            category: Some(vec![]),
            clients: Some(vec![]),
            product_group: Some(vec![]),
            product_ids: Some(vec![]),
            asset_ids: Some(vec![]),
            ..Default::default()
        };
        assert!(QueryBuilder::build(&filters).is_empty());
    }

    #[test]
    fn test_booleans_are_lowercase() {
        let filters = SearchFilters {
            free: Some(true),
            include_meta_os_apps: Some(false),
            ..Default::default()
        };
        assert_eq!(
            QueryBuilder::build(&filters),
            vec![
                ("free", "true".to_string()),
                ("getMetaOSApps", "false".to_string())
            ]
        );
    }

    #[test]
    fn test_integers_pass_through_including_negative() {
        let filters = SearchFilters::new().top(10).skip_to_item(-5);
        assert_eq!(
            QueryBuilder::build(&filters),
            vec![("top", "10".to_string()), ("skiptoitem", "-5".to_string())]
        );
    }

    #[test]
    fn test_all_fields_in_declaration_order() {
        let filters = SearchFilters {
            query: Some("Zoom".to_string()),
            category: Some(vec!["Productivity".to_string()]),
            free: Some(true),
            clients: Some(vec!["Win32_Word".to_string()]),
            product_group: Some(vec!["Office".to_string()]),
            product_ids: Some(vec!["p1".to_string()]),
            asset_ids: Some(vec!["WA104381441".to_string()]),
            provider_type: Some("gmail".to_string()),
            order_field: Some(OrderField::Rating),
            order_by: Some(OrderBy::Desc),
            top: Some(20),
            skip_to_item: Some(40),
            date: Some("2024-01-31".to_string()),
            include_meta_os_apps: Some(true),
        };
        let params = QueryBuilder::build(&filters);
        assert_eq!(
            keys(&params),
            vec![
                "qu",
                "category",
                "free",
                "clients",
                "productgroup",
                "productids",
                "assetids",
                "providertype",
                "orderfield",
                "orderby",
                "top",
                "skiptoitem",
                "date",
                "getMetaOSApps",
            ]
        );
        assert_eq!(params[8].1, "Rating");
        assert_eq!(params[9].1, "Desc");
    }

    #[test]
    fn test_build_is_deterministic() {
        let filters = SearchFilters::new()
            .query("calendar")
            .asset_ids(["WA104381441", "WA102957665"])
            .order(OrderField::Title, OrderBy::Asc);
        assert_eq!(QueryBuilder::build(&filters), QueryBuilder::build(&filters));
        assert_eq!(
            QueryBuilder::to_query_string(&filters),
            "qu=calendar&assetids=WA104381441%2CWA102957665&orderfield=Title&orderby=Asc"
        );
    }

    #[test]
    fn test_date_is_formatted() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let filters = SearchFilters::new().date(date);
        assert_eq!(
            QueryBuilder::build(&filters),
            vec![("date", "2024-03-07".to_string())]
        );
    }

    #[test]
    fn test_bypass_cache_sets_today() {
        let filters = SearchFilters::new().bypass_cache();
        let date = filters.date.unwrap();
        assert!(NaiveDate::parse_from_str(&date, DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_deserialize_tool_argument_names() {
        let json = serde_json::json!({
            "query": "productivity",
            "productgroup": ["Office"],
            "assetids": ["WA1"],
            "orderfield": "rating",
            "orderby": "Desc",
            "skiptoitem": 10,
            "getMetaOSApps": true
        });
        let filters: SearchFilters = serde_json::from_value(json).unwrap();
        assert_eq!(filters.query.as_deref(), Some("productivity"));
        assert_eq!(filters.product_group, Some(vec!["Office".to_string()]));
        assert_eq!(filters.asset_ids, Some(vec!["WA1".to_string()]));
        assert_eq!(filters.order_field, Some(OrderField::Rating));
        assert_eq!(filters.order_by, Some(OrderBy::Desc));
        assert_eq!(filters.skip_to_item, Some(10));
        assert_eq!(filters.include_meta_os_apps, Some(true));
        assert_eq!(filters.top, None);
    }

    #[test]
    fn test_unknown_order_field_rejected() {
        let json = serde_json::json!({ "orderfield": "Popularity" });
        assert!(serde_json::from_value::<SearchFilters>(json).is_err());
    }

    #[test]
    fn test_search_target_without_filters_has_no_query() {
        let url = QueryBuilder::build_search_target(&endpoint(SEARCH), &SearchFilters::default());
        assert_eq!(url.as_str(), SEARCH);
    }

    #[test]
    fn test_search_target_with_filters() {
        let filters = SearchFilters::new().query("Zoom").free(true);
        let url = QueryBuilder::build_search_target(&endpoint(SEARCH), &filters);
        assert_eq!(url.query(), Some("qu=Zoom&free=true"));
    }

    #[test]
    fn test_details_target_rejects_blank_ids() {
        for id in ["", "   ", "\t\n"] {
            let err = QueryBuilder::build_details_target(&endpoint(DETAILS), id).unwrap_err();
            assert!(matches!(err, AddinError::InvalidArgument(_)), "id {:?}", id);
        }
    }

    #[test]
    fn test_details_target_embeds_id() {
        let url = QueryBuilder::build_details_target(&endpoint(DETAILS), "WA102957665").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.addins.omex.office.net/api/addins/details?assetid=WA102957665"
        );
    }

    #[test]
    fn test_details_target_encodes_unsafe_characters() {
        let url = QueryBuilder::build_details_target(&endpoint(DETAILS), "a&b c").unwrap();
        assert_eq!(url.query(), Some("assetid=a%26b+c"));
    }
}
