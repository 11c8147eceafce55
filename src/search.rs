use itertools::Itertools;
use serde::Deserialize;

use crate::client::Client;
use crate::error::Result;
use crate::wallpaper::Wallpaper;
use crate::utils;

/// Content-type classification axis.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Anime,
    People,
}

/// Content-safety classification axis.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purity {
    Sfw,
    Sketchy,
    Nsfw,
}

/// How to sort search results.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Sorting {
    DateAdded,
    Relevance,
    Random,
    Views,
    Favorites,
    Toplist,
}

impl Sorting {
    pub fn as_str(self) -> &'static str {
        match self {
            Sorting::DateAdded => "date_added",
            Sorting::Relevance => "relevance",
            Sorting::Random => "random",
            Sorting::Views => "views",
            Sorting::Favorites => "favorites",
            Sorting::Toplist => "toplist",
        }
    }
}

/// Sort direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Order {
    Desc,
    Asc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Desc => "desc",
            Order::Asc => "asc",
        }
    }
}

/// Time window used when sorting by [`Sorting::Toplist`]. The API ignores
/// it for every other sort key.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
pub enum TopRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl TopRange {
    pub fn as_str(self) -> &'static str {
        match self {
            TopRange::OneDay => "1d",
            TopRange::ThreeDays => "3d",
            TopRange::OneWeek => "1w",
            TopRange::OneMonth => "1M",
            TopRange::ThreeMonths => "3M",
            TopRange::SixMonths => "6M",
            TopRange::OneYear => "1y",
        }
    }
}

/// Dominant-color palette accepted by the search endpoint.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Lonestar,
    RedBerry,
    GuardsmanRed,
    PersianRed,
    FrenchRose,
    Plum,
    RoyalPurple,
    Sapphire,
    ScienceBlue,
    PacificBlue,
    Downy,
    Atlantis,
    Limeade,
    VerdunGreen,
    VerdunGreen2,
    Olive,
    EarlsGreen,
    Yellow,
    Sunglow,
    OrangePeel,
    BlazeOrange,
    Tuscany,
    PottersClay,
    NutmegWoodFinish,
    Black,
    DustyGray,
    Silver,
    White,
    GunPowder,
}

impl Color {
    /// The 6-hex-digit code the API expects, without a leading `#`.
    pub fn as_hex(self) -> &'static str {
        match self {
            Color::Lonestar => "660000",
            Color::RedBerry => "990000",
            Color::GuardsmanRed => "cc0000",
            Color::PersianRed => "cc3333",
            Color::FrenchRose => "ea4c88",
            Color::Plum => "993399",
            Color::RoyalPurple => "663399",
            Color::Sapphire => "333399",
            Color::ScienceBlue => "0066cc",
            Color::PacificBlue => "0099cc",
            Color::Downy => "66cccc",
            Color::Atlantis => "77cc33",
            Color::Limeade => "669900",
            Color::VerdunGreen => "336600",
            Color::VerdunGreen2 => "666600",
            Color::Olive => "999900",
            Color::EarlsGreen => "cccc33",
            Color::Yellow => "ffff00",
            Color::Sunglow => "ffcc33",
            Color::OrangePeel => "ff9900",
            Color::BlazeOrange => "ff6600",
            Color::Tuscany => "cc6633",
            Color::PottersClay => "996633",
            Color::NutmegWoodFinish => "663300",
            Color::Black => "000000",
            Color::DustyGray => "999999",
            Color::Silver => "cccccc",
            Color::White => "ffffff",
            Color::GunPowder => "424153",
        }
    }
}

/// Category membership triple, encoded positionally as e.g. `"110"`
/// (general, anime, people).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CategoryFilter {
    pub general: bool,
    pub anime: bool,
    pub people: bool,
}

impl CategoryFilter {
    pub const fn new(general: bool, anime: bool, people: bool) -> Self {
        CategoryFilter {
            general,
            anime,
            people,
        }
    }

    pub(crate) fn encode(self) -> String {
        encode_flags(self.general, self.anime, self.people)
    }
}

impl Default for CategoryFilter {
    /// General and anime included, people excluded.
    fn default() -> Self {
        CategoryFilter::new(true, true, false)
    }
}

impl From<Category> for CategoryFilter {
    fn from(member: Category) -> Self {
        [member].into()
    }
}

impl From<&[Category]> for CategoryFilter {
    fn from(members: &[Category]) -> Self {
        CategoryFilter::new(
            members.contains(&Category::General),
            members.contains(&Category::Anime),
            members.contains(&Category::People),
        )
    }
}

impl<const N: usize> From<[Category; N]> for CategoryFilter {
    fn from(members: [Category; N]) -> Self {
        members.as_slice().into()
    }
}

/// Purity membership triple, encoded positionally as e.g. `"110"`
/// (sfw, sketchy, nsfw).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PurityFilter {
    pub sfw: bool,
    pub sketchy: bool,
    pub nsfw: bool,
}

impl PurityFilter {
    pub const fn new(sfw: bool, sketchy: bool, nsfw: bool) -> Self {
        PurityFilter { sfw, sketchy, nsfw }
    }

    pub(crate) fn encode(self) -> String {
        encode_flags(self.sfw, self.sketchy, self.nsfw)
    }
}

impl Default for PurityFilter {
    /// Sfw and sketchy included, nsfw excluded.
    fn default() -> Self {
        PurityFilter::new(true, true, false)
    }
}

impl From<Purity> for PurityFilter {
    fn from(member: Purity) -> Self {
        [member].into()
    }
}

impl From<&[Purity]> for PurityFilter {
    fn from(members: &[Purity]) -> Self {
        PurityFilter::new(
            members.contains(&Purity::Sfw),
            members.contains(&Purity::Sketchy),
            members.contains(&Purity::Nsfw),
        )
    }
}

impl<const N: usize> From<[Purity; N]> for PurityFilter {
    fn from(members: [Purity; N]) -> Self {
        members.as_slice().into()
    }
}

fn encode_flags(first: bool, second: bool, third: bool) -> String {
    format!("{}{}{}", u8::from(first), u8::from(second), u8::from(third))
}

/// Encodes dimension pairs as `"WxH,WxH,..."`. Input order is preserved,
/// nothing is deduplicated.
fn encode_dimensions(dimensions: &[(u32, u32)]) -> String {
    dimensions
        .iter()
        .map(|(width, height)| format!("{width}x{height}"))
        .join(",")
}

/// A search query. Built with chained setters; every filter is optional and
/// omitted from the request when unset.
///
/// ```
/// # use wallhaven::search::{Query, Category, Purity, Sorting, TopRange};
/// let query = Query::new()
///     .q("landscape")
///     .categories([Category::General])
///     .purity([Purity::Sfw])
///     .sorting(Sorting::Toplist)
///     .top_range(TopRange::OneMonth)
///     .atleast(1920, 1080)
///     .page(2);
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Query {
    q: Option<String>,
    categories: Option<CategoryFilter>,
    purity: Option<PurityFilter>,
    sorting: Option<Sorting>,
    order: Option<Order>,
    top_range: Option<TopRange>,
    atleast: Option<(u32, u32)>,
    resolutions: Vec<(u32, u32)>,
    ratios: Vec<(u32, u32)>,
    colors: Option<Color>,
    page: Option<u32>,
    seed: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search terms (keywords, tags, `@username`, ...).
    pub fn q<T: Into<Option<S>>, S: Into<String>>(mut self, q: T) -> Self {
        self.q = q.into().map(Into::into);
        self
    }

    /// Restrict results to the given category memberships.
    pub fn categories<T: Into<CategoryFilter>>(mut self, categories: T) -> Self {
        self.categories = Some(categories.into());
        self
    }

    /// Restrict results to the given purity memberships.
    pub fn purity<T: Into<PurityFilter>>(mut self, purity: T) -> Self {
        self.purity = Some(purity.into());
        self
    }

    pub fn sorting<T: Into<Option<Sorting>>>(mut self, sorting: T) -> Self {
        self.sorting = sorting.into();
        self
    }

    pub fn order<T: Into<Option<Order>>>(mut self, order: T) -> Self {
        self.order = order.into();
        self
    }

    /// Only meaningful together with [`Sorting::Toplist`].
    pub fn top_range<T: Into<Option<TopRange>>>(mut self, top_range: T) -> Self {
        self.top_range = top_range.into();
        self
    }

    /// Minimum resolution.
    pub fn atleast(mut self, width: u32, height: u32) -> Self {
        self.atleast = Some((width, height));
        self
    }

    /// Add a single exact resolution.
    ///
    /// This is a convenience for one pair; see [`Self::resolutions`] to set
    /// several at once.
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.resolutions.push((width, height));
        self
    }

    /// Set the exact resolutions, replacing any previously added.
    pub fn resolutions<I: IntoIterator<Item = (u32, u32)>>(mut self, resolutions: I) -> Self {
        self.resolutions = resolutions.into_iter().collect();
        self
    }

    /// Add a single aspect ratio, e.g. `(16, 9)`.
    pub fn ratio(mut self, width: u32, height: u32) -> Self {
        self.ratios.push((width, height));
        self
    }

    /// Set the aspect ratios, replacing any previously added.
    pub fn ratios<I: IntoIterator<Item = (u32, u32)>>(mut self, ratios: I) -> Self {
        self.ratios = ratios.into_iter().collect();
        self
    }

    /// Filter by dominant color.
    pub fn colors<T: Into<Option<Color>>>(mut self, colors: T) -> Self {
        self.colors = colors.into();
        self
    }

    pub fn page<T: Into<Option<u32>>>(mut self, page: T) -> Self {
        self.page = page.into();
        self
    }

    /// Seed for reproducible [`Sorting::Random`] ordering across pages; see
    /// [`crate::seed::generate`].
    pub fn seed<T: Into<Option<S>>, S: Into<String>>(mut self, seed: T) -> Self {
        self.seed = seed.into().map(Into::into);
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        if let Some(categories) = self.categories {
            params.push(("categories", categories.encode()));
        }
        if let Some(purity) = self.purity {
            params.push(("purity", purity.encode()));
        }
        if let Some(sorting) = self.sorting {
            params.push(("sorting", sorting.as_str().to_owned()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_owned()));
        }
        if let Some(top_range) = self.top_range {
            params.push(("topRange", top_range.as_str().to_owned()));
        }
        if let Some((width, height)) = self.atleast {
            params.push(("atleast", format!("{width}x{height}")));
        }
        if !self.resolutions.is_empty() {
            params.push(("resolutions", encode_dimensions(&self.resolutions)));
        }
        if !self.ratios.is_empty() {
            params.push(("ratios", encode_dimensions(&self.ratios)));
        }
        if let Some(colors) = self.colors {
            params.push(("colors", colors.as_hex().to_owned()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(seed) = &self.seed {
            params.push(("seed", seed.clone()));
        }

        params
    }
}

/// One page of search results, pagination metadata included.
#[derive(Debug, PartialEq, Deserialize)]
pub struct SearchResults {
    pub data: Vec<Wallpaper>,
    pub meta: Meta,
}

/// Pagination metadata echoed by listing endpoints.
#[derive(Debug, PartialEq, Deserialize)]
pub struct Meta {
    pub current_page: u64,
    #[serde(default)]
    pub last_page: u64,
    // Served as a number or a numeric string depending on the endpoint.
    #[serde(default, deserialize_with = "utils::lenient_u64")]
    pub per_page: u64,
    #[serde(default)]
    pub total: u64,
    /// Echo of the search terms; a plain string, or an object for `id:`
    /// tag queries.
    #[serde(default)]
    pub query: Option<serde_json::Value>,
    #[serde(default)]
    pub seed: Option<String>,
}

impl Client {
    /// Search for wallpapers matching the query.
    ///
    /// ```no_run
    /// # use wallhaven::client::Client;
    /// # use wallhaven::search::{Query, Sorting};
    /// # fn main() -> Result<(), wallhaven::error::Error> {
    /// let client = Client::new()?;
    /// let results = client.search(&Query::new().q("nature").sorting(Sorting::Views))?;
    ///
    /// for wallpaper in &results.data {
    ///     println!("{} ({})", wallpaper.id, wallpaper.resolution);
    /// }
    /// # Ok(()) }
    /// ```
    pub fn search(&self, query: &Query) -> Result<SearchResults> {
        let url = self.endpoint(&["search"]);
        self.get(&url, &query.to_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{mock, Matcher};

    #[test]
    fn encode_categories_is_positional() {
        for general in [false, true] {
            for anime in [false, true] {
                for people in [false, true] {
                    let encoded = CategoryFilter::new(general, anime, people).encode();
                    let expected = format!(
                        "{}{}{}",
                        u8::from(general),
                        u8::from(anime),
                        u8::from(people)
                    );
                    assert_eq!(encoded, expected);
                    assert!(encoded.chars().all(|c| c == '0' || c == '1'));
                }
            }
        }
    }

    #[test]
    fn encode_purity_is_positional() {
        for sfw in [false, true] {
            for sketchy in [false, true] {
                for nsfw in [false, true] {
                    let encoded = PurityFilter::new(sfw, sketchy, nsfw).encode();
                    assert_eq!(
                        encoded,
                        format!("{}{}{}", u8::from(sfw), u8::from(sketchy), u8::from(nsfw))
                    );
                }
            }
        }
    }

    #[test]
    fn filter_defaults() {
        assert_eq!(CategoryFilter::default().encode(), "110");
        assert_eq!(PurityFilter::default().encode(), "110");
    }

    #[test]
    fn filters_from_membership() {
        assert_eq!(
            CategoryFilter::from([Category::General, Category::People]).encode(),
            "101"
        );
        assert_eq!(CategoryFilter::from(Category::Anime).encode(), "010");
        assert_eq!(
            PurityFilter::from([Purity::Sketchy, Purity::Nsfw]).encode(),
            "011"
        );
    }

    #[test]
    fn encode_dimensions_single_pair_matches_one_element_list() {
        let single = encode_dimensions(&[(1920, 1080)]);
        let list: Vec<(u32, u32)> = vec![(1920, 1080)];
        assert_eq!(single, "1920x1080");
        assert_eq!(single, encode_dimensions(&list));
    }

    #[test]
    fn encode_dimensions_preserves_order_and_duplicates() {
        assert_eq!(
            encode_dimensions(&[(2560, 1440), (1920, 1080), (1920, 1080)]),
            "2560x1440,1920x1080,1920x1080"
        );
    }

    #[test]
    fn empty_query_has_no_params() {
        assert!(Query::new().to_params().is_empty());
    }

    #[test]
    fn build_query() {
        let query = Query::new()
            .q("nature")
            .categories([Category::General])
            .purity([Purity::Sfw, Purity::Sketchy])
            .sorting(Sorting::Toplist)
            .order(Order::Asc)
            .top_range(TopRange::OneMonth)
            .atleast(1920, 1080)
            .resolutions([(1920, 1080), (2560, 1440)])
            .ratio(16, 9)
            .colors(Color::ScienceBlue)
            .page(2)
            .seed("aX9bQ2");

        assert_eq!(
            query.to_params(),
            vec![
                ("q", String::from("nature")),
                ("categories", String::from("100")),
                ("purity", String::from("110")),
                ("sorting", String::from("toplist")),
                ("order", String::from("asc")),
                ("topRange", String::from("1M")),
                ("atleast", String::from("1920x1080")),
                ("resolutions", String::from("1920x1080,2560x1440")),
                ("ratios", String::from("16x9")),
                ("colors", String::from("0066cc")),
                ("page", String::from("2")),
                ("seed", String::from("aX9bQ2")),
            ]
        );
    }

    #[test]
    fn sort_tokens() {
        assert_eq!(Sorting::DateAdded.as_str(), "date_added");
        assert_eq!(Sorting::Toplist.as_str(), "toplist");
        assert_eq!(Order::Desc.as_str(), "desc");
        assert_eq!(Order::Asc.as_str(), "asc");
        assert_eq!(TopRange::OneDay.as_str(), "1d");
        assert_eq!(TopRange::OneYear.as_str(), "1y");
    }

    #[test]
    fn color_hex_codes() {
        assert_eq!(Color::Lonestar.as_hex(), "660000");
        assert_eq!(Color::GunPowder.as_hex(), "424153");
        assert_eq!(Color::White.as_hex(), "ffffff");
    }

    #[test]
    fn search_passes_meta_through() {
        let client = crate::client::Client::builder()
            .base_url(mockito::server_url())
            .build()
            .unwrap();

        let _m = mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("q".into(), "nature".into()))
            .with_body(r#"{"data": [], "meta": {"current_page": 1}}"#)
            .create();

        let results = client.search(&Query::new().q("nature")).unwrap();
        assert!(results.data.is_empty());
        assert_eq!(results.meta.current_page, 1);
        assert_eq!(results.meta.last_page, 0);
        assert_eq!(results.meta.seed, None);
    }
}
