// src/site/graph.rs
//
// Turns the resolved listing set into the complete set of pages to emit.
// The descriptor set produced here is the single source of truth for
// rendering, the output manifest and the sitemap: a path exists in the
// output directory after a build iff exactly one descriptor names it.

use crate::domain::CanonicalListing;
use crate::geocode::GeoPoint;
use crate::site::slug::slugify;
use serde::Serialize;
use std::collections::HashMap;

/// Hashtag chips shown on a detail page. Only the listing's own feature
/// tags qualify, so every chip links to a tag page that actually exists.
const MAX_HASHTAGS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Listing,
    AreaIndex,
    TagIndex,
    PriceIndex,
    Robots,
    Sitemap,
}

#[derive(Debug, Clone)]
pub struct PageDescriptor {
    /// Output file path relative to the output directory,
    /// e.g. `index.html`, `some-slug/index.html`, `area/x/index.html`.
    pub path: String,
    pub kind: PageKind,
    pub payload: PagePayload,
}

impl PageDescriptor {
    /// Directory-style URL path for links and the sitemap: `""` for the
    /// home page, `"some-slug/"` for nested pages, the file path itself
    /// for non-HTML artifacts.
    pub fn url_path(&self) -> String {
        match self.path.strip_suffix("index.html") {
            Some(dir) => dir.to_string(),
            None => self.path.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum PagePayload {
    Home(HomePayload),
    Detail(DetailPayload),
    Category(CategoryPayload),
    Robots,
    Sitemap(SitemapPayload),
}

/// One entry in a listing card list (home page and category pages).
#[derive(Debug, Clone)]
pub struct ListingCard {
    pub title: String,
    pub href: String,
    pub meta_line: String,
    pub is_featured: bool,
    pub state_tags: Vec<String>,
}

/// Map payload for the home page, serialized straight into the page as
/// JSON. Only listings with resolved coordinates appear here.
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub price: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct HomePayload {
    pub cards: Vec<ListingCard>,
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone)]
pub struct Hashtag {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct DetailPayload {
    pub listing: CanonicalListing,
    pub point: Option<GeoPoint>,
    pub hashtags: Vec<Hashtag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Area,
    Tag,
    PriceBucket,
}

#[derive(Debug, Clone)]
pub struct CategoryPayload {
    pub kind: CategoryKind,
    pub name: String,
    /// Area of the newest member, used by tag pages for their intro text.
    pub area_hint: String,
    pub cards: Vec<ListingCard>,
}

#[derive(Debug, Clone)]
pub struct SitemapPayload {
    /// Directory-style URL paths of every HTML page, deduplicated, home
    /// first. `lastmod` is stamped at render time, not here, so a warm
    /// rebuild produces an identical descriptor set.
    pub paths: Vec<String>,
}

/// A named bucket of listings sharing an area, feature tag or price
/// bucket. Members are indices into the build's listing slice, ordered
/// newest-first. Recomputed from scratch every build.
struct CategoryGroup {
    name: String,
    slug: String,
    members: Vec<usize>,
}

/// Collect groups in first-appearance order while deduplicating slugs
/// within one category kind.
fn collect_groups(values_per_listing: &[(usize, Vec<&str>)]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut taken_slugs: Vec<String> = Vec::new();

    for (index, values) in values_per_listing {
        for value in values {
            if let Some(group) = groups.iter_mut().find(|g| g.name == *value) {
                group.members.push(*index);
                continue;
            }
            let mut slug = slugify(value);
            if taken_slugs.contains(&slug) {
                slug = format!("{slug}-{}", groups.len());
            }
            taken_slugs.push(slug.clone());
            groups.push(CategoryGroup {
                name: value.to_string(),
                slug,
                members: vec![*index],
            });
        }
    }
    groups
}

fn card_for(listing: &CanonicalListing, href: String) -> ListingCard {
    let mut title = format!("{}｜{}", listing.area, listing.name);
    if !listing.layout.is_empty() {
        title.push('｜');
        title.push_str(&listing.layout);
    }

    let mut bits: Vec<String> = Vec::new();
    if !listing.layout.is_empty() {
        bits.push(listing.layout.clone());
    }
    if !listing.size_text.is_empty() {
        bits.push(format!("{}坪", listing.size_text));
    }
    if !listing.parking.is_empty() {
        bits.push(listing.parking.clone());
    }
    if let Some(price) = listing.price_numeric {
        bits.push(format!("{price}萬"));
    }

    ListingCard {
        title,
        href,
        meta_line: bits.join(" "),
        is_featured: listing.is_featured,
        state_tags: listing.state_tags.clone(),
    }
}

/// Build the full PageDescriptor set for one run.
///
/// Input order is ingestion order; later rows are newer, so card lists
/// are emitted in reverse. Inactive listings are filtered here too:
/// they must not surface in any page, category or the sitemap.
/// `points` is keyed by listing id.
pub fn build_site_graph(
    listings: &[CanonicalListing],
    points: &HashMap<String, GeoPoint>,
) -> Vec<PageDescriptor> {
    let active: Vec<&CanonicalListing> = listings.iter().filter(|l| l.is_active).collect();

    // Slug assignment runs in ingestion order so an appended row never
    // changes the URL of an existing listing.
    let mut slugs: Vec<String> = Vec::with_capacity(active.len());
    for listing in &active {
        let mut slug = slugify(&format!("{}-{}", listing.area, listing.name));
        if slugs.contains(&slug) {
            slug = format!("{slug}-{}", listing.id);
        }
        slugs.push(slug);
    }

    // Newest-first iteration order for every card list.
    let newest_first: Vec<usize> = (0..active.len()).rev().collect();

    let mut pages: Vec<PageDescriptor> = Vec::new();

    // Home: featured cards pinned on top, then the rest, newest-first
    // within each half. Markers only for listings with coordinates.
    let mut home_cards: Vec<ListingCard> = Vec::new();
    for &i in newest_first.iter().filter(|&&i| active[i].is_featured) {
        home_cards.push(card_for(active[i], format!("./{}/", slugs[i])));
    }
    for &i in newest_first.iter().filter(|&&i| !active[i].is_featured) {
        home_cards.push(card_for(active[i], format!("./{}/", slugs[i])));
    }

    let markers: Vec<MapMarker> = newest_first
        .iter()
        .filter_map(|&i| {
            let listing = active[i];
            points.get(&listing.id).map(|point| MapMarker {
                id: listing.id.clone(),
                name: listing.name.clone(),
                lat: point.lat,
                lng: point.lng,
                price: listing.price_display(),
                href: format!("{}/", slugs[i]),
            })
        })
        .collect();

    pages.push(PageDescriptor {
        path: "index.html".into(),
        kind: PageKind::Home,
        payload: PagePayload::Home(HomePayload {
            cards: home_cards,
            markers,
        }),
    });

    // Category groups are collected before detail pages so hashtag chips
    // can reuse the exact slug each tag page will live at. Only values
    // observed on at least one active listing get a group; a bucket whose
    // last listing disappeared simply produces no descriptor and the
    // reconciler removes the stale page.
    let area_values: Vec<(usize, Vec<&str>)> = newest_first
        .iter()
        .map(|&i| (i, vec![active[i].area.as_str()]))
        .collect();
    let tag_values: Vec<(usize, Vec<&str>)> = newest_first
        .iter()
        .map(|&i| {
            (
                i,
                active[i].feature_tags.iter().map(String::as_str).collect(),
            )
        })
        .collect();
    let bucket_values: Vec<(usize, Vec<&str>)> = newest_first
        .iter()
        .map(|&i| (i, vec![active[i].price_bucket.as_str()]))
        .collect();

    let tag_groups = collect_groups(&tag_values);
    let tag_slugs: HashMap<&str, &str> = tag_groups
        .iter()
        .map(|g| (g.name.as_str(), g.slug.as_str()))
        .collect();

    // Detail pages, one per active listing.
    for (i, listing) in active.iter().enumerate() {
        let hashtags = listing
            .feature_tags
            .iter()
            .take(MAX_HASHTAGS)
            .filter_map(|tag| {
                tag_slugs.get(tag.as_str()).map(|slug| Hashtag {
                    label: tag.clone(),
                    href: format!("../k/{slug}/"),
                })
            })
            .collect();

        pages.push(PageDescriptor {
            path: format!("{}/index.html", slugs[i]),
            kind: PageKind::Listing,
            payload: PagePayload::Detail(DetailPayload {
                listing: (*listing).clone(),
                point: points.get(&listing.id).copied(),
                hashtags,
            }),
        });
    }

    let sections = [
        (
            CategoryKind::Area,
            PageKind::AreaIndex,
            "area",
            collect_groups(&area_values),
        ),
        (CategoryKind::Tag, PageKind::TagIndex, "k", tag_groups),
        (
            CategoryKind::PriceBucket,
            PageKind::PriceIndex,
            "price",
            collect_groups(&bucket_values),
        ),
    ];

    for (category_kind, page_kind, prefix, groups) in sections {
        for group in groups {
            let cards = group
                .members
                .iter()
                .map(|&i| card_for(active[i], format!("../../{}/", slugs[i])))
                .collect();
            let area_hint = group
                .members
                .first()
                .map(|&i| active[i].area.clone())
                .unwrap_or_default();

            pages.push(PageDescriptor {
                path: format!("{prefix}/{}/index.html", group.slug),
                kind: page_kind,
                payload: PagePayload::Category(CategoryPayload {
                    kind: category_kind,
                    name: group.name,
                    area_hint,
                    cards,
                }),
            });
        }
    }

    pages.push(PageDescriptor {
        path: "robots.txt".into(),
        kind: PageKind::Robots,
        payload: PagePayload::Robots,
    });

    // Sitemap last: it enumerates every HTML page emitted above.
    let mut seen = Vec::new();
    for page in &pages {
        if page.path.ends_with("index.html") {
            let url_path = page.url_path();
            if !seen.contains(&url_path) {
                seen.push(url_path);
            }
        }
    }
    pages.push(PageDescriptor {
        path: "sitemap.xml".into(),
        kind: PageKind::Sitemap,
        payload: PagePayload::Sitemap(SitemapPayload { paths: seen }),
    });

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RawRow;

    fn listing(cols: &[(&str, &str)]) -> CanonicalListing {
        CanonicalListing::from_row(&RawRow::new(
            cols.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    fn paths(pages: &[PageDescriptor]) -> Vec<&str> {
        pages.iter().map(|p| p.path.as_str()).collect()
    }

    #[test]
    fn one_detail_page_per_active_listing() {
        let listings = vec![
            listing(&[("案名", "A宅"), ("區域", "西區")]),
            listing(&[("案名", "B宅"), ("區域", "北區")]),
        ];
        let pages = build_site_graph(&listings, &HashMap::new());

        let details: Vec<_> = pages
            .iter()
            .filter(|p| p.kind == PageKind::Listing)
            .collect();
        assert_eq!(details.len(), 2);
        assert!(paths(&pages).contains(&"西區-A宅/index.html"));
        assert!(paths(&pages).contains(&"北區-B宅/index.html"));
    }

    #[test]
    fn inactive_listings_appear_nowhere() {
        let listings = vec![
            listing(&[("案名", "A宅"), ("區域", "西區"), ("關鍵字", "平車")]),
            listing(&[
                ("案名", "B宅"),
                ("區域", "獨區"),
                ("狀態", "OFF"),
                ("關鍵字", "獨家標籤"),
            ]),
        ];
        let off_id = listings[1].id.clone();
        let mut points = HashMap::new();
        points.insert(off_id.clone(), GeoPoint { lat: 1.0, lng: 2.0 });

        let pages = build_site_graph(&listings, &points);

        for page in &pages {
            assert!(!page.path.contains("B宅"), "stale path {}", page.path);
            match &page.payload {
                PagePayload::Home(home) => {
                    assert!(home.cards.iter().all(|c| !c.title.contains("B宅")));
                    assert!(home.markers.iter().all(|m| m.id != off_id));
                }
                PagePayload::Detail(d) => assert_ne!(d.listing.id, off_id),
                PagePayload::Category(c) => {
                    assert_ne!(c.name, "獨區");
                    assert_ne!(c.name, "獨家標籤");
                    assert!(c.cards.iter().all(|card| !card.title.contains("B宅")));
                }
                _ => {}
            }
        }
    }

    #[test]
    fn category_pages_only_for_observed_values() {
        let listings = vec![
            listing(&[("案名", "A宅"), ("區域", "西區"), ("價格", "900萬")]),
            listing(&[
                ("案名", "B宅"),
                ("區域", "西區"),
                ("價格", "1300萬"),
                ("關鍵字", "平車"),
            ]),
        ];
        let pages = build_site_graph(&listings, &HashMap::new());

        let areas: Vec<_> = pages
            .iter()
            .filter(|p| p.kind == PageKind::AreaIndex)
            .collect();
        assert_eq!(areas.len(), 1, "both listings share one area");

        let tags: Vec<_> = pages
            .iter()
            .filter(|p| p.kind == PageKind::TagIndex)
            .collect();
        assert_eq!(tags.len(), 1);

        let buckets: Vec<_> = pages
            .iter()
            .filter(|p| p.kind == PageKind::PriceIndex)
            .collect();
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn card_lists_are_newest_first() {
        let listings = vec![
            listing(&[("案名", "舊宅"), ("區域", "西區")]),
            listing(&[("案名", "新宅"), ("區域", "西區")]),
        ];
        let pages = build_site_graph(&listings, &HashMap::new());

        let PagePayload::Home(home) = &pages[0].payload else {
            panic!("home first");
        };
        assert!(home.cards[0].title.contains("新宅"));
        assert!(home.cards[1].title.contains("舊宅"));

        let area = pages
            .iter()
            .find(|p| p.kind == PageKind::AreaIndex)
            .unwrap();
        let PagePayload::Category(c) = &area.payload else {
            panic!("category payload");
        };
        assert!(c.cards[0].title.contains("新宅"));
    }

    #[test]
    fn featured_cards_are_pinned_on_home() {
        let listings = vec![
            listing(&[("案名", "主打宅"), ("區域", "西區"), ("精選", "是")]),
            listing(&[("案名", "新宅"), ("區域", "西區")]),
        ];
        let pages = build_site_graph(&listings, &HashMap::new());
        let PagePayload::Home(home) = &pages[0].payload else {
            panic!("home first");
        };
        assert!(home.cards[0].title.contains("主打宅"));
        assert!(home.cards[0].is_featured);
    }

    #[test]
    fn markers_only_for_geocoded_listings() {
        let listings = vec![
            listing(&[("案名", "有座標"), ("地址", "某路1號")]),
            listing(&[("案名", "沒座標"), ("地址", "某路2號")]),
        ];
        let mut points = HashMap::new();
        points.insert(listings[0].id.clone(), GeoPoint { lat: 24.1, lng: 120.6 });

        let pages = build_site_graph(&listings, &points);
        let PagePayload::Home(home) = &pages[0].payload else {
            panic!("home first");
        };
        assert_eq!(home.markers.len(), 1);
        assert_eq!(home.markers[0].id, listings[0].id);
        assert_eq!(home.cards.len(), 2, "cards do not require coordinates");
    }

    #[test]
    fn sitemap_lists_every_html_page_once() {
        let listings = vec![
            listing(&[("案名", "A宅"), ("區域", "西區"), ("關鍵字", "平車,電梯")]),
            listing(&[("案名", "B宅"), ("區域", "北區")]),
        ];
        let pages = build_site_graph(&listings, &HashMap::new());

        let html_pages = pages
            .iter()
            .filter(|p| p.path.ends_with("index.html"))
            .count();
        let sitemap = pages.last().unwrap();
        assert_eq!(sitemap.kind, PageKind::Sitemap);
        let PagePayload::Sitemap(s) = &sitemap.payload else {
            panic!("sitemap payload");
        };
        assert_eq!(s.paths.len(), html_pages);
        assert_eq!(s.paths[0], "", "home page first");

        let mut deduped = s.paths.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), s.paths.len());
    }

    #[test]
    fn duplicate_slugs_get_id_suffix() {
        let listings = vec![
            listing(&[("案名", "A宅"), ("區域", "西區"), ("地址", "一街1號")]),
            listing(&[("案名", "A宅"), ("區域", "西區"), ("地址", "二街2號")]),
        ];
        let pages = build_site_graph(&listings, &HashMap::new());
        let details: Vec<_> = pages
            .iter()
            .filter(|p| p.kind == PageKind::Listing)
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(details.len(), 2);
        assert_ne!(details[0], details[1]);
        assert!(details[1].contains(&listings[1].id));
    }

    #[test]
    fn padded_tag_variants_share_one_group() {
        let listings = vec![
            listing(&[("案名", "A宅"), ("關鍵字", "平車 , 電梯")]),
            listing(&[("案名", "B宅"), ("關鍵字", " 平車")]),
        ];
        let pages = build_site_graph(&listings, &HashMap::new());
        let tag_pages: Vec<_> = pages
            .iter()
            .filter(|p| p.kind == PageKind::TagIndex)
            .collect();
        assert_eq!(tag_pages.len(), 2, "平車 shared, 電梯 alone");

        let shared = tag_pages
            .iter()
            .find_map(|p| match &p.payload {
                PagePayload::Category(c) if c.name == "平車" => Some(c),
                _ => None,
            })
            .unwrap();
        assert_eq!(shared.cards.len(), 2);
    }

    #[test]
    fn hashtags_link_into_tag_namespace() {
        let listings = vec![listing(&[("案名", "A宅"), ("關鍵字", "國美特區")])];
        let pages = build_site_graph(&listings, &HashMap::new());
        let detail = pages
            .iter()
            .find(|p| p.kind == PageKind::Listing)
            .unwrap();
        let PagePayload::Detail(d) = &detail.payload else {
            panic!("detail payload");
        };
        assert_eq!(d.hashtags[0].href, "../k/國美特區/");
    }
}
