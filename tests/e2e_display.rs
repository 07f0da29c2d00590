// ElasChat - tests/e2e_display.rs
//
// End-to-end tests for the display pipeline: catalogue records through the
// search, view builders, and derived values, the way a screen consumes them.
// The clock is pinned so relative labels are deterministic.

use chrono::{DateTime, TimeZone, Utc};
use elaschat::app::discover;
use elaschat::app::views::{self, ViewContext};
use elaschat::core::catalog::Catalog;
use elaschat::core::count::format_count;
use elaschat::core::identity::{color_for_name, identity, initials};
use elaschat::core::model::NotificationKind;
use elaschat::core::relative_time::{time_ago, time_ago_with};
use elaschat::platform::config::load_config;
use tempfile::TempDir;

fn pinned_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 16, 0, 0).unwrap()
}

// =============================================================================
// Derived values
// =============================================================================

#[test]
fn e2e_avatar_identity_is_stable_per_name() {
    let a = identity("Jane Doe");
    let b = identity("Jane Doe");
    assert_eq!(a, b);
    assert_eq!(a.initials, "JD");
    assert_eq!(a.background_color.to_hex(), "#DDA0DD");

    assert_eq!(color_for_name("Elastus Creator").to_hex(), "#98D8C8");
    assert_eq!(color_for_name("Prince").to_hex(), "#FF6B6B");
    assert_eq!(initials("mary ann smith"), "MA");
    assert_eq!(initials(""), "");
}

#[test]
fn e2e_relative_labels_at_each_threshold() {
    let now = pinned_now();
    assert_eq!(time_ago("2024-01-15T15:59:30Z", now).unwrap(), "Just now");
    assert_eq!(time_ago("2024-01-15T15:15:00Z", now).unwrap(), "45m ago");
    assert_eq!(time_ago("2024-01-15T11:00:00Z", now).unwrap(), "5h ago");
    assert_eq!(time_ago("2024-01-12T16:00:00Z", now).unwrap(), "3d ago");
    assert_eq!(time_ago("2024-01-01T12:00:00Z", now).unwrap(), "1/1/2024");
    assert!(time_ago("yesterday", now).is_err());
}

#[test]
fn e2e_compact_counts() {
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1_500), "1.5K");
    assert_eq!(format_count(45_200), "45.2K");
    assert_eq!(format_count(2_300_000), "2.3M");
}

// =============================================================================
// Screens
// =============================================================================

/// Discover tab: a search produces cards with derived values.
#[test]
fn e2e_discover_search_to_cards() {
    let catalog = Catalog::mock();
    let ctx = ViewContext::at(pinned_now());

    // Hashtag on v2, caption text on v5.
    let found = discover::search_videos(&catalog, "beautiful");
    assert_eq!(found.len(), 2);
    let cards = views::video_cards(&catalog, &found, &ctx);
    for card in &cards {
        assert!(card.author.handle.starts_with('@'));
        assert_eq!(card.author.avatar.initials.chars().count(), 2);
        assert!(!card.likes.is_empty());
    }
}

/// Discover tab: selecting a trending chip searches for its tag.
#[test]
fn e2e_trending_chip_runs_search() {
    let catalog = Catalog::mock();
    let chips = views::trending(&catalog);
    assert_eq!(chips.len(), catalog.trending.len());

    let chip = chips.iter().find(|c| c.label == "#funny").unwrap();
    assert_eq!(chip.posts, "567K");
    let ids: Vec<&str> = discover::search_videos(&catalog, &chip.tag)
        .into_iter()
        .map(|v| v.id.as_str())
        .collect();
    assert_eq!(ids, vec!["v3"]);

    // Tags with no matching video yield an empty grid.
    let chip = chips.iter().find(|c| c.tag == "cooking").unwrap();
    assert!(discover::search_videos(&catalog, &chip.tag).is_empty());
}

/// Notifications tab: filtering by kind keeps only that kind.
#[test]
fn e2e_notification_filter_by_kind() {
    let catalog = Catalog::mock();
    let ctx = ViewContext::at(pinned_now());

    for kind in NotificationKind::all() {
        let selected = catalog.notifications_of_kind(*kind);
        let rows = views::notification_rows(&catalog, &selected, &ctx);
        assert!(rows.iter().all(|r| r.kind == *kind));
    }
    assert_eq!(catalog.unread_notification_count(), 2);
}

/// Config display options flow through to the relative-time labels.
#[test]
fn e2e_config_changes_absolute_date_window() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[display]\ndate_format = \"%Y-%m-%d\"\nrelative_days = 2\n",
    )
    .unwrap();
    let (config, warnings) = load_config(dir.path());
    assert!(warnings.is_empty(), "warnings: {warnings:?}");

    let options = config.time_ago_options();
    let now = pinned_now();
    assert_eq!(
        time_ago_with("2024-01-14T12:00:00Z", now, &options).unwrap(),
        "1d ago"
    );
    assert_eq!(
        time_ago_with("2024-01-12T16:00:00Z", now, &options).unwrap(),
        "2024-01-12"
    );
}

/// JSON rows use camelCase field names.
#[test]
fn e2e_rows_serialise_as_camel_case() {
    let catalog = Catalog::mock();
    let rows = views::feed(&catalog, &ViewContext::at(pinned_now()));
    let json = serde_json::to_value(&rows[0]).unwrap();
    assert!(json.get("soundTitle").is_some());
    assert_eq!(json["author"]["handle"], "@elastus");
    assert_eq!(json["author"]["avatar"]["initials"], "EC");
}
