//! End-to-end catalog scenarios.

use chrono::NaiveDate;
use storyshelf_catalog::{
    CatalogOptions, CatalogView, Corpus, Renderer, SiteContext, TagColor, Variant,
};
use storyshelf_content::{Story, TagCounts};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
}

/// Two stories, counts {ai: 5, refactor: 2, git: 1}.
fn two_story_view() -> CatalogView {
    let stories = vec![
        Story::new("Refactor with Claude", "refactor-with-claude", date())
            .with_tags(["ai", "refactor"]),
        Story::new("Rebase tutorial", "rebase-tutorial", date()).with_tags(["git"]),
    ];
    let counts: TagCounts = [("ai", 5), ("refactor", 2), ("git", 1)].into_iter().collect();
    let all_tags = ["ai", "git", "refactor"].map(String::from).to_vec();
    CatalogView::new(
        Corpus::new(stories, counts, all_tags),
        CatalogOptions::default(),
    )
}

fn visible_titles(view: &CatalogView) -> Vec<&str> {
    view.visible_items().iter().map(|s| s.title.as_str()).collect()
}

// ============================================================================
// Filter scenarios
// ============================================================================

#[test]
fn test_tag_git_selects_rebase() {
    let mut view = two_story_view();
    view.toggle_tag("git");
    assert_eq!(visible_titles(&view), vec!["Rebase tutorial"]);
}

#[test]
fn test_query_rebase_selects_rebase() {
    let mut view = two_story_view();
    view.set_query("rebase");
    assert_eq!(visible_titles(&view), vec!["Rebase tutorial"]);
}

#[test]
fn test_tag_ai_and_query_rebase_is_empty() {
    let mut view = two_story_view();
    view.toggle_tag("ai");
    view.set_query("rebase");
    assert!(visible_titles(&view).is_empty());
    assert!(view.is_empty_result());
    assert!(view.has_active_filters());
}

#[test]
fn test_clear_after_tag_and_query() {
    let mut view = two_story_view();
    view.toggle_tag("ai");
    view.set_query("x");
    view.clear_filters();
    assert!(view.state().selected_tags().is_empty());
    assert_eq!(view.state().query(), "");
    assert_eq!(visible_titles(&view).len(), 2);
}

#[test]
fn test_typo_in_query_still_matches() {
    let stories = vec![
        Story::new("Rebase tutorial", "rebase", date()),
        Story::new("A short story", "story", date()),
    ];
    let mut view = CatalogView::new(Corpus::from_stories(stories), CatalogOptions::default());
    view.set_query("stroy");
    assert_eq!(visible_titles(&view), vec!["A short story"]);
}

#[test]
fn test_whitespace_query_shows_all_but_is_active() {
    let mut view = two_story_view();
    view.set_query("   ");
    assert_eq!(visible_titles(&view).len(), 2);
    assert!(view.has_active_filters());
}

// ============================================================================
// Rendering contract
// ============================================================================

#[test]
fn test_card_tag_cap_and_overflow() {
    let stories = vec![Story::new("Kitchen sink", "sink", date())
        .with_tags(["t1", "t2", "t3", "t4", "t5", "t6", "t7"])];
    let counts: TagCounts = [
        ("t1", 1),
        ("t2", 6),
        ("t3", 1),
        ("t4", 3),
        ("t5", 6),
        ("t6", 1),
        ("t7", 2),
    ]
    .into_iter()
    .collect();
    let all_tags = ["t1", "t2", "t3", "t4", "t5", "t6", "t7"].map(String::from).to_vec();
    let view = CatalogView::new(
        Corpus::new(stories, counts, all_tags),
        CatalogOptions::default(),
    );

    let cards = view.cards();
    let shown: Vec<&str> = cards[0].tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(shown, vec!["t2", "t5", "t4"]);
    assert_eq!(cards[0].overflow, Some(4));
}

#[test]
fn test_filter_list_order_and_colors() {
    let view = two_story_view();
    let tags = view.sorted_tags();
    let names: Vec<&str> = tags.iter().map(|t| t.chip.name.as_str()).collect();
    assert_eq!(names, vec!["ai", "refactor", "git"]);
    assert_eq!(tags[0].chip.color, TagColor::Blue);
    assert_eq!(tags[1].chip.color, TagColor::Grey);
    assert_eq!(tags[2].chip.color, TagColor::Grey);
}

#[test]
fn test_navigation_under_site_base() {
    let stories = vec![Story::new("Rebase tutorial", "rebase", date())];
    let options = CatalogOptions {
        site_base: "/shelf/".into(),
        base_path: "/stories/".into(),
        ..CatalogOptions::default()
    };
    let view = CatalogView::new(Corpus::from_stories(stories), options);
    assert_eq!(view.cards()[0].href, "/shelf/stories/rebase");
}

#[test]
fn test_rotation_cycles_every_six_cards() {
    let stories: Vec<Story> = (0..8)
        .map(|i| Story::new(format!("Story {i}"), format!("s{i}"), date()))
        .collect();
    let view = CatalogView::new(Corpus::from_stories(stories), CatalogOptions::default());
    let cards = view.cards();
    assert_eq!(cards[0].rotation, cards[6].rotation);
    assert_eq!(cards[1].rotation, cards[7].rotation);
    assert_ne!(cards[0].rotation, cards[1].rotation);
}

#[test]
fn test_rendered_page_tracks_state() {
    let mut view = two_story_view();
    let renderer = Renderer::new().unwrap();
    let site = SiteContext::for_view("Storyshelf", &view);

    let html = renderer.render_catalog(&view, &site).unwrap();
    assert!(html.contains("Showing 2 of 2 items"));

    view.toggle_tag("git");
    let html = renderer.render_catalog(&view, &site).unwrap();
    assert!(html.contains("Showing 1 of 2 items"));
    assert!(html.contains(r#"aria-pressed="true""#));
    assert!(html.contains("Clear filters"));
}

#[test]
fn test_rendered_page_hides_cards_outside_filters() {
    let mut view = two_story_view();
    view.set_query("rebsae");
    let renderer = Renderer::new().unwrap();
    let site = SiteContext::for_view("Storyshelf", &view);
    let html = renderer.render_catalog(&view, &site).unwrap();

    // Every story is in the page; the ones filtered out carry `hidden`.
    let hidden: Vec<bool> = ["refactor-with-claude", "rebase-tutorial"]
        .iter()
        .map(|slug| {
            let start = html.find(&format!(r#"data-slug="{slug}""#)).unwrap();
            let end = start + html[start..].find('>').unwrap();
            html[start..end].ends_with(" hidden")
        })
        .collect();
    let expected: Vec<bool> = (0..2)
        .map(|pos| !view.visible_positions().contains(&pos))
        .collect();
    assert_eq!(hidden, vec![true, false]);
    assert_eq!(hidden, expected);
    assert!(html.contains(r#""query":"rebsae""#));
}

#[test]
fn test_technical_variant_has_no_rotation() {
    let options = CatalogOptions {
        variant: Variant::Technical,
        ..CatalogOptions::default()
    };
    let stories = vec![Story::new("Rebase tutorial", "rebase", date()).with_tile_image("rebase.png")];
    let view = CatalogView::new(Corpus::from_stories(stories), options);
    let card = &view.cards()[0];
    assert!(card.rotation.is_none());
    assert_eq!(card.tile_src.as_deref(), Some("/stories/rebase.png"));
}
