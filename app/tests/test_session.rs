//! FILENAME: tests/test_session.rs
//! Integration tests for the interactive filter session.

mod common;

use app_lib::render::load_json;
use app_lib::{Session, SessionCommand, SessionError};
use common::TestHarness;
use pipeline_engine::{CategoryFilter, ConfigError, PipelineCache};

fn harness_cache(harness: &TestHarness) -> PipelineCache {
    PipelineCache::build(&store::load_snapshot(&harness.config.db_path).unwrap())
}

#[test]
fn test_session_starts_from_snapshot_defaults() {
    let harness = TestHarness::with_database();
    let cache = harness_cache(&harness);
    let session = Session::new(&cache, &harness.config.output_dir);

    let (first, last) = cache.order_date_bounds().unwrap();
    assert_eq!(session.config().date_range.start, first);
    assert_eq!(session.config().date_range.end, last);
    assert!(session.config().category.is_all());
    assert_eq!(session.view().kpis.total_orders, 150);
}

#[test]
fn test_rejected_command_keeps_previous_config() {
    let harness = TestHarness::with_database();
    let cache = harness_cache(&harness);
    let mut session = Session::new(&cache, &harness.config.output_dir);

    assert!(session.apply(&SessionCommand::Top(7)).unwrap());
    let before = session.config().clone();

    assert_eq!(
        session.apply(&SessionCommand::Top(50)),
        Err(SessionError::Filter(ConfigError::TopNOutOfRange(50)))
    );
    assert!(matches!(
        session.apply(&SessionCommand::Category(CategoryFilter::parse("furniture"))),
        Err(SessionError::UnknownCategory(_))
    ));
    assert_eq!(session.config(), &before);
    assert_eq!(session.view().filter, before);
}

#[test]
fn test_non_filter_commands_do_not_recompute() {
    let harness = TestHarness::with_database();
    let cache = harness_cache(&harness);
    let mut session = Session::new(&cache, &harness.config.output_dir);

    assert!(!session.apply(&SessionCommand::Show).unwrap());
    assert!(!session.apply(&SessionCommand::Help).unwrap());
}

#[test]
fn test_scripted_session() {
    let harness = TestHarness::with_database();
    let category = harness_cache(&harness).categories()[0].clone();
    let script = format!(
        "categories\ncategory {}\ntop 5\nreviews off\ntop 99\nbogus\nexport view.json\nquit\nshow\n",
        category
    );
    let output = harness.run_with_input(&["interactive"], &script).unwrap();

    assert!(output.contains("Type 'help' for commands."));
    assert!(output.contains(&format!("category {} | top 5 | reviews off", category)));
    assert!(output.contains("error: top N must be between 5 and 20, got 99"));
    assert!(output.contains("error: unknown command 'bogus'"));
    assert!(output.contains("exported"));

    let view = load_json(&harness.config.output_dir.join("view.json")).unwrap();
    assert_eq!(view.filter.category, CategoryFilter::Only(category));
    assert_eq!(view.filter.top_n, 5);
    assert!(view.recent_reviews.is_none());
    assert!(view.top_products.len() <= 5);
}

#[test]
fn test_session_ends_at_end_of_input() {
    let harness = TestHarness::with_database();
    let output = harness.run_with_input(&["interactive"], "range 2024-01-01 2024-03-31\n").unwrap();
    assert!(output.contains("range 2024-01-01 .. 2024-03-31"));
}
