use laurel_leveling::{EventGrant, LevelingConfig, Progress};

fn sample_config() -> LevelingConfig {
    LevelingConfig::new(10.0, 5, 100, 0, 50).expect("valid config")
}

fn apply_events(config: &LevelingConfig, start: Progress, count: u64) -> (Progress, usize) {
    let mut progress = start;
    let mut level_ups = 0;
    for _ in 0..count {
        let grant = config.grant_event_xp(Some(progress));
        if grant.level_up().is_some() {
            level_ups += 1;
        }
        progress = grant.progress();
    }
    (progress, level_ups)
}

#[test]
fn sixty_events_at_level_three_reach_level_four() {
    let config = sample_config();
    assert_eq!(config.required_xp(3), 60);

    let (after_59, ups) = apply_events(&config, Progress::new(0, 3), 59);
    assert_eq!(after_59, Progress::new(59, 3));
    assert_eq!(ups, 0);

    let grant = config.grant_event_xp(Some(after_59));
    assert_eq!(grant.progress(), Progress::new(0, 4));
    assert_eq!(grant.level_up(), Some(4));
}

#[test]
fn unseen_user_is_registered_without_xp() {
    let config = sample_config();
    match config.grant_event_xp(None) {
        EventGrant::Registered(progress) => assert_eq!(progress, Progress::new(0, 0)),
        other => panic!("expected registration, got {other:?}"),
    }
}

#[test]
fn bulk_grant_matches_repeated_events() {
    let configs = [
        sample_config(),
        LevelingConfig::new(1.3, 2, 17, 0, 12).expect("valid config"),
        LevelingConfig::new(0.0, 3, 3, 0, 1_000).expect("valid config"),
        LevelingConfig::new(2.5, 1, 40, -5, 30).expect("valid config"),
    ];
    let starts = [
        Progress::new(0, 0),
        Progress::new(4, 1),
        Progress::new(0, 7),
        Progress::new(2, -5),
    ];
    let amounts = [1_u64, 2, 19, 60, 137, 500, 2_048];

    for config in &configs {
        for start in starts {
            let (start_level, _) = config.clamp_level(start.level);
            let start = Progress::new(start.xp.min(config.required_xp(start_level) - 1), start_level);

            for amount in amounts {
                let bulk = config.grant_bulk_xp(Some(start), amount);
                let (stepped, _) = apply_events(config, start, amount);
                assert_eq!(
                    bulk.progress, stepped,
                    "config {config:?}, start {start:?}, amount {amount}"
                );
            }
        }
    }
}

#[test]
fn level_stays_within_bounds_after_any_grant() {
    let config = sample_config();
    let mut progress = Progress::new(0, 0);
    for amount in [1_u64, 10, 100, 1_000, 10_000] {
        progress = config.grant_bulk_xp(Some(progress), amount).progress;
        assert!(progress.level <= config.max_level());
        assert!(progress.level >= config.min_level());
        if progress.level == config.max_level() {
            assert_eq!(progress.xp, 0);
        } else {
            assert!(progress.xp < config.required_xp(progress.level));
        }
    }
}
