// Host-side tests for the effects controller.
// Commands are applied to a small in-memory page so node lifetimes can be checked.

use fete_core::*;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Default)]
struct FakePage {
    /// Attached nodes with their mount and the clock at attach time.
    attached: HashMap<NodeId, (Mount, Duration)>,
    clock: Duration,
}

impl FakePage {
    fn apply(&mut self, out: &mut Vec<FxCommand>) {
        for cmd in out.drain(..) {
            match cmd {
                FxCommand::Spawn { id, mount, .. } => {
                    self.attached.insert(id, (mount, self.clock));
                }
                FxCommand::Remove(id) => {
                    self.attached.remove(&id);
                }
                FxCommand::ClearMount(key) => {
                    self.attached.retain(|_, (m, _)| *m != Mount::Element(key));
                }
                _ => {}
            }
        }
    }
}

fn page() -> PageInventory {
    let mut inv = PageInventory::complete();
    inv.nav_hrefs = vec!["#home".into(), "#wishes".into(), "#memories".into()];
    inv.section_ids = vec!["home".into(), "wishes".into(), "memories".into()];
    inv.bar_count = 5;
    inv.balloon_count = 3;
    inv.flame_count = 3;
    inv.celebration_card_count = 2;
    inv
}

fn controller() -> EffectsController {
    EffectsController::new(FxConfig::default(), page(), 7)
}

/// Tick in `step_ms` increments for `total_ms`, collecting every command.
fn advance(fx: &mut EffectsController, total_ms: u64, step_ms: u64) -> Vec<FxCommand> {
    let mut all = Vec::new();
    let mut elapsed = 0;
    while elapsed < total_ms {
        fx.tick(Duration::from_millis(step_ms), &mut all);
        elapsed += step_ms;
    }
    all
}

fn spawns(cmds: &[FxCommand]) -> usize {
    cmds.iter()
        .filter(|c| matches!(c, FxCommand::Spawn { .. }))
        .count()
}

fn last_bar_heights(cmds: &[FxCommand]) -> Option<&BarHeights> {
    cmds.iter().rev().find_map(|c| match c {
        FxCommand::SetBarHeights(h) => Some(h),
        _ => None,
    })
}

#[test]
fn burst_while_in_flight_is_a_noop() {
    let mut fx = controller();
    let mut out = Vec::new();
    assert!(fx.launch_burst(BurstKind::Confetti, &mut out));
    assert!(fx.state().confetti_active());
    let pending = fx.pending_timers();
    let live = fx.live_count();

    let mut again = Vec::new();
    assert!(!fx.launch_burst(BurstKind::Confetti, &mut again));
    assert!(again.is_empty());
    assert!(fx.state().confetti_active());
    assert_eq!(fx.pending_timers(), pending);
    assert_eq!(fx.live_count(), live);

    // the confetti button path is guarded the same way
    assert!(!fx.launch_confetti(&mut again));
    assert!(again.is_empty());
}

#[test]
fn confetti_burst_spawns_every_piece_then_clears() {
    let mut fx = controller();
    let mut page_dom = FakePage::default();
    let mut out = Vec::new();
    fx.launch_burst(BurstKind::Confetti, &mut out);
    let mut spawned = spawns(&out);
    page_dom.apply(&mut out);

    let step = 1;
    let mut removed_early = 0;
    for _ in 0..7000 {
        fx.tick(Duration::from_millis(step), &mut out);
        page_dom.clock += Duration::from_millis(step);
        spawned += spawns(&out);
        for cmd in &out {
            if let FxCommand::Remove(id) = cmd {
                if let Some((_, born)) = page_dom.attached.get(id) {
                    // every piece outlives its own animation
                    let age = page_dom.clock - *born;
                    if age < Duration::from_millis(3000) {
                        removed_early += 1;
                    }
                }
            }
        }
        page_dom.apply(&mut out);
    }
    assert_eq!(spawned, FxConfig::default().confetti.count);
    assert_eq!(removed_early, 0);
    assert!(!fx.state().confetti_active());
    assert_eq!(fx.live_in_burst(BurstKind::Confetti), 0);
    assert!(page_dom.attached.is_empty());
}

#[test]
fn short_sweep_still_waits_for_the_last_piece() {
    let mut cfg = FxConfig::default();
    cfg.confetti = BurstParams {
        count: 3,
        stagger_ms: 100,
        sweep_ms: 10,
    };
    let mut fx = EffectsController::new(cfg, page(), 5);
    let mut out = Vec::new();
    fx.launch_burst(BurstKind::Confetti, &mut out);

    // last piece starts at 200ms and animates for at least 3000ms
    advance(&mut fx, 3199, 1);
    assert!(fx.state().confetti_active());
    assert!(fx.live_in_burst(BurstKind::Confetti) > 0);

    // and for at most 5000ms
    advance(&mut fx, 2001, 1);
    assert!(!fx.state().confetti_active());
    assert_eq!(fx.live_in_burst(BurstKind::Confetti), 0);
}

#[test]
fn welcome_burst_runs_after_loading_and_sweeps() {
    let mut fx = controller();
    let mut page_dom = FakePage::default();
    let mut out = Vec::new();
    fx.initialize(&mut out);
    page_dom.apply(&mut out);
    assert!(!fx.state().is_loaded);

    let mut cmds = advance(&mut fx, 2500, 10);
    assert!(cmds.contains(&FxCommand::HideLoadingScreen));
    assert!(fx.state().is_loaded);
    page_dom.apply(&mut cmds);

    let mut cmds = advance(&mut fx, 500, 10);
    assert!(fx.state().burst_active(BurstKind::Welcome));
    assert!(cmds.iter().any(|c| matches!(
        c,
        FxCommand::SetBalloonLifted { lifted: true, .. }
    )));
    page_dom.apply(&mut cmds);

    // 24 staggers of 120ms plus the longest particle
    let mut cmds = advance(&mut fx, 13_000, 10);
    page_dom.apply(&mut cmds);
    assert!(!fx.state().burst_active(BurstKind::Welcome));
    assert_eq!(fx.live_in_burst(BurstKind::Welcome), 0);
    assert!(page_dom
        .attached
        .values()
        .all(|(m, _)| *m != Mount::Element(ElementKey::HeroSection)));
}

#[test]
fn missing_confetti_mount_does_not_stick_the_guard() {
    let keys = ElementKey::ALL
        .into_iter()
        .filter(|k| !matches!(k, ElementKey::ConfettiBurst | ElementKey::ConfettiArea));
    let inv = PageInventory::new(keys);
    let mut fx = EffectsController::new(FxConfig::default(), inv, 1);
    let mut out = Vec::new();
    assert!(!fx.launch_burst(BurstKind::Confetti, &mut out));
    assert!(!fx.state().confetti_active());
    assert!(out.is_empty());
}

#[test]
fn confetti_falls_back_to_the_area() {
    let keys = ElementKey::ALL
        .into_iter()
        .filter(|k| *k != ElementKey::ConfettiBurst);
    let mut fx = EffectsController::new(FxConfig::default(), PageInventory::new(keys), 1);
    let mut out = Vec::new();
    assert!(fx.launch_burst(BurstKind::Confetti, &mut out));
    assert_eq!(out[0], FxCommand::ClearMount(ElementKey::ConfettiArea));
}

#[test]
fn toggling_audio_twice_resets_bars_and_stops_the_interval() {
    let mut fx = controller();
    let mut out = Vec::new();
    assert!(fx.toggle_ambient_audio(&mut out));
    assert!(fx.visualizer_running());
    assert!(out.contains(&FxCommand::SetAudioUi { playing: true }));

    let cmds = advance(&mut fx, 400, 20);
    let heights = last_bar_heights(&cmds).expect("visualizer ran");
    assert_eq!(heights.len(), 5);
    assert!(heights.iter().all(|h| (15.0..=55.0).contains(h)));

    let mut out = Vec::new();
    assert!(!fx.toggle_ambient_audio(&mut out));
    assert!(!fx.visualizer_running());
    assert!(!fx.has_running_intervals());
    let reset = last_bar_heights(&out).expect("bars reset");
    assert!(reset.iter().all(|h| *h == 20.0));
    assert!(out.contains(&FxCommand::SetAudioUi { playing: false }));

    let cmds = advance(&mut fx, 1000, 20);
    assert!(last_bar_heights(&cmds).is_none());
}

#[test]
fn rapid_toggling_keeps_a_single_visualizer() {
    let mut fx = controller();
    let mut out = Vec::new();
    for i in 0..7 {
        fx.toggle_ambient_audio(&mut out);
        assert_eq!(fx.visualizer_running(), i % 2 == 0);
    }
    out.clear();
    // one interval at 180ms: two fires in 360ms, one update per tick
    fx.tick(Duration::from_millis(180), &mut out);
    fx.tick(Duration::from_millis(180), &mut out);
    let updates = out
        .iter()
        .filter(|c| matches!(c, FxCommand::SetBarHeights(_)))
        .count();
    assert_eq!(updates, 2);
}

#[test]
fn visualizer_disabled_by_feature_flag() {
    let mut cfg = FxConfig::default();
    cfg.features.music_visualizer = false;
    let mut fx = EffectsController::new(cfg, page(), 3);
    let mut out = Vec::new();
    assert!(fx.toggle_ambient_audio(&mut out));
    assert!(fx.state().is_music_playing);
    assert!(!fx.visualizer_running());
}

#[test]
fn navbar_scrolled_state_follows_threshold() {
    let mut fx = controller();
    let mut out = Vec::new();
    fx.on_scroll_frame(51.0, &mut out);
    assert!(out.contains(&FxCommand::SetNavScrolled(true)));
    assert!(fx.state().nav_scrolled);

    out.clear();
    fx.on_scroll_frame(300.0, &mut out);
    assert!(!out.iter().any(|c| matches!(c, FxCommand::SetNavScrolled(_))));

    out.clear();
    fx.on_scroll_frame(50.0, &mut out);
    assert!(out.contains(&FxCommand::SetNavScrolled(false)));
    assert!(!fx.state().nav_scrolled);
}

#[test]
fn parallax_only_when_enabled() {
    let mut fx = controller();
    let mut out = Vec::new();
    fx.on_scroll_frame(120.0, &mut out);
    assert!(out.contains(&FxCommand::Parallax { scroll_y: 120.0 }));

    let mut cfg = FxConfig::default();
    cfg.features.parallax = false;
    let mut fx = EffectsController::new(cfg, page(), 3);
    let mut out = Vec::new();
    fx.on_scroll_frame(120.0, &mut out);
    assert!(!out.iter().any(|c| matches!(c, FxCommand::Parallax { .. })));
}

#[test]
fn intersecting_section_marks_exactly_its_link() {
    let mut fx = controller();
    assert_eq!(fx.state().active_section, "home");
    let mut out = Vec::new();
    fx.update_active_section("wishes", &mut out);
    assert_eq!(out, vec![FxCommand::SetActiveNav(vec![false, true, false])]);
    assert_eq!(fx.state().active_section, "wishes");

    out.clear();
    fx.update_active_section("memories", &mut out);
    assert_eq!(out, vec![FxCommand::SetActiveNav(vec![false, false, true])]);
}

#[test]
fn scroll_to_known_and_unknown_sections() {
    let mut fx = controller();
    let mut out = Vec::new();
    fx.scroll_to_section("memories", &mut out);
    assert_eq!(
        out,
        vec![FxCommand::ScrollToSection {
            id: "memories".into(),
            navbar_offset_px: 80.0,
        }]
    );
    out.clear();
    fx.scroll_to_section("nowhere", &mut out);
    assert!(out.is_empty());
}

#[test]
fn escape_stops_audio_exactly_once() {
    let mut fx = controller();
    let mut out = Vec::new();
    fx.toggle_ambient_audio(&mut out);
    out.clear();

    fx.handle_key(KeyAction::StopAudio, &mut out);
    let stops = out
        .iter()
        .filter(|c| **c == FxCommand::SetAudioUi { playing: false })
        .count();
    assert_eq!(stops, 1);
    assert!(!fx.state().is_music_playing);
    assert!(!fx.visualizer_running());

    out.clear();
    fx.handle_key(KeyAction::StopAudio, &mut out);
    assert!(out.is_empty());
    assert!(!fx.state().is_music_playing);
}

#[test]
fn hidden_page_stops_audio() {
    let mut fx = controller();
    let mut out = Vec::new();
    fx.toggle_ambient_audio(&mut out);
    out.clear();
    fx.on_visibility_hidden(&mut out);
    assert!(!fx.state().is_music_playing);
    assert!(!fx.visualizer_running());
    out.clear();
    fx.on_visibility_hidden(&mut out);
    assert!(out.is_empty());
}

#[test]
fn main_celebration_chains_every_effect() {
    let mut fx = controller();
    let mut out = Vec::new();
    fx.trigger_main_celebration(&mut out);
    assert!(out.iter().any(|c| matches!(
        c,
        FxCommand::Spawn { mount: Mount::Element(ElementKey::CelebrateButton), .. }
    )));
    assert!(out.contains(&FxCommand::SetCakeAnimation(None)));
    assert!(fx.state().confetti_active());
    assert!(fx.state().burst_active(BurstKind::SoundWave));

    let cmds = advance(&mut fx, 1500, 10);
    assert!(cmds
        .iter()
        .any(|c| matches!(c, FxCommand::SetCakeAnimation(Some(_)))));
    assert!(cmds.contains(&FxCommand::ScrollToSection {
        id: "wishes".into(),
        navbar_offset_px: 80.0,
    }));
    assert!(cmds.iter().any(|c| matches!(
        c,
        FxCommand::SetBalloonLifted { index: 2, lifted: true }
    )));
}

#[test]
fn blown_out_candle_relights() {
    let mut fx = controller();
    let mut out = Vec::new();
    fx.blow_out_candle(1, &mut out);
    assert_eq!(out[0], FxCommand::SetFlameLit { index: 1, lit: false });
    assert_eq!(fx.live_of_kind(EffectKind::Smoke), 1);

    let cmds = advance(&mut fx, 2000, 50);
    assert!(cmds.contains(&FxCommand::SetFlameLit { index: 1, lit: true }));
    assert_eq!(fx.live_of_kind(EffectKind::Smoke), 0);

    out.clear();
    fx.blow_out_candle(9, &mut out);
    assert!(out.is_empty());
}

#[test]
fn resize_drops_floating_decorations() {
    let cfg = FxConfig {
        heart_chance: 1.0,
        ..FxConfig::default()
    };
    let mut fx = EffectsController::new(cfg, page(), 11);
    let mut out = Vec::new();
    fx.initialize(&mut out);
    advance(&mut fx, 3500, 50);
    assert_eq!(fx.live_of_kind(EffectKind::Heart), 1);

    let mut out = Vec::new();
    fx.on_resize_settled(&mut out);
    assert_eq!(fx.live_of_kind(EffectKind::Heart), 0);
    assert!(out.iter().any(|c| matches!(c, FxCommand::Remove(_))));
}

#[test]
fn stalled_tab_spawns_at_most_one_heart() {
    let cfg = FxConfig {
        heart_chance: 1.0,
        ..FxConfig::default()
    };
    let mut fx = EffectsController::new(cfg, page(), 11);
    let mut out = Vec::new();
    fx.initialize(&mut out);
    out.clear();
    fx.tick(Duration::from_millis(3500 * 4), &mut out);
    assert_eq!(fx.live_of_kind(EffectKind::Heart), 1);
}

#[test]
fn teardown_leaves_nothing_behind() {
    let mut fx = controller();
    let mut page_dom = FakePage::default();
    let mut out = Vec::new();
    fx.initialize(&mut out);
    let mut cmds = advance(&mut fx, 3200, 16);
    out.append(&mut cmds);
    fx.launch_confetti(&mut out);
    fx.toggle_ambient_audio(&mut out);
    let mut cmds = advance(&mut fx, 300, 16);
    out.append(&mut cmds);
    page_dom.apply(&mut out);
    assert!(fx.live_count() > 0);
    assert!(fx.has_running_intervals());

    fx.teardown(&mut out);
    assert_eq!(out.last(), Some(&FxCommand::DisconnectObservers));
    page_dom.apply(&mut out);
    assert!(page_dom.attached.is_empty());
    assert_eq!(fx.pending_timers(), 0);
    assert_eq!(fx.live_count(), 0);
    assert!(!fx.has_running_intervals());
    assert!(!fx.state().confetti_active());

    // nothing restarts afterwards
    let cmds = advance(&mut fx, 10_000, 100);
    assert!(cmds.is_empty());
    assert!(!fx.launch_burst(BurstKind::Welcome, &mut out));
    fx.teardown(&mut out);
    assert!(out.is_empty());
}

fn spawned_kinds(cmds: &[FxCommand]) -> Vec<EffectKind> {
    cmds.iter()
        .filter_map(|c| match c {
            FxCommand::Spawn { spec, .. } => Some(spec.kind),
            _ => None,
        })
        .collect()
}

#[test]
fn stars_spawn_on_schedule_and_expire_after_nine_seconds() {
    let mut cfg = FxConfig {
        star_chance: 1.0,
        ..FxConfig::default()
    };
    cfg.features.ambient_hearts = false;
    let mut fx = EffectsController::new(cfg, page(), 21);
    let mut out = Vec::new();
    fx.initialize(&mut out);

    advance(&mut fx, 4950, 50);
    assert_eq!(fx.live_of_kind(EffectKind::Star), 0);
    let cmds = advance(&mut fx, 50, 50);
    assert_eq!(fx.live_of_kind(EffectKind::Star), 1);
    let star = cmds
        .iter()
        .find_map(|c| match c {
            FxCommand::Spawn { mount, spec, .. } if spec.kind == EffectKind::Star => {
                Some((*mount, spec.clone()))
            }
            _ => None,
        })
        .expect("star spawned");
    assert_eq!(star.0, Mount::Body);
    assert!(star.1.glyph.is_some());

    // no further stars, so the first one is the only one to watch
    fx.config.star_chance = 0.0;
    advance(&mut fx, 8950, 50);
    assert_eq!(fx.live_of_kind(EffectKind::Star), 1);
    let cmds = advance(&mut fx, 50, 50);
    assert_eq!(fx.live_of_kind(EffectKind::Star), 0);
    assert!(cmds.iter().any(|c| matches!(c, FxCommand::Remove(_))));
}

#[test]
fn resize_during_welcome_drops_its_particles() {
    let mut cfg = FxConfig::default();
    cfg.features.ambient_hearts = false;
    cfg.features.ambient_stars = false;
    let mut fx = EffectsController::new(cfg, page(), 13);
    let mut page_dom = FakePage::default();
    let mut out = Vec::new();
    fx.initialize(&mut out);
    let mut cmds = advance(&mut fx, 5000, 10);
    page_dom.apply(&mut cmds);
    assert!(fx.state().burst_active(BurstKind::Welcome));
    assert!(fx.live_of_kind(EffectKind::Particle) > 0);

    let mut out = Vec::new();
    fx.on_resize_settled(&mut out);
    page_dom.apply(&mut out);
    assert_eq!(fx.live_of_kind(EffectKind::Particle), 0);
    assert!(page_dom
        .attached
        .values()
        .all(|(m, _)| *m != Mount::Element(ElementKey::HeroSection)));

    // the rest of the burst still arrives and the guard still clears
    let mut cmds = advance(&mut fx, 13_000, 10);
    page_dom.apply(&mut cmds);
    assert!(!fx.state().burst_active(BurstKind::Welcome));
    assert_eq!(fx.live_of_kind(EffectKind::Particle), 0);
}

#[test]
fn disabled_ambient_loops_spawn_nothing() {
    let mut cfg = FxConfig {
        heart_chance: 1.0,
        star_chance: 1.0,
        ..FxConfig::default()
    };
    cfg.features.ambient_hearts = false;
    cfg.features.ambient_stars = false;
    let mut fx = EffectsController::new(cfg, page(), 17);
    let mut out = Vec::new();
    fx.initialize(&mut out);
    assert!(!fx.has_running_intervals());

    let cmds = advance(&mut fx, 20_000, 50);
    let kinds = spawned_kinds(&cmds);
    assert!(!kinds.contains(&EffectKind::Heart));
    assert!(!kinds.contains(&EffectKind::Star));
    // the welcome burst is unaffected
    assert!(kinds.contains(&EffectKind::Particle));
}

#[test]
fn each_ambient_toggle_is_independent() {
    let mut cfg = FxConfig {
        heart_chance: 1.0,
        star_chance: 1.0,
        ..FxConfig::default()
    };
    cfg.features.ambient_stars = false;
    let mut fx = EffectsController::new(cfg.clone(), page(), 17);
    let mut out = Vec::new();
    fx.initialize(&mut out);
    let kinds = spawned_kinds(&advance(&mut fx, 10_000, 50));
    assert!(kinds.contains(&EffectKind::Heart));
    assert!(!kinds.contains(&EffectKind::Star));

    cfg.features.ambient_stars = true;
    cfg.features.ambient_hearts = false;
    let mut fx = EffectsController::new(cfg, page(), 17);
    fx.initialize(&mut out);
    let kinds = spawned_kinds(&advance(&mut fx, 10_000, 50));
    assert!(!kinds.contains(&EffectKind::Heart));
    assert!(kinds.contains(&EffectKind::Star));
}

#[test]
fn smoke_toggle_off_still_blows_out_and_relights() {
    let mut cfg = FxConfig::default();
    cfg.features.smoke = false;
    let mut fx = EffectsController::new(cfg, page(), 19);
    let mut out = Vec::new();
    fx.blow_out_candle(0, &mut out);
    assert_eq!(out, vec![FxCommand::SetFlameLit { index: 0, lit: false }]);
    assert_eq!(fx.live_of_kind(EffectKind::Smoke), 0);

    let cmds = advance(&mut fx, 2000, 50);
    assert!(cmds.contains(&FxCommand::SetFlameLit { index: 0, lit: true }));
    assert!(!spawned_kinds(&cmds).contains(&EffectKind::Smoke));
}

#[test]
fn page_operations_after_teardown_do_nothing() {
    let cfg = FxConfig {
        heart_chance: 1.0,
        ..FxConfig::default()
    };
    let mut fx = EffectsController::new(cfg, page(), 23);
    let mut out = Vec::new();
    fx.initialize(&mut out);
    advance(&mut fx, 3500, 50);
    fx.teardown(&mut out);
    out.clear();

    fx.celebrate_cake(&mut out);
    fx.toggle_mobile_menu(&mut out);
    fx.on_resize_settled(&mut out);
    fx.blow_out_candle(0, &mut out);
    fx.ripple(Mount::Element(ElementKey::CelebrateButton), &mut out);
    fx.trigger_main_celebration(&mut out);
    assert!(out.is_empty());
    assert_eq!(fx.pending_timers(), 0);
    assert_eq!(fx.live_count(), 0);
}
