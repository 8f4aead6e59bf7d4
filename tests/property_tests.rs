//! Property-based tests for normalization, outcomes and the widget timers.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chance::builder::WidgetBuilder;
use chance::config::{normalize_buttons, Config, RawConfig};
use chance::core::{Mode, Phase};
use chance::outcome::roll_die;
use chance::surface::MemorySurface;
use chance::Widget;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::time::Duration;

prop_compose! {
    fn loose_number()(variant in 0..8u8, int in any::<i64>(), float in any::<f64>(), text in "[ -+0-9a-z.]{0,12}") -> Value {
        match variant {
            0 => Value::Null,
            1 => json!(false),
            2 => json!(true),
            3 => json!(int),
            4 => json!(int % 20_000),
            5 => serde_json::Number::from_f64(float).map_or(Value::Null, Value::Number),
            6 => json!(text),
            _ => json!((int % 20_000).to_string()),
        }
    }
}

prop_compose! {
    fn raw_button()(
        id in prop::option::of("[ a-c]{0,3}"),
        coin in any::<bool>(),
        sides in loose_number(),
    ) -> Value {
        let mut button = json!({ "mode": if coin { "coin" } else { "dice" }, "sides": sides });
        if let Some(id) = id {
            button["id"] = json!(id);
        }
        button
    }
}

#[derive(Clone, Debug)]
enum Op {
    Trigger(usize),
    Advance(u64),
    Reset,
    Notify(&'static str),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..5usize).prop_map(Op::Trigger),
        (0..3_000u64).prop_map(Op::Advance),
        Just(Op::Reset),
        prop_oneof![Just("reset"), Just("coin"), Just("d6"), Just("nope")].prop_map(Op::Notify),
    ]
}

fn widget(seed: u64, auto_reset: Option<u64>) -> Widget<MemorySurface, StdRng> {
    let config = Config::from_value(json!({
        "notification": "CHANCE",
        "autoResetMs": auto_reset,
        "buttons": [
            { "id": "coin", "mode": "coin", "notify": "coin" },
            { "id": "d6", "sides": 6, "notify": "d6" },
            { "id": "d10", "sides": 10 },
            { "id": "d100", "sides": 100 },
        ],
    }));

    let mut widget = WidgetBuilder::new()
        .identifier("prop")
        .config(config)
        .rng(StdRng::seed_from_u64(seed))
        .build()
        .unwrap();
    widget.mount(MemorySurface::standard());
    widget
}

fn apply(widget: &mut Widget<MemorySurface, StdRng>, op: &Op) {
    let ids = ["coin", "d6", "d10", "d100", "missing"];
    match op {
        Op::Trigger(index) => {
            widget.trigger(ids[*index]);
        }
        Op::Advance(ms) => widget.advance(Duration::from_millis(*ms)),
        Op::Reset => widget.reset(),
        Op::Notify(target) => widget.notification_received("CHANCE", &json!(target)),
    }
}

proptest! {
    #[test]
    fn normalized_ids_are_unique(buttons in prop::collection::vec(raw_button(), 0..12)) {
        let actions = normalize_buttons(&Value::Array(buttons.clone()));

        let ids: HashSet<&str> = actions.iter().map(|a| a.id.as_str()).collect();
        prop_assert_eq!(ids.len(), actions.len());
        prop_assert_eq!(actions.len(), if buttons.is_empty() { 4 } else { buttons.len() });
    }

    #[test]
    fn dice_sides_stay_in_range(buttons in prop::collection::vec(raw_button(), 1..12)) {
        for action in normalize_buttons(&Value::Array(buttons)) {
            match action.mode() {
                Mode::Dice => {
                    let sides = action.sides().unwrap();
                    prop_assert!((2..=10_000).contains(&sides));
                }
                Mode::Coin => prop_assert_eq!(action.sides(), None),
            }
        }
    }

    #[test]
    fn rolls_stay_in_range(sides in 1..=10_000u32, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..16 {
            let value = roll_die(&mut rng, sides);
            prop_assert!((1..=sides).contains(&value));
        }
    }

    #[test]
    fn timing_settings_stay_in_range(
        duration in loose_number(),
        frame in loose_number(),
        auto_reset in loose_number(),
    ) {
        let config = Config::normalize(RawConfig {
            animation_duration_ms: Some(duration),
            animation_frame_ms: Some(frame),
            auto_reset_ms: Some(auto_reset),
            ..RawConfig::default()
        });

        prop_assert!((200..=15_000).contains(&config.animation_duration_ms));
        prop_assert!((40..=1_000).contains(&config.animation_frame_ms));
        if let Some(auto_reset) = config.auto_reset_ms {
            prop_assert!((200..=3_600_000).contains(&auto_reset));
        }
    }

    #[test]
    fn superseded_action_never_settles(first_delay in 0..1_250u64, seed in any::<u64>()) {
        let mut widget = widget(seed, None);
        widget.trigger("coin");
        widget.advance(Duration::from_millis(first_delay));

        widget.trigger("d6");
        widget.advance(Duration::from_millis(1_249));
        prop_assert_eq!(widget.phase(), Phase::Animating);
        prop_assert_eq!(widget.state().mode, Mode::Dice);

        widget.advance(Duration::from_millis(1));
        prop_assert_eq!(widget.phase(), Phase::Settled);
        prop_assert_eq!(widget.state().mode, Mode::Dice);
        prop_assert_eq!(widget.state().symbol, None);
        prop_assert_eq!(widget.pending_timers(), 0);
    }

    #[test]
    fn timers_never_pile_up(ops in prop::collection::vec(op(), 0..40), seed in any::<u64>()) {
        let mut widget = widget(seed, Some(700));
        for op in &ops {
            apply(&mut widget, op);
            prop_assert!(widget.pending_timers() <= 2);
        }
    }

    #[test]
    fn reset_always_idles_without_timers(ops in prop::collection::vec(op(), 0..30), seed in any::<u64>()) {
        let mut widget = widget(seed, Some(700));
        for op in &ops {
            apply(&mut widget, op);
        }

        widget.reset();

        prop_assert_eq!(widget.phase(), Phase::Idle);
        prop_assert_eq!(widget.pending_timers(), 0);
    }

    #[test]
    fn teardown_leaves_nothing_behind(ops in prop::collection::vec(op(), 0..30), seed in any::<u64>()) {
        let mut widget = widget(seed, Some(700));
        for op in &ops {
            apply(&mut widget, op);
        }

        widget.teardown();

        prop_assert_eq!(widget.pending_timers(), 0);
        prop_assert!(!widget.is_bound());
        prop_assert_eq!(widget.surface().unwrap().listeners(), 0);

        widget.advance(Duration::from_secs(3_600));
        prop_assert_eq!(widget.pending_timers(), 0);
    }
}
