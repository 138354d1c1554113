//! Integration tests for the full ControlLoop tick against mock adapters.
//!
//! Every test scripts the sensors tick by tick, runs the loop, and checks
//! the recorded actuator calls, display text, events and blocking time.

use plantbot::app::events::AppEvent;
use plantbot::app::service::ControlLoop;
use plantbot::app::shutdown::ShutdownSignal;
use plantbot::config::SystemConfig;
use plantbot::control::{BuzzerCommand, Motion};
use plantbot::drivers::status_led::IndicatorColor;
use plantbot::labels::DiseaseLabels;
use plantbot::safety::FireTrigger;
use plantbot::vision::{Frame, HealthResult};

use super::mock_hw::ActuatorCall::{self, Buzzer, Cleanup, Drive, Indicator, Pump};
use super::mock_hw::{MockDelay, MockHardware, RecordingDisplay, RecordingSink};

type Loop = ControlLoop<MockHardware, RecordingDisplay, MockDelay, RecordingSink>;

const SAMPLES: usize = 5;
/// Ranging pauses plus the pacing delay of an uneventful tick.
const IDLE_TICK_MS: u64 = 5 * 20 + 100;

fn make_loop_with(sink: RecordingSink) -> Loop {
    ControlLoop::new(
        SystemConfig::default(),
        DiseaseLabels::builtin(),
        MockHardware::new(),
        RecordingDisplay::default(),
        MockDelay::default(),
        sink,
    )
}

fn make_loop() -> Loop {
    make_loop_with(RecordingSink::new())
}

/// Run one tick; return the actuator calls and blocking time it produced.
fn tick(app: &mut Loop) -> (Vec<ActuatorCall>, u64) {
    let calls_before = app.hw().calls.len();
    let ms_before = app.delay().total_ms();
    app.tick();
    (
        app.hw().calls_since(calls_before).to_vec(),
        app.delay().total_ms() - ms_before,
    )
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn run_with_raised_signal_shows_banner_and_cleans_up() {
    let mut app = make_loop();
    let signal = ShutdownSignal::new();
    signal.trigger();

    app.run(&signal);

    assert_eq!(app.display().shown[0], "Robot Plant Care\nStarting...");
    assert_eq!(app.tick_count(), 0);
    assert_eq!(app.hw().calls, vec![Cleanup]);
    assert_eq!(
        app.sink().events,
        vec![AppEvent::Started, AppEvent::Stopped { ticks: 0 }]
    );
    assert_eq!(app.delay().total_ms(), 1000, "banner is held for the startup pause");
}

#[test]
fn run_ticks_until_signal_then_cleans_up_once() {
    let signal = ShutdownSignal::new();
    let mut app = make_loop_with(RecordingSink::stopping_after(3, signal.clone()));

    app.run(&signal);

    assert_eq!(app.tick_count(), 3);
    assert_eq!(app.hw().cleanups, 1);
    assert_eq!(app.hw().calls.last(), Some(&Cleanup));
    assert!(!app.hw().pump_on() && !app.hw().buzzer_on());
    assert_eq!(app.hw().indicator(), IndicatorColor::Off);
    assert_eq!(
        app.sink().events.last(),
        Some(&AppEvent::Stopped { ticks: 3 })
    );
}

#[test]
fn stop_is_idempotent() {
    let mut app = make_loop();
    app.hw_mut().push_distance(75.0, SAMPLES);
    app.tick();
    assert_eq!(app.hw().motion(), Motion::Forward);

    app.stop();
    app.stop();
    assert_eq!(app.hw().motion(), Motion::Stop);
    assert!(!app.hw().buzzer_on() && !app.hw().pump_on());
}

// ── Climate ───────────────────────────────────────────────────

#[test]
fn climate_reading_is_displayed() {
    let mut app = make_loop();
    app.hw_mut().push_climate(55.0, 21.3);
    tick(&mut app);
    assert!(app.display().showed("Hum:55.0%\nTmp:21.3C"));
    assert_eq!(app.previous_temperature(), Some(21.3));
}

#[test]
fn failed_climate_read_skips_climate_logic_and_keeps_baseline() {
    let mut app = make_loop();
    app.hw_mut().push_climate(50.0, 20.0);
    app.hw_mut().push_climate_failure();

    tick(&mut app);
    let (calls, _) = tick(&mut app);

    assert_eq!(app.previous_temperature(), Some(20.0));
    assert!(app.display().showed("DHT read failed"));
    assert_eq!(app.sink().count(|e| *e == AppEvent::ClimateUnavailable), 1);
    assert!(!calls.iter().any(|c| matches!(c, Pump(_) | Indicator(_))));
}

#[test]
fn low_humidity_lights_blue() {
    let mut app = make_loop();
    app.hw_mut().push_climate(35.0, 22.0);
    let (calls, _) = tick(&mut app);

    assert_eq!(calls[0], Indicator(IndicatorColor::Blue));
    assert!(app.display().showed("Low humidity\n35.0%"));
    assert!(app.sink().events.contains(&AppEvent::LowHumidity(35.0)));
}

#[test]
fn humidity_at_threshold_is_not_low() {
    let mut app = make_loop();
    app.hw_mut().push_climate(40.0, 22.0);
    let (calls, _) = tick(&mut app);
    assert!(!calls.contains(&Indicator(IndicatorColor::Blue)));
}

// ── Fire ──────────────────────────────────────────────────────

#[test]
fn thermal_rise_runs_suppression_with_trailing_chirp() {
    let mut app = make_loop();
    app.hw_mut().push_climate(50.0, 20.0);
    app.hw_mut().push_climate(50.0, 31.0);

    tick(&mut app);
    let (calls, ms) = tick(&mut app);

    assert_eq!(
        calls,
        vec![
            Drive(Motion::Stop),
            Indicator(IndicatorColor::Red),
            Buzzer(true),
            Pump(true),
            Pump(false),
            Buzzer(false),
            Buzzer(true),
            Buzzer(false),
            Indicator(IndicatorColor::Off),
            // No distance this tick.
            Drive(Motion::Stop),
        ]
    );
    assert_eq!(ms, 3000 + 3000 + 500 + IDLE_TICK_MS);
    assert!(app.display().showed("FIRE DETECTED\nTemp rise"));
    assert!(app.sink().events.contains(&AppEvent::FireSuppressed(FireTrigger::ThermalRise)));
}

#[test]
fn small_temperature_rise_is_ignored() {
    let mut app = make_loop();
    app.hw_mut().push_climate(50.0, 20.0);
    app.hw_mut().push_climate(50.0, 29.5);

    tick(&mut app);
    let (calls, ms) = tick(&mut app);

    assert_eq!(calls, vec![Drive(Motion::Stop)]);
    assert_eq!(ms, IDLE_TICK_MS);
    assert_eq!(app.previous_temperature(), Some(29.5));
}

#[test]
fn sustained_flame_runs_suppression_and_settles() {
    let mut app = make_loop();
    app.hw_mut().push_flame(&[true, true, true]);

    let (calls, ms) = tick(&mut app);

    assert_eq!(
        calls,
        vec![
            Drive(Motion::Stop),
            Indicator(IndicatorColor::Red),
            Buzzer(true),
            Pump(true),
            Pump(false),
            Buzzer(false),
            Indicator(IndicatorColor::Off),
            Drive(Motion::Stop),
        ]
    );
    // 3 × 50 ms debounce, 3 s buzzer, 3 s pump, 500 ms settle.
    assert_eq!(ms, 150 + 6000 + 500 + IDLE_TICK_MS);
    assert!(app.display().showed("FLAME DETECTED\nSuppressing..."));
    assert_eq!(
        app.sink().count(|e| *e == AppEvent::FireDetected(FireTrigger::Flame)),
        1
    );
}

#[test]
fn flickering_flame_is_not_a_fire() {
    let mut app = make_loop();
    app.hw_mut().push_flame(&[true, true, false]);

    let (calls, ms) = tick(&mut app);

    assert!(!calls.contains(&Pump(true)));
    assert_eq!(ms, 100 + IDLE_TICK_MS);
    assert_eq!(app.sink().count(|e| matches!(e, AppEvent::FireDetected(_))), 0);
}

#[test]
fn broken_pump_does_not_stop_the_sequence() {
    let mut app = make_loop();
    app.hw_mut().pump_broken = true;
    app.hw_mut().push_flame(&[true, true, true]);

    let (calls, _) = tick(&mut app);

    assert!(calls.contains(&Pump(false)));
    assert!(calls.contains(&Indicator(IndicatorColor::Off)));
    assert!(app.sink().events.contains(&AppEvent::FireSuppressed(FireTrigger::Flame)));
}

// ── Distance & follow ─────────────────────────────────────────

#[test]
fn no_valid_distance_stops_and_reports() {
    let mut app = make_loop();
    let (calls, _) = tick(&mut app);
    assert_eq!(calls, vec![Drive(Motion::Stop)]);
    assert!(app.display().showed("Distance: N/A"));
    assert!(app.sink().events.contains(&AppEvent::Distance(None)));
}

#[test]
fn outlier_sample_is_filtered_out() {
    let mut app = make_loop();
    for cm in [80.0, 81.0, 399.0, 79.5, 80.5] {
        app.hw_mut().push_distance(cm, 1);
    }
    tick(&mut app);
    assert!(app.sink().events.contains(&AppEvent::Distance(Some(80.5))));
    assert!(app.display().showed("Dist:80.5cm"));
}

#[test]
fn follow_policy_drives_motors_and_buzzer() {
    let cases = [
        (40.0, vec![Drive(Motion::Backward), Buzzer(true), Buzzer(false)], 500),
        (55.0, vec![Drive(Motion::Forward), Buzzer(true), Buzzer(false)], 500),
        (75.0, vec![Drive(Motion::Forward), Buzzer(false)], 0),
        (120.0, vec![Drive(Motion::Stop), Buzzer(false)], 0),
        (200.0, vec![Drive(Motion::Stop), Buzzer(false)], 0),
    ];
    for (cm, expected, beep_ms) in cases {
        let mut app = make_loop();
        app.hw_mut().push_distance(cm, SAMPLES);
        let (calls, ms) = tick(&mut app);
        assert_eq!(calls, expected, "at {cm} cm");
        assert_eq!(ms, IDLE_TICK_MS + beep_ms, "at {cm} cm");
    }
}

#[test]
fn follow_decision_is_emitted() {
    let mut app = make_loop();
    app.hw_mut().push_distance(40.0, SAMPLES);
    tick(&mut app);
    let decision = app.sink().events.iter().find_map(|e| match e {
        AppEvent::Follow(d) => Some(*d),
        _ => None,
    });
    let decision = decision.expect("follow event");
    assert_eq!(decision.motion, Motion::Backward);
    assert_eq!(decision.buzzer, BuzzerCommand::ShortBeep);
}

// ── Plant check ───────────────────────────────────────────────

#[test]
fn healthy_plant_lights_green() {
    let mut app = make_loop();
    app.hw_mut().push_distance(20.0, SAMPLES);
    app.hw_mut().push_frame(Some(Frame::filled(10, 10, [0, 255, 0])));

    let (calls, ms) = tick(&mut app);

    assert_eq!(calls, vec![Drive(Motion::Stop), Indicator(IndicatorColor::Green)]);
    assert_eq!(ms, IDLE_TICK_MS + 1000);
    assert!(app.display().showed("Healthy plant\n100.0%"));
    assert!(app.sink().events.contains(&AppEvent::PlantChecked(HealthResult {
        classified: true,
        healthy: true,
        green_percent: 100.0,
    })));
    assert_eq!(app.sink().count(|e| matches!(e, AppEvent::Follow(_))), 0);
}

#[test]
fn sick_plant_flashes_yellow_and_beeps_long() {
    let mut app = make_loop();
    app.hw_mut().push_distance(20.0, SAMPLES);
    app.hw_mut().push_frame(Some(Frame::filled(10, 10, [0, 0, 255])));

    let (calls, ms) = tick(&mut app);

    let mut expected = vec![Drive(Motion::Stop)];
    for _ in 0..3 {
        expected.push(Indicator(IndicatorColor::Yellow));
        expected.push(Indicator(IndicatorColor::Off));
    }
    expected.extend([Buzzer(true), Buzzer(false)]);
    assert_eq!(calls, expected);
    assert_eq!(ms, IDLE_TICK_MS + 3 * 1000 + 1000 + 1000);
    assert!(app.display().showed("Sick plant - check!\n0.0%"));
}

#[test]
fn camera_failure_is_reported() {
    let mut app = make_loop();
    app.hw_mut().push_distance(20.0, SAMPLES);
    app.hw_mut().push_frame(None);

    let (calls, _) = tick(&mut app);

    assert_eq!(calls, vec![Drive(Motion::Stop)]);
    assert!(app.display().showed("Cam fail"));
    assert!(app.sink().events.contains(&AppEvent::PlantChecked(HealthResult::UNCLASSIFIED)));
}

// ── Ordering ──────────────────────────────────────────────────

#[test]
fn every_step_runs_in_order_within_one_tick() {
    let mut app = make_loop();
    app.hw_mut().push_climate(30.0, 20.0);
    app.hw_mut().push_flame(&[true, true, true]);
    app.hw_mut().push_distance(75.0, SAMPLES);

    let (calls, _) = tick(&mut app);

    assert_eq!(calls.first(), Some(&Indicator(IndicatorColor::Blue)));
    assert_eq!(calls.last(), Some(&Buzzer(false)));
    let pump = calls.iter().position(|c| *c == Pump(true));
    let forward = calls.iter().position(|c| *c == Drive(Motion::Forward));
    assert!(pump < forward, "fire is handled before following");
}
