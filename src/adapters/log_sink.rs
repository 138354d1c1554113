//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the device).

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | control loop running"),
            AppEvent::Climate(c) => {
                info!(
                    "CLIMATE | RH={:.1}% | T={:.1}\u{00b0}C",
                    c.humidity_pct, c.temperature_c
                );
            }
            AppEvent::ClimateUnavailable => warn!("CLIMATE | read failed"),
            AppEvent::LowHumidity(rh) => warn!("CLIMATE | low humidity {:.1}%", rh),
            AppEvent::FireDetected(trigger) => error!("FIRE | detected via {:?}", trigger),
            AppEvent::FireSuppressed(trigger) => info!("FIRE | {:?} suppression done", trigger),
            AppEvent::Distance(Some(d)) => info!("RANGE | {:.1}cm", d),
            AppEvent::Distance(None) => info!("RANGE | no valid sample"),
            AppEvent::PlantChecked(r) if !r.classified => warn!("PLANT | capture failed"),
            AppEvent::PlantChecked(r) => {
                info!(
                    "PLANT | {} | green={:.1}%",
                    if r.healthy { "healthy" } else { "sick" },
                    r.green_percent
                );
            }
            AppEvent::Follow(d) => info!("FOLLOW | {:?} | buzzer={:?}", d.motion, d.buzzer),
            AppEvent::Stopped { ticks } => info!("STOP | after {} ticks", ticks),
        }
    }
}
