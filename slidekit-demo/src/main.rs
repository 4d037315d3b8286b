//! Headless host for slidekit.
//!
//! Builds a small mixer (a volume slider driving an inverted attenuation
//! slider, plus a price range slider), replays a scripted input session and
//! logs every delivered view state as JSON. Run with `RUST_LOG=debug` to see
//! the engine's own lifecycle logs.

use std::{collections::HashMap, sync::Arc, time::Duration};

use parking_lot::Mutex;
use slidekit::{
    EventTarget, FrameScheduler, InputEvent, Instant, KeyInput, LinkedSlider, Mark, Marks,
    PointerPhase, Slider, SliderChange, SliderConfig, SliderData, SliderError, SliderId, SliderKey,
    ThumbIndex, TrackRect, ValueLabelDisplay, ViewSink, ViewState,
};
use tracing::{info, warn};

/// Collects frame requests until the host loop drains them.
#[derive(Default)]
struct FrameQueue {
    requested: Mutex<Vec<SliderId>>,
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&self, slider: SliderId) {
        self.requested.lock().push(slider);
    }
}

impl FrameQueue {
    fn drain(&self) -> Vec<SliderId> {
        std::mem::take(&mut *self.requested.lock())
    }
}

/// Logs views as JSON.
struct JsonSink {
    name: &'static str,
}

impl ViewSink for JsonSink {
    fn apply(&self, view: &ViewState) {
        match serde_json::to_string(view) {
            Ok(json) => info!(slider = self.name, "{json}"),
            Err(error) => warn!(slider = self.name, %error, "view not serializable"),
        }
    }
}

struct Host {
    document: Arc<EventTarget>,
    frames: Arc<FrameQueue>,
    sliders: HashMap<SliderId, Slider>,
    clock: Instant,
}

impl Host {
    fn new() -> Self {
        Self {
            document: EventTarget::new(),
            frames: Arc::new(FrameQueue::default()),
            sliders: HashMap::new(),
            clock: Instant::now(),
        }
    }

    fn mount(&mut self, name: &'static str, slider: Slider, track: TrackRect) {
        slider.set_track_rect(track);
        slider.attach_renderer(self.frames.clone(), Arc::new(JsonSink { name }));
        slider.on_change(move |change: SliderChange| {
            info!(slider = name, value = ?change.value, source = ?change.source, "changed");
        });
        self.sliders.insert(slider.id(), slider);
    }

    /// Advances the clock and runs timers and frames, the way an event loop
    /// would between input events.
    fn advance(&mut self, millis: u64) {
        self.clock += Duration::from_millis(millis);
        for slider in self.sliders.values() {
            slider.tick(self.clock);
        }
        for id in self.frames.drain() {
            if let Some(slider) = self.sliders.get(&id) {
                slider.run_frame(self.clock);
            }
        }
    }

    fn drag(&mut self, slider: &Slider, thumb: ThumbIndex, path: &[f64], y: f64) {
        let Some((&first, rest)) = path.split_first() else {
            return;
        };
        let mut press = InputEvent::pointer(PointerPhase::Down, 1, first, y, self.clock);
        slider.pointer_down_on_thumb(thumb, &mut press);
        for &x in rest {
            self.advance(4);
            self.document
                .dispatch(&mut InputEvent::pointer(PointerPhase::Move, 1, x, y, self.clock));
        }
        self.advance(4);
        let last = path.last().copied().unwrap_or(first);
        self.document
            .dispatch(&mut InputEvent::pointer(PointerPhase::Up, 1, last, y, self.clock));
        self.advance(16);
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("warn,slidekit_demo=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("info"),
        },
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<(), SliderError> {
    init_tracing();
    let mut host = Host::new();

    let attenuation = Slider::new(
        SliderConfig::default().value_label_display(ValueLabelDisplay::Off),
        SliderData::default().value(100.0).label("Attenuation"),
        &host.document,
    )?;
    let volume = Slider::new(
        SliderConfig::default()
            .marks(Marks::Auto)
            .step(Some(10.0))
            .show_steppers(true)
            .value_label_format(|value: f64| format!("{value}%"))
            .linked_slider(LinkedSlider::new(&attenuation).inverted(true)),
        SliderData::default().label("Volume"),
        &host.document,
    )?;
    let price = Slider::new(
        SliderConfig::default()
            .max(500.0)
            .step(Some(5.0))
            .min_distance(50.0)
            .marks(Marks::Custom(vec![
                Mark::labeled(0.0, "$0"),
                Mark::labeled(250.0, "$250"),
                Mark::labeled(500.0, "$500"),
            ]))
            .show_title(true),
        SliderData::default().value((100.0, 300.0)).label("Price"),
        &host.document,
    )?;

    host.mount("attenuation", attenuation.clone(), TrackRect::new(0.0, 0.0, 200.0, 20.0));
    host.mount("volume", volume.clone(), TrackRect::new(0.0, 40.0, 200.0, 20.0));
    host.mount("price", price.clone(), TrackRect::new(0.0, 80.0, 400.0, 20.0));
    host.advance(16);

    info!("dragging volume to 70%");
    host.drag(&volume, ThumbIndex::Start, &[0.0, 60.0, 120.0, 140.0], 50.0);

    info!("stepping volume with the keyboard");
    volume.key_down(ThumbIndex::Start, KeyInput::new(SliderKey::ArrowRight));
    volume.key_down(ThumbIndex::Start, KeyInput::shifted(SliderKey::PageDown));
    host.advance(400);

    info!("dragging the lower price thumb into the upper one");
    host.drag(&price, ThumbIndex::Start, &[80.0, 200.0, 300.0], 90.0);

    info!("clicking the price track");
    let mut click = InputEvent::pointer(PointerPhase::Down, 2, 380.0, 90.0, host.clock);
    price.click_track(&mut click);
    host.advance(400);

    info!("wheel and steppers");
    volume.set_focused_thumb(Some(ThumbIndex::Start));
    volume.wheel(ThumbIndex::Start, -1.0);
    volume.step_by(1);
    host.advance(16);

    info!(
        volume = ?volume.get_value(),
        attenuation = ?attenuation.get_value(),
        price = ?price.get_value(),
        "session finished"
    );

    for slider in [&volume, &attenuation, &price] {
        slider.destroy();
    }
    info!(listeners = host.document.listener_count(), "sliders destroyed");
    Ok(())
}
