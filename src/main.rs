#[cfg(feature = "gui")]
use anyhow::Context;
#[cfg(feature = "gui")]
use eframe::egui;
#[cfg(feature = "gui")]
use std::time::Instant;
#[cfg(feature = "gui")]
use tracing::{info, warn};
#[cfg(feature = "gui")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "gui")]
use drumseq::{
    config::DEFAULT_LOG_FILTER,
    sequencer::instrument::{BLACK, GRAY, GREEN, RED, WHITE},
    AudioOutput, Config, FrameClock, Instrument, Layout, MidiOutputDevice, Rect, Rgb,
    SampleBank, Sequencer, SoundSink,
};

#[cfg(feature = "gui")]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env();
    let layout = Layout::default();
    let sequencer = Sequencer::new(layout.clone())?;

    let bank = SampleBank::load(&config.assets_dir)
        .with_context(|| format!("loading samples from {}", config.assets_dir.display()))?;
    info!(samples = bank.len(), dir = %config.assets_dir.display(), "samples loaded");

    let audio = AudioOutput::new(bank).unwrap_or_else(|e| {
        warn!("audio unavailable, running silent: {}", e);
        AudioOutput::silent()
    });

    let mut midi = MidiOutputDevice::new();
    if let Some(pattern) = &config.midi_port {
        if let Err(e) = midi.connect_by_name(pattern) {
            warn!(ports = ?MidiOutputDevice::available_ports(), "MIDI output not connected: {}", e);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([layout.window_width as f32, layout.window_height as f32])
            .with_resizable(false)
            .with_title("Drum Sequencer"),
        ..Default::default()
    };

    eframe::run_native(
        "drumseq",
        options,
        Box::new(move |_cc| Ok(Box::new(DrumApp::new(sequencer, Speakers { audio, midi })))),
    )
    .map_err(|e| anyhow::anyhow!("display failed: {e}"))?;

    info!("window closed");
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn main() {
    eprintln!("This binary requires the 'gui' feature to be enabled");
    std::process::exit(1);
}

/// Every hit goes to the speakers and, when connected, to MIDI.
#[cfg(feature = "gui")]
struct Speakers {
    audio: AudioOutput,
    midi: MidiOutputDevice,
}

#[cfg(feature = "gui")]
impl SoundSink for Speakers {
    fn play(&mut self, instrument: Instrument) {
        self.audio.play(instrument);
        self.midi.play(instrument);
    }
}

#[cfg(feature = "gui")]
struct DrumApp {
    sequencer: Sequencer,
    speakers: Speakers,
    clock: FrameClock,
}

#[cfg(feature = "gui")]
impl DrumApp {
    fn new(sequencer: Sequencer, speakers: Speakers) -> Self {
        Self {
            sequencer,
            speakers,
            clock: FrameClock::new(Instant::now()),
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context, area: egui::Rect) {
        let (pressed, released, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        if pressed {
            if let Some(pos) = pos.filter(|p| area.contains(*p)) {
                let local = pos - area.min;
                self.sequencer.press(local.x as i32, local.y as i32);
            }
        }
        if released {
            self.sequencer.release();
        }
    }

    fn draw(&self, painter: &egui::Painter, origin: egui::Pos2) {
        let font = egui::FontId::proportional(20.0);
        let transport = self.sequencer.transport();
        let layout = self.sequencer.layout();

        let boxed = |rect: Rect, fill: Rgb, label: &str| {
            let rect = to_screen(rect, origin);
            painter.rect_filled(rect, 0.0, color(fill));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                label,
                font.clone(),
                color(WHITE),
            );
        };

        for (row, instrument) in Instrument::ALL.iter().enumerate() {
            boxed(layout.label_rect(row), instrument.color(), instrument.label());
        }

        for (i, button) in transport.tempo_buttons().iter().enumerate() {
            let fill = if i == transport.selected() { GREEN } else { GRAY };
            boxed(button.rect, fill, &button.label());
        }
        let rewind_fill = if transport.rewind_held() { RED } else { GRAY };
        boxed(transport.rewind_button(), rewind_fill, "To Start");
        let pause_fill = if self.sequencer.is_paused() { RED } else { GRAY };
        boxed(transport.pause_button(), pause_fill, "Pause");

        for tile in self.sequencer.grid().rows().iter().flatten() {
            let fill = if tile.is_active() {
                tile.instrument().color()
            } else {
                GRAY
            };
            painter.rect_filled(to_screen(tile.rect(), origin), 0.0, color(fill));
        }

        let stroke = egui::Stroke::new(1.0, color(BLACK));
        for x in layout.bar_markers() {
            for (top, bottom) in layout.bar_dashes() {
                painter.line_segment(
                    [
                        origin + egui::vec2(x as f32, top as f32),
                        origin + egui::vec2(x as f32, bottom as f32),
                    ],
                    stroke,
                );
            }
        }

        painter.rect_filled(
            to_screen(self.sequencer.playhead().rect(), origin),
            0.0,
            color(RED),
        );
    }
}

#[cfg(feature = "gui")]
impl eframe::App for DrumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(color(WHITE)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());

                self.handle_input(ctx, response.rect);

                let fps = self.sequencer.fps();
                for _ in 0..self.clock.ticks_due(Instant::now(), fps) {
                    self.sequencer.tick(&mut self.speakers);
                }

                self.draw(&painter, response.rect.min);

                ctx.request_repaint_after(self.clock.until_next(Instant::now(), fps));
            });
    }
}

#[cfg(feature = "gui")]
fn to_screen(rect: Rect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(rect.left as f32, rect.top as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

#[cfg(feature = "gui")]
fn color(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}
