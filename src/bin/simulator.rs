//! Desktop demo for the widget layer.
//!
//! Runs a scene with every widget type against an
//! `embedded-graphics-simulator` window standing in for the SSD1306
//! panel. Requires the `simulator` feature:
//!
//! ```text
//! cargo run --bin simulator --features simulator
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use greenhouse_oled_display::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use greenhouse_oled_display::{
    Asset, Bitmap, Canvas, DataPlot, FunctionPlot, Geometry, Scene, Table, TextBox, Widget,
};
use micromath::F32;

const FRAME_TIME: Duration = Duration::from_millis(50);

fn sine_wave(x: f32) -> f32 {
    F32(x).sin().0
}

/// Slow wobble between `min` and `max`, stands in for a real sensor.
fn fake_signal(t: f32, min: f32, max: f32, freq: f32) -> f32 {
    let normalized = F32(t * freq).sin().0 * 0.5 + 0.5;
    min + normalized * (max - min)
}

fn main() {
    let display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32));
    let output_settings = OutputSettingsBuilder::new().scale(4).build();
    let mut window = Window::new("Greenhouse OLED Sim", &output_settings);
    let mut canvas = Canvas::new(display);

    let mut scene = Scene::new();

    // Background texture behind everything else.
    let mut backdrop = Bitmap::empty(96, 40, 32, 24);
    backdrop.make_checkerboard(4);
    backdrop.base_mut().set_z_index(-1);
    let _ = scene.add(backdrop);

    let mut curve = FunctionPlot::new(0, 0, 64, 40, sine_wave);
    curve.set_x_range(0.0, 12.566);
    curve.set_auto_scale(true);
    curve.set_show_labels(true);
    curve.labels_mut().max_ticks = 3;
    curve.base_mut().set_border(true);
    let _ = scene.add(curve);

    let mut trace = DataPlot::new(64, 0, 64, 40, 64);
    trace.set_show_axes(false);
    trace.base_mut().set_border(true);
    let trace_id = match scene.add(trace) {
        Ok(id) => id,
        Err(_) => return,
    };

    let mut caption = TextBox::new(0, 42, 80, 22, "GREENHOUSE CLIMATE MONITOR");
    caption.base_mut().set_animate(true);
    let caption_id = match scene.add(caption) {
        Ok(id) => id,
        Err(_) => return,
    };

    let _ = scene.add(Geometry::line(0, 41, 127, 41));

    // Draws over the checkerboard backdrop, which shows off z-ordering.
    let mut readings = Table::new(82, 43, 46, 21, 2, 2);
    readings.set_show_headers(false);
    readings.set_cell(0, 0, "T");
    readings.set_cell(1, 0, "H");
    let readings_id = match scene.add(readings) {
        Ok(id) => id,
        Err(_) => return,
    };

    let mut t = 0.0f32;

    'running: loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { .. } => {
                    if let Some(caption) = scene
                        .get_mut(caption_id)
                        .and_then(Widget::as_text_box_mut)
                    {
                        caption.reset_animation();
                    }
                }
                _ => {}
            }
        }

        let temperature = fake_signal(t, 18.0, 32.0, 0.6);
        let humidity = fake_signal(t, 40.0, 90.0, 0.3);

        if let Some(trace) = scene.get_mut(trace_id).and_then(Widget::as_data_plot_mut) {
            trace.add_point(t, temperature);
        }
        if let Some(readings) = scene.get_mut(readings_id).and_then(Widget::as_table_mut) {
            readings.set_cell_f32(0, 1, temperature, 1);
            readings.set_cell_f32(1, 1, humidity, 0);
        }

        canvas.target_mut().clear(BinaryColor::Off).ok();
        scene.draw_all(&mut canvas);
        window.update(canvas.target_mut());

        t += 0.1;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
