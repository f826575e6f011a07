//! egui control panel and the overlay that hosts it.

use winit::window::Window;

use crate::binding::{ControlEntry, ControlSurface, ControlWidget, ParamEdit};
use crate::color::Rgb;
use crate::store::{ParamValue, ParameterSet, ParameterStore};

/// Tessellated panel output, ready for the renderer
pub struct OverlayFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// egui context bound to the window's input
pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
}

impl Overlay {
    pub fn new(window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        Self { ctx, state }
    }

    /// Feed a window event to egui. Returns true when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    /// Is the pointer over the panel (or dragging one of its widgets)?
    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input() || self.ctx.is_pointer_over_area()
    }

    /// Run one UI pass and tessellate it
    pub fn run(&mut self, window: &Window, ui: impl FnMut(&egui::Context)) -> OverlayFrame {
        let input = self.state.take_egui_input(window);
        let output = self.ctx.run(input, ui);
        self.state
            .handle_platform_output(window, output.platform_output);
        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        OverlayFrame {
            paint_jobs,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }
}

/// Wave and light controls. Edits are queued until the binding collects them.
pub struct ControlPanel {
    open: bool,
    pending: Vec<ParamEdit>,
}

impl ControlPanel {
    /// `open` expands both folders at startup
    pub fn new(open: bool) -> Self {
        Self {
            open,
            pending: Vec::new(),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, store: &ParameterStore) {
        let open = self.open;
        let pending = &mut self.pending;
        egui::Window::new("Controls")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                folder(ui, "Sphere", open, store.live(), pending);
                folder(ui, "Direction Light", open, store.scene(), pending);
            });
    }
}

impl ControlSurface for ControlPanel {
    fn take_edits(&mut self) -> Vec<ParamEdit> {
        std::mem::take(&mut self.pending)
    }
}

fn folder(
    ui: &mut egui::Ui,
    title: &str,
    open: bool,
    set: &ParameterSet,
    pending: &mut Vec<ParamEdit>,
) {
    egui::CollapsingHeader::new(title)
        .default_open(open)
        .show(ui, |ui| {
            for param in set.iter() {
                let entry = ControlEntry::from_param(param);
                if let Some(value) = entry_widget(ui, &entry) {
                    pending.push(ParamEdit::new(entry.name, value));
                }
            }
        });
}

/// Draw one entry; returns the new value when the user changed it
fn entry_widget(ui: &mut egui::Ui, entry: &ControlEntry<'_>) -> Option<ParamValue> {
    match entry.widget {
        ControlWidget::Slider {
            min,
            max,
            step,
            value,
        } => {
            let mut v = value;
            let mut slider = egui::Slider::new(&mut v, min..=max).text(entry.label);
            if step > 0.0 {
                slider = slider.step_by(step as f64);
            }
            ui.add(slider)
                .changed()
                .then_some(ParamValue::Scalar(v))
        }
        ControlWidget::ColorPicker(color) => {
            let mut rgb = color.to_srgb8();
            let changed = ui
                .horizontal(|ui| {
                    let changed = ui.color_edit_button_srgb(&mut rgb).changed();
                    ui.label(entry.label);
                    changed
                })
                .inner;
            changed.then(|| ParamValue::Color(Rgb::from_srgb8(rgb)))
        }
        ControlWidget::Checkbox(checked) => {
            let mut b = checked;
            ui.checkbox(&mut b, entry.label)
                .changed()
                .then_some(ParamValue::Boolean(b))
        }
    }
}
