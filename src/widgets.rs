use eframe::egui::{Align2, FontId, Response, Sense, Stroke, Ui, Vec2, Widget};

/// a round value picker, click or drag to point the hand at a value
///
/// 0 sits at the top and values increase clockwise, like a clock face
pub struct Dial<'a> {
    value: &'a mut u32,
    /// values run 0..=max
    max: u32,
    radius: f32,
}

impl<'a> Dial<'a> {
    pub const fn new(value: &'a mut u32, max: u32) -> Self {
        Self {
            value,
            max,
            radius: 28.0,
        }
    }

    #[must_use]
    pub const fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

impl Widget for Dial<'_> {
    // angle math partially from https://codeberg.org/pintariching/egui_timepicker
    fn ui(self, ui: &mut Ui) -> Response {
        let steps = (self.max + 1) as f32;
        let (rect, mut response) =
            ui.allocate_exact_size(Vec2::splat(self.radius * 2.0), Sense::click_and_drag());

        if response.clicked() || response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                // angle measured clockwise from the top of the face, then
                // scaled into a value
                let offset = pointer - rect.center();
                let degrees = (offset.angle().to_degrees() + 90.0).rem_euclid(360.0);
                *self.value = ((degrees / 360.0 * steps) as u32).min(self.max);
                response.mark_changed();
            }
        }

        let visuals = ui.style().interact(&response);
        let painter = ui.painter();
        painter.circle_filled(rect.center(), self.radius, visuals.bg_fill);
        painter.circle_stroke(rect.center(), self.radius, visuals.fg_stroke);

        // quarter marks around the rim
        for quarter in 0_u8..4 {
            let direction = Vec2::angled((f32::from(quarter) * 90.0 - 90.0).to_radians());
            painter.line_segment(
                [
                    rect.center() + direction * (self.radius - 4.0),
                    rect.center() + direction * self.radius,
                ],
                visuals.fg_stroke,
            );
        }

        // the hand starts away from the center so the readout stays legible
        let angle = (*self.value as f32 / steps).mul_add(360.0, -90.0).to_radians();
        let direction = Vec2::angled(angle);
        painter.line_segment(
            [
                rect.center() + direction * (self.radius * 0.45),
                rect.center() + direction * (self.radius - 5.0),
            ],
            Stroke::new(2.0, visuals.fg_stroke.color),
        );
        painter.circle_filled(
            rect.center() + direction * (self.radius - 5.0),
            3.0,
            visuals.fg_stroke.color,
        );

        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            format!("{:02}", self.value),
            FontId::monospace(12.0),
            visuals.text_color(),
        );

        response
    }
}
